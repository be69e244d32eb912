//! Task list use-case service.
//!
//! # Invariants
//! - A list is only created under an existing board.
//! - `position` defaults to `DEFAULT_POSITION` and is never compacted.
//! - Updates overwrite only supplied fields.

use crate::model::board::BoardId;
use crate::model::task_list::{NewTaskList, TaskList, TaskListId, TaskListPatch, DEFAULT_POSITION};
use crate::repo::board_repo::BoardRepository;
use crate::repo::list_repo::TaskListRepository;
use crate::repo::EntityKind;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info};

/// Use-case service for task lists scoped to a board.
pub struct ListService<L: TaskListRepository, B: BoardRepository> {
    lists: L,
    boards: B,
}

impl<L: TaskListRepository, B: BoardRepository> ListService<L, B> {
    /// Creates a service from list and board repositories.
    pub fn new(lists: L, boards: B) -> Self {
        Self { lists, boards }
    }

    /// Lists a board's task lists by ascending position.
    ///
    /// An unknown board yields an empty result rather than an error.
    pub fn list_by_board(&self, board_id: BoardId) -> ServiceResult<Vec<TaskList>> {
        Ok(self.lists.list_by_board(board_id)?)
    }

    /// Creates a task list under `board_id`.
    pub fn create_list(&self, board_id: BoardId, input: NewTaskList) -> ServiceResult<TaskList> {
        if self.boards.get_board(board_id)?.is_none() {
            debug!("event=list_create module=service status=miss board_id={board_id}");
            return Err(ServiceError::NotFound {
                kind: EntityKind::Board,
                id: board_id,
            });
        }

        let title = input.title.unwrap_or_default();
        let position = input.position.unwrap_or(DEFAULT_POSITION);
        let list = self.lists.create_list(board_id, title.as_str(), position)?;
        info!(
            "event=list_create module=service status=ok list_id={} board_id={} position={}",
            list.id, board_id, position
        );
        Ok(list)
    }

    /// Applies a partial update to one task list.
    pub fn update_list(&self, id: TaskListId, patch: &TaskListPatch) -> ServiceResult<TaskList> {
        let mut list = self.lists.get_list(id)?.ok_or(ServiceError::NotFound {
            kind: EntityKind::TaskList,
            id,
        })?;
        patch.apply_to(&mut list);
        self.lists.update_list(&list)?;
        info!(
            "event=list_update module=service status=ok list_id={} position={}",
            id, list.position
        );
        Ok(list)
    }

    /// Deletes a task list and its cards.
    pub fn delete_list(&self, id: TaskListId) -> ServiceResult<()> {
        if self.lists.delete_list(id)? {
            info!("event=list_delete module=service status=ok list_id={id}");
        } else {
            debug!("event=list_delete module=service status=noop list_id={id}");
        }
        Ok(())
    }
}
