//! Board use-case service.
//!
//! # Invariants
//! - `update_board` overwrites `name` unconditionally (no partial update).
//! - Deleting a missing board is a no-op success.

use crate::model::board::{Board, BoardId};
use crate::repo::board_repo::BoardRepository;
use crate::repo::EntityKind;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info};

/// Use-case service for boards.
pub struct BoardService<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every board in id order.
    pub fn list_boards(&self) -> ServiceResult<Vec<Board>> {
        Ok(self.repo.list_boards()?)
    }

    /// Creates a board and returns it with its store-assigned id.
    pub fn create_board(&self, name: impl Into<String>) -> ServiceResult<Board> {
        let name = name.into();
        let board = self.repo.create_board(name.as_str())?;
        info!(
            "event=board_create module=service status=ok board_id={}",
            board.id
        );
        Ok(board)
    }

    /// Replaces the board name.
    pub fn update_board(&self, id: BoardId, name: impl Into<String>) -> ServiceResult<Board> {
        let mut board = self.repo.get_board(id)?.ok_or(ServiceError::NotFound {
            kind: EntityKind::Board,
            id,
        })?;
        board.name = name.into();
        self.repo.update_board(&board)?;
        info!("event=board_update module=service status=ok board_id={id}");
        Ok(board)
    }

    /// Deletes a board with all of its lists and cards.
    pub fn delete_board(&self, id: BoardId) -> ServiceResult<()> {
        if self.repo.delete_board(id)? {
            info!("event=board_delete module=service status=ok board_id={id}");
        } else {
            debug!("event=board_delete module=service status=noop board_id={id}");
        }
        Ok(())
    }
}
