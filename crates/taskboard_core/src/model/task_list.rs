//! Task list domain model.
//!
//! # Invariants
//! - `position` orders lists within one board; duplicates and gaps are legal.
//! - `position` defaults to `0` when omitted on create.

use crate::model::board::BoardId;
use serde::{Deserialize, Serialize};

/// Store-assigned task list identifier.
pub type TaskListId = i64;

/// Position assigned to lists and cards created without one.
pub const DEFAULT_POSITION: i64 = 0;

/// Ordered container of cards, scoped to one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskList {
    pub id: TaskListId,
    pub title: String,
    pub position: i64,
    /// Owning board. Not serialized, clients already address lists by board.
    #[serde(skip_serializing)]
    pub board_id: BoardId,
}

/// Request body for `POST /boards/{boardId}/lists`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewTaskList {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
}

/// Partial update for one task list. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskListPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
}

impl TaskListPatch {
    /// Overwrites only the supplied fields of `list`.
    pub fn apply_to(&self, list: &mut TaskList) {
        if let Some(title) = &self.title {
            list.title = title.clone();
        }
        if let Some(position) = self.position {
            list.position = position;
        }
    }
}
