//! Core domain logic for the task board backend.
//! This crate owns the board/list/card invariants and their persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::board::{Board, BoardId, BoardInput};
pub use model::card::{Card, CardId, CardPatch, MoveCard, NewCard};
pub use model::task_list::{NewTaskList, TaskList, TaskListId, TaskListPatch, DEFAULT_POSITION};
pub use model::user::{Credentials, User, UserId};
pub use repo::board_repo::{BoardRepository, SqliteBoardRepository};
pub use repo::card_repo::{CardDraft, CardRepository, SqliteCardRepository};
pub use repo::list_repo::{SqliteTaskListRepository, TaskListRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::auth_service::AuthService;
pub use service::board_service::BoardService;
pub use service::card_service::CardService;
pub use service::list_service::ListService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
