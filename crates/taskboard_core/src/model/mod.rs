//! Task board domain model.
//!
//! # Responsibility
//! - Define the board/list/card/user records shared by repositories and
//!   services.
//! - Define the request shapes accepted by create/update/move use-cases.
//!
//! # Invariants
//! - Ownership is stored child-to-parent only (`TaskList::board_id`,
//!   `Card::list_id`); parents compute children by query.
//! - Back-references and password material are never serialized.

pub mod board;
pub mod card;
pub mod task_list;
pub mod user;
