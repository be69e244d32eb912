//! Board repository contract and SQLite implementation.
//!
//! # Invariants
//! - Board ids come from `AUTOINCREMENT` and are never reused.
//! - Deleting a board relies on `ON DELETE CASCADE` to remove its lists and
//!   cards, so connections must have `foreign_keys=ON`.

use crate::model::board::{Board, BoardId};
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for board persistence.
pub trait BoardRepository {
    fn create_board(&self, name: &str) -> RepoResult<Board>;
    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>>;
    fn list_boards(&self) -> RepoResult<Vec<Board>>;
    fn update_board(&self, board: &Board) -> RepoResult<()>;
    /// Returns `false` when no board had this id.
    fn delete_board(&self, id: BoardId) -> RepoResult<bool>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["boards"])?;
        Ok(Self { conn })
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn create_board(&self, name: &str) -> RepoResult<Board> {
        self.conn
            .execute("INSERT INTO boards (name) VALUES (?1);", [name])?;
        Ok(Board {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn get_board(&self, id: BoardId) -> RepoResult<Option<Board>> {
        let board = self
            .conn
            .query_row(
                "SELECT id, name FROM boards WHERE id = ?1;",
                [id],
                parse_board_row,
            )
            .optional()?;
        Ok(board)
    }

    fn list_boards(&self) -> RepoResult<Vec<Board>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM boards ORDER BY id ASC;")?;
        let boards = stmt
            .query_map([], parse_board_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(boards)
    }

    fn update_board(&self, board: &Board) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE boards SET name = ?1 WHERE id = ?2;",
            params![board.name.as_str(), board.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Board,
                id: board.id,
            });
        }

        Ok(())
    }

    fn delete_board(&self, id: BoardId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM boards WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_board_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
