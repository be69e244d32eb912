//! Task list repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing by board is deterministic: `position ASC, id ASC`.
//! - Deleting a list cascades to its cards through the foreign key.

use crate::model::board::BoardId;
use crate::model::task_list::{TaskList, TaskListId};
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_LIST_SELECT_SQL: &str = "SELECT id, title, position, board_id FROM task_lists";

/// Repository interface for task list persistence.
pub trait TaskListRepository {
    fn create_list(&self, board_id: BoardId, title: &str, position: i64)
        -> RepoResult<TaskList>;
    fn get_list(&self, id: TaskListId) -> RepoResult<Option<TaskList>>;
    fn list_by_board(&self, board_id: BoardId) -> RepoResult<Vec<TaskList>>;
    fn update_list(&self, list: &TaskList) -> RepoResult<()>;
    /// Returns `false` when no list had this id.
    fn delete_list(&self, id: TaskListId) -> RepoResult<bool>;
}

/// SQLite-backed task list repository.
pub struct SqliteTaskListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskListRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["task_lists"])?;
        Ok(Self { conn })
    }
}

impl TaskListRepository for SqliteTaskListRepository<'_> {
    fn create_list(
        &self,
        board_id: BoardId,
        title: &str,
        position: i64,
    ) -> RepoResult<TaskList> {
        self.conn.execute(
            "INSERT INTO task_lists (title, position, board_id) VALUES (?1, ?2, ?3);",
            params![title, position, board_id],
        )?;
        Ok(TaskList {
            id: self.conn.last_insert_rowid(),
            title: title.to_string(),
            position,
            board_id,
        })
    }

    fn get_list(&self, id: TaskListId) -> RepoResult<Option<TaskList>> {
        let list = self
            .conn
            .query_row(
                &format!("{TASK_LIST_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_task_list_row,
            )
            .optional()?;
        Ok(list)
    }

    fn list_by_board(&self, board_id: BoardId) -> RepoResult<Vec<TaskList>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_LIST_SELECT_SQL}
             WHERE board_id = ?1
             ORDER BY position ASC, id ASC;"
        ))?;
        let lists = stmt
            .query_map([board_id], parse_task_list_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    fn update_list(&self, list: &TaskList) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE task_lists
             SET
                title = ?1,
                position = ?2,
                board_id = ?3
             WHERE id = ?4;",
            params![list.title.as_str(), list.position, list.board_id, list.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::TaskList,
                id: list.id,
            });
        }

        Ok(())
    }

    fn delete_list(&self, id: TaskListId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM task_lists WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_task_list_row(row: &Row<'_>) -> rusqlite::Result<TaskList> {
    Ok(TaskList {
        id: row.get("id")?,
        title: row.get("title")?,
        position: row.get("position")?,
        board_id: row.get("board_id")?,
    })
}
