//! Card repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist cards together with their ordered label set.
//! - Keep list re-parenting a single-row update.
//!
//! # Invariants
//! - Listing by list is deterministic: `position ASC, id ASC`.
//! - Card writes replace the whole label set in the same transaction.
//! - `due_date` is stored as `%Y-%m-%dT%H:%M:%S%.f` text.

use crate::model::card::{Card, CardId};
use crate::model::task_list::TaskListId;
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

const CARD_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    position,
    list_id,
    due_date
FROM cards";

const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Unsaved card fields; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub list_id: TaskListId,
    pub title: String,
    pub description: String,
    pub position: i64,
    pub due_date: Option<NaiveDateTime>,
    pub labels: Vec<String>,
}

/// Repository interface for card persistence.
pub trait CardRepository {
    fn create_card(&self, draft: &CardDraft) -> RepoResult<Card>;
    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>>;
    fn list_by_list(&self, list_id: TaskListId) -> RepoResult<Vec<Card>>;
    /// Writes every column, including `list_id`, and replaces labels.
    fn update_card(&self, card: &Card) -> RepoResult<()>;
    /// Returns `false` when no card had this id.
    fn delete_card(&self, id: CardId) -> RepoResult<bool>;
}

/// SQLite-backed card repository.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["cards", "card_labels"])?;
        Ok(Self { conn })
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn create_card(&self, draft: &CardDraft) -> RepoResult<Card> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO cards (
                title,
                description,
                position,
                list_id,
                due_date
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.title.as_str(),
                draft.description.as_str(),
                draft.position,
                draft.list_id,
                draft.due_date.map(format_due_date),
            ],
        )?;
        let id = tx.last_insert_rowid();
        replace_labels(&tx, id, &draft.labels)?;
        tx.commit()?;

        Ok(Card {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            position: draft.position,
            list_id: draft.list_id,
            due_date: draft.due_date,
            labels: draft.labels.clone(),
        })
    }

    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CARD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(self.conn, row)?));
        }

        Ok(None)
    }

    fn list_by_list(&self, list_id: TaskListId) -> RepoResult<Vec<Card>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CARD_SELECT_SQL}
             WHERE list_id = ?1
             ORDER BY position ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([list_id])?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(parse_card_row(self.conn, row)?);
        }

        Ok(cards)
    }

    fn update_card(&self, card: &Card) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE cards
             SET
                title = ?1,
                description = ?2,
                position = ?3,
                list_id = ?4,
                due_date = ?5
             WHERE id = ?6;",
            params![
                card.title.as_str(),
                card.description.as_str(),
                card.position,
                card.list_id,
                card.due_date.map(format_due_date),
                card.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Card,
                id: card.id,
            });
        }

        replace_labels(&tx, card.id, &card.labels)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_card(&self, id: CardId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM cards WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn replace_labels(conn: &Connection, card_id: CardId, labels: &[String]) -> RepoResult<()> {
    conn.execute("DELETE FROM card_labels WHERE card_id = ?1;", [card_id])?;
    for (ordinal, label) in labels.iter().enumerate() {
        conn.execute(
            "INSERT INTO card_labels (card_id, label, ordinal) VALUES (?1, ?2, ?3);",
            params![card_id, label.as_str(), ordinal as i64],
        )?;
    }
    Ok(())
}

fn load_labels(conn: &Connection, card_id: CardId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT label
         FROM card_labels
         WHERE card_id = ?1
         ORDER BY ordinal ASC;",
    )?;
    let labels = stmt
        .query_map([card_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels)
}

fn parse_card_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Card> {
    let id: CardId = row.get("id")?;
    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(value) => Some(parse_due_date(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid due date `{value}` in cards.due_date"))
        })?),
        None => None,
    };

    Ok(Card {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        position: row.get("position")?,
        list_id: row.get("list_id")?,
        due_date,
        labels: load_labels(conn, id)?,
    })
}

fn format_due_date(value: NaiveDateTime) -> String {
    value.format(DUE_DATE_FORMAT).to_string()
}

fn parse_due_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DUE_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{format_due_date, parse_due_date};
    use chrono::NaiveDate;

    #[test]
    fn due_date_text_survives_storage_format() {
        let value = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .unwrap();
        let stored = format_due_date(value);
        assert_eq!(stored, "2024-05-01T09:30:00");
        assert_eq!(parse_due_date(&stored), Some(value));
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        assert_eq!(parse_due_date("next tuesday"), None);
    }
}
