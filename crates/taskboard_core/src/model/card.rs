//! Card domain model.
//!
//! # Responsibility
//! - Define the leaf work item stored under one task list.
//! - Define partial-update and move request shapes.
//!
//! # Invariants
//! - `position` orders cards within one list; duplicates and gaps are legal.
//! - `labels` keeps caller order, with blanks and duplicates removed.
//! - `due_date` is a local date-time without offset.

use crate::model::task_list::TaskListId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Store-assigned card identifier.
pub type CardId = i64;

/// Leaf work item, scoped to one task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: String,
    pub position: i64,
    /// Owning list. Not serialized, clients already address cards by list.
    #[serde(skip_serializing)]
    pub list_id: TaskListId,
    pub due_date: Option<NaiveDateTime>,
    pub labels: Vec<String>,
}

/// Request body for `POST /lists/{listId}/cards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// Partial update for one card. `None` leaves the field unchanged.
///
/// A supplied `labels` array replaces the whole label set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl CardPatch {
    /// Overwrites only the supplied fields of `card`.
    pub fn apply_to(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title = title.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(position) = self.position {
            card.position = position;
        }
        if let Some(due_date) = self.due_date {
            card.due_date = Some(due_date);
        }
        if let Some(labels) = &self.labels {
            card.labels = normalize_labels(labels);
        }
    }
}

/// Request body for `PUT /cards/{id}/move`.
///
/// `position` distinguishes three shapes:
/// - key absent: `None`, position is kept;
/// - key present with a number: `Some(Some(n))`;
/// - key present with `null`: `Some(None)`, rejected by the card service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    #[serde(default)]
    pub new_list_id: Option<TaskListId>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub position: Option<Option<i64>>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// Trims labels, drops blanks and keeps the first occurrence of duplicates.
pub fn normalize_labels(labels: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_labels, Card, CardPatch, MoveCard};
    use chrono::NaiveDate;

    fn sample_card() -> Card {
        Card {
            id: 7,
            title: "write docs".to_string(),
            description: "api section".to_string(),
            position: 3,
            list_id: 1,
            due_date: None,
            labels: vec!["docs".to_string()],
        }
    }

    #[test]
    fn normalize_labels_trims_and_deduplicates_in_order() {
        let labels = vec![
            " urgent ".to_string(),
            "bug".to_string(),
            "".to_string(),
            "urgent".to_string(),
        ];
        assert_eq!(normalize_labels(&labels), vec!["urgent", "bug"]);
    }

    #[test]
    fn patch_with_only_title_keeps_other_fields() {
        let mut card = sample_card();
        let patch = CardPatch {
            title: Some("rewrite docs".to_string()),
            ..CardPatch::default()
        };
        patch.apply_to(&mut card);

        assert_eq!(card.title, "rewrite docs");
        assert_eq!(card.description, "api section");
        assert_eq!(card.position, 3);
        assert_eq!(card.labels, vec!["docs"]);
    }

    #[test]
    fn move_payload_distinguishes_missing_and_null_position() {
        let missing: MoveCard = serde_json::from_str(r#"{"newListId": 4}"#).unwrap();
        assert_eq!(missing.new_list_id, Some(4));
        assert_eq!(missing.position, None);

        let null: MoveCard =
            serde_json::from_str(r#"{"newListId": 4, "position": null}"#).unwrap();
        assert_eq!(null.position, Some(None));

        let set: MoveCard = serde_json::from_str(r#"{"newListId": 4, "position": 2}"#).unwrap();
        assert_eq!(set.position, Some(Some(2)));
    }

    #[test]
    fn card_json_uses_camel_case_and_omits_list_reference() {
        let mut card = sample_card();
        card.due_date = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0));

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["dueDate"], "2024-05-01T00:00:00");
        assert!(value.get("listId").is_none());
        assert!(value.get("list_id").is_none());
    }
}
