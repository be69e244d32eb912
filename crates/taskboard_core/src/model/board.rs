//! Board domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned board identifier.
pub type BoardId = i64;

/// Top-level container owning an ordered set of task lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
}

/// Request body for board create and update.
///
/// `name` is optional on the wire; a missing or null value is stored as the
/// empty string because board updates overwrite unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoardInput {
    #[serde(default)]
    pub name: Option<String>,
}

impl BoardInput {
    /// Returns the name to persist.
    pub fn into_name(self) -> String {
        self.name.unwrap_or_default()
    }
}
