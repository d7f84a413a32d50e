//! Store models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry in the append-only message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredMessage {
    /// Auto-incrementing ID; breaks ordering ties within a timestamp.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// The raw message text as ingested (post-truncation).
    pub raw_text: String,
    /// Category the classifier assigned ("credential", "note", ...).
    pub category: String,
    /// Where the text came from: "text" or "image_ocr".
    pub source: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A stored username/password pair, unique per (user, label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Credential {
    pub id: i64,
    pub user_id: String,
    /// Case-insensitive upsert key; keeps its first-occurrence casing.
    pub label: String,
    pub username: Option<String>,
    pub password: String,
    pub created_at: String,
}

/// A stored bare password, unique per (user, label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Password {
    pub id: i64,
    pub user_id: String,
    pub label: String,
    pub value: String,
    pub created_at: String,
}

/// A free-form note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub user_id: String,
    pub body: String,
    pub created_at: String,
}

/// A stored email address. Duplicates are kept in the table and collapsed
/// at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Email {
    pub id: i64,
    pub user_id: String,
    pub address: String,
    pub created_at: String,
}

/// A stored link. Same duplicate policy as [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: String,
    pub url: String,
    pub created_at: String,
}

/// Per-category counts for one user, read in a single snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    pub passwords: i64,
    pub credentials: i64,
    pub notes: i64,
    pub emails: i64,
    pub links: i64,
    pub total_messages: i64,
}

impl CategorySummary {
    /// True when the user has no stored data at all.
    pub fn is_empty(&self) -> bool {
        self.passwords == 0
            && self.credentials == 0
            && self.notes == 0
            && self.emails == 0
            && self.links == 0
            && self.total_messages == 0
    }
}

/// One row from a cross-category search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SearchHit {
    /// Category the hit came from.
    pub category: String,
    /// The matched primary text field (note body, label, address, or url).
    pub content: String,
    pub created_at: String,
}
