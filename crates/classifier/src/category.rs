//! Storage categories.

use serde::{Deserialize, Serialize};

/// The storage category an inbound message resolves to.
///
/// This is the fieldless mirror of [`crate::Classification`], used wherever
/// only the kind matters (message log rows, summaries, log fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Username/password pair with a label.
    Credential,
    /// Bare labeled password, no username.
    Password,
    /// Email address.
    Email,
    /// URL.
    Link,
    /// Free-form text fallback.
    Note,
}

impl Category {
    /// Stable lowercase name, used as the `category` column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Credential => "credential",
            Category::Password => "password",
            Category::Email => "email",
            Category::Link => "link",
            Category::Note => "note",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
