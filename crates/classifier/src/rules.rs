//! The ordered classification rule cascade.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Category;

/// Labeled credential: `<label> - username: X password: Y`, with `-`, `–`,
/// `—`, or `:` between the label and the marker pair.
const LABELED_CREDENTIAL: &str = r"(?i)^\s*(?P<label>[^:\n]+?)\s*[-–—:]\s*\b(?:username|user|login)\b\s*:\s*(?P<user>[^\s:]+)\s+\b(?:password|pass|pwd)\b\s*:\s*(?P<pass>\S+)";

/// Bare credential: `username: X password: Y` anywhere in the text.
const BARE_CREDENTIAL: &str = r"(?i)\b(?:username|user|login)\b\s*:\s*(?P<user>[^\s:]+)\s+\b(?:password|pass|pwd)\b\s*:\s*(?P<pass>\S+)";

/// Compact credential: a whole line of the form `<label> - <user>: <secret>`.
const COMPACT_CREDENTIAL: &str = r"(?i)^\s*(?P<label>[^:\n]+?)\s*[-–—]\s*(?P<user>[^\s:]+)\s*:\s*(?P<pass>\S+)\s*$";

/// Bare password: `password: <label> <value>` / `pass: <label> <value>`.
const PASSWORD_ONLY: &str = r"(?i)^\s*(?:password|pass)\b\s*:\s*(?P<rest>[^\n]+)";

/// Permissive `local@domain.tld` shape; domain needs at least one dot.
const EMAIL: &str = r"[^\s@]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+";

/// `http://` or `https://` followed by at least one non-whitespace char.
const URL: &str = r"(?i)https?://\S+";

/// The outcome of classifying one raw message.
///
/// A tagged variant per storage category, carrying the fields extracted from
/// the text. Call sites must handle every variant; there is no error case —
/// [`Classification::Note`] is the universal fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Username/password pair under a label.
    Credential {
        label: String,
        username: String,
        password: String,
    },
    /// Bare labeled password.
    Password { label: String, value: String },
    /// First email-shaped substring in the text.
    Email { address: String },
    /// First URL in the text.
    Link { url: String },
    /// Everything else, stored verbatim (trimmed).
    Note { body: String },
}

impl Classification {
    /// The storage category this classification resolves to.
    pub fn category(&self) -> Category {
        match self {
            Classification::Credential { .. } => Category::Credential,
            Classification::Password { .. } => Category::Password,
            Classification::Email { .. } => Category::Email,
            Classification::Link { .. } => Category::Link,
            Classification::Note { .. } => Category::Note,
        }
    }
}

/// Rule-based message classifier.
///
/// Compiles the rule patterns once; [`Classifier::classify`] is pure and
/// deterministic. Rule order is significant and fixed: credential shapes,
/// then bare password, then email, then URL, then the note fallback. Later
/// rules never fire once an earlier one matches.
pub struct Classifier {
    labeled_credential: Regex,
    bare_credential: Regex,
    compact_credential: Regex,
    password_only: Regex,
    email: Regex,
    url: Regex,
}

impl Classifier {
    /// Build a classifier with the fixed rule set.
    pub fn new() -> Self {
        Self {
            labeled_credential: compile(LABELED_CREDENTIAL),
            bare_credential: compile(BARE_CREDENTIAL),
            compact_credential: compile(COMPACT_CREDENTIAL),
            password_only: compile(PASSWORD_ONLY),
            email: compile(EMAIL),
            url: compile(URL),
        }
    }

    /// Classify raw message text into exactly one category.
    ///
    /// Never fails; callers are expected to skip empty/whitespace-only input
    /// before storage, but classifying it is still well-defined (an empty
    /// note).
    pub fn classify(&self, text: &str) -> Classification {
        if let Some(credential) = self.match_credential(text) {
            return credential;
        }
        if let Some(password) = self.match_password(text) {
            return password;
        }
        if let Some(found) = self.email.find(text) {
            return Classification::Email {
                address: found.as_str().to_string(),
            };
        }
        if let Some(found) = self.url.find(text) {
            return Classification::Link {
                url: found.as_str().to_string(),
            };
        }
        Classification::Note {
            body: text.trim().to_string(),
        }
    }

    /// Try the three credential shapes in order: labeled, bare, compact.
    fn match_credential(&self, text: &str) -> Option<Classification> {
        if let Some(caps) = self.labeled_credential.captures(text) {
            let label = caps["label"].trim();
            let username = caps["user"].trim();
            let password = caps["pass"].trim();
            if !username.is_empty() && !password.is_empty() {
                let label = if label.is_empty() {
                    default_label(username)
                } else {
                    label.to_string()
                };
                return Some(credential(label, username, password));
            }
        }

        if let Some(caps) = self.bare_credential.captures(text) {
            let username = caps["user"].trim();
            let password = caps["pass"].trim();
            if !username.is_empty() && !password.is_empty() {
                return Some(credential(default_label(username), username, password));
            }
        }

        if let Some(caps) = self.compact_credential.captures(text) {
            let label = caps["label"].trim();
            let username = caps["user"].trim();
            let password = caps["pass"].trim();
            // A marker word in the user position means the text declared a
            // field it never paired up; ambiguity resolves toward Note.
            if !label.is_empty()
                && !username.is_empty()
                && !password.is_empty()
                && !is_marker_word(username)
            {
                return Some(credential(label.to_string(), username, password));
            }
        }

        None
    }

    /// `password: <label> <value>` — the final whitespace-delimited token is
    /// the value, everything between the marker and it is the label.
    fn match_password(&self, text: &str) -> Option<Classification> {
        let caps = self.password_only.captures(text)?;
        let rest = caps["rest"].trim();
        let (label, value) = rest.rsplit_once(char::is_whitespace)?;
        let label = label.trim();
        let value = value.trim();
        if label.is_empty() || value.is_empty() {
            return None;
        }
        Some(Classification::Password {
            label: label.to_string(),
            value: value.to_string(),
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    // All patterns are fixed literals above; compilation cannot fail.
    Regex::new(pattern).expect("static classifier pattern")
}

fn credential(label: String, username: &str, password: &str) -> Classification {
    Classification::Credential {
        label,
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Generic label for credentials that arrive without a service name.
fn default_label(username: &str) -> String {
    format!("Account_{username}")
}

fn is_marker_word(token: &str) -> bool {
    ["username", "user", "login", "password", "pass", "pwd"]
        .iter()
        .any(|marker| token.eq_ignore_ascii_case(marker))
}
