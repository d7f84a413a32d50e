//! Command parsing and dispatch.
//!
//! The retrieval surface: recognized verbs route into store reads and render
//! a plain-text reply. Anything unrecognized yields `None` and falls through
//! to ingestion. Retrieval is user-initiated, so it always answers — misses
//! get an explicit "not found" rather than silence.

use database::{credential, email, link, message, note, password, search, summary};
use database::{Database, StoreError};

use crate::config::Config;
use crate::Result;

/// Display cap for listings; longer lists get an "... and N more" trailer.
const MAX_LISTED: usize = 10;

/// Default entry count for `recent` when no number is given.
const DEFAULT_RECENT: usize = 5;

/// Preview length for message/search result lines.
const PREVIEW_CHARS: usize = 100;

/// A parsed retrieval command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetPassword { label: String },
    GetCredentials,
    GetCredential { label: String },
    GetNotes,
    GetEmails,
    GetLinks,
    List,
    Clear,
    Recent { limit: Option<usize> },
    Search { term: String },
    Help,
}

impl Command {
    /// Parse a message as a command.
    ///
    /// Verbs are case-insensitive and may carry the legacy `!` sigil.
    /// Returns `None` for anything that is not a recognized verb — the
    /// caller routes such text to ingestion instead.
    pub fn parse(text: &str) -> Option<Command> {
        let trimmed = text.trim();
        let body = trimmed.strip_prefix('!').unwrap_or(trimmed).trim_start();
        if body.is_empty() {
            return None;
        }

        // Plural before singular: "get credentials" must not parse as
        // "get credential" with label "s".
        if let Some(rest) = strip_verb(body, "get password") {
            return Some(Command::GetPassword {
                label: rest.to_string(),
            });
        }
        if strip_verb(body, "get credentials").is_some() {
            return Some(Command::GetCredentials);
        }
        if let Some(rest) = strip_verb(body, "get credential") {
            return Some(Command::GetCredential {
                label: rest.to_string(),
            });
        }
        if strip_verb(body, "get notes").is_some() {
            return Some(Command::GetNotes);
        }
        if strip_verb(body, "get emails").is_some() {
            return Some(Command::GetEmails);
        }
        if strip_verb(body, "get links").is_some() {
            return Some(Command::GetLinks);
        }
        if strip_verb(body, "list").is_some() {
            return Some(Command::List);
        }
        if strip_verb(body, "clear").is_some() {
            return Some(Command::Clear);
        }
        if let Some(rest) = strip_verb(body, "recent") {
            let limit = rest.split_whitespace().next().and_then(|n| n.parse().ok());
            return Some(Command::Recent { limit });
        }
        if let Some(rest) = strip_verb(body, "search") {
            return Some(Command::Search {
                term: rest.to_string(),
            });
        }
        if strip_verb(body, "help").is_some() {
            return Some(Command::Help);
        }

        None
    }
}

/// Match `verb` as a case-insensitive prefix of `text` on a word boundary,
/// returning the trimmed remainder.
fn strip_verb<'a>(text: &'a str, verb: &str) -> Option<&'a str> {
    let prefix = text.get(..verb.len())?;
    if !prefix.eq_ignore_ascii_case(verb) {
        return None;
    }
    let rest = &text[verb.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Executes parsed commands against the retrieval layer.
pub struct CommandHandler {
    db: Database,
    config: Config,
}

impl CommandHandler {
    /// Create a handler over a connected database.
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }

    /// Handle one inbound message.
    ///
    /// Returns `Ok(Some(reply))` if the text parsed as a command,
    /// `Ok(None)` if it should be ingested instead.
    pub async fn handle(&self, user_id: &str, text: &str) -> Result<Option<String>> {
        match Command::parse(text) {
            Some(command) => self.dispatch(user_id, command).await.map(Some),
            None => Ok(None),
        }
    }

    async fn dispatch(&self, user_id: &str, command: Command) -> Result<String> {
        match command {
            Command::GetPassword { label } => self.get_password(user_id, &label).await,
            Command::GetCredentials => self.get_credentials(user_id).await,
            Command::GetCredential { label } => self.get_credential(user_id, &label).await,
            Command::GetNotes => self.get_notes(user_id).await,
            Command::GetEmails => self.get_emails(user_id).await,
            Command::GetLinks => self.get_links(user_id).await,
            Command::List => self.list(user_id).await,
            Command::Clear => self.clear(user_id).await,
            Command::Recent { limit } => self.recent(user_id, limit).await,
            Command::Search { term } => self.search(user_id, &term).await,
            Command::Help => Ok(help_text()),
        }
    }

    async fn get_password(&self, user_id: &str, label: &str) -> Result<String> {
        if label.is_empty() {
            return Ok("Usage: get password <label>".to_string());
        }
        match password::get_password(self.db.pool(), user_id, label).await {
            Ok(row) => Ok(format!("Password for '{}': {}", row.label, row.value)),
            Err(StoreError::NotFound { .. }) => {
                Ok(format!("No password found for label '{label}'"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_credential(&self, user_id: &str, label: &str) -> Result<String> {
        if label.is_empty() {
            return Ok("Usage: get credential <label>".to_string());
        }
        match credential::get_credential(self.db.pool(), user_id, label).await {
            Ok(row) => Ok(format!(
                "{}:\n  username: {}\n  password: {}",
                row.label,
                row.username.as_deref().unwrap_or("-"),
                row.password
            )),
            Err(StoreError::NotFound { .. }) => {
                Ok(format!("No credentials found for label '{label}'"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_credentials(&self, user_id: &str) -> Result<String> {
        let rows = credential::list_credentials(self.db.pool(), user_id).await?;
        if rows.is_empty() {
            return Ok("No credentials found.".to_string());
        }

        let mut response = String::from("Your credentials:\n");
        for (i, row) in rows.iter().take(MAX_LISTED).enumerate() {
            response.push_str(&format!(
                "{}. {}\n   username: {}\n   password: {}\n",
                i + 1,
                row.label,
                row.username.as_deref().unwrap_or("-"),
                row.password
            ));
        }
        push_overflow(&mut response, rows.len(), "credentials");
        Ok(response.trim_end().to_string())
    }

    async fn get_notes(&self, user_id: &str) -> Result<String> {
        let rows = note::list_notes(self.db.pool(), user_id).await?;
        if rows.is_empty() {
            return Ok("No notes found.".to_string());
        }

        let mut response = String::from("Your notes:\n");
        for (i, row) in rows.iter().take(MAX_LISTED).enumerate() {
            response.push_str(&format!("{}. {}\n", i + 1, row.body));
        }
        push_overflow(&mut response, rows.len(), "notes");
        Ok(response.trim_end().to_string())
    }

    async fn get_emails(&self, user_id: &str) -> Result<String> {
        let rows = email::list_emails(self.db.pool(), user_id).await?;
        if rows.is_empty() {
            return Ok("No emails found.".to_string());
        }

        let mut response = String::from("Your emails:\n");
        for (i, row) in rows.iter().take(MAX_LISTED).enumerate() {
            response.push_str(&format!("{}. {}\n", i + 1, row.address));
        }
        push_overflow(&mut response, rows.len(), "emails");
        Ok(response.trim_end().to_string())
    }

    async fn get_links(&self, user_id: &str) -> Result<String> {
        let rows = link::list_links(self.db.pool(), user_id).await?;
        if rows.is_empty() {
            return Ok("No links found.".to_string());
        }

        let mut response = String::from("Your links:\n");
        for (i, row) in rows.iter().take(MAX_LISTED).enumerate() {
            response.push_str(&format!("{}. {}\n", i + 1, row.url));
        }
        push_overflow(&mut response, rows.len(), "links");
        Ok(response.trim_end().to_string())
    }

    async fn list(&self, user_id: &str) -> Result<String> {
        let counts = summary::category_summary(self.db.pool(), user_id).await?;
        if counts.is_empty() {
            return Ok(
                "No data stored yet. Send me messages, passwords, notes, emails, or links!"
                    .to_string(),
            );
        }

        Ok(format!(
            "Your stored data:\n  Total messages: {}\n  Passwords: {}\n  Credentials: {}\n  Notes: {}\n  Emails: {}\n  Links: {}",
            counts.total_messages,
            counts.passwords,
            counts.credentials,
            counts.notes,
            counts.emails,
            counts.links
        ))
    }

    async fn clear(&self, user_id: &str) -> Result<String> {
        summary::clear_user(self.db.pool(), user_id).await?;
        Ok("All your data has been cleared.".to_string())
    }

    async fn recent(&self, user_id: &str, limit: Option<usize>) -> Result<String> {
        let cap = self.config.max_recent_messages.max(1);
        let limit = limit.unwrap_or(DEFAULT_RECENT).clamp(1, cap);

        let rows = message::recent_messages(self.db.pool(), user_id, limit as i64).await?;
        if rows.is_empty() {
            return Ok("No recent messages found.".to_string());
        }

        let mut response = format!("Recent messages ({}):\n", rows.len());
        for (i, row) in rows.iter().enumerate() {
            response.push_str(&format!(
                "{}. [{}] {}\n",
                i + 1,
                row.category,
                preview(&row.raw_text)
            ));
        }
        Ok(response.trim_end().to_string())
    }

    async fn search(&self, user_id: &str, term: &str) -> Result<String> {
        if term.trim().is_empty() {
            return Ok("Usage: search <term>".to_string());
        }

        let hits = search::search_user_data(
            self.db.pool(),
            user_id,
            term,
            self.config.max_search_results as i64,
        )
        .await?;
        if hits.is_empty() {
            return Ok(format!("No matches found for '{term}'"));
        }

        let mut response = format!("Search results for '{}' ({}):\n", term, hits.len());
        for (i, hit) in hits.iter().enumerate() {
            response.push_str(&format!(
                "{}. [{}] {}\n",
                i + 1,
                hit.category,
                preview(&hit.content)
            ));
        }
        Ok(response.trim_end().to_string())
    }
}

fn push_overflow(response: &mut String, total: usize, noun: &str) {
    if total > MAX_LISTED {
        response.push_str(&format!("... and {} more {}.", total - MAX_LISTED, noun));
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn help_text() -> String {
    "Available commands:\n\
     get password <label> - get a saved password\n\
     get credentials - get all your saved credentials\n\
     get credential <label> - get specific credentials by label\n\
     get notes - get all your notes\n\
     get emails - get all your saved emails\n\
     get links - get all your saved links\n\
     list - show a summary of your stored data\n\
     clear - clear all your data\n\
     recent [n] - show recent messages (default: 5)\n\
     search <term> - search through your stored data\n\
     help - show this message\n\
     \n\
     Anything else is stored and categorized automatically: credentials, \
     passwords, emails, links, and notes."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Assistant, Config};
    use database::Database;

    #[test]
    fn test_parse_verbs() {
        assert_eq!(
            Command::parse("get password gmail"),
            Some(Command::GetPassword {
                label: "gmail".to_string()
            })
        );
        assert_eq!(Command::parse("get credentials"), Some(Command::GetCredentials));
        assert_eq!(
            Command::parse("get credential Gmail"),
            Some(Command::GetCredential {
                label: "Gmail".to_string()
            })
        );
        assert_eq!(Command::parse("get notes"), Some(Command::GetNotes));
        assert_eq!(Command::parse("get emails"), Some(Command::GetEmails));
        assert_eq!(Command::parse("get links"), Some(Command::GetLinks));
        assert_eq!(Command::parse("list"), Some(Command::List));
        assert_eq!(Command::parse("clear"), Some(Command::Clear));
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(
            Command::parse("recent"),
            Some(Command::Recent { limit: None })
        );
        assert_eq!(
            Command::parse("recent 3"),
            Some(Command::Recent { limit: Some(3) })
        );
        assert_eq!(
            Command::parse("search gmail"),
            Some(Command::Search {
                term: "gmail".to_string()
            })
        );
    }

    #[test]
    fn test_parse_accepts_bang_sigil_and_any_case() {
        assert_eq!(Command::parse("!list"), Some(Command::List));
        assert_eq!(Command::parse("LIST"), Some(Command::List));
        assert_eq!(
            Command::parse("!Get Password wifi"),
            Some(Command::GetPassword {
                label: "wifi".to_string()
            })
        );
    }

    #[test]
    fn test_parse_requires_word_boundary() {
        // "listen" is not "list"; plain prose falls through to ingest.
        assert_eq!(Command::parse("listen to this song"), None);
        assert_eq!(Command::parse("clearly a note"), None);
        assert_eq!(Command::parse("searching for meaning"), None);
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert_eq!(Command::parse("password: gmail secret123"), None);
        assert_eq!(Command::parse("john@example.com"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("!"), None);
    }

    #[test]
    fn test_parse_invalid_recent_count_falls_back() {
        assert_eq!(
            Command::parse("recent lots"),
            Some(Command::Recent { limit: None })
        );
    }

    async fn test_handler() -> (Assistant, CommandHandler) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let config = Config::default();
        (
            Assistant::new(db.clone(), config.clone()),
            CommandHandler::new(db, config),
        )
    }

    #[tokio::test]
    async fn test_non_command_returns_none() {
        let (_, handler) = test_handler().await;
        let reply = handler.handle("alice", "just a note").await.unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_get_password_round_trip() {
        let (assistant, handler) = test_handler().await;

        assistant
            .ingest("alice", "password: gmail mypassword123")
            .await
            .unwrap();

        let reply = handler
            .handle("alice", "get password gmail")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply, "Password for 'gmail': mypassword123");
    }

    #[tokio::test]
    async fn test_get_password_miss_answers_explicitly() {
        let (_, handler) = test_handler().await;

        let reply = handler
            .handle("alice", "get password nothing")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply, "No password found for label 'nothing'");
    }

    #[tokio::test]
    async fn test_get_credential_round_trip() {
        let (assistant, handler) = test_handler().await;

        assistant
            .ingest("alice", "Gmail - username: john@gmail.com password: mypass123")
            .await
            .unwrap();

        let reply = handler
            .handle("alice", "get credential Gmail")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("username: john@gmail.com"));
        assert!(reply.contains("password: mypass123"));
    }

    #[tokio::test]
    async fn test_list_summary_scenario() {
        let (assistant, handler) = test_handler().await;

        assistant.ingest("alice", "john@example.com").await.unwrap();
        assistant
            .ingest("alice", "https://github.com/user/repo")
            .await
            .unwrap();
        assistant
            .ingest("alice", "Remember to buy groceries")
            .await
            .unwrap();

        let reply = handler.handle("alice", "list").await.unwrap().unwrap();
        assert!(reply.contains("Total messages: 3"));
        assert!(reply.contains("Emails: 1"));
        assert!(reply.contains("Links: 1"));
        assert!(reply.contains("Notes: 1"));
    }

    #[tokio::test]
    async fn test_list_with_no_data() {
        let (_, handler) = test_handler().await;

        let reply = handler.handle("alice", "list").await.unwrap().unwrap();
        assert!(reply.starts_with("No data stored yet."));
    }

    #[tokio::test]
    async fn test_clear_wipes_everything() {
        let (assistant, handler) = test_handler().await;

        assistant.ingest("alice", "a note to erase").await.unwrap();
        let reply = handler.handle("alice", "clear").await.unwrap().unwrap();
        assert_eq!(reply, "All your data has been cleared.");

        let reply = handler.handle("alice", "get notes").await.unwrap().unwrap();
        assert_eq!(reply, "No notes found.");
    }

    #[tokio::test]
    async fn test_recent_clamps_requested_count() {
        let (assistant, handler) = test_handler().await;

        for i in 0..5 {
            assistant
                .ingest("alice", &format!("note number {i}"))
                .await
                .unwrap();
        }

        // Requested far above the configured cap; still answers sanely.
        let reply = handler
            .handle("alice", "recent 100000")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.starts_with("Recent messages (5):"));

        // Newest first.
        assert!(reply.contains("1. [note] note number 4"));
    }

    #[tokio::test]
    async fn test_search_empty_term_never_dumps_data() {
        let (assistant, handler) = test_handler().await;

        assistant.ingest("alice", "super secret note").await.unwrap();

        let reply = handler.handle("alice", "search").await.unwrap().unwrap();
        assert_eq!(reply, "Usage: search <term>");
    }

    #[tokio::test]
    async fn test_search_finds_matches() {
        let (assistant, handler) = test_handler().await;

        assistant.ingest("alice", "my gmail recovery note").await.unwrap();
        assistant.ingest("alice", "unrelated thing").await.unwrap();

        let reply = handler
            .handle("alice", "search gmail")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.starts_with("Search results for 'gmail' (1):"));
        assert!(reply.contains("[note] my gmail recovery note"));
    }

    #[tokio::test]
    async fn test_listing_overflow_trailer() {
        let (assistant, handler) = test_handler().await;

        for i in 0..12 {
            assistant
                .ingest("alice", &format!("note {i:02}"))
                .await
                .unwrap();
        }

        let reply = handler.handle("alice", "get notes").await.unwrap().unwrap();
        assert!(reply.contains("... and 2 more notes."));
    }

    #[tokio::test]
    async fn test_emails_listing_dedups_on_display() {
        let (assistant, handler) = test_handler().await;

        assistant.ingest("alice", "a@b.com").await.unwrap();
        assistant.ingest("alice", "A@B.com").await.unwrap();

        let reply = handler.handle("alice", "get emails").await.unwrap().unwrap();
        assert_eq!(reply, "Your emails:\n1. a@b.com");

        // The underlying log still has both occurrences.
        let counts = summary::category_summary(assistant.database().pool(), "alice")
            .await
            .unwrap();
        assert_eq!(counts.emails, 2);
        assert_eq!(counts.total_messages, 2);
    }

    #[tokio::test]
    async fn test_commands_are_user_scoped() {
        let (assistant, handler) = test_handler().await;

        assistant
            .ingest("alice", "password: gmail alicepw")
            .await
            .unwrap();

        let reply = handler
            .handle("bob", "get password gmail")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply, "No password found for label 'gmail'");
    }
}
