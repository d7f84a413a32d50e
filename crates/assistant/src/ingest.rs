//! The ingestion coordinator.
//!
//! Single entry point for everything that flows into storage: live message
//! text and OCR-extracted image text both land here. The coordinator
//! classifies, writes the message log row plus the category row in one
//! transaction, and serializes writes per user so one user's ingestions
//! apply in submission order without stalling anyone else.

use std::collections::HashMap;
use std::sync::Arc;

use classifier::{Category, Classification, Classifier};
use database::{credential, email, link, message, note, password, Database, StoreError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AssistantError;
use crate::ocr::TextExtractor;
use crate::Result;

/// Cap on the per-user lock registry before idle entries are evicted.
const MAX_TRACKED_USERS: usize = 10_000;

/// Where ingested text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Text,
    ImageOcr,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Source::Text => "text",
            Source::ImageOcr => "image_ocr",
        }
    }
}

/// Result of one ingestion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The item was classified and stored.
    Stored { category: Category },
    /// Nothing was stored (empty input, unreadable image).
    Skipped { reason: String },
}

/// The ingestion coordinator.
///
/// Owns the database handle, the classifier, and a per-user lock registry.
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct Assistant {
    db: Database,
    classifier: Classifier,
    config: Config,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Assistant {
    /// Create a coordinator over a connected database.
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            classifier: Classifier::new(),
            config,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get a reference to the database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Get the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingest one inbound direct message.
    pub async fn ingest(&self, user_id: &str, text: &str) -> Result<IngestOutcome> {
        self.ingest_with_source(user_id, text, Source::Text).await
    }

    /// Ingest text extracted from an image by the OCR boundary.
    pub async fn ingest_extracted(&self, user_id: &str, text: &str) -> Result<IngestOutcome> {
        self.ingest_with_source(user_id, text, Source::ImageOcr)
            .await
    }

    /// Extract text from an inbound image and ingest it.
    ///
    /// An image the backend cannot read anything from is a skip, not an
    /// error; oversized images are rejected before extraction.
    pub async fn ingest_image(
        &self,
        user_id: &str,
        image: &[u8],
        extractor: &dyn TextExtractor,
    ) -> Result<IngestOutcome> {
        if image.len() > self.config.max_image_bytes {
            return Err(AssistantError::ImageRejected(format!(
                "image too large ({} bytes, max {})",
                image.len(),
                self.config.max_image_bytes
            )));
        }

        debug!(user_id, backend = extractor.name(), "extracting image text");
        match extractor.extract_text(image).await? {
            Some(text) if !text.trim().is_empty() => self.ingest_extracted(user_id, &text).await,
            _ => Ok(IngestOutcome::Skipped {
                reason: "no text found in image".to_string(),
            }),
        }
    }

    async fn ingest_with_source(
        &self,
        user_id: &str,
        text: &str,
        source: Source,
    ) -> Result<IngestOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(IngestOutcome::Skipped {
                reason: "empty message".to_string(),
            });
        }

        let text = truncate_chars(trimmed, self.config.max_stored_text_len).trim_end();

        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        match self.store_classified(user_id, text, source).await {
            Ok(category) => {
                debug!(
                    user_id,
                    category = category.as_str(),
                    source = source.as_str(),
                    "stored inbound message"
                );
                Ok(IngestOutcome::Stored { category })
            }
            Err(err) => {
                warn!(user_id, error = %err, "failed to store inbound message");
                Err(err)
            }
        }
    }

    /// Classify and write the log row plus the category row atomically.
    async fn store_classified(
        &self,
        user_id: &str,
        text: &str,
        source: Source,
    ) -> Result<Category> {
        let classification = self.classifier.classify(text);
        let category = classification.category();

        let mut tx = self.db.pool().begin().await.map_err(StoreError::from)?;

        message::append_message(&mut *tx, user_id, text, category.as_str(), source.as_str())
            .await?;

        match &classification {
            Classification::Credential {
                label,
                username,
                password,
            } => {
                credential::upsert_credential(&mut *tx, user_id, label, Some(username), password)
                    .await?;
            }
            Classification::Password { label, value } => {
                password::upsert_password(&mut *tx, user_id, label, value).await?;
            }
            Classification::Email { address } => {
                email::append_email(&mut *tx, user_id, address).await?;
            }
            Classification::Link { url } => {
                link::append_link(&mut *tx, user_id, url).await?;
            }
            Classification::Note { body } => {
                note::append_note(&mut *tx, user_id, body).await?;
            }
        }

        tx.commit().await.map_err(StoreError::from)?;
        Ok(category)
    }

    /// Get (or create) the write lock for one user.
    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;

        if locks.len() >= MAX_TRACKED_USERS {
            // Drop entries nobody is currently holding or waiting on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
