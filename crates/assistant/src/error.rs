//! Assistant error types.

use thiserror::Error;

use crate::ocr::ExtractError;

/// Errors that can occur while coordinating ingestion or commands.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Error from the persistence layer.
    #[error("store error: {0}")]
    Store(#[from] database::StoreError),

    /// Inbound image was rejected before extraction.
    #[error("image rejected: {0}")]
    ImageRejected(String),

    /// The OCR backend failed.
    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
