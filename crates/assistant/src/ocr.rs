//! The OCR boundary.
//!
//! Text extraction is an external collaborator; the core only consumes its
//! output. Implementations wrap whatever backend does the real work
//! (tesseract process, vision API, ...).

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a text-extraction backend.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The backend failed to process the image.
    #[error("extraction backend failed: {0}")]
    Backend(String),

    /// The backend does not understand this image format.
    #[error("unsupported image format")]
    UnsupportedFormat,
}

/// Black-box text extraction from image bytes.
///
/// `Ok(None)` means the image was processed but contained no readable text;
/// that is a normal outcome, not an error.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image: &[u8]) -> Result<Option<String>, ExtractError>;

    /// Human-readable backend name for logging.
    fn name(&self) -> &str;
}
