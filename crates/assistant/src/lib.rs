//! Ingestion coordinator and command surface for Keeper.
//!
//! This crate ties the pure classifier to the persistence layer:
//!
//! - [`Assistant`] - the single ingestion entry point for message text and
//!   OCR-extracted image text
//! - [`Command`] / [`CommandHandler`] - the retrieval verb surface
//! - [`TextExtractor`] - the black-box OCR boundary
//! - [`Config`] - runtime configuration values
//!
//! # Example
//!
//! ```no_run
//! use assistant::{Assistant, CommandHandler, Config, IngestOutcome};
//! use database::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let db = Database::connect(&config.database_url).await?;
//!     db.migrate().await?;
//!
//!     let assistant = Assistant::new(db.clone(), config.clone());
//!     let handler = CommandHandler::new(db, config);
//!
//!     // Commands answer; everything else is stored silently.
//!     match handler.handle("user-1", "password: gmail hunter2").await? {
//!         Some(reply) => println!("{reply}"),
//!         None => {
//!             assistant.ingest("user-1", "password: gmail hunter2").await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod commands;
mod config;
mod error;
mod ingest;
mod ocr;

pub use commands::{Command, CommandHandler};
pub use config::Config;
pub use error::{AssistantError, Result};
pub use ingest::{Assistant, IngestOutcome};
pub use ocr::{ExtractError, TextExtractor};

// Re-export async_trait for extractor implementations.
pub use async_trait::async_trait;
