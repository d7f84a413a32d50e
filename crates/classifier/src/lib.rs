//! Pattern classifier for inbound personal-data messages.
//!
//! This crate decides what a raw message *is*: a credential pair, a bare
//! password, an email address, a link, or a plain note. Classification is a
//! pure function over the text — no I/O, no state, and the same input always
//! yields the same result. Rules are evaluated in a fixed order and the
//! first match wins; anything unrecognized falls back to a note.
//!
//! # Example
//!
//! ```rust
//! use classifier::{Classification, Classifier};
//!
//! let classifier = Classifier::new();
//! match classifier.classify("password: gmail mypassword123") {
//!     Classification::Password { label, value } => {
//!         assert_eq!(label, "gmail");
//!         assert_eq!(value, "mypassword123");
//!     }
//!     other => panic!("unexpected classification: {:?}", other),
//! }
//! ```

mod category;
mod rules;

pub use category::Category;
pub use rules::{Classification, Classifier};
