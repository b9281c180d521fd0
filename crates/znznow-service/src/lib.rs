//! Agreement orchestration for the ZNZNOW platform.
//!
//! This crate sits between the HTTP gateway and the storage/rendering
//! layers. It owns the submission pipeline:
//!
//! ```text
//! submission ──► decode signature ──► render PDF ──► write files
//!                                                        │
//!            response ◄── notify ◄── audit log ◄── insert row
//! ```
//!
//! The file writes and the row insert are sequential and non-atomic: a crash
//! between them leaves an orphan file with no matching record. That gap is
//! inherited from the source system and accepted here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod files;
pub mod notify;
pub mod service;
pub mod types;

pub use error::{Result, ServiceError};
pub use files::FileStore;
pub use notify::{whatsapp_link, EmailNotifier, NotifierConfig};
pub use service::{AgreementService, Agreements};
pub use types::{AgreementSubmission, CreatedAgreement, StoredPdf};
