//! SQLite storage layer for the ZNZNOW agreement platform.
//!
//! This crate provides the system of record: one row per submitted agreement
//! plus an append-only audit log, both held in a single SQLite database file.
//!
//! # Tables
//!
//! - `agreements`: primary agreement rows, keyed by the agreement UUID.
//!   Write-once: nothing updates or deletes a row after `create`.
//! - `agreement_logs`: append-only audit entries with an auto-incrementing
//!   id and a JSON details blob.
//!
//! # Concurrency
//!
//! Each operation opens its own connection and holds no transaction beyond a
//! single statement. Consistency with the artifact files on disk is a
//! best-effort side effect of sequential writes, not a guarantee.
//!
//! # Example
//!
//! ```no_run
//! use znznow_store::{ListParams, SqliteStore, Store};
//!
//! let store = SqliteStore::open("/data/vendor-agreements/agreements.db").unwrap();
//! let page = store.list(&ListParams::default()).unwrap();
//! println!("{} agreements on file", page.total);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod schema;
pub mod sqlite;
pub mod types;

pub use error::{Result, StoreError};
pub use sqlite::SqliteStore;
pub use types::{Agreement, AgreementPage, AgreementStats, ListParams, RecentAgreement};

use znznow_core::AgreementId;

/// The storage trait defining all record operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g. SQLite, in-memory for testing).
pub trait Store: Send + Sync {
    /// Insert one agreement row.
    ///
    /// # Errors
    ///
    /// Returns an error if the id collides with an existing row or the
    /// database operation fails.
    fn create(&self, agreement: &Agreement) -> Result<()>;

    /// Fetch the full row for an agreement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get(&self, id: &AgreementId) -> Result<Option<Agreement>>;

    /// Page through agreements, newest first, optionally filtered by exact
    /// status match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list(&self, params: &ListParams) -> Result<AgreementPage>;

    /// Aggregate counts by status and partnership level plus the five most
    /// recently created records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn aggregate(&self) -> Result<AgreementStats>;

    /// Append one audit entry for an agreement.
    ///
    /// Callers are expected to treat failures here as non-fatal: the audit
    /// trail must never block the primary operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn append_log(
        &self,
        id: &AgreementId,
        action: &str,
        details: Option<serde_json::Value>,
    ) -> Result<()>;
}
