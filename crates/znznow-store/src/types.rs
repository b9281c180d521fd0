//! Rows and query results for the record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use znznow_core::{AgreementId, AgreementStatus};

/// A vendor agreement row.
///
/// Rows are write-once: the submission handler inserts them fully formed and
/// no exposed operation mutates them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agreement {
    /// Unique agreement identifier.
    pub id: AgreementId,
    /// Registered business name.
    pub vendor_name: String,
    /// Contact email address.
    pub vendor_email: String,
    /// Business registration number.
    pub vendor_registration: String,
    /// Street address.
    pub vendor_address: String,
    /// City or region.
    pub vendor_city: String,
    /// Country.
    pub vendor_country: String,
    /// Contact phone number.
    pub vendor_phone: String,
    /// Primary contact person.
    pub contact_person: String,
    /// Title of the contact person.
    pub contact_title: String,
    /// Partnership level code as submitted.
    pub partnership_level: String,
    /// Effective date as submitted.
    pub effective_date: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Path of the generated PDF within the file store.
    pub pdf_path: Option<String>,
    /// Path of the saved signature image, when one decoded cleanly.
    pub signature_path: Option<String>,
    /// Record status.
    pub status: AgreementStatus,
    /// When ZNZNOW counter-signed. Never set by the current flow.
    pub znznow_signed_date: Option<String>,
    /// When the vendor signed.
    pub vendor_signed_date: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Query parameters for [`crate::Store::list`].
#[derive(Debug, Clone)]
pub struct ListParams {
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Exact status filter; unknown values simply match nothing.
    pub status: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            status: None,
        }
    }
}

/// One page of agreements plus paging totals.
#[derive(Debug, Clone)]
pub struct AgreementPage {
    /// The rows on this page, newest first.
    pub agreements: Vec<Agreement>,
    /// Total rows matching the filter.
    pub total: u64,
    /// The page that was requested.
    pub page: u32,
    /// Rows per page that was requested.
    pub per_page: u32,
    /// Total page count for this filter.
    pub pages: u64,
}

/// Aggregate statistics over all agreements.
#[derive(Debug, Clone)]
pub struct AgreementStats {
    /// Total agreements on file.
    pub total: u64,
    /// Row counts grouped by status.
    pub by_status: BTreeMap<String, u64>,
    /// Row counts grouped by submitted partnership level.
    pub by_partnership: BTreeMap<String, u64>,
    /// The five most recently created records.
    pub recent: Vec<RecentAgreement>,
}

/// A recent-agreements entry.
#[derive(Debug, Clone)]
pub struct RecentAgreement {
    /// Agreement identifier.
    pub id: AgreementId,
    /// Registered business name.
    pub vendor_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
