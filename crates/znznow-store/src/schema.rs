//! Database schema for the agreement store.

/// DDL executed when the store is opened. Idempotent.
///
/// The schema carries both `znznow_signed_date` and `vendor_signed_date`;
/// the current submission flow only ever sets the vendor date.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS agreements (
    id TEXT PRIMARY KEY,
    vendor_name TEXT NOT NULL,
    vendor_email TEXT NOT NULL,
    vendor_registration TEXT NOT NULL,
    vendor_address TEXT NOT NULL,
    vendor_city TEXT NOT NULL,
    vendor_country TEXT NOT NULL,
    vendor_phone TEXT NOT NULL,
    contact_person TEXT NOT NULL,
    contact_title TEXT NOT NULL,
    partnership_level TEXT NOT NULL,
    effective_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    pdf_path TEXT,
    signature_path TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    znznow_signed_date TEXT,
    vendor_signed_date TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS agreement_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    agreement_id TEXT NOT NULL,
    action TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    details TEXT,
    FOREIGN KEY (agreement_id) REFERENCES agreements(id)
);
";
