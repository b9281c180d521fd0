//! SQLite storage implementation.
//!
//! This module provides the `SqliteStore` implementation of the `Store`
//! trait. Every operation opens its own short-lived connection; there is no
//! pool and no transaction spanning more than one statement.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use znznow_core::{AgreementId, AgreementStatus};

use crate::error::Result;
use crate::schema;
use crate::types::{Agreement, AgreementPage, AgreementStats, ListParams, RecentAgreement};
use crate::Store;

/// The agreement columns, in the order every query selects them.
const AGREEMENT_COLUMNS: &str = "id, vendor_name, vendor_email, vendor_registration, \
     vendor_address, vendor_city, vendor_country, vendor_phone, contact_person, \
     contact_title, partnership_level, effective_date, created_at, pdf_path, \
     signature_path, status, znznow_signed_date, vendor_signed_date, notes";

/// SQLite-backed store.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open the store, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute_batch(schema::SCHEMA)?;
        Ok(store)
    }

    /// Open a fresh connection for one operation.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(conn)
    }
}

impl Store for SqliteStore {
    fn create(&self, agreement: &Agreement) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO agreements (id, vendor_name, vendor_email, vendor_registration, \
             vendor_address, vendor_city, vendor_country, vendor_phone, contact_person, \
             contact_title, partnership_level, effective_date, created_at, pdf_path, \
             signature_path, status, znznow_signed_date, vendor_signed_date, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
             ?16, ?17, ?18, ?19)",
            params![
                agreement.id.to_string(),
                agreement.vendor_name,
                agreement.vendor_email,
                agreement.vendor_registration,
                agreement.vendor_address,
                agreement.vendor_city,
                agreement.vendor_country,
                agreement.vendor_phone,
                agreement.contact_person,
                agreement.contact_title,
                agreement.partnership_level,
                agreement.effective_date,
                agreement.created_at.to_rfc3339(),
                agreement.pdf_path,
                agreement.signature_path,
                agreement.status.as_str(),
                agreement.znznow_signed_date,
                agreement.vendor_signed_date,
                agreement.notes,
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &AgreementId) -> Result<Option<Agreement>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {AGREEMENT_COLUMNS} FROM agreements WHERE id = ?1"
        ))?;
        let mut rows = stmt.query_map(params![id.to_string()], row_to_agreement)?;
        rows.next().transpose().map_err(Into::into)
    }

    fn list(&self, list_params: &ListParams) -> Result<AgreementPage> {
        let conn = self.connect()?;
        let page = list_params.page.max(1);
        let per_page = list_params.per_page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let (total, agreements) = if let Some(status) = &list_params.status {
            let total: u64 = conn.query_row(
                "SELECT COUNT(*) FROM agreements WHERE status = ?1",
                params![status],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {AGREEMENT_COLUMNS} FROM agreements WHERE status = ?1 \
                 ORDER BY created_at DESC LIMIT ?2 OFFSET ?3"
            ))?;
            let rows = stmt
                .query_map(params![status, per_page, offset], row_to_agreement)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            (total, rows)
        } else {
            let total: u64 =
                conn.query_row("SELECT COUNT(*) FROM agreements", [], |row| row.get(0))?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {AGREEMENT_COLUMNS} FROM agreements \
                 ORDER BY created_at DESC LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt
                .query_map(params![per_page, offset], row_to_agreement)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            (total, rows)
        };

        Ok(AgreementPage {
            agreements,
            total,
            page,
            per_page,
            pages: total.div_ceil(u64::from(per_page)),
        })
    }

    fn aggregate(&self) -> Result<AgreementStats> {
        let conn = self.connect()?;

        let total: u64 = conn.query_row("SELECT COUNT(*) FROM agreements", [], |row| row.get(0))?;

        let by_status = count_grouped_by(&conn, "status")?;
        let by_partnership = count_grouped_by(&conn, "partnership_level")?;

        let mut stmt = conn.prepare(
            "SELECT id, vendor_name, created_at FROM agreements \
             ORDER BY created_at DESC LIMIT 5",
        )?;
        let recent = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let created_at: String = row.get(2)?;
                Ok(RecentAgreement {
                    id: parse_id(0, &id)?,
                    vendor_name: row.get(1)?,
                    created_at: parse_timestamp(2, &created_at)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(AgreementStats {
            total,
            by_status,
            by_partnership,
            recent,
        })
    }

    fn append_log(
        &self,
        id: &AgreementId,
        action: &str,
        details: Option<serde_json::Value>,
    ) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO agreement_logs (agreement_id, action, timestamp, details) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id.to_string(),
                action,
                Utc::now().to_rfc3339(),
                details.map(|d| d.to_string()),
            ],
        )?;
        Ok(())
    }
}

/// Run a `GROUP BY` count over one column.
fn count_grouped_by(conn: &Connection, column: &str) -> Result<BTreeMap<String, u64>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {column}, COUNT(*) FROM agreements GROUP BY {column}"
    ))?;
    let mut counts = BTreeMap::new();
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?)))?;
    for row in rows {
        let (key, count) = row?;
        counts.insert(key, count);
    }
    Ok(counts)
}

/// Map one `agreements` row, columns in `AGREEMENT_COLUMNS` order.
fn row_to_agreement(row: &Row<'_>) -> rusqlite::Result<Agreement> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(12)?;
    let status: String = row.get(15)?;

    Ok(Agreement {
        id: parse_id(0, &id)?,
        vendor_name: row.get(1)?,
        vendor_email: row.get(2)?,
        vendor_registration: row.get(3)?,
        vendor_address: row.get(4)?,
        vendor_city: row.get(5)?,
        vendor_country: row.get(6)?,
        vendor_phone: row.get(7)?,
        contact_person: row.get(8)?,
        contact_title: row.get(9)?,
        partnership_level: row.get(10)?,
        effective_date: row.get(11)?,
        created_at: parse_timestamp(12, &created_at)?,
        pdf_path: row.get(13)?,
        signature_path: row.get(14)?,
        status: AgreementStatus::parse(&status).ok_or_else(|| {
            conversion_err(15, format!("unknown agreement status: {status}"))
        })?,
        znznow_signed_date: row.get(16)?,
        vendor_signed_date: row.get(17)?,
        notes: row.get(18)?,
    })
}

fn parse_id(idx: usize, value: &str) -> rusqlite::Result<AgreementId> {
    AgreementId::parse(value).map_err(|err| conversion_err(idx, err))
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| conversion_err(idx, err))
}

fn conversion_err(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}
