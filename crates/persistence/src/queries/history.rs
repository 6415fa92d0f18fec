// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead history queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leadbook_audit::HistoryEntry;
use leadbook_domain::{LeadId, TimestampMs};
use serde_json::Value;
use tracing::debug;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Diesel Queryable struct for history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = diesel_schema::lead_history)]
struct HistoryRow {
    history_id: i64,
    lead_id: String,
    changed_by: String,
    changed_at: i64,
    diff: String,
}

impl HistoryRow {
    fn into_entry(self) -> Result<HistoryEntry, PersistenceError> {
        let diff: Value = serde_json::from_str(&self.diff)?;
        Ok(HistoryEntry::new(
            self.history_id,
            LeadId::new(&self.lead_id),
            self.changed_by,
            TimestampMs::new(self.changed_at),
            diff,
        ))
    }
}

/// Retrieves the most recent history entries for a lead, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lead_id` - The record whose history to load
/// * `limit` - Maximum number of entries to return
///
/// # Errors
///
/// Returns an error if the database query fails or a stored payload cannot
/// be decoded.
pub fn get_lead_history(
    conn: &mut SqliteConnection,
    lead_id: &LeadId,
    limit: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    debug!(lead_id = %lead_id, limit, "Loading lead history");

    let rows: Vec<HistoryRow> = diesel_schema::lead_history::table
        .filter(diesel_schema::lead_history::lead_id.eq(lead_id.value()))
        .order((
            diesel_schema::lead_history::changed_at.desc(),
            diesel_schema::lead_history::history_id.desc(),
        ))
        .limit(limit)
        .select(HistoryRow::as_select())
        .load(conn)?;

    let mut entries: Vec<HistoryEntry> = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(row.into_entry()?);
    }
    Ok(entries)
}
