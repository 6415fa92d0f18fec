// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead record mutations.
//!
//! This module executes the transitions produced by the mutation engine.
//! Each transition runs inside one immediate transaction so the record
//! write and its history entry commit together or not at all.

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use leadbook::Transition;
use leadbook_domain::{Lead, LeadFields, LeadId, TimestampMs};
use serde_json::Value;
use tracing::{debug, info};

use crate::backend;
use crate::data_models::NewLeadRow;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Outcome of persisting a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistTransitionResult {
    /// The stored record, absent for deletions.
    pub lead: Option<Lead>,
    /// Id of the history entry written, when one was.
    pub history_id: Option<i64>,
}

/// Persists a transition atomically.
///
/// - `Created` inserts the record and its creation-snapshot history entry.
/// - `Updated` rewrites the record conditionally on its stored last-modified
///   time, then inserts the field-diff history entry when the merge changed
///   something observable.
/// - `Deleted` removes the record; its history entries go with it via the
///   foreign key cascade.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The transition to persist
/// * `changed_by` - Id of the acting agent, recorded on history entries
///
/// # Errors
///
/// Returns `StaleLead` when a concurrent writer got to the record first,
/// `LeadNotFound` when the update or delete target no longer exists, and a
/// database error otherwise. Any error rolls the whole transition back.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    transition: &Transition,
    changed_by: &str,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.immediate_transaction(|conn| match transition {
        Transition::Created {
            lead,
            history_payload,
        } => {
            insert_lead(conn, lead)?;
            let history_id: i64 = insert_history_entry(
                conn,
                lead.lead_id(),
                changed_by,
                lead.created_at(),
                history_payload,
            )?;
            info!(lead_id = %lead.lead_id(), history_id, "Created lead");
            Ok(PersistTransitionResult {
                lead: Some(lead.clone()),
                history_id: Some(history_id),
            })
        }
        Transition::Updated {
            lead,
            previous_updated_at,
            history_payload,
        } => {
            let history_id: Option<i64> =
                apply_update(conn, lead, *previous_updated_at, history_payload, changed_by)?;
            info!(
                lead_id = %lead.lead_id(),
                history_written = history_id.is_some(),
                "Updated lead"
            );
            Ok(PersistTransitionResult {
                lead: Some(lead.clone()),
                history_id,
            })
        }
        Transition::Deleted { lead_id } => {
            let rows_affected: usize = diesel::delete(
                diesel_schema::leads::table
                    .filter(diesel_schema::leads::lead_id.eq(lead_id.value())),
            )
            .execute(conn)?;

            if rows_affected == 0 {
                return Err(PersistenceError::LeadNotFound(lead_id.value().to_string()));
            }

            info!(lead_id = %lead_id, "Deleted lead");
            Ok(PersistTransitionResult {
                lead: None,
                history_id: None,
            })
        }
    })
}

/// Inserts a batch of fully-formed lead records in one transaction.
///
/// Bulk-imported rows do not receive history entries; either every row
/// inserts or none do.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `leads` - The records to insert
///
/// # Returns
///
/// The number of rows inserted.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is committed in that case.
pub fn insert_lead_batch(
    conn: &mut SqliteConnection,
    leads: &[Lead],
) -> Result<usize, PersistenceError> {
    let mut rows: Vec<NewLeadRow> = Vec::with_capacity(leads.len());
    for lead in leads {
        rows.push(NewLeadRow::from_lead(lead)?);
    }

    conn.immediate_transaction(|conn| {
        let inserted: usize = diesel::insert_into(diesel_schema::leads::table)
            .values(&rows)
            .execute(conn)?;
        debug!(count = inserted, "Bulk inserted leads");
        Ok(inserted)
    })
}

/// Inserts one lead row.
fn insert_lead(conn: &mut SqliteConnection, lead: &Lead) -> Result<(), PersistenceError> {
    let row: NewLeadRow = NewLeadRow::from_lead(lead)?;
    diesel::insert_into(diesel_schema::leads::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Rewrites a lead row conditionally and records its history entry.
///
/// The filter on `updated_at` makes the freshness check and the write one
/// atomic statement. Zero affected rows means the token no longer matches
/// or the record is gone; a refetch tells the two apart.
fn apply_update(
    conn: &mut SqliteConnection,
    lead: &Lead,
    previous_updated_at: TimestampMs,
    history_payload: &Option<Value>,
    changed_by: &str,
) -> Result<Option<i64>, PersistenceError> {
    let fields: &LeadFields = lead.fields();
    let tags_json: String = serde_json::to_string(&fields.tags)?;

    let rows_affected: usize = diesel::update(
        diesel_schema::leads::table
            .filter(diesel_schema::leads::lead_id.eq(lead.lead_id().value()))
            .filter(diesel_schema::leads::updated_at.eq(previous_updated_at.value())),
    )
    .set((
        diesel_schema::leads::full_name.eq(&fields.full_name),
        diesel_schema::leads::email.eq(fields.email.as_deref()),
        diesel_schema::leads::phone.eq(&fields.phone),
        diesel_schema::leads::city.eq(fields.city.as_str()),
        diesel_schema::leads::property_type.eq(fields.property_type.as_str()),
        diesel_schema::leads::bhk.eq(fields.bhk.map(|bhk| bhk.storage_token())),
        diesel_schema::leads::purpose.eq(fields.purpose.as_str()),
        diesel_schema::leads::budget_min.eq(fields.budget_min),
        diesel_schema::leads::budget_max.eq(fields.budget_max),
        diesel_schema::leads::timeline.eq(fields.timeline.storage_token()),
        diesel_schema::leads::source.eq(fields.source.storage_token()),
        diesel_schema::leads::status.eq(fields.status.as_str()),
        diesel_schema::leads::notes.eq(fields.notes.as_deref()),
        diesel_schema::leads::tags.eq(&tags_json),
        diesel_schema::leads::updated_at.eq(lead.updated_at().value()),
    ))
    .execute(conn)?;

    if rows_affected == 0 {
        let current: Option<i64> = diesel_schema::leads::table
            .filter(diesel_schema::leads::lead_id.eq(lead.lead_id().value()))
            .select(diesel_schema::leads::updated_at)
            .first(conn)
            .optional()?;
        return Err(match current {
            Some(current) => PersistenceError::StaleLead {
                submitted: previous_updated_at.value(),
                current,
            },
            None => PersistenceError::LeadNotFound(lead.lead_id().value().to_string()),
        });
    }

    match history_payload {
        Some(payload) => Ok(Some(insert_history_entry(
            conn,
            lead.lead_id(),
            changed_by,
            lead.updated_at(),
            payload,
        )?)),
        None => Ok(None),
    }
}

/// Inserts a history entry and returns its assigned id.
fn insert_history_entry(
    conn: &mut SqliteConnection,
    lead_id: &LeadId,
    changed_by: &str,
    changed_at: TimestampMs,
    diff: &Value,
) -> Result<i64, PersistenceError> {
    let diff_json: String = serde_json::to_string(diff)?;
    diesel::insert_into(diesel_schema::lead_history::table)
        .values((
            diesel_schema::lead_history::lead_id.eq(lead_id.value()),
            diesel_schema::lead_history::changed_by.eq(changed_by),
            diesel_schema::lead_history::changed_at.eq(changed_at.value()),
            diesel_schema::lead_history::diff.eq(&diff_json),
        ))
        .execute(conn)?;
    backend::sqlite::get_last_insert_rowid(conn)
}
