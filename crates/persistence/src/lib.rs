// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Leadbook CRM.
//!
//! This crate stores lead records, their field-level history, and the
//! cached agent profiles. It is built on Diesel over `SQLite`.
//!
//! ## Database Backend
//!
//! `SQLite` is the only backend:
//!
//! - In-memory databases back unit and integration tests (fast,
//!   deterministic, no external infrastructure)
//! - File-based databases with WAL mode back deployments
//!
//! Migrations are embedded in the binary and applied at connection time,
//! so a fresh database is always brought up to the current schema.
//!
//! ## Atomicity
//!
//! Mutations arrive as transitions computed by the `leadbook` engine and
//! execute inside one immediate transaction each: the record write and its
//! history entry commit together or not at all. The conditional update
//! carries its freshness check in the same statement as the write, which is
//! what makes the compare-and-write race-free under concurrent actors.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leadbook::Transition;
use leadbook_audit::HistoryEntry;
use leadbook_domain::{Agent, Lead, LeadId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{LeadPage, LeadQuery, LeadSort, SortDirection, SortField};
pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

/// Persistence adapter for lead records, history, and agent profiles.
///
/// Wraps a single `SQLite` connection. Callers that share an adapter across
/// threads serialize access externally (e.g., behind a mutex).
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Uses a shared in-memory database via `Diesel`.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // A unique shared in-memory database name per call keeps tests isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL mode improves read concurrency for file-based databases
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required for the history cascade
    /// delete to work.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a transition (record write plus history entry) atomically.
    ///
    /// # Arguments
    ///
    /// * `transition` - The transition to persist
    /// * `changed_by` - Id of the acting agent, recorded on history entries
    ///
    /// # Errors
    ///
    /// Returns `StaleLead` when a concurrent writer changed the record
    /// between read and write, `LeadNotFound` when the update or delete
    /// target no longer exists, and a database error otherwise.
    pub fn persist_transition(
        &mut self,
        transition: &Transition,
        changed_by: &str,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, transition, changed_by)
    }

    /// Inserts a batch of fully-formed lead records in one transaction.
    ///
    /// Bulk-imported rows do not receive history entries.
    ///
    /// # Arguments
    ///
    /// * `leads` - The records to insert
    ///
    /// # Returns
    ///
    /// The number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is committed in that
    /// case.
    pub fn insert_lead_batch(&mut self, leads: &[Lead]) -> Result<usize, PersistenceError> {
        mutations::insert_lead_batch(&mut self.conn, leads)
    }

    // ========================================================================
    // Lead Queries
    // ========================================================================

    /// Retrieves a lead by id.
    ///
    /// # Arguments
    ///
    /// * `lead_id` - The record id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored row
    /// cannot be rebuilt. Returns `Ok(None)` if the lead is not found.
    pub fn get_lead(&mut self, lead_id: &LeadId) -> Result<Option<Lead>, PersistenceError> {
        queries::get_lead(&mut self.conn, lead_id)
    }

    /// Lists leads matching a query.
    ///
    /// # Arguments
    ///
    /// * `query` - The filter, sort, and pagination inputs
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row cannot
    /// be rebuilt.
    pub fn list_leads(&mut self, query: &LeadQuery) -> Result<LeadPage, PersistenceError> {
        queries::list_leads(&mut self.conn, query)
    }

    /// Retrieves the most recent history entries for a lead, newest first.
    ///
    /// # Arguments
    ///
    /// * `lead_id` - The record whose history to load
    /// * `limit` - Maximum number of entries to return
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored payload
    /// cannot be decoded.
    pub fn get_lead_history(
        &mut self,
        lead_id: &LeadId,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::get_lead_history(&mut self.conn, lead_id, limit)
    }

    // ========================================================================
    // Agent Profiles
    // ========================================================================

    /// Inserts or refreshes a cached agent profile.
    ///
    /// # Arguments
    ///
    /// * `agent` - The acting identity to cache
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn upsert_agent(&mut self, agent: &Agent) -> Result<(), PersistenceError> {
        mutations::upsert_agent(&mut self.conn, agent)
    }

    /// Retrieves a cached agent profile by id.
    ///
    /// # Arguments
    ///
    /// * `agent_id` - The agent id to look up
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    /// Returns `Ok(None)` if no profile is cached for the id.
    pub fn get_agent(&mut self, agent_id: &str) -> Result<Option<Agent>, PersistenceError> {
        queries::get_agent(&mut self.conn, agent_id)
    }
}
