// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent profile queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leadbook_domain::Agent;
use tracing::debug;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Diesel Queryable struct for agent rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = diesel_schema::agents)]
struct AgentRow {
    agent_id: String,
    display_name: Option<String>,
    email: Option<String>,
    is_admin: i32,
}

/// Retrieves a cached agent profile by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `agent_id` - The agent id to look up
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no profile is cached for the id.
pub fn get_agent(
    conn: &mut SqliteConnection,
    agent_id: &str,
) -> Result<Option<Agent>, PersistenceError> {
    debug!(agent_id, "Looking up agent profile");

    let result: Result<AgentRow, diesel::result::Error> = diesel_schema::agents::table
        .filter(diesel_schema::agents::agent_id.eq(agent_id))
        .select(AgentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Agent::new(
            row.agent_id,
            row.display_name,
            row.email,
            row.is_admin != 0,
        ))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
