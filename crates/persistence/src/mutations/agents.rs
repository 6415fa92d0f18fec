// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent profile mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leadbook_domain::Agent;
use tracing::debug;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts or refreshes an agent profile row.
///
/// Called on every write path so the locally cached profile tracks what the
/// identity provider last supplied.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `agent` - The acting identity to cache
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_agent(conn: &mut SqliteConnection, agent: &Agent) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::agents::table)
        .values((
            diesel_schema::agents::agent_id.eq(&agent.agent_id),
            diesel_schema::agents::display_name.eq(agent.display_name.as_deref()),
            diesel_schema::agents::email.eq(agent.email.as_deref()),
            diesel_schema::agents::is_admin.eq(i32::from(agent.is_admin)),
        ))
        .on_conflict(diesel_schema::agents::agent_id)
        .do_update()
        .set((
            diesel_schema::agents::display_name.eq(agent.display_name.as_deref()),
            diesel_schema::agents::email.eq(agent.email.as_deref()),
            diesel_schema::agents::is_admin.eq(i32::from(agent.is_admin)),
        ))
        .execute(conn)?;

    debug!(agent_id = %agent.agent_id, "Upserted agent profile");
    Ok(())
}
