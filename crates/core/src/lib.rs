// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod error;
mod transition;

#[cfg(test)]
mod tests;

use leadbook_domain::{Agent, Lead};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use transition::Transition;

/// Checks whether an actor may operate on a lead record.
///
/// An actor may read, update, or delete a record when they own it or hold
/// the admin capability. Listing does not use this check; it narrows its
/// query predicate instead.
///
/// # Arguments
///
/// * `lead` - The record being accessed
/// * `actor` - The acting identity
///
/// # Errors
///
/// Returns `CoreError::NotOwner` when the actor neither owns the record
/// nor is an admin. This is deliberately distinct from a missing record:
/// record ids are opaque, so confirming existence reveals nothing useful.
pub fn authorize_lead_access(lead: &Lead, actor: &Agent) -> Result<(), CoreError> {
    if actor.is_admin || lead.owner_id() == actor.agent_id {
        return Ok(());
    }
    Err(CoreError::NotOwner {
        lead_id: lead.lead_id().value().to_string(),
    })
}
