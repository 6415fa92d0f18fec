// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorize_lead_access;
use crate::command::Command;
use crate::error::CoreError;
use crate::transition::Transition;
use leadbook_audit::{ChangeSet, created_snapshot, diff_lead_fields};
use leadbook_domain::{Agent, Lead, LeadFields, TimestampMs};
use serde_json::Value;

/// Applies a command against the current record, producing a transition.
///
/// `current` is the record the command targets, `None` for creation. The
/// caller resolves it before applying; a record that does not exist on the
/// update or delete path is the caller's not-found case, never this
/// function's concern.
///
/// # Arguments
///
/// * `current` - The targeted record as last read, `None` for creation
/// * `command` - The command to apply
/// * `actor` - The acting identity
///
/// # Returns
///
/// * `Ok(Transition)` describing the write the persistence layer must make
/// * `Err(CoreError)` if the actor lacks access or the record is stale
///
/// # Errors
///
/// Returns an error if:
/// - The actor neither owns the record nor holds the admin capability
/// - The client-observed last-modified time no longer matches the record
pub fn apply(
    current: Option<&Lead>,
    command: Command,
    actor: &Agent,
) -> Result<Transition, CoreError> {
    match command {
        Command::CreateLead {
            lead_id,
            submission,
            created_at,
        } => {
            let lead: Lead = Lead::new(
                lead_id,
                actor.agent_id.clone(),
                submission.into_fields(),
                created_at,
                created_at,
            );
            let history_payload: Value = created_snapshot(&lead);
            Ok(Transition::Created {
                lead,
                history_payload,
            })
        }
        Command::UpdateLead {
            submission,
            expected_updated_at,
            ..
        } => {
            let Some(current) = current else {
                unreachable!("apply called for an update without the current record")
            };

            authorize_lead_access(current, actor)?;

            if expected_updated_at != current.updated_at() {
                return Err(CoreError::StaleRecord {
                    submitted: expected_updated_at.value(),
                    current: current.updated_at().value(),
                });
            }

            let merged: LeadFields = submission.apply_to(current.fields());
            let submitted: Vec<&'static str> = submission.submitted_fields();
            let diff: ChangeSet = diff_lead_fields(current.fields(), &merged, &submitted);

            // Last-modified advances on every accepted update. Only the
            // history entry is conditional on the diff being non-empty.
            let previous_updated_at: TimestampMs = current.updated_at();
            let lead: Lead = current.with_fields(merged, previous_updated_at.advance());
            let history_payload: Option<Value> = if diff.is_empty() {
                None
            } else {
                Some(diff.to_value())
            };

            Ok(Transition::Updated {
                lead,
                previous_updated_at,
                history_payload,
            })
        }
        Command::DeleteLead { lead_id } => {
            let Some(current) = current else {
                unreachable!("apply called for a delete without the current record")
            };

            authorize_lead_access(current, actor)?;

            Ok(Transition::Deleted { lead_id })
        }
    }
}
