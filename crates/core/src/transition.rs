// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadbook_domain::{Lead, LeadId, TimestampMs};
use serde_json::Value;

/// The persistable outcome of one applied command.
///
/// A transition is data only. The persistence layer executes it inside a
/// single transaction so the record write and its history entry commit
/// together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A new record to insert.
    Created {
        /// The record, with ownership and timestamps assigned.
        lead: Lead,
        /// The creation snapshot history payload.
        history_payload: Value,
    },
    /// A rewritten record to store conditionally.
    Updated {
        /// The record after the merge, carrying its advanced last-modified
        /// time.
        lead: Lead,
        /// The last-modified time the stored record must still hold for
        /// the write to apply. Anything else means a concurrent writer got
        /// there first.
        previous_updated_at: TimestampMs,
        /// The field diff payload, absent when the merge changed nothing
        /// observable.
        history_payload: Option<Value>,
    },
    /// A record to remove together with its history entries.
    Deleted {
        /// The record to delete.
        lead_id: LeadId,
    },
}
