// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadbook_domain::{LeadId, TimestampMs, ValidatedLead};

/// A command represents actor intent as data only.
///
/// Commands are the only way to request lead mutations. Identity values
/// and clock readings are assigned by the caller, so applying a command is
/// a pure computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new lead record owned by the acting actor.
    CreateLead {
        /// The id assigned to the new record.
        lead_id: LeadId,
        /// The validated submission.
        submission: ValidatedLead,
        /// Creation time, also the record's initial last-modified time.
        created_at: TimestampMs,
    },
    /// Rewrite an existing lead record.
    UpdateLead {
        /// The record to update.
        lead_id: LeadId,
        /// The validated submission.
        submission: ValidatedLead,
        /// The last-modified time the client observed when it read the
        /// record. A mismatch rejects the write.
        expected_updated_at: TimestampMs,
    },
    /// Remove a lead record together with its history.
    DeleteLead {
        /// The record to delete.
        lead_id: LeadId,
    },
}
