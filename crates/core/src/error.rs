// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur when applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The actor neither owns the record nor holds the admin capability.
    NotOwner {
        /// The record the actor tried to operate on.
        lead_id: String,
    },
    /// The client-supplied freshness token does not match the record's
    /// current last-modified time.
    StaleRecord {
        /// The token the client submitted.
        submitted: i64,
        /// The record's current last-modified time.
        current: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOwner { lead_id } => {
                write!(f, "Actor is not the owner of lead {lead_id}")
            }
            Self::StaleRecord { submitted, current } => {
                write!(
                    f,
                    "Record changed since it was read: submitted token {submitted}, current {current}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}
