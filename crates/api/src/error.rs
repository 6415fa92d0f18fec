// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every failure a handler can produce is a variant of [`ApiError`], and
//! every variant maps onto exactly one HTTP status. Core and persistence
//! errors never cross this boundary untranslated.

use leadbook::CoreError;
use leadbook_domain::ValidationErrors;
use leadbook_persistence::PersistenceError;
use thiserror::Error;

/// One failed row of a bulk import report.
///
/// Row numbers are 1-based and offset by the header line, so the first data
/// row reports as row 2. Whole-batch failures report at row 0.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportRowError {
    /// The failing row's position in the submitted file.
    pub row: usize,
    /// The row's field failures joined into one line.
    pub message: String,
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Display strings are the user-facing messages the server
/// returns verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No authenticated actor accompanied the request.
    #[error("Unauthorized")]
    Unauthorized,
    /// The actor neither owns the record nor holds the admin capability.
    #[error("Forbidden")]
    Forbidden {
        /// The record the actor tried to operate on.
        lead_id: String,
    },
    /// The id has no record.
    #[error("Not found")]
    NotFound {
        /// The id that resolved to nothing.
        lead_id: String,
    },
    /// One or more submitted fields failed validation.
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationErrors),
    /// The client-held freshness token no longer matches the record.
    #[error("Record changed, please refresh.")]
    StaleWrite {
        /// The token the client submitted.
        submitted: i64,
        /// The record's current last-modified time.
        current: i64,
    },
    /// The actor exhausted its creation window.
    #[error("Rate limit exceeded. Try again soon.")]
    RateLimited {
        /// When the actor's window resets, in epoch milliseconds.
        reset_at: i64,
    },
    /// The import batch exceeds the row cap.
    #[error("Max {max} rows")]
    BatchTooLarge {
        /// How many rows the batch carried.
        submitted: usize,
        /// The largest accepted batch.
        max: usize,
    },
    /// One or more import rows failed validation; nothing was committed.
    #[error("Batch validation failed")]
    BatchValidationFailed {
        /// Per-row failures, in row order.
        errors: Vec<ImportRowError>,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status this error maps onto.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::StaleWrite { .. } => 409,
            Self::ValidationFailed(_) => 422,
            Self::RateLimited { .. } => 429,
            Self::BatchTooLarge { .. } | Self::BatchValidationFailed { .. } => 400,
            Self::Internal { .. } => 500,
        }
    }

    /// Shapes this error as the bulk-import error report.
    ///
    /// Per-row failures pass through; anything else becomes a single
    /// whole-batch entry at row 0 carrying the user-facing message.
    #[must_use]
    pub fn into_import_errors(self) -> Vec<ImportRowError> {
        match self {
            Self::BatchValidationFailed { errors } => errors,
            other => vec![ImportRowError {
                row: 0,
                message: other.to_string(),
            }],
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NotOwner { lead_id } => ApiError::Forbidden { lead_id },
        CoreError::StaleRecord { submitted, current } => {
            ApiError::StaleWrite { submitted, current }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found and stale-write conditions keep their identity; every other
/// store failure is an internal error from the caller's point of view.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::LeadNotFound(lead_id) => ApiError::NotFound { lead_id },
        PersistenceError::StaleLead { submitted, current } => {
            ApiError::StaleWrite { submitted, current }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
