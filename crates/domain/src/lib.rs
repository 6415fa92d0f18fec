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

mod enums;
mod error;
mod translate;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use enums::{Bhk, City, LeadStatus, PropertyType, Purpose, Source, Timeline};
pub use error::DomainError;

// Re-export public types
pub use types::{Agent, Lead, LeadFields, LeadId, TimestampMs, ValidatedLead};
pub use validation::{
    InputKind, NumberOrText, RawLeadInput, TagsInput, ValidationErrors, normalize_tags,
    validate_lead_input,
};
