// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw-input validation and normalization for lead submissions.
//!
//! Turns a bag of loosely-typed field values, as they arrive from a form
//! body or a CSV row, into a [`ValidatedLead`] or a field-keyed error map.
//! The same rule set runs for both input kinds; the only divergence is the
//! BHK policy on non-residential property types (see [`InputKind`]).
//!
//! Validation is pure: no clock, no store, no side effects.

use crate::enums::{Bhk, City, LeadStatus, PropertyType, Purpose, Source, Timeline};
use crate::types::ValidatedLead;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest accepted full name, in characters.
const FULL_NAME_MAX: usize = 80;
/// Shortest accepted full name, in characters.
const FULL_NAME_MIN: usize = 2;
/// Longest accepted notes value, in characters.
const NOTES_MAX: usize = 1000;

/// A value that may arrive as a JSON number or as a numeric string.
///
/// Form bodies submit budgets and timestamps as strings; API clients send
/// numbers. Both decode into this and normalize later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    /// Returns the numeric value, if one can be read.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }

    /// Returns whether this is an empty or whitespace-only string.
    ///
    /// Blank text means "field left empty", which is distinct from a value
    /// that fails to parse.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Tags as submitted: either one delimiter-joined cell or a pre-split list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Split(Vec<String>),
    Joined(String),
}

/// Normalizes a tag submission into the stored tag list.
///
/// Splits joined input on commas, trims every tag, and drops empties.
/// Duplicates are kept; the set is free text and the user owns its contents.
#[must_use]
pub fn normalize_tags(input: Option<&TagsInput>) -> Vec<String> {
    match input {
        None => Vec::new(),
        Some(TagsInput::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        Some(TagsInput::Split(parts)) => parts
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
    }
}

/// Raw field values of a lead submission, prior to validation.
///
/// Every field is optional at this stage; requiredness is a validation rule,
/// not a decoding rule, so a missing required field reports as a field error
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeadInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub bhk: Option<String>,
    pub purpose: Option<String>,
    pub budget_min: Option<NumberOrText>,
    pub budget_max: Option<NumberOrText>,
    pub timeline: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<TagsInput>,
}

/// Where a submission came from, for the one rule that differs by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Interactive form submission. A BHK value supplied alongside a
    /// non-residential property type is a field error.
    Form,
    /// Bulk-import row. A BHK value supplied alongside a non-residential
    /// property type is dropped before the presence rules run.
    CsvRow,
}

/// Field-keyed validation failures, ordered within each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message under a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether no field has failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the field-keyed messages.
    #[must_use]
    pub const fn field_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Consumes the map, yielding the field-keyed messages.
    #[must_use]
    pub fn into_field_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }

    /// Flattens every message into one `"; "`-joined line.
    ///
    /// This is the per-row message format of the bulk-import error report.
    #[must_use]
    pub fn joined_message(&self) -> String {
        self.errors
            .values()
            .flat_map(|messages| messages.iter())
            .cloned()
            .collect::<Vec<String>>()
            .join("; ")
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined_message())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates and normalizes a raw lead submission.
///
/// Applies, in order: per-field constraints (presence, length, format,
/// vocabulary membership), empty-to-absent coercion for optional fields,
/// and the cross-field rules (BHK presence tied to the property type,
/// budget ordering). All failing fields are reported together.
///
/// # Arguments
///
/// * `input` - The raw field values
/// * `kind` - Which submission path produced the input
///
/// # Errors
///
/// Returns the field-keyed messages when any rule fails. The error map's
/// keys are always a subset of the submission's field names.
#[allow(clippy::too_many_lines)]
pub fn validate_lead_input(
    input: &RawLeadInput,
    kind: InputKind,
) -> Result<ValidatedLead, ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();

    // Rule: full name is required, 2 to 80 characters
    let full_name: Option<String> = match input.full_name.as_deref() {
        None => {
            errors.push("fullName", "Full name is required");
            None
        }
        Some(name) => {
            let length: usize = name.chars().count();
            if length < FULL_NAME_MIN {
                errors.push("fullName", "Full name must be at least 2 characters");
                None
            } else if length > FULL_NAME_MAX {
                errors.push("fullName", "Full name must be less than 80 characters");
                None
            } else {
                Some(name.to_string())
            }
        }
    };

    // Rule: email is optional; blank coerces to absent, anything else must
    // be a plausible address
    let email: Option<String> = match presence(input.email.as_deref()) {
        None => None,
        Some(value) => {
            if is_valid_email(value) {
                Some(value.to_string())
            } else {
                errors.push("email", "Please enter a valid email address");
                None
            }
        }
    };

    // Rule: phone is required, 10 to 15 digits, digits only
    let phone: Option<String> = match input.phone.as_deref() {
        None => {
            errors.push("phone", "Phone is required");
            None
        }
        Some(value) => {
            let digits_only: bool = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
            if digits_only && (10..=15).contains(&value.len()) {
                Some(value.to_string())
            } else {
                errors.push("phone", "Phone must be 10 to 15 digits");
                None
            }
        }
    };

    let city: Option<City> = parse_enum_field(&mut errors, "city", "City", input.city.as_deref());
    let property_type: Option<PropertyType> = parse_enum_field(
        &mut errors,
        "propertyType",
        "Property type",
        input.property_type.as_deref(),
    );
    let purpose: Option<Purpose> =
        parse_enum_field(&mut errors, "purpose", "Purpose", input.purpose.as_deref());
    let timeline: Option<Timeline> =
        parse_enum_field(&mut errors, "timeline", "Timeline", input.timeline.as_deref());
    let source: Option<Source> =
        parse_enum_field(&mut errors, "source", "Source", input.source.as_deref());

    // Rule: BHK is optional at the field level; requiredness is cross-field
    let mut bhk: Option<Bhk> = None;
    let mut bhk_parse_failed: bool = false;
    if let Some(token) = presence(input.bhk.as_deref()) {
        match Bhk::parse(token.trim()) {
            Ok(value) => bhk = Some(value),
            Err(parse_error) => {
                bhk_parse_failed = true;
                errors.push("bhk", parse_error.to_string());
            }
        }
    }

    // Rule: status is optional; present values must be in the vocabulary
    let mut status: Option<LeadStatus> = None;
    if let Some(token) = presence(input.status.as_deref()) {
        match LeadStatus::parse(token.trim()) {
            Ok(value) => status = Some(value),
            Err(parse_error) => errors.push("status", parse_error.to_string()),
        }
    }

    // Rule: budgets are optional non-negative integers; blank coerces to
    // absent, non-numeric text is an error
    let budget_min: Option<i64> =
        normalize_budget(&mut errors, "budgetMin", input.budget_min.as_ref());
    let budget_max: Option<i64> =
        normalize_budget(&mut errors, "budgetMax", input.budget_max.as_ref());

    // Rule: notes are optional, at most 1000 characters
    let notes: Option<String> = match presence(input.notes.as_deref()) {
        None => None,
        Some(value) => {
            if value.chars().count() > NOTES_MAX {
                errors.push("notes", "Notes must be less than 1000 characters");
                None
            } else {
                Some(value.to_string())
            }
        }
    };

    let tags: Vec<String> = normalize_tags(input.tags.as_ref());

    // Cross-field rules run only when their operand fields parsed
    if let Some(property_type_value) = property_type {
        if property_type_value.requires_bhk() {
            // Rule: Apartment and Villa leads must carry a BHK
            if bhk.is_none() && !bhk_parse_failed {
                errors.push("bhk", "BHK is required for Apartment or Villa");
            }
        } else if bhk.is_some() {
            match kind {
                // Rule: other property types must not carry one
                InputKind::Form => {
                    errors.push(
                        "bhk",
                        "BHK must be left empty unless the property type is Apartment or Villa",
                    );
                }
                // Bulk rows drop the value instead of failing the row
                InputKind::CsvRow => bhk = None,
            }
        }
    }

    // Rule: when both budgets are present, max must not undercut min
    if let (Some(min), Some(max)) = (budget_min, budget_max)
        && max < min
    {
        errors.push("budgetMax", "budgetMax must be ≥ budgetMin");
    }

    match (full_name, phone, city, property_type, purpose, timeline, source) {
        (
            Some(full_name),
            Some(phone),
            Some(city),
            Some(property_type),
            Some(purpose),
            Some(timeline),
            Some(source),
        ) if errors.is_empty() => Ok(ValidatedLead {
            full_name,
            email,
            phone,
            city,
            property_type,
            bhk,
            purpose,
            budget_min,
            budget_max,
            timeline,
            source,
            status,
            notes,
            tags,
        }),
        _ => Err(errors),
    }
}

/// Returns the value when it is non-blank, `None` otherwise.
fn presence(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_enum_field<T: std::str::FromStr>(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    raw: Option<&str>,
) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match presence(raw) {
        None => {
            errors.push(field, format!("{label} is required"));
            None
        }
        Some(token) => match token.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(parse_error) => {
                errors.push(field, parse_error.to_string());
                None
            }
        },
    }
}

fn normalize_budget(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&NumberOrText>,
) -> Option<i64> {
    let raw_value: &NumberOrText = raw?;
    if raw_value.is_blank() {
        return None;
    }
    match raw_value.as_i64() {
        Some(value) if value >= 0 => Some(value),
        _ => {
            errors.push(field, format!("{field} must be a non-negative integer"));
            None
        }
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
        return false;
    }
    !domain.contains('@')
}
