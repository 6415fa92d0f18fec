// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV decoding for bulk lead import.
//!
//! Turns raw CSV text into the same pre-validation row shape a JSON import
//! body carries. Decoding is structural only; field rules run later in the
//! domain layer, so a present-but-invalid cell passes through untouched and
//! reports as a per-row validation error instead of a decode failure.

use csv::StringRecord;
use std::collections::HashMap;

use leadbook_domain::{NumberOrText, RawLeadInput, TagsInput};

use crate::error::{ApiError, ImportRowError};

/// Required CSV column headers (case-insensitive, normalized).
///
/// These are the columns whose values every row must eventually carry; the
/// remaining columns of the template (`email`, `bhk`, `budgetMin`,
/// `budgetMax`, `notes`, `tags`, `status`) are optional and may be absent
/// from the file entirely.
const REQUIRED_HEADERS: &[&str] = &[
    "fullname",
    "phone",
    "city",
    "propertytype",
    "purpose",
    "timeline",
    "source",
];

/// Normalizes a CSV header string for case-insensitive, separator-tolerant
/// matching, so `fullName`, `full_name`, and `Full Name` all address the
/// same column.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '_'], "")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ApiError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        let normalized: String = normalize_header(header);
        header_map.insert(normalized, idx);
    }

    let mut missing: Vec<String> = Vec::new();
    for required in REQUIRED_HEADERS {
        if !header_map.contains_key(*required) {
            missing.push(String::from(*required));
        }
    }

    if !missing.is_empty() {
        return Err(ApiError::BatchValidationFailed {
            errors: vec![ImportRowError {
                row: 0,
                message: format!("Missing required headers: {}", missing.join(", ")),
            }],
        });
    }

    Ok(header_map)
}

/// Builds one pre-validation row from a CSV record.
///
/// Cells are trimmed; an empty or whitespace-only cell decodes as a missing
/// field. Budget cells stay textual here and are parsed by the budget rules
/// later, and a tags cell decodes as one comma-joined value.
fn decode_record(record: &StringRecord, header_map: &HashMap<String, usize>) -> RawLeadInput {
    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    RawLeadInput {
        full_name: get_field("fullname"),
        email: get_field("email"),
        phone: get_field("phone"),
        city: get_field("city"),
        property_type: get_field("propertytype"),
        bhk: get_field("bhk"),
        purpose: get_field("purpose"),
        budget_min: get_field("budgetmin").map(NumberOrText::Text),
        budget_max: get_field("budgetmax").map(NumberOrText::Text),
        timeline: get_field("timeline"),
        source: get_field("source"),
        status: get_field("status"),
        notes: get_field("notes"),
        tags: get_field("tags").map(TagsInput::Joined),
    }
}

/// Decodes CSV text into pre-validation import rows.
///
/// Row numbers in decode errors count the header as row 1, matching how the
/// rows appear in a spreadsheet; a whole-file failure (unreadable or missing
/// headers) reports at row 0.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content as a string
///
/// # Returns
///
/// * `Ok(Vec<RawLeadInput>)` with one entry per data row, in file order
/// * `Err(ApiError::BatchValidationFailed)` if the headers are unusable or
///   any record cannot be read
pub fn decode_csv_rows(csv_content: &str) -> Result<Vec<RawLeadInput>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::BatchValidationFailed {
            errors: vec![ImportRowError {
                row: 0,
                message: format!("Failed to read CSV headers: {e}"),
            }],
        })?
        .clone();

    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<RawLeadInput> = Vec::new();
    let mut errors: Vec<ImportRowError> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(decode_record(&record, &header_map)),
            Err(e) => errors.push(ImportRowError {
                row: idx + 2,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::BatchValidationFailed { errors });
    }

    Ok(rows)
}
