// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering for lead export.
//!
//! Renders an already-filtered lead set as a CSV document in a fixed column
//! order. Every cell is quoted, including empty ones, so spreadsheet tools
//! never re-type phone numbers or numeric-looking tags on open.

use leadbook_domain::{Lead, LeadFields};

use crate::error::ApiError;

/// Column order of the exported document.
pub const EXPORT_COLUMNS: [&str; 14] = [
    "fullName",
    "email",
    "phone",
    "city",
    "propertyType",
    "bhk",
    "purpose",
    "budgetMin",
    "budgetMax",
    "timeline",
    "source",
    "notes",
    "tags",
    "status",
];

/// Content type header value for the exported document.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Download disposition header value for the exported document.
pub const EXPORT_CONTENT_DISPOSITION: &str = "attachment; filename=buyers.csv";

/// Upper bound on rows in one export.
pub const EXPORT_PAGE_SIZE: usize = 10_000;

/// Renders one lead as a row in export column order.
///
/// Absent optional values render as empty cells; tags join into one
/// comma-separated cell.
fn lead_row(lead: &Lead) -> [String; 14] {
    let fields: &LeadFields = lead.fields();
    [
        fields.full_name.clone(),
        fields.email.clone().unwrap_or_default(),
        fields.phone.clone(),
        fields.city.as_str().to_string(),
        fields.property_type.as_str().to_string(),
        fields
            .bhk
            .map_or_else(String::new, |bhk| bhk.as_str().to_string()),
        fields.purpose.as_str().to_string(),
        fields
            .budget_min
            .map_or_else(String::new, |amount| amount.to_string()),
        fields
            .budget_max
            .map_or_else(String::new, |amount| amount.to_string()),
        fields.timeline.as_str().to_string(),
        fields.source.as_str().to_string(),
        fields.notes.clone().unwrap_or_default(),
        fields.tags.join(","),
        fields.status.as_str().to_string(),
    ]
}

/// Renders leads as a CSV document with a header line.
///
/// # Arguments
///
/// * `leads` - The leads to render, already filtered and sorted
///
/// # Returns
///
/// * `Ok(String)` with the CSV text
/// * `Err(ApiError::Internal)` if rendering fails
pub fn render_csv(leads: &[Lead]) -> Result<String, ApiError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?;

    for lead in leads {
        writer
            .write_record(lead_row(lead))
            .map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}
