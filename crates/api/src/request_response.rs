// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry submissions exactly as received; field-level rules run in
//! the domain layer, so a request DTO never rejects a body on its own. The
//! exception is structural: a body that is not an object, or a `rows` value
//! that is not an array, fails deserialization before any handler runs.

use leadbook_audit::HistoryEntry;
use leadbook_domain::{Lead, NumberOrText, RawLeadInput};

/// API request to create a lead.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CreateLeadRequest {
    /// The submitted field values, exactly as received.
    pub input: RawLeadInput,
}

/// API response for a successful lead creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateLeadResponse {
    /// The generated lead identifier.
    pub id: String,
    /// A success message.
    pub message: String,
}

/// API request to update a lead.
///
/// The freshness token rides alongside the field values. Clients send back
/// the `updatedAt` they last read; a token that no longer matches the stored
/// record means the record changed underneath them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    /// The submitted field values, exactly as received.
    #[serde(flatten)]
    pub input: RawLeadInput,
    /// The freshness token from the record the client last read.
    pub updated_at: Option<NumberOrText>,
}

/// API response for a successful lead update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateLeadResponse {
    /// The updated lead identifier.
    pub id: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful lead deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteLeadResponse {
    /// The deleted lead identifier.
    pub id: String,
    /// A success message.
    pub message: String,
}

/// API request to list leads with filters, search, sort, and pagination.
///
/// Filter values are the user-facing tokens (e.g. `"Chandigarh"`, `"3-6m"`).
/// A token that names no known value matches nothing rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListLeadsRequest {
    /// Free-text search over full name, phone, and email.
    pub q: Option<String>,
    /// City filter token.
    pub city: Option<String>,
    /// Property type filter token.
    pub property_type: Option<String>,
    /// Status filter token.
    pub status: Option<String>,
    /// Timeline filter token.
    pub timeline: Option<String>,
    /// Sort directive as `field:direction`.
    pub sort: Option<String>,
    /// One-based page number.
    pub page: Option<u32>,
    /// Rows per page.
    pub page_size: Option<u32>,
}

/// API response for a lead listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ListLeadsResponse {
    /// Rows matching the filters, before pagination.
    pub total: i64,
    /// The requested page of leads.
    pub items: Vec<Lead>,
}

/// API response for a single lead with its recent history.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LeadDetailResponse {
    /// The lead record.
    pub lead: Lead,
    /// Recent changes, newest first.
    pub history: Vec<HistoryEntry>,
}

/// API request to export leads as CSV.
///
/// Takes the same filter, search, and sort vocabulary as listing but no
/// pagination; an export always covers the full filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportLeadsRequest {
    /// Free-text search over full name, phone, and email.
    pub q: Option<String>,
    /// City filter token.
    pub city: Option<String>,
    /// Property type filter token.
    pub property_type: Option<String>,
    /// Status filter token.
    pub status: Option<String>,
    /// Timeline filter token.
    pub timeline: Option<String>,
    /// Sort directive as `field:direction`.
    pub sort: Option<String>,
}

/// API request to bulk-import lead rows.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportLeadsRequest {
    /// The submitted rows, in file order.
    pub rows: Vec<RawLeadInput>,
}

/// API response for a fully successful bulk import.
///
/// A batch with any failing row inserts nothing and reports per-row errors
/// instead of this shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportLeadsResponse {
    /// Always `true`; a failed batch answers with an error report.
    pub ok: bool,
    /// Rows inserted.
    pub inserted: usize,
}
