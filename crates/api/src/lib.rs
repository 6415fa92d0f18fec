// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Leadbook CRM.
//!
//! Translates requests into domain values, routes mutations through the
//! core transition engine, and maps every failure onto the API error
//! taxonomy. The HTTP server is a thin shell over this crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod csv_export;
mod csv_import;
mod error;
mod handlers;
mod ratelimit;
mod request_response;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use auth::AuthenticatedActor;
pub use csv_export::{
    EXPORT_COLUMNS, EXPORT_CONTENT_DISPOSITION, EXPORT_CONTENT_TYPE, EXPORT_PAGE_SIZE,
};
pub use csv_import::decode_csv_rows;
pub use error::{ApiError, ImportRowError};
pub use handlers::{
    DETAIL_HISTORY_LIMIT, MAX_IMPORT_ROWS, create_lead, delete_lead, export_leads,
    get_lead_detail, import_leads, list_leads, update_lead,
};
pub use ratelimit::{CREATE_LIMIT, CREATE_WINDOW, RateDecision, RateLimiter, create_lead_key};
pub use request_response::{
    CreateLeadRequest, CreateLeadResponse, DeleteLeadResponse, ExportLeadsRequest,
    ImportLeadsRequest, ImportLeadsResponse, LeadDetailResponse, ListLeadsRequest,
    ListLeadsResponse, UpdateLeadRequest, UpdateLeadResponse,
};
