// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for lead mutations, queries, and bulk operations.
//!
//! Every handler takes the authenticated actor explicitly; nothing here
//! reads ambient identity. Handlers translate requests into domain values,
//! route mutations through the core transition function, and translate
//! every failure into an [`ApiError`].

use num_traits::cast::ToPrimitive;

use leadbook::{Command, Transition, apply, authorize_lead_access};
use leadbook_audit::HistoryEntry;
use leadbook_domain::{
    Agent, City, DomainError, InputKind, Lead, LeadId, LeadStatus, NumberOrText, PropertyType,
    Timeline, TimestampMs, ValidatedLead, validate_lead_input,
};
use leadbook_persistence::{LeadPage, LeadQuery, LeadSort, Persistence};

use crate::auth::AuthenticatedActor;
use crate::csv_export::{EXPORT_PAGE_SIZE, render_csv};
use crate::error::{ApiError, ImportRowError, translate_core_error, translate_persistence_error};
use crate::ratelimit::{RateDecision, RateLimiter, create_lead_key};
use crate::request_response::{
    CreateLeadRequest, CreateLeadResponse, DeleteLeadResponse, ExportLeadsRequest,
    ImportLeadsRequest, ImportLeadsResponse, LeadDetailResponse, ListLeadsRequest,
    ListLeadsResponse, UpdateLeadRequest, UpdateLeadResponse,
};

/// Maximum rows accepted by one bulk import.
pub const MAX_IMPORT_ROWS: usize = 200;

/// History entries returned with a lead detail.
pub const DETAIL_HISTORY_LIMIT: i64 = 5;

/// Generates an opaque lead record id.
fn generate_lead_id() -> LeadId {
    LeadId::new(&format!("{:032x}", rand::random::<u128>()))
}

/// Marker for a filter whose token names no known value.
///
/// Such a filter can never match a stored row, so callers answer with an
/// empty result instead of querying.
struct UnmatchableFilter;

/// Parses one optional filter token against a vocabulary.
///
/// An absent or empty token means the filter is off; a present token must
/// name a known value.
fn parse_filter<T>(
    token: Option<&str>,
    parse: impl Fn(&str) -> Result<T, DomainError>,
) -> Result<Option<T>, UnmatchableFilter> {
    match token.filter(|token| !token.is_empty()) {
        None => Ok(None),
        Some(token) => parse(token).map(Some).map_err(|_| UnmatchableFilter),
    }
}

/// Builds the persistence query for a listing request.
///
/// Non-admin actors are narrowed to their own records here; admins query
/// the full set. Absent pagination falls back to the query defaults.
fn build_lead_query(
    request: &ListLeadsRequest,
    actor: &AuthenticatedActor,
) -> Result<LeadQuery, UnmatchableFilter> {
    let city: Option<City> = parse_filter(request.city.as_deref(), City::parse)?;
    let property_type: Option<PropertyType> =
        parse_filter(request.property_type.as_deref(), PropertyType::parse)?;
    let status: Option<LeadStatus> = parse_filter(request.status.as_deref(), LeadStatus::parse)?;
    let timeline: Option<Timeline> = parse_filter(request.timeline.as_deref(), Timeline::parse)?;

    let mut query: LeadQuery = LeadQuery {
        q: request.q.clone().filter(|q| !q.is_empty()),
        city,
        property_type,
        status,
        timeline,
        owner_id: (!actor.is_admin).then(|| actor.id.clone()),
        sort: LeadSort::parse(request.sort.as_deref()),
        ..LeadQuery::default()
    };
    if let Some(page) = request.page.and_then(|page| page.to_usize()) {
        query.page = page;
    }
    if let Some(page_size) = request.page_size.and_then(|size| size.to_usize()) {
        query.page_size = page_size;
    }

    Ok(query)
}

/// Creates a lead via the API boundary.
///
/// This function:
/// - Counts the call against the actor's creation window
/// - Validates the submitted fields
/// - Caches the actor's profile
/// - Applies the creation command and persists the transition
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `limiter` - The creation rate limiter
/// * `request` - The submitted field values
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(CreateLeadResponse)` with the generated id on success
/// * `Err(ApiError)` if the actor is over their creation budget, a field
///   fails validation, or the write fails
///
/// # Errors
///
/// Returns an error if:
/// - The actor has exhausted their creation window (`RateLimited`)
/// - Any submitted field fails validation (`ValidationFailed`)
/// - The database write fails
pub fn create_lead(
    persistence: &mut Persistence,
    limiter: &RateLimiter,
    request: CreateLeadRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateLeadResponse, ApiError> {
    // The creation budget is spent before any validation work
    if let RateDecision::Limited { reset_at } = limiter.check(&create_lead_key(&actor.id)) {
        tracing::warn!("Creation rate limit hit for agent {}", actor.id);
        return Err(ApiError::RateLimited {
            reset_at: reset_at.value(),
        });
    }

    let submission: ValidatedLead = validate_lead_input(&request.input, InputKind::Form)?;

    let agent: Agent = actor.to_agent();
    persistence
        .upsert_agent(&agent)
        .map_err(translate_persistence_error)?;

    let lead_id: LeadId = generate_lead_id();
    let command: Command = Command::CreateLead {
        lead_id: lead_id.clone(),
        submission,
        created_at: TimestampMs::now(),
    };

    let transition: Transition = apply(None, command, &agent).map_err(translate_core_error)?;
    persistence
        .persist_transition(&transition, &agent.agent_id)
        .map_err(translate_persistence_error)?;

    Ok(CreateLeadResponse {
        id: lead_id.value().to_string(),
        message: String::from("Lead created"),
    })
}

/// Updates a lead via the API boundary.
///
/// This function:
/// - Resolves the targeted record
/// - Verifies the actor owns it or holds the admin capability
/// - Validates the submitted fields
/// - Checks the client's freshness token and persists the rewrite
///
/// Ownership is checked before field validation, and validation before the
/// freshness token.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The record to update
/// * `request` - The submitted field values and freshness token
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(UpdateLeadResponse)` on success
/// * `Err(ApiError)` if the record is missing, access is denied, a field
///   fails validation, or the record changed since the client read it
///
/// # Errors
///
/// Returns an error if:
/// - The record does not exist (`NotFound`)
/// - The actor neither owns the record nor is an admin (`Forbidden`)
/// - Any submitted field fails validation (`ValidationFailed`)
/// - The freshness token is unreadable or no longer matches (`StaleWrite`)
pub fn update_lead(
    persistence: &mut Persistence,
    lead_id: &str,
    request: UpdateLeadRequest,
    actor: &AuthenticatedActor,
) -> Result<UpdateLeadResponse, ApiError> {
    let id: LeadId = LeadId::new(lead_id);
    let current: Lead = persistence
        .get_lead(&id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            lead_id: lead_id.to_string(),
        })?;

    let agent: Agent = actor.to_agent();
    authorize_lead_access(&current, &agent).map_err(translate_core_error)?;

    let submission: ValidatedLead = validate_lead_input(&request.input, InputKind::Form)?;

    // An unreadable freshness token can never match a stored timestamp
    let expected_updated_at: TimestampMs = request
        .updated_at
        .as_ref()
        .and_then(NumberOrText::as_i64)
        .map_or(TimestampMs::new(-1), TimestampMs::new);

    let command: Command = Command::UpdateLead {
        lead_id: id.clone(),
        submission,
        expected_updated_at,
    };

    let transition: Transition =
        apply(Some(&current), command, &agent).map_err(translate_core_error)?;
    persistence
        .persist_transition(&transition, &agent.agent_id)
        .map_err(translate_persistence_error)?;

    Ok(UpdateLeadResponse {
        id: lead_id.to_string(),
        message: String::from("Lead updated"),
    })
}

/// Deletes a lead via the API boundary.
///
/// This function:
/// - Resolves the targeted record
/// - Verifies the actor owns it or holds the admin capability
/// - Removes the record together with its history
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The record to delete
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(DeleteLeadResponse)` on success
/// * `Err(ApiError)` if the record is missing or access is denied
///
/// # Errors
///
/// Returns an error if:
/// - The record does not exist (`NotFound`)
/// - The actor neither owns the record nor is an admin (`Forbidden`)
/// - The database write fails
pub fn delete_lead(
    persistence: &mut Persistence,
    lead_id: &str,
    actor: &AuthenticatedActor,
) -> Result<DeleteLeadResponse, ApiError> {
    let id: LeadId = LeadId::new(lead_id);
    let current: Lead = persistence
        .get_lead(&id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            lead_id: lead_id.to_string(),
        })?;

    let agent: Agent = actor.to_agent();
    let command: Command = Command::DeleteLead {
        lead_id: id.clone(),
    };

    let transition: Transition =
        apply(Some(&current), command, &agent).map_err(translate_core_error)?;
    persistence
        .persist_transition(&transition, &agent.agent_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteLeadResponse {
        id: lead_id.to_string(),
        message: String::from("Lead deleted"),
    })
}

/// Retrieves a lead with its recent history via the API boundary.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The record to retrieve
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(LeadDetailResponse)` with the record and its newest history
///   entries, newest first
/// * `Err(ApiError)` if the record is missing or access is denied
///
/// # Errors
///
/// Returns an error if:
/// - The record does not exist (`NotFound`)
/// - The actor neither owns the record nor is an admin (`Forbidden`)
/// - The database query fails
pub fn get_lead_detail(
    persistence: &mut Persistence,
    lead_id: &str,
    actor: &AuthenticatedActor,
) -> Result<LeadDetailResponse, ApiError> {
    let id: LeadId = LeadId::new(lead_id);
    let lead: Lead = persistence
        .get_lead(&id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            lead_id: lead_id.to_string(),
        })?;

    let agent: Agent = actor.to_agent();
    authorize_lead_access(&lead, &agent).map_err(translate_core_error)?;

    let history: Vec<HistoryEntry> = persistence
        .get_lead_history(&id, DETAIL_HISTORY_LIMIT)
        .map_err(translate_persistence_error)?;

    Ok(LeadDetailResponse { lead, history })
}

/// Lists leads via the API boundary.
///
/// Non-admin actors see only their own records. A filter token naming no
/// known value answers with an empty page without touching the database.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The filter, search, sort, and pagination inputs
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(ListLeadsResponse)` with the page and the total match count
/// * `Err(ApiError)` if the database query fails
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_leads(
    persistence: &mut Persistence,
    request: &ListLeadsRequest,
    actor: &AuthenticatedActor,
) -> Result<ListLeadsResponse, ApiError> {
    let Ok(query) = build_lead_query(request, actor) else {
        return Ok(ListLeadsResponse {
            total: 0,
            items: Vec::new(),
        });
    };

    let page: LeadPage = persistence
        .list_leads(&query)
        .map_err(translate_persistence_error)?;

    Ok(ListLeadsResponse {
        total: page.total,
        items: page.items,
    })
}

/// Bulk-imports lead rows via the API boundary.
///
/// The batch is all-or-nothing: every row must pass validation before any
/// row is inserted, and a failing batch reports every failing row at once.
/// Imported rows do not receive history entries.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The rows to import, in file order
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(ImportLeadsResponse)` with the inserted row count
/// * `Err(ApiError)` if the batch is too large, any row fails validation,
///   or the insert fails
///
/// # Errors
///
/// Returns an error if:
/// - The batch exceeds [`MAX_IMPORT_ROWS`] (`BatchTooLarge`)
/// - Any row fails validation (`BatchValidationFailed`, with row numbers
///   counting the header line as row 1)
/// - The database write fails
pub fn import_leads(
    persistence: &mut Persistence,
    request: ImportLeadsRequest,
    actor: &AuthenticatedActor,
) -> Result<ImportLeadsResponse, ApiError> {
    if request.rows.len() > MAX_IMPORT_ROWS {
        return Err(ApiError::BatchTooLarge {
            submitted: request.rows.len(),
            max: MAX_IMPORT_ROWS,
        });
    }

    let mut submissions: Vec<ValidatedLead> = Vec::with_capacity(request.rows.len());
    let mut errors: Vec<ImportRowError> = Vec::new();

    for (idx, row) in request.rows.iter().enumerate() {
        match validate_lead_input(row, InputKind::CsvRow) {
            Ok(submission) => submissions.push(submission),
            Err(failures) => errors.push(ImportRowError {
                row: idx + 2,
                message: failures.joined_message(),
            }),
        }
    }

    if !errors.is_empty() {
        tracing::warn!("Import batch rejected with {} failing rows", errors.len());
        return Err(ApiError::BatchValidationFailed { errors });
    }

    let agent: Agent = actor.to_agent();
    persistence
        .upsert_agent(&agent)
        .map_err(translate_persistence_error)?;

    let created_at: TimestampMs = TimestampMs::now();
    let leads: Vec<Lead> = submissions
        .into_iter()
        .map(|submission| {
            Lead::new(
                generate_lead_id(),
                agent.agent_id.clone(),
                submission.into_fields(),
                created_at,
                created_at,
            )
        })
        .collect();

    let inserted: usize = persistence
        .insert_lead_batch(&leads)
        .map_err(translate_persistence_error)?;

    Ok(ImportLeadsResponse { ok: true, inserted })
}

/// Exports leads as CSV via the API boundary.
///
/// Takes the listing filter vocabulary and renders the full filtered set
/// in one document, up to [`EXPORT_PAGE_SIZE`] rows. Non-admin actors
/// export only their own records, and a filter token naming no known value
/// yields a header-only document.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The filter, search, and sort inputs
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(String)` with the CSV text
/// * `Err(ApiError)` if the database query or rendering fails
///
/// # Errors
///
/// Returns an error if the database query fails or the document cannot be
/// rendered.
pub fn export_leads(
    persistence: &mut Persistence,
    request: &ExportLeadsRequest,
    actor: &AuthenticatedActor,
) -> Result<String, ApiError> {
    let listing: ListLeadsRequest = ListLeadsRequest {
        q: request.q.clone(),
        city: request.city.clone(),
        property_type: request.property_type.clone(),
        status: request.status.clone(),
        timeline: request.timeline.clone(),
        sort: request.sort.clone(),
        page: None,
        page_size: None,
    };

    let Ok(mut query) = build_lead_query(&listing, actor) else {
        return render_csv(&[]);
    };
    query.page = 1;
    query.page_size = EXPORT_PAGE_SIZE;

    let page: LeadPage = persistence
        .list_leads(&query)
        .map_err(translate_persistence_error)?;

    render_csv(&page.items)
}
