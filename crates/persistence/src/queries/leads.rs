// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead record queries.
//!
//! The listing query is assembled dynamically with Diesel's boxed queries:
//! the same filter set backs both the total count and the requested page.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use leadbook_domain::{
    Bhk, City, DomainError, Lead, LeadFields, LeadId, LeadStatus, PropertyType, Purpose, Source,
    Timeline, TimestampMs,
};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::data_models::{LeadPage, LeadQuery, LeadSort, SortDirection, SortField};
use crate::diesel_schema;
use crate::error::PersistenceError;

type BoxedLeadsQuery<'a> = diesel_schema::leads::BoxedQuery<'a, Sqlite>;

/// Diesel Queryable struct for lead rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = diesel_schema::leads)]
struct LeadRow {
    lead_id: String,
    owner_id: String,
    full_name: String,
    email: Option<String>,
    phone: String,
    city: String,
    property_type: String,
    bhk: Option<String>,
    purpose: String,
    budget_min: Option<i64>,
    budget_max: Option<i64>,
    timeline: String,
    source: String,
    status: String,
    notes: Option<String>,
    tags: String,
    created_at: i64,
    updated_at: i64,
}

impl LeadRow {
    /// Rebuilds the domain record from its stored row.
    fn into_lead(self) -> Result<Lead, PersistenceError> {
        let city: City = City::parse(&self.city).map_err(|e| reconstruction(&self.lead_id, &e))?;
        let property_type: PropertyType = PropertyType::parse(&self.property_type)
            .map_err(|e| reconstruction(&self.lead_id, &e))?;
        let bhk: Option<Bhk> = match self.bhk.as_deref() {
            Some(token) => Some(
                Bhk::from_storage_token(token).map_err(|e| reconstruction(&self.lead_id, &e))?,
            ),
            None => None,
        };
        let purpose: Purpose =
            Purpose::parse(&self.purpose).map_err(|e| reconstruction(&self.lead_id, &e))?;
        let timeline: Timeline = Timeline::from_storage_token(&self.timeline)
            .map_err(|e| reconstruction(&self.lead_id, &e))?;
        let source: Source = Source::from_storage_token(&self.source)
            .map_err(|e| reconstruction(&self.lead_id, &e))?;
        let status: LeadStatus =
            LeadStatus::parse(&self.status).map_err(|e| reconstruction(&self.lead_id, &e))?;
        let tags: Vec<String> = serde_json::from_str(&self.tags)?;

        let fields: LeadFields = LeadFields {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            city,
            property_type,
            bhk,
            purpose,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            timeline,
            source,
            status,
            notes: self.notes,
            tags,
        };

        Ok(Lead::new(
            LeadId::new(&self.lead_id),
            self.owner_id,
            fields,
            TimestampMs::new(self.created_at),
            TimestampMs::new(self.updated_at),
        ))
    }
}

fn reconstruction(lead_id: &str, err: &DomainError) -> PersistenceError {
    PersistenceError::ReconstructionError(format!("lead {lead_id}: {err}"))
}

/// Retrieves a lead by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lead_id` - The record id
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row cannot
/// be rebuilt. Returns `Ok(None)` if the lead is not found.
pub fn get_lead(
    conn: &mut SqliteConnection,
    lead_id: &LeadId,
) -> Result<Option<Lead>, PersistenceError> {
    debug!(lead_id = %lead_id, "Looking up lead");

    let result: Result<LeadRow, diesel::result::Error> = diesel_schema::leads::table
        .filter(diesel_schema::leads::lead_id.eq(lead_id.value()))
        .select(LeadRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_lead()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists leads matching a query.
///
/// Returns the total match count alongside the requested page, so the
/// count always reflects the same predicate as the items.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `query` - The filter, sort, and pagination inputs
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row cannot
/// be rebuilt.
pub fn list_leads(
    conn: &mut SqliteConnection,
    query: &LeadQuery,
) -> Result<LeadPage, PersistenceError> {
    let page_size: i64 = query
        .page_size
        .to_i64()
        .ok_or_else(|| PersistenceError::Other("Page size out of range".to_string()))?;
    let page: i64 = query
        .page
        .to_i64()
        .ok_or_else(|| PersistenceError::Other("Page number out of range".to_string()))?
        .max(1);
    let offset: i64 = (page - 1).saturating_mul(page_size);

    let total: i64 = filtered(query).count().get_result(conn)?;

    let rows: Vec<LeadRow> = apply_sort(filtered(query), query.sort)
        .select(LeadRow::as_select())
        .limit(page_size)
        .offset(offset)
        .load(conn)?;

    let mut items: Vec<Lead> = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(row.into_lead()?);
    }

    debug!(total, returned = items.len(), "Listed leads");
    Ok(LeadPage { total, items })
}

/// Builds the filter predicate shared by the count and the page query.
fn filtered(query: &LeadQuery) -> BoxedLeadsQuery<'static> {
    let mut boxed: BoxedLeadsQuery<'static> = diesel_schema::leads::table.into_boxed();

    if let Some(term) = &query.q {
        let pattern: String = format!("%{term}%");
        boxed = boxed.filter(
            diesel_schema::leads::full_name
                .like(pattern.clone())
                .or(diesel_schema::leads::phone.like(pattern.clone()))
                .or(diesel_schema::leads::email.like(pattern)),
        );
    }
    if let Some(city) = query.city {
        boxed = boxed.filter(diesel_schema::leads::city.eq(city.as_str()));
    }
    if let Some(property_type) = query.property_type {
        boxed = boxed.filter(diesel_schema::leads::property_type.eq(property_type.as_str()));
    }
    if let Some(status) = query.status {
        boxed = boxed.filter(diesel_schema::leads::status.eq(status.as_str()));
    }
    if let Some(timeline) = query.timeline {
        boxed = boxed.filter(diesel_schema::leads::timeline.eq(timeline.storage_token()));
    }
    if let Some(owner_id) = &query.owner_id {
        boxed = boxed.filter(diesel_schema::leads::owner_id.eq(owner_id.clone()));
    }

    boxed
}

/// Applies a sort specification to the page query.
fn apply_sort(boxed: BoxedLeadsQuery<'static>, sort: LeadSort) -> BoxedLeadsQuery<'static> {
    match (sort.field, sort.direction) {
        (SortField::UpdatedAt, SortDirection::Ascending) => {
            boxed.order(diesel_schema::leads::updated_at.asc())
        }
        (SortField::UpdatedAt, SortDirection::Descending) => {
            boxed.order(diesel_schema::leads::updated_at.desc())
        }
        (SortField::CreatedAt, SortDirection::Ascending) => {
            boxed.order(diesel_schema::leads::created_at.asc())
        }
        (SortField::CreatedAt, SortDirection::Descending) => {
            boxed.order(diesel_schema::leads::created_at.desc())
        }
        (SortField::FullName, SortDirection::Ascending) => {
            boxed.order(diesel_schema::leads::full_name.asc())
        }
        (SortField::FullName, SortDirection::Descending) => {
            boxed.order(diesel_schema::leads::full_name.desc())
        }
        (SortField::City, SortDirection::Ascending) => {
            boxed.order(diesel_schema::leads::city.asc())
        }
        (SortField::City, SortDirection::Descending) => {
            boxed.order(diesel_schema::leads::city.desc())
        }
        (SortField::Status, SortDirection::Ascending) => {
            boxed.order(diesel_schema::leads::status.asc())
        }
        (SortField::Status, SortDirection::Descending) => {
            boxed.order(diesel_schema::leads::status.desc())
        }
    }
}
