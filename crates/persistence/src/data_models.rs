// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leadbook_domain::{City, Lead, LeadFields, LeadStatus, PropertyType, Timeline};
use serde::Serialize;

use crate::error::PersistenceError;

/// Diesel Insertable struct for lead rows.
///
/// Enum fields are already translated to their storage tokens and tags are
/// serialized to JSON, so this struct writes to the table directly.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::leads)]
pub struct NewLeadRow {
    pub lead_id: String,
    pub owner_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub property_type: String,
    pub bhk: Option<String>,
    pub purpose: String,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: String,
    pub source: String,
    pub status: String,
    pub notes: Option<String>,
    pub tags: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NewLeadRow {
    /// Builds an insertable row from a fully-formed lead record.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag list cannot be serialized.
    pub fn from_lead(lead: &Lead) -> Result<Self, PersistenceError> {
        let fields: &LeadFields = lead.fields();
        let tags_json: String = serde_json::to_string(&fields.tags)?;
        Ok(Self {
            lead_id: lead.lead_id().value().to_string(),
            owner_id: lead.owner_id().to_string(),
            full_name: fields.full_name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            city: fields.city.as_str().to_string(),
            property_type: fields.property_type.as_str().to_string(),
            bhk: fields.bhk.map(|bhk| bhk.storage_token().to_string()),
            purpose: fields.purpose.as_str().to_string(),
            budget_min: fields.budget_min,
            budget_max: fields.budget_max,
            timeline: fields.timeline.storage_token().to_string(),
            source: fields.source.storage_token().to_string(),
            status: fields.status.as_str().to_string(),
            notes: fields.notes.clone(),
            tags: tags_json,
            created_at: lead.created_at().value(),
            updated_at: lead.updated_at().value(),
        })
    }
}

/// A sortable column of the lead listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    UpdatedAt,
    CreatedAt,
    FullName,
    City,
    Status,
}

impl SortField {
    /// Parses a sort field from its wire token.
    ///
    /// Returns `None` for tokens outside the sortable set; callers fall
    /// back to the default field.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "updatedAt" => Some(Self::UpdatedAt),
            "createdAt" => Some(Self::CreatedAt),
            "fullName" => Some(Self::FullName),
            "city" => Some(Self::City),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A complete sort specification for the lead listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl LeadSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses a `field:direction` wire specification.
    ///
    /// Unknown field tokens fall back to the last-modified column, and any
    /// direction token other than `asc` sorts descending. An absent
    /// specification yields the default sort.
    #[must_use]
    pub fn parse(spec: Option<&str>) -> Self {
        let Some(spec) = spec else {
            return Self::default();
        };
        let (field_token, direction_token): (&str, Option<&str>) = match spec.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (spec, None),
        };
        let field: SortField = SortField::parse(field_token).unwrap_or(SortField::UpdatedAt);
        let direction: SortDirection = match direction_token {
            Some("asc") => SortDirection::Ascending,
            _ => SortDirection::Descending,
        };
        Self { field, direction }
    }
}

impl Default for LeadSort {
    fn default() -> Self {
        Self::new(SortField::UpdatedAt, SortDirection::Descending)
    }
}

/// The filter, sort, and pagination inputs of one listing request.
///
/// `owner_id` is the authorization narrowing: non-admin actors list with
/// their own id here, admins leave it absent.
#[derive(Debug, Clone)]
pub struct LeadQuery {
    /// Substring to match against full name, phone, and email.
    pub q: Option<String>,
    pub city: Option<City>,
    pub property_type: Option<PropertyType>,
    pub status: Option<LeadStatus>,
    pub timeline: Option<Timeline>,
    pub owner_id: Option<String>,
    pub sort: LeadSort,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self {
            q: None,
            city: None,
            property_type: None,
            status: None,
            timeline: None,
            owner_id: None,
            sort: LeadSort::default(),
            page: 1,
            page_size: 10,
        }
    }
}

/// One page of listing results together with the total match count.
#[derive(Debug, Clone, Serialize)]
pub struct LeadPage {
    pub total: i64,
    pub items: Vec<Lead>,
}
