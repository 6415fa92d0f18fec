// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::enums::{Bhk, City, LeadStatus, PropertyType, Purpose, Source, Timeline};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A moment in time expressed as epoch milliseconds.
///
/// This is the concurrency token for lead updates: clients echo back the
/// `updated_at` value they last observed, and a mismatch rejects the write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TimestampMs {
    millis: i64,
}

impl TimestampMs {
    /// Creates a timestamp from a raw epoch-millisecond value.
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        Self { millis }
    }

    /// Returns the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        let nanos: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let millis: i64 = i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX);
        Self { millis }
    }

    /// Returns the raw epoch-millisecond value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.millis
    }

    /// Returns a timestamp strictly greater than this one.
    ///
    /// Uses the wall clock when it is ahead, and `self + 1` otherwise, so
    /// successive mutations of a record always move its last-modified time
    /// forward even if the clock steps backwards between them.
    #[must_use]
    pub fn advance(&self) -> Self {
        let now: Self = Self::now();
        if now.millis > self.millis {
            now
        } else {
            Self {
                millis: self.millis + 1,
            }
        }
    }
}

impl std::fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.millis)
    }
}

/// Opaque identifier of a lead record.
///
/// Assigned once at creation and never reused. The value carries no
/// structure; equality is the only meaningful operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId {
    value: String,
}

impl LeadId {
    /// Wraps an id value.
    ///
    /// # Arguments
    ///
    /// * `value` - The opaque id string
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the id value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An acting identity, as supplied by the external identity provider.
///
/// Cached locally as a profile row whenever the agent performs a write;
/// never refreshed on reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Opaque id from the identity provider.
    pub agent_id: String,
    /// Human-readable name, when the provider supplies one.
    pub display_name: Option<String>,
    /// Contact email, when the provider supplies one.
    pub email: Option<String>,
    /// Whether the agent holds the admin capability.
    pub is_admin: bool,
}

impl Agent {
    /// Creates an agent identity.
    #[must_use]
    pub const fn new(
        agent_id: String,
        display_name: Option<String>,
        email: Option<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            agent_id,
            display_name,
            email,
            is_admin,
        }
    }
}

/// The mutable, validated field set of a lead record.
///
/// Enum fields serialize with their user-facing tokens, so this struct is
/// also the wire shape of a lead's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFields {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub city: City,
    pub property_type: PropertyType,
    pub bhk: Option<Bhk>,
    pub purpose: Purpose,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Timeline,
    pub source: Source,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

/// A validated lead submission, before it is bound to a record.
///
/// Produced by [`crate::validate_lead_input`]. On the create path every
/// field becomes part of the new record ([`Self::into_fields`]); on the
/// update path the submission is merged over the current record
/// ([`Self::apply_to`]) with two different per-field policies:
///
/// - `full_name`, `phone`, `city`, `property_type`, `purpose`, `timeline`,
///   `source`, `bhk`, and `tags` are always written. `bhk: None` clears the
///   stored value (switching away from a residential property type must not
///   leave a stale unit size), and `tags` always replaces the stored set.
/// - `email`, `notes`, `budget_min`, `budget_max`, and `status` are written
///   only when present; `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLead {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub city: City,
    pub property_type: PropertyType,
    pub bhk: Option<Bhk>,
    pub purpose: Purpose,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Timeline,
    pub source: Source,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl ValidatedLead {
    /// Materializes this submission as the field set of a brand-new lead.
    ///
    /// Status defaults to [`LeadStatus::New`] when the submission did not
    /// carry one.
    #[must_use]
    pub fn into_fields(self) -> LeadFields {
        LeadFields {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            city: self.city,
            property_type: self.property_type,
            bhk: self.bhk,
            purpose: self.purpose,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            timeline: self.timeline,
            source: self.source,
            status: self.status.unwrap_or_default(),
            notes: self.notes,
            tags: self.tags,
        }
    }

    /// Merges this submission over an existing record's fields.
    ///
    /// See the type-level docs for which fields are always written and which
    /// only when present.
    #[must_use]
    pub fn apply_to(&self, current: &LeadFields) -> LeadFields {
        LeadFields {
            full_name: self.full_name.clone(),
            email: self.email.clone().or_else(|| current.email.clone()),
            phone: self.phone.clone(),
            city: self.city,
            property_type: self.property_type,
            bhk: self.bhk,
            purpose: self.purpose,
            budget_min: self.budget_min.or(current.budget_min),
            budget_max: self.budget_max.or(current.budget_max),
            timeline: self.timeline,
            source: self.source,
            status: self.status.unwrap_or(current.status),
            notes: self.notes.clone().or_else(|| current.notes.clone()),
            tags: self.tags.clone(),
        }
    }

    /// Wire-spelling names of the fields this submission will write.
    ///
    /// The audit diff for an update is restricted to exactly these fields.
    #[must_use]
    pub fn submitted_fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = vec![
            "fullName",
            "phone",
            "city",
            "propertyType",
            "bhk",
            "purpose",
            "timeline",
            "source",
            "tags",
        ];
        if self.email.is_some() {
            fields.push("email");
        }
        if self.budget_min.is_some() {
            fields.push("budgetMin");
        }
        if self.budget_max.is_some() {
            fields.push("budgetMax");
        }
        if self.notes.is_some() {
            fields.push("notes");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        fields
    }
}

/// A persisted lead record.
///
/// Identity, ownership, and the creation timestamp are immutable;
/// `updated_at` moves strictly forward on every successful mutation and
/// doubles as the optimistic-concurrency token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "id")]
    lead_id: LeadId,
    owner_id: String,
    #[serde(flatten)]
    fields: LeadFields,
    created_at: TimestampMs,
    updated_at: TimestampMs,
}

impl Lead {
    /// Creates a lead record from its persisted parts.
    ///
    /// # Arguments
    ///
    /// * `lead_id` - The opaque record id
    /// * `owner_id` - The creating agent's id
    /// * `fields` - The validated field set
    /// * `created_at` - Creation time
    /// * `updated_at` - Last-modified time
    #[must_use]
    pub const fn new(
        lead_id: LeadId,
        owner_id: String,
        fields: LeadFields,
        created_at: TimestampMs,
        updated_at: TimestampMs,
    ) -> Self {
        Self {
            lead_id,
            owner_id,
            fields,
            created_at,
            updated_at,
        }
    }

    /// Returns the record id.
    #[must_use]
    pub const fn lead_id(&self) -> &LeadId {
        &self.lead_id
    }

    /// Returns the owning agent's id.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Returns the editable field set.
    #[must_use]
    pub const fn fields(&self) -> &LeadFields {
        &self.fields
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> TimestampMs {
        self.created_at
    }

    /// Returns the last-modified time (the concurrency token).
    #[must_use]
    pub const fn updated_at(&self) -> TimestampMs {
        self.updated_at
    }

    /// Returns a copy of this record with new fields and last-modified time.
    ///
    /// Identity, ownership, and creation time carry over unchanged.
    #[must_use]
    pub fn with_fields(&self, fields: LeadFields, updated_at: TimestampMs) -> Self {
        Self {
            lead_id: self.lead_id.clone(),
            owner_id: self.owner_id.clone(),
            fields,
            created_at: self.created_at,
            updated_at,
        }
    }
}
