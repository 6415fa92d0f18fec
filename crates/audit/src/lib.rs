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
    clippy::all
)]

//! Audit history for lead mutations.
//!
//! Every successful create or update of a lead appends one immutable
//! [`HistoryEntry`] whose payload is either the full created snapshot or a
//! field-level diff of the changed values. Payload values use the storage
//! vocabulary, so history reads back exactly what the store held at the
//! time of the change.

use leadbook_domain::{Lead, LeadFields, LeadId, TimestampMs};
use serde::Serialize;
use serde_json::{Map, Value};

/// The previous and new value of one changed field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    /// Value before the mutation.
    pub from: Value,
    /// Value after the mutation.
    pub to: Value,
}

impl FieldChange {
    /// Creates a field change pair.
    ///
    /// # Arguments
    ///
    /// * `from` - Value before the mutation
    /// * `to` - Value after the mutation
    #[must_use]
    pub const fn new(from: Value, to: Value) -> Self {
        Self { from, to }
    }
}

/// The field-keyed changes one update produced.
///
/// An empty set means the update wrote nothing observable and must not
/// produce a history entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: std::collections::BTreeMap<String, FieldChange>,
}

impl ChangeSet {
    /// Returns whether no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns the change recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.changes.get(field)
    }

    /// Renders the change set as the history payload object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut payload: Map<String, Value> = Map::new();
        for (field, change) in &self.changes {
            let mut pair: Map<String, Value> = Map::new();
            pair.insert(String::from("from"), change.from.clone());
            pair.insert(String::from("to"), change.to.clone());
            payload.insert(field.clone(), Value::Object(pair));
        }
        Value::Object(payload)
    }

    fn insert(&mut self, field: &str, change: FieldChange) {
        self.changes.insert(field.to_string(), change);
    }
}

/// Computes the per-field diff an update produced.
///
/// Only fields named in `submitted` are compared, so fields the caller never
/// sent cannot show up in the audit record even if they differ. Tag sets
/// compare order-insensitively; a reordering alone is not a change.
///
/// # Arguments
///
/// * `before` - Field values prior to the mutation
/// * `after` - Field values after the mutation
/// * `submitted` - Wire-spelling names of the fields the update carried
#[must_use]
pub fn diff_lead_fields(before: &LeadFields, after: &LeadFields, submitted: &[&str]) -> ChangeSet {
    let mut changes: ChangeSet = ChangeSet::default();
    for field in submitted {
        let changed: bool = if *field == "tags" {
            !same_tag_set(&before.tags, &after.tags)
        } else {
            field_value(before, field) != field_value(after, field)
        };
        if changed
            && let (Some(from), Some(to)) = (field_value(before, field), field_value(after, field))
        {
            changes.insert(field, FieldChange::new(from, to));
        }
    }
    changes
}

/// Renders the history payload for a newly created lead.
///
/// The payload is `{"created": <full record snapshot>}` with every field in
/// storage vocabulary, plus identity, ownership, and both timestamps.
#[must_use]
pub fn created_snapshot(lead: &Lead) -> Value {
    let mut payload: Map<String, Value> = Map::new();
    payload.insert(String::from("created"), lead_snapshot(lead));
    Value::Object(payload)
}

/// One persisted history entry, as read back for a lead's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Store-assigned entry id.
    #[serde(rename = "id")]
    pub history_id: i64,
    /// The lead this entry belongs to.
    pub lead_id: LeadId,
    /// Id of the actor who made the change.
    pub changed_by: String,
    /// When the change was recorded.
    pub changed_at: TimestampMs,
    /// The creation snapshot or field diff payload.
    pub diff: Value,
}

impl HistoryEntry {
    /// Creates a history entry from its persisted parts.
    ///
    /// # Arguments
    ///
    /// * `history_id` - Store-assigned entry id
    /// * `lead_id` - The lead this entry belongs to
    /// * `changed_by` - Id of the acting actor
    /// * `changed_at` - When the change was recorded
    /// * `diff` - The decoded payload
    #[must_use]
    pub const fn new(
        history_id: i64,
        lead_id: LeadId,
        changed_by: String,
        changed_at: TimestampMs,
        diff: Value,
    ) -> Self {
        Self {
            history_id,
            lead_id,
            changed_by,
            changed_at,
            diff,
        }
    }
}

/// Renders the full record as a storage-vocabulary JSON object.
fn lead_snapshot(lead: &Lead) -> Value {
    let fields: &LeadFields = lead.fields();
    let mut snapshot: Map<String, Value> = Map::new();
    snapshot.insert(
        String::from("id"),
        Value::String(lead.lead_id().value().to_string()),
    );
    snapshot.insert(
        String::from("ownerId"),
        Value::String(lead.owner_id().to_string()),
    );
    for field in [
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
        "status",
        "notes",
        "tags",
    ] {
        if let Some(value) = field_value(fields, field) {
            snapshot.insert(String::from(field), value);
        }
    }
    snapshot.insert(
        String::from("createdAt"),
        Value::from(lead.created_at().value()),
    );
    snapshot.insert(
        String::from("updatedAt"),
        Value::from(lead.updated_at().value()),
    );
    Value::Object(snapshot)
}

/// Renders one field's value in storage vocabulary. Unknown names yield
/// `None` and are skipped by the callers.
fn field_value(fields: &LeadFields, field: &str) -> Option<Value> {
    let value: Value = match field {
        "fullName" => Value::String(fields.full_name.clone()),
        "email" => optional_string(fields.email.as_deref()),
        "phone" => Value::String(fields.phone.clone()),
        "city" => Value::String(String::from(fields.city.as_str())),
        "propertyType" => Value::String(String::from(fields.property_type.as_str())),
        "bhk" => fields.bhk.map_or(Value::Null, |bhk| {
            Value::String(String::from(bhk.storage_token()))
        }),
        "purpose" => Value::String(String::from(fields.purpose.as_str())),
        "budgetMin" => fields.budget_min.map_or(Value::Null, Value::from),
        "budgetMax" => fields.budget_max.map_or(Value::Null, Value::from),
        "timeline" => Value::String(String::from(fields.timeline.storage_token())),
        "source" => Value::String(String::from(fields.source.storage_token())),
        "status" => Value::String(String::from(fields.status.as_str())),
        "notes" => optional_string(fields.notes.as_deref()),
        "tags" => Value::Array(
            fields
                .tags
                .iter()
                .map(|tag| Value::String(tag.clone()))
                .collect(),
        ),
        _ => return None,
    };
    Some(value)
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

/// Compares two tag lists as multisets.
fn same_tag_set(left: &[String], right: &[String]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut left_sorted: Vec<&String> = left.iter().collect();
    let mut right_sorted: Vec<&String> = right.iter().collect();
    left_sorted.sort();
    right_sorted.sort();
    left_sorted == right_sorted
}
