// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::Duration;

use leadbook_domain::{
    Bhk, City, Lead, LeadFields, LeadId, LeadStatus, NumberOrText, PropertyType, Purpose,
    RawLeadInput, Source, TagsInput, Timeline, TimestampMs,
};
use leadbook_persistence::Persistence;

use crate::{AuthenticatedActor, RateLimiter};

pub fn create_test_db() -> Persistence {
    Persistence::new_in_memory().expect("Failed to open in-memory database")
}

pub fn create_test_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("agent-1"),
        Some(String::from("Asha Verma")),
        Some(String::from("asha@leadbook.example")),
        false,
    )
}

pub fn create_other_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("agent-2"),
        Some(String::from("Rohan Gupta")),
        Some(String::from("rohan@leadbook.example")),
        false,
    )
}

pub fn create_admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("admin-9"),
        Some(String::from("Site Admin")),
        None,
        true,
    )
}

/// A limiter generous enough that no test trips it by accident.
pub fn create_open_limiter() -> RateLimiter {
    RateLimiter::new(1_000, Duration::seconds(60))
}

pub fn create_valid_input() -> RawLeadInput {
    RawLeadInput {
        full_name: Some(String::from("Asha Kapoor")),
        email: Some(String::from("asha.kapoor@example.com")),
        phone: Some(String::from("9876543210")),
        city: Some(String::from("Chandigarh")),
        property_type: Some(String::from("Apartment")),
        bhk: Some(String::from("2")),
        purpose: Some(String::from("Buy")),
        budget_min: Some(NumberOrText::Number(5_000_000)),
        budget_max: Some(NumberOrText::Number(7_000_000)),
        timeline: Some(String::from("0-3m")),
        source: Some(String::from("Website")),
        status: None,
        notes: Some(String::from("Prefers a corner unit")),
        tags: Some(TagsInput::Split(vec![String::from("urgent")])),
    }
}

pub fn create_test_fields() -> LeadFields {
    LeadFields {
        full_name: String::from("Asha Kapoor"),
        email: Some(String::from("asha.kapoor@example.com")),
        phone: String::from("9876543210"),
        city: City::Chandigarh,
        property_type: PropertyType::Apartment,
        bhk: Some(Bhk::Two),
        purpose: Purpose::Buy,
        budget_min: Some(5_000_000),
        budget_max: Some(7_000_000),
        timeline: Timeline::ZeroToThreeMonths,
        source: Source::Website,
        status: LeadStatus::New,
        notes: Some(String::from("Prefers a corner unit")),
        tags: vec![String::from("urgent")],
    }
}

/// Persists a lead directly, bypassing the handlers, with a known id,
/// owner, and last-modified time.
pub fn seed_lead(db: &mut Persistence, lead_id: &str, owner_id: &str, updated_at: i64) -> Lead {
    seed_lead_with(db, lead_id, owner_id, updated_at, |_| {})
}

/// Like [`seed_lead`], with a hook to vary the stored field values.
pub fn seed_lead_with(
    db: &mut Persistence,
    lead_id: &str,
    owner_id: &str,
    updated_at: i64,
    customize: impl FnOnce(&mut LeadFields),
) -> Lead {
    let mut fields: LeadFields = create_test_fields();
    customize(&mut fields);
    let lead: Lead = Lead::new(
        LeadId::new(lead_id),
        String::from(owner_id),
        fields,
        TimestampMs::new(1_000),
        TimestampMs::new(updated_at),
    );
    db.insert_lead_batch(std::slice::from_ref(&lead))
        .expect("Failed to seed lead");
    lead
}
