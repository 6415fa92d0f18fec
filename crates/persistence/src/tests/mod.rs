// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use leadbook::Transition;
use leadbook_audit::created_snapshot;
use leadbook_domain::{
    Agent, Bhk, City, Lead, LeadFields, LeadId, LeadStatus, PropertyType, Purpose, Source,
    Timeline, TimestampMs,
};

pub fn create_test_agent(agent_id: &str, is_admin: bool) -> Agent {
    Agent::new(
        String::from(agent_id),
        Some(String::from("Test Agent")),
        Some(String::from("agent@example.com")),
        is_admin,
    )
}

pub fn create_test_fields() -> LeadFields {
    LeadFields {
        full_name: String::from("Asha Verma"),
        email: Some(String::from("asha@example.com")),
        phone: String::from("9876543210"),
        city: City::Chandigarh,
        property_type: PropertyType::Apartment,
        bhk: Some(Bhk::Two),
        purpose: Purpose::Buy,
        budget_min: Some(5_000_000),
        budget_max: Some(7_500_000),
        timeline: Timeline::ZeroToThreeMonths,
        source: Source::Website,
        status: LeadStatus::New,
        notes: Some(String::from("Prefers a corner unit")),
        tags: vec![String::from("urgent")],
    }
}

pub fn create_test_lead(lead_id: &str, owner_id: &str) -> Lead {
    Lead::new(
        LeadId::new(lead_id),
        String::from(owner_id),
        create_test_fields(),
        TimestampMs::new(1_000),
        TimestampMs::new(1_000),
    )
}

/// Persists a freshly created lead and returns it.
pub fn seed_lead(db: &mut Persistence, lead_id: &str, owner_id: &str) -> Lead {
    let lead: Lead = create_test_lead(lead_id, owner_id);
    let transition: Transition = Transition::Created {
        lead: lead.clone(),
        history_payload: created_snapshot(&lead),
    };
    db.persist_transition(&transition, owner_id)
        .expect("Failed to seed lead");
    lead
}
