// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadbook_domain::{
    Agent, Bhk, City, Lead, LeadFields, LeadId, LeadStatus, PropertyType, Purpose, Source,
    Timeline, TimestampMs, ValidatedLead,
};

pub fn create_test_agent(agent_id: &str, is_admin: bool) -> Agent {
    Agent::new(
        String::from(agent_id),
        Some(String::from("Test Agent")),
        Some(String::from("agent@example.com")),
        is_admin,
    )
}

pub fn create_test_submission() -> ValidatedLead {
    ValidatedLead {
        full_name: String::from("Asha Verma"),
        email: None,
        phone: String::from("9876543210"),
        city: City::Chandigarh,
        property_type: PropertyType::Apartment,
        bhk: Some(Bhk::Two),
        purpose: Purpose::Buy,
        budget_min: None,
        budget_max: None,
        timeline: Timeline::ZeroToThreeMonths,
        source: Source::Website,
        status: None,
        notes: None,
        tags: vec![String::from("urgent")],
    }
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

pub fn create_test_lead(owner_id: &str) -> Lead {
    Lead::new(
        LeadId::new("lead-1"),
        String::from(owner_id),
        create_test_fields(),
        TimestampMs::new(1_000),
        TimestampMs::new(2_000),
    )
}
