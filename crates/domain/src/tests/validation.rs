// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Bhk, City, InputKind, LeadStatus, NumberOrText, PropertyType, RawLeadInput, TagsInput,
    Timeline, ValidatedLead, ValidationErrors, normalize_tags, validate_lead_input,
};

fn create_valid_input() -> RawLeadInput {
    RawLeadInput {
        full_name: Some(String::from("Asha Verma")),
        email: Some(String::from("asha@example.com")),
        phone: Some(String::from("9876543210")),
        city: Some(String::from("Chandigarh")),
        property_type: Some(String::from("Apartment")),
        bhk: Some(String::from("2")),
        purpose: Some(String::from("Buy")),
        budget_min: Some(NumberOrText::Number(5_000_000)),
        budget_max: Some(NumberOrText::Number(7_500_000)),
        timeline: Some(String::from("0-3m")),
        source: Some(String::from("Website")),
        status: None,
        notes: Some(String::from("Prefers a corner unit")),
        tags: Some(TagsInput::Joined(String::from("urgent, nri"))),
    }
}

fn messages_for(errors: &ValidationErrors, field: &str) -> Vec<String> {
    errors.field_errors().get(field).cloned().unwrap_or_default()
}

#[test]
fn test_validate_accepts_complete_form_input() {
    let input: RawLeadInput = create_valid_input();
    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();

    assert_eq!(validated.full_name, "Asha Verma");
    assert_eq!(validated.city, City::Chandigarh);
    assert_eq!(validated.property_type, PropertyType::Apartment);
    assert_eq!(validated.bhk, Some(Bhk::Two));
    assert_eq!(validated.timeline, Timeline::ZeroToThreeMonths);
    assert_eq!(validated.budget_min, Some(5_000_000));
    assert_eq!(validated.budget_max, Some(7_500_000));
    assert_eq!(validated.status, None);
    assert_eq!(
        validated.tags,
        vec![String::from("urgent"), String::from("nri")]
    );
}

#[test]
fn test_validate_accepts_minimal_input() {
    let input: RawLeadInput = RawLeadInput {
        full_name: Some(String::from("Ravi")),
        phone: Some(String::from("9876543210")),
        city: Some(String::from("Other")),
        property_type: Some(String::from("Plot")),
        purpose: Some(String::from("Rent")),
        timeline: Some(String::from("Exploring")),
        source: Some(String::from("Call")),
        ..RawLeadInput::default()
    };

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.email, None);
    assert_eq!(validated.bhk, None);
    assert_eq!(validated.notes, None);
    assert!(validated.tags.is_empty());
}

#[test]
fn test_validate_rejects_missing_full_name() {
    let mut input: RawLeadInput = create_valid_input();
    input.full_name = None;

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "fullName"),
        vec![String::from("Full name is required")]
    );
}

#[test]
fn test_validate_rejects_one_character_full_name() {
    let mut input: RawLeadInput = create_valid_input();
    input.full_name = Some(String::from("A"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "fullName"),
        vec![String::from("Full name must be at least 2 characters")]
    );
}

#[test]
fn test_validate_rejects_overlong_full_name() {
    let mut input: RawLeadInput = create_valid_input();
    input.full_name = Some("x".repeat(81));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "fullName"),
        vec![String::from("Full name must be less than 80 characters")]
    );
}

#[test]
fn test_validate_accepts_eighty_character_full_name() {
    let mut input: RawLeadInput = create_valid_input();
    input.full_name = Some("x".repeat(80));

    assert!(validate_lead_input(&input, InputKind::Form).is_ok());
}

#[test]
fn test_validate_rejects_short_phone() {
    let mut input: RawLeadInput = create_valid_input();
    input.phone = Some(String::from("123456789"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "phone"),
        vec![String::from("Phone must be 10 to 15 digits")]
    );
}

#[test]
fn test_validate_rejects_long_phone() {
    let mut input: RawLeadInput = create_valid_input();
    input.phone = Some(String::from("1234567890123456"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert!(!messages_for(&errors, "phone").is_empty());
}

#[test]
fn test_validate_rejects_non_digit_phone() {
    let mut input: RawLeadInput = create_valid_input();
    input.phone = Some(String::from("98765-43210"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "phone"),
        vec![String::from("Phone must be 10 to 15 digits")]
    );
}

#[test]
fn test_validate_accepts_fifteen_digit_phone() {
    let mut input: RawLeadInput = create_valid_input();
    input.phone = Some(String::from("123456789012345"));

    assert!(validate_lead_input(&input, InputKind::Form).is_ok());
}

#[test]
fn test_validate_treats_blank_email_as_absent() {
    let mut input: RawLeadInput = create_valid_input();
    input.email = Some(String::from("   "));

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.email, None);
}

#[test]
fn test_validate_rejects_malformed_email() {
    for bad in ["not-an-email", "a@b", "a @b.com", "@b.com", "a@.com"] {
        let mut input: RawLeadInput = create_valid_input();
        input.email = Some(String::from(bad));

        let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
        assert_eq!(
            messages_for(&errors, "email"),
            vec![String::from("Please enter a valid email address")],
            "expected rejection for '{bad}'"
        );
    }
}

#[test]
fn test_validate_rejects_unknown_city_token() {
    let mut input: RawLeadInput = create_valid_input();
    input.city = Some(String::from("Ludhiana"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "city"),
        vec![String::from("Invalid city: Ludhiana")]
    );
}

#[test]
fn test_validate_rejects_missing_enum_fields() {
    let input: RawLeadInput = RawLeadInput {
        full_name: Some(String::from("Asha Verma")),
        phone: Some(String::from("9876543210")),
        ..RawLeadInput::default()
    };

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "city"),
        vec![String::from("City is required")]
    );
    assert_eq!(
        messages_for(&errors, "propertyType"),
        vec![String::from("Property type is required")]
    );
    assert_eq!(
        messages_for(&errors, "purpose"),
        vec![String::from("Purpose is required")]
    );
    assert_eq!(
        messages_for(&errors, "timeline"),
        vec![String::from("Timeline is required")]
    );
    assert_eq!(
        messages_for(&errors, "source"),
        vec![String::from("Source is required")]
    );
}

#[test]
fn test_validate_requires_bhk_for_apartment() {
    let mut input: RawLeadInput = create_valid_input();
    input.bhk = None;

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "bhk"),
        vec![String::from("BHK is required for Apartment or Villa")]
    );
}

#[test]
fn test_validate_requires_bhk_for_villa() {
    let mut input: RawLeadInput = create_valid_input();
    input.property_type = Some(String::from("Villa"));
    input.bhk = Some(String::new());

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "bhk"),
        vec![String::from("BHK is required for Apartment or Villa")]
    );
}

#[test]
fn test_validate_accepts_office_without_bhk() {
    let mut input: RawLeadInput = create_valid_input();
    input.property_type = Some(String::from("Office"));
    input.bhk = None;

    assert!(validate_lead_input(&input, InputKind::Form).is_ok());
}

#[test]
fn test_validate_form_rejects_bhk_on_non_residential() {
    let mut input: RawLeadInput = create_valid_input();
    input.property_type = Some(String::from("Plot"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert!(!messages_for(&errors, "bhk").is_empty());
}

#[test]
fn test_validate_csv_row_drops_bhk_on_non_residential() {
    let mut input: RawLeadInput = create_valid_input();
    input.property_type = Some(String::from("Retail"));

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::CsvRow).unwrap();
    assert_eq!(validated.property_type, PropertyType::Retail);
    assert_eq!(validated.bhk, None);
}

#[test]
fn test_validate_rejects_unknown_bhk_token_without_requiring_it() {
    let mut input: RawLeadInput = create_valid_input();
    input.bhk = Some(String::from("5"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    // Only the parse failure reports, not a second "required" message.
    assert_eq!(
        messages_for(&errors, "bhk"),
        vec![String::from("Invalid BHK: 5")]
    );
}

#[test]
fn test_validate_rejects_budget_inversion() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_min = Some(NumberOrText::Number(9_000_000));
    input.budget_max = Some(NumberOrText::Number(8_000_000));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "budgetMax"),
        vec![String::from("budgetMax must be ≥ budgetMin")]
    );
}

#[test]
fn test_validate_accepts_equal_budgets() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_min = Some(NumberOrText::Number(5_000_000));
    input.budget_max = Some(NumberOrText::Number(5_000_000));

    assert!(validate_lead_input(&input, InputKind::Form).is_ok());
}

#[test]
fn test_validate_skips_ordering_when_one_budget_absent() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_min = Some(NumberOrText::Number(9_000_000));
    input.budget_max = None;

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.budget_min, Some(9_000_000));
    assert_eq!(validated.budget_max, None);
}

#[test]
fn test_validate_parses_budget_from_text() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_min = Some(NumberOrText::Text(String::from("5000000")));
    input.budget_max = Some(NumberOrText::Text(String::from(" 7500000 ")));

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.budget_min, Some(5_000_000));
    assert_eq!(validated.budget_max, Some(7_500_000));
}

#[test]
fn test_validate_treats_blank_budget_as_absent() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_min = Some(NumberOrText::Text(String::new()));
    input.budget_max = Some(NumberOrText::Text(String::from("  ")));

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.budget_min, None);
    assert_eq!(validated.budget_max, None);
}

#[test]
fn test_validate_rejects_non_numeric_budget() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_min = Some(NumberOrText::Text(String::from("five lakh")));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "budgetMin"),
        vec![String::from("budgetMin must be a non-negative integer")]
    );
}

#[test]
fn test_validate_rejects_negative_budget() {
    let mut input: RawLeadInput = create_valid_input();
    input.budget_max = Some(NumberOrText::Number(-1));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "budgetMax"),
        vec![String::from("budgetMax must be a non-negative integer")]
    );
}

#[test]
fn test_validate_rejects_overlong_notes() {
    let mut input: RawLeadInput = create_valid_input();
    input.notes = Some("x".repeat(1001));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "notes"),
        vec![String::from("Notes must be less than 1000 characters")]
    );
}

#[test]
fn test_validate_accepts_thousand_character_notes() {
    let mut input: RawLeadInput = create_valid_input();
    input.notes = Some("x".repeat(1000));

    assert!(validate_lead_input(&input, InputKind::Form).is_ok());
}

#[test]
fn test_validate_accepts_status_token() {
    let mut input: RawLeadInput = create_valid_input();
    input.status = Some(String::from("Qualified"));

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.status, Some(LeadStatus::Qualified));
}

#[test]
fn test_validate_rejects_unknown_status_token() {
    let mut input: RawLeadInput = create_valid_input();
    input.status = Some(String::from("Closed"));

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    assert_eq!(
        messages_for(&errors, "status"),
        vec![String::from("Invalid status: Closed")]
    );
}

#[test]
fn test_validate_treats_blank_status_as_absent() {
    let mut input: RawLeadInput = create_valid_input();
    input.status = Some(String::new());

    let validated: ValidatedLead = validate_lead_input(&input, InputKind::Form).unwrap();
    assert_eq!(validated.status, None);
}

#[test]
fn test_validate_reports_every_failing_field_at_once() {
    let input: RawLeadInput = RawLeadInput {
        full_name: Some(String::from("A")),
        phone: Some(String::from("12")),
        email: Some(String::from("nope")),
        city: Some(String::from("Atlantis")),
        property_type: Some(String::from("Apartment")),
        purpose: Some(String::from("Buy")),
        timeline: Some(String::from("0-3m")),
        source: Some(String::from("Website")),
        ..RawLeadInput::default()
    };

    let errors: ValidationErrors = validate_lead_input(&input, InputKind::Form).unwrap_err();
    let keys: Vec<&String> = errors.field_errors().keys().collect();
    assert_eq!(keys.len(), 5);
    for field in ["fullName", "phone", "email", "city", "bhk"] {
        assert!(
            errors.field_errors().contains_key(field),
            "missing field {field}"
        );
    }
}

#[test]
fn test_joined_message_flattens_messages_without_field_names() {
    let mut errors: ValidationErrors = ValidationErrors::new();
    errors.push("phone", "Phone must be 10 to 15 digits");
    errors.push("fullName", "Full name is required");

    // Fields flatten in key order, messages only.
    assert_eq!(
        errors.joined_message(),
        "Full name is required; Phone must be 10 to 15 digits"
    );
}

#[test]
fn test_normalize_tags_splits_and_trims_joined_input() {
    let input: TagsInput = TagsInput::Joined(String::from(" urgent , nri ,, follow-up "));
    let tags: Vec<String> = normalize_tags(Some(&input));
    assert_eq!(
        tags,
        vec![
            String::from("urgent"),
            String::from("nri"),
            String::from("follow-up")
        ]
    );
}

#[test]
fn test_normalize_tags_trims_split_input() {
    let input: TagsInput = TagsInput::Split(vec![
        String::from(" urgent "),
        String::new(),
        String::from("nri"),
    ]);
    let tags: Vec<String> = normalize_tags(Some(&input));
    assert_eq!(tags, vec![String::from("urgent"), String::from("nri")]);
}

#[test]
fn test_normalize_tags_handles_absent_input() {
    assert!(normalize_tags(None).is_empty());
}

#[test]
fn test_raw_input_decodes_from_camel_case_json() {
    let json: &str = r#"{
        "fullName": "Asha Verma",
        "phone": "9876543210",
        "city": "Chandigarh",
        "propertyType": "Apartment",
        "bhk": "2",
        "purpose": "Buy",
        "timeline": "0-3m",
        "source": "Walk-in",
        "budgetMin": 5000000,
        "budgetMax": "7500000",
        "tags": ["urgent"]
    }"#;

    let input: RawLeadInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.budget_min, Some(NumberOrText::Number(5_000_000)));
    assert_eq!(
        input.budget_max,
        Some(NumberOrText::Text(String::from("7500000")))
    );
    assert!(validate_lead_input(&input, InputKind::Form).is_ok());
}
