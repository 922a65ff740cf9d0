//! Tests for RT+ row types: patches and validation.

use chrono::NaiveDate;
use rtplus_model::Validate;
use rtplus_model::model::{
    CheckResult, Person, PersonPatch, PersonStatus, SkillCheck, SkillCheckPatch, TeamMembership,
    TeamMembershipPatch,
};
use rtplus_table::EditableRow;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn person() -> Person {
    Person {
        id: Uuid::new_v4(),
        given_name: "Jo".into(),
        family_name: "Bloggs".into(),
        email: Some("jo@example.org".into()),
        callsign: Some("R12".into()),
        status: PersonStatus::Active,
    }
}

// ============================================================================
// Person
// ============================================================================

#[test]
fn test_person_patch_leaves_other_fields() {
    let mut p = person();
    p.apply_patch(PersonPatch {
        status: Some(PersonStatus::Inactive),
        ..Default::default()
    });
    assert_eq!(p.status, PersonStatus::Inactive);
    assert_eq!(p.given_name, "Jo");
    assert_eq!(p.email.as_deref(), Some("jo@example.org"));
}

#[test]
fn test_person_patch_clears_email() {
    let mut p = person();
    p.apply_patch(PersonPatch {
        email: Some(None),
        ..Default::default()
    });
    assert_eq!(p.email, None);
}

#[test]
fn test_person_draft_has_fresh_id() {
    let a = Person::draft();
    let b = Person::draft();
    assert_ne!(a.id, b.id);
    assert!(!a.id.is_nil());
}

#[test]
fn test_person_validation() {
    assert!(person().is_valid());

    let mut p = Person::draft();
    p.email = Some("not-an-email".into());
    p.callsign = Some("R 12".into());
    let errors = p.validate().unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(
        errors.for_field("givenName").unwrap().code.as_deref(),
        Some("required")
    );
    assert!(errors.for_field("email").is_some());
    assert!(errors.for_field("callsign").is_some());
    assert!(errors.to_string().starts_with("Validation failed: "));
}

#[test]
fn test_person_email_rejects_spaces() {
    let mut p = person();
    for bad in ["jo bloggs@example.org", "jo@exa mple.org", "jo@@example.org", "@example.org"] {
        p.email = Some(bad.into());
        let errors = p.validate().unwrap_err();
        assert_eq!(
            errors.for_field("email").unwrap().code.as_deref(),
            Some("email"),
            "{bad} should be rejected"
        );
    }
    p.email = Some("jo.bloggs@sar.example.org".into());
    assert!(p.is_valid());
}

#[test]
fn test_person_serializes_camel_case() {
    let json = serde_json::to_value(person()).unwrap();
    assert_eq!(json["givenName"], "Jo");
    assert_eq!(json["status"], "active");
}

// ============================================================================
// TeamMembership
// ============================================================================

#[test]
fn test_membership_current_on() {
    let mut m = TeamMembership::draft(Uuid::new_v4(), date(2025, 1, 1));
    assert!(m.is_current_on(date(2026, 6, 1)));
    assert!(!m.is_current_on(date(2024, 12, 31)));
    m.end_date = Some(date(2025, 12, 31));
    assert!(m.is_current_on(date(2025, 12, 31)));
    assert!(!m.is_current_on(date(2026, 1, 1)));
}

#[test]
fn test_membership_patch_clears_end_date() {
    let mut m = TeamMembership::draft(Uuid::new_v4(), date(2025, 1, 1));
    m.end_date = Some(date(2025, 6, 1));
    m.apply_patch(TeamMembershipPatch {
        end_date: Some(None),
        ..Default::default()
    });
    assert_eq!(m.end_date, None);
}

#[test]
fn test_membership_validation() {
    let mut m = TeamMembership::draft(Uuid::new_v4(), date(2025, 6, 1));
    m.end_date = Some(date(2025, 1, 1));
    m.tags = vec!["Team Leader".into(), "Team Leader".into(), " ".into()];
    let errors = m.validate().unwrap_err();
    assert!(errors.for_field("personId").is_some());
    assert!(errors.for_field("endDate").is_some());
    assert_eq!(
        errors.errors().iter().filter(|e| e.field == "tags").count(),
        2
    );

    m.person_id = Uuid::new_v4();
    m.end_date = None;
    m.tags = vec!["Team Leader".into()];
    assert!(m.is_valid());
}

// ============================================================================
// SkillCheck
// ============================================================================

#[test]
fn test_skill_check_validation() {
    let assessor = Uuid::new_v4();
    let mut check = SkillCheck::draft(Uuid::new_v4(), assessor, date(2026, 3, 14));
    let errors = check.validate().unwrap_err();
    assert!(errors.for_field("skillId").is_some());
    assert!(errors.for_field("assesseeId").is_some());

    check.apply_patch(SkillCheckPatch {
        skill_id: Some(Uuid::new_v4()),
        assessee_id: Some(assessor),
        result: Some(CheckResult::NotYetCompetent),
        ..Default::default()
    });
    let errors = check.validate().unwrap_err();
    assert_eq!(
        errors.for_field("assesseeId").unwrap().message,
        "Assessors cannot assess themselves"
    );
    assert!(errors.for_field("notes").is_some());

    check.apply_patch(SkillCheckPatch {
        assessee_id: Some(Uuid::new_v4()),
        notes: Some("Needs more practice with knots".into()),
        ..Default::default()
    });
    assert!(check.is_valid());
}

#[test]
fn test_check_result_serialization() {
    let json = serde_json::to_string(&CheckResult::NotYetCompetent).unwrap();
    assert_eq!(json, "\"NOT_YET_COMPETENT\"");
}
