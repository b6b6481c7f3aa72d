// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AccountProfile, ActorRole, ApplicationKind, Assessment, DomainError, FeeItem, FeeSchedule,
    MAX_MISSING_DOCUMENTS, validate_account_profile, validate_assessment, validate_fee_schedule,
    validate_missing_documents, validate_optional_date,
};

fn create_test_profile() -> AccountProfile {
    AccountProfile {
        username: String::from("jdelacruz"),
        first_name: String::from("Juan"),
        last_name: String::from("Dela Cruz"),
        email: String::from("juan@example.ph"),
        phone_number: String::from("+63 917 555 0101"),
        role: ActorRole::Applicant,
    }
}

#[test]
fn test_validate_account_profile_accepts_valid_profile() {
    assert!(validate_account_profile(&create_test_profile()).is_ok());
}

#[test]
fn test_validate_account_profile_rejects_whitespace_username() {
    let mut profile: AccountProfile = create_test_profile();
    profile.username = String::from("juan dc");
    assert!(matches!(
        validate_account_profile(&profile),
        Err(DomainError::InvalidUsername(_))
    ));
}

#[test]
fn test_validate_account_profile_rejects_bad_email() {
    let mut profile: AccountProfile = create_test_profile();
    profile.email = String::from("juan.example.ph");
    assert!(matches!(
        validate_account_profile(&profile),
        Err(DomainError::InvalidEmail(_))
    ));
}

#[test]
fn test_validate_account_profile_rejects_short_phone() {
    let mut profile: AccountProfile = create_test_profile();
    profile.phone_number = String::from("12345");
    assert!(matches!(
        validate_account_profile(&profile),
        Err(DomainError::InvalidPhoneNumber(_))
    ));
}

#[test]
fn test_validate_optional_date_accepts_calendar_and_rfc3339() {
    assert!(validate_optional_date("d", Some("2026-03-14")).is_ok());
    assert!(validate_optional_date("d", Some("2026-03-14T08:00:00.000Z")).is_ok());
    assert!(validate_optional_date("d", None).is_ok());
    assert!(validate_optional_date("d", Some("")).is_ok());
}

#[test]
fn test_validate_optional_date_rejects_garbage() {
    assert_eq!(
        validate_optional_date("box2.validity", Some("14/03/2026")),
        Err(DomainError::InvalidDate {
            field: String::from("box2.validity"),
            value: String::from("14/03/2026"),
        })
    );
}

#[test]
fn test_validate_fee_schedule_rejects_negative_amount() {
    let fees: FeeSchedule = FeeSchedule {
        fees: vec![FeeItem {
            particular: String::from("Filing Fee"),
            amount: -1.0,
        }],
        total_amount_due: 0.0,
    };
    assert!(matches!(
        validate_fee_schedule(&fees),
        Err(DomainError::InvalidFeeItem { index: 0, .. })
    ));
}

#[test]
fn test_validate_fee_schedule_rejects_blank_particular() {
    let fees: FeeSchedule = FeeSchedule {
        fees: vec![
            FeeItem {
                particular: String::from("Filing Fee"),
                amount: 10.0,
            },
            FeeItem {
                particular: String::from(" "),
                amount: 10.0,
            },
        ],
        total_amount_due: 20.0,
    };
    assert!(matches!(
        validate_fee_schedule(&fees),
        Err(DomainError::InvalidFeeItem { index: 1, .. })
    ));
}

#[test]
fn test_validate_assessment_rejects_notary_on_occupancy() {
    let assessment: Assessment = Assessment {
        assessed_by: Some(String::from("Engr. Santos")),
        doc_no: Some(String::from("12")),
        ..Assessment::default()
    };
    assert!(validate_assessment(ApplicationKind::Building, &assessment).is_ok());
    assert_eq!(
        validate_assessment(ApplicationKind::Occupancy, &assessment),
        Err(DomainError::NotaryNotApplicable)
    );
}

#[test]
fn test_validate_missing_documents() {
    assert!(validate_missing_documents(&[String::from("Lot Plan")]).is_ok());
    assert!(validate_missing_documents(&[String::from("")]).is_err());

    let too_many: Vec<String> = (0..=MAX_MISSING_DOCUMENTS)
        .map(|i| format!("Doc {i}"))
        .collect();
    assert!(validate_missing_documents(&too_many).is_err());
}
