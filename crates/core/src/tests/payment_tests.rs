// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    advance, applicant, create_building_application, create_occupancy_application, later, meo,
    other_applicant, stored_file,
};
use crate::{
    Application, Command, CoreError, REVISION_REQUIREMENT, TransitionResult, apply,
    validate_payment_submission,
};
use permit_portal_domain::{
    ApplicationStatus, DomainError, PaymentDetails, PaymentMethod, PaymentStatus,
};

fn awaiting_payment() -> Application {
    advance(
        create_building_application(),
        &[
            (meo(), ApplicationStatus::PendingMeo),
            (meo(), ApplicationStatus::PaymentPending),
        ],
    )
}

#[test]
fn test_online_payment_requires_proof() {
    let result = apply(
        &awaiting_payment(),
        Command::SubmitPayment {
            method: PaymentMethod::Online,
            reference_number: Some(String::from("GC-8812")),
            amount_paid: Some(1500.0),
            proof: None,
        },
        applicant(),
        later(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ProofOfPaymentRequired
        ))
    );
}

#[test]
fn test_walk_in_payment_without_proof_is_accepted() {
    let result: TransitionResult = apply(
        &awaiting_payment(),
        Command::SubmitPayment {
            method: PaymentMethod::WalkIn,
            reference_number: Some(String::from("  ")),
            amount_paid: None,
            proof: None,
        },
        applicant(),
        later(),
    )
    .unwrap();

    let payment: PaymentDetails = result.application.payment.unwrap();
    assert_eq!(payment.method, PaymentMethod::WalkIn);
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.reference_number, None);
    assert_eq!(payment.proof_of_payment_file, None);
    assert_eq!(
        result.application.status,
        ApplicationStatus::PaymentSubmitted
    );
    assert_eq!(
        result.appended_entry.unwrap().comments,
        "User submitted Walk-In payment proof."
    );
}

#[test]
fn test_online_payment_records_details() {
    let result: TransitionResult = apply(
        &awaiting_payment(),
        Command::SubmitPayment {
            method: PaymentMethod::Online,
            reference_number: Some(String::from("GC-8812")),
            amount_paid: Some(1500.0),
            proof: Some(stored_file("receipt.png")),
        },
        applicant(),
        later(),
    )
    .unwrap();

    let payment: PaymentDetails = result.application.payment.unwrap();
    assert_eq!(payment.reference_number.as_deref(), Some("GC-8812"));
    assert_eq!(payment.amount_paid, Some(1500.0));
    assert_eq!(
        payment.proof_of_payment_file.as_deref(),
        Some("/uploads/payments/1772352000000-42-receipt.png")
    );
    assert_eq!(
        payment.date_submitted.as_deref(),
        Some("2026-03-02T09:30:00.000Z")
    );
}

#[test]
fn test_only_the_owner_may_pay() {
    let result = apply(
        &awaiting_payment(),
        Command::SubmitPayment {
            method: PaymentMethod::WalkIn,
            reference_number: None,
            amount_paid: None,
            proof: None,
        },
        other_applicant(),
        later(),
    );

    assert_eq!(result, Err(CoreError::NotApplicationOwner { account_id: 8 }));
}

#[test]
fn test_building_payment_requires_payment_pending() {
    let result = apply(
        &create_building_application(),
        Command::SubmitPayment {
            method: PaymentMethod::WalkIn,
            reference_number: None,
            amount_paid: None,
            proof: None,
        },
        applicant(),
        later(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TransitionNotAllowed { .. }
        ))
    ));
}

#[test]
fn test_occupancy_pays_from_pending_meo() {
    let application: Application = advance(
        create_occupancy_application(),
        &[(meo(), ApplicationStatus::PendingMeo)],
    );

    let result: TransitionResult = apply(
        &application,
        Command::SubmitPayment {
            method: PaymentMethod::Online,
            reference_number: None,
            amount_paid: Some(800.0),
            proof: Some(stored_file("gcash.jpg")),
        },
        applicant(),
        later(),
    )
    .unwrap();

    assert_eq!(
        result.application.status,
        ApplicationStatus::PaymentSubmitted
    );
}

#[test]
fn test_proof_upload_keeps_chosen_method() {
    let paid: Application = apply(
        &awaiting_payment(),
        Command::SubmitPayment {
            method: PaymentMethod::WalkIn,
            reference_number: Some(String::from("OR-771")),
            amount_paid: Some(1500.0),
            proof: None,
        },
        applicant(),
        later(),
    )
    .unwrap()
    .application;

    let result: TransitionResult = apply(
        &paid,
        Command::UploadPaymentProof {
            proof: stored_file("official-receipt.jpg"),
        },
        applicant(),
        later(),
    )
    .unwrap();

    let payment: PaymentDetails = result.application.payment.unwrap();
    assert_eq!(payment.method, PaymentMethod::WalkIn);
    assert_eq!(payment.reference_number.as_deref(), Some("OR-771"));
    assert!(payment.proof_of_payment_file.is_some());
    assert_eq!(
        result.appended_entry.unwrap().comments,
        "User uploaded proof of payment."
    );
}

#[test]
fn test_proof_upload_without_prior_payment_defaults_to_online() {
    let result: TransitionResult = apply(
        &awaiting_payment(),
        Command::UploadPaymentProof {
            proof: stored_file("receipt.png"),
        },
        applicant(),
        later(),
    )
    .unwrap();

    assert_eq!(
        result.application.payment.map(|p| p.method),
        Some(PaymentMethod::Online)
    );
}

#[test]
fn test_revision_documents_append_without_status_change() {
    let rejected: Application = advance(
        create_building_application(),
        &[(meo(), ApplicationStatus::Rejected)],
    );

    let result: TransitionResult = apply(
        &rejected,
        Command::AttachRevisionDocuments {
            documents: vec![stored_file("lot-plan.pdf"), stored_file("survey.pdf")],
        },
        applicant(),
        later(),
    )
    .unwrap();

    assert!(result.appended_entry.is_none());
    assert_eq!(result.attached_documents.len(), 2);
    assert_eq!(result.application.documents.len(), 2);
    assert!(
        result
            .application
            .documents
            .iter()
            .all(|d| d.requirement_name == REVISION_REQUIREMENT)
    );
    assert_eq!(result.application.status, ApplicationStatus::Rejected);
    assert_eq!(result.application.rejection, rejected.rejection);
    assert_eq!(result.application.history, rejected.history);
}

#[test]
fn test_revision_documents_require_files() {
    let result = apply(
        &create_building_application(),
        Command::AttachRevisionDocuments {
            documents: Vec::new(),
        },
        applicant(),
        later(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingField { .. }))
    ));
}

#[test]
fn test_pre_validation_checks_proof_and_amount() {
    assert!(validate_payment_submission(PaymentMethod::WalkIn, false, Some(10.0)).is_ok());
    assert_eq!(
        validate_payment_submission(PaymentMethod::Online, false, None),
        Err(DomainError::ProofOfPaymentRequired)
    );
    assert!(validate_payment_submission(PaymentMethod::Online, true, Some(-5.0)).is_err());
}
