// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use permit_portal_domain::{PaymentMethod, PaymentStatus};

use crate::tests::helpers::{
    advance, create_test_applicant, create_test_portal, later, meo, stored_file,
    submit_test_building,
};
use crate::{
    ApiError, SubmitPaymentRequest, attach_revision_documents, submit_payment,
    upload_payment_proof, validate_payment_request,
};

fn payment_request(method: &str, amount: Option<&str>) -> SubmitPaymentRequest {
    SubmitPaymentRequest {
        method: method.to_string(),
        reference_number: Some(String::from("OR-2026-0042")),
        amount_paid: amount.map(str::to_string),
    }
}

#[test]
fn test_online_payment_requires_proof() {
    let result = validate_payment_request(&payment_request("Online", None), false);

    assert_eq!(
        result,
        Err(ApiError::InvalidInput {
            field: String::from("file"),
            message: String::from("Proof of payment image is required for online transactions."),
        })
    );
}

#[test]
fn test_payment_request_parsing() {
    let parsed = validate_payment_request(&payment_request("Walk-In", Some(" 1500.50 ")), false);
    assert_eq!(parsed, Ok((PaymentMethod::WalkIn, Some(1500.5))));

    let blank = validate_payment_request(&payment_request("Walk-In", Some("")), false);
    assert_eq!(blank, Ok((PaymentMethod::WalkIn, None)));

    let garbage = validate_payment_request(&payment_request("Walk-In", Some("lots")), false);
    assert!(matches!(garbage, Err(ApiError::InvalidInput { field, .. }) if field == "amountPaid"));

    let negative = validate_payment_request(&payment_request("Walk-In", Some("-5")), false);
    assert!(matches!(negative, Err(ApiError::InvalidInput { .. })));

    let unknown = validate_payment_request(&payment_request("Cheque", None), false);
    assert!(matches!(unknown, Err(ApiError::InvalidInput { field, .. }) if field == "method"));
}

#[test]
fn test_validation_precedes_lookup() {
    let mut portal = create_test_portal();

    let result = submit_payment(
        &mut portal.persistence,
        &portal.applicant,
        999,
        payment_request("Online", None),
        None,
        later(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_walk_in_payment_moves_to_payment_submitted() {
    let mut portal = create_test_portal();
    let application_id: i64 = submit_test_building(&mut portal);
    advance(
        &mut portal,
        application_id,
        &[(meo, "Pending MEO"), (meo, "Payment Pending")],
    );

    let response = submit_payment(
        &mut portal.persistence,
        &portal.applicant,
        application_id,
        payment_request("Walk-In", Some("4250")),
        None,
        later(),
    )
    .unwrap();

    assert_eq!(response.message, "Payment proof submitted successfully");
    let record = response.application;
    let payment = record.payment_details.unwrap();
    assert_eq!(record.status, "Payment Submitted");
    assert_eq!(payment.method, PaymentMethod::WalkIn);
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.amount_paid, Some(4250.0));
    assert!(payment.proof_of_payment_file.is_none());
    assert_eq!(
        record.workflow_history.last().unwrap().comments,
        "User submitted Walk-In payment proof."
    );
}

#[test]
fn test_upload_proof_keeps_chosen_method() {
    let mut portal = create_test_portal();
    let application_id: i64 = submit_test_building(&mut portal);
    advance(
        &mut portal,
        application_id,
        &[(meo, "Pending MEO"), (meo, "Payment Pending")],
    );
    submit_payment(
        &mut portal.persistence,
        &portal.applicant,
        application_id,
        payment_request("Walk-In", None),
        None,
        later(),
    )
    .unwrap();

    let response = upload_payment_proof(
        &mut portal.persistence,
        &portal.applicant,
        application_id,
        stored_file("payments", "receipt.jpg"),
        later(),
    )
    .unwrap();

    let payment = response.application.payment_details.unwrap();
    assert_eq!(payment.method, PaymentMethod::WalkIn);
    assert_eq!(
        payment.proof_of_payment_file.as_deref(),
        Some("/uploads/payments/1772443800000-42-receipt.jpg")
    );
    assert_eq!(
        payment.reference_number.as_deref(),
        Some("OR-2026-0042")
    );
}

#[test]
fn test_payment_before_assessment_is_rejected() {
    let mut portal = create_test_portal();
    let application_id: i64 = submit_test_building(&mut portal);

    let result = submit_payment(
        &mut portal.persistence,
        &portal.applicant,
        application_id,
        payment_request("Walk-In", None),
        None,
        later(),
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_only_owner_may_pay() {
    let mut portal = create_test_portal();
    let application_id: i64 = submit_test_building(&mut portal);
    advance(
        &mut portal,
        application_id,
        &[(meo, "Pending MEO"), (meo, "Payment Pending")],
    );
    let stranger = create_test_applicant(&mut portal.persistence, "stranger");

    let result = submit_payment(
        &mut portal.persistence,
        &stranger,
        application_id,
        payment_request("Walk-In", None),
        None,
        later(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_attach_revision_documents() {
    let mut portal = create_test_portal();
    let application_id: i64 = submit_test_building(&mut portal);
    advance(&mut portal, application_id, &[(meo, "Rejected")]);

    let response = attach_revision_documents(
        &mut portal.persistence,
        &portal.applicant,
        application_id,
        vec![
            stored_file("documents", "lot-plan.pdf"),
            stored_file("documents", "tct.png"),
        ],
        later(),
    )
    .unwrap();

    assert_eq!(response.documents.len(), 2);
    assert_eq!(response.application.documents.len(), 2);
    assert_eq!(
        response.application.documents[0].requirement_name,
        "Revised Checklist/Documents"
    );
    assert_eq!(response.application.status, "Rejected");
    assert_eq!(response.application.workflow_history.len(), 2);

    let empty = attach_revision_documents(
        &mut portal.persistence,
        &portal.applicant,
        application_id,
        Vec::new(),
        later(),
    );
    assert!(matches!(empty, Err(ApiError::InvalidInput { field, .. }) if field == "files"));
}
