// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application::{Application, ApplicationDetails, ApplicationDraft, TransitionResult};
use crate::command::{Command, StoredFile};
use crate::error::CoreError;
use crate::timestamp;
use permit_portal_audit::{Actor, WorkflowEntry, WorkflowHistory};
use permit_portal_domain::{
    ActorRole, ApplicationKind, ApplicationStatus, Assessment, Document, DomainError,
    FeeSchedule, PaymentDetails, PaymentMethod, PaymentStatus, ReferenceNumber, RejectionDetails,
    validate_assessment, validate_fee_schedule, validate_missing_documents,
    validate_optional_number,
};
use time::OffsetDateTime;

/// Requirement name given to documents attached after a rejection.
pub const REVISION_REQUIREMENT: &str = "Revised Checklist/Documents";

/// Creates a new application from an applicant's draft.
///
/// The reference number is derived from `now` and assigned exactly once
/// here. The record starts in `Submitted` with a one-entry history and no
/// open rejection.
///
/// # Arguments
///
/// * `draft` - The submitted form
/// * `applicant` - The submitting account
/// * `now` - Submission time
///
/// # Errors
///
/// Returns an error if the form is missing required fields or the actor is
/// not an applicant.
pub fn submit_application(
    draft: ApplicationDraft,
    applicant: Actor,
    now: OffsetDateTime,
) -> Result<Application, CoreError> {
    if applicant.role != ActorRole::Applicant {
        return Err(CoreError::NotPermitted {
            action: "SubmitApplication",
            role: applicant.role,
        });
    }

    let details: ApplicationDetails = match draft {
        ApplicationDraft::Building(form) => {
            form.validate()?;
            ApplicationDetails::Building { form }
        }
        ApplicationDraft::Occupancy {
            building_permit_id,
            form,
        } => {
            form.validate()?;
            ApplicationDetails::Occupancy {
                building_permit_id,
                form,
            }
        }
    };

    let submitted_at: String = timestamp(now)?;
    Ok(Application {
        application_id: None,
        reference_no: ReferenceNumber::generate(details.kind(), now),
        applicant_id: applicant.account_id,
        status: ApplicationStatus::Submitted,
        details,
        assessment: Assessment::default(),
        fees: FeeSchedule::default(),
        rejection: RejectionDetails::resolved(),
        payment: None,
        documents: Vec::new(),
        history: WorkflowHistory::start(applicant, submitted_at.clone()),
        created_at: submitted_at.clone(),
        updated_at: submitted_at,
    })
}

/// Checks the payment inputs that can be rejected before the record is read.
///
/// # Errors
///
/// Returns `DomainError::ProofOfPaymentRequired` for an online payment
/// without a proof file, or `DomainError::InvalidNumber` for a negative
/// amount.
pub fn validate_payment_submission(
    method: PaymentMethod,
    has_proof: bool,
    amount_paid: Option<f64>,
) -> Result<(), DomainError> {
    if method.requires_proof() && !has_proof {
        return Err(DomainError::ProofOfPaymentRequired);
    }
    validate_optional_number("amountPaid", amount_paid)
}

/// Applies a command to an existing application.
///
/// This function is pure: the input record is not modified. On success the
/// updated record is returned together with the history entry and documents
/// that were appended. On failure nothing has changed.
///
/// # Arguments
///
/// * `application` - The current record
/// * `command` - The command to apply
/// * `actor` - The account issuing the command
/// * `now` - The time of the change
///
/// # Errors
///
/// Returns an error if the actor may not issue the command, the inputs are
/// invalid, or the requested status change is not in the transition table.
pub fn apply(
    application: &Application,
    command: Command,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let at: String = timestamp(now)?;

    match command {
        Command::UpdateStatus {
            status,
            comments,
            missing_documents,
            assessment,
            fees,
        } => {
            if !actor.role.is_admin() {
                return Err(CoreError::NotPermitted {
                    action: "UpdateStatus",
                    role: actor.role,
                });
            }
            update_status(
                application,
                StatusUpdate {
                    status: status.as_deref(),
                    comments: comments.as_deref(),
                    missing_documents,
                    assessment,
                    fees,
                },
                actor,
                at,
            )
        }
        Command::SubmitPayment {
            method,
            reference_number,
            amount_paid,
            proof,
        } => {
            ensure_owner(application, actor)?;
            validate_payment_submission(method, proof.is_some(), amount_paid)?;
            application.status.validate_transition(
                application.kind(),
                ApplicationStatus::PaymentSubmitted,
                actor.role,
            )?;

            let payment: PaymentDetails = PaymentDetails {
                method,
                status: PaymentStatus::Pending,
                reference_number: reference_number
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
                proof_of_payment_file: proof.map(|p| p.file_path),
                date_submitted: Some(at.clone()),
                amount_paid,
            };
            let comments: String = format!("User submitted {} payment proof.", method.as_str());
            Ok(record_payment(application, payment, comments, actor, at))
        }
        Command::UploadPaymentProof { proof } => {
            ensure_owner(application, actor)?;
            application.status.validate_transition(
                application.kind(),
                ApplicationStatus::PaymentSubmitted,
                actor.role,
            )?;

            let previous: Option<&PaymentDetails> = application.payment.as_ref();
            let payment: PaymentDetails = PaymentDetails {
                method: previous.map_or(PaymentMethod::Online, |p| p.method),
                status: PaymentStatus::Pending,
                reference_number: previous.and_then(|p| p.reference_number.clone()),
                proof_of_payment_file: Some(proof.file_path),
                date_submitted: Some(at.clone()),
                amount_paid: previous.and_then(|p| p.amount_paid),
            };
            Ok(record_payment(
                application,
                payment,
                String::from("User uploaded proof of payment."),
                actor,
                at,
            ))
        }
        Command::AttachRevisionDocuments { documents } => {
            ensure_owner(application, actor)?;
            if documents.is_empty() {
                return Err(DomainError::MissingField {
                    field: String::from("files"),
                }
                .into());
            }

            let attached: Vec<Document> = documents
                .into_iter()
                .map(|StoredFile { file_name, file_path }| Document {
                    requirement_name: REVISION_REQUIREMENT.to_string(),
                    file_name,
                    file_path,
                    uploaded_at: at.clone(),
                })
                .collect();

            let mut updated: Application = application.clone();
            updated.documents.extend(attached.iter().cloned());
            updated.updated_at = at;
            Ok(TransitionResult {
                application: updated,
                appended_entry: None,
                attached_documents: attached,
            })
        }
    }
}

struct StatusUpdate<'a> {
    status: Option<&'a str>,
    comments: Option<&'a str>,
    missing_documents: Option<Vec<String>>,
    assessment: Option<Assessment>,
    fees: Option<FeeSchedule>,
}

fn update_status(
    application: &Application,
    update: StatusUpdate<'_>,
    actor: Actor,
    at: String,
) -> Result<TransitionResult, CoreError> {
    let kind: ApplicationKind = application.kind();

    // Validate everything before touching the record.
    let new_status: Option<ApplicationStatus> =
        update.status.map(str::parse::<ApplicationStatus>).transpose()?;
    if let Some(missing) = &update.missing_documents {
        validate_missing_documents(missing)?;
    }
    if let Some(assessment) = &update.assessment {
        validate_assessment(kind, assessment)?;
    }
    if let Some(fees) = &update.fees {
        validate_fee_schedule(fees)?;
    }
    if let Some(to) = new_status {
        application
            .status
            .validate_transition(kind, to, actor.role)?;
        ensure_rejection_owner(application, to, actor.role)?;
    }

    let mut updated: Application = application.clone();
    let mut appended_entry: Option<WorkflowEntry> = None;

    if let Some(to) = new_status {
        updated.status = to;
        if to.opens_rejection() {
            updated.rejection = RejectionDetails::unresolved(
                update.comments,
                update.missing_documents.unwrap_or_default(),
            );
        } else if to.clears_rejection() || application.status.opens_rejection() {
            // Leaving a rejection resolves it, whichever office resumes.
            updated.rejection = RejectionDetails::resolved();
        }

        let comments: String = match update.comments {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => format!("Status updated to {} by admin.", to.as_str()),
        };
        let entry: WorkflowEntry = WorkflowEntry::new(to, comments, actor, at.clone());
        updated.history.append(entry.clone());
        appended_entry = Some(entry);
    }

    if let Some(assessment) = update.assessment {
        updated.assessment = assessment;
    }
    if let Some(fees) = update.fees {
        updated.fees = fees;
    }
    updated.updated_at = at;

    Ok(TransitionResult {
        application: updated,
        appended_entry,
        attached_documents: Vec::new(),
    })
}

/// A rejection is resolved by the office that raised it.
///
/// Rejections raised by the fire bureau go back to the fire bureau; every
/// other rejection is resolved by the engineering office.
fn ensure_rejection_owner(
    application: &Application,
    to: ApplicationStatus,
    role: ActorRole,
) -> Result<(), CoreError> {
    if application.status != ApplicationStatus::Rejected {
        return Ok(());
    }

    let rejected_by_bfp: bool = application
        .history
        .latest_with_status(ApplicationStatus::Rejected)
        .is_some_and(|entry| entry.acting_role == ActorRole::BfpAdmin);
    let owner: ActorRole = if rejected_by_bfp {
        ActorRole::BfpAdmin
    } else {
        ActorRole::MeoAdmin
    };

    if role == owner {
        Ok(())
    } else {
        Err(DomainError::TransitionNotAllowed {
            from: application.status,
            to,
            role,
        }
        .into())
    }
}

fn ensure_owner(application: &Application, actor: Actor) -> Result<(), CoreError> {
    if actor.role == ActorRole::Applicant && actor.account_id == application.applicant_id {
        Ok(())
    } else {
        Err(CoreError::NotApplicationOwner {
            account_id: actor.account_id,
        })
    }
}

fn record_payment(
    application: &Application,
    payment: PaymentDetails,
    comments: String,
    actor: Actor,
    at: String,
) -> TransitionResult {
    let mut updated: Application = application.clone();
    let entry: WorkflowEntry = WorkflowEntry::new(
        ApplicationStatus::PaymentSubmitted,
        comments,
        actor,
        at.clone(),
    );
    updated.status = ApplicationStatus::PaymentSubmitted;
    updated.payment = Some(payment);
    updated.history.append(entry.clone());
    updated.updated_at = at;

    TransitionResult {
        application: updated,
        appended_entry: Some(entry),
        attached_documents: Vec::new(),
    }
}
