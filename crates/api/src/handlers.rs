// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers are framework-free. They authorize the caller, translate the
//! request into core calls, persist the outcome and translate every error
//! into an [`ApiError`]. The current time is passed in by the caller.

use permit_portal::{
    AdminQueue, Application, ApplicationDraft, BuildingPermitRef, Command, StoredFile,
    TransitionResult, admin_queue, apply, resolve_building_permit, submit_application, timestamp,
    validate_payment_submission,
};
use permit_portal_domain::{
    AccountProfile, ActorRole, BuildingForm, DomainError, PaymentMethod, validate_account_profile,
};
use permit_portal_persistence::{AccountData, Persistence};
use std::collections::HashMap;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_resolve_error,
};
use crate::request_response::{
    AccountInfo, AdminQueueRequest, AdminQueueResponse, ApplicationRecord, ApplicationSummary,
    ApplicationUpdateResponse, AttachDocumentsResponse, CreateAccountResponse,
    CreateAdminAccountRequest, ListAccountsRequest, ListAccountsResponse,
    ListApplicationsResponse, ListMyApplicationsResponse, RegisterAccountRequest,
    SubmitApplicationResponse, SubmitOccupancyRequest, SubmitPaymentRequest,
    UpdateStatusRequest,
};

/// Default page size of the account list.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size of the account list.
pub const MAX_PAGE_SIZE: i64 = 100;

// ========================================================================
// Accounts
// ========================================================================

/// Registers a new applicant account.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The account fields
/// * `now` - Registration time
///
/// # Errors
///
/// Returns an error if:
/// - Any field is empty or malformed
/// - The username or email is already registered
/// - Database operations fail
pub fn register_account(
    persistence: &mut Persistence,
    request: RegisterAccountRequest,
    now: OffsetDateTime,
) -> Result<CreateAccountResponse, ApiError> {
    let profile: AccountProfile = AccountProfile {
        username: request.username,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
        role: ActorRole::Applicant,
    };
    let account: AccountData = create_account(persistence, &profile, now)?;

    info!(account_id = account.account_id, "Registered applicant account");
    Ok(CreateAccountResponse {
        account: AccountInfo::from(account),
        message: String::from("User registered successfully"),
    })
}

/// Creates the first engineering office admin.
///
/// Only allowed while no admin account exists, so that a fresh installation
/// can be bootstrapped without an existing admin.
///
/// # Errors
///
/// Returns an error if:
/// - An admin account already exists
/// - Any field is empty or malformed
/// - The username or email is already registered
/// - Database operations fail
pub fn create_first_admin(
    persistence: &mut Persistence,
    request: RegisterAccountRequest,
    now: OffsetDateTime,
) -> Result<CreateAccountResponse, ApiError> {
    let admin_count: i64 = persistence
        .count_admins()
        .map_err(|e| translate_persistence_error("Failed to count admins", e))?;

    if admin_count > 0 {
        return Err(ApiError::Unauthorized {
            action: String::from("create_first_admin"),
            required_role: String::from("Bootstrap mode (no admins exist)"),
        });
    }

    let profile: AccountProfile = AccountProfile {
        username: request.username,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
        role: ActorRole::MeoAdmin,
    };
    let account: AccountData = create_account(persistence, &profile, now)?;

    info!(account_id = account.account_id, "Created first admin account");
    Ok(CreateAccountResponse {
        account: AccountInfo::from(account),
        message: String::from("First admin account created successfully"),
    })
}

/// Creates an admin account for any of the three offices.
///
/// Only engineering office admins may create admin accounts.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an engineering office admin
/// - The role is not an admin role
/// - Any field is empty or malformed
/// - The username or email is already registered
pub fn create_admin_account(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request: CreateAdminAccountRequest,
    now: OffsetDateTime,
) -> Result<CreateAccountResponse, ApiError> {
    AuthorizationService::authorize_meo_admin(authenticated_actor, "create_admin_account")?;

    let role: ActorRole = request
        .role
        .parse::<ActorRole>()
        .map_err(translate_domain_error)?;
    if !role.is_admin() {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role: {}. Must be an admin role", request.role),
        });
    }

    let profile: AccountProfile = AccountProfile {
        username: request.username,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
        role,
    };
    let account: AccountData = create_account(persistence, &profile, now)?;

    info!(
        account_id = account.account_id,
        role = role.as_str(),
        created_by = authenticated_actor.account.account_id,
        "Created admin account"
    );
    Ok(CreateAccountResponse {
        account: AccountInfo::from(account),
        message: String::from("Admin account created successfully"),
    })
}

/// Returns the caller's own profile.
#[must_use]
pub fn get_profile(authenticated_actor: &AuthenticatedActor) -> AccountInfo {
    AccountInfo::from(authenticated_actor.account.clone())
}

/// Lists accounts, newest first, one page at a time.
///
/// Only engineering office admins may list accounts.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an engineering office admin
/// - The page is below 1 or the limit is outside 1 to 100
/// - Database operations fail
pub fn list_accounts(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request: ListAccountsRequest,
) -> Result<ListAccountsResponse, ApiError> {
    AuthorizationService::authorize_meo_admin(authenticated_actor, "list_accounts")?;

    let page: i64 = request.page.unwrap_or(1);
    if page < 1 {
        return Err(ApiError::InvalidInput {
            field: String::from("page"),
            message: format!("Invalid page: {page}. Must be at least 1"),
        });
    }
    let limit: i64 = request.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(ApiError::InvalidInput {
            field: String::from("limit"),
            message: format!("Invalid limit: {limit}. Must be between 1 and {MAX_PAGE_SIZE}"),
        });
    }

    let total: i64 = persistence
        .count_accounts()
        .map_err(|e| translate_persistence_error("Failed to count accounts", e))?;
    let accounts: Vec<AccountData> = persistence
        .list_accounts((page - 1).saturating_mul(limit), limit)
        .map_err(|e| translate_persistence_error("Failed to list accounts", e))?;

    Ok(ListAccountsResponse {
        accounts: accounts.into_iter().map(AccountInfo::from).collect(),
        total,
        page,
        pages: (total + limit - 1) / limit,
    })
}

fn create_account(
    persistence: &mut Persistence,
    profile: &AccountProfile,
    now: OffsetDateTime,
) -> Result<AccountData, ApiError> {
    validate_account_profile(profile).map_err(translate_domain_error)?;
    let created_at: String = timestamp(now).map_err(translate_domain_error)?;

    let account_id: i64 = persistence
        .create_account(profile, &created_at)
        .map_err(|e| match translate_persistence_error("Failed to create account", e) {
            ApiError::Conflict { .. } => ApiError::Conflict {
                message: String::from("User already exists"),
            },
            other => other,
        })?;

    persistence
        .get_account(account_id)
        .map_err(|e| translate_persistence_error("Failed to load account", e))?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Account {account_id} vanished after creation"),
        })
}

// ========================================================================
// Submission
// ========================================================================

/// Submits a building permit application.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an applicant
/// - A required form field is missing
/// - The generated reference number collides with an existing one
/// - Database operations fail
pub fn submit_building_application(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    form: BuildingForm,
    now: OffsetDateTime,
) -> Result<SubmitApplicationResponse, ApiError> {
    AuthorizationService::authorize_applicant(
        authenticated_actor,
        "submit_building_application",
    )?;

    let application: Application = submit_application(
        ApplicationDraft::Building(form),
        authenticated_actor.to_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    store_new_application(
        persistence,
        &application,
        "Building application submitted successfully",
    )
}

/// Submits an occupancy permit application.
///
/// The building permit is resolved first. If it cannot be found, nothing
/// is created.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an applicant
/// - The building permit identifier is blank or matches no building application
/// - A required form field is missing
/// - The generated reference number collides with an existing one
/// - Database operations fail
pub fn submit_occupancy_application(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request: SubmitOccupancyRequest,
    now: OffsetDateTime,
) -> Result<SubmitApplicationResponse, ApiError> {
    AuthorizationService::authorize_applicant(
        authenticated_actor,
        "submit_occupancy_application",
    )?;

    let parent: BuildingPermitRef =
        resolve_building_permit(persistence, &request.building_permit_identifier)
            .map_err(translate_resolve_error)?;
    debug!(
        building_permit_id = parent.application_id,
        reference_no = %parent.reference_no,
        "Resolved building permit"
    );

    let application: Application = submit_application(
        ApplicationDraft::Occupancy {
            building_permit_id: parent.application_id,
            form: request.form,
        },
        authenticated_actor.to_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    store_new_application(
        persistence,
        &application,
        "Occupancy application submitted successfully",
    )
}

fn store_new_application(
    persistence: &mut Persistence,
    application: &Application,
    message: &str,
) -> Result<SubmitApplicationResponse, ApiError> {
    let application_id: i64 = persistence
        .insert_application(application)
        .map_err(|e| translate_persistence_error("Failed to store application", e))?;

    info!(
        application_id,
        reference_no = %application.reference_no,
        kind = application.kind().as_str(),
        "Application submitted"
    );
    Ok(SubmitApplicationResponse {
        application_id,
        reference_no: application.reference_no.as_str().to_string(),
        message: String::from(message),
    })
}

// ========================================================================
// Read-only views
// ========================================================================

/// Lists the caller's own applications, newest first.
///
/// # Errors
///
/// Returns an error if database operations fail.
pub fn list_my_applications(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListMyApplicationsResponse, ApiError> {
    let applications: Vec<Application> = persistence
        .list_applications_for_applicant(authenticated_actor.account.account_id)
        .map_err(|e| translate_persistence_error("Failed to list applications", e))?;

    Ok(ListMyApplicationsResponse {
        applications: applications.iter().map(ApplicationSummary::from).collect(),
    })
}

/// Looks up an application by its public reference number.
///
/// No authentication is required. Matching ignores case but is otherwise exact.
///
/// # Errors
///
/// Returns an error if no application has this reference number or the
/// lookup fails.
pub fn track_application(
    persistence: &mut Persistence,
    reference_no: &str,
) -> Result<ApplicationRecord, ApiError> {
    persistence
        .find_application_by_reference(reference_no)
        .map_err(|e| translate_persistence_error("Failed to track application", e))?
        .map(ApplicationRecord::from)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: String::from("Application not found. Please check your tracking number."),
        })
}

/// Retrieves an application by its record identifier.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the application does not
/// exist, or the lookup fails.
pub fn get_application(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    application_id: i64,
) -> Result<ApplicationRecord, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "get_application")?;
    load_application(persistence, application_id).map(ApplicationRecord::from)
}

/// Lists every application with the applicant's name, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or database operations fail.
pub fn list_all_applications(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListApplicationsResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "list_all_applications")?;

    let applications: Vec<Application> = persistence
        .list_all_applications()
        .map_err(|e| translate_persistence_error("Failed to list applications", e))?;

    let mut names: HashMap<i64, String> = HashMap::new();
    let mut records: Vec<ApplicationRecord> = Vec::with_capacity(applications.len());
    for application in applications {
        let applicant_id: i64 = application.applicant_id;
        if !names.contains_key(&applicant_id) {
            let name: String = persistence
                .get_account(applicant_id)
                .map_err(|e| translate_persistence_error("Failed to load applicant", e))?
                .map_or_else(|| String::from("Unknown"), |a| a.profile.full_name());
            names.insert(applicant_id, name);
        }

        let mut record: ApplicationRecord = ApplicationRecord::from(application);
        record.applicant_name = names.get(&applicant_id).cloned();
        records.push(record);
    }

    Ok(ListApplicationsResponse {
        applications: records,
    })
}

/// Returns the queue and dashboard counters for the caller's office.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or database operations fail.
pub fn get_admin_queue(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request: &AdminQueueRequest,
) -> Result<AdminQueueResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "get_admin_queue")?;

    let applications: Vec<Application> = persistence
        .list_all_applications()
        .map_err(|e| translate_persistence_error("Failed to list applications", e))?;
    let queue: AdminQueue = admin_queue(
        authenticated_actor.role(),
        applications,
        request.search.as_deref(),
    )
    .map_err(translate_core_error)?;

    Ok(AdminQueueResponse {
        applications: queue
            .applications
            .into_iter()
            .map(ApplicationRecord::from)
            .collect(),
        stats: queue.stats.into(),
    })
}

// ========================================================================
// Transitions
// ========================================================================

/// Updates an application's status and review sections.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The application does not exist
/// - The status is not in the vocabulary or does not apply to this kind
/// - The transition is not permitted for the actor's role
/// - A fee line, assessment or missing-document entry is invalid
/// - Database operations fail
pub fn update_application_status(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    application_id: i64,
    request: UpdateStatusRequest,
    now: OffsetDateTime,
) -> Result<ApplicationUpdateResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "update_application_status")?;

    let command: Command = Command::UpdateStatus {
        status: request.status,
        comments: request.comments,
        missing_documents: request.missing_documents,
        assessment: request.assessment,
        fees: request.fees,
    };
    let result: TransitionResult = transition(
        persistence,
        authenticated_actor,
        application_id,
        command,
        now,
    )?;

    Ok(ApplicationUpdateResponse {
        message: String::from("Application updated successfully"),
        application: ApplicationRecord::from(result.application),
    })
}

/// Parses and checks the payment fields that do not depend on the record.
///
/// The server calls this before writing an uploaded proof to disk.
///
/// # Errors
///
/// Returns an error if the method is unknown, the amount is not a
/// non-negative number, or an online payment has no proof.
pub fn validate_payment_request(
    request: &SubmitPaymentRequest,
    has_proof: bool,
) -> Result<(PaymentMethod, Option<f64>), ApiError> {
    let method: PaymentMethod = request
        .method
        .trim()
        .parse::<PaymentMethod>()
        .map_err(translate_domain_error)?;

    let amount_paid: Option<f64> = match request.amount_paid.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(text.parse::<f64>().map_err(|_| {
            translate_domain_error(DomainError::InvalidNumber {
                field: String::from("amountPaid"),
            })
        })?),
    };

    validate_payment_submission(method, has_proof, amount_paid).map_err(translate_domain_error)?;
    Ok((method, amount_paid))
}

/// Records a payment chosen by the applicant.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not the application's applicant
/// - The payment fields are invalid, or an online payment has no proof
/// - The application does not exist or is not awaiting payment
/// - Database operations fail
pub fn submit_payment(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    application_id: i64,
    request: SubmitPaymentRequest,
    proof: Option<StoredFile>,
    now: OffsetDateTime,
) -> Result<ApplicationUpdateResponse, ApiError> {
    AuthorizationService::authorize_applicant(authenticated_actor, "submit_payment")?;
    let (method, amount_paid): (PaymentMethod, Option<f64>) =
        validate_payment_request(&request, proof.is_some())?;

    let command: Command = Command::SubmitPayment {
        method,
        reference_number: request.reference_number,
        amount_paid,
        proof,
    };
    let result: TransitionResult = transition(
        persistence,
        authenticated_actor,
        application_id,
        command,
        now,
    )?;

    Ok(ApplicationUpdateResponse {
        message: String::from("Payment proof submitted successfully"),
        application: ApplicationRecord::from(result.application),
    })
}

/// Attaches a proof-of-payment image to an application.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not the application's applicant
/// - The application does not exist or is not awaiting payment
/// - Database operations fail
pub fn upload_payment_proof(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    application_id: i64,
    proof: StoredFile,
    now: OffsetDateTime,
) -> Result<ApplicationUpdateResponse, ApiError> {
    AuthorizationService::authorize_applicant(authenticated_actor, "upload_payment_proof")?;

    let result: TransitionResult = transition(
        persistence,
        authenticated_actor,
        application_id,
        Command::UploadPaymentProof { proof },
        now,
    )?;

    Ok(ApplicationUpdateResponse {
        message: String::from("Payment proof uploaded successfully."),
        application: ApplicationRecord::from(result.application),
    })
}

/// Attaches corrected documents to an application.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not the application's applicant
/// - No documents are supplied
/// - The application does not exist
/// - Database operations fail
pub fn attach_revision_documents(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    application_id: i64,
    documents: Vec<StoredFile>,
    now: OffsetDateTime,
) -> Result<AttachDocumentsResponse, ApiError> {
    AuthorizationService::authorize_applicant(authenticated_actor, "attach_revision_documents")?;

    let result: TransitionResult = transition(
        persistence,
        authenticated_actor,
        application_id,
        Command::AttachRevisionDocuments { documents },
        now,
    )?;

    Ok(AttachDocumentsResponse {
        message: String::from("Documents uploaded successfully"),
        documents: result.attached_documents,
        application: ApplicationRecord::from(result.application),
    })
}

fn load_application(
    persistence: &mut Persistence,
    application_id: i64,
) -> Result<Application, ApiError> {
    persistence
        .get_application(application_id)
        .map_err(|e| translate_persistence_error("Failed to load application", e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!("Application {application_id} does not exist"),
        })
}

/// Loads the record, applies the command and stores the outcome.
fn transition(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    application_id: i64,
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError> {
    let application: Application = load_application(persistence, application_id)?;
    let command_name: &'static str = command.name();

    let result: TransitionResult = apply(
        &application,
        command,
        authenticated_actor.to_actor(),
        now,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_transition(application_id, &result)
        .map_err(|e| translate_persistence_error("Failed to store application update", e))?;

    info!(
        application_id,
        reference_no = %result.application.reference_no,
        command = command_name,
        from = application.status.as_str(),
        to = result.application.status.as_str(),
        actor = authenticated_actor.account.account_id,
        "Application updated"
    );
    Ok(result)
}
