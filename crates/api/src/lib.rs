// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Permit Portal.
//!
//! This crate sits between the HTTP server and the core. It authenticates
//! forwarded account identifiers, authorizes each operation by role,
//! enforces the upload policy and translates every lower-layer error into
//! an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod upload_policy;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error, translate_resolve_error,
};
pub use handlers::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, attach_revision_documents, create_admin_account,
    create_first_admin, get_admin_queue, get_application, get_profile, list_accounts,
    list_all_applications, list_my_applications, register_account, submit_building_application,
    submit_occupancy_application, submit_payment, track_application, update_application_status,
    upload_payment_proof, validate_payment_request,
};
pub use request_response::{
    AccountInfo, AdminQueueRequest, AdminQueueResponse, ApplicationForm, ApplicationRecord,
    ApplicationSummary, ApplicationUpdateResponse, AttachDocumentsResponse, CreateAccountResponse,
    CreateAdminAccountRequest, ListAccountsRequest, ListAccountsResponse,
    ListApplicationsResponse, ListMyApplicationsResponse, QueueStatsInfo, RegisterAccountRequest,
    SubmitApplicationResponse, SubmitOccupancyRequest, SubmitPaymentRequest, UpdateStatusRequest,
};
pub use upload_policy::{
    MAX_FILE_SIZE, MAX_REVISION_FILES, UploadKind, UploadPolicyError, UploadedFile,
    stored_extension, validate_upload,
};
