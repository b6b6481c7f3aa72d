// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;
mod uploads;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, FromRef, Multipart, Path, Query, State as AxumState,
        multipart::MultipartError,
    },
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use permit_portal::StoredFile;
use permit_portal_api::{
    AccountInfo, AdminQueueRequest, AdminQueueResponse, ApiError, ApplicationRecord,
    ApplicationUpdateResponse, AttachDocumentsResponse, AuthorizationService,
    CreateAccountResponse, CreateAdminAccountRequest, ListAccountsRequest, ListAccountsResponse,
    ListApplicationsResponse, ListMyApplicationsResponse, MAX_FILE_SIZE, MAX_REVISION_FILES,
    RegisterAccountRequest, SubmitApplicationResponse, SubmitOccupancyRequest,
    SubmitPaymentRequest, UpdateStatusRequest, UploadKind, UploadPolicyError,
    attach_revision_documents, create_admin_account, create_first_admin, get_admin_queue,
    get_application, get_profile, list_accounts, list_all_applications, list_my_applications,
    register_account, submit_building_application, submit_occupancy_application, submit_payment,
    track_application, update_application_status, upload_payment_proof,
    validate_payment_request, validate_upload,
};
use permit_portal_domain::BuildingForm;
use permit_portal_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::{ACCOUNT_HEADER, SessionActor};
use crate::uploads::{MultipartForm, PUBLIC_PREFIX, ReceivedFile, UploadStore};

/// Largest accepted request body: a full batch of revision documents plus
/// room for the multipart framing.
const MAX_BODY_BYTES: usize = MAX_FILE_SIZE * MAX_REVISION_FILES + 1024 * 1024;

/// Permit Portal Server - HTTP server for building and occupancy permits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "PERMIT_PORTAL_DATABASE")]
    database: Option<String>,

    /// `MariaDB`/`MySQL` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long, env = "PERMIT_PORTAL_MYSQL_URL")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "PERMIT_PORTAL_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "PERMIT_PORTAL_PORT", default_value_t = 3000)]
    port: u16,

    /// Directory uploaded files are written to
    #[arg(long, env = "PERMIT_PORTAL_UPLOAD_DIR", default_value = "uploads")]
    upload_dir: PathBuf,

    /// Origins allowed to call the API from a browser
    #[arg(
        long,
        env = "PERMIT_PORTAL_ALLOWED_ORIGIN",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    allowed_origin: Vec<String>,
}

/// Application state shared across handlers.
///
/// The single persistence connection sits behind a Mutex, so record
/// writes are serialized within the process.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    uploads: Arc<UploadStore>,
    live_events: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.live_events)
    }
}

/// API response for the liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error body returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// The error class, e.g. `ValidationError`.
    error: String,
    /// Human-readable description.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl HttpError {
    const fn new(status: StatusCode, error: &'static str, message: String) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalError",
            String::from("Internal server error"),
        )
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.error.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(
                StatusCode::UNAUTHORIZED,
                "AuthenticationError",
                err.to_string(),
            ),
            ApiError::Unauthorized { .. } => Self::new(
                StatusCode::FORBIDDEN,
                "AuthorizationError",
                err.to_string(),
            ),
            ApiError::DomainRuleViolation { message, .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "ValidationError", message)
            }
            ApiError::InvalidInput { message, .. } => {
                Self::new(StatusCode::BAD_REQUEST, "ValidationError", message)
            }
            ApiError::ResourceNotFound { message, .. } => {
                Self::new(StatusCode::NOT_FOUND, "NotFoundError", message)
            }
            ApiError::Conflict { message } => {
                Self::new(StatusCode::CONFLICT, "ConflictError", message)
            }
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self::internal()
            }
        }
    }
}

impl From<UploadPolicyError> for HttpError {
    fn from(err: UploadPolicyError) -> Self {
        ApiError::from(err).into()
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), "ValidationError", err.body_text())
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        error!(error = %err, "Upload storage failed");
        Self::internal()
    }
}

// ========================================================================
// Accounts
// ========================================================================

/// Handler for GET `/api/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/api/accounts`.
async fn handle_register_account(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), HttpError> {
    info!(username = %request.username, "Handling register_account request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateAccountResponse =
        register_account(&mut persistence, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/accounts/bootstrap`.
///
/// Only succeeds while no admin account exists.
async fn handle_create_first_admin(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), HttpError> {
    info!(username = %request.username, "Handling create_first_admin request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateAccountResponse =
        create_first_admin(&mut persistence, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/accounts/admins`.
async fn handle_create_admin_account(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(request): Json<CreateAdminAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), HttpError> {
    info!(
        account_id = actor.account.account_id,
        username = %request.username,
        role = %request.role,
        "Handling create_admin_account request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateAccountResponse =
        create_admin_account(&mut persistence, &actor, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/accounts`.
async fn handle_list_accounts(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Query(request): Query<ListAccountsRequest>,
) -> Result<Json<ListAccountsResponse>, HttpError> {
    info!(
        account_id = actor.account.account_id,
        page = ?request.page,
        limit = ?request.limit,
        "Handling list_accounts request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListAccountsResponse = list_accounts(&mut persistence, &actor, request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/accounts/me`.
async fn handle_get_profile(SessionActor(actor): SessionActor) -> Json<AccountInfo> {
    Json(get_profile(&actor))
}

// ========================================================================
// Applications
// ========================================================================

/// Handler for POST `/api/applications/building`.
async fn handle_submit_building(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(form): Json<BuildingForm>,
) -> Result<(StatusCode, Json<SubmitApplicationResponse>), HttpError> {
    info!(
        account_id = actor.account.account_id,
        "Handling submit_building_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitApplicationResponse =
        submit_building_application(&mut persistence, &actor, form, OffsetDateTime::now_utc())?;
    drop(persistence);

    app_state
        .live_events
        .broadcast(&LiveEvent::ApplicationSubmitted {
            application_id: response.application_id,
            reference_no: response.reference_no.clone(),
            application_type: String::from("Building"),
        });

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/applications/occupancy`.
async fn handle_submit_occupancy(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(request): Json<SubmitOccupancyRequest>,
) -> Result<(StatusCode, Json<SubmitApplicationResponse>), HttpError> {
    info!(
        account_id = actor.account.account_id,
        building_permit = %request.building_permit_identifier,
        "Handling submit_occupancy_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitApplicationResponse = submit_occupancy_application(
        &mut persistence,
        &actor,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    app_state
        .live_events
        .broadcast(&LiveEvent::ApplicationSubmitted {
            application_id: response.application_id,
            reference_no: response.reference_no.clone(),
            application_type: String::from("Occupancy"),
        });

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/applications/mine`.
async fn handle_list_my_applications(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<ListMyApplicationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListMyApplicationsResponse = list_my_applications(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/applications/track/{reference_no}`.
///
/// Public: anyone holding the reference number may track it.
async fn handle_track_application(
    AxumState(app_state): AxumState<AppState>,
    Path(reference_no): Path<String>,
) -> Result<Json<ApplicationRecord>, HttpError> {
    info!(reference_no = %reference_no, "Handling track_application request");

    let mut persistence = app_state.persistence.lock().await;
    let record: ApplicationRecord = track_application(&mut persistence, &reference_no)?;
    drop(persistence);

    Ok(Json(record))
}

/// Handler for GET `/api/applications`.
async fn handle_list_all_applications(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<ListApplicationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListApplicationsResponse = list_all_applications(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/applications/queue`.
async fn handle_get_admin_queue(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Query(request): Query<AdminQueueRequest>,
) -> Result<Json<AdminQueueResponse>, HttpError> {
    info!(
        role = actor.role().as_str(),
        search = ?request.search,
        "Handling get_admin_queue request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AdminQueueResponse = get_admin_queue(&mut persistence, &actor, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/applications/{id}`.
async fn handle_get_application(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(application_id): Path<i64>,
) -> Result<Json<ApplicationRecord>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let record: ApplicationRecord = get_application(&mut persistence, &actor, application_id)?;
    drop(persistence);

    Ok(Json(record))
}

/// Handler for PUT `/api/applications/{id}/status`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(application_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApplicationUpdateResponse>, HttpError> {
    info!(
        application_id,
        role = actor.role().as_str(),
        status = ?request.status,
        "Handling update_application_status request"
    );
    let status_requested: bool = request.status.is_some();

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationUpdateResponse = update_application_status(
        &mut persistence,
        &actor,
        application_id,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    if status_requested {
        app_state.live_events.broadcast(&LiveEvent::StatusChanged {
            application_id,
            reference_no: response.application.reference_no.clone(),
            status: response.application.status.clone(),
        });
    }

    Ok(Json(response))
}

// ========================================================================
// Uploads
// ========================================================================

/// Handler for POST `/api/applications/{id}/payment`.
///
/// Multipart fields: `method`, `referenceNumber`, `amountPaid` and an
/// optional `file`. Nothing is written to disk until both the upload
/// policy and the payment fields are accepted.
async fn handle_submit_payment(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(application_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApplicationUpdateResponse>, HttpError> {
    info!(application_id, "Handling submit_payment request");
    AuthorizationService::authorize_applicant(&actor, "submit_payment").map_err(ApiError::from)?;

    let form: MultipartForm = MultipartForm::read(multipart, "file").await?;
    if !form.files.is_empty() {
        validate_upload(UploadKind::PaymentProof, &form.file_metadata())?;
    }
    let request: SubmitPaymentRequest = SubmitPaymentRequest {
        method: form.field("method").unwrap_or_default(),
        reference_number: form.field("referenceNumber"),
        amount_paid: form.field("amountPaid"),
    };
    validate_payment_request(&request, !form.files.is_empty())?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let proof: Option<StoredFile> = match form.files.first() {
        Some(file) => Some(
            app_state
                .uploads
                .store(UploadKind::PaymentProof, file, now)
                .await?,
        ),
        None => None,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<ApplicationUpdateResponse, ApiError> = submit_payment(
        &mut persistence,
        &actor,
        application_id,
        request,
        proof.clone(),
        now,
    );
    drop(persistence);
    let response: ApplicationUpdateResponse =
        keep_uploads_if_ok(&app_state, result, proof.as_slice()).await?;

    app_state.live_events.broadcast(&LiveEvent::PaymentSubmitted {
        application_id,
        reference_no: response.application.reference_no.clone(),
    });

    Ok(Json(response))
}

/// Handler for POST `/api/applications/{id}/payment-proof`.
async fn handle_upload_payment_proof(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(application_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApplicationUpdateResponse>, HttpError> {
    info!(application_id, "Handling upload_payment_proof request");
    AuthorizationService::authorize_applicant(&actor, "upload_payment_proof")
        .map_err(ApiError::from)?;

    let form: MultipartForm = MultipartForm::read(multipart, "file").await?;
    validate_upload(UploadKind::PaymentProof, &form.file_metadata())?;
    let file: &ReceivedFile = form.files.first().ok_or(UploadPolicyError::NoFiles)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let proof: StoredFile = app_state
        .uploads
        .store(UploadKind::PaymentProof, file, now)
        .await?;

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<ApplicationUpdateResponse, ApiError> = upload_payment_proof(
        &mut persistence,
        &actor,
        application_id,
        proof.clone(),
        now,
    );
    drop(persistence);
    let response: ApplicationUpdateResponse =
        keep_uploads_if_ok(&app_state, result, std::slice::from_ref(&proof)).await?;

    app_state.live_events.broadcast(&LiveEvent::PaymentSubmitted {
        application_id,
        reference_no: response.application.reference_no.clone(),
    });

    Ok(Json(response))
}

/// Handler for POST `/api/applications/{id}/documents`.
///
/// Accepts one to ten files in the multipart field `files`.
async fn handle_attach_documents(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(application_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<AttachDocumentsResponse>, HttpError> {
    info!(application_id, "Handling attach_revision_documents request");
    AuthorizationService::authorize_applicant(&actor, "attach_revision_documents")
        .map_err(ApiError::from)?;

    let form: MultipartForm = MultipartForm::read(multipart, "files").await?;
    validate_upload(UploadKind::RevisionDocuments, &form.file_metadata())?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let stored: Vec<StoredFile> = app_state
        .uploads
        .store_all(UploadKind::RevisionDocuments, &form.files, now)
        .await?;

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<AttachDocumentsResponse, ApiError> = attach_revision_documents(
        &mut persistence,
        &actor,
        application_id,
        stored.clone(),
        now,
    );
    drop(persistence);
    let response: AttachDocumentsResponse = keep_uploads_if_ok(&app_state, result, &stored).await?;

    app_state.live_events.broadcast(&LiveEvent::DocumentsAttached {
        application_id,
        reference_no: response.application.reference_no.clone(),
        count: response.documents.len(),
    });

    Ok(Json(response))
}

/// Removes freshly stored files when the record update behind them failed.
async fn keep_uploads_if_ok<T>(
    app_state: &AppState,
    result: Result<T, ApiError>,
    stored: &[StoredFile],
) -> Result<T, HttpError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            app_state.uploads.remove_all(stored).await;
            Err(err.into())
        }
    }
}

// ========================================================================
// Wiring
// ========================================================================

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let upload_root: PathBuf = app_state.uploads.root().to_path_buf();

    Router::new()
        .route("/api/health", get(handle_health))
        .route(
            "/api/accounts",
            post(handle_register_account).get(handle_list_accounts),
        )
        .route("/api/accounts/bootstrap", post(handle_create_first_admin))
        .route("/api/accounts/admins", post(handle_create_admin_account))
        .route("/api/accounts/me", get(handle_get_profile))
        .route("/api/applications", get(handle_list_all_applications))
        .route("/api/applications/building", post(handle_submit_building))
        .route("/api/applications/occupancy", post(handle_submit_occupancy))
        .route("/api/applications/mine", get(handle_list_my_applications))
        .route("/api/applications/queue", get(handle_get_admin_queue))
        .route(
            "/api/applications/track/{reference_no}",
            get(handle_track_application),
        )
        .route("/api/applications/{id}", get(handle_get_application))
        .route("/api/applications/{id}/status", put(handle_update_status))
        .route("/api/applications/{id}/payment", post(handle_submit_payment))
        .route(
            "/api/applications/{id}/payment-proof",
            post(handle_upload_payment_proof),
        )
        .route(
            "/api/applications/{id}/documents",
            post(handle_attach_documents),
        )
        .route("/api/live", get(live_events_handler))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(upload_root))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

/// Builds the CORS policy for the configured browser origins.
fn cors_layer(origins: &[String]) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin.trim()))
        .collect::<Result<_, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-account-id"),
        ]))
}

fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    #[cfg(feature = "mysql")]
    if let Some(url) = &args.mysql_url {
        info!("Using MariaDB/MySQL database");
        return Persistence::new_with_mysql(url);
    }

    if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Permit Portal server");

    let persistence: Persistence = open_persistence(&args)?;

    let uploads: UploadStore = UploadStore::new(&args.upload_dir);
    uploads.ensure_directories().await?;
    info!(upload_dir = %args.upload_dir.display(), "Upload directory ready");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        uploads: Arc::new(uploads),
        live_events: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state)
        .layer(cors_layer(&args.allowed_origin)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!(%addr, account_header = ACCOUNT_HEADER, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
