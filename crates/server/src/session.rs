// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account extraction at the server boundary.
//!
//! Sign-in happens upstream. The gateway in front of this server sets the
//! `X-Account-Id` header on every request it has authenticated, and this
//! module turns that header into an [`AuthenticatedActor`].

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use permit_portal_api::{ApiError, AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Header carrying the authenticated account identifier.
pub const ACCOUNT_HEADER: &str = "X-Account-Id";

/// Extractor for the calling account.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionActor(actor): SessionActor,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects the request with HTTP 401 if the header is missing, is not a
/// positive integer, or names no account.
pub struct SessionActor(pub AuthenticatedActor);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: &str = parts
            .headers
            .get(ACCOUNT_HEADER)
            .ok_or_else(|| {
                debug!("Missing account header");
                SessionError::MissingAccountHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid account header encoding");
                SessionError::InvalidAccountHeader
            })?;

        let account_id: i64 = header
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                warn!(header, "Account header is not a positive integer");
                SessionError::InvalidAccountHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let actor: AuthenticatedActor =
            AuthenticationService::authenticate(&mut persistence, account_id)
                .map_err(SessionError::Rejected)?;
        drop(persistence);

        debug!(
            account_id,
            role = actor.role().as_str(),
            "Account resolved"
        );

        Ok(Self(actor))
    }
}

/// Account extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The account header is missing.
    MissingAccountHeader,
    /// The account header is not a positive integer.
    InvalidAccountHeader,
    /// The account lookup failed or found nothing.
    Rejected(ApiError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let err: HttpError = match self {
            Self::MissingAccountHeader => HttpError::new(
                StatusCode::UNAUTHORIZED,
                "AuthenticationError",
                format!("Missing {ACCOUNT_HEADER} header"),
            ),
            Self::InvalidAccountHeader => HttpError::new(
                StatusCode::UNAUTHORIZED,
                "AuthenticationError",
                format!("Invalid {ACCOUNT_HEADER} header. Expected a positive account id"),
            ),
            Self::Rejected(err) => HttpError::from(err),
        };
        err.into_response()
    }
}
