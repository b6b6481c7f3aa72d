// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Credentials are verified by an upstream gateway, which forwards the
//! account identifier. This module only resolves that identifier to a
//! stored account and checks what the account's role may do.

use permit_portal_audit::Actor;
use permit_portal_domain::ActorRole;
use permit_portal_persistence::{AccountData, Persistence};
use tracing::warn;

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The stored account.
    pub account: AccountData,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(account: AccountData) -> Self {
        Self { account }
    }

    /// The account's role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.account.profile.role
    }

    /// Converts this authenticated account into the actor recorded in
    /// workflow history.
    #[must_use]
    pub const fn to_actor(&self) -> Actor {
        Actor::new(self.account.account_id, self.account.profile.role)
    }
}

/// Authentication service for resolving forwarded account identifiers.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Loads the account behind a forwarded identifier.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `account_id` - The identifier set by the upstream gateway
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if no such account exists,
    /// or an internal error if the lookup fails.
    pub fn authenticate(
        persistence: &mut Persistence,
        account_id: i64,
    ) -> Result<AuthenticatedActor, ApiError> {
        let account: Option<AccountData> = persistence
            .get_account(account_id)
            .map_err(|e| translate_persistence_error("Failed to load account", e))?;

        account.map(AuthenticatedActor::new).ok_or_else(|| {
            warn!(account_id, "Unknown account identifier");
            ApiError::AuthenticationFailed {
                reason: String::from("Unknown account"),
            }
        })
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor belongs to one of the reviewing offices.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is an applicant.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role().is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("admin"),
            })
        }
    }

    /// Checks that the actor is an engineering office admin.
    ///
    /// Account management is reserved to this office.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_meo_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role() {
            ActorRole::MeoAdmin => Ok(()),
            ActorRole::Applicant | ActorRole::BfpAdmin | ActorRole::MayorAdmin => {
                Err(AuthError::Unauthorized {
                    action: String::from(action),
                    required_role: String::from(ActorRole::MeoAdmin.as_str()),
                })
            }
        }
    }

    /// Checks that the actor is an applicant.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is an admin.
    pub fn authorize_applicant(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role() == ActorRole::Applicant {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from(ActorRole::Applicant.as_str()),
            })
        }
    }
}
