// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::upload_policy::UploadPolicyError;
use permit_portal::{CoreError, ResolveError};
use permit_portal_domain::DomainError;
use permit_portal_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request collides with an existing record.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    ///
    /// The message is for logs only and is never shown to clients.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<UploadPolicyError> for ApiError {
    fn from(err: UploadPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from(err.field()),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field }
        | DomainError::InvalidDate { field, .. }
        | DomainError::InvalidNumber { field } => ApiError::InvalidInput { field, message },
        DomainError::InvalidStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::StatusNotApplicable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_applies_to_kind"),
            message,
        },
        DomainError::TransitionNotAllowed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message,
        },
        DomainError::InvalidRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message,
        },
        DomainError::InvalidApplicationKind(_) => ApiError::InvalidInput {
            field: String::from("applicationType"),
            message,
        },
        DomainError::InvalidPaymentMethod(_) => ApiError::InvalidInput {
            field: String::from("method"),
            message,
        },
        DomainError::InvalidPaymentStatus(_) => ApiError::InvalidInput {
            field: String::from("paymentStatus"),
            message,
        },
        DomainError::ProofOfPaymentRequired => ApiError::InvalidInput {
            field: String::from("file"),
            message,
        },
        DomainError::InvalidFeeItem { .. } => ApiError::InvalidInput {
            field: String::from("fees"),
            message,
        },
        DomainError::NotaryNotApplicable => ApiError::DomainRuleViolation {
            rule: String::from("notary_building_only"),
            message,
        },
        DomainError::InvalidMissingDocument(_) => ApiError::InvalidInput {
            field: String::from("missingDocuments"),
            message,
        },
        DomainError::InvalidReferenceNumber(_) => ApiError::InvalidInput {
            field: String::from("referenceNo"),
            message,
        },
        DomainError::InvalidUsername(_) => ApiError::InvalidInput {
            field: String::from("username"),
            message,
        },
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidEmail(_) => ApiError::InvalidInput {
            field: String::from("email"),
            message,
        },
        DomainError::InvalidPhoneNumber(_) => ApiError::InvalidInput {
            field: String::from("phoneNumber"),
            message,
        },
        DomainError::InvalidTimestamp(_) => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotPermitted { action, role } => ApiError::Unauthorized {
            action: String::from(action),
            required_role: if role.is_admin() {
                String::from("user")
            } else {
                String::from("admin")
            },
        },
        CoreError::NotApplicationOwner { .. } => ApiError::Unauthorized {
            action: String::from("modify_application"),
            required_role: String::from("application owner"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Unique violations become conflicts. Everything else is logged here and
/// surfaces as an internal error.
#[must_use]
pub fn translate_persistence_error(context: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(detail) => ApiError::Conflict {
            message: format!("{context}: {detail}"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: what,
        },
        other => {
            error!(context, error = %other, "Persistence failure");
            ApiError::Internal {
                message: format!("{context}: {other}"),
            }
        }
    }
}

/// Translates a building permit resolution failure into an API error.
#[must_use]
pub fn translate_resolve_error(err: ResolveError<PersistenceError>) -> ApiError {
    let message: String = err.to_string();
    match err {
        ResolveError::EmptyIdentifier => ApiError::InvalidInput {
            field: String::from("buildingPermitIdentifier"),
            message,
        },
        ResolveError::NotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Building Permit"),
            message,
        },
        ResolveError::Index(inner) => {
            translate_persistence_error("Failed to resolve building permit", inner)
        }
    }
}
