// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use permit_portal_domain::{ActorRole, DomainError};

/// Errors that can occur during application transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor's role may not issue this command at all.
    NotPermitted {
        /// The command name.
        action: &'static str,
        /// The role that attempted it.
        role: ActorRole,
    },
    /// Only the applicant who owns the record may issue this command.
    NotApplicationOwner {
        /// The account that attempted it.
        account_id: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotPermitted { action, role } => {
                write!(f, "Role {} may not perform {action}", role.as_str())
            }
            Self::NotApplicationOwner { account_id } => write!(
                f,
                "Account {account_id} is not the applicant of this application"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
