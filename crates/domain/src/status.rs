// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application status vocabulary and transition rules.
//!
//! The vocabulary is closed. Transitions are validated against an explicit
//! table keyed by `(current, requested, role)` before any record is mutated.
//! Anything not listed in the table is denied.

use crate::error::DomainError;
use crate::types::{ActorRole, ApplicationKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a permit application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    #[serde(rename = "Pending MEO")]
    PendingMeo,
    #[serde(rename = "Pending BFP")]
    PendingBfp,
    #[serde(rename = "Pending Mayor")]
    PendingMayor,
    Approved,
    Rejected,
    /// Fees assessed, waiting for the applicant to pay (building only).
    #[serde(rename = "Payment Pending")]
    PaymentPending,
    #[serde(rename = "Payment Submitted")]
    PaymentSubmitted,
    #[serde(rename = "Permit Issued")]
    PermitIssued,
}

impl ApplicationStatus {
    /// Every status in the vocabulary, in workflow order.
    pub const ALL: [Self; 9] = [
        Self::Submitted,
        Self::PendingMeo,
        Self::PaymentPending,
        Self::PaymentSubmitted,
        Self::PendingBfp,
        Self::PendingMayor,
        Self::Approved,
        Self::PermitIssued,
        Self::Rejected,
    ];

    /// Returns the display string, which is also the persisted form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::PendingMeo => "Pending MEO",
            Self::PendingBfp => "Pending BFP",
            Self::PendingMayor => "Pending Mayor",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::PaymentPending => "Payment Pending",
            Self::PaymentSubmitted => "Payment Submitted",
            Self::PermitIssued => "Permit Issued",
        }
    }

    /// Parses a status from its display string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` for anything outside the vocabulary.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }

    /// Returns true if an application of `kind` may ever hold this status.
    ///
    /// Occupancy applications skip the fee-assessment hold.
    #[must_use]
    pub const fn is_allowed_for(&self, kind: ApplicationKind) -> bool {
        !matches!(
            (kind, self),
            (ApplicationKind::Occupancy, Self::PaymentPending)
        )
    }

    /// Returns true for the states that clear any open rejection.
    #[must_use]
    pub const fn clears_rejection(&self) -> bool {
        matches!(self, Self::Submitted | Self::PendingMeo)
    }

    /// Returns true for the states that open a rejection.
    #[must_use]
    pub const fn opens_rejection(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Validates a status change against the transition table.
    ///
    /// # Arguments
    ///
    /// * `kind` - The application variant
    /// * `new_status` - The requested status
    /// * `role` - The role of the acting account
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StatusNotApplicable` if `new_status` does not exist
    /// for `kind`, or `DomainError::TransitionNotAllowed` if the table has no
    /// row for `(self, new_status, role)`.
    pub fn validate_transition(
        self,
        kind: ApplicationKind,
        new_status: Self,
        role: ActorRole,
    ) -> Result<(), DomainError> {
        if !new_status.is_allowed_for(kind) {
            return Err(DomainError::StatusNotApplicable {
                kind,
                status: new_status,
            });
        }

        let permitted: bool = match role {
            ActorRole::MeoAdmin => match (self, new_status) {
                (Self::Submitted, Self::PendingMeo | Self::Rejected)
                | (Self::PendingMeo | Self::PaymentSubmitted, Self::PendingBfp | Self::Rejected)
                | (Self::PaymentPending, Self::PendingBfp | Self::Rejected)
                | (Self::Rejected, Self::Submitted | Self::PendingMeo | Self::Rejected)
                | (Self::Approved, Self::PermitIssued) => true,
                (Self::PendingMeo | Self::PaymentSubmitted, Self::PaymentPending) => {
                    kind == ApplicationKind::Building
                }
                _ => false,
            },
            ActorRole::BfpAdmin => matches!(
                (self, new_status),
                (Self::PendingBfp, Self::PendingMayor | Self::Rejected)
                    | (Self::Rejected, Self::PendingBfp | Self::Rejected)
            ),
            ActorRole::MayorAdmin => matches!(
                (self, new_status),
                (
                    Self::PendingMayor,
                    Self::Approved | Self::PendingMeo | Self::Rejected
                )
            ),
            ActorRole::Applicant => match (self, new_status) {
                (Self::PaymentPending | Self::PaymentSubmitted, Self::PaymentSubmitted) => true,
                (Self::PendingMeo, Self::PaymentSubmitted) => kind == ApplicationKind::Occupancy,
                _ => false,
            },
        };

        if permitted {
            Ok(())
        } else {
            Err(DomainError::TransitionNotAllowed {
                from: self,
                to: new_status,
                role,
            })
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
