// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::ApplicationStatus;
use crate::types::{ActorRole, ApplicationKind};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required form field is absent or blank.
    MissingField {
        /// Dotted path of the field (e.g. `box1.owner.lastName`).
        field: String,
    },
    /// A date field could not be parsed.
    InvalidDate {
        /// Dotted path of the field.
        field: String,
        /// The rejected value.
        value: String,
    },
    /// A numeric form field is negative or not finite.
    InvalidNumber {
        /// Dotted path of the field.
        field: String,
    },
    /// The status string is not part of the status vocabulary.
    InvalidStatus(String),
    /// The status exists but does not apply to this application kind.
    StatusNotApplicable {
        /// The application kind.
        kind: ApplicationKind,
        /// The requested status.
        status: ApplicationStatus,
    },
    /// The transition table does not permit this status change.
    TransitionNotAllowed {
        /// The current status.
        from: ApplicationStatus,
        /// The requested status.
        to: ApplicationStatus,
        /// The role attempting the change.
        role: ActorRole,
    },
    /// The role string is not recognized.
    InvalidRole(String),
    /// The application kind string is not recognized.
    InvalidApplicationKind(String),
    /// The payment method string is not recognized.
    InvalidPaymentMethod(String),
    /// The payment status string is not recognized.
    InvalidPaymentStatus(String),
    /// An online payment was submitted without a proof file.
    ProofOfPaymentRequired,
    /// A fee line has an empty particular or an invalid amount.
    InvalidFeeItem {
        /// Zero-based index of the fee line.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Notary fields were supplied for an application that has no notary section.
    NotaryNotApplicable,
    /// A missing-document entry is blank.
    InvalidMissingDocument(String),
    /// The reference number does not have the `{B|O}-{digits}` form.
    InvalidReferenceNumber(String),
    /// The timestamp cannot be represented.
    InvalidTimestamp(String),
    /// The username is empty or malformed.
    InvalidUsername(String),
    /// A person name is empty.
    InvalidName(String),
    /// The email address is malformed.
    InvalidEmail(String),
    /// The phone number is malformed.
    InvalidPhoneNumber(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::InvalidDate { field, value } => {
                write!(f, "Invalid date for {field}: '{value}'")
            }
            Self::InvalidNumber { field } => {
                write!(f, "Invalid number for {field}: must be a non-negative value")
            }
            Self::InvalidStatus(status) => write!(f, "Invalid application status: '{status}'"),
            Self::StatusNotApplicable { kind, status } => write!(
                f,
                "Status '{}' does not apply to {} applications",
                status.as_str(),
                kind.as_str()
            ),
            Self::TransitionNotAllowed { from, to, role } => write!(
                f,
                "Transition from '{}' to '{}' is not allowed for role {}",
                from.as_str(),
                to.as_str(),
                role.as_str()
            ),
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidApplicationKind(kind) => write!(f, "Invalid application type: '{kind}'"),
            Self::InvalidPaymentMethod(method) => write!(f, "Invalid payment method: '{method}'"),
            Self::InvalidPaymentStatus(status) => write!(f, "Invalid payment status: '{status}'"),
            Self::ProofOfPaymentRequired => write!(
                f,
                "Proof of payment image is required for online transactions."
            ),
            Self::InvalidFeeItem { index, reason } => {
                write!(f, "Invalid fee item at position {index}: {reason}")
            }
            Self::NotaryNotApplicable => {
                write!(f, "Notary details only apply to Building applications")
            }
            Self::InvalidMissingDocument(msg) => write!(f, "Invalid missing document: {msg}"),
            Self::InvalidReferenceNumber(reference) => {
                write!(f, "Invalid reference number: '{reference}'")
            }
            Self::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidPhoneNumber(msg) => write!(f, "Invalid phone number: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
