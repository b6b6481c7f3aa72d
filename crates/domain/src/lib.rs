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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod forms;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use forms::{
    ApplicantSignature, BuildingForm, BuildingProjectDetails, DesignProfessional, Enterprise,
    Location, LotOwnerConsent, OccupancyClassification, OccupancyForm, OccupancyOwner,
    OccupancyProjectDetails, OwnerAndProject, PermitInfo, PersonName, PostalAddress, Signatures,
};
pub use status::ApplicationStatus;
pub use types::{
    AccountProfile, ActorRole, ApplicationKind, Assessment, Document, FeeItem, FeeSchedule,
    PaymentDetails, PaymentMethod, PaymentStatus, ReferenceNumber, RejectionDetails,
};
pub use validation::{
    MAX_MISSING_DOCUMENTS, require_text, validate_account_profile, validate_assessment,
    validate_fee_schedule, validate_missing_documents, validate_optional_date,
    validate_optional_number,
};
