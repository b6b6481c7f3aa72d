// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

use crate::error::DomainError;

/// The two permit application variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationKind {
    /// A building permit application.
    Building,
    /// An occupancy permit application, always tied to a building permit.
    Occupancy,
}

impl ApplicationKind {
    /// Returns the string representation used for persistence and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::Occupancy => "Occupancy",
        }
    }

    /// Returns the reference number prefix for this kind.
    #[must_use]
    pub const fn prefix(&self) -> char {
        match self {
            Self::Building => 'B',
            Self::Occupancy => 'O',
        }
    }
}

impl FromStr for ApplicationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Building" => Ok(Self::Building),
            "Occupancy" => Ok(Self::Occupancy),
            _ => Err(DomainError::InvalidApplicationKind(s.to_string())),
        }
    }
}

/// Roles an account can hold.
///
/// Applicants submit and pay; the three admin offices review in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRole {
    /// A citizen submitting applications.
    #[serde(rename = "user")]
    Applicant,
    /// Municipal Engineering Office administrator.
    #[serde(rename = "meoadmin")]
    MeoAdmin,
    /// Bureau of Fire Protection administrator.
    #[serde(rename = "bfpadmin")]
    BfpAdmin,
    /// Mayor's office administrator.
    #[serde(rename = "mayoradmin")]
    MayorAdmin,
}

impl ActorRole {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "user",
            Self::MeoAdmin => "meoadmin",
            Self::BfpAdmin => "bfpadmin",
            Self::MayorAdmin => "mayoradmin",
        }
    }

    /// Returns true for the three reviewing offices.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        !matches!(self, Self::Applicant)
    }
}

impl FromStr for ActorRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::Applicant),
            "meoadmin" => Ok(Self::MeoAdmin),
            "bfpadmin" => Ok(Self::BfpAdmin),
            "mayoradmin" => Ok(Self::MayorAdmin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// Public tracking identifier of an application, `{B|O}-{epochMillis}`.
///
/// Assigned once when a record is first created and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    /// Derives the reference number for a record created at `created_at`.
    ///
    /// Instants before the Unix epoch clamp to zero so the result always
    /// matches `{prefix}-{digits}`.
    #[must_use]
    pub fn generate(kind: ApplicationKind, created_at: OffsetDateTime) -> Self {
        let millis: i128 = (created_at.unix_timestamp_nanos() / 1_000_000).max(0);
        Self(format!("{}-{millis}", kind.prefix()))
    }

    /// Parses a reference number, normalizing the prefix to upper case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReferenceNumber` if the value is not of
    /// the form `B-<digits>` or `O-<digits>`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let invalid = || DomainError::InvalidReferenceNumber(value.to_string());

        let (prefix, digits) = trimmed.split_once('-').ok_or_else(invalid)?;
        let prefix: char = match prefix {
            "B" | "b" => 'B',
            "O" | "o" => 'O',
            _ => return Err(invalid()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(Self(format!("{prefix}-{digits}")))
    }

    /// Returns the application kind encoded in the prefix.
    #[must_use]
    pub fn kind(&self) -> ApplicationKind {
        if self.0.starts_with('O') {
            ApplicationKind::Occupancy
        } else {
            ApplicationKind::Building
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ReferenceNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReferenceNumber> for String {
    fn from(value: ReferenceNumber) -> Self {
        value.0
    }
}

/// Outstanding corrections attached to a rejected application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionDetails {
    pub comments: String,
    pub missing_documents: Vec<String>,
    pub is_resolved: bool,
}

impl RejectionDetails {
    /// Comment recorded when a rejection carries none.
    pub const DEFAULT_COMMENT: &'static str = "No comments provided.";

    /// The cleared state: no comments, nothing missing, resolved.
    #[must_use]
    pub const fn resolved() -> Self {
        Self {
            comments: String::new(),
            missing_documents: Vec::new(),
            is_resolved: true,
        }
    }

    /// An open rejection.
    ///
    /// A blank or absent comment is replaced with [`Self::DEFAULT_COMMENT`].
    #[must_use]
    pub fn unresolved(comments: Option<&str>, missing_documents: Vec<String>) -> Self {
        let comments: String = match comments {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => Self::DEFAULT_COMMENT.to_string(),
        };
        Self {
            comments,
            missing_documents,
            is_resolved: false,
        }
    }

    /// Returns true while documents are still outstanding.
    #[must_use]
    pub const fn has_pending_items(&self) -> bool {
        !self.missing_documents.is_empty()
    }
}

impl Default for RejectionDetails {
    fn default() -> Self {
        Self::resolved()
    }
}

/// How an applicant settles fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid in person at the treasury window.
    #[serde(rename = "Walk-In")]
    WalkIn,
    /// Paid electronically; a proof image is mandatory.
    Online,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WalkIn => "Walk-In",
            Self::Online => "Online",
        }
    }

    /// Returns true if a proof-of-payment file must accompany submission.
    #[must_use]
    pub const fn requires_proof(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Walk-In" => Ok(Self::WalkIn),
            "Online" => Ok(Self::Online),
            _ => Err(DomainError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

/// Verification state of a submitted payment.
///
/// Every payment is recorded as `Pending`. `Verified` and `Failed` are part
/// of the stored payment shape, so records carrying them still load, but no
/// workflow step sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Verified,
    Failed,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Failed => "Failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Verified" => Ok(Self::Verified),
            "Failed" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidPaymentStatus(s.to_string())),
        }
    }
}

/// Payment information recorded against an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Transaction reference supplied by the applicant (e.g. e-wallet receipt number).
    pub reference_number: Option<String>,
    /// Public path of the uploaded receipt image.
    pub proof_of_payment_file: Option<String>,
    pub date_submitted: Option<String>,
    pub amount_paid: Option<f64>,
}

/// An uploaded supporting document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub requirement_name: String,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: String,
}

/// A single assessed fee line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeItem {
    /// What the fee is for, e.g. "Filing Fee".
    pub particular: String,
    pub amount: f64,
}

/// Fees assessed by the engineering office.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeSchedule {
    pub fees: Vec<FeeItem>,
    pub total_amount_due: f64,
}

impl FeeSchedule {
    /// Sum of all fee lines.
    #[must_use]
    pub fn computed_total(&self) -> f64 {
        self.fees.iter().map(|fee| fee.amount).sum()
    }
}

/// Assessment sign-off section.
///
/// The notary fields exist only on building applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assessment {
    pub assessed_by: Option<String>,
    pub reviewed_by: Option<String>,
    pub noted_by: Option<String>,
    pub date: Option<String>,
    pub doc_no: Option<String>,
    pub page_no: Option<String>,
    pub book_no: Option<String>,
    pub series_of: Option<String>,
    pub notary_public_date: Option<String>,
}

impl Assessment {
    /// Returns true if any notary field is populated.
    #[must_use]
    pub const fn has_notary_fields(&self) -> bool {
        self.doc_no.is_some()
            || self.page_no.is_some()
            || self.book_no.is_some()
            || self.series_of.is_some()
            || self.notary_public_date.is_some()
    }
}

/// Profile of a registered account.
///
/// Credentials are managed by the upstream identity provider and never
/// stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: ActorRole,
}

impl AccountProfile {
    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
