// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use permit_portal_domain::{Assessment, FeeSchedule, PaymentMethod};

/// An uploaded file that has already been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name the file was uploaded with.
    pub file_name: String,
    /// Public path the file is served from.
    pub file_path: String,
}

/// A command represents applicant or admin intent as data only.
///
/// Commands are the only way to change an existing application.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Admin review action.
    UpdateStatus {
        /// Requested status, validated against the vocabulary when applied.
        status: Option<String>,
        comments: Option<String>,
        missing_documents: Option<Vec<String>>,
        /// Replaces the assessment section wholesale.
        assessment: Option<Assessment>,
        /// Replaces the fee section wholesale.
        fees: Option<FeeSchedule>,
    },
    /// Applicant chooses a payment method, optionally with a proof file.
    SubmitPayment {
        method: PaymentMethod,
        reference_number: Option<String>,
        amount_paid: Option<f64>,
        proof: Option<StoredFile>,
    },
    /// Applicant uploads a receipt against the already chosen method.
    UploadPaymentProof { proof: StoredFile },
    /// Applicant supplies revised documents after a rejection.
    AttachRevisionDocuments { documents: Vec<StoredFile> },
}

impl Command {
    /// Name used in logs and authorization errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateStatus { .. } => "UpdateStatus",
            Self::SubmitPayment { .. } => "SubmitPayment",
            Self::UploadPaymentProof { .. } => "UploadPaymentProof",
            Self::AttachRevisionDocuments { .. } => "AttachRevisionDocuments",
        }
    }
}
