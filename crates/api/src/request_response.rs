// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire.

use permit_portal::{Application, ApplicationDetails, QueueStats};
use permit_portal_audit::WorkflowEntry;
use permit_portal_domain::{
    Assessment, BuildingForm, Document, FeeSchedule, OccupancyForm, PaymentDetails,
    RejectionDetails,
};
use permit_portal_persistence::AccountData;
use serde::{Deserialize, Serialize};

/// API request to register an applicant account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// API request to create an admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminAccountRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// One of `meoadmin`, `bfpadmin` or `mayoradmin`.
    pub role: String,
}

/// Account information returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub created_at: String,
}

impl From<AccountData> for AccountInfo {
    fn from(account: AccountData) -> Self {
        Self {
            account_id: account.account_id,
            role: String::from(account.profile.role.as_str()),
            username: account.profile.username,
            first_name: account.profile.first_name,
            last_name: account.profile.last_name,
            email: account.profile.email,
            phone_number: account.profile.phone_number,
            created_at: account.created_at,
        }
    }
}

/// API response for a created account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub account: AccountInfo,
    /// A success message.
    pub message: String,
}

/// Pagination parameters for the account list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAccountsRequest {
    /// One-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 10, at most 100.
    pub limit: Option<i64>,
}

/// API response for the account list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountInfo>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

/// API request to submit an occupancy application.
///
/// The form sections sit at the top level next to the identifier of the
/// building permit the occupancy refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOccupancyRequest {
    /// Reference number or record identifier of the building permit.
    pub building_permit_identifier: String,
    #[serde(flatten)]
    pub form: OccupancyForm,
}

/// API response for a submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponse {
    pub application_id: i64,
    pub reference_no: String,
    /// A success message.
    pub message: String,
}

/// One row of an applicant's application list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub application_id: i64,
    /// `Building` or `Occupancy`.
    pub application_type: String,
    pub reference_no: String,
    pub status: String,
    pub created_at: String,
}

impl From<&Application> for ApplicationSummary {
    fn from(application: &Application) -> Self {
        Self {
            application_id: application.application_id.unwrap_or_default(),
            application_type: String::from(application.kind().as_str()),
            reference_no: application.reference_no.as_str().to_string(),
            status: String::from(application.status.as_str()),
            created_at: application.created_at.clone(),
        }
    }
}

/// API response for an applicant's application list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMyApplicationsResponse {
    /// Newest first.
    pub applications: Vec<ApplicationSummary>,
}

/// The type-specific form of an application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApplicationForm {
    Building(BuildingForm),
    Occupancy(OccupancyForm),
}

/// A full application record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_id: i64,
    pub application_type: String,
    pub reference_no: String,
    pub applicant_id: i64,
    /// Resolved only on the admin list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
    /// The parent building application of an occupancy application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_permit_id: Option<i64>,
    pub status: String,
    pub form: ApplicationForm,
    pub assessment: Assessment,
    pub fees: FeeSchedule,
    pub rejection_details: RejectionDetails,
    pub payment_details: Option<PaymentDetails>,
    pub documents: Vec<Document>,
    pub workflow_history: Vec<WorkflowEntry>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationRecord {
    fn from(application: Application) -> Self {
        let application_type: String = String::from(application.kind().as_str());
        let building_permit_id: Option<i64> = application.details.building_permit_id();
        let form: ApplicationForm = match application.details {
            ApplicationDetails::Building { form } => ApplicationForm::Building(form),
            ApplicationDetails::Occupancy { form, .. } => ApplicationForm::Occupancy(form),
        };
        Self {
            application_id: application.application_id.unwrap_or_default(),
            application_type,
            reference_no: application.reference_no.as_str().to_string(),
            applicant_id: application.applicant_id,
            applicant_name: None,
            building_permit_id,
            status: String::from(application.status.as_str()),
            form,
            assessment: application.assessment,
            fees: application.fees,
            rejection_details: application.rejection,
            payment_details: application.payment,
            documents: application.documents,
            workflow_history: application.history.entries().to_vec(),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

/// API response for the admin application list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsResponse {
    /// Newest first, each with the applicant's name.
    pub applications: Vec<ApplicationRecord>,
}

/// Dashboard counters of an admin queue, tagged with the viewing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all_fields = "camelCase")]
pub enum QueueStatsInfo {
    #[serde(rename = "meoadmin")]
    Meo {
        submitted: usize,
        pending: usize,
        approved: usize,
        total: usize,
    },
    #[serde(rename = "bfpadmin")]
    Bfp {
        new_applications: usize,
        cleared: usize,
        returned: usize,
        total: usize,
    },
    #[serde(rename = "mayoradmin")]
    Mayor {
        to_approve: usize,
        endorsed: usize,
        completed: usize,
        total: usize,
    },
}

impl From<QueueStats> for QueueStatsInfo {
    fn from(stats: QueueStats) -> Self {
        match stats {
            QueueStats::Meo {
                submitted,
                pending,
                approved,
                total,
            } => Self::Meo {
                submitted,
                pending,
                approved,
                total,
            },
            QueueStats::Bfp {
                new_applications,
                cleared,
                returned,
                total,
            } => Self::Bfp {
                new_applications,
                cleared,
                returned,
                total,
            },
            QueueStats::Mayor {
                to_approve,
                endorsed,
                completed,
                total,
            } => Self::Mayor {
                to_approve,
                endorsed,
                completed,
                total,
            },
        }
    }
}

/// Query parameters of the admin queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminQueueRequest {
    /// Owner name or reference number fragment.
    pub search: Option<String>,
}

/// API response for an admin queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQueueResponse {
    pub applications: Vec<ApplicationRecord>,
    /// Counted before the search filter.
    pub stats: QueueStatsInfo,
}

/// API request to update an application's status and review sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    pub comments: Option<String>,
    pub missing_documents: Option<Vec<String>>,
    pub assessment: Option<Assessment>,
    pub fees: Option<FeeSchedule>,
}

/// API request to submit a payment.
///
/// Values arrive as multipart text fields and are parsed by the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequest {
    /// `Walk-In` or `Online`.
    pub method: String,
    pub reference_number: Option<String>,
    pub amount_paid: Option<String>,
}

/// API response for any change to an existing application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdateResponse {
    /// A success message.
    pub message: String,
    pub application: ApplicationRecord,
}

/// API response for attached revision documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachDocumentsResponse {
    /// A success message.
    pub message: String,
    /// The documents added by this request.
    pub documents: Vec<Document>,
    pub application: ApplicationRecord,
}
