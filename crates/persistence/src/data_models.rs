// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Form payloads, assessments, fee schedules, rejection details and payment
//! details are stored as JSON text. Workflow history and documents have
//! their own tables so they can only ever be appended to.

use diesel::prelude::*;
use permit_portal::{Application, ApplicationDetails};
use permit_portal_audit::{WorkflowEntry, WorkflowHistory};
use permit_portal_domain::{
    AccountProfile, ActorRole, ApplicationKind, ApplicationStatus, Document, ReferenceNumber,
};
use std::collections::HashMap;

use crate::diesel_schema::{accounts, application_documents, applications, workflow_history};
use crate::error::PersistenceError;

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub account_id: i64,
    pub profile: AccountProfile,
    pub created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
pub(crate) struct AccountRow {
    pub account_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub created_at: String,
}

impl TryFrom<AccountRow> for AccountData {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: row.account_id,
            profile: AccountProfile {
                username: row.username,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                phone_number: row.phone_number,
                role: row.role.parse::<ActorRole>()?,
            },
            created_at: row.created_at,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = applications)]
pub(crate) struct ApplicationRow {
    pub application_id: i64,
    pub kind: String,
    pub reference_no: String,
    pub applicant_id: i64,
    pub building_permit_id: Option<i64>,
    pub status: String,
    pub form_json: String,
    pub assessment_json: String,
    pub fees_json: String,
    pub rejection_json: String,
    pub payment_json: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = workflow_history)]
pub(crate) struct HistoryRow {
    pub application_id: i64,
    pub status: String,
    pub comments: String,
    pub updated_by: i64,
    pub acting_role: String,
    pub recorded_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = application_documents)]
pub(crate) struct DocumentRow {
    pub application_id: i64,
    pub requirement_name: String,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: String,
}

/// The JSON columns of an application, ready to write.
pub(crate) struct EncodedApplication {
    pub kind: &'static str,
    pub building_permit_id: Option<i64>,
    pub form_json: String,
    pub assessment_json: String,
    pub fees_json: String,
    pub rejection_json: String,
    pub payment_json: Option<String>,
}

impl EncodedApplication {
    pub fn encode(application: &Application) -> Result<Self, PersistenceError> {
        let form_json: String = match &application.details {
            ApplicationDetails::Building { form } => serde_json::to_string(form)?,
            ApplicationDetails::Occupancy { form, .. } => serde_json::to_string(form)?,
        };
        Ok(Self {
            kind: application.kind().as_str(),
            building_permit_id: application.details.building_permit_id(),
            form_json,
            assessment_json: serde_json::to_string(&application.assessment)?,
            fees_json: serde_json::to_string(&application.fees)?,
            rejection_json: serde_json::to_string(&application.rejection)?,
            payment_json: application
                .payment
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        })
    }
}

impl TryFrom<HistoryRow> for WorkflowEntry {
    type Error = PersistenceError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.status.parse::<ApplicationStatus>()?,
            comments: row.comments,
            updated_by: row.updated_by,
            acting_role: row.acting_role.parse::<ActorRole>()?,
            timestamp: row.recorded_at,
        })
    }
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            requirement_name: row.requirement_name,
            file_name: row.file_name,
            file_path: row.file_path,
            uploaded_at: row.uploaded_at,
        }
    }
}

/// Rebuilds full applications from their rows.
///
/// `history` and `documents` must be ordered oldest first; they are grouped
/// by application and keep that order. The order of `rows` is preserved.
pub(crate) fn assemble_applications(
    rows: Vec<ApplicationRow>,
    history: Vec<HistoryRow>,
    documents: Vec<DocumentRow>,
) -> Result<Vec<Application>, PersistenceError> {
    let mut history_by_id: HashMap<i64, Vec<WorkflowEntry>> = HashMap::new();
    for row in history {
        let application_id: i64 = row.application_id;
        history_by_id
            .entry(application_id)
            .or_default()
            .push(WorkflowEntry::try_from(row)?);
    }

    let mut documents_by_id: HashMap<i64, Vec<Document>> = HashMap::new();
    for row in documents {
        documents_by_id
            .entry(row.application_id)
            .or_default()
            .push(Document::from(row));
    }

    rows.into_iter()
        .map(|row| {
            let entries: Vec<WorkflowEntry> = history_by_id
                .remove(&row.application_id)
                .unwrap_or_default();
            let docs: Vec<Document> = documents_by_id
                .remove(&row.application_id)
                .unwrap_or_default();
            decode_application(row, entries, docs)
        })
        .collect()
}

fn decode_application(
    row: ApplicationRow,
    entries: Vec<WorkflowEntry>,
    documents: Vec<Document>,
) -> Result<Application, PersistenceError> {
    let kind: ApplicationKind = row.kind.parse::<ApplicationKind>()?;
    let details: ApplicationDetails = match (kind, row.building_permit_id) {
        (ApplicationKind::Building, _) => ApplicationDetails::Building {
            form: serde_json::from_str(&row.form_json)?,
        },
        (ApplicationKind::Occupancy, Some(building_permit_id)) => ApplicationDetails::Occupancy {
            building_permit_id,
            form: serde_json::from_str(&row.form_json)?,
        },
        (ApplicationKind::Occupancy, None) => {
            return Err(PersistenceError::CorruptRecord(format!(
                "Occupancy application {} has no building permit",
                row.application_id
            )));
        }
    };

    Ok(Application {
        application_id: Some(row.application_id),
        reference_no: ReferenceNumber::parse(&row.reference_no)?,
        applicant_id: row.applicant_id,
        status: row.status.parse::<ApplicationStatus>()?,
        details,
        assessment: serde_json::from_str(&row.assessment_json)?,
        fees: serde_json::from_str(&row.fees_json)?,
        rejection: serde_json::from_str(&row.rejection_json)?,
        payment: row
            .payment_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        documents,
        history: WorkflowHistory::from_entries(entries)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
