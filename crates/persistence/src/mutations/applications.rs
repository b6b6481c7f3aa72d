// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use permit_portal::{Application, TransitionResult};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::EncodedApplication;
use crate::diesel_schema::{application_documents, applications, workflow_history};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a newly submitted application with its history and documents.
///
/// # Returns
///
/// The identifier assigned to the application.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the reference number is
/// already taken, or another error if any insert fails. Nothing is written
/// on failure.
pub fn insert_application(
    conn: &mut _,
    application: &Application,
) -> Result<i64, PersistenceError> {
    let encoded: EncodedApplication = EncodedApplication::encode(application)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::insert_into(applications::table)
            .values((
                applications::kind.eq(encoded.kind),
                applications::reference_no.eq(application.reference_no.as_str()),
                applications::applicant_id.eq(application.applicant_id),
                applications::building_permit_id.eq(encoded.building_permit_id),
                applications::status.eq(application.status.as_str()),
                applications::form_json.eq(&encoded.form_json),
                applications::assessment_json.eq(&encoded.assessment_json),
                applications::fees_json.eq(&encoded.fees_json),
                applications::rejection_json.eq(&encoded.rejection_json),
                applications::payment_json.eq(encoded.payment_json.as_deref()),
                applications::created_at.eq(&application.created_at),
                applications::updated_at.eq(&application.updated_at),
            ))
            .execute(conn)?;
        let application_id: i64 = conn.get_last_insert_rowid()?;

        for entry in application.history.entries() {
            diesel::insert_into(workflow_history::table)
                .values((
                    workflow_history::application_id.eq(application_id),
                    workflow_history::status.eq(entry.status.as_str()),
                    workflow_history::comments.eq(&entry.comments),
                    workflow_history::updated_by.eq(entry.updated_by),
                    workflow_history::acting_role.eq(entry.acting_role.as_str()),
                    workflow_history::recorded_at.eq(&entry.timestamp),
                ))
                .execute(conn)?;
        }

        for document in &application.documents {
            diesel::insert_into(application_documents::table)
                .values((
                    application_documents::application_id.eq(application_id),
                    application_documents::requirement_name.eq(&document.requirement_name),
                    application_documents::file_name.eq(&document.file_name),
                    application_documents::file_path.eq(&document.file_path),
                    application_documents::uploaded_at.eq(&document.uploaded_at),
                ))
                .execute(conn)?;
        }

        info!(
            application_id,
            reference_no = application.reference_no.as_str(),
            kind = encoded.kind,
            "Application stored"
        );
        Ok(application_id)
    })
}
}

backend_fn! {
/// Writes the outcome of a transition.
///
/// The mutable columns are rewritten and the appended history entry and
/// documents are inserted, all in one transaction. The form payload and
/// reference number are never touched.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the application does not exist,
/// or another error if any write fails. Nothing is written on failure.
pub fn persist_transition(
    conn: &mut _,
    application_id: i64,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    let encoded: EncodedApplication = EncodedApplication::encode(&result.application)?;
    let updated: &Application = &result.application;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let rows: usize = diesel::update(applications::table)
            .filter(applications::application_id.eq(application_id))
            .set((
                applications::status.eq(updated.status.as_str()),
                applications::assessment_json.eq(&encoded.assessment_json),
                applications::fees_json.eq(&encoded.fees_json),
                applications::rejection_json.eq(&encoded.rejection_json),
                applications::payment_json.eq(encoded.payment_json.as_deref()),
                applications::updated_at.eq(&updated.updated_at),
            ))
            .execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Application {application_id}"
            )));
        }

        if let Some(entry) = &result.appended_entry {
            diesel::insert_into(workflow_history::table)
                .values((
                    workflow_history::application_id.eq(application_id),
                    workflow_history::status.eq(entry.status.as_str()),
                    workflow_history::comments.eq(&entry.comments),
                    workflow_history::updated_by.eq(entry.updated_by),
                    workflow_history::acting_role.eq(entry.acting_role.as_str()),
                    workflow_history::recorded_at.eq(&entry.timestamp),
                ))
                .execute(conn)?;
        }

        for document in &result.attached_documents {
            diesel::insert_into(application_documents::table)
                .values((
                    application_documents::application_id.eq(application_id),
                    application_documents::requirement_name.eq(&document.requirement_name),
                    application_documents::file_name.eq(&document.file_name),
                    application_documents::file_path.eq(&document.file_path),
                    application_documents::uploaded_at.eq(&document.uploaded_at),
                ))
                .execute(conn)?;
        }

        info!(
            application_id,
            status = updated.status.as_str(),
            documents = result.attached_documents.len(),
            "Transition stored"
        );
        Ok(())
    })
}
}
