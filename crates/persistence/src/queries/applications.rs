// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use permit_portal::{Application, BuildingPermitRef};
use permit_portal_domain::{ApplicationKind, ReferenceNumber};
use tracing::debug;

use crate::data_models::{ApplicationRow, DocumentRow, HistoryRow, assemble_applications};
use crate::diesel_schema::{application_documents, applications, workflow_history};
use crate::error::PersistenceError;

/// Which applications to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationFilter<'a> {
    /// A single application by identifier.
    Id(i64),
    /// A single application by upper-cased reference number.
    Reference(&'a str),
    /// Everything one applicant has submitted.
    Applicant(i64),
    /// Every application.
    All,
}

backend_fn! {
/// Loads full applications, including history and documents, newest first.
///
/// # Errors
///
/// Returns an error if a query fails or a stored record cannot be decoded.
pub fn load_applications(
    conn: &mut _,
    filter: ApplicationFilter<'_>,
) -> Result<Vec<Application>, PersistenceError> {
    debug!(?filter, "Loading applications");

    let query = applications::table
        .select(ApplicationRow::as_select())
        .order((applications::created_at.desc(), applications::application_id.desc()))
        .into_boxed();
    let query = match filter {
        ApplicationFilter::Id(id) => query.filter(applications::application_id.eq(id)),
        ApplicationFilter::Reference(reference) => {
            query.filter(applications::reference_no.eq(reference))
        }
        ApplicationFilter::Applicant(id) => query.filter(applications::applicant_id.eq(id)),
        ApplicationFilter::All => query,
    };
    let rows: Vec<ApplicationRow> = query.load(conn)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.application_id).collect();
    let history: Vec<HistoryRow> = workflow_history::table
        .filter(workflow_history::application_id.eq_any(&ids))
        .order(workflow_history::entry_id.asc())
        .select(HistoryRow::as_select())
        .load(conn)?;
    let documents: Vec<DocumentRow> = application_documents::table
        .filter(application_documents::application_id.eq_any(&ids))
        .order(application_documents::document_id.asc())
        .select(DocumentRow::as_select())
        .load(conn)?;

    assemble_applications(rows, history, documents)
}
}

backend_fn! {
/// Finds a building application by identifier.
///
/// Occupancy applications with that identifier are not returned.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_building_by_id(
    conn: &mut _,
    application_id: i64,
) -> Result<Option<BuildingPermitRef>, PersistenceError> {
    let found: Option<(i64, String)> = applications::table
        .filter(applications::application_id.eq(application_id))
        .filter(applications::kind.eq(ApplicationKind::Building.as_str()))
        .select((applications::application_id, applications::reference_no))
        .first(conn)
        .optional()?;

    found.map(into_building_ref).transpose()
}
}

backend_fn! {
/// Finds a building application by exact, upper-cased reference number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_building_by_reference(
    conn: &mut _,
    reference_no: &str,
) -> Result<Option<BuildingPermitRef>, PersistenceError> {
    let found: Option<(i64, String)> = applications::table
        .filter(applications::reference_no.eq(reference_no))
        .filter(applications::kind.eq(ApplicationKind::Building.as_str()))
        .select((applications::application_id, applications::reference_no))
        .first(conn)
        .optional()?;

    found.map(into_building_ref).transpose()
}
}

fn into_building_ref(
    (application_id, reference_no): (i64, String),
) -> Result<BuildingPermitRef, PersistenceError> {
    Ok(BuildingPermitRef {
        application_id,
        reference_no: ReferenceNumber::parse(&reference_no)?,
    })
}
