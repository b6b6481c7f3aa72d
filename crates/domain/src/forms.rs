// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applicant-supplied form payloads.
//!
//! Every field is optional at the deserialization layer so that an absent
//! required field is reported as `DomainError::MissingField` with its full
//! path rather than as an opaque decoding error. Forms are immutable once
//! submitted; only the admin assessment and fee sections change afterwards.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;
use crate::validation::{require_number, require_text, validate_optional_date, validate_optional_number};

/// Building permit form, sections one through four.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingForm {
    pub box1: Option<OwnerAndProject>,
    pub box2: Option<DesignProfessional>,
    pub box3: Option<ApplicantSignature>,
    pub box4: Option<LotOwnerConsent>,
}

/// Box 1: owner, enterprise, location, scope and project statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerAndProject {
    pub owner: PersonName,
    pub enterprise: Enterprise,
    pub location: Location,
    pub scope_of_work: Vec<String>,
    pub occupancy: OccupancyClassification,
    pub project_details: BuildingProjectDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonName {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enterprise {
    pub form_of_ownership: Option<String>,
    pub project_title: Option<String>,
    pub address: PostalAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostalAddress {
    #[serde(deserialize_with = "text_or_number")]
    pub no: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub zip: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tel_no: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub lot_no: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub blk_no: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tct_no: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tax_dec_no: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccupancyClassification {
    pub group: Option<String>,
    pub classified: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingProjectDetails {
    pub number_of_units: Option<u32>,
    pub total_estimated_cost: Option<f64>,
    pub total_floor_area: Option<f64>,
    pub lot_area: Option<f64>,
    pub proposed_construction: Option<String>,
    pub expected_completion: Option<String>,
}

/// Box 2: the architect or civil engineer of record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignProfessional {
    pub name: Option<String>,
    pub date: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub prc_no: Option<String>,
    pub validity: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub ptr_no: Option<String>,
    pub ptr_date: Option<String>,
    pub issued_at: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tin: Option<String>,
}

/// Box 3: applicant signature block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantSignature {
    pub name: Option<String>,
    pub date: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub ctc_no: Option<String>,
    pub date_issued: Option<String>,
    pub place_issued: Option<String>,
}

/// Box 4: consent of the lot owner, when different from the applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LotOwnerConsent {
    pub name: Option<String>,
    pub date: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tct_no: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tax_dec_no: Option<String>,
    pub place_issued: Option<String>,
}

impl BuildingForm {
    /// Validates required sections and fields.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field found, in form order.
    pub fn validate(&self) -> Result<(), DomainError> {
        let box1: &OwnerAndProject = self.box1.as_ref().ok_or_else(|| missing("box1"))?;
        let box2: &DesignProfessional = self.box2.as_ref().ok_or_else(|| missing("box2"))?;
        let box3: &ApplicantSignature = self.box3.as_ref().ok_or_else(|| missing("box3"))?;
        let box4: &LotOwnerConsent = self.box4.as_ref().ok_or_else(|| missing("box4"))?;

        require_text("box1.owner.lastName", box1.owner.last_name.as_deref())?;
        require_text("box1.owner.firstName", box1.owner.first_name.as_deref())?;
        require_text("box1.location.lotNo", box1.location.lot_no.as_deref())?;
        require_text("box1.location.tctNo", box1.location.tct_no.as_deref())?;
        require_text("box1.location.taxDecNo", box1.location.tax_dec_no.as_deref())?;
        require_text("box1.location.street", box1.location.street.as_deref())?;
        require_text("box1.location.barangay", box1.location.barangay.as_deref())?;
        require_text("box1.location.city", box1.location.city.as_deref())?;
        require_text("box1.occupancy.group", box1.occupancy.group.as_deref())?;

        let details: &BuildingProjectDetails = &box1.project_details;
        require_number(
            "box1.projectDetails.totalEstimatedCost",
            details.total_estimated_cost,
        )?;
        validate_optional_number("box1.projectDetails.totalFloorArea", details.total_floor_area)?;
        validate_optional_number("box1.projectDetails.lotArea", details.lot_area)?;
        validate_optional_date(
            "box1.projectDetails.proposedConstruction",
            details.proposed_construction.as_deref(),
        )?;
        validate_optional_date(
            "box1.projectDetails.expectedCompletion",
            details.expected_completion.as_deref(),
        )?;

        require_text("box2.name", box2.name.as_deref())?;
        require_text("box2.prcNo", box2.prc_no.as_deref())?;
        require_text("box2.ptrNo", box2.ptr_no.as_deref())?;
        validate_optional_date("box2.date", box2.date.as_deref())?;
        validate_optional_date("box2.validity", box2.validity.as_deref())?;
        validate_optional_date("box2.ptrDate", box2.ptr_date.as_deref())?;

        require_text("box3.name", box3.name.as_deref())?;
        validate_optional_date("box3.date", box3.date.as_deref())?;
        validate_optional_date("box3.dateIssued", box3.date_issued.as_deref())?;

        validate_optional_date("box4.date", box4.date.as_deref())?;

        Ok(())
    }

    /// Owner name as "First Last", used by admin search.
    #[must_use]
    pub fn owner_name(&self) -> String {
        self.box1.as_ref().map_or_else(String::new, |box1| {
            join_name(
                box1.owner.first_name.as_deref(),
                box1.owner.last_name.as_deref(),
            )
        })
    }
}

/// Occupancy permit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccupancyForm {
    pub permit_info: Option<PermitInfo>,
    pub owner_details: OccupancyOwner,
    pub requirements_submitted: Vec<String>,
    pub other_docs: Option<String>,
    pub project_details: Option<OccupancyProjectDetails>,
    pub signatures: Option<Signatures>,
}

/// Section 1: the building permit and fire-safety certificate being closed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermitInfo {
    pub building_permit_no: Option<String>,
    pub building_permit_date: Option<String>,
    pub fsec_no: Option<String>,
    pub fsec_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccupancyOwner {
    pub last_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_initial: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub zip: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub tel_no: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccupancyProjectDetails {
    pub project_name: Option<String>,
    pub project_location: Option<String>,
    pub occupancy_use: Option<String>,
    pub no_storeys: Option<u32>,
    pub no_units: Option<u32>,
    pub total_floor_area: Option<f64>,
    pub date_completion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Signatures {
    pub owner_name: Option<String>,
    pub inspector_name: Option<String>,
    pub engineer_name: Option<String>,
}

impl OccupancyForm {
    /// Validates required sections and fields.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field found, in form order.
    pub fn validate(&self) -> Result<(), DomainError> {
        let permit: &PermitInfo = self
            .permit_info
            .as_ref()
            .ok_or_else(|| missing("permitInfo"))?;
        let project: &OccupancyProjectDetails = self
            .project_details
            .as_ref()
            .ok_or_else(|| missing("projectDetails"))?;
        let signatures: &Signatures = self
            .signatures
            .as_ref()
            .ok_or_else(|| missing("signatures"))?;

        require_text(
            "permitInfo.buildingPermitNo",
            permit.building_permit_no.as_deref(),
        )?;
        require_text(
            "permitInfo.buildingPermitDate",
            permit.building_permit_date.as_deref(),
        )?;
        validate_optional_date(
            "permitInfo.buildingPermitDate",
            permit.building_permit_date.as_deref(),
        )?;
        require_text("permitInfo.fsecNo", permit.fsec_no.as_deref())?;
        require_text("permitInfo.fsecDate", permit.fsec_date.as_deref())?;
        validate_optional_date("permitInfo.fsecDate", permit.fsec_date.as_deref())?;

        require_text("projectDetails.projectName", project.project_name.as_deref())?;
        require_text(
            "projectDetails.projectLocation",
            project.project_location.as_deref(),
        )?;
        require_text("projectDetails.occupancyUse", project.occupancy_use.as_deref())?;
        if project.no_storeys.is_none() {
            return Err(missing("projectDetails.noStoreys"));
        }
        validate_optional_number("projectDetails.totalFloorArea", project.total_floor_area)?;
        require_text(
            "projectDetails.dateCompletion",
            project.date_completion.as_deref(),
        )?;
        validate_optional_date(
            "projectDetails.dateCompletion",
            project.date_completion.as_deref(),
        )?;

        require_text("signatures.ownerName", signatures.owner_name.as_deref())?;
        require_text(
            "signatures.inspectorName",
            signatures.inspector_name.as_deref(),
        )?;
        require_text(
            "signatures.engineerName",
            signatures.engineer_name.as_deref(),
        )?;

        Ok(())
    }

    /// Owner name as "Given Last", falling back to the signature block.
    #[must_use]
    pub fn owner_name(&self) -> String {
        let name: String = join_name(
            self.owner_details.given_name.as_deref(),
            self.owner_details.last_name.as_deref(),
        );
        if name.is_empty() {
            self.signatures
                .as_ref()
                .and_then(|s| s.owner_name.clone())
                .unwrap_or_default()
        } else {
            name
        }
    }
}

/// Identifier-like fields (TCT, PRC, ZIP, ...) arrive as JSON numbers from
/// some clients and as strings from others.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Float(n) => n.to_string(),
    }))
}

fn missing(field: &str) -> DomainError {
    DomainError::MissingField {
        field: field.to_string(),
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}
