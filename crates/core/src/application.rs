// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use permit_portal_audit::{WorkflowEntry, WorkflowHistory};
use permit_portal_domain::{
    ApplicationKind, ApplicationStatus, Assessment, BuildingForm, Document, FeeSchedule,
    OccupancyForm, PaymentDetails, ReferenceNumber, RejectionDetails,
};

/// The variant-specific part of an application.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationDetails {
    /// A building permit application.
    Building {
        /// Boxes one through four.
        form: BuildingForm,
    },
    /// An occupancy permit application.
    Occupancy {
        /// The parent building application. Fixed at creation.
        building_permit_id: i64,
        /// The occupancy form sections.
        form: OccupancyForm,
    },
}

impl ApplicationDetails {
    #[must_use]
    pub const fn kind(&self) -> ApplicationKind {
        match self {
            Self::Building { .. } => ApplicationKind::Building,
            Self::Occupancy { .. } => ApplicationKind::Occupancy,
        }
    }

    /// The owner name shown in admin lists and matched by search.
    #[must_use]
    pub fn owner_name(&self) -> String {
        match self {
            Self::Building { form } => form.owner_name(),
            Self::Occupancy { form, .. } => form.owner_name(),
        }
    }

    /// The parent building application, for occupancy records.
    #[must_use]
    pub const fn building_permit_id(&self) -> Option<i64> {
        match self {
            Self::Building { .. } => None,
            Self::Occupancy {
                building_permit_id, ..
            } => Some(*building_permit_id),
        }
    }
}

/// A permit application record.
///
/// Lifecycle fields are shared by both variants; the form payload lives in
/// [`ApplicationDetails`]. The assessment and fee sections are the only
/// parts admins may rewrite after submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    /// Database identifier; `None` until first persisted.
    pub application_id: Option<i64>,
    pub reference_no: ReferenceNumber,
    pub applicant_id: i64,
    pub status: ApplicationStatus,
    pub details: ApplicationDetails,
    /// Box 5 for building applications, assessment details for occupancy.
    pub assessment: Assessment,
    /// Box 6 for building applications, fee details for occupancy.
    pub fees: FeeSchedule,
    pub rejection: RejectionDetails,
    pub payment: Option<PaymentDetails>,
    pub documents: Vec<Document>,
    pub history: WorkflowHistory,
    pub created_at: String,
    pub updated_at: String,
}

impl Application {
    #[must_use]
    pub const fn kind(&self) -> ApplicationKind {
        self.details.kind()
    }
}

/// Applicant input for a new application, before any lifecycle metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationDraft {
    Building(BuildingForm),
    Occupancy {
        /// Identifier of the resolved parent building application.
        building_permit_id: i64,
        form: OccupancyForm,
    },
}

/// The result of a successful transition.
///
/// Carries the full updated record plus exactly what was appended, so the
/// persistence layer can write the change as one atomic unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The record after the transition.
    pub application: Application,
    /// The history entry appended, if the command changed status.
    pub appended_entry: Option<WorkflowEntry>,
    /// Documents appended by the command.
    pub attached_documents: Vec<Document>,
}
