// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Application, ApplicationDraft, Command, StoredFile, submit_application};
use permit_portal_audit::Actor;
use permit_portal_domain::{ActorRole, ApplicationStatus, BuildingForm, OccupancyForm};
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;

pub const APPLICANT_ID: i64 = 7;

pub fn applicant() -> Actor {
    Actor::new(APPLICANT_ID, ActorRole::Applicant)
}

pub fn other_applicant() -> Actor {
    Actor::new(8, ActorRole::Applicant)
}

pub fn meo() -> Actor {
    Actor::new(1, ActorRole::MeoAdmin)
}

pub fn bfp() -> Actor {
    Actor::new(2, ActorRole::BfpAdmin)
}

pub fn mayor() -> Actor {
    Actor::new(3, ActorRole::MayorAdmin)
}

pub fn submitted_at() -> OffsetDateTime {
    datetime!(2026-03-01 08:00:00 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

pub fn create_test_building_form() -> BuildingForm {
    serde_json::from_value(json!({
        "box1": {
            "owner": { "lastName": "Dela Cruz", "firstName": "Juan", "middleInitial": "P" },
            "enterprise": { "formOfOwnership": "Individual", "projectTitle": "Two-storey residence" },
            "location": {
                "lotNo": "12",
                "blkNo": 4,
                "tctNo": 558_812,
                "taxDecNo": "TD-2291",
                "street": "Rizal St.",
                "barangay": "Poblacion",
                "city": "San Isidro"
            },
            "scopeOfWork": ["New Construction"],
            "occupancy": { "group": "Group A", "classified": "Residential" },
            "projectDetails": {
                "numberOfUnits": 1,
                "totalEstimatedCost": 2_500_000.0,
                "totalFloorArea": 180.5,
                "lotArea": 240.0,
                "proposedConstruction": "2026-04-01",
                "expectedCompletion": "2027-01-15"
            }
        },
        "box2": { "name": "Engr. Maria Santos", "prcNo": 112_233, "ptrNo": "PTR-9981" },
        "box3": { "name": "Juan Dela Cruz", "date": "2026-03-01" },
        "box4": { "name": "Juan Dela Cruz" }
    }))
    .expect("valid building form")
}

pub fn create_test_occupancy_form() -> OccupancyForm {
    serde_json::from_value(json!({
        "permitInfo": {
            "buildingPermitNo": "B-1700000000123",
            "buildingPermitDate": "2025-06-01",
            "fsecNo": "FSEC-0042",
            "fsecDate": "2025-06-10"
        },
        "ownerDetails": { "lastName": "Reyes", "givenName": "Ana", "zip": 4001 },
        "requirementsSubmitted": ["As-built plans"],
        "projectDetails": {
            "projectName": "Reyes Residence",
            "projectLocation": "Mabini St., Poblacion",
            "occupancyUse": "Residential",
            "noStoreys": 2,
            "noUnits": 1,
            "totalFloorArea": 150.0,
            "dateCompletion": "2026-02-20"
        },
        "signatures": {
            "ownerName": "Ana Reyes",
            "inspectorName": "Insp. Cruz",
            "engineerName": "Engr. Lim"
        }
    }))
    .expect("valid occupancy form")
}

pub fn create_building_application() -> Application {
    let mut application: Application = submit_application(
        ApplicationDraft::Building(create_test_building_form()),
        applicant(),
        submitted_at(),
    )
    .unwrap();
    application.application_id = Some(1);
    application
}

pub fn create_occupancy_application() -> Application {
    let mut application: Application = submit_application(
        ApplicationDraft::Occupancy {
            building_permit_id: 1,
            form: create_test_occupancy_form(),
        },
        applicant(),
        submitted_at(),
    )
    .unwrap();
    application.application_id = Some(2);
    application
}

pub fn status_command(status: &str) -> Command {
    Command::UpdateStatus {
        status: Some(status.to_string()),
        comments: None,
        missing_documents: None,
        assessment: None,
        fees: None,
    }
}

pub fn stored_file(name: &str) -> StoredFile {
    StoredFile {
        file_name: name.to_string(),
        file_path: format!("/uploads/payments/1772352000000-42-{name}"),
    }
}

/// Drives an application through a sequence of admin status changes.
pub fn advance(
    mut application: Application,
    steps: &[(Actor, ApplicationStatus)],
) -> Application {
    for (actor, status) in steps {
        application = crate::apply(&application, status_command(status.as_str()), *actor, later())
            .unwrap()
            .application;
    }
    application
}
