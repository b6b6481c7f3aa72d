// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use permit_portal::{Application, ApplicationDraft, submit_application};
use permit_portal_audit::Actor;
use permit_portal_domain::{AccountProfile, ActorRole, BuildingForm, OccupancyForm};
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;

pub const CREATED_AT: &str = "2026-03-01T08:00:00.000Z";

pub fn create_test_profile(username: &str, role: ActorRole) -> AccountProfile {
    AccountProfile {
        username: username.to_string(),
        first_name: String::from("Test"),
        last_name: String::from("Account"),
        email: format!("{username}@example.gov.ph"),
        phone_number: String::from("+63 917 555 0100"),
        role,
    }
}

/// Creates an account and returns it as an actor.
pub fn create_test_actor(persistence: &mut Persistence, username: &str, role: ActorRole) -> Actor {
    let account_id: i64 = persistence
        .create_account(&create_test_profile(username, role), CREATED_AT)
        .unwrap();
    Actor::new(account_id, role)
}

pub fn create_test_building_form(last_name: &str) -> BuildingForm {
    serde_json::from_value(json!({
        "box1": {
            "owner": { "lastName": last_name, "firstName": "Juan" },
            "location": {
                "lotNo": "12",
                "tctNo": 558_812,
                "taxDecNo": "TD-2291",
                "street": "Rizal St.",
                "barangay": "Poblacion",
                "city": "San Isidro"
            },
            "occupancy": { "group": "Group A" },
            "projectDetails": { "totalEstimatedCost": 2_500_000.0 }
        },
        "box2": { "name": "Engr. Maria Santos", "prcNo": "112233", "ptrNo": "PTR-9981" },
        "box3": { "name": "Juan Dela Cruz" },
        "box4": {}
    }))
    .expect("valid building form")
}

pub fn create_test_occupancy_form() -> OccupancyForm {
    serde_json::from_value(json!({
        "permitInfo": {
            "buildingPermitNo": "B-1772352000000",
            "buildingPermitDate": "2025-06-01",
            "fsecNo": "FSEC-0042",
            "fsecDate": "2025-06-10"
        },
        "ownerDetails": { "lastName": "Reyes", "givenName": "Ana" },
        "projectDetails": {
            "projectName": "Reyes Residence",
            "projectLocation": "Mabini St.",
            "occupancyUse": "Residential",
            "noStoreys": 2,
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

pub fn submitted_at() -> OffsetDateTime {
    datetime!(2026-03-01 08:00:00 UTC)
}

/// Submits and stores a building application, returning the stored record.
pub fn store_building(
    persistence: &mut Persistence,
    applicant: Actor,
    at: OffsetDateTime,
) -> Application {
    let application: Application = submit_application(
        ApplicationDraft::Building(create_test_building_form("Dela Cruz")),
        applicant,
        at,
    )
    .unwrap();
    let application_id: i64 = persistence.insert_application(&application).unwrap();
    persistence.get_application(application_id).unwrap().unwrap()
}

pub fn later() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

/// Submits and stores an occupancy application for `building_permit_id`.
pub fn store_occupancy(
    persistence: &mut Persistence,
    applicant: Actor,
    building_permit_id: i64,
    at: OffsetDateTime,
) -> Application {
    let application: Application = submit_application(
        ApplicationDraft::Occupancy {
            building_permit_id,
            form: create_test_occupancy_form(),
        },
        applicant,
        at,
    )
    .unwrap();
    let application_id: i64 = persistence.insert_application(&application).unwrap();
    persistence.get_application(application_id).unwrap().unwrap()
}
