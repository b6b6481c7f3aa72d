// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use permit_portal::StoredFile;
use permit_portal_domain::{BuildingForm, OccupancyForm};
use permit_portal_persistence::Persistence;
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    AuthenticatedActor, AuthenticationService, CreateAdminAccountRequest, RegisterAccountRequest,
    SubmitOccupancyRequest, UpdateStatusRequest, create_admin_account, create_first_admin,
    register_account, submit_building_application, update_application_status,
};

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 08:00:00 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2026-03-02 09:30:00 UTC)
}

pub fn create_test_registration(username: &str) -> RegisterAccountRequest {
    RegisterAccountRequest {
        username: username.to_string(),
        first_name: String::from("Juan"),
        last_name: String::from("Dela Cruz"),
        email: format!("{username}@example.gov.ph"),
        phone_number: String::from("0917 555 0100"),
    }
}

pub fn authenticate(persistence: &mut Persistence, account_id: i64) -> AuthenticatedActor {
    AuthenticationService::authenticate(persistence, account_id).unwrap()
}

pub fn create_test_applicant(persistence: &mut Persistence, username: &str) -> AuthenticatedActor {
    let response = register_account(persistence, create_test_registration(username), now()).unwrap();
    authenticate(persistence, response.account.account_id)
}

/// A database with one admin per office and one applicant.
pub struct TestPortal {
    pub persistence: Persistence,
    pub meo: AuthenticatedActor,
    pub bfp: AuthenticatedActor,
    pub mayor: AuthenticatedActor,
    pub applicant: AuthenticatedActor,
}

pub fn create_test_portal() -> TestPortal {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let first = create_first_admin(&mut persistence, create_test_registration("meo"), now()).unwrap();
    let meo: AuthenticatedActor = authenticate(&mut persistence, first.account.account_id);

    let mut admin = |username: &str, role: &str| -> AuthenticatedActor {
        let registration: RegisterAccountRequest = create_test_registration(username);
        let response = create_admin_account(
            &mut persistence,
            &meo,
            CreateAdminAccountRequest {
                username: registration.username,
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                phone_number: registration.phone_number,
                role: role.to_string(),
            },
            now(),
        )
        .unwrap();
        AuthenticationService::authenticate(&mut persistence, response.account.account_id).unwrap()
    };
    let bfp: AuthenticatedActor = admin("bfp", "bfpadmin");
    let mayor: AuthenticatedActor = admin("mayor", "mayoradmin");

    let applicant: AuthenticatedActor = create_test_applicant(&mut persistence, "juan");

    TestPortal {
        persistence,
        meo,
        bfp,
        mayor,
        applicant,
    }
}

pub fn create_test_building_form() -> BuildingForm {
    serde_json::from_value(json!({
        "box1": {
            "owner": { "lastName": "Dela Cruz", "firstName": "Juan" },
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
        "box2": { "name": "Engr. Maria Santos", "prcNo": 112_233, "ptrNo": "PTR-9981" },
        "box3": { "name": "Juan Dela Cruz" },
        "box4": {}
    }))
    .expect("valid building form")
}

pub fn create_test_occupancy_request(identifier: &str) -> SubmitOccupancyRequest {
    serde_json::from_value(json!({
        "buildingPermitIdentifier": identifier,
        "permitInfo": {
            "buildingPermitNo": identifier,
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
    .expect("valid occupancy request")
}

/// Submits a building application as the portal's applicant.
pub fn submit_test_building(portal: &mut TestPortal) -> i64 {
    submit_building_application(
        &mut portal.persistence,
        &portal.applicant,
        create_test_building_form(),
        now(),
    )
    .unwrap()
    .application_id
}

pub fn status_request(status: &str) -> UpdateStatusRequest {
    UpdateStatusRequest {
        status: Some(status.to_string()),
        ..UpdateStatusRequest::default()
    }
}

/// Moves an application through a sequence of admin status changes.
pub fn advance(
    portal: &mut TestPortal,
    application_id: i64,
    steps: &[(fn(&TestPortal) -> AuthenticatedActor, &str)],
) {
    for (who, status) in steps {
        let actor: AuthenticatedActor = who(portal);
        update_application_status(
            &mut portal.persistence,
            &actor,
            application_id,
            status_request(status),
            later(),
        )
        .unwrap();
    }
}

pub fn meo(portal: &TestPortal) -> AuthenticatedActor {
    portal.meo.clone()
}

pub fn bfp(portal: &TestPortal) -> AuthenticatedActor {
    portal.bfp.clone()
}

pub fn mayor(portal: &TestPortal) -> AuthenticatedActor {
    portal.mayor.clone()
}

pub fn stored_file(directory: &str, name: &str) -> StoredFile {
    StoredFile {
        file_name: name.to_string(),
        file_path: format!("/uploads/{directory}/1772443800000-42-{name}"),
    }
}
