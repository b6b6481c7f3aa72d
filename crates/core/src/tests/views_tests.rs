// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    advance, bfp, create_building_application, create_occupancy_application, mayor, meo,
};
use crate::{AdminQueue, Application, CoreError, QueueStats, admin_queue, in_queue};
use permit_portal_audit::{Actor, WorkflowEntry};
use permit_portal_domain::{ActorRole, ApplicationStatus};

fn with_id(mut application: Application, id: i64, created_at: &str) -> Application {
    application.application_id = Some(id);
    application.created_at = created_at.to_string();
    application
}

/// One record at each interesting point of the workflow.
fn sample_records() -> Vec<Application> {
    let fresh: Application = with_id(
        create_building_application(),
        1,
        "2026-03-01T08:00:00.000Z",
    );
    let at_bfp: Application = with_id(
        advance(
            create_building_application(),
            &[
                (meo(), ApplicationStatus::PendingMeo),
                (meo(), ApplicationStatus::PendingBfp),
            ],
        ),
        2,
        "2026-03-02T08:00:00.000Z",
    );
    let at_mayor: Application = with_id(
        advance(
            create_occupancy_application(),
            &[
                (meo(), ApplicationStatus::PendingMeo),
                (meo(), ApplicationStatus::PendingBfp),
                (bfp(), ApplicationStatus::PendingMayor),
            ],
        ),
        3,
        "2026-03-03T08:00:00.000Z",
    );
    let issued: Application = with_id(
        advance(
            create_building_application(),
            &[
                (meo(), ApplicationStatus::PendingMeo),
                (meo(), ApplicationStatus::PendingBfp),
                (bfp(), ApplicationStatus::PendingMayor),
                (mayor(), ApplicationStatus::Approved),
                (meo(), ApplicationStatus::PermitIssued),
            ],
        ),
        4,
        "2026-03-04T08:00:00.000Z",
    );
    let sent_back: Application = with_id(
        advance(
            create_building_application(),
            &[
                (meo(), ApplicationStatus::PendingMeo),
                (meo(), ApplicationStatus::PendingBfp),
                (bfp(), ApplicationStatus::PendingMayor),
                (mayor(), ApplicationStatus::PendingMeo),
            ],
        ),
        5,
        "2026-03-05T08:00:00.000Z",
    );
    vec![fresh, at_bfp, at_mayor, issued, sent_back]
}

fn ids(queue: &AdminQueue) -> Vec<i64> {
    queue
        .applications
        .iter()
        .filter_map(|a| a.application_id)
        .collect()
}

#[test]
fn test_meo_sees_everything_newest_first() {
    let queue: AdminQueue = admin_queue(ActorRole::MeoAdmin, sample_records(), None).unwrap();

    assert_eq!(ids(&queue), vec![5, 4, 3, 2, 1]);
    assert_eq!(
        queue.stats,
        QueueStats::Meo {
            submitted: 1,
            pending: 3,
            approved: 1,
            total: 5
        }
    );
}

#[test]
fn test_bfp_queue_uses_status_and_acting_role() {
    let queue: AdminQueue = admin_queue(ActorRole::BfpAdmin, sample_records(), None).unwrap();

    assert_eq!(ids(&queue), vec![5, 4, 3, 2]);
    assert_eq!(
        queue.stats,
        QueueStats::Bfp {
            new_applications: 1,
            cleared: 2,
            returned: 0,
            total: 4
        }
    );
}

#[test]
fn test_mayor_queue_keeps_records_the_mayor_acted_on() {
    let queue: AdminQueue = admin_queue(ActorRole::MayorAdmin, sample_records(), None).unwrap();

    assert_eq!(ids(&queue), vec![5, 4, 3]);
    assert_eq!(
        queue.stats,
        QueueStats::Mayor {
            to_approve: 1,
            endorsed: 1,
            completed: 1,
            total: 3
        }
    );
}

#[test]
fn test_comment_text_does_not_route_records() {
    let mut application: Application = create_building_application();
    application.history.append(WorkflowEntry::new(
        ApplicationStatus::PendingMeo,
        String::from("forwarding note for bfp and the mayor"),
        Actor::new(1, ActorRole::MeoAdmin),
        String::from("2026-03-02T08:00:00.000Z"),
    ));
    application.status = ApplicationStatus::PendingMeo;

    assert!(!in_queue(ActorRole::BfpAdmin, &application));
    assert!(!in_queue(ActorRole::MayorAdmin, &application));
}

#[test]
fn test_search_matches_owner_and_reference_without_changing_stats() {
    let by_owner: AdminQueue =
        admin_queue(ActorRole::MeoAdmin, sample_records(), Some("ana reyes")).unwrap();
    assert_eq!(ids(&by_owner), vec![3]);
    assert!(matches!(by_owner.stats, QueueStats::Meo { total: 5, .. }));

    let by_reference: AdminQueue =
        admin_queue(ActorRole::MeoAdmin, sample_records(), Some("o-1772")).unwrap();
    assert_eq!(ids(&by_reference), vec![3]);
}

#[test]
fn test_applicants_have_no_admin_queue() {
    let result = admin_queue(ActorRole::Applicant, sample_records(), None);

    assert!(matches!(result, Err(CoreError::NotPermitted { .. })));
}
