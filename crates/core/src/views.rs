// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-filtered admin queues and their dashboard counters.
//!
//! Queue membership is decided from the current status and from the
//! `acting_role` recorded on history entries, never from comment text.

use crate::application::Application;
use crate::error::CoreError;
use permit_portal_domain::{ActorRole, ApplicationStatus};

/// Dashboard counters for one admin queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStats {
    /// Engineering office: sees every application.
    Meo {
        submitted: usize,
        /// Anything still moving through review or payment.
        pending: usize,
        approved: usize,
        total: usize,
    },
    /// Fire bureau.
    Bfp {
        new_applications: usize,
        /// Passed on to the mayor or beyond.
        cleared: usize,
        returned: usize,
        total: usize,
    },
    /// Mayor's office.
    Mayor {
        to_approve: usize,
        /// Sent back to the engineering office by the mayor.
        endorsed: usize,
        completed: usize,
        total: usize,
    },
}

/// A role's queue after filtering, searching and sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminQueue {
    /// Newest first.
    pub applications: Vec<Application>,
    /// Counted over the whole queue, before the search filter.
    pub stats: QueueStats,
}

/// Returns true if `application` belongs in `role`'s queue.
#[must_use]
pub fn in_queue(role: ActorRole, application: &Application) -> bool {
    let status: ApplicationStatus = application.status;
    match role {
        ActorRole::MeoAdmin => true,
        ActorRole::BfpAdmin => {
            status == ApplicationStatus::PendingBfp
                || application.history.has_acted(ActorRole::BfpAdmin)
        }
        ActorRole::MayorAdmin => {
            status == ApplicationStatus::PendingMayor
                || (matches!(
                    status,
                    ApplicationStatus::PendingMeo
                        | ApplicationStatus::Approved
                        | ApplicationStatus::PermitIssued
                        | ApplicationStatus::Rejected
                ) && application.history.has_acted(ActorRole::MayorAdmin))
        }
        ActorRole::Applicant => false,
    }
}

/// Returns true if the owner name or reference number contains `term`,
/// ignoring case. A blank term matches everything.
#[must_use]
pub fn matches_search(application: &Application, term: &str) -> bool {
    let needle: String = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    application
        .details
        .owner_name()
        .to_lowercase()
        .contains(&needle)
        || application
            .reference_no
            .as_str()
            .to_lowercase()
            .contains(&needle)
}

/// Builds the queue an admin role sees.
///
/// # Arguments
///
/// * `role` - The viewing admin role
/// * `applications` - Every application in the system
/// * `search` - Optional owner-name or reference filter
///
/// # Errors
///
/// Returns `CoreError::NotPermitted` if `role` is not an admin role.
pub fn admin_queue(
    role: ActorRole,
    applications: Vec<Application>,
    search: Option<&str>,
) -> Result<AdminQueue, CoreError> {
    if !role.is_admin() {
        return Err(CoreError::NotPermitted {
            action: "ViewAdminQueue",
            role,
        });
    }

    let mut queue: Vec<Application> = applications
        .into_iter()
        .filter(|application| in_queue(role, application))
        .collect();
    let stats: QueueStats = queue_stats(role, &queue);

    if let Some(term) = search {
        queue.retain(|application| matches_search(application, term));
    }
    sort_newest_first(&mut queue);

    Ok(AdminQueue {
        applications: queue,
        stats,
    })
}

/// Sorts by creation time, newest first, breaking ties by identifier.
pub fn sort_newest_first(applications: &mut [Application]) {
    applications.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.application_id.cmp(&a.application_id))
    });
}

fn count(queue: &[Application], statuses: &[ApplicationStatus]) -> usize {
    queue
        .iter()
        .filter(|application| statuses.contains(&application.status))
        .count()
}

fn queue_stats(role: ActorRole, queue: &[Application]) -> QueueStats {
    use ApplicationStatus::{
        Approved, PaymentPending, PaymentSubmitted, PendingBfp, PendingMayor, PendingMeo,
        PermitIssued, Rejected, Submitted,
    };

    // Mayor queue entries other than Pending Mayor already imply the mayor acted.
    let total: usize = queue.len();
    match role {
        ActorRole::BfpAdmin => QueueStats::Bfp {
            new_applications: count(queue, &[PendingBfp]),
            cleared: count(queue, &[PendingMayor, Approved, PermitIssued]),
            returned: count(queue, &[Rejected]),
            total,
        },
        ActorRole::MayorAdmin => QueueStats::Mayor {
            to_approve: count(queue, &[PendingMayor]),
            endorsed: count(queue, &[PendingMeo]),
            completed: count(queue, &[Approved, PermitIssued]),
            total,
        },
        ActorRole::MeoAdmin | ActorRole::Applicant => QueueStats::Meo {
            submitted: count(queue, &[Submitted]),
            pending: count(
                queue,
                &[
                    PendingMeo,
                    PendingBfp,
                    PendingMayor,
                    PaymentPending,
                    PaymentSubmitted,
                ],
            ),
            approved: count(queue, &[PermitIssued]),
            total,
        },
    }
}
