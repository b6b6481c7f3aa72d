// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workflow history: the per-application audit trail.
//!
//! Every status change appends exactly one [`WorkflowEntry`]. Entries are
//! never edited or removed, and the first entry of every history records
//! the initial submission.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use permit_portal_domain::{ActorRole, ApplicationStatus};
use serde::{Deserialize, Serialize};

/// Comment written on the first entry of every history.
pub const SUBMISSION_COMMENT: &str = "Application submitted by user.";

/// The account performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// The account identifier.
    pub account_id: i64,
    /// The role the account held when it acted.
    pub role: ActorRole,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The acting account
    /// * `role` - The role of that account
    #[must_use]
    pub const fn new(account_id: i64, role: ActorRole) -> Self {
        Self { account_id, role }
    }
}

/// One status change in an application's history.
///
/// `acting_role` is recorded authoritatively at write time so that queue
/// routing never has to inspect free-text comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEntry {
    pub status: ApplicationStatus,
    pub comments: String,
    pub updated_by: i64,
    pub acting_role: ActorRole,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

impl WorkflowEntry {
    /// Creates a new entry for `actor`.
    #[must_use]
    pub const fn new(
        status: ApplicationStatus,
        comments: String,
        actor: Actor,
        timestamp: String,
    ) -> Self {
        Self {
            status,
            comments,
            updated_by: actor.account_id,
            acting_role: actor.role,
            timestamp,
        }
    }
}

/// Errors raised when rebuilding a history from stored entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// A history must contain at least the submission entry.
    Empty,
    /// The first entry must record the submission.
    FirstEntryNotSubmitted(ApplicationStatus),
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Workflow history cannot be empty"),
            Self::FirstEntryNotSubmitted(status) => write!(
                f,
                "Workflow history must start with 'Submitted', found '{}'",
                status.as_str()
            ),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append-only, never-empty workflow history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WorkflowEntry>", into = "Vec<WorkflowEntry>")]
pub struct WorkflowHistory {
    entries: Vec<WorkflowEntry>,
}

impl WorkflowHistory {
    /// Starts a history with the submission entry.
    ///
    /// # Arguments
    ///
    /// * `applicant` - The submitting account
    /// * `timestamp` - Submission time (RFC 3339)
    #[must_use]
    pub fn start(applicant: Actor, timestamp: String) -> Self {
        Self {
            entries: vec![WorkflowEntry::new(
                ApplicationStatus::Submitted,
                SUBMISSION_COMMENT.to_string(),
                applicant,
                timestamp,
            )],
        }
    }

    /// Rebuilds a history from stored entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if `entries` is empty or does not start with a
    /// `Submitted` entry.
    pub fn from_entries(entries: Vec<WorkflowEntry>) -> Result<Self, HistoryError> {
        match entries.first() {
            None => Err(HistoryError::Empty),
            Some(first) if first.status != ApplicationStatus::Submitted => {
                Err(HistoryError::FirstEntryNotSubmitted(first.status))
            }
            Some(_) => Ok(Self { entries }),
        }
    }

    /// Appends an entry. Existing entries are untouched.
    pub fn append(&mut self, entry: WorkflowEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[WorkflowEntry] {
        &self.entries
    }

    /// The most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&WorkflowEntry> {
        self.entries.last()
    }

    /// The most recent entry that moved the application into `status`.
    #[must_use]
    pub fn latest_with_status(&self, status: ApplicationStatus) -> Option<&WorkflowEntry> {
        self.entries.iter().rev().find(|e| e.status == status)
    }

    /// Returns true if any entry was written by `role`.
    #[must_use]
    pub fn has_acted(&self, role: ActorRole) -> bool {
        self.entries.iter().any(|e| e.acting_role == role)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed history.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<WorkflowEntry>> for WorkflowHistory {
    type Error = HistoryError;

    fn try_from(entries: Vec<WorkflowEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<WorkflowHistory> for Vec<WorkflowEntry> {
    fn from(history: WorkflowHistory) -> Self {
        history.entries
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn applicant() -> Actor {
        Actor::new(7, ActorRole::Applicant)
    }

    fn meo() -> Actor {
        Actor::new(1, ActorRole::MeoAdmin)
    }

    #[test]
    fn test_start_records_submission() {
        let history: WorkflowHistory =
            WorkflowHistory::start(applicant(), String::from("2026-03-01T08:00:00Z"));

        assert_eq!(history.len(), 1);
        let first: &WorkflowEntry = &history.entries()[0];
        assert_eq!(first.status, ApplicationStatus::Submitted);
        assert_eq!(first.comments, SUBMISSION_COMMENT);
        assert_eq!(first.updated_by, 7);
        assert_eq!(first.acting_role, ActorRole::Applicant);
    }

    #[test]
    fn test_append_preserves_prior_entries() {
        let mut history: WorkflowHistory =
            WorkflowHistory::start(applicant(), String::from("2026-03-01T08:00:00Z"));
        let before: Vec<WorkflowEntry> = history.entries().to_vec();

        history.append(WorkflowEntry::new(
            ApplicationStatus::PendingMeo,
            String::from("Received"),
            meo(),
            String::from("2026-03-02T08:00:00Z"),
        ));

        assert_eq!(history.len(), before.len() + 1);
        assert_eq!(&history.entries()[..before.len()], before.as_slice());
        assert_eq!(
            history.latest().map(|e| e.status),
            Some(ApplicationStatus::PendingMeo)
        );
    }

    #[test]
    fn test_from_entries_rejects_empty() {
        assert_eq!(
            WorkflowHistory::from_entries(Vec::new()),
            Err(HistoryError::Empty)
        );
    }

    #[test]
    fn test_from_entries_requires_submission_first() {
        let entry: WorkflowEntry = WorkflowEntry::new(
            ApplicationStatus::Approved,
            String::new(),
            meo(),
            String::from("2026-03-02T08:00:00Z"),
        );
        assert_eq!(
            WorkflowHistory::from_entries(vec![entry]),
            Err(HistoryError::FirstEntryNotSubmitted(
                ApplicationStatus::Approved
            ))
        );
    }

    #[test]
    fn test_has_acted_tracks_roles_that_wrote_entries() {
        let mut history: WorkflowHistory =
            WorkflowHistory::start(applicant(), String::from("2026-03-01T08:00:00Z"));
        history.append(WorkflowEntry::new(
            ApplicationStatus::PendingBfp,
            String::from("Forwarded"),
            meo(),
            String::from("2026-03-02T08:00:00Z"),
        ));

        assert!(history.has_acted(ActorRole::Applicant));
        assert!(history.has_acted(ActorRole::MeoAdmin));
        assert!(!history.has_acted(ActorRole::MayorAdmin));
    }

    #[test]
    fn test_latest_with_status_finds_most_recent() {
        let mut history: WorkflowHistory =
            WorkflowHistory::start(applicant(), String::from("2026-03-01T08:00:00Z"));
        history.append(WorkflowEntry::new(
            ApplicationStatus::Rejected,
            String::from("first"),
            meo(),
            String::from("2026-03-02T08:00:00Z"),
        ));
        history.append(WorkflowEntry::new(
            ApplicationStatus::Rejected,
            String::from("second"),
            Actor::new(2, ActorRole::BfpAdmin),
            String::from("2026-03-03T08:00:00Z"),
        ));

        let latest: &WorkflowEntry = history
            .latest_with_status(ApplicationStatus::Rejected)
            .unwrap();
        assert_eq!(latest.comments, "second");
        assert_eq!(latest.acting_role, ActorRole::BfpAdmin);
    }

    #[test]
    fn test_deserializing_empty_history_fails() {
        let result: Result<WorkflowHistory, serde_json::Error> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_history_serializes_as_plain_list() {
        let history: WorkflowHistory =
            WorkflowHistory::start(applicant(), String::from("2026-03-01T08:00:00Z"));
        let json: serde_json::Value = serde_json::to_value(&history).unwrap();
        assert_eq!(json[0]["status"], "Submitted");
        assert_eq!(json[0]["actingRole"], "user");
        assert_eq!(json[0]["updatedBy"], 7);
    }
}
