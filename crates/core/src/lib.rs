// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application;
mod apply;
mod command;
mod error;
mod resolver;
mod views;

#[cfg(test)]
mod tests;

use permit_portal_domain::DomainError;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

// Re-export public types and functions
pub use application::{Application, ApplicationDetails, ApplicationDraft, TransitionResult};
pub use apply::{REVISION_REQUIREMENT, apply, submit_application, validate_payment_submission};
pub use command::{Command, StoredFile};
pub use error::CoreError;
pub use resolver::{BuildingPermitIndex, BuildingPermitRef, ResolveError, resolve_building_permit};
pub use views::{AdminQueue, QueueStats, admin_queue, in_queue, matches_search, sort_newest_first};

/// Formats an instant as a UTC RFC 3339 timestamp with millisecond precision.
///
/// The fixed width keeps stored timestamps ordered when compared as text.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the instant cannot be formatted.
pub fn timestamp(now: OffsetDateTime) -> Result<String, DomainError> {
    now.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .map_err(|e| DomainError::InvalidTimestamp(e.to_string()))
}
