// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resolution of the building permit an occupancy application refers to.
//!
//! Applicants may quote either the public reference number or the internal
//! record identifier. Matching is exact on both paths; no prefix or
//! substring matching is performed.

use permit_portal_domain::ReferenceNumber;

/// A building application found by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingPermitRef {
    pub application_id: i64,
    pub reference_no: ReferenceNumber,
}

/// Lookup operations the resolver needs from storage.
///
/// Both methods must only ever return building applications.
pub trait BuildingPermitIndex {
    /// The storage error type.
    type Error;

    /// Finds a building application by its internal identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn find_building_by_id(
        &mut self,
        application_id: i64,
    ) -> Result<Option<BuildingPermitRef>, Self::Error>;

    /// Finds a building application whose reference number equals
    /// `reference_no` exactly. The argument is already upper-cased.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn find_building_by_reference(
        &mut self,
        reference_no: &str,
    ) -> Result<Option<BuildingPermitRef>, Self::Error>;
}

/// Errors raised by [`resolve_building_permit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError<E> {
    /// The identifier is empty after trimming.
    EmptyIdentifier,
    /// No building application matches.
    NotFound(String),
    /// The index failed.
    Index(E),
}

impl<E: std::fmt::Display> std::fmt::Display for ResolveError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "Building Permit reference is required"),
            Self::NotFound(identifier) => write!(
                f,
                "Building Permit not found with Reference or ID: {identifier}"
            ),
            Self::Index(err) => write!(f, "Building Permit lookup failed: {err}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for ResolveError<E> {}

/// Resolves a user-supplied identifier to a building application.
///
/// The identifier is trimmed. If it parses as a positive integer the id path
/// is tried first, and an id match wins over a reference match. Otherwise,
/// or if no record has that id, the identifier is compared case-insensitively
/// against reference numbers.
///
/// # Errors
///
/// Returns `ResolveError::EmptyIdentifier` for a blank identifier,
/// `ResolveError::NotFound` if nothing matches, or `ResolveError::Index` if
/// storage fails.
pub fn resolve_building_permit<I: BuildingPermitIndex>(
    index: &mut I,
    identifier: &str,
) -> Result<BuildingPermitRef, ResolveError<I::Error>> {
    let trimmed: &str = identifier.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::EmptyIdentifier);
    }

    if let Some(id) = trimmed.parse::<i64>().ok().filter(|id| *id > 0)
        && let Some(found) = index
            .find_building_by_id(id)
            .map_err(ResolveError::Index)?
    {
        return Ok(found);
    }

    index
        .find_building_by_reference(&trimmed.to_uppercase())
        .map_err(ResolveError::Index)?
        .ok_or_else(|| ResolveError::NotFound(trimmed.to_string()))
}
