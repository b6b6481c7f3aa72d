// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::DomainError;
use crate::types::{AccountProfile, ApplicationKind, Assessment, FeeSchedule};

/// Upper bound on the number of missing-document entries in one rejection.
pub const MAX_MISSING_DOCUMENTS: usize = 50;

/// Ensures a text field is present and not blank.
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming `field`.
pub fn require_text(field: &str, value: Option<&str>) -> Result<(), DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(DomainError::MissingField {
            field: field.to_string(),
        }),
    }
}

/// Ensures a numeric field is present, finite and non-negative.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if absent or
/// `DomainError::InvalidNumber` if negative or not finite.
pub fn require_number(field: &str, value: Option<f64>) -> Result<(), DomainError> {
    match value {
        Some(v) => validate_optional_number(field, Some(v)),
        None => Err(DomainError::MissingField {
            field: field.to_string(),
        }),
    }
}

/// Validates a numeric field when present.
///
/// # Errors
///
/// Returns `DomainError::InvalidNumber` if negative or not finite.
pub fn validate_optional_number(field: &str, value: Option<f64>) -> Result<(), DomainError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(DomainError::InvalidNumber {
            field: field.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates a date field when present.
///
/// Accepts a calendar date (`2026-03-14`) or a full RFC 3339 timestamp, which
/// is what browser date pickers and JSON-encoded `Date` objects produce.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the value is neither.
pub fn validate_optional_date(field: &str, value: Option<&str>) -> Result<(), DomainError> {
    let Some(raw) = value else {
        return Ok(());
    };
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let is_calendar_date: bool =
        Date::parse(trimmed, format_description!("[year]-[month]-[day]")).is_ok();
    if is_calendar_date || OffsetDateTime::parse(trimmed, &Rfc3339).is_ok() {
        Ok(())
    } else {
        Err(DomainError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Validates an assessed fee schedule.
///
/// # Errors
///
/// Returns `DomainError::InvalidFeeItem` for a blank particular or a
/// negative/non-finite amount, and `DomainError::InvalidNumber` for an
/// invalid total.
pub fn validate_fee_schedule(fees: &FeeSchedule) -> Result<(), DomainError> {
    for (index, item) in fees.fees.iter().enumerate() {
        if item.particular.trim().is_empty() {
            return Err(DomainError::InvalidFeeItem {
                index,
                reason: "particular must not be empty",
            });
        }
        if !item.amount.is_finite() || item.amount < 0.0 {
            return Err(DomainError::InvalidFeeItem {
                index,
                reason: "amount must be a non-negative number",
            });
        }
    }
    validate_optional_number("totalAmountDue", Some(fees.total_amount_due))
}

/// Validates an assessment section for the given application kind.
///
/// # Errors
///
/// Returns `DomainError::NotaryNotApplicable` if notary fields are supplied
/// for an occupancy application, or `DomainError::InvalidDate` for a
/// malformed date.
pub fn validate_assessment(
    kind: ApplicationKind,
    assessment: &Assessment,
) -> Result<(), DomainError> {
    if kind == ApplicationKind::Occupancy && assessment.has_notary_fields() {
        return Err(DomainError::NotaryNotApplicable);
    }
    validate_optional_date("assessment.date", assessment.date.as_deref())?;
    validate_optional_date(
        "assessment.notaryPublicDate",
        assessment.notary_public_date.as_deref(),
    )
}

/// Validates the list of documents an applicant must still provide.
///
/// # Errors
///
/// Returns `DomainError::InvalidMissingDocument` if an entry is blank or the
/// list is unreasonably long.
pub fn validate_missing_documents(documents: &[String]) -> Result<(), DomainError> {
    if documents.len() > MAX_MISSING_DOCUMENTS {
        return Err(DomainError::InvalidMissingDocument(format!(
            "at most {MAX_MISSING_DOCUMENTS} entries are allowed"
        )));
    }
    if documents.iter().any(|d| d.trim().is_empty()) {
        return Err(DomainError::InvalidMissingDocument(String::from(
            "entries must not be empty",
        )));
    }
    Ok(())
}

/// Validates the fields of an account profile.
///
/// # Errors
///
/// Returns an error if any field is empty or malformed.
pub fn validate_account_profile(profile: &AccountProfile) -> Result<(), DomainError> {
    let username: &str = profile.username.trim();
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "username cannot be empty",
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(String::from(
            "username cannot contain whitespace",
        )));
    }

    if profile.first_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "first name cannot be empty",
        )));
    }
    if profile.last_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "last name cannot be empty",
        )));
    }

    let email: &str = profile.email.trim();
    let well_formed: bool = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(DomainError::InvalidEmail(profile.email.clone()));
    }

    let phone: &str = profile.phone_number.trim();
    let digits: usize = phone.chars().filter(char::is_ascii_digit).count();
    let allowed: bool = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !allowed || !(7..=15).contains(&digits) {
        return Err(DomainError::InvalidPhoneNumber(profile.phone_number.clone()));
    }

    Ok(())
}
