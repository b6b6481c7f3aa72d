// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use permit_portal_domain::AccountProfile;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;

backend_fn! {
/// Creates an account.
///
/// Usernames and emails are stored trimmed; emails are lower-cased so that
/// uniqueness is case-insensitive.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `profile` - The validated profile
/// * `created_at` - Creation timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the username or email is
/// already registered.
pub fn create_account(
    conn: &mut _,
    profile: &AccountProfile,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let email: String = profile.email.trim().to_lowercase();

    diesel::insert_into(accounts::table)
        .values((
            accounts::username.eq(profile.username.trim()),
            accounts::first_name.eq(profile.first_name.trim()),
            accounts::last_name.eq(profile.last_name.trim()),
            accounts::email.eq(&email),
            accounts::phone_number.eq(profile.phone_number.trim()),
            accounts::role.eq(profile.role.as_str()),
            accounts::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let account_id: i64 = conn.get_last_insert_rowid()?;
    info!(account_id, role = profile.role.as_str(), "Account created");

    Ok(account_id)
}
}
