// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{AccountData, AccountRow};
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an account by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account does not exist.
pub fn get_account(conn: &mut _, account_id: i64) -> Result<Option<AccountData>, PersistenceError> {
    debug!(account_id, "Looking up account");

    let result: Result<AccountRow, diesel::result::Error> = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn);

    match result {
        Ok(row) => AccountData::try_from(row).map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists accounts, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `offset` - Rows to skip
/// * `limit` - Maximum rows to return
///
/// # Errors
///
/// Returns an error if the query fails or a stored role is invalid.
pub fn list_accounts(
    conn: &mut _,
    offset: i64,
    limit: i64,
) -> Result<Vec<AccountData>, PersistenceError> {
    let rows: Vec<AccountRow> = accounts::table
        .order(accounts::account_id.desc())
        .offset(offset)
        .limit(limit)
        .select(AccountRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AccountData::try_from).collect()
}
}

backend_fn! {
/// Counts all accounts.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_accounts(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(accounts::table.count().get_result(conn)?)
}
}

backend_fn! {
/// Counts accounts holding any admin role.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_admins(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(accounts::table
        .filter(accounts::role.ne("user"))
        .count()
        .get_result(conn)?)
}
}
