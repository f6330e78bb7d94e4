// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account queries.
//!
//! This module contains backend-agnostic queries for retrieving user rows.
//! All queries use Diesel DSL and work across all supported database
//! backends. Lookups are exact-match: usernames are stored and compared
//! verbatim, as the original site did.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::UserData;
use crate::diesel_schema::user;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = user)]
pub(crate) struct UserRow {
    pub(crate) id: i64,
    pub(crate) google_id: Option<String>,
    pub(crate) username: String,
    pub(crate) password: Option<String>,
    pub(crate) nama: String,
    pub(crate) gambar: String,
    pub(crate) posisi: String,
    pub(crate) penilaian: String,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            google_id: row.google_id,
            username: row.username,
            password: row.password,
            nama: row.nama,
            gambar: row.gambar,
            posisi: row.posisi,
            penilaian: row.penilaian,
        }
    }
}

backend_fn! {
/// Retrieves a user by username.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The username (email) to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_username(
    conn: &mut _,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by username: {}", username);

    let result: Result<UserRow, diesel::result::Error> = user::table
        .filter(user::username.eq(username))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a user by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(conn: &mut _, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = user::table
        .filter(user::id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a user by Google ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `google_id` - The Google account identifier
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user is linked to this Google identity.
pub fn get_user_by_google_id(
    conn: &mut _,
    google_id: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by google_id");

    let result: Result<UserRow, diesel::result::Error> = user::table
        .filter(user::google_id.eq(google_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Counts the total number of users.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut _) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    debug!("Counting users");

    let count: i64 = user::table.select(count(user::id)).first(conn)?;

    debug!("Total users: {}", count);
    Ok(count)
}
}

/// Verifies a password against a stored hash.
///
/// This is a backend-agnostic utility function that uses bcrypt.
///
/// # Arguments
///
/// * `password` - The plain text password to verify
/// * `password_hash` - The stored bcrypt hash
///
/// # Errors
///
/// Returns an error if password verification fails.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
