// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account mutations.
//!
//! This module contains backend-agnostic mutations for creating and
//! updating user rows. Passwords are hashed here with bcrypt; plain-text
//! passwords never reach a SQL statement. The Google merge-on-login runs
//! inside a single transaction so concurrent callbacks for the same
//! identity cannot interleave the lookup and the write.

use desain_booking_domain::{DEFAULT_GOOGLE_POSITION, DEFAULT_RATING};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{GoogleLinkOutcome, UserData};
use crate::diesel_schema::user;
use crate::error::PersistenceError;
use crate::queries::users::UserRow;

backend_fn! {
/// Creates a new locally registered user.
///
/// The password is hashed with bcrypt before insertion. `google_id` is
/// left null; linking happens later via the Google merge-on-login.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The username (email), must be unused
/// * `password` - The plain-text password (will be hashed)
/// * `nama` - The display name
/// * `gambar` - The stored profile-image path
/// * `posisi` - The position label
///
/// # Errors
///
/// Returns `DuplicateUsername` if the username is already registered,
/// or another error if the insert fails.
pub fn create_user(
    conn: &mut _,
    username: &str,
    password: &str,
    nama: &str,
    gambar: &str,
    posisi: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating user with username: {}", username);

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let result: Result<usize, diesel::result::Error> = diesel::insert_into(user::table)
        .values((
            user::username.eq(username),
            user::password.eq(&password_hash),
            user::nama.eq(nama),
            user::gambar.eq(gambar),
            user::posisi.eq(posisi),
            user::penilaian.eq(DEFAULT_RATING),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return Err(PersistenceError::DuplicateUsername(String::from(username)));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    }

    let user_id: i64 = conn.get_last_insert_rowid()?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}
}

backend_fn! {
/// Merges a Google identity into the `user` table and returns the row.
///
/// Runs in one transaction. Resolution order:
///
/// 1. A row already linked to this `google_id`: refresh `gambar` only if
///    the stored path differs from `image_path`.
/// 2. A local account whose username equals the Google email: link it by
///    setting `google_id` and `gambar`.
/// 3. Otherwise insert a new row with the default position and rating.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `google_id` - The Google account identifier
/// * `email` - The verified Google email (becomes the username)
/// * `display_name` - The Google display name
/// * `image_path` - Local path of the already-downloaded profile photo
///
/// # Errors
///
/// Returns an error if any statement in the transaction fails.
pub fn upsert_google_user(
    conn: &mut _,
    google_id: &str,
    email: &str,
    display_name: &str,
    image_path: &str,
) -> Result<(UserData, GoogleLinkOutcome), PersistenceError> {
    info!("Merging Google identity for email: {}", email);

    conn.transaction(|conn| {
        let linked: Option<(i64, String)> = user::table
            .filter(user::google_id.eq(google_id))
            .select((user::id, user::gambar))
            .first::<(i64, String)>(conn)
            .optional()?;

        let (user_id, outcome): (i64, GoogleLinkOutcome) = if let Some((id, gambar)) = linked {
            if gambar == image_path {
                debug!(user_id = id, "Google user image path unchanged");
                (id, GoogleLinkOutcome::Unchanged)
            } else {
                diesel::update(user::table.filter(user::id.eq(id)))
                    .set(user::gambar.eq(image_path))
                    .execute(conn)?;
                debug!(user_id = id, "Google user image path refreshed");
                (id, GoogleLinkOutcome::ImageUpdated)
            }
        } else {
            let local: Option<i64> = user::table
                .filter(user::username.eq(email))
                .select(user::id)
                .first::<i64>(conn)
                .optional()?;

            if let Some(id) = local {
                diesel::update(user::table.filter(user::id.eq(id)))
                    .set((user::google_id.eq(google_id), user::gambar.eq(image_path)))
                    .execute(conn)?;
                info!(user_id = id, "Linked Google identity to local account");
                (id, GoogleLinkOutcome::LinkedToLocal)
            } else {
                diesel::insert_into(user::table)
                    .values((
                        user::google_id.eq(google_id),
                        user::username.eq(email),
                        user::nama.eq(display_name),
                        user::gambar.eq(image_path),
                        user::posisi.eq(DEFAULT_GOOGLE_POSITION),
                        user::penilaian.eq(DEFAULT_RATING),
                    ))
                    .execute(conn)?;
                let id: i64 = conn.get_last_insert_rowid()?;
                info!(user_id = id, "Created user from Google identity");
                (id, GoogleLinkOutcome::Created)
            }
        };

        let row: UserRow = user::table
            .filter(user::id.eq(user_id))
            .select(UserRow::as_select())
            .first(conn)?;

        Ok((UserData::from(row), outcome))
    })
}
}

backend_fn! {
/// Overwrites a user's rating text.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
/// * `penilaian` - The new rating text
///
/// # Errors
///
/// Returns `UserNotFound` if no row matches, or another error if the
/// update fails.
pub fn update_rating(
    conn: &mut _,
    user_id: i64,
    penilaian: &str,
) -> Result<(), PersistenceError> {
    debug!("Updating penilaian for user ID: {}", user_id);

    let rows_affected: usize = diesel::update(user::table)
        .filter(user::id.eq(user_id))
        .set(user::penilaian.eq(penilaian))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::UserNotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    Ok(())
}
}
