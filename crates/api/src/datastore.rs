// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage seam the service layer works against.
//!
//! Services take `&mut dyn Datastore` instead of the concrete persistence
//! type so that tests can substitute counting or failing doubles. The
//! method surface mirrors the persistence adapter one-to-one; `Persistence`
//! implements the trait by plain delegation.

use desain_booking_persistence::{
    BookingData, GoogleLinkOutcome, NewBooking, Persistence, PersistenceError, SessionData,
    UserData,
};

/// Storage operations required by the authentication, booking, and rating
/// services.
///
/// All methods return `PersistenceError`; translation into client-facing
/// errors happens in the service layer.
pub trait Datastore {
    /// Inserts a locally registered user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is taken, or another
    /// error if the insert fails.
    fn create_user(
        &mut self,
        username: &str,
        password: &str,
        nama: &str,
        gambar: &str,
        posisi: &str,
    ) -> Result<i64, PersistenceError>;

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn get_user_by_username(&mut self, username: &str)
    -> Result<Option<UserData>, PersistenceError>;

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError>;

    /// Merges a Google identity into the user table.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge transaction fails.
    fn upsert_google_user(
        &mut self,
        google_id: &str,
        email: &str,
        display_name: &str,
        image_path: &str,
    ) -> Result<(UserData, GoogleLinkOutcome), PersistenceError>;

    /// Overwrites a user's rating text.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist, or another error
    /// if the update fails.
    fn update_rating(&mut self, user_id: i64, penilaian: &str) -> Result<(), PersistenceError>;

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if verification itself fails.
    fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, PersistenceError>;

    /// Creates a session row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError>;

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError>;

    /// Updates a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError>;

    /// Deletes a session by token. Deleting an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError>;

    /// Deletes sessions that expired at or before `now`, returning how many
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError>;

    /// Inserts a booking, generating its code inside the insert transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create_booking(&mut self, booking: &NewBooking) -> Result<(i64, String), PersistenceError>;

    /// Lists a user's bookings, newest move-in date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_bookings_for_user(
        &mut self,
        username: &str,
    ) -> Result<Vec<BookingData>, PersistenceError>;

    /// Lists every stored booking code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_booking_codes(&mut self) -> Result<Vec<String>, PersistenceError>;
}

impl Datastore for Persistence {
    fn create_user(
        &mut self,
        username: &str,
        password: &str,
        nama: &str,
        gambar: &str,
        posisi: &str,
    ) -> Result<i64, PersistenceError> {
        Self::create_user(self, username, password, nama, gambar, posisi)
    }

    fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        Self::get_user_by_username(self, username)
    }

    fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        Self::get_user_by_id(self, user_id)
    }

    fn upsert_google_user(
        &mut self,
        google_id: &str,
        email: &str,
        display_name: &str,
        image_path: &str,
    ) -> Result<(UserData, GoogleLinkOutcome), PersistenceError> {
        Self::upsert_google_user(self, google_id, email, display_name, image_path)
    }

    fn update_rating(&mut self, user_id: i64, penilaian: &str) -> Result<(), PersistenceError> {
        Self::update_rating(self, user_id, penilaian)
    }

    fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        Self::verify_password(self, password, password_hash)
    }

    fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        Self::create_session(self, session_token, user_id, expires_at)
    }

    fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        Self::get_session_by_token(self, session_token)
    }

    fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        Self::update_session_activity(self, session_id)
    }

    fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        Self::delete_session(self, session_token)
    }

    fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        Self::delete_expired_sessions(self, now)
    }

    fn create_booking(&mut self, booking: &NewBooking) -> Result<(i64, String), PersistenceError> {
        Self::create_booking(self, booking)
    }

    fn list_bookings_for_user(
        &mut self,
        username: &str,
    ) -> Result<Vec<BookingData>, PersistenceError> {
        Self::list_bookings_for_user(self, username)
    }

    fn list_booking_codes(&mut self) -> Result<Vec<String>, PersistenceError> {
        Self::list_booking_codes(self)
    }
}
