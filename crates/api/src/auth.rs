// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication flows and session lifecycle.
//!
//! Local and Google logins converge on one entry point,
//! [`AuthenticationService::authenticate`], which verifies the identity and
//! opens a persistent session. Session TTL is fixed at creation; activity
//! updates are bookkeeping only and never extend it.

use time::{Duration, OffsetDateTime};
use tracing::{debug, error, info, warn};

use desain_booking_persistence::{GoogleLinkOutcome, PersistenceError, SessionData, UserData};

use crate::datastore::Datastore;
use crate::error::{ApiError, AuthError, map_persistence_error};
use crate::request_response::{RegisterRequest, RegisterResponse};
use crate::validation::{RegistrationFields, validate_registration};

/// Generic message for login-path internal failures. The real cause is
/// logged where it occurs.
const SERVER_ERROR: &str = "Terjadi kesalahan server";

/// A verified Google identity, with the profile photo already downloaded.
///
/// Constructing one requires the photo on local disk first; the merge into
/// the user table never waits on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleProfile {
    /// The stable Google account identifier.
    pub google_id: String,
    /// The verified Google email.
    pub email: String,
    /// The Google display name.
    pub display_name: String,
    /// Local path of the downloaded profile photo.
    pub image_path: String,
}

/// How a login attempt identifies itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Username (email) and plain text password from the login form.
    Local {
        /// The username (email).
        username: String,
        /// The plain text password.
        password: String,
    },
    /// A Google identity already verified against Google's userinfo endpoint.
    Google(GoogleProfile),
}

/// Authentication service for password, Google, and session operations.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Fixed session lifetime (24 hours, non-sliding).
    const SESSION_TTL: Duration = Duration::hours(24);

    /// Registers a local account.
    ///
    /// The username is claimed by the insert itself: a duplicate surfaces as
    /// the unique-constraint violation, so there is no pre-check race.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `request` - The registration form fields
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a required field is absent, `Conflict` if the
    /// username is already registered, or `Internal` if the insert fails.
    pub fn register(
        datastore: &mut dyn Datastore,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        let fields: RegistrationFields = validate_registration(request)?;

        match datastore.create_user(
            &fields.username,
            &fields.password,
            &fields.nama,
            &fields.gambar,
            &fields.posisi,
        ) {
            Ok(user_id) => {
                info!(user_id, username = %fields.username, "Registered new user");
                Ok(RegisterResponse {
                    message: String::from("Registrasi berhasil! Silakan login."),
                })
            }
            Err(PersistenceError::DuplicateUsername(_)) => Err(ApiError::Conflict {
                message: String::from("Username (email) sudah terdaftar"),
            }),
            Err(err) => Err(map_persistence_error(
                "Failed to insert user during registration",
                "Terjadi kesalahan server saat registrasi.",
                &err,
            )),
        }
    }

    /// Authenticates a login attempt and opens a session.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `method` - The credentials or verified Google identity
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `user_data`).
    ///
    /// # Errors
    ///
    /// Returns a credential error if the identity cannot be verified, or
    /// `Internal` if a storage operation fails.
    pub fn authenticate(
        datastore: &mut dyn Datastore,
        method: AuthMethod,
    ) -> Result<(String, UserData), AuthError> {
        let user: UserData = match method {
            AuthMethod::Local { username, password } => {
                Self::authenticate_local(datastore, &username, &password)?
            }
            AuthMethod::Google(profile) => Self::authenticate_google(datastore, &profile)?,
        };

        let session_token: String = Self::open_session(datastore, user.id)?;
        Ok((session_token, user))
    }

    /// Verifies a username/password pair.
    fn authenticate_local(
        datastore: &mut dyn Datastore,
        username: &str,
        password: &str,
    ) -> Result<UserData, AuthError> {
        let user: UserData = datastore
            .get_user_by_username(username)
            .map_err(|err| Self::backend_failure("Failed to look up user during login", &err))?
            .ok_or(AuthError::UnknownUsername)?;

        // Accounts created via Google carry no hash and cannot log in locally.
        let Some(password_hash) = user.password.as_deref() else {
            return Err(AuthError::GoogleOnlyAccount);
        };

        let valid: bool = datastore
            .verify_password(password, password_hash)
            .map_err(|err| Self::backend_failure("Failed to verify password", &err))?;
        if !valid {
            return Err(AuthError::WrongPassword);
        }

        Ok(user)
    }

    /// Merges a verified Google identity into the user table.
    fn authenticate_google(
        datastore: &mut dyn Datastore,
        profile: &GoogleProfile,
    ) -> Result<UserData, AuthError> {
        let (user, outcome): (UserData, GoogleLinkOutcome) = datastore
            .upsert_google_user(
                &profile.google_id,
                &profile.email,
                &profile.display_name,
                &profile.image_path,
            )
            .map_err(|err| Self::backend_failure("Failed to merge Google identity", &err))?;

        info!(username = %user.username, outcome = ?outcome, "Google identity merged");
        Ok(user)
    }

    /// Creates a session row for the user and returns its token.
    fn open_session(datastore: &mut dyn Datastore, user_id: i64) -> Result<String, AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let now_str: String = Self::format_timestamp(now)?;

        // Opportunistic sweep so the table never accumulates dead rows.
        let swept: usize = datastore
            .delete_expired_sessions(&now_str)
            .map_err(|err| Self::backend_failure("Failed to sweep expired sessions", &err))?;
        if swept > 0 {
            debug!(swept, "Removed expired sessions");
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::format_timestamp(now + Self::SESSION_TTL)?;

        datastore
            .create_session(&session_token, user_id, &expires_at)
            .map_err(|err| Self::backend_failure("Failed to create session", &err))?;

        Ok(session_token)
    }

    /// Validates a session token and returns the owning user.
    ///
    /// Expired sessions are deleted on sight (best effort) and reported as
    /// invalid. The activity timestamp is refreshed on success; the
    /// expiration is not.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `session_token` - The token from the session cookie
    ///
    /// # Errors
    ///
    /// Returns `InvalidSession` if the token is unknown, expired, or
    /// orphaned, or `Internal` if a storage operation fails.
    pub fn validate_session(
        datastore: &mut dyn Datastore,
        session_token: &str,
    ) -> Result<UserData, AuthError> {
        let session: SessionData = datastore
            .get_session_by_token(session_token)
            .map_err(|err| Self::backend_failure("Failed to look up session", &err))?
            .ok_or_else(|| AuthError::InvalidSession {
                reason: String::from("Unknown session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|err| {
            error!(error = %err, "Failed to parse session expiration");
            AuthError::Internal {
                message: String::from(SERVER_ERROR),
            }
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            // Best effort; a row that survives here is swept at next login.
            if let Err(err) = datastore.delete_session(session_token) {
                warn!(error = %err, "Failed to delete expired session");
            }
            return Err(AuthError::InvalidSession {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = datastore
            .get_user_by_id(session.user_id)
            .map_err(|err| Self::backend_failure("Failed to look up session user", &err))?
            .ok_or_else(|| AuthError::InvalidSession {
                reason: String::from("Session user no longer exists"),
            })?;

        datastore
            .update_session_activity(session.session_id)
            .map_err(|err| Self::backend_failure("Failed to update session activity", &err))?;

        Ok(user)
    }

    /// Logs out by deleting the session.
    ///
    /// Deleting a token that no longer exists succeeds, so repeated logouts
    /// are harmless.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `session_token` - The token from the session cookie
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the delete fails.
    pub fn logout(datastore: &mut dyn Datastore, session_token: &str) -> Result<(), AuthError> {
        datastore
            .delete_session(session_token)
            .map_err(|err| Self::backend_failure("Failed to delete session during logout", &err))
    }

    /// Generates a session token from the current time and a random suffix.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{timestamp}-{:016x}", rand::random::<u64>())
    }

    /// Formats a timestamp the way session rows store them.
    fn format_timestamp(value: OffsetDateTime) -> Result<String, AuthError> {
        value
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|err| {
                error!(error = %err, "Failed to format session timestamp");
                AuthError::Internal {
                    message: String::from(SERVER_ERROR),
                }
            })
    }

    /// Logs a storage failure and returns the generic login-path error.
    fn backend_failure(context: &str, err: &PersistenceError) -> AuthError {
        error!(error = %err, "{context}");
        AuthError::Internal {
            message: String::from(SERVER_ERROR),
        }
    }
}
