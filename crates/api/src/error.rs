// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Client-facing failures carry their stable Indonesian wire message as the
//! `Display` output; internal failures are logged where they occur and only
//! a fixed message crosses the API boundary. Raw database or driver detail
//! is never exposed to callers.

use desain_booking_domain::DomainError;
use desain_booking_persistence::PersistenceError;
use tracing::error;

use crate::validation::ValidationError;

/// Authentication and session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No account exists for the submitted username.
    UnknownUsername,
    /// The account has no local password; it was created via Google.
    GoogleOnlyAccount,
    /// The password does not match the stored hash.
    WrongPassword,
    /// The session token is unknown, expired, or orphaned.
    InvalidSession {
        /// Why the session was rejected (diagnostic, never sent to clients).
        reason: String,
    },
    /// A backend operation failed during authentication.
    Internal {
        /// The stable client-facing message.
        message: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownUsername => write!(f, "Username tidak ditemukan."),
            Self::GoogleOnlyAccount => {
                write!(f, "Akun ini terdaftar via Google. Silakan login dengan Google.")
            }
            Self::WrongPassword => write!(f, "Password salah."),
            Self::InvalidSession { reason } => write!(f, "Invalid session: {reason}"),
            Self::Internal { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract: each variant maps to one HTTP status, and `Display` is the
/// exact body message for everything except `Unauthorized` (whose fixed
/// body shape the server layer owns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A request failed validation (HTTP 400).
    Validation {
        /// The stable client-facing message.
        message: String,
    },
    /// Local login credentials were rejected (HTTP 401).
    InvalidCredentials {
        /// The stable client-facing message.
        message: String,
    },
    /// The caller has no valid session (HTTP 401).
    Unauthorized,
    /// The request conflicts with existing data (HTTP 409).
    Conflict {
        /// The stable client-facing message.
        message: String,
    },
    /// An internal error occurred (HTTP 500).
    Internal {
        /// The stable client-facing message. Detail stays in the logs.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message }
            | Self::InvalidCredentials { message }
            | Self::Conflict { message }
            | Self::Internal { message } => write!(f, "{message}"),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownUsername
            | AuthError::GoogleOnlyAccount
            | AuthError::WrongPassword => Self::InvalidCredentials {
                message: err.to_string(),
            },
            AuthError::InvalidSession { .. } => Self::Unauthorized,
            AuthError::Internal { message } => Self::Internal { message },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    match err {
        DomainError::MissingField(_) => ApiError::Validation {
            message: String::from("Semua field wajib diisi"),
        },
        DomainError::EmptyRating => ApiError::Validation {
            message: String::from("Penilaian tidak boleh kosong."),
        },
        DomainError::InvalidBookingCode(_) | DomainError::InvalidBookingStatus(_) => {
            ApiError::Validation {
                message: err.to_string(),
            }
        }
    }
}

/// Maps a persistence failure to an internal API error with a stable
/// client message.
///
/// The underlying error is logged here with full detail; only
/// `client_message` crosses the API boundary.
#[must_use]
pub fn map_persistence_error(
    context: &str,
    client_message: &str,
    err: &PersistenceError,
) -> ApiError {
    error!(error = %err, "{context}");
    ApiError::Internal {
        message: String::from(client_message),
    }
}
