// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request validation pipelines.
//!
//! Each pipeline checks its required fields sequentially and stops at the
//! first absent one. `Display` on the error is the exact message the client
//! receives with the 400; the wrapped domain error names the failing field
//! for the logs.

use desain_booking_domain::{is_blank, require_fields};
use thiserror::Error;

use crate::request_response::{CreateBookingRequest, RegisterRequest};

/// Validation errors carrying the stable client-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required registration or booking field is absent or blank.
    #[error("Semua field wajib diisi")]
    MissingField(#[source] desain_booking_domain::DomainError),

    /// The login username or password is absent or blank.
    #[error("Username dan password wajib diisi")]
    MissingCredentials,

    /// The rating text is absent or blank.
    #[error("Penilaian tidak boleh kosong.")]
    EmptyRating,
}

/// The validated registration fields, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFields {
    /// The display name.
    pub nama: String,
    /// The username (email).
    pub username: String,
    /// The plain text password (hashed by the persistence layer).
    pub password: String,
    /// The declared position/role label.
    pub posisi: String,
    /// The stored path of the uploaded profile photo.
    pub gambar: String,
}

/// Validates a registration submission.
///
/// The file is checked first, then the text fields, matching the original
/// form's submission order.
///
/// # Errors
///
/// Returns `ValidationError::MissingField` naming the first absent field.
pub fn validate_registration(
    request: &RegisterRequest,
) -> Result<RegistrationFields, ValidationError> {
    require_fields(&[
        ("gambar", request.gambar_path.as_deref()),
        ("nama", request.nama.as_deref()),
        ("username", request.username.as_deref()),
        ("password", request.password.as_deref()),
        ("posisi", request.posisi.as_deref()),
    ])
    .map_err(ValidationError::MissingField)?;

    Ok(RegistrationFields {
        nama: request.nama.clone().unwrap_or_default(),
        username: request.username.clone().unwrap_or_default(),
        password: request.password.clone().unwrap_or_default(),
        posisi: request.posisi.clone().unwrap_or_default(),
        gambar: request.gambar_path.clone().unwrap_or_default(),
    })
}

/// Validates login credentials before any database access.
///
/// # Errors
///
/// Returns `ValidationError::MissingCredentials` if either value is absent
/// or blank.
pub fn validate_login(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<(String, String), ValidationError> {
    match (username, password) {
        (Some(u), Some(p)) if !is_blank(u) && !is_blank(p) => Ok((u.to_string(), p.to_string())),
        _ => Err(ValidationError::MissingCredentials),
    }
}

/// Validates a booking submission.
///
/// `aksesoris` and `jenis_material` are optional and default to empty;
/// everything else must be present and non-blank.
///
/// # Errors
///
/// Returns `ValidationError::MissingField` naming the first absent field.
pub fn validate_booking(request: &CreateBookingRequest) -> Result<(), ValidationError> {
    require_fields(&[
        ("tgl_masuk", request.tgl_masuk.as_deref()),
        ("nama", request.nama.as_deref()),
        ("nohp", request.nohp.as_deref()),
        ("alamat", request.alamat.as_deref()),
        ("tipe_ruang", request.tipe_ruang.as_deref()),
        ("ukuran_ruang", request.ukuran_ruang.as_deref()),
        ("preferensi", request.preferensi.as_deref()),
        ("budget", request.budget.as_deref()),
        ("tema", request.tema.as_deref()),
    ])
    .map_err(ValidationError::MissingField)
}

/// Validates a rating submission.
///
/// # Errors
///
/// Returns `ValidationError::EmptyRating` if the text is absent or blank.
pub fn validate_rating(penilaian: Option<&str>) -> Result<String, ValidationError> {
    match penilaian {
        Some(text) if !is_blank(text) => Ok(text.to_string()),
        _ => Err(ValidationError::EmptyRating),
    }
}
