// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Response types serialize with the exact field names the legacy frontend
//! reads, so they double as wire shapes. `UserInfo` is the only view of a
//! user that may leave the service layer.

use desain_booking_persistence::{BookingData, UserData};

/// API request to register a local account.
///
/// All fields arrive from a multipart form and are optional at this stage;
/// validation decides which absences are errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterRequest {
    /// The display name.
    pub nama: Option<String>,
    /// The username (email).
    pub username: Option<String>,
    /// The plain text password.
    pub password: Option<String>,
    /// The declared position/role label.
    pub posisi: Option<String>,
    /// The stored path of the uploaded profile photo, set once the upload
    /// part has been written to disk.
    pub gambar_path: Option<String>,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// A success message.
    pub message: String,
}

/// API response for a stored rating.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RatingResponse {
    /// A success message.
    pub message: String,
}

/// Sanitized view of a user account.
///
/// Excludes the password hash and the Google account link by construction;
/// there is no way to build one that leaks them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The canonical user identifier.
    pub id: i64,
    /// The username (email).
    pub username: String,
    /// The display name.
    pub nama: String,
    /// The profile photo path.
    pub gambar: String,
    /// The position/role label.
    pub posisi: String,
    /// The rating text, or the placeholder for users who have not rated.
    pub penilaian: String,
}

impl From<UserData> for UserInfo {
    fn from(user: UserData) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nama: user.nama,
            gambar: user.gambar,
            posisi: user.posisi,
            penilaian: user.penilaian,
        }
    }
}

/// API request to create a booking.
///
/// `kode_booking` is advisory only: the stored code is generated inside the
/// insert transaction and echoed back in the response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateBookingRequest {
    /// A previewed booking code the client may have fetched; never trusted.
    pub kode_booking: Option<String>,
    /// The move-in date (`YYYY-MM-DD`).
    pub tgl_masuk: Option<String>,
    /// The contact name.
    pub nama: Option<String>,
    /// The contact phone number.
    pub nohp: Option<String>,
    /// The project address.
    pub alamat: Option<String>,
    /// The room type.
    pub tipe_ruang: Option<String>,
    /// The room dimensions.
    pub ukuran_ruang: Option<String>,
    /// The style preference.
    pub preferensi: Option<String>,
    /// Optional accessories notes.
    pub aksesoris: Option<String>,
    /// The budget figure.
    pub budget: Option<String>,
    /// The theme.
    pub tema: Option<String>,
    /// The selected materials; stored joined with `", "`.
    pub jenis_material: Vec<String>,
}

/// API response for a successful booking creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateBookingResponse {
    /// A success message.
    pub message: String,
    /// The booking code that was actually stored.
    pub kode_booking: String,
}

/// A single booking row as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingInfo {
    /// The canonical booking identifier.
    pub id: i64,
    /// The owning username.
    pub username: String,
    /// The booking code (`b###`).
    pub kode_booking: String,
    /// The move-in date.
    pub tgl_masuk: String,
    /// The contact name.
    pub nama: String,
    /// The contact phone number.
    pub nohp: String,
    /// The project address.
    pub alamat: String,
    /// The room type.
    pub tipe_ruang: String,
    /// The room dimensions.
    pub ukuran_ruang: String,
    /// The style preference.
    pub preferensi: String,
    /// Accessories notes, possibly empty.
    pub aksesoris: String,
    /// The budget figure.
    pub budget: String,
    /// The theme.
    pub tema: String,
    /// The joined material list, possibly empty.
    pub jenis_material: String,
    /// The workflow status.
    pub status: String,
}

impl From<BookingData> for BookingInfo {
    fn from(booking: BookingData) -> Self {
        Self {
            id: booking.id,
            username: booking.username,
            kode_booking: booking.kode_booking,
            tgl_masuk: booking.tgl_masuk,
            nama: booking.nama,
            nohp: booking.nohp,
            alamat: booking.alamat,
            tipe_ruang: booking.tipe_ruang,
            ukuran_ruang: booking.ukuran_ruang,
            preferensi: booking.preferensi,
            aksesoris: booking.aksesoris,
            budget: booking.budget,
            tema: booking.tema,
            jenis_material: booking.jenis_material,
            status: booking.status,
        }
    }
}
