// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Full user row as stored, including the password hash and Google link.
///
/// Callers that expose users over the wire must sanitize this first;
/// the hash and `google_id` never leave the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: i64,
    pub google_id: Option<String>,
    pub username: String,
    /// bcrypt hash, `None` for accounts registered via Google only.
    pub password: Option<String>,
    pub nama: String,
    pub gambar: String,
    pub posisi: String,
    pub penilaian: String,
}

/// Session row backing the `desain_sid` cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Booking row from `tblbooking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingData {
    pub id: i64,
    pub username: String,
    pub kode_booking: String,
    pub tgl_masuk: String,
    pub nama: String,
    pub nohp: String,
    pub alamat: String,
    pub tipe_ruang: String,
    pub ukuran_ruang: String,
    pub preferensi: String,
    pub aksesoris: String,
    pub budget: String,
    pub tema: String,
    pub jenis_material: String,
    pub status: String,
}

/// Validated booking fields ready for insertion.
///
/// The booking code is not part of this struct: it is generated inside the
/// insert transaction and returned to the caller.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub username: String,
    pub tgl_masuk: String,
    pub nama: String,
    pub nohp: String,
    pub alamat: String,
    pub tipe_ruang: String,
    pub ukuran_ruang: String,
    pub preferensi: String,
    pub aksesoris: String,
    pub budget: String,
    pub tema: String,
    pub jenis_material: String,
    pub status: String,
}

/// What the Google merge-on-login actually did to the `user` table.
///
/// `Unchanged` means the stored image path already matched and no
/// image-field write was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleLinkOutcome {
    /// Row already linked, stored image path identical.
    Unchanged,
    /// Row already linked, image path refreshed.
    ImageUpdated,
    /// Existing local account linked to the Google identity.
    LinkedToLocal,
    /// A new user row was created.
    Created,
}
