// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.
//!
//! Bookings are always scoped to their owner by username value. The listing
//! order follows the original site: newest move-in date first. `tgl_masuk`
//! is stored as ISO-8601 text, so lexicographic descending order is
//! chronological descending order.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::BookingData;
use crate::diesel_schema::tblbooking;
use crate::error::PersistenceError;

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tblbooking)]
struct BookingRow {
    id: i64,
    username: String,
    kode_booking: String,
    tgl_masuk: String,
    nama: String,
    nohp: String,
    alamat: String,
    tipe_ruang: String,
    ukuran_ruang: String,
    preferensi: String,
    aksesoris: String,
    budget: String,
    tema: String,
    jenis_material: String,
    status: String,
}

impl From<BookingRow> for BookingData {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            kode_booking: row.kode_booking,
            tgl_masuk: row.tgl_masuk,
            nama: row.nama,
            nohp: row.nohp,
            alamat: row.alamat,
            tipe_ruang: row.tipe_ruang,
            ukuran_ruang: row.ukuran_ruang,
            preferensi: row.preferensi,
            aksesoris: row.aksesoris,
            budget: row.budget,
            tema: row.tema,
            jenis_material: row.jenis_material,
            status: row.status,
        }
    }
}

backend_fn! {
/// Lists all bookings for a user, newest move-in date first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The owning username
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings_for_user(
    conn: &mut _,
    username: &str,
) -> Result<Vec<BookingData>, PersistenceError> {
    debug!("Listing bookings for username: {}", username);

    let rows: Vec<BookingRow> = tblbooking::table
        .filter(tblbooking::username.eq(username))
        .select(BookingRow::as_select())
        .order_by(tblbooking::tgl_masuk.desc())
        .load(conn)?;

    let bookings: Vec<BookingData> = rows.into_iter().map(BookingData::from).collect();

    Ok(bookings)
}
}

backend_fn! {
/// Lists every stored booking code.
///
/// Used by the read-only next-code preview; the authoritative code for an
/// insert is generated inside the insert transaction instead.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_booking_codes(conn: &mut _) -> Result<Vec<String>, PersistenceError> {
    debug!("Listing booking codes");

    let codes: Vec<String> = tblbooking::table
        .select(tblbooking::kode_booking)
        .load(conn)?;

    Ok(codes)
}
}

backend_fn! {
/// Counts the total number of bookings.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_bookings(conn: &mut _) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    debug!("Counting bookings");

    let count: i64 = tblbooking::table.select(count(tblbooking::id)).first(conn)?;

    Ok(count)
}
}
