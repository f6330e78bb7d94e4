// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.
//!
//! Booking-code generation happens inside the insert transaction: the
//! existing codes are read, the next sequential code is derived, and the
//! row is inserted, all in one unit. The UNIQUE constraint on
//! `kode_booking` is the backstop; a collision with a concurrent writer
//! rolls the transaction back and the whole sequence is retried a bounded
//! number of times.

use desain_booking_domain::next_booking_code;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::NewBooking;
use crate::diesel_schema::tblbooking;
use crate::error::PersistenceError;

/// How many times an insert is retried after a booking-code collision.
const CODE_CONFLICT_RETRIES: usize = 3;

backend_fn! {
/// Inserts a booking with a freshly generated booking code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking` - The validated booking fields
///
/// # Returns
///
/// The inserted row ID and the booking code that was stored.
///
/// # Errors
///
/// Returns `DuplicateBookingCode` if every retry collided, or another
/// error if a statement fails.
pub fn create_booking(
    conn: &mut _,
    booking: &NewBooking,
) -> Result<(i64, String), PersistenceError> {
    let mut last_conflict: String = String::new();

    for attempt in 1..=CODE_CONFLICT_RETRIES {
        let result: Result<(i64, String), PersistenceError> = conn.transaction(|conn| {
            let existing: Vec<String> = tblbooking::table
                .select(tblbooking::kode_booking)
                .load::<String>(conn)
                .map_err(PersistenceError::from)?;

            let code: String = next_booking_code(&existing).value().to_string();

            debug!(attempt, "Inserting booking with code: {}", code);

            diesel::insert_into(tblbooking::table)
                .values((
                    tblbooking::username.eq(&booking.username),
                    tblbooking::kode_booking.eq(&code),
                    tblbooking::tgl_masuk.eq(&booking.tgl_masuk),
                    tblbooking::nama.eq(&booking.nama),
                    tblbooking::nohp.eq(&booking.nohp),
                    tblbooking::alamat.eq(&booking.alamat),
                    tblbooking::tipe_ruang.eq(&booking.tipe_ruang),
                    tblbooking::ukuran_ruang.eq(&booking.ukuran_ruang),
                    tblbooking::preferensi.eq(&booking.preferensi),
                    tblbooking::aksesoris.eq(&booking.aksesoris),
                    tblbooking::budget.eq(&booking.budget),
                    tblbooking::tema.eq(&booking.tema),
                    tblbooking::jenis_material.eq(&booking.jenis_material),
                    tblbooking::status.eq(&booking.status),
                ))
                .execute(conn)
                .map_err(PersistenceError::from)?;

            let booking_id: i64 = conn.get_last_insert_rowid()?;

            Ok((booking_id, code))
        });

        match result {
            Ok(created) => return Ok(created),
            Err(PersistenceError::UniqueViolation(msg)) => {
                warn!(attempt, "Booking code collision, retrying: {}", msg);
                last_conflict = msg;
            }
            Err(e) => return Err(e),
        }
    }

    Err(PersistenceError::DuplicateBookingCode(last_conflict))
}
}
