// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking listing, creation, and code preview.

use tracing::{debug, info};

use desain_booking_domain::{BookingStatus, MaterialList, next_booking_code};
use desain_booking_persistence::NewBooking;

use crate::datastore::Datastore;
use crate::error::{ApiError, map_persistence_error};
use crate::request_response::{BookingInfo, CreateBookingRequest, CreateBookingResponse};
use crate::validation::validate_booking;

/// Booking service scoped to the authenticated user.
pub struct BookingService;

impl BookingService {
    /// Lists the caller's bookings, newest move-in date first.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `username` - The authenticated username
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the query fails.
    pub fn list_bookings(
        datastore: &mut dyn Datastore,
        username: &str,
    ) -> Result<Vec<BookingInfo>, ApiError> {
        let bookings = datastore.list_bookings_for_user(username).map_err(|err| {
            map_persistence_error(
                "Failed to list bookings",
                "Gagal mengambil data booking",
                &err,
            )
        })?;

        Ok(bookings.into_iter().map(BookingInfo::from).collect())
    }

    /// Validates and stores a booking for the authenticated user.
    ///
    /// The stored booking code is generated inside the insert transaction;
    /// a code submitted by the client is advisory only and the authoritative
    /// value is echoed back in the response.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `username` - The authenticated username (never taken from the body)
    /// * `request` - The submitted booking fields
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a required field is absent, or `Internal` if
    /// the insert fails.
    pub fn create_booking(
        datastore: &mut dyn Datastore,
        username: &str,
        request: CreateBookingRequest,
    ) -> Result<CreateBookingResponse, ApiError> {
        validate_booking(&request)?;

        let materials: MaterialList = MaterialList::from_items(request.jenis_material);
        let booking: NewBooking = NewBooking {
            username: username.to_string(),
            tgl_masuk: request.tgl_masuk.unwrap_or_default(),
            nama: request.nama.unwrap_or_default(),
            nohp: request.nohp.unwrap_or_default(),
            alamat: request.alamat.unwrap_or_default(),
            tipe_ruang: request.tipe_ruang.unwrap_or_default(),
            ukuran_ruang: request.ukuran_ruang.unwrap_or_default(),
            preferensi: request.preferensi.unwrap_or_default(),
            aksesoris: request.aksesoris.unwrap_or_default(),
            budget: request.budget.unwrap_or_default(),
            tema: request.tema.unwrap_or_default(),
            jenis_material: materials.joined(),
            status: BookingStatus::Pending.as_str().to_string(),
        };

        let (booking_id, stored_code): (i64, String) =
            datastore.create_booking(&booking).map_err(|err| {
                map_persistence_error(
                    "Failed to insert booking",
                    "Gagal menyimpan data booking",
                    &err,
                )
            })?;

        if let Some(requested) = request.kode_booking
            && requested != stored_code
        {
            debug!(requested = %requested, stored = %stored_code, "Client booking code superseded");
        }

        info!(booking_id, kode_booking = %stored_code, username = %username, "Booking stored");
        Ok(CreateBookingResponse {
            message: String::from("Booking berhasil dikirim!"),
            kode_booking: stored_code,
        })
    }

    /// Previews the next booking code without reserving it.
    ///
    /// The value is advisory; concurrent inserts may claim it first, in
    /// which case the create response carries the real code.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the code query fails.
    pub fn preview_next_code(datastore: &mut dyn Datastore) -> Result<String, ApiError> {
        let codes: Vec<String> = datastore.list_booking_codes().map_err(|err| {
            map_persistence_error(
                "Failed to read booking codes",
                "Gagal membuat kode booking",
                &err,
            )
        })?;

        Ok(next_booking_code(&codes).value().to_string())
    }
}
