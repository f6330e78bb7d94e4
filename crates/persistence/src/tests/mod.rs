// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod booking_tests;
mod initialization_tests;
mod session_tests;
mod user_tests;

use diesel::prelude::*;

use crate::diesel_schema::tblbooking;
use crate::{BackendConnection, NewBooking, Persistence};

/// An `expires_at` value far in the future, for sessions that must stay live.
pub const FUTURE_EXPIRY: &str = "2099-01-01T00:00:00Z";

/// An `expires_at` value in the past, for sessions that must be swept.
pub const PAST_EXPIRY: &str = "2000-01-01T00:00:00Z";

/// A sweep timestamp between the two expiry constants.
pub const SWEEP_NOW: &str = "2026-01-12T00:00:00Z";

pub fn create_test_user(persistence: &mut Persistence, username: &str) -> i64 {
    persistence
        .create_user(
            username,
            "rahasia123",
            "Budi Santoso",
            "uploads/1736700000000.jpg",
            "Designer",
        )
        .unwrap()
}

pub fn sample_booking(username: &str) -> NewBooking {
    NewBooking {
        username: String::from(username),
        tgl_masuk: String::from("2026-02-01"),
        nama: String::from("Budi Santoso"),
        nohp: String::from("081234567890"),
        alamat: String::from("Jl. Merdeka 1, Jakarta"),
        tipe_ruang: String::from("Kamar Tidur"),
        ukuran_ruang: String::from("3x4"),
        preferensi: String::from("Minimalis"),
        aksesoris: String::from("Lampu gantung"),
        budget: String::from("15000000"),
        tema: String::from("Skandinavia"),
        jenis_material: String::from("Kayu, Besi"),
        status: String::from("pending"),
    }
}

/// Inserts a booking row with an explicit code, bypassing code generation.
///
/// Used to seed out-of-order and gapped code sets that the public API
/// would never produce on its own.
pub fn insert_booking_with_code(
    persistence: &mut Persistence,
    username: &str,
    code: &str,
    tgl_masuk: &str,
) {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => {
            diesel::insert_into(tblbooking::table)
                .values((
                    tblbooking::username.eq(username),
                    tblbooking::kode_booking.eq(code),
                    tblbooking::tgl_masuk.eq(tgl_masuk),
                    tblbooking::nama.eq("Seed"),
                    tblbooking::nohp.eq("0812"),
                    tblbooking::alamat.eq("Jl. Seed"),
                    tblbooking::tipe_ruang.eq("Kamar"),
                    tblbooking::ukuran_ruang.eq("3x3"),
                    tblbooking::preferensi.eq("Minimalis"),
                    tblbooking::aksesoris.eq(""),
                    tblbooking::budget.eq("1000000"),
                    tblbooking::tema.eq("Modern"),
                    tblbooking::jenis_material.eq(""),
                    tblbooking::status.eq("pending"),
                ))
                .execute(conn)
                .unwrap();
        }
        BackendConnection::Mysql(_) => panic!("test seeding uses the SQLite backend"),
    }
}
