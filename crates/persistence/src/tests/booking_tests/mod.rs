// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for booking persistence: sequential code assignment, per-user
//! listing, and the material list round trip.

use crate::Persistence;
use crate::tests::{create_test_user, insert_booking_with_code, sample_booking};

#[test]
fn test_first_booking_gets_code_b001() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    let booking = sample_booking("budi@example.com");

    let (booking_id, code) = persistence.create_booking(&booking).unwrap();

    assert!(booking_id > 0);
    assert_eq!(code, "b001");
}

#[test]
fn test_booking_codes_are_sequential() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    let booking = sample_booking("budi@example.com");

    let (_, first) = persistence.create_booking(&booking).unwrap();
    let (_, second) = persistence.create_booking(&booking).unwrap();
    let (_, third) = persistence.create_booking(&booking).unwrap();

    assert_eq!(first, "b001");
    assert_eq!(second, "b002");
    assert_eq!(third, "b003");
}

#[test]
fn test_next_code_follows_highest_existing_code() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    // Leave a gap: b002 is missing, the highest code wins.
    insert_booking_with_code(&mut persistence, "budi@example.com", "b001", "2026-01-05");
    insert_booking_with_code(&mut persistence, "budi@example.com", "b003", "2026-01-06");

    let (_, code) = persistence
        .create_booking(&sample_booking("budi@example.com"))
        .unwrap();

    assert_eq!(code, "b004");
}

#[test]
fn test_booking_round_trip_preserves_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    let booking = sample_booking("budi@example.com");

    let (booking_id, code) = persistence.create_booking(&booking).unwrap();

    let rows = persistence
        .list_bookings_for_user("budi@example.com")
        .unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.id, booking_id);
    assert_eq!(row.kode_booking, code);
    assert_eq!(row.username, "budi@example.com");
    assert_eq!(row.tgl_masuk, "2026-02-01");
    assert_eq!(row.nama, "Budi Santoso");
    assert_eq!(row.nohp, "081234567890");
    assert_eq!(row.alamat, "Jl. Merdeka 1, Jakarta");
    assert_eq!(row.tipe_ruang, "Kamar Tidur");
    assert_eq!(row.ukuran_ruang, "3x4");
    assert_eq!(row.preferensi, "Minimalis");
    assert_eq!(row.aksesoris, "Lampu gantung");
    assert_eq!(row.budget, "15000000");
    assert_eq!(row.tema, "Skandinavia");
    assert_eq!(row.status, "pending");
}

#[test]
fn test_material_list_survives_storage() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    let mut booking = sample_booking("budi@example.com");
    booking.jenis_material = String::from("Kayu, Besi, Kaca");

    persistence.create_booking(&booking).unwrap();

    let rows = persistence
        .list_bookings_for_user("budi@example.com")
        .unwrap();
    assert_eq!(rows[0].jenis_material, "Kayu, Besi, Kaca");
}

#[test]
fn test_listing_is_scoped_to_the_requesting_user() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    create_test_user(&mut persistence, "sari@example.com");

    persistence
        .create_booking(&sample_booking("budi@example.com"))
        .unwrap();
    persistence
        .create_booking(&sample_booking("sari@example.com"))
        .unwrap();
    persistence
        .create_booking(&sample_booking("budi@example.com"))
        .unwrap();

    let budi_rows = persistence
        .list_bookings_for_user("budi@example.com")
        .unwrap();
    let sari_rows = persistence
        .list_bookings_for_user("sari@example.com")
        .unwrap();

    assert_eq!(budi_rows.len(), 2);
    assert_eq!(sari_rows.len(), 1);
    assert!(budi_rows.iter().all(|b| b.username == "budi@example.com"));
}

#[test]
fn test_listing_orders_by_entry_date_descending() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    insert_booking_with_code(&mut persistence, "budi@example.com", "b001", "2026-01-05");
    insert_booking_with_code(&mut persistence, "budi@example.com", "b002", "2026-03-20");
    insert_booking_with_code(&mut persistence, "budi@example.com", "b003", "2026-02-10");

    let rows = persistence
        .list_bookings_for_user("budi@example.com")
        .unwrap();

    let dates: Vec<&str> = rows.iter().map(|b| b.tgl_masuk.as_str()).collect();
    assert_eq!(dates, vec!["2026-03-20", "2026-02-10", "2026-01-05"]);
}

#[test]
fn test_list_booking_codes_returns_all_codes() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    create_test_user(&mut persistence, "sari@example.com");
    persistence
        .create_booking(&sample_booking("budi@example.com"))
        .unwrap();
    persistence
        .create_booking(&sample_booking("sari@example.com"))
        .unwrap();

    let mut codes = persistence.list_booking_codes().unwrap();
    codes.sort();

    assert_eq!(codes, vec!["b001", "b002"]);
}

#[test]
fn test_count_bookings() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    assert_eq!(persistence.count_bookings().unwrap(), 0);

    persistence
        .create_booking(&sample_booking("budi@example.com"))
        .unwrap();
    persistence
        .create_booking(&sample_booking("budi@example.com"))
        .unwrap();

    assert_eq!(persistence.count_bookings().unwrap(), 2);
}
