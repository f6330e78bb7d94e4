// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use desain_booking_persistence::Persistence;

use crate::{
    AuthMethod, AuthenticationService, CreateBookingRequest, GoogleProfile, RegisterRequest,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        nama: Some(String::from("Budi Santoso")),
        username: Some(username.to_string()),
        password: Some(String::from("rahasia123")),
        posisi: Some(String::from("Designer")),
        gambar_path: Some(String::from("uploads/1736700000000.jpg")),
    }
}

/// Registers a user with the standard fixture password `rahasia123`.
pub fn register_test_user(persistence: &mut Persistence, username: &str) {
    AuthenticationService::register(persistence, &create_register_request(username))
        .expect("Failed to register test user");
}

pub fn local_login(username: &str, password: &str) -> AuthMethod {
    AuthMethod::Local {
        username: username.to_string(),
        password: password.to_string(),
    }
}

pub fn create_google_profile(google_id: &str, email: &str) -> GoogleProfile {
    GoogleProfile {
        google_id: google_id.to_string(),
        email: email.to_string(),
        display_name: String::from("Budi Santoso"),
        image_path: format!("uploads/{google_id}_1736700000000.jpg"),
    }
}

pub fn create_booking_request() -> CreateBookingRequest {
    CreateBookingRequest {
        kode_booking: None,
        tgl_masuk: Some(String::from("2026-02-01")),
        nama: Some(String::from("Budi Santoso")),
        nohp: Some(String::from("081234567890")),
        alamat: Some(String::from("Jl. Merdeka No. 1")),
        tipe_ruang: Some(String::from("Ruang Tamu")),
        ukuran_ruang: Some(String::from("4x5")),
        preferensi: Some(String::from("Minimalis")),
        aksesoris: Some(String::from("Lampu gantung")),
        budget: Some(String::from("50000000")),
        tema: Some(String::from("Modern")),
        jenis_material: vec![String::from("Kayu"), String::from("Besi")],
    }
}
