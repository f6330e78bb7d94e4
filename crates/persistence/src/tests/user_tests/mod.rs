// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user account persistence: registration, Google merge-on-login,
//! and rating updates.

use crate::tests::create_test_user;
use crate::{GoogleLinkOutcome, Persistence, PersistenceError};

#[test]
fn test_create_user_and_get_by_username() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");

    let user = persistence
        .get_user_by_username("budi@example.com")
        .unwrap()
        .unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "budi@example.com");
    assert_eq!(user.nama, "Budi Santoso");
    assert_eq!(user.gambar, "uploads/1736700000000.jpg");
    assert_eq!(user.posisi, "Designer");
    assert!(user.google_id.is_none());
}

#[test]
fn test_password_is_stored_hashed() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");

    let user = persistence
        .get_user_by_username("budi@example.com")
        .unwrap()
        .unwrap();

    let hash = user.password.unwrap();
    assert_ne!(hash, "rahasia123");
    assert!(persistence.verify_password("rahasia123", &hash).unwrap());
    assert!(!persistence.verify_password("salah", &hash).unwrap());
}

#[test]
fn test_new_user_gets_default_rating() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");

    let user = persistence
        .get_user_by_username("budi@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(user.penilaian, "Belum memberikan penilaian");
}

#[test]
fn test_duplicate_username_rejected_without_write() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut persistence, "budi@example.com");
    assert_eq!(persistence.count_users().unwrap(), 1);

    let result = persistence.create_user(
        "budi@example.com",
        "lain123",
        "Orang Lain",
        "uploads/other.jpg",
        "Client",
    );

    match result {
        Err(PersistenceError::DuplicateUsername(username)) => {
            assert_eq!(username, "budi@example.com");
        }
        other => panic!("Expected DuplicateUsername, got {other:?}"),
    }

    // The failed registration must not have written a row.
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_get_user_by_username_absent_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.get_user_by_username("tidakada@example.com");
    assert!(result.unwrap().is_none());
}

#[test]
fn test_get_user_by_id() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.username, "budi@example.com");

    assert!(persistence.get_user_by_id(9999).unwrap().is_none());
}

#[test]
fn test_google_upsert_creates_new_user() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let (user, outcome) = persistence
        .upsert_google_user(
            "google-123",
            "sari@gmail.com",
            "Sari Dewi",
            "uploads/google-123_1736700000000.jpg",
        )
        .unwrap();

    assert_eq!(outcome, GoogleLinkOutcome::Created);
    assert_eq!(user.username, "sari@gmail.com");
    assert_eq!(user.nama, "Sari Dewi");
    assert_eq!(user.google_id.as_deref(), Some("google-123"));
    assert_eq!(user.posisi, "User");
    assert_eq!(user.penilaian, "Belum memberikan penilaian");
    assert!(user.password.is_none());

    let by_google = persistence
        .get_user_by_google_id("google-123")
        .unwrap()
        .unwrap();
    assert_eq!(by_google.id, user.id);
}

#[test]
fn test_google_upsert_links_existing_local_account() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let local_id = create_test_user(&mut persistence, "budi@example.com");

    let (user, outcome) = persistence
        .upsert_google_user(
            "google-456",
            "budi@example.com",
            "Budi Santoso",
            "uploads/google-456_1736700000000.jpg",
        )
        .unwrap();

    assert_eq!(outcome, GoogleLinkOutcome::LinkedToLocal);
    assert_eq!(user.id, local_id);
    assert_eq!(user.google_id.as_deref(), Some("google-456"));
    assert_eq!(user.gambar, "uploads/google-456_1736700000000.jpg");
    // The local password survives the link.
    assert!(user.password.is_some());

    // No second row was created.
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_google_upsert_repeat_with_same_image_is_a_no_op() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let path = "uploads/google-123_1736700000000.jpg";
    persistence
        .upsert_google_user("google-123", "sari@gmail.com", "Sari Dewi", path)
        .unwrap();

    let (user, outcome) = persistence
        .upsert_google_user("google-123", "sari@gmail.com", "Sari Dewi", path)
        .unwrap();

    assert_eq!(outcome, GoogleLinkOutcome::Unchanged);
    assert_eq!(user.gambar, path);
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_google_upsert_refreshes_changed_image() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .upsert_google_user(
            "google-123",
            "sari@gmail.com",
            "Sari Dewi",
            "uploads/google-123_1.jpg",
        )
        .unwrap();

    let (user, outcome) = persistence
        .upsert_google_user(
            "google-123",
            "sari@gmail.com",
            "Sari Dewi",
            "uploads/google-123_2.jpg",
        )
        .unwrap();

    assert_eq!(outcome, GoogleLinkOutcome::ImageUpdated);
    assert_eq!(user.gambar, "uploads/google-123_2.jpg");
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_update_rating_overwrites_value() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");

    persistence
        .update_rating(user_id, "Pelayanan sangat memuaskan!")
        .unwrap();

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.penilaian, "Pelayanan sangat memuaskan!");
}

#[test]
fn test_update_rating_unknown_user_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.update_rating(9999, "Bagus");

    match result {
        Err(PersistenceError::UserNotFound(msg)) => assert!(msg.contains("9999")),
        other => panic!("Expected UserNotFound, got {other:?}"),
    }
}
