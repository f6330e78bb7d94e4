// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests: connection setup, migration application, and
//! instance isolation for the in-memory `SQLite` backend.

use crate::Persistence;

#[test]
fn test_in_memory_initialization_succeeds() {
    let persistence = Persistence::new_in_memory();
    assert!(persistence.is_ok());
}

#[test]
fn test_migrations_create_queryable_schema() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    // All three tables must exist and be empty after migration.
    assert_eq!(persistence.count_users().unwrap(), 0);
    assert_eq!(persistence.count_bookings().unwrap(), 0);
    assert!(
        persistence
            .get_session_by_token("tok-none")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_in_memory_instances_are_isolated() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = Persistence::new_in_memory().unwrap();

    first
        .create_user(
            "budi@example.com",
            "rahasia123",
            "Budi Santoso",
            "uploads/1736700000000.jpg",
            "Designer",
        )
        .unwrap();

    assert_eq!(first.count_users().unwrap(), 1);
    assert_eq!(second.count_users().unwrap(), 0);
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}
