// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for server-side session rows: creation, lookup, deletion, and the
//! expiry sweep.

use crate::Persistence;
use crate::tests::{FUTURE_EXPIRY, PAST_EXPIRY, SWEEP_NOW, create_test_user};

#[test]
fn test_create_and_get_session() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");
    let session_id = persistence
        .create_session("tok-abc123", user_id, FUTURE_EXPIRY)
        .unwrap();

    let session = persistence
        .get_session_by_token("tok-abc123")
        .unwrap()
        .unwrap();

    assert_eq!(session.session_id, session_id);
    assert_eq!(session.session_token, "tok-abc123");
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, FUTURE_EXPIRY);
    assert!(!session.created_at.is_empty());
}

#[test]
fn test_get_session_absent_token_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.get_session_by_token("tok-unknown");
    assert!(result.unwrap().is_none());
}

#[test]
fn test_delete_session_is_idempotent() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");
    persistence
        .create_session("tok-abc123", user_id, FUTURE_EXPIRY)
        .unwrap();

    persistence.delete_session("tok-abc123").unwrap();
    assert!(
        persistence
            .get_session_by_token("tok-abc123")
            .unwrap()
            .is_none()
    );

    // Deleting again (or deleting a token that never existed) still succeeds.
    persistence.delete_session("tok-abc123").unwrap();
    persistence.delete_session("tok-never-existed").unwrap();
}

#[test]
fn test_expiry_sweep_removes_only_expired_sessions() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");
    persistence
        .create_session("tok-stale", user_id, PAST_EXPIRY)
        .unwrap();
    persistence
        .create_session("tok-live", user_id, FUTURE_EXPIRY)
        .unwrap();
    assert_eq!(persistence.count_sessions_for_user(user_id).unwrap(), 2);

    let removed = persistence.delete_expired_sessions(SWEEP_NOW).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(persistence.count_sessions_for_user(user_id).unwrap(), 1);
    assert!(
        persistence
            .get_session_by_token("tok-stale")
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .get_session_by_token("tok-live")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_expiry_sweep_with_nothing_expired_removes_nothing() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");
    persistence
        .create_session("tok-live", user_id, FUTURE_EXPIRY)
        .unwrap();

    let removed = persistence.delete_expired_sessions(SWEEP_NOW).unwrap();

    assert_eq!(removed, 0);
    assert_eq!(persistence.count_sessions_for_user(user_id).unwrap(), 1);
}

#[test]
fn test_update_session_activity() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id = create_test_user(&mut persistence, "budi@example.com");
    let session_id = persistence
        .create_session("tok-abc123", user_id, FUTURE_EXPIRY)
        .unwrap();

    persistence.update_session_activity(session_id).unwrap();

    let session = persistence
        .get_session_by_token("tok-abc123")
        .unwrap()
        .unwrap();
    assert!(!session.last_activity_at.is_empty());
}

#[test]
fn test_session_requires_existing_user() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    // No user rows exist, so the foreign key must reject this insert.
    let result = persistence.create_session("tok-orphan", 999, FUTURE_EXPIRY);
    assert!(result.is_err());
}

#[test]
fn test_deleting_sessions_leaves_other_users_sessions() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let budi = create_test_user(&mut persistence, "budi@example.com");
    let sari = create_test_user(&mut persistence, "sari@example.com");
    persistence
        .create_session("tok-budi", budi, FUTURE_EXPIRY)
        .unwrap();
    persistence
        .create_session("tok-sari", sari, FUTURE_EXPIRY)
        .unwrap();

    persistence.delete_session("tok-budi").unwrap();

    assert_eq!(persistence.count_sessions_for_user(budi).unwrap(), 0);
    assert_eq!(persistence.count_sessions_for_user(sari).unwrap(), 1);
}
