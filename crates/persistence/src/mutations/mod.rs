// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Most mutations use Diesel DSL and are backend-agnostic, with minimal use of
//! backend-specific helpers (e.g., `last_insert_rowid()` for `SQLite`).
//!
//! ## Module Organization
//!
//! - `users` — Account creation, Google merge-on-login, rating updates
//! - `sessions` — Session creation, logout deletion, expiry sweep
//! - `bookings` — Transactional booking insertion with code generation
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported from
//! the `backend` module. All other code uses Diesel DSL exclusively.

pub mod bookings;
pub mod sessions;
pub mod users;

// Re-export backend-specific mutation functions used by lib.rs
pub use bookings::{create_booking_mysql, create_booking_sqlite};
pub use sessions::{
    create_session_mysql, create_session_sqlite, delete_expired_sessions_mysql,
    delete_expired_sessions_sqlite, delete_session_mysql, delete_session_sqlite,
    update_session_activity_mysql, update_session_activity_sqlite,
};
pub use users::{
    create_user_mysql, create_user_sqlite, update_rating_mysql, update_rating_sqlite,
    upsert_google_user_mysql, upsert_google_user_sqlite,
};
