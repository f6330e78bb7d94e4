// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service layer for the Desain Interior booking backend.
//!
//! Sits between the HTTP surface and persistence: validates requests,
//! runs the authentication/booking/rating flows, and translates failures
//! into the stable client-facing errors. All services work against the
//! [`Datastore`] trait so storage can be substituted in tests.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod bookings;
mod datastore;
mod error;
mod rating;
mod request_response;
mod validation;

#[cfg(test)]
mod tests;

pub use auth::{AuthMethod, AuthenticationService, GoogleProfile};
pub use bookings::BookingService;
pub use datastore::Datastore;
pub use error::{ApiError, AuthError, map_persistence_error, translate_domain_error};
pub use rating::RatingService;
pub use request_response::{
    BookingInfo, CreateBookingRequest, CreateBookingResponse, RatingResponse, RegisterRequest,
    RegisterResponse, UserInfo,
};
pub use validation::{
    RegistrationFields, ValidationError, validate_booking, validate_login, validate_rating,
    validate_registration,
};
