// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking_code;
mod error;
mod material;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking_code::{BookingCode, next_booking_code};
pub use error::DomainError;
pub use material::MaterialList;
pub use types::{BookingStatus, DEFAULT_GOOGLE_POSITION, DEFAULT_RATING};
pub use validation::{is_blank, require_field, require_fields};
