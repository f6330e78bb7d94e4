// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rating text stored for users who have not rated yet.
///
/// Written at registration and at Google first-login, and used as the
/// column default, so the value is identical everywhere.
pub const DEFAULT_RATING: &str = "Belum memberikan penilaian";

/// Role label stored for accounts created through Google login.
pub const DEFAULT_GOOGLE_POSITION: &str = "User";

/// Lifecycle state of a booking request.
///
/// Only `Pending` is ever written by this system; the later states exist
/// for rows managed outside it and for forward compatibility of readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Submitted, awaiting handling.
    #[default]
    Pending,
    /// Accepted and scheduled.
    Confirmed,
    /// Work finished.
    Completed,
    /// Withdrawn or rejected.
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}
