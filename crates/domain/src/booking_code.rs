// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of trailing characters that form the numeric suffix of a code.
const SUFFIX_WIDTH: usize = 3;

/// A human-readable sequential booking identifier.
///
/// Codes are a lowercase `b` followed by a zero-padded 3-digit number
/// (`b001`, `b002`, ...). The numeric part keeps growing past 999; padding
/// widens, it never truncates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingCode {
    /// The full code value (e.g., "b004").
    value: String,
}

impl BookingCode {
    /// Creates a booking code from a sequence number.
    ///
    /// # Arguments
    ///
    /// * `sequence` - The 1-based sequence number
    #[must_use]
    pub fn from_sequence(sequence: u32) -> Self {
        Self {
            value: format!("b{sequence:03}"),
        }
    }

    /// Parses a stored code value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingCode` if the value does not start
    /// with the `b` prefix or the remainder is not numeric.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let Some(rest) = value.strip_prefix('b') else {
            return Err(DomainError::InvalidBookingCode(value.to_string()));
        };
        if rest.len() < SUFFIX_WIDTH || rest.parse::<u32>().is_err() {
            return Err(DomainError::InvalidBookingCode(value.to_string()));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the full code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the numeric value of the last three characters, if numeric.
    ///
    /// Only the trailing 3-character window counts when ranking existing
    /// codes, whatever the total length of the stored value.
    #[must_use]
    pub fn numeric_suffix(code: &str) -> Option<u32> {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() < SUFFIX_WIDTH {
            return None;
        }
        let tail: String = chars[chars.len() - SUFFIX_WIDTH..].iter().collect();
        tail.parse::<u32>().ok()
    }
}

impl std::fmt::Display for BookingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Derives the next sequential booking code from all existing code values.
///
/// Every existing code contributes the numeric value of its last three
/// characters; the maximum plus one becomes the next sequence number.
/// Codes whose trailing window is not numeric are ignored.
///
/// # Arguments
///
/// * `existing` - Every stored booking code value, in any order
///
/// # Returns
///
/// The next code. With no existing bookings this is `b001`.
#[must_use]
pub fn next_booking_code(existing: &[String]) -> BookingCode {
    let max_suffix: u32 = existing
        .iter()
        .filter_map(|code| BookingCode::numeric_suffix(code))
        .max()
        .unwrap_or(0);

    BookingCode::from_sequence(max_suffix + 1)
}
