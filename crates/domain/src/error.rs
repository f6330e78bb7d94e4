// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is absent or blank.
    MissingField(&'static str),
    /// A stored booking code does not have the `b###` shape.
    InvalidBookingCode(String),
    /// A stored booking status is not a known state.
    InvalidBookingStatus(String),
    /// A rating submission is empty.
    EmptyRating,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Required field '{field}' is missing"),
            Self::InvalidBookingCode(value) => {
                write!(f, "Invalid booking code '{value}': expected b###")
            }
            Self::InvalidBookingStatus(value) => {
                write!(f, "Invalid booking status '{value}'")
            }
            Self::EmptyRating => write!(f, "Rating text cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}
