//! Customer phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input contains no digits at all.
    #[error("phone number cannot be empty")]
    Empty,
    /// Fewer digits than a valid number with area code.
    #[error("phone number must have at least {min} digits (with area code)")]
    TooShort {
        /// Minimum digit count.
        min: usize,
    },
    /// More digits than a valid number.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum digit count.
        max: usize,
    },
}

/// A customer phone number, stored digits-only.
///
/// Parsing strips every non-digit character (spaces, parentheses, dashes,
/// a leading `+`) and validates the Brazilian landline/mobile length: 10 or
/// 11 digits including the two-digit area code. The sanitized form is what
/// the fulfillment API expects in its `customer_phone` filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum digits: area code plus an eight-digit landline number.
    pub const MIN_DIGITS: usize = 10;
    /// Maximum digits: area code plus a nine-digit mobile number.
    pub const MAX_DIGITS: usize = 11;

    /// Parse a `Phone` from free-form input.
    ///
    /// # Errors
    ///
    /// Returns an error when, after stripping non-digits, the number is
    /// empty or outside the 10-11 digit range.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }
        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }
        Ok(Self(digits))
    }

    /// Returns the digits-only number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns the digits-only string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
