//! Delivery address field types.
//!
//! Each field type validates on construction, so a `DeliveryAddress` built
//! from them is complete by construction.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an address field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is empty after trimming.
    #[error("field cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("field must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input has the wrong number of digits.
    #[error("expected {expected} digits (got {actual})")]
    WrongDigitCount {
        /// Required number of digits.
        expected: usize,
        /// Digits found in the input.
        actual: usize,
    },
    /// The input contains characters other than digits.
    #[error("field must contain only digits")]
    NonDigit,
    /// A PIN code cannot start with zero.
    #[error("PIN code cannot start with 0")]
    LeadingZero,
}

/// A required free-text field (name, street, city).
///
/// ## Constraints
///
/// - Not empty after trimming
/// - At most 120 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredText(String);

impl RequiredText {
    /// Maximum length of a text field.
    pub const MAX_LENGTH: usize = 120;

    /// Parse a required field, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, FieldError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(FieldError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The field as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ten-digit mobile number.
///
/// Spaces, dashes and a leading `+91` country code are stripped first.
///
/// ```
/// use spicebox_core::Phone;
///
/// assert_eq!(Phone::parse("+91 98765 43210").unwrap().as_str(), "9876543210");
/// assert!(Phone::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a phone number.
    pub const DIGITS: usize = 10;

    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digits, or has
    /// the wrong number of digits.
    pub fn parse(s: &str) -> Result<Self, FieldError> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();
        let digits = compact.strip_prefix("+91").unwrap_or(&compact);
        let digits = digits_only(digits, Self::DIGITS)?;
        Ok(Self(digits))
    }

    /// The digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A six-digit Indian postal PIN code.
///
/// ```
/// use spicebox_core::Pincode;
///
/// assert!(Pincode::parse("560001").is_ok());
/// assert!(Pincode::parse("060001").is_err());
/// assert!(Pincode::parse("5600").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Number of digits in a PIN code.
    pub const DIGITS: usize = 6;

    /// Parse a PIN code.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digits, has the
    /// wrong length, or starts with zero.
    pub fn parse(s: &str) -> Result<Self, FieldError> {
        let digits = digits_only(s.trim(), Self::DIGITS)?;
        if digits.starts_with('0') {
            return Err(FieldError::LeadingZero);
        }
        Ok(Self(digits))
    }

    /// The PIN code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn digits_only(s: &str, expected: usize) -> Result<String, FieldError> {
    if s.is_empty() {
        return Err(FieldError::Empty);
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::NonDigit);
    }
    if s.len() != expected {
        return Err(FieldError::WrongDigitCount {
            expected,
            actual: s.len(),
        });
    }
    Ok(s.to_owned())
}
