//! Line item quantity type.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input does not start with a number.
    #[error("quantity must be a number (got {0:?})")]
    NotANumber(String),
    /// The value is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    BelowOne(i64),
    /// The value does not fit in a `u32`.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// How many units of a variant a line item holds.
///
/// ## Constraints
///
/// - Always at least 1; a request below 1 is rejected and the line keeps
///   its current quantity.
/// - At most [`Quantity::MAX`].
///
/// Field text is read up to its first non-digit, so `"2.5"` means 2.
///
/// ## Examples
///
/// ```
/// use spicebox_core::Quantity;
///
/// assert_eq!(Quantity::parse("3").unwrap().get(), 3);
/// assert_eq!(Quantity::parse("2.5").unwrap().get(), 2);
/// assert!(Quantity::parse("0").is_err());
/// assert!(Quantity::parse("-2").is_err());
/// assert!(Quantity::parse("two").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Largest quantity a line may carry.
    pub const MAX: u32 = u32::MAX;

    /// Create a quantity from an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is below 1 or above [`Quantity::MAX`].
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::BelowOne(value));
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge { max: Self::MAX })
    }

    /// Parse a quantity typed into a form field.
    ///
    /// Leading whitespace and an optional sign are skipped, then digits
    /// are read up to the first non-digit: `"2.5"` is 2 and `"3abc"` is 3.
    ///
    /// # Errors
    ///
    /// Returns an error if no digits lead the input or the value is out of
    /// range.
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        let trimmed = input.trim_start();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = unsigned.get(..end).unwrap_or_default();
        if digits.is_empty() {
            return Err(QuantityError::NotANumber(input.trim().to_owned()));
        }

        match digits.parse::<i64>() {
            Ok(magnitude) if negative => Self::new(-magnitude),
            Ok(magnitude) => Self::new(magnitude),
            Err(_) if negative => Err(QuantityError::BelowOne(i64::MIN)),
            Err(_) => Err(QuantityError::TooLarge { max: Self::MAX }),
        }
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at [`Quantity::MAX`].
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
