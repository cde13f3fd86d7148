//! Promo code lookup.
//!
//! Codes are matched case-insensitively. Accepting a code only reports the
//! result to the shopper; the cart discount stays zero.

use serde::{Deserialize, Serialize};

/// A promo code as typed, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoCode(String);

impl PromoCode {
    /// The only code the store recognises.
    pub const SAVE10: &'static str = "SAVE10";

    /// Normalize raw input to upper case. Whitespace is kept, so a padded
    /// code does not match.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the code.
    #[must_use]
    pub fn apply(&self) -> PromoOutcome {
        if self.0 == Self::SAVE10 {
            PromoOutcome::Applied {
                code: self.clone(),
                percent_off: 10,
            }
        } else {
            PromoOutcome::Invalid
        }
    }
}

/// Result of checking a promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromoOutcome {
    /// The code is recognised.
    Applied { code: PromoCode, percent_off: u8 },
    /// The code is unknown.
    Invalid,
}

impl PromoOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Status line shown under the promo field.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Applied { code, percent_off } => format!(
                "Coupon {} applied! You would save {percent_off}% in a real application.",
                code.as_str()
            ),
            Self::Invalid => "Invalid promo code.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save10_any_case() {
        for raw in ["SAVE10", "save10", "Save10"] {
            assert!(PromoCode::new(raw).apply().is_applied(), "{raw:?}");
        }
    }

    #[test]
    fn test_padded_code_is_not_recognised() {
        for raw in [" save10", "SAVE10 ", " Save10 "] {
            assert_eq!(PromoCode::new(raw).apply(), PromoOutcome::Invalid, "{raw:?}");
        }
    }

    #[test]
    fn test_applied_message() {
        assert_eq!(
            PromoCode::new("save10").apply().message(),
            "Coupon SAVE10 applied! You would save 10% in a real application."
        );
    }

    #[test]
    fn test_unknown_code() {
        let outcome = PromoCode::new("SAVE20").apply();
        assert_eq!(outcome, PromoOutcome::Invalid);
        assert_eq!(outcome.message(), "Invalid promo code.");
        assert!(!PromoCode::new("").apply().is_applied());
    }
}
