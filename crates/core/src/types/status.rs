//! Status enums for the checkout and account flows.

use serde::{Deserialize, Serialize};

/// How the shopper is checking out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// Checkout without an account. The login form is hidden.
    #[default]
    Guest,
    /// Checkout with an existing account. The login form is shown.
    Registered,
}

impl CheckoutMode {
    /// Whether the login form is visible in this mode.
    #[must_use]
    pub const fn shows_login_form(self) -> bool {
        matches!(self, Self::Registered)
    }
}

impl std::fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Registered => write!(f, "registered"),
        }
    }
}

impl std::str::FromStr for CheckoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "registered" => Ok(Self::Registered),
            _ => Err(format!("invalid checkout mode: {s}")),
        }
    }
}

/// Whether the shopper has signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    #[default]
    SignedOut,
    SignedIn,
}

impl LoginState {
    /// Label shown on the account link in the header.
    #[must_use]
    pub const fn account_label(self) -> &'static str {
        match self {
            Self::SignedOut => "Account",
            Self::SignedIn => "Profile",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_mode_round_trips_through_str() {
        for mode in [CheckoutMode::Guest, CheckoutMode::Registered] {
            assert_eq!(mode.to_string().parse::<CheckoutMode>().unwrap(), mode);
        }
        assert!("member".parse::<CheckoutMode>().is_err());
    }

    #[test]
    fn test_login_form_visibility() {
        assert!(!CheckoutMode::Guest.shows_login_form());
        assert!(CheckoutMode::Registered.shows_login_form());
    }

    #[test]
    fn test_account_label() {
        assert_eq!(LoginState::default().account_label(), "Account");
        assert_eq!(LoginState::SignedIn.account_label(), "Profile");
    }
}
