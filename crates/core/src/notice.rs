//! User-facing notifications.
//!
//! Operations that need to tell the shopper something produce a [`Notice`]
//! and hand it to a [`Notifier`]. Delivery is fire-and-forget: nothing
//! reads a result back.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::promo::PromoOutcome;
use crate::types::{Money, VariantKey};

/// A short message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    ItemAdded {
        variant: VariantKey,
        product_name: String,
    },
    EmptyCartCheckout,
    InvalidAddress,
    PromoApplied {
        message: String,
    },
    PromoRejected,
    OrderPlaced {
        total: Money,
    },
    SignedIn,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemAdded {
                variant,
                product_name,
            } => write!(f, "{variant} of {product_name} added to cart!"),
            Self::EmptyCartCheckout => {
                f.write_str("Your cart is empty. Please add items before checking out.")
            }
            Self::InvalidAddress => f.write_str("Please fill out all delivery address details."),
            Self::PromoApplied { message } => f.write_str(message),
            Self::PromoRejected => f.write_str("Invalid promo code."),
            Self::OrderPlaced { total } => {
                write!(f, "Order Placed Successfully! Total: {}", total.display())
            }
            Self::SignedIn => f.write_str("Login/Sign Up successful! Welcome to your profile."),
        }
    }
}

impl Notice {
    /// The confirmation shown after a variant lands in the cart.
    #[must_use]
    pub fn item_added(line: &LineItem) -> Self {
        Self::ItemAdded {
            variant: line.variant.clone(),
            product_name: line.name.clone(),
        }
    }
}

impl From<&PromoOutcome> for Notice {
    fn from(outcome: &PromoOutcome) -> Self {
        match outcome {
            PromoOutcome::Applied { .. } => Self::PromoApplied {
                message: outcome.message(),
            },
            PromoOutcome::Invalid => Self::PromoRejected,
        }
    }
}

/// Receives notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// A notifier that keeps every notice in order.
///
/// The storefront drains one per request; tests inspect it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Rendered messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notices.iter().map(ToString::to_string).collect()
    }

    /// Take every notice, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
