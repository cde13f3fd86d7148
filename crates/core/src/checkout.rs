//! Checkout gate, delivery address validation and order placement.
//!
//! Checkout only reads the cart until an order is placed; a successful
//! placement is the one place the cart is reset. Payment is not modelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartSummary};
use crate::notice::{Notice, Notifier};
use crate::types::{CheckoutMode, FieldError, Money, OrderId, Phone, Pincode, RequiredText};

/// Errors returned by checkout operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid delivery address: {field} {error}")]
    InvalidAddress {
        field: &'static str,
        error: FieldError,
    },
}

/// Delivery address fields as submitted by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pincode: String,
}

/// A complete, validated delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub full_name: RequiredText,
    pub phone: Phone,
    pub street: RequiredText,
    pub city: RequiredText,
    pub pincode: Pincode,
}

impl DeliveryAddress {
    /// Validate every field of `form`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAddress`] naming the first field that
    /// fails, in form order.
    pub fn parse(form: &AddressForm) -> Result<Self, CheckoutError> {
        fn field<T>(
            name: &'static str,
            result: Result<T, FieldError>,
        ) -> Result<T, CheckoutError> {
            result.map_err(|error| CheckoutError::InvalidAddress { field: name, error })
        }

        Ok(Self {
            full_name: field("full_name", RequiredText::parse(&form.full_name))?,
            phone: field("phone", Phone::parse(&form.phone))?,
            street: field("street", RequiredText::parse(&form.street))?,
            city: field("city", RequiredText::parse(&form.city))?,
            pincode: field("pincode", Pincode::parse(&form.pincode))?,
        })
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub total: Money,
    pub line_count: usize,
    pub mode: CheckoutMode,
    pub address: DeliveryAddress,
    pub placed_at: DateTime<Utc>,
}

/// Checkout modal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkout {
    open: bool,
    mode: CheckoutMode,
}

impl Checkout {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn mode(&self) -> CheckoutMode {
        self.mode
    }

    /// Open the checkout modal for a non-empty cart.
    ///
    /// Returns the summary to show at confirmation time.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] (and notifies the shopper) when
    /// there is nothing to check out. The modal stays closed.
    pub fn open(
        &mut self,
        cart: &Cart,
        notifier: &mut impl Notifier,
    ) -> Result<CartSummary, CheckoutError> {
        if cart.is_empty() {
            notifier.notify(Notice::EmptyCartCheckout);
            return Err(CheckoutError::EmptyCart);
        }
        self.open = true;
        Ok(cart.summary())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Switch between guest and registered checkout.
    pub fn set_mode(&mut self, mode: CheckoutMode) {
        self.mode = mode;
    }

    /// Place the order: validate the address, then empty the cart.
    ///
    /// On success the cart is cleared, the modal closes and the shopper is
    /// told the total. On failure the cart is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart and
    /// [`CheckoutError::InvalidAddress`] when any address field is
    /// missing or malformed; both notify the shopper.
    pub fn place_order(
        &mut self,
        cart: &mut Cart,
        form: &AddressForm,
        notifier: &mut impl Notifier,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.is_empty() {
            notifier.notify(Notice::EmptyCartCheckout);
            return Err(CheckoutError::EmptyCart);
        }

        let address = match DeliveryAddress::parse(form) {
            Ok(address) => address,
            Err(err) => {
                notifier.notify(Notice::InvalidAddress);
                return Err(err);
            }
        };

        let summary = cart.summary();
        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            total: summary.total,
            line_count: summary.item_count,
            mode: self.mode,
            address,
            placed_at: Utc::now(),
        };

        cart.clear();
        self.open = false;
        notifier.notify(Notice::OrderPlaced {
            total: confirmation.total,
        });
        Ok(confirmation)
    }
}
