//! Core types for Spicebox.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod price;
pub mod quantity;
pub mod status;

pub use address::{FieldError, Phone, Pincode, RequiredText};
pub use id::*;
pub use price::{CurrencyCode, Money};
pub use quantity::{Quantity, QuantityError};
pub use status::*;
