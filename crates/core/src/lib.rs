//! Spicebox Core - cart manager and shared domain types.
//!
//! This crate holds everything the storefront needs to reason about a
//! shopping session without touching HTML or HTTP:
//! - `storefront` - Axum + HTMX adapter that renders the store page
//! - `cli` - Catalog inspection and scripted cart replays
//!
//! # Architecture
//!
//! The core crate contains only state and pure functions - no I/O, no
//! rendering, no clocks other than the order timestamp. Every mutation is
//! synchronous and runs to completion before returning, so callers that
//! serialize access (one UI event at a time) always observe a consistent
//! cart and summary.
//!
//! # Modules
//!
//! - [`types`] - Newtype keys, money, quantities, address fields and statuses
//! - [`catalog`] - Products, price tables and the product gallery
//! - [`cart`] - The cart manager: add, set quantity, remove, summary
//! - [`checkout`] - Checkout gate, delivery address validation, order placement
//! - [`promo`] - Promo code lookup
//! - [`search`] - Search suggestions over featured product terms
//! - [`account`] - Mock login state
//! - [`notice`] - User-facing notifications and the [`Notifier`] seam

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notice;
pub mod promo;
pub mod search;
pub mod types;

pub use account::Account;
pub use cart::{AddOutcome, Cart, CartError, CartSummary, LineItem, QuantityChange};
pub use catalog::{Catalog, CatalogError, Gallery, PriceTable, Product, Thumbnail, Variant};
pub use checkout::{AddressForm, Checkout, CheckoutError, DeliveryAddress, OrderConfirmation};
pub use notice::{Notice, Notifier, NoticeLog};
pub use promo::{PromoCode, PromoOutcome};
pub use search::Suggestions;
pub use types::*;
