//! Scripted cart replays.
//!
//! A script is a YAML list of store events applied in order to a fresh
//! cart, the same way the store page applies clicks:
//!
//! ```yaml
//! events:
//!   - add: { variant: 250g }
//!   - add: { variant: 250g }
//!   - set_quantity: { index: 0, quantity: 3 }
//!   - set_quantity: { index: 0, quantity: "abc" }   # reverted
//!   - promo: { code: save10 }
//!   - checkout:
//!       full_name: Asha Rao
//!       phone: "9876543210"
//!       street: 12 MG Road
//!       city: Bengaluru
//!       pincode: "560001"
//! ```
//!
//! # Usage
//!
//! ```bash
//! spicebox replay session.yaml --catalog catalog.json
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use spicebox_core::{
    AddressForm, Cart, CartError, CartSummary, Catalog, CatalogError, Checkout, Notice,
    NoticeLog, Notifier, OrderConfirmation, ProductId, PromoCode, QuantityChange, VariantKey,
};
use thiserror::Error;
use tracing::{debug, info};

use super::catalog::{self, LoadError};

/// Errors running a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// An event referred to a line, product or variant that does not exist.
    #[error("event {step}: {source}")]
    Step { step: usize, source: StepError },
}

/// Why a single event was rejected.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A replay script.
#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// One store event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Click "Add to Cart" for a size.
    Add {
        variant: VariantKey,
        /// Defaults to the first product in the catalog.
        #[serde(default)]
        product: Option<ProductId>,
    },
    /// Type into a line's quantity field.
    SetQuantity { index: usize, quantity: RawQuantity },
    /// Click a line's remove button.
    Remove { index: usize },
    /// Apply a promo code.
    Promo { code: String },
    /// Open checkout and place an order with this address.
    Checkout(AddressForm),
}

/// A quantity as written in the script.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(i64),
    Fraction(f64),
    Text(String),
}

/// What a replay produced.
#[derive(Debug)]
pub struct ReplayReport {
    pub notices: Vec<Notice>,
    pub promo_status: Option<String>,
    pub orders: Vec<OrderConfirmation>,
    pub summary: CartSummary,
}

/// Cart, checkout and notices for one replay.
pub struct Replay {
    catalog: Catalog,
    cart: Cart,
    checkout: Checkout,
    notices: NoticeLog,
    promo_status: Option<String>,
    orders: Vec<OrderConfirmation>,
}

impl Replay {
    /// Start a replay over a validated catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails validation.
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        catalog.validate()?;
        Ok(Self {
            cart: Cart::new(catalog.currency_code),
            catalog,
            checkout: Checkout::default(),
            notices: NoticeLog::new(),
            promo_status: None,
            orders: Vec::new(),
        })
    }

    /// Apply one event.
    ///
    /// Shopper mistakes (a bad quantity, an empty-cart checkout, an
    /// incomplete address) are not errors: they revert or notify.
    ///
    /// # Errors
    ///
    /// Returns an error for a line index past the end of the cart, an
    /// unknown product or an unknown variant.
    pub fn apply(&mut self, event: &Event) -> Result<(), StepError> {
        match event {
            Event::Add { variant, product } => {
                let product = match product {
                    Some(id) => self.catalog.product(id)?,
                    None => self.catalog.featured().ok_or(CatalogError::Empty)?,
                };
                let outcome = self.cart.add_item(product, variant)?;
                let line = self.cart.get(outcome.index())?;
                debug!(line_id = %line.id, quantity = line.quantity.get(), "add");
                self.notices.notify(Notice::item_added(line));
            }
            Event::SetQuantity { index, quantity } => {
                let change = match quantity {
                    RawQuantity::Number(n) => self.cart.set_quantity(*index, *n)?,
                    RawQuantity::Fraction(f) => {
                        self.cart.set_quantity_input(*index, &f.to_string())?
                    }
                    RawQuantity::Text(text) => self.cart.set_quantity_input(*index, text)?,
                };
                match change {
                    QuantityChange::Updated { current, .. } => {
                        debug!(index, quantity = current.get(), "set_quantity");
                    }
                    QuantityChange::Reverted { current, reason } => {
                        info!(index, kept = current.get(), reason = %reason, "Quantity reverted");
                    }
                }
            }
            Event::Remove { index } => {
                let removed = self.cart.remove_item(*index)?;
                debug!(line_id = %removed.id, "remove");
            }
            Event::Promo { code } => {
                let outcome = PromoCode::new(code).apply();
                self.promo_status = Some(outcome.message());
                self.notices.notify(Notice::from(&outcome));
            }
            Event::Checkout(form) => {
                if self.checkout.open(&self.cart, &mut self.notices).is_err() {
                    return Ok(());
                }
                match self
                    .checkout
                    .place_order(&mut self.cart, form, &mut self.notices)
                {
                    Ok(confirmation) => self.orders.push(confirmation),
                    Err(e) => {
                        info!(error = %e, "Order not placed");
                        self.checkout.close();
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn finish(mut self) -> ReplayReport {
        ReplayReport {
            notices: self.notices.drain(),
            promo_status: self.promo_status,
            orders: self.orders,
            summary: self.cart.summary(),
        }
    }
}

/// Apply every event in `script` to a fresh cart.
///
/// # Errors
///
/// Returns [`ReplayError::Step`] naming the first rejected event (counted
/// from 1).
pub fn replay_script(catalog: Catalog, script: &Script) -> Result<ReplayReport, ReplayError> {
    let mut replay = Replay::new(catalog)?;
    for (i, event) in script.events.iter().enumerate() {
        replay
            .apply(event)
            .map_err(|source| ReplayError::Step { step: i + 1, source })?;
    }
    Ok(replay.finish())
}

/// Load a script and catalog, replay it and log the outcome.
///
/// # Errors
///
/// Returns an error if either file cannot be loaded or an event is rejected.
pub async fn run(script_path: &Path, catalog_path: Option<&Path>) -> Result<(), ReplayError> {
    let catalog = catalog::load(catalog_path).await?;

    info!(path = %script_path.display(), "Loading replay script");
    let yaml = tokio::fs::read_to_string(script_path)
        .await
        .map_err(|source| ReplayError::Read {
            path: script_path.to_path_buf(),
            source,
        })?;
    let script: Script = serde_yaml::from_str(&yaml)?;
    info!(events = script.events.len(), "Parsed script");

    let report = replay_script(catalog, &script)?;

    for notice in &report.notices {
        info!("notice: {notice}");
    }
    if let Some(status) = &report.promo_status {
        info!("promo: {status}");
    }
    for order in &report.orders {
        info!(
            order_id = %order.order_id,
            total = %order.total,
            lines = order.line_count,
            "Order placed"
        );
    }
    info!(
        lines = report.summary.item_count,
        quantity = report.summary.total_quantity,
        subtotal = %report.summary.subtotal,
        discount = %report.summary.discount,
        total = %report.summary.total,
        "Final cart"
    );
    debug!(
        summary = %serde_json::to_string(&report.summary).unwrap_or_default(),
        "Final cart (JSON)"
    );
    Ok(())
}
