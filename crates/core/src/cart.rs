//! The cart manager.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s. The UI addresses lines
//! only by position, so insertion order is preserved and removal shifts
//! later lines down by one. Each product variant appears at most once:
//! adding it again bumps the existing line's quantity.
//!
//! Every operation is synchronous and leaves the cart consistent when it
//! returns. [`Cart::summary`] is a pure projection and can be called after
//! each mutation to refresh the view.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{
    CurrencyCode, LineItemId, Money, ProductId, Quantity, QuantityError, VariantKey,
};

/// Errors returned by cart operations.
///
/// These are boundary errors: a well-behaved view never produces them,
/// since it only renders indices that exist and variants the price table
/// lists.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("line {index} out of range (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },
    #[error("invalid line index: {0:?}")]
    InvalidLineIndex(String),
    #[error("product {product} has no variant {variant}")]
    UnknownVariant {
        product: ProductId,
        variant: VariantKey,
    },
}

/// One product variant in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// `<product id>-<variant>`, e.g. `cumin-001-250g`.
    pub id: LineItemId,
    pub product_id: ProductId,
    pub name: String,
    /// Size/weight option, e.g. `250g`.
    pub variant: VariantKey,
    pub unit_price: Money,
    pub quantity: Quantity,
    /// Image shown next to the line.
    pub image: String,
}

impl LineItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    fn is_same_variant(&self, product: &ProductId, variant: &VariantKey) -> bool {
        &self.product_id == product && &self.variant == variant
    }
}

/// What [`Cart::add_item`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended at `index` with quantity 1.
    Appended { index: usize },
    /// The existing line at `index` now holds `quantity`.
    Incremented { index: usize, quantity: Quantity },
}

impl AddOutcome {
    /// Position of the line that was added to.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Appended { index } | Self::Incremented { index, .. } => *index,
        }
    }
}

/// What [`Cart::set_quantity`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The new quantity was committed.
    Updated { previous: Quantity, current: Quantity },
    /// The request was rejected; the line still holds `current` and the
    /// view should show that value again.
    Reverted {
        current: Quantity,
        reason: QuantityError,
    },
}

impl QuantityChange {
    /// The quantity the line holds after the call.
    #[must_use]
    pub const fn current(&self) -> Quantity {
        match self {
            Self::Updated { current, .. } | Self::Reverted { current, .. } => *current,
        }
    }

    #[must_use]
    pub const fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Totals derived from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Number of lines (the header badge count).
    pub item_count: usize,
    /// Sum of line quantities.
    pub total_quantity: u32,
    /// `Σ unit_price × quantity`.
    pub subtotal: Money,
    /// Always zero until promotions carry real discounts.
    pub discount: Money,
    /// `subtotal − discount`.
    pub total: Money,
}

impl CartSummary {
    /// The summary of an empty cart.
    #[must_use]
    pub const fn empty(currency_code: CurrencyCode) -> Self {
        Self {
            item_count: 0,
            total_quantity: 0,
            subtotal: Money::zero(currency_code),
            discount: Money::zero(currency_code),
            total: Money::zero(currency_code),
        }
    }
}

/// Ordered line items in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    currency_code: CurrencyCode,
    items: Vec<LineItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(CurrencyCode::default())
    }
}

impl Cart {
    /// An empty cart priced in `currency_code`.
    #[must_use]
    pub const fn new(currency_code: CurrencyCode) -> Self {
        Self {
            currency_code,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineOutOfRange`] if there is no such line.
    pub fn get(&self, index: usize) -> Result<&LineItem, CartError> {
        self.items.get(index).ok_or(CartError::LineOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Parse a line index received as text (form field, data attribute).
    ///
    /// The index must be a plain non-negative integer naming an existing
    /// line; nothing is coerced.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidLineIndex`] for non-integers and
    /// [`CartError::LineOutOfRange`] for indices past the end.
    pub fn parse_index(&self, raw: &str) -> Result<usize, CartError> {
        let index = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| CartError::InvalidLineIndex(raw.to_owned()))?;
        self.get(index).map(|_| index)
    }

    /// Add one unit of `variant` of `product`.
    ///
    /// If the variant is already in the cart its quantity goes up by one;
    /// otherwise a line with quantity 1 is appended at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownVariant`] if the product's price table
    /// does not list `variant`. The cart is unchanged.
    pub fn add_item(
        &mut self,
        product: &Product,
        variant: &VariantKey,
    ) -> Result<AddOutcome, CartError> {
        let unit_price = product
            .unit_price(variant, self.currency_code)
            .ok_or_else(|| CartError::UnknownVariant {
                product: product.id.clone(),
                variant: variant.clone(),
            })?;

        if let Some((index, line)) = self
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, line)| line.is_same_variant(&product.id, variant))
        {
            line.quantity = line.quantity.incremented();
            return Ok(AddOutcome::Incremented {
                index,
                quantity: line.quantity,
            });
        }

        self.items.push(LineItem {
            id: LineItemId::for_variant(&product.id, variant),
            product_id: product.id.clone(),
            name: product.name.clone(),
            variant: variant.clone(),
            unit_price,
            quantity: Quantity::ONE,
            image: product.image.clone(),
        });
        Ok(AddOutcome::Appended {
            index: self.items.len() - 1,
        })
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A request below 1 is not an error: the line keeps its quantity and
    /// the result is [`QuantityChange::Reverted`] so the view can restore
    /// the field.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineOutOfRange`] if there is no such line.
    pub fn set_quantity(
        &mut self,
        index: usize,
        requested: i64,
    ) -> Result<QuantityChange, CartError> {
        self.apply_quantity(index, Quantity::new(requested))
    }

    /// Set the quantity of the line at `index` from raw field text.
    ///
    /// Non-numeric text is treated like any other invalid quantity and
    /// reverted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineOutOfRange`] if there is no such line.
    pub fn set_quantity_input(
        &mut self,
        index: usize,
        raw: &str,
    ) -> Result<QuantityChange, CartError> {
        self.apply_quantity(index, Quantity::parse(raw))
    }

    fn apply_quantity(
        &mut self,
        index: usize,
        requested: Result<Quantity, QuantityError>,
    ) -> Result<QuantityChange, CartError> {
        let len = self.items.len();
        let line = self
            .items
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange { index, len })?;

        Ok(match requested {
            Ok(quantity) => {
                let previous = line.quantity;
                line.quantity = quantity;
                QuantityChange::Updated {
                    previous,
                    current: quantity,
                }
            }
            Err(reason) => QuantityChange::Reverted {
                current: line.quantity,
                reason,
            },
        })
    }

    /// Remove the line at `index`; later lines shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineOutOfRange`] if there is no such line.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::LineOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Recompute the totals from the current lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let zero = Money::zero(self.currency_code);
        let subtotal = self
            .items
            .iter()
            .fold(zero, |acc, line| acc.plus(line.line_total()));
        let total_quantity = self
            .items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity.get()));
        let discount = zero;

        CartSummary {
            item_count: self.items.len(),
            total_quantity,
            subtotal,
            discount,
            total: subtotal.minus(discount),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::{Catalog, PriceTable};

    fn cumin() -> Product {
        Catalog::builtin().products.remove(0)
    }

    fn v(key: &str) -> VariantKey {
        VariantKey::new(key)
    }

    fn inr(minor: i64) -> Money {
        Money::from_minor(minor, CurrencyCode::INR)
    }

    #[test]
    fn test_add_same_variant_twice_increments() {
        let product = cumin();
        let mut cart = Cart::new(CurrencyCode::INR);

        assert_eq!(
            cart.add_item(&product, &v("250g")).unwrap(),
            AddOutcome::Appended { index: 0 }
        );
        let outcome = cart.add_item(&product, &v("250g")).unwrap();
        assert_eq!(outcome.index(), 0);

        assert_eq!(cart.len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.id.as_str(), "cumin-001-250g");
        assert_eq!(line.variant, v("250g"));
        assert_eq!(line.unit_price, inr(45_000));
        assert_eq!(line.quantity.get(), 2);

        let summary = cart.summary();
        assert_eq!(summary.subtotal, inr(90_000));
        assert_eq!(summary.total, inr(90_000));
        assert_eq!(summary.total.display(), "₹900.00");
    }

    #[test]
    fn test_add_different_variants_appends_in_order() {
        let product = cumin();
        let mut cart = Cart::default();
        cart.add_item(&product, &v("500g")).unwrap();
        cart.add_item(&product, &v("100g")).unwrap();
        cart.add_item(&product, &v("500g")).unwrap();

        let variants: Vec<_> = cart.items().iter().map(|l| l.variant.as_str()).collect();
        assert_eq!(variants, ["500g", "100g"]);
        assert_eq!(cart.summary().item_count, 2);
        assert_eq!(cart.summary().total_quantity, 3);
    }

    #[test]
    fn test_same_variant_key_on_other_product_is_separate_line() {
        let cumin = cumin();
        let mut turmeric = cumin.clone();
        turmeric.id = ProductId::new("turmeric-001");
        turmeric.name = "Turmeric Powder".to_owned();

        let mut cart = Cart::default();
        cart.add_item(&cumin, &v("100g")).unwrap();
        cart.add_item(&turmeric, &v("100g")).unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_add_unknown_variant_leaves_cart_unchanged() {
        let mut cart = Cart::default();
        let err = cart.add_item(&cumin(), &v("1kg")).unwrap_err();
        assert!(matches!(err, CartError::UnknownVariant { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_commits_positive_values() {
        let mut cart = Cart::default();
        cart.add_item(&cumin(), &v("100g")).unwrap();

        let change = cart.set_quantity(0, 4).unwrap();
        assert_eq!(
            change,
            QuantityChange::Updated {
                previous: Quantity::ONE,
                current: Quantity::new(4).unwrap(),
            }
        );
        assert_eq!(cart.summary().subtotal, inr(79_600));
    }

    #[test]
    fn test_set_quantity_zero_is_reverted() {
        let mut cart = Cart::default();
        cart.add_item(&cumin(), &v("100g")).unwrap();
        cart.set_quantity(0, 3).unwrap();

        let change = cart.set_quantity(0, 0).unwrap();
        assert!(change.is_reverted());
        assert_eq!(change.current().get(), 3);
        assert_eq!(cart.items()[0].quantity.get(), 3);
        assert_eq!(cart.summary().subtotal, inr(59_700));
    }

    #[test]
    fn test_set_quantity_input_rejects_text() {
        let mut cart = Cart::default();
        cart.add_item(&cumin(), &v("250g")).unwrap();

        for raw in ["", "abc", "-1", "0", "0.5", "x2"] {
            let change = cart.set_quantity_input(0, raw).unwrap();
            assert!(change.is_reverted(), "{raw:?} should revert");
            assert_eq!(cart.items()[0].quantity, Quantity::ONE);
        }

        let change = cart.set_quantity_input(0, " 6 ").unwrap();
        assert_eq!(change.current().get(), 6);
    }

    #[test]
    fn test_set_quantity_input_reads_leading_integer() {
        let mut cart = Cart::default();
        cart.add_item(&cumin(), &v("100g")).unwrap();

        let change = cart.set_quantity_input(0, "2.5").unwrap();
        assert_eq!(
            change,
            QuantityChange::Updated {
                previous: Quantity::ONE,
                current: Quantity::new(2).unwrap(),
            }
        );
        cart.set_quantity_input(0, "3abc").unwrap();
        assert_eq!(cart.items()[0].quantity.get(), 3);
        assert_eq!(cart.summary().subtotal, inr(59_700));
    }

    #[test]
    fn test_large_quantities_commit_and_keep_counting() {
        let product = cumin();
        let mut cart = Cart::default();
        cart.add_item(&product, &v("100g")).unwrap();

        let change = cart.set_quantity(0, 10_000).unwrap();
        assert!(!change.is_reverted());
        assert_eq!(cart.items()[0].quantity.get(), 10_000);

        cart.set_quantity(0, 9_999).unwrap();
        cart.add_item(&product, &v("100g")).unwrap();
        assert_eq!(cart.items()[0].quantity.get(), 10_000);
        assert_eq!(cart.summary().subtotal, inr(199_000_000));
    }

    #[test]
    fn test_set_quantity_out_of_range() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.set_quantity(0, 2),
            Err(CartError::LineOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_remove_shifts_later_lines() {
        let product = cumin();
        let mut cart = Cart::default();
        for key in ["100g", "250g", "500g"] {
            cart.add_item(&product, &v(key)).unwrap();
        }

        let removed = cart.remove_item(1).unwrap();
        assert_eq!(removed.variant, v("250g"));
        let variants: Vec<_> = cart.items().iter().map(|l| l.variant.as_str()).collect();
        assert_eq!(variants, ["100g", "500g"]);

        assert!(matches!(
            cart.remove_item(2),
            Err(CartError::LineOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = Cart::new(CurrencyCode::INR).summary();
        assert_eq!(summary, CartSummary::empty(CurrencyCode::INR));
        assert!(summary.total.is_zero());
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn test_clear_resets_summary() {
        let mut cart = Cart::default();
        cart.add_item(&cumin(), &v("500g")).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.summary(), CartSummary::empty(cart.currency_code()));
    }

    #[test]
    fn test_parse_index() {
        let mut cart = Cart::default();
        cart.add_item(&cumin(), &v("100g")).unwrap();

        assert_eq!(cart.parse_index("0"), Ok(0));
        assert_eq!(cart.parse_index(" 0 "), Ok(0));
        assert!(matches!(
            cart.parse_index("1"),
            Err(CartError::LineOutOfRange { .. })
        ));
        assert!(matches!(
            cart.parse_index("-1"),
            Err(CartError::InvalidLineIndex(_))
        ));
        assert!(matches!(
            cart.parse_index("first"),
            Err(CartError::InvalidLineIndex(_))
        ));
    }

    #[test]
    fn test_fractional_prices_sum_exactly() {
        let mut product = cumin();
        product.variants = PriceTable::new([(v("sample"), Decimal::new(1, 1))]);
        let mut cart = Cart::default();
        cart.add_item(&product, &v("sample")).unwrap();
        cart.set_quantity(0, 3).unwrap();
        assert_eq!(cart.summary().subtotal.amount, Decimal::new(3, 1));
    }
}
