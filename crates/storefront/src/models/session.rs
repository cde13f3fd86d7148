//! Everything the store page can change, in one place.
//!
//! The page is a single shopper's view, so one `StoreSession` lives in the
//! application state. Handlers take the lock for the whole mutation and
//! render from the same guard, so every event sees the result of the one
//! before it.

use spicebox_core::{
    Account, Cart, Catalog, Checkout, Gallery, Product, PromoOutcome, VariantKey,
};

/// Mutable store page state.
#[derive(Debug, Clone)]
pub struct StoreSession {
    pub cart: Cart,
    pub account: Account,
    pub checkout: Checkout,
    pub gallery: Gallery,
    /// Variant highlighted in the size selector.
    pub selected_variant: VariantKey,
    /// Last promo code result, shown under the promo field.
    pub promo: Option<PromoOutcome>,
}

impl StoreSession {
    /// A fresh session: empty cart, signed out, first variant selected.
    #[must_use]
    pub fn new(catalog: &Catalog, product: &Product) -> Self {
        let selected_variant = product
            .variants
            .first()
            .map_or_else(|| VariantKey::new(""), |variant| variant.key.clone());

        Self {
            cart: Cart::new(catalog.currency_code),
            account: Account::default(),
            checkout: Checkout::default(),
            gallery: Gallery::new(product),
            selected_variant,
            promo: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_selects_first_variant() {
        let catalog = Catalog::builtin();
        let product = catalog.featured().unwrap();
        let session = StoreSession::new(&catalog, product);

        assert_eq!(session.selected_variant.as_str(), "100g");
        assert!(session.cart.is_empty());
        assert!(!session.account.is_signed_in());
        assert!(!session.checkout.is_open());
        assert_eq!(session.gallery.active(), None);
        assert!(session.promo.is_none());
    }
}
