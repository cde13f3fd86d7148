//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each handler returns the re-rendered cart fragment; lines are addressed
//! by their position, which is validated against the cart before use.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use spicebox_core::{
    Cart, LineItem, Notice, Notifier, ProductId, PromoCode, PromoOutcome, QuantityChange,
    VariantKey,
};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::notify::HxTrigger;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Position in the cart, posted back by the quantity and remove forms.
    pub index: usize,
    pub id: String,
    pub name: String,
    pub variant: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
    pub subtotal: String,
    pub discount: String,
    pub total: String,
    /// Total without the currency sign, shown in the checkout modal.
    pub total_plain: String,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView::new(index, line))
                .collect(),
            item_count: summary.item_count,
            subtotal: summary.subtotal.display(),
            discount: summary.discount.display(),
            total: summary.total.display(),
            total_plain: summary.total.plain(),
        }
    }
}

impl CartItemView {
    fn new(index: usize, line: &LineItem) -> Self {
        Self {
            index,
            id: line.id.to_string(),
            name: line.name.clone(),
            variant: line.variant.to_string(),
            quantity: line.quantity.get(),
            unit_price: line.unit_price.display(),
            line_total: line.line_total().display(),
            image: line.image.clone(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    /// Defaults to the product on the store page.
    pub product_id: Option<ProductId>,
    pub variant: VariantKey,
}

/// Update cart form data.
///
/// Both fields arrive as raw text so a bad quantity can be reverted
/// instead of rejected.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: String,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: String,
}

/// Promo code form data.
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    #[serde(default)]
    pub code: String,
}

/// Promo status line display data.
#[derive(Clone)]
pub struct PromoView {
    pub message: String,
    pub applied: bool,
}

impl From<&PromoOutcome> for PromoView {
    fn from(outcome: &PromoOutcome) -> Self {
        Self {
            message: outcome.message(),
            applied: outcome.is_applied(),
        }
    }
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
    pub product_name: String,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Promo status fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/promo_status.html")]
pub struct PromoStatusTemplate {
    pub promo: Option<PromoView>,
}

impl CartItemsTemplate {
    fn render_for(state: &AppState, cart: &Cart) -> Self {
        Self {
            cart: CartView::from(cart),
            product_name: state.featured().name.clone(),
        }
    }
}

/// Cart fragment.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.with_session(|session| CartItemsTemplate::render_for(&state, &session.cart))
}

/// Add item to cart (HTMX).
///
/// Adding a variant already in the cart bumps its quantity by one.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = match &form.product_id {
        Some(id) => state.catalog().product(id)?,
        None => state.featured(),
    };
    let mut trigger = HxTrigger::new().cart_updated();

    let template = state.with_session(|session| -> Result<CartItemsTemplate> {
        let outcome = session.cart.add_item(product, &form.variant)?;
        let line = session.cart.get(outcome.index())?;
        tracing::info!(
            line_id = %line.id,
            quantity = line.quantity.get(),
            "Added to cart"
        );
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("line_id", line.id.as_str())]),
        );
        trigger.notify(Notice::item_added(line));
        Ok(CartItemsTemplate::render_for(&state, &session.cart))
    })??;

    Ok((trigger, template).into_response())
}

/// Update cart item quantity (HTMX).
///
/// A quantity below one or non-numeric text leaves the line as it was; the
/// fragment comes back with the previous value in the field.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    state.with_session(|session| -> Result<Response> {
        let index = session.cart.parse_index(&form.index)?;
        match session.cart.set_quantity_input(index, &form.quantity)? {
            QuantityChange::Updated { previous, current } => {
                tracing::info!(
                    index,
                    previous = previous.get(),
                    current = current.get(),
                    "Updated quantity"
                );
                let template = CartItemsTemplate::render_for(&state, &session.cart);
                Ok((HxTrigger::new().cart_updated(), template).into_response())
            }
            QuantityChange::Reverted { current, reason } => {
                tracing::debug!(
                    index,
                    current = current.get(),
                    reason = %reason,
                    "Reverted quantity"
                );
                Ok(CartItemsTemplate::render_for(&state, &session.cart).into_response())
            }
        }
    })?
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let template = state.with_session(|session| -> Result<CartItemsTemplate> {
        let index = session.cart.parse_index(&form.index)?;
        let removed = session.cart.remove_item(index)?;
        tracing::info!(line_id = %removed.id, "Removed from cart");
        Ok(CartItemsTemplate::render_for(&state, &session.cart))
    })??;

    Ok((HxTrigger::new().cart_updated(), template).into_response())
}

/// Check a promo code and show the result under the field.
///
/// The cart totals do not change.
#[instrument(skip(state))]
pub async fn promo(
    State(state): State<AppState>,
    Form(form): Form<PromoForm>,
) -> Result<impl IntoResponse> {
    let outcome = PromoCode::new(&form.code).apply();
    tracing::info!(applied = outcome.is_applied(), "Checked promo code");
    let promo = PromoView::from(&outcome);
    state.with_session(|session| session.promo = Some(outcome))?;

    Ok(PromoStatusTemplate { promo: Some(promo) })
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let count = state.with_session(|session| session.cart.summary().item_count)?;
    Ok(CartCountTemplate { count })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use spicebox_core::{Catalog, CurrencyCode};

    use super::*;

    #[test]
    fn test_cart_view_formats_prices() {
        let catalog = Catalog::builtin();
        let product = catalog.featured().unwrap();
        let mut cart = Cart::new(CurrencyCode::INR);
        cart.add_item(product, &VariantKey::new("250g")).unwrap();
        cart.add_item(product, &VariantKey::new("250g")).unwrap();
        cart.add_item(product, &VariantKey::new("100g")).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.items[0].index, 0);
        assert_eq!(view.items[0].id, "cumin-001-250g");
        assert_eq!(view.items[0].unit_price, "₹450.00");
        assert_eq!(view.items[0].line_total, "₹900.00");
        assert_eq!(view.items[1].index, 1);
        assert_eq!(view.subtotal, "₹1099.00");
        assert_eq!(view.discount, "₹0.00");
        assert_eq!(view.total, "₹1099.00");
        assert_eq!(view.total_plain, "1099.00");
    }

    #[test]
    fn test_promo_view() {
        let view = PromoView::from(&PromoCode::new("save10").apply());
        assert!(view.applied);
        assert_eq!(
            view.message,
            "Coupon SAVE10 applied! You would save 10% in a real application."
        );

        let view = PromoView::from(&PromoCode::new("SAVE20").apply());
        assert!(!view.applied);
        assert_eq!(view.message, "Invalid promo code.");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new(CurrencyCode::INR));
        assert!(view.is_empty());
        assert_eq!(view.total, "₹0.00");
    }
}
