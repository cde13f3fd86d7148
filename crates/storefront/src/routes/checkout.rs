//! Checkout modal route handlers.
//!
//! The modal only opens for a non-empty cart. Placing an order validates
//! the delivery address, empties the cart and closes the modal; the cart
//! panel is refreshed out-of-band in the same response.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use spicebox_core::{AddressForm, Checkout, CheckoutError, CheckoutMode};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::StoreSession;
use crate::notify::HxTrigger;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Checkout modal display data for templates.
#[derive(Clone)]
pub struct CheckoutView {
    pub open: bool,
    pub guest: bool,
    pub shows_login_form: bool,
}

impl From<&Checkout> for CheckoutView {
    fn from(checkout: &Checkout) -> Self {
        Self {
            open: checkout.is_open(),
            guest: checkout.mode() == CheckoutMode::Guest,
            shows_login_form: checkout.mode().shows_login_form(),
        }
    }
}

/// Guest/registered toggle form data.
#[derive(Debug, Deserialize)]
pub struct ModeForm {
    pub mode: CheckoutMode,
}

/// Checkout modal fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_modal.html")]
pub struct CheckoutModalTemplate {
    pub checkout: CheckoutView,
    pub cart: CartView,
    pub product_name: String,
    /// Values to put back in the address fields.
    pub form: AddressForm,
    /// Re-render the cart panel out-of-band.
    pub refresh_cart: bool,
}

impl CheckoutModalTemplate {
    fn render_for(state: &AppState, session: &StoreSession) -> Self {
        Self {
            checkout: CheckoutView::from(&session.checkout),
            cart: CartView::from(&session.cart),
            product_name: state.featured().name.clone(),
            form: AddressForm::default(),
            refresh_cart: false,
        }
    }
}

/// Open the checkout modal (HTMX).
///
/// With an empty cart the modal stays closed and the shopper is told why.
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> Result<Response> {
    let mut trigger = HxTrigger::new();
    let template = state.with_session(|session| {
        match session.checkout.open(&session.cart, &mut trigger) {
            Ok(summary) => tracing::info!(
                lines = summary.item_count,
                total = %summary.total,
                "Opened checkout"
            ),
            Err(e) => tracing::info!(error = %e, "Checkout blocked"),
        }
        CheckoutModalTemplate::render_for(&state, session)
    })?;

    Ok((trigger, template).into_response())
}

/// Close the checkout modal (HTMX).
#[instrument(skip(state))]
pub async fn close(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.with_session(|session| {
        session.checkout.close();
        CheckoutModalTemplate::render_for(&state, session)
    })
}

/// Switch between guest and registered checkout (HTMX).
#[instrument(skip(state))]
pub async fn mode(
    State(state): State<AppState>,
    Form(form): Form<ModeForm>,
) -> Result<impl IntoResponse> {
    state.with_session(|session| {
        session.checkout.set_mode(form.mode);
        tracing::debug!(mode = %form.mode, "Checkout mode");
        CheckoutModalTemplate::render_for(&state, session)
    })
}

/// Place the order (HTMX).
///
/// An incomplete address keeps the modal open with the entered values and
/// leaves the cart alone.
#[instrument(skip(state, form))]
pub async fn place(
    State(state): State<AppState>,
    Form(form): Form<AddressForm>,
) -> Result<Response> {
    let mut trigger = HxTrigger::new();
    let (template, placed) = state.with_session(|session| {
        let result = session
            .checkout
            .place_order(&mut session.cart, &form, &mut trigger);

        let mut template = CheckoutModalTemplate::render_for(&state, session);
        match result {
            Ok(confirmation) => {
                tracing::info!(
                    order_id = %confirmation.order_id,
                    total = %confirmation.total,
                    lines = confirmation.line_count,
                    mode = %confirmation.mode,
                    "Order placed"
                );
                let order_id = confirmation.order_id.to_string();
                add_breadcrumb(
                    "checkout",
                    "Order placed",
                    Some(&[("order_id", order_id.as_str())]),
                );
                template.refresh_cart = true;
                (template, true)
            }
            Err(CheckoutError::EmptyCart) => {
                tracing::info!("Order blocked: cart is empty");
                (template, false)
            }
            Err(CheckoutError::InvalidAddress { field, error }) => {
                tracing::debug!(field, error = %error, "Order blocked: invalid address");
                template.form = form;
                (template, false)
            }
        }
    })?;

    let trigger = if placed {
        trigger.cart_updated()
    } else {
        trigger
    };
    Ok((trigger, template).into_response())
}
