//! Store page route handler.
//!
//! Renders the whole page from the current session: search box, product
//! panel, cart with summary and promo field, the (hidden) checkout modal
//! and the account panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use spicebox_core::AddressForm;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::routes::account::AccountView;
use crate::routes::cart::{CartView, PromoView};
use crate::routes::checkout::CheckoutView;
use crate::routes::products::{GalleryView, ProductView};
use crate::state::AppState;

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub product: ProductView,
    pub gallery: GalleryView,
    pub cart: CartView,
    pub product_name: String,
    pub promo: Option<PromoView>,
    pub checkout: CheckoutView,
    pub form: AddressForm,
    pub refresh_cart: bool,
    pub account: AccountView,
    pub oob: bool,
}

/// Display the store page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let product = state.featured();
    let currency_code = state.catalog().currency_code;

    state.with_session(|session| HomeTemplate {
        product: ProductView::new(product, &session.selected_variant, currency_code),
        gallery: GalleryView::new(product, &session.gallery),
        cart: CartView::from(&session.cart),
        product_name: product.name.clone(),
        promo: session.promo.as_ref().map(PromoView::from),
        checkout: CheckoutView::from(&session.checkout),
        form: AddressForm::default(),
        refresh_cart: false,
        account: AccountView::from(&session.account),
        oob: false,
    })
}
