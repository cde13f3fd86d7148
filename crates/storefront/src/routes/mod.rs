//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Store page
//! GET  /health                 - Health check
//!
//! # Search (HTMX fragments)
//! GET  /search/suggest?q=      - Suggestions list
//!
//! # Product (HTMX fragments)
//! GET  /product/variant?variant= - Price of the chosen size
//! POST /product/thumbnail      - Select thumbnail (returns gallery fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart items and summary
//! POST /cart/add               - Add to cart (returns cart fragment, triggers notify + cart-updated)
//! POST /cart/update            - Update quantity (returns cart fragment)
//! POST /cart/remove            - Remove item (returns cart fragment)
//! GET  /cart/count             - Cart count badge
//! POST /cart/promo             - Check promo code (returns status line)
//!
//! # Checkout (HTMX fragments)
//! POST /checkout/open          - Open modal, or notify that the cart is empty
//! POST /checkout/close         - Close modal
//! POST /checkout/mode          - Guest/registered toggle
//! POST /checkout/place         - Place order
//!
//! # Account
//! POST /account/login          - Mock login/sign up
//! ```

pub mod account;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/variant", get(products::variant))
        .route("/thumbnail", post(products::thumbnail))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/promo", post(cart::promo))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(checkout::open))
        .route("/close", post(checkout::close))
        .route("/mode", post(checkout::mode))
        .route("/place", post(checkout::place))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Store page
        .route("/", get(home::home))
        // Search suggestions
        .nest("/search", search::router())
        // Product panel
        .nest("/product", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout modal
        .nest("/checkout", checkout_routes())
        // Mock account
        .route("/account/login", post(account::login))
}
