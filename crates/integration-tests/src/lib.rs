//! Integration tests for Spicebox.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p spicebox-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Store page, search, product panel and cart fragments
//! - `checkout_flow` - Checkout modal, order placement and account toggle
//!
//! Each test drives a fresh in-process router with `tower::ServiceExt::oneshot`;
//! no server or network is involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use spicebox_core::Catalog;
use spicebox_storefront::{config::StorefrontConfig, notify::HX_TRIGGER, state::AppState};
use tower::ServiceExt;

/// Largest response body the helpers will read.
const MAX_BODY: usize = 1024 * 1024;

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Messages from the `notify` event in `HX-Trigger`, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.trigger()
            .and_then(|events| events.get("notify").cloned())
            .and_then(|notify| notify.as_array().cloned())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|message| message.as_str().map(str::to_owned))
            .collect()
    }

    /// Whether `HX-Trigger` fires `cart-updated`.
    #[must_use]
    pub fn cart_updated(&self) -> bool {
        self.trigger()
            .is_some_and(|events| events.get("cart-updated").is_some())
    }

    fn trigger(&self) -> Option<serde_json::Value> {
        let raw = self.headers.get(HX_TRIGGER)?.to_str().ok()?;
        serde_json::from_str(raw).ok()
    }
}

/// A storefront running on the built-in catalog with a fresh session.
#[derive(Clone)]
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Build the router with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog fails validation.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig::from_vars(|_| None).expect("default config");
        let state = AppState::new(config, Catalog::builtin()).expect("builtin catalog");
        Self {
            app: spicebox_storefront::app(state),
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    ///
    /// `form` is already url-encoded, e.g. `index=0&quantity=3`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY)
            .await
            .expect("readable body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
