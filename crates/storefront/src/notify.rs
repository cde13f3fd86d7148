//! Delivering notices to the browser.
//!
//! Handlers collect [`Notice`]s while they hold the session and return an
//! [`HxTrigger`] alongside the HTML fragment. HTMX fires the events named in
//! the `HX-Trigger` header; `static/app.js` listens for `notify` and shows
//! each message as an alert, and the header badge refreshes on
//! `cart-updated`.

use std::convert::Infallible;

use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use spicebox_core::{Notice, Notifier};

/// Response header HTMX reads client-side events from.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Client events to fire after a response is swapped in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HxTrigger {
    notices: Vec<Notice>,
    cart_updated: bool,
}

impl HxTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also fire `cart-updated` so the count badge reloads.
    #[must_use]
    pub const fn cart_updated(mut self) -> Self {
        self.cart_updated = true;
        self
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty() && !self.cart_updated
    }

    /// The header value, or `None` when there is nothing to fire.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        if self.is_empty() {
            return None;
        }

        let mut events = serde_json::Map::new();
        if !self.notices.is_empty() {
            let messages = self
                .notices
                .iter()
                .map(|notice| serde_json::Value::String(notice.to_string()))
                .collect();
            events.insert("notify".to_string(), serde_json::Value::Array(messages));
        }
        if self.cart_updated {
            events.insert("cart-updated".to_string(), serde_json::Value::Bool(true));
        }

        let json = ascii_json(&serde_json::Value::Object(events).to_string());
        match HeaderValue::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(error = %e, "Unencodable HX-Trigger value");
                None
            }
        }
    }
}

impl Notifier for HxTrigger {
    fn notify(&mut self, notice: Notice) {
        tracing::info!(notice = %notice, "Notifying shopper");
        self.notices.push(notice);
    }
}

impl IntoResponseParts for HxTrigger {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.header_value() {
            res.headers_mut().insert(HX_TRIGGER, value);
        }
        Ok(res)
    }
}

/// Escape every non-ASCII character as `\uXXXX`.
///
/// Header values must be visible ASCII; prices carry `₹`. Non-ASCII text
/// only occurs inside JSON strings, where the escape is valid.
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0_u16; 2];
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
