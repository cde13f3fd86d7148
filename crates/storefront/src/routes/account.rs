//! Account route handlers.
//!
//! Sign-in is a mock: every attempt succeeds and only flips the header
//! label from "Account" to "Profile".

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use spicebox_core::Account;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::notify::HxTrigger;
use crate::state::AppState;

/// Account display data for templates.
#[derive(Clone)]
pub struct AccountView {
    pub signed_in: bool,
    /// Header link text.
    pub label: &'static str,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            signed_in: account.is_signed_in(),
            label: account.state().account_label(),
        }
    }
}

/// Account panel fragment template (for HTMX).
///
/// Also swaps the header link out-of-band.
#[derive(Template, WebTemplate)]
#[template(path = "partials/account.html")]
pub struct AccountTemplate {
    pub account: AccountView,
    pub oob: bool,
}

/// Sign in (HTMX).
#[instrument(skip(state))]
pub async fn login(State(state): State<AppState>) -> Result<Response> {
    let mut trigger = HxTrigger::new();
    let account = state.with_session(|session| {
        session.account.sign_in(&mut trigger);
        AccountView::from(&session.account)
    })?;

    tracing::info!("Shopper signed in");
    add_breadcrumb("account", "Signed in", None);

    Ok((trigger, AccountTemplate { account, oob: true }).into_response())
}
