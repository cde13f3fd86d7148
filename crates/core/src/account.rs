//! Mock account state for the header login toggle.

use crate::notice::{Notice, Notifier};
use crate::types::LoginState;

/// Whether the shopper is signed in. Starts signed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Account {
    state: LoginState,
}

impl Account {
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self.state, LoginState::SignedIn)
    }

    /// Sign in. There is no credential check; every attempt succeeds.
    pub fn sign_in(&mut self, notifier: &mut impl Notifier) {
        self.state = LoginState::SignedIn;
        notifier.notify(Notice::SignedIn);
    }
}
