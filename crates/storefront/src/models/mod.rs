//! State kept for the shopper between requests.

pub mod session;

pub use session::StoreSession;
