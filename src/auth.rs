//! OAuth token models persisted alongside the client credentials.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
