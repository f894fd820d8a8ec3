//! Typed records decoded from Monzo API responses.
//!
//! Fields the API documents as optional, or that it has been seen to omit, are `Option`s or
//! carry serde defaults. Enumerations accept any string: unknown values land in an `Unknown`
//! variant and serialize back unchanged.

pub mod account;
pub mod attachment;
pub mod balance;
pub mod feed;
pub mod pot;
pub mod transaction;
pub mod webhook;
pub mod whoami;

mod common;

pub use account::*;
pub use attachment::*;
pub use balance::*;
pub use feed::*;
pub use pot::*;
pub use transaction::*;
pub use webhook::*;
pub use whoami::*;
