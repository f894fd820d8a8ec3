//! Token introspection.

// self
use crate::_prelude::*;

/// Details about the current access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
	/// Whether the token is valid.
	pub authenticated: bool,
	/// OAuth client the token was issued to.
	pub client_id: String,
	/// User the token acts for.
	pub user_id: String,
}
