//! Webhooks.

// self
use crate::_prelude::*;

/// Registered webhook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
	/// Webhook identifier (`webhook_…`).
	pub id: String,
	/// Account whose events are delivered.
	pub account_id: String,
	/// Delivery URL.
	pub url: String,
}
