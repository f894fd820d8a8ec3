//! Savings pots.

// self
use crate::_prelude::*;

/// Sub-account for earmarked savings; amounts are in minor units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
	/// Pot identifier (`pot_…`).
	pub id: String,
	/// Display name.
	pub name: String,
	/// Visual style.
	pub style: String,
	/// Current balance.
	pub balance: i64,
	/// ISO 4217 currency code.
	pub currency: String,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created: OffsetDateTime,
	/// Last update instant.
	#[serde(with = "time::serde::rfc3339")]
	pub updated: OffsetDateTime,
	/// Whether the pot has been deleted.
	pub deleted: bool,
	/// Savings goal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub goal_amount: Option<i64>,
	/// Pot product type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub pot_type: Option<String>,
	/// Account the pot belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_account_id: Option<String>,
	/// Whether round-ups feed this pot.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub round_up: Option<bool>,
	/// Whether the pot is locked.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locked: Option<bool>,
}
impl Pot {
	/// Whether the pot can still be used as a default.
	pub fn is_active(&self) -> bool {
		!self.deleted
	}
}
