//! Account balance.

// self
use crate::{_prelude::*, schema::common};

/// Balance snapshot for one account; amounts are in minor units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Balance {
	/// Available balance.
	pub balance: i64,
	/// Balance including pots.
	pub total_balance: i64,
	/// ISO 4217 currency code.
	pub currency: String,
	/// Amount spent today.
	pub spend_today: i64,
	/// Balance including flexible savings pots.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub balance_including_flexible_savings: Option<i64>,
	/// Currency of the last foreign spend.
	#[serde(
		default,
		deserialize_with = "common::empty_string_as_none",
		skip_serializing_if = "Option::is_none"
	)]
	pub local_currency: Option<String>,
	/// Exchange rate of the last foreign spend.
	#[serde(
		default,
		deserialize_with = "common::number_or_empty",
		skip_serializing_if = "Option::is_none"
	)]
	pub local_exchange_rate: Option<f64>,
	/// Spend today broken down per foreign currency.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub local_spend: Vec<LocalSpend>,
}

/// Spend in a single foreign currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSpend {
	/// Amount spent today in this currency.
	pub spend_today: i64,
	/// ISO 4217 currency code.
	pub currency: String,
}
