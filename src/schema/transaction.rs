//! Transactions and their merchants.

// self
use crate::{
	_prelude::*,
	schema::common::{self, string_enum},
};

string_enum! {
	/// Spending category.
	pub enum TransactionCategory {
		/// General.
		General => "general",
		/// Eating out.
		EatingOut => "eating_out",
		/// Expenses.
		Expenses => "expenses",
		/// Transport.
		Transport => "transport",
		/// Cash.
		Cash => "cash",
		/// Bills.
		Bills => "bills",
		/// Entertainment.
		Entertainment => "entertainment",
		/// Shopping.
		Shopping => "shopping",
		/// Holidays.
		Holidays => "holidays",
		/// Groceries.
		Groceries => "groceries",
	}
}

string_enum! {
	/// Why a card payment was declined.
	pub enum DeclineReason {
		/// Not enough money in the account.
		InsufficientFunds => "INSUFFICIENT_FUNDS",
		/// Card not yet activated.
		CardInactive => "CARD_INACTIVE",
		/// Card frozen or blocked.
		CardBlocked => "CARD_BLOCKED",
		/// Wrong CVC.
		InvalidCvc => "INVALID_CVC",
		/// Any other reason.
		Other => "OTHER",
	}
}

/// Merchant reference: a bare ID, or the full record when `expand[]=merchant` was requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionMerchant {
	/// Merchant identifier (`merch_…`).
	Id(String),
	/// Expanded merchant record.
	Expanded(Box<Merchant>),
}
impl TransactionMerchant {
	/// Merchant identifier in either form.
	pub fn id(&self) -> &str {
		match self {
			TransactionMerchant::Id(id) => id,
			TransactionMerchant::Expanded(merchant) => &merchant.id,
		}
	}
}

/// Card or bank transfer movement on an account; amounts are in minor units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
	/// Signed amount; negative for spending.
	pub amount: i64,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created: OffsetDateTime,
	/// ISO 4217 currency code.
	pub currency: String,
	/// Statement description.
	pub description: String,
	/// Transaction identifier (`tx_…`).
	pub id: String,
	/// Merchant, when the transaction has one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub merchant: Option<TransactionMerchant>,
	/// Free-form key/value annotations.
	#[serde(default)]
	pub metadata: BTreeMap<String, String>,
	/// User notes.
	#[serde(default)]
	pub notes: String,
	/// Whether this is a top-up.
	#[serde(default)]
	pub is_load: bool,
	/// Settlement instant; `None` while pending.
	#[serde(default, with = "common::rfc3339_or_empty")]
	pub settled: Option<OffsetDateTime>,
	/// Spending category.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<TransactionCategory>,
	/// Decline reason, only present on declined transactions.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub decline_reason: Option<DeclineReason>,
	/// Account balance after the transaction.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_balance: Option<i64>,
	/// Owning account.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_id: Option<String>,
	/// Amount in the local currency of the payment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_amount: Option<i64>,
	/// Local currency of the payment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_currency: Option<String>,
	/// Last update instant.
	#[serde(default, with = "common::rfc3339_or_empty", skip_serializing_if = "Option::is_none")]
	pub updated: Option<OffsetDateTime>,
	/// Deduplication key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dedupe_id: Option<String>,
	/// Whether the transaction counts towards spending totals.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub include_in_spending: Option<bool>,
	/// Other side of a transfer.
	#[serde(
		default,
		deserialize_with = "common::empty_object_as_none",
		skip_serializing_if = "Option::is_none"
	)]
	pub counterparty: Option<Counterparty>,
}

/// Merchant record returned with expanded transactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
	/// Merchant location.
	pub address: MerchantAddress,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created: OffsetDateTime,
	/// Merchant group identifier.
	pub group_id: String,
	/// Merchant identifier.
	pub id: String,
	/// Logo URL.
	#[serde(default)]
	pub logo: String,
	/// Emoji shown next to the merchant.
	#[serde(
		default,
		deserialize_with = "common::empty_string_as_none",
		skip_serializing_if = "Option::is_none"
	)]
	pub emoji: Option<String>,
	/// Display name.
	pub name: String,
	/// Merchant category.
	pub category: TransactionCategory,
	/// Whether the merchant is online-only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub online: Option<bool>,
	/// Whether the merchant is a cash machine.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub atm: Option<bool>,
	/// Provider-specific metadata.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<BTreeMap<String, String>>,
}

/// Merchant location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MerchantAddress {
	/// Street address.
	pub address: String,
	/// City.
	pub city: String,
	/// ISO country code.
	pub country: String,
	/// Latitude in degrees.
	pub latitude: f64,
	/// Longitude in degrees.
	pub longitude: f64,
	/// Postcode.
	pub postcode: String,
	/// Region.
	pub region: String,
	/// Full single-line address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub formatted: Option<String>,
	/// Short single-line address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short_formatted: Option<String>,
	/// Suggested map zoom level.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub zoom_level: Option<u32>,
	/// Whether the location is approximate.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub approximate: Option<bool>,
}

/// Other side of a bank transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
	/// Monzo account identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_id: Option<String>,
	/// Account number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_number: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Sort code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sort_code: Option<String>,
	/// Monzo user identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Beneficiary account type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub beneficiary_account_type: Option<String>,
}
