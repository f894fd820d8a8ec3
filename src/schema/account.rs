//! Accounts.

// self
use crate::{_prelude::*, schema::common::string_enum};

string_enum! {
	/// Account product type.
	pub enum AccountType {
		/// Legacy prepaid card account.
		UkPrepaid => "uk_prepaid",
		/// Current account.
		UkRetail => "uk_retail",
		/// Joint current account.
		UkRetailJoint => "uk_retail_joint",
	}
}

string_enum! {
	/// Account currency.
	pub enum AccountCurrency {
		/// Pound sterling.
		Gbp => "GBP",
	}
}

/// Bank account owned by the authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	/// Account identifier (`acc_…`).
	pub id: String,
	/// Human-readable description.
	pub description: String,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created: OffsetDateTime,
	/// Whether the account has been closed.
	#[serde(default)]
	pub closed: bool,
	/// Product type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub account_type: Option<AccountType>,
	/// Account currency.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<AccountCurrency>,
	/// ISO country code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub country_code: Option<String>,
	/// Account holders.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub owners: Vec<AccountOwner>,
}
impl Account {
	/// Whether the account can still be used as a default.
	pub fn is_active(&self) -> bool {
		!self.closed
	}
}

/// Holder of an [`Account`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOwner {
	/// Monzo user identifier.
	pub user_id: String,
	/// Full preferred name.
	#[serde(default)]
	pub preferred_name: String,
	/// Preferred first name.
	#[serde(default)]
	pub preferred_first_name: String,
}
