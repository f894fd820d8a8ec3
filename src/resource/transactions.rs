//! `/transactions`: listing, single lookups, and metadata annotations.

// crates.io
use reqwest::Method;
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{
	_prelude::*, client::Client, error::ConfigError, obs::ResourceKind, schema::Transaction,
};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

#[derive(Deserialize)]
struct TransactionEnvelope {
	transaction: Transaction,
}

#[derive(Deserialize)]
struct TransactionsEnvelope {
	transactions: Vec<Transaction>,
}

/// Filters for [`TransactionsResource::list`].
///
/// Filtering and pagination happen server side: `since` and `before` bound the creation time,
/// `limit` caps the page size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListTransactions {
	/// Account to list; the default account when unset.
	pub account_id: Option<String>,
	/// Only return transactions created at or after this instant.
	pub since: Option<OffsetDateTime>,
	/// Only return transactions created before this instant.
	pub before: Option<OffsetDateTime>,
	/// Maximum number of transactions to return.
	pub limit: Option<u32>,
}
impl ListTransactions {
	/// Targets a specific account.
	pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
		self.account_id = Some(account_id.into());

		self
	}

	/// Sets the lower creation bound.
	pub fn since(mut self, since: OffsetDateTime) -> Self {
		self.since = Some(since);

		self
	}

	/// Sets the upper creation bound.
	pub fn before(mut self, before: OffsetDateTime) -> Self {
		self.before = Some(before);

		self
	}

	/// Caps the number of results.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}
}

/// Card and transfer transactions.
#[derive(Clone, Copy, Debug)]
pub struct TransactionsResource<'c> {
	client: &'c Client,
}
impl<'c> TransactionsResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Fetches one transaction, optionally with the merchant expanded inline.
	pub async fn get(&self, transaction_id: &str, expand_merchant: bool) -> Result<Transaction> {
		let params = if expand_merchant {
			vec![("expand[]".to_owned(), "merchant".to_owned())]
		} else {
			Vec::new()
		};
		let envelope: TransactionEnvelope = self
			.client
			.session
			.request(
				ResourceKind::Transactions,
				"get",
				Method::GET,
				&format!("/transactions/{transaction_id}"),
				&params,
			)
			.await?;

		Ok(envelope.transaction)
	}

	/// Merges `metadata` into the transaction's metadata and returns the updated transaction.
	///
	/// An empty value deletes the key upstream.
	pub async fn annotate<I, K, V>(&self, transaction_id: &str, metadata: I) -> Result<Transaction>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Display,
		V: Into<String>,
	{
		let params = metadata
			.into_iter()
			.map(|(key, value)| (format!("metadata[{key}]"), value.into()))
			.collect::<Vec<_>>();
		let envelope: TransactionEnvelope = self
			.client
			.session
			.request(
				ResourceKind::Transactions,
				"annotate",
				Method::PATCH,
				&format!("/transactions/{transaction_id}"),
				&params,
			)
			.await?;

		Ok(envelope.transaction)
	}

	/// Lists transactions matching `filter`.
	pub async fn list(&self, filter: ListTransactions) -> Result<Vec<Transaction>> {
		let ListTransactions { account_id, since, before, limit } = filter;
		let account_id = self.client.accounts().resolve_id(account_id.as_deref()).await?;
		let mut params = vec![("account_id".to_owned(), account_id)];

		if let Some(since) = since {
			params.push(("since".to_owned(), format_timestamp(since)?));
		}
		if let Some(before) = before {
			params.push(("before".to_owned(), format_timestamp(before)?));
		}
		if let Some(limit) = limit {
			params.push(("limit".to_owned(), limit.to_string()));
		}

		let envelope: TransactionsEnvelope = self
			.client
			.session
			.request(ResourceKind::Transactions, "list", Method::GET, "/transactions", &params)
			.await?;

		Ok(envelope.transactions)
	}
}

/// Midnight (UTC) `days` days before today, handy as a `since` filter.
///
/// Returns `None` when the date would fall before the earliest representable year.
pub fn n_days_ago(days: u32) -> Option<OffsetDateTime> {
	days_before(OffsetDateTime::now_utc(), days)
}

fn days_before(now: OffsetDateTime, days: u32) -> Option<OffsetDateTime> {
	now.to_offset(UtcOffset::UTC)
		.replace_time(time::Time::MIDNIGHT)
		.checked_sub(Duration::days(days.into()))
}

fn format_timestamp(at: OffsetDateTime) -> Result<String> {
	Ok(at.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT).map_err(ConfigError::from)?)
}
