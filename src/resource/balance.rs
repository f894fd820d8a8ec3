//! `GET /balance`.

// crates.io
use reqwest::Method;
// self
use crate::{_prelude::*, client::Client, obs::ResourceKind, schema::Balance};

/// Account balance.
#[derive(Clone, Copy, Debug)]
pub struct BalanceResource<'c> {
	client: &'c Client,
}
impl<'c> BalanceResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Returns the balance of `account_id`, or of the default account when `None`.
	pub async fn get(&self, account_id: Option<&str>) -> Result<Balance> {
		let account_id = self.client.accounts().resolve_id(account_id).await?;
		let params = [("account_id".to_owned(), account_id)];

		self.client
			.session
			.request(ResourceKind::Balance, "get", Method::GET, "/balance", &params)
			.await
	}
}
