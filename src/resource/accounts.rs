//! `GET /accounts` and default-account resolution.

// crates.io
use reqwest::Method;
// self
use crate::{
	_prelude::*, client::Client, obs::ResourceKind, resource::select_default, schema::Account,
};

#[derive(Deserialize)]
struct AccountsEnvelope {
	accounts: Vec<Account>,
}

/// Accounts owned by the authenticated user.
#[derive(Clone, Copy, Debug)]
pub struct AccountsResource<'c> {
	client: &'c Client,
}
impl<'c> AccountsResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Lists accounts, reusing the client's memoized copy unless `refresh` is set.
	///
	/// An empty memoized list is treated as a miss and fetched again.
	pub async fn list(&self, refresh: bool) -> Result<Vec<Account>> {
		if !refresh
			&& let Some(cached) =
				self.client.accounts_cache.lock().clone().filter(|accounts| !accounts.is_empty())
		{
			return Ok(cached);
		}

		let envelope: AccountsEnvelope = self
			.client
			.session
			.request(ResourceKind::Accounts, "list", Method::GET, "/accounts", &[])
			.await?;

		*self.client.accounts_cache.lock() = Some(envelope.accounts.clone());

		Ok(envelope.accounts)
	}

	/// Returns the account to use when the caller did not name one.
	///
	/// See [`select_default`]; an account counts as active while it is not closed.
	pub async fn get_default_account(&self) -> Result<Account> {
		let accounts = self.list(false).await?;

		select_default(&accounts, Account::is_active)
			.cloned()
			.ok_or(Error::CannotDetermineDefaultAccount)
	}

	/// Returns `account_id` when given, otherwise the default account's ID.
	pub(crate) async fn resolve_id(&self, account_id: Option<&str>) -> Result<String> {
		match account_id {
			Some(id) => Ok(id.to_owned()),
			None => Ok(self.get_default_account().await?.id),
		}
	}
}
