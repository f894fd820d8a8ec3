//! `/pots`: listing, default-pot resolution, deposits, and withdrawals.

// crates.io
use rand::{Rng, distr::Alphanumeric};
use reqwest::Method;
// self
use crate::{
	_prelude::*, client::Client, obs::ResourceKind, resource::select_default, schema::Pot,
};

const DEDUPE_ID_LEN: usize = 16;

#[derive(Deserialize)]
struct PotsEnvelope {
	pots: Vec<Pot>,
}

/// Money movement between an account and a pot.
///
/// Unset IDs resolve to the default account and the default pot of that account; an unset
/// `dedupe_id` is generated so a retried call cannot move money twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PotTransfer {
	/// Amount in minor units.
	pub amount: i64,
	/// Pot to move money into or out of.
	pub pot_id: Option<String>,
	/// Account on the other side of the transfer.
	pub account_id: Option<String>,
	/// Idempotency key.
	pub dedupe_id: Option<String>,
}
impl PotTransfer {
	/// Creates a transfer of `amount` minor units.
	pub fn new(amount: i64) -> Self {
		Self { amount, ..Default::default() }
	}

	/// Targets a specific pot.
	pub fn pot_id(mut self, pot_id: impl Into<String>) -> Self {
		self.pot_id = Some(pot_id.into());

		self
	}

	/// Targets a specific account.
	pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
		self.account_id = Some(account_id.into());

		self
	}

	/// Pins the idempotency key.
	pub fn dedupe_id(mut self, dedupe_id: impl Into<String>) -> Self {
		self.dedupe_id = Some(dedupe_id.into());

		self
	}
}

/// Savings pots.
#[derive(Clone, Copy, Debug)]
pub struct PotsResource<'c> {
	client: &'c Client,
}
impl<'c> PotsResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Lists the pots of `account_id` (default account when `None`), reusing the client's
	/// memoized copy for that account unless `refresh` is set. An empty memoized list is
	/// fetched again.
	pub async fn list(&self, account_id: Option<&str>, refresh: bool) -> Result<Vec<Pot>> {
		let account_id = self.client.accounts().resolve_id(account_id).await?;

		if !refresh
			&& let Some(cached) = self
				.client
				.pots_cache
				.lock()
				.get(&account_id)
				.filter(|pots| !pots.is_empty())
				.cloned()
		{
			return Ok(cached);
		}

		let params = [("current_account_id".to_owned(), account_id.clone())];
		let envelope: PotsEnvelope = self
			.client
			.session
			.request(ResourceKind::Pots, "list", Method::GET, "/pots", &params)
			.await?;

		self.client.pots_cache.lock().insert(account_id, envelope.pots.clone());

		Ok(envelope.pots)
	}

	/// Returns the pot to use when the caller did not name one.
	///
	/// See [`select_default`]; a pot counts as active while it is not deleted.
	pub async fn get_default_pot(&self, account_id: Option<&str>) -> Result<Pot> {
		let pots = self.list(account_id, false).await?;

		select_default(&pots, Pot::is_active).cloned().ok_or(Error::CannotDetermineDefaultPot)
	}

	/// Moves money from an account into a pot.
	pub async fn deposit(&self, transfer: PotTransfer) -> Result<Pot> {
		let (pot_id, params) = self.prepare(transfer, "source_account_id").await?;

		self.client
			.session
			.request(
				ResourceKind::Pots,
				"deposit",
				Method::PUT,
				&format!("/pots/{pot_id}/deposit"),
				&params,
			)
			.await
	}

	/// Moves money from a pot back into an account.
	pub async fn withdraw(&self, transfer: PotTransfer) -> Result<Pot> {
		let (pot_id, params) = self.prepare(transfer, "destination_account_id").await?;

		self.client
			.session
			.request(
				ResourceKind::Pots,
				"withdraw",
				Method::PUT,
				&format!("/pots/{pot_id}/withdraw"),
				&params,
			)
			.await
	}

	async fn prepare(
		&self,
		transfer: PotTransfer,
		account_param: &str,
	) -> Result<(String, Vec<(String, String)>)> {
		let PotTransfer { amount, pot_id, account_id, dedupe_id } = transfer;
		let account_id = self.client.accounts().resolve_id(account_id.as_deref()).await?;
		let pot_id = match pot_id {
			Some(id) => id,
			None => self.get_default_pot(Some(&account_id)).await?.id,
		};
		let dedupe_id = dedupe_id.unwrap_or_else(generate_dedupe_id);
		let params = vec![
			(account_param.to_owned(), account_id),
			("amount".to_owned(), amount.to_string()),
			("dedupe_id".to_owned(), dedupe_id),
		];

		Ok((pot_id, params))
	}
}

fn generate_dedupe_id() -> String {
	rand::rng().sample_iter(Alphanumeric).take(DEDUPE_ID_LEN).map(char::from).collect()
}
