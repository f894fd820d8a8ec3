//! `/webhooks`: list, register, and delete.

// crates.io
use reqwest::Method;
use serde_json::Value;
// self
use crate::{_prelude::*, client::Client, obs::ResourceKind, schema::Webhook};

#[derive(Deserialize)]
struct WebhooksEnvelope {
	webhooks: Vec<Webhook>,
}

#[derive(Deserialize)]
struct WebhookEnvelope {
	webhook: Webhook,
}

/// Webhooks notified about new transactions.
#[derive(Clone, Copy, Debug)]
pub struct WebhooksResource<'c> {
	client: &'c Client,
}
impl<'c> WebhooksResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Lists the webhooks of `account_id` (default account when `None`).
	pub async fn list(&self, account_id: Option<&str>) -> Result<Vec<Webhook>> {
		let account_id = self.client.accounts().resolve_id(account_id).await?;
		let params = [("account_id".to_owned(), account_id)];
		let envelope: WebhooksEnvelope = self
			.client
			.session
			.request(ResourceKind::Webhooks, "list", Method::GET, "/webhooks", &params)
			.await?;

		Ok(envelope.webhooks)
	}

	/// Registers `url` for `account_id` (default account when `None`).
	pub async fn register(&self, url: &Url, account_id: Option<&str>) -> Result<Webhook> {
		let account_id = self.client.accounts().resolve_id(account_id).await?;
		let params = [("account_id".to_owned(), account_id), ("url".to_owned(), url.to_string())];
		let envelope: WebhookEnvelope = self
			.client
			.session
			.request(ResourceKind::Webhooks, "register", Method::POST, "/webhooks", &params)
			.await?;

		Ok(envelope.webhook)
	}

	/// Deletes the webhook `webhook_id`.
	pub async fn delete(&self, webhook_id: &str) -> Result<Value> {
		self.client
			.session
			.request(
				ResourceKind::Webhooks,
				"delete",
				Method::DELETE,
				&format!("/webhooks/{webhook_id}"),
				&[],
			)
			.await
	}
}
