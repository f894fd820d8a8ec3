//! `POST /feed`.

// crates.io
use reqwest::Method;
use serde_json::Value;
// self
use crate::{_prelude::*, client::Client, obs::ResourceKind, schema::BasicFeedItem};

/// Custom items in the user's Monzo feed.
#[derive(Clone, Copy, Debug)]
pub struct FeedResource<'c> {
	client: &'c Client,
}
impl<'c> FeedResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Pushes `item` into the feed of `account_id` (default account when `None`).
	///
	/// `url` is opened when the user taps the item.
	pub async fn create(
		&self,
		item: &BasicFeedItem,
		account_id: Option<&str>,
		url: Option<&Url>,
	) -> Result<Value> {
		let account_id = self.client.accounts().resolve_id(account_id).await?;
		let mut params = vec![
			("account_id".to_owned(), account_id),
			("type".to_owned(), "basic".to_owned()),
		];

		params.extend(item.to_params());

		if let Some(url) = url {
			params.push(("url".to_owned(), url.to_string()));
		}

		self.client.session.request(ResourceKind::Feed, "create", Method::POST, "/feed", &params).await
	}
}
