//! `GET /ping/whoami`.

// crates.io
use reqwest::Method;
// self
use crate::{_prelude::*, client::Client, obs::ResourceKind, schema::WhoAmI};

/// Token introspection.
#[derive(Clone, Copy, Debug)]
pub struct WhoAmIResource<'c> {
	client: &'c Client,
}
impl<'c> WhoAmIResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Returns details about the current access token.
	pub async fn get(&self) -> Result<WhoAmI> {
		self.client
			.session
			.request(ResourceKind::WhoAmI, "get", Method::GET, "/ping/whoami", &[])
			.await
	}
}
