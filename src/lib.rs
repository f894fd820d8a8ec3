//! Typed async client for the Monzo banking API: OAuth 2.0 authorization with a local callback
//! listener, auto-refreshing tokens, and validated schemas for accounts, pots, and transactions.
//!
//! ```no_run
//! # async fn demo() -> monzo_api::error::Result<()> {
//! use monzo_api::client::Client;
//!
//! let client = Client::load().await?;
//! let account = client.accounts().get_default_account().await?;
//! let balance = client.balance().get(Some(&account.id)).await?;
//!
//! println!("{}: {} {}", account.description, balance.balance, balance.currency);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod session;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::TokenRecord,
		client::Client,
		http::ReqwestHttpClient,
		provider::ProviderDescriptor,
		store::{MemorySettingsStore, Settings, SettingsStore},
	};

	/// Access token seeded into every test client.
	pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
	/// Refresh token seeded into every test client.
	pub const TEST_REFRESH_TOKEN: &str = "test-refresh-token";
	/// Client identifier seeded into every test client.
	pub const TEST_CLIENT_ID: &str = "oauth2client_test";
	/// Client secret seeded into every test client.
	pub const TEST_CLIENT_SECRET: &str = "mnzconf.test-secret";

	/// Builds a descriptor whose API, authorization, and token endpoints all live on the mock
	/// server rooted at `base`.
	pub fn test_descriptor(base: &str) -> ProviderDescriptor {
		let base = Url::parse(base).expect("Mock server base URL should parse.");

		ProviderDescriptor::builder()
			.api_endpoint(base.clone())
			.authorization_endpoint(
				base.join("/authorize").expect("Mock authorization endpoint should join."),
			)
			.token_endpoint(base.join("/oauth2/token").expect("Mock token endpoint should join."))
			.build()
			.expect("Mock descriptor should build.")
	}

	/// Token record that stays valid for an hour.
	pub fn test_token() -> TokenRecord {
		TokenRecord::builder()
			.access_token(TEST_ACCESS_TOKEN)
			.refresh_token(TEST_REFRESH_TOKEN)
			.expires_in(Duration::hours(1))
			.build()
			.expect("Test token fixture should build.")
	}

	/// Settings carrying the test credentials and the provided token.
	pub fn test_settings(token: TokenRecord) -> Settings {
		Settings::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, token)
	}

	/// Constructs a [`Client`] against the mock server with an in-memory settings store.
	pub fn build_test_client(base: &str) -> (Client, Arc<MemorySettingsStore>) {
		build_test_client_with_token(base, test_token())
	}

	/// Same as [`build_test_client`] but seeds the provided token.
	pub fn build_test_client_with_token(
		base: &str,
		token: TokenRecord,
	) -> (Client, Arc<MemorySettingsStore>) {
		let settings = test_settings(token);
		let store_backend = Arc::new(MemorySettingsStore::with_settings(settings.clone()));
		let store: Arc<dyn SettingsStore> = store_backend.clone();
		let client = Client::builder(settings)
			.descriptor(test_descriptor(base))
			.http_client(ReqwestHttpClient::new().expect("HTTP client should build."))
			.settings_store(store)
			.build()
			.expect("Test client should build.");

		(client, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tracing_subscriber as _};
