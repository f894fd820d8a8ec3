//! Provider descriptor covering the Monzo API, authorization, and token endpoints.
//!
//! The descriptor is validated once at construction time: every endpoint must use HTTPS
//! unless it points at a loopback host, and the API base always ends with `/` so endpoint
//! paths join predictably.

pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Production API base URL.
pub const MONZO_API_URL: &str = "https://api.monzo.com/";
/// Production authorization endpoint.
pub const MONZO_AUTHORIZATION_URL: &str = "https://auth.monzo.com/";
/// Production token endpoint.
pub const MONZO_TOKEN_URL: &str = "https://api.monzo.com/oauth2/token";

/// Preferred client authentication modes for token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
	#[default]
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Base URL every resource path is joined onto.
	pub api: Url,
	/// Authorization endpoint the user visits to grant access.
	pub authorization: Url,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: Url,
}

/// Immutable provider descriptor consumed by the session and OAuth flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Preferred client authentication mechanism.
	pub client_auth_method: ClientAuthMethod,
}
impl ProviderDescriptor {
	/// Creates a new builder.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::default()
	}

	/// Descriptor pointing at the production Monzo endpoints.
	pub fn monzo() -> Self {
		Self {
			endpoints: ProviderEndpoints {
				api: parse_static(MONZO_API_URL),
				authorization: parse_static(MONZO_AUTHORIZATION_URL),
				token: parse_static(MONZO_TOKEN_URL),
			},
			client_auth_method: ClientAuthMethod::ClientSecretPost,
		}
	}

	/// Joins an endpoint path such as `/accounts` onto the API base URL.
	pub fn api_url(&self, endpoint: &str) -> Result<Url> {
		self.endpoints
			.api
			.join(endpoint.trim_start_matches('/'))
			.map_err(|source| crate::error::ConfigError::InvalidDescriptor { source }.into())
	}
}
impl Default for ProviderDescriptor {
	fn default() -> Self {
		Self::monzo()
	}
}

pub(crate) fn parse_static(value: &'static str) -> Url {
	Url::parse(value).expect("Built-in Monzo endpoint must parse.")
}
