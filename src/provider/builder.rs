//! Builder API for assembling provider descriptors.

// self
use crate::{
	_prelude::*,
	provider::{ClientAuthMethod, ProviderDescriptor, ProviderEndpoints},
};

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// API base URL is mandatory.
	#[error("Missing API endpoint.")]
	MissingApiEndpoint,
	/// Authorization endpoint is mandatory.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is mandatory.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// The API endpoint cannot carry relative paths (e.g. `mailto:` or `data:` URLs).
	#[error("The API endpoint cannot be used as a base URL: {url}.")]
	CannotBeBase {
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug, Default)]
pub struct ProviderDescriptorBuilder {
	/// API base URL.
	pub api_endpoint: Option<Url>,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for exchanges and refreshes.
	pub token_endpoint: Option<Url>,
	/// Preferred client authentication method for the token endpoint.
	pub client_auth_method: ClientAuthMethod,
}
impl ProviderDescriptorBuilder {
	/// Sets the API base URL.
	pub fn api_endpoint(mut self, url: Url) -> Self {
		self.api_endpoint = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the preferred client authentication method.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let mut api = self.api_endpoint.ok_or(ProviderDescriptorError::MissingApiEndpoint)?;
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;

		if api.cannot_be_a_base() {
			return Err(ProviderDescriptorError::CannotBeBase { url: api.to_string() });
		}
		if !api.path().ends_with('/') {
			let path = format!("{}/", api.path());

			api.set_path(&path);
		}

		let descriptor = ProviderDescriptor {
			endpoints: ProviderEndpoints { api, authorization, token },
			client_auth_method: self.client_auth_method,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("api", &self.endpoints.api)?;
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;

		Ok(())
	}
}

/// Returns `true` when the URL targets the local machine.
pub fn is_loopback(url: &Url) -> bool {
	url.host_str().is_some_and(|host| LOOPBACK_HOSTS.contains(&host))
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse descriptor fixture URL.")
	}

	#[test]
	fn rejects_insecure_remote_endpoints() {
		let err = ProviderDescriptor::builder()
			.api_endpoint(url("http://api.example.com/"))
			.authorization_endpoint(url("https://auth.example.com/"))
			.token_endpoint(url("https://api.example.com/oauth2/token"))
			.build()
			.expect_err("Plain HTTP remote endpoints must be rejected.");

		assert!(matches!(err, ProviderDescriptorError::InsecureEndpoint { endpoint: "api", .. }));
	}

	#[test]
	fn accepts_loopback_http_and_normalizes_base() {
		let descriptor = ProviderDescriptor::builder()
			.api_endpoint(url("http://127.0.0.1:8080/v1"))
			.authorization_endpoint(url("http://localhost:8080/authorize"))
			.token_endpoint(url("http://127.0.0.1:8080/oauth2/token"))
			.build()
			.expect("Loopback endpoints should be accepted for local testing.");

		assert_eq!(descriptor.endpoints.api.as_str(), "http://127.0.0.1:8080/v1/");
		assert_eq!(
			descriptor.api_url("/accounts").expect("Path should join.").as_str(),
			"http://127.0.0.1:8080/v1/accounts",
		);
	}

	#[test]
	fn reports_missing_endpoints() {
		let err = ProviderDescriptor::builder()
			.api_endpoint(url("https://api.example.com/"))
			.build()
			.expect_err("Builder should require an authorization endpoint.");

		assert_eq!(err, ProviderDescriptorError::MissingAuthorizationEndpoint);
	}
}
