//! OAuth client facade over the `oauth2` crate.
//!
//! The facade owns a configured `oauth2` client plus the reqwest transport, and turns token
//! endpoint responses into [`TokenRecord`]s. Monzo returns `user_id` alongside the standard
//! token fields, so the facade decodes it through [`MonzoTokenFields`].

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	ExtraTokenFields, HttpClientError, RedirectUrl, RefreshToken, RequestTokenError,
	StandardRevocableToken, StandardTokenResponse, TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
		BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	error::{AuthorizationError, ConfigError, TransportError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
	provider::{ClientAuthMethod, ProviderDescriptor},
};

/// Extra fields Monzo adds to token responses.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MonzoTokenFields {
	/// Monzo user the token belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
}
impl ExtraTokenFields for MonzoTokenFields {}

/// Token response decoded from Monzo's token endpoint.
pub type MonzoTokenResponse = StandardTokenResponse<MonzoTokenFields, BasicTokenType>;

type UnconfiguredClient = oauth2::Client<
	BasicErrorResponse,
	MonzoTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
>;
type ConfiguredClient = oauth2::Client<
	BasicErrorResponse,
	MonzoTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;
type RequestError = RequestTokenError<HttpClientError<ReqwestError>, BasicErrorResponse>;

/// Grant labels used in error messages and spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantType {
	/// `authorization_code` exchange.
	AuthorizationCode,
	/// `refresh_token` rotation.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 label.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configured OAuth client bound to a descriptor, credentials, and transport.
pub struct OAuthFacade {
	oauth_client: ConfiguredClient,
	http_client: ReqwestHttpClient,
}
impl OAuthFacade {
	/// Builds a facade for the descriptor's authorization and token endpoints.
	pub fn from_descriptor(
		descriptor: &ProviderDescriptor,
		client_id: &str,
		client_secret: &str,
		redirect_uri: Option<&Url>,
		http_client: ReqwestHttpClient,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(descriptor.endpoints.authorization.to_string())
			.map_err(|source| ConfigError::InvalidDescriptor { source })?;
		let token_url = TokenUrl::new(descriptor.endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidDescriptor { source })?;
		let mut oauth_client = UnconfiguredClient::new(ClientId::new(client_id.to_owned()))
			.set_client_secret(ClientSecret::new(client_secret.to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url);

		if let Some(redirect) = redirect_uri {
			let redirect_url = RedirectUrl::new(redirect.to_string())
				.map_err(|source| ConfigError::InvalidDescriptor { source })?;

			oauth_client = oauth_client.set_redirect_uri(redirect_url);
		}
		if matches!(descriptor.client_auth_method, ClientAuthMethod::ClientSecretPost) {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Ok(Self { oauth_client, http_client })
	}

	/// Exchanges an authorization code for a token pair.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenRecord> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.instrumented(meta.clone());
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.request_async(&handle)
			.await
			.map_err(|err| map_request_error(GrantType::AuthorizationCode, meta.take(), err))?;

		map_token_response(response)
	}

	/// Trades a refresh token for a new token pair.
	pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRecord> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.instrumented(meta.clone());
		let secret = RefreshToken::new(refresh_token.to_owned());
		let response = self
			.oauth_client
			.exchange_refresh_token(&secret)
			.request_async(&handle)
			.await
			.map_err(|err| map_request_error(GrantType::RefreshToken, meta.take(), err))?;

		map_token_response(response)
	}
}
impl Debug for OAuthFacade {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthFacade")
			.field("client_id", self.oauth_client.client_id())
			.field("token_uri", self.oauth_client.token_uri())
			.finish()
	}
}

fn map_token_response(response: MonzoTokenResponse) -> Result<TokenRecord> {
	let mut builder = TokenRecord::builder()
		.access_token(response.access_token().secret().to_owned())
		.token_type(response.token_type().as_ref());

	if let Some(refresh) = response.refresh_token() {
		builder = builder.refresh_token(refresh.secret().to_owned());
	}
	if let Some(expires_in) = response.expires_in() {
		let secs = i64::try_from(expires_in.as_secs()).unwrap_or(i64::MAX);

		builder = builder.expires_in(Duration::seconds(secs));
	}
	if let Some(user_id) = &response.extra_fields().user_id {
		builder = builder.user_id(user_id.clone());
	}

	builder.build().map_err(|err| ConfigError::from(err).into())
}

fn map_request_error(grant: GrantType, meta: Option<ResponseMetadata>, err: RequestError) -> Error {
	let status = meta.as_ref().and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => {
			let code = response.error().as_ref().to_string();
			let reason = match response.error_description() {
				Some(description) => format!("{code}: {description}"),
				None => code.clone(),
			};

			classify(grant, Some(&code), status, reason).into()
		},
		RequestTokenError::Request(error) => map_transport_error(grant, status, error),
		RequestTokenError::Parse(error, body) => {
			let preview = String::from_utf8_lossy(&body).into_owned();
			let reason = format!("{error} ({})", truncate_preview(preview));

			classify(grant, None, status, reason).into()
		},
		RequestTokenError::Other(message) => AuthorizationError::TokenEndpoint {
			message: format!("{grant} request failed: {message}"),
			status,
		}
		.into(),
	}
}

fn map_transport_error(
	grant: GrantType,
	status: Option<u16>,
	err: HttpClientError<ReqwestError>,
) -> Error {
	match err {
		HttpClientError::Reqwest(inner) => {
			let inner = *inner;

			if inner.is_builder() {
				return ConfigError::from(inner).into();
			}
			if inner.is_timeout() {
				return AuthorizationError::TokenEndpoint {
					message: format!("{grant} request timed out"),
					status: status.or_else(|| inner.status().map(|code| code.as_u16())),
				}
				.into();
			}

			TransportError::from(inner).into()
		},
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => AuthorizationError::TokenEndpoint {
			message: format!("HTTP client error during {grant} request: {message}"),
			status,
		}
		.into(),
		_ => AuthorizationError::TokenEndpoint {
			message: format!("HTTP client error during {grant} request"),
			status,
		}
		.into(),
	}
}

fn classify(
	grant: GrantType,
	oauth_error: Option<&str>,
	status: Option<u16>,
	reason: String,
) -> AuthorizationError {
	let code = oauth_error.map(str::to_ascii_lowercase);

	match (code.as_deref(), status) {
		(Some("invalid_grant" | "access_denied"), _) => AuthorizationError::InvalidGrant { reason },
		(Some("invalid_client" | "unauthorized_client"), _) | (None, Some(401)) =>
			AuthorizationError::InvalidClient { reason },
		(None, Some(400)) => AuthorizationError::InvalidGrant { reason },
		_ => AuthorizationError::TokenEndpoint {
			message: format!("{grant} request failed: {reason}"),
			status,
		},
	}
}

fn truncate_preview(body: String) -> String {
	const LIMIT: usize = 256;

	if body.chars().count() <= LIMIT {
		return body;
	}

	let mut buf: String = body.chars().take(LIMIT).collect();

	buf.push('…');

	buf
}
