//! Client-level error types shared across resources, flows, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message returned for HTTP 403 responses.
pub const ACCESS_DENIED_MESSAGE: &str = "Monzo API access denied (HTTP 403 Forbidden). Try to re-authenticate in the Monzo mobile app.";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Settings store failure.
	#[error("{0}")]
	Settings(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// OAuth authorization or token exchange failure.
	#[error(transparent)]
	Authorization(#[from] AuthorizationError),

	/// No account ID was passed and the user owns zero or several active accounts.
	#[error("Cannot determine default account. You need to explicitly pass an account ID.")]
	CannotDetermineDefaultAccount,
	/// No pot ID was passed and the account holds zero or several active pots.
	#[error("Cannot determine default pot. You need to explicitly pass a pot ID.")]
	CannotDetermineDefaultPot,
	/// The API rejected the access token (HTTP 403).
	#[error("{}", ACCESS_DENIED_MESSAGE)]
	AccessDenied,
	/// The API answered with a non-success status.
	#[error("{message}")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Monzo error code, when the body carried one.
		code: Option<String>,
		/// Human-readable message.
		message: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// The response body does not match the expected schema.
	#[error("Response from `{endpoint}` does not match the expected schema.")]
	Decode {
		/// Endpoint path that produced the body.
		endpoint: String,
		/// Structured parsing failure pointing at the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the HTTP status attached to the error, when one exists.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::AccessDenied => Some(403),
			Self::Api { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor contains an invalid URL.
	#[error("Descriptor contains an invalid URL.")]
	InvalidDescriptor {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Redirect URI cannot be used for the local callback listener.
	#[error("Redirect URI `{uri}` is invalid: {reason}.")]
	InvalidRedirect {
		/// Offending URI.
		uri: String,
		/// Why the URI was rejected.
		reason: &'static str,
	},
	/// A timestamp filter cannot be rendered in the API's format.
	#[error("Timestamp cannot be formatted for the API.")]
	InvalidTimestamp(#[from] time::error::Format),
	/// No settings were found; the authorization flow has not run yet.
	#[error("No settings found. You need to run `Client::authorize` first.")]
	MissingSettings,
	/// Token record builder validation failed.
	#[error("Unable to build token record.")]
	TokenBuild(#[from] crate::auth::TokenRecordBuilderError),
	/// Descriptor builder validation failed.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while authorizing or exchanging tokens.
#[derive(Debug, ThisError)]
pub enum AuthorizationError {
	/// The callback carried a `state` different from the one issued.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// The user or provider refused consent.
	#[error("Authorization was denied: {reason}.")]
	Denied {
		/// Provider-supplied `error`/`error_description`.
		reason: String,
	},
	/// The callback URL lacks a required query parameter.
	#[error("Authorization callback is missing the `{param}` parameter.")]
	MissingCallbackParam {
		/// Parameter name.
		param: &'static str,
	},
	/// No callback arrived before the deadline.
	#[error("No authorization callback arrived within {timeout:?}.")]
	CallbackTimeout {
		/// Deadline that elapsed.
		timeout: std::time::Duration,
	},
	/// The caller cancelled the wait.
	#[error("Waiting for the authorization callback was cancelled.")]
	CallbackCancelled,
	/// Provider rejected the grant (bad code or refresh token).
	#[error("Provider rejected the grant: {reason}.")]
	InvalidGrant {
		/// Provider- or client-supplied reason string.
		reason: String,
	},
	/// Client authentication failed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Provider- or client-supplied reason string.
		reason: String,
	},
	/// Token endpoint returned an unexpected response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Cached token has expired and no refresh token is available.
	#[error("Access token has expired and no refresh token is available.")]
	MissingRefreshToken,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Monzo API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport or while listening for callbacks.
	#[error("I/O error occurred while talking to the network.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
