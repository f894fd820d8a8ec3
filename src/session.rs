//! Authenticated request pipeline shared by every resource.
//!
//! A [`Session`] owns the settings document behind an async mutex. Before each call it checks
//! the access token; tokens expiring within [`REFRESH_WINDOW`] are refreshed once, and the new
//! settings are written back through the [`SettingsStore`] before the request proceeds.

// std
use std::time::Instant;
// crates.io
use reqwest::{Method, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{AuthorizationError, TransportError},
	flows::Authorizer,
	http::{self, ReqwestHttpClient},
	obs::{self, CallSpan, Outcome, ResourceKind},
	provider::ProviderDescriptor,
	store::{Settings, SettingsStore},
};

/// Tokens expiring within this window are refreshed before the next request.
pub const REFRESH_WINDOW: Duration = Duration::seconds(60);

/// HTTP session carrying credentials, token state, and the settings store.
pub struct Session {
	http_client: ReqwestHttpClient,
	descriptor: ProviderDescriptor,
	settings: AsyncMutex<Settings>,
	store: Arc<dyn SettingsStore>,
}
impl Session {
	/// Creates a session from loaded settings.
	pub fn new(
		settings: Settings,
		descriptor: ProviderDescriptor,
		http_client: ReqwestHttpClient,
		store: Arc<dyn SettingsStore>,
	) -> Self {
		Self { http_client, descriptor, settings: AsyncMutex::new(settings), store }
	}

	/// Provider descriptor the session talks to.
	pub fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	/// Returns a snapshot of the current settings.
	pub async fn settings(&self) -> Settings {
		self.settings.lock().await.clone()
	}

	/// Sends `method endpoint` with `params` and decodes the JSON body into `T`.
	///
	/// `GET` and `DELETE` carry `params` in the query string; other methods send them as a
	/// form-encoded body.
	pub async fn request<T>(
		&self,
		kind: ResourceKind,
		operation: &'static str,
		method: Method,
		endpoint: &str,
		params: &[(String, String)],
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let span = CallSpan::new(kind, operation);

		let started = Instant::now();

		obs::record_request_outcome(kind, Outcome::Attempt);

		let result = span.instrument(self.send(method, endpoint, params)).await;

		obs::record_request_duration(kind, started.elapsed());

		match &result {
			Ok(_) => obs::record_request_outcome(kind, Outcome::Success),
			Err(_) => obs::record_request_outcome(kind, Outcome::Failure),
		}

		result
	}

	async fn send<T>(&self, method: Method, endpoint: &str, params: &[(String, String)]) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let token = self.access_token().await?;
		let url = self.descriptor.api_url(endpoint)?;
		let builder = self
			.http_client
			.request(method.clone(), url)
			.header(AUTHORIZATION, token.bearer_header());
		let builder = if matches!(method, Method::GET | Method::DELETE) {
			builder.query(params)
		} else {
			builder.form(params)
		};
		let response = builder.send().await.map_err(TransportError::from)?;
		let status = response.status().as_u16();

		obs::log_response_status(method.as_str(), endpoint, status);

		let retry_after = http::parse_retry_after(response.headers());
		let body = response.bytes().await.map_err(TransportError::from)?;

		if !(200..300).contains(&status) {
			return Err(map_api_error(status, retry_after, &body));
		}

		decode(endpoint, &body)
	}

	/// Returns a usable access token, refreshing and persisting it first when it is about to
	/// expire.
	async fn access_token(&self) -> Result<TokenSecret> {
		let mut settings = self.settings.lock().await;
		let now = OffsetDateTime::now_utc();

		if !settings.token.expires_within(now, REFRESH_WINDOW) {
			return Ok(settings.token.access_token.clone());
		}
		if settings.token.refresh_token.is_none() {
			if settings.token.is_expired_at(now) {
				return Err(AuthorizationError::MissingRefreshToken.into());
			}

			return Ok(settings.token.access_token.clone());
		}

		let authorizer = Authorizer::new(
			self.descriptor.clone(),
			settings.client_id.clone(),
			settings.client_secret.expose(),
			self.http_client.clone(),
		);
		let token = authorizer.refresh(&settings.token).await?;
		let next = settings.with_token(token);

		self.store.save(next.clone()).await?;

		*settings = next;

		Ok(settings.token.access_token.clone())
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session").field("descriptor", &self.descriptor).finish()
	}
}

#[derive(Deserialize)]
struct ApiErrorBody {
	code: String,
	message: String,
}

/// Maps a non-success response into the client error taxonomy.
pub fn map_api_error(status: u16, retry_after: Option<Duration>, body: &[u8]) -> Error {
	if status == 403 {
		return Error::AccessDenied;
	}

	match serde_json::from_slice::<ApiErrorBody>(body) {
		Ok(ApiErrorBody { code, message }) => Error::Api {
			status,
			message: format!("{message} ({code})"),
			code: Some(code),
			retry_after,
		},
		Err(_) => Error::Api {
			status,
			code: None,
			message: format!("Something went wrong: HTTP {status}"),
			retry_after,
		},
	}
}

fn decode<T>(endpoint: &str, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { endpoint: endpoint.to_owned(), source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn forbidden_maps_to_access_denied_even_with_body() {
		let err = map_api_error(403, None, br#"{"code": "forbidden", "message": "nope"}"#);

		assert!(matches!(err, Error::AccessDenied));
	}

	#[test]
	fn structured_body_becomes_message_and_code() {
		let err = map_api_error(
			404,
			Some(Duration::seconds(3)),
			br#"{"code": "404", "message": "Error message"}"#,
		);

		match err {
			Error::Api { status, code, message, retry_after } => {
				assert_eq!(status, 404);
				assert_eq!(code.as_deref(), Some("404"));
				assert_eq!(message, "Error message (404)");
				assert_eq!(retry_after, Some(Duration::seconds(3)));
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn unstructured_body_becomes_generic_message() {
		let err = map_api_error(500, None, b"<html>oops</html>");

		assert_eq!(err.to_string(), "Something went wrong: HTTP 500");
	}

	#[test]
	fn decode_reports_offending_path() {
		#[derive(Debug, Deserialize)]
		struct Envelope {
			#[allow(dead_code)]
			accounts: Vec<crate::schema::Account>,
		}

		let err = decode::<Envelope>(
			"accounts",
			br#"{"accounts": [{"id": "acc_1", "description": "d", "created": 7}]}"#,
		)
		.expect_err("Malformed body should fail.");

		match err {
			Error::Decode { endpoint, source } => {
				assert_eq!(endpoint, "accounts");
				assert_eq!(source.path().to_string(), "accounts[0].created");
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}
}
