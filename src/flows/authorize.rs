//! Authorization-code handshake: authorize URL construction and callback exchange.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	error::AuthorizationError,
	flows::Authorizer,
	obs::{self, CallSpan, Outcome, ResourceKind},
};

const STATE_LEN: usize = 32;

/// Handshake metadata returned by [`Authorizer::start_authorization`].
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// Opaque state value that must round-trip via the redirect.
	pub state: String,
	/// Redirect URI embedded in the authorize URL.
	pub redirect_uri: Url,
	/// Authorize URL the user must open.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	/// Validates the `state` returned with the callback.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(AuthorizationError::StateMismatch.into())
		}
	}
}

/// Query parameters extracted from a callback URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
	/// `code` parameter.
	pub code: Option<String>,
	/// `state` parameter.
	pub state: Option<String>,
	/// `error` parameter.
	pub error: Option<String>,
	/// `error_description` parameter.
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Collects the OAuth parameters from `callback_url`'s query string.
	pub fn from_url(callback_url: &Url) -> Self {
		let mut params = Self::default();

		for (key, value) in callback_url.query_pairs() {
			let slot = match &*key {
				"code" => &mut params.code,
				"state" => &mut params.state,
				"error" => &mut params.error,
				"error_description" => &mut params.error_description,
				_ => continue,
			};

			*slot = Some(value.into_owned());
		}

		params
	}
}

impl Authorizer {
	/// Builds a fresh [`AuthorizationSession`] with a random `state`.
	pub fn start_authorization(&self, redirect_uri: Url) -> AuthorizationSession {
		let _span = CallSpan::new(ResourceKind::OAuth, "start_authorization").entered();
		let state = random_string(STATE_LEN);
		let authorize_url = self.build_authorize_url(&redirect_uri, &state);

		AuthorizationSession { state, redirect_uri, authorize_url }
	}

	/// Validates the callback and trades its `code` for a token pair.
	pub async fn exchange_callback(
		&self,
		session: AuthorizationSession,
		callback_url: &Url,
	) -> Result<TokenRecord> {
		const KIND: ResourceKind = ResourceKind::OAuth;

		let span = CallSpan::new(KIND, "exchange_callback");

		obs::record_request_outcome(KIND, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let params = CallbackParams::from_url(callback_url);
				let state = params
					.state
					.as_deref()
					.ok_or(AuthorizationError::MissingCallbackParam { param: "state" })?;

				session.validate_state(state)?;

				if let Some(error) = params.error {
					let reason = match params.error_description {
						Some(description) => format!("{error}: {description}"),
						None => error,
					};

					return Err(AuthorizationError::Denied { reason }.into());
				}

				let code = params
					.code
					.ok_or(AuthorizationError::MissingCallbackParam { param: "code" })?;
				let facade = self.facade(Some(&session.redirect_uri))?;

				facade.exchange_code(&code).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, Outcome::Success),
			Err(_) => obs::record_request_outcome(KIND, Outcome::Failure),
		}

		result
	}

	fn build_authorize_url(&self, redirect_uri: &Url, state: &str) -> Url {
		let mut url = self.descriptor.endpoints.authorization.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", "code");
		pairs.append_pair("client_id", &self.client_id);
		pairs.append_pair("redirect_uri", redirect_uri.as_str());
		pairs.append_pair("state", state);

		drop(pairs);

		url
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{http::ReqwestHttpClient, provider::ProviderDescriptor};

	fn authorizer() -> Authorizer {
		Authorizer::new(
			ProviderDescriptor::monzo(),
			"oauth2client_1",
			"mnzconf.secret",
			ReqwestHttpClient::new().expect("HTTP client should build."),
		)
	}

	fn redirect() -> Url {
		Url::parse("http://localhost:6600/monzo").expect("Redirect fixture should parse.")
	}

	#[test]
	fn authorize_url_carries_code_request() {
		let session = authorizer().start_authorization(redirect());
		let pairs: HashMap<_, _> = session.authorize_url.query_pairs().into_owned().collect();

		assert_eq!(session.authorize_url.host_str(), Some("auth.monzo.com"));
		assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
		assert_eq!(pairs.get("client_id").map(String::as_str), Some("oauth2client_1"));
		assert_eq!(
			pairs.get("redirect_uri").map(String::as_str),
			Some("http://localhost:6600/monzo")
		);
		assert_eq!(pairs.get("state"), Some(&session.state));
		assert_eq!(session.state.len(), STATE_LEN);
	}

	#[test]
	fn state_validation_errors_on_mismatch() {
		let session = authorizer().start_authorization(redirect());
		let state = session.state.clone();

		assert!(session.validate_state(&state).is_ok());

		let err = session.validate_state("other").expect_err("State mismatch should fail.");

		assert!(matches!(err, Error::Authorization(AuthorizationError::StateMismatch)));
	}

	#[test]
	fn callback_params_ignore_unknown_keys() {
		let url = Url::parse("http://localhost:6600/monzo?code=abc&state=xyz&extra=1")
			.expect("Callback fixture should parse.");
		let params = CallbackParams::from_url(&url);

		assert_eq!(params.code.as_deref(), Some("abc"));
		assert_eq!(params.state.as_deref(), Some("xyz"));
		assert!(params.error.is_none());
	}

	#[tokio::test]
	async fn denied_callback_surfaces_provider_reason() {
		let authorizer = authorizer();
		let session = authorizer.start_authorization(redirect());
		let mut callback = redirect();

		callback
			.query_pairs_mut()
			.append_pair("state", &session.state)
			.append_pair("error", "access_denied")
			.append_pair("error_description", "user said no");

		let err = authorizer
			.exchange_callback(session, &callback)
			.await
			.expect_err("Denied callback should fail.");

		match err {
			Error::Authorization(AuthorizationError::Denied { reason }) =>
				assert_eq!(reason, "access_denied: user said no"),
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn callback_without_code_is_rejected() {
		let authorizer = authorizer();
		let session = authorizer.start_authorization(redirect());
		let mut callback = redirect();

		callback.query_pairs_mut().append_pair("state", &session.state);

		let err = authorizer
			.exchange_callback(session, &callback)
			.await
			.expect_err("Callback without code should fail.");

		assert!(matches!(
			err,
			Error::Authorization(AuthorizationError::MissingCallbackParam { param: "code" })
		));
	}
}
