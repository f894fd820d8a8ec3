//! Refresh-token rotation.

// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	error::AuthorizationError,
	flows::Authorizer,
	obs::{self, CallSpan, Outcome, ResourceKind},
};

impl Authorizer {
	/// Trades `current`'s refresh token for a new pair.
	///
	/// The returned record keeps `current`'s refresh token and user ID when the provider omits
	/// them.
	pub async fn refresh(&self, current: &TokenRecord) -> Result<TokenRecord> {
		const KIND: ResourceKind = ResourceKind::OAuth;

		let span = CallSpan::new(KIND, "refresh");

		obs::record_request_outcome(KIND, Outcome::Attempt);

		let result: Result<TokenRecord> = span
			.instrument(async move {
				let refresh_token =
					current.refresh_token.as_ref().ok_or(AuthorizationError::MissingRefreshToken)?;

				obs::log_token_refresh(current.expires_at);

				let facade = self.facade(None)?;
				let next = facade.refresh_token(refresh_token.expose()).await?;

				Ok(current.rotated(next))
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, Outcome::Success),
			Err(_) => obs::record_request_outcome(KIND, Outcome::Failure),
		}

		result
	}
}
