//! Token record persisted in the settings file, plus its builder.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Token type Monzo issues for every grant.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Errors produced by [`TokenRecordBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenRecordBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
}

/// OAuth token pair plus lifetime bookkeeping.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Token type reported by the provider.
	#[serde(default = "default_token_type")]
	pub token_type: String,
	/// Issued-at instant recorded when the token was received.
	#[serde(with = "time::serde::rfc3339")]
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `expires_in`, when the provider reported one.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub expires_at: Option<OffsetDateTime>,
	/// Monzo user the token belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
}
impl TokenRecord {
	/// Returns a builder for constructing records.
	pub fn builder() -> TokenRecordBuilder {
		TokenRecordBuilder::default()
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Returns `true` if the record expires within `window` of `instant`.
	///
	/// Records without an expiry never need a refresh.
	pub fn expires_within(&self, instant: OffsetDateTime, window: Duration) -> bool {
		match self.expires_at {
			Some(expires_at) => expires_at - instant <= window,
			None => false,
		}
	}

	/// Returns a copy carrying `next`'s secrets while keeping the current refresh token when
	/// the provider did not rotate it.
	pub fn rotated(&self, mut next: TokenRecord) -> TokenRecord {
		if next.refresh_token.is_none() {
			next.refresh_token = self.refresh_token.clone();
		}
		if next.user_id.is_none() {
			next.user_id = self.user_id.clone();
		}

		next
	}
}
impl Debug for TokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRecord")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("user_id", &self.user_id)
			.finish()
	}
}

/// Builder for [`TokenRecord`].
#[derive(Clone, Debug, Default)]
pub struct TokenRecordBuilder {
	access_token: Option<TokenSecret>,
	refresh_token: Option<TokenSecret>,
	token_type: Option<String>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
	user_id: Option<String>,
}
impl TokenRecordBuilder {
	/// Sets the access token secret.
	pub fn access_token(mut self, value: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(value));

		self
	}

	/// Sets the refresh token secret.
	pub fn refresh_token(mut self, value: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(value));

		self
	}

	/// Overrides the token type (defaults to `Bearer`).
	pub fn token_type(mut self, value: impl Into<String>) -> Self {
		self.token_type = Some(value.into());

		self
	}

	/// Overrides the issued-at instant (defaults to now).
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets the lifetime relative to the issued-at instant.
	///
	/// A lifetime that overflows the calendar leaves the record without an expiry.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Records the Monzo user the token belongs to.
	pub fn user_id(mut self, value: impl Into<String>) -> Self {
		self.user_id = Some(value.into());

		self
	}

	/// Validates the configured values and returns a [`TokenRecord`].
	pub fn build(self) -> Result<TokenRecord, TokenRecordBuilderError> {
		let access_token = self.access_token.ok_or(TokenRecordBuilderError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);

		Ok(TokenRecord {
			access_token,
			refresh_token: self.refresh_token,
			token_type: self.token_type.unwrap_or_else(default_token_type),
			issued_at,
			expires_at: self.expires_in.and_then(|lifetime| issued_at.checked_add(lifetime)),
			user_id: self.user_id,
		})
	}
}

fn default_token_type() -> String {
	DEFAULT_TOKEN_TYPE.into()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn builder_handles_relative_expiry() {
		let record = TokenRecord::builder()
			.access_token("secret")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::minutes(30))
			.build()
			.expect("Token record builder should support relative expiry calculations.");

		assert_eq!(record.expires_at, Some(macros::datetime!(2025-01-01 00:30 UTC)));
		assert_eq!(record.token_type, DEFAULT_TOKEN_TYPE);
		assert!(!record.is_expired_at(macros::datetime!(2025-01-01 00:29 UTC)));
		assert!(record.is_expired_at(macros::datetime!(2025-01-01 00:30 UTC)));
		assert!(
			record.expires_within(macros::datetime!(2025-01-01 00:29 UTC), Duration::seconds(60))
		);
	}

	#[test]
	fn builder_drops_expiry_past_the_calendar() {
		let record = TokenRecord::builder()
			.access_token("secret")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::seconds(i64::MAX))
			.build()
			.expect("Oversized lifetimes should still build a record.");

		assert_eq!(record.expires_at, None);
		assert!(!record.is_expired_at(macros::datetime!(9999-12-31 23:59 UTC)));
	}

	#[test]
	fn builder_requires_access_token() {
		let err = TokenRecord::builder()
			.refresh_token("refresh")
			.build()
			.expect_err("Builder should reject records without an access token.");

		assert_eq!(err, TokenRecordBuilderError::MissingAccessToken);
	}

	#[test]
	fn records_without_expiry_never_expire() {
		let record = TokenRecord::builder()
			.access_token("forever")
			.build()
			.expect("Token record without expiry should build.");

		assert!(!record.is_expired_at(OffsetDateTime::now_utc() + Duration::days(3650)));
		assert!(!record.expires_within(OffsetDateTime::now_utc(), Duration::hours(1)));
	}

	#[test]
	fn rotation_keeps_refresh_token_when_omitted() {
		let current = TokenRecord::builder()
			.access_token("old-access")
			.refresh_token("old-refresh")
			.user_id("user_1")
			.build()
			.expect("Current record should build.");
		let next = TokenRecord::builder()
			.access_token("new-access")
			.build()
			.expect("Next record should build.");
		let rotated = current.rotated(next);

		assert_eq!(rotated.access_token.expose(), "new-access");
		assert_eq!(rotated.refresh_token.as_ref().map(TokenSecret::expose), Some("old-refresh"));
		assert_eq!(rotated.user_id.as_deref(), Some("user_1"));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let record = TokenRecord::builder()
			.access_token("visible?")
			.refresh_token("visible-too?")
			.build()
			.expect("Record should build.");
		let rendered = format!("{record:?}");

		assert!(!rendered.contains("visible"));
		assert!(rendered.contains("<redacted>"));
	}

	#[test]
	fn serde_round_trip_preserves_fields() {
		let record = TokenRecord::builder()
			.access_token("access")
			.refresh_token("refresh")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::hours(6))
			.user_id("user_00009237aqC8c5umZmrRdh")
			.build()
			.expect("Record should build.");
		let payload = serde_json::to_string(&record).expect("Record should serialize.");
		let decoded: TokenRecord = serde_json::from_str(&payload).expect("Record should decode.");

		assert_eq!(decoded, record);
	}
}
