//! Settings persistence: the credentials + token document and the stores that hold it.

pub mod file;
pub mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

// std
use std::{env, path::PathBuf};
// self
use crate::{
	_prelude::*,
	auth::{TokenRecord, TokenSecret},
};

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "MONZO_API_SETTINGS";
/// File name used under the home directory when no override is set.
pub const SETTINGS_FILE_NAME: &str = ".monzo-api";

/// Boxed future returned by [`SettingsStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage contract for the client's settings document.
pub trait SettingsStore
where
	Self: Send + Sync,
{
	/// Loads the stored settings, or `None` when nothing has been saved yet.
	fn load(&self) -> StoreFuture<'_, Option<Settings>>;

	/// Replaces the stored settings with `settings`.
	fn save(&self, settings: Settings) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`SettingsStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// The stored document could not be encoded or decoded.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure (filesystem, permissions).
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// OAuth client credentials plus the current token, written whole on every change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Current token pair.
	pub token: TokenRecord,
}
impl Settings {
	/// Bundles credentials and a token.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		token: TokenRecord,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			token,
		}
	}

	/// Returns the settings file location: `$MONZO_API_SETTINGS` when set, else `~/.monzo-api`.
	pub fn default_path() -> Result<PathBuf, StoreError> {
		if let Some(path) = env::var_os(SETTINGS_PATH_ENV).filter(|value| !value.is_empty()) {
			return Ok(PathBuf::from(path));
		}

		dirs::home_dir().map(|home| home.join(SETTINGS_FILE_NAME)).ok_or_else(|| {
			StoreError::Backend {
				message: format!(
					"Cannot locate the home directory; set {SETTINGS_PATH_ENV} explicitly"
				),
			}
		})
	}

	/// Whether the settings hold what API calls need: a client ID, a client secret, and a
	/// non-blank access token.
	pub fn is_authorized(&self) -> bool {
		!self.client_id.trim().is_empty()
			&& !self.client_secret.is_blank()
			&& !self.token.access_token.is_blank()
	}

	/// Returns a copy whose token has been replaced by `token`.
	pub fn with_token(&self, token: TokenRecord) -> Self {
		Self { client_id: self.client_id.clone(), client_secret: self.client_secret.clone(), token }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn settings_document_uses_flat_layout() {
		let token = TokenRecord::builder()
			.access_token("access")
			.refresh_token("refresh")
			.build()
			.expect("Token fixture should build.");
		let settings = Settings::new("oauth2client_1", "mnzconf.secret", token);
		let value = serde_json::to_value(&settings).expect("Settings should serialize.");

		assert_eq!(value["client_id"], "oauth2client_1");
		assert_eq!(value["client_secret"], "mnzconf.secret");
		assert_eq!(value["token"]["access_token"], "access");
		assert_eq!(value["token"]["refresh_token"], "refresh");
	}

	#[test]
	fn authorization_needs_credentials_and_access_token() {
		let token = TokenRecord::builder()
			.access_token("access")
			.build()
			.expect("Token fixture should build.");
		let blank = TokenRecord::builder().access_token("").build().expect("Token should build.");

		assert!(Settings::new("oauth2client_1", "mnzconf.secret", token.clone()).is_authorized());
		assert!(!Settings::new("oauth2client_1", "mnzconf.secret", blank).is_authorized());
		assert!(!Settings::new("", "mnzconf.secret", token.clone()).is_authorized());
		assert!(!Settings::new("oauth2client_1", " ", token).is_authorized());
	}

	#[test]
	fn debug_output_redacts_client_secret() {
		let token = TokenRecord::builder()
			.access_token("access")
			.build()
			.expect("Token fixture should build.");
		let settings = Settings::new("oauth2client_1", "mnzconf.secret", token);
		let rendered = format!("{settings:?}");

		assert!(rendered.contains("oauth2client_1"));
		assert!(!rendered.contains("mnzconf.secret"));
	}
}
