//! In-memory [`SettingsStore`] for tests and demos.

// self
use crate::{
	_prelude::*,
	store::{Settings, SettingsStore, StoreFuture},
};

/// Keeps the settings document in-process.
#[derive(Clone, Debug, Default)]
pub struct MemorySettingsStore(Arc<Mutex<Option<Settings>>>);
impl MemorySettingsStore {
	/// Creates a store pre-seeded with `settings`.
	pub fn with_settings(settings: Settings) -> Self {
		Self(Arc::new(Mutex::new(Some(settings))))
	}

	/// Returns a snapshot of the stored settings.
	pub fn current(&self) -> Option<Settings> {
		self.0.lock().clone()
	}
}
impl SettingsStore for MemorySettingsStore {
	fn load(&self) -> StoreFuture<'_, Option<Settings>> {
		let snapshot = self.current();

		Box::pin(async move { Ok(snapshot) })
	}

	fn save(&self, settings: Settings) -> StoreFuture<'_, ()> {
		*self.0.lock() = Some(settings);

		Box::pin(async move { Ok(()) })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;
	use crate::auth::TokenRecord;

	#[test]
	fn save_replaces_previous_document() {
		let store = MemorySettingsStore::default();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for memory store test.");

		assert!(rt.block_on(store.load()).expect("Empty store should load.").is_none());

		let token = TokenRecord::builder()
			.access_token("first")
			.build()
			.expect("Token fixture should build.");

		rt.block_on(store.save(Settings::new("id", "secret", token)))
			.expect("First save should succeed.");

		let token = TokenRecord::builder()
			.access_token("second")
			.build()
			.expect("Token fixture should build.");

		rt.block_on(store.save(Settings::new("id", "secret", token)))
			.expect("Second save should succeed.");

		let current = store.current().expect("Store should hold settings.");

		assert_eq!(current.token.access_token.expose(), "second");
	}
}
