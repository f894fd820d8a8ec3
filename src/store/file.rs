//! JSON settings file with owner-only permissions.

// std
use std::{
	fs::{self, File, OpenOptions},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{Settings, SettingsStore, StoreError, StoreFuture},
};

/// Persists [`Settings`] to a JSON file, rewriting the whole document on each save.
#[derive(Clone, Debug)]
pub struct FileSettingsStore {
	path: PathBuf,
}
impl FileSettingsStore {
	/// Creates a store backed by `path`; nothing is read until [`SettingsStore::load`].
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Creates a store at [`Settings::default_path`].
	pub fn open_default() -> Result<Self, StoreError> {
		Ok(Self::new(Settings::default_path()?))
	}

	/// Path of the settings file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_now(path: &Path) -> Result<Option<Settings>, StoreError> {
		if !path.exists() {
			return Ok(None);
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(None);
		}

		serde_json::from_slice(&bytes).map(Some).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create settings directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn write_now(path: &Path, settings: &Settings) -> Result<(), StoreError> {
		Self::ensure_parent_exists(path)?;

		let serialized =
			serde_json::to_vec_pretty(settings).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize settings: {e}"),
			})?;
		let mut tmp_path = path.to_path_buf().into_os_string();

		tmp_path.push(".tmp");

		let tmp_path = PathBuf::from(tmp_path);

		{
			let mut file = create_private(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", path.display()),
		})
	}
}
impl SettingsStore for FileSettingsStore {
	fn load(&self) -> StoreFuture<'_, Option<Settings>> {
		Box::pin(async move { Self::read_now(&self.path) })
	}

	fn save(&self, settings: Settings) -> StoreFuture<'_, ()> {
		Box::pin(async move { Self::write_now(&self.path, &settings) })
	}
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
	// std
	use std::os::unix::fs::OpenOptionsExt;

	OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
	OpenOptions::new().write(true).create(true).truncate(true).open(path)
}
