//! Storage backend seam for stored file fields.

use crate::error::{PanelError, PanelResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Storage backend for file-field content.
///
/// The download endpoint reads file bytes and sizes through this trait; the
/// host application wires in whichever backend its media storage uses.
///
/// # Examples
///
/// ```rust,no_run
/// use cms_panels::error::PanelResult;
/// use cms_panels::storage::StorageBackend;
///
/// async fn example(storage: &dyn StorageBackend) -> PanelResult<()> {
///     storage.save("report.pdf", b"%PDF-1.7").await?;
///     if storage.exists("report.pdf").await? {
///         let size = storage.size("report.pdf").await?;
///         assert_eq!(size, 8);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
	/// Save a file, returning the final stored name.
	async fn save(&self, name: &str, content: &[u8]) -> PanelResult<String>;

	/// Read a file's content.
	///
	/// # Errors
	///
	/// Returns `` `PanelError::FileNotFound` `` if the file does not exist.
	async fn open(&self, name: &str) -> PanelResult<Vec<u8>>;

	/// Check whether a file exists.
	async fn exists(&self, name: &str) -> PanelResult<bool>;

	/// The file size in bytes.
	///
	/// # Errors
	///
	/// Returns `` `PanelError::FileNotFound` `` if the file does not exist.
	async fn size(&self, name: &str) -> PanelResult<u64>;

	/// Delete a file.
	async fn delete(&self, name: &str) -> PanelResult<()>;
}

/// Local file system storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	base_path: PathBuf,
}

impl LocalStorage {
	/// Create a local storage backend rooted at an existing directory.
	///
	/// # Errors
	///
	/// Returns `` `PanelError::Config` `` if the base path does not exist or
	/// is not a directory.
	pub fn new(base_path: impl Into<PathBuf>) -> PanelResult<Self> {
		let base_path = base_path.into();

		if !base_path.exists() {
			return Err(PanelError::Config(format!(
				"Base path does not exist: {}",
				base_path.display()
			)));
		}

		if !base_path.is_dir() {
			return Err(PanelError::Config(format!(
				"Base path is not a directory: {}",
				base_path.display()
			)));
		}

		Ok(Self { base_path })
	}

	fn full_path(&self, name: &str) -> PathBuf {
		self.base_path.join(name)
	}
}

#[async_trait]
impl StorageBackend for LocalStorage {
	async fn save(&self, name: &str, content: &[u8]) -> PanelResult<String> {
		let path = self.full_path(name);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).await?;
		}

		fs::write(&path, content).await?;

		Ok(name.to_string())
	}

	async fn open(&self, name: &str) -> PanelResult<Vec<u8>> {
		let path = self.full_path(name);

		if !path.exists() {
			return Err(PanelError::FileNotFound(name.to_string()));
		}

		let content = fs::read(&path).await?;
		Ok(content)
	}

	async fn exists(&self, name: &str) -> PanelResult<bool> {
		let path = self.full_path(name);
		Ok(path.exists() && path.is_file())
	}

	async fn size(&self, name: &str) -> PanelResult<u64> {
		let path = self.full_path(name);

		if !path.exists() {
			return Err(PanelError::FileNotFound(name.to_string()));
		}

		let metadata = fs::metadata(&path).await?;
		Ok(metadata.len())
	}

	async fn delete(&self, name: &str) -> PanelResult<()> {
		let path = self.full_path(name);

		if !path.exists() {
			return Err(PanelError::FileNotFound(name.to_string()));
		}

		fs::remove_file(&path).await?;
		Ok(())
	}
}
