//! # CMS Panels
//!
//! Admin-UI extensions for a CMS admin interface: reading-time estimation
//! with save-time caching, auxiliary admin panels, typed button
//! configuration, and a permission-protected streaming file-download
//! endpoint.
//!
//! ## Features
//!
//! - **Reading time**: word-count based estimation over configurable source
//!   fields, cached on the entity at save time, with a humanized label and a
//!   live-preview side channel for unsaved drafts
//! - **Panels**: a reading-time side panel, a file-download panel, and a
//!   generic button panel, each rendered as an HTML fragment with
//!   permission-gated visibility
//! - **Buttons**: explicit, typed button configuration with
//!   static-or-computed attribute values resolved at render time
//! - **Downloads**: `GET /admin/download/{content_type}/{object_id}/{field_name}/`
//!   streaming a stored file with `Content-Length` and
//!   `Content-Disposition: attachment` headers after permission checks
//!
//! ## Architecture
//!
//! ```text
//! cms-panels
//! ├── reading_time - estimator, cached duration, humanized label, preview
//! ├── panels       - Panel trait, side panel, download panel, button panel
//! ├── buttons      - typed button configuration, bound rendering
//! ├── download     - protected streaming download endpoint
//! ├── permissions  - User seam, permission specifications
//! ├── content      - ContentItem seam, content-type registry
//! ├── storage      - async storage backend, local file system
//! ├── http         - request/response/streaming primitives
//! ├── html         - tag stripping, escaping, fragment formatting
//! └── settings     - deployment configuration
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cms_panels::prelude::*;
//!
//! // Attach a reading-time capability to an entity and recompute on save
//! let estimator = ReadingTimeEstimator::new(200.0);
//! let mut reading_time = ReadingTime::new(["intro", "body"]);
//! reading_time.recompute_from(&article, &estimator);
//! assert_eq!(reading_time.label(), "2 minutes");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

// Module declarations
pub mod buttons;
pub mod content;
pub mod download;
pub mod html;
pub mod http;
pub mod panels;
pub mod permissions;
pub mod reading_time;
pub mod settings;
pub mod storage;

// Prelude for convenient imports
pub mod prelude {
	//! Convenient re-exports of commonly used items

	// Reading time
	pub use crate::reading_time::{
		ReadingTime, ReadingTimeEstimator, humanize, serve_preview,
	};

	// Panels
	pub use crate::panels::{
		ButtonPanel, FileDownloadPanel, Panel, PanelContext, ReadingTimePanel,
		ReadingTimeSidePanel,
	};

	// Buttons
	pub use crate::buttons::{BoundButton, ButtonConfig, ButtonTag, Computable};

	// Permissions
	pub use crate::permissions::{PermissionContext, PermissionSpec, SimpleUser, User};

	// Content
	pub use crate::content::{
		ContentItem, ContentSource, ContentTypeRegistry, FieldValue, FileRef,
	};

	// Download
	pub use crate::download::{DownloadView, download_url};

	// Storage
	pub use crate::storage::{LocalStorage, StorageBackend};

	// Settings
	pub use crate::settings::PanelsSettings;

	// Errors
	pub use crate::error::{PanelError, PanelResult};
}

/// Panel error types
pub mod error {
	use thiserror::Error;

	/// Errors raised by panel rendering, download serving, and configuration
	#[derive(Error, Debug)]
	pub enum PanelError {
		/// Content type not registered in the registry
		#[error("Content type not registered: {0}")]
		ContentTypeNotFound(String),

		/// Object not found for a registered content type
		#[error("Object not found: {0}")]
		ObjectNotFound(String),

		/// Field not present on the entity
		#[error("Field not found: {0}")]
		FieldNotFound(String),

		/// Stored file missing from the storage backend
		#[error("File not found: {0}")]
		FileNotFound(String),

		/// Permission denied
		#[error("Permission denied: {0}")]
		PermissionDenied(String),

		/// Invalid deployment or panel configuration
		#[error("Configuration error: {0}")]
		Config(String),

		/// Serialization failure
		#[error("Serialization error: {0}")]
		Serialization(String),

		/// Underlying I/O failure
		#[error("IO error: {0}")]
		Io(#[from] std::io::Error),
	}

	/// Result type for panel operations
	pub type PanelResult<T> = Result<T, PanelError>;
}
