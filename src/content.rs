//! Content seam: entity field access and the content-type registry.
//!
//! The host persistence layer owns the entities; this module defines the
//! minimal surface the panels need — string-keyed field access returning a
//! typed [`FieldValue`], an object id, a content-type key, and optional
//! hooks for the reading-time capability and per-field download permissions.

use crate::permissions::PermissionSpec;
use crate::reading_time::ReadingTime;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Reference to a file stored in a storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
	/// Stored file name (the storage backend key)
	pub name: String,
}

impl FileRef {
	/// Create a file reference from a stored name
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

/// A single field value on a content item
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Text content (may contain markup)
	Text(String),
	/// Integer content
	Integer(i64),
	/// Floating-point content
	Float(f64),
	/// Boolean content
	Bool(bool),
	/// A stored file
	File(FileRef),
}

impl FieldValue {
	/// The file reference, if this field holds one
	pub fn as_file(&self) -> Option<&FileRef> {
		match self {
			Self::File(file) => Some(file),
			_ => None,
		}
	}

	/// Whether the field holds no usable content
	///
	/// Mirrors truthiness in the admin templates: empty text and file fields
	/// with no stored name count as empty.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(text) => text.is_empty(),
			Self::File(file) => file.name.is_empty(),
			_ => false,
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => write!(f, "{}", text),
			Self::Integer(value) => write!(f, "{}", value),
			Self::Float(value) => write!(f, "{}", value),
			Self::Bool(value) => write!(f, "{}", value),
			Self::File(file) => write!(f, "{}", file.name),
		}
	}
}

/// A persisted (or draft) content record as seen by the admin panels.
///
/// `object_id` is `None` for unsaved drafts; buttons marked hide-on-create
/// and download URLs key off this.
pub trait ContentItem: Send + Sync {
	/// Content-type key in `"app_label.model"` form, e.g. `"blog.article"`
	fn content_type(&self) -> &str;

	/// Primary key, or `None` for an unsaved draft
	fn object_id(&self) -> Option<Uuid>;

	/// Fetch a field value by name
	fn field(&self, name: &str) -> Option<FieldValue>;

	/// Human-readable label for a field
	fn field_label(&self, name: &str) -> String {
		name.replace('_', " ")
	}

	/// The reading-time capability held by this entity, if any
	fn reading_time(&self) -> Option<&ReadingTime> {
		None
	}

	/// Per-object/per-field permission requirement for downloading a field
	fn field_permissions(&self, _field: &str) -> Option<PermissionSpec> {
		None
	}
}

/// Loader for entities of one content type
#[async_trait]
pub trait ContentSource: Send + Sync {
	/// The content-type key this source resolves
	fn content_type(&self) -> &str;

	/// Fetch an entity by primary key
	async fn get(&self, object_id: Uuid) -> Option<Arc<dyn ContentItem>>;
}

/// Registry of content sources, keyed by content-type key.
///
/// The download endpoint resolves its `{content_type}` path segment here.
///
/// # Examples
///
/// ```rust,ignore
/// let registry = ContentTypeRegistry::new();
/// registry.register(Arc::new(ArticleSource::default()));
/// assert!(registry.get("blog.article").is_some());
/// ```
pub struct ContentTypeRegistry {
	sources: RwLock<HashMap<String, Arc<dyn ContentSource>>>,
}

impl ContentTypeRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			sources: RwLock::new(HashMap::new()),
		}
	}

	/// Register a content source under its content-type key
	pub fn register(&self, source: Arc<dyn ContentSource>) {
		self.sources
			.write()
			.insert(source.content_type().to_string(), source);
	}

	/// Look up a content source by content-type key
	pub fn get(&self, content_type: &str) -> Option<Arc<dyn ContentSource>> {
		self.sources.read().get(content_type).cloned()
	}
}

impl Default for ContentTypeRegistry {
	fn default() -> Self {
		Self::new()
	}
}
