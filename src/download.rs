//! Protected streaming file-download endpoint.
//!
//! Resolves a `(content type, object, field)` triple through the
//! content-type registry, enforces the baseline admin permission plus any
//! per-object/per-field permission, and streams the stored bytes with
//! `Content-Length` and `Content-Disposition: attachment` headers.

use crate::content::ContentTypeRegistry;
use crate::http::{Request, StreamBody, StreamingResponse};
use crate::permissions::{ADMIN_ACCESS_PERMISSION, PermissionContext};
use crate::settings::DEFAULT_DOWNLOAD_CHUNK_SIZE;
use crate::storage::StorageBackend;
use bytes::Bytes;
use futures::stream;
use hyper::StatusCode;
use hyper::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, HeaderValue};
use std::sync::Arc;
use uuid::Uuid;

/// URL prefix the download endpoint is mounted under
pub const DOWNLOAD_URL_PREFIX: &str = "/admin/download";

/// Route pattern for the download endpoint, in the host router's
/// `{param}` placeholder syntax
pub const DOWNLOAD_ROUTE_PATTERN: &str =
	"/admin/download/{content_type}/{object_id}/{field_name}/";

/// Build the download URL for a field of a persisted entity
///
/// # Examples
///
/// ```
/// use cms_panels::download::download_url;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     download_url("blog.article", id, "report"),
///     format!("/admin/download/blog.article/{}/report/", id)
/// );
/// ```
pub fn download_url(content_type: &str, object_id: Uuid, field_name: &str) -> String {
	format!(
		"{}/{}/{}/{}/",
		DOWNLOAD_URL_PREFIX, content_type, object_id, field_name
	)
}

/// The download endpoint: content-type registry plus storage backend.
pub struct DownloadView {
	registry: Arc<ContentTypeRegistry>,
	storage: Arc<dyn StorageBackend>,
	chunk_size: usize,
}

impl DownloadView {
	/// Create a download view over a registry and storage backend
	pub fn new(registry: Arc<ContentTypeRegistry>, storage: Arc<dyn StorageBackend>) -> Self {
		Self {
			registry,
			storage,
			chunk_size: DEFAULT_DOWNLOAD_CHUNK_SIZE,
		}
	}

	/// Override the streaming chunk size
	pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
		self.chunk_size = chunk_size.max(1);
		self
	}

	/// Handle a routed request, reading the path parameters
	/// `content_type`, `object_id`, and `field_name`.
	pub async fn handle(&self, request: &Request) -> StreamingResponse<StreamBody> {
		let (Some(content_type), Some(raw_id), Some(field_name)) = (
			request.path_param("content_type"),
			request.path_param("object_id"),
			request.path_param("field_name"),
		) else {
			return StreamingResponse::empty(StatusCode::NOT_FOUND);
		};

		let Ok(object_id) = raw_id.parse::<Uuid>() else {
			return StreamingResponse::empty(StatusCode::NOT_FOUND);
		};

		self.serve(request, content_type, object_id, field_name).await
	}

	/// Serve a download for a `(content type, object, field)` triple.
	///
	/// The baseline admin permission is checked before anything is
	/// resolved; per-object/per-field permissions are checked after the
	/// field resolves to a stored file. Authorization failures yield 403,
	/// resolution failures 404.
	pub async fn serve(
		&self,
		request: &Request,
		content_type: &str,
		object_id: Uuid,
		field_name: &str,
	) -> StreamingResponse<StreamBody> {
		let Some(user) = request.user() else {
			tracing::warn!(content_type, field_name, "download denied: no user");
			return StreamingResponse::empty(StatusCode::FORBIDDEN);
		};

		if !user.has_perm(ADMIN_ACCESS_PERMISSION) {
			tracing::warn!(
				user = user.username(),
				content_type,
				field_name,
				"download denied: missing admin access"
			);
			return StreamingResponse::empty(StatusCode::FORBIDDEN);
		}

		let Some(source) = self.registry.get(content_type) else {
			return StreamingResponse::empty(StatusCode::NOT_FOUND);
		};

		let Some(item) = source.get(object_id).await else {
			return StreamingResponse::empty(StatusCode::NOT_FOUND);
		};

		let file = match item.field(field_name).as_ref().and_then(|v| v.as_file()) {
			Some(file) if !file.name.is_empty() => file.clone(),
			_ => return StreamingResponse::empty(StatusCode::NOT_FOUND),
		};

		if let Some(spec) = item.field_permissions(field_name) {
			let ctx = PermissionContext {
				user,
				item: item.as_ref(),
			};
			if !spec.check(&ctx) {
				tracing::warn!(
					user = user.username(),
					content_type,
					field_name,
					"download denied: field permission"
				);
				return StreamingResponse::empty(StatusCode::FORBIDDEN);
			}
		}

		let Ok(content) = self.storage.open(&file.name).await else {
			return StreamingResponse::empty(StatusCode::NOT_FOUND);
		};

		let size = content.len() as u64;
		tracing::debug!(
			user = user.username(),
			content_type,
			field_name,
			size,
			"serving file download"
		);
		let chunks: Vec<Result<Bytes, Box<dyn std::error::Error + Send + Sync>>> = content
			.chunks(self.chunk_size)
			.map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
			.collect();
		let body: StreamBody = Box::pin(stream::iter(chunks));

		let disposition = format!("attachment; filename=\"{}\"", file.name.replace('"', ""));

		StreamingResponse::new(body)
			.header(CONTENT_LENGTH, HeaderValue::from(size))
			.header(
				CONTENT_DISPOSITION,
				HeaderValue::from_str(&disposition)
					.unwrap_or_else(|_| HeaderValue::from_static("attachment")),
			)
	}
}
