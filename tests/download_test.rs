//! Tests for the protected streaming download endpoint

use async_trait::async_trait;
use bytes::Bytes;
use cms_panels::content::{ContentItem, ContentSource, ContentTypeRegistry, FieldValue, FileRef};
use cms_panels::download::{DownloadView, download_url};
use cms_panels::http::{Request, StreamBody, StreamingResponse};
use cms_panels::permissions::{ADMIN_ACCESS_PERMISSION, PermissionSpec, SimpleUser};
use cms_panels::storage::{LocalStorage, StorageBackend};
use futures::StreamExt;
use hyper::StatusCode;
use hyper::header::{CONTENT_DISPOSITION, CONTENT_LENGTH};
use rstest::rstest;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const PDF_BYTES: &[u8] = b"%PDF-1.7 annual report body %%EOF";

struct Report {
	id: Uuid,
	file: FileRef,
	file_permissions: Option<PermissionSpec>,
}

impl ContentItem for Report {
	fn content_type(&self) -> &str {
		"docs.report"
	}

	fn object_id(&self) -> Option<Uuid> {
		Some(self.id)
	}

	fn field(&self, name: &str) -> Option<FieldValue> {
		match name {
			"attachment" => Some(FieldValue::File(self.file.clone())),
			"title" => Some(FieldValue::Text("Annual report".to_string())),
			_ => None,
		}
	}

	fn field_permissions(&self, field: &str) -> Option<PermissionSpec> {
		if field == "attachment" {
			self.file_permissions.clone()
		} else {
			None
		}
	}
}

struct ReportSource {
	reports: HashMap<Uuid, Arc<Report>>,
}

#[async_trait]
impl ContentSource for ReportSource {
	fn content_type(&self) -> &str {
		"docs.report"
	}

	async fn get(&self, object_id: Uuid) -> Option<Arc<dyn ContentItem>> {
		self.reports
			.get(&object_id)
			.cloned()
			.map(|report| report as Arc<dyn ContentItem>)
	}
}

struct Fixture {
	view: DownloadView,
	report_id: Uuid,
	// Keeps the storage directory alive for the duration of the test
	_dir: tempfile::TempDir,
}

async fn fixture_with_permissions(file_permissions: Option<PermissionSpec>) -> Fixture {
	let dir = tempfile::tempdir().unwrap();
	let storage = LocalStorage::new(dir.path()).unwrap();
	storage
		.save("reports/annual.pdf", PDF_BYTES)
		.await
		.unwrap();

	let report_id = Uuid::new_v4();
	let report = Arc::new(Report {
		id: report_id,
		file: FileRef::new("reports/annual.pdf"),
		file_permissions,
	});

	let registry = ContentTypeRegistry::new();
	registry.register(Arc::new(ReportSource {
		reports: HashMap::from([(report_id, report)]),
	}));

	Fixture {
		view: DownloadView::new(Arc::new(registry), Arc::new(storage)),
		report_id,
		_dir: dir,
	}
}

async fn fixture() -> Fixture {
	fixture_with_permissions(None).await
}

fn admin_request() -> Request {
	Request::builder()
		.user(Arc::new(
			SimpleUser::new("admin").with_permission(ADMIN_ACCESS_PERMISSION),
		))
		.build()
}

async fn collect_chunks(response: StreamingResponse<StreamBody>) -> Vec<Bytes> {
	let mut stream = response.into_stream();
	let mut chunks = Vec::new();
	while let Some(chunk) = stream.next().await {
		chunks.push(chunk.unwrap());
	}
	chunks
}

async fn collect_body(response: StreamingResponse<StreamBody>) -> Vec<u8> {
	collect_chunks(response)
		.await
		.iter()
		.flat_map(|chunk| chunk.iter().copied())
		.collect()
}

#[rstest]
#[tokio::test]
async fn test_valid_request_streams_file_with_headers() {
	let fixture = fixture().await;
	let request = admin_request();

	let response = fixture
		.view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get(CONTENT_LENGTH).unwrap().to_str().unwrap(),
		PDF_BYTES.len().to_string()
	);
	assert_eq!(
		response
			.headers
			.get(CONTENT_DISPOSITION)
			.unwrap()
			.to_str()
			.unwrap(),
		"attachment; filename=\"reports/annual.pdf\""
	);
	assert_eq!(collect_body(response).await, PDF_BYTES);
}

#[rstest]
#[tokio::test]
async fn test_streams_in_configured_chunks() {
	let fixture = fixture().await;
	let view = fixture.view.with_chunk_size(8);
	let request = admin_request();

	let response = view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;

	let chunks = collect_chunks(response).await;
	assert_eq!(chunks.len(), PDF_BYTES.len().div_ceil(8));
	let body: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
	assert_eq!(body, PDF_BYTES);
}

#[rstest]
#[tokio::test]
async fn test_anonymous_request_is_forbidden() {
	let fixture = fixture().await;
	let request = Request::builder().build();

	let response = fixture
		.view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;

	assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[rstest]
#[tokio::test]
async fn test_missing_baseline_permission_short_circuits() {
	// The per-field spec would allow anyone; the baseline check must still
	// reject before it is even consulted
	let fixture = fixture_with_permissions(Some(PermissionSpec::custom(|_| true))).await;
	let request = Request::builder()
		.user(Arc::new(SimpleUser::new("outsider")))
		.build();

	let response = fixture
		.view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;

	assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[rstest]
#[tokio::test]
async fn test_field_permission_denies_download() {
	let fixture =
		fixture_with_permissions(Some(PermissionSpec::permission("docs.download"))).await;

	// Baseline admin access alone is not enough
	let request = admin_request();
	let response = fixture
		.view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;
	assert_eq!(response.status, StatusCode::FORBIDDEN);

	// Holding both permissions unlocks the file
	let request = Request::builder()
		.user(Arc::new(
			SimpleUser::new("admin")
				.with_permission(ADMIN_ACCESS_PERMISSION)
				.with_permission("docs.download"),
		))
		.build();
	let response = fixture
		.view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;
	assert_eq!(response.status, StatusCode::OK);
}

#[rstest]
#[case("docs.unknown", None, "attachment")]
#[case("docs.report", Some(Uuid::nil()), "attachment")]
#[case("docs.report", None, "missing_field")]
#[case("docs.report", None, "title")]
#[tokio::test]
async fn test_unresolvable_references_are_not_found(
	#[case] content_type: &str,
	#[case] object_id: Option<Uuid>,
	#[case] field_name: &str,
) {
	let fixture = fixture().await;
	let request = admin_request();
	let object_id = object_id.unwrap_or(fixture.report_id);

	let response = fixture
		.view
		.serve(&request, content_type, object_id, field_name)
		.await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_handle_resolves_path_params() {
	let fixture = fixture().await;
	let request = Request::builder()
		.path(download_url(
			"docs.report",
			fixture.report_id,
			"attachment",
		))
		.path_param("content_type", "docs.report")
		.path_param("object_id", fixture.report_id.to_string())
		.path_param("field_name", "attachment")
		.user(Arc::new(
			SimpleUser::new("admin").with_permission(ADMIN_ACCESS_PERMISSION),
		))
		.build();

	let response = fixture.view.handle(&request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(collect_body(response).await, PDF_BYTES);
}

#[rstest]
#[tokio::test]
async fn test_handle_rejects_malformed_object_id() {
	let fixture = fixture().await;
	let request = Request::builder()
		.path_param("content_type", "docs.report")
		.path_param("object_id", "not-a-uuid")
		.path_param("field_name", "attachment")
		.user(Arc::new(
			SimpleUser::new("admin").with_permission(ADMIN_ACCESS_PERMISSION),
		))
		.build();

	let response = fixture.view.handle(&request).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_superuser_passes_all_checks() {
	let fixture =
		fixture_with_permissions(Some(PermissionSpec::permission("docs.download"))).await;
	let request = Request::builder()
		.user(Arc::new(SimpleUser::superuser("root")))
		.build();

	let response = fixture
		.view
		.serve(&request, "docs.report", fixture.report_id, "attachment")
		.await;

	assert_eq!(response.status, StatusCode::OK);
}
