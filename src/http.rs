//! Request, response, and streaming primitives.
//!
//! A thin seam over `hyper` types so panels and the download endpoint can be
//! exercised without a full host framework. The hosting application is
//! expected to adapt its own request/response types at this boundary.

use crate::error::{PanelError, PanelResult};
use crate::permissions::User;
use bytes::Bytes;
use futures::stream::Stream;
use hyper::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

/// HTTP request representation
///
/// Carries the pieces the panels need: method, path, headers, resolved path
/// parameters, and the authenticated user (if any).
pub struct Request {
	/// Request method
	pub method: Method,
	/// Request path
	pub path: String,
	/// Request headers
	pub headers: HeaderMap,
	/// Path parameters resolved by the host router
	pub path_params: HashMap<String, String>,
	user: Option<Arc<dyn User>>,
}

impl Request {
	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use cms_panels::http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder().method(Method::GET).path("/admin/").build();
	/// assert_eq!(request.method, Method::GET);
	/// assert!(request.user().is_none());
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// The authenticated user attached to this request, if any
	pub fn user(&self) -> Option<&dyn User> {
		self.user.as_deref()
	}

	/// Look up a path parameter by name
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}
}

/// Builder for [`Request`]
#[derive(Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	path: String,
	headers: HeaderMap,
	path_params: HashMap<String, String>,
	user: Option<Arc<dyn User>>,
}

impl RequestBuilder {
	/// Set the request method
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	/// Set the request path
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Add a header
	pub fn header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = hyper::header::HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	/// Add a resolved path parameter
	pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.path_params.insert(name.into(), value.into());
		self
	}

	/// Attach the authenticated user
	pub fn user(mut self, user: Arc<dyn User>) -> Self {
		self.user = Some(user);
		self
	}

	/// Build the request
	pub fn build(self) -> Request {
		Request {
			method: self.method.unwrap_or(Method::GET),
			path: self.path,
			headers: self.headers,
			path_params: self.path_params,
			user: self.user,
		}
	}
}

/// HTTP response representation
pub struct Response {
	/// Response status code
	pub status: StatusCode,
	/// Response headers
	pub headers: HeaderMap,
	/// Response body
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 200 OK status
	///
	/// # Examples
	///
	/// ```
	/// use cms_panels::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::ok();
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a Response with HTTP 403 Forbidden status
	pub fn forbidden() -> Self {
		Self::new(StatusCode::FORBIDDEN)
	}

	/// Create a Response with HTTP 404 Not Found status
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Set the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a custom header to the response
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = hyper::header::HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	/// Set the response body to JSON and add the Content-Type header
	///
	/// # Examples
	///
	/// ```
	/// use cms_panels::http::Response;
	/// use serde_json::json;
	///
	/// let data = json!({"reading_time": "2 minutes"});
	/// let response = Response::ok().with_json(&data).unwrap();
	/// assert_eq!(
	///     response.headers.get("content-type").unwrap().to_str().unwrap(),
	///     "application/json"
	/// );
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> PanelResult<Self> {
		let json =
			serde_json::to_vec(data).map_err(|e| PanelError::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("application/json"),
		);
		Ok(self)
	}
}

/// Streaming HTTP response
pub struct StreamingResponse<S> {
	/// Response status code
	pub status: StatusCode,
	/// Response headers
	pub headers: HeaderMap,
	/// Response body stream
	pub stream: S,
}

/// Type alias for a boxed streaming body
pub type StreamBody =
	Pin<Box<dyn Stream<Item = Result<Bytes, Box<dyn std::error::Error + Send + Sync>>> + Send>>;

impl<S> StreamingResponse<S>
where
	S: Stream<Item = Result<Bytes, Box<dyn std::error::Error + Send + Sync>>> + Send + 'static,
{
	/// Create a new streaming response with OK status
	///
	/// # Examples
	///
	/// ```
	/// use cms_panels::http::StreamingResponse;
	/// use bytes::Bytes;
	/// use futures::stream;
	/// use hyper::StatusCode;
	///
	/// let chunks = vec![Ok(Bytes::from("chunk1")), Ok(Bytes::from("chunk2"))];
	/// let response = StreamingResponse::new(stream::iter(chunks));
	/// assert_eq!(response.status, StatusCode::OK);
	/// ```
	pub fn new(stream: S) -> Self {
		Self {
			status: StatusCode::OK,
			headers: HeaderMap::new(),
			stream,
		}
	}

	/// Create a streaming response with a specific status code
	pub fn with_status(stream: S, status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			stream,
		}
	}

	/// Add a header to the streaming response
	pub fn header(
		mut self,
		key: hyper::header::HeaderName,
		value: hyper::header::HeaderValue,
	) -> Self {
		self.headers.insert(key, value);
		self
	}
}

impl StreamingResponse<StreamBody> {
	/// Create a bodyless streaming response for an error status
	pub fn empty(status: StatusCode) -> Self {
		let body: StreamBody = Box::pin(futures::stream::empty());
		Self::with_status(body, status)
	}
}

impl<S> StreamingResponse<S> {
	/// Consume the response and return the underlying stream
	pub fn into_stream(self) -> S {
		self.stream
	}
}
