//! Admin panel components.
//!
//! A [`Panel`] is declarative configuration; binding it to a request and
//! entity through a [`PanelContext`] yields HTML ready for the host admin
//! shell. Visibility is permission-gated per panel.

use crate::buttons::ButtonConfig;
use crate::content::ContentItem;
use crate::download::download_url;
use crate::error::{PanelError, PanelResult};
use crate::html::{escape, format_html};
use crate::http::Request;
use crate::permissions::{PermissionContext, PermissionSpec};
use crate::reading_time::ReadingTime;

/// Context a panel is bound against: the current request and entity
pub struct PanelContext<'a> {
	/// The current request
	pub request: &'a Request,
	/// The entity being edited
	pub item: &'a dyn ContentItem,
}

/// An admin panel that can render itself for a bound request and entity
pub trait Panel: Send + Sync {
	/// Stable identifier for the panel
	fn name(&self) -> &str;

	/// Whether the panel should be shown for this context
	fn is_shown(&self, _ctx: &PanelContext<'_>) -> bool {
		true
	}

	/// Render the panel as an HTML fragment
	fn render(&self, ctx: &PanelContext<'_>) -> PanelResult<String>;
}

/// Static asset references a panel asks the admin shell to include
#[derive(Debug, Clone, Default)]
pub struct PanelMedia {
	/// Stylesheet paths
	pub css: Vec<&'static str>,
	/// Script paths
	pub js: Vec<&'static str>,
}

/// Side-panel descriptor for the reading-time display.
///
/// Shown alongside the content editor; the shell uses the descriptor fields
/// for the toggle button and ordering, and [`Panel::render`] for the body.
#[derive(Debug, Clone)]
pub struct ReadingTimeSidePanel {
	/// Panel title shown in the side-panel header
	pub title: String,
	/// Icon name for the toggle button
	pub icon_name: &'static str,
	/// Accessible label for the toggle button
	pub toggle_aria_label: String,
	/// Sort order among side panels
	pub order: u32,
}

impl Default for ReadingTimeSidePanel {
	fn default() -> Self {
		Self {
			title: "Reading time".to_string(),
			icon_name: "rotate",
			toggle_aria_label: "Toggle reading time panel".to_string(),
			order: 250,
		}
	}
}

impl ReadingTimeSidePanel {
	/// Create the descriptor with its default title, icon, and order
	pub fn new() -> Self {
		Self::default()
	}

	/// Static assets the panel body depends on
	pub fn media(&self) -> PanelMedia {
		PanelMedia {
			css: vec!["cms_panels/reading_time/reading_time.css"],
			js: vec!["cms_panels/reading_time/reading_time.js"],
		}
	}
}

impl Panel for ReadingTimeSidePanel {
	fn name(&self) -> &str {
		"reading_time"
	}

	fn render(&self, ctx: &PanelContext<'_>) -> PanelResult<String> {
		let reading_time = reading_time_of(ctx.item)?;
		Ok(format_html(
			concat!(
				"<section class=\"side-panel side-panel--reading-time\" ",
				"aria-label=\"{aria_label}\" data-order=\"{order}\">",
				"<h2>{title}</h2>",
				"<p data-reading-time-seconds=\"{seconds}\">{label}</p>",
				"</section>"
			),
			&[
				("aria_label", self.toggle_aria_label.as_str()),
				("order", &self.order.to_string()),
				("title", self.title.as_str()),
				("seconds", &reading_time.duration().as_secs().to_string()),
				("label", &reading_time.label()),
			],
		))
	}
}

/// Inline editor panel showing the cached reading time.
#[derive(Debug, Clone, Default)]
pub struct ReadingTimePanel;

impl ReadingTimePanel {
	/// Create the panel
	pub fn new() -> Self {
		Self
	}

	/// Read-only context data exposed to the admin shell
	pub fn context_data(&self, ctx: &PanelContext<'_>) -> PanelResult<serde_json::Value> {
		let reading_time = reading_time_of(ctx.item)?;
		Ok(serde_json::json!({
			"object_id": ctx.item.object_id(),
			"seconds": reading_time.duration().as_secs_f64(),
			"reading_time": reading_time.label(),
		}))
	}
}

impl Panel for ReadingTimePanel {
	fn name(&self) -> &str {
		"reading_time"
	}

	fn render(&self, ctx: &PanelContext<'_>) -> PanelResult<String> {
		let reading_time = reading_time_of(ctx.item)?;
		Ok(format_html(
			concat!(
				"<div class=\"reading-time-panel\" data-reading-time-seconds=\"{seconds}\">",
				"Reading time: <span>{label}</span>",
				"</div>"
			),
			&[
				("seconds", &reading_time.duration().as_secs().to_string()),
				("label", &reading_time.label()),
			],
		))
	}
}

fn reading_time_of(item: &dyn ContentItem) -> PanelResult<&ReadingTime> {
	item.reading_time().ok_or_else(|| {
		PanelError::Config(format!(
			"`{}` has no reading-time capability",
			item.content_type()
		))
	})
}

/// Per-field metadata the download panel renders
#[derive(Debug, Clone)]
pub struct FileFieldEntry {
	/// Field name
	pub field: String,
	/// Humanized field label
	pub label: String,
	/// Whether the field currently holds a file
	pub has_file: bool,
	/// Download URL, present once the entity is saved and a file exists
	pub url: Option<String>,
}

/// Panel listing downloadable file fields of the bound entity.
pub struct FileDownloadPanel {
	file_fields: Vec<String>,
	permissions: PermissionSpec,
}

impl FileDownloadPanel {
	/// Create a panel over the named file fields, visible to everyone
	pub fn new<I, S>(file_fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			file_fields: file_fields.into_iter().map(Into::into).collect(),
			permissions: PermissionSpec::AllowAny,
		}
	}

	/// Gate the panel's visibility on a permission specification
	pub fn with_permissions(mut self, permissions: PermissionSpec) -> Self {
		self.permissions = permissions;
		self
	}

	/// The configured file field names
	pub fn file_fields(&self) -> &[String] {
		&self.file_fields
	}

	/// Resolve per-field metadata for a bound entity
	pub fn field_entries(&self, ctx: &PanelContext<'_>) -> Vec<FileFieldEntry> {
		self.file_fields
			.iter()
			.map(|field| {
				let value = ctx.item.field(field);
				let has_file = value.as_ref().is_some_and(|v| !v.is_empty());
				let url = match (has_file, ctx.item.object_id()) {
					(true, Some(id)) => {
						Some(download_url(ctx.item.content_type(), id, field))
					}
					_ => None,
				};
				FileFieldEntry {
					field: field.clone(),
					label: ctx.item.field_label(field),
					has_file,
					url,
				}
			})
			.collect()
	}
}

impl Panel for FileDownloadPanel {
	fn name(&self) -> &str {
		"file_download"
	}

	fn is_shown(&self, ctx: &PanelContext<'_>) -> bool {
		match (&self.permissions, ctx.request.user()) {
			(PermissionSpec::AllowAny, _) => true,
			(_, None) => false,
			(spec, Some(user)) => spec.check(&PermissionContext {
				user,
				item: ctx.item,
			}),
		}
	}

	fn render(&self, ctx: &PanelContext<'_>) -> PanelResult<String> {
		let mut rows = String::new();
		for entry in self.field_entries(ctx) {
			let action = match &entry.url {
				Some(url) => format_html(
					"<a href=\"{url}\" class=\"button\">Download</a>",
					&[("url", url.as_str())],
				),
				None => "<span class=\"no-file\">No file</span>".to_string(),
			};
			rows.push_str(&format!(
				"<li data-field=\"{}\"><span class=\"field-label\">{}</span>{}</li>",
				escape(&entry.field),
				escape(&entry.label),
				action
			));
		}

		Ok(format!(
			"<div class=\"file-download-panel\"><ul>{}</ul></div>",
			rows
		))
	}
}

/// Panel rendering a row of configured buttons.
pub struct ButtonPanel {
	buttons: Vec<ButtonConfig>,
}

impl ButtonPanel {
	/// Create a panel over the given button configurations
	pub fn new(buttons: impl IntoIterator<Item = ButtonConfig>) -> Self {
		Self {
			buttons: buttons.into_iter().collect(),
		}
	}

	/// The configured buttons
	pub fn buttons(&self) -> &[ButtonConfig] {
		&self.buttons
	}
}

impl Panel for ButtonPanel {
	fn name(&self) -> &str {
		"buttons"
	}

	fn render(&self, ctx: &PanelContext<'_>) -> PanelResult<String> {
		let mut html = String::from("<div class=\"button-panel\">");
		for button in &self.buttons {
			html.push_str(&button.bind(ctx.request, ctx.item).render());
		}
		html.push_str("</div>");
		Ok(html)
	}
}
