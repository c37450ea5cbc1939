//! Tests for button configuration and bound rendering

use cms_panels::buttons::{ButtonConfig, ButtonTag, Computable};
use cms_panels::content::{ContentItem, FieldValue};
use cms_panels::download::download_url;
use cms_panels::http::Request;
use rstest::rstest;
use uuid::Uuid;

struct Report {
	id: Option<Uuid>,
}

impl ContentItem for Report {
	fn content_type(&self) -> &str {
		"docs.report"
	}

	fn object_id(&self) -> Option<Uuid> {
		self.id
	}

	fn field(&self, _name: &str) -> Option<FieldValue> {
		None
	}
}

fn saved() -> Report {
	Report {
		id: Some(Uuid::new_v4()),
	}
}

fn draft() -> Report {
	Report { id: None }
}

#[rstest]
fn test_anchor_button_attributes() {
	let request = Request::builder().build();
	let report = saved();
	let config = ButtonConfig::anchor("View live", "/live/");

	let bound = config.bind(&request, &report);

	assert_eq!(bound.tag(), ButtonTag::Anchor);
	assert_eq!(
		bound.attributes(),
		vec![
			("href", "/live/".to_string()),
			("class", "button".to_string()),
		]
	);
	assert_eq!(bound.render(), "<a href=\"/live/\" class=\"button\">View live</a>");
}

#[rstest]
fn test_action_button_attributes() {
	let request = Request::builder().build();
	let report = saved();
	let config = ButtonConfig::action("Refresh", "refresh-stats");

	let bound = config.bind(&request, &report);

	assert_eq!(bound.tag(), ButtonTag::Button);
	assert_eq!(bound.url(), "#");
	assert_eq!(
		bound.attributes(),
		vec![
			("id", "refresh-stats".to_string()),
			("class", "button button-small".to_string()),
		]
	);
	assert_eq!(
		bound.render(),
		"<button id=\"refresh-stats\" class=\"button button-small\">Refresh</button>"
	);
}

#[rstest]
fn test_computed_value_resolves_against_bound_entity() {
	let request = Request::builder().build();
	let config = ButtonConfig::anchor("View", "/view/").with_classname(Computable::computed(
		|ctx| {
			if ctx.item.object_id().is_some() {
				"button live".to_string()
			} else {
				"button".to_string()
			}
		},
	));

	let report = saved();
	assert_eq!(config.bind(&request, &report).classes(), "button live");

	let report = draft();
	assert_eq!(config.bind(&request, &report).classes(), "button");
}

#[rstest]
fn test_download_button_links_to_download_endpoint() {
	let request = Request::builder().build();
	let report = saved();
	let config = ButtonConfig::download("Export", "attachment");

	let bound = config.bind(&request, &report);

	assert_eq!(
		bound.url(),
		download_url("docs.report", report.id.unwrap(), "attachment")
	);
}

#[rstest]
fn test_download_button_hidden_for_drafts() {
	let request = Request::builder().build();
	let report = draft();
	let config = ButtonConfig::download("Export", "attachment");

	assert!(config.hide_on_create);
	assert_eq!(config.bind(&request, &report).render(), "");
}

#[rstest]
fn test_render_escapes_text_and_attributes() {
	let request = Request::builder().build();
	let report = saved();
	let config = ButtonConfig::anchor("<Danger> & \"co\"", "/x/?a=1&b=2");

	let html = config.bind(&request, &report).render();

	assert!(html.contains("&lt;Danger&gt; &amp; &quot;co&quot;"));
	assert!(html.contains("href=\"/x/?a=1&amp;b=2\""));
	assert!(!html.contains("<Danger>"));
}
