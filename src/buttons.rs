//! Typed button configuration for admin panels.
//!
//! A [`ButtonConfig`] is an explicit struct with named fields; attribute
//! values that may be a literal or derived from the request/entity are the
//! tagged variant [`Computable`], resolved when the button is bound and
//! rendered.

use crate::content::ContentItem;
use crate::download;
use crate::html::escape;
use crate::http::Request;
use std::fmt;
use std::sync::Arc;

/// Context a bound button resolves its computed values against
pub struct ButtonContext<'a> {
	/// The current request
	pub request: &'a Request,
	/// The entity the panel is bound to
	pub item: &'a dyn ContentItem,
}

/// A value that is either a literal or computed from the button context
pub enum Computable<T> {
	/// A fixed value
	Static(T),
	/// A value derived from the bound request/entity at render time
	Computed(Arc<dyn Fn(&ButtonContext<'_>) -> T + Send + Sync>),
}

impl<T: Clone> Computable<T> {
	/// Wrap a derivation function
	pub fn computed<F>(f: F) -> Self
	where
		F: Fn(&ButtonContext<'_>) -> T + Send + Sync + 'static,
	{
		Self::Computed(Arc::new(f))
	}

	/// Resolve against a bound context
	pub fn resolve(&self, ctx: &ButtonContext<'_>) -> T {
		match self {
			Self::Static(value) => value.clone(),
			Self::Computed(f) => f(ctx),
		}
	}
}

impl<T: Clone> Clone for Computable<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Static(value) => Self::Static(value.clone()),
			Self::Computed(f) => Self::Computed(Arc::clone(f)),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Computable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(value) => write!(f, "Static({:?})", value),
			Self::Computed(_) => write!(f, "Computed(..)"),
		}
	}
}

impl From<&str> for Computable<String> {
	fn from(value: &str) -> Self {
		Self::Static(value.to_string())
	}
}

impl From<String> for Computable<String> {
	fn from(value: String) -> Self {
		Self::Static(value)
	}
}

/// HTML tag a button renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTag {
	/// `<a>` element
	Anchor,
	/// `<button>` element
	Button,
}

impl ButtonTag {
	/// The element name
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Anchor => "a",
			Self::Button => "button",
		}
	}
}

/// Declarative button configuration.
///
/// # Examples
///
/// ```
/// use cms_panels::buttons::{ButtonConfig, ButtonTag};
///
/// let view = ButtonConfig::anchor("View live", "/live/");
/// assert_eq!(view.tag, ButtonTag::Anchor);
///
/// let export = ButtonConfig::download("Export PDF", "report");
/// assert!(export.hide_on_create);
/// ```
#[derive(Clone, Debug)]
pub struct ButtonConfig {
	/// Element the button renders as
	pub tag: ButtonTag,
	/// Visible button text
	pub text: String,
	/// Target URL (anchors)
	pub url: Computable<String>,
	/// Element id (buttons)
	pub id: Computable<String>,
	/// CSS class attribute
	pub classname: Computable<String>,
	/// Render nothing while the entity is an unsaved draft
	pub hide_on_create: bool,
}

impl ButtonConfig {
	/// An anchor-tag button pointing at a URL
	pub fn anchor(text: impl Into<String>, url: impl Into<Computable<String>>) -> Self {
		Self {
			tag: ButtonTag::Anchor,
			text: text.into(),
			url: url.into(),
			id: Computable::Static(String::new()),
			classname: Computable::Static("button".to_string()),
			hide_on_create: false,
		}
	}

	/// A button-tag action button with an element id
	pub fn action(text: impl Into<String>, id: impl Into<Computable<String>>) -> Self {
		Self {
			tag: ButtonTag::Button,
			text: text.into(),
			url: Computable::Static("#".to_string()),
			id: id.into(),
			classname: Computable::Static("button button-small".to_string()),
			hide_on_create: false,
		}
	}

	/// An anchor-tag button linking to the download endpoint for a file field.
	///
	/// The URL is computed at render time from the bound entity's
	/// content-type key and object id. Hidden while the entity is unsaved.
	pub fn download(text: impl Into<String>, file_field: impl Into<String>) -> Self {
		let field = file_field.into();
		Self {
			tag: ButtonTag::Anchor,
			text: text.into(),
			url: Computable::computed(move |ctx: &ButtonContext<'_>| {
				ctx.item
					.object_id()
					.map(|id| download::download_url(ctx.item.content_type(), id, &field))
					.unwrap_or_default()
			}),
			id: Computable::Static(String::new()),
			classname: Computable::Static("button".to_string()),
			hide_on_create: true,
		}
	}

	/// Override the class attribute
	pub fn with_classname(mut self, classname: impl Into<Computable<String>>) -> Self {
		self.classname = classname.into();
		self
	}

	/// Bind this configuration to a request and entity
	pub fn bind<'a>(&'a self, request: &'a Request, item: &'a dyn ContentItem) -> BoundButton<'a> {
		BoundButton {
			config: self,
			ctx: ButtonContext { request, item },
		}
	}
}

/// A button bound to a request and entity, ready to render
pub struct BoundButton<'a> {
	config: &'a ButtonConfig,
	ctx: ButtonContext<'a>,
}

impl BoundButton<'_> {
	/// The element the button renders as
	pub fn tag(&self) -> ButtonTag {
		self.config.tag
	}

	/// The visible button text
	pub fn text(&self) -> &str {
		&self.config.text
	}

	/// The resolved target URL
	pub fn url(&self) -> String {
		self.config.url.resolve(&self.ctx)
	}

	/// The resolved class attribute
	pub fn classes(&self) -> String {
		self.config.classname.resolve(&self.ctx)
	}

	/// The resolved element id
	pub fn id(&self) -> String {
		self.config.id.resolve(&self.ctx)
	}

	/// The attribute map for the element, keyed by attribute name
	pub fn attributes(&self) -> Vec<(&'static str, String)> {
		match self.config.tag {
			ButtonTag::Anchor => vec![("href", self.url()), ("class", self.classes())],
			ButtonTag::Button => vec![("id", self.id()), ("class", self.classes())],
		}
	}

	/// Render the button as an HTML fragment.
	///
	/// Buttons marked hide-on-create render as an empty string while the
	/// entity has no primary key.
	pub fn render(&self) -> String {
		if self.config.hide_on_create && self.ctx.item.object_id().is_none() {
			return String::new();
		}

		let tag = self.config.tag.as_str();
		let mut html = format!("<{}", tag);
		for (name, value) in self.attributes() {
			html.push_str(&format!(" {}=\"{}\"", name, escape(&value)));
		}
		html.push_str(&format!(">{}</{}>", escape(&self.config.text), tag));
		html
	}
}
