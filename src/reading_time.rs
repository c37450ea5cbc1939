//! Reading-time estimation with save-time caching.
//!
//! [`ReadingTimeEstimator`] converts tag-stripped word counts to seconds at
//! a configured reading speed. [`ReadingTime`] is the capability an entity
//! holds: it owns the list of source field names and the cached duration,
//! and is recomputed explicitly from the entity's save path (never on read).

use crate::content::ContentItem;
use crate::error::PanelResult;
use crate::html::strip_tags;
use crate::http::Response;
use crate::settings::PanelsSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Preview mode name served by the reading-time side channel
pub const READING_TIME_PREVIEW_MODE: &str = "reading_time";

/// Word-count based reading-time estimator.
///
/// # Examples
///
/// ```
/// use cms_panels::reading_time::ReadingTimeEstimator;
///
/// let estimator = ReadingTimeEstimator::new(120.0);
/// assert_eq!(estimator.estimate("one two three four"), 2.0);
/// assert_eq!(estimator.estimate("<p>one two</p>"), estimator.estimate("one two"));
/// assert_eq!(estimator.estimate("   "), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ReadingTimeEstimator {
	words_per_second: f64,
}

impl ReadingTimeEstimator {
	/// Create an estimator for a reading speed in words per minute
	pub fn new(words_per_minute: f64) -> Self {
		Self {
			words_per_second: words_per_minute / 60.0,
		}
	}

	/// Create an estimator from deployment settings
	pub fn from_settings(settings: &PanelsSettings) -> Self {
		Self::new(settings.reading_time_wpm)
	}

	/// The configured reading speed in words per second
	pub fn words_per_second(&self) -> f64 {
		self.words_per_second
	}

	/// Estimate the reading time of a text, in seconds.
	///
	/// Markup tags are stripped (best effort, never fails), the remainder is
	/// split on whitespace, and the token count is divided by the configured
	/// words-per-second rate. Empty or whitespace-only text yields 0.
	pub fn estimate(&self, text: &str) -> f64 {
		let filtered = strip_tags(text);
		let total_words = filtered.split_whitespace().count();
		total_words as f64 / self.words_per_second
	}

	/// Estimate the total reading time across the named fields of an entity.
	///
	/// Each field's value is coerced through its display representation,
	/// estimated independently, and the per-field seconds are summed.
	///
	/// # Panics
	///
	/// Panics if a named field does not exist on the entity. A missing
	/// source field is a configuration error, not a runtime condition.
	pub fn recompute(&self, item: &dyn ContentItem, fields: &[String]) -> Duration {
		let total_seconds: f64 = fields
			.iter()
			.map(|name| {
				let value = item.field(name).unwrap_or_else(|| {
					panic!(
						"unknown reading-time source field `{}` on `{}`",
						name,
						item.content_type()
					)
				});
				self.estimate(&value.to_string())
			})
			.sum();
		Duration::from_secs_f64(total_seconds)
	}
}

/// Reading-time capability held by an entity.
///
/// Owns the source field names and the cached duration. The entity's save
/// path calls [`ReadingTime::recompute_from`] immediately before the
/// persistence write; persisting the value is the caller's responsibility.
/// A fresh capability reports a zero duration until the first save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingTime {
	source_fields: Vec<String>,
	#[serde(default)]
	duration: Duration,
}

impl ReadingTime {
	/// Create a capability over the given source field names
	///
	/// # Examples
	///
	/// ```
	/// use cms_panels::reading_time::ReadingTime;
	/// use std::time::Duration;
	///
	/// let reading_time = ReadingTime::new(["intro", "body"]);
	/// assert_eq!(reading_time.duration(), Duration::ZERO);
	/// ```
	pub fn new<I, S>(fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			source_fields: fields.into_iter().map(Into::into).collect(),
			duration: Duration::ZERO,
		}
	}

	/// The configured source field names
	pub fn source_fields(&self) -> &[String] {
		&self.source_fields
	}

	/// The cached duration as of the last recompute
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Recompute and cache the duration from the entity's current field
	/// values, replacing any previous value.
	///
	/// # Panics
	///
	/// Panics if a configured source field does not exist on the entity.
	pub fn recompute_from(
		&mut self,
		item: &dyn ContentItem,
		estimator: &ReadingTimeEstimator,
	) -> Duration {
		self.duration = estimator.recompute(item, &self.source_fields);
		tracing::debug!(
			content_type = item.content_type(),
			seconds = self.duration.as_secs_f64(),
			"recomputed reading time"
		);
		self.duration
	}

	/// Humanized label for the cached duration
	pub fn label(&self) -> String {
		humanize(self.duration)
	}
}

/// Humanize a duration as a reading-time label.
///
/// Durations under a minute collapse to a fixed message; anything longer is
/// floored to whole minutes and pluralized.
///
/// # Examples
///
/// ```
/// use cms_panels::reading_time::humanize;
/// use std::time::Duration;
///
/// assert_eq!(humanize(Duration::from_secs(59)), "Less than a minute");
/// assert_eq!(humanize(Duration::from_secs(60)), "1 minute");
/// assert_eq!(humanize(Duration::from_secs(125)), "2 minutes");
/// ```
pub fn humanize(duration: Duration) -> String {
	let total_seconds = duration.as_secs_f64();
	if total_seconds < 60.0 {
		return "Less than a minute".to_string();
	}

	let minutes = (total_seconds / 60.0).floor() as u64;
	if minutes == 1 {
		"1 minute".to_string()
	} else {
		format!("{} minutes", minutes)
	}
}

/// Serve the reading-time preview side channel.
///
/// Recomputes the duration in memory (without persisting) for any preview
/// request; for the `reading_time` mode the result is returned as a JSON
/// response instead of the normal preview rendering. Other modes return
/// `Ok(None)` so the caller falls through to its usual preview path.
///
/// # Panics
///
/// Panics if a configured source field does not exist on the entity.
pub fn serve_preview(
	estimator: &ReadingTimeEstimator,
	reading_time: &mut ReadingTime,
	item: &dyn ContentItem,
	mode_name: &str,
) -> PanelResult<Option<Response>> {
	reading_time.recompute_from(item, estimator);

	if mode_name != READING_TIME_PREVIEW_MODE {
		return Ok(None);
	}

	let payload = serde_json::json!({
		"reading_time": reading_time.label(),
	});
	Ok(Some(Response::ok().with_json(&payload)?))
}
