//! Deployment configuration for the panels crate.

use crate::error::{PanelError, PanelResult};
use std::env;

/// Default reading speed in words per minute.
pub const DEFAULT_READING_TIME_WPM: f64 = 200.0;

/// Default chunk size for streamed downloads, in bytes.
pub const DEFAULT_DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Process-wide settings for reading-time estimation and downloads.
///
/// Values come from deployment configuration; [`PanelsSettings::from_env`]
/// reads the `CMS_PANELS_*` environment variables and falls back to the
/// defaults for anything unset.
///
/// # Examples
///
/// ```
/// use cms_panels::settings::PanelsSettings;
///
/// let settings = PanelsSettings::default();
/// assert_eq!(settings.reading_time_wpm, 200.0);
/// assert_eq!(settings.download_chunk_size, 8192);
/// ```
#[derive(Debug, Clone)]
pub struct PanelsSettings {
	/// Reading speed used to convert word counts to durations.
	pub reading_time_wpm: f64,
	/// Chunk size for streamed file downloads.
	pub download_chunk_size: usize,
}

impl Default for PanelsSettings {
	fn default() -> Self {
		Self {
			reading_time_wpm: DEFAULT_READING_TIME_WPM,
			download_chunk_size: DEFAULT_DOWNLOAD_CHUNK_SIZE,
		}
	}
}

impl PanelsSettings {
	/// Load settings from the environment.
	///
	/// Reads `CMS_PANELS_READING_TIME_WPM` and
	/// `CMS_PANELS_DOWNLOAD_CHUNK_SIZE`; unset variables keep their default
	/// values.
	///
	/// # Errors
	///
	/// Returns `` `PanelError::Config` `` if a variable is set but does not
	/// parse, or if the resulting reading speed is not positive.
	pub fn from_env() -> PanelResult<Self> {
		let mut settings = Self::default();

		if let Ok(raw) = env::var("CMS_PANELS_READING_TIME_WPM") {
			settings.reading_time_wpm = raw.parse().map_err(|_| {
				PanelError::Config(format!("Invalid CMS_PANELS_READING_TIME_WPM: {}", raw))
			})?;
		}

		if let Ok(raw) = env::var("CMS_PANELS_DOWNLOAD_CHUNK_SIZE") {
			settings.download_chunk_size = raw.parse().map_err(|_| {
				PanelError::Config(format!("Invalid CMS_PANELS_DOWNLOAD_CHUNK_SIZE: {}", raw))
			})?;
		}

		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> PanelResult<()> {
		if self.reading_time_wpm <= 0.0 {
			return Err(PanelError::Config(format!(
				"Reading speed must be positive, got {}",
				self.reading_time_wpm
			)));
		}
		if self.download_chunk_size == 0 {
			return Err(PanelError::Config(
				"Download chunk size must be non-zero".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let settings = PanelsSettings::default();
		assert_eq!(settings.reading_time_wpm, DEFAULT_READING_TIME_WPM);
		assert_eq!(settings.download_chunk_size, DEFAULT_DOWNLOAD_CHUNK_SIZE);
	}

	#[test]
	fn test_validate_rejects_zero_wpm() {
		let settings = PanelsSettings {
			reading_time_wpm: 0.0,
			..PanelsSettings::default()
		};
		assert!(settings.validate().is_err());
	}
}
