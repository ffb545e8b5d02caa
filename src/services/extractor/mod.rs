/// Media extraction abstraction
///
/// All interaction with media sites (search, metadata, direct URL resolution)
/// goes through a [`MediaExtractor`]. The gateway only reshapes what the
/// extractor reports.
use serde_json::Value;

use crate::error::ExtractorError;

pub mod ytdlp;

pub use ytdlp::YtDlpExtractor;

/// Format selector preferring audio-only streams
pub const BEST_AUDIO_FORMAT: &str = "bestaudio/best";

/// Option set handed to the extractor for a single call
///
/// Built fresh for every operation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub format: String,
    pub no_playlist: bool,
    pub quiet: bool,
    pub no_warnings: bool,
    /// Return lightweight metadata without resolving each item
    pub extract_flat: bool,
    pub no_check_certificate: bool,
    pub geo_bypass: bool,
    /// Keep going when individual items of a result set fail
    pub ignore_errors: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            format: BEST_AUDIO_FORMAT.to_string(),
            no_playlist: true,
            quiet: true,
            no_warnings: true,
            extract_flat: true,
            no_check_certificate: true,
            geo_bypass: true,
            ignore_errors: false,
        }
    }
}

impl ExtractOptions {
    /// Options for a keyword search listing
    pub fn for_search(flat: bool) -> Self {
        Self {
            extract_flat: flat,
            ignore_errors: true,
            ..Self::default()
        }
    }

    /// Options for resolving a single item's direct media URL
    pub fn for_stream() -> Self {
        Self {
            extract_flat: false,
            ..Self::default()
        }
    }
}

/// Trait for media extraction backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Extract the info dict for a URL or search target without downloading
    async fn extract_info(
        &self,
        target: &str,
        options: &ExtractOptions,
    ) -> Result<Value, ExtractorError>;

    /// Extractor name for logging and health reporting
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_follow_flat_setting() {
        let flat = ExtractOptions::for_search(true);
        assert!(flat.extract_flat);
        assert!(flat.ignore_errors);
        assert_eq!(flat.format, BEST_AUDIO_FORMAT);

        let full = ExtractOptions::for_search(false);
        assert!(!full.extract_flat);
    }

    #[test]
    fn test_stream_options_disable_flat_extraction() {
        let options = ExtractOptions::for_stream();
        assert!(!options.extract_flat);
        assert!(!options.ignore_errors);
        assert!(options.no_playlist);
        assert!(options.geo_bypass);
        assert_eq!(options.format, BEST_AUDIO_FORMAT);
    }
}
