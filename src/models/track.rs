use serde::{Deserialize, Serialize};

use super::UpstreamEntry;

/// Title used when an upstream entry carries none
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One search result as exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackSummary {
    pub title: String,
    /// Source page URL
    pub url: String,
    pub thumbnail: String,
    pub id: String,
}

/// Direct, time-limited media URL for one item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub url: String,
}

impl From<UpstreamEntry> for TrackSummary {
    fn from(entry: UpstreamEntry) -> Self {
        // Flat results carry `url` and `thumbnails` instead of
        // `webpage_url` and `thumbnail`.
        let thumbnail = entry.thumbnail.or_else(|| {
            entry
                .thumbnails
                .into_iter()
                .rev()
                .find_map(|thumb| thumb.url)
        });

        Self {
            title: entry.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            url: entry.webpage_url.or(entry.url).unwrap_or_default(),
            thumbnail: thumbnail.unwrap_or_default(),
            id: entry.id.unwrap_or_default(),
        }
    }
}
