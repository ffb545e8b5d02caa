use serde::Deserialize;
use serde_json::Value;

pub mod track;

pub use track::{StreamDescriptor, TrackSummary};

// ============================================================================
// Extractor output types
// ============================================================================

/// One item of a search result set, as reported by the extractor
///
/// Only the fields projected into a [`TrackSummary`] are read; everything
/// else in the info dict is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub thumbnails: Vec<UpstreamThumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamThumbnail {
    #[serde(default)]
    pub url: Option<String>,
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl UpstreamEntry {
    /// Parses one raw entry, returning `None` for null or malformed items
    pub fn parse(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed search entry");
                None
            }
        }
    }
}

/// Entries of a search result
///
/// `None` when the result has no `entries` key or `entries` is neither a
/// list nor null.
pub fn search_entries(result: &Value) -> Option<Vec<Value>> {
    match result.as_object()?.get("entries")? {
        Value::Null => Some(vec![]),
        Value::Array(entries) => Some(entries.clone()),
        _ => None,
    }
}

/// Direct media URL of a resolved item
pub fn stream_url(info: &Value) -> Option<String> {
    info.get("url")?.as_str().map(str::to_string)
}
