use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{self, StreamDescriptor, TrackSummary, UpstreamEntry},
    services::extractor::{ExtractOptions, MediaExtractor},
};

/// Searches the top candidates for a keyword query
///
/// An empty query yields an empty list without calling the extractor.
/// Invalid or null entries in the upstream result set are dropped; the rest
/// keep upstream order, capped at `config.search_limit`.
pub async fn search_tracks(
    extractor: Arc<dyn MediaExtractor>,
    config: &Config,
    query: &str,
) -> AppResult<Vec<TrackSummary>> {
    if query.is_empty() {
        return Ok(vec![]);
    }

    let target = format!("ytsearch{}:{}", config.search_limit, query);
    let options = ExtractOptions::for_search(config.flat_search);

    tracing::debug!(query = %query, flat = options.extract_flat, "Searching");

    let result = extractor
        .extract_info(&target, &options)
        .await
        .map_err(|e| {
            tracing::warn!(query = %query, error = %e, "Search error");
            AppError::Search(e)
        })?;

    let entries = models::search_entries(&result).ok_or_else(|| {
        tracing::debug!(query = %query, "No results found or invalid response");
        AppError::NoResults
    })?;

    let total = entries.len();
    let tracks: Vec<TrackSummary> = entries
        .into_iter()
        .filter_map(UpstreamEntry::parse)
        .take(config.search_limit)
        .map(TrackSummary::from)
        .collect();

    tracing::info!(
        query = %query,
        upstream = total,
        results = tracks.len(),
        extractor = extractor.name(),
        "Search completed"
    );

    Ok(tracks)
}

/// Resolves the direct media URL for a video id
pub async fn resolve_stream(
    extractor: Arc<dyn MediaExtractor>,
    config: &Config,
    video_id: &str,
) -> AppResult<StreamDescriptor> {
    let target = config.watch_url(video_id);
    let options = ExtractOptions::for_stream();

    tracing::debug!(video_id = %video_id, "Resolving stream");

    let info = extractor
        .extract_info(&target, &options)
        .await
        .map_err(|e| {
            tracing::warn!(video_id = %video_id, error = %e, "Streaming error");
            AppError::Stream(e)
        })?;

    let url = models::stream_url(&info).ok_or_else(|| {
        tracing::debug!(video_id = %video_id, "No stream URL found");
        AppError::NoStreamUrl
    })?;

    tracing::info!(video_id = %video_id, "Stream resolved");

    Ok(StreamDescriptor { url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractorError;
    use crate::services::extractor::MockMediaExtractor;
    use mockall::predicate::{always, eq};
    use serde_json::json;

    fn mock(f: impl FnOnce(&mut MockMediaExtractor)) -> Arc<dyn MediaExtractor> {
        let mut extractor = MockMediaExtractor::new();
        extractor.expect_name().return_const("mock");
        f(&mut extractor);
        Arc::new(extractor)
    }

    #[tokio::test]
    async fn test_empty_query_skips_extractor() {
        let extractor = mock(|m| {
            m.expect_extract_info().never();
        });

        let tracks = search_tracks(extractor, &Config::default(), "").await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_search_builds_target_and_filters_invalid_entries() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .with(eq("ytsearch5:lofi"), eq(ExtractOptions::for_search(true)))
                .times(1)
                .returning(|_, _| {
                    Ok(json!({
                        "_type": "playlist",
                        "entries": [
                            null,
                            {"id": "a1", "title": "First", "url": "https://www.youtube.com/watch?v=a1"},
                            "garbage",
                            {"id": "b2", "title": "Second", "webpage_url": "https://www.youtube.com/watch?v=b2"}
                        ]
                    }))
                });
        });

        let tracks = search_tracks(extractor, &Config::default(), "lofi")
            .await
            .unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "a1");
        assert_eq!(tracks[1].id, "b2");
        assert_eq!(tracks[1].url, "https://www.youtube.com/watch?v=b2");
    }

    #[tokio::test]
    async fn test_search_caps_results_at_limit() {
        let config = Config {
            search_limit: 2,
            flat_search: false,
            ..Config::default()
        };
        let extractor = mock(|m| {
            m.expect_extract_info()
                .with(eq("ytsearch2:jazz"), eq(ExtractOptions::for_search(false)))
                .returning(|_, _| {
                    Ok(json!({"entries": [{"id": "1"}, {"id": "2"}, {"id": "3"}]}))
                });
        });

        let tracks = search_tracks(extractor, &config, "jazz").await.unwrap();
        assert_eq!(tracks.len(), 2);
    }

    #[tokio::test]
    async fn test_search_without_entries_key_is_no_results() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .returning(|_, _| Ok(json!({"id": "ytsearch5:x"})));
        });

        let err = search_tracks(extractor, &Config::default(), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoResults));
        assert_eq!(err.to_string(), "No results found");
    }

    #[tokio::test]
    async fn test_search_with_non_list_entries_is_no_results() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .returning(|_, _| Ok(json!({"entries": "unexpected"})));
        });

        let err = search_tracks(extractor, &Config::default(), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoResults));
    }

    #[tokio::test]
    async fn test_search_with_empty_entries_is_empty_list() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .returning(|_, _| Ok(json!({"entries": []})));
        });

        let tracks = search_tracks(extractor, &Config::default(), "nothing")
            .await
            .unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_is_wrapped() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .returning(|_, _| Err(ExtractorError::Upstream("HTTP Error 429".to_string())));
        });

        let err = search_tracks(extractor, &Config::default(), "lofi")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Search failed: HTTP Error 429");
    }

    #[tokio::test]
    async fn test_stream_uses_watch_url_and_full_extraction() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .with(
                    eq("https://www.youtube.com/watch?v=abc123"),
                    eq(ExtractOptions::for_stream()),
                )
                .returning(|_, _| {
                    Ok(json!({"id": "abc123", "url": "https://media.example/abc123.webm"}))
                });
        });

        let descriptor = resolve_stream(extractor, &Config::default(), "abc123")
            .await
            .unwrap();
        assert_eq!(descriptor.url, "https://media.example/abc123.webm");
    }

    #[tokio::test]
    async fn test_stream_without_url_is_reported() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .with(always(), always())
                .returning(|_, _| Ok(json!({"id": "abc123", "formats": []})));
        });

        let err = resolve_stream(extractor, &Config::default(), "abc123")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoStreamUrl));
    }

    #[tokio::test]
    async fn test_stream_failure_is_wrapped() {
        let extractor = mock(|m| {
            m.expect_extract_info()
                .returning(|_, _| Err(ExtractorError::TimedOut(30)));
        });

        let err = resolve_stream(extractor, &Config::default(), "abc123")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Streaming failed: extractor timed out after 30s"
        );
    }
}
