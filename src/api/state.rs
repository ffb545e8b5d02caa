use std::sync::Arc;

use crate::config::Config;
use crate::services::MediaExtractor;

/// Shared application state
///
/// Holds only immutable configuration and the extractor handle, so
/// requests never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<dyn MediaExtractor>,
}

impl AppState {
    pub fn new(config: Config, extractor: Arc<dyn MediaExtractor>) -> Self {
        Self {
            config: Arc::new(config),
            extractor,
        }
    }
}
