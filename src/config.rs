use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder substituted with the video id in `watch_url_template`
pub const VIDEO_ID_PLACEHOLDER: &str = "{id}";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path or name of the yt-dlp binary
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// Number of candidates requested per search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Skip per-item resolution when searching
    #[serde(default = "default_flat_search")]
    pub flat_search: bool,

    /// Watch page URL, `{id}` is replaced with the requested video id
    #[serde(default = "default_watch_url_template")]
    pub watch_url_template: String,

    /// Directory holding the service worker, manifest and icons
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Directory holding the landing page
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Per-call extractor timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub extractor_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_search_limit() -> usize {
    5
}

fn default_flat_search() -> bool {
    true
}

fn default_watch_url_template() -> String {
    "https://www.youtube.com/watch?v={id}".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ytdlp_path: default_ytdlp_path(),
            search_limit: default_search_limit(),
            flat_search: default_flat_search(),
            watch_url_template: default_watch_url_template(),
            static_dir: default_static_dir(),
            template_dir: default_template_dir(),
            extractor_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.search_limit == 0 {
            anyhow::bail!("SEARCH_LIMIT must be at least 1");
        }
        if !self.watch_url_template.contains(VIDEO_ID_PLACEHOLDER) {
            anyhow::bail!(
                "WATCH_URL_TEMPLATE must contain the {} placeholder",
                VIDEO_ID_PLACEHOLDER
            );
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Watch page URL for a video id
    pub fn watch_url(&self, video_id: &str) -> String {
        self.watch_url_template
            .replace(VIDEO_ID_PLACEHOLDER, video_id)
    }

    pub fn extractor_timeout(&self) -> Option<Duration> {
        self.extractor_timeout_secs.map(Duration::from_secs)
    }
}
