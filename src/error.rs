use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures raised while talking to the extraction tool
#[derive(thiserror::Error, Debug)]
pub enum ExtractorError {
    #[error("failed to launch extractor: {0}")]
    Unavailable(String),

    /// Message reported by the extractor itself, shown verbatim
    #[error("{0}")]
    Upstream(String),

    #[error("malformed extractor output: {0}")]
    Malformed(String),

    #[error("extractor timed out after {0}s")]
    TimedOut(u64),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Search failed: {0}")]
    Search(ExtractorError),

    #[error("Streaming failed: {0}")]
    Stream(ExtractorError),

    #[error("No results found")]
    NoResults,

    #[error("No stream URL found")]
    NoStreamUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream failures are reported in the body with a 200 status;
        // clients look for the `error` key rather than the status code.
        let status = match self {
            AppError::Search(_)
            | AppError::Stream(_)
            | AppError::NoResults
            | AppError::NoStreamUrl => StatusCode::OK,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
