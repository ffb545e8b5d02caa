pub mod extractor;
pub mod gateway;

pub use extractor::{ExtractOptions, MediaExtractor, YtDlpExtractor};
