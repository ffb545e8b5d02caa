/// yt-dlp extractor
///
/// Runs the `yt-dlp` binary once per call with `--dump-single-json` and reads
/// the info dict from stdout. Nothing is downloaded.
use serde_json::Value;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use super::{ExtractOptions, MediaExtractor};
use crate::{config::Config, error::ExtractorError};

const ERROR_PREFIX: &str = "ERROR:";

#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    binary: String,
    timeout: Option<Duration>,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ytdlp_path.clone(), config.extractor_timeout())
    }

    /// Command line arguments for one extraction
    fn build_args(target: &str, options: &ExtractOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--format".to_string(),
            options.format.clone(),
        ];

        let flags = [
            (options.no_playlist, "--no-playlist"),
            (options.quiet, "--quiet"),
            (options.no_warnings, "--no-warnings"),
            (options.extract_flat, "--flat-playlist"),
            (options.no_check_certificate, "--no-check-certificates"),
            (options.geo_bypass, "--geo-bypass"),
            (options.ignore_errors, "--ignore-errors"),
        ];
        args.extend(
            flags
                .iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, flag)| flag.to_string()),
        );

        // Targets such as video ids may start with '-'
        args.push("--".to_string());
        args.push(target.to_string());
        args
    }

    async fn run(&self, args: &[String]) -> Result<Output, ExtractorError> {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = command.output();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| ExtractorError::TimedOut(limit.as_secs()))?,
            None => output.await,
        };

        result.map_err(|e| ExtractorError::Unavailable(format!("{}: {}", self.binary, e)))
    }

    fn parse_json(stdout: &[u8]) -> Result<Value, ExtractorError> {
        serde_json::from_slice(stdout).map_err(|e| ExtractorError::Malformed(e.to_string()))
    }

    /// Best human-readable failure message from yt-dlp's stderr
    fn failure_message(output: &Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if let Some(line) = lines.iter().rev().find(|l| l.starts_with(ERROR_PREFIX)) {
            return line[ERROR_PREFIX.len()..].trim().to_string();
        }

        match lines.last() {
            Some(line) => line.to_string(),
            None => format!("yt-dlp exited with {}", output.status),
        }
    }
}

#[async_trait::async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn extract_info(
        &self,
        target: &str,
        options: &ExtractOptions,
    ) -> Result<Value, ExtractorError> {
        let args = Self::build_args(target, options);
        tracing::debug!(binary = %self.binary, args = ?args, "Running extractor");

        let output = self.run(&args).await?;

        if output.status.success() {
            return Self::parse_json(&output.stdout);
        }

        // With --ignore-errors yt-dlp exits non-zero but still prints the
        // result set when only some entries failed.
        if options.ignore_errors && !output.stdout.is_empty() {
            if let Ok(value) = Self::parse_json(&output.stdout) {
                tracing::warn!(
                    target = %target,
                    error = %Self::failure_message(&output),
                    "Extractor reported partial failure"
                );
                return Ok(value);
            }
        }

        Err(ExtractorError::Upstream(Self::failure_message(&output)))
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
