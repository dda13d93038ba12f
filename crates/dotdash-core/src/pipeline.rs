//! Extraction + codec pipeline for a single conversion request.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::Result;
use crate::extract::Extractor;
use crate::models::config::DotdashConfig;
use crate::models::document::DEFAULT_TIMESTAMP_FORMAT;
use crate::models::{ConversionResult, Direction, DocumentFormat};
use crate::morse::{Codec, UnmappedPolicy};

/// Runs one file through extraction and the Morse codec.
///
/// Holds no per-request state, so one instance can serve many requests,
/// including concurrently.
#[derive(Debug, Clone)]
pub struct Converter {
    extractor: Extractor,
    codec: Codec,
    timestamp_format: String,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Create a converter with default settings.
    pub fn new() -> Self {
        Self {
            extractor: Extractor::new(),
            codec: Codec::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Create a converter from configuration.
    pub fn from_config(config: &DotdashConfig) -> Self {
        Self {
            extractor: Extractor::new().with_csv_options(config.csv.clone()),
            codec: Codec::new(config.codec.policy),
            timestamp_format: config.output.timestamp_format.clone(),
        }
    }

    /// Override the unmapped-input policy.
    pub fn with_policy(mut self, policy: UnmappedPolicy) -> Self {
        self.codec = Codec::new(policy);
        self
    }

    pub fn policy(&self) -> UnmappedPolicy {
        self.codec.policy()
    }

    /// Convert a file, stamping the result with the current local time.
    pub fn convert(
        &self,
        data: &[u8],
        format: DocumentFormat,
        direction: Direction,
    ) -> Result<ConversionResult> {
        self.convert_at(data, format, direction, Local::now())
    }

    /// Convert a file, stamping the result with `now`.
    pub fn convert_at(
        &self,
        data: &[u8],
        format: DocumentFormat,
        direction: Direction,
        now: DateTime<Local>,
    ) -> Result<ConversionResult> {
        let document = self.extractor.extract(data, format)?;
        let text = self.convert_text(&document.text, direction)?;

        debug!(
            "{} {}: {} chars in, {} chars out",
            direction,
            format,
            document.text.len(),
            text.len()
        );

        ConversionResult::with_timestamp_format(
            direction,
            format,
            text,
            now,
            &self.timestamp_format,
        )
    }

    /// Run only the codec step.
    pub fn convert_text(&self, text: &str, direction: Direction) -> Result<String> {
        let out = match direction {
            Direction::Encode => self.codec.encode(text)?,
            Direction::Decode => self.codec.decode(text)?,
        };
        Ok(out)
    }
}
