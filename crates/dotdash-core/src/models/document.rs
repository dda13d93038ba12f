//! Extraction and conversion results.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::format::{Direction, DocumentFormat};
use crate::error::{DotdashError, Result};

/// Default `strftime` pattern for output filenames.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Plain text extracted from one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Format the text was extracted from.
    pub format: DocumentFormat,
    /// The extracted text. Only line breaks survive from the source layout.
    pub text: String,
}

impl ExtractedDocument {
    pub fn new(format: DocumentFormat, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
        }
    }

    /// Number of lines in the extracted text.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// Output of one conversion, ready to be persisted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Conversion direction.
    pub direction: Direction,

    /// Format of the input document.
    pub source_format: DocumentFormat,

    /// Morse string (encode) or recovered text (decode).
    pub text: String,

    /// Generated output filename, `<timestamp><suffix>`.
    pub filename: String,

    /// When the conversion ran.
    pub created_at: DateTime<Local>,
}

impl ConversionResult {
    /// Build a result stamped with the default timestamp format.
    pub fn new(
        direction: Direction,
        source_format: DocumentFormat,
        text: String,
        created_at: DateTime<Local>,
    ) -> Self {
        let filename = format!(
            "{}{}",
            created_at.format(DEFAULT_TIMESTAMP_FORMAT),
            direction.suffix()
        );
        Self {
            direction,
            source_format,
            text,
            filename,
            created_at,
        }
    }

    /// Build a result whose filename uses a custom `strftime` pattern.
    pub fn with_timestamp_format(
        direction: Direction,
        source_format: DocumentFormat,
        text: String,
        created_at: DateTime<Local>,
        timestamp_format: &str,
    ) -> Result<Self> {
        let stamp = render_timestamp(&created_at, timestamp_format)?;
        Ok(Self {
            direction,
            source_format,
            text,
            filename: format!("{}{}", stamp, direction.suffix()),
            created_at,
        })
    }
}

/// Render `at` with a `strftime` pattern for use in a filename.
///
/// Unknown specifiers and output containing a path separator are rejected.
pub fn render_timestamp(at: &DateTime<Local>, pattern: &str) -> Result<String> {
    let invalid = |reason: &str| {
        DotdashError::Config(format!("timestamp format {:?} {}", pattern, reason))
    };

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(invalid("is not a valid strftime pattern"));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", at.format(pattern))
        .map_err(|_| invalid("cannot be rendered"))?;

    if rendered.contains(['/', '\\']) {
        return Err(invalid("produces a path separator"));
    }
    Ok(rendered)
}

/// Check that a pattern renders to a usable filename component.
pub fn validate_timestamp_format(pattern: &str) -> Result<()> {
    render_timestamp(&Local::now(), pattern).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_encode_filename() {
        let result = ConversionResult::new(
            Direction::Encode,
            DocumentFormat::Text,
            ".-".to_string(),
            at(),
        );
        assert_eq!(result.filename, "20240309140507_morse.txt");
    }

    #[test]
    fn test_decode_filename() {
        let result = ConversionResult::new(
            Direction::Decode,
            DocumentFormat::Pdf,
            "A".to_string(),
            at(),
        );
        assert_eq!(result.filename, "20240309140507_decoded.txt");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let result = ConversionResult::with_timestamp_format(
            Direction::Encode,
            DocumentFormat::Csv,
            String::new(),
            at(),
            "%Y-%m-%d",
        )
        .unwrap();
        assert_eq!(result.filename, "2024-03-09_morse.txt");
    }

    #[test]
    fn test_invalid_timestamp_format_is_config_error() {
        let err = ConversionResult::with_timestamp_format(
            Direction::Encode,
            DocumentFormat::Text,
            String::new(),
            at(),
            "%Q",
        )
        .unwrap_err();
        assert!(matches!(err, DotdashError::Config(msg) if msg.contains("%Q")));
    }

    #[test]
    fn test_timestamp_with_path_separator_is_rejected() {
        for pattern in ["%Y/%m", "%D", "a\\b"] {
            let err = render_timestamp(&at(), pattern).unwrap_err();
            assert!(matches!(err, DotdashError::Config(msg) if msg.contains("path separator")));
        }
        assert_eq!(render_timestamp(&at(), "%Y%m%d").unwrap(), "20240309");
        assert!(validate_timestamp_format("%H-%M").is_ok());
    }

    #[test]
    fn test_line_count() {
        let doc = ExtractedDocument::new(DocumentFormat::Csv, "a b\nc d");
        assert_eq!(doc.line_count(), 2);
    }
}
