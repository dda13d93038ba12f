//! Format-specific text extraction.
//!
//! Every supported [`DocumentFormat`] is handled by one branch of
//! [`Extractor::extract`]; the result is a plain UTF-8 [`ExtractedDocument`].

mod docx;
mod table;
mod text;

pub use docx::extract_docx;
pub use table::extract_table;
pub use text::extract_plain_text;

use tracing::debug;

use crate::error::ExtractError;
use crate::models::config::CsvConfig;
use crate::models::{DocumentFormat, ExtractedDocument};
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Turns raw file bytes into plain text.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    csv: CsvConfig,
}

impl Extractor {
    /// Create an extractor with default table options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimited table options.
    pub fn with_csv_options(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }

    /// Extract the text of one file.
    pub fn extract(&self, data: &[u8], format: DocumentFormat) -> Result<ExtractedDocument> {
        let text = match format {
            DocumentFormat::Text => extract_plain_text(data)?,
            DocumentFormat::Csv => extract_table(data, &self.csv)?,
            DocumentFormat::Docx => extract_docx(data)?,
            DocumentFormat::Pdf => {
                let mut pdf = PdfExtractor::new();
                pdf.load(data)?;
                pdf.extract_text()?
            }
        };

        debug!(
            "Extracted {} chars from {} bytes of {}",
            text.len(),
            data.len(),
            format
        );
        Ok(ExtractedDocument::new(format, text))
    }
}

/// Extract with default options.
pub fn extract(data: &[u8], format: DocumentFormat) -> Result<ExtractedDocument> {
    Extractor::new().extract(data, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dispatch_text() {
        let doc = extract(b"hello\nworld", DocumentFormat::Text).unwrap();
        assert_eq!(doc.format, DocumentFormat::Text);
        assert_eq!(doc.text, "hello\nworld");
    }

    #[test]
    fn test_dispatch_csv_three_rows() {
        let doc = extract(b"col1,col2\na,b\nc,d", DocumentFormat::Csv).unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.text, "a b\nc d");
    }

    #[test]
    fn test_dispatch_csv_options() {
        let extractor = Extractor::new().with_csv_options(CsvConfig {
            skip_header: false,
            delimiter: '\t',
        });
        let doc = extractor.extract(b"a\tb\nc\td", DocumentFormat::Csv).unwrap();
        assert_eq!(doc.text, "a b\nc d");
    }

    #[test]
    fn test_dispatch_docx() {
        let data = fixtures::docx(&[fixtures::paragraph("one"), fixtures::paragraph("two")]);
        let doc = extract(&data, DocumentFormat::Docx).unwrap();
        assert_eq!(doc.text, "one\ntwo");
    }

    #[test]
    fn test_dispatch_pdf() {
        let doc = extract(&fixtures::pdf(&["MORSE"]), DocumentFormat::Pdf).unwrap();
        assert!(doc.text.contains("MORSE"));
    }

    #[test]
    fn test_error_kinds_per_format() {
        assert!(matches!(
            extract(&[0xff], DocumentFormat::Text),
            Err(ExtractError::Decoding(_))
        ));
        assert!(matches!(
            extract(&[0xff], DocumentFormat::Csv),
            Err(ExtractError::Decoding(_))
        ));
        assert!(matches!(
            extract(b"garbage", DocumentFormat::Docx),
            Err(ExtractError::Parse(_))
        ));
        assert!(matches!(
            extract(b"garbage", DocumentFormat::Pdf),
            Err(ExtractError::Extraction(_))
        ));
        assert!(matches!(
            extract(&fixtures::image_only_pdf(), DocumentFormat::Pdf),
            Err(ExtractError::EmptyContent { .. })
        ));
    }
}
