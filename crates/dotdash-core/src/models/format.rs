//! Supported input formats and conversion directions.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Input document format. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// UTF-8 plain text (`.txt`).
    #[serde(rename = "txt")]
    Text,
    /// Comma-delimited table (`.csv`).
    Csv,
    /// Office Open XML word-processor document (`.docx`).
    Docx,
    /// Portable Document Format (`.pdf`).
    Pdf,
}

impl DocumentFormat {
    /// All supported formats.
    pub const ALL: [DocumentFormat; 4] = [Self::Text, Self::Csv, Self::Docx, Self::Pdf];

    /// Parse a format tag such as `"pdf"`. Tags are case-insensitive.
    pub fn from_tag(tag: &str) -> Result<Self, ExtractError> {
        match tag.to_ascii_lowercase().as_str() {
            "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExtractError::UnsupportedFormat(tag.to_string())),
        }
    }

    /// Derive the format from a file's extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_tag(ext)
    }

    /// The canonical tag (and file extension) of this format.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Plain text to Morse.
    Encode,
    /// Morse to plain text.
    Decode,
}

impl Direction {
    /// Suffix appended to the timestamp of the output filename.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Encode => "_morse.txt",
            Self::Decode => "_decoded.txt",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}
