//! Error types for the dotdash-core library.

use thiserror::Error;

/// Main error type for the dotdash library.
#[derive(Error, Debug)]
pub enum DotdashError {
    /// Text extraction error.
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Morse codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an input file into plain text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The format tag is not one of `txt`, `csv`, `docx`, `pdf`.
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),

    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Decoding(#[from] std::str::Utf8Error),

    /// The word-processor package could not be parsed.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// The paged document could not be read.
    #[error("failed to extract text: {0}")]
    Extraction(String),

    /// The paged document is valid but carries no text layer.
    #[error("no extractable text in {pages} page(s) ({images} image object(s) found)")]
    EmptyContent { pages: u32, images: usize },
}

/// Errors raised by the Morse codec when unmapped input is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A character outside the symbol table was found while encoding.
    #[error("character {character:?} at position {position} has no Morse symbol")]
    UnmappedCharacter { character: char, position: usize },

    /// A Morse symbol with no table entry was found while decoding.
    #[error("unknown Morse symbol {symbol:?} in word {word}")]
    UnknownSymbol { symbol: String, word: usize },
}

/// Result type for the dotdash library.
pub type Result<T> = std::result::Result<T, DotdashError>;
