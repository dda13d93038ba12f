//! Core library for document-to-Morse conversion.
//!
//! This crate provides:
//! - Text extraction from plain text, CSV, DOCX and PDF files
//! - A fixed Morse symbol table and a stateless encode/decode codec
//! - A pipeline composing both into timestamped conversion results

pub mod error;
pub mod extract;
pub mod models;
pub mod morse;
pub mod pdf;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{CodecError, DotdashError, ExtractError, Result};
pub use extract::{extract, Extractor};
pub use models::{ConversionResult, Direction, DocumentFormat, DotdashConfig, ExtractedDocument};
pub use morse::{decode, encode, Codec, UnmappedPolicy};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, PdfType};
pub use pipeline::Converter;
