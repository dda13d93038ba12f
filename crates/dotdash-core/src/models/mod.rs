//! Data models and configuration.

pub mod config;
pub mod document;
pub mod format;

pub use config::DotdashConfig;
pub use document::{ConversionResult, ExtractedDocument};
pub use format::{Direction, DocumentFormat};
