//! Plain text extraction.

use crate::error::ExtractError;

/// Decode the whole input as UTF-8, verbatim.
pub fn extract_plain_text(data: &[u8]) -> Result<String, ExtractError> {
    Ok(std::str::from_utf8(data)?.to_string())
}
