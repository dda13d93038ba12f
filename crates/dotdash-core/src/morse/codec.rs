//! Text <-> Morse string transform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::{self, WORD_BOUNDARY};
use crate::error::CodecError;

/// What the codec does with input it has no table entry for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Unmapped characters encode to an empty symbol and unknown symbols
    /// decode to nothing. Lossy, never fails.
    #[default]
    Drop,
    /// The first unmapped character or unknown symbol is an error.
    Reject,
}

impl FromStr for UnmappedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown policy: {other} (expected drop or reject)")),
        }
    }
}

impl fmt::Display for UnmappedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("drop"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Stateless Morse codec parameterised by an [`UnmappedPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    policy: UnmappedPolicy,
}

impl Codec {
    /// Create a codec with the given policy.
    pub fn new(policy: UnmappedPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnmappedPolicy {
        self.policy
    }

    /// Encode text as a space-separated Morse string.
    ///
    /// Every input character occupies one slot, so a dropped character
    /// leaves its neighbours separated by two spaces rather than one.
    pub fn encode(&self, text: &str) -> Result<String, CodecError> {
        let mut symbols = Vec::with_capacity(text.len());
        let mut dropped = 0usize;

        for (position, c) in text.chars().enumerate() {
            match fold_case(c).and_then(table::symbol_for) {
                Some(symbol) => symbols.push(symbol),
                None => match self.policy {
                    UnmappedPolicy::Drop => {
                        dropped += 1;
                        symbols.push("");
                    }
                    UnmappedPolicy::Reject => {
                        return Err(CodecError::UnmappedCharacter {
                            character: c,
                            position,
                        });
                    }
                },
            }
        }

        if dropped > 0 {
            debug!("Dropped {} unmapped characters while encoding", dropped);
        }

        Ok(symbols.join(" "))
    }

    /// Decode a Morse string back to uppercase text.
    pub fn decode(&self, morse: &str) -> Result<String, CodecError> {
        let mut words = Vec::new();
        let mut dropped = 0usize;

        for (index, word) in morse.split(WORD_BOUNDARY).enumerate() {
            let mut decoded = String::new();
            for symbol in word.split_whitespace() {
                match table::char_for(symbol) {
                    Some(c) => decoded.push(c),
                    None => match self.policy {
                        UnmappedPolicy::Drop => dropped += 1,
                        UnmappedPolicy::Reject => {
                            return Err(CodecError::UnknownSymbol {
                                symbol: symbol.to_string(),
                                word: index,
                            });
                        }
                    },
                }
            }
            words.push(decoded);
        }

        if dropped > 0 {
            debug!("Dropped {} unknown symbols while decoding", dropped);
        }

        Ok(words.join(" "))
    }
}

/// Encode with the dropping policy.
pub fn encode(text: &str) -> String {
    // Drop never fails
    Codec::default().encode(text).unwrap_or_default()
}

/// Decode with the dropping policy.
pub fn decode(morse: &str) -> String {
    Codec::default().decode(morse).unwrap_or_default()
}

/// Uppercase a character; `None` when the uppercase form is not a single char.
fn fold_case(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    let first = upper.next()?;
    match upper.next() {
        Some(_) => None,
        None => Some(first),
    }
}
