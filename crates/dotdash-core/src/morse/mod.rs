//! Morse code symbol table and codec.

mod codec;
pub mod table;

pub use codec::{decode, encode, Codec, UnmappedPolicy};
pub use table::{WORD_BOUNDARY, WORD_SEPARATOR};
