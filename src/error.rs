//! Error types for building, encoding and decoding with a Huffman forest.
//!
//! Encode and decode stop at the first problem. Whatever output was produced
//! before that point is carried inside the error, so callers never lose it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The symbol has no code in the current tree.
    #[error("unrecognized symbol: {symbol:?}")]
    UnrecognizedSymbol { symbol: char, partial: String },

    /// Decode was called on a forest with no root.
    #[error("empty code tree")]
    EmptyTree,

    /// Decode was called with no bits.
    #[error("empty input")]
    EmptyInput,

    /// Decode input held something other than '0' or '1'.
    #[error("illegal character {character:?} at position {position}")]
    IllegalCharacter {
        character: char,
        position: usize,
        partial: String,
    },

    /// The bit sequence walked off the tree.
    #[error("decode failed at position {position}: no child on this path")]
    DecodeFailed { position: usize, partial: String },
}

impl Error {
    /// Output accumulated before the failure. Always a valid prefix of the
    /// full result.
    pub fn partial(&self) -> &str {
        match self {
            Error::UnrecognizedSymbol { partial, .. }
            | Error::IllegalCharacter { partial, .. }
            | Error::DecodeFailed { partial, .. } => partial,
            Error::EmptyTree | Error::EmptyInput => "",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
