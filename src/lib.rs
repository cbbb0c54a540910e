//! Huffman code construction over single-character symbols.
//!
//! Symbols are appended one at a time with a weight. Each append rebuilds the
//! code tree from scratch by greedy merging of the two lightest roots, so the
//! resulting codes depend only on the append sequence. Codes are textual
//! `'0'`/`'1'` strings; encode and decode work on those strings directly.

pub mod cli;
pub mod coder;
pub mod error;
pub mod huffman;
mod render;
pub mod weights;

pub use coder::{CodeTable, HuffmanCoder};
pub use error::{Error, Result};
pub use huffman::{Forest, Node, NodeId};
pub use weights::{WeightTable, WeightsError};
