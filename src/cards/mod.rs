//! Question/answer chunks parsed from note files.
//!
//! Chunks are rebuilt from file text on every parse and never persisted;
//! the only durable thing about a card is the hash of its question line.

mod models;
mod parser;

pub use models::{CardId, Chunk, QUESTION_MARKER};
pub use parser::parse_chunks;
