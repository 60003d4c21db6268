//! Card data models.

use std::fmt;

use sha2::{Digest, Sha256};

/// Line prefix that opens a new question chunk in a note file.
pub const QUESTION_MARKER: char = '?';

/// Content-derived identity of a card.
///
/// SHA-256 over the exact bytes of the question line as written, marker
/// included, with no normalization. Two chunks with identical question
/// lines share one identity; editing a question line creates a brand-new
/// card with no link to the old schedule record. Both are accepted
/// limitations of content addressing, not bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId([u8; 32]);

impl CardId {
    /// Hash a question line into its card identity.
    pub fn of_line(question_line: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(question_line.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Lowercase hex rendering, as stored in the schedule database.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a stored hex digest back into an identity.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let digest: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(digest))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One question/answer unit extracted from a note file.
///
/// The question line is the first line of the chunk; everything after it up
/// to the next marker line (trailing blank lines trimmed) is the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    question: String,
    body: Vec<String>,
}

impl Chunk {
    pub(crate) fn new(question: String, body: Vec<String>) -> Self {
        Self { question, body }
    }

    /// The question line as written, marker included.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Body lines, trailing blank lines already trimmed. May be empty.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Identity of this card, derived from the question line.
    pub fn id(&self) -> CardId {
        CardId::of_line(&self.question)
    }

    /// Full chunk text as handed to the presenter.
    pub fn text(&self) -> String {
        let mut lines = Vec::with_capacity(self.body.len() + 1);
        lines.push(self.question.as_str());
        lines.extend(self.body.iter().map(String::as_str));
        lines.join("\n")
    }
}
