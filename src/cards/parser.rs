//! Splits raw note-file text into question/answer chunks.

use super::models::{Chunk, QUESTION_MARKER};

/// Parse note text into ordered chunks.
///
/// A line starting with the question marker begins a new chunk; every other
/// line accumulates into the current chunk's body. Lines before the first
/// marker are free-form notes (summaries, headers) and belong to no chunk.
/// Trailing blank lines are trimmed from each body.
///
/// Total over any input: a file without marker lines parses to an empty vec,
/// which is a valid result rather than an error.
pub fn parse_chunks(text: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        if line.starts_with(QUESTION_MARKER) {
            if let Some((question, body)) = current.take() {
                chunks.push(finish(question, body));
            }
            current = Some((line.to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line.to_string());
        }
    }

    if let Some((question, body)) = current {
        chunks.push(finish(question, body));
    }

    chunks
}

fn finish(question: String, mut body: Vec<String>) -> Chunk {
    while body.last().is_some_and(|line| line.is_empty()) {
        body.pop();
    }
    Chunk::new(question, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_chunks("").is_empty());
    }

    #[test]
    fn test_no_marker_lines() {
        assert!(parse_chunks("just notes\nmore notes\n").is_empty());
    }

    #[test]
    fn test_single_chunk() {
        let chunks = parse_chunks("? capital of france\nparis\n");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].question(), "? capital of france");
        assert_eq!(chunks[0].body(), ["paris"]);
    }

    #[test]
    fn test_preamble_discarded() {
        let chunks = parse_chunks("summary section\n\n? q1\na1\n");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].question(), "? q1");
    }

    #[test]
    fn test_trailing_blank_lines_trimmed() {
        let chunks = parse_chunks("? q\nanswer\n\n\n? next\nbody\n\n");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].body(), ["answer"]);
        assert_eq!(chunks[1].body(), ["body"]);
    }

    #[test]
    fn test_blank_lines_inside_body_kept() {
        let chunks = parse_chunks("? q\nfirst\n\nsecond\n");
        assert_eq!(chunks[0].body(), ["first", "", "second"]);
    }

    #[test]
    fn test_consecutive_markers_make_empty_bodies() {
        let chunks = parse_chunks("? a\n? b\n? c");
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.body().is_empty()));
    }

    #[test]
    fn test_file_order_preserved() {
        let chunks = parse_chunks("? one\nx\n? two\ny\n? three\nz\n");
        let questions: Vec<&str> = chunks.iter().map(|c| c.question()).collect();
        assert_eq!(questions, ["? one", "? two", "? three"]);
    }

    #[test]
    fn test_parse_is_pure() {
        let text = "intro\n? q\nbody\n\n? r\nmore\n";
        assert_eq!(parse_chunks(text), parse_chunks(text));
    }
}
