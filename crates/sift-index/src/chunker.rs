//! Sliding-window chunker.
//!
//! A window of `max_size` slides over each document advancing by
//! `max_size - overlap`, in character or token units. Boundaries are
//! deterministic: the same text and policy always produce the same chunks.

use sift_core::config::{ChunkUnit, ChunkingPolicy};
use sift_core::index::{Chunk, Document};

/// Split one document into chunks. Zero-length documents yield no chunks.
///
/// `Chunk::start`/`Chunk::end` are character offsets regardless of unit;
/// `token_len` is filled in later by the postings builder.
pub fn chunk_document(doc: &Document, policy: &ChunkingPolicy) -> Vec<Chunk> {
    match policy.unit {
        ChunkUnit::Chars => chunk_by_chars(doc, policy),
        ChunkUnit::Tokens => chunk_by_words(doc, policy),
    }
}

fn chunk_by_chars(doc: &Document, policy: &ChunkingPolicy) -> Vec<Chunk> {
    // Byte offset of every char, so windows never split a code point.
    let char_starts: Vec<usize> = doc.text.char_indices().map(|(b, _)| b).collect();
    let total = char_starts.len();
    if total == 0 {
        return Vec::new();
    }

    let stride = policy.stride();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut seq = 0u32;

    loop {
        let end = (start + policy.max_size).min(total);
        let byte_start = char_starts[start];
        let byte_end = if end == total {
            doc.text.len()
        } else {
            char_starts[end]
        };
        chunks.push(make_chunk(doc, seq, start, end, byte_start, byte_end));

        if end == total {
            break;
        }
        start += stride;
        seq += 1;
    }

    chunks
}

/// A whitespace-delimited word with both char and byte offsets.
struct WordSpan {
    char_start: usize,
    char_end: usize,
    byte_start: usize,
    byte_end: usize,
}

fn word_spans(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut current: Option<WordSpan> = None;

    for (char_pos, (byte_pos, c)) in text.char_indices().enumerate() {
        if c.is_whitespace() {
            if let Some(span) = current.take() {
                spans.push(span);
            }
        } else {
            match &mut current {
                Some(span) => {
                    span.char_end = char_pos + 1;
                    span.byte_end = byte_pos + c.len_utf8();
                }
                None => {
                    current = Some(WordSpan {
                        char_start: char_pos,
                        char_end: char_pos + 1,
                        byte_start: byte_pos,
                        byte_end: byte_pos + c.len_utf8(),
                    });
                }
            }
        }
    }
    if let Some(span) = current.take() {
        spans.push(span);
    }
    spans
}

fn chunk_by_words(doc: &Document, policy: &ChunkingPolicy) -> Vec<Chunk> {
    let words = word_spans(&doc.text);
    let total = words.len();
    if total == 0 {
        return Vec::new();
    }

    let stride = policy.stride();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut seq = 0u32;

    loop {
        let end = (start + policy.max_size).min(total);
        let first = &words[start];
        let last = &words[end - 1];
        chunks.push(make_chunk(
            doc,
            seq,
            first.char_start,
            last.char_end,
            first.byte_start,
            last.byte_end,
        ));

        if end == total {
            break;
        }
        start += stride;
        seq += 1;
    }

    chunks
}

fn make_chunk(
    doc: &Document,
    seq: u32,
    char_start: usize,
    char_end: usize,
    byte_start: usize,
    byte_end: usize,
) -> Chunk {
    Chunk {
        id: Chunk::make_id(&doc.id, seq),
        doc_id: doc.id.clone(),
        seq,
        start: char_start,
        end: char_end,
        text: doc.text[byte_start..byte_end].to_string(),
        token_len: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str) -> Document {
        Document {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn policy(max_size: usize, overlap: usize, unit: ChunkUnit) -> ChunkingPolicy {
        ChunkingPolicy {
            max_size,
            overlap,
            unit,
        }
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunks = chunk_document(&doc("d", ""), &policy(10, 2, ChunkUnit::Chars));
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_document_yields_single_chunk() {
        let chunks = chunk_document(&doc("d", "abc"), &policy(10, 2, ChunkUnit::Chars));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "abc");
        assert_eq!(chunks[0].id, "d#0");
        assert_eq!((chunks[0].start, chunks[0].end), (0, 3));
    }

    #[test]
    fn windows_advance_by_stride() {
        // max 4, overlap 2 → stride 2 over "abcdefgh".
        let chunks = chunk_document(&doc("d", "abcdefgh"), &policy(4, 2, ChunkUnit::Chars));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "cdef", "efgh"]);
        assert_eq!(chunks[1].start, 2);
        assert_eq!(chunks[2].seq, 2);
    }

    #[test]
    fn last_chunk_may_be_shorter() {
        let chunks = chunk_document(&doc("d", "abcdefg"), &policy(3, 0, ChunkUnit::Chars));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abc", "def", "g"]);
    }

    #[test]
    fn token_windows_cover_all_words() {
        let text = "one two three four five six seven";
        let chunks = chunk_document(&doc("d", text), &policy(3, 1, ChunkUnit::Tokens));
        assert_eq!(chunks[0].text, "one two three");
        assert_eq!(chunks[1].text, "three four five");
        assert_eq!(chunks[2].text, "five six seven");
    }

    #[test]
    fn multibyte_text_respects_char_boundaries() {
        let text = "héllo wörld ünicode test";
        let chunks = chunk_document(&doc("d", text), &policy(8, 2, ChunkUnit::Chars));
        // Reassembly must never panic and offsets stay in char units.
        for c in &chunks {
            assert_eq!(c.text.chars().count(), c.end - c.start);
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let text = "auth tokens expire after ninety days and rotate";
        let p = policy(12, 4, ChunkUnit::Chars);
        let a = chunk_document(&doc("d", text), &p);
        let b = chunk_document(&doc("d", text), &p);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!((x.start, x.end, &x.text), (y.start, y.end, &y.text));
        }
    }
}
