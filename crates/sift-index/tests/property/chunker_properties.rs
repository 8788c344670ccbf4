//! Property tests: chunk determinism and full coverage of the input.

use proptest::prelude::*;

use sift_core::config::{ChunkUnit, ChunkingPolicy};
use sift_core::index::Document;
use sift_index::chunker::chunk_document;

fn doc(text: &str) -> Document {
    Document {
        id: "doc".to_string(),
        text: text.to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Indexing twice produces byte-identical chunk boundaries and counts.
    #[test]
    fn chunking_is_deterministic(
        text in "[a-zA-Z0-9 \n]{0,300}",
        max_size in 1usize..64,
        overlap_frac in 0usize..100,
    ) {
        let overlap = (max_size - 1) * overlap_frac / 100;
        let policy = ChunkingPolicy { max_size, overlap, unit: ChunkUnit::Chars };

        let a = chunk_document(&doc(&text), &policy);
        let b = chunk_document(&doc(&text), &policy);

        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(&x.id, &y.id);
            prop_assert_eq!(x.start, y.start);
            prop_assert_eq!(x.end, y.end);
            prop_assert_eq!(&x.text, &y.text);
        }
    }

    /// Every character of the document appears in at least one chunk, and
    /// no chunk exceeds the window size.
    #[test]
    fn char_windows_cover_the_document(
        text in "[a-z ]{1,200}",
        max_size in 1usize..50,
    ) {
        let policy = ChunkingPolicy { max_size, overlap: 0, unit: ChunkUnit::Chars };
        let chunks = chunk_document(&doc(&text), &policy);

        let covered: usize = chunks.iter().map(|c| c.end - c.start).sum();
        prop_assert_eq!(covered, text.chars().count());
        prop_assert!(chunks.iter().all(|c| c.end - c.start <= max_size));

        // Chunks are contiguous when overlap is zero.
        for pair in chunks.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    /// Sequence numbers are dense and ids embed them.
    #[test]
    fn sequence_numbers_are_dense(
        text in "[a-z ]{1,200}",
        max_size in 2usize..40,
        overlap in 0usize..2,
    ) {
        let policy = ChunkingPolicy { max_size, overlap, unit: ChunkUnit::Chars };
        let chunks = chunk_document(&doc(&text), &policy);
        for (i, c) in chunks.iter().enumerate() {
            prop_assert_eq!(c.seq as usize, i);
            prop_assert_eq!(&c.id, &format!("doc#{i}"));
        }
    }
}
