use serde::{Deserialize, Serialize};

use super::defaults;

/// Unit in which the chunking window is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkUnit {
    Chars,
    Tokens,
}

/// Sliding-window chunking policy.
///
/// A window of `max_size` slides over each document advancing by
/// `max_size - overlap`; the last chunk of a document may be shorter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingPolicy {
    pub max_size: usize,
    pub overlap: usize,
    pub unit: ChunkUnit,
}

impl Default for ChunkingPolicy {
    fn default() -> Self {
        Self {
            max_size: defaults::DEFAULT_CHUNK_MAX_SIZE,
            overlap: defaults::DEFAULT_CHUNK_OVERLAP,
            unit: ChunkUnit::Chars,
        }
    }
}

impl ChunkingPolicy {
    /// Window advance per step. Validation guarantees overlap < max_size,
    /// so this is always at least 1 for a valid policy.
    pub fn stride(&self) -> usize {
        self.max_size.saturating_sub(self.overlap).max(1)
    }
}
