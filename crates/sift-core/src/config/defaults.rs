//! Default values shared by the config structs.

pub const DEFAULT_CHUNK_MAX_SIZE: usize = 800;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

pub const DEFAULT_BM25_K1: f64 = 1.2;
pub const DEFAULT_BM25_B: f64 = 0.75;

pub const DEFAULT_RRF_K: u32 = 60;

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_DYNAMIC_K_CUTOFF: f64 = 0.5;
pub const DEFAULT_DYNAMIC_K_MIN: usize = 1;
pub const DEFAULT_DYNAMIC_K_MAX: usize = 10;

pub const DEFAULT_DISAGREEMENT_TOP_N: usize = 5;
pub const DEFAULT_DISAGREEMENT_MIN_OVERLAP: f64 = 0.3;
