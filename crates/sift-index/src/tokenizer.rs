//! Shared text preprocessing for indexing and search.
//!
//! Both sides must tokenize identically — differing pipelines would cause
//! BM25 term mismatches at query time.

/// Stop words removed from the term stream.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have",
    "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
    "my", "no", "nor", "not", "of", "on", "or", "our", "own", "s", "she", "so", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "to", "too", "us", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
];

fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.binary_search(&term).is_ok()
}

/// Minimal suffix stripping so close inflections share a term
/// ("tokens"/"token", "expire"/"expiry"). Truncation only, never applied
/// to short words, identical at index and query time.
fn stem(term: &str) -> &str {
    let mut t = term;
    if t.len() > 3 && t.ends_with('s') && !t.ends_with("ss") {
        t = &t[..t.len() - 1];
    }
    if t.len() > 3 && (t.ends_with('e') || t.ends_with('y')) {
        t = &t[..t.len() - 1];
    }
    t
}

/// Lowercase → strip punctuation → split → drop stop words → stem.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !is_stop_word(t))
        .map(|t| stem(t).to_string())
        .collect()
}
