//! Core data types for marker screening and sequence comparison.
//!
//! - [`Sequence`]: an immutable run of sequence characters
//! - [`MatchMethod`]: which of the four matching strategies to apply
//! - [`ScreeningResult`]: disease names detected in one sample
//! - [`SimilarityScore`]: normalized similarity of two samples
//!
//! ## Method selectors
//!
//! | Selector  | Method                     |
//! |-----------|----------------------------|
//! | `simple`  | Exact windowed match       |
//! | `rabin`   | Rabin-Karp rolling hash    |
//! | `lcs`     | Longest common subsequence |
//! | `jaccard` | k-mer Jaccard similarity   |
//!
//! Unknown selectors fall back to `simple`.

pub mod sequence;
pub mod types;

pub use sequence::Sequence;
pub use types::{MatchMethod, ScreeningResult, SimilarityScore};
