//! Marker screening and sequence similarity.
//!
//! This module provides the matching functionality:
//!
//! - [`ScreeningEngine`]: detects which catalog markers occur in a subject sequence
//! - [`SimilarityCalculator`]: scores two whole sequences against each other
//! - [`analyze`](analysis::analyze): screens two samples and compares them in one call
//!
//! ## Screening rules
//!
//! | Method | A marker is detected when |
//! |--------|---------------------------|
//! | `simple` | some window matches at >= 80% of the marker's positions |
//! | `rabin` | the marker occurs verbatim (rolling hash, verified) |
//! | `lcs` | the best window LCS reaches 80% of the marker length |
//! | `jaccard` | the best window 5-mer Jaccard similarity reaches 0.5 |
//!
//! Windows are subject slices of exactly the marker's length. A marker longer
//! than the subject is never detected.
//!
//! ## Similarity
//!
//! All scores lie in [0, 1] and are normalized by the shorter sequence length,
//! except Jaccard which is normalized by the k-mer union. Rolling-hash
//! similarity probes 10-base segments of the first sequence and is therefore
//! asymmetric.
//!
//! ## Example
//!
//! ```rust,no_run
//! use marker_screen::{MarkerCatalog, MatchMethod, ScreeningEngine, SimilarityCalculator};
//!
//! let catalog = MarkerCatalog::load_embedded();
//! let engine = ScreeningEngine::new(&catalog);
//!
//! let detected = engine.screen(b"TTCTGACTCCTGTGGAGAAGTCTGG", MatchMethod::Exact);
//! for name in detected.names() {
//!     println!("detected: {name}");
//! }
//!
//! let score = SimilarityCalculator::new().similarity(b"ACGTACGT", b"ACGTTCGT", MatchMethod::Subsequence);
//! println!("similarity: {}", score.as_percentage());
//! ```

pub mod analysis;
pub mod engine;
pub mod rabin_karp;
pub mod scoring;
pub mod similarity;

pub use analysis::{AnalysisConfig, AnalysisReport, AnalysisRequest};
pub use similarity::SimilarityCalculator;
