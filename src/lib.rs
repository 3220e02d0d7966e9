//! # marker-screen
//!
//! A library for screening DNA sequences for known disease markers and for
//! scoring how similar two DNA samples are.
//!
//! A marker is a short subsequence associated with a disease. Screening asks
//! which markers of a catalog occur in a subject sequence; comparison asks how
//! alike two subjects are. Both questions can be answered with one of four
//! matching methods, from strict to fuzzy.
//!
//! ## Features
//!
//! - **Exact windowed matching**: position-wise agreement with mismatch tolerance
//! - **Rabin-Karp**: verified rolling-hash search for verbatim occurrences
//! - **Longest common subsequence**: tolerant of insertions and deletions
//! - **k-mer Jaccard**: composition-based set similarity
//! - **Parallel screening**: markers evaluated on the rayon thread pool
//!
//! ## Example
//!
//! ```rust,no_run
//! use marker_screen::{MarkerCatalog, MatchMethod, ScreeningEngine};
//! use marker_screen::parsing::sequence::parse_sequence_text;
//!
//! // Load the embedded catalog of disease markers
//! let catalog = MarkerCatalog::load_embedded();
//!
//! // Parse a sample (raw text or FASTA)
//! let sample = parse_sequence_text(">sample\nGGCTGACTCCTGTGGAGAAGTCTCC\n").unwrap();
//!
//! let engine = ScreeningEngine::new(&catalog);
//! for name in engine.screen(sample.as_bytes(), MatchMethod::Exact) {
//!     println!("detected: {name}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Disease marker catalog storage
//! - [`core`]: Core types for sequences, methods, and results
//! - [`matching`]: Screening engine, similarity, and scoring algorithms
//! - [`parsing`]: Parsers for marker lists and sequence files
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based analysis

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::catalog::store::{Marker, MarkerCatalog};
pub use crate::core::sequence::Sequence;
pub use crate::core::types::*;
pub use crate::matching::analysis::{analyze, AnalysisConfig, AnalysisReport, AnalysisRequest};
pub use crate::matching::engine::{ScreeningConfig, ScreeningEngine};
pub use crate::matching::similarity::{SimilarityCalculator, SimilarityConfig};
