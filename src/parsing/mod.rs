//! Parsers for the inputs of screening and comparison.
//!
//! - **Marker catalogs**: whitespace-separated `<disease-name> <marker-pattern>` lines
//! - **Subject sequences**: raw text or FASTA, optionally gzip-compressed
//!
//! ## Example
//!
//! ```rust,no_run
//! use marker_screen::parsing::sequence::{parse_sequence_file, parse_sequence_text};
//! use std::path::Path;
//!
//! let sample = parse_sequence_file(Path::new("sample.fa.gz")).unwrap();
//! let raw = parse_sequence_text("TTACGTTT\n").unwrap();
//! assert_eq!(raw.len(), 8);
//! ```

pub mod markers;
pub mod sequence;
