//! Disease marker catalog storage.
//!
//! A catalog maps disease names to marker patterns. An embedded default
//! catalog is compiled into the binary; custom catalogs can be loaded from
//! the plain text format or from JSON.
//!
//! ## Text format
//!
//! ```text
//! # <disease-name> <marker-pattern>
//! Cystic_Fibrosis ATCATCTTTGGTGTTTCCTATGATG
//! Sickle_Cell_Anemia CTGACTCCTGTGGAGAAGTCT
//! ```
//!
//! Lines that do not split into exactly two whitespace-separated tokens are
//! ignored.
//!
//! ## Example
//!
//! ```rust,no_run
//! use marker_screen::MarkerCatalog;
//! use std::path::Path;
//!
//! let catalog = MarkerCatalog::load_embedded();
//! for marker in &catalog {
//!     println!("{}: {} bp", marker.name(), marker.pattern().len());
//! }
//!
//! let custom = MarkerCatalog::load_from_file(Path::new("diseases.txt")).unwrap();
//! ```

pub mod store;
