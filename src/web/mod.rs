//! Web server for browser-based marker screening.
//!
//! This module provides an upload page and a small JSON API using Axum.
//! Users upload two DNA samples, pick a matching method, and get the markers
//! detected in each sample plus their similarity.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! marker-screen serve
//!
//! # Custom port, custom catalog, and auto-open browser
//! marker-screen serve --port 3000 --catalog diseases.txt --open
//!
//! # Bind to all interfaces
//! marker-screen serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Upload page
//! - `POST /api/analyze` - Analyze two samples (multipart fields `dna1`, `dna2`, `method`)
//! - `GET /api/catalog` - List the markers in the catalog
//! - `GET /api/methods` - List the supported matching methods

pub mod server;
