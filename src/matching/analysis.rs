//! Two-sample analysis: screen both samples and compare them.
//!
//! This is the request-level entry point shared by the CLI `analyze`
//! command and the web server. All tunables travel in an explicit
//! [`AnalysisConfig`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::store::MarkerCatalog;
use crate::core::sequence::Sequence;
use crate::core::types::{MatchMethod, ScreeningResult, SimilarityScore};
use crate::matching::engine::{ScreeningConfig, ScreeningEngine};
use crate::matching::similarity::{SimilarityCalculator, SimilarityConfig};
use crate::utils::validation::{
    validate_pairwise_work, validate_sequence_length, ValidationError,
};

/// Default upper bound on subject sequence length
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Default bound on `len1 * len2` for the quadratic similarity methods
/// (`rabin` and `lcs`)
pub const DEFAULT_MAX_PAIRWISE_WORK: u64 = 50_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Everything that tunes an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub screening: ScreeningConfig,
    pub similarity: SimilarityConfig,
    /// Longest subject sequence accepted
    pub max_sequence_length: usize,
    /// Largest `len1 * len2` accepted by rolling-hash and LCS similarity
    pub max_pairwise_work: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            screening: ScreeningConfig::default(),
            similarity: SimilarityConfig::default(),
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            max_pairwise_work: DEFAULT_MAX_PAIRWISE_WORK,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config file; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds lie in [0, 1] and sizes are non-zero.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("exact_threshold", self.screening.exact_threshold),
            ("subsequence_threshold", self.screening.subsequence_threshold),
            ("jaccard_threshold", self.screening.jaccard_threshold),
        ];
        for (field, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }

        let sizes = [
            ("screening.kmer_size", self.screening.kmer_size),
            ("similarity.kmer_size", self.similarity.kmer_size),
            ("similarity.segment_length", self.similarity.segment_length),
            ("max_sequence_length", self.max_sequence_length),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.max_pairwise_work == 0 {
            return Err(ConfigError::Invalid {
                field: "max_pairwise_work",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Enforce the length limit on both samples and, for the quadratic
    /// methods, the pairwise work limit.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::SequenceTooLong` or
    /// `ValidationError::ComparisonTooLarge`.
    pub fn check_limits(
        &self,
        len1: usize,
        len2: usize,
        method: MatchMethod,
    ) -> Result<(), ValidationError> {
        validate_sequence_length(len1, self.max_sequence_length)?;
        validate_sequence_length(len2, self.max_sequence_length)?;
        if matches!(method, MatchMethod::RollingHash | MatchMethod::Subsequence) {
            validate_pairwise_work(len1, len2, self.max_pairwise_work)?;
        }
        Ok(())
    }
}

/// Two samples to analyze with one method
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub sample1: Sequence,
    pub sample2: Sequence,
    pub method: MatchMethod,
}

/// Screening results for both samples plus their similarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub method: MatchMethod,
    pub sample1: ScreeningResult,
    pub sample2: ScreeningResult,
    pub similarity: SimilarityScore,
}

impl AnalysisReport {
    /// Similarity as a two-decimal percentage, e.g. `"87.65%"`
    #[must_use]
    pub fn similarity_percent(&self) -> String {
        self.similarity.as_percentage()
    }
}

/// Screen both samples against `catalog` and compute their similarity.
///
/// # Errors
///
/// Returns `ValidationError::SequenceTooLong` if either sample exceeds
/// `config.max_sequence_length`, or `ValidationError::ComparisonTooLarge` if a
/// rolling-hash or LCS comparison exceeds `config.max_pairwise_work`.
pub fn analyze(
    request: &AnalysisRequest,
    catalog: &MarkerCatalog,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, ValidationError> {
    config.check_limits(request.sample1.len(), request.sample2.len(), request.method)?;

    let engine = ScreeningEngine::with_config(catalog, config.screening.clone());
    let calculator = SimilarityCalculator::with_config(config.similarity.clone());

    let sample1 = engine.screen(request.sample1.as_bytes(), request.method);
    let sample2 = engine.screen(request.sample2.as_bytes(), request.method);
    let similarity = calculator.similarity(
        request.sample1.as_bytes(),
        request.sample2.as_bytes(),
        request.method,
    );

    info!(
        "Analysis with '{}': sample1 {} markers, sample2 {} markers, similarity {}",
        request.method,
        sample1.len(),
        sample2.len(),
        similarity
    );

    Ok(AnalysisReport {
        method: request.method,
        sample1,
        sample2,
        similarity,
    })
}
