use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::store::{Marker, MarkerCatalog};
use crate::core::types::{MatchMethod, ScreeningResult};
use crate::matching::rabin_karp::RollingHashMatcher;
use crate::matching::scoring::{
    count_to_f64, exact_score, kmer_jaccard, lcs_length, DEFAULT_KMER_SIZE,
};

/// Default fraction of a marker's length that must match (exact and LCS)
pub const DEFAULT_MATCH_FRACTION: f64 = 0.8;

/// Default minimum k-mer Jaccard similarity
pub const DEFAULT_JACCARD_THRESHOLD: f64 = 0.5;

/// Acceptance rules for marker screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Fraction of marker positions that must match in one window (exact)
    pub exact_threshold: f64,
    /// Fraction of the marker length the best window LCS must reach
    pub subsequence_threshold: f64,
    /// Minimum best-window k-mer Jaccard similarity
    pub jaccard_threshold: f64,
    /// k-mer length for Jaccard screening
    pub kmer_size: usize,
    /// Evaluate markers on the rayon thread pool
    pub parallel: bool,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            exact_threshold: DEFAULT_MATCH_FRACTION,
            subsequence_threshold: DEFAULT_MATCH_FRACTION,
            jaccard_threshold: DEFAULT_JACCARD_THRESHOLD,
            kmer_size: DEFAULT_KMER_SIZE,
            parallel: true,
        }
    }
}

/// Screens subject sequences against every marker of a catalog
pub struct ScreeningEngine<'a> {
    catalog: &'a MarkerCatalog,
    config: ScreeningConfig,
    matcher: RollingHashMatcher,
}

impl<'a> ScreeningEngine<'a> {
    /// Create a new screening engine with default configuration
    pub fn new(catalog: &'a MarkerCatalog) -> Self {
        Self::with_config(catalog, ScreeningConfig::default())
    }

    /// Create a new screening engine with custom configuration
    pub fn with_config(catalog: &'a MarkerCatalog, config: ScreeningConfig) -> Self {
        Self {
            catalog,
            config,
            matcher: RollingHashMatcher::new(),
        }
    }

    /// Names of all markers detected in `subject`, in catalog order.
    ///
    /// Markers are evaluated independently; with `parallel` set they are
    /// spread over the rayon pool and the catalog order is kept.
    pub fn screen(&self, subject: &[u8], method: MatchMethod) -> ScreeningResult {
        let markers = self.catalog.markers();

        let detected: Vec<String> = if self.config.parallel {
            markers
                .par_iter()
                .filter(|marker| self.detect(subject, marker, method))
                .map(|marker| marker.name().to_string())
                .collect()
        } else {
            markers
                .iter()
                .filter(|marker| self.detect(subject, marker, method))
                .map(|marker| marker.name().to_string())
                .collect()
        };

        debug!(
            "Screened {} bp against {} markers with '{}': {} detected",
            subject.len(),
            markers.len(),
            method,
            detected.len()
        );

        ScreeningResult(detected)
    }

    /// Is `marker` present in `subject` under `method`?
    pub fn detect(&self, subject: &[u8], marker: &Marker, method: MatchMethod) -> bool {
        let pattern = marker.pattern().as_bytes();

        // Window-based methods have no windows to score
        if subject.len() < pattern.len() && method != MatchMethod::RollingHash {
            debug!(
                "Skipping marker '{}' ({} bp): subject is only {} bp",
                marker.name(),
                pattern.len(),
                subject.len()
            );
            return false;
        }

        let detected = match method {
            MatchMethod::RollingHash => self.matcher.exists(subject, pattern),
            MatchMethod::Subsequence => {
                let best = best_window(subject, pattern.len(), |window| {
                    count_to_f64(lcs_length(window, pattern))
                });
                best >= self.config.subsequence_threshold * count_to_f64(pattern.len())
            }
            MatchMethod::KmerJaccard => {
                let best = best_window(subject, pattern.len(), |window| {
                    kmer_jaccard(window, pattern, self.config.kmer_size)
                });
                best >= self.config.jaccard_threshold
            }
            MatchMethod::Exact => {
                let required = self.config.exact_threshold * count_to_f64(pattern.len());
                // First qualifying window wins; no need to look further
                subject
                    .windows(pattern.len())
                    .any(|window| count_to_f64(exact_score(window, pattern)) >= required)
            }
        };

        if detected {
            debug!("Marker '{}' detected with '{}'", marker.name(), method);
        }

        detected
    }
}

/// Highest score over every `width`-long window of `subject`.
///
/// Callers guarantee `0 < width <= subject.len()`, so there is at least one window.
fn best_window<F>(subject: &[u8], width: usize, score: F) -> f64
where
    F: Fn(&[u8]) -> f64,
{
    subject
        .windows(width)
        .map(score)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Screen `subject` against `catalog` with the default acceptance rules
pub fn screen(subject: &[u8], catalog: &MarkerCatalog, method: MatchMethod) -> ScreeningResult {
    ScreeningEngine::new(catalog).screen(subject, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, &str)]) -> MarkerCatalog {
        let mut catalog = MarkerCatalog::new();
        for (name, pattern) in entries {
            catalog.insert(*name, *pattern).unwrap();
        }
        catalog
    }

    #[test]
    fn test_exact_detects_embedded_marker() {
        let catalog = catalog(&[("X", "ACGT")]);
        let result = screen(b"TTACGTTT", &catalog, MatchMethod::Exact);
        assert_eq!(result.names(), ["X"]);
    }

    #[test]
    fn test_exact_no_occurrence() {
        let catalog = catalog(&[("X", "ACGT")]);
        let result = screen(b"TTTTTTT", &catalog, MatchMethod::Exact);
        assert!(result.is_empty());
    }

    #[test]
    fn test_exact_tolerates_mismatches_within_threshold() {
        // 9 of 10 positions match: 9 >= 8.0
        let catalog = catalog(&[("X", "ACGTACGTAC")]);
        let result = screen(b"GGACGTTCGTACGG", &catalog, MatchMethod::Exact);
        assert!(result.contains("X"));

        // 7 of 10 positions match: 7 < 8.0
        let result = screen(b"ACGAAAATAC", &catalog, MatchMethod::Exact);
        assert!(result.is_empty());
    }

    #[test]
    fn test_score_equal_to_threshold_is_detected() {
        let markers = catalog(&[("X", "ACGTA")]);

        // 4 of 5 positions and LCS 4: exactly 0.8 * 5
        assert!(screen(b"ACGTT", &markers, MatchMethod::Exact).contains("X"));
        assert!(screen(b"ACGTT", &markers, MatchMethod::Subsequence).contains("X"));

        // One base lower on both scores
        assert!(screen(b"ACTTT", &markers, MatchMethod::Exact).is_empty());
        assert!(screen(b"AGGTT", &markers, MatchMethod::Subsequence).is_empty());

        // k-mer sets {AAAAA} and {AAAAA, AAAAC}: Jaccard exactly 0.5
        let repeats = catalog(&[("Y", "AAAAAA")]);
        assert!(screen(b"AAAAAC", &repeats, MatchMethod::KmerJaccard).contains("Y"));
        let distinct = catalog(&[("Z", "ACGTAC")]);
        assert!(screen(b"ACGTAG", &distinct, MatchMethod::KmerJaccard).is_empty());
    }

    #[test]
    fn test_rolling_hash_requires_exact_occurrence() {
        let catalog = catalog(&[("X", "ACGTACGTAC")]);
        assert!(screen(b"GGACGTACGTACGG", &catalog, MatchMethod::RollingHash).contains("X"));
        // One mismatch is enough to miss
        assert!(screen(b"GGACGTTCGTACGG", &catalog, MatchMethod::RollingHash).is_empty());
    }

    #[test]
    fn test_subsequence_threshold() {
        let catalog = catalog(&[("X", "ACGTACGTAC")]);
        // LCS of window ACGTTCGTAC with marker = 9 >= 8
        assert!(screen(b"ACGTTCGTAC", &catalog, MatchMethod::Subsequence).contains("X"));
        // Nothing in common
        assert!(screen(b"TTTTTTTTTTTT", &catalog, MatchMethod::Subsequence).is_empty());
    }

    #[test]
    fn test_jaccard_threshold() {
        let catalog = catalog(&[("X", "ACGTACGTAC")]);
        assert!(screen(b"TTACGTACGTACTT", &catalog, MatchMethod::KmerJaccard).contains("X"));
        assert!(screen(b"TTTTTTTTTTTTTT", &catalog, MatchMethod::KmerJaccard).is_empty());
    }

    #[test]
    fn test_marker_longer_than_subject_never_detected() {
        let catalog = catalog(&[("Long", "ACGTACGTACGT")]);
        for method in MatchMethod::ALL {
            let result = screen(b"ACGT", &catalog, method);
            assert!(result.is_empty(), "method {method} detected a longer marker");
        }
    }

    #[test]
    fn test_empty_subject() {
        let catalog = catalog(&[("X", "ACGT")]);
        for method in MatchMethod::ALL {
            assert!(screen(b"", &catalog, method).is_empty());
        }
    }

    #[test]
    fn test_results_follow_catalog_order() {
        let catalog = catalog(&[("C", "GGGG"), ("A", "ACGT"), ("B", "TTTT"), ("D", "CCCC")]);
        let subject = b"TTTTACGTGGGG";

        for parallel in [true, false] {
            let config = ScreeningConfig {
                parallel,
                ..ScreeningConfig::default()
            };
            let engine = ScreeningEngine::with_config(&catalog, config);
            let result = engine.screen(subject, MatchMethod::RollingHash);
            assert_eq!(result.names(), ["C", "A", "B"]);
        }
    }

    #[test]
    fn test_custom_threshold() {
        let catalog = catalog(&[("X", "ACGTACGTAC")]);
        let strict = ScreeningConfig {
            exact_threshold: 1.0,
            ..ScreeningConfig::default()
        };
        let engine = ScreeningEngine::with_config(&catalog, strict);
        // 9 of 10 is no longer enough
        assert!(engine
            .screen(b"GGACGTTCGTACGG", MatchMethod::Exact)
            .is_empty());
    }

    #[test]
    fn test_each_marker_reported_once() {
        let catalog = catalog(&[("X", "AC")]);
        let result = screen(b"ACACACAC", &catalog, MatchMethod::Exact);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_best_window() {
        let best = best_window(b"ABCDE", 2, |w| f64::from(w[0]));
        assert!((best - f64::from(b'D')).abs() < f64::EPSILON);
    }
}
