use serde::{Deserialize, Serialize};

use crate::core::types::{MatchMethod, SimilarityScore};
use crate::matching::rabin_karp::RollingHashMatcher;
use crate::matching::scoring::{
    count_to_f64, exact_score, kmer_jaccard, lcs_length, DEFAULT_KMER_SIZE,
};

/// Default probe segment length for rolling-hash similarity
pub const DEFAULT_SEGMENT_LENGTH: usize = 10;

/// Parameters for whole-sequence similarity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// k-mer length for Jaccard similarity
    pub kmer_size: usize,
    /// Length of the segments probed by rolling-hash similarity
    pub segment_length: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            kmer_size: DEFAULT_KMER_SIZE,
            segment_length: DEFAULT_SEGMENT_LENGTH,
        }
    }
}

/// Compares two whole sequences with one of the matching methods
#[derive(Debug, Clone, Default)]
pub struct SimilarityCalculator {
    config: SimilarityConfig,
    matcher: RollingHashMatcher,
}

impl SimilarityCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimilarityConfig) -> Self {
        Self {
            config,
            matcher: RollingHashMatcher::new(),
        }
    }

    /// Similarity of `seq1` and `seq2` in [0, 1].
    ///
    /// Exact, subsequence and Jaccard similarity are symmetric. Rolling-hash
    /// similarity is not: it probes segments of `seq1` and searches for them
    /// in `seq2`.
    pub fn similarity(&self, seq1: &[u8], seq2: &[u8], method: MatchMethod) -> SimilarityScore {
        let min_len = seq1.len().min(seq2.len());

        let ratio = match method {
            MatchMethod::RollingHash => self.segment_hit_ratio(seq1, seq2, min_len),
            MatchMethod::Subsequence => ratio_over(lcs_length(seq1, seq2), min_len),
            MatchMethod::KmerJaccard => kmer_jaccard(seq1, seq2, self.config.kmer_size),
            MatchMethod::Exact => ratio_over(exact_score(seq1, seq2), min_len),
        };

        SimilarityScore::new(ratio)
    }

    /// Fraction of the first `min_len - k + 1` segments of `probe` that occur in `target`
    fn segment_hit_ratio(&self, probe: &[u8], target: &[u8], min_len: usize) -> f64 {
        let k = self.config.segment_length;
        if k == 0 || min_len < k {
            return 0.0;
        }

        let total = min_len - k + 1;
        let hits = probe
            .windows(k)
            .take(total)
            .filter(|segment| self.matcher.exists(target, segment))
            .count();

        count_to_f64(hits) / count_to_f64(total)
    }
}

fn ratio_over(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count_to_f64(count) / count_to_f64(total)
    }
}

/// Similarity of two sequences with default parameters
pub fn similarity(seq1: &[u8], seq2: &[u8], method: MatchMethod) -> SimilarityScore {
    SimilarityCalculator::new().similarity(seq1, seq2, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(score: SimilarityScore, expected: f64) -> bool {
        (score.value() - expected).abs() < 1e-9
    }

    #[test]
    fn test_exact_similarity() {
        assert!(approx(similarity(b"AAAA", b"AAAA", MatchMethod::Exact), 1.0));
        assert!(approx(similarity(b"AAAA", b"TTTT", MatchMethod::Exact), 0.0));
        assert!(approx(similarity(b"ACGT", b"ACCT", MatchMethod::Exact), 0.75));
    }

    #[test]
    fn test_exact_similarity_uses_shorter_length() {
        // Compared over the first 4 characters only
        assert!(approx(similarity(b"ACGT", b"ACGTTTTT", MatchMethod::Exact), 1.0));
    }

    #[test]
    fn test_empty_input_is_zero() {
        for method in MatchMethod::ALL {
            assert!(approx(similarity(b"", b"AAAA", method), 0.0));
            assert!(approx(similarity(b"AAAA", b"", method), 0.0));
        }
    }

    #[test]
    fn test_subsequence_similarity() {
        assert!(approx(similarity(b"ACGT", b"ACGT", MatchMethod::Subsequence), 1.0));
        // LCS(ACGT, AGT) = 3, min length 3
        assert!(approx(similarity(b"ACGT", b"AGT", MatchMethod::Subsequence), 1.0));
        // LCS(AAAA, AATT) = 2
        assert!(approx(similarity(b"AAAA", b"AATT", MatchMethod::Subsequence), 0.5));
    }

    #[test]
    fn test_jaccard_similarity_whole_sequences() {
        assert!(approx(similarity(b"AAAAA", b"AAAAA", MatchMethod::KmerJaccard), 1.0));
        assert!(approx(similarity(b"AAAAA", b"TTTTT", MatchMethod::KmerJaccard), 0.0));
        // Shorter than k on both sides
        assert!(approx(similarity(b"ACG", b"ACG", MatchMethod::KmerJaccard), 0.0));
    }

    #[test]
    fn test_rolling_hash_similarity() {
        let seq = b"ACGTACGTACGTACGT";
        assert!(approx(similarity(seq, seq, MatchMethod::RollingHash), 1.0));

        // Shorter than one segment
        assert!(approx(similarity(b"ACGT", b"ACGT", MatchMethod::RollingHash), 0.0));

        let other = b"TTTTTTTTTTTTTTTT";
        assert!(approx(similarity(seq, other, MatchMethod::RollingHash), 0.0));
    }

    #[test]
    fn test_rolling_hash_similarity_is_asymmetric() {
        let seq1 = b"ACGTACGTAC";
        let seq2 = b"TTACGTACGTACTT";

        // The only probe of seq1 occurs inside seq2
        let forward = similarity(seq1, seq2, MatchMethod::RollingHash);
        // The only probe of seq2 (TTACGTACGT) does not occur in seq1
        let backward = similarity(seq2, seq1, MatchMethod::RollingHash);

        assert!(approx(forward, 1.0));
        assert!(approx(backward, 0.0));
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_rolling_hash_probes_limited_by_shorter_sequence() {
        // min_len = 12, so 3 probes of seq1 are tried even though seq1 is longer
        let seq1 = b"ACGTACGTACGTGGGGGGGG";
        let seq2 = b"ACGTACGTACGT";
        assert!(approx(similarity(seq1, seq2, MatchMethod::RollingHash), 1.0));
    }

    #[test]
    fn test_custom_segment_length() {
        let calc = SimilarityCalculator::with_config(SimilarityConfig {
            segment_length: 2,
            ..SimilarityConfig::default()
        });
        // Probes of ACGT: AC, CG, GT; only AC occurs in ACAC
        let score = calc.similarity(b"ACGT", b"ACAC", MatchMethod::RollingHash);
        assert!(approx(score, 1.0 / 3.0));
    }
}
