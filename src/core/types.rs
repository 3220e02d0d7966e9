use serde::{Deserialize, Serialize};

/// Matching strategy applied by screening and similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchMethod {
    /// Position-wise match count over sliding windows
    #[default]
    #[serde(rename = "simple")]
    Exact,
    /// Rabin-Karp rolling hash search for exact occurrences
    #[serde(rename = "rabin")]
    RollingHash,
    /// Longest common subsequence
    #[serde(rename = "lcs")]
    Subsequence,
    /// Jaccard similarity of k-mer sets
    #[serde(rename = "jaccard")]
    KmerJaccard,
}

impl MatchMethod {
    pub const ALL: [MatchMethod; 4] = [
        MatchMethod::Exact,
        MatchMethod::RollingHash,
        MatchMethod::Subsequence,
        MatchMethod::KmerJaccard,
    ];

    /// Parse a method selector, returning `None` for unknown selectors.
    ///
    /// Selectors are matched exactly: no trimming, no case folding, no aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Exact),
            "rabin" => Some(Self::RollingHash),
            "lcs" => Some(Self::Subsequence),
            "jaccard" => Some(Self::KmerJaccard),
            _ => None,
        }
    }

    /// Parse a method selector, falling back to [`MatchMethod::Exact`] for
    /// anything unrecognized.
    pub fn from_selector(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!("Unknown match method '{}', using 'simple'", s);
            Self::Exact
        })
    }

    /// Canonical selector string
    #[must_use]
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Exact => "simple",
            Self::RollingHash => "rabin",
            Self::Subsequence => "lcs",
            Self::KmerJaccard => "jaccard",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Exact => "Exact windowed match",
            Self::RollingHash => "Rabin-Karp rolling hash",
            Self::Subsequence => "Longest common subsequence",
            Self::KmerJaccard => "k-mer Jaccard similarity",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selector())
    }
}

/// Disease names detected in one subject sequence, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreeningResult(pub Vec<String>);

impl ScreeningResult {
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ScreeningResult {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl IntoIterator for ScreeningResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Normalized similarity between two sequences, always finite and in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    pub const ZERO: SimilarityScore = SimilarityScore(0.0);

    /// Wrap a ratio; non-finite values become 0 and the rest are clamped to [0, 1].
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self::ZERO
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Percentage with two decimals, e.g. `0.8765` -> `"87.65%"`
    #[must_use]
    pub fn as_percentage(&self) -> String {
        format!("{:.2}%", self.0 * 100.0)
    }
}

impl std::fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_selectors() {
        assert_eq!(MatchMethod::parse("simple"), Some(MatchMethod::Exact));
        assert_eq!(MatchMethod::parse("rabin"), Some(MatchMethod::RollingHash));
        assert_eq!(MatchMethod::parse("lcs"), Some(MatchMethod::Subsequence));
        assert_eq!(MatchMethod::parse("jaccard"), Some(MatchMethod::KmerJaccard));
        assert_eq!(MatchMethod::parse(" LCS "), None);
        assert_eq!(MatchMethod::parse("bogus"), None);
    }

    #[test]
    fn test_selectors_are_exact_strings() {
        for selector in ["LCS", "exact", "kmer", "rabin-karp", "rabin_karp", " jaccard", "subsequence", "Simple"] {
            assert_eq!(MatchMethod::from_selector(selector), MatchMethod::Exact, "{selector:?}");
        }
    }

    #[test]
    fn test_unknown_selector_falls_back_to_exact() {
        assert_eq!(MatchMethod::from_selector("bogus"), MatchMethod::Exact);
        assert_eq!(MatchMethod::from_selector(""), MatchMethod::Exact);
        assert_eq!(MatchMethod::from_selector("jaccard"), MatchMethod::KmerJaccard);
    }

    #[test]
    fn test_selector_roundtrip_all_methods() {
        for method in MatchMethod::ALL {
            assert_eq!(MatchMethod::parse(method.selector()), Some(method));
        }
    }

    #[test]
    fn test_method_serde_uses_selectors() {
        let json = serde_json::to_string(&MatchMethod::RollingHash).unwrap();
        assert_eq!(json, "\"rabin\"");
        let method: MatchMethod = serde_json::from_str("\"lcs\"").unwrap();
        assert_eq!(method, MatchMethod::Subsequence);
    }

    #[test]
    fn test_similarity_percentage() {
        assert_eq!(SimilarityScore::new(0.8765).as_percentage(), "87.65%");
        assert_eq!(SimilarityScore::new(1.0).as_percentage(), "100.00%");
        assert_eq!(SimilarityScore::ZERO.as_percentage(), "0.00%");
    }

    #[test]
    fn test_similarity_score_sanitized() {
        assert_eq!(SimilarityScore::new(f64::NAN).value(), 0.0);
        assert_eq!(SimilarityScore::new(f64::INFINITY).value(), 0.0);
        assert_eq!(SimilarityScore::new(1.5).value(), 1.0);
        assert_eq!(SimilarityScore::new(-0.2).value(), 0.0);
    }

    #[test]
    fn test_screening_result() {
        let result = ScreeningResult::from(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(result.len(), 2);
        assert!(result.contains("B"));
        assert!(!result.contains("C"));
        assert_eq!(serde_json::to_string(&result).unwrap(), "[\"A\",\"B\"]");
    }
}
