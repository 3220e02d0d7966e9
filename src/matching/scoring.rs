use std::collections::HashSet;

/// Default k-mer length for Jaccard similarity
pub const DEFAULT_KMER_SIZE: usize = 5;

/// Safely convert usize to f64 for ratio calculations
///
/// Sequence lengths are far below the point where f64 loses integer precision.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Number of index-aligned positions holding the same character.
///
/// Sequences of different length are compared over the shorter one.
#[must_use]
pub fn exact_score(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x == y).count()
}

/// Length of the longest common subsequence of `a` and `b`.
///
/// Classic `O(|a|·|b|)` dynamic program. Only the length is needed, so two
/// rows of the table are kept instead of the full matrix.
#[must_use]
pub fn lcs_length(a: &[u8], b: &[u8]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // prev[j] = dp[i-1][j], curr[j] = dp[i][j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Distinct length-`k` substrings of `seq`.
///
/// Empty when `seq` is shorter than `k` or `k` is zero.
#[must_use]
pub fn kmer_set(seq: &[u8], k: usize) -> HashSet<&[u8]> {
    if k == 0 {
        return HashSet::new();
    }
    seq.windows(k).collect()
}

/// Jaccard similarity of the k-mer sets of `a` and `b`: |A ∩ B| / |A ∪ B|
///
/// Presence based: a k-mer repeated many times counts once. Returns 0.0 when
/// both sets are empty (both sequences shorter than `k`).
#[must_use]
pub fn kmer_jaccard(a: &[u8], b: &[u8], k: usize) -> f64 {
    let a_kmers = kmer_set(a, k);
    let b_kmers = kmer_set(b, k);

    let intersection = a_kmers.intersection(&b_kmers).count();
    let union = a_kmers.len() + b_kmers.len() - intersection;

    if union == 0 {
        0.0
    } else {
        count_to_f64(intersection) / count_to_f64(union)
    }
}
