//! Rabin-Karp substring search.
//!
//! The hash is a polynomial over the window bytes with base 256 reduced
//! modulo 101. The modulus is small, so equal hashes are common between
//! different windows and every hash hit is verified byte by byte before it
//! is reported.

/// Polynomial base (one step per possible byte value)
pub const HASH_BASE: u64 = 256;

/// Prime modulus for the rolling hash
pub const HASH_MODULUS: u64 = 101;

/// Exact substring search with a rolling polynomial hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingHashMatcher {
    base: u64,
    modulus: u64,
}

impl Default for RollingHashMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingHashMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: HASH_BASE,
            modulus: HASH_MODULUS,
        }
    }

    /// Hash of a whole window: `sum(byte[i] * base^(len-1-i)) mod modulus`
    #[must_use]
    pub fn hash(&self, window: &[u8]) -> u64 {
        window.iter().fold(0, |h, &byte| {
            (h * self.base + u64::from(byte)) % self.modulus
        })
    }

    /// Does `needle` occur anywhere in `haystack`?
    #[must_use]
    pub fn exists(&self, haystack: &[u8], needle: &[u8]) -> bool {
        self.find(haystack, needle).is_some()
    }

    /// Offset of the first occurrence of `needle` in `haystack`.
    ///
    /// An empty needle matches at offset 0.
    #[must_use]
    pub fn find(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        let m = needle.len();
        if haystack.len() < m {
            return None;
        }
        if m == 0 {
            return Some(0);
        }

        let q = self.modulus;

        // Weight of the outgoing byte: base^(m-1) mod q
        let high = (1..m).fold(1, |h, _| (h * self.base) % q);

        let needle_hash = self.hash(needle);
        let mut window_hash = self.hash(&haystack[..m]);
        let last_start = haystack.len() - m;

        for start in 0..=last_start {
            if window_hash == needle_hash && &haystack[start..start + m] == needle {
                return Some(start);
            }

            if start < last_start {
                let outgoing = (u64::from(haystack[start]) * high) % q;
                let incoming = u64::from(haystack[start + m]);
                // Adding q keeps the subtraction non-negative
                window_hash = ((window_hash + q - outgoing) * self.base + incoming) % q;
            }
        }

        None
    }
}
