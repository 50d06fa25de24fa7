//! Restartable k-subsets of `[0, n)` in lexicographic order.
//!
//! The vertex search walks every `(S-1)`-subset of "old hyperplanes + simplex
//! facets" once per new hyperplane, so the enumerator is reset rather than
//! rebuilt, and `advance` reports the first position that changed. Callers
//! use that position to skip unchanged prefix work or to stop early once the
//! leading index has moved past a range of interest.

/// Lexicographic k-combinations of `0..n`.
///
/// Invariants:
/// - While valid, `current()` is strictly increasing with entries in `[0, n)`.
/// - Exactly `binomial(n, k)` subsets are produced between a `reset` and
///   exhaustion; `k = 0` yields the single empty subset.
#[derive(Clone, Debug)]
pub struct SubsetEnumerator {
    k: usize,
    n: usize,
    ids: Vec<usize>,
    valid: bool,
}

impl SubsetEnumerator {
    pub fn new(k: usize, n: usize) -> Self {
        let mut e = Self {
            k,
            n,
            ids: Vec::with_capacity(k),
            valid: false,
        };
        e.reset();
        e
    }

    /// Rewind to `{0, 1, ..., k-1}`.
    pub fn reset(&mut self) {
        self.ids.clear();
        self.ids.extend(0..self.k);
        self.valid = self.k <= self.n;
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Current subset (ascending). Meaningless once `is_valid()` is false.
    #[inline]
    pub fn current(&self) -> &[usize] {
        &self.ids
    }

    #[inline]
    pub fn subset_size(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn universe_size(&self) -> usize {
        self.n
    }

    /// Step to the next subset and return the lowest position whose index changed.
    ///
    /// Returns `0` and invalidates the enumerator after the last subset.
    pub fn advance(&mut self) -> usize {
        if !self.valid {
            return 0;
        }
        let (k, n) = (self.k, self.n);
        // rightmost position that has not reached its maximum `i + n - k`
        let Some(i) = (0..k).rev().find(|&i| self.ids[i] != i + n - k) else {
            self.valid = false;
            return 0;
        };
        self.ids[i] += 1;
        for j in i + 1..k {
            self.ids[j] = self.ids[j - 1] + 1;
        }
        i
    }
}

impl Iterator for SubsetEnumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.valid {
            return None;
        }
        let out = self.ids.clone();
        self.advance();
        Some(out)
    }
}

/// `C(n, k)`, saturating at `usize::MAX`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}
