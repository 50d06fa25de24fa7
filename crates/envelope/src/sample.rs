//! Reproducible random instances: simplex points and hyperplanes.
//!
//! Used by benches, property tests and the CLI `demo` command. Determinism
//! comes from a replay token `(seed, index)` mixed into a single `StdRng`, so
//! the k-th instance of a run can be regenerated on its own.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Hyperplane;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// SplitMix64-style mix of `(seed, index)` into a fresh RNG.
    pub fn rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    #[inline]
    pub fn next_index(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

/// Coefficient range for random hyperplanes.
#[derive(Clone, Copy, Debug)]
pub struct HyperplaneCfg {
    pub lo: f64,
    pub hi: f64,
}

impl Default for HyperplaneCfg {
    fn default() -> Self {
        Self { lo: -1.0, hi: 1.0 }
    }
}

/// Uniform point on the `s`-simplex (normalized exponentials).
pub fn draw_simplex_point<R: Rng>(rng: &mut R, s: usize) -> DVector<f64> {
    let mut p = DVector::from_fn(s, |_, _| -(1.0 - rng.gen::<f64>()).ln());
    let sum = p.sum();
    if sum > 0.0 && sum.is_finite() {
        p /= sum;
    } else if s > 0 {
        p.fill(1.0 / s as f64);
    }
    p
}

/// `count` uniform points on the `s`-simplex.
pub fn draw_simplex_points(s: usize, count: usize, tok: ReplayToken) -> Vec<DVector<f64>> {
    let mut rng = tok.rng();
    (0..count).map(|_| draw_simplex_point(&mut rng, s)).collect()
}

/// `count` hyperplanes over `s` states with coefficients uniform in `[lo, hi)`.
///
/// A degenerate range (`hi <= lo`) yields constant coefficients `lo`.
pub fn draw_hyperplanes(
    cfg: HyperplaneCfg,
    s: usize,
    count: usize,
    tok: ReplayToken,
) -> Vec<Hyperplane> {
    let mut rng = tok.rng();
    (0..count)
        .map(|_| {
            Hyperplane::new(DVector::from_fn(s, |_, _| {
                if cfg.hi > cfg.lo {
                    rng.gen_range(cfg.lo..cfg.hi)
                } else {
                    cfg.lo
                }
            }))
        })
        .collect()
}
