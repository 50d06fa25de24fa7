//! Basic types: hyperplanes over the simplex, vertex/value pairs, tolerances.
//!
//! - `Hyperplane`: linear functional `x ↦ α·x` on the S-simplex (an alpha-vector).
//! - `Vertex`: a simplex point with the envelope value found there.
//! - `EnvelopeCfg`: tolerances used by the vertex search.

use nalgebra::DVector;

use crate::cfg::{FEAS_EPS, RANK_EPS};
use crate::error::{EnvelopeError, Result};

/// Vertex-search configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct EnvelopeCfg {
    /// Coordinates in `[-eps_feas, 1 + eps_feas]` are accepted and clamped into `[0,1]`.
    ///
    /// Clamping is per coordinate, so an accepted point's sum can drift off 1
    /// by up to `S · eps_feas`.
    pub eps_feas: f64,
    /// Rank cutoff handed to the default SVD solver.
    pub eps_rank: f64,
}

impl Default for EnvelopeCfg {
    fn default() -> Self {
        Self {
            eps_feas: FEAS_EPS,
            eps_rank: RANK_EPS,
        }
    }
}

/// Linear functional over the probability simplex, one coefficient per state.
///
/// Invariants:
/// - Coefficients are fixed after construction (no mutable access).
#[derive(Clone, Debug, PartialEq)]
pub struct Hyperplane {
    coeffs: DVector<f64>,
}

impl Hyperplane {
    #[inline]
    pub fn new(coeffs: DVector<f64>) -> Self {
        Self { coeffs }
    }
    #[inline]
    pub fn from_slice(coeffs: &[f64]) -> Self {
        Self::new(DVector::from_column_slice(coeffs))
    }
    #[inline]
    pub fn coeffs(&self) -> &DVector<f64> {
        &self.coeffs
    }
    /// Number of states S.
    #[inline]
    pub fn dim(&self) -> usize {
        self.coeffs.len()
    }
    /// Value `α·p` at a simplex point.
    #[inline]
    pub fn eval(&self, p: &DVector<f64>) -> f64 {
        self.coeffs.dot(p)
    }
}

impl From<Vec<f64>> for Hyperplane {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::new(DVector::from_vec(coeffs))
    }
}

/// A simplex point paired with the envelope value computed there.
///
/// The value is relative to whichever hyperplanes produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub point: DVector<f64>,
    pub value: f64,
}

impl Vertex {
    #[inline]
    pub fn new(point: DVector<f64>, value: f64) -> Self {
        Self { point, value }
    }
    #[inline]
    pub fn dim(&self) -> usize {
        self.point.len()
    }
}

/// Pointwise maximum `max_α α·p`; `None` for an empty set.
pub fn envelope_value(hyperplanes: &[Hyperplane], p: &DVector<f64>) -> Option<f64> {
    hyperplanes.iter().map(|h| h.eval(p)).reduce(f64::max)
}

/// The S simplex corners `e_i` with their envelope values `max_α α_i`.
///
/// These are the corners the vertex search assumes the caller already has.
/// Returns an empty list for an empty set.
pub fn simplex_corner_vertices(hyperplanes: &[Hyperplane]) -> Result<Vec<Vertex>> {
    let Some(first) = hyperplanes.first() else {
        return Ok(Vec::new());
    };
    let s = first.dim();
    ensure_dim(hyperplanes, s)?;
    Ok((0..s)
        .map(|i| {
            let value = hyperplanes
                .iter()
                .map(|h| h.coeffs[i])
                .fold(f64::NEG_INFINITY, f64::max);
            Vertex::new(DVector::from_fn(s, |r, _| if r == i { 1.0 } else { 0.0 }), value)
        })
        .collect())
}

pub(crate) fn ensure_dim(hyperplanes: &[Hyperplane], s: usize) -> Result<()> {
    match hyperplanes.iter().find(|h| h.dim() != s) {
        Some(h) => Err(EnvelopeError::DimensionMismatch {
            expected: s,
            found: h.dim(),
        }),
        None => Ok(()),
    }
}
