//! Optimistic envelope value at a point from known (vertex, value) pairs.
//!
//! LP over free coefficients `h ∈ R^S`:
//!
//! ```text
//! maximize    p · h
//! subject to  v_k · h <= value_k     for every known pair (v_k, value_k)
//! ```
//!
//! The optimum is the largest value any linear functional can take at `p`
//! without exceeding a known vertex value, i.e. an upper bound on what the
//! envelope can still be at `p`. Used when evaluating the true envelope at a
//! point is expensive (e.g. one full solve per point in linear support).
//! Coefficients are unbounded since the optimistic plane may dip negative.

use nalgebra::DVector;
use tracing::warn;

use crate::error::{EnvelopeError, Result};
use crate::lp::{Constraint, DenseSimplex, LinearProgram, LpOutcome, Sense};
use crate::types::Vertex;

/// Upper bound on the envelope at `p` given `known`, solved with [`DenseSimplex`].
///
/// Returns `Ok(0.0)` for an empty `known`. That zero carries no information;
/// callers should not treat it as a bound.
pub fn compute_optimistic_value(p: &DVector<f64>, known: &[Vertex]) -> Result<f64> {
    compute_optimistic_value_with::<DenseSimplex>(p, known)
}

/// Same as [`compute_optimistic_value`] with a caller-chosen LP backend.
///
/// Errors
/// - `DimensionMismatch` if a known point has a different length than `p`.
/// - `LpInfeasible` / `LpUnbounded` / `LpIterationLimit` when the LP does not
///   reach an optimum. Unbounded typically means the known points do not
///   surround `p` (missing simplex corners).
pub fn compute_optimistic_value_with<L: LinearProgram>(
    p: &DVector<f64>,
    known: &[Vertex],
) -> Result<f64> {
    if known.is_empty() {
        return Ok(0.0);
    }
    let s = p.len();
    if let Some(v) = known.iter().find(|v| v.dim() != s) {
        return Err(EnvelopeError::DimensionMismatch {
            expected: s,
            found: v.dim(),
        });
    }

    let mut lp = L::new(s);
    lp.set_objective(p, Sense::Maximize);
    for var in 0..s {
        lp.set_unbounded(var);
    }
    for v in known {
        lp.push_row(&v.point, Constraint::LessEqual, v.value);
    }

    // The optimistic hyperplane itself is not needed.
    match lp.solve() {
        LpOutcome::Optimal(solution) => Ok(solution.objective),
        LpOutcome::Infeasible => {
            warn!(states = s, known = known.len(), "optimistic LP infeasible");
            Err(EnvelopeError::LpInfeasible)
        }
        LpOutcome::Unbounded => {
            warn!(states = s, known = known.len(), "optimistic LP unbounded");
            Err(EnvelopeError::LpUnbounded)
        }
        LpOutcome::IterationLimit => {
            warn!(states = s, known = known.len(), "optimistic LP hit pivot limit");
            Err(EnvelopeError::LpIterationLimit)
        }
    }
}
