//! Square linear solves for the vertex search.
//!
//! The vertex search hands over one small `m × m` system per subset. Parallel
//! or coincident hyperplanes make many of them singular; solvers must not panic
//! on those and instead return something the caller filters on feasibility.

use nalgebra::{DMatrix, DVector, SVD};

use crate::cfg::RANK_EPS;

/// Solve `A x = b` for square `A`, least-squares on rank-deficient input.
pub trait LinearSolver {
    /// Returns a vector of length `a.ncols()`. May contain non-finite entries
    /// when no meaningful solution exists; it must not panic.
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> DVector<f64>;
}

/// Pseudo-inverse solve through a thin SVD.
#[derive(Clone, Copy, Debug)]
pub struct SvdSolver {
    /// Singular values `<= eps_rank` are dropped.
    pub eps_rank: f64,
}

impl Default for SvdSolver {
    fn default() -> Self {
        Self { eps_rank: RANK_EPS }
    }
}

impl SvdSolver {
    pub fn new(eps_rank: f64) -> Self {
        Self { eps_rank }
    }
}

impl LinearSolver for SvdSolver {
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> DVector<f64> {
        let n = a.ncols();
        if a.nrows() != b.len() || a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return DVector::from_element(n, f64::NAN);
        }
        let svd = SVD::new(a.clone(), true, true);
        svd.solve(b, self.eps_rank)
            .unwrap_or_else(|_| DVector::from_element(n, f64::NAN))
    }
}
