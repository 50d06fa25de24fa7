//! Small dense linear programs.
//!
//! Purpose
//! - Give the optimistic-value bound an LP capability with the shape it needs:
//!   a fixed number of variables, one objective row with a direction, per-variable
//!   "free" flags, and rows `a·x (<=|>=|=) rhs`.
//! - Report the outcome explicitly (`Optimal` / `Infeasible` / `Unbounded` /
//!   `IterationLimit`) so callers pick what is fatal.
//!
//! Conventions
//! - Variables default to `x_j >= 0`; `set_unbounded(j)` lifts that bound.
//! - `DenseSimplex` is a two-phase tableau simplex with Bland's rule. Sized for
//!   tens of variables and a few hundred rows, not for sparse large models.

mod simplex;

pub use simplex::{DenseSimplex, SimplexCfg};

use nalgebra::DVector;

/// Objective direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Comparison kind of a constraint row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    LessEqual,
    GreaterEqual,
    Equal,
}

/// Optimal assignment and objective value (in the caller's direction).
#[derive(Clone, Debug, PartialEq)]
pub struct LpSolution {
    pub x: DVector<f64>,
    pub objective: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LpOutcome {
    Optimal(LpSolution),
    Infeasible,
    Unbounded,
    IterationLimit,
}

impl LpOutcome {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, LpOutcome::Optimal(_))
    }
    /// The solution, if optimal.
    pub fn into_solution(self) -> Option<LpSolution> {
        match self {
            LpOutcome::Optimal(s) => Some(s),
            _ => None,
        }
    }
}

/// LP builder/solver interface used by the optimistic bound.
///
/// Rows and the objective must have length `n_vars()`. [`DenseSimplex`]
/// checks this with a debug assertion; release builds cut or zero-pad the row.
pub trait LinearProgram {
    fn new(n_vars: usize) -> Self
    where
        Self: Sized;
    fn n_vars(&self) -> usize;
    /// Replace the objective row and direction (default: maximize `0`).
    fn set_objective(&mut self, row: &DVector<f64>, sense: Sense);
    /// Drop the default `x_var >= 0` bound.
    fn set_unbounded(&mut self, var: usize);
    fn push_row(&mut self, row: &DVector<f64>, kind: Constraint, rhs: f64);
    fn solve(&self) -> LpOutcome;
}
