//! Error type for envelope computations.
//!
//! Infeasible vertex candidates and singular systems are filtered inside the
//! vertex search and never show up here. Only caller mistakes (mixed
//! dimensions) and LP failures in the optimistic bound are surfaced.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Hyperplanes, vertices or the query point disagree on the number of states.
    #[error("dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The optimistic LP has no feasible hyperplane. Indicates malformed input.
    #[error("optimistic-value LP is infeasible")]
    LpInfeasible,

    /// The known vertices do not pin the query point down (e.g. missing simplex corners).
    #[error("optimistic-value LP is unbounded")]
    LpUnbounded,

    #[error("LP solver hit its pivot limit")]
    LpIterationLimit,
}

pub type Result<T> = std::result::Result<T, EnvelopeError>;
