//! Upper envelopes of linear functionals over the probability simplex.
//!
//! Two computations live here:
//! - naive vertex enumeration of the max-envelope of a working set of
//!   hyperplanes (alpha-vectors), driven by restartable subset enumeration and
//!   one small linear solve per subset;
//! - an optimistic upper bound on the envelope at a query point, obtained from
//!   an LP over known (vertex, value) pairs.
//!
//! Numeric backends sit behind two narrow traits: [`LinearSolver`] (square
//! solves, least-squares on singular input) and [`LinearProgram`] (objective,
//! free variables, `<=`/`>=`/`=` rows). Default implementations are
//! [`SvdSolver`] and [`DenseSimplex`].
//!
//! Everything is synchronous and allocation-local; concurrent calls on shared
//! read-only inputs are fine.

mod cfg;
pub mod error;
pub mod linsolve;
pub mod lp;
pub mod optimistic;
pub mod sample;
pub mod subsets;
mod types;
pub mod vertices;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{EnvelopeError, Result};
pub use linsolve::{LinearSolver, SvdSolver};
pub use lp::{Constraint, DenseSimplex, LinearProgram, LpOutcome, LpSolution, Sense, SimplexCfg};
pub use optimistic::{compute_optimistic_value, compute_optimistic_value_with};
pub use subsets::{binomial, SubsetEnumerator};
pub use types::{envelope_value, simplex_corner_vertices, EnvelopeCfg, Hyperplane, Vertex};
pub use vertices::{find_vertices_naive, find_vertices_naive_with};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::sample::{draw_hyperplanes, draw_simplex_point, HyperplaneCfg, ReplayToken};
    pub use crate::{
        compute_optimistic_value, envelope_value, find_vertices_naive, simplex_corner_vertices,
        EnvelopeCfg, EnvelopeError, Hyperplane, Vertex,
    };
    pub use nalgebra::DVector;
}
