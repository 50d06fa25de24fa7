//! Naive vertex enumeration for the max-envelope of hyperplanes over the simplex.
//!
//! Algorithm
//! - For each new hyperplane `h`, walk every `(S-1)`-subset of
//!   `[0, |old| + S)`. Index `i < |old|` adds the row `old_i·x − v = 0`; index
//!   `|old| + c` pins coordinate `c` to the simplex facet `x_c = 0`.
//! - Row 0 is `h·x − v = 0`; the last row is `Σ_{c not pinned} x_c = 1`.
//! - The system is solved over the unpinned coordinates plus `v`, which makes
//!   it square with size `#hyperplane rows + 1`. Pinned coordinates are exact
//!   zeros in the returned point.
//! - A solution is kept iff all coordinates land in `[0,1]` (up to
//!   `eps_feas`, then clamped). Singular systems are not special-cased: their
//!   least-squares answers go through the same filter.
//! - Subsets made only of facets reproduce simplex corners, which callers
//!   already hold; the walk for `h` stops as soon as the leading index moves
//!   onto a facet.
//!
//! Output is not deduplicated: a vertex where more than `S` planes meet is
//! reported once per subset that reaches it. Values are relative to `h` and
//! the chosen subset, not to all hyperplanes at once.
//!
//! Complexity: `|new| · C(|old| + S, S − 1)` solves of size `≤ S + 1`; keep
//! `old` a small working set.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::Result;
use crate::linsolve::{LinearSolver, SvdSolver};
use crate::subsets::SubsetEnumerator;
use crate::types::{ensure_dim, EnvelopeCfg, Hyperplane, Vertex};

/// Envelope vertices of `new` against the context `old`, default solver and tolerances.
///
/// Returns an empty list when `old` is empty.
pub fn find_vertices_naive(new: &[Hyperplane], old: &[Hyperplane]) -> Result<Vec<Vertex>> {
    let cfg = EnvelopeCfg::default();
    find_vertices_naive_with(new, old, &SvdSolver::new(cfg.eps_rank), cfg)
}

/// Same as [`find_vertices_naive`] with an explicit solver and tolerances.
pub fn find_vertices_naive_with<L: LinearSolver>(
    new: &[Hyperplane],
    old: &[Hyperplane],
    solver: &L,
    cfg: EnvelopeCfg,
) -> Result<Vec<Vertex>> {
    let mut vertices = Vec::new();
    let Some(first) = old.first() else {
        return Ok(vertices);
    };
    let s = first.dim();
    ensure_dim(old, s)?;
    ensure_dim(new, s)?;
    if s == 0 {
        return Ok(vertices);
    }

    let n_old = old.len();
    let mut enumerator = SubsetEnumerator::new(s - 1, n_old + s);
    let mut evaluated = 0usize;
    for h in new {
        enumerator.reset();
        while enumerator.is_valid() {
            evaluated += 1;
            if let Some(v) = solve_subset(h, old, enumerator.current(), solver, cfg) {
                vertices.push(v);
            }
            let last = enumerator.advance();
            // Leading index on a facet: every remaining subset is facets only.
            if enumerator.is_valid() && last == 0 && enumerator.current()[0] >= n_old {
                break;
            }
        }
    }
    debug!(
        states = s,
        new = new.len(),
        old = n_old,
        evaluated,
        accepted = vertices.len(),
        "find_vertices_naive"
    );
    Ok(vertices)
}

/// Build and solve the system for one subset; `None` if the point leaves the simplex box.
///
/// The matrix is rebuilt per subset. Reusing unchanged prefix rows (the
/// `advance` return value marks them) would save copies but the reduced
/// column set shifts whenever the pinned facets change, and at `S + 1` rows
/// the rebuild is not the bottleneck next to the solve.
fn solve_subset<L: LinearSolver>(
    h: &Hyperplane,
    old: &[Hyperplane],
    subset: &[usize],
    solver: &L,
    cfg: EnvelopeCfg,
) -> Option<Vertex> {
    let s = h.dim();
    let mut pinned = vec![false; s];
    let mut planes = Vec::with_capacity(subset.len() + 1);
    planes.push(h);
    for &i in subset {
        match old.get(i) {
            Some(plane) => planes.push(plane),
            None => pinned[i - old.len()] = true,
        }
    }
    let active: Vec<usize> = (0..s).filter(|&c| !pinned[c]).collect();
    let m = planes.len() + 1;
    debug_assert_eq!(active.len() + 1, m);

    let mut a = DMatrix::<f64>::zeros(m, m);
    let mut b = DVector::<f64>::zeros(m);
    for (r, plane) in planes.iter().enumerate() {
        for (col, &c) in active.iter().enumerate() {
            a[(r, col)] = plane.coeffs()[c];
        }
        a[(r, m - 1)] = -1.0;
    }
    for col in 0..active.len() {
        a[(m - 1, col)] = 1.0;
    }
    b[m - 1] = 1.0;

    let x = solver.solve(&a, &b);
    if x.len() != m {
        return None;
    }
    let mut point = DVector::<f64>::zeros(s);
    for (col, &c) in active.iter().enumerate() {
        let xc = x[col];
        if !xc.is_finite() || xc < -cfg.eps_feas || xc > 1.0 + cfg.eps_feas {
            return None;
        }
        point[c] = xc.clamp(0.0, 1.0);
    }
    let value = x[m - 1];
    if !value.is_finite() {
        return None;
    }
    Some(Vertex::new(point, value))
}

#[cfg(test)]
mod tests;
