//! Tolerance defaults (internal).
//!
//! Policy
//! - Call sites read tolerances from `EnvelopeCfg` / `SimplexCfg`; these
//!   constants only seed their `Default` impls.

/// Slack allowed on the `[0,1]` coordinate test before a candidate is rejected.
pub(crate) const FEAS_EPS: f64 = 1e-9;
/// Singular values below this are treated as zero by the SVD least-squares solve.
pub(crate) const RANK_EPS: f64 = 1e-12;
/// Pivot/reduced-cost threshold for the dense simplex.
pub(crate) const PIVOT_EPS: f64 = 1e-9;
/// Hard cap on simplex pivots per phase.
pub(crate) const MAX_PIVOTS: usize = 50_000;
