//! Dense two-phase tableau simplex.
//!
//! Standard form
//! - Each variable maps to a column `x⁺`; free variables get a second column
//!   `x⁻` and are recovered as `x = x⁺ − x⁻`.
//! - `<=` rows get a `+1` slack, `>=` rows a `−1` surplus; rows are negated when
//!   their rhs is negative so that the initial rhs is non-negative.
//! - Rows whose slack is not `+1` after normalization get an artificial column;
//!   phase 1 maximizes `−Σ artificials` and reports infeasibility if it stays
//!   below zero.
//!
//! Pivoting uses Bland's rule (lowest entering index, lowest leaving basis
//! index among ratio ties), so degenerate cycling cannot occur in exact
//! arithmetic; `max_pivots` bounds the floating-point case.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use super::{Constraint, LinearProgram, LpOutcome, LpSolution, Sense};
use crate::cfg::{MAX_PIVOTS, PIVOT_EPS};

#[derive(Clone, Copy, Debug)]
pub struct SimplexCfg {
    /// Reduced costs above `-eps` count as optimal; pivots below `eps` are skipped.
    pub eps: f64,
    /// Pivot cap per phase.
    pub max_pivots: usize,
}

impl Default for SimplexCfg {
    fn default() -> Self {
        Self {
            eps: PIVOT_EPS,
            max_pivots: MAX_PIVOTS,
        }
    }
}

#[derive(Clone, Debug)]
struct Row {
    coeffs: DVector<f64>,
    kind: Constraint,
    rhs: f64,
}

/// Dense LP model plus solver. Cheap to build; `solve` does all the work.
#[derive(Clone, Debug)]
pub struct DenseSimplex {
    n_vars: usize,
    objective: DVector<f64>,
    sense: Sense,
    free: Vec<bool>,
    rows: Vec<Row>,
    cfg: SimplexCfg,
}

impl DenseSimplex {
    pub fn with_cfg(n_vars: usize, cfg: SimplexCfg) -> Self {
        Self {
            n_vars,
            objective: DVector::zeros(n_vars),
            sense: Sense::Maximize,
            free: vec![false; n_vars],
            rows: Vec::new(),
            cfg,
        }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn cfg(&self) -> SimplexCfg {
        self.cfg
    }
}

/// `row` cut or zero-padded to length `n`.
fn fit(row: &DVector<f64>, n: usize) -> DVector<f64> {
    DVector::from_fn(n, |j, _| row.get(j).copied().unwrap_or(0.0))
}

impl LinearProgram for DenseSimplex {
    fn new(n_vars: usize) -> Self {
        Self::with_cfg(n_vars, SimplexCfg::default())
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn set_objective(&mut self, row: &DVector<f64>, sense: Sense) {
        debug_assert_eq!(row.len(), self.n_vars, "objective length");
        self.objective = fit(row, self.n_vars);
        self.sense = sense;
    }

    fn set_unbounded(&mut self, var: usize) {
        debug_assert!(var < self.n_vars, "variable index");
        if let Some(f) = self.free.get_mut(var) {
            *f = true;
        }
    }

    fn push_row(&mut self, row: &DVector<f64>, kind: Constraint, rhs: f64) {
        debug_assert_eq!(row.len(), self.n_vars, "constraint row length");
        self.rows.push(Row {
            coeffs: fit(row, self.n_vars),
            kind,
            rhs,
        });
    }

    fn solve(&self) -> LpOutcome {
        let eps = self.cfg.eps;
        let n = self.n_vars;
        let m = self.rows.len();

        // Column layout: x⁺ (and x⁻ for free vars), then one slack per inequality.
        let mut pos = Vec::with_capacity(n);
        let mut neg = Vec::with_capacity(n);
        let mut ncols = 0;
        for j in 0..n {
            pos.push(ncols);
            ncols += 1;
            if self.free[j] {
                neg.push(Some(ncols));
                ncols += 1;
            } else {
                neg.push(None);
            }
        }
        let mut slack = Vec::with_capacity(m);
        for row in &self.rows {
            if row.kind == Constraint::Equal {
                slack.push(None);
            } else {
                slack.push(Some(ncols));
                ncols += 1;
            }
        }
        let n_real = ncols;

        let mut a = DMatrix::<f64>::zeros(m, n_real);
        let mut b = vec![0.0; m];
        for (i, row) in self.rows.iter().enumerate() {
            let sign = if row.rhs < 0.0 { -1.0 } else { 1.0 };
            for j in 0..n {
                a[(i, pos[j])] = sign * row.coeffs[j];
                if let Some(q) = neg[j] {
                    a[(i, q)] = -sign * row.coeffs[j];
                }
            }
            if let Some(s) = slack[i] {
                let unit = if row.kind == Constraint::LessEqual { 1.0 } else { -1.0 };
                a[(i, s)] = sign * unit;
            }
            b[i] = sign * row.rhs;
        }

        // Rows whose slack can start in the basis; the rest need an artificial.
        let start: Vec<Option<usize>> = (0..m)
            .map(|i| slack[i].filter(|&s| a[(i, s)] > 0.0))
            .collect();
        let art_rows: Vec<usize> = (0..m).filter(|&i| start[i].is_none()).collect();
        let n_art = art_rows.len();
        let total = n_real + n_art;

        let mut t = DMatrix::<f64>::zeros(m + 1, total + 1);
        t.view_mut((0, 0), (m, n_real)).copy_from(&a);
        let mut basis = vec![0usize; m];
        for i in 0..m {
            t[(i, total)] = b[i];
            if let Some(s) = start[i] {
                basis[i] = s;
            }
        }
        for (k, &i) in art_rows.iter().enumerate() {
            t[(i, n_real + k)] = 1.0;
            basis[i] = n_real + k;
        }
        let mut tab = Tableau {
            t,
            basis,
            m,
            rhs: total,
            eps,
        };

        let mut pivots = 0;
        if n_art > 0 {
            let mut cost = vec![0.0; total];
            for c in cost.iter_mut().skip(n_real) {
                *c = -1.0;
            }
            tab.price_out(&cost);
            // Phase 1 is bounded above by 0, so only the pivot cap can stop it.
            match tab.run(total, self.cfg.max_pivots) {
                Ok(p) => pivots += p,
                Err(_) => return LpOutcome::IterationLimit,
            }
            let scale = b.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
            if tab.objective() < -eps * scale {
                debug!(rows = m, cols = total, pivots, "lp infeasible");
                return LpOutcome::Infeasible;
            }
            // Artificials still basic sit at zero; swap them for any real column.
            for i in 0..m {
                if tab.basis[i] < n_real {
                    continue;
                }
                if let Some(j) = (0..n_real).find(|&j| tab.t[(i, j)].abs() > eps) {
                    tab.pivot(i, j);
                }
            }
        }

        let dir = match self.sense {
            Sense::Maximize => 1.0,
            Sense::Minimize => -1.0,
        };
        let mut cost = vec![0.0; total];
        for j in 0..n {
            cost[pos[j]] = dir * self.objective[j];
            if let Some(q) = neg[j] {
                cost[q] = -dir * self.objective[j];
            }
        }
        tab.price_out(&cost);
        match tab.run(n_real, self.cfg.max_pivots) {
            Ok(p) => pivots += p,
            Err(Stop::Unbounded) => {
                debug!(rows = m, cols = total, pivots, "lp unbounded");
                return LpOutcome::Unbounded;
            }
            Err(Stop::Limit) => return LpOutcome::IterationLimit,
        }

        let mut y = vec![0.0; total];
        for i in 0..m {
            y[tab.basis[i]] = tab.t[(i, total)];
        }
        let x = DVector::from_fn(n, |j, _| y[pos[j]] - neg[j].map_or(0.0, |q| y[q]));
        let objective = self.objective.dot(&x);
        debug!(rows = m, cols = total, pivots, objective, "lp optimal");
        LpOutcome::Optimal(LpSolution { x, objective })
    }
}

enum Stop {
    Unbounded,
    Limit,
}

/// Tableau: constraint rows `0..m`, reduced-cost row `m`; rhs in column `rhs`.
struct Tableau {
    t: DMatrix<f64>,
    basis: Vec<usize>,
    m: usize,
    rhs: usize,
    eps: f64,
}

impl Tableau {
    fn pivot(&mut self, r: usize, c: usize) {
        let p = self.t[(r, c)];
        for j in 0..=self.rhs {
            self.t[(r, j)] /= p;
        }
        for i in 0..=self.m {
            if i == r {
                continue;
            }
            let f = self.t[(i, c)];
            if f == 0.0 {
                continue;
            }
            for j in 0..=self.rhs {
                let v = self.t[(r, j)];
                self.t[(i, j)] -= f * v;
            }
        }
        self.basis[r] = c;
    }

    /// Load reduced costs `z_j − c_j` for maximizing `cost·y` under the current basis.
    fn price_out(&mut self, cost: &[f64]) {
        for j in 0..=self.rhs {
            let c_j = if j < self.rhs { cost[j] } else { 0.0 };
            let z_j: f64 = (0..self.m)
                .map(|i| cost[self.basis[i]] * self.t[(i, j)])
                .sum();
            self.t[(self.m, j)] = z_j - c_j;
        }
    }

    #[inline]
    fn objective(&self) -> f64 {
        self.t[(self.m, self.rhs)]
    }

    /// Primal iterations with entering columns restricted to `0..allowed`.
    fn run(&mut self, allowed: usize, max_pivots: usize) -> Result<usize, Stop> {
        for pivots in 0..max_pivots {
            let Some(c) = (0..allowed).find(|&j| self.t[(self.m, j)] < -self.eps) else {
                return Ok(pivots);
            };
            let mut leave: Option<(usize, f64)> = None;
            for i in 0..self.m {
                let a = self.t[(i, c)];
                if a <= self.eps {
                    continue;
                }
                let ratio = self.t[(i, self.rhs)] / a;
                let better = match leave {
                    None => true,
                    Some((l, best)) => {
                        ratio < best - self.eps
                            || (ratio <= best + self.eps && self.basis[i] < self.basis[l])
                    }
                };
                if better {
                    leave = Some((i, ratio));
                }
            }
            let Some((r, _)) = leave else {
                return Err(Stop::Unbounded);
            };
            self.pivot(r, c);
        }
        Err(Stop::Limit)
    }
}
