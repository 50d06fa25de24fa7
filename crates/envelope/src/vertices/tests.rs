use super::*;
use crate::error::EnvelopeError;
use crate::sample::{draw_hyperplanes, HyperplaneCfg, ReplayToken};
use crate::subsets::binomial;
use crate::types::envelope_value;
use nalgebra::dvector;
use proptest::prelude::*;
use std::cell::Cell;

fn hp(c: &[f64]) -> Hyperplane {
    Hyperplane::from_slice(c)
}

fn close(v: &Vertex, point: &DVector<f64>, value: f64) -> bool {
    (&v.point - point).norm() < 1e-9 && (v.value - value).abs() < 1e-9
}

#[test]
fn empty_context_yields_nothing() {
    let new = vec![hp(&[3.0, 1.0]), hp(&[0.0, 2.0])];
    assert!(find_vertices_naive(&new, &[]).unwrap().is_empty());
}

#[test]
fn two_states_crossing_point() {
    // 3x + (1-x) = x + 2(1-x)  →  x = 1/3, value 5/3.
    let new = vec![hp(&[3.0, 1.0])];
    let old = vec![hp(&[1.0, 2.0])];
    let verts = find_vertices_naive(&new, &old).unwrap();
    assert_eq!(verts.len(), 1);
    assert!(close(&verts[0], &dvector![1.0 / 3.0, 2.0 / 3.0], 5.0 / 3.0));
    assert!((verts[0].point.sum() - 1.0).abs() < 1e-12);
}

#[test]
fn two_states_one_vertex_per_old_plane() {
    let new = vec![hp(&[3.0, 1.0])];
    let old = vec![hp(&[1.0, 2.0]), hp(&[0.0, 3.0])];
    let verts = find_vertices_naive(&new, &old).unwrap();
    assert_eq!(verts.len(), 2);
    assert!(close(&verts[0], &dvector![1.0 / 3.0, 2.0 / 3.0], 5.0 / 3.0));
    assert!(close(&verts[1], &dvector![0.4, 0.6], 1.8));
}

#[test]
fn three_states_mix_planes_and_facets_without_dedup() {
    let new = vec![hp(&[1.0, 2.0, 3.0])];
    let old = vec![hp(&[3.0, 2.0, 1.0])];
    let verts = find_vertices_naive(&new, &old).unwrap();
    // {plane, x0=0}, {plane, x1=0}, {plane, x2=0}; the first and last meet at e1.
    assert_eq!(verts.len(), 3);
    assert!(close(&verts[0], &dvector![0.0, 1.0, 0.0], 2.0));
    assert!(close(&verts[1], &dvector![0.5, 0.0, 0.5], 2.0));
    assert!(close(&verts[2], &dvector![0.0, 1.0, 0.0], 2.0));
    for v in &verts {
        assert!((v.point.sum() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn pinned_coordinates_are_exact_zeros() {
    let new = vec![hp(&[1.0, 2.0, 3.0])];
    let old = vec![hp(&[3.0, 2.0, 1.0])];
    let verts = find_vertices_naive(&new, &old).unwrap();
    assert_eq!(verts[0].point[0], 0.0);
    assert_eq!(verts[1].point[1], 0.0);
    assert_eq!(verts[2].point[2], 0.0);
}

#[test]
fn single_state_returns_the_only_point() {
    let verts = find_vertices_naive(&[hp(&[2.0])], &[hp(&[1.0])]).unwrap();
    assert_eq!(verts.len(), 1);
    assert!(close(&verts[0], &dvector![1.0], 2.0));
}

#[test]
fn crossing_outside_simplex_is_dropped() {
    // x + 3 = 2 - x at x = -0.5, outside [0,1].
    let verts = find_vertices_naive(&[hp(&[4.0, 3.0])], &[hp(&[1.0, 2.0])]).unwrap();
    assert!(verts.is_empty());
}

#[test]
fn mixed_dimensions_are_rejected() {
    let err = find_vertices_naive(&[hp(&[1.0, 2.0, 3.0])], &[hp(&[1.0, 2.0])]).unwrap_err();
    assert_eq!(
        err,
        EnvelopeError::DimensionMismatch {
            expected: 2,
            found: 3
        }
    );
}

struct NanSolver;

impl LinearSolver for NanSolver {
    fn solve(&self, a: &DMatrix<f64>, _b: &DVector<f64>) -> DVector<f64> {
        DVector::from_element(a.ncols(), f64::NAN)
    }
}

#[test]
fn non_finite_solutions_are_filtered() {
    let verts = find_vertices_naive_with(
        &[hp(&[1.0, 2.0, 3.0])],
        &[hp(&[3.0, 2.0, 1.0])],
        &NanSolver,
        EnvelopeCfg::default(),
    )
    .unwrap();
    assert!(verts.is_empty());
}

/// Delegates to [`SvdSolver`] and counts systems; `second_row_zero` counts
/// systems whose row 1 starts with `0`.
#[derive(Default)]
struct CountingSolver {
    inner: SvdSolver,
    calls: Cell<usize>,
    second_row_zero: Cell<usize>,
}

impl LinearSolver for CountingSolver {
    fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> DVector<f64> {
        self.calls.set(self.calls.get() + 1);
        if a[(1, 0)] == 0.0 {
            self.second_row_zero.set(self.second_row_zero.get() + 1);
        }
        self.inner.solve(a, b)
    }
}

#[test]
fn walk_stops_only_when_no_old_plane_is_left() {
    // S=3, |old|=2: 2-subsets of [0,5). Everything up to {1,4} is solved; the
    // facets-only {2,3}, {2,4}, {3,4} are skipped.
    let new = vec![hp(&[1.0, 2.0, 0.5])];
    let old = vec![hp(&[2.0, 1.0, 0.0]), hp(&[0.0, 0.0, 3.0])];
    let solver = CountingSolver::default();
    let verts = find_vertices_naive_with(&new, &old, &solver, EnvelopeCfg::default()).unwrap();
    assert_eq!(solver.calls.get(), binomial(5, 2) - 3);
    // Old plane 0 restricted to any active set has a nonzero first entry; old
    // plane 1 has a zero there. So this counts {1,2}, {1,3} and {1,4}.
    assert_eq!(solver.second_row_zero.get(), 3);

    // {0,2} and {1,4} leave the box.
    assert_eq!(verts.len(), 5);
    assert!(close(&verts[0], &dvector![7.0 / 17.0, 4.0 / 17.0, 6.0 / 17.0], 18.0 / 17.0));
    assert!(close(&verts[1], &dvector![1.0 / 3.0, 0.0, 2.0 / 3.0], 2.0 / 3.0));
    assert!(close(&verts[2], &dvector![0.5, 0.5, 0.0], 1.5));
    assert!(close(&verts[3], &dvector![0.0, 5.0 / 9.0, 4.0 / 9.0], 4.0 / 3.0));
    assert!(close(&verts[4], &dvector![5.0 / 7.0, 0.0, 2.0 / 7.0], 6.0 / 7.0));
}

#[test]
fn walk_restarts_for_every_new_plane() {
    let new = vec![hp(&[1.0, 2.0, 0.5]), hp(&[0.5, 1.0, 2.0])];
    let old = vec![hp(&[2.0, 1.0, 0.0]), hp(&[0.0, 0.0, 3.0])];
    let solver = CountingSolver::default();
    find_vertices_naive_with(&new, &old, &solver, EnvelopeCfg::default()).unwrap();
    assert_eq!(solver.calls.get(), 2 * 7);
}

/// Returns the same answer for every system.
struct FixedSolver(DVector<f64>);

impl LinearSolver for FixedSolver {
    fn solve(&self, _a: &DMatrix<f64>, _b: &DVector<f64>) -> DVector<f64> {
        self.0.clone()
    }
}

#[test]
fn clamping_keeps_box_but_sum_may_drift_by_eps() {
    let cfg = EnvelopeCfg::default();
    let eps = cfg.eps_feas;
    let new = [hp(&[3.0, 1.0])];
    let old = [hp(&[1.0, 2.0])];

    let nudged = FixedSolver(dvector![1.0 + 0.5 * eps, 0.5 * eps, 2.0]);
    let verts = find_vertices_naive_with(&new, &old, &nudged, cfg).unwrap();
    assert_eq!(verts.len(), 1);
    assert_eq!(verts[0].point, dvector![1.0, 0.5 * eps]);
    let drift = (verts[0].point.sum() - 1.0).abs();
    assert!(drift > 0.0 && drift <= 2.0 * eps);

    let outside = FixedSolver(dvector![1.0 + 2.0 * eps, -eps, 2.0]);
    assert!(find_vertices_naive_with(&new, &old, &outside, cfg).unwrap().is_empty());
}

#[test]
fn repeated_calls_agree() {
    let tok = ReplayToken::new(11, 0);
    let new = draw_hyperplanes(HyperplaneCfg::default(), 4, 3, tok);
    let old = draw_hyperplanes(HyperplaneCfg::default(), 4, 3, tok.next_index());
    let a = find_vertices_naive(&new, &old).unwrap();
    let b = find_vertices_naive(&new, &old).unwrap();
    assert_eq!(a, b);
}

#[test]
fn two_state_vertices_lie_on_the_envelope_of_the_pair() {
    // With S=2 the only candidate per old plane is the crossing, where both planes tie.
    let tok = ReplayToken::new(5, 0);
    let new = draw_hyperplanes(HyperplaneCfg::default(), 2, 4, tok);
    let old = draw_hyperplanes(HyperplaneCfg::default(), 2, 1, tok.next_index());
    for h in &new {
        let pair = [h.clone(), old[0].clone()];
        for v in find_vertices_naive(std::slice::from_ref(h), &old).unwrap() {
            let env = envelope_value(&pair, &v.point).unwrap();
            assert!((env - v.value).abs() < 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn accepted_points_stay_in_unit_box(
        s in 2usize..5,
        n_new in 1usize..3,
        n_old in 1usize..4,
        seed in any::<u64>(),
    ) {
        let tok = ReplayToken::new(seed, 0);
        let new = draw_hyperplanes(HyperplaneCfg::default(), s, n_new, tok);
        let old = draw_hyperplanes(HyperplaneCfg::default(), s, n_old, tok.next_index());
        let verts = find_vertices_naive(&new, &old).unwrap();
        for v in &verts {
            prop_assert_eq!(v.point.len(), s);
            prop_assert!(v.point.iter().all(|&c| (0.0..=1.0).contains(&c)));
            prop_assert!(v.value.is_finite());
        }
    }
}
