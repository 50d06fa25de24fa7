//! Toy linear-support loop over a hidden set of alpha-vectors.
//!
//! Usage:
//!   cargo run -p envelope --example linear_support -- [states] [hidden] [seed]
//!
//! Starts from the simplex corners, and at every step asks the "oracle" (the
//! hidden set) for the best plane at the candidate vertex whose optimistic
//! bound exceeds its current value the most. Stops once no gap is left.

use envelope::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let states: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let hidden_count: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(8);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let hidden = draw_hyperplanes(
        HyperplaneCfg::default(),
        states,
        hidden_count,
        ReplayToken::new(seed, 0),
    );
    let oracle = |p: &DVector<f64>| -> Hyperplane {
        hidden
            .iter()
            .max_by(|a, b| a.eval(p).total_cmp(&b.eval(p)))
            .cloned()
            .expect("non-empty hidden set")
    };

    // Corner planes first.
    let mut working: Vec<Hyperplane> = Vec::new();
    for i in 0..states {
        let corner = DVector::from_fn(states, |r, _| if r == i { 1.0 } else { 0.0 });
        let best = oracle(&corner);
        if !working.contains(&best) {
            working.push(best);
        }
    }
    let mut known = simplex_corner_vertices(&working).expect("consistent dims");

    for step in 0..32 {
        let mut candidates = Vec::new();
        for (i, h) in working.iter().enumerate() {
            let others: Vec<Hyperplane> = working
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, o)| o.clone())
                .collect();
            candidates.extend(find_vertices_naive(std::slice::from_ref(h), &others).expect("dims"));
        }
        let mut best: Option<(f64, Vertex)> = None;
        for v in candidates {
            let current = envelope_value(&working, &v.point).unwrap_or(f64::NEG_INFINITY);
            let Ok(bound) = compute_optimistic_value(&v.point, &known) else {
                continue;
            };
            let gap = bound - current;
            if gap > 1e-9 && best.as_ref().is_none_or(|(g, _)| gap > *g) {
                best = Some((gap, v));
            }
        }
        let Some((gap, v)) = best else {
            println!("step {step}: no gap left, {} planes", working.len());
            break;
        };
        let plane = oracle(&v.point);
        let value = plane.eval(&v.point);
        println!(
            "step {step}: gap {gap:.4} at {:?}, true value {value:.4}",
            v.point.as_slice()
        );
        known.push(Vertex::new(v.point.clone(), value));
        if !working.contains(&plane) {
            working.push(plane);
        }
    }
}
