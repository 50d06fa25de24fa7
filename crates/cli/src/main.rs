mod io;
mod provenance;

use anyhow::Result;
use clap::{Parser, Subcommand};
use envelope::sample::{draw_hyperplanes, draw_simplex_points, HyperplaneCfg, ReplayToken};
use envelope::{
    compute_optimistic_value, envelope_value, find_vertices_naive_with, simplex_corner_vertices,
    EnvelopeCfg, SvdSolver,
};
use io::VertexRecord;
use nalgebra::DVector;
use provenance::Payload;
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Envelope vertices and optimistic bounds over the probability simplex")]
struct Cmd {
    /// Optional free-form tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate envelope vertices of NEW hyperplanes against the OLD working set
    Vertices {
        /// CSV, one hyperplane per row
        #[arg(long)]
        new: String,
        /// CSV, one hyperplane per row
        #[arg(long)]
        old: String,
        /// JSON output path (a provenance sidecar is written next to it)
        #[arg(long)]
        out: String,
        /// Slack on the [0,1] coordinate test
        #[arg(long, default_value_t = 1e-9)]
        eps_feas: f64,
    },
    /// Optimistic envelope value at a point from known vertex/value pairs
    Optimistic {
        /// Query point, comma separated (e.g. 0.5,0.5)
        #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
        point: Vec<f64>,
        /// CSV, coordinates then value per row
        #[arg(long)]
        known: String,
        /// Optional JSON output path
        #[arg(long)]
        out: Option<String>,
    },
    /// Random instance: vertices of NEW against OLD, then bound a random point
    Demo {
        #[arg(long, default_value_t = 3)]
        states: usize,
        #[arg(long, default_value_t = 2)]
        new: usize,
        #[arg(long, default_value_t = 4)]
        old: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Vertices {
            new,
            old,
            out,
            eps_feas,
        } => vertices(new, old, out, eps_feas, cmd.tag),
        Action::Optimistic { point, known, out } => optimistic(point, known, out, cmd.tag),
        Action::Demo {
            states,
            new,
            old,
            seed,
        } => demo(states, new, old, seed, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn vertices(new: String, old: String, out: String, eps_feas: f64, tag: Option<String>) -> Result<()> {
    tracing::info!(new, old, out, tag = ?tag, "vertices");
    let new_planes = io::read_hyperplanes(&new)?;
    let old_planes = io::read_hyperplanes(&old)?;
    let cfg = EnvelopeCfg {
        eps_feas,
        ..EnvelopeCfg::default()
    };
    let found = find_vertices_naive_with(&new_planes, &old_planes, &SvdSolver::new(cfg.eps_rank), cfg)?;
    tracing::info!(
        new = new_planes.len(),
        old = old_planes.len(),
        accepted = found.len(),
        "vertices_done"
    );

    let records: Vec<VertexRecord> = found.iter().map(VertexRecord::from).collect();
    io::write_json(&out, &records)?;
    let payload = Payload::new(
        "vertices",
        tag,
        json!({ "new": new, "old": old, "eps_feas": eps_feas }),
    )
    .with_summary(json!({
        "new_count": new_planes.len(),
        "old_count": old_planes.len(),
        "accepted": found.len(),
    }));
    provenance::write_sidecar(&out, payload)?;
    Ok(())
}

fn optimistic(point: Vec<f64>, known: String, out: Option<String>, tag: Option<String>) -> Result<()> {
    tracing::info!(?point, known, tag = ?tag, "optimistic");
    let pairs = io::read_vertices(&known)?;
    let p = DVector::from_vec(point.clone());
    let bound = compute_optimistic_value(&p, &pairs)?;
    tracing::info!(bound, known = pairs.len(), "optimistic_done");
    println!("{bound}");

    if let Some(out) = out {
        io::write_json(&out, &json!({ "point": point, "bound": bound }))?;
        let payload = Payload::new("optimistic", tag, json!({ "point": point, "known": known }))
            .with_summary(json!({ "known_count": pairs.len(), "bound": bound }));
        provenance::write_sidecar(&out, payload)?;
    }
    Ok(())
}

fn demo(states: usize, new: usize, old: usize, seed: u64, tag: Option<String>) -> Result<()> {
    tracing::info!(states, new, old, seed, tag = ?tag, "demo");
    let tok = ReplayToken::new(seed, 0);
    let new_planes = draw_hyperplanes(HyperplaneCfg::default(), states, new, tok);
    let old_planes = draw_hyperplanes(HyperplaneCfg::default(), states, old, tok.next_index());
    let found = find_vertices_naive_with(
        &new_planes,
        &old_planes,
        &SvdSolver::default(),
        EnvelopeCfg::default(),
    )?;

    let mut all = old_planes.clone();
    all.extend(new_planes.iter().cloned());
    let mut known = simplex_corner_vertices(&all)?;
    known.extend(found.iter().cloned());

    let p = draw_simplex_points(states, 1, tok.next_index().next_index())
        .pop()
        .unwrap_or_else(|| DVector::zeros(states));
    let bound = compute_optimistic_value(&p, &known)?;
    let exact = envelope_value(&all, &p);
    tracing::info!(accepted = found.len(), bound, exact = ?exact, "demo_done");

    let summary = json!({
        "accepted": found.len(),
        "query": p.as_slice(),
        "bound": bound,
        "envelope": exact,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = provenance::header(tag.as_deref());
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
