//! CSV inputs (via polars) and JSON outputs for the CLI.
//!
//! CSV conventions: no header, one record per line, all cells numeric.
//! - Hyperplane files: one coefficient per state.
//! - Known-vertex files: point coordinates followed by the value in the last column.

use anyhow::{bail, Context, Result};
use envelope::{Hyperplane, Vertex};
use nalgebra::DVector;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

/// Output record for one vertex candidate.
#[derive(Debug, Serialize)]
pub struct VertexRecord {
    pub point: Vec<f64>,
    pub value: f64,
}

impl From<&Vertex> for VertexRecord {
    fn from(v: &Vertex) -> Self {
        Self {
            point: v.point.iter().copied().collect(),
            value: v.value,
        }
    }
}

/// Read a headerless numeric CSV into row-major `f64` records.
pub fn read_rows(path: &str) -> Result<Vec<Vec<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {path}"))?
        .collect()
        .with_context(|| format!("reading {path}"))?;
    tracing::debug!(path, rows = df.height(), cols = df.width(), "csv_shape");
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for series in df.get_columns() {
        let floats = series
            .cast(&DataType::Float64)
            .with_context(|| format!("{path}: non-numeric column {}", series.name()))?;
        for (row, cell) in rows.iter_mut().zip(floats.f64()?.into_iter()) {
            let cell = cell.with_context(|| format!("{path}: empty cell in column {}", series.name()))?;
            row.push(cell);
        }
    }
    Ok(rows)
}

pub fn read_hyperplanes(path: &str) -> Result<Vec<Hyperplane>> {
    Ok(read_rows(path)?.into_iter().map(Hyperplane::from).collect())
}

pub fn read_vertices(path: &str) -> Result<Vec<Vertex>> {
    read_rows(path)?
        .into_iter()
        .map(|mut row| {
            let Some(value) = row.pop() else {
                bail!("{path}: empty record");
            };
            if row.is_empty() {
                bail!("{path}: record needs at least one coordinate before the value");
            }
            Ok(Vertex::new(DVector::from_vec(row), value))
        })
        .collect()
}

/// Pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let out_path = Path::new(path);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {path}"))?;
    Ok(())
}
