//! `distances` subcommand: reachability from a source hex.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use hexreach_lib::{load_hex_map, DistanceEngine, DistanceOptions, DistanceReport};

use crate::output::{print_report, OutputFormat};

pub fn run(
    map_path: &Path,
    from: &str,
    max_distance: u32,
    options: &DistanceOptions,
    format: OutputFormat,
) -> Result<()> {
    let mut map = load_hex_map(map_path)
        .with_context(|| format!("failed to load map snapshot from {}", map_path.display()))?;

    let engine = DistanceEngine::default();
    let distances = engine
        .try_calculate(&mut map, from, max_distance, options)
        .with_context(|| format!("failed to compute distances from {from}"))?;
    info!(source = from, reached = distances.len(), "computed distances");

    let report = DistanceReport::from_distances(from, max_distance, &distances);
    print_report(&report, format)
}
