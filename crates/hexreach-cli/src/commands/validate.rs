//! `validate` subcommand: load a snapshot and summarise it.

use std::path::Path;

use anyhow::{Context, Result};

use hexreach_lib::load_hex_map;

pub fn run(map_path: &Path) -> Result<()> {
    let map = load_hex_map(map_path)
        .with_context(|| format!("failed to load map snapshot from {}", map_path.display()))?;

    let hyperlanes = map.iter().filter(|hex| hex.matrix.is_some()).count();
    println!(
        "Map snapshot OK: {} hexes ({} hyperlane tiles)",
        map.len(),
        hyperlanes
    );
    Ok(())
}
