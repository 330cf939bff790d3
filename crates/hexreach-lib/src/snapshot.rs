//! JSON map snapshots.
//!
//! A snapshot is `{ "hexes": [ ... ] }` where each entry is a
//! [`HexRecord`] in camelCase. Structural problems the engine would only
//! tolerate (duplicate labels, non-6x6 matrices, side keys outside `0..6`)
//! are rejected here so front-ends can report them.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::hex::{HexMap, HexRecord, SIDE_COUNT};

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    hexes: Vec<HexRecord>,
}

/// Load and validate a snapshot file.
pub fn load_hex_map(path: &Path) -> Result<HexMap> {
    if !path.exists() {
        return Err(Error::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let map = HexMap::from_json_str(&text)?;
    debug!(path = %path.display(), hexes = map.len(), "loaded map snapshot");
    Ok(map)
}

impl HexMap {
    /// Parse and validate a snapshot document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: SnapshotDocument = serde_json::from_str(text)?;
        validate(&document.hexes)?;
        Ok(document.hexes.into_iter().collect())
    }

    /// Serialize the map as a snapshot document.
    pub fn to_json_string(&self) -> Result<String> {
        let document = SnapshotDocument {
            hexes: self.iter().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

fn validate(hexes: &[HexRecord]) -> Result<()> {
    let mut labels = HashSet::with_capacity(hexes.len());
    for hex in hexes {
        if !labels.insert(hex.label.as_str()) {
            return Err(Error::DuplicateLabel {
                label: hex.label.clone(),
            });
        }
        if let Some(matrix) = &hex.matrix {
            if !matrix.is_well_formed() {
                return Err(Error::MalformedMatrix {
                    label: hex.label.clone(),
                    rows: matrix.rows().len(),
                });
            }
        }
        check_sides(hex, "adjacencyOverrides", hex.adjacency_overrides.keys())?;
        check_sides(hex, "borderAnomalies", hex.border_anomalies.keys())?;
    }
    Ok(())
}

fn check_sides<'s>(
    hex: &HexRecord,
    field: &'static str,
    sides: impl Iterator<Item = &'s u8>,
) -> Result<()> {
    for &side in sides {
        if side as usize >= SIDE_COUNT {
            return Err(Error::InvalidSide {
                label: hex.label.clone(),
                field,
                side,
            });
        }
    }
    Ok(())
}
