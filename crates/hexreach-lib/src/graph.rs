use std::collections::HashMap;

use tracing::warn;

use crate::hex::{Direction, HexMap, HexRecord, HyperlaneMatrix};

/// Minimum Jaro-Winkler similarity for a label to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Read-only view over a [`HexMap`] with the lookup indices the search needs.
///
/// Built once per distance calculation so coordinate lookups and wormhole
/// partner discovery are hash lookups instead of scans over every hex.
#[derive(Debug, Clone)]
pub struct HexGraph<'a> {
    hexes: Vec<&'a HexRecord>,
    by_label: HashMap<&'a str, &'a HexRecord>,
    by_coord: HashMap<(i32, i32), &'a HexRecord>,
    by_wormhole: HashMap<&'a str, Vec<&'a HexRecord>>,
    overrides: HashMap<&'a str, Vec<(Direction, &'a HexRecord)>>,
    incoming_two_way: HashMap<&'a str, Vec<&'a HexRecord>>,
    incoming_overrides: HashMap<&'a str, Vec<(&'a HexRecord, Direction)>>,
    matrices: HashMap<&'a str, &'a HyperlaneMatrix>,
}

impl<'a> HexGraph<'a> {
    /// Index every record of `map`.
    pub fn build(map: &'a HexMap) -> Self {
        let mut graph = HexGraph {
            hexes: Vec::with_capacity(map.len()),
            by_label: HashMap::with_capacity(map.len()),
            by_coord: HashMap::with_capacity(map.len()),
            by_wormhole: HashMap::new(),
            overrides: HashMap::new(),
            incoming_two_way: HashMap::new(),
            incoming_overrides: HashMap::new(),
            matrices: HashMap::new(),
        };

        for hex in map.iter() {
            graph.hexes.push(hex);
            graph.by_label.insert(hex.label.as_str(), hex);
            // First record in map order owns a contested coordinate.
            graph.by_coord.entry(hex.coord()).or_insert(hex);
            for kind in &hex.wormholes {
                graph
                    .by_wormhole
                    .entry(kind.as_str())
                    .or_default()
                    .push(hex);
            }
            if let Some(matrix) = hex.matrix.as_ref() {
                debug_assert!(
                    matrix.is_well_formed(),
                    "hex {} has a malformed hyperlane matrix",
                    hex.label
                );
                if !matrix.is_well_formed() {
                    warn!(label = %hex.label, "skipping malformed hyperlane matrix");
                } else if !matrix.is_trivial() {
                    graph.matrices.insert(hex.label.as_str(), matrix);
                }
            }
            for &side in hex.border_anomalies.keys() {
                check_side(hex, "borderAnomalies", side);
            }
        }

        // Link indices need every label registered first.
        for hex in map.iter() {
            for (target, link) in &hex.custom_adjacents {
                if link.two_way && graph.by_label.contains_key(target.as_str()) {
                    graph
                        .incoming_two_way
                        .entry(target.as_str())
                        .or_default()
                        .push(hex);
                }
            }
            for (&side, target) in &hex.adjacency_overrides {
                let Some(side) = check_side(hex, "adjacencyOverrides", side) else {
                    continue;
                };
                let Some(&target_hex) = graph.by_label.get(target.as_str()) else {
                    continue;
                };
                graph
                    .overrides
                    .entry(hex.label.as_str())
                    .or_default()
                    .push((side, target_hex));
                graph
                    .incoming_overrides
                    .entry(target_hex.label.as_str())
                    .or_default()
                    .push((hex, side));
            }
        }

        graph
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Records in map order.
    pub fn hexes(&self) -> impl Iterator<Item = &'a HexRecord> + '_ {
        self.hexes.iter().copied()
    }

    pub fn get(&self, label: &str) -> Option<&'a HexRecord> {
        self.by_label.get(label).copied()
    }

    /// Hex at axial coordinate `(q, r)`.
    pub fn at(&self, q: i32, r: i32) -> Option<&'a HexRecord> {
        self.by_coord.get(&(q, r)).copied()
    }

    /// Hex sharing the edge on `side` of `hex`.
    pub fn neighbor_across(&self, hex: &HexRecord, side: Direction) -> Option<&'a HexRecord> {
        let (dq, dr) = side.offset();
        self.at(hex.q + dq, hex.r + dr)
    }

    /// Every hex carrying the wormhole type `kind`, in map order.
    pub fn wormhole_partners(&self, kind: &str) -> &[&'a HexRecord] {
        self.by_wormhole.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Valid adjacency overrides authored on the hex labelled `label`.
    pub fn overrides(&self, label: &str) -> &[(Direction, &'a HexRecord)] {
        self.overrides.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Hexes recording a two-way custom link that targets `label`.
    pub fn incoming_two_way_links(&self, label: &str) -> &[&'a HexRecord] {
        self.incoming_two_way
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hexes whose adjacency override on the given side targets `label`.
    pub fn incoming_overrides(&self, label: &str) -> &[(&'a HexRecord, Direction)] {
        self.incoming_overrides
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hyperlane matrix of `hex` when it is well-formed and has any connection.
    pub fn matrix(&self, hex: &HexRecord) -> Option<&'a HyperlaneMatrix> {
        self.matrices.get(hex.label.as_str()).copied()
    }

    /// Labels similar to `label`, best match first.
    pub fn suggest_labels(&self, label: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .hexes
            .iter()
            .map(|hex| (strsim::jaro_winkler(label, &hex.label), hex.label.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn check_side(hex: &HexRecord, field: &'static str, side: u8) -> Option<Direction> {
    let direction = Direction::from_index(side as usize);
    debug_assert!(
        direction.is_some(),
        "hex {} has out-of-range side {side} in {field}",
        hex.label
    );
    if direction.is_none() {
        warn!(label = %hex.label, side, field, "ignoring out-of-range side index");
    }
    direction
}
