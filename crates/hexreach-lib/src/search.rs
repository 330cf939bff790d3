//! Breadth-first search state shared by the layer stepper and rift flooding.

use std::collections::HashMap;

use tracing::debug;

use crate::blockers::{crosses_anomaly, is_passable, BlockerRegistry, EdgeContext};
use crate::graph::HexGraph;
use crate::hex::HexRecord;
use crate::hyperlane::{self, HyperlaneExit};
use crate::neighbors::{Neighbor, NeighborRegistry};
use crate::options::DistanceOptions;

/// Result of a distance calculation: hex label to layer distance.
///
/// Hexes missing from the map are unreachable within the search radius.
pub type DistanceMap = HashMap<String, u32>;

/// Mutable BFS state: visited distances and the frontiers being built.
#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    distances: HashMap<&'a str, u32>,
    /// Hexes expanded during the current layer.
    pub frontier: Vec<&'a HexRecord>,
    /// Hexes reached during the current layer, expanded by the next one.
    pub next: Vec<&'a HexRecord>,
    /// Rift hexes reached this layer, flooded once the frontier is done.
    pub rift_seeds: Vec<&'a HexRecord>,
    /// Distance assigned to hexes reached now.
    pub layer: u32,
}

impl<'a> SearchState<'a> {
    /// State with only `source` visited, at distance zero, queued for the
    /// first layer.
    pub fn start(source: &'a HexRecord) -> Self {
        Self {
            distances: HashMap::from([(source.label.as_str(), 0)]),
            frontier: Vec::new(),
            next: vec![source],
            rift_seeds: Vec::new(),
            layer: 0,
        }
    }

    pub fn is_visited(&self, label: &str) -> bool {
        self.distances.contains_key(label)
    }

    pub fn distance(&self, label: &str) -> Option<u32> {
        self.distances.get(label).copied()
    }

    pub fn visited_count(&self) -> usize {
        self.distances.len()
    }

    /// Mark `hex` at the current layer and queue it for the next one.
    /// Returns `false` if it was already visited.
    pub fn visit(&mut self, hex: &'a HexRecord) -> bool {
        if !self.mark(hex, self.layer) {
            return false;
        }
        self.next.push(hex);
        true
    }

    /// Record a distance without queueing the hex for expansion.
    pub fn mark(&mut self, hex: &'a HexRecord, distance: u32) -> bool {
        if self.is_visited(&hex.label) {
            return false;
        }
        self.distances.insert(hex.label.as_str(), distance);
        true
    }

    pub fn defer_rift(&mut self, hex: &'a HexRecord) {
        self.rift_seeds.push(hex);
    }

    /// Start the layer at `layer`, expanding everything queued so far.
    pub fn begin_layer(&mut self, layer: u32) {
        self.layer = layer;
        self.frontier = std::mem::take(&mut self.next);
    }

    /// Apply `adjust` to every non-zero distance.
    pub fn adjust_distances(&mut self, adjust: impl Fn(u32) -> u32) {
        for distance in self.distances.values_mut().filter(|d| **d > 0) {
            *distance = adjust(*distance);
        }
    }

    pub fn into_distances(self) -> DistanceMap {
        self.distances
            .into_iter()
            .map(|(label, distance)| (label.to_string(), distance))
            .collect()
    }
}

/// Read-only inputs of a single search.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'e, 'a> {
    pub graph: &'e HexGraph<'a>,
    pub neighbors: &'e NeighborRegistry,
    pub blockers: &'e BlockerRegistry,
    pub options: &'e DistanceOptions,
    pub source: &'a str,
}

impl<'e, 'a> SearchContext<'e, 'a> {
    /// Edges leaving `hex` according to the neighbour registry.
    pub fn neighbors_of(&self, hex: &'a HexRecord) -> Vec<Neighbor<'a>> {
        self.neighbors.neighbors(self.graph, hex, self.options)
    }

    pub fn is_passable(&self, hex: &HexRecord) -> bool {
        is_passable(hex, hex.label == self.source, self.options)
    }

    /// Whether the edge `from -> neighbor` is vetoed.
    pub fn is_blocked(&self, from: &HexRecord, neighbor: &Neighbor<'_>) -> bool {
        let ctx = EdgeContext {
            dir: neighbor.dir,
            is_source: from.label == self.source,
            from_label: &from.label,
            to_label: &neighbor.hex.label,
            kind: neighbor.kind,
        };
        self.blockers
            .is_blocked(self.graph, from, neighbor.hex, &ctx, self.options)
    }

    /// Whether a border anomaly on the crossed edge vetoes stepping off the
    /// hyperlane tile onto the landing hex. Terrain on the tile itself does
    /// not apply.
    pub fn is_exit_blocked(&self, exit: &HyperlaneExit<'_>) -> bool {
        self.options.use_border_anomalies && crosses_anomaly(exit.from, exit.hex, exit.exit_side)
    }

    /// Landing hexes reached by entering `neighbor` when it is a hyperlane
    /// tile. Empty for ordinary hexes and for edges without a side.
    pub fn hyperlane_exits(&self, neighbor: &Neighbor<'a>) -> Vec<HyperlaneExit<'a>> {
        if self.graph.matrix(neighbor.hex).is_none() {
            return Vec::new();
        }
        match neighbor.dir {
            Some(dir) => hyperlane::resolve(
                self.graph,
                neighbor.label(),
                dir.opposite(),
                self.options,
            ),
            None => {
                debug!(
                    tile = neighbor.label(),
                    kind = ?neighbor.kind,
                    "hyperlane reached without an entry side; skipping"
                );
                Vec::new()
            }
        }
    }
}
