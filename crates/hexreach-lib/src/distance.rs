//! Layered breadth-first distance calculation.
//!
//! [`DistanceEngine`] owns the neighbour and blocker registries and runs the
//! search; [`calculate_distances_from`] is a shortcut using the built-in
//! registries.
//!
//! # Example
//!
//! ```
//! use hexreach_lib::{calculate_distances_from, BaseType, DistanceOptions, HexMap, HexRecord};
//!
//! let mut map: HexMap = [
//!     HexRecord::new("a", 0, 0).with_base_type(BaseType::Empty),
//!     HexRecord::new("b", 0, 1).with_base_type(BaseType::Empty),
//! ]
//! .into_iter()
//! .collect();
//!
//! let distances = calculate_distances_from(&mut map, "a", 3, &DistanceOptions::default());
//! assert_eq!(distances["a"], 0);
//! assert_eq!(distances["b"], 1);
//! ```

use tracing::{debug, warn};

use crate::blockers::{is_rift, BlockerRegistry};
use crate::error::{Error, Result};
use crate::graph::HexGraph;
use crate::hex::{HexMap, HexRecord};
use crate::neighbors::NeighborRegistry;
use crate::options::DistanceOptions;
use crate::rift;
use crate::search::{DistanceMap, SearchContext, SearchState};

/// Number of near-miss labels offered when the source is unknown.
const MAX_SUGGESTIONS: usize = 3;

/// Distance calculator configured with explicit registries.
#[derive(Debug, Default)]
pub struct DistanceEngine {
    neighbors: NeighborRegistry,
    blockers: BlockerRegistry,
}

impl DistanceEngine {
    pub fn new(neighbors: NeighborRegistry, blockers: BlockerRegistry) -> Self {
        Self {
            neighbors,
            blockers,
        }
    }

    pub fn neighbors(&self) -> &NeighborRegistry {
        &self.neighbors
    }

    pub fn blockers(&self) -> &BlockerRegistry {
        &self.blockers
    }

    /// Distances from `source` to every hex reachable within `max_distance`.
    ///
    /// Symmetrizes the map's hyperlane matrices first. An unknown source
    /// yields an empty map; `max_distance == 0` yields the source alone.
    pub fn calculate_distances_from(
        &self,
        map: &mut HexMap,
        source: &str,
        max_distance: u32,
        options: &DistanceOptions,
    ) -> DistanceMap {
        map.symmetrize_matrices();
        let graph = HexGraph::build(map);
        match graph.get(source) {
            Some(source_hex) => self.search(&graph, source_hex, max_distance, options),
            None => {
                warn!(source, "distance source not found in map");
                DistanceMap::new()
            }
        }
    }

    /// Like [`calculate_distances_from`](Self::calculate_distances_from) but
    /// reports an unknown source as an error with label suggestions.
    pub fn try_calculate(
        &self,
        map: &mut HexMap,
        source: &str,
        max_distance: u32,
        options: &DistanceOptions,
    ) -> Result<DistanceMap> {
        map.symmetrize_matrices();
        let graph = HexGraph::build(map);
        let source_hex = graph.get(source).ok_or_else(|| Error::UnknownHex {
            label: source.to_string(),
            suggestions: graph.suggest_labels(source, MAX_SUGGESTIONS),
        })?;
        Ok(self.search(&graph, source_hex, max_distance, options))
    }

    fn search<'a>(
        &self,
        graph: &HexGraph<'a>,
        source: &'a HexRecord,
        max_distance: u32,
        options: &DistanceOptions,
    ) -> DistanceMap {
        let mut state = SearchState::start(source);

        // A rift source searches one layer further, then every distance is
        // pulled back by one. This applies at radius zero too.
        let rift_start = is_rift(source, options);
        let effective_max = if rift_start {
            max_distance.saturating_add(1)
        } else {
            max_distance
        };
        if effective_max == 0 {
            return state.into_distances();
        }

        let ctx = SearchContext {
            graph,
            neighbors: &self.neighbors,
            blockers: &self.blockers,
            options,
            source: &source.label,
        };

        for layer in 1..=effective_max {
            state.begin_layer(layer);
            if state.frontier.is_empty() {
                break;
            }
            step_layer(&ctx, &mut state);
        }

        extend_one_step(&ctx, &mut state, effective_max);

        if rift_start {
            state.adjust_distances(|distance| distance.saturating_sub(1).max(1));
        }

        debug!(
            source = %source.label,
            max_distance,
            effective_max,
            rift_start,
            reached = state.visited_count(),
            "distance search complete"
        );
        state.into_distances()
    }
}

/// Distances from `source` using the built-in neighbour providers and
/// movement blockers.
pub fn calculate_distances_from(
    map: &mut HexMap,
    source: &str,
    max_distance: u32,
    options: &DistanceOptions,
) -> DistanceMap {
    DistanceEngine::default().calculate_distances_from(map, source, max_distance, options)
}

/// Expand every frontier hex by one edge, then flood the rifts touched.
pub fn step_layer<'a>(ctx: &SearchContext<'_, 'a>, state: &mut SearchState<'a>) {
    let frontier = std::mem::take(&mut state.frontier);

    for &current in &frontier {
        for neighbor in ctx.neighbors_of(current) {
            let next = neighbor.hex;
            if state.is_visited(&next.label) {
                continue;
            }
            if is_rift(next, ctx.options) && ctx.is_passable(next) {
                state.defer_rift(next);
                continue;
            }
            if ctx.is_blocked(current, &neighbor) {
                continue;
            }

            let rift_bridge = is_rift(current, ctx.options) && is_rift(next, ctx.options);
            if ctx.is_passable(next) || rift_bridge {
                state.visit(next);
                continue;
            }

            for exit in ctx.hyperlane_exits(&neighbor) {
                if state.is_visited(exit.label()) || ctx.is_exit_blocked(&exit) {
                    continue;
                }
                if is_rift(exit.hex, ctx.options) {
                    state.defer_rift(exit.hex);
                } else {
                    state.visit(exit.hex);
                }
            }
        }
    }

    for seed in std::mem::take(&mut state.rift_seeds) {
        rift::flood(ctx, state, seed);
    }
}

/// Reach one hex past the search radius: every hex at exactly
/// `edge_distance` marks its open neighbours at that same distance.
pub fn extend_one_step<'a>(
    ctx: &SearchContext<'_, 'a>,
    state: &mut SearchState<'a>,
    edge_distance: u32,
) {
    let rim: Vec<&'a HexRecord> = ctx
        .graph
        .hexes()
        .filter(|hex| state.distance(&hex.label) == Some(edge_distance))
        .collect();

    for hex in rim {
        for neighbor in ctx.neighbors_of(hex) {
            if state.is_visited(neighbor.label())
                || !ctx.is_passable(neighbor.hex)
                || ctx.is_blocked(hex, &neighbor)
            {
                continue;
            }
            state.mark(neighbor.hex, edge_distance);
        }
    }
}
