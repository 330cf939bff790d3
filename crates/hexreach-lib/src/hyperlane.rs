//! Routing through hyperlane tiles.
//!
//! A hyperlane tile has no terrain of its own; its matrix wires hex sides
//! together. Walking a chain of such tiles yields the real hexes a traveller
//! can land on. Portals (set diagonal cells) bounce the traveller back out of
//! the same side or redirect them to another portal on the same tile.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::blockers::{crosses_anomaly, is_passable};
use crate::graph::HexGraph;
use crate::hex::{Direction, HexRecord};
use crate::options::DistanceOptions;

/// Landing hex reached by routing through one or more hyperlane tiles.
#[derive(Debug, Clone, Copy)]
pub struct HyperlaneExit<'a> {
    /// The landing hex.
    pub hex: &'a HexRecord,
    /// Hyperlane tile the traveller leaves to reach `hex`.
    pub from: &'a HexRecord,
    /// Side of `from` that is crossed.
    pub exit_side: Direction,
}

impl<'a> HyperlaneExit<'a> {
    pub fn label(&self) -> &'a str {
        self.hex.label.as_str()
    }

    pub fn from_label(&self) -> &'a str {
        self.from.label.as_str()
    }

    /// Side of the landing hex the traveller enters through.
    pub fn entry_side(&self) -> Direction {
        self.exit_side.opposite()
    }
}

/// Resolve the terminal hexes reachable by entering the hyperlane tile
/// `start` through its side `entry`.
///
/// The start tile is never reported. Each `(tile, entry side)` pair is
/// expanded at most once, so authored portal cycles terminate.
pub fn resolve<'a>(
    graph: &HexGraph<'a>,
    start: &str,
    entry: Direction,
    options: &DistanceOptions,
) -> Vec<HyperlaneExit<'a>> {
    let Some(start_hex) = graph.get(start) else {
        return Vec::new();
    };

    let mut exits = Vec::new();
    let mut seen: HashSet<(&'a str, Direction)> = HashSet::new();
    let mut worklist: VecDeque<(&'a HexRecord, Direction)> = VecDeque::new();
    seen.insert((start_hex.label.as_str(), entry));
    worklist.push_back((start_hex, entry));

    while let Some((tile, entry)) = worklist.pop_front() {
        let Some(matrix) = graph.matrix(tile) else {
            continue;
        };

        let loops = matrix.loop_sides();
        let mut sides: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&side| side != entry && matrix.connects(entry, side))
            .collect();
        if sides.is_empty() && matrix.connects(entry, entry) {
            sides.push(entry);
        }

        if loops.contains(&entry) {
            for &portal in loops.iter().filter(|&&side| side != entry) {
                if seen.insert((tile.label.as_str(), portal)) {
                    worklist.push_back((tile, portal));
                }
            }
        }

        for side in sides {
            let Some(next) = graph.neighbor_across(tile, side) else {
                continue;
            };
            if options.use_border_anomalies && crosses_anomaly(tile, next, side) {
                continue;
            }
            if graph.matrix(next).is_some() {
                let next_entry = side.opposite();
                if seen.insert((next.label.as_str(), next_entry)) {
                    worklist.push_back((next, next_entry));
                }
            } else if is_passable(next, false, options) {
                exits.push(HyperlaneExit {
                    hex: next,
                    from: tile,
                    exit_side: side,
                });
            }
        }
    }

    trace!(
        start,
        entry = %entry,
        expanded = seen.len(),
        exits = exits.len(),
        "resolved hyperlane"
    );
    exits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{BaseType, BorderAnomaly, HexMap, HyperlaneMatrix};

    fn system(label: &str, q: i32, r: i32) -> HexRecord {
        HexRecord::new(label, q, r).with_base_type(BaseType::Empty)
    }

    fn lane(label: &str, q: i32, r: i32, matrix: HyperlaneMatrix) -> HexRecord {
        HexRecord::new(label, q, r).with_matrix(matrix)
    }

    fn straight() -> HyperlaneMatrix {
        HyperlaneMatrix::empty()
            .with_link(Direction::North, Direction::South)
            .with_link(Direction::South, Direction::North)
    }

    fn exit_labels(exits: &[HyperlaneExit<'_>]) -> Vec<(String, String, Direction)> {
        exits
            .iter()
            .map(|exit| {
                (
                    exit.label().to_string(),
                    exit.from_label().to_string(),
                    exit.exit_side,
                )
            })
            .collect()
    }

    #[test]
    fn straight_lane_reaches_far_side() {
        let map: HexMap = [
            system("a", 0, 0),
            lane("h", 0, 1, straight()),
            system("d", 0, 2),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        let exits = resolve(&graph, "h", Direction::North, &DistanceOptions::default());
        assert_eq!(
            exit_labels(&exits),
            vec![("d".to_string(), "h".to_string(), Direction::South)]
        );
        assert_eq!(exits[0].entry_side(), Direction::North);
    }

    #[test]
    fn chains_through_consecutive_lanes() {
        let map: HexMap = [
            system("a", 0, 0),
            lane("h1", 0, 1, straight()),
            lane("h2", 0, 2, straight()),
            system("d", 0, 3),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        let exits = resolve(&graph, "h1", Direction::North, &DistanceOptions::default());
        assert_eq!(
            exit_labels(&exits),
            vec![("d".to_string(), "h2".to_string(), Direction::South)]
        );
    }

    #[test]
    fn missing_or_impassable_far_side_is_dropped() {
        // Nothing north of the lane, a void tile south of it.
        let map: HexMap = [
            lane("h", 0, 1, straight()),
            HexRecord::new("void", 0, 2).with_base_type(BaseType::Void),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        assert!(resolve(&graph, "h", Direction::North, &DistanceOptions::default()).is_empty());
        assert!(resolve(&graph, "h", Direction::South, &DistanceOptions::default()).is_empty());
    }

    #[test]
    fn lone_portal_bounces_back() {
        let map: HexMap = [
            system("a", 0, 0),
            lane("p", 0, 1, HyperlaneMatrix::empty().with_portal(Direction::North)),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        let exits = resolve(&graph, "p", Direction::North, &DistanceOptions::default());
        assert_eq!(
            exit_labels(&exits),
            vec![("a".to_string(), "p".to_string(), Direction::North)]
        );
    }

    #[test]
    fn portals_redirect_to_sibling_portal() {
        let map: HexMap = [
            system("a", 1, 0),
            lane(
                "p",
                0,
                0,
                HyperlaneMatrix::empty()
                    .with_portal(Direction::SouthEast)
                    .with_portal(Direction::NorthWest),
            ),
            system("b", -1, 0),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        let exits = resolve(&graph, "p", Direction::SouthEast, &DistanceOptions::default());
        let labels: Vec<_> = exits.iter().map(HyperlaneExit::label).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn portal_cycles_terminate() {
        let map: HexMap = [
            system("top", 0, -1),
            lane(
                "h1",
                0,
                0,
                straight().with_portal(Direction::South),
            ),
            lane("h2", 0, 1, HyperlaneMatrix::empty().with_portal(Direction::North)),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        let exits = resolve(&graph, "h1", Direction::North, &DistanceOptions::default());
        assert_eq!(
            exit_labels(&exits),
            vec![("top".to_string(), "h1".to_string(), Direction::North)]
        );
    }

    #[test]
    fn spatial_tear_on_exit_edge_stops_the_lane() {
        let map: HexMap = [
            system("a", 0, 0),
            lane("h", 0, 1, straight()),
            system("d", 0, 2).with_border_anomaly(Direction::North, BorderAnomaly::SpatialTear),
        ]
        .into_iter()
        .collect();
        let graph = HexGraph::build(&map);

        assert!(resolve(&graph, "h", Direction::North, &DistanceOptions::default()).is_empty());

        let exits = resolve(&graph, "h", Direction::North, &DistanceOptions::permissive());
        assert_eq!(exits.len(), 1);
    }
}
