//! Gravity rift flooding.
//!
//! A rift cluster is entered as a whole: every connected rift hex joins the
//! layer that first touched the cluster, and so does every hex one step
//! beyond it.

use tracing::debug;

use crate::blockers::is_rift;
use crate::hex::HexRecord;
use crate::search::{SearchContext, SearchState};

/// Flood the rift cluster containing `seed` into the current layer.
///
/// Cluster members and the hexes bordering the cluster are marked at
/// `state.layer` and queued for the next layer. Uses an explicit stack, so
/// cluster size is not bounded by recursion depth.
pub fn flood<'a>(
    ctx: &SearchContext<'_, 'a>,
    state: &mut SearchState<'a>,
    seed: &'a HexRecord,
) {
    if !state.visit(seed) {
        return;
    }

    let mut stack = vec![seed];
    let mut members = 1usize;
    let mut fringe = 0usize;

    while let Some(member) = stack.pop() {
        for neighbor in ctx.neighbors_of(member) {
            let next = neighbor.hex;
            if state.is_visited(&next.label) {
                continue;
            }
            if ctx.is_blocked(member, &neighbor) {
                continue;
            }

            if ctx.is_passable(next) {
                state.visit(next);
                if is_rift(next, ctx.options) {
                    members += 1;
                    stack.push(next);
                } else {
                    fringe += 1;
                }
                continue;
            }

            for exit in ctx.hyperlane_exits(&neighbor) {
                if state.is_visited(exit.label()) || ctx.is_exit_blocked(&exit) {
                    continue;
                }
                state.visit(exit.hex);
                if is_rift(exit.hex, ctx.options) {
                    members += 1;
                    stack.push(exit.hex);
                } else {
                    fringe += 1;
                }
            }
        }
    }

    debug!(
        seed = %seed.label,
        layer = state.layer,
        members,
        fringe,
        "flooded rift cluster"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockers::BlockerRegistry;
    use crate::graph::HexGraph;
    use crate::hex::{BaseType, Direction, Effect, HexMap, HyperlaneMatrix};
    use crate::neighbors::NeighborRegistry;
    use crate::options::DistanceOptions;

    fn rift(label: &str, q: i32, r: i32) -> HexRecord {
        HexRecord::new(label, q, r)
            .with_base_type(BaseType::Empty)
            .with_effect(Effect::Rift)
    }

    fn system(label: &str, q: i32, r: i32) -> HexRecord {
        HexRecord::new(label, q, r).with_base_type(BaseType::Empty)
    }

    fn flood_from(map: &HexMap, seed: &str, layer: u32) -> Vec<(String, u32)> {
        let graph = HexGraph::build(map);
        let neighbors = NeighborRegistry::default();
        let blockers = BlockerRegistry::default();
        let options = DistanceOptions::default();
        let ctx = SearchContext {
            graph: &graph,
            neighbors: &neighbors,
            blockers: &blockers,
            options: &options,
            source: "none",
        };
        let source = HexRecord::new("none", 100, 100);
        let mut state = SearchState::start(&source);
        state.begin_layer(layer);

        flood(&ctx, &mut state, graph.get(seed).expect("seed exists"));

        let mut reached: Vec<(String, u32)> = state
            .into_distances()
            .into_iter()
            .filter(|(label, _)| label != "none")
            .collect();
        reached.sort();
        reached
    }

    #[test]
    fn whole_cluster_and_fringe_share_the_layer() {
        let map: HexMap = [
            rift("r1", 0, 1),
            rift("r2", 0, 2),
            rift("r3", 0, 3),
            system("f", 0, 4),
            system("g", 0, 5),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            flood_from(&map, "r1", 2),
            vec![
                ("f".to_string(), 2),
                ("r1".to_string(), 2),
                ("r2".to_string(), 2),
                ("r3".to_string(), 2),
            ]
        );
    }

    #[test]
    fn fringe_respects_blockers() {
        let map: HexMap = [
            rift("r1", 0, 1),
            HexRecord::new("v", 0, 2).with_base_type(BaseType::Void),
            system("torn", 1, 1).with_border_anomaly(
                Direction::NorthWest,
                crate::hex::BorderAnomaly::SpatialTear,
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(flood_from(&map, "r1", 1), vec![("r1".to_string(), 1)]);
    }

    #[test]
    fn hyperlanes_extend_the_fringe() {
        let lane = HyperlaneMatrix::empty()
            .with_link(Direction::North, Direction::South)
            .with_link(Direction::South, Direction::North);
        let map: HexMap = [
            rift("r1", 0, 0),
            HexRecord::new("h", 0, 1).with_matrix(lane),
            rift("r2", 0, 2),
            system("far", 0, 3),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            flood_from(&map, "r1", 1),
            vec![
                ("far".to_string(), 1),
                ("r1".to_string(), 1),
                ("r2".to_string(), 1),
            ]
        );
    }

    #[test]
    fn large_cluster_does_not_recurse() {
        let map: HexMap = (0..5_000).map(|r| rift(&format!("r{r}"), 0, r)).collect();
        let reached = flood_from(&map, "r0", 1);
        assert_eq!(reached.len(), 5_000);
        assert!(reached.iter().all(|(_, distance)| *distance == 1));
    }
}
