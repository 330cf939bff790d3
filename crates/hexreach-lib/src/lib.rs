//! hexreach library entry points.
//!
//! This crate models the hexes of a board-game map editor and computes how
//! far every hex is from a chosen source, honouring wormholes, custom links,
//! adjacency overrides, hyperlane tiles, gravity rifts and terrain that
//! blocks movement. Front-ends (the CLI, the editor overlay) should only
//! depend on the functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod blockers;
pub mod distance;
pub mod error;
pub mod graph;
pub mod hex;
pub mod hyperlane;
pub mod neighbors;
pub mod options;
pub mod output;
pub mod rift;
pub mod search;
pub mod snapshot;

pub use blockers::{BlockerRegistry, EdgeContext, MovementBlocker};
pub use distance::{calculate_distances_from, DistanceEngine};
pub use error::{Error, Result};
pub use graph::HexGraph;
pub use hex::{
    BaseType, BorderAnomaly, CustomLink, Direction, Effect, HexMap, HexRecord, HyperlaneMatrix,
    Label,
};
pub use hyperlane::HyperlaneExit;
pub use neighbors::{EdgeKind, Neighbor, NeighborProvider, NeighborRegistry};
pub use options::{DistanceOptions, DEFAULT_MAX_DISTANCE};
pub use output::{DistanceEntry, DistanceReport};
pub use search::DistanceMap;
pub use snapshot::load_hex_map;
