//! Movement blockers and passability rules.
//!
//! A [`MovementBlocker`] vetoes one directed edge. The [`BlockerRegistry`]
//! asks each registered blocker in turn; any veto blocks the edge, except on
//! adjacency overrides which are never blocked.

use std::fmt;

use tracing::trace;

use crate::graph::HexGraph;
use crate::hex::{BaseType, BorderAnomaly, Direction, Effect, HexRecord};
use crate::neighbors::EdgeKind;
use crate::options::DistanceOptions;

/// Facts about the edge being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct EdgeContext<'a> {
    /// Side of `from` crossed by the edge, if the edge has one.
    pub dir: Option<Direction>,
    /// `true` when `from` is the search source.
    pub is_source: bool,
    pub from_label: &'a str,
    pub to_label: &'a str,
    pub kind: EdgeKind,
}

/// Predicate vetoing traversal of a single directed edge.
pub trait MovementBlocker: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    fn is_blocked(
        &self,
        graph: &HexGraph<'_>,
        from: &HexRecord,
        to: &HexRecord,
        ctx: &EdgeContext<'_>,
        options: &DistanceOptions,
    ) -> bool;
}

/// `true` when `hex` carries an enabled supernova or asteroid hazard, either
/// as an effect or as its base type.
pub fn has_hazard(hex: &HexRecord, options: &DistanceOptions) -> bool {
    let supernova = hex.has_effect(Effect::Supernova) || hex.base_type == BaseType::Supernova;
    let asteroid = hex.has_effect(Effect::Asteroid) || hex.base_type == BaseType::Asteroid;
    (options.use_supernova && supernova) || (options.use_asteroid && asteroid)
}

/// Whether the search may land on `hex`.
pub fn is_passable(hex: &HexRecord, is_source: bool, options: &DistanceOptions) -> bool {
    if matches!(hex.base_type, BaseType::Unassigned | BaseType::Void) {
        return false;
    }
    is_source || !has_hazard(hex, options)
}

/// Whether `hex` counts as part of a gravity rift.
pub fn is_rift(hex: &HexRecord, options: &DistanceOptions) -> bool {
    options.use_rift && hex.has_effect(Effect::Rift)
}

/// Border-anomaly rule for crossing `side` of `from` into `to`.
///
/// A Spatial Tear on either side of the shared edge blocks both ways; a
/// Gravity Wave blocks only entry into the hex that carries it.
pub fn crosses_anomaly(from: &HexRecord, to: &HexRecord, side: Direction) -> bool {
    let entering = side.opposite();
    if from.anomaly_on(side) == Some(BorderAnomaly::SpatialTear) {
        return true;
    }
    matches!(
        to.anomaly_on(entering),
        Some(BorderAnomaly::SpatialTear | BorderAnomaly::GravityWave)
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BorderAnomalyBlocker;

impl MovementBlocker for BorderAnomalyBlocker {
    fn name(&self) -> &'static str {
        "border-anomaly"
    }

    fn is_blocked(
        &self,
        _graph: &HexGraph<'_>,
        from: &HexRecord,
        to: &HexRecord,
        ctx: &EdgeContext<'_>,
        options: &DistanceOptions,
    ) -> bool {
        if !options.use_border_anomalies {
            return false;
        }
        match ctx.dir {
            Some(side) => crosses_anomaly(from, to, side),
            None => false,
        }
    }
}

/// Supernovae and asteroid fields cannot be left except from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct HazardExitBlocker;

impl MovementBlocker for HazardExitBlocker {
    fn name(&self) -> &'static str {
        "hazard-exit"
    }

    fn is_blocked(
        &self,
        _graph: &HexGraph<'_>,
        from: &HexRecord,
        _to: &HexRecord,
        ctx: &EdgeContext<'_>,
        options: &DistanceOptions,
    ) -> bool {
        !ctx.is_source && has_hazard(from, options)
    }
}

/// Nebulae cannot be left except from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NebulaExitBlocker;

impl MovementBlocker for NebulaExitBlocker {
    fn name(&self) -> &'static str {
        "nebula-exit"
    }

    fn is_blocked(
        &self,
        _graph: &HexGraph<'_>,
        from: &HexRecord,
        _to: &HexRecord,
        ctx: &EdgeContext<'_>,
        options: &DistanceOptions,
    ) -> bool {
        options.use_nebula && !ctx.is_source && from.has_effect(Effect::Nebula)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VoidBlocker;

impl MovementBlocker for VoidBlocker {
    fn name(&self) -> &'static str {
        "void"
    }

    fn is_blocked(
        &self,
        _graph: &HexGraph<'_>,
        from: &HexRecord,
        to: &HexRecord,
        _ctx: &EdgeContext<'_>,
        _options: &DistanceOptions,
    ) -> bool {
        from.base_type == BaseType::Void || to.base_type == BaseType::Void
    }
}

/// Ordered set of movement blockers.
pub struct BlockerRegistry {
    blockers: Vec<Box<dyn MovementBlocker>>,
}

impl BlockerRegistry {
    /// Registry without any blocker; every edge is allowed.
    pub fn empty() -> Self {
        Self {
            blockers: Vec::new(),
        }
    }

    pub fn register(&mut self, blocker: impl MovementBlocker + 'static) -> &mut Self {
        self.blockers.push(Box::new(blocker));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, blocker: impl MovementBlocker + 'static) -> Self {
        self.register(blocker);
        self
    }

    pub fn blocker_names(&self) -> Vec<&'static str> {
        self.blockers.iter().map(|blocker| blocker.name()).collect()
    }

    /// Name of the first blocker vetoing the edge, if any.
    pub fn blocked_by(
        &self,
        graph: &HexGraph<'_>,
        from: &HexRecord,
        to: &HexRecord,
        ctx: &EdgeContext<'_>,
        options: &DistanceOptions,
    ) -> Option<&'static str> {
        if ctx.kind == EdgeKind::AdjacencyOverride {
            return None;
        }
        let name = self
            .blockers
            .iter()
            .find(|blocker| blocker.is_blocked(graph, from, to, ctx, options))
            .map(|blocker| blocker.name());
        if let Some(name) = name {
            trace!(from = ctx.from_label, to = ctx.to_label, blocker = name, "edge blocked");
        }
        name
    }

    pub fn is_blocked(
        &self,
        graph: &HexGraph<'_>,
        from: &HexRecord,
        to: &HexRecord,
        ctx: &EdgeContext<'_>,
        options: &DistanceOptions,
    ) -> bool {
        self.blocked_by(graph, from, to, ctx, options).is_some()
    }
}

impl Default for BlockerRegistry {
    fn default() -> Self {
        Self::empty()
            .with(BorderAnomalyBlocker)
            .with(HazardExitBlocker)
            .with(NebulaExitBlocker)
            .with(VoidBlocker)
    }
}

impl fmt::Debug for BlockerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockerRegistry")
            .field("blockers", &self.blocker_names())
            .finish()
    }
}
