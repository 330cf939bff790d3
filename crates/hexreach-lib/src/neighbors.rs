//! Neighbour providers and the registry that combines them.
//!
//! Each [`NeighborProvider`] contributes directed edges out of a hex. The
//! [`NeighborRegistry`] runs its providers in registration order and keeps
//! the first edge seen for each target label.

use std::collections::HashSet;
use std::fmt;

use crate::graph::HexGraph;
use crate::hex::{Direction, HexRecord};
use crate::options::DistanceOptions;

/// Origin of an edge produced by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Axial,
    CustomLink,
    Wormhole,
    /// Authored bonus edge; exempt from movement blockers.
    AdjacencyOverride,
}

/// Directed edge from the hex being expanded to `hex`.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub hex: &'a HexRecord,
    /// Side of the origin hex crossed by the edge, when the edge has one.
    pub dir: Option<Direction>,
    pub kind: EdgeKind,
}

impl<'a> Neighbor<'a> {
    pub fn label(&self) -> &'a str {
        self.hex.label.as_str()
    }
}

/// Source of extra edges out of a hex.
pub trait NeighborProvider: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Append the edges leaving `hex` to `out`.
    fn provide<'a>(
        &self,
        graph: &HexGraph<'a>,
        hex: &'a HexRecord,
        options: &DistanceOptions,
        out: &mut Vec<Neighbor<'a>>,
    );
}

/// The six grid neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxialProvider;

impl NeighborProvider for AxialProvider {
    fn name(&self) -> &'static str {
        "axial"
    }

    fn provide<'a>(
        &self,
        graph: &HexGraph<'a>,
        hex: &'a HexRecord,
        _options: &DistanceOptions,
        out: &mut Vec<Neighbor<'a>>,
    ) {
        for side in Direction::ALL {
            if let Some(target) = graph.neighbor_across(hex, side) {
                out.push(Neighbor {
                    hex: target,
                    dir: Some(side),
                    kind: EdgeKind::Axial,
                });
            }
        }
    }
}

/// Authored custom links.
///
/// Links recorded on the hex are followed whether one- or two-way. Two-way
/// links recorded only on the far endpoint are followed back as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomLinkProvider;

impl NeighborProvider for CustomLinkProvider {
    fn name(&self) -> &'static str {
        "custom-link"
    }

    fn provide<'a>(
        &self,
        graph: &HexGraph<'a>,
        hex: &'a HexRecord,
        options: &DistanceOptions,
        out: &mut Vec<Neighbor<'a>>,
    ) {
        if !options.use_custom_links {
            return;
        }

        for (target, link) in &hex.custom_adjacents {
            let Some(target) = graph.get(target) else {
                continue;
            };
            // A one-way link is dropped when the target records its own
            // entry back to this hex.
            if !link.two_way && target.custom_adjacents.contains_key(&hex.label) {
                continue;
            }
            out.push(Neighbor {
                hex: target,
                dir: None,
                kind: EdgeKind::CustomLink,
            });
        }

        for &source in graph.incoming_two_way_links(&hex.label) {
            if hex.custom_adjacents.contains_key(&source.label) {
                continue;
            }
            out.push(Neighbor {
                hex: source,
                dir: None,
                kind: EdgeKind::CustomLink,
            });
        }
    }
}

/// Hexes sharing any wormhole type.
#[derive(Debug, Clone, Copy, Default)]
pub struct WormholeProvider;

impl NeighborProvider for WormholeProvider {
    fn name(&self) -> &'static str {
        "wormhole"
    }

    fn provide<'a>(
        &self,
        graph: &HexGraph<'a>,
        hex: &'a HexRecord,
        _options: &DistanceOptions,
        out: &mut Vec<Neighbor<'a>>,
    ) {
        for kind in &hex.wormholes {
            for &partner in graph.wormhole_partners(kind) {
                if partner.label == hex.label {
                    continue;
                }
                out.push(Neighbor {
                    hex: partner,
                    dir: None,
                    kind: EdgeKind::Wormhole,
                });
            }
        }
    }
}

/// Per-edge adjacency overrides, in both directions.
///
/// Overrides are not assumed to be recorded reciprocally, so an override on
/// another hex that targets this one also yields an edge back.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyOverrideProvider;

impl NeighborProvider for AdjacencyOverrideProvider {
    fn name(&self) -> &'static str {
        "adjacency-override"
    }

    fn provide<'a>(
        &self,
        graph: &HexGraph<'a>,
        hex: &'a HexRecord,
        _options: &DistanceOptions,
        out: &mut Vec<Neighbor<'a>>,
    ) {
        for &(side, target) in graph.overrides(&hex.label) {
            out.push(Neighbor {
                hex: target,
                dir: Some(side),
                kind: EdgeKind::AdjacencyOverride,
            });
        }
        for &(source, side) in graph.incoming_overrides(&hex.label) {
            out.push(Neighbor {
                hex: source,
                dir: Some(side.opposite()),
                kind: EdgeKind::AdjacencyOverride,
            });
        }
    }
}

/// Ordered set of neighbour providers.
pub struct NeighborRegistry {
    providers: Vec<Box<dyn NeighborProvider>>,
}

impl NeighborRegistry {
    /// Registry without any provider.
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider; later providers lose label collisions.
    pub fn register(&mut self, provider: impl NeighborProvider + 'static) -> &mut Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, provider: impl NeighborProvider + 'static) -> Self {
        self.register(provider);
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Edges leaving `hex`, de-duplicated by target label.
    pub fn neighbors<'a>(
        &self,
        graph: &HexGraph<'a>,
        hex: &'a HexRecord,
        options: &DistanceOptions,
    ) -> Vec<Neighbor<'a>> {
        let mut raw = Vec::new();
        for provider in &self.providers {
            provider.provide(graph, hex, options, &mut raw);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(raw.len());
        seen.insert(hex.label.as_str());
        raw.retain(|neighbor| seen.insert(neighbor.label()));
        raw
    }
}

impl Default for NeighborRegistry {
    fn default() -> Self {
        Self::empty()
            .with(AxialProvider)
            .with(CustomLinkProvider)
            .with(WormholeProvider)
            .with(AdjacencyOverrideProvider)
    }
}

impl fmt::Debug for NeighborRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeighborRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}
