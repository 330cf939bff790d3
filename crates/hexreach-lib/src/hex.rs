//! Hex records and the owned map snapshot consumed by the distance engine.
//!
//! Records are authored by the surrounding editor. Apart from
//! [`HexMap::symmetrize_matrices`], nothing in this crate mutates them.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a hex within a map.
pub type Label = String;

/// Number of sides on a hex tile.
pub const SIDE_COUNT: usize = 6;

/// One of the six sides of a flat-top hex, numbered clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// All sides in index order.
    pub const ALL: [Direction; SIDE_COUNT] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Convert a raw side index, returning `None` outside `0..6`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Raw side index in `0..6`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The side facing this one across a shared edge.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % SIDE_COUNT]
    }

    /// Axial `(dq, dr)` step to the hex across this side.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 0),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::NorthWest => "NW",
        };
        f.write_str(value)
    }
}

/// Terrain classification of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BaseType {
    /// Tile not yet assigned by the editor; never passable.
    #[default]
    #[serde(rename = "")]
    Unassigned,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "1planet")]
    OnePlanet,
    #[serde(rename = "2planet")]
    TwoPlanet,
    #[serde(rename = "3planet")]
    ThreePlanet,
    #[serde(rename = "legendary")]
    Legendary,
    #[serde(rename = "homesystem")]
    HomeSystem,
    #[serde(rename = "special")]
    Special,
    #[serde(rename = "supernova")]
    Supernova,
    #[serde(rename = "asteroid")]
    Asteroid,
}

/// Terrain effects layered on top of the base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Nebula,
    Rift,
    Supernova,
    Asteroid,
}

/// Anomaly bound to one edge of a hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BorderAnomaly {
    /// Blocks crossing the edge in both directions.
    SpatialTear,
    /// Blocks entering the hex through the edge.
    GravityWave,
}

/// Authored link between two arbitrary hexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLink {
    #[serde(default)]
    pub two_way: bool,
}

/// Internal edge-to-edge routing of a hyperlane tile.
///
/// `cells[entry][exit] != 0` connects side `entry` to side `exit`; a set
/// diagonal cell is a portal on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyperlaneMatrix {
    cells: Vec<Vec<u8>>,
}

impl HyperlaneMatrix {
    /// A 6x6 matrix with no connections.
    pub fn empty() -> Self {
        Self {
            cells: vec![vec![0; SIDE_COUNT]; SIDE_COUNT],
        }
    }

    /// Wrap raw rows as authored; shape is not checked here.
    pub fn from_rows(cells: Vec<Vec<u8>>) -> Self {
        Self { cells }
    }

    /// Builder-style helper connecting `entry` to `exit` (one direction).
    pub fn with_link(mut self, entry: Direction, exit: Direction) -> Self {
        self.set(entry, exit);
        self
    }

    /// Builder-style helper marking a portal on `side`.
    pub fn with_portal(self, side: Direction) -> Self {
        self.with_link(side, side)
    }

    /// Connect `entry` to `exit`. No-op on a malformed matrix.
    pub fn set(&mut self, entry: Direction, exit: Direction) {
        if let Some(cell) = self
            .cells
            .get_mut(entry.index())
            .and_then(|row| row.get_mut(exit.index()))
        {
            *cell = 1;
        }
    }

    /// Raw rows.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// `true` when the matrix is exactly 6x6.
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == SIDE_COUNT && self.cells.iter().all(|row| row.len() == SIDE_COUNT)
    }

    /// Whether side `entry` is internally connected to side `exit`.
    pub fn connects(&self, entry: Direction, exit: Direction) -> bool {
        self.cells
            .get(entry.index())
            .and_then(|row| row.get(exit.index()))
            .is_some_and(|cell| *cell != 0)
    }

    /// `true` when no cell is set.
    pub fn is_trivial(&self) -> bool {
        self.cells.iter().flatten().all(|cell| *cell == 0)
    }

    /// Sides carrying a portal (set diagonal cell).
    pub fn loop_sides(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|side| self.connects(*side, *side))
            .collect()
    }

    /// Mirror every connection so the matrix is undirected. Idempotent.
    pub fn symmetrize(&mut self) {
        if !self.is_well_formed() {
            return;
        }
        for i in 0..SIDE_COUNT {
            for j in (i + 1)..SIDE_COUNT {
                if self.cells[i][j] != 0 || self.cells[j][i] != 0 {
                    self.cells[i][j] = 1;
                    self.cells[j][i] = 1;
                }
            }
        }
    }
}

impl Default for HyperlaneMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single hex as authored in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexRecord {
    pub label: Label,
    pub q: i32,
    pub r: i32,
    #[serde(default)]
    pub base_type: BaseType,
    #[serde(default)]
    pub effects: BTreeSet<Effect>,
    #[serde(default)]
    pub wormholes: BTreeSet<String>,
    #[serde(default)]
    pub custom_adjacents: BTreeMap<Label, CustomLink>,
    #[serde(default)]
    pub adjacency_overrides: BTreeMap<u8, Label>,
    #[serde(default)]
    pub border_anomalies: BTreeMap<u8, BorderAnomaly>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<HyperlaneMatrix>,
}

impl HexRecord {
    /// Create an unassigned hex with no special behaviour.
    pub fn new(label: impl Into<Label>, q: i32, r: i32) -> Self {
        Self {
            label: label.into(),
            q,
            r,
            base_type: BaseType::Unassigned,
            effects: BTreeSet::new(),
            wormholes: BTreeSet::new(),
            custom_adjacents: BTreeMap::new(),
            adjacency_overrides: BTreeMap::new(),
            border_anomalies: BTreeMap::new(),
            matrix: None,
        }
    }

    pub fn with_base_type(mut self, base_type: BaseType) -> Self {
        self.base_type = base_type;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.insert(effect);
        self
    }

    pub fn with_wormhole(mut self, kind: impl Into<String>) -> Self {
        self.wormholes.insert(kind.into());
        self
    }

    pub fn with_custom_link(mut self, target: impl Into<Label>, two_way: bool) -> Self {
        self.custom_adjacents
            .insert(target.into(), CustomLink { two_way });
        self
    }

    pub fn with_adjacency_override(mut self, side: Direction, target: impl Into<Label>) -> Self {
        self.adjacency_overrides
            .insert(side.index() as u8, target.into());
        self
    }

    pub fn with_border_anomaly(mut self, side: Direction, anomaly: BorderAnomaly) -> Self {
        self.border_anomalies.insert(side.index() as u8, anomaly);
        self
    }

    pub fn with_matrix(mut self, matrix: HyperlaneMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Axial coordinate `(q, r)`.
    pub fn coord(&self) -> (i32, i32) {
        (self.q, self.r)
    }

    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    /// Anomaly recorded on `side`, if any.
    pub fn anomaly_on(&self, side: Direction) -> Option<BorderAnomaly> {
        self.border_anomalies.get(&(side.index() as u8)).copied()
    }
}

/// Owned, insertion-ordered collection of hex records.
#[derive(Debug, Clone, Default)]
pub struct HexMap {
    hexes: Vec<HexRecord>,
    by_label: HashMap<Label, usize>,
}

impl HexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced when the label was
    /// already present. Replacement keeps the original position.
    pub fn insert(&mut self, record: HexRecord) -> Option<HexRecord> {
        match self.by_label.get(&record.label) {
            Some(&index) => Some(std::mem::replace(&mut self.hexes[index], record)),
            None => {
                self.by_label
                    .insert(record.label.clone(), self.hexes.len());
                self.hexes.push(record);
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&HexRecord> {
        self.by_label.get(label).map(|&index| &self.hexes[index])
    }

    /// Mutable access for editing features. Relabelling through this handle
    /// is not supported; remove and re-insert instead.
    pub fn get_mut(&mut self, label: &str) -> Option<&mut HexRecord> {
        match self.by_label.get(label) {
            Some(&index) => self.hexes.get_mut(index),
            None => None,
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HexRecord> {
        self.hexes.iter()
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Make every hyperlane matrix undirected.
    ///
    /// This is the only mutation the engine performs on a snapshot; running
    /// it repeatedly leaves the map unchanged.
    pub fn symmetrize_matrices(&mut self) {
        for matrix in self.hexes.iter_mut().filter_map(|hex| hex.matrix.as_mut()) {
            matrix.symmetrize();
        }
    }
}

impl FromIterator<HexRecord> for HexMap {
    fn from_iter<I: IntoIterator<Item = HexRecord>>(iter: I) -> Self {
        let mut map = HexMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}
