//! Hex identity and tile data.
//!
//! Grid cells are addressed by a flat index `x + 10·y` over a 10-wide,
//! 11-tall board. Each hex knows its tile kind and a six-slot neighbor
//! table; absent slots are board edges.

use serde::{Deserialize, Serialize};

/// Identifier of one grid cell, computed as `x + 10·y`.
///
/// Valid ids are `0..110`. Construction is not range-checked; operations
/// that accept host input reject out-of-range ids with a typed code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexId(pub u8);

impl HexId {
    /// Create a hex id from a raw index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Create a hex id from grid coordinates.
    #[must_use]
    pub const fn from_coords(x: u8, y: u8) -> Self {
        Self(x + 10 * y)
    }

    /// Flat index for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Column of this hex.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.0 % 10
    }

    /// Row of this hex.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.0 / 10
    }
}

impl std::fmt::Display for HexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hex {}", self.0)
    }
}

/// What a grid cell is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileKind {
    /// Unremarkable terrain.
    #[default]
    Blank,
    /// Traversable land surrounding the special tiles.
    Land,
    /// One of the six home tiles where players start.
    Keep,
    /// The single central objective tile.
    Castle,
}

/// One grid cell: kind plus neighbor table.
///
/// Immutable once the board is built. Neighbor slots follow the parity
/// offset tables in the topology module; `None` marks a board edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hex {
    /// This hex's own id.
    pub id: HexId,
    /// Tile kind assigned by the board builder.
    pub kind: TileKind,
    /// Adjacent hexes, `None` where the offset leaves the board.
    pub neighbors: [Option<HexId>; 6],
}

impl Hex {
    /// Check whether `other` is adjacent to this hex.
    #[must_use]
    pub fn is_neighbor(&self, other: HexId) -> bool {
        self.neighbors.contains(&Some(other))
    }

    /// Iterate over the present neighbors.
    pub fn neighbor_ids(&self) -> impl Iterator<Item = HexId> + '_ {
        self.neighbors.iter().filter_map(|n| *n)
    }
}
