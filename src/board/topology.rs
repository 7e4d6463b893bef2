//! Canonical board construction.
//!
//! The board is a fixed 10×11 hex grid with six keeps, one castle, and a
//! ring of land promoted around the special tiles. `build_board` is
//! referentially transparent: every call yields the same topology, so the
//! board is never persisted alongside game state.
//!
//! ## Adjacency
//!
//! Neighbor offsets depend on row parity (offset axial layout):
//!
//! - odd rows:  `(0,-1) (+1,0) (0,+1) (-1,+1) (-1,0) (-1,-1)`
//! - even rows: `(+1,-1) (+1,0) (+1,+1) (0,+1) (-1,0) (0,-1)`
//!
//! Offsets that leave the grid become absent slots. The resulting relation
//! is symmetric, which the construction tests assert pair by pair.

use super::hex::{Hex, HexId, TileKind};

/// Columns on the board.
pub const BOARD_WIDTH: u8 = 10;
/// Rows on the board.
pub const BOARD_HEIGHT: u8 = 11;
/// Total number of hexes.
pub const HEX_COUNT: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The six home tiles, one per possible player.
pub const KEEP_HEXES: [HexId; 6] = [
    HexId(23),
    HexId(26),
    HexId(52),
    HexId(58),
    HexId(83),
    HexId(86),
];

/// The central objective tile.
pub const CASTLE_HEX: HexId = HexId(55);

/// Tiles forced to land after the promotion pass, regardless of prior kind.
const LAND_OVERRIDES: [HexId; 6] = [
    HexId(35),
    HexId(46),
    HexId(75),
    HexId(63),
    HexId(43),
    HexId(66),
];

const ODD_ROW_OFFSETS: [(i16, i16); 6] = [(0, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1)];
const EVEN_ROW_OFFSETS: [(i16, i16); 6] = [(1, -1), (1, 0), (1, 1), (0, 1), (-1, 0), (0, -1)];

/// The immutable board topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    hexes: Vec<Hex>,
}

impl Board {
    /// Look up a hex by id.
    #[must_use]
    pub fn hex(&self, id: HexId) -> Option<&Hex> {
        self.hexes.get(id.index())
    }

    /// Check whether an id addresses a hex on this board.
    #[must_use]
    pub fn contains(&self, id: HexId) -> bool {
        id.index() < self.hexes.len()
    }

    /// Tile kind at `id`, if the id is on the board.
    #[must_use]
    pub fn kind(&self, id: HexId) -> Option<TileKind> {
        self.hex(id).map(|h| h.kind)
    }

    /// Check adjacency between two hexes.
    ///
    /// Returns false when either id is off the board.
    #[must_use]
    pub fn is_neighbor(&self, from: HexId, to: HexId) -> bool {
        self.hex(from).is_some_and(|h| h.is_neighbor(to))
    }

    /// Iterate over all hexes in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    /// Number of hexes on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    /// A board always has hexes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }
}

impl Default for Board {
    fn default() -> Self {
        build_board()
    }
}

/// Build the canonical board.
///
/// Steps, in order: blank grid, neighbor tables, keep and castle markers,
/// land promotion around the special tiles, forced-land overrides (which
/// never overwrite a keep or the castle).
#[must_use]
pub fn build_board() -> Board {
    let mut hexes: Vec<Hex> = (0..HEX_COUNT)
        .map(|i| {
            let id = HexId::new(i as u8);
            Hex {
                id,
                kind: TileKind::Blank,
                neighbors: neighbors_of(id),
            }
        })
        .collect();

    for keep in KEEP_HEXES {
        hexes[keep.index()].kind = TileKind::Keep;
    }
    hexes[CASTLE_HEX.index()].kind = TileKind::Castle;

    // Promote blank neighbors of every special tile to land.
    let mut promoted: Vec<HexId> = Vec::new();
    for hex in &hexes {
        if matches!(hex.kind, TileKind::Keep | TileKind::Castle) {
            promoted.extend(hex.neighbor_ids());
        }
    }
    for id in promoted {
        let hex = &mut hexes[id.index()];
        if hex.kind == TileKind::Blank {
            hex.kind = TileKind::Land;
        }
    }

    for id in LAND_OVERRIDES {
        let hex = &mut hexes[id.index()];
        if !matches!(hex.kind, TileKind::Keep | TileKind::Castle) {
            hex.kind = TileKind::Land;
        }
    }

    Board { hexes }
}

/// Neighbor table for one hex, honoring row parity and board edges.
fn neighbors_of(id: HexId) -> [Option<HexId>; 6] {
    let (x, y) = (id.x() as i16, id.y() as i16);
    let offsets = if y % 2 == 1 {
        ODD_ROW_OFFSETS
    } else {
        EVEN_ROW_OFFSETS
    };

    let mut out = [None; 6];
    for (slot, (dx, dy)) in offsets.into_iter().enumerate() {
        let (nx, ny) = (x + dx, y + dy);
        if (0..BOARD_WIDTH as i16).contains(&nx) && (0..BOARD_HEIGHT as i16).contains(&ny) {
            out[slot] = Some(HexId::from_coords(nx as u8, ny as u8));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_dimensions() {
        let board = build_board();
        assert_eq!(board.len(), 110);
        for keep in KEEP_HEXES {
            assert_eq!(board.kind(keep), Some(TileKind::Keep));
        }
        assert_eq!(board.kind(CASTLE_HEX), Some(TileKind::Castle));
    }

    #[test]
    fn test_neighbor_symmetry() {
        let board = build_board();
        for hex in board.iter() {
            for neighbor in hex.neighbor_ids() {
                let other = board.hex(neighbor).unwrap();
                assert!(
                    other.is_neighbor(hex.id),
                    "{} lists {} but not vice versa",
                    hex.id,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_neighbors_in_bounds() {
        let board = build_board();
        for hex in board.iter() {
            for neighbor in hex.neighbor_ids() {
                assert!(board.contains(neighbor));
            }
        }
    }

    #[test]
    fn test_castle_neighbors() {
        let board = build_board();
        let castle = board.hex(CASTLE_HEX).unwrap();
        let mut ids: Vec<u8> = castle.neighbor_ids().map(|h| h.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![44, 45, 54, 56, 64, 65]);
    }

    #[test]
    fn test_corner_has_three_neighbors() {
        let board = build_board();
        let corner = board.hex(HexId::new(0)).unwrap();
        let mut ids: Vec<u8> = corner.neighbor_ids().map(|h| h.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 10, 11]);
    }

    #[test]
    fn test_land_promotion_around_keeps() {
        let board = build_board();
        // Every neighbor of a keep or the castle is land or special.
        for special in KEEP_HEXES.into_iter().chain([CASTLE_HEX]) {
            for neighbor in board.hex(special).unwrap().neighbor_ids() {
                assert_ne!(board.kind(neighbor), Some(TileKind::Blank));
            }
        }
    }

    #[test]
    fn test_land_overrides_applied() {
        let board = build_board();
        for id in LAND_OVERRIDES {
            assert_eq!(board.kind(id), Some(TileKind::Land), "{id}");
        }
    }

    #[test]
    fn test_far_corner_stays_blank() {
        let board = build_board();
        assert_eq!(board.kind(HexId::new(0)), Some(TileKind::Blank));
        assert_eq!(board.kind(HexId::new(109)), Some(TileKind::Blank));
    }

    #[test]
    fn test_is_neighbor_rejects_off_board() {
        let board = build_board();
        assert!(!board.is_neighbor(HexId::new(200), HexId::new(0)));
        assert!(!board.is_neighbor(HexId::new(0), HexId::new(200)));
    }

    #[test]
    fn test_keep_23_adjacency() {
        let board = build_board();
        let keep = board.hex(HexId::new(23)).unwrap();
        let mut ids: Vec<u8> = keep.neighbor_ids().map(|h| h.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![13, 14, 22, 24, 33, 34]);
        assert!(!board.is_neighbor(HexId::new(23), HexId::new(55)));
    }

    #[test]
    fn test_build_board_is_deterministic() {
        assert_eq!(build_board(), build_board());
    }
}
