//! Board topology: hex identity, tile kinds, and the canonical grid.

pub mod hex;
pub mod topology;

pub use hex::{Hex, HexId, TileKind};
pub use topology::{
    build_board, Board, BOARD_HEIGHT, BOARD_WIDTH, CASTLE_HEX, HEX_COUNT, KEEP_HEXES,
};
