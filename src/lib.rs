//! # toaster-engine
//!
//! Deterministic, turn-based rules engine for the Secret Toaster hex-grid
//! strategy game.
//!
//! ## Design Principles
//!
//! 1. **Pure functions over value state**: every operation consumes a
//!    `GameState` snapshot and returns a new one plus an ordered event
//!    log. There is no global state and no I/O; hosts own persistence,
//!    identity, and fan-out.
//!
//! 2. **Determinism as a contract**: `execute_round(state, seed)` always
//!    yields the same successor state and events for the same inputs.
//!    Randomness is an injected capability, seeded per call, consumed
//!    linearly, and never stored.
//!
//! 3. **Tagged sums at the core, strings at the boundary**: orders and
//!    events are discriminated enums so consumers handle every case
//!    exhaustively; wire discriminators only appear in the serde layer.
//!
//! ## Architecture
//!
//! Hosts submit `(state, proposed_order)` pairs; accepted orders queue
//! per player (at most three, validated against each knight's *projected*
//! position so multi-order plans chain). Once every active player is
//! ready, `execute_round` interleaves the queues through a seeded draw,
//! resolves attacks through the die-based battle resolver, and advances
//! the round counter — emitting the replayable event log as it goes.
//!
//! ## Modules
//!
//! - `board`: hex identity, tile kinds, canonical 10×11 topology
//! - `core`: game state, players, knights, events, RNG capabilities
//! - `orders`: order model, position projection, validation
//! - `battle`: probabilistic battle resolution with round traces
//! - `round`: round executor and state mutators

pub mod battle;
pub mod board;
pub mod core;
pub mod orders;
pub mod round;

// Re-export commonly used types
pub use crate::board::{build_board, Board, Hex, HexId, TileKind, CASTLE_HEX, HEX_COUNT, KEEP_HEXES};

pub use crate::core::{
    DieSource, EngineRng, EventKind, EventRecord, GameRng, GameState, GameStatus, HexState,
    Knight, LobbyError, Player, ScriptedRng, FORTIFY_REINFORCEMENTS, MAX_ORDERS, MAX_PLAYERS,
    PROMOTE_COST, STARTING_GARRISON,
};

pub use crate::orders::{validate, ActionType, Order, OrderKind, ProposedOrder, RejectionCode};

pub use crate::battle::{resolve_battle, BattleInput, BattleResult, BattleRound, BattleSide};

pub use crate::round::RoundOutcome;
