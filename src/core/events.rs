//! Round event records.
//!
//! Events are the canonical replay log: the executor appends them in the
//! exact order it produces state changes, and hosts persist them verbatim.
//! Each record carries a monotonically increasing index (from the game's
//! event cursor) and the round it was produced in, so events are totally
//! ordered by `(round, index)` across the life of a game.

use serde::{Deserialize, Serialize};

use crate::battle::{BattleRound, BattleSide};
use crate::board::HexId;
use crate::orders::Order;

/// What happened.
///
/// Serialized with a `"type"` discriminator string so hosts and UIs can
/// dispatch on the wire form without knowing the Rust enum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// An order left a player's queue and was applied.
    OrderIssued { player: String, order: Order },
    /// A battle resolved on a contested hex.
    BattleFought {
        hex: HexId,
        attacker: String,
        defender: String,
        /// Troops each side staked when the battle began.
        attacker_troops: u32,
        defender_troops: u32,
        winner: BattleSide,
        attacker_remaining: u32,
        defender_remaining: u32,
        rounds: Vec<BattleRound>,
    },
    /// The round counter advanced after all queues drained.
    RoundAdvanced { from_round: u32, to_round: u32 },
    /// A knight died and its name was retired.
    KnightEliminated { name: String },
    /// A hex changed owner. `from_owner` is `None` for unowned hexes.
    HexCaptured {
        hex: HexId,
        from_owner: Option<String>,
        to_owner: String,
    },
}

/// One entry of the append-only event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Game-wide append index; never reused.
    pub index: u64,
    /// Round the event was produced in (the pre-advance round number).
    pub round: u32,
    #[serde(flatten)]
    pub kind: EventKind,
}
