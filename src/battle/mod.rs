//! Probabilistic battle resolution.
//!
//! A battle is a sequence of simultaneous d6 rolls. Each side's score is
//! its roll plus its alliance size; the lower score loses one troop, and
//! ties go to the defender. The loop runs until one side has no troops on
//! the contested hex, so a battle always terminates and never errors: a
//! side that starts at zero has already lost.
//!
//! The die source is an injected capability, which is what lets the round
//! executor feed battles from its seeded stream and lets tests script
//! exact roll sequences.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::rng::DieSource;

/// Which side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleSide {
    Attacker,
    Defender,
}

/// Everything the resolver needs to know about a contested hex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleInput {
    /// Attacking player's nickname.
    pub attacker: String,
    /// Defending player's nickname.
    pub defender: String,
    /// Troops the attacker commits to the hex.
    pub attacker_troops: u32,
    /// Defender's troops on the hex.
    pub defender_troops: u32,
    /// Attacker's alliance size (1 for a solo player).
    pub attacker_alliance: u32,
    /// Defender's alliance size (1 for a solo player).
    pub defender_alliance: u32,
    /// Attacker knights staked on the hex, the acting knight included.
    pub attacker_knights: Vec<String>,
    /// Defender knights on the hex.
    pub defender_knights: Vec<String>,
}

/// One resolved exchange of rolls.
///
/// Troop counts are the totals after this round's loss is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRound {
    pub attacker_roll: u8,
    pub defender_roll: u8,
    pub attacker_score: u32,
    pub defender_score: u32,
    pub loser: BattleSide,
    pub attacker_troops: u32,
    pub defender_troops: u32,
}

/// Outcome of a resolved battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleResult {
    /// Side left with troops on the hex.
    pub winner: BattleSide,
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
    /// Knights of the losing side, in the order they were supplied.
    pub eliminated_knights: Vec<String>,
    /// Round-by-round trace, in resolution order.
    pub rounds: Vec<BattleRound>,
}

/// Resolve a battle to completion.
///
/// Consumes two die rolls per round from `die`. With both sides at zero
/// troops the defender wins trivially with an empty trace.
pub fn resolve_battle<D: DieSource + ?Sized>(input: &BattleInput, die: &mut D) -> BattleResult {
    let mut attacker = input.attacker_troops;
    let mut defender = input.defender_troops;
    let mut rounds = Vec::new();

    while attacker > 0 && defender > 0 {
        let attacker_roll = die.roll_die();
        let defender_roll = die.roll_die();
        let attacker_score = u32::from(attacker_roll) + input.attacker_alliance;
        let defender_score = u32::from(defender_roll) + input.defender_alliance;

        // Ties go to the defender.
        let loser = if defender_score >= attacker_score {
            BattleSide::Attacker
        } else {
            BattleSide::Defender
        };
        match loser {
            BattleSide::Attacker => attacker -= 1,
            BattleSide::Defender => defender -= 1,
        }

        trace!(
            attacker_roll,
            defender_roll,
            attacker_score,
            defender_score,
            attacker,
            defender,
            "battle round resolved"
        );

        rounds.push(BattleRound {
            attacker_roll,
            defender_roll,
            attacker_score,
            defender_score,
            loser,
            attacker_troops: attacker,
            defender_troops: defender,
        });
    }

    let winner = if attacker > 0 {
        BattleSide::Attacker
    } else {
        BattleSide::Defender
    };
    let eliminated_knights = match winner {
        BattleSide::Attacker => input.defender_knights.clone(),
        BattleSide::Defender => input.attacker_knights.clone(),
    };

    BattleResult {
        winner,
        attacker_remaining: attacker,
        defender_remaining: defender,
        eliminated_knights,
        rounds,
    }
}
