//! State mutators: apply one validated order or a battle result.
//!
//! Mutators run inside the executor loop with pre-clamped troop
//! commitments, so they never fail; a troop underflow past the clamp is
//! corrupted state and asserts. Every ownership change emits a
//! `HexCaptured` event so the log alone can replay ownership.

use tracing::debug;

use crate::battle::{resolve_battle, BattleInput, BattleSide};
use crate::board::HexId;
use crate::core::events::{EventKind, EventRecord};
use crate::core::rng::DieSource;
use crate::core::state::{GameState, FORTIFY_REINFORCEMENTS, PROMOTE_COST};

/// Append an event with the next log index and the current round.
pub(crate) fn emit(state: &mut GameState, events: &mut Vec<EventRecord>, kind: EventKind) {
    let index = state.take_event_index();
    events.push(EventRecord {
        index,
        round: state.round,
        kind,
    });
}

/// Move `troops` from `from` to `to` and relocate the acting knight.
///
/// The destination changes owner when it was unowned or when the mover now
/// holds the only troops on it; enemy troops may otherwise share the hex.
pub(crate) fn apply_move(
    state: &mut GameState,
    owner: &str,
    knight: &str,
    from: HexId,
    to: HexId,
    troops: u32,
    events: &mut Vec<EventRecord>,
) {
    state.hex_state_mut(from).remove_troops(owner, troops);
    state.hex_state_mut(to).add_troops(owner, troops);

    let destination = state.hex_state(to);
    let previous = destination.owner.clone();
    let captures = match previous.as_deref() {
        None => true,
        Some(current) => current != owner && destination.sole_occupant() == Some(owner),
    };
    if captures {
        state.hex_state_mut(to).owner = Some(owner.to_string());
        emit(
            state,
            events,
            EventKind::HexCaptured {
                hex: to,
                from_owner: previous,
                to_owner: owner.to_string(),
            },
        );
    }

    if let Some(actor) = state.knight_mut(knight) {
        actor.location = to;
    }

    debug!(owner, knight, %from, %to, troops, "move applied");
}

/// Assault `to` with `troops`, resolving a battle against its owner.
///
/// The attacker's stake leaves `from` up front; the winner's remainder
/// lands on the hex, the loser's knights there are eliminated, and on an
/// attacker win the hex changes owner and the acting knight advances.
pub(crate) fn apply_attack<D: DieSource + ?Sized>(
    state: &mut GameState,
    owner: &str,
    knight: &str,
    from: HexId,
    to: HexId,
    troops: u32,
    events: &mut Vec<EventRecord>,
    die: &mut D,
) {
    let defender = state
        .owner_of(to)
        .expect("attack target ownership validated")
        .to_string();

    state.hex_state_mut(from).remove_troops(owner, troops);

    let defender_troops = state.troops_on(to, &defender);
    let mut attacker_knights = vec![knight.to_string()];
    attacker_knights.extend(
        state
            .knights_on(to, owner)
            .into_iter()
            .filter(|name| name != knight),
    );
    let defender_knights = state.knights_on(to, &defender);

    let input = BattleInput {
        attacker: owner.to_string(),
        defender: defender.clone(),
        attacker_troops: troops,
        defender_troops,
        attacker_alliance: state.alliance_size(owner),
        defender_alliance: state.alliance_size(&defender),
        attacker_knights,
        defender_knights,
    };
    let result = resolve_battle(&input, die);

    debug!(
        owner,
        defender = %defender,
        %to,
        winner = ?result.winner,
        rounds = result.rounds.len(),
        "battle resolved"
    );

    emit(
        state,
        events,
        EventKind::BattleFought {
            hex: to,
            attacker: owner.to_string(),
            defender: defender.clone(),
            attacker_troops: troops,
            defender_troops,
            winner: result.winner,
            attacker_remaining: result.attacker_remaining,
            defender_remaining: result.defender_remaining,
            rounds: result.rounds.clone(),
        },
    );

    for name in &result.eliminated_knights {
        state.eliminate_knight(name);
        emit(
            state,
            events,
            EventKind::KnightEliminated { name: name.clone() },
        );
    }

    match result.winner {
        BattleSide::Attacker => {
            let hex = state.hex_state_mut(to);
            hex.set_troops(&defender, 0);
            hex.add_troops(owner, result.attacker_remaining);
            hex.owner = Some(owner.to_string());
            emit(
                state,
                events,
                EventKind::HexCaptured {
                    hex: to,
                    from_owner: Some(defender),
                    to_owner: owner.to_string(),
                },
            );
            if let Some(actor) = state.knight_mut(knight) {
                actor.location = to;
            }
        }
        BattleSide::Defender => {
            state
                .hex_state_mut(to)
                .set_troops(&defender, result.defender_remaining);
        }
    }
}

/// Reinforce `hex` in place.
pub(crate) fn apply_fortify(state: &mut GameState, owner: &str, hex: HexId) {
    state
        .hex_state_mut(hex)
        .add_troops(owner, FORTIFY_REINFORCEMENTS);
    debug!(owner, %hex, reinforcements = FORTIFY_REINFORCEMENTS, "fortify applied");
}

/// Spend troops on `hex` to raise a new knight there.
pub(crate) fn apply_promote(state: &mut GameState, owner: &str, hex: HexId) {
    state.hex_state_mut(hex).remove_troops(owner, PROMOTE_COST);
    let name = state.create_knight(owner, hex);
    debug!(owner, %hex, knight = %name, "promote applied");
}
