//! Deterministic round execution.
//!
//! A round executes when every active player is ready. Queued orders are
//! interleaved across players by drawing uniformly over the full player
//! list — empty queues burn a draw and trigger a redraw, which keeps the
//! draw sequence (and therefore replays) stable regardless of queue
//! lengths. Battle dice are consumed from the same stream, after the draws
//! that scheduled them.
//!
//! `execute_round(state, seed)` is a pure function: the same state and
//! seed always produce the same successor state and event list.

use tracing::{debug, trace};

use super::mutators;
use crate::core::events::{EventKind, EventRecord};
use crate::core::rng::{EngineRng, GameRng};
use crate::core::state::{GameState, PROMOTE_COST};
use crate::orders::{Order, OrderKind};

/// Result of a round execution attempt.
///
/// When the ready gate fails, `executed` is false, `state` equals the
/// input, and `events` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub state: GameState,
    pub events: Vec<EventRecord>,
    pub executed: bool,
}

impl GameState {
    /// Execute the current round with a host-provided seed.
    #[must_use]
    pub fn execute_round(&self, seed: u64) -> RoundOutcome {
        let mut rng = GameRng::new(seed);
        self.execute_round_with_rng(&mut rng)
    }

    /// Execute the current round, drawing scheduling and battle randomness
    /// from `rng`. Tests and replay tooling inject scripted streams here.
    #[must_use]
    pub fn execute_round_with_rng<R: EngineRng + ?Sized>(&self, rng: &mut R) -> RoundOutcome {
        if self.players().iter().any(|p| p.active && !p.ready) {
            debug!(round = self.round, "round gate not met");
            return RoundOutcome {
                state: self.clone(),
                events: Vec::new(),
                executed: false,
            };
        }

        let mut state = self.clone();
        let mut events = Vec::new();
        let player_count = state.players().len();

        while state.players().iter().any(|p| p.has_orders()) {
            let draw = (rng.next_unit() * player_count as f64) as usize;
            let Some(order) = state.players_mut()[draw].pop_front_order() else {
                trace!(draw, "drew player with empty queue, redrawing");
                continue;
            };
            trace!(
                draw,
                player = %order.owner,
                slot = order.order_number,
                "order scheduled"
            );
            dispatch(&mut state, order, rng, &mut events);
        }

        for player in state.players_mut() {
            player.ready = false;
        }
        state.reset_all_projections();

        let from_round = state.round;
        let to_round = from_round + 1;
        mutators::emit(
            &mut state,
            &mut events,
            EventKind::RoundAdvanced {
                from_round,
                to_round,
            },
        );
        state.round = to_round;
        debug!(from_round, to_round, events = events.len(), "round executed");

        RoundOutcome {
            state,
            events,
            executed: true,
        }
    }
}

/// Apply one popped order, or discard it if the round so far has
/// invalidated it.
///
/// Orders were validated at submission, but an earlier order this round can
/// kill the actor, spend the source troops, or capture the target. Stale
/// orders are dropped without events; live ones are clamped to the troops
/// actually present so arithmetic can never go negative.
fn dispatch<R: EngineRng + ?Sized>(
    state: &mut GameState,
    order: Order,
    rng: &mut R,
    events: &mut Vec<EventRecord>,
) {
    let alive = state.knight(&order.knight).is_some_and(|k| k.alive);
    if !alive {
        trace!(knight = %order.knight, "actor dead, order discarded");
        return;
    }

    match order.kind {
        OrderKind::Move { from, to, troops } => {
            let committed = troops.min(state.troops_on(from, &order.owner));
            if committed == 0 {
                trace!(player = %order.owner, %from, "no troops to move, order discarded");
                return;
            }
            issue(state, events, &order);
            mutators::apply_move(state, &order.owner, &order.knight, from, to, committed, events);
        }
        OrderKind::Attack { from, to, troops } => {
            let committed = troops.min(state.troops_on(from, &order.owner));
            if committed == 0 {
                trace!(player = %order.owner, %from, "no troops to attack with, order discarded");
                return;
            }
            if state.owner_of(to).map_or(true, |o| o == order.owner) {
                trace!(player = %order.owner, %to, "target no longer enemy-owned, order discarded");
                return;
            }
            issue(state, events, &order);
            mutators::apply_attack(
                state,
                &order.owner,
                &order.knight,
                from,
                to,
                committed,
                events,
                rng,
            );
        }
        OrderKind::Fortify { hex } => {
            issue(state, events, &order);
            mutators::apply_fortify(state, &order.owner, hex);
        }
        OrderKind::Promote { hex } => {
            if state.troops_on(hex, &order.owner) < PROMOTE_COST {
                trace!(player = %order.owner, %hex, "troops below promote cost, order discarded");
                return;
            }
            issue(state, events, &order);
            mutators::apply_promote(state, &order.owner, hex);
        }
    }
}

fn issue(state: &mut GameState, events: &mut Vec<EventRecord>, order: &Order) {
    mutators::emit(
        state,
        events,
        EventKind::OrderIssued {
            player: order.owner.clone(),
            order: order.clone(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;

    #[test]
    fn test_gate_blocks_when_an_active_player_is_not_ready() {
        let mut rng = ScriptedRng::new().with_units(&[0.0, 0.0]);
        let state = GameState::new()
            .join("alice", &mut rng)
            .unwrap()
            .join("bob", &mut rng)
            .unwrap()
            .start()
            .unwrap()
            .set_ready("alice", true)
            .unwrap();

        let outcome = state.execute_round(7);
        assert!(!outcome.executed);
        assert_eq!(outcome.state, state);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_inactive_players_do_not_gate() {
        let mut rng = ScriptedRng::new().with_units(&[0.0, 0.0]);
        let mut state = GameState::new()
            .join("alice", &mut rng)
            .unwrap()
            .join("bob", &mut rng)
            .unwrap()
            .start()
            .unwrap()
            .set_ready("alice", true)
            .unwrap();
        state.player_mut("bob").unwrap().active = false;

        let outcome = state.execute_round(7);
        assert!(outcome.executed);
        assert_eq!(outcome.state.round, 1);
    }

    #[test]
    fn test_empty_round_still_advances() {
        let mut rng = ScriptedRng::new().with_units(&[0.0, 0.0]);
        let state = GameState::new()
            .join("alice", &mut rng)
            .unwrap()
            .join("bob", &mut rng)
            .unwrap()
            .start()
            .unwrap()
            .set_ready("alice", true)
            .unwrap()
            .set_ready("bob", true)
            .unwrap();

        let outcome = state.execute_round(7);
        assert!(outcome.executed);
        assert_eq!(outcome.state.round, 1);
        assert_eq!(outcome.events.len(), 1);
        assert!(matches!(
            outcome.events[0].kind,
            EventKind::RoundAdvanced {
                from_round: 0,
                to_round: 1
            }
        ));
        assert!(outcome.state.players().iter().all(|p| !p.ready));
    }
}
