//! Order validation.
//!
//! `validate` is a pure function from a proposed order and a state snapshot
//! to either the typed order that gets queued or a rejection code. The
//! checks run in a fixed, normative sequence — the first failure wins — so
//! hosts can rely on which code surfaces when several conditions fail at
//! once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::order::{ActionType, Order, OrderKind, ProposedOrder};
use super::projection;
use crate::board::HexId;
use crate::core::state::{GameState, PROMOTE_COST};

/// Why a proposed order was rejected.
///
/// Serialized as the SCREAMING_SNAKE_CASE code strings hosts surface to
/// players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    #[error("order number must be between 1 and 3")]
    InvalidOrderNumber,
    #[error("ordering player does not exist")]
    PlayerNotFound,
    #[error("knight does not exist")]
    KnightNotFound,
    #[error("knight belongs to another player")]
    KnightNotOwned,
    #[error("knight is dead")]
    KnightDead,
    #[error("hex is not on the board")]
    HexNotFound,
    #[error("source hex does not match the knight's projected position")]
    FromMismatch,
    #[error("fortify must target its own hex")]
    FortifyDestinationInvalid,
    #[error("promote must target its own hex")]
    PromoteDestinationInvalid,
    #[error("promoting requires {PROMOTE_COST} troops on the hex")]
    PromoteInsufficientTroops,
    #[error("destination is not adjacent to the source")]
    NotNeighbor,
    #[error("troop count must be positive")]
    InvalidTroopCount,
    #[error("not enough troops on the source hex")]
    InsufficientTroops,
    #[error("attack target is not enemy-owned")]
    AttackTargetNotEnemy,
}

/// Validate a proposed order against a state snapshot.
///
/// No state is mutated; on success the returned [`Order`] is what
/// `submit_order` queues.
pub fn validate(proposed: &ProposedOrder, state: &GameState) -> Result<Order, RejectionCode> {
    if !(1..=3).contains(&proposed.order_number) {
        return Err(RejectionCode::InvalidOrderNumber);
    }

    let player = state
        .player(&proposed.nickname)
        .ok_or(RejectionCode::PlayerNotFound)?;

    let knight = state
        .knight(&proposed.knight_name)
        .ok_or(RejectionCode::KnightNotFound)?;
    if knight.owner != proposed.nickname {
        return Err(RejectionCode::KnightNotOwned);
    }
    if !knight.alive {
        return Err(RejectionCode::KnightDead);
    }

    let from = HexId::new(proposed.from_hex_id);
    let to = HexId::new(proposed.to_hex_id);
    if !state.board().contains(from) || !state.board().contains(to) {
        return Err(RejectionCode::HexNotFound);
    }

    if from != projection::expected_from(knight, player, proposed.order_number) {
        return Err(RejectionCode::FromMismatch);
    }

    let kind = match proposed.action_type {
        ActionType::Fortify => {
            if to != from {
                return Err(RejectionCode::FortifyDestinationInvalid);
            }
            OrderKind::Fortify { hex: from }
        }
        ActionType::Promote => {
            if to != from {
                return Err(RejectionCode::PromoteDestinationInvalid);
            }
            if state.troops_on(from, &proposed.nickname) < PROMOTE_COST {
                return Err(RejectionCode::PromoteInsufficientTroops);
            }
            OrderKind::Promote { hex: from }
        }
        ActionType::Move | ActionType::Attack => {
            if !state.board().is_neighbor(from, to) {
                return Err(RejectionCode::NotNeighbor);
            }
            let troops = proposed.troop_count.unwrap_or(0);
            if troops == 0 {
                return Err(RejectionCode::InvalidTroopCount);
            }
            if state.troops_on(from, &proposed.nickname) < troops {
                return Err(RejectionCode::InsufficientTroops);
            }
            if proposed.action_type == ActionType::Attack {
                match state.owner_of(to) {
                    Some(owner) if owner != proposed.nickname => {}
                    _ => return Err(RejectionCode::AttackTargetNotEnemy),
                }
                OrderKind::Attack { from, to, troops }
            } else {
                OrderKind::Move { from, to, troops }
            }
        }
    };

    Ok(Order {
        order_number: proposed.order_number,
        knight: proposed.knight_name.clone(),
        owner: proposed.nickname.clone(),
        kind,
    })
}
