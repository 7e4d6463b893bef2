//! Knight position projection across order slots.
//!
//! Orders are planned against the future: order 2 must depart from wherever
//! order 1 leaves the knight. Projection is a pure function of a knight's
//! current location and the owner's queued orders; the cached copy on
//! [`Knight`] is recomputed after every accepted order so it can never
//! drift.

use rustc_hash::FxHashMap;

use crate::board::HexId;
use crate::core::player::{Knight, Player};

/// Positions of one knight after order slots 1, 2, and 3.
///
/// A slot without an order for this knight inherits the prior slot's
/// position; slot 1 inherits the knight's current location.
#[must_use]
pub fn project_knight(knight: &Knight, player: &Player) -> [HexId; 3] {
    let mut position = knight.location;
    let mut slots = [position; 3];
    for slot in 1..=3u8 {
        if let Some(order) = player.order_at(slot) {
            if order.knight == knight.name {
                position = order.kind.to_hex();
            }
        }
        slots[usize::from(slot - 1)] = position;
    }
    slots
}

/// Projected positions for every living knight of `player`.
#[must_use]
pub fn project_positions(player: &Player, knights: &[Knight]) -> FxHashMap<String, [HexId; 3]> {
    let mut out = FxHashMap::default();
    for name in &player.knights {
        let Some(knight) = knights.iter().find(|k| &k.name == name) else {
            continue;
        };
        if !knight.alive {
            continue;
        }
        out.insert(name.clone(), project_knight(knight, player));
    }
    out
}

/// Hex a new order at `slot` must depart from: the knight's projected
/// position after the preceding slots.
#[must_use]
pub fn expected_from(knight: &Knight, player: &Player, slot: u8) -> HexId {
    if slot <= 1 {
        knight.location
    } else {
        project_knight(knight, player)[usize::from(slot - 2)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::{Order, OrderKind};

    fn knight_at(name: &str, hex: u8) -> Knight {
        Knight::new(name, "alice", HexId::new(hex))
    }

    fn player_with(orders: Vec<Order>) -> Player {
        let mut player = Player::new("alice");
        player.knights = vec!["alice-1".to_string(), "alice-2".to_string()];
        for order in orders {
            player.queue_order(order);
        }
        player
    }

    fn move_order(slot: u8, knight: &str, from: u8, to: u8) -> Order {
        Order {
            order_number: slot,
            knight: knight.to_string(),
            owner: "alice".to_string(),
            kind: OrderKind::Move {
                from: HexId::new(from),
                to: HexId::new(to),
                troops: 5,
            },
        }
    }

    #[test]
    fn test_no_orders_projects_in_place() {
        let knight = knight_at("alice-1", 23);
        let player = player_with(vec![]);
        assert_eq!(project_knight(&knight, &player), [HexId::new(23); 3]);
    }

    #[test]
    fn test_chained_moves_project_forward() {
        let knight = knight_at("alice-1", 23);
        let player = player_with(vec![
            move_order(1, "alice-1", 23, 24),
            move_order(2, "alice-1", 24, 25),
        ]);

        assert_eq!(
            project_knight(&knight, &player),
            [HexId::new(24), HexId::new(25), HexId::new(25)]
        );
    }

    #[test]
    fn test_other_knights_orders_do_not_move_us() {
        let knight = knight_at("alice-1", 23);
        let player = player_with(vec![
            move_order(1, "alice-2", 26, 27),
            move_order(2, "alice-1", 23, 24),
        ]);

        assert_eq!(
            project_knight(&knight, &player),
            [HexId::new(23), HexId::new(24), HexId::new(24)]
        );
    }

    #[test]
    fn test_expected_from_follows_prior_slots() {
        let knight = knight_at("alice-1", 23);
        let player = player_with(vec![move_order(1, "alice-1", 23, 24)]);

        assert_eq!(expected_from(&knight, &player, 1), HexId::new(23));
        assert_eq!(expected_from(&knight, &player, 2), HexId::new(24));
        assert_eq!(expected_from(&knight, &player, 3), HexId::new(24));
    }

    #[test]
    fn test_expected_from_ignores_the_slot_being_replaced() {
        let knight = knight_at("alice-1", 23);
        let player = player_with(vec![
            move_order(1, "alice-1", 23, 24),
            move_order(2, "alice-1", 24, 25),
        ]);

        // Replacing slot 2 only consults slot 1's outcome.
        assert_eq!(expected_from(&knight, &player, 2), HexId::new(24));
    }

    #[test]
    fn test_project_positions_skips_dead_knights() {
        let mut dead = knight_at("alice-1", 23);
        dead.alive = false;
        let living = knight_at("alice-2", 26);
        let player = player_with(vec![]);

        let map = project_positions(&player, &[dead, living]);
        assert!(!map.contains_key("alice-1"));
        assert_eq!(map["alice-2"], [HexId::new(26); 3]);
    }
}
