//! Order types and the boundary payload.
//!
//! Hosts submit a [`ProposedOrder`] — the deserialized wire shape. The
//! validator turns an accepted proposal into a typed [`Order`] whose
//! [`OrderKind`] is a discriminated sum, so downstream code handles every
//! case exhaustively and illegal shapes are unrepresentable.

use serde::{Deserialize, Serialize};

use crate::board::HexId;

/// Action discriminator as it appears in host payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Move,
    Attack,
    Fortify,
    Promote,
}

/// An order as proposed by a host, prior to validation.
///
/// Field layout matches the order payload hosts accept at their boundary:
/// `troop_count` is required for move/attack and ignored otherwise, and
/// fortify/promote must target their own source hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedOrder {
    /// Nickname of the ordering player.
    pub nickname: String,
    /// Name of the knight the order is issued in.
    pub knight_name: String,
    /// Queue slot, `1..=3`.
    pub order_number: u8,
    pub action_type: ActionType,
    pub from_hex_id: u8,
    pub to_hex_id: u8,
    #[serde(default)]
    pub troop_count: Option<u32>,
}

/// What a validated order does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderKind {
    /// Move troops to an adjacent hex.
    Move { from: HexId, to: HexId, troops: u32 },
    /// Assault an enemy-owned adjacent hex.
    Attack { from: HexId, to: HexId, troops: u32 },
    /// Reinforce the hex in place.
    Fortify { hex: HexId },
    /// Spend troops to raise a new knight on the hex.
    Promote { hex: HexId },
}

impl OrderKind {
    /// Hex the order acts from.
    #[must_use]
    pub fn from_hex(&self) -> HexId {
        match *self {
            OrderKind::Move { from, .. } | OrderKind::Attack { from, .. } => from,
            OrderKind::Fortify { hex } | OrderKind::Promote { hex } => hex,
        }
    }

    /// Hex the order ends on. Fortify and promote stay in place.
    #[must_use]
    pub fn to_hex(&self) -> HexId {
        match *self {
            OrderKind::Move { to, .. } | OrderKind::Attack { to, .. } => to,
            OrderKind::Fortify { hex } | OrderKind::Promote { hex } => hex,
        }
    }

    /// Troop commitment, for the kinds that carry one.
    #[must_use]
    pub fn troops(&self) -> Option<u32> {
        match *self {
            OrderKind::Move { troops, .. } | OrderKind::Attack { troops, .. } => Some(troops),
            OrderKind::Fortify { .. } | OrderKind::Promote { .. } => None,
        }
    }
}

/// A validated, queued order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Queue slot, `1..=3`. Unique within a player's queue.
    pub order_number: u8,
    /// Acting knight's name.
    pub knight: String,
    /// Ordering player's nickname.
    pub owner: String,
    #[serde(flatten)]
    pub kind: OrderKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_wire_names() {
        assert_eq!(serde_json::to_string(&ActionType::Move).unwrap(), "\"move\"");
        assert_eq!(
            serde_json::to_string(&ActionType::Fortify).unwrap(),
            "\"fortify\""
        );
        let back: ActionType = serde_json::from_str("\"attack\"").unwrap();
        assert_eq!(back, ActionType::Attack);
    }

    #[test]
    fn test_order_kind_accessors() {
        let mv = OrderKind::Move {
            from: HexId::new(23),
            to: HexId::new(24),
            troops: 50,
        };
        assert_eq!(mv.from_hex(), HexId::new(23));
        assert_eq!(mv.to_hex(), HexId::new(24));
        assert_eq!(mv.troops(), Some(50));

        let fortify = OrderKind::Fortify { hex: HexId::new(23) };
        assert_eq!(fortify.from_hex(), HexId::new(23));
        assert_eq!(fortify.to_hex(), HexId::new(23));
        assert_eq!(fortify.troops(), None);
    }

    #[test]
    fn test_order_serialization_is_tagged() {
        let order = Order {
            order_number: 1,
            knight: "alice-1".to_string(),
            owner: "alice".to_string(),
            kind: OrderKind::Attack {
                from: HexId::new(23),
                to: HexId::new(24),
                troops: 10,
            },
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["kind"], "attack");
        assert_eq!(json["from"], 23);
        assert_eq!(json["troops"], 10);

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_proposed_order_troop_count_defaults_to_none() {
        let json = r#"{
            "nickname": "alice",
            "knight_name": "alice-1",
            "order_number": 1,
            "action_type": "fortify",
            "from_hex_id": 23,
            "to_hex_id": 23
        }"#;
        let proposed: ProposedOrder = serde_json::from_str(json).unwrap();
        assert_eq!(proposed.troop_count, None);
        assert_eq!(proposed.action_type, ActionType::Fortify);
    }
}
