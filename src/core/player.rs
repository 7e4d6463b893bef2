//! Players and knights.
//!
//! ## Knight
//!
//! A named unit owned by a player. Knights never leave the game's flat
//! knight table: elimination flips `alive` so the name is retired forever.
//!
//! ## Player
//!
//! A participant with an inline queue of at most three orders, kept sorted
//! by order number. Setting a slot drops every slot above it, which is the
//! overwrite rule multi-order planning relies on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::HexId;
use crate::orders::Order;

/// Maximum queued orders per player per round.
pub const MAX_ORDERS: usize = 3;

/// A named unit owned by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knight {
    /// Stable unique name; never reused, even after death.
    pub name: String,
    /// Owning player's nickname.
    pub owner: String,
    /// Current hex.
    pub location: HexId,
    pub alive: bool,
    /// Position after the owner's order slots 1, 2, and 3.
    ///
    /// Slots without an order for this knight inherit the prior slot.
    /// Recomputed on every accepted order; reset after round execution.
    pub projected: [HexId; 3],
}

impl Knight {
    /// Create a living knight at `location` with an at-rest projection.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: impl Into<String>, location: HexId) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            location,
            alive: true,
            projected: [location; 3],
        }
    }

    /// Reset the projection to the knight's current location.
    pub fn reset_projection(&mut self) {
        self.projected = [self.location; 3];
    }
}

/// A participant in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub nickname: String,
    /// Alliance name, if the player has joined one.
    pub alliance: Option<String>,
    /// Names of this player's knights, in creation order.
    pub knights: Vec<String>,
    /// Whether the player has marked the current round ready.
    pub ready: bool,
    /// Inactive players do not gate round execution.
    pub active: bool,
    /// Queued orders, ascending by `order_number`, at most three.
    orders: SmallVec<[Order; MAX_ORDERS]>,
}

impl Player {
    /// Create an active, not-ready player with no knights or orders.
    #[must_use]
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            alliance: None,
            knights: Vec::new(),
            ready: false,
            active: true,
            orders: SmallVec::new(),
        }
    }

    /// The queued orders, ascending by order number.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The order queued at `slot`, if any.
    #[must_use]
    pub fn order_at(&self, slot: u8) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_number == slot)
    }

    /// Whether any orders are queued.
    #[must_use]
    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Queue an order, dropping the targeted slot and every slot above it.
    ///
    /// The queue stays sorted because everything at or above the new slot is
    /// removed before the push.
    pub fn queue_order(&mut self, order: Order) {
        self.orders.retain(|o| o.order_number < order.order_number);
        self.orders.push(order);
    }

    /// Remove and return the lowest-numbered queued order.
    pub fn pop_front_order(&mut self) -> Option<Order> {
        if self.orders.is_empty() {
            None
        } else {
            Some(self.orders.remove(0))
        }
    }

    /// Drop all queued orders.
    pub fn clear_orders(&mut self) {
        self.orders.clear();
    }
}
