//! Game state and lifecycle operations.
//!
//! ## GameState
//!
//! The complete authoritative snapshot of one game: round counter, status,
//! per-hex dynamic data, players in join order, and a flat knight table.
//! Entities reference each other by id (hex index, nickname, knight name)
//! rather than owning each other, which keeps snapshots serializable and
//! free of cyclic ownership.
//!
//! ## Purity
//!
//! Every operation takes `&self` and returns a new state; rejected inputs
//! leave the original untouched. The hex table uses a persistent vector so
//! these functional updates stay cheap.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::{build_board, Board, HexId, HEX_COUNT, KEEP_HEXES};
use crate::core::player::{Knight, Player};
use crate::core::rng::EngineRng;
use crate::orders::{projection, validate, ProposedOrder, RejectionCode};

/// Troops a promote order spends to raise a knight.
pub const PROMOTE_COST: u32 = 100;
/// Troops a fortify order adds to the hex.
pub const FORTIFY_REINFORCEMENTS: u32 = 200;
/// Garrison seeded on a player's starting keep at join.
pub const STARTING_GARRISON: u32 = 100;
/// One keep per player bounds the lobby.
pub const MAX_PLAYERS: usize = KEEP_HEXES.len();

/// Lifecycle status of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Lobby,
    Active,
    Completed,
    Archived,
}

/// Per-hex dynamic data: ownership and troops present.
///
/// A hex can hold several players' troops at once (troops in transit across
/// unowned or contested ground); entries are removed when they reach zero,
/// so counts are never zero and never negative.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexState {
    /// Current owner's nickname, if anyone holds the hex.
    pub owner: Option<String>,
    /// Troops present, by owning player's nickname.
    pub troops: FxHashMap<String, u32>,
}

impl HexState {
    /// Troops `nickname` has on this hex.
    #[must_use]
    pub fn troops_of(&self, nickname: &str) -> u32 {
        self.troops.get(nickname).copied().unwrap_or(0)
    }

    /// All troops on this hex, every player combined.
    #[must_use]
    pub fn total_troops(&self) -> u32 {
        self.troops.values().sum()
    }

    /// Add troops for `nickname`.
    pub fn add_troops(&mut self, nickname: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.troops.entry(nickname.to_string()).or_insert(0) += count;
    }

    /// Remove troops for `nickname`, dropping the entry at zero.
    ///
    /// Panics if fewer troops are present than requested; callers clamp
    /// their commitments first, so underflow means corrupted state.
    pub fn remove_troops(&mut self, nickname: &str, count: u32) {
        if count == 0 {
            return;
        }
        let present = self.troops_of(nickname);
        assert!(
            present >= count,
            "removing {count} troops of {nickname} but only {present} present"
        );
        if present == count {
            self.troops.remove(nickname);
        } else {
            self.troops.insert(nickname.to_string(), present - count);
        }
    }

    /// Overwrite `nickname`'s troop count. Zero clears the entry.
    pub fn set_troops(&mut self, nickname: &str, count: u32) {
        if count == 0 {
            self.troops.remove(nickname);
        } else {
            self.troops.insert(nickname.to_string(), count);
        }
    }

    /// The single player with troops here, if exactly one has any.
    #[must_use]
    pub fn sole_occupant(&self) -> Option<&str> {
        let mut occupants = self.troops.keys();
        match (occupants.next(), occupants.next()) {
            (Some(only), None) => Some(only.as_str()),
            _ => None,
        }
    }
}

/// Errors from lobby and lifecycle operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("game is not in the lobby")]
    NotInLobby,
    #[error("game is full")]
    GameFull,
    #[error("nickname is already taken")]
    NicknameTaken,
    #[error("no free keep remains")]
    NoFreeKeep,
    #[error("player not found")]
    UnknownPlayer,
    #[error("at least two players are required")]
    NotEnoughPlayers,
}

/// Complete authoritative snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Rounds executed so far; increments exactly once per execution.
    pub round: u32,
    pub status: GameStatus,
    /// Dynamic state per hex, indexed by `HexId`.
    hexes: Vector<HexState>,
    /// Players in join order. The executor's scheduling draw indexes this
    /// list, so join order is part of the determinism contract.
    players: Vec<Player>,
    /// Every knight ever created, in creation order. Dead knights keep
    /// their entry so names are never reused.
    knights: Vec<Knight>,
    /// Index the next appended event receives.
    event_cursor: u64,
    /// Static topology; rebuilt on deserialization.
    #[serde(skip)]
    board: Board,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create an empty lobby at round zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            round: 0,
            status: GameStatus::Lobby,
            hexes: (0..HEX_COUNT).map(|_| HexState::default()).collect(),
            players: Vec::new(),
            knights: Vec::new(),
            event_cursor: 0,
            board: build_board(),
        }
    }

    // === Accessors ===

    /// The board topology.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by nickname.
    #[must_use]
    pub fn player(&self, nickname: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.nickname == nickname)
    }

    pub(crate) fn player_mut(&mut self, nickname: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.nickname == nickname)
    }

    pub(crate) fn players_mut(&mut self) -> &mut Vec<Player> {
        &mut self.players
    }

    /// All knights ever created, in creation order.
    #[must_use]
    pub fn knights(&self) -> &[Knight] {
        &self.knights
    }

    /// Look up a knight by name.
    #[must_use]
    pub fn knight(&self, name: &str) -> Option<&Knight> {
        self.knights.iter().find(|k| k.name == name)
    }

    pub(crate) fn knight_mut(&mut self, name: &str) -> Option<&mut Knight> {
        self.knights.iter_mut().find(|k| k.name == name)
    }

    /// Dynamic state of a hex.
    ///
    /// Panics if `id` is off the board; host input is range-checked by the
    /// validator before it reaches a lookup.
    #[must_use]
    pub fn hex_state(&self, id: HexId) -> &HexState {
        &self.hexes[id.index()]
    }

    pub(crate) fn hex_state_mut(&mut self, id: HexId) -> &mut HexState {
        self.hexes
            .get_mut(id.index())
            .expect("hex id validated before mutation")
    }

    /// Troops `nickname` has on `id`.
    #[must_use]
    pub fn troops_on(&self, id: HexId, nickname: &str) -> u32 {
        self.hex_state(id).troops_of(nickname)
    }

    /// Current owner of `id`.
    #[must_use]
    pub fn owner_of(&self, id: HexId) -> Option<&str> {
        self.hex_state(id).owner.as_deref()
    }

    /// Names of `nickname`'s living knights on `id`, in creation order.
    #[must_use]
    pub fn knights_on(&self, id: HexId, nickname: &str) -> Vec<String> {
        self.knights
            .iter()
            .filter(|k| k.alive && k.location == id && k.owner == nickname)
            .map(|k| k.name.clone())
            .collect()
    }

    /// Alliance bonus for `nickname`: the member count of their alliance,
    /// or 1 for a solo player. Balance changes happen here and nowhere else.
    #[must_use]
    pub fn alliance_size(&self, nickname: &str) -> u32 {
        match self.player(nickname).and_then(|p| p.alliance.as_deref()) {
            Some(alliance) => self
                .players
                .iter()
                .filter(|p| p.alliance.as_deref() == Some(alliance))
                .count() as u32,
            None => 1,
        }
    }

    /// Index the next appended event will receive.
    #[must_use]
    pub fn event_cursor(&self) -> u64 {
        self.event_cursor
    }

    pub(crate) fn take_event_index(&mut self) -> u64 {
        let index = self.event_cursor;
        self.event_cursor += 1;
        index
    }

    // === Host / scenario setup ===

    /// Set a hex's owner directly. Setup and tooling only; gameplay
    /// ownership changes flow through the mutators.
    pub fn set_owner(&mut self, id: HexId, owner: Option<String>) {
        self.hex_state_mut(id).owner = owner;
    }

    /// Set a player's troop count on a hex directly. Setup and tooling
    /// only.
    pub fn set_troops(&mut self, id: HexId, nickname: &str, count: u32) {
        self.hex_state_mut(id).set_troops(nickname, count);
    }

    /// Create a knight for an existing player at `id` and return its name.
    pub fn place_knight(&mut self, nickname: &str, id: HexId) -> Result<String, LobbyError> {
        if self.player(nickname).is_none() {
            return Err(LobbyError::UnknownPlayer);
        }
        Ok(self.create_knight(nickname, id))
    }

    /// Allocate the next knight name for `nickname` and register the
    /// knight. The player must exist.
    pub(crate) fn create_knight(&mut self, nickname: &str, id: HexId) -> String {
        let ordinal = self
            .knights
            .iter()
            .filter(|k| k.owner == nickname)
            .count()
            + 1;
        let name = format!("{nickname}-{ordinal}");
        self.knights.push(Knight::new(name.clone(), nickname, id));
        let player = self
            .player_mut(nickname)
            .expect("knight owner must be a registered player");
        player.knights.push(name.clone());
        name
    }

    /// Mark a knight dead. Gameplay eliminations flow through battles;
    /// this is for scenario setup and tooling.
    pub fn eliminate_knight(&mut self, name: &str) {
        if let Some(knight) = self.knight_mut(name) {
            knight.alive = false;
        }
    }

    pub(crate) fn reset_all_projections(&mut self) {
        for knight in &mut self.knights {
            knight.reset_projection();
        }
    }

    /// Recompute the cached projections of `nickname`'s knights from their
    /// locations and the player's current queue.
    pub(crate) fn refresh_projections(&mut self, nickname: &str) {
        let Some(player) = self.player(nickname).cloned() else {
            return;
        };
        for name in &player.knights {
            if let Some(index) = self.knights.iter().position(|k| &k.name == name) {
                let projected = projection::project_knight(&self.knights[index], &player);
                self.knights[index].projected = projected;
            }
        }
    }

    // === Lobby lifecycle ===

    /// Add a player to the lobby.
    ///
    /// Creates the player's first knight on a randomly chosen free keep and
    /// grants them that keep with its starting garrison.
    pub fn join(&self, nickname: &str, rng: &mut dyn EngineRng) -> Result<GameState, LobbyError> {
        if self.status != GameStatus::Lobby {
            return Err(LobbyError::NotInLobby);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(LobbyError::GameFull);
        }
        if self.player(nickname).is_some() {
            return Err(LobbyError::NicknameTaken);
        }

        let free_keeps: Vec<HexId> = KEEP_HEXES
            .into_iter()
            .filter(|&keep| self.owner_of(keep).is_none())
            .collect();
        if free_keeps.is_empty() {
            return Err(LobbyError::NoFreeKeep);
        }
        let keep = free_keeps[(rng.next_unit() * free_keeps.len() as f64) as usize];

        let mut next = self.clone();
        next.players.push(Player::new(nickname));
        let knight = next.create_knight(nickname, keep);
        let hex = next.hex_state_mut(keep);
        hex.owner = Some(nickname.to_string());
        hex.add_troops(nickname, STARTING_GARRISON);

        debug!(nickname, %keep, knight = %knight, "player joined");
        Ok(next)
    }

    /// Set or clear a player's alliance.
    pub fn set_alliance(
        &self,
        nickname: &str,
        alliance: Option<String>,
    ) -> Result<GameState, LobbyError> {
        if self.player(nickname).is_none() {
            return Err(LobbyError::UnknownPlayer);
        }
        let mut next = self.clone();
        next.player_mut(nickname)
            .expect("player existence checked above")
            .alliance = alliance;
        Ok(next)
    }

    /// Start the game: lobby becomes active.
    pub fn start(&self) -> Result<GameState, LobbyError> {
        if self.status != GameStatus::Lobby {
            return Err(LobbyError::NotInLobby);
        }
        if self.players.len() < 2 {
            return Err(LobbyError::NotEnoughPlayers);
        }
        let mut next = self.clone();
        next.status = GameStatus::Active;
        debug!(players = next.players.len(), "game started");
        Ok(next)
    }

    /// Mark the game completed. Victory conditions are host policy.
    #[must_use]
    pub fn complete(&self) -> GameState {
        let mut next = self.clone();
        next.status = GameStatus::Completed;
        next
    }

    /// Archive the game.
    #[must_use]
    pub fn archive(&self) -> GameState {
        let mut next = self.clone();
        next.status = GameStatus::Archived;
        next
    }

    /// Set a player's readiness flag.
    pub fn set_ready(&self, nickname: &str, ready: bool) -> Result<GameState, LobbyError> {
        if self.player(nickname).is_none() {
            return Err(LobbyError::UnknownPlayer);
        }
        let mut next = self.clone();
        next.player_mut(nickname)
            .expect("player existence checked above")
            .ready = ready;
        Ok(next)
    }

    // === Orders ===

    /// Validate and queue an order.
    ///
    /// On acceptance the order lands in its owner's queue (overwriting its
    /// slot and any higher slots) and the owner's knight projections are
    /// recomputed. On rejection the original state is untouched.
    pub fn submit_order(&self, proposed: &ProposedOrder) -> Result<GameState, RejectionCode> {
        let order = validate(proposed, self)?;

        let mut next = self.clone();
        next.player_mut(&order.owner)
            .expect("owner validated against state")
            .queue_order(order);
        next.refresh_projections(&proposed.nickname);

        debug!(
            nickname = %proposed.nickname,
            knight = %proposed.knight_name,
            slot = proposed.order_number,
            "order queued"
        );
        Ok(next)
    }

    /// Projected positions of `nickname`'s living knights across order
    /// slots 1–3, for UI planning.
    #[must_use]
    pub fn project_positions(&self, nickname: &str) -> Option<FxHashMap<String, [HexId; 3]>> {
        let player = self.player(nickname)?;
        Some(projection::project_positions(player, &self.knights))
    }
}
