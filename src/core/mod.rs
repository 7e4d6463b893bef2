//! Core engine types: state, players, knights, events, RNG.

pub mod events;
pub mod player;
pub mod rng;
pub mod state;

pub use events::{EventKind, EventRecord};
pub use player::{Knight, Player, MAX_ORDERS};
pub use rng::{DieSource, EngineRng, GameRng, ScriptedRng};
pub use state::{
    GameState, GameStatus, HexState, LobbyError, FORTIFY_REINFORCEMENTS, MAX_PLAYERS,
    PROMOTE_COST, STARTING_GARRISON,
};
