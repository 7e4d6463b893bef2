//! Round execution: scheduling, dispatch, and state mutation.

pub mod executor;
pub(crate) mod mutators;

pub use executor::RoundOutcome;
