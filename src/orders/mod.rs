//! Order model, projection, and validation.

pub mod order;
pub mod projection;
pub mod validator;

pub use order::{ActionType, Order, OrderKind, ProposedOrder};
pub use validator::{validate, RejectionCode};
