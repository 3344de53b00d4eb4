//! HTTP handlers for player CRUD.

pub mod players;
pub use players::*;
