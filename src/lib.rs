//! Cricket roster: REST backend for player records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{ServiceConfig, StoreKind};
pub use error::{AppError, ConfigError, StoreError, ValidationError};
pub use model::{NewPlayer, Player, Role};
pub use routes::{app, common_routes_with_ready, player_routes};
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_players_table, ListQuery, MemoryPlayerStore, PgPlayerStore, PlayerFilter,
    PlayerStore, SortKey,
};
