//! Player CRUD routes.

use crate::handlers::players::{create, delete as delete_handler, description, list, update};
use crate::state::AppState;
use axum::{routing::get, routing::patch, Router};

pub fn player_routes(state: AppState) -> Router {
    Router::new()
        .route("/players", get(list).post(create))
        .route("/players/:id", patch(update).delete(delete_handler))
        .route("/players/:id/description", get(description))
        .with_state(state)
}
