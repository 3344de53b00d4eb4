//! Response bodies.

use crate::model::Player;
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Success body with only a human-readable message.
#[derive(Serialize)]
pub struct Confirmation {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct PlayerPage {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub players: Vec<Player>,
}

pub fn confirm(status: StatusCode, message: &'static str) -> (StatusCode, Json<Confirmation>) {
    (status, Json(Confirmation { message }))
}
