//! Shared application state for all routes.

use crate::store::PlayerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlayerStore>,
}

impl AppState {
    pub fn new(store: impl PlayerStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
