//! Shared application state for all routes.

use crate::service::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: impl UserStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
