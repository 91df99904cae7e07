//! Shared application state for all routes.

use crate::store::PatientStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PatientStore>,
}

impl AppState {
    pub fn new(store: impl PatientStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
