use std::sync::Arc;

use crate::dedup::DuplicateSuppressor;

#[derive(Clone)]
pub struct AppState {
    pub suppressor: Arc<DuplicateSuppressor>,
}

impl AppState {
    pub fn new(suppressor: DuplicateSuppressor) -> Self {
        Self {
            suppressor: Arc::new(suppressor),
        }
    }
}
