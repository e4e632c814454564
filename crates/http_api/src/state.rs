use std::sync::Arc;

use stackly_app::{AppState, InferenceClient};

#[derive(Clone)]
pub struct HttpState {
    pub app: AppState,
    pub inference: Arc<InferenceClient>,
}

impl HttpState {
    pub fn new(app: AppState, inference: Arc<InferenceClient>) -> Self {
        Self { app, inference }
    }
}
