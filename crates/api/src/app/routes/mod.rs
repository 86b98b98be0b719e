use std::sync::Arc;

use axum::Router;

use crate::hooks::{self, CoreState};

pub mod application;
pub mod system;

/// Router for all controller endpoints, each wrapped in the core hooks.
pub fn router(core: Arc<CoreState>) -> Router {
    Router::new().merge(hooks::attach(application::router(), core, application::CONTROLLER))
}
