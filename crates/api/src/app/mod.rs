//! HTTP application wiring (Axum router + controllers).
//!
//! - `routes/`: controllers and their actions (one file per controller)
//! - `render.rs`: views and error pages
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::config::ApiConfig;
use crate::hooks::CoreState;

pub mod errors;
pub mod render;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: ApiConfig) -> Router {
    let core = Arc::new(CoreState::from_config(&config));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(core.clone()))
        .fallback(routes::system::not_found)
        .layer(Extension(core))
}
