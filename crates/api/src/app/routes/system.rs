use std::sync::Arc;

use axum::{Extension, http::StatusCode};
use trellis_core::messages::KEY_NOT_FOUND_TITLE;

use crate::app::errors;
use crate::hooks::CoreState;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Fallback for requests no controller handles.
pub async fn not_found(Extension(core): Extension<Arc<CoreState>>) -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        core.messages.get(KEY_NOT_FOUND_TITLE, &[]),
    )
}
