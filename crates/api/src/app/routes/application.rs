//! Application controller: the index page and the settings page.

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use trellis_core::{Format, Messages, format::FORMAT_HTML, messages::KEY_SETTINGS_TITLE};

use crate::app::errors::{self, ControllerError};
use crate::app::render::View;
use crate::context::RequestContext;
use crate::hooks::CoreState;

/// Controller name reported to the core hooks.
pub const CONTROLLER: &str = "Application";

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/settings", get(settings))
}

pub async fn index(
    Extension(ctx): Extension<RequestContext>,
    Extension(core): Extension<Arc<CoreState>>,
) -> Result<View, ControllerError> {
    index_action(&ctx, &core.messages)
}

pub async fn settings(
    Extension(ctx): Extension<RequestContext>,
    Extension(core): Extension<Arc<CoreState>>,
) -> Result<View, ControllerError> {
    settings_action(&ctx, &core.messages)
}

/// The index page.
///
/// Shows the settings page, unless the requested format is JSON.
pub fn index_action(ctx: &RequestContext, messages: &Messages) -> Result<View, ControllerError> {
    if ctx.format() != Some(Format::Json) {
        return settings_action(ctx, messages);
    }
    Ok(View::Index)
}

/// The settings page.
///
/// Only available as HTML; any other format gets a `406 (Not Acceptable)`.
pub fn settings_action(ctx: &RequestContext, messages: &Messages) -> Result<View, ControllerError> {
    if ctx.format() == Some(Format::Html) {
        tracing::debug!(session = %ctx.session_id(), "rendering settings page");
        return Ok(View::Settings {
            title: messages.get(KEY_SETTINGS_TITLE, &[]),
            session_id: ctx.session_id(),
        });
    }
    Err(errors::not_acceptable(ctx, messages, &FORMAT_HTML.to_uppercase()))
}
