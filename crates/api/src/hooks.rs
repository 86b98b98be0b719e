//! Core request-lifecycle hooks shared by every controller.
//!
//! Attaching a router with [`attach`] wraps each of its routes in, from the
//! outside in:
//! - `resolve_context`: session id, negotiated format, draft response
//! - `log_response`: post-hook, logs the final status via the status table
//! - `set_format`: stages the `Vary` header for cacheable requests
//! - `log_request`: debug line for every inbound request
//!
//! Validation errors are intercepted while binding parameters, see
//! [`crate::validation::Validated`] and [`catch_validation_errors`].

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{HeaderValue, header},
    middleware::{self as axum_mw, Next},
    response::Response,
    Router,
};
use tower::ServiceBuilder;

use trellis_core::{
    Messages, Severity, ValidationErrors, VaryPolicy,
    headers::is_cacheable_method,
    messages::KEY_BAD_REQUEST_TITLE,
    status_log,
};

use crate::app::errors::{ControllerError, ErrorBody};
use crate::config::ApiConfig;
use crate::context::{RequestContext, ResponseDraft};
use crate::middleware;

/// Settings the hooks depend on.
#[derive(Debug, Clone)]
pub struct HookConfig {
    pub session_auth: bool,
    pub session_cookie: String,
}

/// Process-wide state shared by all hooks and actions.
#[derive(Debug, Clone)]
pub struct CoreState {
    pub config: HookConfig,
    pub messages: Messages,
}

impl CoreState {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            config: HookConfig {
                session_auth: config.session_auth,
                session_cookie: config.session_cookie.clone(),
            },
            messages: config.messages.clone(),
        }
    }
}

/// State of one controller's hook stack.
#[derive(Debug, Clone)]
pub struct HookState {
    pub core: Arc<CoreState>,
    pub controller: &'static str,
}

/// Wrap every route of `router` in the core hooks on behalf of `controller`.
pub fn attach(router: Router, core: Arc<CoreState>, controller: &'static str) -> Router {
    let state = HookState { core, controller };

    router.layer(
        ServiceBuilder::new()
            .layer(axum_mw::from_fn_with_state(state, middleware::resolve_context))
            .layer(axum_mw::from_fn(log_response))
            .layer(axum_mw::from_fn(set_format))
            .layer(axum_mw::from_fn(log_request)),
    )
}

/// Specify that cacheable responses vary on the negotiated content type.
pub async fn set_format(
    Extension(ctx): Extension<RequestContext>,
    Extension(draft): Extension<ResponseDraft>,
    Extension(core): Extension<Arc<CoreState>>,
    req: Request,
    next: Next,
) -> Response {
    stage_vary(&ctx, &draft, core.config.session_auth);
    next.run(req).await
}

/// Stage `Vary` on GET/HEAD requests unless a value is staged already.
pub fn stage_vary(ctx: &RequestContext, draft: &ResponseDraft, session_auth: bool) {
    if draft.contains(&header::VARY) || !is_cacheable_method(ctx.method().as_str()) {
        return;
    }

    let policy = VaryPolicy {
        session_auth,
        controller: ctx.controller(),
        ajax: ctx.is_ajax(),
    };
    match HeaderValue::from_str(&policy.header_value()) {
        Ok(value) => draft.insert(header::VARY, value),
        Err(e) => tracing::warn!("invalid Vary value: {e}"),
    }
}

/// Turn recorded validation errors into a terminal 400 response.
pub fn catch_validation_errors(
    ctx: Option<&RequestContext>,
    draft: Option<&ResponseDraft>,
    messages: &Messages,
    errors: ValidationErrors,
) -> Result<(), ControllerError> {
    if !errors.has_errors() {
        return Ok(());
    }
    Err(validation_failure(ctx, draft, messages, errors))
}

/// Build the 400 outcome for `errors`.
///
/// The body follows the staged response content type first, then the
/// negotiated request format, and falls back to the generic error page.
pub fn validation_failure(
    ctx: Option<&RequestContext>,
    draft: Option<&ResponseDraft>,
    messages: &Messages,
    errors: ValidationErrors,
) -> ControllerError {
    let staged = draft.and_then(ResponseDraft::content_type);
    let body = ErrorBody::select(staged.as_deref(), ctx.and_then(RequestContext::format));

    ControllerError::Validation {
        body,
        title: messages.get(KEY_BAD_REQUEST_TITLE, &[]),
        errors,
    }
}

pub async fn log_request(Extension(ctx): Extension<RequestContext>, req: Request, next: Next) -> Response {
    tracing::debug!(
        method = %ctx.method(),
        format = ctx.format().map(|f| f.as_str()),
        path = ctx.path(),
        session = %ctx.session_id(),
        "received request"
    );
    next.run(req).await
}

/// Log the returned status once everything else is done.
pub async fn log_response(Extension(ctx): Extension<RequestContext>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    log_status(&ctx, response.status().as_u16());
    response
}

pub fn log_status(ctx: &RequestContext, status: u16) {
    let Some(entry) = status_log::lookup(status) else {
        return;
    };

    let message = entry.message();
    let session = ctx.session_id();
    let path = entry.include_path.then(|| ctx.path());
    let format = entry
        .include_format
        .then(|| ctx.format().map(|f| f.as_str()))
        .flatten();

    match entry.severity {
        Severity::Debug => tracing::debug!(session = %session, path, format, "{message}"),
        Severity::Warn => tracing::warn!(session = %session, path, format, "{message}"),
    }
}
