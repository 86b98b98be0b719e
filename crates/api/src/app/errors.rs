use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use trellis_core::{Format, Messages, ValidationErrors, camel_case, messages::KEY_NOT_ACCEPTABLE_TITLE};

use crate::app::render;
use crate::context::RequestContext;

/// Terminal outcome of an action that is not a rendered view.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The requested format is not offered; carries the localized message.
    #[error("not acceptable: {message}")]
    NotAcceptable { message: String },

    /// Parameter binding recorded validation errors.
    #[error("validation failed: {errors}")]
    Validation {
        body: ErrorBody,
        title: String,
        errors: ValidationErrors,
    },
}

/// Which error body a 400 response is rendered with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// JSON error object listing the field errors.
    Json,
    /// HTML error page listing the field errors.
    Html,
    /// HTML error page without details.
    Generic,
}

impl ErrorBody {
    /// Pick the body from the staged response content type, then the request format.
    pub fn select(staged_content_type: Option<&str>, format: Option<Format>) -> Self {
        if let Some(content_type) = staged_content_type {
            if content_type.contains(trellis_core::format::FORMAT_JSON) {
                return ErrorBody::Json;
            }
            if content_type.contains(trellis_core::format::FORMAT_HTML) {
                return ErrorBody::Html;
            }
        }

        match format {
            Some(Format::Json) => ErrorBody::Json,
            Some(Format::Html) => ErrorBody::Html,
            _ => ErrorBody::Generic,
        }
    }
}

impl IntoResponse for ControllerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ControllerError::NotAcceptable { message } => {
                (StatusCode::NOT_ACCEPTABLE, render::not_acceptable_page(&message)).into_response()
            }
            ControllerError::Validation { body, title, errors } => match body {
                ErrorBody::Json => validation_error(&title, &errors),
                ErrorBody::Html => {
                    (StatusCode::BAD_REQUEST, render::bad_request_page(&title, Some(&errors)))
                        .into_response()
                }
                ErrorBody::Generic => {
                    (StatusCode::BAD_REQUEST, render::bad_request_page(&title, None)).into_response()
                }
            },
        }
    }
}

/// Build a `406 (Not Acceptable)` outcome for the current request.
///
/// `acceptable` names the formats that are offered, e.g. `HTML`.
pub fn not_acceptable(ctx: &RequestContext, messages: &Messages, acceptable: &str) -> ControllerError {
    let page = camel_case(ctx.path());
    ControllerError::NotAcceptable {
        message: messages.get(KEY_NOT_ACCEPTABLE_TITLE, &[&page, acceptable]),
    }
}

pub fn validation_error(message: &str, errors: &ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": message,
            "errors": errors.to_json(),
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
