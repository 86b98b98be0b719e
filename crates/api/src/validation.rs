//! Query parameter binding with validation.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use trellis_core::{Messages, Validate, ValidationErrors};

use crate::app::errors::ControllerError;
use crate::context::{RequestContext, ResponseDraft};
use crate::hooks::{self, CoreState};

/// Query parameters that were bound and passed their own validation.
///
/// Any binding or validation failure short-circuits the action with the
/// response picked by [`hooks::catch_validation_errors`].
#[derive(Debug, Clone)]
pub struct Validated<P>(pub P);

#[async_trait]
impl<S, P> FromRequestParts<S> for Validated<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Validate + Send,
{
    type Rejection = ControllerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = match Query::<P>::try_from_uri(&parts.uri) {
            Ok(Query(params)) => params,
            Err(rejection) => {
                let errors = ValidationErrors::single("query", rejection.body_text());
                return Err(with_hook_inputs(parts, |ctx, draft, messages| {
                    hooks::validation_failure(ctx, draft, messages, errors)
                }));
            }
        };

        let errors = params.validate();
        with_hook_inputs(parts, |ctx, draft, messages| {
            hooks::catch_validation_errors(ctx, draft, messages, errors)
        })?;

        Ok(Validated(params))
    }
}

/// Call `f` with whatever the controller middleware staged for this request.
fn with_hook_inputs<T>(
    parts: &Parts,
    f: impl FnOnce(Option<&RequestContext>, Option<&ResponseDraft>, &Messages) -> T,
) -> T {
    let ctx = parts.extensions.get::<RequestContext>();
    let draft = parts.extensions.get::<ResponseDraft>();
    match parts.extensions.get::<Arc<CoreState>>() {
        Some(core) => f(ctx, draft, &core.messages),
        None => f(ctx, draft, &Messages::default()),
    }
}
