use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use trellis_core::{
    Format, SessionId,
    headers::{HEADER_REQUESTED_WITH, is_ajax},
};

use crate::context::{RequestContext, ResponseDraft};
use crate::hooks::{CoreState, HookState};

#[derive(Debug, Deserialize)]
struct FormatParam {
    format: Option<String>,
}

/// Outermost controller middleware: resolve session and format, stage the
/// draft response and make both available to hooks and actions.
pub async fn resolve_context(
    State(state): State<HookState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let core = state.core.clone();

    let cookie = session_cookie(req.headers(), &core.config.session_cookie);
    let (session_id, issued) = SessionId::from_cookie_or_new(cookie);

    let explicit = Query::<FormatParam>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(p)| p.format);
    let format = Format::negotiate(explicit.as_deref(), header_str(req.headers(), header::ACCEPT));

    let ajax = is_ajax(header_str(req.headers(), HEADER_REQUESTED_WITH));

    let ctx = RequestContext::new(req.method().clone(), req.uri().path(), format, session_id)
        .with_ajax(ajax)
        .with_controller(state.controller);
    let draft = ResponseDraft::default();

    req.extensions_mut().insert(ctx);
    req.extensions_mut().insert(draft.clone());
    req.extensions_mut().insert(core.clone());

    let mut response = next.run(req).await;
    draft.apply_to(&mut response);

    if issued {
        set_session_cookie(&mut response, &core, session_id);
    }

    response
}

fn header_str<K: header::AsHeaderName>(headers: &HeaderMap, name: K) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Find the value of cookie `name` across all `Cookie` headers.
fn session_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
}

fn set_session_cookie(response: &mut Response, core: &Arc<CoreState>, session_id: SessionId) {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        core.config.session_cookie, session_id
    );
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("failed to encode session cookie: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark; SID=abc"));
        headers.append(header::COOKIE, HeaderValue::from_static("other=1"));

        assert_eq!(session_cookie(&headers, "SID"), Some("abc"));
        assert_eq!(session_cookie(&headers, "other"), Some("1"));
        assert_eq!(session_cookie(&headers, "missing"), None);
    }

    #[test]
    fn quoted_cookie_values_are_unquoted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("SID=\"abc\""));
        assert_eq!(session_cookie(&headers, "SID"), Some("abc"));
    }
}
