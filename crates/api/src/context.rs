use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use axum::response::Response;

use trellis_core::{Format, SessionId};

/// Per-request context resolved before any hook runs.
///
/// This is immutable and present for every route attached to a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    path: String,
    format: Option<Format>,
    session_id: SessionId,
    ajax: bool,
    controller: &'static str,
}

impl RequestContext {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        format: impl Into<Option<Format>>,
        session_id: SessionId,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            format: format.into(),
            session_id,
            ajax: false,
            controller: "",
        }
    }

    pub fn with_ajax(mut self, ajax: bool) -> Self {
        self.ajax = ajax;
        self
    }

    pub fn with_controller(mut self, controller: &'static str) -> Self {
        self.controller = controller;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Negotiated format; `None` when the client accepts nothing we render.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn is_ajax(&self) -> bool {
        self.ajax
    }

    pub fn controller(&self) -> &'static str {
        self.controller
    }
}

/// Response headers staged by pre-hooks before the action runs.
///
/// Cloning shares the same staging area. Staged headers are copied onto the
/// final response unless the action set the same header itself.
#[derive(Debug, Clone, Default)]
pub struct ResponseDraft(Arc<Mutex<HeaderMap>>);

impl ResponseDraft {
    fn lock(&self) -> MutexGuard<'_, HeaderMap> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.lock().contains_key(name)
    }

    pub fn get(&self, name: &HeaderName) -> Option<HeaderValue> {
        self.lock().get(name).cloned()
    }

    pub fn insert(&self, name: HeaderName, value: HeaderValue) {
        self.lock().insert(name, value);
    }

    /// Staged `Content-Type`, if any and if it is valid text.
    pub fn content_type(&self) -> Option<String> {
        self.get(&header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok().map(str::to_owned))
    }

    pub fn apply_to(&self, response: &mut Response) {
        let staged = self.lock();
        let headers = response.headers_mut();
        for name in staged.keys() {
            if headers.contains_key(name) {
                continue;
            }
            for value in staged.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn clones_share_the_staging_area() {
        let draft = ResponseDraft::default();
        let other = draft.clone();
        other.insert(header::VARY, HeaderValue::from_static("Content-Type"));
        assert!(draft.contains(&header::VARY));
    }

    #[test]
    fn staged_headers_do_not_override_the_action() {
        let draft = ResponseDraft::default();
        draft.insert(header::VARY, HeaderValue::from_static("Content-Type"));
        draft.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let mut response = ([(header::VARY, "Accept")], "body").into_response();
        draft.apply_to(&mut response);

        assert_eq!(response.headers()[header::VARY], "Accept");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    }

    #[test]
    fn content_type_reads_the_staged_value() {
        let draft = ResponseDraft::default();
        assert_eq!(draft.content_type(), None);
        draft.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(draft.content_type().as_deref(), Some("application/json"));
    }
}
