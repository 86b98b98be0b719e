//! HTTP header names, status codes and the `Vary` policy shared by the hooks.

/// HTTP status code 406, indicating the server has no response that matches
/// the `Accept` header sent by the client.
pub const STATUSCODE_NOT_ACCEPTABLE: u16 = 406;
/// HTTP status code 409, indicating the server can't figure out what to do
/// with the request.
pub const STATUSCODE_CONFLICT: u16 = 409;

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_COOKIE: &str = "Cookie";
pub const HEADER_REQUESTED_WITH: &str = "X-Requested-With";

/// Value of `X-Requested-With` sent by browsers for asynchronous requests.
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Name of the controller owned by the session-auth module.
///
/// Its own pages (login, logout) must not vary on the cookie.
pub const SECURE_CONTROLLER: &str = "Secure";

/// Whether a request is an asynchronous browser request.
pub fn is_ajax(requested_with: Option<&str>) -> bool {
    requested_with.is_some_and(|v| v.trim().eq_ignore_ascii_case(XML_HTTP_REQUEST))
}

/// Whether responses to this method may be cached and therefore need `Vary`.
pub fn is_cacheable_method(method: &str) -> bool {
    method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("HEAD")
}

/// Inputs deciding which request headers a cacheable response varies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaryPolicy<'a> {
    /// A session-auth module is active.
    pub session_auth: bool,
    /// Controller handling the request.
    pub controller: &'a str,
    /// The request was sent asynchronously by a browser.
    pub ajax: bool,
}

impl VaryPolicy<'_> {
    /// Build the `Vary` value.
    ///
    /// Always starts with `Content-Type`. `Cookie` is added when logged-in
    /// pages can differ from anonymous ones, `X-Requested-With` when the page
    /// was requested without its surrounding layout.
    pub fn header_value(&self) -> String {
        let mut value = String::from(HEADER_CONTENT_TYPE);
        if self.session_auth && self.controller != SECURE_CONTROLLER {
            value.push(',');
            value.push_str(HEADER_COOKIE);
        }
        if self.ajax {
            value.push(',');
            value.push_str(HEADER_REQUESTED_WITH);
        }
        value
    }
}
