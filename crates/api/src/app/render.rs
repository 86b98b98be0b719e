//! Views rendered by the actions and the error paths.
//!
//! Pages are small enough to be built inline; every interpolated value goes
//! through [`escape`].

use axum::{
    Json,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use trellis_core::{SessionId, ValidationErrors};

/// A successfully rendered action result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Index view for JSON clients: an empty object.
    Index,
    /// The HTML settings page.
    Settings { title: String, session_id: SessionId },
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        match self {
            View::Index => Json(json!({})).into_response(),
            View::Settings { title, session_id } => settings_page(&title, session_id).into_response(),
        }
    }
}

pub fn settings_page(title: &str, session_id: SessionId) -> Html<String> {
    let body = format!(
        "<h1>{title}</h1>\n<p class=\"session\">Session {session}</p>",
        title = escape(title),
        session = escape(&session_id.to_string()),
    );
    Html(layout(title, &body))
}

/// `400 (Bad Request)` page; `errors` are listed when given.
pub fn bad_request_page(title: &str, errors: Option<&ValidationErrors>) -> Html<String> {
    let mut body = format!("<h1>400 Bad Request</h1>\n<p>{}</p>", escape(title));
    if let Some(errors) = errors {
        body.push_str("\n<ul class=\"errors\">");
        for e in errors.iter() {
            body.push_str(&format!(
                "\n<li><strong>{}</strong>: {}</li>",
                escape(&e.field),
                escape(&e.message)
            ));
        }
        body.push_str("\n</ul>");
    }
    Html(layout("Bad Request", &body))
}

/// `406 (Not Acceptable)` page.
pub fn not_acceptable_page(message: &str) -> Html<String> {
    let body = format!("<h1>406 Not Acceptable</h1>\n<p>{}</p>", escape(message));
    Html(layout("Not Acceptable", &body))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn bad_request_page_lists_escaped_errors() {
        let errors = ValidationErrors::single("name", "must not contain <script>");
        let Html(page) = bad_request_page("Bad input", Some(&errors));
        assert!(page.contains("<li><strong>name</strong>: must not contain &lt;script&gt;</li>"));
    }

    #[test]
    fn generic_bad_request_page_has_no_error_list() {
        let Html(page) = bad_request_page("Bad input", None);
        assert!(page.contains("400 Bad Request"));
        assert!(!page.contains("<ul"));
    }

    #[test]
    fn settings_page_shows_title() {
        let Html(page) = settings_page("Settings", SessionId::new());
        assert!(page.contains("<title>Settings</title>"));
        assert!(page.contains("<h1>Settings</h1>"));
    }
}
