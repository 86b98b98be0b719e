//! Response format negotiation.
//!
//! An explicit `format` query parameter wins; otherwise the `Accept` header
//! is scanned for well-known media types. A request without `Accept` is
//! HTML; an `Accept` header naming nothing known leaves the format unset.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Format string for HTML.
pub const FORMAT_HTML: &str = "html";
/// Format string for JSON.
pub const FORMAT_JSON: &str = "json";
/// Format string for XML.
pub const FORMAT_XML: &str = "xml";
/// Format string for plain text.
pub const FORMAT_TXT: &str = "txt";
/// Format string for CSV.
pub const FORMAT_CSV: &str = "csv";

/// Negotiated response representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Json,
    Xml,
    Txt,
    Csv,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Html,
        Format::Json,
        Format::Xml,
        Format::Txt,
        Format::Csv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Html => FORMAT_HTML,
            Format::Json => FORMAT_JSON,
            Format::Xml => FORMAT_XML,
            Format::Txt => FORMAT_TXT,
            Format::Csv => FORMAT_CSV,
        }
    }

    /// Resolve the format of a request.
    ///
    /// `explicit` is the raw `format` query parameter, `accept` the raw
    /// `Accept` header. `None` means the client asked for nothing we offer.
    pub fn negotiate(explicit: Option<&str>, accept: Option<&str>) -> Option<Format> {
        if let Some(format) = explicit.and_then(|raw| raw.parse().ok()) {
            return Some(format);
        }

        match accept {
            Some(accept) => Self::from_accept(accept),
            None => Some(Format::Html),
        }
    }

    /// Map an `Accept` header onto a format, or `None` when nothing matches.
    ///
    /// Substring matching, first hit wins; quality values are not weighed.
    pub fn from_accept(accept: &str) -> Option<Format> {
        let accept = accept.trim();

        if accept.contains("application/xhtml")
            || accept.contains("text/html")
            || accept.starts_with("*/*")
        {
            return Some(Format::Html);
        }
        if accept.contains("application/xml") || accept.contains("text/xml") {
            return Some(Format::Xml);
        }
        if accept.contains("text/plain") {
            return Some(Format::Txt);
        }
        if accept.contains("application/json") || accept.contains("text/javascript") {
            return Some(Format::Json);
        }
        if accept.contains("text/csv") {
            return Some(Format::Csv);
        }
        if accept.ends_with("*/*") {
            return Some(Format::Html);
        }

        None
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Format::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::unknown_format(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_accept_is_html() {
        assert_eq!(Format::negotiate(None, None), Some(Format::Html));
    }

    #[test]
    fn browser_accept_is_html() {
        let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
        assert_eq!(Format::negotiate(None, Some(accept)), Some(Format::Html));
    }

    #[test]
    fn json_accept_is_json() {
        assert_eq!(Format::negotiate(None, Some("application/json")), Some(Format::Json));
        assert_eq!(
            Format::negotiate(None, Some("text/javascript, application/json")),
            Some(Format::Json)
        );
    }

    #[test]
    fn xml_wins_over_json_when_both_are_listed() {
        assert_eq!(
            Format::negotiate(None, Some("application/json, text/xml")),
            Some(Format::Xml)
        );
    }

    #[test]
    fn trailing_wildcard_is_html() {
        assert_eq!(Format::from_accept("image/png, */*"), Some(Format::Html));
    }

    #[test]
    fn unmatched_accept_leaves_format_unset() {
        assert_eq!(Format::from_accept("image/png"), None);
        assert_eq!(Format::negotiate(None, Some("image/png")), None);
        assert_eq!(Format::negotiate(Some("html"), Some("image/png")), Some(Format::Html));
    }

    #[test]
    fn explicit_format_overrides_accept() {
        assert_eq!(
            Format::negotiate(Some("JSON"), Some("text/html")),
            Some(Format::Json)
        );
    }

    #[test]
    fn unknown_explicit_format_is_ignored() {
        assert_eq!(
            Format::negotiate(Some("pdf"), Some("application/json")),
            Some(Format::Json)
        );
        assert_eq!(Format::negotiate(Some("pdf"), Some("image/png")), None);
        assert_eq!(
            "pdf".parse::<Format>(),
            Err(CoreError::unknown_format("pdf"))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: wire names round-trip for every known format, whatever the case.
        #[test]
        fn format_names_parse_case_insensitively(idx in 0usize..5, upper in any::<bool>()) {
            let format = Format::ALL[idx];
            let name = if upper { format.as_str().to_uppercase() } else { format.as_str().to_string() };
            prop_assert_eq!(name.parse::<Format>().unwrap(), format);
        }

        /// Property: an explicit known format always beats the Accept header.
        #[test]
        fn explicit_format_always_wins(idx in 0usize..5, accept in ".{0,64}") {
            let format = Format::ALL[idx];
            prop_assert_eq!(Format::negotiate(Some(format.as_str()), Some(&accept)), Some(format));
        }
    }
}
