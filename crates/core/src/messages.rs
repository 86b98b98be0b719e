//! Message catalog for user-facing strings.
//!
//! Patterns use positional placeholders (`{0}`, `{1}`, ...). Unknown keys
//! resolve to the key itself so a missing translation is visible but never
//! fatal.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};

pub const KEY_NOT_ACCEPTABLE_TITLE: &str = "error.406.title";
pub const KEY_BAD_REQUEST_TITLE: &str = "error.400.title";
pub const KEY_NOT_FOUND_TITLE: &str = "error.404.title";
pub const KEY_SETTINGS_TITLE: &str = "settings.title";

const DEFAULTS: &[(&str, &str)] = &[
    (
        KEY_NOT_ACCEPTABLE_TITLE,
        "The page {0} is only available as {1}.",
    ),
    (KEY_BAD_REQUEST_TITLE, "The request could not be processed."),
    (KEY_NOT_FOUND_TITLE, "The page you requested does not exist."),
    (KEY_SETTINGS_TITLE, "Settings"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            entries: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Messages {
    /// Built-in catalog overlaid with the entries of a properties text.
    pub fn with_overrides(properties: &str) -> CoreResult<Self> {
        let mut messages = Self::default();
        messages.extend_from_properties(properties)?;
        Ok(messages)
    }

    /// Merge `key=value` lines into the catalog.
    ///
    /// Blank lines and lines starting with `#` are skipped. Later entries
    /// replace earlier ones.
    pub fn extend_from_properties(&mut self, properties: &str) -> CoreResult<()> {
        for (idx, raw) in properties.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| CoreError::malformed_catalog(idx + 1, "expected key=value"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CoreError::malformed_catalog(idx + 1, "empty key"));
            }

            self.entries.insert(key.to_string(), value.trim().to_string());
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Resolve `key` and substitute `{n}` with `args[n]`.
    pub fn get(&self, key: &str, args: &[&str]) -> String {
        let Some(pattern) = self.entries.get(key) else {
            tracing::debug!(key, "missing message key");
            return key.to_string();
        };

        substitute(pattern, args)
    }
}

/// Replace each `{n}` in `pattern` with `args[n]` in a single pass.
///
/// Argument text is never rescanned. Placeholders without a matching
/// argument, and braces around anything but digits, are kept verbatim.
fn substitute(pattern: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let arg = tail
            .split_once('}')
            .filter(|(index, _)| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|(index, after)| {
                let arg = args.get(index.parse::<usize>().ok()?)?;
                Some((*arg, after))
            });

        match arg {
            Some((arg, after)) => {
                out.push_str(arg);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Turn a string into a CamelCase label.
///
/// Folds common Latin accents to their ASCII base letter, drops everything
/// that is not an ASCII word character or a space, then capitalises each
/// space-separated part: `/settings` becomes `Settings`, `/café` `Cafe`.
pub fn camel_case(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    for c in input.chars() {
        match fold_accent(c) {
            Some(base) => cleaned.push_str(base),
            None if c.is_ascii_alphanumeric() || c == '_' || c == ' ' => cleaned.push(c),
            None => {}
        }
    }

    cleaned
        .split(' ')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn fold_accent(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'æ' => "ae",
        'Æ' => "AE",
        'ç' => "c",
        'Ç' => "C",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ñ' => "n",
        'Ñ' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'œ' => "oe",
        'Œ' => "OE",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'ß' => "ss",
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_strips_path_separators() {
        assert_eq!(camel_case("/settings"), "Settings");
        assert_eq!(camel_case("/user/profile"), "Userprofile");
        assert_eq!(camel_case("/"), "");
    }

    #[test]
    fn camel_case_capitalises_each_word() {
        assert_eq!(camel_case("hello big world"), "HelloBigWorld");
        assert_eq!(camel_case("snake_case ok"), "Snake_caseOk");
    }

    #[test]
    fn camel_case_folds_accented_letters() {
        assert_eq!(camel_case("/café"), "Cafe");
        assert_eq!(camel_case("/Über straße"), "UberStrasse");
        assert_eq!(camel_case("crème brûlée"), "CremeBrulee");
        assert_eq!(camel_case("/日本"), "");
    }

    #[test]
    fn arguments_are_not_rescanned_for_placeholders() {
        let messages = Messages::default();
        let msg = messages.get(KEY_NOT_ACCEPTABLE_TITLE, &["{1}", "HTML"]);
        assert_eq!(msg, "The page {1} is only available as HTML.");
    }

    #[test]
    fn unmatched_placeholders_are_kept_verbatim() {
        let messages = Messages::with_overrides("k=a {0} {2} {x} {} {+0} {").unwrap();
        assert_eq!(messages.get("k", &["A"]), "a A {2} {x} {} {+0} {");
        assert_eq!(messages.get("k", &["{0}", "{1}", "C"]), "a {0} C {x} {} {+0} {");
    }

    #[test]
    fn not_acceptable_title_substitutes_page_and_format() {
        let messages = Messages::default();
        let msg = messages.get(KEY_NOT_ACCEPTABLE_TITLE, &["Settings", "HTML"]);
        assert_eq!(msg, "The page Settings is only available as HTML.");
    }

    #[test]
    fn unknown_key_resolves_to_itself() {
        let messages = Messages::default();
        assert_eq!(messages.get("does.not.exist", &["x"]), "does.not.exist");
    }

    #[test]
    fn overrides_replace_defaults_and_add_keys() {
        let props = "\
# Dutch
error.406.title = Pagina {0} is alleen beschikbaar als {1}.

custom.key=value with = sign
";
        let messages = Messages::with_overrides(props).unwrap();
        assert_eq!(
            messages.get(KEY_NOT_ACCEPTABLE_TITLE, &["Settings", "HTML"]),
            "Pagina Settings is alleen beschikbaar als HTML."
        );
        assert_eq!(messages.get("custom.key", &[]), "value with = sign");
        assert!(messages.contains(KEY_BAD_REQUEST_TITLE));
    }

    #[test]
    fn malformed_lines_report_their_line_number() {
        let err = Messages::with_overrides("ok=1\nbroken line\n").unwrap_err();
        assert_eq!(err, CoreError::malformed_catalog(2, "expected key=value"));

        let err = Messages::with_overrides("=value").unwrap_err();
        assert_eq!(err, CoreError::malformed_catalog(1, "empty key"));
    }
}
