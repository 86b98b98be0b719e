//! Input validation results collected while binding request parameters.

use serde::{Deserialize, Serialize};

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of validation failures for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record an error on `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Errors as a JSON array of `{field, message}` objects.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Bound parameters that know their own validation rules.
pub trait Validate {
    fn validate(&self) -> ValidationErrors;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        size: u32,
        sort: String,
    }

    impl Validate for Page {
        fn validate(&self) -> ValidationErrors {
            let mut errors = ValidationErrors::new();
            errors.check((1..=100).contains(&self.size), "size", "must be between 1 and 100");
            errors.check(!self.sort.is_empty(), "sort", "is required");
            errors
        }
    }

    #[test]
    fn valid_params_have_no_errors() {
        let page = Page {
            size: 10,
            sort: "name".into(),
        };
        assert!(!page.validate().has_errors());
    }

    #[test]
    fn every_failed_rule_is_recorded_in_order() {
        let page = Page {
            size: 0,
            sort: String::new(),
        };
        let errors = page.validate();
        assert_eq!(errors.len(), 2);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["size", "sort"]);
        assert_eq!(
            errors.to_string(),
            "size: must be between 1 and 100; sort: is required"
        );
    }

    #[test]
    fn serializes_as_a_flat_array() {
        let errors = ValidationErrors::single("query", "bad");
        assert_eq!(
            errors.to_json(),
            serde_json::json!([{ "field": "query", "message": "bad" }])
        );
    }
}
