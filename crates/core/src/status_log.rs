//! Status code → log severity table used by the response post-hook.

use crate::headers::{STATUSCODE_CONFLICT, STATUSCODE_NOT_ACCEPTABLE};

/// Severity a returned status is logged at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Warn,
}

/// One row of the status log table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StatusLogEntry {
    pub status: u16,
    pub severity: Severity,
    pub reason: &'static str,
    /// Log the request path alongside the session.
    pub include_path: bool,
    /// Log the negotiated format alongside the session.
    pub include_format: bool,
}

impl StatusLogEntry {
    const fn new(status: u16, severity: Severity, reason: &'static str) -> Self {
        Self {
            status,
            severity,
            reason,
            include_path: false,
            include_format: false,
        }
    }

    const fn with_path(mut self) -> Self {
        self.include_path = true;
        self
    }

    const fn with_format(mut self) -> Self {
        self.include_format = true;
        self
    }

    /// Human readable message, e.g. `Returning 404 (Not Found)`.
    pub fn message(&self) -> String {
        format!("Returning {} ({})", self.status, self.reason)
    }
}

/// Statuses that get a log line once a response is produced.
///
/// Anything not listed is not logged.
pub const STATUS_LOG: &[StatusLogEntry] = &[
    StatusLogEntry::new(204, Severity::Debug, "No Content"),
    StatusLogEntry::new(304, Severity::Debug, "Not Modified"),
    StatusLogEntry::new(400, Severity::Warn, "Bad Request").with_path(),
    StatusLogEntry::new(401, Severity::Warn, "Unauthorized"),
    StatusLogEntry::new(404, Severity::Warn, "Not Found").with_path(),
    StatusLogEntry::new(STATUSCODE_NOT_ACCEPTABLE, Severity::Warn, "Not Acceptable")
        .with_path()
        .with_format(),
    StatusLogEntry::new(STATUSCODE_CONFLICT, Severity::Warn, "Conflict").with_path(),
    StatusLogEntry::new(500, Severity::Warn, "Internal Error").with_path(),
];

/// Look up the log entry for a status, if any.
pub fn lookup(status: u16) -> Option<&'static StatusLogEntry> {
    STATUS_LOG.iter().find(|e| e.status == status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_are_not_logged() {
        assert!(lookup(200).is_none());
        assert!(lookup(201).is_none());
        assert!(lookup(302).is_none());
        assert!(lookup(403).is_none());
    }

    #[test]
    fn no_content_and_not_modified_are_debug() {
        assert_eq!(lookup(204).unwrap().severity, Severity::Debug);
        assert_eq!(lookup(304).unwrap().severity, Severity::Debug);
    }

    #[test]
    fn client_and_server_errors_are_warnings() {
        for status in [400, 401, 404, 406, 409, 500] {
            let entry = lookup(status).unwrap();
            assert_eq!(entry.severity, Severity::Warn, "status {status}");
        }
    }

    #[test]
    fn not_acceptable_carries_path_and_format() {
        let entry = lookup(406).unwrap();
        assert!(entry.include_path);
        assert!(entry.include_format);
        assert_eq!(entry.message(), "Returning 406 (Not Acceptable)");
    }

    #[test]
    fn unauthorized_does_not_log_the_path() {
        let entry = lookup(401).unwrap();
        assert!(!entry.include_path);
        assert!(!entry.include_format);
    }

    #[test]
    fn table_has_no_duplicate_statuses() {
        let mut seen: Vec<u16> = STATUS_LOG.iter().map(|e| e.status).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), STATUS_LOG.len());
    }
}
