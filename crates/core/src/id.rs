//! Strongly-typed identifiers used across the pipeline.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Identifier of a browser session (carried in the session cookie).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a cookie value, falling back to a fresh id.
    ///
    /// The boolean is `true` when the id was newly issued and must be sent
    /// back to the client.
    pub fn from_cookie_or_new(value: Option<&str>) -> (Self, bool) {
        match value.map(str::parse::<SessionId>) {
            Some(Ok(id)) => (id, false),
            _ => (Self::new(), true),
        }
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s.trim())
            .map_err(|e| CoreError::invalid_id(format!("SessionId: {e}")))?;
        Ok(Self(uuid))
    }
}
