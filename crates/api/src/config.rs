//! Runtime configuration, read from the environment once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use trellis_core::{CoreError, Messages};

pub const ENV_BIND: &str = "TRELLIS_BIND";
pub const ENV_SESSION_AUTH: &str = "TRELLIS_SESSION_AUTH";
pub const ENV_SESSION_COOKIE: &str = "TRELLIS_SESSION_COOKIE";
pub const ENV_MESSAGES: &str = "TRELLIS_MESSAGES";

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_COOKIE: &str = "TRELLIS_SESSION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidBind { var: &'static str, value: String },

    #[error("{var}: expected a boolean, got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var}: invalid cookie name {value:?}")]
    InvalidCookieName { var: &'static str, value: String },

    #[error("failed to read message catalog {}: {source}", path.display())]
    MessagesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid message catalog {}: {source}", path.display())]
    Messages {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// A session-auth module guards the pages, so cached pages must vary on the cookie.
    pub session_auth: bool,
    pub session_cookie: String,
    pub messages: Messages,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_auth: false,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            messages: Messages::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from an arbitrary variable source (tests use a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_bind = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = raw_bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBind {
                var: ENV_BIND,
                value: raw_bind.clone(),
            })?;

        let session_auth = match lookup(ENV_SESSION_AUTH) {
            Some(raw) => parse_bool(ENV_SESSION_AUTH, &raw)?,
            None => false,
        };

        let session_cookie = lookup(ENV_SESSION_COOKIE)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());
        if !is_cookie_name(&session_cookie) {
            return Err(ConfigError::InvalidCookieName {
                var: ENV_SESSION_COOKIE,
                value: session_cookie,
            });
        }

        let messages = match lookup(ENV_MESSAGES) {
            Some(path) => load_messages(PathBuf::from(path))?,
            None => Messages::default(),
        };

        Ok(Self {
            bind,
            session_auth,
            session_cookie,
            messages,
        })
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: raw.to_string(),
        }),
    }
}

fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn load_messages(path: PathBuf) -> Result<Messages, ConfigError> {
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(ConfigError::MessagesIo { path, source }),
    };
    Messages::with_overrides(&text).map_err(|source| ConfigError::Messages { path, source })
}
