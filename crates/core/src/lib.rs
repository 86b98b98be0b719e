//! `trellis-core` — request pipeline building blocks.
//!
//! This crate contains **pure** primitives (no HTTP framework types): format
//! negotiation, header policy, session ids, the status log table, the message
//! catalog and validation results.

pub mod error;
pub mod format;
pub mod headers;
pub mod id;
pub mod messages;
pub mod status_log;
pub mod validation;

pub use error::{CoreError, CoreResult};
pub use format::Format;
pub use headers::VaryPolicy;
pub use id::SessionId;
pub use messages::{Messages, camel_case};
pub use status_log::{Severity, StatusLogEntry};
pub use validation::{FieldError, Validate, ValidationErrors};
