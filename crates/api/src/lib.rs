//! HTTP API: controllers, core request hooks and server wiring.

pub mod app;
pub mod config;
pub mod context;
pub mod hooks;
pub mod middleware;
pub mod validation;
