// src/lib.rs
//! Probe HTTP endpoints and report the ones that do not answer with the
//! expected status code.
pub mod config;
pub mod health;
pub mod server;

pub use config::{builtin_checks, load_checks, ConfigError, HealthCheck};
pub use health::{CheckError, CheckResult, HealthChecker, HealthStatus};
