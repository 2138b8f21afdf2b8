// src/health/mod.rs
mod checker;
mod report;
mod status;

pub use checker::HealthChecker;
pub use report::{exit_code, write_report, ExitPolicy, EXIT_SUCCESS, EXIT_UNHEALTHY};
pub use status::{CheckError, CheckResult, HealthStatus};
