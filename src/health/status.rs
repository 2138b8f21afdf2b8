// src/health/status.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("healthy"),
            HealthStatus::Unhealthy => f.write_str("unhealthy"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("expected status {expected}, got {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },
}

impl CheckError {
    pub fn is_timeout(&self) -> bool {
        match self {
            CheckError::Client(e) | CheckError::Request(e) => e.is_timeout(),
            CheckError::UnexpectedStatus { .. } => false,
        }
    }
}

/// Outcome of evaluating a single health check.
#[derive(Debug)]
pub struct CheckResult {
    pub url: String,
    pub status: HealthStatus,
    /// Status code of the first response, if one arrived.
    pub status_code: Option<u16>,
    pub response_time_ms: u64,
    pub error: Option<CheckError>,
}

impl CheckResult {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{} is {} ({})", self.url, self.status, error),
            None => write!(f, "{} is {}", self.url, self.status),
        }
    }
}
