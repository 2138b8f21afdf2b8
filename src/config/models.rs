// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// One endpoint to probe and the status code it must answer with.
///
/// Field names on the wire follow the config file format:
/// `URL`, `ResponseTimeout` and `HealthyStatusCode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(rename = "URL")]
    pub url: String,

    /// Zero means the request is never timed out.
    #[serde(rename = "ResponseTimeout", default, with = "super::duration::serde_nanos")]
    pub response_timeout: Duration,

    #[serde(rename = "HealthyStatusCode")]
    pub healthy_status_code: u16,
}

impl HealthCheck {
    pub fn new(url: impl Into<String>, healthy_status_code: u16) -> Self {
        Self {
            url: url.into(),
            response_timeout: Duration::ZERO,
            healthy_status_code,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// `None` when the check should run without a deadline.
    pub fn timeout(&self) -> Option<Duration> {
        if self.response_timeout.is_zero() {
            None
        } else {
            Some(self.response_timeout)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.url).map_err(|e| format!("invalid URL {:?}: {}", self.url, e))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "URL {:?} must use http or https, not {}",
                self.url,
                url.scheme()
            ));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(format!("URL {:?} has no host", self.url));
        }

        if !(100..=999).contains(&self.healthy_status_code) {
            return Err(format!(
                "HealthyStatusCode {} is not a valid HTTP status code",
                self.healthy_status_code
            ));
        }

        Ok(())
    }
}
