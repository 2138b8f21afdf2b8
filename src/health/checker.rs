// src/health/checker.rs
use crate::config::HealthCheck;
use crate::health::{CheckError, CheckResult, HealthStatus};
use reqwest::{redirect, Client};
use std::time::Instant;
use tracing::{debug, info, warn};

impl HealthCheck {
    /// Perform one GET against the endpoint and compare the first response's
    /// status with `healthy_status_code`.
    pub async fn run(&self) -> CheckResult {
        let start = Instant::now();
        let (status_code, error) = self.probe().await;
        let response_time_ms = start.elapsed().as_millis() as u64;

        let status = if error.is_none() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        CheckResult {
            url: self.url.clone(),
            status,
            status_code,
            response_time_ms,
            error,
        }
    }

    pub async fn is_healthy(&self) -> bool {
        self.run().await.is_healthy()
    }

    async fn probe(&self) -> (Option<u16>, Option<CheckError>) {
        // One client per check, so its connection is gone before the next check.
        let mut builder = Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => return (None, Some(CheckError::Client(e))),
        };

        let mut response = match client.get(self.url.as_str()).send().await {
            Ok(response) => response,
            Err(e) => return (None, Some(CheckError::Request(e))),
        };

        let actual = response.status().as_u16();

        // Body is never inspected, only drained chunk by chunk.
        loop {
            match response.chunk().await {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(e) => {
                    debug!(url = %self.url, error = %e, "failed to drain response body");
                    break;
                }
            }
        }

        if actual == self.healthy_status_code {
            (Some(actual), None)
        } else {
            (
                Some(actual),
                Some(CheckError::UnexpectedStatus {
                    expected: self.healthy_status_code,
                    actual,
                }),
            )
        }
    }
}

/// Evaluates a list of checks one after another, in order.
pub struct HealthChecker {
    checks: Vec<HealthCheck>,
}

impl HealthChecker {
    pub fn new(checks: Vec<HealthCheck>) -> Self {
        Self { checks }
    }

    pub async fn run_all(&self) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(self.checks.len());
        let mut healthy_count = 0;
        let mut unhealthy_count = 0;

        for check in &self.checks {
            let result = check.run().await;

            if result.is_healthy() {
                healthy_count += 1;
                debug!(
                    url = %result.url,
                    status_code = ?result.status_code,
                    elapsed_ms = result.response_time_ms,
                    "Endpoint is healthy"
                );
            } else {
                unhealthy_count += 1;
                warn!(
                    url = %result.url,
                    status_code = ?result.status_code,
                    elapsed_ms = result.response_time_ms,
                    error = ?result.error.as_ref().map(ToString::to_string),
                    "Endpoint is unhealthy"
                );
            }

            results.push(result);
        }

        info!(
            "Health check complete: {} healthy, {} unhealthy",
            healthy_count, unhealthy_count
        );

        results
    }
}
