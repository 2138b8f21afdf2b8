// src/health/report.rs
// Turns check results into report lines and a process exit code.
use crate::health::CheckResult;
use std::io::{self, Write};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_UNHEALTHY: u8 = 1;

/// How unhealthy results affect the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Exit 1 as soon as one endpoint is unhealthy.
    FailOnUnhealthy,
    /// Always exit 0; failures only show up as report lines.
    ReportOnly,
}

impl ExitPolicy {
    pub fn from_flag(fail_on_unhealthy: bool) -> Self {
        if fail_on_unhealthy {
            ExitPolicy::FailOnUnhealthy
        } else {
            ExitPolicy::ReportOnly
        }
    }
}

/// Write one `"<url> is unhealthy (<cause>)"` line per unhealthy result and
/// return how many were written.
pub fn write_report<W: Write>(out: &mut W, results: &[CheckResult]) -> io::Result<usize> {
    let mut unhealthy = 0;
    for result in results.iter().filter(|r| !r.is_healthy()) {
        writeln!(out, "{result}")?;
        unhealthy += 1;
    }
    Ok(unhealthy)
}

pub fn exit_code(results: &[CheckResult], policy: ExitPolicy) -> u8 {
    let any_unhealthy = results.iter().any(|r| !r.is_healthy());
    match policy {
        ExitPolicy::FailOnUnhealthy if any_unhealthy => EXIT_UNHEALTHY,
        _ => EXIT_SUCCESS,
    }
}
