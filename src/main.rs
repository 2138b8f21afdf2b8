// src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http_healthcheck::{
    config::{self, parse_duration, DEFAULT_CONFIG_PATH},
    health::{exit_code, write_report, ExitPolicy},
    server::{FixtureHandler, ServerBuilder},
    HealthCheck, HealthChecker,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "http_healthcheck=info,healthcheck=info";

/// Probe HTTP endpoints and report the unhealthy ones
#[derive(Parser, Debug)]
#[command(name = "healthcheck", version, about)]
struct Cli {
    /// Log level filter (e.g., "http_healthcheck=debug")
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single endpoint; exits 1 when it is unhealthy
    Probe {
        url: String,
        /// Status code the endpoint must answer with
        #[arg(short, long, default_value_t = 200)]
        expect: u16,
        /// Response timeout, e.g. "2s" or "500ms" ("0" disables it)
        #[arg(short, long, default_value = "2s", value_parser = parse_duration)]
        timeout: Duration,
    },
    /// Run every check listed in a JSON or YAML file
    Run {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Exit 1 if any endpoint is unhealthy
        #[arg(long)]
        fail_on_unhealthy: bool,
    },
    /// Run the checks compiled into the binary
    Builtin {
        /// Exit 1 if any endpoint is unhealthy
        #[arg(long)]
        fail_on_unhealthy: bool,
    },
    /// Serve the /healthz, /healthz2 and /healthz3 fixture endpoints
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
        /// How long /healthz3 waits before answering
        #[arg(long, default_value = "3s", value_parser = parse_duration)]
        slow_delay: Duration,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // CLI > RUST_LOG > default; logs go to stderr, reports to stdout
    let log_filter = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Probe {
            url,
            expect,
            timeout,
        } => {
            let check = HealthCheck::new(url, expect).with_timeout(timeout);
            config::validate_checks(std::slice::from_ref(&check))?;

            let results = [check.run().await];
            write_report(&mut std::io::stderr().lock(), &results)?;
            Ok(ExitCode::from(exit_code(&results, ExitPolicy::FailOnUnhealthy)))
        }
        Command::Run {
            config: path,
            fail_on_unhealthy,
        } => {
            info!("Loading health checks from: {}", path.display());
            let checks = config::load_checks(&path)
                .await
                .with_context(|| format!("cannot load health checks from {}", path.display()))?;
            report(checks, fail_on_unhealthy).await
        }
        Command::Builtin { fail_on_unhealthy } => {
            report(config::builtin_checks(), fail_on_unhealthy).await
        }
        Command::Serve { port, slow_delay } => {
            let addr: SocketAddr = ([0, 0, 0, 0], port).into();
            info!("Starting fixture server on {}", addr);

            ServerBuilder::new(addr)
                .with_handler(FixtureHandler::new().with_slow_delay(slow_delay))
                .serve()
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints one line per unhealthy endpoint. The exit code stays 0 unless
/// `fail_on_unhealthy` is set.
async fn report(checks: Vec<HealthCheck>, fail_on_unhealthy: bool) -> Result<ExitCode> {
    let results = HealthChecker::new(checks).run_all().await;
    write_report(&mut std::io::stdout().lock(), &results)?;
    Ok(ExitCode::from(exit_code(
        &results,
        ExitPolicy::from_flag(fail_on_unhealthy),
    )))
}
