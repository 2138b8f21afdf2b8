// src/config/mod.rs
mod duration;
mod models;

pub use duration::{parse_duration, DurationParseError};
pub use models::*;

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "healthchecks.json";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("health check #{index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("failed to encode health checks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The checks compiled into the binary, aimed at the fixture server on
/// port 8080.
pub fn builtin_checks() -> Vec<HealthCheck> {
    vec![
        HealthCheck::new("http://localhost:8080/healthz", 200)
            .with_timeout(Duration::from_secs(2)),
        HealthCheck::new("http://localhost:8080/healthz2", 301)
            .with_timeout(Duration::from_secs(2)),
        HealthCheck::new("http://localhost:8080/healthz3", 200)
            .with_timeout(Duration::from_secs(10)),
    ]
}

/// Load health checks from a file (YAML or JSON), keeping document order.
pub async fn load_checks<P: AsRef<Path>>(path: P) -> Result<Vec<HealthCheck>, ConfigError> {
    let path = path.as_ref();
    let contents = tokio::fs::read(path).await.map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let checks = decode_checks(path, &contents)?;
    validate_checks(&checks)?;

    debug!("Loaded {} health checks from {}", checks.len(), path.display());
    Ok(checks)
}

fn decode_checks(path: &Path, contents: &[u8]) -> Result<Vec<HealthCheck>, ConfigError> {
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    let decoded: Result<Vec<HealthCheck>, BoxError> = if is_yaml {
        serde_yaml::from_slice(contents).map_err(Into::into)
    } else {
        serde_json::from_slice(contents).map_err(Into::into)
    };

    decoded.map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn validate_checks(checks: &[HealthCheck]) -> Result<(), ConfigError> {
    for (index, check) in checks.iter().enumerate() {
        check
            .validate()
            .map_err(|reason| ConfigError::Invalid { index, reason })?;
    }
    Ok(())
}

/// Render checks in the JSON config format accepted by [`load_checks`].
pub fn encode_checks(checks: &[HealthCheck]) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(checks)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("http-healthcheck-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_builtin_checks_are_valid() {
        let checks = builtin_checks();
        assert_eq!(checks.len(), 3);
        assert!(validate_checks(&checks).is_ok());
        assert_eq!(checks[1].healthy_status_code, 301);
        assert_eq!(checks[2].response_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_load_json_preserves_order_and_defaults_timeout() {
        let path = write_temp(
            "order.json",
            r#"[
                {"URL": "http://localhost:8080/healthz3", "HealthyStatusCode": 200, "Owner": "ops"},
                {"URL": "http://localhost:8080/healthz", "ResponseTimeout": 2000000000, "HealthyStatusCode": 200},
                {"URL": "http://localhost:8080/healthz2", "ResponseTimeout": "1m30s", "HealthyStatusCode": 301}
            ]"#,
        );

        let checks = load_checks(&path).await.unwrap();
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].url, "http://localhost:8080/healthz3");
        assert_eq!(checks[0].response_timeout, Duration::ZERO);
        assert_eq!(checks[1].response_timeout, Duration::from_secs(2));
        assert_eq!(checks[2].response_timeout, Duration::from_secs(90));
        assert_eq!(checks[2].healthy_status_code, 301);
    }

    #[tokio::test]
    async fn test_null_timeout_means_no_timeout() {
        let path = write_temp(
            "null_timeout.json",
            r#"[{"URL": "http://localhost:8080/healthz", "ResponseTimeout": null, "HealthyStatusCode": 200}]"#,
        );

        let checks = load_checks(&path).await.unwrap();
        assert_eq!(checks[0].response_timeout, Duration::ZERO);
        assert_eq!(checks[0].timeout(), None);

        let path = write_temp(
            "null_timeout.yaml",
            "- URL: http://localhost:8080/healthz\n  ResponseTimeout: ~\n  HealthyStatusCode: 200\n",
        );
        let checks = load_checks(&path).await.unwrap();
        assert_eq!(checks[0].response_timeout, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_load_yaml() {
        let path = write_temp(
            "checks.yaml",
            "- URL: http://localhost:8080/healthz\n  ResponseTimeout: 2s\n  HealthyStatusCode: 200\n",
        );

        let checks = load_checks(&path).await.unwrap();
        assert_eq!(
            checks,
            vec![HealthCheck::new("http://localhost:8080/healthz", 200)
                .with_timeout(Duration::from_secs(2))]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = load_checks("/definitely/not/here/healthchecks.json").await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let path = write_temp("broken.json", r#"[{"URL": "http://localhost:8080/healthz","#);
        let err = load_checks(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_missing_required_keys_is_decode_error() {
        let path = write_temp("no_status.json", r#"[{"URL": "http://localhost:8080/healthz"}]"#);
        assert!(matches!(
            load_checks(&path).await.unwrap_err(),
            ConfigError::Decode { .. }
        ));

        let path = write_temp("no_url.json", r#"[{"HealthyStatusCode": 200}]"#);
        assert!(matches!(
            load_checks(&path).await.unwrap_err(),
            ConfigError::Decode { .. }
        ));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let path = write_temp("shape.json", r#"{"URL": "http://localhost/", "HealthyStatusCode": 200}"#);
        assert!(matches!(
            load_checks(&path).await.unwrap_err(),
            ConfigError::Decode { .. }
        ));

        let path = write_temp(
            "negative.json",
            r#"[{"URL": "http://localhost/", "ResponseTimeout": -5, "HealthyStatusCode": 200}]"#,
        );
        assert!(matches!(
            load_checks(&path).await.unwrap_err(),
            ConfigError::Decode { .. }
        ));
    }

    #[tokio::test]
    async fn test_relative_url_is_invalid() {
        let path = write_temp(
            "relative.json",
            r#"[
                {"URL": "http://localhost:8080/healthz", "HealthyStatusCode": 200},
                {"URL": "/healthz", "HealthyStatusCode": 200}
            ]"#,
        );
        let err = load_checks(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { index: 1, .. }));
    }

    #[test]
    fn test_encode_writes_nanoseconds() {
        let checks = vec![HealthCheck::new("http://localhost:8080/healthz", 200)
            .with_timeout(Duration::from_secs(2))];
        let json = encode_checks(&checks).unwrap();
        assert!(json.contains("\"ResponseTimeout\": 2000000000"));
        assert!(json.contains("\"HealthyStatusCode\": 200"));
    }

    fn arb_check() -> impl Strategy<Value = HealthCheck> {
        (
            "[a-z]{1,12}",
            1u16..=65535,
            "[a-z0-9/]{0,16}",
            0u64..=3_600_000_000_000,
            100u16..=599,
        )
            .prop_map(|(host, port, path, nanos, status)| {
                HealthCheck::new(format!("http://{host}:{port}/{path}"), status)
                    .with_timeout(Duration::from_nanos(nanos))
            })
    }

    proptest! {
        #[test]
        fn prop_encode_then_load_is_identity(checks in prop::collection::vec(arb_check(), 0..8)) {
            let json = encode_checks(&checks).unwrap();
            let decoded = decode_checks(Path::new("roundtrip.json"), json.as_bytes()).unwrap();
            prop_assert_eq!(decoded, checks);
        }
    }
}
