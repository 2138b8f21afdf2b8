// src/config/duration.rs
// Duration strings in the "1m30s" / "500ms" style, plus the serde glue that
// lets `ResponseTimeout` be either integer nanoseconds or such a string.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {input:?}: {reason}")]
pub struct DurationParseError {
    input: String,
    reason: &'static str,
}

impl DurationParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration such as `"2s"`, `"1m30s"`, `"1.5h"` or `"250ms"`.
///
/// A bare `"0"` is the only unit-less value accepted.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationParseError::new(input, "empty string"));
    }
    if s.starts_with('-') {
        return Err(DurationParseError::new(input, "negative durations are not allowed"));
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = s;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(DurationParseError::new(input, "expected a number"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationParseError::new(input, "missing unit"));
        }
        let scale =
            unit_nanos(unit).ok_or_else(|| DurationParseError::new(input, "unknown unit"))?;

        let (whole, fraction) = match number.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (number, ""),
        };
        if fraction.contains('.') {
            return Err(DurationParseError::new(input, "malformed number"));
        }

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| DurationParseError::new(input, "number too large"))?
        };
        let mut value = whole
            .checked_mul(scale)
            .ok_or_else(|| DurationParseError::new(input, "duration overflows"))?;

        // digits past nanosecond precision of the largest unit can't matter
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let digits: u128 = fraction
                .parse()
                .map_err(|_| DurationParseError::new(input, "malformed number"))?;
            value += digits * scale / 10u128.pow(fraction.len() as u32);
        }

        total = total
            .checked_add(value)
            .ok_or_else(|| DurationParseError::new(input, "duration overflows"))?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC)
        .map_err(|_| DurationParseError::new(input, "duration overflows"))?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

pub(crate) mod serde_nanos {
    use super::parse_duration;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimeout {
        Nanos(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = u64::try_from(value.as_nanos()).map_err(|_| {
            <S::Error as serde::ser::Error>::custom("ResponseTimeout does not fit in u64 nanoseconds")
        })?;
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = Option::<RawTimeout>::deserialize(deserializer).map_err(|_| {
            <D::Error as de::Error>::custom(
                "ResponseTimeout must be non-negative nanoseconds or a duration string",
            )
        })?;

        // null reads as the zero value, i.e. no timeout
        match raw {
            None => Ok(Duration::ZERO),
            Some(RawTimeout::Nanos(nanos)) => Ok(Duration::from_nanos(nanos)),
            Some(RawTimeout::Text(text)) => parse_duration(&text).map_err(de::Error::custom),
        }
    }
}
