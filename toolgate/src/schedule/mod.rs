//! Schedule requests and their normalization.
//!
//! The model describes when a task should run as a tagged value. Exactly one
//! of four tags is valid; [`normalize_value`] turns it into a single concrete
//! [`When`] plus the callback the agent runs once the time comes.

use crate::errors::ScheduleError;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Name of the agent callback that executes a scheduled task.
pub const EXECUTE_TASK_CALLBACK: &str = "executeTask";

/// Result string when the model asked for no schedule.
pub const NOT_VALID_SCHEDULE: &str = "Not a valid schedule input";

const KNOWN_TAGS: [&str; 4] = ["no-schedule", "scheduled", "delayed", "cron"];

/// A tagged description of when a task should run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScheduleRequest {
    /// The request did not describe a schedule.
    NoSchedule,
    /// Run once at a fixed instant.
    Scheduled {
        /// The instant. Dates without an offset are read as UTC.
        #[serde(deserialize_with = "deserialize_date")]
        date: DateTime<Utc>,
    },
    /// Run once after a delay.
    Delayed {
        /// The delay in seconds.
        #[serde(rename = "delayInSeconds", deserialize_with = "deserialize_delay")]
        delay_in_seconds: u64,
    },
    /// Run on a recurring cron schedule.
    Cron {
        /// The cron expression.
        cron: String,
    },
}

impl ScheduleRequest {
    /// Parses a request from the raw JSON the model produced.
    ///
    /// A tag outside the four known variants is rejected with
    /// [`ScheduleError::UnrecognizedVariant`]; it is never coerced into
    /// `no-schedule`.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ScheduleError> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ScheduleError::Malformed {
                reason: "missing \"type\" tag".to_string(),
            })?;

        if !KNOWN_TAGS.contains(&tag) {
            return Err(ScheduleError::UnrecognizedVariant {
                tag: tag.to_string(),
            });
        }

        serde_json::from_value(value.clone()).map_err(|e| ScheduleError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Returns the wire tag of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoSchedule => "no-schedule",
            Self::Scheduled { .. } => "scheduled",
            Self::Delayed { .. } => "delayed",
            Self::Cron { .. } => "cron",
        }
    }
}

/// Parses a schedule date.
///
/// Accepts RFC 3339, a local date-time without offset (fraction optional,
/// `T` or space separated) and a bare `YYYY-MM-DD`. Values without an
/// offset are taken as UTC; a bare date means midnight.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date \"{raw}\"")))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn deserialize_delay<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(secs) = number.as_u64() {
        return Ok(secs);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
        .ok_or_else(|| {
            D::Error::custom(format!(
                "delayInSeconds must be a non-negative whole number, got {number}"
            ))
        })
}

/// The concrete time specification handed to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum When {
    /// A fixed instant.
    At(DateTime<Utc>),
    /// A delay in seconds from now.
    Delay(u64),
    /// A cron expression.
    Cron(String),
}

impl When {
    /// Computes the first run time relative to `now`.
    ///
    /// Cron schedules are evaluated by the agent's scheduler, so `None` is
    /// returned for them.
    #[must_use]
    pub fn first_run(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::At(date) => Some(*date),
            Self::Delay(secs) => i64::try_from(*secs)
                .ok()
                .and_then(ChronoDuration::try_seconds)
                .and_then(|d| now.checked_add_signed(d)),
            Self::Cron(_) => None,
        }
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(date) => write!(f, "{}", date.to_rfc3339()),
            Self::Delay(secs) => write!(f, "{secs}"),
            Self::Cron(expr) => f.write_str(expr),
        }
    }
}

/// Outcome of normalizing a schedule request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Nothing should be scheduled.
    NotValid,
    /// Schedule `callback` at `when`.
    Ready {
        /// When to run.
        when: When,
        /// The agent callback to run.
        callback: &'static str,
    },
}

/// Converts a typed request into a concrete schedule.
pub fn normalize(request: &ScheduleRequest) -> Result<Normalized, ScheduleError> {
    let when = match request {
        ScheduleRequest::NoSchedule => return Ok(Normalized::NotValid),
        ScheduleRequest::Scheduled { date } => When::At(*date),
        ScheduleRequest::Delayed { delay_in_seconds } => When::Delay(*delay_in_seconds),
        ScheduleRequest::Cron { cron } => {
            validate_cron(cron)?;
            When::Cron(cron.trim().to_string())
        }
    };

    Ok(Normalized::Ready {
        when,
        callback: EXECUTE_TASK_CALLBACK,
    })
}

/// Parses and normalizes a raw request in one step.
pub fn normalize_value(value: &serde_json::Value) -> Result<Normalized, ScheduleError> {
    normalize(&ScheduleRequest::from_value(value)?)
}

fn validate_cron(expression: &str) -> Result<(), ScheduleError> {
    static CRON_SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    let shape = CRON_SHAPE.get_or_init(|| Regex::new(r"^\S+(\s+\S+){4,5}$").ok());

    match shape {
        Some(re) if re.is_match(expression.trim()) => Ok(()),
        _ => Err(ScheduleError::InvalidCron {
            expression: expression.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_delayed_request() {
        let normalized = normalize_value(&json!({"type": "delayed", "delayInSeconds": 30})).unwrap();
        assert_eq!(
            normalized,
            Normalized::Ready {
                when: When::Delay(30),
                callback: EXECUTE_TASK_CALLBACK,
            }
        );
    }

    #[test]
    fn test_scheduled_request() {
        let normalized =
            normalize_value(&json!({"type": "scheduled", "date": "2030-01-02T03:04:05Z"})).unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            normalized,
            Normalized::Ready {
                when: When::At(expected),
                callback: EXECUTE_TASK_CALLBACK,
            }
        );
    }

    #[test]
    fn test_scheduled_request_without_offset() {
        let normalized =
            normalize_value(&json!({"type": "scheduled", "date": "2030-01-02T03:04:05"})).unwrap();
        assert_eq!(
            normalized,
            Normalized::Ready {
                when: When::At(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap()),
                callback: EXECUTE_TASK_CALLBACK,
            }
        );

        let with_fraction = parse_date("2030-01-02T03:04:05.250").unwrap();
        assert_eq!(with_fraction.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_scheduled_request_bare_date() {
        let normalized =
            normalize_value(&json!({"type": "scheduled", "date": "2030-01-02"})).unwrap();
        assert_eq!(
            normalized,
            Normalized::Ready {
                when: When::At(Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap()),
                callback: EXECUTE_TASK_CALLBACK,
            }
        );
    }

    #[test]
    fn test_scheduled_request_with_offset_converted_to_utc() {
        let date = parse_date("2030-01-02T03:04:05+02:00").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2030, 1, 2, 1, 4, 5).unwrap());
    }

    #[test]
    fn test_unparseable_date_is_malformed() {
        let err = normalize_value(&json!({"type": "scheduled", "date": "next tuesday"})).unwrap_err();
        assert!(matches!(err, ScheduleError::Malformed { ref reason } if reason.contains("next tuesday")));
    }

    #[test]
    fn test_delayed_request_whole_float() {
        let normalized =
            normalize_value(&json!({"type": "delayed", "delayInSeconds": 30.0})).unwrap();
        assert_eq!(
            normalized,
            Normalized::Ready {
                when: When::Delay(30),
                callback: EXECUTE_TASK_CALLBACK,
            }
        );
    }

    #[test]
    fn test_delayed_request_rejects_fraction_and_negative() {
        let err = normalize_value(&json!({"type": "delayed", "delayInSeconds": 1.5})).unwrap_err();
        assert!(matches!(err, ScheduleError::Malformed { .. }));

        let err = normalize_value(&json!({"type": "delayed", "delayInSeconds": -5})).unwrap_err();
        assert!(matches!(err, ScheduleError::Malformed { .. }));
    }

    #[test]
    fn test_cron_request() {
        let normalized = normalize_value(&json!({"type": "cron", "cron": "0 9 * * 1"})).unwrap();
        assert_eq!(
            normalized,
            Normalized::Ready {
                when: When::Cron("0 9 * * 1".to_string()),
                callback: EXECUTE_TASK_CALLBACK,
            }
        );
    }

    #[test]
    fn test_invalid_cron_rejected() {
        let err = normalize_value(&json!({"type": "cron", "cron": "every monday"})).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidCron { .. }));
    }

    #[test]
    fn test_no_schedule() {
        assert_eq!(
            normalize_value(&json!({"type": "no-schedule"})).unwrap(),
            Normalized::NotValid
        );
    }

    #[test]
    fn test_unrecognized_tag_is_an_error() {
        let err = normalize_value(&json!({"type": "weekly", "day": "monday"})).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnrecognizedVariant {
                tag: "weekly".to_string()
            }
        );
    }

    #[test]
    fn test_missing_payload_is_malformed() {
        let err = normalize_value(&json!({"type": "delayed"})).unwrap_err();
        assert!(matches!(err, ScheduleError::Malformed { .. }));

        let err = normalize_value(&json!({"delayInSeconds": 5})).unwrap_err();
        assert!(matches!(err, ScheduleError::Malformed { .. }));
    }

    #[test]
    fn test_first_run() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            When::Delay(90).first_run(now),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 1, 30).unwrap())
        );
        assert_eq!(When::Cron("* * * * *".to_string()).first_run(now), None);
    }

    #[test]
    fn test_when_display() {
        assert_eq!(When::Delay(30).to_string(), "30");
        assert_eq!(When::Cron("0 * * * *".to_string()).to_string(), "0 * * * *");
    }

    #[test]
    fn test_kind() {
        let request = ScheduleRequest::from_value(&json!({"type": "no-schedule"})).unwrap();
        assert_eq!(request.kind(), "no-schedule");
    }
}
