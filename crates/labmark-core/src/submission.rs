//! Submission timeliness evaluation.
//!
//! Compares the event timestamp of the triggering CI event against the
//! configured due date. The policy is fail-open: when the due date is unset,
//! unparseable, or no event timestamp can be resolved, the submitter gets
//! full marks. Only a clearly-late submission is penalized, at half marks.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{SubmissionResult, LATE_SUBMISSION_SCORE, SUBMISSION_MAX};

/// Timestamp fields tried against the event payload, highest priority first.
///
/// Push events carry `head_commit.timestamp`; pull-request events carry
/// `pull_request.updated_at`; `workflow_run` and `repository.pushed_at`
/// cover re-runs and older payload shapes.
const TIMESTAMP_FIELDS: [[&str; 2]; 4] = [
    ["head_commit", "timestamp"],
    ["pull_request", "updated_at"],
    ["workflow_run", "created_at"],
    ["repository", "pushed_at"],
];

/// Read and parse the CI event payload. Any failure resolves to `None`.
pub fn load_event(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(path = %path.display(), %err, "event payload unreadable");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(path = %path.display(), %err, "event payload is not valid JSON");
            None
        }
    }
}

/// Resolve the submission timestamp from an event payload.
///
/// Tries each candidate field in priority order and returns the first one
/// that is present and parseable.
pub fn extract_event_timestamp(event: &Value) -> Option<DateTime<Utc>> {
    TIMESTAMP_FIELDS
        .iter()
        .filter_map(|[object, field]| event.get(*object)?.get(*field))
        .find_map(parse_timestamp)
}

/// Parse a single timestamp value from the payload.
///
/// GitHub serializes most timestamps as RFC 3339 strings, but
/// `repository.pushed_at` is unix seconds on push events.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

/// Parse the configured due date.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (assumed UTC), or a bare
/// `YYYY-MM-DD` (midnight UTC), mirroring the leniency instructors expect
/// when setting the variable by hand.
fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = s.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Evaluate submission timeliness.
///
/// Four short-circuit paths, in order: due date unset; due date or event
/// timestamp unresolvable; on time; late.
pub fn evaluate(due_date: Option<&str>, event: Option<&Value>) -> SubmissionResult {
    let Some(due_str) = due_date else {
        return SubmissionResult {
            score: SUBMISSION_MAX,
            max: SUBMISSION_MAX,
            on_time: true,
            reason: "LAB_DUE_DATE not configured – awarding full 20/20 submission marks by default."
                .into(),
        };
    };

    let due = parse_due_date(due_str);
    let submitted = event.and_then(extract_event_timestamp);

    let (Some(due), Some(submitted)) = (due, submitted) else {
        debug!(due_date = due_str, "due date or event timestamp unresolvable");
        return SubmissionResult {
            score: SUBMISSION_MAX,
            max: SUBMISSION_MAX,
            on_time: true,
            reason:
                "Unable to determine submission time or parse due date – awarding full 20/20 submission marks."
                    .into(),
        };
    };

    let submitted_iso = submitted.to_rfc3339_opts(SecondsFormat::Millis, true);
    let due_iso = due.to_rfc3339_opts(SecondsFormat::Millis, true);

    if submitted <= due {
        SubmissionResult {
            score: SUBMISSION_MAX,
            max: SUBMISSION_MAX,
            on_time: true,
            reason: format!(
                "Submission time ({submitted_iso}) is on or before due date ({due_iso})."
            ),
        }
    } else {
        SubmissionResult {
            score: LATE_SUBMISSION_SCORE,
            max: SUBMISSION_MAX,
            on_time: false,
            reason: format!(
                "Submission time ({submitted_iso}) is AFTER due date ({due_iso}) – late submission penalty applied."
            ),
        }
    }
}
