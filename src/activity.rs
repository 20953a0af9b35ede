//! Daily commit counts from a user's public event stream.
//!
//! Only `PushEvent`s count. Each one contributes the length of its
//! `payload.commits` list to the UTC calendar day of its `created_at`.
//! Days appear in the order they are first seen in the stream; the result is
//! never re-sorted, so the chart shows the API's order (newest first).

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ParseError, kind_of};
use crate::models::DailyCommitCount;

const PUSH_EVENT: &str = "PushEvent";

/// Sum push commits per UTC day, keyed in first-seen order.
///
/// Any malformed push event fails the whole aggregation.
pub fn aggregate_push_events(events: &Value) -> Result<Vec<DailyCommitCount>, ParseError> {
    let events = events.as_array().ok_or_else(|| ParseError::NotAnArray {
        what: "events",
        found: kind_of(events),
    })?;

    let mut out: Vec<DailyCommitCount> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for (index, event) in events.iter().enumerate() {
        if event.get("type").and_then(Value::as_str) != Some(PUSH_EVENT) {
            continue;
        }

        let date = utc_date(event, index)?;
        let commits = event
            .get("payload")
            .and_then(|p| p.get("commits"))
            .and_then(Value::as_array)
            .ok_or(ParseError::MissingField {
                index,
                field: "payload.commits",
            })?
            .len() as u64;

        match slot.get(&date) {
            Some(&i) => out[i].count = out[i].count.saturating_add(commits),
            None => {
                slot.insert(date.clone(), out.len());
                out.push(DailyCommitCount::new(date, commits));
            }
        }
    }

    Ok(out)
}

fn utc_date(event: &Value, index: usize) -> Result<String, ParseError> {
    let raw = event
        .get("created_at")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField {
            index,
            field: "created_at",
        })?;

    let ts = DateTime::parse_from_rfc3339(raw).map_err(|source| ParseError::Timestamp {
        index,
        value: raw.to_string(),
        source,
    })?;

    Ok(ts.with_timezone(&Utc).format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn push(at: &str, commits: usize) -> Value {
        let list: Vec<Value> = (0..commits)
            .map(|i| json!({"sha": format!("{i:040}"), "message": "m"}))
            .collect();
        json!({"type": "PushEvent", "created_at": at, "payload": {"commits": list}})
    }

    #[test]
    fn sums_commits_not_events() {
        let events = json!([
            push("2024-01-01T10:00:00Z", 2),
            push("2024-01-01T10:00:00Z", 3),
            push("2024-01-02T09:00:00Z", 1),
        ]);

        assert_eq!(
            aggregate_push_events(&events).unwrap(),
            vec![
                DailyCommitCount::new("2024-01-01", 5),
                DailyCommitCount::new("2024-01-02", 1),
            ]
        );
    }

    #[test]
    fn keeps_first_seen_order() {
        let events = json!([
            push("2024-03-05T12:00:00Z", 1),
            push("2024-03-01T12:00:00Z", 4),
            push("2024-03-05T01:00:00Z", 2),
        ]);

        let dates: Vec<_> = aggregate_push_events(&events)
            .unwrap()
            .into_iter()
            .map(|d| (d.date, d.count))
            .collect();
        assert_eq!(
            dates,
            vec![("2024-03-05".to_string(), 3), ("2024-03-01".to_string(), 4)]
        );
    }

    #[test]
    fn converts_offsets_to_utc_day() {
        let events = json!([push("2024-01-01T23:30:00-02:00", 1)]);
        assert_eq!(
            aggregate_push_events(&events).unwrap(),
            vec![DailyCommitCount::new("2024-01-02", 1)]
        );
    }

    #[test]
    fn ignores_other_events_whatever_their_shape() {
        let events = json!([
            {"type": "WatchEvent", "created_at": "2024-01-01T00:00:00Z"},
            {"type": "CreateEvent", "payload": null},
            {"type": 42},
            {"created_at": "not a date"},
            "garbage",
            push("2024-01-01T00:00:00Z", 1),
        ]);

        assert_eq!(
            aggregate_push_events(&events).unwrap(),
            vec![DailyCommitCount::new("2024-01-01", 1)]
        );
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(aggregate_push_events(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn zero_commit_push_keeps_date_key() {
        let events = json!([
            push("2024-01-03T00:00:00Z", 0),
            push("2024-01-01T00:00:00Z", 1),
        ]);

        assert_eq!(
            aggregate_push_events(&events).unwrap(),
            vec![
                DailyCommitCount::new("2024-01-03", 0),
                DailyCommitCount::new("2024-01-01", 1),
            ]
        );
    }

    #[test]
    fn push_without_commits_fails() {
        let events = json!([
            push("2024-01-01T00:00:00Z", 1),
            {"type": "PushEvent", "created_at": "2024-01-01T00:00:00Z", "payload": {"size": 1}},
        ]);

        assert!(matches!(
            aggregate_push_events(&events),
            Err(ParseError::MissingField {
                index: 1,
                field: "payload.commits"
            })
        ));
    }

    #[test]
    fn push_with_bad_timestamp_fails() {
        let events = json!([{"type": "PushEvent", "created_at": "yesterday", "payload": {"commits": []}}]);
        assert!(matches!(
            aggregate_push_events(&events),
            Err(ParseError::Timestamp { index: 0, .. })
        ));
    }

    #[test]
    fn non_array_body_fails() {
        let body = json!({"message": "Not Found"});
        assert!(matches!(
            aggregate_push_events(&body),
            Err(ParseError::NotAnArray { what: "events", .. })
        ));
    }
}
