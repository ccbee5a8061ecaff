use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A license row that failed validation during ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorEvent {
    pub event_time: DateTime<Utc>,
    pub record_number: u64,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub valid_data: BTreeMap<String, Value>,
}

/// A whole-file ingest failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestFailureEvent {
    pub event_time: DateTime<Utc>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSuccessEvent {
    pub event_time: DateTime<Utc>,
    #[serde(default)]
    pub license_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestEvents {
    pub validation_errors: Vec<ValidationErrorEvent>,
    pub ingest_failures: Vec<IngestFailureEvent>,
    pub ingest_successes: Vec<IngestSuccessEvent>,
}

/// What the scheduled reporter sends for one jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestOutcome {
    ErrorReport,
    AllsWell,
    NoUpdates,
}

impl IngestEvents {
    /// Errors outrank successes; an empty window means no updates.
    pub fn outcome(&self) -> IngestOutcome {
        if !self.ingest_failures.is_empty() || !self.validation_errors.is_empty() {
            IngestOutcome::ErrorReport
        } else if !self.ingest_successes.is_empty() {
            IngestOutcome::AllsWell
        } else {
            IngestOutcome::NoUpdates
        }
    }
}

/// Orders validation errors by record number, then event time. The sort is
/// stable, so records that tie on both keep their query order.
pub fn sort_validation_errors(events: &mut [ValidationErrorEvent]) {
    events.sort_by(|left, right| {
        left.record_number
            .cmp(&right.record_number)
            .then_with(|| left.event_time.cmp(&right.event_time))
    });
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn validation_error(record_number: u64, minute: u32, field: &str) -> ValidationErrorEvent {
        ValidationErrorEvent {
            event_time: Utc
                .with_ymd_and_hms(2025, 3, 12, 10, minute, 0)
                .single()
                .expect("valid timestamp"),
            record_number,
            errors: BTreeMap::from([(field.to_string(), vec![format!("{field} is invalid")])]),
            valid_data: BTreeMap::new(),
        }
    }

    #[test]
    fn sorts_by_record_number_then_time() {
        let mut events = vec![
            validation_error(5, 1, "first"),
            validation_error(4, 2, "second"),
            validation_error(5, 0, "third"),
        ];
        sort_validation_errors(&mut events);

        let order: Vec<(u64, u32)> = events
            .iter()
            .map(|event| (event.record_number, chrono::Timelike::minute(&event.event_time)))
            .collect();
        assert_eq!(order, vec![(4, 2), (5, 0), (5, 1)]);

        let flattened: Vec<&str> = events
            .iter()
            .flat_map(|event| event.errors.keys().map(String::as_str))
            .collect();
        assert_eq!(flattened, vec!["second", "third", "first"]);
    }

    #[test]
    fn outcome_prefers_errors_over_successes() {
        let success = IngestSuccessEvent {
            event_time: Utc::now(),
            license_type: None,
        };
        let mut events = IngestEvents {
            ingest_successes: vec![success],
            ..IngestEvents::default()
        };
        assert_eq!(events.outcome(), IngestOutcome::AllsWell);

        events.ingest_failures.push(IngestFailureEvent {
            event_time: Utc::now(),
            errors: vec!["bad header".to_string()],
        });
        assert_eq!(events.outcome(), IngestOutcome::ErrorReport);
        assert_eq!(IngestEvents::default().outcome(), IngestOutcome::NoUpdates);
    }

    #[test]
    fn parses_stored_validation_record() {
        let event: ValidationErrorEvent = serde_json::from_value(serde_json::json!({
            "pk": "COMPACT#aslp#JURISDICTION#oh",
            "sk": "TYPE#license.validation-error#TIME#1741773600#EVENT#abc",
            "eventType": "license.validation-error",
            "eventTime": "2025-03-12T10:00:00+00:00",
            "recordNumber": 7,
            "errors": {"dateOfBirth": ["Not a valid date."]},
            "validData": {"givenName": "Jane"}
        }))
        .expect("record should parse");

        assert_eq!(event.record_number, 7);
        assert_eq!(event.errors["dateOfBirth"], vec!["Not a valid date."]);
    }
}
