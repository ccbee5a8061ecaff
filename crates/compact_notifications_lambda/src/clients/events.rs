//! Windowed reads of license ingest events.

use compact_notifications_core::events::IngestEvents;
use compact_notifications_core::keys::{event_pk, event_window_condition, EventKind};
use compact_notifications_core::time_windows::TimeWindow;
use compact_notifications_core::{NotificationError, Result};
use serde::de::DeserializeOwned;

use crate::adapters::RecordStore;

#[derive(Clone, Copy)]
pub struct EventClient<'a> {
    store: &'a dyn RecordStore,
    table_name: &'a str,
}

impl<'a> EventClient<'a> {
    pub fn new(store: &'a dyn RecordStore, table_name: &'a str) -> Self {
        Self { store, table_name }
    }

    /// One query per event kind over `[window.start, window.end)`.
    pub fn get_events(
        &self,
        compact: &str,
        jurisdiction: &str,
        window: TimeWindow,
    ) -> Result<IngestEvents> {
        let pk = event_pk(compact, jurisdiction);
        Ok(IngestEvents {
            validation_errors: self.query(&pk, EventKind::ValidationError, window)?,
            ingest_failures: self.query(&pk, EventKind::IngestFailure, window)?,
            ingest_successes: self.query(&pk, EventKind::IngestSuccess, window)?,
        })
    }

    fn query<T: DeserializeOwned>(
        &self,
        pk: &str,
        kind: EventKind,
        window: TimeWindow,
    ) -> Result<Vec<T>> {
        let condition = event_window_condition(kind, window.start, window.end);
        let records = self
            .store
            .query_records(self.table_name, pk, &condition)
            .map_err(|error| {
                tracing::error!(pk = %pk, kind = kind.as_str(), %error, "event query failed");
                NotificationError::downstream(
                    format!("failed to query {} events under {pk}", kind.as_str()),
                    error,
                )
            })?;
        records
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|error| {
                    tracing::error!(pk = %pk, kind = kind.as_str(), %error, "malformed event record");
                    NotificationError::downstream(
                        format!("malformed {} event under {pk}", kind.as_str()),
                        error.to_string(),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use compact_notifications_core::time_windows::yesterday;
    use serde_json::json;

    use super::*;
    use crate::testing::TestHarness;

    const MIDNIGHT: i64 = 1_741_737_600; // 2025-03-12T00:00:00Z

    fn seed_at(harness: &TestHarness, kind: EventKind, timestamp: i64) {
        let event_time = Utc
            .timestamp_opt(timestamp, 0)
            .single()
            .expect("valid timestamp")
            .to_rfc3339();
        let body = match kind {
            EventKind::ValidationError => json!({
                "eventTime": event_time,
                "recordNumber": 4,
                "errors": {"dateOfBirth": ["Not a valid date."]},
                "validData": {"givenName": "Jane"},
            }),
            EventKind::IngestFailure => json!({"eventTime": event_time, "errors": ["bad header"]}),
            EventKind::IngestSuccess => json!({"eventTime": event_time, "licenseType": "audiologist"}),
        };
        harness.seed_event("aslp", "oh", kind, timestamp, body);
    }

    #[test]
    fn window_is_half_open() {
        let harness = TestHarness::new("test");
        let window = yesterday(Utc.timestamp_opt(MIDNIGHT + 3_600, 0).single().expect("now"));
        assert_eq!(window.end, MIDNIGHT);

        seed_at(&harness, EventKind::IngestSuccess, window.start);
        seed_at(&harness, EventKind::IngestSuccess, window.end - 1);
        seed_at(&harness, EventKind::IngestSuccess, window.end);
        seed_at(&harness, EventKind::IngestSuccess, window.start - 1);

        let events = harness
            .events()
            .get_events("aslp", "oh", window)
            .expect("query succeeds");
        let times: Vec<i64> = events
            .ingest_successes
            .iter()
            .map(|event| event.event_time.timestamp())
            .collect();
        assert_eq!(times, vec![window.start, window.end - 1]);
    }

    #[test]
    fn kinds_are_queried_separately() {
        let harness = TestHarness::new("test");
        let window = TimeWindow::ending_at(MIDNIGHT, 86_400);
        seed_at(&harness, EventKind::ValidationError, MIDNIGHT - 100);
        seed_at(&harness, EventKind::IngestFailure, MIDNIGHT - 90);
        seed_at(&harness, EventKind::IngestSuccess, MIDNIGHT - 80);
        seed_at(&harness, EventKind::IngestSuccess, MIDNIGHT - 70);

        let events = harness
            .events()
            .get_events("ASLP", "OH", window)
            .expect("query succeeds");
        assert_eq!(events.validation_errors.len(), 1);
        assert_eq!(events.validation_errors[0].record_number, 4);
        assert_eq!(events.ingest_failures[0].errors, vec!["bad header"]);
        assert_eq!(events.ingest_successes.len(), 2);
        assert_eq!(harness.records.calls(), 3);
    }

    #[test]
    fn empty_window_yields_no_events() {
        let harness = TestHarness::new("test");
        let events = harness
            .events()
            .get_events("aslp", "oh", TimeWindow::ending_at(MIDNIGHT, 86_400))
            .expect("query succeeds");
        assert_eq!(events, IngestEvents::default());
    }

    #[test]
    fn store_failure_names_the_event_kind() {
        let harness = TestHarness::new("test");
        harness.records.fail_with("timeout");
        let error = harness
            .events()
            .get_events("aslp", "oh", TimeWindow::ending_at(MIDNIGHT, 86_400))
            .expect_err("store fails");
        assert_eq!(
            error.to_string(),
            "failed to query license.validation-error events under COMPACT#aslp#JURISDICTION#oh: timeout"
        );
    }
}
