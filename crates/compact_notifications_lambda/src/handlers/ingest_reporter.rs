//! Scheduled ingest summaries, one email per compact and jurisdiction.

use chrono::{DateTime, Utc};
use compact_notifications_core::content::ingest::ReportPeriod;
use compact_notifications_core::contract::JurisdictionConfiguration;
use compact_notifications_core::events::IngestOutcome;
use compact_notifications_core::time_windows::{last_week, yesterday, TimeWindow};
use compact_notifications_core::{NotificationError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::EventClient;
use crate::services::{IngestReportService, ServiceContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCadence {
    Nightly,
    Weekly,
}

impl ReportCadence {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "nightly" => Ok(Self::Nightly),
            "weekly" => Ok(Self::Weekly),
            other => Err(NotificationError::Unsupported(format!(
                "report cadence '{other}'"
            ))),
        }
    }

    pub fn window(self, now: DateTime<Utc>) -> TimeWindow {
        match self {
            Self::Nightly => yesterday(now),
            Self::Weekly => last_week(now),
        }
    }

    pub fn period(self) -> ReportPeriod {
        match self {
            Self::Nightly => ReportPeriod::Day,
            Self::Weekly => ReportPeriod::Week,
        }
    }
}

/// Scheduled trigger payload, `{"eventType": "nightly" | "weekly"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterEvent {
    pub event_type: ReportCadence,
}

impl ReporterEvent {
    pub fn from_value(event: &Value) -> Result<Self> {
        let event_type = event
            .get("eventType")
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::new("eventType is required and must be a string"))?;
        Ok(Self {
            event_type: ReportCadence::parse(event_type)?,
        })
    }
}

/// Which compacts to report on, and optionally which jurisdictions. An empty
/// jurisdiction list means every jurisdiction configured under the compact.
#[derive(Debug, Clone, Copy)]
pub struct ReporterScope<'a> {
    pub compacts: &'a [String],
    pub jurisdictions: &'a [String],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterSummary {
    pub jurisdictions_checked: usize,
    pub error_reports_sent: usize,
    pub alls_well_sent: usize,
    pub no_updates_sent: usize,
    pub skipped: usize,
}

pub fn handle_ingest_reporter_event(
    event: Value,
    now: DateTime<Utc>,
    context: ServiceContext<'_>,
    events: EventClient<'_>,
    scope: ReporterScope<'_>,
) -> Result<ReporterSummary> {
    let event = ReporterEvent::from_value(&event)?;
    let window = event.event_type.window(now);
    let period = event.event_type.period();
    tracing::info!(
        cadence = ?event.event_type,
        window_start = window.start,
        window_end = window.end,
        compacts = scope.compacts.len(),
        "starting ingest report run"
    );

    let service = IngestReportService::new(context);
    let mut summary = ReporterSummary::default();
    for compact in scope.compacts {
        let compact_config = match context.configuration.get_compact_configuration(compact) {
            Ok(config) => config,
            Err(error) if error.is_skippable_lookup() => {
                tracing::warn!(compact = %compact, %error, "skipping compact");
                summary.skipped += 1;
                continue;
            }
            Err(error) => return Err(error),
        };

        for jurisdiction in jurisdictions_for(context, compact, scope.jurisdictions, &mut summary)? {
            summary.jurisdictions_checked += 1;
            let found = events.get_events(compact, &jurisdiction.postal_abbreviation, window)?;
            let outcome = found.outcome();
            let sent = match outcome {
                IngestOutcome::ErrorReport => service.send_ingest_error_report_email(
                    &compact_config,
                    &jurisdiction,
                    &found.ingest_failures,
                    &found.validation_errors,
                ),
                IngestOutcome::AllsWell => {
                    service.send_alls_well_email(&compact_config, &jurisdiction, period)
                }
                IngestOutcome::NoUpdates => {
                    service.send_no_license_updates_email(&compact_config, &jurisdiction, period)
                }
            };

            match sent {
                Ok(_) => match outcome {
                    IngestOutcome::ErrorReport => summary.error_reports_sent += 1,
                    IngestOutcome::AllsWell => summary.alls_well_sent += 1,
                    IngestOutcome::NoUpdates => summary.no_updates_sent += 1,
                },
                Err(error) if error.is_skippable_lookup() => {
                    tracing::warn!(
                        compact = %compact,
                        jurisdiction = %jurisdiction.postal_abbreviation,
                        %error,
                        "skipping jurisdiction"
                    );
                    summary.skipped += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    tracing::info!(
        checked = summary.jurisdictions_checked,
        error_reports = summary.error_reports_sent,
        alls_well = summary.alls_well_sent,
        no_updates = summary.no_updates_sent,
        skipped = summary.skipped,
        "ingest report run complete"
    );
    Ok(summary)
}

/// Configurations to report on. A jurisdiction whose configuration cannot be
/// read or decoded is logged and skipped; the rest of the run continues.
fn jurisdictions_for(
    context: ServiceContext<'_>,
    compact: &str,
    configured: &[String],
    summary: &mut ReporterSummary,
) -> Result<Vec<JurisdictionConfiguration>> {
    let lookups = if configured.is_empty() {
        context
            .configuration
            .decode_jurisdiction_configurations(compact)?
    } else {
        configured
            .iter()
            .map(|jurisdiction| {
                context
                    .configuration
                    .get_jurisdiction_configuration(compact, jurisdiction)
            })
            .collect()
    };

    let mut found = Vec::with_capacity(lookups.len());
    for lookup in lookups {
        match lookup {
            Ok(config) => found.push(config),
            Err(error) => {
                tracing::warn!(compact = %compact, %error, "skipping jurisdiction configuration");
                summary.skipped += 1;
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use compact_notifications_core::keys::EventKind;
    use serde_json::json;

    use super::*;
    use crate::testing::{TestHarness, CONFIGURATION_TABLE};

    // 2025-03-12T02:00:00Z; yesterday is [2025-03-11, 2025-03-12).
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 12, 2, 0, 0)
            .single()
            .expect("valid time")
    }

    const YESTERDAY_NOON: i64 = 1_741_694_400;

    fn run(harness: &TestHarness, cadence: &str, jurisdictions: &[String]) -> Result<ReporterSummary> {
        let compacts = vec!["aslp".to_string()];
        handle_ingest_reporter_event(
            json!({"eventType": cadence}),
            now(),
            harness.context(),
            harness.events(),
            ReporterScope {
                compacts: &compacts,
                jurisdictions,
            },
        )
    }

    fn seeded() -> TestHarness {
        let harness = TestHarness::new("prod");
        harness.seed_compact("aslp", &["ops@example.com"]);
        harness.seed_jurisdiction("aslp", "oh", "Ohio", &["oh-ops@example.com"]);
        harness
    }

    #[test]
    fn cadence_selects_window() {
        assert_eq!(ReportCadence::Nightly.window(now()).len_seconds(), 86_400);
        assert_eq!(ReportCadence::Weekly.window(now()).len_seconds(), 604_800);
        assert_eq!(ReportCadence::Weekly.period(), ReportPeriod::Week);
    }

    #[test]
    fn errors_outrank_successes() {
        let harness = seeded();
        harness.seed_event(
            "aslp",
            "oh",
            EventKind::IngestSuccess,
            YESTERDAY_NOON,
            json!({"eventTime": "2025-03-11T12:00:00Z"}),
        );
        harness.seed_event(
            "aslp",
            "oh",
            EventKind::ValidationError,
            YESTERDAY_NOON + 5,
            json!({
                "eventTime": "2025-03-11T12:00:05Z",
                "recordNumber": 2,
                "errors": {"licenseNumber": ["Missing data for required field."]},
            }),
        );

        let summary = run(&harness, "nightly", &[]).expect("run succeeds");
        assert_eq!(summary.error_reports_sent, 1);
        assert_eq!(summary.alls_well_sent, 0);
        assert_eq!(
            harness.mailer.sent()[0].subject,
            "License Data Error Summary: ASLP / Ohio"
        );
    }

    #[test]
    fn successes_only_is_alls_well() {
        let harness = seeded();
        harness.seed_event(
            "aslp",
            "oh",
            EventKind::IngestSuccess,
            YESTERDAY_NOON,
            json!({"eventTime": "2025-03-11T12:00:00Z", "licenseType": "audiologist"}),
        );
        let summary = run(&harness, "nightly", &[]).expect("run succeeds");
        assert_eq!(summary.alls_well_sent, 1);
        assert_eq!(
            harness.mailer.sent()[0].subject,
            "License Data Summary: ASLP / Ohio"
        );
    }

    #[test]
    fn unconfigured_jurisdiction_is_skipped_and_the_run_continues() {
        let harness = seeded();
        let jurisdictions = vec!["ne".to_string(), "oh".to_string()];
        let summary = run(&harness, "weekly", &jurisdictions).expect("run succeeds");
        assert_eq!(
            summary,
            ReporterSummary {
                jurisdictions_checked: 1,
                error_reports_sent: 0,
                alls_well_sent: 0,
                no_updates_sent: 1,
                skipped: 1,
            }
        );
        assert_eq!(harness.mailer.sent()[0].to, vec!["oh-ops@example.com"]);
    }

    #[test]
    fn jurisdiction_without_operations_team_is_skipped() {
        let harness = seeded();
        harness.seed_jurisdiction("aslp", "ky", "Kentucky", &[]);
        let summary = run(&harness, "nightly", &[]).expect("run succeeds");
        assert_eq!(summary.jurisdictions_checked, 2);
        assert_eq!(summary.no_updates_sent, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn unknown_cadence_is_unsupported() {
        let harness = seeded();
        let error = run(&harness, "hourly", &[]).expect_err("unknown cadence");
        assert_eq!(
            error,
            NotificationError::Unsupported("report cadence 'hourly'".to_string())
        );
        assert!(harness.mailer.sent().is_empty());
    }

    #[test]
    fn missing_event_type_is_invalid() {
        let harness = seeded();
        let compacts = vec!["aslp".to_string()];
        let error = handle_ingest_reporter_event(
            json!({"eventType": 7}),
            now(),
            harness.context(),
            harness.events(),
            ReporterScope {
                compacts: &compacts,
                jurisdictions: &[],
            },
        )
        .expect_err("eventType is not a string");
        assert!(matches!(error, NotificationError::Validation(_)));
        assert!(harness.mailer.sent().is_empty());
    }

    fn seed_malformed_kentucky(harness: &TestHarness) {
        harness.records.insert(
            CONFIGURATION_TABLE,
            json!({
                "pk": "aslp#CONFIGURATION",
                "sk": "aslp#JURISDICTION#ky",
                "postalAbbreviation": "ky",
            }),
        );
    }

    #[test]
    fn malformed_configured_jurisdiction_is_skipped() {
        let harness = seeded();
        seed_malformed_kentucky(&harness);
        let jurisdictions = vec!["ky".to_string(), "oh".to_string()];

        let summary = run(&harness, "nightly", &jurisdictions).expect("run succeeds");

        assert_eq!(summary.jurisdictions_checked, 1);
        assert_eq!(summary.no_updates_sent, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(harness.mailer.sent()[0].to, vec!["oh-ops@example.com"]);
    }

    #[test]
    fn malformed_discovered_jurisdiction_is_skipped() {
        let harness = seeded();
        seed_malformed_kentucky(&harness);

        let summary = run(&harness, "nightly", &[]).expect("run succeeds");

        assert_eq!(summary.jurisdictions_checked, 1);
        assert_eq!(summary.skipped, 1);
        let sent = harness.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].subject,
            "No License Updates for Last Day: ASLP / Ohio"
        );
    }

    #[test]
    fn mail_failure_stops_the_run() {
        let harness = seeded();
        harness.mailer.fail_with("daily quota exceeded");
        let error = run(&harness, "nightly", &[]).expect_err("mailer fails");
        assert!(matches!(error, NotificationError::Downstream { .. }));
    }
}
