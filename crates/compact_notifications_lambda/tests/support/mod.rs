#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use compact_notifications_lambda::adapters::{EmailBody, OutgoingEmail};
use compact_notifications_lambda::handlers::ingest_reporter::{
    handle_ingest_reporter_event, ReporterScope, ReporterSummary,
};
use compact_notifications_lambda::testing::TestHarness;
use compact_notifications_core::Result;
use serde_json::json;

/// 2025-03-12T02:00:00Z, shortly after the nightly boundary.
pub fn nightly_run_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 12, 2, 0, 0)
        .single()
        .expect("valid time")
}

/// A harness with the aslp compact and Ohio configured.
pub fn aslp_harness(environment_name: &str) -> TestHarness {
    let harness = TestHarness::new(environment_name);
    harness.seed_compact("aslp", &["operations@example.com"]);
    harness.seed_jurisdiction("aslp", "oh", "Ohio", &["oh-ops@example.com"]);
    harness
}

pub fn html_of(email: &OutgoingEmail) -> &str {
    match &email.body {
        EmailBody::Html(html) => html,
        EmailBody::Raw(_) => panic!("expected an html body"),
    }
}

pub fn run_reporter(
    harness: &TestHarness,
    cadence: &str,
    compacts: &[&str],
    jurisdictions: &[&str],
) -> Result<ReporterSummary> {
    let compacts: Vec<String> = compacts.iter().map(|value| value.to_string()).collect();
    let jurisdictions: Vec<String> = jurisdictions.iter().map(|value| value.to_string()).collect();
    handle_ingest_reporter_event(
        json!({"eventType": cadence}),
        nightly_run_time(),
        harness.context(),
        harness.events(),
        ReporterScope {
            compacts: &compacts,
            jurisdictions: &jurisdictions,
        },
    )
}
