mod support;

use compact_notifications_core::keys::EventKind;
use serde_json::json;

use support::{aslp_harness, html_of, run_reporter};

#[test]
fn nightly_run_without_events_sends_one_no_updates_email() {
    let harness = aslp_harness("prod");

    let summary = run_reporter(&harness, "nightly", &["aslp"], &["oh"]).expect("run succeeds");

    assert_eq!(summary.no_updates_sent, 1);
    assert_eq!(summary.error_reports_sent + summary.alls_well_sent, 0);
    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["oh-ops@example.com"]);
    assert_eq!(
        sent[0].subject,
        "No License Updates for Last Day: ASLP / Ohio"
    );
}

#[test]
fn error_report_lists_file_errors_before_record_errors() {
    let harness = aslp_harness("prod");
    // 2025-03-11T10:00:00Z and later, inside yesterday's window.
    let base = 1_741_687_200;
    harness.seed_event(
        "aslp",
        "oh",
        EventKind::ValidationError,
        base,
        json!({
            "eventTime": "2025-03-11T10:00:00Z",
            "recordNumber": 7,
            "errors": {"dateOfExpiration": ["Not a valid date."]},
        }),
    );
    harness.seed_event(
        "aslp",
        "oh",
        EventKind::ValidationError,
        base + 1,
        json!({
            "eventTime": "2025-03-11T10:00:01Z",
            "recordNumber": 3,
            "errors": {"licenseNumber": ["Missing data for required field."]},
        }),
    );
    harness.seed_event(
        "aslp",
        "oh",
        EventKind::IngestFailure,
        base + 2,
        json!({
            "eventTime": "2025-03-11T10:00:02Z",
            "errors": ["CSV header is missing column: licenseType"],
        }),
    );

    let summary = run_reporter(&harness, "nightly", &["aslp"], &[]).expect("run succeeds");

    assert_eq!(summary.error_reports_sent, 1);
    let sent = harness.mailer.sent();
    let html = html_of(&sent[0]);
    let file_errors = html.find("CSV header is missing column").expect("file error listed");
    let line_three = html.find("Line 3").expect("record 3 listed");
    let line_seven = html.find("Line 7").expect("record 7 listed");
    assert!(file_errors < line_three);
    assert!(line_three < line_seven);
}

#[test]
fn weekly_run_covers_every_compact_and_skips_missing_configuration() {
    let harness = aslp_harness("prod");
    harness.seed_compact("octp", &["octp-ops@example.com"]);
    harness.seed_jurisdiction("octp", "oh", "Ohio", &["octp-oh@example.com"]);
    // Six days before the run, inside the weekly window only.
    harness.seed_event(
        "octp",
        "oh",
        EventKind::IngestSuccess,
        1_741_737_600 - 6 * 86_400,
        json!({"eventTime": "2025-03-06T00:00:00Z"}),
    );

    let summary = run_reporter(&harness, "weekly", &["aslp", "octp", "coun"], &["oh", "ky"])
        .expect("run succeeds");

    assert_eq!(summary.jurisdictions_checked, 2);
    assert_eq!(summary.no_updates_sent, 1);
    assert_eq!(summary.alls_well_sent, 1);
    // coun has no configuration; ky is missing under both configured compacts.
    assert_eq!(summary.skipped, 3);

    let subjects: Vec<String> = harness
        .mailer
        .sent()
        .into_iter()
        .map(|email| email.subject)
        .collect();
    assert_eq!(
        subjects,
        vec![
            "No License Updates for Last 7 Days: ASLP / Ohio".to_string(),
            "License Data Summary: OCTP / Ohio".to_string(),
        ]
    );
}
