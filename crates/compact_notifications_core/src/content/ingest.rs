use serde_json::Value;

use super::{EmailContent, TemplateBuilder};
use crate::contract::{CompactConfiguration, JurisdictionConfiguration};
use crate::events::{sort_validation_errors, IngestFailureEvent, ValidationErrorEvent};
use crate::settings::NotificationSettings;

/// Names the reporting period in subjects, e.g. "Last 7 Days".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Day,
    Week,
}

impl ReportPeriod {
    fn label(self) -> &'static str {
        match self {
            Self::Day => "Last Day",
            Self::Week => "Last 7 Days",
        }
    }
}

fn scope_label(compact: &CompactConfiguration, jurisdiction: &JurisdictionConfiguration) -> String {
    format!(
        "{} / {}",
        compact.compact_abbr.to_uppercase(),
        jurisdiction.jurisdiction_name
    )
}

/// Ingest failures first, then validation errors in record order.
pub fn error_report(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    jurisdiction: &JurisdictionConfiguration,
    ingest_failures: &[IngestFailureEvent],
    validation_errors: &[ValidationErrorEvent],
) -> EmailContent {
    let mut builder = TemplateBuilder::new(settings)
        .heading("License Data Error Summary")
        .body(format!(
            "There have been some license data errors that prevented ingest for {}. They are listed below:",
            scope_label(compact, jurisdiction)
        ));

    if !ingest_failures.is_empty() {
        builder = builder.sub_heading("File Errors");
        for failure in ingest_failures {
            builder = builder
                .emphasis(format!("Uploaded {}", failure.event_time.format("%Y-%m-%d %H:%M:%S UTC")))
                .list(&failure.errors);
        }
        builder = builder.divider();
    }

    if !validation_errors.is_empty() {
        let mut sorted = validation_errors.to_vec();
        sort_validation_errors(&mut sorted);

        builder = builder.sub_heading("Validation Errors");
        for event in &sorted {
            builder = builder
                .emphasis(format!("Line {}", event.record_number))
                .list(event.errors.iter().flat_map(|(field, messages)| {
                    messages
                        .iter()
                        .map(move |message| format!("{field}: {message}"))
                }));
            if !event.valid_data.is_empty() {
                builder = builder.body(format!(
                    "Valid data: {}",
                    event
                        .valid_data
                        .iter()
                        .map(|(field, value)| format!("{field}={}", display_value(value)))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }
        builder = builder.divider();
    }

    builder.finish(format!(
        "License Data Error Summary: {}",
        scope_label(compact, jurisdiction)
    ))
}

pub fn alls_well(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    jurisdiction: &JurisdictionConfiguration,
    period: ReportPeriod,
) -> EmailContent {
    TemplateBuilder::new(settings)
        .heading("License Data Summary")
        .centered(format!(
            "There have been no license data errors for {} in the {}!",
            jurisdiction.jurisdiction_name,
            period.label().to_lowercase()
        ))
        .centered("Keep up the good work.")
        .finish(format!(
            "License Data Summary: {}",
            scope_label(compact, jurisdiction)
        ))
}

pub fn no_license_updates(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    jurisdiction: &JurisdictionConfiguration,
    period: ReportPeriod,
) -> EmailContent {
    TemplateBuilder::new(settings)
        .heading(format!("No License Updates for {}", period.label()))
        .body(format!(
            "No license updates have been received from {} for the {} compact in the {}. Please upload license data if there have been any changes.",
            jurisdiction.jurisdiction_name,
            compact.compact_name,
            period.label().to_lowercase()
        ))
        .finish(format!(
            "No License Updates for {}: {}",
            period.label(),
            scope_label(compact, jurisdiction)
        ))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
