use serde::{Deserialize, Serialize};

use super::{EmailContent, TemplateBuilder};
use crate::contract::{CompactConfiguration, JurisdictionConfiguration};
use crate::settings::NotificationSettings;

/// Variables for the compact-wide transaction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactReportVariables {
    pub compact_financial_summary_report_s3_path: String,
    pub compact_transaction_report_s3_path: String,
    pub reporting_cycle: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionReportVariables {
    pub jurisdiction_transaction_report_s3_path: String,
    pub reporting_cycle: String,
    pub start_date: String,
    pub end_date: String,
}

pub fn batch_settlement_failure(settings: &NotificationSettings, compact: &str) -> EmailContent {
    let compact = compact.to_uppercase();
    TemplateBuilder::new(settings)
        .heading("Transactions Failed to Settle")
        .body(format!(
            "A transaction settlement error was detected within the payment processing account for the {compact} compact. Please reach out to your payment processing representative to determine the cause. Transactions made in the account will not be able to be settled until the issue is addressed."
        ))
        .finish(format!(
            "Transactions Failed to Settle for {compact} Payment Processor"
        ))
}

pub fn compact_transaction_report(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    variables: &CompactReportVariables,
) -> EmailContent {
    let cycle = capitalize(&variables.reporting_cycle);
    let abbr = compact.compact_abbr.to_uppercase();
    TemplateBuilder::new(settings)
        .heading(format!("{cycle} Report for Compact {abbr}"))
        .body(format!(
            "Please find attached the {} transaction reports for the {} compact covering {} to {}:",
            variables.reporting_cycle.to_lowercase(),
            compact.compact_name,
            variables.start_date,
            variables.end_date,
        ))
        .list([
            "Financial Summary Report - A summary of all fees collected, by jurisdiction",
            "Transaction Detail Report - A detailed list of all settled privilege purchases",
        ])
        .finish(format!("{cycle} Report for Compact {abbr}"))
}

pub fn jurisdiction_transaction_report(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    jurisdiction: &JurisdictionConfiguration,
    variables: &JurisdictionReportVariables,
) -> EmailContent {
    let cycle = capitalize(&variables.reporting_cycle);
    let abbr = compact.compact_abbr.to_uppercase();
    TemplateBuilder::new(settings)
        .heading(format!(
            "{} {cycle} Report for Compact {abbr}",
            jurisdiction.jurisdiction_name
        ))
        .body(format!(
            "Please find attached the {} transaction report for privileges purchased in {} through the {} compact covering {} to {}.",
            variables.reporting_cycle.to_lowercase(),
            jurisdiction.jurisdiction_name,
            compact.compact_name,
            variables.start_date,
            variables.end_date,
        ))
        .finish(format!(
            "{} {cycle} Report for Compact {abbr}",
            jurisdiction.jurisdiction_name
        ))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::block_texts;
    use crate::settings::test_settings;

    #[test]
    fn settlement_failure_subject_uses_upper_case_compact() {
        let content = batch_settlement_failure(&test_settings("prod"), "aslp");
        assert_eq!(
            content.subject,
            "Transactions Failed to Settle for ASLP Payment Processor"
        );
    }

    #[test]
    fn report_subject_capitalizes_cycle() {
        let compact = CompactConfiguration {
            compact_abbr: "octp".to_string(),
            compact_name: "Occupational Therapy".to_string(),
            compact_commission_fee: None,
            compact_operations_team_emails: Vec::new(),
            compact_adverse_actions_notification_emails: Vec::new(),
            compact_summary_report_notification_emails: Vec::new(),
        };
        let variables = CompactReportVariables {
            compact_financial_summary_report_s3_path: "reports/a.zip".to_string(),
            compact_transaction_report_s3_path: "reports/b.zip".to_string(),
            reporting_cycle: "WEEKLY".to_string(),
            start_date: "2025-03-03".to_string(),
            end_date: "2025-03-09".to_string(),
        };
        let content = compact_transaction_report(&test_settings("prod"), &compact, &variables);
        assert_eq!(content.subject, "Weekly Report for Compact OCTP");
        assert!(block_texts(&content)
            .iter()
            .any(|text| text.contains("2025-03-03 to 2025-03-09")));
    }
}
