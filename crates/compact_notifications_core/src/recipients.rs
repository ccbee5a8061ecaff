use crate::contract::{
    CompactConfiguration, JurisdictionConfiguration, RecipientScope, RecipientType, Recipients,
};
use crate::error::{NotificationError, Result};

/// Recipients that need no configuration lookup, or `None` when a lookup is required.
///
/// Empty specific lists fail here so callers can reject them before any I/O.
pub fn specific_recipients(recipients: &Recipients) -> Result<Option<Vec<String>>> {
    if recipients.recipient_type.scope() != RecipientScope::Specific {
        return Ok(None);
    }
    let emails: Vec<String> = recipients
        .specific_emails
        .iter()
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .collect();
    if emails.is_empty() {
        return Err(NotificationError::EmptyRecipients(
            "SPECIFIC recipient type".to_string(),
        ));
    }
    Ok(Some(emails))
}

pub fn compact_recipients(
    config: &CompactConfiguration,
    recipient_type: RecipientType,
) -> Result<Vec<String>> {
    let emails = match recipient_type {
        RecipientType::CompactOperationsTeam => &config.compact_operations_team_emails,
        RecipientType::CompactAdverseActions => &config.compact_adverse_actions_notification_emails,
        RecipientType::CompactSummaryReport => &config.compact_summary_report_notification_emails,
        other => {
            return Err(NotificationError::Unsupported(format!(
                "recipient type {other} for compact configuration"
            )))
        }
    };
    non_empty(emails, || {
        format!("{recipient_type} in compact {}", config.compact_abbr)
    })
}

pub fn jurisdiction_recipients(
    config: &JurisdictionConfiguration,
    recipient_type: RecipientType,
) -> Result<Vec<String>> {
    let emails = match recipient_type {
        RecipientType::JurisdictionOperationsTeam => &config.jurisdiction_operations_team_emails,
        RecipientType::JurisdictionAdverseActions => {
            &config.jurisdiction_adverse_actions_notification_emails
        }
        RecipientType::JurisdictionSummaryReport => {
            &config.jurisdiction_summary_report_notification_emails
        }
        other => {
            return Err(NotificationError::Unsupported(format!(
                "recipient type {other} for jurisdiction configuration"
            )))
        }
    };
    non_empty(emails, || {
        format!(
            "{recipient_type} in jurisdiction {}",
            config.postal_abbreviation
        )
    })
}

fn non_empty(emails: &[String], describe: impl FnOnce() -> String) -> Result<Vec<String>> {
    if emails.is_empty() {
        return Err(NotificationError::EmptyRecipients(describe()));
    }
    Ok(emails.to_vec())
}
