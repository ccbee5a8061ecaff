use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NotificationError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub fee_type: String,
    pub fee_amount: f64,
}

/// Compact-level record from the configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactConfiguration {
    pub compact_abbr: String,
    pub compact_name: String,
    #[serde(default)]
    pub compact_commission_fee: Option<Fee>,
    #[serde(default)]
    pub compact_operations_team_emails: Vec<String>,
    #[serde(default)]
    pub compact_adverse_actions_notification_emails: Vec<String>,
    #[serde(default)]
    pub compact_summary_report_notification_emails: Vec<String>,
}

/// Jurisdiction-level record from the configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionConfiguration {
    pub postal_abbreviation: String,
    pub jurisdiction_name: String,
    #[serde(default)]
    pub jurisdiction_fee: Option<f64>,
    #[serde(default)]
    pub jurisdiction_operations_team_emails: Vec<String>,
    #[serde(default)]
    pub jurisdiction_adverse_actions_notification_emails: Vec<String>,
    #[serde(default)]
    pub jurisdiction_summary_report_notification_emails: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientScope {
    Compact,
    Jurisdiction,
    Specific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientType {
    CompactOperationsTeam,
    CompactAdverseActions,
    CompactSummaryReport,
    JurisdictionOperationsTeam,
    JurisdictionAdverseActions,
    JurisdictionSummaryReport,
    Specific,
}

impl RecipientType {
    pub const ALL: [RecipientType; 7] = [
        Self::CompactOperationsTeam,
        Self::CompactAdverseActions,
        Self::CompactSummaryReport,
        Self::JurisdictionOperationsTeam,
        Self::JurisdictionAdverseActions,
        Self::JurisdictionSummaryReport,
        Self::Specific,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompactOperationsTeam => "COMPACT_OPERATIONS_TEAM",
            Self::CompactAdverseActions => "COMPACT_ADVERSE_ACTIONS",
            Self::CompactSummaryReport => "COMPACT_SUMMARY_REPORT",
            Self::JurisdictionOperationsTeam => "JURISDICTION_OPERATIONS_TEAM",
            Self::JurisdictionAdverseActions => "JURISDICTION_ADVERSE_ACTIONS",
            Self::JurisdictionSummaryReport => "JURISDICTION_SUMMARY_REPORT",
            Self::Specific => "SPECIFIC",
        }
    }

    pub fn scope(self) -> RecipientScope {
        match self {
            Self::CompactOperationsTeam | Self::CompactAdverseActions | Self::CompactSummaryReport => {
                RecipientScope::Compact
            }
            Self::JurisdictionOperationsTeam
            | Self::JurisdictionAdverseActions
            | Self::JurisdictionSummaryReport => RecipientScope::Jurisdiction,
            Self::Specific => RecipientScope::Specific,
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientType {
    type Err = NotificationError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| NotificationError::Unsupported(format!("recipient type '{value}'")))
    }
}

/// Which addresses a notification goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients {
    pub recipient_type: RecipientType,
    pub specific_emails: Vec<String>,
}

impl Recipients {
    pub fn configured(recipient_type: RecipientType) -> Self {
        Self {
            recipient_type,
            specific_emails: Vec::new(),
        }
    }

    pub fn specific(emails: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            recipient_type: RecipientType::Specific,
            specific_emails: emails.into_iter().map(Into::into).collect(),
        }
    }
}
