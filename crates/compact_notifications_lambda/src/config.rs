//! Cold-start configuration read from the Lambda environment.

use compact_notifications_core::settings::{NotificationSettings, DEFAULT_FROM_NAME};
use thiserror::Error;

pub const ENVIRONMENT_NAME: &str = "ENVIRONMENT_NAME";
pub const FROM_ADDRESS: &str = "FROM_ADDRESS";
pub const FROM_NAME: &str = "FROM_NAME";
pub const UI_BASE_PATH_URL: &str = "UI_BASE_PATH_URL";
pub const EMAIL_LOGO_URL: &str = "EMAIL_LOGO_URL";
pub const COMPACT_CONFIGURATION_TABLE_NAME: &str = "COMPACT_CONFIGURATION_TABLE_NAME";
pub const DATA_EVENT_TABLE_NAME: &str = "DATA_EVENT_TABLE_NAME";
pub const TRANSACTION_REPORTS_BUCKET_NAME: &str = "TRANSACTION_REPORTS_BUCKET_NAME";
pub const COMPACTS: &str = "COMPACTS";
pub const JURISDICTIONS: &str = "JURISDICTIONS";

const DEFAULT_LOGO_PATH: &str = "/img/email/compact-connect-logo-final.png";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} is malformed: {message}")]
    Malformed { name: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub settings: NotificationSettings,
    pub compact_configuration_table: Option<String>,
    pub data_event_table: Option<String>,
    pub transaction_reports_bucket: Option<String>,
    pub compacts: Vec<String>,
    pub jurisdictions: Vec<String>,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any name lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let ui_base_url = required(UI_BASE_PATH_URL)?;
        let logo_url = optional(EMAIL_LOGO_URL).unwrap_or_else(|| {
            format!("{}{DEFAULT_LOGO_PATH}", ui_base_url.trim_end_matches('/'))
        });
        let settings = NotificationSettings {
            environment_name: required(ENVIRONMENT_NAME)?,
            from_address: required(FROM_ADDRESS)?,
            from_name: optional(FROM_NAME).unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            ui_base_url,
            logo_url,
        };

        Ok(Self {
            settings,
            compact_configuration_table: optional(COMPACT_CONFIGURATION_TABLE_NAME),
            data_event_table: optional(DATA_EVENT_TABLE_NAME),
            transaction_reports_bucket: optional(TRANSACTION_REPORTS_BUCKET_NAME),
            compacts: optional(COMPACTS)
                .map(|value| parse_list(COMPACTS, &value))
                .transpose()?
                .unwrap_or_default(),
            jurisdictions: optional(JURISDICTIONS)
                .map(|value| parse_list(JURISDICTIONS, &value))
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub fn require_configuration_table(&self) -> Result<&str, ConfigError> {
        self.compact_configuration_table
            .as_deref()
            .ok_or(ConfigError::Missing(COMPACT_CONFIGURATION_TABLE_NAME))
    }

    pub fn require_event_table(&self) -> Result<&str, ConfigError> {
        self.data_event_table
            .as_deref()
            .ok_or(ConfigError::Missing(DATA_EVENT_TABLE_NAME))
    }
}

/// Accepts a JSON array (`["aslp","octp"]`) or a comma separated list; entries are lower-cased.
fn parse_list(name: &'static str, value: &str) -> Result<Vec<String>, ConfigError> {
    let entries: Vec<String> = if value.starts_with('[') {
        serde_json::from_str(value).map_err(|error| ConfigError::Malformed {
            name,
            message: error.to_string(),
        })?
    } else {
        value.split(',').map(str::to_string).collect()
    };
    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect())
}
