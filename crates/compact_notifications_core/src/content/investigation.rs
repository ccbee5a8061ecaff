use serde::{Deserialize, Serialize};

use super::encumbrance::Credential;
use super::{full_name, EmailContent, TemplateBuilder};
use crate::settings::NotificationSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestigationStatus {
    Opened,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationVariables {
    pub provider_first_name: String,
    pub provider_last_name: String,
    pub provider_id: String,
    pub investigation_jurisdiction: String,
    pub license_type: String,
}

pub fn state_notification(
    settings: &NotificationSettings,
    compact: &str,
    credential: Credential,
    status: InvestigationStatus,
    investigation_jurisdiction_name: &str,
    variables: &InvestigationVariables,
) -> EmailContent {
    let name = full_name(&variables.provider_first_name, &variables.provider_last_name);
    let profile_url = settings.ui_url(&format!(
        "/{}/Licensing/{}",
        compact.to_lowercase(),
        variables.provider_id
    ));
    let (heading, detail, subject_label) = match status {
        InvestigationStatus::Opened => (
            format!("{} Investigation", credential.title()),
            "is under investigation",
            format!("{} Investigation Notification", credential.title()),
        ),
        InvestigationStatus::Closed => (
            format!("{} Investigation Closed", credential.title()),
            "is no longer under investigation",
            format!("{} Investigation Closed Notification", credential.title()),
        ),
    };

    TemplateBuilder::new(settings)
        .heading(heading)
        .body(format!(
            "This message is to notify you that the {} {} held by {name} {detail} by {investigation_jurisdiction_name}.",
            variables.license_type,
            credential.noun(),
        ))
        .body(format!("Provider details: {profile_url}"))
        .finish(format!("{subject_label} - {name}"))
}
