use serde::{Deserialize, Serialize};

use super::{full_name, EmailContent, TemplateBuilder};
use crate::settings::NotificationSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    License,
    Privilege,
}

impl Credential {
    pub fn noun(self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Privilege => "privilege",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::License => "License",
            Self::Privilege => "Privilege",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncumbranceAction {
    Encumbered,
    Lifted,
}

/// Variables for emails to the affected provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEncumbranceVariables {
    pub provider_first_name: String,
    pub encumbered_jurisdiction: String,
    pub license_type: String,
    #[serde(rename = "effectiveStartDate", alias = "effectiveLiftDate")]
    pub effective_date: String,
}

/// Variables for emails to a jurisdiction's adverse-actions contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEncumbranceVariables {
    pub provider_first_name: String,
    pub provider_last_name: String,
    pub provider_id: String,
    pub encumbered_jurisdiction: String,
    pub license_type: String,
    #[serde(rename = "effectiveStartDate", alias = "effectiveLiftDate")]
    pub effective_date: String,
}

pub fn provider_notification(
    settings: &NotificationSettings,
    credential: Credential,
    action: EncumbranceAction,
    encumbered_jurisdiction_name: &str,
    variables: &ProviderEncumbranceVariables,
) -> EmailContent {
    let noun = credential.noun();
    let license_type = &variables.license_type;
    let (heading, detail, subject) = match action {
        EncumbranceAction::Encumbered => (
            format!("Your {license_type} {noun} is Encumbered"),
            format!(
                "Your {license_type} {noun} in {encumbered_jurisdiction_name} was encumbered effective {}. While encumbered, the {noun} may not be used to practice, and privileges derived from it may be affected. Please contact the {encumbered_jurisdiction_name} licensing board for details.",
                variables.effective_date
            ),
            format!("Your {license_type} {noun} in {encumbered_jurisdiction_name} is encumbered"),
        ),
        EncumbranceAction::Lifted => (
            format!("Your {license_type} {noun} Encumbrance was Lifted"),
            format!(
                "The encumbrance on your {license_type} {noun} in {encumbered_jurisdiction_name} was lifted effective {}.",
                variables.effective_date
            ),
            format!(
                "Your {license_type} {noun} in {encumbered_jurisdiction_name} is no longer encumbered"
            ),
        ),
    };

    TemplateBuilder::new(settings)
        .heading(heading)
        .body(format!("Dear {},", variables.provider_first_name.trim()))
        .body(detail)
        .finish(subject)
}

pub fn state_notification(
    settings: &NotificationSettings,
    compact: &str,
    credential: Credential,
    action: EncumbranceAction,
    encumbered_jurisdiction_name: &str,
    variables: &StateEncumbranceVariables,
) -> EmailContent {
    let name = full_name(&variables.provider_first_name, &variables.provider_last_name);
    let profile_url = settings.ui_url(&format!(
        "/{}/Licensing/{}",
        compact.to_lowercase(),
        variables.provider_id
    ));
    let (heading, verb, subject_label) = match action {
        EncumbranceAction::Encumbered => (
            format!("{} Encumbrance", credential.title()),
            "was encumbered",
            format!("{} Encumbrance Notification", credential.title()),
        ),
        EncumbranceAction::Lifted => (
            format!("{} Encumbrance Lifted", credential.title()),
            "is no longer encumbered",
            format!("{} Encumbrance Lifted Notification", credential.title()),
        ),
    };

    TemplateBuilder::new(settings)
        .heading(heading)
        .body(format!(
            "This message is to notify you that the {} {} held by {name} in {encumbered_jurisdiction_name} {verb} effective {}.",
            variables.license_type,
            credential.noun(),
            variables.effective_date
        ))
        .body(format!("Provider details: {profile_url}"))
        .finish(format!("{subject_label} - {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::block_texts;
    use crate::settings::test_settings;

    fn state_variables() -> StateEncumbranceVariables {
        serde_json::from_value(serde_json::json!({
            "providerFirstName": "Jane",
            "providerLastName": "Doe",
            "providerId": "89a6377e-c3a5-40e5-bca5-317ec854c570",
            "encumberedJurisdiction": "oh",
            "licenseType": "audiologist",
            "effectiveLiftDate": "2025-03-12",
        }))
        .expect("lift variables should parse through the alias")
    }

    #[test]
    fn state_notification_links_provider_profile() {
        let content = state_notification(
            &test_settings("prod"),
            "ASLP",
            Credential::Privilege,
            EncumbranceAction::Lifted,
            "Ohio",
            &state_variables(),
        );
        assert_eq!(
            content.subject,
            "Privilege Encumbrance Lifted Notification - Jane Doe"
        );
        assert!(block_texts(&content).contains(
            &"Provider details: https://app.compactconnect.org/aslp/Licensing/89a6377e-c3a5-40e5-bca5-317ec854c570"
                .to_string()
        ));
    }

    #[test]
    fn provider_notification_names_jurisdiction() {
        let variables = ProviderEncumbranceVariables {
            provider_first_name: "Jane".to_string(),
            encumbered_jurisdiction: "oh".to_string(),
            license_type: "audiologist".to_string(),
            effective_date: "2025-03-12".to_string(),
        };
        let content = provider_notification(
            &test_settings("prod"),
            Credential::License,
            EncumbranceAction::Encumbered,
            "Ohio",
            &variables,
        );
        assert_eq!(content.subject, "Your audiologist license in Ohio is encumbered");
    }
}
