//! Encumbrance and encumbrance-lifting notices for providers and states.

use compact_notifications_core::content::encumbrance::{
    provider_notification, state_notification, Credential, EncumbranceAction,
    ProviderEncumbranceVariables, StateEncumbranceVariables,
};
use compact_notifications_core::contract::Recipients;
use compact_notifications_core::request::TemplateName;
use compact_notifications_core::Result;

use super::ServiceContext;

pub struct EncumbranceService<'a> {
    context: ServiceContext<'a>,
}

impl<'a> EncumbranceService<'a> {
    pub fn new(context: ServiceContext<'a>) -> Self {
        Self { context }
    }

    pub fn send_license_encumbrance_provider_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        variables: &ProviderEncumbranceVariables,
    ) -> Result<String> {
        self.send_provider(
            compact,
            recipients,
            Credential::License,
            EncumbranceAction::Encumbered,
            variables,
        )
    }

    pub fn send_license_encumbrance_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &StateEncumbranceVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::License,
            EncumbranceAction::Encumbered,
            variables,
        )
    }

    pub fn send_license_encumbrance_lifting_provider_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        variables: &ProviderEncumbranceVariables,
    ) -> Result<String> {
        self.send_provider(
            compact,
            recipients,
            Credential::License,
            EncumbranceAction::Lifted,
            variables,
        )
    }

    pub fn send_license_encumbrance_lifting_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &StateEncumbranceVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::License,
            EncumbranceAction::Lifted,
            variables,
        )
    }

    pub fn send_privilege_encumbrance_provider_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        variables: &ProviderEncumbranceVariables,
    ) -> Result<String> {
        self.send_provider(
            compact,
            recipients,
            Credential::Privilege,
            EncumbranceAction::Encumbered,
            variables,
        )
    }

    pub fn send_privilege_encumbrance_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &StateEncumbranceVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::Privilege,
            EncumbranceAction::Encumbered,
            variables,
        )
    }

    pub fn send_privilege_encumbrance_lifting_provider_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        variables: &ProviderEncumbranceVariables,
    ) -> Result<String> {
        self.send_provider(
            compact,
            recipients,
            Credential::Privilege,
            EncumbranceAction::Lifted,
            variables,
        )
    }

    pub fn send_privilege_encumbrance_lifting_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &StateEncumbranceVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::Privilege,
            EncumbranceAction::Lifted,
            variables,
        )
    }

    /// Entry point for callers that already hold the credential and action as values.
    pub fn send_provider(
        &self,
        compact: &str,
        recipients: &Recipients,
        credential: Credential,
        action: EncumbranceAction,
        variables: &ProviderEncumbranceVariables,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let jurisdiction_name = self.jurisdiction_name(compact, &variables.encumbered_jurisdiction)?;
        let content = provider_notification(
            self.context.settings,
            credential,
            action,
            &jurisdiction_name,
            variables,
        );
        self.context
            .send(provider_template(credential, action).as_str(), to, content)
    }

    pub fn send_state(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        credential: Credential,
        action: EncumbranceAction,
        variables: &StateEncumbranceVariables,
    ) -> Result<String> {
        let to = self
            .context
            .resolve_recipients(compact, Some(jurisdiction), recipients)?;
        let jurisdiction_name = self.jurisdiction_name(compact, &variables.encumbered_jurisdiction)?;
        let content = state_notification(
            self.context.settings,
            compact,
            credential,
            action,
            &jurisdiction_name,
            variables,
        );
        self.context
            .send(state_template(credential, action).as_str(), to, content)
    }

    fn jurisdiction_name(&self, compact: &str, jurisdiction: &str) -> Result<String> {
        Ok(self
            .context
            .configuration
            .get_jurisdiction_configuration(compact, jurisdiction)?
            .jurisdiction_name)
    }
}

fn provider_template(credential: Credential, action: EncumbranceAction) -> TemplateName {
    match (credential, action) {
        (Credential::License, EncumbranceAction::Encumbered) => {
            TemplateName::LicenseEncumbranceProvider
        }
        (Credential::License, EncumbranceAction::Lifted) => {
            TemplateName::LicenseEncumbranceLiftingProvider
        }
        (Credential::Privilege, EncumbranceAction::Encumbered) => {
            TemplateName::PrivilegeEncumbranceProvider
        }
        (Credential::Privilege, EncumbranceAction::Lifted) => {
            TemplateName::PrivilegeEncumbranceLiftingProvider
        }
    }
}

fn state_template(credential: Credential, action: EncumbranceAction) -> TemplateName {
    match (credential, action) {
        (Credential::License, EncumbranceAction::Encumbered) => TemplateName::LicenseEncumbranceState,
        (Credential::License, EncumbranceAction::Lifted) => {
            TemplateName::LicenseEncumbranceLiftingState
        }
        (Credential::Privilege, EncumbranceAction::Encumbered) => {
            TemplateName::PrivilegeEncumbranceState
        }
        (Credential::Privilege, EncumbranceAction::Lifted) => {
            TemplateName::PrivilegeEncumbranceLiftingState
        }
    }
}
