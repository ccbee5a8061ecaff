use compact_notifications_core::content::encumbrance::Credential;
use compact_notifications_core::content::investigation::{
    state_notification, InvestigationStatus, InvestigationVariables,
};
use compact_notifications_core::contract::Recipients;
use compact_notifications_core::request::TemplateName;
use compact_notifications_core::Result;

use super::ServiceContext;

pub struct InvestigationService<'a> {
    context: ServiceContext<'a>,
}

impl<'a> InvestigationService<'a> {
    pub fn new(context: ServiceContext<'a>) -> Self {
        Self { context }
    }

    pub fn send_license_investigation_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &InvestigationVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::License,
            InvestigationStatus::Opened,
            variables,
        )
    }

    pub fn send_license_investigation_closed_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &InvestigationVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::License,
            InvestigationStatus::Closed,
            variables,
        )
    }

    pub fn send_privilege_investigation_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &InvestigationVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::Privilege,
            InvestigationStatus::Opened,
            variables,
        )
    }

    pub fn send_privilege_investigation_closed_state_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &InvestigationVariables,
    ) -> Result<String> {
        self.send_state(
            compact,
            jurisdiction,
            recipients,
            Credential::Privilege,
            InvestigationStatus::Closed,
            variables,
        )
    }

    pub fn send_state(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        credential: Credential,
        status: InvestigationStatus,
        variables: &InvestigationVariables,
    ) -> Result<String> {
        let to = self
            .context
            .resolve_recipients(compact, Some(jurisdiction), recipients)?;
        let investigating = self
            .context
            .configuration
            .get_jurisdiction_configuration(compact, &variables.investigation_jurisdiction)?;
        let content = state_notification(
            self.context.settings,
            compact,
            credential,
            status,
            &investigating.jurisdiction_name,
            variables,
        );
        self.context
            .send(template_for(credential, status).as_str(), to, content)
    }
}

fn template_for(credential: Credential, status: InvestigationStatus) -> TemplateName {
    match (credential, status) {
        (Credential::License, InvestigationStatus::Opened) => TemplateName::LicenseInvestigationState,
        (Credential::License, InvestigationStatus::Closed) => {
            TemplateName::LicenseInvestigationClosedState
        }
        (Credential::Privilege, InvestigationStatus::Opened) => {
            TemplateName::PrivilegeInvestigationState
        }
        (Credential::Privilege, InvestigationStatus::Closed) => {
            TemplateName::PrivilegeInvestigationClosedState
        }
    }
}
