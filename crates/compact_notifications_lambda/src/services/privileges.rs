//! Privilege lifecycle and provider account emails.

use compact_notifications_core::content::privileges::{
    account_recovery_confirmation, deactivation_jurisdiction, deactivation_provider,
    email_change_notification, email_verification_code, multiple_registration_attempt,
    purchase_confirmation, DeactivatedPrivilege, PrivilegePurchase,
};
use compact_notifications_core::contract::Recipients;
use compact_notifications_core::request::TemplateName;
use compact_notifications_core::Result;

use super::ServiceContext;

pub struct PrivilegeService<'a> {
    context: ServiceContext<'a>,
}

impl<'a> PrivilegeService<'a> {
    pub fn new(context: ServiceContext<'a>) -> Self {
        Self { context }
    }

    pub fn send_privilege_deactivation_jurisdiction_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        privilege: &DeactivatedPrivilege,
    ) -> Result<String> {
        let to = self
            .context
            .resolve_recipients(compact, Some(jurisdiction), recipients)?;
        let compact_config = self.context.configuration.get_compact_configuration(compact)?;
        let content = deactivation_jurisdiction(self.context.settings, &compact_config, privilege);
        self.context.send(
            TemplateName::PrivilegeDeactivationJurisdiction.as_str(),
            to,
            content,
        )
    }

    pub fn send_privilege_deactivation_provider_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        privilege_id: &str,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let content = deactivation_provider(self.context.settings, privilege_id);
        self.context.send(
            TemplateName::PrivilegeDeactivationProvider.as_str(),
            to,
            content,
        )
    }

    pub fn send_privilege_purchase_provider_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        purchase: &PrivilegePurchase,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let compact_config = self.context.configuration.get_compact_configuration(compact)?;
        let content = purchase_confirmation(self.context.settings, &compact_config, purchase);
        self.context
            .send(TemplateName::PrivilegePurchaseProvider.as_str(), to, content)
    }

    pub fn send_multiple_registration_attempt_email(
        &self,
        compact: &str,
        recipients: &Recipients,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let compact_config = self.context.configuration.get_compact_configuration(compact)?;
        let content = multiple_registration_attempt(self.context.settings, &compact_config);
        self.context
            .send(TemplateName::MultipleRegistrationAttempt.as_str(), to, content)
    }

    pub fn send_provider_email_verification_code_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        verification_code: &str,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let content = email_verification_code(self.context.settings, verification_code);
        self.context.send(
            TemplateName::ProviderEmailVerificationCode.as_str(),
            to,
            content,
        )
    }

    /// Sent to the previous address after a change.
    pub fn send_provider_email_change_notification_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        new_email_address: &str,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let content = email_change_notification(self.context.settings, new_email_address);
        self.context
            .send(TemplateName::ProviderEmailChange.as_str(), to, content)
    }

    pub fn send_provider_account_recovery_confirmation_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        provider_id: &str,
        recovery_token: &str,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let content = account_recovery_confirmation(
            self.context.settings,
            compact,
            provider_id,
            recovery_token,
        );
        self.context.send(
            TemplateName::ProviderAccountRecoveryConfirmation.as_str(),
            to,
            content,
        )
    }
}

#[cfg(test)]
mod tests {
    use compact_notifications_core::content::privileges::{CostLineItem, PurchasedPrivilege};
    use compact_notifications_core::contract::RecipientType;
    use compact_notifications_core::NotificationError;

    use super::*;
    use crate::adapters::EmailBody;
    use crate::testing::TestHarness;

    fn html(harness: &TestHarness) -> String {
        match &harness.mailer.sent()[0].body {
            EmailBody::Html(html) => html.clone(),
            EmailBody::Raw(_) => panic!("expected an html body"),
        }
    }

    #[test]
    fn jurisdiction_deactivation_reads_both_configurations() {
        let harness = TestHarness::new("prod");
        harness.seed_compact("aslp", &["ops@example.com"]);
        harness.seed_jurisdiction("aslp", "oh", "Ohio", &["oh-ops@example.com"]);

        PrivilegeService::new(harness.context())
            .send_privilege_deactivation_jurisdiction_email(
                "aslp",
                "oh",
                &Recipients::configured(RecipientType::JurisdictionOperationsTeam),
                &DeactivatedPrivilege {
                    privilege_id: "AUD-OH-12".to_string(),
                    provider_first_name: "Jane".to_string(),
                    provider_last_name: "Doe".to_string(),
                },
            )
            .expect("email sent");

        let sent = harness.mailer.sent();
        assert_eq!(sent[0].to, vec!["oh-ops@example.com"]);
        assert_eq!(sent[0].subject, "A Privilege was Deactivated in the ASLP Compact");
        assert!(html(&harness).contains("AUD-OH-12 held by Jane Doe"));
    }

    #[test]
    fn purchase_confirmation_lists_total() {
        let harness = TestHarness::new("prod");
        harness.seed_compact("aslp", &["ops@example.com"]);

        PrivilegeService::new(harness.context())
            .send_privilege_purchase_provider_email(
                "aslp",
                &Recipients::specific(["provider@example.com"]),
                &PrivilegePurchase {
                    transaction_date: "2025-03-11".to_string(),
                    privileges: vec![PurchasedPrivilege {
                        jurisdiction: "oh".to_string(),
                        privilege_id: "AUD-OH-12".to_string(),
                        license_type_abbrev: "aud".to_string(),
                    }],
                    total_cost: 103.5,
                    cost_line_items: vec![
                        CostLineItem {
                            name: "Ohio Privilege Fee".to_string(),
                            quantity: 1,
                            unit_price: 100.0,
                        },
                        CostLineItem {
                            name: "Compact Commission Fee".to_string(),
                            quantity: 1,
                            unit_price: 3.5,
                        },
                    ],
                },
            )
            .expect("email sent");

        assert_eq!(harness.mailer.sent()[0].to, vec!["provider@example.com"]);
        let html = html(&harness);
        assert!(html.contains("OH AUD privilege (AUD-OH-12)"));
        assert!(html.contains("$103.50"));
    }

    #[test]
    fn verification_code_to_specific_address_needs_no_lookup() {
        let harness = TestHarness::new("prod");
        PrivilegeService::new(harness.context())
            .send_provider_email_verification_code_email(
                "aslp",
                &Recipients::specific(["new@example.com"]),
                "123456",
            )
            .expect("email sent");
        assert_eq!(harness.records.calls(), 0);
        assert!(html(&harness).contains("123456"));
    }

    #[test]
    fn empty_specific_list_fails_before_lookup() {
        let harness = TestHarness::new("prod");
        let error = PrivilegeService::new(harness.context())
            .send_multiple_registration_attempt_email("aslp", &Recipients::specific(Vec::<String>::new()))
            .expect_err("no recipients");
        assert!(matches!(error, NotificationError::EmptyRecipients(_)));
        assert_eq!(harness.records.calls(), 0);
        assert!(harness.mailer.sent().is_empty());
    }

    #[test]
    fn recovery_link_points_at_the_ui() {
        let harness = TestHarness::new("prod");
        PrivilegeService::new(harness.context())
            .send_provider_account_recovery_confirmation_email(
                "aslp",
                &Recipients::specific(["provider@example.com"]),
                "p-1",
                "token-9",
            )
            .expect("email sent");
        assert!(html(&harness).contains(
            "https://app.compactconnect.org/Dashboard/RecoverAccount?compact=aslp&amp;providerId=p-1&amp;recoveryId=token-9"
        ));
    }
}
