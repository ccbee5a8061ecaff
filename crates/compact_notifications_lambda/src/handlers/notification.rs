//! Direct-invocation email requests from other backend functions.

use compact_notifications_core::request::NotificationRequest;
use compact_notifications_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::{
    EncumbranceService, InvestigationService, PrivilegeService, ServiceContext,
    TransactionService,
};

pub const SENT_MESSAGE: &str = "Email message sent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub message: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

/// Validates the whole request before any lookup, then sends exactly one email.
pub fn handle_notification_event(
    event: Value,
    context: ServiceContext<'_>,
) -> Result<NotificationResponse> {
    let template = event
        .get("template")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let request = NotificationRequest::from_value(event).map_err(|error| {
        tracing::warn!(template = %template, %error, "rejected notification request");
        error
    })?;
    tracing::info!(template = %template, "sending notification");

    let message_id = dispatch(&request, context)?;
    Ok(NotificationResponse {
        message: SENT_MESSAGE.to_string(),
        message_id,
    })
}

pub fn dispatch(request: &NotificationRequest, context: ServiceContext<'_>) -> Result<String> {
    use NotificationRequest as R;
    match request {
        R::TransactionBatchSettlementFailure {
            compact,
            recipients,
        } => TransactionService::new(context)
            .send_transaction_batch_settlement_failure_email(compact, recipients),
        R::CompactTransactionReport {
            compact,
            recipients,
            variables,
        } => TransactionService::new(context)
            .send_compact_transaction_report_email(compact, recipients, variables),
        R::JurisdictionTransactionReport {
            compact,
            jurisdiction,
            recipients,
            variables,
        } => TransactionService::new(context).send_jurisdiction_transaction_report_email(
            compact,
            jurisdiction,
            recipients,
            variables,
        ),
        R::PrivilegeDeactivationJurisdiction {
            compact,
            jurisdiction,
            recipients,
            privilege,
        } => PrivilegeService::new(context).send_privilege_deactivation_jurisdiction_email(
            compact,
            jurisdiction,
            recipients,
            privilege,
        ),
        R::PrivilegeDeactivationProvider {
            compact,
            recipients,
            privilege_id,
        } => PrivilegeService::new(context)
            .send_privilege_deactivation_provider_email(compact, recipients, privilege_id),
        R::PrivilegePurchaseProvider {
            compact,
            recipients,
            purchase,
        } => PrivilegeService::new(context)
            .send_privilege_purchase_provider_email(compact, recipients, purchase),
        R::MultipleRegistrationAttempt {
            compact,
            recipients,
        } => PrivilegeService::new(context)
            .send_multiple_registration_attempt_email(compact, recipients),
        R::ProviderEmailVerificationCode {
            compact,
            recipients,
            verification_code,
        } => PrivilegeService::new(context).send_provider_email_verification_code_email(
            compact,
            recipients,
            verification_code,
        ),
        R::ProviderEmailChange {
            compact,
            recipients,
            new_email_address,
        } => PrivilegeService::new(context).send_provider_email_change_notification_email(
            compact,
            recipients,
            new_email_address,
        ),
        R::ProviderAccountRecoveryConfirmation {
            compact,
            recipients,
            provider_id,
            recovery_token,
        } => PrivilegeService::new(context).send_provider_account_recovery_confirmation_email(
            compact,
            recipients,
            provider_id,
            recovery_token,
        ),
        R::EncumbranceProvider {
            compact,
            recipients,
            credential,
            action,
            variables,
        } => EncumbranceService::new(context).send_provider(
            compact,
            recipients,
            *credential,
            *action,
            variables,
        ),
        R::EncumbranceState {
            compact,
            jurisdiction,
            recipients,
            credential,
            action,
            variables,
        } => EncumbranceService::new(context).send_state(
            compact,
            jurisdiction,
            recipients,
            *credential,
            *action,
            variables,
        ),
        R::InvestigationState {
            compact,
            jurisdiction,
            recipients,
            credential,
            status,
            variables,
        } => InvestigationService::new(context).send_state(
            compact,
            jurisdiction,
            recipients,
            *credential,
            *status,
            variables,
        ),
    }
}

#[cfg(test)]
mod tests {
    use compact_notifications_core::NotificationError;
    use serde_json::json;

    use super::*;
    use crate::testing::TestHarness;

    #[test]
    fn returns_message_id_from_the_mailer() {
        let harness = TestHarness::new("prod");
        harness.seed_compact("aslp", &["operations@example.com"]);

        let response = handle_notification_event(
            json!({
                "template": "transactionBatchSettlementFailure",
                "recipientType": "COMPACT_OPERATIONS_TEAM",
                "compact": "aslp",
            }),
            harness.context(),
        )
        .expect("email sent");

        assert_eq!(
            response,
            NotificationResponse {
                message: SENT_MESSAGE.to_string(),
                message_id: "message-1".to_string(),
            }
        );
        assert_eq!(
            serde_json::to_value(&response).expect("serializes"),
            json!({"message": "Email message sent", "messageId": "message-1"})
        );
    }

    #[test]
    fn unknown_template_is_unsupported_without_io() {
        let harness = TestHarness::new("prod");
        let error = handle_notification_event(
            json!({
                "template": "holidayGreeting",
                "recipientType": "COMPACT_OPERATIONS_TEAM",
                "compact": "aslp",
            }),
            harness.context(),
        )
        .expect_err("unknown template");
        assert!(matches!(error, NotificationError::Unsupported(_)));
        assert_eq!(harness.records.calls(), 0);
    }

    #[test]
    fn missing_variables_fail_before_io() {
        let harness = TestHarness::new("prod");
        let error = handle_notification_event(
            json!({
                "template": "providerAccountRecoveryConfirmation",
                "recipientType": "SPECIFIC",
                "compact": "aslp",
                "specificEmails": ["provider@example.com"],
                "templateVariables": {"providerId": "p-1"},
            }),
            harness.context(),
        )
        .expect_err("missing token");
        assert_eq!(
            error.to_string(),
            "templateVariables.recoveryToken is required for the providerAccountRecoveryConfirmation template"
        );
        assert_eq!(harness.records.calls(), 0);
        assert!(harness.mailer.sent().is_empty());
    }

    #[test]
    fn encumbrance_state_request_routes_to_state_notice() {
        let harness = TestHarness::new("prod");
        harness.seed_jurisdiction("aslp", "oh", "Ohio", &["oh-ops@example.com"]);
        harness.seed_jurisdiction("aslp", "ky", "Kentucky", &["ky-ops@example.com"]);

        handle_notification_event(
            json!({
                "template": "licenseEncumbranceLiftingStateNotification",
                "recipientType": "JURISDICTION_ADVERSE_ACTIONS",
                "compact": "aslp",
                "jurisdiction": "KY",
                "templateVariables": {
                    "providerFirstName": "Jane",
                    "providerLastName": "Doe",
                    "providerId": "p-1",
                    "encumberedJurisdiction": "oh",
                    "licenseType": "audiologist",
                    "effectiveLiftDate": "2025-03-12",
                },
            }),
            harness.context(),
        )
        .expect("email sent");

        let sent = harness.mailer.sent();
        assert_eq!(sent[0].to, vec!["adverse-ky@example.com"]);
        assert_eq!(
            sent[0].subject,
            "License Encumbrance Lifted Notification - Jane Doe"
        );
    }
}
