//! Cognito custom-message content. Nothing is dispatched; Cognito sends the email.

use compact_notifications_core::content::cognito::{custom_message, CognitoMessageKind};
use compact_notifications_core::settings::NotificationSettings;
use compact_notifications_core::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CognitoMessage {
    pub subject: String,
    pub html_content: String,
}

pub struct CognitoMessageService<'a> {
    settings: &'a NotificationSettings,
}

impl<'a> CognitoMessageService<'a> {
    pub fn new(settings: &'a NotificationSettings) -> Self {
        Self { settings }
    }

    pub fn admin_create_user_message(&self, code: &str, username: &str) -> Result<CognitoMessage> {
        self.message(CognitoMessageKind::AdminCreateUser, code, username)
    }

    pub fn forgot_password_message(&self, code: &str) -> Result<CognitoMessage> {
        self.message(CognitoMessageKind::ForgotPassword, code, "")
    }

    pub fn attribute_verification_message(&self, code: &str) -> Result<CognitoMessage> {
        self.message(CognitoMessageKind::VerifyUserAttribute, code, "")
    }

    pub fn message_for_trigger(
        &self,
        trigger_source: &str,
        code: &str,
        username: &str,
    ) -> Result<CognitoMessage> {
        let kind = CognitoMessageKind::from_trigger_source(trigger_source)?;
        self.message(kind, code, username)
    }

    fn message(
        &self,
        kind: CognitoMessageKind,
        code: &str,
        username: &str,
    ) -> Result<CognitoMessage> {
        let rendered = custom_message(self.settings, kind, code, username).render()?;
        Ok(CognitoMessage {
            subject: rendered.subject,
            html_content: rendered.html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_settings;

    #[test]
    fn forgot_password_carries_the_code_placeholder() {
        let settings = test_settings("prod");
        let message = CognitoMessageService::new(&settings)
            .forgot_password_message("{####}")
            .expect("message renders");
        assert_eq!(message.subject, "Reset your password");
        assert!(message.html_content.contains("{####}"));
    }

    #[test]
    fn update_and_verify_share_content() {
        let settings = test_settings("prod");
        let service = CognitoMessageService::new(&settings);
        let update = service
            .message_for_trigger("CustomMessage_UpdateUserAttribute", "{####}", "{username}")
            .expect("update renders");
        let verify = service
            .attribute_verification_message("{####}")
            .expect("verify renders");
        assert_eq!(update, verify);
    }
}
