use super::{EmailContent, TemplateBuilder};
use crate::error::{NotificationError, Result};
use crate::settings::NotificationSettings;

/// Cognito custom-message trigger sources this system answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CognitoMessageKind {
    AdminCreateUser,
    ForgotPassword,
    UpdateUserAttribute,
    VerifyUserAttribute,
}

impl CognitoMessageKind {
    pub fn from_trigger_source(trigger_source: &str) -> Result<Self> {
        match trigger_source {
            "CustomMessage_AdminCreateUser" => Ok(Self::AdminCreateUser),
            "CustomMessage_ForgotPassword" => Ok(Self::ForgotPassword),
            "CustomMessage_UpdateUserAttribute" => Ok(Self::UpdateUserAttribute),
            "CustomMessage_VerifyUserAttribute" => Ok(Self::VerifyUserAttribute),
            other => Err(NotificationError::Unsupported(format!(
                "cognito trigger source '{other}'"
            ))),
        }
    }
}

/// `code` and `username` are usually Cognito's own placeholders (`{####}`,
/// `{username}`), which Cognito substitutes after the trigger returns.
pub fn custom_message(
    settings: &NotificationSettings,
    kind: CognitoMessageKind,
    code: &str,
    username: &str,
) -> EmailContent {
    let login_url = settings.ui_url("/Dashboard");
    match kind {
        CognitoMessageKind::AdminCreateUser => TemplateBuilder::new(settings)
            .heading("Welcome to Compact Connect")
            .body("An account has been created for you. Sign in with the credentials below; you will be asked to choose a new password.")
            .emphasis(format!("Username: {username}"))
            .emphasis(format!("Temporary password: {code}"))
            .body(format!("Sign in at {login_url}. The temporary password expires in 24 hours."))
            .finish("Welcome to Compact Connect"),
        CognitoMessageKind::ForgotPassword => TemplateBuilder::new(settings)
            .heading("Reset Your Password")
            .body("Use the code below to reset your password.")
            .emphasis(code)
            .body("If you did not request a password reset, you can ignore this email.")
            .finish("Reset your password"),
        CognitoMessageKind::UpdateUserAttribute | CognitoMessageKind::VerifyUserAttribute => {
            TemplateBuilder::new(settings)
                .heading("Verify Your Email Address")
                .body("Use the code below to verify your email address.")
                .emphasis(code)
                .finish("Verify your email")
        }
    }
}
