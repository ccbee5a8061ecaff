//! Notification services: resolve recipients, build content, render and dispatch.
//!
//! Every public `send_*` method resolves recipients before any other lookup, so
//! an empty `SPECIFIC` list fails without touching a store.

pub mod cognito;
pub mod encumbrance;
pub mod ingest;
pub mod investigation;
pub mod privileges;
pub mod transactions;

use compact_notifications_core::content::EmailContent;
use compact_notifications_core::contract::{RecipientScope, Recipients};
use compact_notifications_core::mime::{compose_multipart, Attachment};
use compact_notifications_core::recipients::{
    compact_recipients, jurisdiction_recipients, specific_recipients,
};
use compact_notifications_core::settings::NotificationSettings;
use compact_notifications_core::{NotificationError, Result, ValidationError};

use crate::adapters::{BlobStore, EmailBody, MailDispatcher, OutgoingEmail};
use crate::clients::ConfigurationClient;

pub use cognito::{CognitoMessage, CognitoMessageService};
pub use encumbrance::EncumbranceService;
pub use ingest::IngestReportService;
pub use investigation::InvestigationService;
pub use privileges::PrivilegeService;
pub use transactions::TransactionService;

/// Everything a service needs from the outside world, borrowed for one invocation.
#[derive(Clone, Copy)]
pub struct ServiceContext<'a> {
    pub settings: &'a NotificationSettings,
    pub configuration: ConfigurationClient<'a>,
    pub blobs: &'a dyn BlobStore,
    pub mailer: &'a dyn MailDispatcher,
    pub report_bucket: Option<&'a str>,
}

impl<'a> ServiceContext<'a> {
    /// Specific addresses are returned as given; configured types read the
    /// compact or jurisdiction record their scope names.
    pub fn resolve_recipients(
        &self,
        compact: &str,
        jurisdiction: Option<&str>,
        recipients: &Recipients,
    ) -> Result<Vec<String>> {
        if let Some(emails) = specific_recipients(recipients)? {
            return Ok(emails);
        }
        let recipient_type = recipients.recipient_type;
        match recipient_type.scope() {
            RecipientScope::Compact => {
                let config = self.configuration.get_compact_configuration(compact)?;
                compact_recipients(&config, recipient_type)
            }
            RecipientScope::Jurisdiction => {
                let jurisdiction = jurisdiction.ok_or_else(|| {
                    ValidationError::new(format!(
                        "jurisdiction is required for recipient type {recipient_type}"
                    ))
                })?;
                let config = self
                    .configuration
                    .get_jurisdiction_configuration(compact, jurisdiction)?;
                jurisdiction_recipients(&config, recipient_type)
            }
            RecipientScope::Specific => Err(NotificationError::Unsupported(format!(
                "recipient type {recipient_type} without specific emails"
            ))),
        }
    }

    pub fn send(&self, template: &str, to: Vec<String>, content: EmailContent) -> Result<String> {
        let rendered = content.render()?;
        let email = OutgoingEmail {
            from: self.settings.sender(),
            to,
            subject: rendered.subject,
            body: EmailBody::Html(rendered.html),
        };
        self.dispatch(template, &email)
    }

    /// Fetches every attachment from the report bucket, then sends one raw MIME message.
    pub fn send_with_attachments(
        &self,
        template: &str,
        to: Vec<String>,
        content: EmailContent,
        attachment_keys: &[&str],
    ) -> Result<String> {
        let rendered = content.render()?;
        let bucket = self.report_bucket.ok_or_else(|| {
            NotificationError::downstream(
                format!("cannot attach reports to {template}"),
                "no transaction reports bucket is configured",
            )
        })?;

        let mut attachments = Vec::with_capacity(attachment_keys.len());
        for key in attachment_keys {
            let data = self
                .blobs
                .fetch_object(bucket, key)
                .map_err(|error| {
                    tracing::error!(bucket, key, %error, "failed to fetch report attachment");
                    NotificationError::downstream(format!("failed to fetch s3://{bucket}/{key}"), error)
                })?
                .ok_or_else(|| NotificationError::NotFound(format!("report s3://{bucket}/{key}")))?;
            attachments.push(Attachment::from_object_key(key, data));
        }

        let from = self.settings.sender();
        let raw = compose_multipart(&from, &to, &rendered.subject, &rendered.html, &attachments);
        let email = OutgoingEmail {
            from,
            to,
            subject: rendered.subject,
            body: EmailBody::Raw(raw),
        };
        self.dispatch(template, &email)
    }

    fn dispatch(&self, template: &str, email: &OutgoingEmail) -> Result<String> {
        match self.mailer.send_email(email) {
            Ok(message_id) => {
                tracing::info!(
                    template,
                    message_id = %message_id,
                    recipients = email.to.len(),
                    "email sent"
                );
                Ok(message_id)
            }
            Err(error) => {
                tracing::error!(template, %error, "failed to send email");
                Err(NotificationError::downstream(
                    format!("failed to send {template} email"),
                    error,
                ))
            }
        }
    }
}
