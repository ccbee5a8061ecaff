use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message, RawMessage};

use crate::adapters::{EmailBody, MailDispatcher, OutgoingEmail};

const CHARSET: &str = "UTF-8";

pub struct SesMailDispatcher {
    client: aws_sdk_sesv2::Client,
}

impl SesMailDispatcher {
    pub fn new(client: aws_sdk_sesv2::Client) -> Self {
        Self { client }
    }
}

fn utf8_content(data: &str) -> Result<Content, String> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|error| format!("invalid email content: {error}"))
}

/// HTML bodies use simple content; raw bodies are already complete MIME messages.
fn email_content(email: &OutgoingEmail) -> Result<EmailContent, String> {
    let content = match &email.body {
        EmailBody::Html(html) => EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(utf8_content(&email.subject)?)
                    .body(Body::builder().html(utf8_content(html)?).build())
                    .build(),
            )
            .build(),
        EmailBody::Raw(raw) => EmailContent::builder()
            .raw(
                RawMessage::builder()
                    .data(Blob::new(raw.clone()))
                    .build()
                    .map_err(|error| format!("invalid raw email: {error}"))?,
            )
            .build(),
    };
    Ok(content)
}

impl MailDispatcher for SesMailDispatcher {
    fn send_email(&self, email: &OutgoingEmail) -> Result<String, String> {
        let client = self.client.clone();
        let from = email.from.clone();
        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();
        let content = email_content(email)?;

        super::block_on(async move {
            client
                .send_email()
                .from_email_address(from)
                .destination(destination)
                .content(content)
                .send()
                .await
                .map_err(|error| format!("failed to send email through ses: {error}"))
                .and_then(|output| accepted_message_id(output.message_id()))
        })
    }
}

/// SES acknowledges a send with a message id; an empty acknowledgement is a failure.
fn accepted_message_id(message_id: Option<&str>) -> Result<String, String> {
    match message_id {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err("ses returned no message id".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::accepted_message_id;

    #[test]
    fn missing_message_id_is_a_send_failure() {
        assert_eq!(
            accepted_message_id(Some("0100018e-abc")),
            Ok("0100018e-abc".to_string())
        );
        assert_eq!(
            accepted_message_id(None),
            Err("ses returned no message id".to_string())
        );
        assert_eq!(
            accepted_message_id(Some("")),
            Err("ses returned no message id".to_string())
        );
    }
}
