//! Raw MIME composition for emails that carry attachments.

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    /// Names the attachment after the last segment of its storage key.
    pub fn from_object_key(key: &str, data: Vec<u8>) -> Self {
        let filename = key.rsplit('/').next().unwrap_or(key).to_string();
        let content_type = match filename.rsplit('.').next() {
            Some("zip") => "application/zip",
            Some("csv") => "text/csv",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        };
        Self {
            content_type: content_type.to_string(),
            filename,
            data,
        }
    }
}

/// Builds a `multipart/mixed` message with an HTML part followed by the
/// attachments. The boundary is derived from the content, so identical input
/// yields identical bytes.
pub fn compose_multipart(
    from: &str,
    to: &[String],
    subject: &str,
    html: &str,
    attachments: &[Attachment],
) -> Vec<u8> {
    let boundary = boundary_for(html, attachments);
    let mut message = String::new();
    message.push_str(&format!("From: {from}\r\n"));
    message.push_str(&format!("To: {}\r\n", to.join(", ")));
    message.push_str(&format!("Subject: {}\r\n", encode_header(subject)));
    message.push_str("MIME-Version: 1.0\r\n");
    message.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n\r\n"
    ));

    message.push_str(&format!("--{boundary}\r\n"));
    message.push_str("Content-Type: text/html; charset=UTF-8\r\n");
    message.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
    message.push_str(&wrap_base64(html.as_bytes()));

    for attachment in attachments {
        message.push_str(&format!("--{boundary}\r\n"));
        message.push_str(&format!(
            "Content-Type: {}; name=\"{}\"\r\n",
            attachment.content_type, attachment.filename
        ));
        message.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{}\"\r\n",
            attachment.filename
        ));
        message.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
        message.push_str(&wrap_base64(&attachment.data));
    }
    message.push_str(&format!("--{boundary}--\r\n"));
    message.into_bytes()
}

fn boundary_for(html: &str, attachments: &[Attachment]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    for attachment in attachments {
        hasher.update(attachment.filename.as_bytes());
        hasher.update(&attachment.data);
    }
    let digest = format!("{:x}", hasher.finalize());
    format!("=_compact_{}", &digest[..24])
}

fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", base64::encode(value.as_bytes()))
    }
}

// RFC 2045 caps encoded lines at 76 characters.
fn wrap_base64(data: &[u8]) -> String {
    let encoded = base64::encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / 76 * 2 + 2);
    for chunk in encoded.as_bytes().chunks(76) {
        wrapped.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        wrapped.push_str("\r\n");
    }
    wrapped
}
