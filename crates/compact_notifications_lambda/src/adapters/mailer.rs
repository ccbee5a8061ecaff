#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Html(String),
    /// A complete MIME message, headers included.
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: EmailBody,
}

pub trait MailDispatcher: Send + Sync {
    /// Returns the provider's message id.
    fn send_email(&self, email: &OutgoingEmail) -> Result<String, String>;
}
