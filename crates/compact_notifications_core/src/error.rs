use crate::template::RenderError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a companion field that a template requires but the caller omitted.
    pub fn missing_field(field: &str, template: &str) -> Self {
        Self::new(format!("{field} is required for the {template} template"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure taxonomy shared by every notification flow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("no recipients found for {0}")]
    EmptyRecipients(String),

    #[error("unsupported {0}")]
    Unsupported(String),

    #[error("failed to render email: {0}")]
    Render(#[from] RenderError),

    #[error("{context}: {message}")]
    Downstream { context: String, message: String },
}

impl NotificationError {
    pub fn downstream(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Downstream {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Failures that the scheduled multi-jurisdiction loop tolerates by skipping.
    pub fn is_skippable_lookup(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::EmptyRecipients(_))
    }
}

pub type Result<T, E = NotificationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_field_and_template() {
        let error = ValidationError::missing_field("jurisdiction", "licenseEncumbranceStateNotification");
        assert_eq!(
            error.message(),
            "jurisdiction is required for the licenseEncumbranceStateNotification template"
        );
    }

    #[test]
    fn only_lookup_failures_are_skippable() {
        assert!(NotificationError::NotFound("aslp/oh".to_string()).is_skippable_lookup());
        assert!(NotificationError::EmptyRecipients("oh".to_string()).is_skippable_lookup());
        assert!(!NotificationError::downstream("ses", "throttled").is_skippable_lookup());
    }
}
