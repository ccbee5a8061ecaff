use serde::{Deserialize, Serialize};

pub const PRODUCTION_ENVIRONMENT_NAME: &str = "prod";
pub const DEFAULT_FROM_NAME: &str = "Compact Connect";

/// Values every template and dispatch needs, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub environment_name: String,
    pub from_address: String,
    pub from_name: String,
    pub ui_base_url: String,
    pub logo_url: String,
}

impl NotificationSettings {
    pub fn is_production(&self) -> bool {
        self.environment_name == PRODUCTION_ENVIRONMENT_NAME
    }

    /// `"Compact Connect <noreply@example.org>"`
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    pub fn ui_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.ui_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
pub(crate) fn test_settings(environment_name: &str) -> NotificationSettings {
    NotificationSettings {
        environment_name: environment_name.to_string(),
        from_address: "noreply@compactconnect.org".to_string(),
        from_name: DEFAULT_FROM_NAME.to_string(),
        ui_base_url: "https://app.compactconnect.org/".to_string(),
        logo_url: "https://app.compactconnect.org/img/email/compact-connect-logo-final.png"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_is_exact_match() {
        assert!(test_settings("prod").is_production());
        assert!(!test_settings("beta").is_production());
        assert!(!test_settings("Prod").is_production());
    }

    #[test]
    fn ui_url_joins_without_double_slash() {
        let settings = test_settings("prod");
        assert_eq!(
            settings.ui_url("/aslp/Licensing/abc"),
            "https://app.compactconnect.org/aslp/Licensing/abc"
        );
        assert_eq!(
            settings.sender(),
            "Compact Connect <noreply@compactconnect.org>"
        );
    }
}
