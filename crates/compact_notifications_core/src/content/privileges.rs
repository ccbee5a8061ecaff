use serde::{Deserialize, Serialize};

use super::{format_currency, full_name, EmailContent, TemplateBuilder};
use crate::contract::CompactConfiguration;
use crate::settings::NotificationSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivatedPrivilege {
    pub privilege_id: String,
    pub provider_first_name: String,
    pub provider_last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedPrivilege {
    pub jurisdiction: String,
    pub privilege_id: String,
    pub license_type_abbrev: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegePurchase {
    pub transaction_date: String,
    pub privileges: Vec<PurchasedPrivilege>,
    pub total_cost: f64,
    pub cost_line_items: Vec<CostLineItem>,
}

pub fn deactivation_jurisdiction(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    privilege: &DeactivatedPrivilege,
) -> EmailContent {
    TemplateBuilder::new(settings)
        .heading("Privilege Deactivated")
        .body(format!(
            "This message is to notify you that privilege {} held by {} was deactivated and can no longer be used to practice.",
            privilege.privilege_id,
            full_name(&privilege.provider_first_name, &privilege.provider_last_name),
        ))
        .finish(format!(
            "A Privilege was Deactivated in the {} Compact",
            compact.compact_name
        ))
}

pub fn deactivation_provider(settings: &NotificationSettings, privilege_id: &str) -> EmailContent {
    TemplateBuilder::new(settings)
        .heading("Privilege Deactivated")
        .body(format!(
            "This message is to notify you that your privilege {privilege_id} was deactivated and can no longer be used to practice. If you have any questions, please contact the jurisdiction that issued the privilege."
        ))
        .finish(format!("Your Privilege {privilege_id} is Deactivated"))
}

pub fn purchase_confirmation(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
    purchase: &PrivilegePurchase,
) -> EmailContent {
    let privileges = purchase.privileges.iter().map(|privilege| {
        format!(
            "{} {} privilege ({})",
            privilege.jurisdiction.to_uppercase(),
            privilege.license_type_abbrev.to_uppercase(),
            privilege.privilege_id
        )
    });

    let mut rows: Vec<(String, String)> = purchase
        .cost_line_items
        .iter()
        .map(|item| {
            let label = if item.quantity > 1 {
                format!("{} x {}", item.name, item.quantity)
            } else {
                item.name.clone()
            };
            (label, format_currency(item.unit_price * f64::from(item.quantity)))
        })
        .collect();
    rows.push(("Total".to_string(), format_currency(purchase.total_cost)));

    TemplateBuilder::new(settings)
        .heading("Privilege Purchase Confirmation")
        .body(format!(
            "Thank you for your purchase through {}. The following privileges were purchased on {}:",
            compact.compact_name, purchase.transaction_date
        ))
        .list(privileges)
        .divider()
        .label_values(&rows)
        .finish(format!(
            "{} Privilege Purchase Confirmation",
            compact.compact_name
        ))
}

pub fn multiple_registration_attempt(
    settings: &NotificationSettings,
    compact: &CompactConfiguration,
) -> EmailContent {
    let login_url = settings.ui_url("/Dashboard");
    TemplateBuilder::new(settings)
        .heading("Registration Attempt Detected")
        .body(format!(
            "Someone attempted to register a new {} account with this email address, but an account already exists. If this was you, sign in at {login_url}. If you did not make this attempt, no action is needed.",
            compact.compact_name
        ))
        .finish("Registration Attempt Notification")
}

pub fn email_verification_code(
    settings: &NotificationSettings,
    verification_code: &str,
) -> EmailContent {
    TemplateBuilder::new(settings)
        .heading("Verify Your New Email Address")
        .body("Use the code below to verify your new email address. The code expires in 15 minutes.")
        .emphasis(verification_code)
        .finish("Verify your email address")
}

pub fn email_change_notification(
    settings: &NotificationSettings,
    new_email_address: &str,
) -> EmailContent {
    TemplateBuilder::new(settings)
        .heading("Your Email Address Was Changed")
        .body(format!(
            "The email address associated with your account was changed to {new_email_address}. If you did not make this change, please contact support immediately."
        ))
        .finish("Email address change notification")
}

pub fn account_recovery_confirmation(
    settings: &NotificationSettings,
    compact: &str,
    provider_id: &str,
    recovery_token: &str,
) -> EmailContent {
    let recovery_url = settings.ui_url(&format!(
        "/Dashboard/RecoverAccount?compact={}&providerId={provider_id}&recoveryId={recovery_token}",
        compact.to_lowercase()
    ));
    TemplateBuilder::new(settings)
        .heading("Confirm Account Recovery")
        .body("A request was made to recover your account. Follow the link below to complete the recovery. The link expires in 15 minutes.")
        .body(recovery_url)
        .body("If you did not request account recovery, you can ignore this email.")
        .finish("Confirm Account Recovery")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::block_texts;
    use crate::settings::test_settings;
    use crate::template::{render, ROOT_BLOCK_ID};

    fn compact() -> CompactConfiguration {
        CompactConfiguration {
            compact_abbr: "aslp".to_string(),
            compact_name: "ASLP".to_string(),
            compact_commission_fee: None,
            compact_operations_team_emails: Vec::new(),
            compact_adverse_actions_notification_emails: Vec::new(),
            compact_summary_report_notification_emails: Vec::new(),
        }
    }

    #[test]
    fn purchase_confirmation_lists_items_and_total() {
        let purchase = PrivilegePurchase {
            transaction_date: "2025-03-12".to_string(),
            privileges: vec![PurchasedPrivilege {
                jurisdiction: "ky".to_string(),
                privilege_id: "AUD-KY-12".to_string(),
                license_type_abbrev: "aud".to_string(),
            }],
            total_cost: 139.5,
            cost_line_items: vec![
                CostLineItem {
                    name: "Kentucky Compact Privilege".to_string(),
                    quantity: 1,
                    unit_price: 100.0,
                },
                CostLineItem {
                    name: "Compact fee".to_string(),
                    quantity: 3,
                    unit_price: 13.166666,
                },
            ],
        };
        let content = purchase_confirmation(&test_settings("prod"), &compact(), &purchase);
        let html = render(&content.document, ROOT_BLOCK_ID).expect("render should succeed");

        assert!(block_texts(&content).contains(&"\u{2022} KY AUD privilege (AUD-KY-12)".to_string()));
        assert!(html.contains("Compact fee x 3"));
        assert!(html.contains("$39.50"));
        assert!(html.contains("$139.50"));
        assert_eq!(content.subject, "ASLP Privilege Purchase Confirmation");
    }

    #[test]
    fn recovery_link_carries_identifiers() {
        let content = account_recovery_confirmation(&test_settings("prod"), "ASLP", "p-1", "tok");
        assert!(block_texts(&content).contains(
            &"https://app.compactconnect.org/Dashboard/RecoverAccount?compact=aslp&providerId=p-1&recoveryId=tok"
                .to_string()
        ));
    }
}
