//! Direct-invocation payloads, validated into one variant per template.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::encumbrance::{
    Credential, EncumbranceAction, ProviderEncumbranceVariables, StateEncumbranceVariables,
};
use crate::content::investigation::{InvestigationStatus, InvestigationVariables};
use crate::content::privileges::{DeactivatedPrivilege, PrivilegePurchase};
use crate::content::transactions::{CompactReportVariables, JurisdictionReportVariables};
use crate::contract::{RecipientType, Recipients};
use crate::error::{NotificationError, Result, ValidationError};

/// The wire shape, before any per-template validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotificationRequest {
    pub template: String,
    pub recipient_type: String,
    pub compact: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub specific_emails: Vec<String>,
    #[serde(default)]
    pub template_variables: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    TransactionBatchSettlementFailure,
    CompactTransactionReporting,
    JurisdictionTransactionReporting,
    PrivilegeDeactivationJurisdiction,
    PrivilegeDeactivationProvider,
    PrivilegePurchaseProvider,
    MultipleRegistrationAttempt,
    ProviderEmailVerificationCode,
    ProviderEmailChange,
    ProviderAccountRecoveryConfirmation,
    LicenseEncumbranceProvider,
    LicenseEncumbranceState,
    LicenseEncumbranceLiftingProvider,
    LicenseEncumbranceLiftingState,
    PrivilegeEncumbranceProvider,
    PrivilegeEncumbranceState,
    PrivilegeEncumbranceLiftingProvider,
    PrivilegeEncumbranceLiftingState,
    LicenseInvestigationState,
    LicenseInvestigationClosedState,
    PrivilegeInvestigationState,
    PrivilegeInvestigationClosedState,
}

impl TemplateName {
    pub const ALL: [TemplateName; 22] = [
        Self::TransactionBatchSettlementFailure,
        Self::CompactTransactionReporting,
        Self::JurisdictionTransactionReporting,
        Self::PrivilegeDeactivationJurisdiction,
        Self::PrivilegeDeactivationProvider,
        Self::PrivilegePurchaseProvider,
        Self::MultipleRegistrationAttempt,
        Self::ProviderEmailVerificationCode,
        Self::ProviderEmailChange,
        Self::ProviderAccountRecoveryConfirmation,
        Self::LicenseEncumbranceProvider,
        Self::LicenseEncumbranceState,
        Self::LicenseEncumbranceLiftingProvider,
        Self::LicenseEncumbranceLiftingState,
        Self::PrivilegeEncumbranceProvider,
        Self::PrivilegeEncumbranceState,
        Self::PrivilegeEncumbranceLiftingProvider,
        Self::PrivilegeEncumbranceLiftingState,
        Self::LicenseInvestigationState,
        Self::LicenseInvestigationClosedState,
        Self::PrivilegeInvestigationState,
        Self::PrivilegeInvestigationClosedState,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TransactionBatchSettlementFailure => "transactionBatchSettlementFailure",
            Self::CompactTransactionReporting => "CompactTransactionReporting",
            Self::JurisdictionTransactionReporting => "JurisdictionTransactionReporting",
            Self::PrivilegeDeactivationJurisdiction => {
                "privilegeDeactivationJurisdictionNotification"
            }
            Self::PrivilegeDeactivationProvider => "privilegeDeactivationProviderNotification",
            Self::PrivilegePurchaseProvider => "privilegePurchaseProviderNotification",
            Self::MultipleRegistrationAttempt => "multipleRegistrationAttemptNotification",
            Self::ProviderEmailVerificationCode => "providerEmailVerificationCode",
            Self::ProviderEmailChange => "providerEmailChangeNotification",
            Self::ProviderAccountRecoveryConfirmation => "providerAccountRecoveryConfirmation",
            Self::LicenseEncumbranceProvider => "licenseEncumbranceProviderNotification",
            Self::LicenseEncumbranceState => "licenseEncumbranceStateNotification",
            Self::LicenseEncumbranceLiftingProvider => {
                "licenseEncumbranceLiftingProviderNotification"
            }
            Self::LicenseEncumbranceLiftingState => "licenseEncumbranceLiftingStateNotification",
            Self::PrivilegeEncumbranceProvider => "privilegeEncumbranceProviderNotification",
            Self::PrivilegeEncumbranceState => "privilegeEncumbranceStateNotification",
            Self::PrivilegeEncumbranceLiftingProvider => {
                "privilegeEncumbranceLiftingProviderNotification"
            }
            Self::PrivilegeEncumbranceLiftingState => {
                "privilegeEncumbranceLiftingStateNotification"
            }
            Self::LicenseInvestigationState => "licenseInvestigationStateNotification",
            Self::LicenseInvestigationClosedState => "licenseInvestigationClosedStateNotification",
            Self::PrivilegeInvestigationState => "privilegeInvestigationStateNotification",
            Self::PrivilegeInvestigationClosedState => {
                "privilegeInvestigationClosedStateNotification"
            }
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| NotificationError::Unsupported(format!("template '{value}'")))
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request. Each variant carries exactly what its template needs.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationRequest {
    TransactionBatchSettlementFailure {
        compact: String,
        recipients: Recipients,
    },
    CompactTransactionReport {
        compact: String,
        recipients: Recipients,
        variables: CompactReportVariables,
    },
    JurisdictionTransactionReport {
        compact: String,
        jurisdiction: String,
        recipients: Recipients,
        variables: JurisdictionReportVariables,
    },
    PrivilegeDeactivationJurisdiction {
        compact: String,
        jurisdiction: String,
        recipients: Recipients,
        privilege: DeactivatedPrivilege,
    },
    PrivilegeDeactivationProvider {
        compact: String,
        recipients: Recipients,
        privilege_id: String,
    },
    PrivilegePurchaseProvider {
        compact: String,
        recipients: Recipients,
        purchase: PrivilegePurchase,
    },
    MultipleRegistrationAttempt {
        compact: String,
        recipients: Recipients,
    },
    ProviderEmailVerificationCode {
        compact: String,
        recipients: Recipients,
        verification_code: String,
    },
    ProviderEmailChange {
        compact: String,
        recipients: Recipients,
        new_email_address: String,
    },
    ProviderAccountRecoveryConfirmation {
        compact: String,
        recipients: Recipients,
        provider_id: String,
        recovery_token: String,
    },
    EncumbranceProvider {
        compact: String,
        recipients: Recipients,
        credential: Credential,
        action: EncumbranceAction,
        variables: ProviderEncumbranceVariables,
    },
    EncumbranceState {
        compact: String,
        jurisdiction: String,
        recipients: Recipients,
        credential: Credential,
        action: EncumbranceAction,
        variables: StateEncumbranceVariables,
    },
    InvestigationState {
        compact: String,
        jurisdiction: String,
        recipients: Recipients,
        credential: Credential,
        status: InvestigationStatus,
        variables: InvestigationVariables,
    },
}

impl NotificationRequest {
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawNotificationRequest = serde_json::from_value(value).map_err(|error| {
            ValidationError::new(format!("Malformed notification request: {error}"))
        })?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawNotificationRequest> for NotificationRequest {
    type Error = NotificationError;

    fn try_from(raw: RawNotificationRequest) -> Result<Self> {
        let template = TemplateName::parse(&raw.template)?;
        let recipient_type: RecipientType = raw.recipient_type.parse()?;
        let compact = raw.compact.trim().to_lowercase();
        if compact.is_empty() {
            return Err(ValidationError::missing_field("compact", template.as_str()).into());
        }
        let recipients = Recipients {
            recipient_type,
            specific_emails: raw.specific_emails.clone(),
        };
        let vars = &raw.template_variables;

        use TemplateName as T;
        let request = match template {
            T::TransactionBatchSettlementFailure => Self::TransactionBatchSettlementFailure {
                compact,
                recipients,
            },
            T::CompactTransactionReporting => Self::CompactTransactionReport {
                compact,
                recipients,
                variables: variables(vars, template)?,
            },
            T::JurisdictionTransactionReporting => Self::JurisdictionTransactionReport {
                compact,
                jurisdiction: jurisdiction(&raw, template)?,
                recipients,
                variables: variables(vars, template)?,
            },
            T::PrivilegeDeactivationJurisdiction => Self::PrivilegeDeactivationJurisdiction {
                compact,
                jurisdiction: jurisdiction(&raw, template)?,
                recipients,
                privilege: variables(vars, template)?,
            },
            T::PrivilegeDeactivationProvider => Self::PrivilegeDeactivationProvider {
                compact,
                recipients,
                privilege_id: string_variable(vars, "privilegeId", template)?,
            },
            T::PrivilegePurchaseProvider => Self::PrivilegePurchaseProvider {
                compact,
                recipients,
                purchase: variables(vars, template)?,
            },
            T::MultipleRegistrationAttempt => Self::MultipleRegistrationAttempt {
                compact,
                recipients,
            },
            T::ProviderEmailVerificationCode => Self::ProviderEmailVerificationCode {
                compact,
                recipients,
                verification_code: string_variable(vars, "verificationCode", template)?,
            },
            T::ProviderEmailChange => Self::ProviderEmailChange {
                compact,
                recipients,
                new_email_address: string_variable(vars, "newEmailAddress", template)?,
            },
            T::ProviderAccountRecoveryConfirmation => Self::ProviderAccountRecoveryConfirmation {
                compact,
                recipients,
                provider_id: string_variable(vars, "providerId", template)?,
                recovery_token: string_variable(vars, "recoveryToken", template)?,
            },
            T::LicenseEncumbranceProvider
            | T::LicenseEncumbranceLiftingProvider
            | T::PrivilegeEncumbranceProvider
            | T::PrivilegeEncumbranceLiftingProvider => {
                let (credential, action) = encumbrance_kind(template);
                Self::EncumbranceProvider {
                    compact,
                    recipients,
                    credential,
                    action,
                    variables: variables(vars, template)?,
                }
            }
            T::LicenseEncumbranceState
            | T::LicenseEncumbranceLiftingState
            | T::PrivilegeEncumbranceState
            | T::PrivilegeEncumbranceLiftingState => {
                let (credential, action) = encumbrance_kind(template);
                Self::EncumbranceState {
                    compact,
                    jurisdiction: jurisdiction(&raw, template)?,
                    recipients,
                    credential,
                    action,
                    variables: variables(vars, template)?,
                }
            }
            T::LicenseInvestigationState
            | T::LicenseInvestigationClosedState
            | T::PrivilegeInvestigationState
            | T::PrivilegeInvestigationClosedState => {
                let credential = match template {
                    T::LicenseInvestigationState | T::LicenseInvestigationClosedState => {
                        Credential::License
                    }
                    _ => Credential::Privilege,
                };
                let status = match template {
                    T::LicenseInvestigationClosedState | T::PrivilegeInvestigationClosedState => {
                        InvestigationStatus::Closed
                    }
                    _ => InvestigationStatus::Opened,
                };
                Self::InvestigationState {
                    compact,
                    jurisdiction: jurisdiction(&raw, template)?,
                    recipients,
                    credential,
                    status,
                    variables: variables(vars, template)?,
                }
            }
        };
        Ok(request)
    }
}

fn encumbrance_kind(template: TemplateName) -> (Credential, EncumbranceAction) {
    use TemplateName as T;
    let credential = match template {
        T::PrivilegeEncumbranceProvider
        | T::PrivilegeEncumbranceState
        | T::PrivilegeEncumbranceLiftingProvider
        | T::PrivilegeEncumbranceLiftingState => Credential::Privilege,
        _ => Credential::License,
    };
    let action = match template {
        T::LicenseEncumbranceLiftingProvider
        | T::LicenseEncumbranceLiftingState
        | T::PrivilegeEncumbranceLiftingProvider
        | T::PrivilegeEncumbranceLiftingState => EncumbranceAction::Lifted,
        _ => EncumbranceAction::Encumbered,
    };
    (credential, action)
}

fn jurisdiction(raw: &RawNotificationRequest, template: TemplateName) -> Result<String> {
    raw.jurisdiction
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
        .ok_or_else(|| ValidationError::missing_field("jurisdiction", template.as_str()).into())
}

fn string_variable(vars: &Map<String, Value>, key: &str, template: TemplateName) -> Result<String> {
    vars.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ValidationError::missing_field(&format!("templateVariables.{key}"), template.as_str())
                .into()
        })
}

fn variables<T: DeserializeOwned>(vars: &Map<String, Value>, template: TemplateName) -> Result<T> {
    serde_json::from_value(Value::Object(vars.clone())).map_err(|error| {
        ValidationError::new(format!(
            "invalid templateVariables for the {template} template: {error}"
        ))
        .into()
    })
}
