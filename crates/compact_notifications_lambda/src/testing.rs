//! In-memory adapters and seeded records for tests.
//!
//! Every fake records its calls so tests can assert what reached the outside
//! world, and can be switched into a failing mode to exercise downstream errors.

use std::collections::HashMap;
use std::sync::Mutex;

use compact_notifications_core::keys::{
    compact_configuration_pk, compact_configuration_sk, event_pk, event_sk_prefix,
    jurisdiction_configuration_sk, EventKind, SortKeyCondition,
};
use compact_notifications_core::settings::{NotificationSettings, DEFAULT_FROM_NAME};
use serde_json::{json, Value};

use crate::adapters::{BlobStore, MailDispatcher, OutgoingEmail, RecordStore};
use crate::clients::{ConfigurationClient, EventClient};
use crate::services::ServiceContext;

pub const CONFIGURATION_TABLE: &str = "compact-configuration";
pub const EVENT_TABLE: &str = "data-events";
pub const REPORT_BUCKET: &str = "transaction-reports";

pub fn test_settings(environment_name: &str) -> NotificationSettings {
    NotificationSettings {
        environment_name: environment_name.to_string(),
        from_address: "noreply@compactconnect.org".to_string(),
        from_name: DEFAULT_FROM_NAME.to_string(),
        ui_base_url: "https://app.compactconnect.org".to_string(),
        logo_url: "https://app.compactconnect.org/img/email/compact-connect-logo-final.png"
            .to_string(),
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<(String, Value)>>,
    calls: Mutex<usize>,
    failure: Mutex<Option<String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `record` must carry string `pk` and `sk` attributes.
    pub fn insert(&self, table: &str, record: Value) {
        self.records
            .lock()
            .expect("poisoned mutex")
            .push((table.to_string(), record));
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().expect("poisoned mutex") = Some(message.to_string());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("poisoned mutex")
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("poisoned mutex").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_call(&self) -> Result<(), String> {
        *self.calls.lock().expect("poisoned mutex") += 1;
        match self.failure.lock().expect("poisoned mutex").clone() {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

fn key_of<'a>(record: &'a Value, attribute: &str) -> &'a str {
    record.get(attribute).and_then(Value::as_str).unwrap_or_default()
}

impl RecordStore for MemoryRecordStore {
    fn get_record(&self, table: &str, pk: &str, sk: &str) -> Result<Option<Value>, String> {
        self.record_call()?;
        Ok(self
            .records
            .lock()
            .expect("poisoned mutex")
            .iter()
            .find(|(record_table, record)| {
                record_table == table && key_of(record, "pk") == pk && key_of(record, "sk") == sk
            })
            .map(|(_, record)| record.clone()))
    }

    fn query_records(
        &self,
        table: &str,
        pk: &str,
        condition: &SortKeyCondition,
    ) -> Result<Vec<Value>, String> {
        self.record_call()?;
        let mut matches: Vec<Value> = self
            .records
            .lock()
            .expect("poisoned mutex")
            .iter()
            .filter(|(record_table, record)| {
                record_table == table
                    && key_of(record, "pk") == pk
                    && condition.matches(key_of(record, "sk"))
            })
            .map(|(_, record)| record.clone())
            .collect();
        matches.sort_by(|left, right| key_of(left, "sk").cmp(key_of(right, "sk")));
        Ok(matches)
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    fetches: Mutex<Vec<String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().expect("poisoned mutex").clone()
    }
}

impl BlobStore for MemoryBlobStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, String> {
        self.fetches
            .lock()
            .expect("poisoned mutex")
            .push(format!("{bucket}/{key}"));
        Ok(self
            .objects
            .lock()
            .expect("poisoned mutex")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned())
    }
}

#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failure: Mutex<Option<String>>,
}

impl CapturingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().expect("poisoned mutex") = Some(message.to_string());
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().expect("poisoned mutex").clone()
    }
}

impl MailDispatcher for CapturingMailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<String, String> {
        if let Some(message) = self.failure.lock().expect("poisoned mutex").clone() {
            return Err(message);
        }
        let mut sent = self.sent.lock().expect("poisoned mutex");
        sent.push(email.clone());
        Ok(format!("message-{}", sent.len()))
    }
}

/// Owns one of each fake and hands out clients and service contexts over them.
pub struct TestHarness {
    pub settings: NotificationSettings,
    pub records: MemoryRecordStore,
    pub blobs: MemoryBlobStore,
    pub mailer: CapturingMailer,
}

impl TestHarness {
    pub fn new(environment_name: &str) -> Self {
        Self {
            settings: test_settings(environment_name),
            records: MemoryRecordStore::new(),
            blobs: MemoryBlobStore::new(),
            mailer: CapturingMailer::new(),
        }
    }

    pub fn configuration(&self) -> ConfigurationClient<'_> {
        ConfigurationClient::new(&self.records, CONFIGURATION_TABLE)
    }

    pub fn events(&self) -> EventClient<'_> {
        EventClient::new(&self.records, EVENT_TABLE)
    }

    pub fn context(&self) -> ServiceContext<'_> {
        ServiceContext {
            settings: &self.settings,
            configuration: self.configuration(),
            blobs: &self.blobs,
            mailer: &self.mailer,
            report_bucket: Some(REPORT_BUCKET),
        }
    }

    pub fn seed_compact(&self, compact: &str, operations_emails: &[&str]) {
        self.records
            .insert(CONFIGURATION_TABLE, compact_record(compact, operations_emails));
    }

    pub fn seed_jurisdiction(
        &self,
        compact: &str,
        jurisdiction: &str,
        name: &str,
        operations_emails: &[&str],
    ) {
        self.records.insert(
            CONFIGURATION_TABLE,
            jurisdiction_record(compact, jurisdiction, name, operations_emails),
        );
    }

    pub fn seed_event(
        &self,
        compact: &str,
        jurisdiction: &str,
        kind: EventKind,
        timestamp: i64,
        mut body: Value,
    ) {
        if let Value::Object(fields) = &mut body {
            fields.insert("pk".to_string(), json!(event_pk(compact, jurisdiction)));
            fields.insert(
                "sk".to_string(),
                json!(format!(
                    "{}{}",
                    event_sk_prefix(kind, timestamp),
                    self.records.len()
                )),
            );
            fields.insert("eventType".to_string(), json!(kind.as_str()));
        }
        self.records.insert(EVENT_TABLE, body);
    }
}

pub fn compact_record(compact: &str, operations_emails: &[&str]) -> Value {
    json!({
        "pk": compact_configuration_pk(compact),
        "sk": compact_configuration_sk(compact),
        "compactAbbr": compact,
        "compactName": format!("{} Compact", compact.to_uppercase()),
        "compactCommissionFee": {"feeType": "FLAT_RATE", "feeAmount": 3.5},
        "compactOperationsTeamEmails": operations_emails,
        "compactAdverseActionsNotificationEmails": ["adverse@example.com"],
        "compactSummaryReportNotificationEmails": ["summary@example.com"],
    })
}

pub fn jurisdiction_record(
    compact: &str,
    jurisdiction: &str,
    name: &str,
    operations_emails: &[&str],
) -> Value {
    json!({
        "pk": compact_configuration_pk(compact),
        "sk": jurisdiction_configuration_sk(compact, jurisdiction),
        "postalAbbreviation": jurisdiction,
        "jurisdictionName": name,
        "jurisdictionFee": 100.0,
        "jurisdictionOperationsTeamEmails": operations_emails,
        "jurisdictionAdverseActionsNotificationEmails": [format!("adverse-{jurisdiction}@example.com")],
        "jurisdictionSummaryReportNotificationEmails": [format!("summary-{jurisdiction}@example.com")],
    })
}
