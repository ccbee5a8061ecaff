//! Compact and jurisdiction configuration lookups.

use compact_notifications_core::contract::{CompactConfiguration, JurisdictionConfiguration};
use compact_notifications_core::keys::{
    compact_configuration_pk, compact_configuration_sk, jurisdiction_configuration_prefix,
    jurisdiction_configuration_sk,
};
use compact_notifications_core::{NotificationError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::adapters::RecordStore;

#[derive(Clone, Copy)]
pub struct ConfigurationClient<'a> {
    store: &'a dyn RecordStore,
    table_name: &'a str,
}

impl<'a> ConfigurationClient<'a> {
    pub fn new(store: &'a dyn RecordStore, table_name: &'a str) -> Self {
        Self { store, table_name }
    }

    pub fn get_compact_configuration(&self, compact: &str) -> Result<CompactConfiguration> {
        let pk = compact_configuration_pk(compact);
        let sk = compact_configuration_sk(compact);
        let record = self
            .store
            .get_record(self.table_name, &pk, &sk)
            .map_err(|error| read_failure(&pk, &sk, error))?
            .ok_or_else(|| {
                NotificationError::NotFound(format!(
                    "compact configuration for {}",
                    compact.to_lowercase()
                ))
            })?;
        decode(record, &pk, &sk)
    }

    pub fn get_jurisdiction_configuration(
        &self,
        compact: &str,
        jurisdiction: &str,
    ) -> Result<JurisdictionConfiguration> {
        let pk = compact_configuration_pk(compact);
        let sk = jurisdiction_configuration_sk(compact, jurisdiction);
        let record = self
            .store
            .get_record(self.table_name, &pk, &sk)
            .map_err(|error| read_failure(&pk, &sk, error))?
            .ok_or_else(|| {
                NotificationError::NotFound(format!(
                    "jurisdiction configuration for {}/{}",
                    compact.to_lowercase(),
                    jurisdiction.to_lowercase()
                ))
            })?;
        decode(record, &pk, &sk)
    }

    /// Every jurisdiction configured under `compact`; none configured is an empty list.
    pub fn get_jurisdiction_configurations(
        &self,
        compact: &str,
    ) -> Result<Vec<JurisdictionConfiguration>> {
        self.decode_jurisdiction_configurations(compact)?
            .into_iter()
            .collect()
    }

    /// Queries every jurisdiction record under `compact` and decodes each one on
    /// its own, so a malformed record leaves the others readable.
    pub fn decode_jurisdiction_configurations(
        &self,
        compact: &str,
    ) -> Result<Vec<Result<JurisdictionConfiguration>>> {
        let pk = compact_configuration_pk(compact);
        let condition = jurisdiction_configuration_prefix(compact);
        let records = self
            .store
            .query_records(self.table_name, &pk, &condition)
            .map_err(|error| {
                tracing::error!(pk = %pk, %error, "jurisdiction configuration query failed");
                NotificationError::downstream(
                    format!("failed to query jurisdictions under {pk}"),
                    error,
                )
            })?;
        Ok(records
            .into_iter()
            .map(|record| {
                let sk = record
                    .get("sk")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                decode(record, &pk, &sk)
            })
            .collect())
    }
}

fn read_failure(pk: &str, sk: &str, error: String) -> NotificationError {
    tracing::error!(pk = %pk, sk = %sk, %error, "configuration read failed");
    NotificationError::downstream(format!("failed to read {pk}/{sk}"), error)
}

fn decode<T: DeserializeOwned>(record: Value, pk: &str, sk: &str) -> Result<T> {
    serde_json::from_value(record).map_err(|error| {
        tracing::error!(pk = %pk, sk = %sk, %error, "malformed configuration record");
        NotificationError::downstream(format!("malformed configuration record {pk}/{sk}"), error.to_string())
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{compact_record, jurisdiction_record, MemoryRecordStore, CONFIGURATION_TABLE};

    fn seeded_store() -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        store.insert(CONFIGURATION_TABLE, compact_record("aslp", &["ops@example.com"]));
        store.insert(
            CONFIGURATION_TABLE,
            jurisdiction_record("aslp", "oh", "Ohio", &["oh-ops@example.com"]),
        );
        store.insert(
            CONFIGURATION_TABLE,
            jurisdiction_record("aslp", "ky", "Kentucky", &[]),
        );
        store.insert(
            CONFIGURATION_TABLE,
            jurisdiction_record("octp", "oh", "Ohio", &["octp-oh@example.com"]),
        );
        store
    }

    #[test]
    fn reads_compact_configuration() {
        let store = seeded_store();
        let client = ConfigurationClient::new(&store, CONFIGURATION_TABLE);
        let config = client
            .get_compact_configuration("ASLP")
            .expect("aslp is configured");
        assert_eq!(config.compact_abbr, "aslp");
        assert_eq!(config.compact_operations_team_emails, vec!["ops@example.com"]);
    }

    #[test]
    fn missing_records_are_not_found() {
        let store = seeded_store();
        let client = ConfigurationClient::new(&store, CONFIGURATION_TABLE);
        assert!(matches!(
            client.get_compact_configuration("coun"),
            Err(NotificationError::NotFound(_))
        ));
        assert_eq!(
            client
                .get_jurisdiction_configuration("aslp", "NE")
                .expect_err("ne is not configured"),
            NotificationError::NotFound("jurisdiction configuration for aslp/ne".to_string())
        );
    }

    #[test]
    fn lists_only_the_compacts_jurisdictions() {
        let store = seeded_store();
        let client = ConfigurationClient::new(&store, CONFIGURATION_TABLE);
        let names: Vec<String> = client
            .get_jurisdiction_configurations("aslp")
            .expect("query succeeds")
            .into_iter()
            .map(|config| config.postal_abbreviation)
            .collect();
        assert_eq!(names, vec!["ky", "oh"]);
        assert!(client
            .get_jurisdiction_configurations("coun")
            .expect("empty query succeeds")
            .is_empty());
    }

    #[test]
    fn malformed_record_is_a_downstream_error() {
        let store = MemoryRecordStore::new();
        store.insert(
            CONFIGURATION_TABLE,
            json!({"pk": "aslp#CONFIGURATION", "sk": "aslp#CONFIGURATION", "compactName": 7}),
        );
        let client = ConfigurationClient::new(&store, CONFIGURATION_TABLE);
        let error = client
            .get_compact_configuration("aslp")
            .expect_err("record is malformed");
        assert!(error
            .to_string()
            .starts_with("malformed configuration record aslp#CONFIGURATION/aslp#CONFIGURATION"));
    }

    #[test]
    fn one_malformed_jurisdiction_leaves_the_others_decodable() {
        let store = seeded_store();
        store.insert(
            CONFIGURATION_TABLE,
            json!({
                "pk": "aslp#CONFIGURATION",
                "sk": "aslp#JURISDICTION#ne",
                "postalAbbreviation": "ne",
            }),
        );
        let client = ConfigurationClient::new(&store, CONFIGURATION_TABLE);

        let decoded = client
            .decode_jurisdiction_configurations("aslp")
            .expect("query succeeds");
        let readable: Vec<&str> = decoded
            .iter()
            .filter_map(|record| record.as_ref().ok())
            .map(|config| config.postal_abbreviation.as_str())
            .collect();
        assert_eq!(decoded.len(), 3);
        assert_eq!(readable, vec!["ky", "oh"]);
        assert!(matches!(
            client.get_jurisdiction_configurations("aslp"),
            Err(NotificationError::Downstream { .. })
        ));
    }

    #[test]
    fn store_failures_are_downstream_errors() {
        let store = seeded_store();
        store.fail_with("throttled");
        let client = ConfigurationClient::new(&store, CONFIGURATION_TABLE);
        assert_eq!(
            client.get_compact_configuration("aslp"),
            Err(NotificationError::downstream(
                "failed to read aslp#CONFIGURATION/aslp#CONFIGURATION",
                "throttled"
            ))
        );
    }
}
