use compact_notifications_core::keys::SortKeyCondition;
use serde_json::Value;

/// Key-value table access. Records are returned as JSON objects including
/// their `pk` and `sk` attributes.
pub trait RecordStore: Send + Sync {
    fn get_record(&self, table: &str, pk: &str, sk: &str) -> Result<Option<Value>, String>;

    /// Every record under `pk` whose sort key satisfies `condition`, across all pages.
    fn query_records(
        &self,
        table: &str,
        pk: &str,
        condition: &SortKeyCondition,
    ) -> Result<Vec<Value>, String>;
}
