use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use compact_notifications_core::keys::SortKeyCondition;
use serde_json::{Map, Number, Value};

use crate::adapters::RecordStore;

const PARTITION_KEY: &str = "pk";
const SORT_KEY: &str = "sk";

pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

impl RecordStore for DynamoRecordStore {
    fn get_record(&self, table: &str, pk: &str, sk: &str) -> Result<Option<Value>, String> {
        let client = self.client.clone();
        let table = table.to_string();
        let pk = pk.to_string();
        let sk = sk.to_string();

        super::block_on(async move {
            client
                .get_item()
                .table_name(&table)
                .key(PARTITION_KEY, AttributeValue::S(pk.clone()))
                .key(SORT_KEY, AttributeValue::S(sk.clone()))
                .send()
                .await
                .map(|output| output.item().map(item_to_json))
                .map_err(|error| format!("failed to read {pk}/{sk} from {table}: {error}"))
        })
    }

    fn query_records(
        &self,
        table: &str,
        pk: &str,
        condition: &SortKeyCondition,
    ) -> Result<Vec<Value>, String> {
        let client = self.client.clone();
        let table = table.to_string();
        let pk = pk.to_string();
        let condition = condition.clone();

        super::block_on(async move {
            let mut records = Vec::new();
            let mut start_key: Option<HashMap<String, AttributeValue>> = None;
            loop {
                let request = client
                    .query()
                    .table_name(&table)
                    .expression_attribute_names("#pk", PARTITION_KEY)
                    .expression_attribute_names("#sk", SORT_KEY)
                    .expression_attribute_values(":pk", AttributeValue::S(pk.clone()))
                    .set_exclusive_start_key(start_key.take());
                let request = match &condition {
                    SortKeyCondition::BeginsWith(prefix) => request
                        .key_condition_expression("#pk = :pk AND begins_with(#sk, :prefix)")
                        .expression_attribute_values(":prefix", AttributeValue::S(prefix.clone())),
                    SortKeyCondition::Between(lower, upper) => request
                        .key_condition_expression("#pk = :pk AND #sk BETWEEN :lower AND :upper")
                        .expression_attribute_values(":lower", AttributeValue::S(lower.clone()))
                        .expression_attribute_values(":upper", AttributeValue::S(upper.clone())),
                };

                let output = request
                    .send()
                    .await
                    .map_err(|error| format!("failed to query {pk} in {table}: {error}"))?;
                records.extend(output.items().iter().map(item_to_json));
                match output.last_evaluated_key() {
                    Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                    _ => break,
                }
            }
            Ok(records)
        })
    }
}

pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(
        item.iter()
            .map(|(name, value)| (name.clone(), attribute_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => number_to_json(number),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(attribute_to_json).collect()),
        AttributeValue::M(fields) => item_to_json(fields),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(items) => {
            Value::Array(items.iter().map(|number| number_to_json(number)).collect())
        }
        AttributeValue::B(blob) => Value::String(String::from_utf8_lossy(blob.as_ref()).into_owned()),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(String::from_utf8_lossy(blob.as_ref()).into_owned()))
                .collect(),
        ),
        _ => Value::Null,
    }
}

// Integers stay integers; anything else that parses becomes a float, and the
// raw string is kept when neither fits.
fn number_to_json(number: &str) -> Value {
    if let Ok(integer) = number.parse::<i64>() {
        return Value::Number(integer.into());
    }
    number
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(number.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_nested_items() {
        let item = HashMap::from([
            ("pk".to_string(), AttributeValue::S("aslp#CONFIGURATION".to_string())),
            ("jurisdictionFee".to_string(), AttributeValue::N("100.5".to_string())),
            ("recordNumber".to_string(), AttributeValue::N("12".to_string())),
            (
                "jurisdictionOperationsTeamEmails".to_string(),
                AttributeValue::L(vec![AttributeValue::S("ops@example.com".to_string())]),
            ),
            (
                "compactCommissionFee".to_string(),
                AttributeValue::M(HashMap::from([
                    ("feeType".to_string(), AttributeValue::S("FLAT_RATE".to_string())),
                    ("feeAmount".to_string(), AttributeValue::N("3".to_string())),
                ])),
            ),
            ("licenseType".to_string(), AttributeValue::Null(true)),
        ]);

        assert_eq!(
            item_to_json(&item),
            json!({
                "pk": "aslp#CONFIGURATION",
                "jurisdictionFee": 100.5,
                "recordNumber": 12,
                "jurisdictionOperationsTeamEmails": ["ops@example.com"],
                "compactCommissionFee": {"feeType": "FLAT_RATE", "feeAmount": 3},
                "licenseType": null,
            })
        );
    }

    #[test]
    fn string_sets_become_arrays() {
        let value = AttributeValue::Ss(vec!["a@example.com".to_string(), "b@example.com".to_string()]);
        assert_eq!(attribute_to_json(&value), json!(["a@example.com", "b@example.com"]));
    }
}
