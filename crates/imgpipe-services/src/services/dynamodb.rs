use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{ServiceError, ServiceResult};
use crate::recorder::MetadataStore;

/// DynamoDB-backed metadata store
#[derive(Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Convert a JSON value into a DynamoDB attribute
pub fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_item(map)),
    }
}

pub fn to_item(map: Map<String, Value>) -> HashMap<String, AttributeValue> {
    map.into_iter().map(|(k, v)| (k, to_attribute(v))).collect()
}

#[async_trait]
impl MetadataStore for DynamoDbStore {
    #[tracing::instrument(skip(self, item), fields(
        aws.service.name = "dynamodb",
        aws.dynamodb.table = %table,
        aws.dynamodb.operation = "PutItem",
    ))]
    async fn put_item(&self, table: &str, item: Map<String, Value>) -> ServiceResult<()> {
        let start = std::time::Instant::now();

        let result = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(to_item(item)))
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "DynamoDB put_item successful"
                );
                Ok(())
            }
            Err(e) => {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "DynamoDB put_item failed"
                );
                Err(ServiceError::RecordFailed(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_attribute_scalars() {
        assert_eq!(to_attribute(json!("cat.jpg")), AttributeValue::S("cat.jpg".into()));
        assert_eq!(to_attribute(json!(1024)), AttributeValue::N("1024".into()));
        assert_eq!(to_attribute(json!(true)), AttributeValue::Bool(true));
        assert_eq!(to_attribute(Value::Null), AttributeValue::Null(true));
    }

    #[test]
    fn test_to_item_nested() {
        let json = json!({
            "image_id": "cat.jpg",
            "width": 1024,
            "tags": ["a", "b"],
            "extra": { "k": "v" }
        });
        let Value::Object(map) = json else {
            panic!("expected object");
        };

        let item = to_item(map);
        assert_eq!(item["image_id"], AttributeValue::S("cat.jpg".into()));
        assert_eq!(item["width"], AttributeValue::N("1024".into()));
        assert_eq!(
            item["tags"],
            AttributeValue::L(vec![
                AttributeValue::S("a".into()),
                AttributeValue::S("b".into())
            ])
        );
        let AttributeValue::M(extra) = &item["extra"] else {
            panic!("expected map");
        };
        assert_eq!(extra["k"], AttributeValue::S("v".into()));
    }
}
