use super::{
    DeleteError, QueryError, Record, RecordKey, UpdateError, UserStore, PARTITION_KEY, SORT_KEY,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    types::{AttributeValue, ReturnValue},
    Client,
};
use itertools::Itertools;
use log::debug;
use serde_json::{Map, Value};

/// Production store over a shared DynamoDB client. Constructed once at
/// startup; the client and table name never change afterwards.
pub struct DynamoStore {
    db: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(db: Client, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl UserStore for DynamoStore {
    async fn query_by_user(&self, user_id: &Value) -> Result<Vec<Record>, QueryError> {
        let user_id: AttributeValue = serde_dynamo::to_attribute_value(user_id)?;

        let result = self
            .db
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", user_id)
            .send()
            .await
            .map_err(|e| QueryError::Aws(e.to_string()))?;

        let items = result.items.unwrap_or_default();
        debug!("query returned {} item(s)", items.len());

        Ok(serde_dynamo::from_items(items)?)
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), DeleteError> {
        let user_id: AttributeValue = serde_dynamo::to_attribute_value(&key.user_id)?;
        let name: AttributeValue = serde_dynamo::to_attribute_value(&key.name)?;

        self.db
            .delete_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, user_id)
            .key(SORT_KEY, name)
            .send()
            .await
            .map_err(|e| DeleteError::Aws(e.to_string()))?;

        Ok(())
    }

    async fn update(
        &self,
        key: &RecordKey,
        updates: Map<String, Value>,
    ) -> Result<Record, UpdateError> {
        let user_id: AttributeValue = serde_dynamo::to_attribute_value(&key.user_id)?;
        let name: AttributeValue = serde_dynamo::to_attribute_value(&key.name)?;

        let mut request = self
            .db
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, user_id)
            .key(SORT_KEY, name)
            .update_expression(update_expression(&updates))
            .return_values(ReturnValue::AllNew);

        for (attr, value) in &updates {
            let value: AttributeValue = serde_dynamo::to_attribute_value(value)?;
            request = request
                .expression_attribute_names(format!("#{attr}"), attr)
                .expression_attribute_values(format!(":{attr}"), value);
        }

        let result = request
            .send()
            .await
            .map_err(|e| UpdateError::Aws(e.to_string()))?;

        let attributes = result.attributes.ok_or(UpdateError::MissingAttributes)?;

        Ok(serde_dynamo::from_item(attributes)?)
    }
}

// SET #a = :a, #b = :b over every updated attribute. Placeholders are
// derived from the attribute names, so a name DynamoDB cannot accept in an
// expression fails the whole call.
fn update_expression(updates: &Map<String, Value>) -> String {
    format!(
        "SET {}",
        updates.keys().map(|k| format!("#{k} = :{k}")).join(", ")
    )
}
