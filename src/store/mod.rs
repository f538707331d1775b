mod dynamo;
pub use dynamo::DynamoStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Partition key attribute of the users table.
pub const PARTITION_KEY: &str = "userId";
/// Sort key attribute of the users table.
pub const SORT_KEY: &str = "name";

/// One table item: attribute name to JSON value, key attributes included.
pub type Record = Map<String, Value>;

/// Full key of a single record, taken from the record's own attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordKey {
    pub user_id: Value,
    pub name: Value,
}

impl RecordKey {
    /// Reads `userId` and `name` out of a record. A missing key attribute
    /// becomes JSON null and is rejected by the store at call time.
    pub fn of(record: &Record) -> Self {
        Self {
            user_id: record.get(PARTITION_KEY).cloned().unwrap_or(Value::Null),
            name: record.get(SORT_KEY).cloned().unwrap_or(Value::Null),
        }
    }
}

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("ConversionError: {0}")]
    Conversion(#[from] serde_dynamo::Error),
}

#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("ConversionError: {0}")]
    Conversion(#[from] serde_dynamo::Error),
}

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("ConversionError: {0}")]
    Conversion(#[from] serde_dynamo::Error),
    #[error("Update response carried no attributes")]
    MissingAttributes,
}

/// Store seam for the handler. One long-lived implementation per process;
/// swapped for a stub in tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All records whose partition key equals `user_id`, in store order.
    async fn query_by_user(&self, user_id: &Value) -> Result<Vec<Record>, QueryError>;

    /// Unconditionally removes one record by its full key.
    async fn delete(&self, key: &RecordKey) -> Result<(), DeleteError>;

    /// Sets every attribute in `updates` on the record at `key` and returns
    /// the record's full new attribute set.
    async fn update(
        &self,
        key: &RecordKey,
        updates: Map<String, Value>,
    ) -> Result<Record, UpdateError>;
}

#[async_trait]
impl<S: UserStore + ?Sized> UserStore for &S {
    async fn query_by_user(&self, user_id: &Value) -> Result<Vec<Record>, QueryError> {
        (**self).query_by_user(user_id).await
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), DeleteError> {
        (**self).delete(key).await
    }

    async fn update(
        &self,
        key: &RecordKey,
        updates: Map<String, Value>,
    ) -> Result<Record, UpdateError> {
        (**self).update(key, updates).await
    }
}
