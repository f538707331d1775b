use crate::error::HandlerError;
use crate::response::ApiResponse;
use crate::store::{Record, RecordKey, UserStore, PARTITION_KEY};
use chrono::{SecondsFormat, Utc};
use log::{error, info};
use serde_json::{Map, Value};

/// The request handler. Holds the injected store and nothing else, so one
/// instance serves every invocation of the process.
pub struct UserHandler<S> {
    store: S,
}

impl<S: UserStore> UserHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Handles one event and always produces a response; failures are
    /// mapped to status codes here rather than bubbled to the runtime.
    pub async fn handle(&self, event: &Value) -> ApiResponse {
        match self.run(event).await {
            Ok(response) => response,
            Err(err) => {
                error!("request failed: {err}");
                err.into_response()
            }
        }
    }

    async fn run(&self, event: &Value) -> Result<ApiResponse, HandlerError> {
        let body = extract_body(event)?;
        let (user_id, fields) = split_user_id(body)?;

        let records = self.store.query_by_user(&user_id).await?;
        if records.is_empty() {
            return Err(HandlerError::NotFound);
        }

        if fields.is_empty() {
            self.delete_all(&user_id, &records).await
        } else {
            self.update_first(&records, fields).await
        }
    }

    /// One delete per record, awaited in turn. No rollback: a failure
    /// part-way through leaves the earlier deletes applied.
    async fn delete_all(
        &self,
        user_id: &Value,
        records: &[Record],
    ) -> Result<ApiResponse, HandlerError> {
        for record in records {
            self.store.delete(&RecordKey::of(record)).await?;
        }

        info!("deleted {} record(s)", records.len());
        Ok(ApiResponse::deleted(records.len(), user_id))
    }

    /// Updates exactly one record: the first one the query returned. Store
    /// order is unspecified when several records share the partition key.
    async fn update_first(
        &self,
        records: &[Record],
        fields: Map<String, Value>,
    ) -> Result<ApiResponse, HandlerError> {
        let target = &records[0];

        let mut updates = fields;
        updates.insert("updatedAt".to_string(), Value::String(now_iso8601()));

        let updated = self.store.update(&RecordKey::of(target), updates).await?;

        info!("updated one record");
        Ok(ApiResponse::updated(&updated))
    }
}

/// Pulls the request body out of the event: a `body` string is parsed as
/// JSON, any other truthy `body` is taken as-is, and an event without a
/// body is itself the body.
fn extract_body(event: &Value) -> Result<Value, HandlerError> {
    match event.get("body") {
        Some(Value::String(raw)) => {
            serde_json::from_str(raw).map_err(|_| HandlerError::InvalidJson)
        }
        Some(body) if !is_falsy(body) => Ok(body.clone()),
        _ => Ok(event.clone()),
    }
}

/// Splits the body into the identifier and the remaining field set. A body
/// that is not an object contributes no keys, so it fails the userId check
/// rather than the JSON check.
fn split_user_id(body: Value) -> Result<(Value, Map<String, Value>), HandlerError> {
    let mut fields = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let user_id = fields.remove(PARTITION_KEY).unwrap_or(Value::Null);
    if is_falsy(&user_id) {
        return Err(HandlerError::MissingUserId);
    }

    Ok((user_id, fields))
}

// JS-style falsiness: null, false, 0, and the empty string all count as
// missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

// Millisecond precision with a Z suffix, e.g. 2024-01-15T09:30:00.000Z.
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
