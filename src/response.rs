use crate::store::Record;
use serde::Serialize;
use serde_json::{json, Value};

/// Function-URL style response: a status code plus a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    pub fn message(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(status_code, json!({ "message": message.into() }))
    }

    pub fn deleted(count: usize, user_id: &Value) -> Self {
        Self::message(
            200,
            format!("Deleted {count} item(s) for userId {}", display(user_id)),
        )
    }

    pub fn updated(item: &Record) -> Self {
        Self::new(
            200,
            json!({ "message": "User updated successfully", "updatedItem": item }),
        )
    }
}

// String identifiers render without quotes; anything else in JSON form.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
