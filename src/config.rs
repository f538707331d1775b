use std::env;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TABLE_NAME: &str = "users";

/// Environment configuration. Read once at startup and treated as
/// immutable for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub table_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}
