pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod store;

// Re-exports
pub use config::Config;
pub use error::HandlerError;
pub use handler::UserHandler;
pub use response::ApiResponse;
pub use store::{DynamoStore, Record, RecordKey, UserStore};
