// Infrastructure layer modules
pub mod config;
pub mod lambda_http_adapter;
pub mod logging;
pub mod todo_repository;

// Re-exports
pub use config::{DynamoDbConfig, DynamoDbConfigError};
pub use lambda_http_adapter::{into_api_gateway_event, into_http_response};
pub use logging::init_logging;
pub use todo_repository::{DynamoTodoRepository, RepositoryError, TodoRepository};
