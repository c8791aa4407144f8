// Domain layer modules
pub mod api_gateway;
pub mod todo_item;

// Re-exports
pub use api_gateway::{ApiErrorBody, ApiGatewayEvent, ApiGatewayResponse};
pub use todo_item::{NewTodo, TodoItem, TodoUpdate, TodoValidationError};
