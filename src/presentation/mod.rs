// Presentation layer - HTTP routes and their adapters
pub mod api_error;
pub mod app_state;
pub mod handlers;
pub mod router;
