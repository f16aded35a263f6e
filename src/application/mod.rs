// Application layer - Use cases and the ports they depend on
pub mod chart_renderer;
pub mod plot_index;
pub mod plot_service;
pub mod request_validator;
