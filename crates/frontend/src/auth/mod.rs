pub mod context;
pub mod error_handler;

pub use context::{ApiServices, ServicesProvider, use_services};
