//! Layered application settings

pub mod settings;

pub use settings::{AppConfig, CorsConfig, MailConfig, ServerConfig, DEFAULT_ADMIN_ADDRESS};
