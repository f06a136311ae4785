//! Kiosk Server: HTTP surface over the account, order and catalog
//! services.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::router;
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
