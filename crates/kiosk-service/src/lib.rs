//! Kiosk services: account, order and catalog orchestration on top of the
//! repository traits.

pub mod account;
pub mod catalog;
pub mod config;
pub mod error;
pub mod order;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use config::OrderServiceConfig;
pub use error::ServiceError;
pub use order::{CreateOrderInput, OrderService};
