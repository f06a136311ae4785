//! Domain models for Kiosk.

pub mod order;
pub mod product;
pub mod user;
