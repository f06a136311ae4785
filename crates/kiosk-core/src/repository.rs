//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Identifiers cross this boundary
//! as opaque strings; implementations reject malformed ones with
//! [`KioskError::InvalidArgument`](crate::error::KioskError::InvalidArgument).

use crate::error::KioskResult;
use crate::models::{
    order::{NewOrder, Order},
    product::{CreateProduct, Product},
    user::{CreateUser, EmbeddedOrder, User},
};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub trait AccountRepository: Send + Sync {
    /// Insert a user with empty favorites, cart and orders. Returns the
    /// generated id.
    fn create(&self, input: CreateUser) -> impl Future<Output = KioskResult<String>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = KioskResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = KioskResult<User>> + Send;
    fn list(&self) -> impl Future<Output = KioskResult<Vec<User>>> + Send;

    /// Plaintext credential match. Mismatch yields `AuthFailed`.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = KioskResult<User>> + Send;

    /// Idempotent set-add. Adding an existing member is a no-op success.
    fn add_to_favorites(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> impl Future<Output = KioskResult<()>> + Send;
    /// Idempotent set-remove. Removing an absent member is a no-op success.
    fn remove_from_favorites(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> impl Future<Output = KioskResult<()>> + Send;
    fn get_favorites(&self, user_id: &str) -> impl Future<Output = KioskResult<Vec<String>>> + Send;

    fn add_to_cart(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> impl Future<Output = KioskResult<()>> + Send;
    fn remove_from_cart(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> impl Future<Output = KioskResult<()>> + Send;
    /// Replace the whole cart (last writer wins).
    fn update_cart(
        &self,
        user_id: &str,
        cart: Vec<String>,
    ) -> impl Future<Output = KioskResult<()>> + Send;
    fn get_cart(&self, user_id: &str) -> impl Future<Output = KioskResult<Vec<String>>> + Send;

    /// Atomically append to the user's embedded order history.
    fn append_order(
        &self,
        user_id: &str,
        order: EmbeddedOrder,
    ) -> impl Future<Output = KioskResult<()>> + Send;
    fn get_orders(
        &self,
        user_id: &str,
    ) -> impl Future<Output = KioskResult<Vec<EmbeddedOrder>>> + Send;
}

// ---------------------------------------------------------------------------
// Standalone orders
// ---------------------------------------------------------------------------

pub trait OrderRepository: Send + Sync {
    fn create(&self, input: NewOrder) -> impl Future<Output = KioskResult<String>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = KioskResult<Order>> + Send;
    fn get_by_user_id(&self, user_id: &str)
    -> impl Future<Output = KioskResult<Vec<Order>>> + Send;
    fn list(&self) -> impl Future<Output = KioskResult<Vec<Order>>> + Send;

    /// Unconditional status overwrite; any string is accepted.
    fn update_status(&self, id: &str, status: &str)
    -> impl Future<Output = KioskResult<()>> + Send;

    /// Delete the order. Not idempotent: a second call fails with `NotFound`.
    fn cancel(&self, id: &str) -> impl Future<Output = KioskResult<()>> + Send;

    /// Flip the `completed` flag and return the updated order.
    fn toggle_completed(&self, id: &str) -> impl Future<Output = KioskResult<Order>> + Send;
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub trait ProductRepository: Send + Sync {
    fn create(&self, input: CreateProduct) -> impl Future<Output = KioskResult<String>> + Send;

    /// All products sorted by name; `category` is normalized before
    /// matching.
    fn get_all(
        &self,
        category: Option<&str>,
    ) -> impl Future<Output = KioskResult<Vec<Product>>> + Send;
}
