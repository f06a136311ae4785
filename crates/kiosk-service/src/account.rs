//! Account service: registration, login and the user's sub-collections.

use kiosk_core::error::KioskResult;
use kiosk_core::models::user::{CreateUser, EmbeddedOrder, User};
use kiosk_core::repository::AccountRepository;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ServiceError, require};

/// Account service.
///
/// Generic over the repository implementation so that this layer has no
/// dependency on the database crate.
pub struct AccountService<A: AccountRepository> {
    repo: A,
}

impl<A: AccountRepository> AccountService<A> {
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    /// Register a new user. Returns the generated id.
    pub async fn register(&self, input: CreateUser) -> KioskResult<String> {
        require("email", &input.email)?;
        require("username", &input.username)?;
        require("password", &input.password)?;

        // The unique index still backstops concurrent registrations.
        if self.repo.get_by_email(&input.email).await.is_ok() {
            return Err(ServiceError::EmailTaken(input.email).into());
        }

        let email = input.email.clone();
        let id = self.repo.create(input).await?;
        info!(user_id = %id, %email, "Registered user");
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> KioskResult<User> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> KioskResult<User> {
        self.repo.get_by_email(email).await
    }

    pub async fn list(&self) -> KioskResult<Vec<User>> {
        self.repo.list().await
    }

    pub async fn login(&self, email: &str, password: &str) -> KioskResult<User> {
        self.repo.login(email, password).await
    }

    pub async fn add_favorite(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        require("productId", product_id)?;
        self.repo.add_to_favorites(user_id, product_id).await
    }

    pub async fn remove_favorite(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        self.repo.remove_from_favorites(user_id, product_id).await
    }

    pub async fn favorites(&self, user_id: &str) -> KioskResult<Vec<String>> {
        self.repo.get_favorites(user_id).await
    }

    pub async fn add_to_cart(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        require("productId", product_id)?;
        self.repo.add_to_cart(user_id, product_id).await
    }

    pub async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        self.repo.remove_from_cart(user_id, product_id).await
    }

    pub async fn replace_cart(&self, user_id: &str, cart: Vec<String>) -> KioskResult<()> {
        self.repo.update_cart(user_id, cart).await
    }

    pub async fn cart(&self, user_id: &str) -> KioskResult<Vec<String>> {
        self.repo.get_cart(user_id).await
    }

    /// Append an order summary to the user's history and return it.
    pub async fn place_order(
        &self,
        user_id: &str,
        products: Vec<String>,
        total: i64,
    ) -> KioskResult<EmbeddedOrder> {
        if products.is_empty() {
            return Err(ServiceError::EmptyOrder.into());
        }

        let order = EmbeddedOrder {
            id: Uuid::new_v4().to_string(),
            products,
            total,
        };
        debug!(%user_id, order_id = %order.id, "Placing embedded order");
        self.repo.append_order(user_id, order.clone()).await?;
        Ok(order)
    }

    pub async fn orders(&self, user_id: &str) -> KioskResult<Vec<EmbeddedOrder>> {
        self.repo.get_orders(user_id).await
    }
}
