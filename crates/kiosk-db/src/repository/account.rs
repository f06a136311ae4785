//! SurrealDB implementation of [`AccountRepository`].
//!
//! Favorites and cart are stored as plain string arrays on the user
//! document and mutated exclusively with single-statement
//! `array::union` / `array::complement` updates, so two requests touching
//! the same user never interleave a read with a write. Missing arrays
//! (documents written before a field existed) read as empty.
//!
//! Credentials are stored and compared verbatim.

use kiosk_core::error::{KioskError, KioskResult};
use kiosk_core::models::user::{AdminBypass, CreateUser, EmbeddedOrder, User};
use kiosk_core::repository::AccountRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, warn};

use super::{new_id, parse_id, retry_on_conflict};
use crate::error::DbError;

/// Extra attempts made when a set mutation hits a store write conflict.
pub const MAX_CONFLICT_RETRIES: u32 = 8;

const ENTITY: &str = "user";

/// DB-side row struct for queries where the record key is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    username: String,
    password: Option<String>,
    favorites: Option<Vec<String>>,
    cart: Option<Vec<String>>,
    orders: Option<Vec<EmbeddedOrderRow>>,
}

/// DB-side row struct that includes the record key via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    email: String,
    username: String,
    password: Option<String>,
    favorites: Option<Vec<String>>,
    cart: Option<Vec<String>>,
    orders: Option<Vec<EmbeddedOrderRow>>,
}

#[derive(Debug, SurrealValue)]
struct EmbeddedOrderRow {
    id: String,
    products: Option<Vec<String>>,
    total: i64,
}

impl From<EmbeddedOrderRow> for EmbeddedOrder {
    fn from(row: EmbeddedOrderRow) -> Self {
        EmbeddedOrder {
            id: row.id,
            products: row.products.unwrap_or_default(),
            total: row.total,
        }
    }
}

fn orders_from_rows(rows: Option<Vec<EmbeddedOrderRow>>) -> Vec<EmbeddedOrder> {
    rows.unwrap_or_default().into_iter().map(Into::into).collect()
}

impl UserRow {
    fn into_user(self, id: String) -> User {
        User {
            id,
            email: self.email,
            username: self.username,
            password: self.password.unwrap_or_default(),
            favorites: self.favorites.unwrap_or_default(),
            cart: self.cart.unwrap_or_default(),
            orders: orders_from_rows(self.orders),
        }
    }
}

impl UserRowWithId {
    fn into_user(self) -> User {
        User {
            id: self.record_id,
            email: self.email,
            username: self.username,
            password: self.password.unwrap_or_default(),
            favorites: self.favorites.unwrap_or_default(),
            cart: self.cart.unwrap_or_default(),
            orders: orders_from_rows(self.orders),
        }
    }
}

/// The two set-valued fields of a user document.
#[derive(Debug, Clone, Copy)]
enum SetField {
    Favorites,
    Cart,
}

impl SetField {
    fn column(self) -> &'static str {
        match self {
            SetField::Favorites => "favorites",
            SetField::Cart => "cart",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SetOp {
    Add,
    Remove,
}

fn set_update_query(field: SetField, op: SetOp) -> String {
    let col = field.column();
    let expr = match op {
        SetOp::Add => format!("array::union({col} ?? [], [$product_id])"),
        SetOp::Remove => format!("array::complement({col} ?? [], [$product_id])"),
    };
    format!("UPDATE type::record('users', $id) SET {col} = {expr}")
}

/// Drop repeated entries, keeping the first occurrence of each.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// SurrealDB implementation of the Account repository.
#[derive(Clone)]
pub struct SurrealAccountRepository<C: Connection> {
    db: Surreal<C>,
    /// Fixed administrator login; `None` unless explicitly enabled.
    admin_bypass: Option<AdminBypass>,
}

impl<C: Connection> SurrealAccountRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            admin_bypass: None,
        }
    }

    /// Build a repository whose `login` short-circuits for one fixed
    /// credential pair. Test fixture only; see [`AdminBypass`].
    pub fn with_admin_bypass(db: Surreal<C>, bypass: AdminBypass) -> Self {
        Self {
            db,
            admin_bypass: Some(bypass),
        }
    }

    async fn fetch_row(&self, id: &str) -> Result<UserRow, DbError> {
        let id = parse_id(ENTITY, id)?;

        let mut result = self
            .db
            .query("SELECT * FROM type::record('users', $id)")
            .bind(("id", id.clone()))
            .await?;

        let rows: Vec<UserRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    /// Run one atomic update statement against a user document, failing
    /// with `NotFound` when no document matched.
    async fn update_once(&self, query: &str, id: &str, product_id: &str) -> Result<(), DbError> {
        let mut result = self
            .db
            .query(query)
            .bind(("id", id.to_string()))
            .bind(("product_id", product_id.to_string()))
            .await?
            .check()?;
        let rows: Vec<UserRow> = result.take(0)?;
        if rows.is_empty() {
            return Err(DbError::not_found(ENTITY, id));
        }
        Ok(())
    }

    async fn mutate_set(
        &self,
        field: SetField,
        op: SetOp,
        user_id: &str,
        product_id: &str,
    ) -> KioskResult<()> {
        let id = parse_id(ENTITY, user_id)?;
        let query = set_update_query(field, op);

        debug!(user_id = %id, product_id, field = field.column(), ?op, "Updating user set");

        let (query, id) = (query.as_str(), id.as_str());
        retry_on_conflict(MAX_CONFLICT_RETRIES, move || self.update_once(query, id, product_id))
            .await?;
        Ok(())
    }
}

impl<C: Connection> AccountRepository for SurrealAccountRepository<C> {
    async fn create(&self, input: CreateUser) -> KioskResult<String> {
        let id = new_id();

        debug!(user_id = %id, email = %input.email, "Creating user");

        self.db
            .query(
                "CREATE type::record('users', $id) SET \
                 email = $email, \
                 username = $username, \
                 password = $password, \
                 favorites = [], \
                 cart = [], \
                 orders = [] \
                 RETURN NONE",
            )
            .bind(("id", id.clone()))
            .bind(("email", input.email))
            .bind(("username", input.username))
            .bind(("password", input.password))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> KioskResult<User> {
        let id = parse_id(ENTITY, id)?;
        let row = self.fetch_row(&id).await?;
        Ok(row.into_user(id))
    }

    async fn get_by_email(&self, email: &str) -> KioskResult<User> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM users WHERE email = $email")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found(ENTITY, format!("email={email}")))?;

        Ok(row.into_user())
    }

    async fn list(&self) -> KioskResult<Vec<User>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM users ORDER BY email ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().map(UserRowWithId::into_user).collect())
    }

    async fn login(&self, email: &str, password: &str) -> KioskResult<User> {
        if let Some(bypass) = &self.admin_bypass
            && bypass.matches(email, password)
        {
            warn!(email, "Administrator login bypass used");
            return Ok(bypass.to_user());
        }

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM users \
                 WHERE email = $email AND password = $password",
            )
            .bind(("email", email.to_string()))
            .bind(("password", password.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .map(UserRowWithId::into_user)
            .ok_or_else(|| KioskError::AuthFailed {
                reason: "invalid email or password".into(),
            })
    }

    async fn add_to_favorites(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        self.mutate_set(SetField::Favorites, SetOp::Add, user_id, product_id)
            .await
    }

    async fn remove_from_favorites(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        self.mutate_set(SetField::Favorites, SetOp::Remove, user_id, product_id)
            .await
    }

    async fn get_favorites(&self, user_id: &str) -> KioskResult<Vec<String>> {
        let row = self.fetch_row(user_id).await?;
        Ok(row.favorites.unwrap_or_default())
    }

    async fn add_to_cart(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        self.mutate_set(SetField::Cart, SetOp::Add, user_id, product_id)
            .await
    }

    async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> KioskResult<()> {
        self.mutate_set(SetField::Cart, SetOp::Remove, user_id, product_id)
            .await
    }

    async fn update_cart(&self, user_id: &str, cart: Vec<String>) -> KioskResult<()> {
        let id = parse_id(ENTITY, user_id)?;
        let cart = dedup_preserving_order(cart);

        debug!(user_id = %id, items = cart.len(), "Replacing cart");

        let mut result = self
            .db
            .query("UPDATE type::record('users', $id) SET cart = $cart")
            .bind(("id", id.clone()))
            .bind(("cart", cart))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::not_found(ENTITY, id).into());
        }
        Ok(())
    }

    async fn get_cart(&self, user_id: &str) -> KioskResult<Vec<String>> {
        let row = self.fetch_row(user_id).await?;
        Ok(row.cart.unwrap_or_default())
    }

    async fn append_order(&self, user_id: &str, order: EmbeddedOrder) -> KioskResult<()> {
        let id = parse_id(ENTITY, user_id)?;

        debug!(user_id = %id, order_id = %order.id, "Appending embedded order");

        let mut result = self
            .db
            .query(
                "UPDATE type::record('users', $id) SET \
                 orders = array::append(orders ?? [], { \
                     id: $order_id, products: $products, total: $total \
                 })",
            )
            .bind(("id", id.clone()))
            .bind(("order_id", order.id))
            .bind(("products", order.products))
            .bind(("total", order.total))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::not_found(ENTITY, id).into());
        }
        Ok(())
    }

    async fn get_orders(&self, user_id: &str) -> KioskResult<Vec<EmbeddedOrder>> {
        let row = self.fetch_row(user_id).await?;
        Ok(orders_from_rows(row.orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_queries_are_single_statements() {
        let add = set_update_query(SetField::Favorites, SetOp::Add);
        assert_eq!(
            add,
            "UPDATE type::record('users', $id) SET favorites = \
             array::union(favorites ?? [], [$product_id])"
        );
        let remove = set_update_query(SetField::Cart, SetOp::Remove);
        assert!(remove.contains("cart = array::complement(cart ?? [], [$product_id])"));
        assert!(!remove.contains(';'));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let items = vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()];
        assert_eq!(dedup_preserving_order(items), vec!["b", "a", "c"]);
    }

    #[test]
    fn missing_arrays_become_empty() {
        let row = UserRow {
            email: "a@example.com".into(),
            username: "a".into(),
            password: None,
            favorites: None,
            cart: None,
            orders: None,
        };
        let user = row.into_user("id".into());
        assert!(user.favorites.is_empty());
        assert!(user.cart.is_empty());
        assert!(user.orders.is_empty());
        assert_eq!(user.password, "");
    }
}
