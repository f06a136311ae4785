//! Application state shared across handlers.

use std::sync::Arc;

use kiosk_db::{SurrealAccountRepository, SurrealOrderRepository, SurrealProductRepository};
use kiosk_service::{AccountService, CatalogService, OrderService};
use surrealdb::{Connection, Surreal};

use crate::config::ServerConfig;

pub type Accounts<C> = AccountService<SurrealAccountRepository<C>>;
pub type Orders<C> = OrderService<SurrealOrderRepository<C>>;
pub type Catalog<C> = CatalogService<SurrealProductRepository<C>>;

/// Services wired over one store handle.
pub struct AppState<C: Connection> {
    inner: Arc<AppStateInner<C>>,
}

struct AppStateInner<C: Connection> {
    accounts: Accounts<C>,
    orders: Orders<C>,
    catalog: Catalog<C>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, config: &ServerConfig) -> Self {
        let account_repo = match &config.admin_bypass {
            Some(bypass) => SurrealAccountRepository::with_admin_bypass(db.clone(), bypass.clone()),
            None => SurrealAccountRepository::new(db.clone()),
        };
        let order_repo = SurrealOrderRepository::with_tracking(db.clone(), config.order_tracking);
        let product_repo = SurrealProductRepository::with_decode_policy(db, config.catalog_decode);

        Self {
            inner: Arc::new(AppStateInner {
                accounts: AccountService::new(account_repo),
                orders: OrderService::new(order_repo, config.orders.clone()),
                catalog: CatalogService::new(product_repo),
            }),
        }
    }

    pub fn accounts(&self) -> &Accounts<C> {
        &self.inner.accounts
    }

    pub fn orders(&self) -> &Orders<C> {
        &self.inner.orders
    }

    pub fn catalog(&self) -> &Catalog<C> {
        &self.inner.catalog
    }
}
