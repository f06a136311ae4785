//! Catalog service.

use kiosk_core::error::KioskResult;
use kiosk_core::models::product::{CreateProduct, Product, normalize_category};
use kiosk_core::repository::ProductRepository;
use tracing::info;

use crate::error::require;

pub struct CatalogService<P: ProductRepository> {
    repo: P,
}

impl<P: ProductRepository> CatalogService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Add a product. The category is stored in normalized form so that
    /// category filters match it regardless of the casing it arrived in.
    pub async fn create(&self, mut input: CreateProduct) -> KioskResult<String> {
        require("name", &input.name)?;
        require("category", &input.category)?;
        input.category = normalize_category(input.category.trim());

        let name = input.name.clone();
        let id = self.repo.create(input).await?;
        info!(product_id = %id, %name, "Added product");
        Ok(id)
    }

    pub async fn list(&self, category: Option<&str>) -> KioskResult<Vec<Product>> {
        self.repo.get_all(category).await
    }
}
