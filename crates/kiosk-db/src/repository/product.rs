//! SurrealDB implementation of [`ProductRepository`].

use kiosk_core::error::KioskResult;
use kiosk_core::models::product::{CreateProduct, Product, normalize_category};
use kiosk_core::repository::ProductRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::{debug, warn};

use super::new_id;
use crate::error::DbError;

const ENTITY: &str = "product";

/// What to do with catalog documents that do not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Skip the document and log a warning; the rest of the page is
    /// still returned.
    #[default]
    Lenient,
    /// Fail the whole read on the first bad document.
    Strict,
}

impl std::str::FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown decode policy: {other}")),
        }
    }
}

/// Catalog documents are read as loose JSON first so that one drifted
/// document can be rejected without failing the statement.
#[derive(Debug, Deserialize)]
struct ProductDoc {
    record_id: String,
    name: String,
    category: String,
    price: i64,
}

impl From<ProductDoc> for Product {
    fn from(doc: ProductDoc) -> Self {
        Product {
            id: doc.record_id,
            name: doc.name,
            category: doc.category,
            price: doc.price,
        }
    }
}

fn decode_products(
    docs: Vec<serde_json::Value>,
    policy: DecodePolicy,
) -> Result<Vec<Product>, DbError> {
    let mut products = Vec::with_capacity(docs.len());
    for doc in docs {
        let record_id = doc
            .get("record_id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>")
            .to_string();
        match serde_json::from_value::<ProductDoc>(doc) {
            Ok(doc) => products.push(doc.into()),
            Err(e) => match policy {
                DecodePolicy::Lenient => {
                    warn!(product_id = %record_id, error = %e, "Skipping undecodable product");
                }
                DecodePolicy::Strict => {
                    return Err(DbError::decode(ENTITY, format!("{record_id}: {e}")));
                }
            },
        }
    }
    Ok(products)
}

/// SurrealDB implementation of the Product repository.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
    decode_policy: DecodePolicy,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self::with_decode_policy(db, DecodePolicy::default())
    }

    pub fn with_decode_policy(db: Surreal<C>, decode_policy: DecodePolicy) -> Self {
        Self { db, decode_policy }
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, input: CreateProduct) -> KioskResult<String> {
        let id = new_id();

        debug!(product_id = %id, name = %input.name, "Creating product");

        self.db
            .query(
                "CREATE type::record('products', $id) SET \
                 name = $name, \
                 category = $category, \
                 price = $price \
                 RETURN NONE",
            )
            .bind(("id", id.clone()))
            .bind(("name", input.name))
            .bind(("category", input.category))
            .bind(("price", input.price))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(id)
    }

    async fn get_all(&self, category: Option<&str>) -> KioskResult<Vec<Product>> {
        let category = category
            .filter(|c| !c.is_empty())
            .map(normalize_category);

        let mut result = match category {
            Some(category) => {
                debug!(%category, "Listing products by category");
                self.db
                    .query(
                        "SELECT meta::id(id) AS record_id, name, category, price \
                         FROM products WHERE category = $category \
                         ORDER BY name ASC",
                    )
                    .bind(("category", category))
                    .await
            }
            None => {
                self.db
                    .query(
                        "SELECT meta::id(id) AS record_id, name, category, price \
                         FROM products ORDER BY name ASC",
                    )
                    .await
            }
        }
        .map_err(DbError::from)?;

        let docs: Vec<serde_json::Value> = result.take(0).map_err(DbError::from)?;
        Ok(decode_products(docs, self.decode_policy)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs() -> Vec<serde_json::Value> {
        vec![
            json!({ "record_id": "a", "name": "Boot", "category": "Shoes", "price": 90 }),
            json!({ "record_id": "b", "name": "Sandal", "category": "Shoes", "price": "free" }),
            json!({ "record_id": "c", "name": "Sneaker", "category": "Shoes", "price": 60 }),
        ]
    }

    #[test]
    fn lenient_skips_bad_documents() {
        let products = decode_products(docs(), DecodePolicy::Lenient).unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn strict_fails_on_first_bad_document() {
        let err = decode_products(docs(), DecodePolicy::Strict).unwrap_err();
        assert!(matches!(err, DbError::Decode { ref reason, .. } if reason.starts_with("b:")));
    }

    #[test]
    fn policy_parses() {
        assert_eq!("Strict".parse(), Ok(DecodePolicy::Strict));
        assert_eq!("lenient".parse(), Ok(DecodePolicy::Lenient));
        assert!("loose".parse::<DecodePolicy>().is_err());
        assert_eq!(DecodePolicy::default(), DecodePolicy::Lenient);
    }
}
