//! Integration tests for the catalog service.

use kiosk_core::error::KioskError;
use kiosk_core::models::product::CreateProduct;
use kiosk_db::SurrealProductRepository;
use kiosk_service::CatalogService;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup() -> CatalogService<SurrealProductRepository<Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    kiosk_db::run_migrations(&db).await.unwrap();
    CatalogService::new(SurrealProductRepository::new(db))
}

fn product(name: &str, category: &str) -> CreateProduct {
    CreateProduct {
        name: name.into(),
        category: category.into(),
        price: 25,
    }
}

#[tokio::test]
async fn created_category_matches_any_casing() {
    let service = setup().await;
    service.create(product("Cap", "hats")).await.unwrap();
    service.create(product("Fedora", "HATS")).await.unwrap();

    let hats = service.list(Some("Hats")).await.unwrap();
    let names: Vec<_> = hats.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Cap", "Fedora"]);
    assert!(hats.iter().all(|p| p.category == "Hats"));
}

#[tokio::test]
async fn create_validates_name_and_category() {
    let service = setup().await;

    let err = service.create(product("", "Hats")).await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));

    let err = service.create(product("Cap", "  ")).await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));

    assert!(service.list(None).await.unwrap().is_empty());
}
