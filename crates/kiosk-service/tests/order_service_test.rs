//! Integration tests for the order service.

use kiosk_core::error::KioskError;
use kiosk_core::models::order::OrderLine;
use kiosk_db::SurrealOrderRepository;
use kiosk_service::{CreateOrderInput, OrderService, OrderServiceConfig};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup(strict_transitions: bool) -> OrderService<SurrealOrderRepository<Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    kiosk_db::run_migrations(&db).await.unwrap();
    OrderService::new(
        SurrealOrderRepository::new(db),
        OrderServiceConfig { strict_transitions },
    )
}

fn input(total_price: Option<i64>) -> CreateOrderInput {
    CreateOrderInput {
        user_id: "u1".into(),
        products: vec![
            OrderLine {
                id: "p1".into(),
                name: "Pen".into(),
                price: 10,
                quantity: 2,
            },
            OrderLine {
                id: "p2".into(),
                name: "Ink".into(),
                price: 4,
                quantity: 1,
            },
        ],
        total_price,
        status: None,
    }
}

#[tokio::test]
async fn total_is_derived_when_absent() {
    let service = setup(false).await;

    let id = service.create(input(None)).await.unwrap();
    let order = service.get(&id).await.unwrap();
    assert_eq!(order.total_price, 24);
    assert_eq!(order.progress.status(), Some("created"));
}

#[tokio::test]
async fn supplied_total_is_stored_as_given() {
    let service = setup(false).await;
    let id = service.create(input(Some(5))).await.unwrap();
    assert_eq!(service.get(&id).await.unwrap().total_price, 5);
}

#[tokio::test]
async fn create_requires_user_id() {
    let service = setup(false).await;
    let mut bad = input(None);
    bad.user_id = String::new();
    let err = service.create(bad).await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));
}

#[tokio::test]
async fn permissive_mode_accepts_any_status() {
    let service = setup(false).await;
    let id = service.create(input(None)).await.unwrap();

    service.update_status(&id, "completed").await.unwrap();
    service.update_status(&id, "created").await.unwrap();
    service.update_status(&id, "lost-in-transit").await.unwrap();
    assert_eq!(
        service.get(&id).await.unwrap().progress.status(),
        Some("lost-in-transit")
    );
}

#[tokio::test]
async fn strict_mode_walks_the_status_machine() {
    let service = setup(true).await;
    let id = service.create(input(None)).await.unwrap();

    let err = service.update_status(&id, "completed").await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));

    service.update_status(&id, "processing").await.unwrap();
    service.update_status(&id, "completed").await.unwrap();

    let err = service.update_status(&id, "cancelled").await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));

    let err = service.update_status(&id, "shipped").await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));

    assert_eq!(
        service.get(&id).await.unwrap().progress.status(),
        Some("completed")
    );
}

#[tokio::test]
async fn strict_mode_rejects_non_initial_create_status() {
    let service = setup(true).await;
    let mut skipping = input(None);
    skipping.status = Some("completed".into());
    let err = service.create(skipping).await.unwrap_err();
    assert!(matches!(err, KioskError::InvalidArgument { .. }));
}

#[tokio::test]
async fn strict_update_on_missing_order_is_not_found() {
    let service = setup(true).await;
    let err = service
        .update_status("67e55044-10b1-426f-9247-bb680e5fe0c8", "processing")
        .await
        .unwrap_err();
    assert!(matches!(err, KioskError::NotFound { .. }));
}

#[tokio::test]
async fn cancel_and_user_listing() {
    let service = setup(false).await;
    let first = service.create(input(None)).await.unwrap();
    let second = service.create(input(None)).await.unwrap();

    assert_eq!(service.get_user_orders("u1").await.unwrap().len(), 2);

    service.cancel(&first).await.unwrap();
    let remaining = service.get_user_orders("u1").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second);

    let err = service.cancel(&first).await.unwrap_err();
    assert!(matches!(err, KioskError::NotFound { .. }));
}
