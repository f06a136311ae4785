//! Integration tests for collection setup using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use surrealdb_types::SurrealValue;

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

#[tokio::test]
async fn migrations_define_every_collection() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    kiosk_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    for table in [kiosk_db::USERS, kiosk_db::ORDERS, kiosk_db::PRODUCTS] {
        assert!(info_str.contains(table), "missing {table} table");
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    kiosk_db::run_migrations(&db).await.unwrap();
    kiosk_db::run_migrations(&db).await.unwrap();

    let mut result = db
        .query("SELECT count() AS total FROM _migration GROUP ALL")
        .await
        .unwrap();
    let rows: Vec<CountRow> = result.take(0).unwrap();
    assert_eq!(
        rows.first().map(|r| r.total),
        Some(u64::from(kiosk_db::latest_version()))
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected_by_index() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    kiosk_db::run_migrations(&db).await.unwrap();

    db.query("CREATE users SET email = 'a@example.com', username = 'a'")
        .await
        .unwrap()
        .check()
        .unwrap();

    let second = db
        .query("CREATE users SET email = 'a@example.com', username = 'b'")
        .await
        .unwrap()
        .check();
    assert!(second.is_err(), "unique email index should reject duplicates");
}
