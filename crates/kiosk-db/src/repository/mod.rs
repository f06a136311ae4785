//! SurrealDB repository implementations.

mod account;
mod order;
mod product;

pub use account::{MAX_CONFLICT_RETRIES, SurrealAccountRepository};
pub use order::SurrealOrderRepository;
pub use product::{DecodePolicy, SurrealProductRepository};

use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

/// Generate a fresh record key for a new document.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Validate a caller-supplied identifier and return its canonical form.
pub(crate) fn parse_id(entity: &str, id: &str) -> Result<String, DbError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| DbError::InvalidId {
            entity: entity.into(),
            id: id.into(),
        })
}

/// Re-run `op` while the store reports a retryable write conflict, at most
/// `max_retries` extra times.
pub(crate) async fn retry_on_conflict<T, F, Fut>(max_retries: u32, mut op: F) -> Result<T, DbError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                debug!(attempt, error = %e, "Retrying conflicting write");
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_generated_ids() {
        let id = new_id();
        assert_eq!(parse_id("user", &id).unwrap(), id);
    }

    #[test]
    fn parse_id_canonicalizes_case() {
        let id = "67E55044-10B1-426F-9247-BB680E5FE0C8";
        assert_eq!(
            parse_id("user", id).unwrap(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn parse_id_rejects_garbage() {
        for bad in ["", "u1", "not-a-uuid", "users:abc"] {
            match parse_id("user", bad) {
                Err(DbError::InvalidId { entity, id }) => {
                    assert_eq!(entity, "user");
                    assert_eq!(id, bad);
                }
                other => panic!("expected InvalidId for {bad:?}, got {other:?}"),
            }
        }
    }
}
