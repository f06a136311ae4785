//! User (account) domain model.
//!
//! A user owns three sub-collections: `favorites` and `cart` are sets of
//! product ids, `orders` is an append-only history of embedded order
//! summaries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    /// Stored verbatim. Never serialized outward.
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub cart: Vec<String>,
    #[serde(default)]
    pub orders: Vec<EmbeddedOrder>,
}

/// Order summary embedded in the owning user's document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbeddedOrder {
    pub id: String,
    pub products: Vec<String>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Fixed administrator identity returned by `login` without consulting
/// the store.
///
/// This is a known backdoor kept for compatibility with existing test
/// fixtures. Repositories only honour it when explicitly constructed with
/// one, and the server only does so when `KIOSK_ENABLE_ADMIN_BYPASS` is set.
#[derive(Debug, Clone)]
pub struct AdminBypass {
    pub email: String,
    pub password: String,
    pub user_id: String,
    pub username: String,
}

impl AdminBypass {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.user_id.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            password: String::new(),
            favorites: Vec::new(),
            cart: Vec::new(),
            orders: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: "u1".into(),
            email: "a@example.com".into(),
            username: "a".into(),
            password: "hunter2".into(),
            favorites: vec![],
            cart: vec![],
            orders: vec![],
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"favorites\":[]"));
    }

    #[test]
    fn admin_bypass_requires_both_credentials() {
        let bypass = AdminBypass {
            email: "root@example.com".into(),
            password: "letmein".into(),
            user_id: "admin".into(),
            username: "Admin".into(),
        };
        assert!(bypass.matches("root@example.com", "letmein"));
        assert!(!bypass.matches("root@example.com", "wrong"));
        assert!(!bypass.matches("ROOT@example.com", "letmein"));
        assert_eq!(bypass.to_user().id, "admin");
    }
}
