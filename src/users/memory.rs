use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::users::{
    repo::{AccountStore, StoreError},
    repo_types::{NewUser, User},
};

/// In-process store with the same uniqueness rule as the `users` table.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.next_id += 1;
        let row = User {
            id: inner.next_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_profile(&self, id: i64, name: &str, email: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&id) {
            return Ok(false);
        }
        if inner.email_taken(email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }
        if let Some(user) = inner.users.get_mut(&id) {
            user.name = name.to_string();
            user.email = email.to_string();
        }
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryAccountStore::default();
        let a = store.create(new_user("Ann", "ann@test.com")).await.unwrap();
        let b = store.create(new_user("Bob", "bob@test.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryAccountStore::default();
        store.create(new_user("Ann", "ann@test.com")).await.unwrap();
        let err = store.create(new_user("Other", "ann@test.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn update_keeps_email_unique_but_allows_own() {
        let store = MemoryAccountStore::default();
        let ann = store.create(new_user("Ann", "ann@test.com")).await.unwrap();
        store.create(new_user("Bob", "bob@test.com")).await.unwrap();

        assert!(store.update_profile(ann.id, "Ann B", "ann@test.com").await.unwrap());
        let err = store
            .update_profile(ann.id, "Ann", "bob@test.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert!(!store.update_profile(99, "Nobody", "n@test.com").await.unwrap());

        let ann = store.find_by_id(ann.id).await.unwrap().unwrap();
        assert_eq!(ann.name, "Ann B");
        assert_eq!(ann.password_hash, "$2b$04$hash");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = MemoryAccountStore::default();
        let ann = store.create(new_user("Ann", "ann@test.com")).await.unwrap();
        assert!(store.delete(ann.id).await.unwrap());
        assert!(!store.delete(ann.id).await.unwrap());
        assert!(store.find_by_email("ann@test.com").await.unwrap().is_none());
    }
}
