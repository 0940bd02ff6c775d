use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::{
    repo::UserStore,
    repo_types::{StoreError, UserPatch, UserRecord},
};

/// In-process user table with the same atomic unique-insert behaviour as the
/// Postgres store. Test only.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    next_id: i32,
    by_email: HashMap<String, UserRecord>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().by_email.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, email: &str, hash: &str) -> Result<UserRecord, StoreError> {
        let mut table = self.inner.lock().unwrap();
        if table.by_email.contains_key(email) {
            return Err(StoreError::DuplicateKey);
        }
        table.next_id += 1;
        let now = OffsetDateTime::now_utc();
        let user = UserRecord {
            id: table.next_id,
            email: email.to_string(),
            hash: hash.to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        table.by_email.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        let table = self.inner.lock().unwrap();
        table.by_email.get(email).cloned().ok_or(StoreError::NotFound)
    }

    async fn find_user_by_id(&self, id: i32) -> Result<UserRecord, StoreError> {
        let table = self.inner.lock().unwrap();
        table
            .by_email
            .values()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_user(&self, id: i32, patch: &UserPatch) -> Result<UserRecord, StoreError> {
        let mut table = self.inner.lock().unwrap();
        let current = table
            .by_email
            .values()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        if let Some(email) = &patch.email {
            if *email != current.email && table.by_email.contains_key(email) {
                return Err(StoreError::DuplicateKey);
            }
        }

        let mut updated = current.clone();
        if let Some(email) = &patch.email {
            updated.email = email.clone();
        }
        if let Some(first) = &patch.first_name {
            updated.first_name = Some(first.clone());
        }
        if let Some(last) = &patch.last_name {
            updated.last_name = Some(last.clone());
        }
        updated.updated_at = OffsetDateTime::now_utc();

        table.by_email.remove(&current.email);
        table.by_email.insert(updated.email.clone(), updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_by_email_and_id() {
        let store = MemoryUserStore::new();
        let created = store.create_user("a@b.io", "h").await.expect("create");
        assert_eq!(created.id, 1);

        let by_email = store.find_user_by_email("a@b.io").await.expect("by email");
        assert_eq!(by_email.id, created.id);
        let by_id = store.find_user_by_id(created.id).await.expect("by id");
        assert_eq!(by_id.email, "a@b.io");
    }

    #[tokio::test]
    async fn second_insert_with_same_email_is_duplicate() {
        let store = MemoryUserStore::new();
        store.create_user("a@b.io", "first").await.expect("create");
        let err = store.create_user("a@b.io", "second").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));

        let kept = store.find_user_by_email("a@b.io").await.expect("still there");
        assert_eq!(kept.hash, "first");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn lookups_of_absent_users_are_not_found() {
        let store = MemoryUserStore::new();
        assert!(matches!(
            store.find_user_by_email("nobody@x.com").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.find_user_by_id(42).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn update_rejects_email_owned_by_someone_else() {
        let store = MemoryUserStore::new();
        store.create_user("a@b.io", "h").await.unwrap();
        let bob = store.create_user("bob@b.io", "h").await.unwrap();

        let patch = UserPatch {
            email: Some("a@b.io".into()),
            ..Default::default()
        };
        let err = store.update_user(bob.id, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));
    }
}
