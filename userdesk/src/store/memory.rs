//! In-process store with the users API's observable behaviour.
//!
//! Backs the terminal client's offline mode and the tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::UserStore;
use crate::domain::{Address, UserId, UserRecord};
use crate::error::ApiError;

/// Shared, cloneable in-memory store.
///
/// Clones share state, so a test can keep a handle for inspection while the
/// form or list owns another.
///
/// ```
/// use userdesk::{ApiError, InMemoryUserStore};
///
/// let store = InMemoryUserStore::new();
/// store.fail_next(ApiError::network());
/// assert_eq!(store.call_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<Mutex<Inner>>,
    calls: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    next_id: u64,
    failures: VecDeque<ApiError>,
}

impl Inner {
    fn position(&self, id: &UserId) -> Result<usize, ApiError> {
        self.users
            .iter()
            .position(|user| user.id.as_ref() == Some(id))
            .ok_or_else(|| ApiError::server(format!("User with ID {} not found", id)))
    }

    fn email_taken(&self, email: &str, except: Option<&UserId>) -> bool {
        self.users
            .iter()
            .any(|user| user.email == email && user.id.as_ref() != except)
    }

    fn insert(&mut self, record: &UserRecord) -> UserRecord {
        self.next_id += 1;
        let now = OffsetDateTime::now_utc();
        let stored = UserRecord {
            id: Some(UserId::new(format!("{:024x}", self.next_id))),
            created_at: Some(now),
            updated_at: Some(now),
            ..record.clone()
        };
        self.users.push(stored.clone());
        stored
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `users`, assigning ids and timestamps the way
    /// the server does on create.
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for user in users {
                inner.insert(&user);
            }
        }
        store
    }

    /// A handful of demo records for offline mode.
    pub fn seeded() -> Self {
        let user = |name: &str, email: &str, phone: &str, company: &str, street: &str, city: &str, zip: &str| {
            UserRecord {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                company: company.to_string(),
                address: Address {
                    street: street.to_string(),
                    city: city.to_string(),
                    zip: zip.to_string(),
                },
                ..Default::default()
            }
        };

        Self::with_users([
            user("John Doe", "john@example.com", "1234567890", "Acme Corp", "123 Main St", "New York", "10001"),
            user("Grace Hopper", "grace@navy.example", "202-555-0147", "US Navy", "1 Compiler Way", "Arlington", "22201"),
            user("Linus Nilsson", "linus@fjord.example", "+46 70 123 45 67", "Fjord AB", "Storgatan 4", "Uppsala", "75320"),
        ])
    }

    /// Number of store operations attempted so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes the next operation fail with `error`. Failures queue up.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().failures.push_back(error);
    }

    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counts the call and hands out the store, unless a failure is queued.
    fn begin_call(&self, call_name: &str) -> Result<MutexGuard<'_, Inner>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.lock();
        if let Some(error) = inner.failures.pop_front() {
            tracing::debug!("injected failure for {}: {}", call_name, error);
            return Err(error);
        }
        Ok(inner)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_all(&self) -> Result<Vec<UserRecord>, ApiError> {
        let inner = self.begin_call("list_all")?;
        Ok(inner.users.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<UserRecord, ApiError> {
        let inner = self.begin_call("get_by_id")?;
        let index = inner.position(id)?;
        Ok(inner.users[index].clone())
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord, ApiError> {
        let mut inner = self.begin_call("create")?;
        if inner.email_taken(&record.email, None) {
            return Err(ApiError::server("User with this email already exists"));
        }
        Ok(inner.insert(record))
    }

    async fn update(&self, id: &UserId, record: &UserRecord) -> Result<UserRecord, ApiError> {
        let mut inner = self.begin_call("update")?;
        let index = inner.position(id)?;
        if inner.email_taken(&record.email, Some(id)) {
            return Err(ApiError::server("User with this email already exists"));
        }

        let existing = &mut inner.users[index];
        *existing = UserRecord {
            id: existing.id.clone(),
            created_at: existing.created_at,
            updated_at: Some(OffsetDateTime::now_utc()),
            ..record.clone()
        };
        Ok(existing.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let mut inner = self.begin_call("delete")?;
        let index = inner.position(id)?;
        inner.users.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: &str) -> UserRecord {
        UserRecord {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let store = InMemoryUserStore::new();
        let created = store.create(&record("Ada", "ada@example.com")).await.unwrap();

        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.snapshot(), vec![created]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryUserStore::with_users([record("Ada", "ada@example.com")]);
        let err = store
            .create(&record("Other Ada", "ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::server("User with this email already exists"));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_identity_and_creation_time() {
        let store = InMemoryUserStore::with_users([record("Ada", "ada@example.com")]);
        let original = store.snapshot().remove(0);
        let id = original.id.clone().unwrap();

        let mut changed = original.clone();
        changed.name = "Ada King".to_string();
        changed.id = None;
        changed.created_at = None;
        let updated = store.update(&id, &changed).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "Ada King");
    }

    #[tokio::test]
    async fn unknown_id_is_a_server_error() {
        let store = InMemoryUserStore::new();
        let id = UserId::new("missing");

        assert_eq!(
            store.get_by_id(&id).await.unwrap_err(),
            ApiError::server("User with ID missing not found")
        );
        assert!(store.delete(&id).await.is_err());
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let store = InMemoryUserStore::seeded();
        store.fail_next(ApiError::network());
        store.fail_next(ApiError::server("boom"));

        assert_eq!(store.list_all().await.unwrap_err(), ApiError::network());
        assert_eq!(store.list_all().await.unwrap_err(), ApiError::server("boom"));
        assert_eq!(store.list_all().await.unwrap().len(), 3);
        assert_eq!(store.call_count(), 3);
    }
}
