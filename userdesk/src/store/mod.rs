//! The users API as seen by the form and the list.

use async_trait::async_trait;

use crate::domain::{UserId, UserRecord};
use crate::error::ApiError;

mod memory;

pub use memory::InMemoryUserStore;

/// Remote record store. Each method is exactly one round trip and reports
/// every failure as an [`ApiError`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<UserRecord>, ApiError>;

    /// Fails with [`ApiError::Server`] when the id is unknown.
    async fn get_by_id(&self, id: &UserId) -> Result<UserRecord, ApiError>;

    /// Stores a new record. The server assigns `id` and the timestamps;
    /// any of them present on `record` are not sent.
    async fn create(&self, record: &UserRecord) -> Result<UserRecord, ApiError>;

    async fn update(&self, id: &UserId, record: &UserRecord) -> Result<UserRecord, ApiError>;

    async fn delete(&self, id: &UserId) -> Result<(), ApiError>;
}
