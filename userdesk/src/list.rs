//! The dashboard's record collection, kept in line with the server.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{UserId, UserRecord};
use crate::error::ApiError;
use crate::store::UserStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("another request is already in flight")]
    Busy,
    #[error("no removal is awaiting confirmation")]
    NothingToConfirm,
    #[error("result does not match the request in flight")]
    NotInFlight,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InFlight {
    Refresh,
    Fetch(UserId),
    Delete(UserId),
}

pub struct PendingRefresh {
    store: Arc<dyn UserStore>,
}

impl PendingRefresh {
    pub async fn run(self) -> Result<Vec<UserRecord>, ApiError> {
        self.store.list_all().await
    }
}

pub struct PendingFetch {
    store: Arc<dyn UserStore>,
    id: UserId,
}

impl PendingFetch {
    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub async fn run(self) -> Result<UserRecord, ApiError> {
        self.store.get_by_id(&self.id).await
    }
}

pub struct PendingDelete {
    store: Arc<dyn UserStore>,
    id: UserId,
}

impl PendingDelete {
    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub async fn run(self) -> Result<(), ApiError> {
        self.store.delete(&self.id).await
    }
}

/// Ordered user records, unique by id, as last reported by the server.
///
/// The collection only changes in response to a successful server call:
/// a refresh replaces it, a confirmed delete prunes one id, and fetched or
/// saved records are upserted.
pub struct UserList {
    store: Arc<dyn UserStore>,
    users: Vec<UserRecord>,
    in_flight: Option<InFlight>,
    pending_removal: Option<UserId>,
    last_error: Option<(InFlight, ApiError)>,
}

impl UserList {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            users: Vec::new(),
            in_flight: None,
            pending_removal: None,
            last_error: None,
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id.as_ref() == Some(id))
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight == Some(InFlight::Refresh)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id currently being deleted, if any.
    pub fn deleting(&self) -> Option<&UserId> {
        match &self.in_flight {
            Some(InFlight::Delete(id)) => Some(id),
            _ => None,
        }
    }

    /// Failure of the most recent request, until the next one starts.
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref().map(|(_, error)| error)
    }

    /// Whether the most recent request was a refresh that failed.
    pub fn refresh_failed(&self) -> bool {
        matches!(self.last_error, Some((InFlight::Refresh, _)))
    }

    pub fn pending_removal(&self) -> Option<&UserId> {
        self.pending_removal.as_ref()
    }

    fn start(&mut self, request: InFlight) -> Result<(), ListError> {
        if let Some(current) = &self.in_flight {
            tracing::debug!("refusing {:?} while {:?} is in flight", request, current);
            return Err(ListError::Busy);
        }
        self.in_flight = Some(request);
        self.last_error = None;
        Ok(())
    }

    /// Ends `request`. Completions of anything else leave the guard up.
    fn finish(&mut self, request: &InFlight) -> Result<(), ListError> {
        if self.in_flight.as_ref() != Some(request) {
            tracing::warn!(
                "ignoring completion of {:?} while {:?} is in flight",
                request,
                self.in_flight
            );
            return Err(ListError::NotInFlight);
        }
        self.in_flight = None;
        Ok(())
    }

    fn record_error(&mut self, request: InFlight, error: &ApiError) {
        tracing::warn!("users request {:?} failed: {}", request, error);
        self.last_error = Some((request, error.clone()));
    }

    pub fn begin_refresh(&mut self) -> Result<PendingRefresh, ListError> {
        self.start(InFlight::Refresh)?;
        Ok(PendingRefresh {
            store: Arc::clone(&self.store),
        })
    }

    /// Replaces the whole collection on success; leaves it untouched on
    /// failure.
    pub fn finish_refresh(&mut self, result: Result<Vec<UserRecord>, ApiError>) -> Result<(), ListError> {
        self.finish(&InFlight::Refresh)?;
        match result {
            Ok(users) => {
                self.users = dedup_by_id(users);
                Ok(())
            }
            Err(e) => {
                self.record_error(InFlight::Refresh, &e);
                Err(e.into())
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ListError> {
        let pending = self.begin_refresh()?;
        let result = pending.run().await;
        self.finish_refresh(result)
    }

    pub fn begin_fetch(&mut self, id: UserId) -> Result<PendingFetch, ListError> {
        self.start(InFlight::Fetch(id.clone()))?;
        Ok(PendingFetch {
            store: Arc::clone(&self.store),
            id,
        })
    }

    pub fn finish_fetch(
        &mut self,
        id: &UserId,
        result: Result<UserRecord, ApiError>,
    ) -> Result<UserRecord, ListError> {
        let request = InFlight::Fetch(id.clone());
        self.finish(&request)?;
        match result {
            Ok(record) => {
                self.upsert(record.clone());
                Ok(record)
            }
            Err(e) => {
                self.record_error(request, &e);
                Err(e.into())
            }
        }
    }

    /// Loads one record for a detail view and reconciles it into the list.
    pub async fn fetch(&mut self, id: UserId) -> Result<UserRecord, ListError> {
        let pending = self.begin_fetch(id)?;
        let id = pending.id().clone();
        let result = pending.run().await;
        self.finish_fetch(&id, result)
    }

    /// Replaces the record with the same id, or appends it.
    ///
    /// Used for records the server returned from a create or update.
    pub fn upsert(&mut self, record: UserRecord) {
        let Some(id) = record.id.clone() else {
            tracing::warn!("ignoring record without id");
            return;
        };
        match self.users.iter_mut().find(|user| user.id.as_ref() == Some(&id)) {
            Some(existing) => *existing = record,
            None => self.users.push(record),
        }
    }

    /// Marks `id` for removal. Nothing is sent until
    /// [`confirm_removal`](Self::confirm_removal).
    pub fn request_removal(&mut self, id: UserId) {
        self.pending_removal = Some(id);
    }

    pub fn cancel_removal(&mut self) -> Option<UserId> {
        self.pending_removal.take()
    }

    /// Turns the confirmed removal into a delete request.
    ///
    /// The record stays in the collection until
    /// [`finish_removal`](Self::finish_removal) sees the server's answer.
    pub fn confirm_removal(&mut self) -> Result<PendingDelete, ListError> {
        let id = self.pending_removal.clone().ok_or(ListError::NothingToConfirm)?;
        self.start(InFlight::Delete(id.clone()))?;
        self.pending_removal = None;
        Ok(PendingDelete {
            store: Arc::clone(&self.store),
            id,
        })
    }

    pub fn finish_removal(&mut self, id: &UserId, result: Result<(), ApiError>) -> Result<(), ListError> {
        let request = InFlight::Delete(id.clone());
        self.finish(&request)?;
        match result {
            Ok(()) => {
                self.users.retain(|user| user.id.as_ref() != Some(id));
                Ok(())
            }
            Err(e) => {
                self.record_error(request, &e);
                Err(e.into())
            }
        }
    }

    /// Deletes `id` if `confirm` approves it.
    pub async fn remove<F>(&mut self, id: UserId, confirm: F) -> Result<RemovalOutcome, ListError>
    where
        F: FnOnce(&UserId) -> bool,
    {
        if self.is_busy() {
            return Err(ListError::Busy);
        }
        if !confirm(&id) {
            return Ok(RemovalOutcome::Cancelled);
        }

        self.request_removal(id);
        let pending = self.confirm_removal()?;
        let id = pending.id().clone();
        let result = pending.run().await;
        self.finish_removal(&id, result)?;
        Ok(RemovalOutcome::Removed)
    }
}

fn dedup_by_id(users: Vec<UserRecord>) -> Vec<UserRecord> {
    let mut seen = HashSet::new();
    users
        .into_iter()
        .filter(|user| match &user.id {
            Some(id) if !seen.insert(id.clone()) => {
                tracing::warn!("dropping duplicate user {} from list response", id);
                false
            }
            _ => true,
        })
        .collect()
}
