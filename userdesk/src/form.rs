//! Edit/validate/submit state machine behind the record form.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{Field, UserId, UserRecord};
use crate::error::ApiError;
use crate::store::UserStore;
use crate::validation::{validate, FieldErrors};

/// Lifecycle of a [`UserForm`].
///
/// `Blocked` and `Failed` are passed through on the way back to `Editing`;
/// after a call returns the form is in `Editing`, `Submitting` or
/// `Succeeded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Validating,
    Blocked,
    Submitting,
    Failed,
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldEditError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("{0} is assigned by the server and cannot be edited")]
    ReadOnly(String),
    #[error("the form has already been submitted")]
    Closed,
}

/// Why `begin_submit` did not produce a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("please fix the highlighted fields")]
    Invalid(FieldErrors),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form has already been submitted")]
    Closed,
    #[error("no submission is in flight")]
    NotInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(UserRecord),
    Failed(ApiError),
    Rejected(SubmitRejected),
}

#[derive(Debug, Clone)]
enum SubmitOp {
    Create(UserRecord),
    Update(UserId, UserRecord),
}

/// A validated submission, detached from the form so it can run elsewhere.
pub struct PendingSubmit {
    store: Arc<dyn UserStore>,
    op: SubmitOp,
}

impl PendingSubmit {
    pub fn is_create(&self) -> bool {
        matches!(self.op, SubmitOp::Create(_))
    }

    /// Performs the create or update round trip.
    pub async fn run(self) -> Result<UserRecord, ApiError> {
        match &self.op {
            SubmitOp::Create(record) => self.store.create(record).await,
            SubmitOp::Update(id, record) => self.store.update(id, record).await,
        }
    }
}

/// Owns one draft record and its field errors for the lifetime of a form.
pub struct UserForm {
    store: Arc<dyn UserStore>,
    draft: UserRecord,
    errors: FieldErrors,
    state: FormState,
    submit_error: Option<ApiError>,
}

impl UserForm {
    /// Empty draft for the create flow.
    pub fn create(store: Arc<dyn UserStore>) -> Self {
        Self::with_draft(store, UserRecord::default())
    }

    /// Draft seeded from an existing record for the edit flow.
    pub fn edit(store: Arc<dyn UserStore>, record: UserRecord) -> Self {
        Self::with_draft(store, record)
    }

    /// Fetches `id` and opens it for editing.
    pub async fn load(store: Arc<dyn UserStore>, id: &UserId) -> Result<Self, ApiError> {
        let record = store.get_by_id(id).await?;
        Ok(Self::edit(store, record))
    }

    fn with_draft(store: Arc<dyn UserStore>, draft: UserRecord) -> Self {
        Self {
            store,
            draft,
            errors: FieldErrors::default(),
            state: FormState::Editing,
            submit_error: None,
        }
    }

    pub fn draft(&self) -> &UserRecord {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// The failure of the last submission, until the next one starts.
    pub fn submit_error(&self) -> Option<&ApiError> {
        self.submit_error.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.draft.is_new()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Updates the draft from a form path such as `email` or
    /// `address.street`.
    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> Result<(), FieldEditError> {
        match Field::from_path(path) {
            Some(field) => self.set(field, value),
            None if matches!(path, "id" | "created_at" | "updated_at") => {
                Err(FieldEditError::ReadOnly(path.to_string()))
            }
            None => Err(FieldEditError::UnknownField(path.to_string())),
        }
    }

    /// Updates one field and drops its error, leaving other errors as they
    /// are.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), FieldEditError> {
        if self.state == FormState::Succeeded {
            return Err(FieldEditError::Closed);
        }
        self.draft.set_value(field, value.into());
        self.errors.remove(field);
        Ok(())
    }

    /// Validates the draft and, if it passes, moves to `Submitting` and
    /// returns the request to run.
    ///
    /// Does nothing while a submission is in flight.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitRejected> {
        match self.state {
            FormState::Submitting => return Err(SubmitRejected::InFlight),
            FormState::Succeeded => return Err(SubmitRejected::Closed),
            _ => {}
        }

        self.transition(FormState::Validating);
        self.submit_error = None;
        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            self.transition(FormState::Blocked);
            self.transition(FormState::Editing);
            return Err(SubmitRejected::Invalid(self.errors.clone()));
        }

        let op = match &self.draft.id {
            Some(id) => SubmitOp::Update(id.clone(), self.draft.clone()),
            None => SubmitOp::Create(self.draft.clone()),
        };
        self.transition(FormState::Submitting);
        Ok(PendingSubmit {
            store: Arc::clone(&self.store),
            op,
        })
    }

    /// Applies the result of the in-flight submission.
    pub fn finish_submit(&mut self, result: Result<UserRecord, ApiError>) -> SubmitOutcome {
        if self.state != FormState::Submitting {
            tracing::warn!("ignoring submit result in state {:?}", self.state);
            return SubmitOutcome::Rejected(SubmitRejected::NotInFlight);
        }

        match result {
            Ok(saved) => {
                self.transition(FormState::Succeeded);
                self.draft = saved.clone();
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                self.transition(FormState::Failed);
                self.submit_error = Some(e.clone());
                self.transition(FormState::Editing);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validates and, if valid, creates or updates the record.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(rejected) => return SubmitOutcome::Rejected(rejected),
        };
        let result = pending.run().await;
        self.finish_submit(result)
    }

    fn transition(&mut self, next: FormState) {
        tracing::trace!("form {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
