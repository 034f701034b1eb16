//! Record lifecycle core for the userdesk client.
//!
//! Validation of draft records, the edit/submit state machine behind the
//! record form, the HTTP client with its normalized error model, and the
//! reconciliation of the dashboard's record list with the server.

mod client;
pub mod domain;
mod error;
mod form;
mod list;
pub mod store;
pub mod validation;

pub use client::*;
pub use domain::{Address, Field, UserId, UserRecord};
pub use error::*;
pub use form::*;
pub use list::*;
pub use store::{InMemoryUserStore, UserStore};
pub use validation::{validate, FieldErrors};
