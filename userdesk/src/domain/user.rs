use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{timestamp, Field};

/// Server-assigned, opaque record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}

/// A user record as stored by the users API.
///
/// A record is either new (`id` and `created_at` absent) or persisted (both
/// set by the server). Neither is ever edited on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: Address,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl UserRecord {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Company => &self.company,
            Field::Street => &self.address.street,
            Field::City => &self.address.city,
            Field::Zip => &self.address.zip,
        }
    }

    pub fn set_value(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Company => &mut self.company,
            Field::Street => &mut self.address.street,
            Field::City => &mut self.address.city,
            Field::Zip => &mut self.address.zip,
        };
        *slot = value;
    }
}

/// Request body for create and update: the record minus server-owned fields.
#[derive(Debug, Serialize)]
pub(crate) struct UserPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub company: &'a str,
    pub address: &'a Address,
}

impl<'a> From<&'a UserRecord> for UserPayload<'a> {
    fn from(record: &'a UserRecord) -> Self {
        Self {
            name: &record.name,
            email: &record.email,
            phone: &record.phone,
            company: &record.company,
            address: &record.address,
        }
    }
}
