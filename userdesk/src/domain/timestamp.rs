//! Serde helpers for server-assigned timestamps.
//!
//! The users API emits offset-less ISO-8601 datetimes
//! (`2024-05-01T10:20:30.123456`), which are UTC. RFC 3339 input is accepted
//! as well; output is always RFC 3339.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    PrimitiveDateTime,
};

pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(raw, &Rfc3339).or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
        )
        .map(PrimitiveDateTime::assume_utc)
    })
}

pub mod option {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::{format_description::well_known::Rfc3339, OffsetDateTime};

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => {
                let formatted = value.format(&Rfc3339).map_err(ser::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
