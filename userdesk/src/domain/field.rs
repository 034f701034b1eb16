use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One of the seven user-editable, validated fields of a [`UserRecord`].
///
/// Address sub-fields are flattened: the error key for `address.street` is
/// [`Field::Street`], whose [`Display`] form is `street`.
///
/// [`UserRecord`]: super::UserRecord
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    Street,
    City,
    Zip,
}

const ADDRESS_PREFIX: &str = "address.";

impl Field {
    /// Flattened error key, e.g. `"zip"`.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Path of the field inside the record, e.g. `"address.zip"`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Street => "address.street",
            Self::City => "address.city",
            Self::Zip => "address.zip",
            other => other.key(),
        }
    }

    pub fn is_address(self) -> bool {
        matches!(self, Self::Street | Self::City | Self::Zip)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Company => "Company",
            Self::Street => "Street",
            Self::City => "City",
            Self::Zip => "Zip code",
        }
    }

    /// Resolves a form path to a field.
    ///
    /// Accepts both the dotted address form (`address.city`) and the
    /// flattened key (`city`). Only address sub-fields may carry the
    /// `address.` prefix.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.strip_prefix(ADDRESS_PREFIX) {
            Some(sub) => sub.parse::<Self>().ok().filter(|field| field.is_address()),
            None => path.parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn dotted_and_flat_paths_resolve_to_the_same_field() {
        assert_eq!(Field::from_path("address.street"), Some(Field::Street));
        assert_eq!(Field::from_path("street"), Some(Field::Street));
        assert_eq!(Field::from_path("email"), Some(Field::Email));
    }

    #[test]
    fn prefix_is_only_valid_for_address_fields() {
        assert_eq!(Field::from_path("address.name"), None);
        assert_eq!(Field::from_path("address."), None);
        assert_eq!(Field::from_path("id"), None);
        assert_eq!(Field::from_path("Street"), None);
    }

    #[test]
    fn every_path_round_trips() {
        for field in Field::iter() {
            assert_eq!(Field::from_path(field.path()), Some(field));
        }
        assert_eq!(Field::iter().count(), 7);
    }

    #[test]
    fn keys_are_flattened() {
        assert_eq!(Field::Zip.key(), "zip");
        assert_eq!(Field::Zip.to_string(), "zip");
        assert_eq!(Field::Zip.path(), "address.zip");
    }
}
