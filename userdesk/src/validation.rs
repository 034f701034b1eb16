//! Field-level business rules for draft records.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::{Field, UserRecord};

pub const NAME_MIN_CHARS: usize = 2;
pub const ZIP_MIN_CHARS: usize = 3;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Validation messages keyed by flattened field. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Checks every field of `record` and collects all failures in one pass.
pub fn validate(record: &UserRecord) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let name = record.name.trim();
    if name.is_empty() {
        errors.insert(Field::Name, "Name is required");
    } else if name.chars().count() < NAME_MIN_CHARS {
        errors.insert(Field::Name, "Name must be at least 2 characters");
    }

    if record.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !email_regex().is_match(&record.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    if record.phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone is required");
    } else {
        let digits = record.phone.chars().filter(char::is_ascii_digit).count();
        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
            errors.insert(Field::Phone, "Phone must be 10-15 digits");
        }
    }

    if record.company.trim().is_empty() {
        errors.insert(Field::Company, "Company is required");
    }

    if record.address.street.trim().is_empty() {
        errors.insert(Field::Street, "Street is required");
    }

    if record.address.city.trim().is_empty() {
        errors.insert(Field::City, "City is required");
    }

    let zip = record.address.zip.trim();
    if zip.is_empty() {
        errors.insert(Field::Zip, "Zip code is required");
    } else if zip.chars().count() < ZIP_MIN_CHARS {
        errors.insert(Field::Zip, "Zip code must be at least 3 characters");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use strum::IntoEnumIterator;

    fn valid_record() -> UserRecord {
        UserRecord {
            name: "Al".to_string(),
            email: "al@example.com".to_string(),
            phone: "123-456-7890".to_string(),
            company: "Acme".to_string(),
            address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "12345".to_string(),
            },
            ..Default::default()
        }
    }

    fn with(field: Field, value: &str) -> UserRecord {
        let mut record = valid_record();
        record.set_value(field, value.to_string());
        record
    }

    #[test]
    fn empty_record_reports_exactly_the_required_errors() {
        let errors = validate(&UserRecord::default());

        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Phone), Some("Phone is required"));
        assert_eq!(errors.get(Field::Company), Some("Company is required"));
        assert_eq!(errors.get(Field::Street), Some("Street is required"));
        assert_eq!(errors.get(Field::City), Some("City is required"));
        assert_eq!(errors.get(Field::Zip), Some("Zip code is required"));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        for field in Field::iter() {
            let errors = validate(&with(field, "   "));
            assert_eq!(errors.len(), 1, "{field}");
            assert!(errors.get(field).unwrap().ends_with("is required"), "{field}");
        }
    }

    #[test]
    fn formatted_phone_and_short_name_pass() {
        assert!(validate(&valid_record()).is_empty());
    }

    #[test]
    fn name_shorter_than_two_after_trim_fails() {
        let errors = validate(&with(Field::Name, " A "));
        assert_eq!(
            errors.get(Field::Name),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn phone_digit_count_bounds_are_inclusive() {
        let phone_error = |phone: &str| {
            validate(&with(Field::Phone, phone))
                .get(Field::Phone)
                .map(str::to_string)
        };

        assert_eq!(
            phone_error("12345").as_deref(),
            Some("Phone must be 10-15 digits")
        );
        assert_eq!(
            phone_error("1234567890123456").as_deref(),
            Some("Phone must be 10-15 digits")
        );
        assert_eq!(phone_error("1234567890"), None);
        assert_eq!(phone_error("123456789012345"), None);
        assert_eq!(phone_error("+1 (234) 567-8901"), None);
        assert_eq!(
            phone_error("phone: n/a").as_deref(),
            Some("Phone must be 10-15 digits")
        );
    }

    #[test]
    fn zip_length_boundary() {
        assert_eq!(
            validate(&with(Field::Zip, "12")).get(Field::Zip),
            Some("Zip code must be at least 3 characters")
        );
        assert_eq!(validate(&with(Field::Zip, "123")).get(Field::Zip), None);
        assert_eq!(
            validate(&with(Field::Zip, " 12 ")).get(Field::Zip),
            Some("Zip code must be at least 3 characters")
        );
    }

    #[test]
    fn email_needs_a_dotted_domain_with_tld() {
        let email_error =
            |email: &str| validate(&with(Field::Email, email)).contains(Field::Email);

        assert!(email_error("foo@bar"));
        assert!(email_error("foo@bar.c"));
        assert!(email_error("foo bar@baz.com"));
        assert!(email_error("@baz.com"));
        assert!(email_error(" a@b.co"));
        assert!(!email_error("a@b.co"));
        assert!(!email_error("first.last+tag@mail.example.org"));
        assert_eq!(
            validate(&with(Field::Email, "foo@bar")).get(Field::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn errors_are_collected_independently() {
        let mut record = with(Field::Zip, "1");
        record.name = String::new();
        record.email = "nope".to_string();
        let errors = validate(&record);

        let fields: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Zip]);
    }

    #[test]
    fn serializes_with_flattened_keys() {
        let errors = validate(&with(Field::Street, ""));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"street": "Street is required"}));
    }
}
