// ============================================================================
// VALIDATION - field rules of the user and login forms
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::constants::{FULL_NAME_MAX_LEN, NAME_MAX_LEN, SUR_NAME_MAX_LEN};

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+7\d{10}$").expect("valid phone regex");
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex");
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    SurName,
    FullName,
    Email,
    Password,
    BirthDate,
    Telephone,
}

impl Field {
    /// Form element id / JSON key
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::SurName => "surName",
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Password => "password",
            Field::BirthDate => "birthDate",
            Field::Telephone => "telephone",
        }
    }
}

/// One message per failing field, rendered inline next to the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        // First failing rule wins
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field.key(), message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn required(errors: &mut ValidationErrors, field: Field, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

pub fn max_chars(errors: &mut ValidationErrors, field: Field, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, format!("At most {} characters", max));
    }
}

pub fn is_valid_telephone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_valid_birth_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn validate_name(errors: &mut ValidationErrors, value: &str) {
    required(errors, Field::Name, value, "Name is required");
    max_chars(errors, Field::Name, value, NAME_MAX_LEN);
}

pub fn validate_sur_name(errors: &mut ValidationErrors, value: &str) {
    required(errors, Field::SurName, value, "Surname is required");
    max_chars(errors, Field::SurName, value, SUR_NAME_MAX_LEN);
}

pub fn validate_full_name(errors: &mut ValidationErrors, value: &str) {
    required(errors, Field::FullName, value, "Full name is required");
    max_chars(errors, Field::FullName, value, FULL_NAME_MAX_LEN);
}

pub fn validate_email(errors: &mut ValidationErrors, value: &str) {
    required(errors, Field::Email, value, "Email is required");
    if !value.trim().is_empty() && !is_valid_email(value.trim()) {
        errors.add(Field::Email, "Invalid email format");
    }
}

/// Empty means "not provided" and passes
pub fn validate_birth_date(errors: &mut ValidationErrors, value: &str) {
    if !value.is_empty() && !is_valid_birth_date(value) {
        errors.add(Field::BirthDate, "Date format: YYYY-MM-DD");
    }
}

/// Empty means "not provided" and passes
pub fn validate_telephone(errors: &mut ValidationErrors, value: &str) {
    if !value.is_empty() && !is_valid_telephone(value) {
        errors.add(Field::Telephone, "Invalid phone number, expected +7 and 10 digits");
    }
}
