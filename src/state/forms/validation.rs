//! Field-level validation rules
//!
//! Every validator is a pure function returning `Err(message)` on failure.
//! [`validate_form`] composes them per variant into a map of field errors.

use super::field::FieldName;
use super::form_state::FormValues;
use super::variant::{FormVariant, PhoneRule};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// Errors keyed by field. Empty means the form is valid.
pub type FieldErrors = BTreeMap<FieldName, String>;

lazy_static! {
    /// International phone number: `+`, non-zero leading digit, 2 to 15 digits total
    /// - Valid: "+1234567890", "+998901234567"
    /// - Invalid: "1234567890", "+0123", "+1", "+12 345"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+[1-9]\d{1,14}$").unwrap();

    /// Email with a local part, `@` and a dotted domain
    /// - Valid: "a@b.co", "first.last+tag@mail.example.org"
    /// - Invalid: "user", "user@", "@example.com", "user@localhost"
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap();
}

pub fn validate_full_name(value: &str, min_len: usize) -> Result<(), String> {
    if value.trim().chars().count() < min_len {
        return Err(format!("Full name must be at least {min_len} characters"));
    }
    Ok(())
}

/// A selection control must have something selected
pub fn validate_selection(value: &str, field: FieldName) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("Please select a {}", field.label().to_lowercase()));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), String> {
    if !EMAIL_REGEX.is_match(value.trim()) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

pub fn validate_contact_number(value: &str, rule: PhoneRule) -> Result<(), String> {
    match rule {
        PhoneRule::E164 if !PHONE_REGEX.is_match(value) => Err(
            "Contact number must be in international format, e.g. +998901234567".to_string(),
        ),
        PhoneRule::Required if value.trim().is_empty() => {
            Err("Contact number is required".to_string())
        }
        _ => Ok(()),
    }
}

/// Headcounts come from an enumerated `0..=max` choice list
pub fn validate_headcount(value: &str, max: u8, field: FieldName) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("Please select the {}", field.label().to_lowercase()));
    }
    match value.parse::<u8>() {
        Ok(n) if n <= max => Ok(()),
        _ => Err(format!("{} must be between 0 and {max}", field.label())),
    }
}

/// Run every rule for `variant` and collect the failures
pub fn validate_form(variant: FormVariant, values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut check = |field: FieldName, result: Result<(), String>| {
        if let Err(message) = result {
            errors.insert(field, message);
        }
    };

    check(
        FieldName::FullName,
        validate_full_name(&values.full_name, variant.min_name_len()),
    );
    check(
        FieldName::Country,
        validate_selection(&values.country, FieldName::Country),
    );
    check(
        FieldName::Role,
        validate_selection(&values.role, FieldName::Role),
    );
    if variant.has_subject() {
        check(
            FieldName::Subject,
            validate_selection(
                values.subject.as_deref().unwrap_or_default(),
                FieldName::Subject,
            ),
        );
    }
    check(FieldName::Email, validate_email(&values.email));
    check(
        FieldName::ContactNumber,
        validate_contact_number(&values.contact_number, variant.phone_rule()),
    );
    for headcount in variant.headcounts() {
        let value = values
            .headcounts
            .get(&headcount.field)
            .map(String::as_str)
            .unwrap_or_default();
        check(
            headcount.field,
            validate_headcount(value, headcount.max, headcount.field),
        );
    }

    errors
}
