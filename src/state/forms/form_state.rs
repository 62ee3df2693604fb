//! Registration form state

use super::field::{ChoiceOption, FieldName, FormField};
use super::validation::{validate_form, FieldErrors};
use super::variant::{FormVariant, RoleValue};
use crate::state::{ReferenceOption, Resource};
use std::collections::BTreeMap;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Snapshot of what the user entered, as strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub full_name: String,
    /// Selected country id
    pub country: String,
    /// Selected role id, or role name for label-valued variants
    pub role: String,
    /// Selected subject id, only for variants with a subject
    pub subject: Option<String>,
    pub email: String,
    pub contact_number: String,
    pub headcounts: BTreeMap<FieldName, String>,
}

/// The registration form for one variant.
///
/// Index `fields.len()` is the submit button row.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub variant: FormVariant,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    pub errors: FieldErrors,
    /// Once set, every edit re-runs validation
    pub submit_attempted: bool,
}

impl RegistrationForm {
    pub fn new(variant: FormVariant) -> Self {
        let fields = variant
            .field_names()
            .into_iter()
            .map(|name| match name {
                FieldName::FullName | FieldName::Email | FieldName::ContactNumber => {
                    FormField::text(name)
                }
                FieldName::Country | FieldName::Role | FieldName::Subject => {
                    FormField::choice(name, Vec::new())
                }
                FieldName::Students | FieldName::TeamLeaders | FieldName::Guests => {
                    let max = variant
                        .headcounts()
                        .iter()
                        .find(|h| h.field == name)
                        .map(|h| h.max)
                        .unwrap_or_default();
                    FormField::choice(name, ChoiceOption::counts(max))
                }
            })
            .collect();

        Self {
            variant,
            fields,
            active_field_index: 0,
            errors: FieldErrors::new(),
            submit_attempted: false,
        }
    }

    pub fn field(&self, name: FieldName) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: FieldName) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Populate a selection control from a loaded reference list
    pub fn set_options(&mut self, resource: Resource, options: &[ReferenceOption]) {
        let name = resource.field();
        let by_label = resource == Resource::Roles && self.variant.role_value() == RoleValue::Label;
        let choices = options
            .iter()
            .map(|o| {
                let value = if by_label {
                    o.name.clone()
                } else {
                    o.id.to_string()
                };
                ChoiceOption::new(value, o.name.clone())
            })
            .collect();
        if let Some(field) = self.field_mut(name) {
            field.set_options(choices);
        }
    }

    fn value_of(&self, name: FieldName) -> String {
        self.field(name)
            .map(|f| f.as_value().to_string())
            .unwrap_or_default()
    }

    pub fn values(&self) -> FormValues {
        FormValues {
            full_name: self.value_of(FieldName::FullName),
            country: self.value_of(FieldName::Country),
            role: self.value_of(FieldName::Role),
            subject: self
                .field(FieldName::Subject)
                .map(|f| f.as_value().to_string()),
            email: self.value_of(FieldName::Email),
            contact_number: self.value_of(FieldName::ContactNumber),
            headcounts: self
                .variant
                .headcounts()
                .iter()
                .map(|h| (h.field, self.value_of(h.field)))
                .collect(),
        }
    }

    /// Validate every field, recording inline errors. Returns true when valid.
    pub fn validate(&mut self) -> bool {
        self.submit_attempted = true;
        self.errors = validate_form(self.variant, &self.values());
        self.errors.is_empty()
    }

    fn revalidate(&mut self) {
        if self.submit_attempted {
            self.errors = validate_form(self.variant, &self.values());
        }
    }

    pub fn error_for(&self, name: FieldName) -> Option<&str> {
        self.errors.get(&name).map(String::as_str)
    }

    /// Back to the defaults: empty values, no selection, no errors.
    /// Loaded options stay in place.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.errors.clear();
        self.submit_attempted = false;
        self.active_field_index = 0;
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.get_active_field_mut() {
            field.push_char(c);
        }
        self.revalidate();
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.pop_char();
        }
        self.revalidate();
    }

    pub fn select_next(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.select_next();
        }
        self.revalidate();
    }

    pub fn select_prev(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.select_prev();
        }
        self.revalidate();
    }

    /// Set a field by name: types text or selects the option with that value
    #[cfg(test)]
    pub fn set_value(&mut self, name: FieldName, value: &str) -> bool {
        let applied = match self.field_mut(name) {
            Some(field) if field.is_choice() => field.select_value(value),
            Some(field) => {
                field.set_text(value.to_string());
                true
            }
            None => false,
        };
        self.revalidate();
        applied
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}
