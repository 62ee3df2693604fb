//! Registration form variants
//!
//! Each variant is a distinct field set and payload shape accepted by the
//! participation-requests endpoint. The shapes differ in id types and nesting
//! and must not be merged.

use super::field::FieldName;
use crate::state::Resource;
use serde::{Deserialize, Serialize};

/// How the contact number is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneRule {
    /// `+` followed by 2 to 15 digits, first digit non-zero
    E164,
    /// Anything non-empty
    Required,
}

/// What the role selection stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleValue {
    /// The option id, submitted as an integer
    Id,
    /// The option name, submitted as a string
    Label,
}

/// A headcount field and the largest count it offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headcount {
    pub field: FieldName,
    pub max: u8,
}

const DELEGATION_HEADCOUNTS: &[Headcount] = &[
    Headcount {
        field: FieldName::Students,
        max: 4,
    },
    Headcount {
        field: FieldName::TeamLeaders,
        max: 2,
    },
];

const GUEST_HEADCOUNTS: &[Headcount] = &[Headcount {
    field: FieldName::Guests,
    max: 4,
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    /// Country delegation: flat payload, integer ids
    #[default]
    Delegation,
    /// Per-subject team: string country id, headcounts nested under `participants`
    Subject,
    /// Guest registration: role submitted by name, relaxed phone check
    Guest,
}

impl FormVariant {
    pub const ALL: [FormVariant; 3] = [Self::Delegation, Self::Subject, Self::Guest];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Delegation => "Delegation",
            Self::Subject => "Subject Team",
            Self::Guest => "Guest",
        }
    }

    /// Position in [`FormVariant::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::Delegation => 0,
            Self::Subject => 1,
            Self::Guest => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn min_name_len(&self) -> usize {
        match self {
            Self::Delegation | Self::Subject => 3,
            Self::Guest => 2,
        }
    }

    pub fn has_subject(&self) -> bool {
        matches!(self, Self::Subject)
    }

    pub fn phone_rule(&self) -> PhoneRule {
        match self {
            Self::Delegation | Self::Subject => PhoneRule::E164,
            Self::Guest => PhoneRule::Required,
        }
    }

    pub fn role_value(&self) -> RoleValue {
        match self {
            Self::Delegation | Self::Subject => RoleValue::Id,
            Self::Guest => RoleValue::Label,
        }
    }

    pub fn headcounts(&self) -> &'static [Headcount] {
        match self {
            Self::Delegation | Self::Subject => DELEGATION_HEADCOUNTS,
            Self::Guest => GUEST_HEADCOUNTS,
        }
    }

    /// Reference lists loaded when the form is shown
    pub fn resources(&self) -> Vec<Resource> {
        let mut resources = vec![Resource::Countries, Resource::Roles];
        if self.has_subject() {
            resources.push(Resource::Subjects);
        }
        resources
    }

    /// Fields in display order
    pub fn field_names(&self) -> Vec<FieldName> {
        let mut names = vec![FieldName::FullName, FieldName::Country, FieldName::Role];
        if self.has_subject() {
            names.push(FieldName::Subject);
        }
        names.push(FieldName::Email);
        names.push(FieldName::ContactNumber);
        names.extend(self.headcounts().iter().map(|h| h.field));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_delegation() {
        assert_eq!(FormVariant::default(), FormVariant::Delegation);
    }

    #[test]
    fn test_index_round_trip() {
        for variant in FormVariant::ALL {
            assert_eq!(FormVariant::from_index(variant.index()), Some(variant));
        }
        assert_eq!(FormVariant::from_index(3), None);
    }

    #[test]
    fn test_only_subject_variant_loads_subjects() {
        assert_eq!(
            FormVariant::Subject.resources(),
            vec![Resource::Countries, Resource::Roles, Resource::Subjects]
        );
        assert_eq!(
            FormVariant::Delegation.resources(),
            vec![Resource::Countries, Resource::Roles]
        );
        assert!(!FormVariant::Guest.resources().contains(&Resource::Subjects));
    }

    #[test]
    fn test_field_order() {
        assert_eq!(
            FormVariant::Subject.field_names(),
            vec![
                FieldName::FullName,
                FieldName::Country,
                FieldName::Role,
                FieldName::Subject,
                FieldName::Email,
                FieldName::ContactNumber,
                FieldName::Students,
                FieldName::TeamLeaders,
            ]
        );
        assert_eq!(FormVariant::Guest.field_names().last(), Some(&FieldName::Guests));
    }

    #[test]
    fn test_guest_rules_are_relaxed() {
        assert_eq!(FormVariant::Guest.min_name_len(), 2);
        assert_eq!(FormVariant::Guest.phone_rule(), PhoneRule::Required);
        assert_eq!(FormVariant::Guest.role_value(), RoleValue::Label);
        assert_eq!(FormVariant::Delegation.min_name_len(), 3);
        assert_eq!(FormVariant::Delegation.phone_rule(), PhoneRule::E164);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FormVariant::Subject).unwrap();
        assert_eq!(json, "\"subject\"");
        let parsed: FormVariant = serde_json::from_str("\"guest\"").unwrap();
        assert_eq!(parsed, FormVariant::Guest);
    }
}
