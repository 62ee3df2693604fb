//! Submission payloads for the participation-requests endpoint

use super::field::FieldName;
use super::form_state::FormValues;
use super::variant::FormVariant;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{field} must be a whole number, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },
    #[error("{0} is missing")]
    Missing(&'static str),
}

/// Flat payload with integer ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelegationPayload {
    pub full_name: String,
    pub country: i64,
    pub role: i64,
    pub email: String,
    pub contact_number: String,
    pub students: u8,
    pub team_leaders: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantCounts {
    pub students: u8,
    pub team_leaders: u8,
}

/// Country id kept as a string, headcounts nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectPayload {
    pub full_name: String,
    pub country: String,
    pub role: i64,
    pub subject: i64,
    pub email: String,
    pub contact_number: String,
    pub participants: ParticipantCounts,
}

/// Role submitted by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestPayload {
    pub full_name: String,
    pub country: i64,
    pub role: String,
    pub email: String,
    pub contact_number: String,
    pub guests: u8,
}

/// The exact JSON body POSTed for a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    Delegation(DelegationPayload),
    Subject(SubjectPayload),
    Guest(GuestPayload),
}

fn parse_id(field: &'static str, value: &str) -> Result<i64, PayloadError> {
    if value.is_empty() {
        return Err(PayloadError::Missing(field));
    }
    value.parse().map_err(|_| PayloadError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}

fn headcount(values: &FormValues, field: FieldName) -> Result<u8, PayloadError> {
    let value = values
        .headcounts
        .get(&field)
        .map(String::as_str)
        .unwrap_or_default();
    if value.is_empty() {
        return Err(PayloadError::Missing(field.as_str()));
    }
    value.parse().map_err(|_| PayloadError::NotAnInteger {
        field: field.as_str(),
        value: value.to_string(),
    })
}

impl SubmissionPayload {
    /// Build the payload for `variant`. Callers validate `values` first.
    pub fn build(variant: FormVariant, values: &FormValues) -> Result<Self, PayloadError> {
        let full_name = values.full_name.trim().to_string();
        let email = values.email.trim().to_string();
        let contact_number = values.contact_number.trim().to_string();

        let payload = match variant {
            FormVariant::Delegation => Self::Delegation(DelegationPayload {
                full_name,
                country: parse_id("country", &values.country)?,
                role: parse_id("role", &values.role)?,
                email,
                contact_number,
                students: headcount(values, FieldName::Students)?,
                team_leaders: headcount(values, FieldName::TeamLeaders)?,
            }),
            FormVariant::Subject => {
                if values.country.is_empty() {
                    return Err(PayloadError::Missing("country"));
                }
                Self::Subject(SubjectPayload {
                    full_name,
                    country: values.country.clone(),
                    role: parse_id("role", &values.role)?,
                    subject: parse_id("subject", values.subject.as_deref().unwrap_or_default())?,
                    email,
                    contact_number,
                    participants: ParticipantCounts {
                        students: headcount(values, FieldName::Students)?,
                        team_leaders: headcount(values, FieldName::TeamLeaders)?,
                    },
                })
            }
            FormVariant::Guest => {
                if values.role.is_empty() {
                    return Err(PayloadError::Missing("role"));
                }
                Self::Guest(GuestPayload {
                    full_name,
                    country: parse_id("country", &values.country)?,
                    role: values.role.clone(),
                    email,
                    contact_number,
                    guests: headcount(values, FieldName::Guests)?,
                })
            }
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn values(headcounts: &[(FieldName, &str)]) -> FormValues {
        FormValues {
            full_name: " Aziza Karimova ".to_string(),
            country: "3".to_string(),
            role: "2".to_string(),
            subject: None,
            email: "aziza@example.uz".to_string(),
            contact_number: "+998901234567".to_string(),
            headcounts: headcounts
                .iter()
                .map(|(name, v)| (*name, v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_delegation_is_flat_with_integer_ids() {
        let values = values(&[(FieldName::Students, "2"), (FieldName::TeamLeaders, "1")]);
        let payload = SubmissionPayload::build(FormVariant::Delegation, &values).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "full_name": "Aziza Karimova",
                "country": 3,
                "role": 2,
                "email": "aziza@example.uz",
                "contact_number": "+998901234567",
                "students": 2,
                "team_leaders": 1
            })
        );
    }

    #[test]
    fn test_subject_nests_participants_and_keeps_country_string() {
        let mut values = values(&[(FieldName::Students, "2"), (FieldName::TeamLeaders, "0")]);
        values.subject = Some("5".to_string());
        let payload = SubmissionPayload::build(FormVariant::Subject, &values).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "full_name": "Aziza Karimova",
                "country": "3",
                "role": 2,
                "subject": 5,
                "email": "aziza@example.uz",
                "contact_number": "+998901234567",
                "participants": {"students": 2, "team_leaders": 0}
            })
        );
    }

    #[test]
    fn test_guest_submits_role_label() {
        let mut values = values(&[(FieldName::Guests, "2")]);
        values.role = "Observer".to_string();
        values.contact_number = "90 123 45 67".to_string();
        let payload = SubmissionPayload::build(FormVariant::Guest, &values).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "full_name": "Aziza Karimova",
                "country": 3,
                "role": "Observer",
                "email": "aziza@example.uz",
                "contact_number": "90 123 45 67",
                "guests": 2
            })
        );
    }

    #[test]
    fn test_non_numeric_id_is_an_error() {
        let mut values = values(&[(FieldName::Students, "2"), (FieldName::TeamLeaders, "1")]);
        values.country = "Uzbekistan".to_string();
        assert_eq!(
            SubmissionPayload::build(FormVariant::Delegation, &values),
            Err(PayloadError::NotAnInteger {
                field: "country",
                value: "Uzbekistan".to_string()
            })
        );
    }

    #[test]
    fn test_missing_subject_is_an_error() {
        let values = values(&[(FieldName::Students, "2"), (FieldName::TeamLeaders, "1")]);
        assert_eq!(
            SubmissionPayload::build(FormVariant::Subject, &values),
            Err(PayloadError::Missing("subject"))
        );
    }

    #[test]
    fn test_missing_headcount_is_an_error() {
        let values = values(&[(FieldName::Students, "2")]);
        assert_eq!(
            SubmissionPayload::build(FormVariant::Delegation, &values),
            Err(PayloadError::Missing("team_leaders"))
        );
    }
}
