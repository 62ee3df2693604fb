//! Form domain layer
//!
//! Field values, per-variant field sets, validation rules and the payloads
//! built from a validated form.

mod field;
mod form_state;
mod payload;
mod validation;
mod variant;

pub use field::{FieldName, FormField};
pub use form_state::{Form, RegistrationForm};
pub use payload::SubmissionPayload;
pub use variant::FormVariant;

#[cfg(test)]
pub use form_state::FormValues;
