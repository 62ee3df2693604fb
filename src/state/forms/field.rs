//! Form field value objects

use std::fmt;

/// Identifies a field across every registration form variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    Country,
    Role,
    Subject,
    Email,
    ContactNumber,
    Students,
    TeamLeaders,
    Guests,
}

impl FieldName {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Country => "country",
            Self::Role => "role",
            Self::Subject => "subject",
            Self::Email => "email",
            Self::ContactNumber => "contact_number",
            Self::Students => "students",
            Self::TeamLeaders => "team_leaders",
            Self::Guests => "guests",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Country => "Country",
            Self::Role => "Role",
            Self::Subject => "Subject",
            Self::Email => "Email",
            Self::ContactNumber => "Contact number",
            Self::Students => "Number of students",
            Self::TeamLeaders => "Number of team leaders",
            Self::Guests => "Number of guests",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value stored in the form when selected
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Enumerated headcount choices `0..=max`
    pub fn counts(max: u8) -> Vec<Self> {
        (0..=max)
            .map(|n| Self::new(n.to_string(), n.to_string()))
            .collect()
    }
}

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Choice {
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: FieldName,
    pub label: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: FieldName) -> Self {
        Self {
            name,
            label: name.label().to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    /// Create a new selection field with no selection
    pub fn choice(name: FieldName, options: Vec<ChoiceOption>) -> Self {
        Self {
            name,
            label: name.label().to_string(),
            value: FieldValue::Choice {
                options,
                selected: None,
            },
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Options of a selection field (empty for text fields)
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.value {
            FieldValue::Choice { options, .. } => options,
            FieldValue::Text(_) => &[],
        }
    }

    /// The value the form submits: text as typed, or the selected option's value
    pub fn as_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.value.as_str())
                .unwrap_or(""),
        }
    }

    /// Set the text value (ignored for selection fields)
    #[cfg(test)]
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    /// Replace the options of a selection field.
    /// The current selection survives when its value is still offered.
    pub fn set_options(&mut self, new_options: Vec<ChoiceOption>) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            let previous = selected
                .and_then(|i| options.get(i))
                .map(|o| o.value.clone());
            *selected = previous.and_then(|v| new_options.iter().position(|o| o.value == v));
            *options = new_options;
        }
    }

    /// Select the option carrying `value`. Returns false if no option matches.
    #[cfg(test)]
    pub fn select_value(&mut self, value: &str) -> bool {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if let Some(index) = options.iter().position(|o| o.value == value) {
                *selected = Some(index);
                return true;
            }
        }
        false
    }

    /// Move the selection forward, wrapping around
    pub fn select_next(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            });
        }
    }

    /// Move the selection backward, wrapping around
    pub fn select_prev(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Choice { .. } => {
                // Selections are changed with the arrow keys
            }
        }
    }

    /// Clear the field value. Selection fields keep their options.
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice { selected, .. } => *selected = None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, selected } => match selected.and_then(|i| options.get(i)) {
                Some(option) => format!("◂ {} ▸", option.label),
                None if options.is_empty() => String::new(),
                None => "◂ select ▸".to_string(),
            },
        }
    }
}
