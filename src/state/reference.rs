//! Reference option lists served by the registration API

use super::FieldName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `{id, name}` record from a reference list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOption {
    pub id: i64,
    pub name: String,
}

impl ReferenceOption {
    #[cfg(test)]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Reference lists the form populates its selection controls from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Countries,
    Roles,
    Subjects,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Self::Countries, Self::Roles, Self::Subjects];

    /// The selection control this list populates
    pub fn field(&self) -> FieldName {
        match self {
            Self::Countries => FieldName::Country,
            Self::Roles => FieldName::Role,
            Self::Subjects => FieldName::Subject,
        }
    }

    /// The list a selection control is populated from, if any
    pub fn for_field(name: FieldName) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.field() == name)
    }

    /// Path segment under `api/`
    pub fn path(&self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Roles => "roles",
            Self::Subjects => "subjects",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
