//! Destination tool schemas.

use std::collections::BTreeSet;

use fireems_model::TargetField;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StandardsError};

/// A destination tool and the fixed list of fields it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<TargetField>,
}

impl ToolSchema {
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<TargetField>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&TargetField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &TargetField> {
        self.fields.iter().filter(|field| field.is_required)
    }

    /// Reject schemas with no fields or with repeated field names.
    pub fn check(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(StandardsError::EmptySchema {
                schema: self.id.clone(),
            });
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(StandardsError::DuplicateField {
                    schema: self.id.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}
