//! Target schema entries.
//!
//! Each destination tool (Response Time Analyzer, heatmaps, ...) declares a
//! fixed list of [`TargetField`]s. The set is supplied by the hosting tool and
//! is read-only for the mapping pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::validation::ValidationErrorKind;

/// Data type a target field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldDataType {
    String,
    Number,
    Date,
    Boolean,
    /// `"lat,lng"` text or a two-element `[lat, lng]` list.
    Location,
}

impl FieldDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldDataType::String => "string",
            FieldDataType::Number => "number",
            FieldDataType::Date => "date",
            FieldDataType::Boolean => "boolean",
            FieldDataType::Location => "location",
        }
    }
}

impl fmt::Display for FieldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldDataType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "text" => Ok(FieldDataType::String),
            "number" | "numeric" => Ok(FieldDataType::Number),
            "date" | "datetime" => Ok(FieldDataType::Date),
            "boolean" | "bool" => Ok(FieldDataType::Boolean),
            "location" => Ok(FieldDataType::Location),
            _ => Err(ModelError::UnknownDataType(s.to_string())),
        }
    }
}

/// A per-field validation rule, serialized as `{ "type": ..., "params": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "camelCase")]
pub enum ValidationRule {
    /// Numbers must be `>= value`; text must be at least `value` characters.
    Min {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Numbers must be `<= value`; text must be at most `value` characters.
    Max {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The display string must match the regular expression.
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The display string must be one of `values`.
    OneOf {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// A named check resolved by the validation context.
    Custom {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    pub fn min(value: f64) -> Self {
        Self::Min {
            value,
            message: None,
        }
    }

    pub fn max(value: f64) -> Self {
        Self::Max {
            value,
            message: None,
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: None,
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom {
            name: name.into(),
            message: None,
        }
    }

    /// Override the error message reported when the rule fails.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::Min { message, .. }
            | Self::Max { message, .. }
            | Self::Pattern { message, .. }
            | Self::OneOf { message, .. }
            | Self::Custom { message, .. } => *message = text,
        }
        self
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Min { message, .. }
            | Self::Max { message, .. }
            | Self::Pattern { message, .. }
            | Self::OneOf { message, .. }
            | Self::Custom { message, .. } => message.as_deref(),
        }
    }

    /// The error kind reported when this rule fails.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Min { .. } => ValidationErrorKind::Min,
            Self::Max { .. } => ValidationErrorKind::Max,
            Self::Pattern { .. } => ValidationErrorKind::Pattern,
            Self::OneOf { .. } => ValidationErrorKind::OneOf,
            Self::Custom { .. } => ValidationErrorKind::Custom,
        }
    }
}

/// A field in a destination tool's fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetField {
    /// Unique key within the schema (e.g. "Incident ID").
    pub name: String,
    pub data_type: FieldDataType,
    #[serde(default)]
    pub is_required: bool,
    /// Only presence is checked; type and rule checks are skipped.
    #[serde(default)]
    pub presence_only: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Alternative header spellings seen in CAD exports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl TargetField {
    pub fn new(name: impl Into<String>, data_type: FieldDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_required: false,
            presence_only: false,
            validation_rules: Vec::new(),
            description: None,
            category: None,
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    #[must_use]
    pub fn presence_only(mut self) -> Self {
        self.presence_only = true;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}
