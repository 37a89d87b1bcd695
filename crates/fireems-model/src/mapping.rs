//! Source-to-target field mappings and the transformation DSL.
//!
//! A [`FieldMapping`] ties one source column (or the `__default__` sentinel)
//! to one target field and carries an ordered list of
//! [`FieldTransformation`]s. Transformations keep the `{type, params}` shape
//! used by saved mapping profiles; params stay an open JSON map so profiles
//! written by newer tools still load.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value::CellValue;

/// Sentinel source field meaning "no source column, always use a constant".
pub const DEFAULT_SOURCE_FIELD: &str = "__default__";

/// Transformation type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransformKind {
    Split,
    Join,
    Format,
    Convert,
    Extract,
    Replace,
    /// Unrecognised tag, kept so the profile round-trips; values pass through.
    Unknown(String),
}

impl TransformKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Split => "split",
            Self::Join => "join",
            Self::Format => "format",
            Self::Convert => "convert",
            Self::Extract => "extract",
            Self::Replace => "replace",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for TransformKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "split" => Self::Split,
            "join" => Self::Join,
            "format" => Self::Format,
            "convert" => Self::Convert,
            "extract" => Self::Extract,
            "replace" => Self::Replace,
            _ => Self::Unknown(value),
        }
    }
}

impl From<TransformKind> for String {
    fn from(value: TransformKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a mapping's transformation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTransformation {
    #[serde(rename = "type")]
    pub kind: TransformKind,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl FieldTransformation {
    pub fn new(kind: TransformKind) -> Self {
        Self {
            kind,
            params: Map::new(),
        }
    }

    /// Set a parameter.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// `split` on `delimiter`, optionally keeping only part `index`.
    pub fn split(delimiter: &str, index: Option<usize>) -> Self {
        let transformation = Self::new(TransformKind::Split).with_param("delimiter", delimiter);
        match index {
            Some(index) => transformation.with_param("index", index),
            None => transformation,
        }
    }

    pub fn join(delimiter: &str) -> Self {
        Self::new(TransformKind::Join).with_param("delimiter", delimiter)
    }

    /// `format` a date into `MM/DD/YYYY`, `DD/MM/YYYY`, `YYYY-MM-DD`, `ISO` or a token pattern.
    pub fn format_date(format: &str) -> Self {
        Self::new(TransformKind::Format)
            .with_param("formatType", "date")
            .with_param("format", format)
    }

    /// `format` a number as `integer`, `fixed2`, `currency` or `percent`.
    pub fn format_number(format: &str) -> Self {
        Self::new(TransformKind::Format)
            .with_param("formatType", "number")
            .with_param("format", format)
    }

    /// `convert` to `string`, `number`, `boolean` or `date`.
    pub fn convert(target_type: &str) -> Self {
        Self::new(TransformKind::Convert).with_param("targetType", target_type)
    }

    /// `convert` carrying a default value: the canonical default declaration.
    pub fn convert_with_default(target_type: &str, default_value: impl Into<Value>) -> Self {
        Self::convert(target_type).with_param("defaultValue", default_value)
    }

    pub fn extract(pattern: &str) -> Self {
        Self::new(TransformKind::Extract).with_param("pattern", pattern)
    }

    pub fn replace(from: &str, to: &str, use_regex: bool) -> Self {
        Self::new(TransformKind::Replace)
            .with_param("from", from)
            .with_param("to", to)
            .with_param("useRegex", use_regex)
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key).filter(|value| !value.is_null())
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(Value::as_str)
    }

    pub fn param_bool(&self, key: &str) -> Option<bool> {
        match self.param(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(s.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }

    /// Non-negative integer parameter; numeric strings are accepted.
    pub fn param_index(&self, key: &str) -> Option<i64> {
        match self.param(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// The declared default value, if this is a `convert` step carrying one.
    pub fn default_value(&self) -> Option<CellValue> {
        if self.kind != TransformKind::Convert {
            return None;
        }
        self.param("defaultValue").map(CellValue::from_json)
    }
}

/// Association between a source column (or `__default__`) and a target field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub source_field: String,
    pub target_field: String,
    #[serde(default)]
    pub transformations: Vec<FieldTransformation>,
}

impl FieldMapping {
    pub fn new(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            transformations: Vec::new(),
        }
    }

    /// A `__default__` mapping that always yields `value`.
    pub fn constant(
        target_field: impl Into<String>,
        value: impl Into<Value>,
        target_type: &str,
    ) -> Self {
        Self::new(DEFAULT_SOURCE_FIELD, target_field)
            .with_transformation(FieldTransformation::convert_with_default(target_type, value))
    }

    #[must_use]
    pub fn with_transformation(mut self, transformation: FieldTransformation) -> Self {
        self.transformations.push(transformation);
        self
    }

    /// True when the mapping reads no source column.
    pub fn is_default_source(&self) -> bool {
        self.source_field == DEFAULT_SOURCE_FIELD
    }

    /// `defaultValue` of the first `convert` step, if any.
    pub fn declared_default(&self) -> Option<CellValue> {
        self.transformations
            .iter()
            .find(|t| t.kind == TransformKind::Convert)
            .and_then(FieldTransformation::default_value)
    }
}

/// The on-disk form of a user's mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingProfile {
    /// Destination tool the profile was built for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default)]
    pub mappings: Vec<FieldMapping>,
}

impl MappingProfile {
    pub fn new(tool: Option<String>, mappings: Vec<FieldMapping>) -> Self {
        Self { tool, mappings }
    }
}
