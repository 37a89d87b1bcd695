//! Narrative field identifiers and results.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::NarrativeError;

/// A structured field that can be pulled out of free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NarrativeField {
    IncidentType,
    ResponseTime,
    Location,
    DateTime,
    UnitsResources,
}

impl NarrativeField {
    pub const ALL: [NarrativeField; 5] = [
        NarrativeField::IncidentType,
        NarrativeField::ResponseTime,
        NarrativeField::Location,
        NarrativeField::DateTime,
        NarrativeField::UnitsResources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeField::IncidentType => "incident_type",
            NarrativeField::ResponseTime => "response_time",
            NarrativeField::Location => "location",
            NarrativeField::DateTime => "date_time",
            NarrativeField::UnitsResources => "units_resources",
        }
    }
}

impl fmt::Display for NarrativeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NarrativeField {
    type Err = NarrativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| NarrativeError::UnknownField(s.to_string()))
    }
}

/// One extracted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedField {
    /// Canonical display string.
    pub value: String,
    /// 0 to 1; how tightly the text matched.
    pub confidence: f64,
    /// The matched text as it appeared in the narrative.
    pub original: String,
}

impl ParsedField {
    pub(crate) fn new(value: impl Into<String>, confidence: f64, original: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidence,
            original: original.into(),
        }
    }
}
