//! Aggregate counts over a validation pass.

use std::collections::{BTreeMap, BTreeSet};

use fireems_model::{ValidationError, ValidationErrorKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub rows_checked: usize,
    pub rows_with_errors: usize,
    pub total_errors: usize,
    pub by_kind: BTreeMap<ValidationErrorKind, usize>,
    pub by_field: BTreeMap<String, usize>,
}

impl ValidationSummary {
    pub fn from_errors(errors: &[ValidationError], rows_checked: usize) -> Self {
        let mut by_kind = BTreeMap::new();
        let mut by_field = BTreeMap::new();
        let mut rows = BTreeSet::new();
        for error in errors {
            *by_kind.entry(error.kind).or_insert(0) += 1;
            *by_field.entry(error.field.clone()).or_insert(0) += 1;
            rows.insert(error.row_index);
        }
        Self {
            rows_checked,
            rows_with_errors: rows.len(),
            total_errors: errors.len(),
            by_kind,
            by_field,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total_errors == 0
    }

    pub fn count(&self, kind: ValidationErrorKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let errors = vec![
            ValidationError::new(0, "Incident ID", ValidationErrorKind::Required, "x"),
            ValidationError::new(0, "Latitude", ValidationErrorKind::Custom, "x"),
            ValidationError::new(3, "Latitude", ValidationErrorKind::Custom, "x"),
        ];
        let summary = ValidationSummary::from_errors(&errors, 5);

        assert_eq!(summary.rows_checked, 5);
        assert_eq!(summary.rows_with_errors, 2);
        assert_eq!(summary.total_errors, 3);
        assert_eq!(summary.count(ValidationErrorKind::Custom), 2);
        assert_eq!(summary.count(ValidationErrorKind::Pattern), 0);
        assert_eq!(summary.by_field["Latitude"], 2);
        assert!(!summary.is_clean());
    }
}
