//! Default value registry.
//!
//! Holds the constant fallback declared for a target field by a `__default__`
//! mapping. The registry is an owned value rebuilt from the current mapping
//! set for every transform/validate pass, so it cannot go stale relative to
//! the mappings it was built from.

use std::collections::BTreeMap;

use crate::mapping::FieldMapping;
use crate::value::CellValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultValueRegistry {
    values: BTreeMap<String, CellValue>,
}

impl DefaultValueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a mapping set.
    pub fn from_mappings(mappings: &[FieldMapping]) -> Self {
        let mut registry = Self::new();
        registry.register_mappings(mappings);
        registry
    }

    /// Register (or replace) the default for one field.
    pub fn register_field(&mut self, name: impl Into<String>, value: CellValue) {
        self.values.insert(name.into(), value);
    }

    pub fn has_default_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_default_value(&self, name: &str) -> Option<&CellValue> {
        self.values.get(name)
    }

    /// Clear, then register every `__default__` mapping that declares a
    /// `convert` default value.
    pub fn register_mappings(&mut self, mappings: &[FieldMapping]) {
        self.clear();
        for mapping in mappings.iter().filter(|m| m.is_default_source()) {
            if let Some(value) = mapping.declared_default() {
                self.values.insert(mapping.target_field.clone(), value);
            }
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::FieldTransformation;

    #[test]
    fn register_mappings_replaces_previous_state() {
        let mut registry = DefaultValueRegistry::new();
        registry.register_field("Stale", CellValue::text("old"));

        registry.register_mappings(&[FieldMapping::constant("Priority", "Medium", "string")]);

        assert!(!registry.has_default_value("Stale"));
        assert_eq!(
            registry.get_default_value("Priority"),
            Some(&CellValue::text("Medium"))
        );
    }

    #[test]
    fn only_default_sourced_mappings_register() {
        let mapped = FieldMapping::new("Unit", "Apparatus")
            .with_transformation(FieldTransformation::convert_with_default("string", "E1"));
        let no_default = FieldMapping::new(crate::DEFAULT_SOURCE_FIELD, "Agency")
            .with_transformation(FieldTransformation::convert("string"));

        let registry = DefaultValueRegistry::from_mappings(&[mapped, no_default]);

        assert!(registry.is_empty());
    }
}
