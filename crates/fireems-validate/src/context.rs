//! Per-pass validation context.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fireems_model::{CellValue, DefaultValueRegistry, FieldMapping};

use crate::custom::{CustomCheck, Latitude, Longitude, NotFutureDate};

/// Everything a validation pass needs besides the rows and fields.
///
/// Build one per pass with [`ValidationContext::from_mappings`] so the
/// defaults always reflect the mapping set being validated.
#[derive(Clone)]
pub struct ValidationContext {
    defaults: DefaultValueRegistry,
    custom_checks: BTreeMap<String, Arc<dyn CustomCheck>>,
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("defaults", &self.defaults)
            .field("custom_checks", &self.custom_checks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext {
    /// Context with no defaults and the built-in custom checks.
    pub fn new() -> Self {
        let mut context = Self {
            defaults: DefaultValueRegistry::new(),
            custom_checks: BTreeMap::new(),
        };
        context.register_custom_check("latitude", Latitude);
        context.register_custom_check("longitude", Longitude);
        context.register_custom_check("notFutureDate", NotFutureDate);
        context
    }

    /// Context whose defaults come from the `__default__` mappings in `mappings`.
    pub fn from_mappings(mappings: &[FieldMapping]) -> Self {
        Self::new().with_defaults(DefaultValueRegistry::from_mappings(mappings))
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: DefaultValueRegistry) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_custom_check(
        mut self,
        name: impl Into<String>,
        check: impl CustomCheck + 'static,
    ) -> Self {
        self.register_custom_check(name, check);
        self
    }

    /// Register or replace a named check.
    pub fn register_custom_check(
        &mut self,
        name: impl Into<String>,
        check: impl CustomCheck + 'static,
    ) {
        self.custom_checks.insert(name.into(), Arc::new(check));
    }

    pub fn defaults(&self) -> &DefaultValueRegistry {
        &self.defaults
    }

    pub fn default_value(&self, field: &str) -> Option<&CellValue> {
        self.defaults.get_default_value(field)
    }

    pub fn custom_check(&self, name: &str) -> Option<&dyn CustomCheck> {
        self.custom_checks.get(name).map(|check| check.as_ref())
    }

    pub fn custom_check_names(&self) -> impl Iterator<Item = &str> {
        self.custom_checks.keys().map(String::as_str)
    }
}
