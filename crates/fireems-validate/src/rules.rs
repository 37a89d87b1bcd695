//! Per-field validation rules, compiled once per pass.

use fireems_model::{CellValue, FieldDataType, TargetField, ValidationErrorKind, ValidationRule};
use regex::Regex;

use crate::context::ValidationContext;

/// A rule ready to run: patterns compiled, unusable rules dropped.
#[derive(Debug)]
pub(crate) enum CompiledRule<'a> {
    Min { value: f64, message: Option<&'a str> },
    Max { value: f64, message: Option<&'a str> },
    Pattern { regex: Regex, message: Option<&'a str> },
    OneOf { values: &'a [String], message: Option<&'a str> },
    Custom { name: &'a str, message: Option<&'a str> },
}

impl<'a> CompiledRule<'a> {
    /// Compile a field's rules.
    ///
    /// Invalid patterns and unknown custom check names are logged and skipped.
    pub(crate) fn compile_all(field: &'a TargetField, context: &ValidationContext) -> Vec<Self> {
        field
            .validation_rules
            .iter()
            .filter_map(|rule| Self::compile(field, rule, context))
            .collect()
    }

    fn compile(
        field: &TargetField,
        rule: &'a ValidationRule,
        context: &ValidationContext,
    ) -> Option<Self> {
        let compiled = match rule {
            ValidationRule::Min { value, message } => Self::Min {
                value: *value,
                message: message.as_deref(),
            },
            ValidationRule::Max { value, message } => Self::Max {
                value: *value,
                message: message.as_deref(),
            },
            ValidationRule::Pattern { pattern, message } => match Regex::new(pattern) {
                Ok(regex) => Self::Pattern {
                    regex,
                    message: message.as_deref(),
                },
                Err(error) => {
                    tracing::warn!(
                        field = %field.name,
                        pattern = %pattern,
                        error = %error,
                        "Skipping invalid pattern rule"
                    );
                    return None;
                }
            },
            ValidationRule::OneOf { values, message } => Self::OneOf {
                values,
                message: message.as_deref(),
            },
            ValidationRule::Custom { name, message } => {
                if context.custom_check(name).is_none() {
                    tracing::warn!(
                        field = %field.name,
                        check = %name,
                        "Skipping unknown custom check"
                    );
                    return None;
                }
                Self::Custom {
                    name,
                    message: message.as_deref(),
                }
            }
        };
        Some(compiled)
    }

    pub(crate) fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Min { .. } => ValidationErrorKind::Min,
            Self::Max { .. } => ValidationErrorKind::Max,
            Self::Pattern { .. } => ValidationErrorKind::Pattern,
            Self::OneOf { .. } => ValidationErrorKind::OneOf,
            Self::Custom { .. } => ValidationErrorKind::Custom,
        }
    }

    /// Evaluate the rule; `Some(message)` on failure.
    pub(crate) fn evaluate(
        &self,
        field: &TargetField,
        value: &CellValue,
        context: &ValidationContext,
    ) -> Option<String> {
        let name = field.name.as_str();
        match self {
            Self::Min { value: min, message } => {
                let (actual, unit) = measure(field.data_type, value)?;
                (actual < *min).then(|| {
                    override_or(*message, || format!("{name} must be at least {min}{unit}"))
                })
            }
            Self::Max { value: max, message } => {
                let (actual, unit) = measure(field.data_type, value)?;
                (actual > *max).then(|| {
                    override_or(*message, || format!("{name} must be at most {max}{unit}"))
                })
            }
            Self::Pattern { regex, message } => (!regex.is_match(&value.to_string()))
                .then(|| override_or(*message, || format!("{name} has an invalid format"))),
            Self::OneOf { values, message } => {
                let text = value.to_string();
                (!values.iter().any(|allowed| *allowed == text)).then(|| {
                    override_or(*message, || {
                        format!("{name} must be one of: {}", values.join(", "))
                    })
                })
            }
            Self::Custom { name: check, message } => context
                .custom_check(check)?
                .check(name, value)
                .map(|reason| override_or(*message, || reason)),
        }
    }
}

/// Numeric fields compare by value, everything else by character count.
fn measure(data_type: FieldDataType, value: &CellValue) -> Option<(f64, &'static str)> {
    match data_type {
        FieldDataType::Number => value.as_f64().map(|n| (n, "")),
        _ => Some((value.to_string().chars().count() as f64, " characters")),
    }
}

fn override_or(message: Option<&str>, default: impl FnOnce() -> String) -> String {
    message.map_or_else(default, str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(field: &TargetField, value: CellValue) -> Vec<(ValidationErrorKind, String)> {
        let context = ValidationContext::new();
        CompiledRule::compile_all(field, &context)
            .iter()
            .filter_map(|rule| {
                rule.evaluate(field, &value, &context)
                    .map(|message| (rule.kind(), message))
            })
            .collect()
    }

    #[test]
    fn test_numeric_bounds() {
        let field = TargetField::new("Response Minutes", FieldDataType::Number)
            .with_rule(ValidationRule::min(0.0))
            .with_rule(ValidationRule::max(120.0));
        assert!(eval(&field, CellValue::Number(12.0)).is_empty());
        assert_eq!(
            eval(&field, CellValue::Number(-1.0)),
            vec![(
                ValidationErrorKind::Min,
                "Response Minutes must be at least 0".to_string()
            )]
        );
        assert_eq!(eval(&field, CellValue::text("150"))[0].0, ValidationErrorKind::Max);
    }

    #[test]
    fn test_text_length_bounds() {
        let field = TargetField::new("Unit", FieldDataType::String)
            .with_rule(ValidationRule::min(2.0))
            .with_rule(ValidationRule::max(4.0).with_message("Unit codes are short"));
        assert_eq!(
            eval(&field, CellValue::text("E")),
            vec![(
                ValidationErrorKind::Min,
                "Unit must be at least 2 characters".to_string()
            )]
        );
        assert_eq!(
            eval(&field, CellValue::text("Engine 12")),
            vec![(ValidationErrorKind::Max, "Unit codes are short".to_string())]
        );
    }

    #[test]
    fn test_every_rule_is_reported() {
        let field = TargetField::new("Priority", FieldDataType::String)
            .with_rule(ValidationRule::pattern("^P[0-9]$"))
            .with_rule(ValidationRule::one_of(["P1", "P2", "P3"]));
        let failures = eval(&field, CellValue::text("Urgent"));
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, ValidationErrorKind::Pattern);
        assert_eq!(failures[1].1, "Priority must be one of: P1, P2, P3");
    }

    #[test]
    fn test_unusable_rules_are_skipped() {
        let field = TargetField::new("Code", FieldDataType::String)
            .with_rule(ValidationRule::pattern("("))
            .with_rule(ValidationRule::custom("geocoded"));
        let context = ValidationContext::new();
        assert!(CompiledRule::compile_all(&field, &context).is_empty());
    }

    #[test]
    fn test_custom_rule_uses_context() {
        let field = TargetField::new("Latitude", FieldDataType::Number)
            .with_rule(ValidationRule::custom("latitude"));
        assert!(eval(&field, CellValue::Number(39.0)).is_empty());
        assert_eq!(eval(&field, CellValue::Number(99.0))[0].0, ValidationErrorKind::Custom);
    }
}
