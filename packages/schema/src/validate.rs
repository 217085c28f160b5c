//! Settings validation against field schemas

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use pagecraft_model::{FieldKind, FieldSchema, Settings};
use regex::Regex;
use serde_json::Value;

use crate::error::ValidationError;

/// Validate a settings patch against an ordered field list.
///
/// Every key must name a field. `null` clears a setting and is only
/// rejected for required fields.
pub fn validate_settings(fields: &[FieldSchema], patch: &Settings) -> Result<(), ValidationError> {
    for (key, value) in patch {
        let field = fields
            .iter()
            .find(|f| &f.id == key)
            .ok_or_else(|| ValidationError::UnknownField { field: key.clone() })?;
        validate_value(field, value)?;
    }
    Ok(())
}

/// Validate one value against its field
pub fn validate_value(field: &FieldSchema, value: &Value) -> Result<(), ValidationError> {
    if value.is_null() {
        return if field.required {
            Err(ValidationError::Required {
                field: field.id.clone(),
            })
        } else {
            Ok(())
        };
    }

    match field.kind {
        kind if kind.is_textual() => {
            let text = value.as_str().ok_or_else(|| mismatch(field, "a string", value))?;
            if field.required && text.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: field.id.clone(),
                });
            }
            check_pattern(field, text)
        }
        kind if kind.is_numeric() => {
            let number = value.as_f64().ok_or_else(|| mismatch(field, "a number", value))?;
            check_bounds(field, number)
        }
        FieldKind::Toggle => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(mismatch(field, "a boolean", value))
            }
        }
        FieldKind::List | FieldKind::Repeater => {
            if value.is_array() {
                Ok(())
            } else {
                Err(mismatch(field, "a list", value))
            }
        }
        FieldKind::Select => {
            if !(value.is_string() || value.is_number()) {
                return Err(mismatch(field, "an option value", value));
            }
            if field.options.is_empty() || field.options.iter().any(|o| &o.value == value) {
                Ok(())
            } else {
                Err(ValidationError::NotAnOption {
                    field: field.id.clone(),
                    value: value.to_string(),
                })
            }
        }
        _ => Ok(()),
    }
}

fn check_bounds(field: &FieldSchema, number: f64) -> Result<(), ValidationError> {
    if let Some(min) = field.min {
        if number < min {
            return Err(ValidationError::BelowMinimum {
                field: field.id.clone(),
                value: number,
                min,
            });
        }
    }
    if let Some(max) = field.max {
        if number > max {
            return Err(ValidationError::AboveMaximum {
                field: field.id.clone(),
                value: number,
                max,
            });
        }
    }
    Ok(())
}

fn check_pattern(field: &FieldSchema, text: &str) -> Result<(), ValidationError> {
    let Some(validation) = &field.validation else {
        return Ok(());
    };
    let Some(pattern) = &validation.pattern else {
        return Ok(());
    };

    // Empty optional values skip the pattern
    if text.is_empty() && !field.required {
        return Ok(());
    }

    match compiled_pattern(&field.id, pattern) {
        Some(re) if !re.is_match(text) => Err(ValidationError::PatternMismatch {
            field: field.id.clone(),
            message: validation
                .message
                .clone()
                .unwrap_or_else(|| format!("must match {}", pattern)),
        }),
        _ => Ok(()),
    }
}

type PatternCache = RwLock<HashMap<String, Option<Regex>>>;

fn pattern_cache() -> &'static PatternCache {
    static CACHE: OnceLock<PatternCache> = OnceLock::new();
    CACHE.get_or_init(Default::default)
}

/// Compile `pattern` once per process. Invalid patterns are cached as `None`
/// and only logged the first time they are seen.
fn compiled_pattern(field_id: &str, pattern: &str) -> Option<Regex> {
    if let Some(cached) = pattern_cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
    {
        return cached.clone();
    }

    let compiled = match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(field = %field_id, error = %e, "Ignoring invalid validation pattern");
            None
        }
    };
    pattern_cache()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(pattern.to_string())
        .or_insert(compiled)
        .clone()
}

fn mismatch(field: &FieldSchema, expected: &'static str, value: &Value) -> ValidationError {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    };
    ValidationError::KindMismatch {
        field: field.id.clone(),
        expected,
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::FieldValidation;
    use serde_json::json;

    fn settings(value: Value) -> Settings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unknown_field_rejected() {
        let fields = vec![FieldSchema::new("title", "Title", FieldKind::Text)];
        let err = validate_settings(&fields, &settings(json!({ "nope": "x" }))).unwrap_err();
        assert_eq!(err, ValidationError::UnknownField { field: "nope".to_string() });
    }

    #[test]
    fn test_range_bounds() {
        let field = FieldSchema::new("rating", "Rating", FieldKind::Range).with_bounds(Some(1.0), Some(5.0), Some(1.0));

        assert!(validate_value(&field, &json!(3)).is_ok());
        assert!(matches!(
            validate_value(&field, &json!(0)),
            Err(ValidationError::BelowMinimum { .. })
        ));
        assert!(matches!(
            validate_value(&field, &json!(6.5)),
            Err(ValidationError::AboveMaximum { .. })
        ));
        assert!(matches!(
            validate_value(&field, &json!("3")),
            Err(ValidationError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_select_accepts_numeric_options() {
        let field = FieldSchema::new("columns", "Columns", FieldKind::Select)
            .with_option("2 Columns", 2)
            .with_option("3 Columns", 3);

        assert!(validate_value(&field, &json!(3)).is_ok());
        assert!(matches!(
            validate_value(&field, &json!(5)),
            Err(ValidationError::NotAnOption { .. })
        ));
    }

    #[test]
    fn test_required_rejects_null_and_blank() {
        let field = FieldSchema::new("title", "Title", FieldKind::Text).required();

        assert!(matches!(validate_value(&field, &Value::Null), Err(ValidationError::Required { .. })));
        assert!(matches!(validate_value(&field, &json!("  ")), Err(ValidationError::Required { .. })));
        assert!(validate_value(&field, &json!("Hello")).is_ok());
    }

    #[test]
    fn test_null_clears_optional_setting() {
        let field = FieldSchema::new("subtitle", "Subtitle", FieldKind::Richtext);
        assert!(validate_value(&field, &Value::Null).is_ok());
    }

    #[test]
    fn test_pattern_validation() {
        let mut field = FieldSchema::new("slug", "Slug", FieldKind::Text);
        field.validation = Some(FieldValidation {
            pattern: Some("^[a-z-]+$".to_string()),
            message: Some("lowercase letters only".to_string()),
        });

        assert!(validate_value(&field, &json!("about-us")).is_ok());
        assert!(validate_value(&field, &json!("")).is_ok());
        let err = validate_value(&field, &json!("About Us")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PatternMismatch {
                field: "slug".to_string(),
                message: "lowercase letters only".to_string(),
            }
        );
    }

    #[test]
    fn test_patterns_compile_once() {
        let mut field = FieldSchema::new("code", "Code", FieldKind::Text);
        field.validation = Some(FieldValidation {
            pattern: Some("^[A-Z]{3}-[0-9]+$".to_string()),
            message: None,
        });

        assert!(validate_value(&field, &json!("ABC-12")).is_ok());
        assert!(pattern_cache().read().unwrap().contains_key("^[A-Z]{3}-[0-9]+$"));
        assert!(validate_value(&field, &json!("abc")).is_err());

        field.validation = Some(FieldValidation {
            pattern: Some("([unclosed".to_string()),
            message: None,
        });
        assert!(validate_value(&field, &json!("anything")).is_ok());
        assert!(matches!(pattern_cache().read().unwrap().get("([unclosed"), Some(None)));
    }

    #[test]
    fn test_toggle_and_list_kinds() {
        let toggle = FieldSchema::new("showButton", "Show Button", FieldKind::Toggle);
        let list = FieldSchema::new("items", "Items", FieldKind::List);

        assert!(validate_value(&toggle, &json!(false)).is_ok());
        assert!(validate_value(&toggle, &json!("false")).is_err());
        assert!(validate_value(&list, &json!(["a", "b"])).is_ok());
        assert!(validate_value(&list, &json!({ "a": 1 })).is_err());
    }
}
