//! Export/import payload

use chrono::{DateTime, Utc};
use pagecraft_model::{TemplateDocument, ThemeTokens};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StorageError, StorageResult};

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Serialized form produced by `export_template`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub template: Option<TemplateDocument>,
    pub global_settings: Option<ThemeTokens>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

impl ExportBundle {
    pub fn new(template: Option<TemplateDocument>, global_settings: Option<ThemeTokens>) -> Self {
        Self {
            template,
            global_settings,
            exported_at: Utc::now(),
            version: EXPORT_FORMAT_VERSION.to_string(),
        }
    }

    pub fn encode(&self) -> StorageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A parsed import with its template guaranteed present
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPayload {
    pub template: TemplateDocument,
    pub global_settings: Option<ThemeTokens>,
}

/// Parse and structurally check an import payload.
///
/// The template must exist and carry an `id` and a `sections` array.
pub fn decode_import(data: &str) -> StorageResult<ImportPayload> {
    let mut root: Value =
        serde_json::from_str(data).map_err(|e| StorageError::InvalidImport(format!("not valid JSON: {}", e)))?;

    let template = match root.get_mut("template").map(Value::take) {
        Some(Value::Null) | None => {
            return Err(StorageError::InvalidImport("missing template".to_string()));
        }
        Some(template) => template,
    };

    let has_id = template.get("id").and_then(Value::as_str).is_some_and(|id| !id.is_empty());
    let has_sections = template.get("sections").is_some_and(Value::is_array);
    if !has_id || !has_sections {
        return Err(StorageError::InvalidImport("invalid template structure".to_string()));
    }

    let template: TemplateDocument =
        serde_json::from_value(template).map_err(|e| StorageError::InvalidImport(e.to_string()))?;

    let global_settings = match root.get_mut("globalSettings").map(Value::take) {
        Some(Value::Null) | None => None,
        Some(tokens) => Some(serde_json::from_value(tokens).map_err(|e| StorageError::InvalidImport(e.to_string()))?),
    };

    Ok(ImportPayload {
        template,
        global_settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{BlockInstance, SectionInstance};
    use serde_json::json;

    fn sample() -> TemplateDocument {
        let mut doc = TemplateDocument::new("home", ThemeTokens::default()).with_section(
            SectionInstance::new("cards-1", "cards-grid")
                .with_setting("columns", 3)
                .with_setting("meta", json!({ "nested": [1, "two", null] }))
                .with_block(BlockInstance::new("card-1", "feature_card").with_setting("title", "Web")),
        );
        doc.version = 7;
        doc
    }

    #[test]
    fn test_export_then_import_is_lossless() {
        let doc = sample();
        let encoded = ExportBundle::new(Some(doc.clone()), None).encode().unwrap();
        let payload = decode_import(&encoded).unwrap();

        assert_eq!(payload.template, doc);
        assert_eq!(payload.global_settings, None);
    }

    #[test]
    fn test_export_wire_keys() {
        let encoded = ExportBundle::new(Some(sample()), Some(ThemeTokens::default()))
            .encode()
            .unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["version"], json!("1.0"));
        assert!(value.get("exportedAt").is_some());
        assert!(value.get("globalSettings").is_some());
        assert_eq!(value["template"]["id"], json!("home"));
    }

    #[test]
    fn test_rejects_missing_template() {
        let err = decode_import(r#"{"template": null, "version": "1.0"}"#).unwrap_err();
        assert!(matches!(err, StorageError::InvalidImport(msg) if msg == "missing template"));
    }

    #[test]
    fn test_rejects_template_without_sections() {
        let err = decode_import(r#"{"template": {"id": "home", "updatedAt": "2024-01-01T00:00:00Z"}}"#).unwrap_err();
        assert!(matches!(err, StorageError::InvalidImport(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode_import("not json"), Err(StorageError::InvalidImport(_))));
    }
}
