//! Schema shapes for section and block settings
//!
//! A schema is the settings contract of a content type: an ordered list of
//! fields, each with a value kind, default and constraints. Schemas are data;
//! the registry that owns them lives in `pagecraft-schema`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Settings;

/// Value kind of an editable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Richtext,
    Select,
    Number,
    Range,
    Color,
    Image,
    Url,
    Toggle,
    List,
    Repeater,
}

impl FieldKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Range)
    }

    /// Kinds whose values are plain strings
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Richtext | FieldKind::Color | FieldKind::Image | FieldKind::Url
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Richtext => "richtext",
            FieldKind::Select => "select",
            FieldKind::Number => "number",
            FieldKind::Range => "range",
            FieldKind::Color => "color",
            FieldKind::Image => "image",
            FieldKind::Url => "url",
            FieldKind::Toggle => "toggle",
            FieldKind::List => "list",
            FieldKind::Repeater => "repeater",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One editable setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub id: String,
    pub label: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldSchema {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            default: None,
            required: false,
            description: None,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
            placeholder: None,
            validation: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    pub fn with_option(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.push(SelectOption {
            label: label.into(),
            value: value.into(),
        });
        self
    }
}

/// Settings contract of a nested block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSchema {
    #[serde(rename = "type")]
    pub block_type: String,
    pub label: String,
    #[serde(default)]
    pub settings: Vec<FieldSchema>,
}

/// Named partial settings bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub settings: Settings,
}

/// Settings contract of a top-level section type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSchema {
    #[serde(rename = "type")]
    pub section_type: String,
    pub label: String,
    #[serde(default)]
    pub settings: Vec<FieldSchema>,

    /// Block types permitted as children. Empty means the section takes no blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockSchema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_blocks: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
}

impl SectionSchema {
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.settings.iter().find(|f| f.id == id)
    }

    pub fn permits_block(&self, block_type: &str) -> bool {
        self.blocks.iter().any(|b| b.block_type == block_type)
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

impl BlockSchema {
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.settings.iter().find(|f| f.id == id)
    }
}

/// Entry of the "add section" menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    #[serde(rename = "type")]
    pub section_type: String,
    pub label: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_kind_wire_name() {
        let field = FieldSchema::new("rating", "Rating", FieldKind::Range)
            .with_bounds(Some(1.0), Some(5.0), Some(1.0))
            .with_default(5);

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], json!("range"));
        assert_eq!(value["default"], json!(5));
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_section_schema_lookups() {
        let schema = SectionSchema {
            section_type: "cards-grid".to_string(),
            label: "Cards Grid".to_string(),
            settings: vec![FieldSchema::new("title", "Title", FieldKind::Text)],
            blocks: vec![BlockSchema {
                block_type: "feature_card".to_string(),
                label: "Feature Card".to_string(),
                settings: vec![],
            }],
            max_blocks: Some(12),
            presets: vec![],
        };

        assert!(schema.field("title").is_some());
        assert!(schema.field("missing").is_none());
        assert!(schema.permits_block("feature_card"));
        assert!(!schema.permits_block("testimonial"));
    }
}
