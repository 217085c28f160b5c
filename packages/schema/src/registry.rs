use std::collections::HashMap;

use pagecraft_model::{BlockSchema, SectionSchema, SectionSummary, Settings};

use crate::builtin::{builtin_block_schemas, builtin_section_schemas};
use crate::error::ValidationError;
use crate::validate::validate_settings;

/// Outcome of checking settings against a type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCheck {
    /// The type is registered and every value passed
    Valid,
    /// No schema for the type tag; settings are accepted unchecked
    UnknownType,
}

/// Section and block schemas keyed by type tag.
///
/// Sections keep registration order so the "add section" menu is stable.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    sections: Vec<SectionSchema>,
    section_index: HashMap<String, usize>,
    blocks: HashMap<String, BlockSchema>,
}

impl SchemaRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in catalog
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for block in builtin_block_schemas() {
            registry.register_block(block);
        }
        for section in builtin_section_schemas() {
            registry.register_section(section);
        }
        registry
    }

    /// Register or replace a section type. Nested block schemas are
    /// registered too unless a block of that type is already known.
    pub fn register_section(&mut self, schema: SectionSchema) -> &mut Self {
        for block in &schema.blocks {
            self.blocks
                .entry(block.block_type.clone())
                .or_insert_with(|| block.clone());
        }

        match self.section_index.get(&schema.section_type) {
            Some(&index) => self.sections[index] = schema,
            None => {
                self.section_index
                    .insert(schema.section_type.clone(), self.sections.len());
                self.sections.push(schema);
            }
        }
        self
    }

    pub fn register_block(&mut self, schema: BlockSchema) -> &mut Self {
        self.blocks.insert(schema.block_type.clone(), schema);
        self
    }

    pub fn section_schema(&self, section_type: &str) -> Option<&SectionSchema> {
        self.section_index
            .get(section_type)
            .map(|&index| &self.sections[index])
    }

    pub fn block_schema(&self, block_type: &str) -> Option<&BlockSchema> {
        self.blocks.get(block_type)
    }

    pub fn has_section_type(&self, section_type: &str) -> bool {
        self.section_index.contains_key(section_type)
    }

    pub fn section_types(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.section_type.as_str())
    }

    /// Menu entries for every registered section type
    pub fn list_available_sections(&self) -> Vec<SectionSummary> {
        self.sections
            .iter()
            .map(|schema| SectionSummary {
                section_type: schema.section_type.clone(),
                label: schema.label.clone(),
                description: format!("Add a {} to your page", schema.label.to_lowercase()),
            })
            .collect()
    }

    /// Field defaults for a section type. Unknown types yield empty settings.
    pub fn default_section_settings(&self, section_type: &str) -> Settings {
        self.section_schema(section_type)
            .map(|schema| collect_defaults(&schema.settings))
            .unwrap_or_default()
    }

    pub fn default_block_settings(&self, block_type: &str) -> Settings {
        self.block_schema(block_type)
            .map(|schema| collect_defaults(&schema.settings))
            .unwrap_or_default()
    }

    /// Defaults overlaid with a named preset
    pub fn preset_settings(&self, section_type: &str, preset: &str) -> Result<Settings, ValidationError> {
        let unknown = || ValidationError::UnknownPreset {
            section_type: section_type.to_string(),
            preset: preset.to_string(),
        };
        let schema = self.section_schema(section_type).ok_or_else(unknown)?;
        let preset = schema.preset(preset).ok_or_else(unknown)?;

        let mut settings = collect_defaults(&schema.settings);
        settings.extend(preset.settings.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(settings)
    }

    pub fn check_section_settings(&self, section_type: &str, patch: &Settings) -> Result<SchemaCheck, ValidationError> {
        match self.section_schema(section_type) {
            Some(schema) => validate_settings(&schema.settings, patch).map(|_| SchemaCheck::Valid),
            None => Ok(SchemaCheck::UnknownType),
        }
    }

    pub fn check_block_settings(&self, block_type: &str, patch: &Settings) -> Result<SchemaCheck, ValidationError> {
        match self.block_schema(block_type) {
            Some(schema) => validate_settings(&schema.settings, patch).map(|_| SchemaCheck::Valid),
            None => Ok(SchemaCheck::UnknownType),
        }
    }

    /// Check that a section can take one more block of `block_type`.
    ///
    /// Unknown section types accept any block.
    pub fn check_block_insert(
        &self,
        section_type: &str,
        block_type: &str,
        current_count: usize,
    ) -> Result<SchemaCheck, ValidationError> {
        let Some(schema) = self.section_schema(section_type) else {
            return Ok(SchemaCheck::UnknownType);
        };

        if !schema.permits_block(block_type) {
            return Err(ValidationError::BlockNotPermitted {
                section_type: section_type.to_string(),
                block_type: block_type.to_string(),
            });
        }

        if let Some(max) = schema.max_blocks {
            if current_count >= max {
                return Err(ValidationError::TooManyBlocks {
                    section_type: section_type.to_string(),
                    max,
                });
            }
        }

        Ok(SchemaCheck::Valid)
    }
}

fn collect_defaults(fields: &[pagecraft_model::FieldSchema]) -> Settings {
    fields
        .iter()
        .filter_map(|f| f.default.clone().map(|d| (f.id.clone(), d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{FieldKind, FieldSchema};
    use serde_json::json;

    fn settings(value: serde_json::Value) -> Settings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_lookup_unknown_type_is_none() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.section_schema("hero").is_some());
        assert!(registry.section_schema("carousel").is_none());
        assert!(registry.block_schema("testimonial").is_some());
        assert!(registry.block_schema("nope").is_none());
    }

    #[test]
    fn test_list_available_sections() {
        let registry = SchemaRegistry::builtin();
        let list = registry.list_available_sections();

        assert_eq!(list.len(), 6);
        assert_eq!(list[0].section_type, "hero");
        assert_eq!(list[0].description, "Add a hero section to your page");
        assert_eq!(list[4].description, "Add a call to action banner to your page");
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = SchemaRegistry::builtin();
        let mut hero = registry.section_schema("hero").unwrap().clone();
        hero.label = "Big Banner".to_string();
        registry.register_section(hero);

        let list = registry.list_available_sections();
        assert_eq!(list.len(), 6);
        assert_eq!(list[0].label, "Big Banner");
    }

    #[test]
    fn test_fake_schema_registry() {
        let mut registry = SchemaRegistry::new();
        registry.register_section(SectionSchema {
            section_type: "banner".to_string(),
            label: "Banner".to_string(),
            settings: vec![FieldSchema::new("size", "Size", FieldKind::Number)
                .with_bounds(Some(1.0), Some(3.0), None)
                .with_default(2)],
            blocks: vec![],
            max_blocks: None,
            presets: vec![],
        });

        assert_eq!(registry.default_section_settings("banner")["size"], json!(2));
        assert!(registry
            .check_section_settings("banner", &settings(json!({ "size": 9 })))
            .is_err());
    }

    #[test]
    fn test_unknown_type_is_accepted_but_flagged() {
        let registry = SchemaRegistry::builtin();
        let check = registry
            .check_section_settings("carousel", &settings(json!({ "anything": 1 })))
            .unwrap();
        assert_eq!(check, SchemaCheck::UnknownType);
    }

    #[test]
    fn test_preset_overlays_defaults() {
        let registry = SchemaRegistry::builtin();
        let settings = registry.preset_settings("cards-grid", "3 Feature Cards").unwrap();

        assert_eq!(settings["title"], json!("Our Services"));
        assert_eq!(settings["cardStyle"], json!("default"));
        assert!(registry.preset_settings("cards-grid", "Nope").is_err());
    }

    #[test]
    fn test_block_insert_constraints() {
        let registry = SchemaRegistry::builtin();

        assert_eq!(
            registry.check_block_insert("cards-grid", "feature_card", 3).unwrap(),
            SchemaCheck::Valid
        );
        assert!(matches!(
            registry.check_block_insert("cards-grid", "testimonial", 0),
            Err(ValidationError::BlockNotPermitted { .. })
        ));
        assert!(matches!(
            registry.check_block_insert("cards-grid", "feature_card", 12),
            Err(ValidationError::TooManyBlocks { max: 12, .. })
        ));
        assert!(matches!(
            registry.check_block_insert("hero", "feature_card", 0),
            Err(ValidationError::BlockNotPermitted { .. })
        ));
    }
}
