//! Per-section render context and settings lookup

use pagecraft_model::{BlockInstance, DeviceType, FieldSchema, Settings, ThemeTokens};
use pagecraft_schema::SchemaRegistry;
use serde_json::Value;

use crate::breakpoints::{device_preset, DevicePreset};

/// Everything a section renderer may read besides the section itself
pub struct RenderContext<'a> {
    pub device: DeviceType,
    pub preset: DevicePreset,
    pub tokens: &'a ThemeTokens,
    pub registry: &'a SchemaRegistry,
    /// Schema fields of the section type, empty when the type is unregistered
    pub fields: &'a [FieldSchema],
    pub is_selected: bool,
    pub selected_block: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(device: DeviceType, tokens: &'a ThemeTokens, registry: &'a SchemaRegistry) -> Self {
        Self {
            device,
            preset: device_preset(device),
            tokens,
            registry,
            fields: &[],
            is_selected: false,
            selected_block: None,
        }
    }

    pub fn with_fields(mut self, fields: &'a [FieldSchema]) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_selection(mut self, is_selected: bool, selected_block: Option<&'a str>) -> Self {
        self.is_selected = is_selected;
        self.selected_block = selected_block;
        self
    }

    pub fn is_mobile(&self) -> bool {
        self.device == DeviceType::Mobile
    }

    /// Settings reader for a section
    pub fn settings<'s>(&'s self, settings: &'s Settings) -> SettingsReader<'s> {
        SettingsReader::new(settings, self.fields)
    }

    /// Settings reader for a block, using the block type's schema defaults
    pub fn block_settings<'s>(&'s self, block: &'s BlockInstance) -> SettingsReader<'s> {
        let fields = self
            .registry
            .block_schema(&block.block_type)
            .map(|schema| schema.settings.as_slice())
            .unwrap_or(&[]);
        SettingsReader::new(&block.settings, fields)
    }
}

/// Reads settings with schema defaults as fallback.
///
/// Empty strings count as unset, so a cleared field renders its default.
pub struct SettingsReader<'a> {
    settings: &'a Settings,
    fields: &'a [FieldSchema],
}

impl<'a> SettingsReader<'a> {
    pub fn new(settings: &'a Settings, fields: &'a [FieldSchema]) -> Self {
        Self { settings, fields }
    }

    fn default_of(&self, key: &str) -> Option<&'a Value> {
        self.fields.iter().find(|f| f.id == key)?.default.as_ref()
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        match self.settings.get(key) {
            None | Some(Value::Null) => self.default_of(key),
            Some(Value::String(s)) if s.is_empty() => self.default_of(key),
            Some(value) => Some(value),
        }
    }

    pub fn str(&self, key: &str) -> String {
        match self.raw(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Explicitly set string, ignoring defaults
    pub fn explicit_str(&self, key: &str) -> Option<&'a str> {
        match self.settings.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn u64(&self, key: &str, fallback: u64) -> u64 {
        match self.raw(key) {
            Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)).unwrap_or(fallback),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(fallback),
            _ => fallback,
        }
    }

    /// Toggles read as true unless explicitly false
    pub fn flag(&self, key: &str) -> bool {
        !matches!(self.raw(key), Some(Value::Bool(false)))
    }
}
