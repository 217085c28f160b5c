//! # Template Documents
//!
//! A template document is the full content description of one page: an
//! ordered list of sections (render order), each holding settings and an
//! ordered list of blocks, plus theme tokens, locale and version.
//!
//! Sections are stored behind `Arc` so cloning a document (for history
//! snapshots) shares every untouched section with the original. Mutation
//! goes through [`TemplateDocument::section_mut`], which copies only the
//! section being changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::theme::ThemeTokens;

/// Settings mapping of a section or block
pub type Settings = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Tablet => "tablet",
            DeviceType::Mobile => "mobile",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "desktop" => Some(DeviceType::Desktop),
            "tablet" => Some(DeviceType::Tablet),
            "mobile" => Some(DeviceType::Mobile),
            _ => None,
        }
    }
}

/// Which of the two stored records of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Draft,
    Published,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Draft => "draft",
            DocumentKind::Published => "published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub settings: Settings,
}

impl BlockInstance {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            settings: Settings::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub blocks: Vec<BlockInstance>,
}

impl SectionInstance {
    pub fn new(id: impl Into<String>, section_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_type: section_type.into(),
            settings: Settings::new(),
            blocks: Vec::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_block(mut self, block: BlockInstance) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn block(&self, block_id: &str) -> Option<&BlockInstance> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut BlockInstance> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    /// String setting, if present and a string
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }
}

/// Full content description of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    /// Page identity ('home', 'about', ...)
    #[serde(rename = "id")]
    pub template_id: String,

    /// Sections in render order
    #[serde(default)]
    pub sections: Vec<Arc<SectionInstance>>,

    #[serde(default)]
    pub theme_tokens: ThemeTokens,

    #[serde(default)]
    pub locale: Locale,

    /// Increases on every persisted mutation
    #[serde(default)]
    pub version: u64,

    pub updated_at: DateTime<Utc>,
}

impl TemplateDocument {
    pub fn new(template_id: impl Into<String>, theme_tokens: ThemeTokens) -> Self {
        Self {
            template_id: template_id.into(),
            sections: Vec::new(),
            theme_tokens,
            locale: Locale::En,
            version: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn with_section(mut self, section: SectionInstance) -> Self {
        self.sections.push(Arc::new(section));
        self
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionInstance> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .map(|s| s.as_ref())
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Mutable access to one section. Copies it first if a snapshot still shares it.
    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut SectionInstance> {
        self.sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .map(Arc::make_mut)
    }

    pub fn block(&self, section_id: &str, block_id: &str) -> Option<&BlockInstance> {
        self.section(section_id).and_then(|s| s.block(block_id))
    }

    /// Section type tags in render order
    pub fn section_types(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.section_type.as_str())
    }

    /// True when `other` shares the allocation of the section at `index`
    pub fn shares_section_with(&self, other: &TemplateDocument, index: usize) -> bool {
        match (self.sections.get(index), other.sections.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
