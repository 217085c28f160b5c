//! # Document Mutations
//!
//! Structural operations on a template document.
//!
//! ## Semantics
//!
//! - Every mutation validates before touching the document. A rejected
//!   mutation leaves the document exactly as it was.
//! - Settings updates are shallow merges. A `null` value removes the key.
//! - Settings for registered types are checked against their schema.
//!   Unknown types are accepted unchecked and reported in the outcome so
//!   the renderer can fall back to a placeholder.
//! - Moving the first item up or the last item down is a no-op, not an error.
//! - Reorders must name every existing id exactly once.
//! - New ids are `<type>-<n>` with the smallest free `n`.

use std::collections::HashSet;
use std::sync::Arc;

use pagecraft_model::{
    BlockInstance, Locale, SectionInstance, Settings, TemplateDocument, ThemeTokensPatch,
};
use pagecraft_schema::{SchemaCheck, SchemaRegistry, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    AddSection {
        section_type: String,
        #[serde(default)]
        after: Option<String>,
        #[serde(default)]
        preset: Option<String>,
    },
    RemoveSection {
        section_id: String,
    },
    DuplicateSection {
        section_id: String,
    },
    MoveSectionUp {
        section_id: String,
    },
    MoveSectionDown {
        section_id: String,
    },
    ReorderSections {
        section_ids: Vec<String>,
    },
    UpdateSectionSettings {
        section_id: String,
        settings: Settings,
    },

    AddBlock {
        section_id: String,
        block_type: String,
        #[serde(default)]
        after: Option<String>,
    },
    RemoveBlock {
        section_id: String,
        block_id: String,
    },
    DuplicateBlock {
        section_id: String,
        block_id: String,
    },
    MoveBlockUp {
        section_id: String,
        block_id: String,
    },
    MoveBlockDown {
        section_id: String,
        block_id: String,
    },
    ReorderBlocks {
        section_id: String,
        block_ids: Vec<String>,
    },
    UpdateBlockSettings {
        section_id: String,
        block_id: String,
        settings: Settings,
    },

    UpdateThemeTokens {
        patch: ThemeTokensPatch,
    },
    SetLocale {
        locale: Locale,
    },
    SetDarkMode {
        enabled: bool,
    },
    SetRtl {
        enabled: bool,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Block not found: {block_id} in section {section_id}")]
    BlockNotFound { section_id: String, block_id: String },

    #[error("Reorder must list every existing id exactly once")]
    InvalidOrder,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Item created by a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Created {
    Section(String),
    Block { section_id: String, block_id: String },
}

/// What an applied mutation did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResult {
    /// False when the mutation was a no-op
    pub changed: bool,
    pub created: Option<Created>,
    /// Type tag that had no registered schema
    pub unknown_type: Option<String>,
}

impl MutationResult {
    fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }

    fn flag(mut self, check: SchemaCheck, type_tag: &str) -> Self {
        if check == SchemaCheck::UnknownType {
            self.unknown_type = Some(type_tag.to_string());
        }
        self
    }
}

impl Mutation {
    /// Human-readable label used for history entries
    pub fn label(&self) -> String {
        match self {
            Mutation::AddSection { section_type, .. } => format!("Add {} section", section_type),
            Mutation::RemoveSection { .. } => "Remove section".to_string(),
            Mutation::DuplicateSection { .. } => "Duplicate section".to_string(),
            Mutation::MoveSectionUp { .. } => "Move section up".to_string(),
            Mutation::MoveSectionDown { .. } => "Move section down".to_string(),
            Mutation::ReorderSections { .. } => "Reorder sections".to_string(),
            Mutation::UpdateSectionSettings { .. } => "Update section settings".to_string(),
            Mutation::AddBlock { block_type, .. } => format!("Add {} block", block_type),
            Mutation::RemoveBlock { .. } => "Remove block".to_string(),
            Mutation::DuplicateBlock { .. } => "Duplicate block".to_string(),
            Mutation::MoveBlockUp { .. } => "Move block up".to_string(),
            Mutation::MoveBlockDown { .. } => "Move block down".to_string(),
            Mutation::ReorderBlocks { .. } => "Reorder blocks".to_string(),
            Mutation::UpdateBlockSettings { .. } => "Update block settings".to_string(),
            Mutation::UpdateThemeTokens { .. } => "Update theme settings".to_string(),
            Mutation::SetLocale { .. } => "Change locale".to_string(),
            Mutation::SetDarkMode { .. } => "Toggle dark mode".to_string(),
            Mutation::SetRtl { .. } => "Toggle RTL".to_string(),
        }
    }

    /// Apply to `doc`. On error `doc` is untouched.
    pub fn apply(&self, doc: &mut TemplateDocument, registry: &SchemaRegistry) -> Result<MutationResult, MutationError> {
        match self {
            Mutation::AddSection {
                section_type,
                after,
                preset,
            } => apply_add_section(doc, registry, section_type, after.as_deref(), preset.as_deref()),

            Mutation::RemoveSection { section_id } => {
                let index = section_index(doc, section_id)?;
                doc.sections.remove(index);
                Ok(MutationResult::changed())
            }

            Mutation::DuplicateSection { section_id } => apply_duplicate_section(doc, section_id),

            Mutation::MoveSectionUp { section_id } => {
                let index = section_index(doc, section_id)?;
                if index == 0 {
                    return Ok(MutationResult::unchanged());
                }
                doc.sections.swap(index, index - 1);
                Ok(MutationResult::changed())
            }

            Mutation::MoveSectionDown { section_id } => {
                let index = section_index(doc, section_id)?;
                if index + 1 >= doc.sections.len() {
                    return Ok(MutationResult::unchanged());
                }
                doc.sections.swap(index, index + 1);
                Ok(MutationResult::changed())
            }

            Mutation::ReorderSections { section_ids } => {
                let current: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
                check_permutation(&current, section_ids)?;
                let mut reordered = Vec::with_capacity(doc.sections.len());
                for id in section_ids {
                    if let Some(section) = doc.sections.iter().find(|s| &s.id == id) {
                        reordered.push(Arc::clone(section));
                    }
                }
                let changed = reordered
                    .iter()
                    .zip(&doc.sections)
                    .any(|(a, b)| !Arc::ptr_eq(a, b));
                doc.sections = reordered;
                Ok(MutationResult {
                    changed,
                    ..MutationResult::default()
                })
            }

            Mutation::UpdateSectionSettings { section_id, settings } => {
                let section_type = section(doc, section_id)?.section_type.clone();
                let check = registry.check_section_settings(&section_type, settings)?;
                if let Some(section) = doc.section_mut(section_id) {
                    merge_settings(&mut section.settings, settings);
                }
                Ok(MutationResult::changed().flag(check, &section_type))
            }

            Mutation::AddBlock {
                section_id,
                block_type,
                after,
            } => apply_add_block(doc, registry, section_id, block_type, after.as_deref()),

            Mutation::RemoveBlock { section_id, block_id } => {
                let index = block_index(doc, section_id, block_id)?;
                if let Some(section) = doc.section_mut(section_id) {
                    section.blocks.remove(index);
                }
                Ok(MutationResult::changed())
            }

            Mutation::DuplicateBlock { section_id, block_id } => {
                let index = block_index(doc, section_id, block_id)?;
                let section = section(doc, section_id)?;
                let mut copy = section.blocks[index].clone();
                copy.id = next_id(&copy.block_type, section.blocks.iter().map(|b| b.id.as_str()));
                let created = Created::Block {
                    section_id: section_id.clone(),
                    block_id: copy.id.clone(),
                };

                if let Some(section) = doc.section_mut(section_id) {
                    section.blocks.insert(index + 1, copy);
                }
                Ok(MutationResult {
                    changed: true,
                    created: Some(created),
                    unknown_type: None,
                })
            }

            Mutation::MoveBlockUp { section_id, block_id } => {
                let index = block_index(doc, section_id, block_id)?;
                if index == 0 {
                    return Ok(MutationResult::unchanged());
                }
                if let Some(section) = doc.section_mut(section_id) {
                    section.blocks.swap(index, index - 1);
                }
                Ok(MutationResult::changed())
            }

            Mutation::MoveBlockDown { section_id, block_id } => {
                let index = block_index(doc, section_id, block_id)?;
                if index + 1 >= section(doc, section_id)?.blocks.len() {
                    return Ok(MutationResult::unchanged());
                }
                if let Some(section) = doc.section_mut(section_id) {
                    section.blocks.swap(index, index + 1);
                }
                Ok(MutationResult::changed())
            }

            Mutation::ReorderBlocks { section_id, block_ids } => {
                let current: Vec<String> = section(doc, section_id)?
                    .blocks
                    .iter()
                    .map(|b| b.id.clone())
                    .collect();
                let current_refs: Vec<&str> = current.iter().map(String::as_str).collect();
                check_permutation(&current_refs, block_ids)?;
                if current == *block_ids {
                    return Ok(MutationResult::unchanged());
                }

                if let Some(section) = doc.section_mut(section_id) {
                    let mut blocks = std::mem::take(&mut section.blocks);
                    for id in block_ids {
                        if let Some(pos) = blocks.iter().position(|b| &b.id == id) {
                            section.blocks.push(blocks.remove(pos));
                        }
                    }
                }
                Ok(MutationResult::changed())
            }

            Mutation::UpdateBlockSettings {
                section_id,
                block_id,
                settings,
            } => {
                let index = block_index(doc, section_id, block_id)?;
                let block_type = section(doc, section_id)?.blocks[index].block_type.clone();
                let check = registry.check_block_settings(&block_type, settings)?;
                if let Some(section) = doc.section_mut(section_id) {
                    merge_settings(&mut section.blocks[index].settings, settings);
                }
                Ok(MutationResult::changed().flag(check, &block_type))
            }

            Mutation::UpdateThemeTokens { patch } => {
                if patch.is_empty() {
                    return Ok(MutationResult::unchanged());
                }
                doc.theme_tokens.apply(patch.clone());
                Ok(MutationResult::changed())
            }

            Mutation::SetLocale { locale } => {
                if doc.locale == *locale {
                    return Ok(MutationResult::unchanged());
                }
                doc.locale = *locale;
                Ok(MutationResult::changed())
            }

            Mutation::SetDarkMode { enabled } => {
                if doc.theme_tokens.dark_mode == *enabled {
                    return Ok(MutationResult::unchanged());
                }
                doc.theme_tokens.dark_mode = *enabled;
                Ok(MutationResult::changed())
            }

            Mutation::SetRtl { enabled } => {
                if doc.theme_tokens.rtl == *enabled {
                    return Ok(MutationResult::unchanged());
                }
                doc.theme_tokens.rtl = *enabled;
                Ok(MutationResult::changed())
            }
        }
    }
}

/// Id that adding a `section_type` section to `doc` will assign
pub(crate) fn next_section_id(doc: &TemplateDocument, section_type: &str) -> String {
    next_id(section_type, doc.sections.iter().map(|s| s.id.as_str()))
}

/// Id that adding a `block_type` block to `section` will assign
pub(crate) fn next_block_id(section: &SectionInstance, block_type: &str) -> String {
    next_id(block_type, section.blocks.iter().map(|b| b.id.as_str()))
}

fn apply_add_section(
    doc: &mut TemplateDocument,
    registry: &SchemaRegistry,
    section_type: &str,
    after: Option<&str>,
    preset: Option<&str>,
) -> Result<MutationResult, MutationError> {
    let insert_at = match after {
        Some(after_id) => section_index(doc, after_id)? + 1,
        None => doc.sections.len(),
    };

    let settings = match preset {
        Some(name) => registry.preset_settings(section_type, name)?,
        None => registry.default_section_settings(section_type),
    };
    let check = if registry.has_section_type(section_type) {
        SchemaCheck::Valid
    } else {
        SchemaCheck::UnknownType
    };

    let mut section = SectionInstance::new(next_section_id(doc, section_type), section_type);
    section.settings = settings;
    let id = section.id.clone();
    doc.sections.insert(insert_at, Arc::new(section));

    Ok(MutationResult {
        changed: true,
        created: Some(Created::Section(id)),
        unknown_type: None,
    }
    .flag(check, section_type))
}

fn apply_duplicate_section(doc: &mut TemplateDocument, section_id: &str) -> Result<MutationResult, MutationError> {
    let index = section_index(doc, section_id)?;
    let mut copy = doc.sections[index].as_ref().clone();
    copy.id = next_id(&copy.section_type, doc.sections.iter().map(|s| s.id.as_str()));

    let mut taken: Vec<String> = Vec::with_capacity(copy.blocks.len());
    for block in &mut copy.blocks {
        block.id = next_id(&block.block_type, taken.iter().map(String::as_str));
        taken.push(block.id.clone());
    }

    let id = copy.id.clone();
    doc.sections.insert(index + 1, Arc::new(copy));
    Ok(MutationResult {
        changed: true,
        created: Some(Created::Section(id)),
        unknown_type: None,
    })
}

fn apply_add_block(
    doc: &mut TemplateDocument,
    registry: &SchemaRegistry,
    section_id: &str,
    block_type: &str,
    after: Option<&str>,
) -> Result<MutationResult, MutationError> {
    let section = section(doc, section_id)?;
    let check = registry.check_block_insert(&section.section_type, block_type, section.blocks.len())?;

    let insert_at = match after {
        Some(after_id) => block_index(doc, section_id, after_id)? + 1,
        None => section.blocks.len(),
    };

    let mut block = BlockInstance::new(next_block_id(section, block_type), block_type);
    block.settings = registry.default_block_settings(block_type);
    let created = Created::Block {
        section_id: section_id.to_string(),
        block_id: block.id.clone(),
    };

    let flagged_type = if registry.block_schema(block_type).is_none() {
        Some(block_type.to_string())
    } else if check == SchemaCheck::UnknownType {
        Some(section.section_type.clone())
    } else {
        None
    };

    if let Some(section) = doc.section_mut(section_id) {
        section.blocks.insert(insert_at, block);
    }
    Ok(MutationResult {
        changed: true,
        created: Some(created),
        unknown_type: flagged_type,
    })
}

fn section<'a>(doc: &'a TemplateDocument, section_id: &str) -> Result<&'a SectionInstance, MutationError> {
    doc.section(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn section_index(doc: &TemplateDocument, section_id: &str) -> Result<usize, MutationError> {
    doc.section_index(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn block_index(doc: &TemplateDocument, section_id: &str, block_id: &str) -> Result<usize, MutationError> {
    section(doc, section_id)?
        .block_index(block_id)
        .ok_or_else(|| MutationError::BlockNotFound {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })
}

fn merge_settings(target: &mut Settings, patch: &Settings) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn check_permutation(current: &[&str], proposed: &[String]) -> Result<(), MutationError> {
    if current.len() != proposed.len() {
        return Err(MutationError::InvalidOrder);
    }
    let existing: HashSet<&str> = current.iter().copied().collect();
    let mut seen = HashSet::new();
    for id in proposed {
        if !existing.contains(id.as_str()) || !seen.insert(id.as_str()) {
            return Err(MutationError::InvalidOrder);
        }
    }
    Ok(())
}

/// Smallest free `<prefix>-<n>` id, starting at 1
pub(crate) fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = existing.collect();
    (1..)
        .map(|n| format!("{}-{}", prefix, n))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| format!("{}-{}", prefix, taken.len() + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_schema::default_template;
    use serde_json::json;

    fn home() -> TemplateDocument {
        default_template("home").unwrap()
    }

    fn ids(doc: &TemplateDocument) -> Vec<&str> {
        doc.sections.iter().map(|s| s.id.as_str()).collect()
    }

    fn settings(value: serde_json::Value) -> Settings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateSectionSettings {
            section_id: "hero-1".to_string(),
            settings: settings(json!({ "title": "Hi" })),
        };

        let value = serde_json::to_value(&mutation).unwrap();
        assert_eq!(value["type"], json!("updateSectionSettings"));
        assert_eq!(value["sectionId"], json!("hero-1"));

        let parsed: Mutation = serde_json::from_value(json!({ "type": "addSection", "sectionType": "hero" })).unwrap();
        assert_eq!(
            parsed,
            Mutation::AddSection {
                section_type: "hero".to_string(),
                after: None,
                preset: None
            }
        );
    }

    #[test]
    fn test_add_section_after_with_defaults() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let result = Mutation::AddSection {
            section_type: "hero".to_string(),
            after: Some("hero-1".to_string()),
            preset: None,
        }
        .apply(&mut doc, &registry)
        .unwrap();

        assert_eq!(result.created, Some(Created::Section("hero-2".to_string())));
        assert_eq!(ids(&doc)[1], "hero-2");
        assert_eq!(doc.section("hero-2").unwrap().settings["alignment"], json!("center"));
    }

    #[test]
    fn test_add_section_with_preset() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        Mutation::AddSection {
            section_type: "cards-grid".to_string(),
            after: None,
            preset: Some("3 Feature Cards".to_string()),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        let added = doc.sections.last().unwrap();
        assert_eq!(added.id, "cards-grid-1");
        assert_eq!(added.settings["title"], json!("Our Services"));
    }

    #[test]
    fn test_unknown_section_type_is_flagged() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let result = Mutation::AddSection {
            section_type: "carousel".to_string(),
            after: None,
            preset: None,
        }
        .apply(&mut doc, &registry)
        .unwrap();

        assert_eq!(result.unknown_type.as_deref(), Some("carousel"));
        assert!(doc.section("carousel-1").unwrap().settings.is_empty());
    }

    #[test]
    fn test_invalid_settings_leave_document_unchanged() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();
        let before = doc.clone();

        let err = Mutation::UpdateSectionSettings {
            section_id: "hero-1".to_string(),
            settings: settings(json!({ "alignment": "diagonal" })),
        }
        .apply(&mut doc, &registry)
        .unwrap_err();

        assert!(matches!(err, MutationError::Validation(ValidationError::NotAnOption { .. })));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_settings_merge_and_null_removal() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        Mutation::UpdateSectionSettings {
            section_id: "hero-1".to_string(),
            settings: settings(json!({ "title": "New", "backgroundImage": null })),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        let hero = doc.section("hero-1").unwrap();
        assert_eq!(hero.setting_str("title"), Some("New"));
        assert_eq!(hero.setting_str("buttonText"), Some("Get Started"));
        assert!(!hero.settings.contains_key("backgroundImage"));
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let up = Mutation::MoveSectionUp {
            section_id: "hero-1".to_string(),
        }
        .apply(&mut doc, &registry)
        .unwrap();
        let down = Mutation::MoveSectionDown {
            section_id: "cta-1".to_string(),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        assert!(!up.changed);
        assert!(!down.changed);

        Mutation::MoveSectionDown {
            section_id: "hero-1".to_string(),
        }
        .apply(&mut doc, &registry)
        .unwrap();
        assert_eq!(ids(&doc), vec!["rich-text-1", "hero-1", "cards-1", "cta-1"]);
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let err = Mutation::ReorderSections {
            section_ids: vec!["cta-1".to_string(), "hero-1".to_string()],
        }
        .apply(&mut doc, &registry)
        .unwrap_err();
        assert_eq!(err, MutationError::InvalidOrder);

        Mutation::ReorderSections {
            section_ids: ["cta-1", "cards-1", "rich-text-1", "hero-1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
        .apply(&mut doc, &registry)
        .unwrap();
        assert_eq!(ids(&doc), vec!["cta-1", "cards-1", "rich-text-1", "hero-1"]);
    }

    #[test]
    fn test_duplicate_section_renames_blocks() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let result = Mutation::DuplicateSection {
            section_id: "cards-1".to_string(),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        assert_eq!(result.created, Some(Created::Section("cards-grid-1".to_string())));
        let copy = doc.section("cards-grid-1").unwrap();
        let block_ids: Vec<&str> = copy.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(block_ids, vec!["feature_card-1", "feature_card-2", "feature_card-3"]);
        assert_eq!(ids(&doc)[3], "cards-grid-1");
    }

    #[test]
    fn test_add_block_constraints() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let err = Mutation::AddBlock {
            section_id: "cards-1".to_string(),
            block_type: "testimonial".to_string(),
            after: None,
        }
        .apply(&mut doc, &registry)
        .unwrap_err();
        assert!(matches!(
            err,
            MutationError::Validation(ValidationError::BlockNotPermitted { .. })
        ));

        let result = Mutation::AddBlock {
            section_id: "cards-1".to_string(),
            block_type: "feature_card".to_string(),
            after: Some("card-1".to_string()),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        let cards = doc.section("cards-1").unwrap();
        assert_eq!(cards.blocks[1].id, "feature_card-1");
        assert_eq!(cards.blocks[1].settings["linkText"], json!("Learn More"));
        assert!(matches!(result.created, Some(Created::Block { .. })));
    }

    #[test]
    fn test_block_settings_validated_by_block_schema() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let err = Mutation::UpdateBlockSettings {
            section_id: "cards-1".to_string(),
            block_id: "card-2".to_string(),
            settings: settings(json!({ "title": 42 })),
        }
        .apply(&mut doc, &registry)
        .unwrap_err();
        assert!(matches!(err, MutationError::Validation(ValidationError::KindMismatch { .. })));

        let err = Mutation::RemoveBlock {
            section_id: "cards-1".to_string(),
            block_id: "card-9".to_string(),
        }
        .apply(&mut doc, &registry)
        .unwrap_err();
        assert!(matches!(err, MutationError::BlockNotFound { .. }));
    }

    #[test]
    fn test_block_reorder_and_moves() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        Mutation::ReorderBlocks {
            section_id: "cards-1".to_string(),
            block_ids: vec!["card-3".to_string(), "card-1".to_string(), "card-2".to_string()],
        }
        .apply(&mut doc, &registry)
        .unwrap();
        Mutation::MoveBlockDown {
            section_id: "cards-1".to_string(),
            block_id: "card-1".to_string(),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        let order: Vec<&str> = doc.section("cards-1").unwrap().blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(order, vec!["card-3", "card-2", "card-1"]);
    }

    #[test]
    fn test_mutation_copies_only_touched_section() {
        let registry = SchemaRegistry::builtin();
        let original = home();
        let mut doc = original.clone();

        Mutation::UpdateSectionSettings {
            section_id: "cta-1".to_string(),
            settings: settings(json!({ "title": "Go" })),
        }
        .apply(&mut doc, &registry)
        .unwrap();

        assert!(doc.shares_section_with(&original, 0));
        assert!(!doc.shares_section_with(&original, 3));
    }

    #[test]
    fn test_theme_and_flags() {
        let registry = SchemaRegistry::builtin();
        let mut doc = home();

        let patch = ThemeTokensPatch {
            radius: Some("0px".to_string()),
            ..ThemeTokensPatch::default()
        };
        assert!(Mutation::UpdateThemeTokens { patch }.apply(&mut doc, &registry).unwrap().changed);
        assert!(Mutation::SetRtl { enabled: true }.apply(&mut doc, &registry).unwrap().changed);
        assert!(!Mutation::SetLocale { locale: Locale::En }.apply(&mut doc, &registry).unwrap().changed);

        assert_eq!(doc.theme_tokens.radius.as_deref(), Some("0px"));
        assert!(doc.theme_tokens.rtl);
        assert_eq!(doc.theme_tokens.color("primary"), Some("#2563eb"));
    }

    #[test]
    fn test_next_id_fills_gaps() {
        assert_eq!(next_id("hero", ["hero-1", "hero-3"].into_iter()), "hero-2");
        assert_eq!(next_id("hero", std::iter::empty()), "hero-1");
    }
}
