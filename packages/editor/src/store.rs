//! # Editor Store
//!
//! In-memory editing state for one template: the current document,
//! selection, device preview mode, undo history and dirty tracking.
//!
//! ```text
//! Uninitialized ──load──▶ Loading ──ok──▶ Ready(Clean) ◀──save/publish── Ready(Dirty)
//!                            │                 │                              ▲
//!                            └──err──▶ Error   └──────────mutation────────────┘
//! ```
//!
//! Mutations, undo and redo are synchronous and never touch storage. Only
//! `load`, `save`, `publish`, `reset_to_published`, `export` and `import`
//! talk to the storage driver. They take `&mut self`, so one store can
//! never run two saves for the same template at once.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagecraft_model::{DeviceType, Settings, TemplateDocument, ThemeTokensPatch};
use pagecraft_schema::SchemaRegistry;
use pagecraft_storage::StorageService;

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::mutations::{next_block_id, next_section_id, Created, Mutation, MutationError, MutationResult};
use crate::selection::Selection;
use crate::undo_stack::UndoStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    Uninitialized,
    Loading,
    Ready(ReadyState),
    /// Loading failed. Calling `load` again retries.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Loading,
    Ready,
    Failed(String),
}

pub struct EditorStore {
    registry: Arc<SchemaRegistry>,
    storage: StorageService,
    config: EditorConfig,

    phase: Phase,
    template_id: Option<String>,
    document: Option<TemplateDocument>,

    selection: Selection,
    device: DeviceType,
    history: UndoStack,

    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
    last_error: Option<String>,
    unknown_types: BTreeSet<String>,
}

impl EditorStore {
    pub fn new(registry: Arc<SchemaRegistry>, storage: StorageService) -> Self {
        Self::with_config(registry, storage, EditorConfig::default())
    }

    pub fn with_config(registry: Arc<SchemaRegistry>, storage: StorageService, config: EditorConfig) -> Self {
        Self {
            registry,
            storage,
            history: UndoStack::with_max_levels(config.history_limit),
            config,
            phase: Phase::Uninitialized,
            template_id: None,
            document: None,
            selection: Selection::default(),
            device: DeviceType::default(),
            dirty: false,
            last_saved: None,
            last_error: None,
            unknown_types: BTreeSet::new(),
        }
    }

    // ---- lifecycle ----------------------------------------------------

    /// Load the draft for `template_id`, bootstrapping one when missing
    pub async fn load(&mut self, template_id: &str) -> Result<(), EditorError> {
        self.phase = Phase::Loading;

        match self.storage.load_or_bootstrap_draft(template_id).await {
            Ok((document, source)) => {
                tracing::info!(template_id, version = document.version, ?source, "Template loaded");
                self.template_id = Some(template_id.to_string());
                self.replace_document(document, "Load template");
                self.dirty = false;
                self.last_error = None;
                self.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::error!(template_id, error = %e, "Failed to load template");
                self.document = None;
                self.template_id = None;
                self.history.clear();
                self.phase = Phase::Failed(e.to_string());
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Persist the current document as the draft
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let (template_id, document) = self.loaded()?;

        match self.storage.save_draft(&template_id, &document).await {
            Ok(stored) => {
                if let Some(current) = self.document.as_mut() {
                    current.version = stored.version;
                    current.updated_at = stored.updated_at;
                }
                tracing::info!(template_id = %template_id, version = stored.version, "Draft saved");
                self.mark_saved();
                Ok(())
            }
            Err(e) => Err(self.storage_failure("save", &template_id, e)),
        }
    }

    /// Publish the current document. The stored draft is overwritten with
    /// the same content.
    pub async fn publish(&mut self) -> Result<(), EditorError> {
        let (template_id, document) = self.loaded()?;

        match self.storage.publish(&template_id, &document).await {
            Ok(()) => {
                tracing::info!(template_id = %template_id, version = document.version, "Template published");
                self.mark_saved();
                Ok(())
            }
            Err(e) => Err(self.storage_failure("publish", &template_id, e)),
        }
    }

    /// Discard local and draft changes and continue from the published copy
    pub async fn reset_to_published(&mut self) -> Result<(), EditorError> {
        let (template_id, _) = self.loaded()?;

        match self.storage.reset_to_published(&template_id).await {
            Ok(Some(draft)) => {
                self.replace_document(draft, "Reset to published");
                self.dirty = false;
                self.last_error = None;
                Ok(())
            }
            Ok(None) => Err(EditorError::NotPublished(template_id)),
            Err(e) => Err(self.storage_failure("reset", &template_id, e)),
        }
    }

    /// Export the stored draft of the loaded template
    pub async fn export(&self) -> Result<String, EditorError> {
        let template_id = self.template_id.as_deref().ok_or(EditorError::NotReady)?;
        Ok(self.storage.export_template(template_id).await?)
    }

    /// Import an exported payload as the current, unsaved document
    pub async fn import(&mut self, data: &str) -> Result<(), EditorError> {
        let document = self.storage.import_template(data).await?;
        tracing::info!(template_id = %document.template_id, "Template imported");

        self.template_id = Some(document.template_id.clone());
        self.replace_document(document, "Import template");
        self.dirty = true;
        self.phase = Phase::Ready;
        Ok(())
    }

    // ---- mutations ----------------------------------------------------

    /// Validate and apply a mutation, recording a history entry when it
    /// changed the document. A rejected mutation leaves everything as is.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let current = self.document.as_ref().ok_or(EditorError::NotReady)?;

        let mut next = current.clone();
        let result = mutation.apply(&mut next, &self.registry).map_err(|e| {
            tracing::debug!(error = %e, mutation = %mutation.label(), "Mutation rejected");
            e
        })?;

        if !result.changed {
            return Ok(result);
        }

        if let Some(type_tag) = &result.unknown_type {
            tracing::warn!(type_tag = %type_tag, "Accepted content with unregistered type");
        }

        self.history.record(&next, mutation.label());
        self.document = Some(next);
        self.dirty = true;
        self.update_selection(&mutation, &result);
        self.refresh_unknown_types();
        Ok(result)
    }

    pub fn add_section(&mut self, section_type: &str, after: Option<&str>) -> Result<String, EditorError> {
        let id = next_section_id(self.document.as_ref().ok_or(EditorError::NotReady)?, section_type);
        self.apply(Mutation::AddSection {
            section_type: section_type.to_string(),
            after: after.map(str::to_string),
            preset: None,
        })?;
        Ok(id)
    }

    pub fn remove_section(&mut self, section_id: &str) -> Result<(), EditorError> {
        self.apply(Mutation::RemoveSection {
            section_id: section_id.to_string(),
        })
        .map(|_| ())
    }

    pub fn update_section_settings(&mut self, section_id: &str, settings: Settings) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateSectionSettings {
            section_id: section_id.to_string(),
            settings,
        })
        .map(|_| ())
    }

    pub fn add_block(&mut self, section_id: &str, block_type: &str) -> Result<String, EditorError> {
        let section = self
            .document
            .as_ref()
            .ok_or(EditorError::NotReady)?
            .section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let id = next_block_id(section, block_type);
        self.apply(Mutation::AddBlock {
            section_id: section_id.to_string(),
            block_type: block_type.to_string(),
            after: None,
        })?;
        Ok(id)
    }

    pub fn update_block_settings(&mut self, section_id: &str, block_id: &str, settings: Settings) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateBlockSettings {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
            settings,
        })
        .map(|_| ())
    }

    pub fn update_theme_tokens(&mut self, patch: ThemeTokensPatch) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateThemeTokens { patch }).map(|_| ())
    }

    // ---- history ------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    // ---- selection and view state -------------------------------------

    /// Select a section, or clear the selection with `None`. Unknown ids
    /// are ignored and return false.
    pub fn select_section(&mut self, section_id: Option<&str>) -> bool {
        match section_id {
            None => {
                self.selection.select_section(None);
                true
            }
            Some(id) => {
                let exists = self.document.as_ref().is_some_and(|d| d.section(id).is_some());
                if exists {
                    self.selection.select_section(Some(id.to_string()));
                }
                exists
            }
        }
    }

    pub fn select_block(&mut self, section_id: &str, block_id: &str) -> bool {
        let exists = self
            .document
            .as_ref()
            .is_some_and(|d| d.block(section_id, block_id).is_some());
        if exists {
            self.selection.select_block(section_id, block_id);
        }
        exists
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_device_type(&mut self, device: DeviceType) {
        self.device = device;
    }

    pub fn device_type(&self) -> DeviceType {
        self.device
    }

    // ---- accessors ----------------------------------------------------

    pub fn status(&self) -> EditorStatus {
        match &self.phase {
            Phase::Uninitialized => EditorStatus::Uninitialized,
            Phase::Loading => EditorStatus::Loading,
            Phase::Failed(message) => EditorStatus::Error(message.clone()),
            Phase::Ready if self.dirty => EditorStatus::Ready(ReadyState::Dirty),
            Phase::Ready => EditorStatus::Ready(ReadyState::Clean),
        }
    }

    pub fn document(&self) -> Option<&TemplateDocument> {
        self.document.as_ref()
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Message of the most recent storage failure, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Section and block types in the document that have no registered schema
    pub fn unknown_types(&self) -> &BTreeSet<String> {
        &self.unknown_types
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ---- internals ----------------------------------------------------

    fn loaded(&self) -> Result<(String, TemplateDocument), EditorError> {
        match (&self.phase, &self.template_id, &self.document) {
            (Phase::Ready, Some(id), Some(doc)) => Ok((id.clone(), doc.clone())),
            _ => Err(EditorError::NotReady),
        }
    }

    fn replace_document(&mut self, document: TemplateDocument, action: &str) {
        self.history.reset(&document, action);
        self.document = Some(document);
        self.selection.clear();
        self.refresh_unknown_types();
    }

    fn restore(&mut self, snapshot: TemplateDocument) {
        self.document = Some(snapshot);
        self.selection.clear();
        self.dirty = true;
        self.refresh_unknown_types();
    }

    fn mark_saved(&mut self) {
        self.dirty = false;
        self.last_saved = Some(Utc::now());
        self.last_error = None;
    }

    fn storage_failure(&mut self, operation: &str, template_id: &str, error: pagecraft_storage::StorageError) -> EditorError {
        tracing::error!(template_id, operation, error = %error, "Storage operation failed");
        self.last_error = Some(error.to_string());
        error.into()
    }

    fn update_selection(&mut self, mutation: &Mutation, result: &MutationResult) {
        match (mutation, &result.created) {
            (Mutation::AddSection { .. } | Mutation::DuplicateSection { .. }, Some(Created::Section(id))) => {
                self.selection.select_section(Some(id.clone()));
            }
            (Mutation::AddBlock { .. }, Some(Created::Block { section_id, block_id })) => {
                self.selection.select_block(section_id.clone(), block_id.clone());
            }
            (Mutation::RemoveSection { section_id }, _) => {
                if self.selection.section() == Some(section_id.as_str()) {
                    self.selection.clear();
                } else {
                    self.selection.clear_block();
                }
            }
            (Mutation::RemoveBlock { block_id, .. }, _) => {
                if self.selection.block() == Some(block_id.as_str()) {
                    self.selection.clear_block();
                }
            }
            _ => {}
        }
    }

    fn refresh_unknown_types(&mut self) {
        self.unknown_types.clear();
        let Some(document) = &self.document else {
            return;
        };
        for section in &document.sections {
            if !self.registry.has_section_type(&section.section_type) {
                self.unknown_types.insert(section.section_type.clone());
            }
            for block in &section.blocks {
                if self.registry.block_schema(&block.block_type).is_none() {
                    self.unknown_types.insert(block.block_type.clone());
                }
            }
        }
    }
}
