//! Template management on top of a driver

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagecraft_model::{TemplateDocument, ThemeTokens};
use pagecraft_schema::{default_template, default_theme_tokens, empty_template};
use serde::Serialize;

use crate::driver::StorageDriver;
use crate::error::StorageResult;

/// Where a loaded draft came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSource {
    Stored,
    /// Copied from the published record
    Published,
    /// Seeded from built-in content and written as both draft and published
    BuiltIn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStatus {
    pub has_draft: bool,
    pub has_published: bool,
    pub has_unsaved_changes: bool,
    pub last_draft_update: Option<DateTime<Utc>>,
    pub last_published_update: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct StorageService {
    driver: Arc<dyn StorageDriver>,
}

impl StorageService {
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &Arc<dyn StorageDriver> {
        &self.driver
    }

    pub fn set_driver(&mut self, driver: Arc<dyn StorageDriver>) {
        self.driver = driver;
    }

    pub async fn get_draft(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        self.driver.get_draft(template_id).await
    }

    pub async fn save_draft(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<TemplateDocument> {
        self.driver.save_draft(template_id, document).await
    }

    pub async fn get_published(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        self.driver.get_published(template_id).await
    }

    pub async fn publish(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<()> {
        self.driver.publish(template_id, document).await
    }

    pub async fn get_global_settings(&self) -> StorageResult<Option<ThemeTokens>> {
        self.driver.get_global_settings().await
    }

    pub async fn save_global_settings(&self, tokens: &ThemeTokens) -> StorageResult<()> {
        self.driver.save_global_settings(tokens).await
    }

    pub async fn export_template(&self, template_id: &str) -> StorageResult<String> {
        self.driver.export_template(template_id).await
    }

    pub async fn import_template(&self, data: &str) -> StorageResult<TemplateDocument> {
        self.driver.import_template(data).await
    }

    pub async fn list_template_ids(&self) -> StorageResult<Vec<String>> {
        self.driver.list_template_ids().await
    }

    /// Copy the published record into the draft. Returns the stored draft,
    /// or `None` when nothing has been published.
    pub async fn reset_to_published(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        match self.driver.get_published(template_id).await? {
            Some(published) => Ok(Some(self.driver.save_draft(template_id, &published).await?)),
            None => Ok(None),
        }
    }

    pub async fn has_unsaved_changes(&self, template_id: &str) -> StorageResult<bool> {
        let draft = self.driver.get_draft(template_id).await?;
        let published = self.driver.get_published(template_id).await?;
        Ok(diverged(draft.as_ref(), published.as_ref()))
    }

    pub async fn template_status(&self, template_id: &str) -> StorageResult<TemplateStatus> {
        let draft = self.driver.get_draft(template_id).await?;
        let published = self.driver.get_published(template_id).await?;

        Ok(TemplateStatus {
            has_draft: draft.is_some(),
            has_published: published.is_some(),
            has_unsaved_changes: diverged(draft.as_ref(), published.as_ref()),
            last_draft_update: draft.as_ref().map(|d| d.updated_at),
            last_published_update: published.as_ref().map(|p| p.updated_at),
        })
    }

    /// Load the draft for `template_id`, bootstrapping one when missing.
    ///
    /// Order: stored draft, then published record, then built-in starter
    /// content, then an empty document using the global theme tokens.
    pub async fn load_or_bootstrap_draft(&self, template_id: &str) -> StorageResult<(TemplateDocument, DraftSource)> {
        if let Some(draft) = self.driver.get_draft(template_id).await? {
            return Ok((draft, DraftSource::Stored));
        }

        if let Some(published) = self.driver.get_published(template_id).await? {
            let draft = self.driver.save_draft(template_id, &published).await?;
            tracing::info!(template_id, "Draft bootstrapped from published record");
            return Ok((draft, DraftSource::Published));
        }

        let seed = match default_template(template_id) {
            Some(doc) => doc,
            None => {
                let tokens = self
                    .driver
                    .get_global_settings()
                    .await?
                    .unwrap_or_else(default_theme_tokens);
                empty_template(template_id, tokens)
            }
        };

        let draft = self.driver.save_draft(template_id, &seed).await?;
        self.driver.publish(template_id, &draft).await?;
        tracing::info!(template_id, "Draft bootstrapped from built-in content");
        Ok((draft, DraftSource::BuiltIn))
    }

    /// Seed built-in documents and global tokens that are not stored yet.
    /// Returns the template ids that were seeded.
    pub async fn initialize_defaults(&self) -> StorageResult<Vec<String>> {
        let mut seeded = Vec::new();

        for id in ["home", "about"] {
            let Some(template) = default_template(id) else {
                continue;
            };
            let has_draft = self.driver.get_draft(id).await?.is_some();
            let has_published = self.driver.get_published(id).await?.is_some();
            if !has_draft && !has_published {
                let draft = self.driver.save_draft(id, &template).await?;
                self.driver.publish(id, &draft).await?;
                seeded.push(id.to_string());
            }
        }

        if self.driver.get_global_settings().await?.is_none() {
            self.driver.save_global_settings(&default_theme_tokens()).await?;
        }

        if !seeded.is_empty() {
            tracing::info!(templates = ?seeded, "Seeded default templates");
        }
        Ok(seeded)
    }
}

fn diverged(draft: Option<&TemplateDocument>, published: Option<&TemplateDocument>) -> bool {
    match (draft, published) {
        (None, None) => false,
        (Some(draft), Some(published)) => {
            draft.version != published.version
                || draft.sections != published.sections
                || draft.theme_tokens != published.theme_tokens
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDriver;

    fn service() -> StorageService {
        StorageService::new(Arc::new(MemoryDriver::new()))
    }

    #[tokio::test]
    async fn test_bootstrap_builtin_writes_both_records() {
        let service = service();
        let (draft, source) = service.load_or_bootstrap_draft("home").await.unwrap();

        assert_eq!(source, DraftSource::BuiltIn);
        assert_eq!(service.get_published("home").await.unwrap(), Some(draft.clone()));
        assert!(!service.has_unsaved_changes("home").await.unwrap());

        let (again, source) = service.load_or_bootstrap_draft("home").await.unwrap();
        assert_eq!(source, DraftSource::Stored);
        assert_eq!(again, draft);
    }

    #[tokio::test]
    async fn test_bootstrap_unknown_template_is_empty() {
        let service = service();
        let (draft, _) = service.load_or_bootstrap_draft("services").await.unwrap();

        assert!(draft.sections.is_empty());
        assert_eq!(draft.template_id, "services");
        assert!(service.get_published("services").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_status_and_reset() {
        let service = service();
        service.initialize_defaults().await.unwrap();

        let mut draft = service.get_draft("about").await.unwrap().unwrap();
        draft.sections.clear();
        service.save_draft("about", &draft).await.unwrap();

        let status = service.template_status("about").await.unwrap();
        assert!(status.has_draft && status.has_published && status.has_unsaved_changes);

        let reset = service.reset_to_published("about").await.unwrap().unwrap();
        assert_eq!(reset.sections.len(), 3);
        assert!(service.reset_to_published("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_initialize_defaults_is_idempotent() {
        let service = service();
        assert_eq!(service.initialize_defaults().await.unwrap(), vec!["home", "about"]);
        assert!(service.initialize_defaults().await.unwrap().is_empty());
        assert!(service.get_global_settings().await.unwrap().is_some());
    }
}
