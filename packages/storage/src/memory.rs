use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use pagecraft_model::{TemplateDocument, ThemeTokens};
use tokio::sync::RwLock;

use crate::driver::{next_draft, StorageDriver};
use crate::error::StorageResult;

#[derive(Default)]
struct Records {
    drafts: HashMap<String, TemplateDocument>,
    published: HashMap<String, TemplateDocument>,
    global: Option<ThemeTokens>,
}

/// Process-local driver
#[derive(Default)]
pub struct MemoryDriver {
    records: RwLock<Records>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageDriver for MemoryDriver {
    async fn get_draft(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        Ok(self.records.read().await.drafts.get(template_id).cloned())
    }

    async fn save_draft(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<TemplateDocument> {
        let mut records = self.records.write().await;
        let next = next_draft(document, records.drafts.get(template_id));
        records.drafts.insert(template_id.to_string(), next.clone());
        tracing::debug!(template_id, version = next.version, "Saved draft");
        Ok(next)
    }

    async fn get_published(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        Ok(self.records.read().await.published.get(template_id).cloned())
    }

    async fn publish(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<()> {
        let mut records = self.records.write().await;
        records.published.insert(template_id.to_string(), document.clone());
        records.drafts.insert(template_id.to_string(), document.clone());
        tracing::debug!(template_id, version = document.version, "Published template");
        Ok(())
    }

    async fn get_global_settings(&self) -> StorageResult<Option<ThemeTokens>> {
        Ok(self.records.read().await.global.clone())
    }

    async fn save_global_settings(&self, tokens: &ThemeTokens) -> StorageResult<()> {
        self.records.write().await.global = Some(tokens.clone());
        Ok(())
    }

    async fn list_template_ids(&self) -> StorageResult<Vec<String>> {
        let records = self.records.read().await;
        let ids: BTreeSet<&String> = records.drafts.keys().chain(records.published.keys()).collect();
        Ok(ids.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::SectionInstance;

    fn hero_doc(title: &str, version: u64) -> TemplateDocument {
        let mut doc = TemplateDocument::new("home", ThemeTokens::default())
            .with_section(SectionInstance::new("s1", "hero").with_setting("title", title));
        doc.version = version;
        doc
    }

    #[tokio::test]
    async fn test_save_then_publish_scenario() {
        let driver = MemoryDriver::new();
        driver.save_draft("home", &hero_doc("A", 2)).await.unwrap();
        assert_eq!(driver.get_draft("home").await.unwrap().unwrap().version, 3);

        let saved = driver.save_draft("home", &hero_doc("B", 3)).await.unwrap();
        assert_eq!(saved.version, 4);
        assert_eq!(saved.section("s1").unwrap().setting_str("title"), Some("B"));

        driver.publish("home", &saved).await.unwrap();
        let draft = driver.get_draft("home").await.unwrap().unwrap();
        let published = driver.get_published("home").await.unwrap().unwrap();

        assert_eq!(draft, published);
        assert_eq!(published.version, 4);
        assert_eq!(published.section("s1").unwrap().setting_str("title"), Some("B"));
    }

    #[tokio::test]
    async fn test_stale_save_still_increases_version() {
        let driver = MemoryDriver::new();
        driver.save_draft("home", &hero_doc("A", 10)).await.unwrap();
        let saved = driver.save_draft("home", &hero_doc("B", 1)).await.unwrap();
        assert_eq!(saved.version, 12);
    }

    #[tokio::test]
    async fn test_list_template_ids() {
        let driver = MemoryDriver::new();
        driver.save_draft("home", &hero_doc("A", 1)).await.unwrap();
        driver.publish("about", &hero_doc("B", 1)).await.unwrap();

        assert_eq!(driver.list_template_ids().await.unwrap(), vec!["about", "home"]);
        assert!(driver.get_published("missing").await.unwrap().is_none());
    }
}
