//! The storage contract

use async_trait::async_trait;
use chrono::Utc;
use pagecraft_model::{TemplateDocument, ThemeTokens};

use crate::codec::{decode_import, ExportBundle};
use crate::error::StorageResult;

/// Persistence for draft/published template pairs and global theme tokens.
///
/// Every call is independently failable with [`StorageError::Unavailable`];
/// a failed call never leaves a partial write behind.
///
/// Writes are last-write-wins. There is no version check on write, so two
/// sessions saving the same template can lose each other's updates.
///
/// [`StorageError::Unavailable`]: crate::StorageError::Unavailable
#[async_trait]
pub trait StorageDriver: Send + Sync {
    async fn get_draft(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>>;

    /// Upsert the draft. The stored version is strictly greater than the
    /// previously stored draft version and `updatedAt` is stamped.
    async fn save_draft(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<TemplateDocument>;

    async fn get_published(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>>;

    /// Write `document` verbatim as the published record and overwrite the
    /// draft with the same content.
    ///
    /// Any draft changes not contained in `document` are discarded. Callers
    /// that want to keep in-progress work must save it separately after
    /// publishing.
    async fn publish(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<()>;

    async fn get_global_settings(&self) -> StorageResult<Option<ThemeTokens>>;

    async fn save_global_settings(&self, tokens: &ThemeTokens) -> StorageResult<()>;

    /// Template ids that have a draft or a published record
    async fn list_template_ids(&self) -> StorageResult<Vec<String>>;

    /// Serialize the current draft together with the global tokens
    async fn export_template(&self, template_id: &str) -> StorageResult<String> {
        let draft = self.get_draft(template_id).await?;
        let global = self.get_global_settings().await?;
        ExportBundle::new(draft, global).encode()
    }

    /// Parse an exported payload. Global tokens carried by the payload are
    /// saved; the template itself is returned, not stored.
    async fn import_template(&self, data: &str) -> StorageResult<TemplateDocument> {
        let payload = decode_import(data)?;
        if let Some(tokens) = &payload.global_settings {
            self.save_global_settings(tokens).await?;
        }
        Ok(payload.template)
    }
}

/// Draft record to store for an incoming save
pub fn next_draft(incoming: &TemplateDocument, stored: Option<&TemplateDocument>) -> TemplateDocument {
    let base = stored.map_or(incoming.version, |s| s.version.max(incoming.version));
    let mut next = incoming.clone();
    next.version = base + 1;
    next.updated_at = Utc::now();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_draft_increments_past_stored() {
        let mut stored = TemplateDocument::new("home", ThemeTokens::default());
        stored.version = 9;
        let mut incoming = stored.clone();
        incoming.version = 3;

        assert_eq!(next_draft(&incoming, Some(&stored)).version, 10);
        assert_eq!(next_draft(&incoming, None).version, 4);
    }
}
