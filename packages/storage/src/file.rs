//! JSON-file driver
//!
//! Layout under the root directory:
//!
//! ```text
//! drafts/<template-id>.json
//! published/<template-id>.json
//! global.json
//! ```
//!
//! Each record is written to a temporary sibling first and renamed into
//! place, so a failed write leaves the previous record intact. `publish`
//! stages both records before renaming either, and restores the previous
//! published record if the draft cannot be renamed into place.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pagecraft_model::{DocumentKind, TemplateDocument, ThemeTokens};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

use crate::driver::{next_draft, StorageDriver};
use crate::error::{StorageError, StorageResult};

const GLOBAL_FILE: &str = "global.json";

pub struct FileDriver {
    root: PathBuf,
    // Serializes read-modify-write in save_draft
    write_lock: Mutex<()>,
}

impl FileDriver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: DocumentKind) -> PathBuf {
        match kind {
            DocumentKind::Draft => self.root.join("drafts"),
            DocumentKind::Published => self.root.join("published"),
        }
    }

    fn record_path(&self, kind: DocumentKind, template_id: &str) -> StorageResult<PathBuf> {
        let valid = !template_id.is_empty()
            && template_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidTemplateId(template_id.to_string()));
        }
        Ok(self.kind_dir(kind).join(format!("{}.json", template_id)))
    }

    async fn read_record<T: DeserializeOwned>(&self, path: &Path, operation: &'static str) -> StorageResult<Option<T>> {
        match self.read_raw(path, operation).await? {
            Some(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| StorageError::CorruptRecord {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn read_raw(&self, path: &Path, operation: &'static str) -> StorageResult<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::unavailable(operation, e)),
        }
    }

    async fn write_record<T: Serialize>(&self, path: &Path, value: &T, operation: &'static str) -> StorageResult<()> {
        let tmp = self.stage(path, &serde_json::to_string_pretty(value)?, operation).await?;
        self.commit(&tmp, path, operation).await
    }

    /// Write `content` next to `path`, returning the temporary file
    async fn stage(&self, path: &Path, content: &str, operation: &'static str) -> StorageResult<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::unavailable(operation, e))?;
        }

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, content).await {
            discard(&tmp).await;
            return Err(StorageError::unavailable(operation, e));
        }
        Ok(tmp)
    }

    async fn commit(&self, tmp: &Path, path: &Path, operation: &'static str) -> StorageResult<()> {
        if let Err(e) = fs::rename(tmp, path).await {
            discard(tmp).await;
            return Err(StorageError::unavailable(operation, e));
        }
        Ok(())
    }

    /// Put back the record `path` held before a failed multi-record write
    async fn restore(&self, path: &Path, previous: Option<String>) {
        let restored = match previous {
            Some(content) => match self.stage(path, &content, "publish").await {
                Ok(tmp) => self.commit(&tmp, path, "publish").await,
                Err(e) => Err(e),
            },
            None => fs::remove_file(path)
                .await
                .map_err(|e| StorageError::unavailable("publish", e)),
        };
        if let Err(e) = restored {
            tracing::error!(path = %path.display(), error = %e, "Failed to restore record after aborted publish");
        }
    }

    async fn ids_in(&self, kind: DocumentKind, out: &mut BTreeSet<String>) -> StorageResult<()> {
        let mut entries = match fs::read_dir(self.kind_dir(kind)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::unavailable("list_template_ids", e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::unavailable("list_template_ids", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    out.insert(stem.to_string());
                }
            }
        }
        Ok(())
    }
}

async fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %tmp.display(), error = %e, "Failed to remove temporary record");
        }
    }
}

#[async_trait]
impl StorageDriver for FileDriver {
    async fn get_draft(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        let path = self.record_path(DocumentKind::Draft, template_id)?;
        self.read_record(&path, "get_draft").await
    }

    async fn save_draft(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<TemplateDocument> {
        let path = self.record_path(DocumentKind::Draft, template_id)?;
        let _guard = self.write_lock.lock().await;

        let stored: Option<TemplateDocument> = self.read_record(&path, "save_draft").await?;
        let next = next_draft(document, stored.as_ref());
        self.write_record(&path, &next, "save_draft").await?;

        tracing::debug!(template_id, version = next.version, path = %path.display(), "Saved draft");
        Ok(next)
    }

    async fn get_published(&self, template_id: &str) -> StorageResult<Option<TemplateDocument>> {
        let path = self.record_path(DocumentKind::Published, template_id)?;
        self.read_record(&path, "get_published").await
    }

    async fn publish(&self, template_id: &str, document: &TemplateDocument) -> StorageResult<()> {
        let published = self.record_path(DocumentKind::Published, template_id)?;
        let draft = self.record_path(DocumentKind::Draft, template_id)?;
        let _guard = self.write_lock.lock().await;

        let content = serde_json::to_string_pretty(document)?;
        let previous = self.read_raw(&published, "publish").await?;
        let published_tmp = self.stage(&published, &content, "publish").await?;
        let draft_tmp = match self.stage(&draft, &content, "publish").await {
            Ok(tmp) => tmp,
            Err(e) => {
                discard(&published_tmp).await;
                return Err(e);
            }
        };

        if let Err(e) = self.commit(&published_tmp, &published, "publish").await {
            discard(&draft_tmp).await;
            return Err(e);
        }
        if let Err(e) = self.commit(&draft_tmp, &draft, "publish").await {
            self.restore(&published, previous).await;
            return Err(e);
        }

        tracing::debug!(template_id, version = document.version, "Published template");
        Ok(())
    }

    async fn get_global_settings(&self) -> StorageResult<Option<ThemeTokens>> {
        self.read_record(&self.root.join(GLOBAL_FILE), "get_global_settings")
            .await
    }

    async fn save_global_settings(&self, tokens: &ThemeTokens) -> StorageResult<()> {
        self.write_record(&self.root.join(GLOBAL_FILE), tokens, "save_global_settings")
            .await
    }

    async fn list_template_ids(&self) -> StorageResult<Vec<String>> {
        let mut ids = BTreeSet::new();
        self.ids_in(DocumentKind::Draft, &mut ids).await?;
        self.ids_in(DocumentKind::Published, &mut ids).await?;
        Ok(ids.into_iter().collect())
    }
}
