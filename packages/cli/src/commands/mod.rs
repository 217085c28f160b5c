pub mod edit;
pub mod init;
pub mod live;
pub mod render;
pub mod templates;
pub mod transfer;

pub use edit::{apply, new_template, publish, reset, ApplyArgs, NewArgs, TemplateArgs};
pub use init::{init, InitArgs};
pub use live::{live_apply, LiveApplyArgs};
pub use render::{render, RenderArgs};
pub use templates::{sections, status, StatusArgs};
pub use transfer::{export, import, ExportArgs, ImportArgs};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use pagecraft_editor::EditorStore;
use pagecraft_model::DeviceType;
use pagecraft_schema::SchemaRegistry;
use pagecraft_storage::{FileDriver, StorageService};

use crate::config::Config;

/// Everything a command needs from the working directory
pub struct Session {
    pub cwd: PathBuf,
    pub config: Config,
    pub registry: Arc<SchemaRegistry>,
}

impl Session {
    pub fn new(cwd: &Path, config: Config) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config,
            registry: Arc::new(SchemaRegistry::builtin()),
        }
    }

    pub fn storage(&self) -> StorageService {
        StorageService::new(Arc::new(FileDriver::new(self.config.storage_path(&self.cwd))))
    }

    pub fn editor(&self) -> EditorStore {
        EditorStore::with_config(self.registry.clone(), self.storage(), self.config.editor_config())
    }

    /// Editor with `template_id` loaded, bootstrapping it when missing
    pub async fn open(&self, template_id: &str) -> Result<EditorStore> {
        let mut store = self.editor();
        store.load(template_id).await?;
        Ok(store)
    }
}

pub fn parse_device(value: &str) -> Result<DeviceType> {
    DeviceType::parse(value).ok_or_else(|| anyhow!("Invalid device: {}. Use: desktop, tablet, or mobile", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn session(dir: &Path) -> Session {
        Session::new(dir, Config::default())
    }

    #[tokio::test]
    async fn test_init_apply_publish_and_live_apply() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());

        init(InitArgs { storage_dir: ".pagecraft".to_string(), force: false }, &session)
            .await
            .unwrap();
        assert!(dir.path().join(crate::config::DEFAULT_CONFIG_NAME).exists());

        let mutations = dir.path().join("mutations.json");
        fs::write(
            &mutations,
            r#"[
                {"type": "updateSectionSettings", "sectionId": "hero-1", "settings": {"title": "Spring sale"}},
                {"type": "addSection", "sectionType": "rich-text", "after": "hero-1"}
            ]"#,
        )
        .unwrap();
        apply(
            ApplyArgs { template: "home".to_string(), file: mutations, dry_run: false, publish: true },
            &session,
        )
        .await
        .unwrap();

        let published = session.storage().get_published("home").await.unwrap().unwrap();
        assert_eq!(published.sections[1].id, "rich-text-2");
        assert_eq!(published.sections[0].settings["title"], "Spring sale");

        let edits = dir.path().join("edits.json");
        fs::write(&edits, r#"{"id": "hero-1.title", "property": "textContent", "value": "Live title"}"#).unwrap();
        let out = dir.path().join("live.html");
        live_apply(
            LiveApplyArgs {
                template: "home".to_string(),
                file: edits,
                device: "desktop".to_string(),
                full: false,
                out: Some(out.clone()),
            },
            &session,
        )
        .await
        .unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("Live title"));
        // live edits never reach storage
        let published = session.storage().get_published("home").await.unwrap().unwrap();
        assert_eq!(published.sections[0].settings["title"], "Spring sale");
    }

    #[tokio::test]
    async fn test_live_apply_large_batch_keeps_first_edit() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        session.storage().initialize_defaults().await.unwrap();

        let mut edits = vec![serde_json::json!({"id": "hero-1.title", "property": "textContent", "value": "Burst start"})];
        for i in 0..300 {
            edits.push(serde_json::json!({
                "id": "hero-1.subtitle",
                "property": "style.marginTop",
                "value": format!("{}px", i),
            }));
        }
        let file = dir.path().join("burst.json");
        fs::write(&file, serde_json::Value::Array(edits).to_string()).unwrap();
        let out = dir.path().join("burst.html");

        live_apply(
            LiveApplyArgs {
                template: "home".to_string(),
                file,
                device: "desktop".to_string(),
                full: false,
                out: Some(out.clone()),
            },
            &session,
        )
        .await
        .unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("Burst start"));
        assert!(html.contains("margin-top: 299px"));
    }

    #[tokio::test]
    async fn test_rejected_mutation_leaves_draft() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        let before = session.open("about").await.unwrap().document().cloned().unwrap();

        let mutations = dir.path().join("bad.json");
        fs::write(&mutations, r#"{"type": "removeSection", "sectionId": "missing-9"}"#).unwrap();
        let err = apply(
            ApplyArgs { template: "about".to_string(), file: mutations, dry_run: false, publish: false },
            &session,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Mutation #1"));
        let after = session.storage().get_draft("about").await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_parse_device() {
        assert_eq!(parse_device("tablet").unwrap(), DeviceType::Tablet);
        assert!(parse_device("watch").is_err());
    }
}
