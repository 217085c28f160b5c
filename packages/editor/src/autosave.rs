//! Periodic background save of a dirty store

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::store::EditorStore;

/// Handle to a running autosave task. Dropping it stops the task.
pub struct AutosaveHandle {
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Save `store` every `interval` while it has unsaved changes.
///
/// Failures are logged and retried on the next tick; the store keeps its
/// dirty flag and `last_error` so the caller can surface them.
pub fn spawn_autosave(store: Arc<Mutex<EditorStore>>, interval: Duration) -> AutosaveHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut store = store.lock().await;
            if !store.is_dirty() {
                continue;
            }
            match store.save().await {
                Ok(()) => tracing::debug!(template_id = ?store.template_id(), "Autosaved draft"),
                Err(e) => tracing::warn!(template_id = ?store.template_id(), error = %e, "Autosave failed"),
            }
        }
    });

    AutosaveHandle { task }
}
