use std::time::Duration;

use crate::undo_stack::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum history entries kept for undo (0 = unlimited)
    pub history_limit: usize,

    /// Interval for the optional autosave task
    pub autosave_interval: Option<Duration>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            autosave_interval: None,
        }
    }
}
