//! # Pagecraft Editor
//!
//! Editing state for one template at a time.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: section/block types + validation    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorStore                         │
//! │  - Load/bootstrap drafts                    │
//! │  - Apply validated mutations                │
//! │  - Snapshot undo/redo                       │
//! │  - Selection, device mode, dirty tracking   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ storage: draft / published records          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every mutation produces a new snapshot
//! 2. **Validate before commit**: a rejected mutation changes nothing
//! 3. **Storage is explicit**: only load/save/publish/reset/import/export are async
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::EditorStore;
//!
//! let mut store = EditorStore::new(registry, storage);
//! store.load("home").await?;
//!
//! let id = store.add_section("hero", None)?;
//! store.undo();
//! store.save().await?;
//! ```

mod autosave;
mod config;
mod errors;
mod mutations;
mod selection;
mod store;
mod undo_stack;

pub use autosave::{spawn_autosave, AutosaveHandle};
pub use config::EditorConfig;
pub use errors::EditorError;
pub use mutations::{Created, Mutation, MutationError, MutationResult};
pub use selection::Selection;
pub use store::{EditorStatus, EditorStore, ReadyState};
pub use undo_stack::{HistoryEntry, UndoStack, DEFAULT_HISTORY_LIMIT};
