//! # Pagecraft Storage
//!
//! The draft/published persistence contract and two drivers:
//!
//! - [`MemoryDriver`]: process-local, for tests and embedding
//! - [`FileDriver`]: one JSON file per record
//!
//! Each template id owns two records, a draft and a published document.
//! Saving a draft always moves its version forward. Publishing writes the
//! same document to both records, so after a publish the draft and the
//! published copy are identical.
//!
//! [`StorageService`] adds template-management helpers (bootstrap, reset,
//! status) on top of any driver.

mod codec;
mod driver;
mod error;
mod file;
mod memory;
mod service;

pub use codec::{decode_import, ExportBundle, ImportPayload, EXPORT_FORMAT_VERSION};
pub use driver::{next_draft, StorageDriver};
pub use error::{StorageError, StorageResult};
pub use file::FileDriver;
pub use memory::MemoryDriver;
pub use service::{DraftSource, StorageService, TemplateStatus};
