//! Pagecraft document model
//!
//! This crate defines the core data structures shared by every other crate:
//! - Theme tokens (site-wide design variables)
//! - Schema shapes describing section and block settings
//! - Template documents (sections, blocks, version, timestamps)
//! - Live element edits (out-of-band property corrections)
//! - Virtual nodes produced by the renderer and patched by the live-edit relay

pub mod document;
pub mod edit;
pub mod schema;
pub mod theme;
pub mod virt;

pub use document::*;
pub use edit::*;
pub use schema::*;
pub use theme::*;
pub use virt::*;
