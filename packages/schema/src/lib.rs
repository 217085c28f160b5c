//! # Pagecraft Schema Registry
//!
//! Catalog of section and block types: their settings fields, defaults,
//! constraints and presets.
//!
//! The registry is an explicit object. Build one at startup (usually with
//! [`SchemaRegistry::builtin`]) and hand a shared reference to the editor
//! store and the renderer. Tests can build a registry with fake schemas.
//!
//! Lookups never fail loudly: an unknown type tag yields `None` and the
//! caller decides on a fallback.

mod builtin;
pub mod defaults;
mod error;
mod registry;
pub mod validate;

pub use builtin::{builtin_block_schemas, builtin_section_schemas};
pub use defaults::{default_template, default_theme_tokens, empty_template, template_catalog, TemplateInfo};
pub use error::ValidationError;
pub use registry::{SchemaCheck, SchemaRegistry};
pub use validate::{validate_settings, validate_value};
