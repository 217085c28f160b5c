//! # Pagecraft Renderer
//!
//! Turns a template document into a virtual node tree for preview and for
//! live pages.
//!
//! ```text
//! TemplateDocument ──▶ ThemeRenderer ──dispatch by type──▶ SectionRenderer
//!                           │                                   │
//!                           └── no renderer: placeholder ◀──────┘
//!                           ↓
//!                      VirtualNode ──▶ render_html (optional)
//! ```

pub mod breakpoints;
mod context;
mod html;
mod renderer;
pub mod sections;

pub use breakpoints::{breakpoint_for_width, device_preset, Breakpoint, DevicePreset, BREAKPOINTS};
pub use context::{RenderContext, SettingsReader};
pub use html::{render_html, HtmlOptions};
pub use renderer::{RenderOutput, RenderSelection, ThemeRenderer};
pub use sections::SectionRenderer;
