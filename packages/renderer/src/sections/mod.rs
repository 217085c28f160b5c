//! Per-type section renderers

mod cards_grid;
mod collection_grid;
mod cta_banner;
mod hero;
mod image_with_text;
mod rich_text;

pub use cards_grid::CardsGridRenderer;
pub use collection_grid::CollectionGridRenderer;
pub use cta_banner::CtaBannerRenderer;
pub use hero::HeroRenderer;
pub use image_with_text::ImageWithTextRenderer;
pub use rich_text::RichTextRenderer;

use pagecraft_model::{BlockInstance, SectionInstance, VirtualElement};

use crate::context::RenderContext;

/// Renders one section type into a virtual element.
///
/// Renderers read settings through [`RenderContext::settings`] so missing
/// values fall back to the schema defaults.
pub trait SectionRenderer: Send + Sync {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement;
}

impl<F> SectionRenderer for F
where
    F: Fn(&SectionInstance, &RenderContext<'_>) -> VirtualElement + Send + Sync,
{
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        self(section, ctx)
    }
}

/// Element carrying the `data-editor-id` used by inline editing
pub(crate) fn editable(tag: &str, editor_id: impl Into<String>) -> VirtualElement {
    VirtualElement::new(tag).with_attr("data-editor-id", editor_id)
}

pub(crate) fn section_field_id(section: &SectionInstance, field: &str) -> String {
    format!("{}.{}", section.id, field)
}

pub(crate) fn block_field_id(section: &SectionInstance, block: &BlockInstance, field: &str) -> String {
    format!("{}.{}.{}", section.id, block.id, field)
}

/// Centered content container sized by the device preset
pub(crate) fn container(ctx: &RenderContext<'_>) -> VirtualElement {
    VirtualElement::new("div")
        .with_class("section-container")
        .with_style("max-width", ctx.preset.container_max_width)
        .with_style("margin", "0 auto")
        .with_style("padding-left", ctx.preset.section_padding)
        .with_style("padding-right", ctx.preset.section_padding)
}

/// Outer `<section>` element shared by the built-in renderers
pub(crate) fn section_shell(section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
    let padding = format!("{}px", ctx.tokens.spacing(ctx.preset.gap_step + 2));
    VirtualElement::new("section")
        .with_class(section.section_type.clone())
        .with_style("padding-top", padding.clone())
        .with_style("padding-bottom", padding)
}

/// Wrapper for one block, marked when selected
pub(crate) fn block_shell(block: &BlockInstance, ctx: &RenderContext<'_>) -> VirtualElement {
    let el = VirtualElement::new("div")
        .with_attr("data-block-id", block.id.clone())
        .with_attr("data-block-type", block.block_type.clone())
        .with_class("block");
    if ctx.selected_block == Some(block.id.as_str()) {
        el.with_class("selected")
    } else {
        el
    }
}

/// Button-like link used by hero and banner sections
pub(crate) fn link_button(editor_id: String, text: String, href: String) -> VirtualElement {
    editable("a", editor_id)
        .with_attr("href", href)
        .with_class("button")
        .with_text(text)
}
