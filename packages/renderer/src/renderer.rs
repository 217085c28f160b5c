//! # Theme Renderer
//!
//! Maps `(document, device, selection)` to a virtual node tree.
//!
//! Each section is dispatched by type tag through a table of
//! [`SectionRenderer`]s. A type with no registered renderer produces a
//! marked placeholder instead of an error, and is reported in
//! [`RenderOutput::unknown_types`].
//!
//! Rendering is pure: the document is never modified and selection only
//! changes presentation.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use pagecraft_model::{DeviceType, SectionInstance, TemplateDocument, ThemeTokens, VirtualElement, VirtualNode};
use pagecraft_schema::SchemaRegistry;

use crate::context::RenderContext;
use crate::sections::{
    CardsGridRenderer, CollectionGridRenderer, CtaBannerRenderer, HeroRenderer, ImageWithTextRenderer,
    RichTextRenderer, SectionRenderer,
};

/// Advisory selection passed in by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSelection<'a> {
    pub section: Option<&'a str>,
    pub block: Option<&'a str>,
}

impl<'a> RenderSelection<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn section(section: &'a str) -> Self {
        Self {
            section: Some(section),
            block: None,
        }
    }

    pub fn block(section: &'a str, block: &'a str) -> Self {
        Self {
            section: Some(section),
            block: Some(block),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub root: VirtualNode,
    /// Section types without a renderer and block types without a schema
    pub unknown_types: BTreeSet<String>,
}

pub struct ThemeRenderer {
    registry: Arc<SchemaRegistry>,
    renderers: HashMap<String, Box<dyn SectionRenderer>>,
}

impl ThemeRenderer {
    /// Renderer with no section renderers registered
    pub fn empty(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            renderers: HashMap::new(),
        }
    }

    /// Renderer for every built-in section type
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        let mut renderer = Self::empty(registry);
        renderer
            .register("hero", HeroRenderer)
            .register("rich-text", RichTextRenderer)
            .register("image-with-text", ImageWithTextRenderer)
            .register("cards-grid", CardsGridRenderer)
            .register("cta-banner", CtaBannerRenderer)
            .register("collection-grid", CollectionGridRenderer);
        renderer
    }

    /// Register or replace the renderer for a section type
    pub fn register(&mut self, section_type: impl Into<String>, renderer: impl SectionRenderer + 'static) -> &mut Self {
        self.renderers.insert(section_type.into(), Box::new(renderer));
        self
    }

    pub fn has_renderer(&self, section_type: &str) -> bool {
        self.renderers.contains_key(section_type)
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn render(&self, document: &TemplateDocument, device: DeviceType, selection: RenderSelection<'_>) -> RenderOutput {
        let mut unknown_types = BTreeSet::new();
        let tokens = &document.theme_tokens;

        let body = if document.sections.is_empty() {
            empty_state()
        } else {
            let sections = document.sections.iter().map(|section| {
                let is_selected = selection.section == Some(section.id.as_str());
                let selected_block = if is_selected { selection.block } else { None };
                self.render_section(section, device, tokens, is_selected, selected_block, &mut unknown_types)
                    .into()
            });
            VirtualElement::new("main").with_children(sections.collect::<Vec<_>>())
        };

        let page = VirtualElement::new("div")
            .with_class("page")
            .with_style("min-height", "100%")
            .with_child(body);
        let page = match (tokens.color("background"), tokens.color("foreground")) {
            (Some(bg), Some(fg)) => page.with_style("background-color", bg).with_style("color", fg),
            (Some(bg), None) => page.with_style("background-color", bg),
            (None, Some(fg)) => page.with_style("color", fg),
            (None, None) => page,
        };

        let root = theme_root(tokens, device).with_child(page);

        if !unknown_types.is_empty() {
            tracing::debug!(template_id = %document.template_id, ?unknown_types, "Rendered placeholders");
        }

        RenderOutput {
            root: root.into(),
            unknown_types,
        }
    }

    fn render_section(
        &self,
        section: &SectionInstance,
        device: DeviceType,
        tokens: &ThemeTokens,
        is_selected: bool,
        selected_block: Option<&str>,
        unknown_types: &mut BTreeSet<String>,
    ) -> VirtualElement {
        let fields = self
            .registry
            .section_schema(&section.section_type)
            .map(|schema| schema.settings.as_slice())
            .unwrap_or(&[]);
        let ctx = RenderContext::new(device, tokens, &self.registry)
            .with_fields(fields)
            .with_selection(is_selected, selected_block);

        let inner = match self.renderers.get(&section.section_type) {
            Some(renderer) => renderer.render(section, &ctx),
            None => {
                unknown_types.insert(section.section_type.clone());
                placeholder(&section.section_type)
            }
        };
        for block in &section.blocks {
            if self.registry.block_schema(&block.block_type).is_none() {
                unknown_types.insert(block.block_type.clone());
            }
        }

        let mut wrapper = VirtualElement::new("div")
            .with_class("section")
            .with_attr("data-section-id", section.id.clone())
            .with_attr("data-section-type", section.section_type.clone());
        if is_selected {
            wrapper = wrapper.with_class("selected").with_child(
                VirtualElement::new("div")
                    .with_class("selection-label")
                    .with_text(format!("{} section", section.section_type)),
            );
        }
        wrapper.with_child(inner)
    }
}

/// Root element carrying theme variables, direction and dark mode
fn theme_root(tokens: &ThemeTokens, device: DeviceType) -> VirtualElement {
    let preset = crate::breakpoints::device_preset(device);
    let dir = if tokens.rtl { "rtl" } else { "ltr" };

    let mut root = VirtualElement::new("div")
        .with_class("theme-preview")
        .with_class(dir)
        .with_attr("dir", dir)
        .with_attr("data-device", device.as_str())
        .with_style("direction", dir)
        .with_style("--section-padding", preset.section_padding)
        .with_style("--container-max-width", preset.container_max_width);
    if tokens.dark_mode {
        root = root.with_class("dark");
    }
    if let Some(size) = preset.font_size {
        root = root.with_style("font-size", size);
    }

    for (role, value) in &tokens.colors {
        root = root.with_style(format!("--theme-{}", kebab(role)), value.clone());
    }
    for (role, value) in &tokens.typography {
        root = root.with_style(format!("--theme-{}", kebab(role)), value.clone());
    }
    if let Some(radius) = &tokens.radius {
        root = root.with_style("--theme-radius", radius.clone());
    }
    if let Some(body_font) = tokens.font("bodyFont") {
        root = root.with_style("font-family", body_font);
    }
    root
}

/// `bodyFont` -> `body-font`
fn kebab(role: &str) -> String {
    let mut out = String::with_capacity(role.len() + 4);
    for c in role.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn placeholder(section_type: &str) -> VirtualElement {
    VirtualElement::new("div")
        .with_class("unknown-section")
        .with_attr("data-unknown-type", section_type)
        .with_child(VirtualElement::new("p").with_text(format!("Unknown section type: {}", section_type)))
        .with_child(
            VirtualElement::new("p")
                .with_class("hint")
                .with_text("This section type doesn't have a renderer implemented yet."),
        )
}

fn empty_state() -> VirtualElement {
    VirtualElement::new("div").with_class("empty-state").with_child(
        VirtualElement::new("div")
            .with_child(VirtualElement::new("h3").with_text("No sections added"))
            .with_child(VirtualElement::new("p").with_text("Add sections to your template to start building your page")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_schema::default_template;

    fn renderer() -> ThemeRenderer {
        ThemeRenderer::new(Arc::new(SchemaRegistry::builtin()))
    }

    fn root(output: &RenderOutput) -> &VirtualElement {
        output.root.as_element().unwrap()
    }

    #[test]
    fn test_kebab_roles() {
        assert_eq!(kebab("bodyFont"), "body-font");
        assert_eq!(kebab("primary"), "primary");
    }

    #[test]
    fn test_root_carries_theme() {
        let mut doc = default_template("home").unwrap();
        doc.theme_tokens.rtl = true;
        doc.theme_tokens.dark_mode = true;

        let output = renderer().render(&doc, DeviceType::Mobile, RenderSelection::none());
        let root = root(&output);

        assert_eq!(root.attr("dir"), Some("rtl"));
        assert!(root.has_class("dark"));
        assert_eq!(root.styles.get("--container-max-width").map(String::as_str), Some("100%"));
        assert_eq!(root.styles.get("--theme-primary").map(String::as_str), doc.theme_tokens.color("primary"));
        assert!(output.unknown_types.is_empty());
    }

    #[test]
    fn test_empty_document_renders_empty_state() {
        let doc = TemplateDocument::new("blank", ThemeTokens::default());
        let output = renderer().render(&doc, DeviceType::Desktop, RenderSelection::none());
        assert!(output.root.as_element().unwrap().text_content().contains("No sections added"));
    }
}
