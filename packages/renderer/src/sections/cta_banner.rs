use pagecraft_model::{SectionInstance, VirtualElement};

use super::{container, editable, link_button, section_field_id, section_shell, SectionRenderer};
use crate::context::RenderContext;

pub struct CtaBannerRenderer;

/// Resolve a color setting that may name a theme role (`primary`, `white`)
fn resolve_color(value: &str, ctx: &RenderContext<'_>) -> String {
    match value {
        "white" => "#ffffff".to_string(),
        "black" => "#000000".to_string(),
        role => ctx.tokens.color(role).unwrap_or(role).to_string(),
    }
}

impl SectionRenderer for CtaBannerRenderer {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let s = ctx.settings(&section.settings);
        let background = resolve_color(&s.str("backgroundColor"), ctx);
        let text_color = resolve_color(&s.str("textColor"), ctx);

        let content = container(ctx)
            .with_style("text-align", "center")
            .with_child(
                editable("h2", section_field_id(section, "title"))
                    .with_style("color", text_color.clone())
                    .with_text(s.str("title")),
            )
            .with_child(
                editable("p", section_field_id(section, "description"))
                    .with_style("color", text_color)
                    .with_markup(s.str("description")),
            )
            .with_child(
                link_button(section_field_id(section, "buttonText"), s.str("buttonText"), s.str("buttonUrl"))
                    .with_class(format!("button-{}", s.str("buttonStyle"))),
            );

        section_shell(section, ctx)
            .with_style("background-color", background)
            .with_child(content)
    }
}
