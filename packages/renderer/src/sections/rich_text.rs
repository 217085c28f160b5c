use pagecraft_model::{SectionInstance, VirtualElement};

use super::{container, editable, section_field_id, section_shell, SectionRenderer};
use crate::context::RenderContext;

pub struct RichTextRenderer;

fn padding_step(padding: &str) -> Option<usize> {
    match padding {
        "none" => None,
        "small" => Some(4),
        "large" => Some(10),
        _ => Some(7),
    }
}

impl SectionRenderer for RichTextRenderer {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let s = ctx.settings(&section.settings);

        let mut shell = section_shell(section, ctx);
        match padding_step(&s.str("padding")) {
            Some(step) => {
                let px = format!("{}px", ctx.tokens.spacing(step));
                shell = shell
                    .with_style("padding-top", px.clone())
                    .with_style("padding-bottom", px);
            }
            None => {
                shell = shell
                    .with_style("padding-top", "0")
                    .with_style("padding-bottom", "0");
            }
        }
        let background = s.str("backgroundColor");
        if !background.is_empty() && background != "transparent" {
            shell = shell.with_style("background-color", background);
        }

        let body = editable("div", section_field_id(section, "content"))
            .with_class("rich-text-content")
            .with_style("max-width", s.str("maxWidth"))
            .with_style("margin", "0 auto")
            .with_style("text-align", s.str("textAlign"))
            .with_markup(s.str("content"));

        shell.with_child(container(ctx).with_child(body))
    }
}
