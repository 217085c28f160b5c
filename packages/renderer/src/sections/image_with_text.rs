use pagecraft_model::{SectionInstance, VirtualElement};

use super::{container, editable, section_field_id, section_shell, SectionRenderer};
use crate::context::RenderContext;

pub struct ImageWithTextRenderer;

impl SectionRenderer for ImageWithTextRenderer {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let s = ctx.settings(&section.settings);
        let image_width = s.u64("imageWidth", 50).clamp(30, 70);

        let media = match s.explicit_str("imageUrl") {
            Some(url) => editable("img", section_field_id(section, "imageUrl"))
                .with_attr("src", url)
                .with_attr("alt", s.str("imageAlt")),
            None => VirtualElement::new("div")
                .with_class("image-placeholder")
                .with_child(VirtualElement::new("p").with_text("Add an image")),
        };
        let media_column = VirtualElement::new("div")
            .with_class("media")
            .with_style("flex-basis", format!("{}%", image_width))
            .with_child(media);

        let mut text_column = VirtualElement::new("div")
            .with_class("text")
            .with_style("flex-basis", format!("{}%", 100 - image_width));
        let title = s.str("title");
        if !title.is_empty() {
            text_column = text_column.with_child(editable("h2", section_field_id(section, "title")).with_text(title));
        }
        text_column = text_column.with_child(
            editable("div", section_field_id(section, "content"))
                .with_class("rich-text-content")
                .with_markup(s.str("content")),
        );

        let align = match s.str("verticalAlignment").as_str() {
            "top" => "flex-start",
            "bottom" => "flex-end",
            _ => "center",
        };
        // mobile stacks the columns, image first
        let direction = match (ctx.is_mobile(), s.str("imagePosition").as_str()) {
            (true, _) => "column",
            (false, "right") => "row-reverse",
            (false, _) => "row",
        };
        let row = VirtualElement::new("div")
            .with_class("columns")
            .with_style("display", "flex")
            .with_style("flex-direction", direction)
            .with_style("align-items", align)
            .with_style("gap", format!("{}px", ctx.tokens.spacing(ctx.preset.gap_step)))
            .with_child(media_column)
            .with_child(text_column);

        section_shell(section, ctx).with_child(container(ctx).with_child(row))
    }
}
