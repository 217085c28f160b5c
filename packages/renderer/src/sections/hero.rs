use pagecraft_model::{SectionInstance, VirtualElement};

use super::{container, editable, link_button, section_field_id, section_shell, SectionRenderer};
use crate::context::RenderContext;

pub struct HeroRenderer;

fn height_value(height: &str) -> Option<&'static str> {
    match height {
        "small" => Some("400px"),
        "medium" => Some("600px"),
        "large" => Some("800px"),
        "full" => Some("100vh"),
        _ => None,
    }
}

impl SectionRenderer for HeroRenderer {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let s = ctx.settings(&section.settings);
        let text_color = s
            .explicit_str("textColor")
            .or_else(|| ctx.tokens.color("foreground"))
            .map(str::to_string)
            .unwrap_or_else(|| s.str("textColor"));
        let background = s
            .explicit_str("backgroundColor")
            .or_else(|| ctx.tokens.color("background"))
            .map(str::to_string)
            .unwrap_or_else(|| s.str("backgroundColor"));

        let mut shell = section_shell(section, ctx)
            .with_style("background-color", background)
            .with_style("text-align", s.str("alignment"));
        if let Some(height) = height_value(&s.str("height")) {
            shell = shell.with_style("min-height", height);
        }
        if let Some(image) = s.explicit_str("backgroundImage") {
            shell = shell
                .with_style("background-image", format!("url({})", image))
                .with_style("background-size", "cover")
                .with_style("background-position", "center");
        }

        let mut heading = editable("h1", section_field_id(section, "title"))
            .with_style("color", text_color.clone())
            .with_text(s.str("title"));
        if let Some(font) = ctx.tokens.font("headingFont") {
            heading = heading.with_style("font-family", font);
        }

        let mut content = container(ctx).with_child(heading);

        let subtitle = s.str("subtitle");
        if !subtitle.is_empty() {
            content = content.with_child(
                editable("div", section_field_id(section, "subtitle"))
                    .with_class("subtitle")
                    .with_style("color", text_color)
                    .with_markup(subtitle),
            );
        }

        let button_text = s.str("buttonText");
        if s.flag("showButton") && !button_text.is_empty() {
            let mut button = link_button(section_field_id(section, "buttonText"), button_text, s.str("buttonUrl"));
            if let Some(primary) = ctx.tokens.color("primary") {
                button = button.with_style("background-color", primary);
            }
            content = content.with_child(button);
        }

        shell.with_child(content)
    }
}
