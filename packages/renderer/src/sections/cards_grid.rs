use pagecraft_model::{BlockInstance, DeviceType, SectionInstance, VirtualElement};

use super::{block_field_id, block_shell, container, editable, section_field_id, section_shell, SectionRenderer};
use crate::context::RenderContext;

/// Grid of cards, one per block
pub struct CardsGridRenderer;

impl CardsGridRenderer {
    fn render_block(&self, section: &SectionInstance, block: &BlockInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let shell = block_shell(block, ctx).with_class("card");
        let s = ctx.block_settings(block);
        match block.block_type.as_str() {
            "feature_card" => {
                let mut card = shell;
                let icon = s.str("icon");
                if !icon.is_empty() {
                    card = card.with_child(VirtualElement::new("span").with_class("icon").with_text(icon));
                }
                card = card
                    .with_child(editable("h3", block_field_id(section, block, "title")).with_text(s.str("title")))
                    .with_child(
                        editable("p", block_field_id(section, block, "description")).with_markup(s.str("description")),
                    );
                if let Some(link) = s.explicit_str("link") {
                    card = card.with_child(
                        editable("a", block_field_id(section, block, "linkText"))
                            .with_attr("href", link)
                            .with_text(s.str("linkText")),
                    );
                }
                card
            }
            "testimonial" => {
                let rating = s.u64("rating", 5).min(5) as usize;
                let mut card = shell
                    .with_child(
                        editable("blockquote", block_field_id(section, block, "quote")).with_markup(s.str("quote")),
                    )
                    .with_child(VirtualElement::new("div").with_class("rating").with_text("★".repeat(rating)));
                if let Some(avatar) = s.explicit_str("avatar") {
                    card = card.with_child(
                        VirtualElement::new("img")
                            .with_attr("src", avatar)
                            .with_attr("alt", s.str("author")),
                    );
                }
                card.with_child(editable("p", block_field_id(section, block, "author")).with_text(s.str("author")))
                    .with_child(
                        VirtualElement::new("p")
                            .with_class("position")
                            .with_text(s.str("position")),
                    )
            }
            other => shell
                .with_class("unknown-block")
                .with_text(format!("Unknown block type: {}", other)),
        }
    }
}

fn gap_step(spacing: &str) -> usize {
    match spacing {
        "tight" => 3,
        "loose" => 7,
        _ => 5,
    }
}

impl SectionRenderer for CardsGridRenderer {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let s = ctx.settings(&section.settings);
        // mobile collapses to one column, tablet to at most two
        let columns = match ctx.device {
            DeviceType::Mobile => 1,
            DeviceType::Tablet => s.u64("columns", 3).clamp(1, 2),
            DeviceType::Desktop => s.u64("columns", 3).clamp(1, 4),
        };

        let mut content = container(ctx);
        let title = s.str("title");
        if !title.is_empty() {
            content = content.with_child(editable("h2", section_field_id(section, "title")).with_text(title));
        }
        let subtitle = s.str("subtitle");
        if !subtitle.is_empty() {
            content = content.with_child(editable("p", section_field_id(section, "subtitle")).with_markup(subtitle));
        }

        let grid = VirtualElement::new("div")
            .with_class("grid")
            .with_class(format!("cards-{}", s.str("cardStyle")))
            .with_style("display", "grid")
            .with_style("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", columns))
            .with_style("gap", format!("{}px", ctx.tokens.spacing(gap_step(&s.str("spacing")))))
            .with_children(section.blocks.iter().map(|block| self.render_block(section, block, ctx).into()));

        section_shell(section, ctx).with_child(content.with_child(grid))
    }
}
