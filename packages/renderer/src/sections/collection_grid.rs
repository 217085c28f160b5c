use pagecraft_model::{SectionInstance, VirtualElement};

use super::{container, editable, section_field_id, section_shell, SectionRenderer};
use crate::context::RenderContext;

/// Collection items come from an external content source; this renders the
/// frame (heading, filters, an empty grid sized by the settings) they are
/// placed into.
pub struct CollectionGridRenderer;

const FILTERS: [&str; 4] = ["All", "Web", "Branding", "Marketing"];

impl SectionRenderer for CollectionGridRenderer {
    fn render(&self, section: &SectionInstance, ctx: &RenderContext<'_>) -> VirtualElement {
        let s = ctx.settings(&section.settings);
        let columns = if ctx.is_mobile() { 1 } else { s.u64("columns", 3).clamp(2, 4) };

        let mut content = container(ctx)
            .with_child(editable("h2", section_field_id(section, "title")).with_text(s.str("title")))
            .with_child(editable("p", section_field_id(section, "subtitle")).with_markup(s.str("subtitle")));

        if s.flag("showFilters") {
            content = content.with_child(
                VirtualElement::new("div").with_class("filters").with_children(
                    FILTERS
                        .iter()
                        .map(|label| VirtualElement::new("button").with_attr("data-filter", *label).with_text(*label).into()),
                ),
            );
        }

        let grid = VirtualElement::new("div")
            .with_class("grid")
            .with_attr("data-items-per-page", s.u64("itemsPerPage", 9).to_string())
            .with_attr("data-aspect-ratio", s.str("aspectRatio"))
            .with_style("display", "grid")
            .with_style("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", columns));

        section_shell(section, ctx).with_child(content.with_child(grid))
    }
}
