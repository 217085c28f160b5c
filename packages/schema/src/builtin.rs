//! Built-in section and block types

use pagecraft_model::{BlockSchema, FieldKind, FieldSchema, Preset, SectionSchema, Settings};
use serde_json::json;

fn text(id: &str, label: &str) -> FieldSchema {
    FieldSchema::new(id, label, FieldKind::Text)
}

fn richtext(id: &str, label: &str) -> FieldSchema {
    FieldSchema::new(id, label, FieldKind::Richtext)
}

fn color(id: &str, label: &str, default: &str) -> FieldSchema {
    FieldSchema::new(id, label, FieldKind::Color).with_default(default)
}

fn select(id: &str, label: &str, options: &[(&str, &str)], default: &str) -> FieldSchema {
    options
        .iter()
        .fold(FieldSchema::new(id, label, FieldKind::Select), |field, (label, value)| {
            field.with_option(*label, *value)
        })
        .with_default(default)
}

fn column_select(values: &[u64], default: u64) -> FieldSchema {
    values
        .iter()
        .fold(FieldSchema::new("columns", "Columns", FieldKind::Select), |field, n| {
            let label = if *n == 1 {
                "1 Column".to_string()
            } else {
                format!("{} Columns", n)
            };
            field.with_option(label, *n)
        })
        .with_default(default)
}

pub fn feature_card_block() -> BlockSchema {
    BlockSchema {
        block_type: "feature_card".to_string(),
        label: "Feature Card".to_string(),
        settings: vec![
            text("title", "Title").required().with_default("Feature Title"),
            richtext("description", "Description").with_default("Feature description goes here"),
            text("icon", "Icon")
                .with_description("Emoji or icon class")
                .with_default("⭐"),
            FieldSchema::new("link", "Link URL", FieldKind::Url).with_placeholder("https://example.com"),
            text("linkText", "Link Text").with_default("Learn More"),
        ],
    }
}

pub fn testimonial_block() -> BlockSchema {
    BlockSchema {
        block_type: "testimonial".to_string(),
        label: "Testimonial".to_string(),
        settings: vec![
            richtext("quote", "Quote")
                .required()
                .with_default("This service exceeded our expectations!"),
            text("author", "Author Name").required().with_default("John Doe"),
            text("position", "Position/Company").with_default("CEO, Company Inc."),
            FieldSchema::new("avatar", "Author Photo", FieldKind::Image),
            FieldSchema::new("rating", "Rating", FieldKind::Range)
                .with_bounds(Some(1.0), Some(5.0), Some(1.0))
                .with_default(5),
        ],
    }
}

fn hero_section() -> SectionSchema {
    SectionSchema {
        section_type: "hero".to_string(),
        label: "Hero Section".to_string(),
        settings: vec![
            text("title", "Headline").required().with_default("Welcome to Our Service"),
            richtext("subtitle", "Subtitle").with_default("Discover amazing features and benefits"),
            FieldSchema::new("backgroundImage", "Background Image", FieldKind::Image),
            color("backgroundColor", "Background Color", "#f8fafc"),
            color("textColor", "Text Color", "#0f172a"),
            select(
                "alignment",
                "Text Alignment",
                &[("Left", "left"), ("Center", "center"), ("Right", "right")],
                "center",
            ),
            FieldSchema::new("showButton", "Show Button", FieldKind::Toggle).with_default(true),
            text("buttonText", "Button Text").with_default("Get Started"),
            FieldSchema::new("buttonUrl", "Button URL", FieldKind::Url).with_default("/contact"),
            select(
                "height",
                "Section Height",
                &[
                    ("Auto", "auto"),
                    ("Small (400px)", "small"),
                    ("Medium (600px)", "medium"),
                    ("Large (800px)", "large"),
                    ("Full Screen", "full"),
                ],
                "medium",
            ),
        ],
        blocks: vec![],
        max_blocks: None,
        presets: vec![],
    }
}

fn rich_text_section() -> SectionSchema {
    SectionSchema {
        section_type: "rich-text".to_string(),
        label: "Rich Text".to_string(),
        settings: vec![
            richtext("content", "Content")
                .required()
                .with_default("<p>Add your content here...</p>"),
            select(
                "textAlign",
                "Text Alignment",
                &[
                    ("Left", "left"),
                    ("Center", "center"),
                    ("Right", "right"),
                    ("Justify", "justify"),
                ],
                "left",
            ),
            select(
                "maxWidth",
                "Max Width",
                &[
                    ("Full Width", "100%"),
                    ("Large (1200px)", "1200px"),
                    ("Medium (800px)", "800px"),
                    ("Small (600px)", "600px"),
                ],
                "800px",
            ),
            color("backgroundColor", "Background Color", "transparent"),
            select(
                "padding",
                "Padding",
                &[
                    ("None", "none"),
                    ("Small", "small"),
                    ("Medium", "medium"),
                    ("Large", "large"),
                ],
                "medium",
            ),
        ],
        blocks: vec![],
        max_blocks: None,
        presets: vec![],
    }
}

fn image_with_text_section() -> SectionSchema {
    SectionSchema {
        section_type: "image-with-text".to_string(),
        label: "Image with Text".to_string(),
        settings: vec![
            text("title", "Title").with_default("Section Title"),
            richtext("content", "Content")
                .required()
                .with_default("<p>Add your content here...</p>"),
            FieldSchema::new("imageUrl", "Image", FieldKind::Image).required(),
            text("imageAlt", "Image Alt Text").with_default("Image description"),
            select(
                "imagePosition",
                "Image Position",
                &[("Left", "left"), ("Right", "right")],
                "left",
            ),
            FieldSchema::new("imageWidth", "Image Width", FieldKind::Range)
                .with_bounds(Some(30.0), Some(70.0), Some(5.0))
                .with_default(50),
            select(
                "verticalAlignment",
                "Vertical Alignment",
                &[("Top", "top"), ("Center", "center"), ("Bottom", "bottom")],
                "center",
            ),
        ],
        blocks: vec![],
        max_blocks: None,
        presets: vec![],
    }
}

fn cards_grid_section() -> SectionSchema {
    let mut preset_settings = Settings::new();
    preset_settings.insert("title".to_string(), json!("Our Services"));
    preset_settings.insert("columns".to_string(), json!(3));
    preset_settings.insert("spacing".to_string(), json!("medium"));

    SectionSchema {
        section_type: "cards-grid".to_string(),
        label: "Cards Grid".to_string(),
        settings: vec![
            text("title", "Section Title").with_default("Our Features"),
            richtext("subtitle", "Section Subtitle").with_default("Discover what makes us special"),
            column_select(&[1, 2, 3, 4], 3),
            select(
                "spacing",
                "Card Spacing",
                &[("Tight", "tight"), ("Medium", "medium"), ("Loose", "loose")],
                "medium",
            ),
            select(
                "cardStyle",
                "Card Style",
                &[
                    ("Default", "default"),
                    ("Bordered", "bordered"),
                    ("Shadow", "shadow"),
                    ("Minimal", "minimal"),
                ],
                "default",
            ),
        ],
        blocks: vec![feature_card_block()],
        max_blocks: Some(12),
        presets: vec![Preset {
            name: "3 Feature Cards".to_string(),
            settings: preset_settings,
        }],
    }
}

fn cta_banner_section() -> SectionSchema {
    SectionSchema {
        section_type: "cta-banner".to_string(),
        label: "Call to Action Banner".to_string(),
        settings: vec![
            text("title", "Title").required().with_default("Ready to Get Started?"),
            richtext("description", "Description").with_default("Join thousands of satisfied customers"),
            text("buttonText", "Button Text").required().with_default("Get Started"),
            FieldSchema::new("buttonUrl", "Button URL", FieldKind::Url)
                .required()
                .with_default("/contact"),
            color("backgroundColor", "Background Color", "#2563eb"),
            color("textColor", "Text Color", "#ffffff"),
            select(
                "buttonStyle",
                "Button Style",
                &[
                    ("Primary", "primary"),
                    ("Secondary", "secondary"),
                    ("Outline", "outline"),
                    ("Ghost", "ghost"),
                ],
                "primary",
            ),
        ],
        blocks: vec![],
        max_blocks: None,
        presets: vec![],
    }
}

fn collection_grid_section() -> SectionSchema {
    SectionSchema {
        section_type: "collection-grid".to_string(),
        label: "Collection Grid".to_string(),
        settings: vec![
            text("title", "Section Title").with_default("Our Work"),
            richtext("subtitle", "Section Subtitle").with_default("Check out our latest projects"),
            column_select(&[2, 3, 4], 3),
            FieldSchema::new("showFilters", "Show Category Filters", FieldKind::Toggle).with_default(true),
            FieldSchema::new("itemsPerPage", "Items per Page", FieldKind::Number)
                .with_bounds(Some(6.0), Some(24.0), None)
                .with_default(9),
            select(
                "aspectRatio",
                "Image Aspect Ratio",
                &[
                    ("Square (1:1)", "1:1"),
                    ("Landscape (4:3)", "4:3"),
                    ("Wide (16:9)", "16:9"),
                    ("Portrait (3:4)", "3:4"),
                ],
                "4:3",
            ),
        ],
        blocks: vec![],
        max_blocks: None,
        presets: vec![],
    }
}

/// Built-in section types in menu order
pub fn builtin_section_schemas() -> Vec<SectionSchema> {
    vec![
        hero_section(),
        rich_text_section(),
        image_with_text_section(),
        cards_grid_section(),
        cta_banner_section(),
        collection_grid_section(),
    ]
}

pub fn builtin_block_schemas() -> Vec<BlockSchema> {
    vec![feature_card_block(), testimonial_block()]
}
