//! Default theme, starter documents and the template catalog

use pagecraft_model::{BlockInstance, SectionInstance, TemplateDocument, ThemeTokens};
use serde::{Deserialize, Serialize};

/// Catalog entry for a page that can be edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub route: String,
}

impl TemplateInfo {
    fn new(id: &str, name: &str, description: &str, icon: &str, route: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            route: route.to_string(),
        }
    }
}

pub fn template_catalog() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo::new(
            "home",
            "Home Page",
            "Main landing page with hero, features, and CTA sections",
            "🏠",
            "/",
        ),
        TemplateInfo::new("about", "About Page", "Company information, team, and mission", "ℹ️", "/about"),
        TemplateInfo::new("services", "Services Page", "Service offerings and packages", "⚙️", "/services"),
        TemplateInfo::new("contact", "Contact Page", "Contact form and company information", "📞", "/contact"),
        TemplateInfo::new("blog", "Blog Page", "Blog listing and article pages", "📝", "/blog"),
        TemplateInfo::new("product", "Product Page", "Product detail and showcase pages", "📦", "/product"),
    ]
}

pub fn default_theme_tokens() -> ThemeTokens {
    let colors = [
        ("primary", "#2563eb"),
        ("secondary", "#7c3aed"),
        ("accent", "#f59e0b"),
        ("background", "#ffffff"),
        ("surface", "#f8fafc"),
        ("foreground", "#0f172a"),
        ("muted", "#64748b"),
        ("border", "#e2e8f0"),
        ("success", "#10b981"),
        ("warning", "#f59e0b"),
        ("error", "#ef4444"),
        ("info", "#3b82f6"),
    ];
    let typography = [
        ("bodyFont", "Inter, system-ui, sans-serif"),
        ("headingFont", "Inter, system-ui, sans-serif"),
        ("arabicFont", "Cairo, system-ui, sans-serif"),
    ];

    ThemeTokens {
        colors: colors.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        typography: typography.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        spacing_scale: vec![0, 4, 8, 12, 16, 20, 24, 32, 40, 48, 64, 80, 96, 128],
        radius: Some("8px".to_string()),
        dark_mode: false,
        rtl: false,
    }
}

/// Empty document used when a template has no stored draft and no starter content
pub fn empty_template(template_id: &str, theme_tokens: ThemeTokens) -> TemplateDocument {
    let mut doc = TemplateDocument::new(template_id, theme_tokens);
    doc.version = 1;
    doc
}

/// Starter content for templates that ship with one
pub fn default_template(template_id: &str) -> Option<TemplateDocument> {
    match template_id {
        "home" => Some(default_home()),
        "about" => Some(default_about()),
        _ => None,
    }
}

fn feature_card(id: &str, title: &str, description: &str, icon: &str, link: &str) -> BlockInstance {
    BlockInstance::new(id, "feature_card")
        .with_setting("title", title)
        .with_setting("description", description)
        .with_setting("icon", icon)
        .with_setting("link", link)
}

fn default_home() -> TemplateDocument {
    let mut doc = TemplateDocument::new("home", default_theme_tokens())
        .with_section(
            SectionInstance::new("hero-1", "hero")
                .with_setting("title", "Welcome to Our Amazing Service")
                .with_setting("subtitle", "We help businesses grow with innovative digital solutions")
                .with_setting("buttonText", "Get Started")
                .with_setting("buttonUrl", "/contact")
                .with_setting("backgroundImage", "")
                .with_setting("alignment", "center")
                .with_setting("showButton", true),
        )
        .with_section(
            SectionInstance::new("rich-text-1", "rich-text")
                .with_setting(
                    "content",
                    "<h2>About Our Company</h2><p>We are a leading digital agency focused on delivering \
                     exceptional results for our clients. Our team of experts combines creativity with \
                     technical excellence to create solutions that drive business growth.</p>",
                )
                .with_setting("textAlign", "center")
                .with_setting("maxWidth", "800px"),
        )
        .with_section(
            SectionInstance::new("cards-1", "cards-grid")
                .with_setting("title", "Our Services")
                .with_setting("columns", 3)
                .with_setting("spacing", "medium")
                .with_block(feature_card(
                    "card-1",
                    "Web Development",
                    "Custom websites and web applications built with modern technologies",
                    "💻",
                    "/services/web-development",
                ))
                .with_block(feature_card(
                    "card-2",
                    "Digital Marketing",
                    "Data-driven marketing strategies to grow your online presence",
                    "📈",
                    "/services/digital-marketing",
                ))
                .with_block(feature_card(
                    "card-3",
                    "Consulting",
                    "Strategic guidance to help your business leverage technology effectively",
                    "💡",
                    "/services/consulting",
                )),
        )
        .with_section(
            SectionInstance::new("cta-1", "cta-banner")
                .with_setting("title", "Ready to Get Started?")
                .with_setting("description", "Let's discuss how we can help your business grow")
                .with_setting("buttonText", "Contact Us Today")
                .with_setting("buttonUrl", "/contact")
                .with_setting("backgroundColor", "primary")
                .with_setting("textColor", "white"),
        );
    doc.version = 1;
    doc
}

fn default_about() -> TemplateDocument {
    let mut doc = TemplateDocument::new("about", default_theme_tokens())
        .with_section(
            SectionInstance::new("hero-about-1", "hero")
                .with_setting("title", "About Our Company")
                .with_setting(
                    "subtitle",
                    "Learn more about our mission, values, and the team behind our success",
                )
                .with_setting("backgroundImage", "")
                .with_setting("alignment", "left")
                .with_setting("showButton", false),
        )
        .with_section(
            SectionInstance::new("image-text-1", "image-with-text")
                .with_setting("title", "Our Story")
                .with_setting(
                    "content",
                    "Founded in 2020, we've been at the forefront of digital innovation, helping \
                     businesses transform and grow in the digital age.",
                )
                .with_setting("imageUrl", "")
                .with_setting("imagePosition", "left")
                .with_setting("imageAlt", "Our team at work"),
        )
        .with_section(
            SectionInstance::new("rich-text-about-1", "rich-text")
                .with_setting(
                    "content",
                    "<h2>Our Mission</h2><p>To empower businesses with cutting-edge digital solutions \
                     that drive growth, efficiency, and success in an ever-evolving marketplace.</p>\
                     <h2>Our Values</h2><ul><li>Innovation and creativity</li><li>Client-focused \
                     approach</li><li>Quality and excellence</li><li>Continuous learning</li></ul>",
                )
                .with_setting("textAlign", "left")
                .with_setting("maxWidth", "100%"),
        );
    doc.version = 1;
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaRegistry;

    #[test]
    fn test_default_home_structure() {
        let home = default_template("home").unwrap();
        let types: Vec<&str> = home.section_types().collect();

        assert_eq!(types, vec!["hero", "rich-text", "cards-grid", "cta-banner"]);
        assert_eq!(home.section("cards-1").unwrap().blocks.len(), 3);
        assert_eq!(home.version, 1);
    }

    #[test]
    fn test_default_documents_use_registered_types() {
        let registry = SchemaRegistry::builtin();
        for id in ["home", "about"] {
            let doc = default_template(id).unwrap();
            for section in &doc.sections {
                assert!(registry.has_section_type(&section.section_type), "{}", section.section_type);
                for block in &section.blocks {
                    assert!(registry.block_schema(&block.block_type).is_some());
                }
            }
        }
    }

    #[test]
    fn test_no_starter_for_other_templates() {
        assert!(default_template("services").is_none());
        let empty = empty_template("services", default_theme_tokens());
        assert!(empty.sections.is_empty());
        assert_eq!(empty.theme_tokens.color("primary"), Some("#2563eb"));
    }

    #[test]
    fn test_catalog_routes() {
        let catalog = template_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog[0].route, "/");
        assert!(catalog.iter().any(|t| t.id == "product"));
    }
}
