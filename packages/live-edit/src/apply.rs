//! Property application on a resolved element

use pagecraft_model::{is_valid_attr_name, EditProperty, VirtualElement};

use crate::error::ApplyError;

/// Assign `value` to `property` on `element`.
///
/// Assignment is idempotent, so replaying an edit leaves the element as it
/// was after the first application. `src` and `alt` only apply to images and
/// `href` only to links; other combinations leave the element untouched and
/// return [`ApplyError::Unsupported`].
///
/// `attr.class` / `attr.className` replace the class list and `attr.style`
/// replaces the inline style declarations, so the element never carries a
/// second `class` or `style` attribute.
pub fn apply_property(element: &mut VirtualElement, property: &EditProperty, value: &str) -> Result<(), ApplyError> {
    match property {
        EditProperty::TextContent => element.set_text_content(value),
        EditProperty::InnerHtml => element.set_inner_markup(value),
        EditProperty::Src | EditProperty::Alt => {
            if element.tag != "img" {
                return Err(unsupported(property, element));
            }
            element.set_or_remove_attr(&property.name(), value);
        }
        EditProperty::Href => {
            if element.tag != "a" {
                return Err(unsupported(property, element));
            }
            element.set_or_remove_attr("href", value);
        }
        EditProperty::Style(name) => element.set_or_remove_style(&css_property_name(name), value),
        EditProperty::Attr(name) => match name.as_str() {
            "class" | "className" => element.set_class_list(value),
            "style" => element.set_style_text(value),
            _ if !is_valid_attr_name(name) => return Err(ApplyError::InvalidAttribute(name.clone())),
            _ => element.set_or_remove_attr(name, value),
        },
    }
    Ok(())
}

/// Parse a raw property name and apply it
pub fn apply_raw(element: &mut VirtualElement, raw_property: &str, value: &str) -> Result<(), ApplyError> {
    let property = EditProperty::parse(raw_property).ok_or_else(|| ApplyError::UnknownProperty(raw_property.to_string()))?;
    apply_property(element, &property, value)
}

fn unsupported(property: &EditProperty, element: &VirtualElement) -> ApplyError {
    ApplyError::Unsupported {
        property: property.name(),
        tag: element.tag.clone(),
    }
}

/// `backgroundColor` becomes `background-color`; kebab-case passes through
fn css_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::VirtualNode;

    #[test]
    fn test_text_and_markup() {
        let mut el = VirtualElement::new("p").with_child(VirtualElement::new("strong").with_text("old"));
        apply_raw(&mut el, "textContent", "Hello <b>").unwrap();
        assert_eq!(el.children, vec![VirtualNode::text("Hello <b>")]);

        apply_raw(&mut el, "innerHTML", "<em>Hi</em>").unwrap();
        assert_eq!(el.children, vec![VirtualNode::Markup("<em>Hi</em>".to_string())]);
    }

    #[test]
    fn test_image_only_properties() {
        let mut img = VirtualElement::new("img").with_attr("src", "/old.png");
        apply_raw(&mut img, "src", "/new.png").unwrap();
        apply_raw(&mut img, "alt", "A cat").unwrap();
        assert_eq!(img.attr("src"), Some("/new.png"));
        assert_eq!(img.attr("alt"), Some("A cat"));

        let mut div = VirtualElement::new("div");
        let before = div.clone();
        let err = apply_raw(&mut div, "src", "/new.png").unwrap_err();
        assert!(matches!(err, ApplyError::Unsupported { .. }));
        assert_eq!(div, before);
    }

    #[test]
    fn test_href_only_on_links() {
        let mut link = VirtualElement::new("a").with_attr("href", "/old");
        apply_raw(&mut link, "href", "/new").unwrap();
        assert_eq!(link.attr("href"), Some("/new"));

        let mut button = VirtualElement::new("button");
        assert!(apply_raw(&mut button, "href", "/new").is_err());
        assert_eq!(button.attr("href"), None);
    }

    #[test]
    fn test_namespaced_families() {
        let mut el = VirtualElement::new("section").with_attr("data-theme", "dark");
        apply_raw(&mut el, "style.backgroundColor", "red").unwrap();
        apply_raw(&mut el, "style.font-size", "18px").unwrap();
        assert_eq!(el.styles.get("background-color").map(String::as_str), Some("red"));
        assert_eq!(el.styles.get("font-size").map(String::as_str), Some("18px"));

        apply_raw(&mut el, "style.backgroundColor", "").unwrap();
        assert!(!el.styles.contains_key("background-color"));

        apply_raw(&mut el, "attr.data-theme", "").unwrap();
        assert_eq!(el.attr("data-theme"), None);
        apply_raw(&mut el, "attr.aria-label", "Intro").unwrap();
        assert_eq!(el.attr("aria-label"), Some("Intro"));
    }

    #[test]
    fn test_class_and_style_attrs_use_dedicated_fields() {
        let mut el = VirtualElement::new("p").with_class("lead").with_attr("id", "intro").with_text("Hi");

        apply_raw(&mut el, "attr.class", "highlight").unwrap();
        assert_eq!(el.class_names, vec!["highlight"]);
        apply_raw(&mut el, "attr.className", "big bold").unwrap();
        assert_eq!(el.class_names, vec!["big", "bold"]);
        apply_raw(&mut el, "attr.style", "color: red").unwrap();
        assert_eq!(el.styles.get("color").map(String::as_str), Some("red"));

        assert_eq!(el.attr("class"), None);
        assert_eq!(el.attr("className"), None);
        assert_eq!(el.attr("style"), None);
        assert_eq!(el.id(), Some("intro"));

        apply_raw(&mut el, "attr.className", "").unwrap();
        assert!(el.class_names.is_empty());
    }

    #[test]
    fn test_invalid_attribute_name_is_rejected() {
        let mut el = VirtualElement::new("p");
        let before = el.clone();
        assert_eq!(
            apply_raw(&mut el, "attr.x\"onload=", "alert(1)"),
            Err(ApplyError::InvalidAttribute("x\"onload=".to_string()))
        );
        assert_eq!(el, before);
    }

    #[test]
    fn test_unknown_property() {
        let mut el = VirtualElement::new("p");
        assert_eq!(
            apply_raw(&mut el, "onclick", "x"),
            Err(ApplyError::UnknownProperty("onclick".to_string()))
        );
    }

    #[test]
    fn test_idempotent() {
        let mut once = VirtualElement::new("h2");
        apply_raw(&mut once, "textContent", "Same").unwrap();
        let mut twice = once.clone();
        apply_raw(&mut twice, "textContent", "Same").unwrap();
        assert_eq!(once, twice);
    }
}
