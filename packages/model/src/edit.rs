//! Live element edits
//!
//! An `ElementEdit` is a granular correction to one rendered element on a
//! live page. It is a side channel: it is never folded into a template
//! document, only applied to whatever surface is currently rendered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementEdit {
    /// Logical target id, e.g. `home-h2-3`
    pub id: String,

    /// CSS-path-like locator relative to the page root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,

    /// Tag hint recorded by the editor (h1, p, img, a, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    /// Raw property name (textContent, innerHTML, src, alt, href, style.*, attr.*)
    pub property: String,

    pub value: String,

    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
}

impl ElementEdit {
    pub fn new(id: impl Into<String>, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locator: None,
            element_type: None,
            property: property.into(),
            value: value.into(),
            timestamp: 0,
        }
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn parsed_property(&self) -> Option<EditProperty> {
        EditProperty::parse(&self.property)
    }

    /// Position encoded in the third `-`-separated part of the id.
    ///
    /// `heading-0-2` yields `Some(2)`. The index counts editable elements in
    /// document order at the time the edit was captured, so it goes stale as
    /// soon as the page gains, loses or reorders such elements.
    pub fn positional_index(&self) -> Option<usize> {
        let parts: Vec<&str> = self.id.split('-').collect();
        if parts.len() < 3 {
            return None;
        }
        parts[2].parse().ok()
    }
}

/// Closed set of properties a live edit may target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditProperty {
    TextContent,
    InnerHtml,
    Src,
    Alt,
    Href,
    Style(String),
    Attr(String),
}

impl EditProperty {
    /// Parse the first whitespace-delimited token of a raw property name
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.split_whitespace().next()?;
        match token {
            "textContent" => Some(EditProperty::TextContent),
            "innerHTML" => Some(EditProperty::InnerHtml),
            "src" => Some(EditProperty::Src),
            "alt" => Some(EditProperty::Alt),
            "href" => Some(EditProperty::Href),
            other => {
                if let Some(name) = other.strip_prefix("style.") {
                    (!name.is_empty()).then(|| EditProperty::Style(name.to_string()))
                } else if let Some(name) = other.strip_prefix("attr.") {
                    (!name.is_empty()).then(|| EditProperty::Attr(name.to_string()))
                } else {
                    None
                }
            }
        }
    }

    pub fn name(&self) -> String {
        match self {
            EditProperty::TextContent => "textContent".to_string(),
            EditProperty::InnerHtml => "innerHTML".to_string(),
            EditProperty::Src => "src".to_string(),
            EditProperty::Alt => "alt".to_string(),
            EditProperty::Href => "href".to_string(),
            EditProperty::Style(name) => format!("style.{}", name),
            EditProperty::Attr(name) => format!("attr.{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties() {
        assert_eq!(EditProperty::parse("textContent"), Some(EditProperty::TextContent));
        assert_eq!(EditProperty::parse("textContent author-id"), Some(EditProperty::TextContent));
        assert_eq!(
            EditProperty::parse("style.color"),
            Some(EditProperty::Style("color".to_string()))
        );
        assert_eq!(
            EditProperty::parse("attr.data-theme"),
            Some(EditProperty::Attr("data-theme".to_string()))
        );
        assert_eq!(EditProperty::parse("style."), None);
        assert_eq!(EditProperty::parse("onclick"), None);
        assert_eq!(EditProperty::parse("   "), None);
    }

    #[test]
    fn test_positional_index() {
        assert_eq!(ElementEdit::new("heading-0-2", "textContent", "").positional_index(), Some(2));
        assert_eq!(ElementEdit::new("home-h2-10", "textContent", "").positional_index(), Some(10));
        assert_eq!(ElementEdit::new("hero-title", "textContent", "").positional_index(), None);
        assert_eq!(ElementEdit::new("a-b-c", "textContent", "").positional_index(), None);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"id":"home-p-1","elementType":"p","property":"textContent","value":"Hi","timestamp":5}"#;
        let edit: ElementEdit = serde_json::from_str(json).unwrap();

        assert_eq!(edit.element_type.as_deref(), Some("p"));
        assert_eq!(edit.locator, None);
        assert_eq!(edit.timestamp, 5);
    }
}
