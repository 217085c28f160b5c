//! Virtual node tree for rendered pages
//!
//! This is what the theme renderer produces. It is a platform-agnostic
//! representation that can be:
//! 1. Serialized for a preview client
//! 2. Patched in place by the live-edit relay
//! 3. Inspected in tests without a browser

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual HTML node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum VirtualNode {
    Element(VirtualElement),
    Text(String),
    /// Unparsed inner markup (rich text settings, innerHTML edits)
    Markup(String),
}

/// Virtual element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualElement {
    /// HTML tag name
    pub tag: String,

    /// HTML attributes (`id`, `data-*`, `src`, ...). `class` and `style`
    /// live in their own fields and are ignored here when serializing.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub class_names: Vec<String>,

    /// Inline styles
    #[serde(default)]
    pub styles: BTreeMap<String, String>,

    #[serde(default)]
    pub children: Vec<VirtualNode>,
}

impl VirtualElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            class_names: Vec::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.push(class_name.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<VirtualNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = VirtualNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(VirtualNode::Text(text.into()))
    }

    pub fn with_markup(self, markup: impl Into<String>) -> Self {
        self.with_child(VirtualNode::Markup(markup.into()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_names.iter().any(|c| c == class_name)
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.children = vec![VirtualNode::Text(text.into())];
    }

    /// Replace all children with raw markup
    pub fn set_inner_markup(&mut self, markup: impl Into<String>) {
        self.children = vec![VirtualNode::Markup(markup.into())];
    }

    /// Set an attribute, or remove it when `value` is empty
    pub fn set_or_remove_attr(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.attributes.remove(name);
        } else {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Set an inline style, or remove it when `value` is empty
    pub fn set_or_remove_style(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(name);
        } else {
            self.styles.insert(name.to_string(), value.to_string());
        }
    }

    /// Replace the class list with the whitespace-separated names in `value`
    pub fn set_class_list(&mut self, value: &str) {
        self.class_names = value.split_whitespace().map(str::to_string).collect();
    }

    /// Replace all inline styles with the declarations in `value`
    /// (`color: red; font-size: 18px`). Declarations without a colon are skipped.
    pub fn set_style_text(&mut self, value: &str) {
        self.styles = value
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(name, v)| (name.trim().to_string(), v.trim().to_string()))
            .filter(|(name, v)| !name.is_empty() && !v.is_empty())
            .collect();
    }

    /// Child elements (text and markup nodes skipped) with their child index
    pub fn child_elements(&self) -> impl Iterator<Item = (usize, &VirtualElement)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_element().map(|e| (i, e)))
    }
}

impl VirtualNode {
    pub fn element(tag: impl Into<String>) -> VirtualElement {
        VirtualElement::new(tag)
    }

    pub fn text(content: impl Into<String>) -> Self {
        VirtualNode::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&VirtualElement> {
        match self {
            VirtualNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut VirtualElement> {
        match self {
            VirtualNode::Element(e) => Some(e),
            _ => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VirtualNode::Text(t) | VirtualNode::Markup(t) => out.push_str(t),
            VirtualNode::Element(e) => {
                for child in &e.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Whether `name` can be written as an HTML attribute name
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '>' | '<' | '/' | '='))
}

impl From<VirtualElement> for VirtualNode {
    fn from(element: VirtualElement) -> Self {
        VirtualNode::Element(element)
    }
}
