//! Mapping a logical edit target onto a rendered element
//!
//! Strategies run in order and the first success wins:
//!
//! 1. [`LocatorStrategy`]: the edit's CSS-path-like locator
//! 2. [`EditorIdStrategy`]: `data-editor-id` (then `id`) equal to the edit id
//! 3. [`PositionalStrategy`]: the Nth editable element in document order,
//!    N taken from the third `-`-separated part of the edit id
//!
//! The positional tier couples edit identity to incidental render order. Any
//! element added, removed or moved ahead of the target shifts the index and
//! the edit lands on the wrong element. It is kept for compatibility with
//! ids captured that way and can be switched off with
//! [`ResolutionChain::without_positional`].

use pagecraft_model::{ElementEdit, VirtualElement};

use crate::error::ResolutionError;
use crate::locator::Locator;
use crate::surface::{NodePath, Surface};

pub trait ResolutionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, surface: &Surface, edit: &ElementEdit) -> Result<NodePath, ResolutionError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocatorStrategy;

impl ResolutionStrategy for LocatorStrategy {
    fn name(&self) -> &'static str {
        "locator"
    }

    fn resolve(&self, surface: &Surface, edit: &ElementEdit) -> Result<NodePath, ResolutionError> {
        let raw = edit
            .locator
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(ResolutionError::NotApplicable { strategy: self.name() })?;

        let locator = Locator::parse(raw)?;
        locator
            .select_first(surface)
            .ok_or_else(|| ResolutionError::NoMatch(format!("locator '{}'", raw)))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EditorIdStrategy;

impl ResolutionStrategy for EditorIdStrategy {
    fn name(&self) -> &'static str {
        "editor-id"
    }

    fn resolve(&self, surface: &Surface, edit: &ElementEdit) -> Result<NodePath, ResolutionError> {
        if edit.id.is_empty() {
            return Err(ResolutionError::NotApplicable { strategy: self.name() });
        }
        surface
            .find_by_attr("data-editor-id", &edit.id)
            .or_else(|| surface.find_by_attr("id", &edit.id))
            .ok_or_else(|| ResolutionError::NoMatch(format!("id '{}'", edit.id)))
    }
}

/// Tags that count as editable for positional resolution
pub const EDITABLE_TAGS: [&str; 9] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "img", "button"];

#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalStrategy;

impl PositionalStrategy {
    pub fn is_editable(el: &VirtualElement) -> bool {
        EDITABLE_TAGS.contains(&el.tag.as_str()) || el.attr("data-editable").is_some() || el.has_class("editable")
    }

    /// Editable elements in document order, root excluded
    pub fn candidates(surface: &Surface) -> Vec<NodePath> {
        surface
            .descendants(&[])
            .into_iter()
            .filter(|(_, el)| Self::is_editable(el))
            .map(|(path, _)| path)
            .collect()
    }
}

impl ResolutionStrategy for PositionalStrategy {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn resolve(&self, surface: &Surface, edit: &ElementEdit) -> Result<NodePath, ResolutionError> {
        let index = edit
            .positional_index()
            .ok_or(ResolutionError::NotApplicable { strategy: self.name() })?;

        let mut candidates = Self::candidates(surface);
        let available = candidates.len();
        if index >= available {
            return Err(ResolutionError::IndexOutOfRange { index, available });
        }
        Ok(candidates.swap_remove(index))
    }
}

/// Ordered fallback over resolution strategies
pub struct ResolutionChain {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl ResolutionChain {
    pub fn new(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Locator, then editor id, then positional index
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(LocatorStrategy),
            Box::new(EditorIdStrategy),
            Box::new(PositionalStrategy),
        ])
    }

    pub fn without_positional() -> Self {
        Self::new(vec![Box::new(LocatorStrategy), Box::new(EditorIdStrategy)])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Path of the target element and the name of the strategy that found it
    pub fn resolve(&self, surface: &Surface, edit: &ElementEdit) -> Result<(NodePath, &'static str), ResolutionError> {
        let mut attempts = Vec::new();
        for strategy in &self.strategies {
            match strategy.resolve(surface, edit) {
                Ok(path) => return Ok((path, strategy.name())),
                Err(ResolutionError::NotApplicable { .. }) => {}
                Err(err) => attempts.push(format!("{}: {}", strategy.name(), err)),
            }
        }
        Err(ResolutionError::AllStrategiesFailed {
            id: edit.id.clone(),
            attempts,
        })
    }
}

impl Default for ResolutionChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ResolutionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionChain")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::VirtualNode;

    fn page() -> Surface {
        Surface::new(
            VirtualElement::new("main")
                .with_child(
                    VirtualElement::new("h1")
                        .with_attr("data-editor-id", "hero-1.title")
                        .with_text("Welcome"),
                )
                .with_child(VirtualElement::new("p").with_attr("id", "intro").with_text("Intro"))
                .with_child(VirtualNode::text("loose text"))
                .with_child(VirtualElement::new("a").with_class("button").with_text("Go"))
                .with_child(VirtualElement::new("div").with_class("editable").with_text("Marked"))
                .with_child(VirtualElement::new("img").with_attr("src", "/a.png")),
        )
    }

    #[test]
    fn test_locator_wins_over_id() {
        let surface = page();
        let edit = ElementEdit::new("hero-1.title", "textContent", "x").with_locator("p#intro");
        let (path, strategy) = ResolutionChain::standard().resolve(&surface, &edit).unwrap();
        assert_eq!(path, vec![1]);
        assert_eq!(strategy, "locator");
    }

    #[test]
    fn test_bad_locator_falls_through() {
        let surface = page();
        let edit = ElementEdit::new("hero-1.title", "textContent", "x").with_locator("p:first-child");
        let (path, strategy) = ResolutionChain::standard().resolve(&surface, &edit).unwrap();
        assert_eq!(path, vec![0]);
        assert_eq!(strategy, "editor-id");
    }

    #[test]
    fn test_id_attribute_fallback() {
        let surface = page();
        let edit = ElementEdit::new("intro", "textContent", "x");
        let (path, _) = ResolutionChain::standard().resolve(&surface, &edit).unwrap();
        assert_eq!(path, vec![1]);
    }

    #[test]
    fn test_positional_categories() {
        let surface = page();
        let paths = PositionalStrategy::candidates(&surface);
        // h1, p, div.editable, img; the unmarked anchor is skipped
        assert_eq!(paths, vec![vec![0], vec![1], vec![4], vec![5]]);

        let edit = ElementEdit::new("home-div-2", "textContent", "x");
        let (path, strategy) = ResolutionChain::standard().resolve(&surface, &edit).unwrap();
        assert_eq!(path, vec![4]);
        assert_eq!(strategy, "positional");
    }

    #[test]
    fn test_all_failed_collects_attempts() {
        let surface = page();
        let edit = ElementEdit::new("heading-0-9", "textContent", "x").with_locator("section");
        let err = ResolutionChain::standard().resolve(&surface, &edit).unwrap_err();
        match err {
            ResolutionError::AllStrategiesFailed { id, attempts } => {
                assert_eq!(id, "heading-0-9");
                assert_eq!(attempts.len(), 3);
                assert!(attempts[2].contains("out of range"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_positional_can_be_disabled() {
        let surface = page();
        let edit = ElementEdit::new("heading-0-1", "textContent", "x");
        let chain = ResolutionChain::without_positional();
        assert_eq!(chain.strategy_names(), vec!["locator", "editor-id"]);
        assert!(chain.resolve(&surface, &edit).is_err());
    }
}
