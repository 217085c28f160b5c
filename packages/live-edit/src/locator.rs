//! CSS-path-like locators
//!
//! Grammar, segments separated by `>` (child) or whitespace (descendant):
//!
//! ```text
//! locator  := segment (combinator segment)*
//! segment  := (tag | '*')? ( '#' ident | '.' ident | '[' ident ('="' value '"')? ']' | ':nth-of-type(' n ')' )*
//! ```
//!
//! Matching is scoped to the surface root: the first segment may match any
//! descendant of the root, the root itself is never a candidate for any
//! segment, and the first match in document order wins.

use std::fmt;

use pagecraft_model::VirtualElement;

use crate::error::LocatorError;
use crate::surface::{NodePath, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Child,
    Descendant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, Option<String>)>,
    pub nth_of_type: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub combinator: Combinator,
    pub compound: Compound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    steps: Vec<Step>,
}

impl Locator {
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let mut steps = Vec::new();
        let mut combinator = Combinator::Descendant;
        let mut pending_child = false;

        for token in tokenize(input)? {
            match token {
                Token::Child => {
                    if steps.is_empty() || pending_child {
                        return Err(LocatorError::DanglingCombinator(input.to_string()));
                    }
                    pending_child = true;
                }
                Token::Segment(text) => {
                    if pending_child {
                        combinator = Combinator::Child;
                    }
                    steps.push(Step {
                        combinator,
                        compound: parse_compound(&text)?,
                    });
                    combinator = Combinator::Descendant;
                    pending_child = false;
                }
            }
        }

        if pending_child {
            return Err(LocatorError::DanglingCombinator(input.to_string()));
        }
        if steps.is_empty() {
            return Err(LocatorError::Empty);
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// All matches in document order
    pub fn select_all(&self, surface: &Surface) -> Vec<NodePath> {
        let mut current: Vec<NodePath> = vec![Vec::new()];

        for step in &self.steps {
            let mut next: Vec<NodePath> = Vec::new();
            for base in &current {
                let candidates: Vec<NodePath> = match step.combinator {
                    Combinator::Descendant => surface.descendants(base).into_iter().map(|(p, _)| p).collect(),
                    Combinator::Child => surface
                        .element(base)
                        .map(|el| {
                            el.child_elements()
                                .map(|(i, _)| {
                                    let mut p = base.clone();
                                    p.push(i);
                                    p
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                };
                for path in candidates {
                    if !next.contains(&path) && step.compound.matches(surface, &path) {
                        next.push(path);
                    }
                }
            }
            if next.is_empty() {
                return Vec::new();
            }
            current = next;
        }

        // paths compare lexicographically, which is document order
        current.sort();
        current
    }

    pub fn select_first(&self, surface: &Surface) -> Option<NodePath> {
        self.select_all(surface).into_iter().next()
    }
}

impl Compound {
    fn matches(&self, surface: &Surface, path: &[usize]) -> bool {
        let Some(el) = surface.element(path) else {
            return false;
        };
        self.matches_element(el)
            && self
                .nth_of_type
                .map_or(true, |n| surface.nth_of_type(path) == n)
    }

    fn matches_element(&self, el: &VirtualElement) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&el.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|(name, value)| match value {
            Some(v) => el.attr(name) == Some(v.as_str()),
            None => el.attr(name).is_some(),
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                match step.combinator {
                    Combinator::Child => write!(f, " > ")?,
                    Combinator::Descendant => write!(f, " ")?,
                }
            }
            let c = &step.compound;
            if let Some(tag) = &c.tag {
                write!(f, "{}", tag)?;
            }
            if let Some(id) = &c.id {
                write!(f, "#{}", id)?;
            }
            for class in &c.classes {
                write!(f, ".{}", class)?;
            }
            for (name, value) in &c.attributes {
                match value {
                    Some(v) => write!(f, "[{}=\"{}\"]", name, v)?,
                    None => write!(f, "[{}]", name)?,
                }
            }
            if let Some(n) = c.nth_of_type {
                write!(f, ":nth-of-type({})", n)?;
            }
        }
        Ok(())
    }
}

enum Token {
    Child,
    Segment(String),
}

/// Split on `>` and whitespace outside of `[...]`
fn tokenize(input: &str) -> Result<Vec<Token>, LocatorError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut in_quotes = false;

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if !current.is_empty() {
            tokens.push(Token::Segment(std::mem::take(current)));
        }
    };

    for c in input.chars() {
        match c {
            '"' if in_brackets => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '[' if !in_quotes => {
                if in_brackets {
                    return Err(LocatorError::Syntax(input.to_string()));
                }
                in_brackets = true;
                current.push(c);
            }
            ']' if !in_quotes => {
                if !in_brackets {
                    return Err(LocatorError::Syntax(input.to_string()));
                }
                in_brackets = false;
                current.push(c);
            }
            '>' if !in_brackets => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Child);
            }
            c if c.is_whitespace() && !in_brackets => flush(&mut current, &mut tokens),
            c => current.push(c),
        }
    }

    if in_brackets || in_quotes {
        return Err(LocatorError::Syntax(input.to_string()));
    }
    flush(&mut current, &mut tokens);
    Ok(tokens)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn parse_compound(segment: &str) -> Result<Compound, LocatorError> {
    let invalid = || LocatorError::InvalidSegment(segment.to_string());
    let chars: Vec<char> = segment.chars().collect();
    let mut compound = Compound::default();
    let mut pos = 0;

    if chars.first() == Some(&'*') {
        pos = 1;
    } else {
        let (tag, end) = take_ident(&chars, 0);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
            pos = end;
        }
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                let (id, end) = take_ident(&chars, pos + 1);
                if id.is_empty() {
                    return Err(invalid());
                }
                compound.id = Some(id);
                pos = end;
            }
            '.' => {
                let (class, end) = take_ident(&chars, pos + 1);
                if class.is_empty() {
                    return Err(invalid());
                }
                compound.classes.push(class);
                pos = end;
            }
            '[' => {
                let (name, mut end) = take_ident(&chars, pos + 1);
                if name.is_empty() {
                    return Err(invalid());
                }
                let value = if chars.get(end) == Some(&'=') {
                    if chars.get(end + 1) != Some(&'"') {
                        return Err(invalid());
                    }
                    let value_start = end + 2;
                    let close = chars[value_start..]
                        .iter()
                        .position(|c| *c == '"')
                        .map(|offset| value_start + offset)
                        .ok_or_else(invalid)?;
                    end = close + 1;
                    Some(chars[value_start..close].iter().collect::<String>())
                } else {
                    None
                };
                if chars.get(end) != Some(&']') {
                    return Err(invalid());
                }
                compound.attributes.push((name, value));
                pos = end + 1;
            }
            ':' => {
                const PREFIX: &str = ":nth-of-type(";
                let rest: String = chars[pos..].iter().collect();
                if !rest.starts_with(PREFIX) {
                    return Err(invalid());
                }
                let digits_start = pos + PREFIX.len();
                let close = chars[digits_start..]
                    .iter()
                    .position(|c| *c == ')')
                    .map(|offset| digits_start + offset)
                    .ok_or_else(invalid)?;
                let n: usize = chars[digits_start..close]
                    .iter()
                    .collect::<String>()
                    .parse()
                    .map_err(|_| invalid())?;
                if n == 0 {
                    return Err(invalid());
                }
                compound.nth_of_type = Some(n);
                pos = close + 1;
            }
            _ => return Err(invalid()),
        }
    }

    if compound == Compound::default() && chars.first() != Some(&'*') {
        return Err(invalid());
    }
    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::VirtualNode;

    fn page() -> Surface {
        Surface::new(
            VirtualElement::new("div")
                .with_child(
                    VirtualElement::new("section")
                        .with_attr("data-section-id", "hero-1")
                        .with_child(VirtualElement::new("h1").with_text("Welcome"))
                        .with_child(VirtualElement::new("p").with_text("first"))
                        .with_child(VirtualElement::new("p").with_class("lead").with_text("second")),
                )
                .with_child(
                    VirtualElement::new("section")
                        .with_attr("id", "cta")
                        .with_child(VirtualNode::text("loose"))
                        .with_child(VirtualElement::new("p").with_text("third")),
                ),
        )
    }

    fn text_at(surface: &Surface, locator: &str) -> Option<String> {
        let path = Locator::parse(locator).unwrap().select_first(surface)?;
        Some(surface.element(&path)?.text_content())
    }

    #[test]
    fn test_segment_forms() {
        let surface = page();
        assert_eq!(text_at(&surface, "h1").as_deref(), Some("Welcome"));
        assert_eq!(text_at(&surface, "p:nth-of-type(2)").as_deref(), Some("second"));
        assert_eq!(text_at(&surface, "#cta > p").as_deref(), Some("third"));
        assert_eq!(
            text_at(&surface, "[data-section-id=\"hero-1\"] > p:nth-of-type(1)").as_deref(),
            Some("first")
        );
        assert_eq!(text_at(&surface, "section p.lead").as_deref(), Some("second"));
    }

    #[test]
    fn test_child_combinator_is_strict() {
        let surface = page();
        assert_eq!(text_at(&surface, "section > h1").as_deref(), Some("Welcome"));
        assert_eq!(text_at(&surface, "section > p.lead").as_deref(), Some("second"));
        assert_eq!(text_at(&surface, "#cta > h1"), None);
    }

    #[test]
    fn test_root_is_never_matched() {
        let surface = page();
        assert_eq!(text_at(&surface, "div > h1"), None);
        assert_eq!(text_at(&surface, "div h1"), None);
        assert_eq!(text_at(&surface, "section h1").as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_zero_matches() {
        let surface = page();
        let locator = Locator::parse("section:nth-of-type(3) > p").unwrap();
        assert!(locator.select_all(&surface).is_empty());
    }

    #[test]
    fn test_invalid_syntax() {
        assert!(matches!(Locator::parse(""), Err(LocatorError::Empty)));
        assert!(matches!(Locator::parse("> p"), Err(LocatorError::DanglingCombinator(_))));
        assert!(matches!(Locator::parse("p >"), Err(LocatorError::DanglingCombinator(_))));
        assert!(matches!(Locator::parse("p:first-child"), Err(LocatorError::InvalidSegment(_))));
        assert!(matches!(Locator::parse("p:nth-of-type(0)"), Err(LocatorError::InvalidSegment(_))));
        assert!(matches!(Locator::parse("[data-x=\"a\""), Err(LocatorError::Syntax(_))));
        assert!(matches!(Locator::parse("#"), Err(LocatorError::InvalidSegment(_))));
    }

    #[test]
    fn test_css_path_resolves_back() {
        let surface = page();
        for (path, _) in surface.elements().into_iter().skip(1) {
            let css = surface.css_path(&path).unwrap();
            let locator = Locator::parse(&css).unwrap();
            assert_eq!(locator.select_first(&surface), Some(path.clone()), "{}", css);
        }
    }

    #[test]
    fn test_display_round_trip() {
        let text = "section#cta > p.lead[data-x=\"a b\"]:nth-of-type(2)";
        assert_eq!(Locator::parse(text).unwrap().to_string(), text);
    }
}
