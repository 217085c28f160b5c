//! Rendered surface the relay mutates
//!
//! Elements are addressed by [`NodePath`]: the child indices leading from
//! the root element to the target. Paths are only valid until the next
//! structural change, so they are resolved and used under the same lock.

use pagecraft_model::{VirtualElement, VirtualNode};

/// Child indices from the root element, empty for the root itself
pub type NodePath = Vec<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    root: VirtualElement,
}

impl Surface {
    pub fn new(root: VirtualElement) -> Self {
        Self { root }
    }

    /// Wrap a rendered node. A bare text or markup node is placed in a `div`.
    pub fn from_node(node: VirtualNode) -> Self {
        match node {
            VirtualNode::Element(root) => Self { root },
            other => Self {
                root: VirtualElement::new("div").with_child(other),
            },
        }
    }

    pub fn root(&self) -> &VirtualElement {
        &self.root
    }

    pub fn into_node(self) -> VirtualNode {
        VirtualNode::Element(self.root)
    }

    pub fn element(&self, path: &[usize]) -> Option<&VirtualElement> {
        let mut current = &self.root;
        for index in path {
            current = current.children.get(*index)?.as_element()?;
        }
        Some(current)
    }

    pub fn element_mut(&mut self, path: &[usize]) -> Option<&mut VirtualElement> {
        let mut current = &mut self.root;
        for index in path {
            current = current.children.get_mut(*index)?.as_element_mut()?;
        }
        Some(current)
    }

    /// Every element in document order (pre-order), root first
    pub fn elements(&self) -> Vec<(NodePath, &VirtualElement)> {
        let mut out = Vec::new();
        collect(&self.root, &mut Vec::new(), &mut out);
        out
    }

    /// Descendants of `path` in document order, excluding `path` itself
    pub fn descendants(&self, path: &[usize]) -> Vec<(NodePath, &VirtualElement)> {
        let Some(start) = self.element(path) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut prefix = path.to_vec();
        for (index, child) in start.child_elements() {
            prefix.push(index);
            collect(child, &mut prefix, &mut out);
            prefix.pop();
        }
        out
    }

    /// 1-based position of the element among same-tag siblings
    pub fn nth_of_type(&self, path: &[usize]) -> usize {
        let Some((last, parent_path)) = path.split_last() else {
            return 1;
        };
        let (Some(parent), Some(target)) = (self.element(parent_path), self.element(path)) else {
            return 1;
        };
        1 + parent
            .child_elements()
            .take_while(|(i, _)| i < last)
            .filter(|(_, el)| el.tag == target.tag)
            .count()
    }

    /// First element carrying `name="value"`
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodePath> {
        self.elements()
            .into_iter()
            .find(|(_, el)| el.attr(name) == Some(value))
            .map(|(path, _)| path)
    }

    /// CSS path from the root to `path` using `:nth-of-type`, shortened at
    /// the nearest ancestor with an id that is unique on the surface.
    pub fn css_path(&self, path: &[usize]) -> Option<String> {
        self.element(path)?;
        let mut segments = Vec::new();
        let mut current = path.to_vec();

        while !current.is_empty() {
            let el = self.element(&current)?;
            if let Some(id) = el.id() {
                let matches = self.elements().iter().filter(|(_, e)| e.id() == Some(id)).count();
                if matches == 1 {
                    segments.push(format!("#{}", id));
                    break;
                }
            }
            segments.push(format!("{}:nth-of-type({})", el.tag, self.nth_of_type(&current)));
            current.pop();
        }

        segments.reverse();
        Some(segments.join(" > "))
    }
}

fn collect<'a>(el: &'a VirtualElement, path: &mut NodePath, out: &mut Vec<(NodePath, &'a VirtualElement)>) {
    out.push((path.clone(), el));
    for (index, child) in el.child_elements() {
        path.push(index);
        collect(child, path, out);
        path.pop();
    }
}
