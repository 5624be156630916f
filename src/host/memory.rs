use std::collections::BTreeMap;

use crate::{
    foundation::core::ElementRef,
    host::document::{HostDocument, InlineStyle, Surface},
};

#[derive(Debug)]
struct Node {
    tag: String,
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    attributes: BTreeMap<String, String>,
    style: InlineStyle,
    // Position resolved from stylesheets, consulted when no inline `position` is set.
    sheet_position: Option<String>,
    surface: Option<Surface>,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementRef>) -> Self {
        Self {
            tag: tag.to_owned(),
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            style: InlineStyle::default(),
            sheet_position: None,
            surface: None,
        }
    }
}

/// In-memory element tree implementing [`HostDocument`].
///
/// Handles are never reused, so a handle to a removed element stays dead even after new
/// elements are appended.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: Vec<Option<Node>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Document holding only the root `body` element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new("body", None))],
        }
    }

    /// The root element.
    pub fn root(&self) -> ElementRef {
        ElementRef(0)
    }

    /// Append a new element under `parent`. A dead parent leaves the element detached.
    pub fn append(&mut self, parent: ElementRef, tag: &str, attrs: &[(&str, &str)]) -> ElementRef {
        let id = ElementRef(self.nodes.len() as u64);
        let mut node = Node::new(tag, None);
        for (k, v) in attrs {
            node.attributes.insert((*k).to_owned(), (*v).to_owned());
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
            node.parent = Some(parent);
        }
        self.nodes.push(Some(node));
        id
    }

    /// Remove an element and its subtree.
    pub fn remove(&mut self, element: ElementRef) {
        if element == self.root() {
            return;
        }
        let parent = match self.node(element) {
            Some(node) => node.parent,
            None => return,
        };
        if let Some(parent) = parent
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|&c| c != element);
        }

        let mut stack = vec![element];
        while let Some(el) = stack.pop() {
            if let Some(slot) = self.nodes.get_mut(el.0 as usize)
                && let Some(node) = slot.take()
            {
                stack.extend(node.children);
            }
        }
    }

    /// Whether the element is still part of the document.
    pub fn contains(&self, element: ElementRef) -> bool {
        self.node(element).is_some()
    }

    /// Tag name of the element.
    pub fn tag(&self, element: ElementRef) -> Option<&str> {
        self.node(element).map(|n| n.tag.as_str())
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, element: ElementRef, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.remove(name);
        }
    }

    /// Inline style of the element.
    pub fn inline_style(&self, element: ElementRef) -> Option<&InlineStyle> {
        self.node(element).map(|n| &n.style)
    }

    /// Simulate a stylesheet rule assigning `position` to the element.
    pub fn set_sheet_position(&mut self, element: ElementRef, position: &str) {
        if let Some(node) = self.node_mut(element) {
            node.sheet_position = Some(position.to_owned());
        }
    }

    /// Number of live elements whose surface currently shows a figure.
    pub fn figure_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .filter(|n| n.surface.as_ref().is_some_and(|s| s.figure().is_some()))
            .count()
    }

    fn node(&self, element: ElementRef) -> Option<&Node> {
        self.nodes.get(element.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, element: ElementRef) -> Option<&mut Node> {
        self.nodes.get_mut(element.0 as usize).and_then(Option::as_mut)
    }

    fn descendants(&self, scope: ElementRef) -> Vec<ElementRef> {
        let mut out = Vec::new();
        let Some(node) = self.node(scope) else {
            return out;
        };
        let mut stack: Vec<ElementRef> = node.children.iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            if let Some(n) = self.node(el) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }
}

impl HostDocument for MemoryDocument {
    fn tagged(&self, scope: Option<ElementRef>, attr: &str) -> Vec<ElementRef> {
        self.descendants(scope.unwrap_or(self.root()))
            .into_iter()
            .filter(|&el| {
                self.node(el)
                    .is_some_and(|n| n.attributes.contains_key(attr))
            })
            .collect()
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        self.node(element)?.attributes.get(name).cloned()
    }

    fn computed_position(&self, element: ElementRef) -> Option<String> {
        let node = self.node(element)?;
        let position = node
            .style
            .get("position")
            .map(str::to_owned)
            .or_else(|| node.sheet_position.clone())
            .unwrap_or_else(|| "static".to_owned());
        Some(position)
    }

    fn set_inline_style(&mut self, element: ElementRef, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.style.set(property, value);
        }
    }

    fn attach_surface(&mut self, element: ElementRef) -> Option<&mut Surface> {
        let node = self.node_mut(element)?;
        Some(node.surface.get_or_insert_with(Surface::default))
    }

    fn surface(&self, element: ElementRef) -> Option<&Surface> {
        self.node(element)?.surface.as_ref()
    }

    fn surface_mut(&mut self, element: ElementRef) -> Option<&mut Surface> {
        self.node_mut(element)?.surface.as_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
