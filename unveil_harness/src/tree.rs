// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory element tree.

use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::Rect;
use unveil_core::backend::StructureQuery;

use crate::surface::FakeLayout;

/// Handle to an element of a [`FakeTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FakeNode(u32);

#[derive(Debug)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<FakeNode>,
    layout: Rc<Cell<FakeLayout>>,
}

/// A tree of elements with just enough selector support for structure
/// discovery: `.class` matches any element carrying that class, anything else
/// matches the tag name.
#[derive(Debug)]
pub struct FakeTree {
    elements: Vec<Element>,
}

impl Default for FakeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTree {
    /// Creates a tree holding only a `body` root.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self {
            elements: Vec::new(),
        };
        tree.push("body", &[]);
        tree
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> FakeNode {
        FakeNode(0)
    }

    /// Appends an element under `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` does not belong to this tree.
    pub fn element(&mut self, parent: FakeNode, tag: &str, classes: &[&str]) -> FakeNode {
        let node = self.push(tag, classes);
        self.get_mut(parent).children.push(node);
        node
    }

    /// Appends a well-formed comparison (container, overlay with image,
    /// handle) under the root and lays the container out at `bounds`.
    pub fn comparison(&mut self, bounds: Rect) -> FakeNode {
        let container = self.element(self.root(), "div", &["comparison-container"]);
        let overlay = self.element(container, "div", &["comparison-overlay"]);
        self.element(overlay, "img", &[]);
        self.element(container, "div", &["comparison-handle"]);
        self.set_bounds(container, bounds);
        container
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, node: FakeNode, name: &str, value: &str) {
        let attributes = &mut self.get_mut(node).attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, node: FakeNode, name: &str) -> Option<&str> {
        self.get(node)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Lays `node` out at `bounds`; the rendered width follows the bounds.
    ///
    /// Surfaces already built for `node` observe the change.
    pub fn set_bounds(&self, node: FakeNode, bounds: Rect) {
        self.get(node).layout.set(FakeLayout::new(bounds));
    }

    /// Overrides the rendered width alone, leaving the bounds as they are.
    pub fn set_rendered_width(&self, node: FakeNode, width: f64) {
        let cell = &self.get(node).layout;
        cell.set(FakeLayout {
            rendered_width: width,
            ..cell.get()
        });
    }

    /// Shared layout cell of `node`.
    #[must_use]
    pub fn layout(&self, node: FakeNode) -> Rc<Cell<FakeLayout>> {
        Rc::clone(&self.get(node).layout)
    }

    /// Every element under the root matching `selector`, in document order.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<FakeNode> {
        let mut found = Vec::new();
        self.walk(self.root(), &mut |node| {
            if self.matches(node, selector) {
                found.push(node);
            }
            true
        });
        found
    }

    fn push(&mut self, tag: &str, classes: &[&str]) -> FakeNode {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test trees stay tiny"
        )]
        let node = FakeNode(self.elements.len() as u32);
        self.elements.push(Element {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| (*c).to_string()).collect(),
            attributes: Vec::new(),
            children: Vec::new(),
            layout: Rc::default(),
        });
        node
    }

    fn get(&self, node: FakeNode) -> &Element {
        &self.elements[node.0 as usize]
    }

    fn get_mut(&mut self, node: FakeNode) -> &mut Element {
        &mut self.elements[node.0 as usize]
    }

    fn matches(&self, node: FakeNode, selector: &str) -> bool {
        let element = self.get(node);
        match selector.strip_prefix('.') {
            Some(class) => element.classes.iter().any(|c| c == class),
            None => element.tag == selector,
        }
    }

    /// Depth-first, pre-order walk of the descendants of `parent`. Stops as
    /// soon as `visit` returns `false`.
    fn walk(&self, parent: FakeNode, visit: &mut impl FnMut(FakeNode) -> bool) -> bool {
        for &child in &self.get(parent).children {
            if !visit(child) || !self.walk(child, visit) {
                return false;
            }
        }
        true
    }
}

impl StructureQuery for FakeTree {
    type Node = FakeNode;

    fn find(&self, parent: &FakeNode, selector: &str) -> Option<FakeNode> {
        let mut found = None;
        self.walk(*parent, &mut |node| {
            if self.matches(node, selector) {
                found = Some(node);
                false
            } else {
                true
            }
        });
        found
    }
}
