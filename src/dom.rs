//! The host document contract and an in-memory document implementing it.
//!
//! The sidebar pass never touches a browser API directly. Everything it needs from the page
//! (finding entries, moving them, flipping classes, sizing containers) goes through
//! [`NavDom`], so the same grouping code drives the live page and the tests.

use crate::entry::{Link, NavEntry};
use std::fmt;

/// Class names written onto the host document.
pub mod class {
    /// Header that has been turned into a section.
    pub const PROCESSED: &str = "accordion-processed";
    /// Header entry styled as a section toggle.
    pub const HEADER: &str = "sidebar-section-header";
    /// Container holding a section's members.
    pub const CONTENT: &str = "sidebar-section-content";
    /// Entry that has been moved under a header.
    pub const MEMBER: &str = "sidebar-subsection-item";
    /// Header or container of a closed section.
    pub const COLLAPSED: &str = "collapsed";
    /// Container of the open section.
    pub const EXPANDED: &str = "expanded";
    /// Entry for the page being shown.
    pub const ACTIVE: &str = "active";
}

/// Operations the sidebar pass needs from the navigation tree.
pub trait NavDom {
    /// Handle to a node of the tree; equal handles refer to the same node.
    type Node: Clone + PartialEq + fmt::Debug;

    /// All navigation entries below the container, in document order.
    fn entries(&self) -> Vec<Self::Node>;
    /// The first anchor inside an entry.
    fn link(&self, entry: &Self::Node) -> Option<Link>;
    /// Enclosing element, if any.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Next element under the same parent.
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
    /// First element child.
    fn first_child(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Whether the node carries `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Adds `class`; adding a class twice leaves one.
    fn add_class(&mut self, node: &Self::Node, class: &str);
    /// Removes `class` if present.
    fn remove_class(&mut self, node: &Self::Node, class: &str);
    /// Gives a new header its expand and collapse indicator.
    fn add_indicator(&mut self, header: &Self::Node);
    /// Creates an empty content container right after `header`.
    fn create_content(&mut self, header: &Self::Node, id: &str) -> Option<Self::Node>;
    /// Moves `child` into `parent`, before `reference` or at the end.
    fn insert_before(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: Option<&Self::Node>,
    );
    /// Whether the host marked the entry as the current page.
    fn is_marked_active(&self, entry: &Self::Node) -> bool;
    /// Height the node would take with no size limit, in pixels.
    fn content_height(&self, node: &Self::Node) -> u32;
    /// Limits the rendered height of a node, in pixels.
    fn set_max_height(&mut self, node: &Self::Node, px: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Index of a node in a [`MemoryDom`].
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a [`MemoryDom`] node stands for.
pub enum NodeKind {
    /// The sidebar container.
    Container,
    /// A navigation entry with its anchor.
    Item(Option<Link>),
    /// A content container created by the sidebar pass.
    Wrapper(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    classes: Vec<String>,
    aria_current: bool,
    indicator: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    max_height: Option<u32>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            aria_current: false,
            indicator: false,
            parent,
            children: Vec::new(),
            max_height: None,
        }
    }
}

/// Height of one rendered entry.
pub const ITEM_HEIGHT: u32 = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Arena-backed navigation tree with the shape a site generator renders.
pub struct MemoryDom {
    nodes: Vec<Node>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Container, None)],
        }
    }
}

impl MemoryDom {
    #[must_use]
    /// A container holding one item per entry.
    pub fn from_entries(entries: &[NavEntry]) -> Self {
        let mut dom = Self::default();
        for entry in entries {
            dom.push_entry(entry);
        }
        dom
    }

    #[must_use]
    /// The sidebar container.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends an entry at the end of the container, as a late render would.
    pub fn push_entry(&mut self, entry: &NavEntry) -> NodeId {
        let root = self.root();
        self.append_entry(root, entry)
    }

    /// Appends an entry under `parent`.
    pub fn append_entry(&mut self, parent: NodeId, entry: &NavEntry) -> NodeId {
        let id = self.alloc(NodeKind::Item(Some(entry.link())), parent);
        self.nodes[id.0].aria_current = entry.active;
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Inserts an entry among the container's children at `position`.
    pub fn insert_entry(&mut self, position: usize, entry: &NavEntry) -> NodeId {
        let root = self.root();
        let id = self.alloc(NodeKind::Item(Some(entry.link())), root);
        self.nodes[id.0].aria_current = entry.active;
        let children = &mut self.nodes[root.0].children;
        children.insert(position.min(children.len()), id);
        id
    }

    /// Sets or clears the host's `aria-current` mark on an entry.
    pub fn set_current(&mut self, node: NodeId, current: bool) {
        self.nodes[node.0].aria_current = current;
    }

    fn alloc(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        self.nodes.push(Node::new(kind, Some(parent)));
        NodeId(self.nodes.len() - 1)
    }

    #[must_use]
    /// What the node stands for.
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    #[must_use]
    /// Child nodes in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    #[must_use]
    /// Classes in the order they were added.
    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    #[must_use]
    /// Height limit last set on the node.
    pub fn max_height(&self, node: NodeId) -> Option<u32> {
        self.nodes[node.0].max_height
    }

    #[must_use]
    /// Whether the node carries a header indicator.
    pub fn has_indicator(&self, node: NodeId) -> bool {
        self.nodes[node.0].indicator
    }

    #[must_use]
    /// Display text of an entry, or the id of a wrapper.
    pub fn text(&self, node: NodeId) -> &str {
        match &self.nodes[node.0].kind {
            NodeKind::Item(Some(link)) => link.text.as_str(),
            NodeKind::Wrapper(id) => id.as_str(),
            NodeKind::Item(None) | NodeKind::Container => "",
        }
    }

    fn walk(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[node.0].children {
            if matches!(self.nodes[child.0].kind, NodeKind::Item(_)) {
                out.push(child);
            }
            self.walk(child, out);
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn sibling_offset(&self, node: NodeId, offset: usize) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings.get(pos + offset).copied()
    }
}

impl NavDom for MemoryDom {
    type Node = NodeId;

    fn entries(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(self.root(), &mut out);
        out
    }

    fn link(&self, entry: &NodeId) -> Option<Link> {
        match &self.nodes[entry.0].kind {
            NodeKind::Item(link) => link.clone(),
            _ => None,
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.sibling_offset(*node, 1)
    }

    fn first_child(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].children.first().copied()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn add_indicator(&mut self, header: &NodeId) {
        self.nodes[header.0].indicator = true;
    }

    fn create_content(&mut self, header: &NodeId, id: &str) -> Option<NodeId> {
        let parent = self.nodes[header.0].parent?;
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| c == header)?;
        let wrapper = self.alloc(NodeKind::Wrapper(id.to_string()), parent);
        self.nodes[parent.0].children.insert(pos + 1, wrapper);
        Some(wrapper)
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: Option<&NodeId>) {
        self.detach(*child);
        let children = &mut self.nodes[parent.0].children;
        let pos = reference
            .and_then(|r| children.iter().position(|c| c == r))
            .unwrap_or(children.len());
        children.insert(pos, *child);
        self.nodes[child.0].parent = Some(*parent);
    }

    fn is_marked_active(&self, entry: &NodeId) -> bool {
        self.nodes[entry.0].aria_current || self.has_class(entry, class::ACTIVE)
    }

    fn content_height(&self, node: &NodeId) -> u32 {
        let mut items = Vec::new();
        self.walk(*node, &mut items);
        u32::try_from(items.len()).map_or(u32::MAX, |n| n.saturating_mul(ITEM_HEIGHT))
    }

    fn set_max_height(&mut self, node: &NodeId, px: u32) {
        self.nodes[node.0].max_height = Some(px);
    }
}

#[cfg(test)]
#[path = "tests/dom.rs"]
mod tests;
