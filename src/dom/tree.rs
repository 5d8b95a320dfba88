//! The host document: node arena, tree operations, walks.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::events::Listener;
use super::node::{ElementData, NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// Layout width used when none is configured.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

/// An in-memory HTML document, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Event listeners and stylesheet rules are side tables keyed by node, and
/// disappear with the node.
///
/// A fresh document holds `<html>` with `<head>` and `<body>` children.
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    pub(crate) listeners: SecondaryMap<NodeId, Vec<(String, Listener)>>,
    pub(crate) sheets: SecondaryMap<NodeId, Vec<String>>,
    pub(crate) active: Option<NodeId>,
    html: NodeId,
    head: NodeId,
    body: NodeId,
    viewport_width: f32,
}

impl Document {
    /// Create a document with an empty `<head>` and `<body>`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let html = nodes.insert(NodeData::Element(ElementData::new("html")));
        let head = nodes.insert(NodeData::Element(ElementData::new("head")));
        let body = nodes.insert(NodeData::Element(ElementData::new("body")));

        let mut children = SecondaryMap::new();
        children.insert(html, vec![head, body]);
        children.insert(head, Vec::new());
        children.insert(body, Vec::new());

        let mut parent = SecondaryMap::new();
        parent.insert(head, html);
        parent.insert(body, html);

        Self {
            nodes,
            children,
            parent,
            listeners: SecondaryMap::new(),
            sheets: SecondaryMap::new(),
            active: None,
            html,
            head,
            body,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    /// Set the layout width in pixels (builder).
    pub fn with_viewport(mut self, width: f32) -> Self {
        self.viewport_width = width.max(0.0);
        self
    }

    /// The layout width in pixels.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> NodeId {
        self.html
    }

    /// The `<head>` element.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    // ---------------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert_detached(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert_detached(NodeData::Text(text.into()))
    }

    fn insert_detached(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// previous parent first.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist, or if `child` is an
    /// ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        debug_assert!(self.nodes.contains_key(child), "child node does not exist");
        debug_assert!(
            parent != child && !self.is_descendant(parent, child),
            "cannot append a node inside itself"
        );

        self.detach(child);
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
    }

    /// Create an element and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent` in one step.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
    }

    // ---------------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------------

    /// Remove a node and all its descendants.
    ///
    /// Listeners and stylesheet rules owned by removed nodes are dropped. If
    /// the focused element is removed, focus falls back to the body.
    /// The `<html>`, `<head>` and `<body>` elements cannot be removed.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) || [self.html, self.head, self.body].contains(&id) {
            return None;
        }

        self.detach(id);

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.listeners.remove(current);
            self.sheets.remove(current);
            if self.active == Some(current) {
                self.active = None;
            }
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Remove every child of `id` (and their subtrees).
    pub fn remove_children(&mut self, id: NodeId) {
        let kids = self.children(id).to_vec();
        for child in kids {
            self.remove(child);
        }
    }

    // ---------------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------------

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no children
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Element children only, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.element(child).is_some())
    }

    /// The closest preceding sibling that is an element.
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&s| s == id)?;
        siblings[..index]
            .iter()
            .rev()
            .copied()
            .find(|&s| self.element(s).is_some())
    }

    /// The closest following sibling that is an element.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&s| s == id)?;
        siblings[index + 1..]
            .iter()
            .copied()
            .find(|&s| self.element(s).is_some())
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at `<html>`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `node` lies strictly inside `ancestor`'s subtree.
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = node;
        while let Some(p) = self.parent(current) {
            if p == ancestor {
                return true;
            }
            current = p;
        }
        false
    }

    /// Whether the node is reachable from `<html>`.
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.html || self.is_descendant(id, self.html)
    }

    /// Depth-first pre-order walk starting at `start` (inclusive).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            stack.extend(self.children(current).iter().rev().copied());
        }

        result
    }

    /// Pre-order walk of the descendants of `scope` (exclusive).
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut nodes = self.walk_depth_first(scope);
        if !nodes.is_empty() {
            nodes.remove(0);
        }
        nodes
    }

    // ---------------------------------------------------------------------------
    // Node data
    // ---------------------------------------------------------------------------

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The element payload of a node, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(NodeData::as_element)
    }

    /// Mutable element payload of a node, if it is an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(NodeData::as_element_mut)
    }

    /// Lowercase tag name of an element.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Read an attribute of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)?.attribute(name)
    }

    /// Set an attribute on an element. Ignored for text nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attribute(name, value);
        }
    }

    /// Add a class to an element. Ignored for text nodes.
    pub fn add_class(&mut self, id: NodeId, class: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    /// Concatenated text of all text nodes under `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_depth_first(id)
            .into_iter()
            .filter_map(|n| self.get(n).and_then(NodeData::as_text))
            .collect()
    }

    /// Number of nodes in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a document owns at least `<html>`, `<head>`, `<body>`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("active", &self.active)
            .field("viewport_width", &self.viewport_width)
            .finish()
    }
}
