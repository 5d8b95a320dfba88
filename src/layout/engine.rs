//! TaffyTree wrapper for layout computation.
//!
//! [`LayoutEngine`] mirrors the document's `<body>` subtree into a taffy
//! tree, runs block layout at the viewport width, and reports absolute
//! border boxes as [`Region`]s.
//!
//! The box model is deliberately coarse: every element is a block; text runs
//! are one line of `chars * CHAR_WIDTH` by `LINE_HEIGHT`; form controls have
//! fixed intrinsic sizes. That is enough for stable positions across
//! re-renders, which is what focus restoration relies on.

use std::collections::HashMap;

use taffy::prelude::*;
use tracing::warn;

use crate::dom::node::{ElementData, NodeData, NodeId};
use crate::dom::tree::Document;
use crate::geometry::Region;

/// Width of one character of text, in pixels.
pub const CHAR_WIDTH: f32 = 8.0;
/// Height of one line of text, in pixels.
pub const LINE_HEIGHT: f32 = 16.0;

/// Elements that never generate a box.
const NON_RENDERED: &[&str] = &["head", "script", "style", "template", "title", "meta", "link"];

/// Wraps a [`TaffyTree`] and maintains a mapping from document [`NodeId`]s to
/// taffy node ids.
pub struct LayoutEngine {
    tree: TaffyTree<()>,
    /// Maps document NodeId -> taffy NodeId for quick lookup.
    node_map: HashMap<NodeId, taffy::prelude::NodeId>,
    /// The taffy node for `<body>`, if a layout has been synced.
    root: Option<taffy::prelude::NodeId>,
}

impl LayoutEngine {
    /// Create a new, empty layout engine.
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            root: None,
        }
    }

    /// Lay out `doc` and return element boxes in document order.
    ///
    /// Layout failures are logged and yield no boxes.
    pub fn measure(doc: &Document) -> Vec<(NodeId, Region)> {
        let mut engine = Self::new();
        match engine
            .sync_tree(doc)
            .and_then(|()| engine.compute(doc.viewport_width()))
        {
            Ok(()) => engine.boxes(doc),
            Err(err) => {
                warn!(%err, "layout failed");
                Vec::new()
            }
        }
    }

    /// Rebuild the taffy tree from the document's `<body>`.
    pub fn sync_tree(&mut self, doc: &Document) -> Result<(), taffy::TaffyError> {
        self.tree = TaffyTree::new();
        self.node_map.clear();
        self.root = None;

        let body = doc.body();
        let children = self.build_children(doc, body)?;
        let style = Style {
            display: Display::Block,
            size: Size {
                width: Dimension::from_length(doc.viewport_width()),
                height: Dimension::AUTO,
            },
            ..Default::default()
        };
        let root = self.tree.new_with_children(style, &children)?;
        self.node_map.insert(body, root);
        self.root = Some(root);
        Ok(())
    }

    fn build_children(&mut self, doc: &Document, id: NodeId) -> Result<Vec<taffy::prelude::NodeId>, taffy::TaffyError> {
        let mut children = Vec::new();
        for &child in doc.children(id) {
            if let Some(node) = self.build(doc, child)? {
                children.push(node);
            }
        }
        Ok(children)
    }

    fn build(&mut self, doc: &Document, id: NodeId) -> Result<Option<taffy::prelude::NodeId>, taffy::TaffyError> {
        let node = match doc.get(id) {
            Some(NodeData::Text(text)) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                let width = text.chars().count() as f32 * CHAR_WIDTH;
                self.tree.new_leaf(Style {
                    display: Display::Block,
                    size: Size {
                        width: Dimension::from_length(width),
                        height: Dimension::from_length(LINE_HEIGHT),
                    },
                    ..Default::default()
                })?
            }
            Some(NodeData::Element(el)) => {
                if !generates_box(el) {
                    return Ok(None);
                }
                if is_replaced(el) {
                    self.tree.new_leaf(element_style(el))?
                } else {
                    let children = self.build_children(doc, id)?;
                    self.tree.new_with_children(element_style(el), &children)?
                }
            }
            None => return Ok(None),
        };
        self.node_map.insert(id, node);
        Ok(Some(node))
    }

    /// Run taffy layout computation at the given width.
    pub fn compute(&mut self, available_width: f32) -> Result<(), taffy::TaffyError> {
        if let Some(root) = self.root {
            self.tree.compute_layout(
                root,
                taffy::geometry::Size {
                    width: AvailableSpace::Definite(available_width),
                    height: AvailableSpace::MaxContent,
                },
            )?;
        }
        Ok(())
    }

    /// Absolute element boxes in document (painter's) order, body included.
    ///
    /// Taffy's f32 coordinates are rounded to the nearest pixel.
    pub fn boxes(&self, doc: &Document) -> Vec<(NodeId, Region)> {
        let mut out = Vec::new();
        self.collect(doc, doc.body(), (0.0, 0.0), &mut out);
        out
    }

    fn collect(&self, doc: &Document, id: NodeId, origin: (f32, f32), out: &mut Vec<(NodeId, Region)>) {
        let Some(layout) = self.node_map.get(&id).and_then(|&n| self.tree.layout(n).ok()) else {
            return;
        };
        let x = origin.0 + layout.location.x;
        let y = origin.1 + layout.location.y;
        if doc.element(id).is_some() {
            out.push((
                id,
                Region {
                    x: x.round() as i32,
                    y: y.round() as i32,
                    width: layout.size.width.round() as i32,
                    height: layout.size.height.round() as i32,
                },
            ));
        }
        for &child in doc.children(id) {
            self.collect(doc, child, (x, y), out);
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn generates_box(el: &ElementData) -> bool {
    !NON_RENDERED.contains(&el.tag.as_str())
        && !el.has_attribute("hidden")
        && el.input_type().as_deref() != Some("hidden")
}

/// Controls whose content is not laid out as children.
fn is_replaced(el: &ElementData) -> bool {
    matches!(el.tag.as_str(), "input" | "textarea" | "select" | "img" | "br" | "hr")
}

fn element_style(el: &ElementData) -> Style {
    let fixed = |w: f32, h: f32| Size {
        width: Dimension::from_length(w),
        height: Dimension::from_length(h),
    };
    let pixels = |name: &str| el.attribute(name).and_then(|v| v.trim().parse::<f32>().ok());

    let size = match el.tag.as_str() {
        "input" => match el.input_type().as_deref() {
            Some("checkbox" | "radio") => fixed(16.0, 16.0),
            _ => fixed(160.0, 24.0),
        },
        "textarea" => fixed(160.0, 48.0),
        "select" => fixed(160.0, 24.0),
        "br" => fixed(0.0, LINE_HEIGHT),
        "hr" => Size { width: Dimension::AUTO, height: Dimension::from_length(2.0) },
        "img" => fixed(pixels("width").unwrap_or(0.0), pixels("height").unwrap_or(0.0)),
        _ => Size { width: Dimension::AUTO, height: Dimension::AUTO },
    };
    let min_size = match el.tag.as_str() {
        "button" => Size { width: Dimension::AUTO, height: Dimension::from_length(LINE_HEIGHT) },
        _ => Size { width: Dimension::AUTO, height: Dimension::AUTO },
    };

    Style {
        display: Display::Block,
        size,
        min_size,
        ..Default::default()
    }
}
