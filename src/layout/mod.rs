//! Layout engine: taffy integration, spatial map, and the geometry queries the
//! document exposes on top of them.

pub mod engine;
pub mod spatial;

pub use engine::{LayoutEngine, CHAR_WIDTH, LINE_HEIGHT};
pub use spatial::SpatialMap;

use crate::dom::node::NodeId;
use crate::dom::tree::Document;
use crate::geometry::{Offset, Region};

impl Document {
    /// The border box of an element, or `None` if it generates no box
    /// (detached, hidden, or in `<head>`).
    pub fn bounding_client_rect(&self, id: NodeId) -> Option<Region> {
        SpatialMap::from_ordered(LayoutEngine::measure(self)).region_of(id)
    }

    /// The frontmost element whose box contains `point`.
    pub fn element_from_point(&self, point: Offset) -> Option<NodeId> {
        SpatialMap::from_ordered(LayoutEngine::measure(self)).node_at(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_and_point_agree() {
        let mut doc = Document::new();
        let root = doc.append_element(doc.body(), "div");
        let p = doc.append_element(root, "p");
        doc.append_text(p, "hello");
        let input = doc.append_element(root, "input");

        let rect = doc.bounding_client_rect(input).unwrap();
        assert_eq!(rect, Region::new(0, 16, 160, 24));
        assert_eq!(doc.element_from_point(rect.offset()), Some(input));
        assert_eq!(doc.element_from_point(Offset::new(0, 0)), Some(p));
    }

    #[test]
    fn point_outside_content_hits_body_or_nothing() {
        let mut doc = Document::new();
        doc.append_element(doc.body(), "input");
        // Beside the input, still inside the body's box.
        assert_eq!(doc.element_from_point(Offset::new(500, 5)), Some(doc.body()));
        // Below all content: the body has no height there.
        assert_eq!(doc.element_from_point(Offset::new(5, 500)), None);
    }

    #[test]
    fn detached_element_has_no_rect() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        assert_eq!(doc.bounding_client_rect(input), None);
    }
}
