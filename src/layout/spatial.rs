//! Spatial map: element boxes in document order, for hit testing.

use crate::dom::node::NodeId;
use crate::geometry::{Offset, Region};

/// Element boxes as produced by the layout engine.
///
/// Boxes are kept in document pre-order. Later boxes paint over earlier
/// ones, so a descendant wins over its ancestors at a shared point.
#[derive(Debug, Default)]
pub struct SpatialMap {
    boxes: Vec<(NodeId, Region)>,
}

impl SpatialMap {
    /// Wrap boxes already in document order.
    pub fn from_ordered(boxes: Vec<(NodeId, Region)>) -> Self {
        Self { boxes }
    }

    pub fn region_of(&self, node: NodeId) -> Option<Region> {
        self.boxes
            .iter()
            .find_map(|&(id, region)| (id == node).then_some(region))
    }

    /// Every element whose box contains `point`, innermost first.
    pub fn stack_at(&self, point: Offset) -> impl Iterator<Item = NodeId> + '_ {
        self.boxes
            .iter()
            .rev()
            .filter(move |(_, region)| region.contains(point))
            .map(|&(id, _)| id)
    }

    /// The innermost element at `point`.
    pub fn node_at(&self, point: Offset) -> Option<NodeId> {
        self.stack_at(point).next()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::tree::Document;

    fn nested() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let form = doc.append_element(doc.body(), "form");
        let label = doc.append_element(form, "label");
        let input = doc.append_element(label, "input");
        (doc, form, label, input)
    }

    #[test]
    fn innermost_box_wins() {
        let (_doc, form, label, input) = nested();
        let map = SpatialMap::from_ordered(vec![
            (form, Region::new(0, 0, 800, 40)),
            (label, Region::new(0, 0, 800, 24)),
            (input, Region::new(0, 0, 160, 24)),
        ]);

        assert_eq!(map.stack_at(Offset::new(5, 5)).collect::<Vec<_>>(), vec![input, label, form]);
        assert_eq!(map.node_at(Offset::new(400, 5)), Some(label));
        assert_eq!(map.node_at(Offset::new(400, 30)), Some(form));
        assert_eq!(map.node_at(Offset::new(5, 60)), None);
    }

    #[test]
    fn region_lookup() {
        let (_doc, form, label, input) = nested();
        let map = SpatialMap::from_ordered(vec![(form, Region::new(0, 0, 800, 24)), (input, Region::new(0, 0, 160, 24))]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.region_of(input), Some(Region::new(0, 0, 160, 24)));
        assert_eq!(map.region_of(label), None);
    }

    #[test]
    fn collapsed_boxes_are_not_hit() {
        let (_doc, form, ..) = nested();
        let map = SpatialMap::from_ordered(vec![(form, Region::new(5, 5, 0, 0))]);
        assert_eq!(map.node_at(Offset::new(5, 5)), None);
        assert!(SpatialMap::default().is_empty());
    }
}
