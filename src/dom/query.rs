//! Document queries: `query_selector`, `query_selector_all`, `get_element_by_id`.

use super::node::NodeId;
use super::tree::Document;
use crate::css::matching::matches_any;
use crate::css::parser::{parse_selector_list, ParseError};

impl Document {
    /// All descendants of `scope` (exclusive) matching a selector list, in
    /// document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, ParseError> {
        let selectors = parse_selector_list(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|&node| matches_any(self, node, &selectors))
            .collect())
    }

    /// The first descendant of `scope` matching a selector list.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, ParseError> {
        let selectors = parse_selector_list(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|&node| matches_any(self, node, &selectors)))
    }

    /// The first connected element whose id equals `id`, in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk_depth_first(self.document_element())
            .into_iter()
            .find(|&node| self.element(node).is_some_and(|el| el.id.as_deref() == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a test tree for queries:
    /// ```text
    /// body
    ///   div#app
    ///     ul
    ///       li.todo        "a"
    ///       li.todo.done   "b"
    ///     button.btn-del
    ///   div#other
    ///     li.todo
    /// ```
    fn build_query_tree() -> (Document, NodeId) {
        let mut doc = Document::new();
        let app = doc.append_element(doc.body(), "div");
        doc.set_attribute(app, "id", "app");
        let ul = doc.append_element(app, "ul");
        for (text, class) in [("a", "todo"), ("b", "todo done")] {
            let li = doc.append_element(ul, "li");
            doc.set_attribute(li, "class", class);
            doc.append_text(li, text);
        }
        let button = doc.append_element(app, "button");
        doc.add_class(button, "btn-del");
        let other = doc.append_element(doc.body(), "div");
        doc.set_attribute(other, "id", "other");
        let li = doc.append_element(other, "li");
        doc.add_class(li, "todo");
        (doc, app)
    }

    #[test]
    fn query_all_is_scoped_and_ordered() {
        let (doc, app) = build_query_tree();
        let items = doc.query_selector_all(app, ".todo").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.text_content(items[0]), "a");
        assert_eq!(doc.text_content(items[1]), "b");
    }

    #[test]
    fn query_all_from_body_sees_everything() {
        let (doc, _) = build_query_tree();
        assert_eq!(doc.query_selector_all(doc.body(), "li").unwrap().len(), 3);
    }

    #[test]
    fn scope_itself_is_excluded() {
        let (doc, app) = build_query_tree();
        assert!(doc.query_selector_all(app, "#app").unwrap().is_empty());
    }

    #[test]
    fn selector_lists_keep_document_order() {
        let (doc, app) = build_query_tree();
        let found = doc.query_selector_all(app, "button, ul").unwrap();
        assert_eq!(doc.tag_name(found[0]), Some("ul"));
        assert_eq!(doc.tag_name(found[1]), Some("button"));
    }

    #[test]
    fn query_selector_first_match() {
        let (doc, app) = build_query_tree();
        let done = doc.query_selector(app, "li.done").unwrap().unwrap();
        assert_eq!(doc.text_content(done), "b");
        assert_eq!(doc.query_selector(app, "table").unwrap(), None);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let (doc, app) = build_query_tree();
        assert!(doc.query_selector_all(app, "ul >").is_err());
        assert!(doc.query_selector(app, "").is_err());
    }

    #[test]
    fn get_element_by_id() {
        let (doc, app) = build_query_tree();
        assert_eq!(doc.get_element_by_id("app"), Some(app));
        assert_eq!(doc.get_element_by_id("nope"), None);
    }
}
