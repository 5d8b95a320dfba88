//! HTML serialization of document subtrees.
//!
//! Attribute order is `id`, `class`, then the remaining attributes in
//! insertion order. Live form values are not serialized; only the `value`
//! attribute is.

use super::node::{ElementData, NodeData, NodeId};
use super::tree::Document;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize `id` and its subtree.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.get(id) {
            Some(NodeData::Text(text)) => {
                if self.parent(id).and_then(|p| self.tag_name(p)) == Some("style") {
                    out.push_str(text);
                } else {
                    escape_into(text, false, out);
                }
            }
            Some(NodeData::Element(el)) => {
                write_open_tag(el, out);
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
            None => {}
        }
    }
}

fn write_open_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);

    let id = el.id.iter().map(|id| ("id", id.clone()));
    let class = (!el.classes.is_empty()).then(|| ("class", el.classes.join(" ")));
    let rest = el.attributes.iter().map(|(k, v)| (k.as_str(), v.clone()));

    for (name, value) in id.chain(class).chain(rest) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(&value, true, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
