//! Snapshot helpers.
//!
//! Turn rendered subtrees and stylesheets into strings for snapshot
//! assertions. Scope tags are hashes, so [`normalize_scope_tags`] replaces
//! them with stable placeholders numbered by first appearance.

use crate::css::util::HASH_LEN;
use crate::dom::{Document, NodeId};

/// Serialize `id` and its subtree.
pub fn subtree_to_string(doc: &Document, id: NodeId) -> String {
    doc.outer_html(id)
}

/// The rules of the stylesheet `<style id=sheet_id>`, separated by blank
/// lines. Empty when the stylesheet does not exist.
pub fn stylesheet_to_string(doc: &Document, sheet_id: &str) -> String {
    doc.style_element(sheet_id)
        .map(|sheet| doc.css_rules(sheet).join("\n\n"))
        .unwrap_or_default()
}

/// Replace every `{prefix}{hash}` scope tag with `{prefix}N`, numbering
/// distinct tags from 1 in order of first appearance.
///
/// ```ignore
/// assert_eq!(
///     normalize_scope_tags(".a.uber-k3j2h1g0 b.uber-k3j2h1g0", "uber-"),
///     ".a.uber-1 b.uber-1",
/// );
/// ```
pub fn normalize_scope_tags(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    let mut seen: Vec<&str> = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find(prefix) {
        let after = &rest[index + prefix.len()..];
        let hash_len = after
            .bytes()
            .take(HASH_LEN)
            .take_while(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
            .count();

        out.push_str(&rest[..index]);
        out.push_str(prefix);
        if hash_len == HASH_LEN {
            let hash = &after[..HASH_LEN];
            let number = match seen.iter().position(|h| *h == hash) {
                Some(position) => position + 1,
                None => {
                    seen.push(hash);
                    seen.len()
                }
            };
            out.push_str(&number.to_string());
            rest = &after[HASH_LEN..];
        } else {
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_in_order_of_appearance() {
        assert_eq!(
            normalize_scope_tags("li.uber-aaaaaaaa .x.uber-bbbbbbbb, p.uber-aaaaaaaa", "uber-"),
            "li.uber-1 .x.uber-2, p.uber-1"
        );
    }

    #[test]
    fn leaves_short_or_foreign_text_alone() {
        assert_eq!(normalize_scope_tags("uber-abc uber-", "uber-"), "uber-abc uber-");
        assert_eq!(normalize_scope_tags("x-aaaaaaaa", ""), "x-aaaaaaaa");
    }

    #[test]
    fn stylesheet_text() {
        let mut doc = Document::new();
        let sheet = doc.ensure_style_element("css-x");
        doc.insert_rule(sheet, "a {\n\tcolor: red;\n}", 0);
        doc.insert_rule(sheet, "b {\n\tcolor: blue;\n}", 1);
        assert_eq!(
            stylesheet_to_string(&doc, "css-x"),
            "a {\n\tcolor: red;\n}\n\nb {\n\tcolor: blue;\n}"
        );
        assert_eq!(stylesheet_to_string(&doc, "missing"), "");
    }
}
