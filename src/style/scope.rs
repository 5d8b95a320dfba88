//! Scope binding: tie each rule's selector to the elements it matches under
//! the render root.
//!
//! Every compound segment of a selector is resolved on its own. The segment,
//! stripped of pseudo-classes, pseudo-elements and attribute tests, is
//! queried under the root; matched elements receive a scope class and the
//! segment is rewritten to require it. A rule such as `.btn-del:hover`
//! becomes `.btn-del:hover.uber-1x2y3z4w` and no longer reaches elements
//! outside the app.

use tracing::debug;

use super::registry::StyleRegistry;
use crate::css::util::{
    content_hash, split_compound_selector, strip_pseudo_and_attribute_selectors, SelectorPiece,
};
use crate::dom::{Document, ElementData, NodeId};

/// Prefix of every scope class unless configured otherwise.
pub const DEFAULT_SCOPE_PREFIX: &str = "uber-";

/// Mints and assigns scope classes for one app instance.
///
/// An element carries at most one scope class per prefix. When a segment
/// matches an element that is already tagged, that tag is reused, so
/// rebinding an unchanged tree yields the same selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeBinder {
    prefix: String,
    namespace: String,
}

impl ScopeBinder {
    /// A binder whose minted tags are derived from `namespace` (the app's
    /// mount locator).
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            prefix: DEFAULT_SCOPE_PREFIX.to_string(),
            namespace: namespace.into(),
        }
    }

    /// Use a different scope class prefix (builder).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The tag minted for a stripped selector fragment.
    pub fn mint(&self, fragment: &str) -> String {
        let digest = content_hash(&format!("{}|{}", self.namespace, fragment));
        format!("{}{}", self.prefix, digest)
    }

    /// The scope class an element already carries, if any.
    pub fn scope_tag_of<'a>(&self, element: &'a ElementData) -> Option<&'a str> {
        element
            .classes
            .iter()
            .find(|class| class.starts_with(&self.prefix))
            .map(String::as_str)
    }

    /// Rescope every rule of `registry` against the subtree under `root`.
    pub fn bind(&self, registry: &mut StyleRegistry, doc: &mut Document, root: NodeId) {
        for rule in registry.rules_mut() {
            let scoped = self.scope_selector(doc, root, rule.selector());
            rule.set_scoped_selector(scoped);
        }
    }

    /// Rewrite one selector, tagging the elements each segment matches.
    pub fn scope_selector(&self, doc: &mut Document, root: NodeId, selector: &str) -> String {
        split_compound_selector(selector.trim())
            .into_iter()
            .map(|piece| match piece {
                SelectorPiece::Combinator(text) => text,
                SelectorPiece::Segment(segment) => {
                    let tag = self.resolve_segment(doc, root, &segment);
                    with_scope_class(&segment, &tag)
                }
            })
            .collect()
    }

    fn resolve_segment(&self, doc: &mut Document, root: NodeId, segment: &str) -> String {
        let fragment = strip_pseudo_and_attribute_selectors(segment);
        let fragment = fragment.trim();

        // A fragment made only of pseudo or attribute parts, or one the
        // query engine rejects, matches nothing.
        let matched = if fragment.is_empty() {
            Vec::new()
        } else {
            doc.query_selector_all(root, fragment).unwrap_or_else(|err| {
                debug!(fragment, %err, "scope fragment not queryable");
                Vec::new()
            })
        };

        let existing = matched.iter().find_map(|&node| {
            doc.element(node)
                .and_then(|el| self.scope_tag_of(el))
                .map(str::to_owned)
        });
        let tag = match existing {
            Some(tag) => tag,
            None => {
                let tag = self.mint(fragment);
                debug!(%tag, fragment, "minted scope tag");
                tag
            }
        };

        for node in matched {
            if let Some(el) = doc.element_mut(node) {
                if self.scope_tag_of(el).is_none() {
                    el.add_class(tag.clone());
                }
            }
        }
        tag
    }
}

/// Append `.tag` to a segment, ahead of any trailing `::pseudo-element`.
fn with_scope_class(segment: &str, tag: &str) -> String {
    match segment.find("::") {
        Some(index) => format!("{}.{}{}", &segment[..index], tag, &segment[index..]),
        None => format!("{segment}.{tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::spec::StyleSpec;
    use pretty_assertions::assert_eq;

    /// ```text
    /// body
    ///   div#app
    ///     ul
    ///       li.done "a"
    ///       li      "b"
    ///     button.btn-del
    ///   button.btn-del (outside)
    /// ```
    fn fixture() -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.append_element(doc.body(), "div");
        doc.set_attribute(root, "id", "app");
        let ul = doc.append_element(root, "ul");
        let done = doc.append_element(ul, "li");
        doc.add_class(done, "done");
        doc.append_text(done, "a");
        let open = doc.append_element(ul, "li");
        doc.append_text(open, "b");
        let inside = doc.append_element(root, "button");
        doc.add_class(inside, "btn-del");
        let outside = doc.append_element(doc.body(), "button");
        doc.add_class(outside, "btn-del");
        (doc, root, vec![ul, done, open, inside, outside])
    }

    fn tag(doc: &Document, binder: &ScopeBinder, node: NodeId) -> Option<String> {
        doc.element(node)
            .and_then(|el| binder.scope_tag_of(el))
            .map(str::to_owned)
    }

    // ── Minting ──────────────────────────────────────────────────────

    #[test]
    fn minted_tags_are_deterministic_and_prefixed() {
        let binder = ScopeBinder::new("#app");
        let a = binder.mint(".btn-del");
        assert_eq!(a, binder.mint(".btn-del"));
        assert!(a.starts_with("uber-"));
        assert_eq!(a.len(), "uber-".len() + 8);
        assert_ne!(a, ScopeBinder::new("#other").mint(".btn-del"));
        assert!(ScopeBinder::new("#app").with_prefix("x-").mint("p").starts_with("x-"));
    }

    // ── Segment insertion ────────────────────────────────────────────

    #[test]
    fn scope_class_goes_before_pseudo_element() {
        assert_eq!(with_scope_class("p::before", "t"), "p.t::before");
        assert_eq!(with_scope_class("a:hover", "t"), "a:hover.t");
        assert_eq!(with_scope_class("input[type=text]", "t"), "input[type=text].t");
    }

    // ── Binding ──────────────────────────────────────────────────────

    #[test]
    fn only_elements_under_root_are_tagged() {
        let (mut doc, root, nodes) = fixture();
        let binder = ScopeBinder::new("#app");
        let scoped = binder.scope_selector(&mut doc, root, ".btn-del");

        let inside = tag(&doc, &binder, nodes[3]).unwrap();
        assert_eq!(scoped, format!(".btn-del.{inside}"));
        assert_eq!(tag(&doc, &binder, nodes[4]), None);

        let hits = doc.query_selector_all(doc.body(), &scoped).unwrap();
        assert_eq!(hits, vec![nodes[3]]);
    }

    #[test]
    fn combinators_are_preserved_per_segment() {
        let (mut doc, root, nodes) = fixture();
        let binder = ScopeBinder::new("#app");
        let scoped = binder.scope_selector(&mut doc, root, "ul > li.done:hover");

        let ul = tag(&doc, &binder, nodes[0]).unwrap();
        let done = tag(&doc, &binder, nodes[1]).unwrap();
        assert_eq!(scoped, format!("ul.{ul} > li.done:hover.{done}"));
        assert_eq!(tag(&doc, &binder, nodes[2]), None);
    }

    #[test]
    fn existing_tag_is_reused() {
        let (mut doc, root, nodes) = fixture();
        let binder = ScopeBinder::new("#app");
        let first = binder.scope_selector(&mut doc, root, "li.done");
        let second = binder.scope_selector(&mut doc, root, "li");

        let done = tag(&doc, &binder, nodes[1]).unwrap();
        assert_eq!(first, format!("li.done.{done}"));
        // `li` matches both items; the first is already tagged, so both share it.
        assert_eq!(second, format!("li.{done}"));
        assert_eq!(tag(&doc, &binder, nodes[2]).as_deref(), Some(done.as_str()));
        assert_eq!(doc.element(nodes[1]).unwrap().classes.len(), 2);
    }

    #[test]
    fn rebinding_is_stable() {
        let (mut doc, root, _) = fixture();
        let binder = ScopeBinder::new("#app");
        let once = binder.scope_selector(&mut doc, root, "ul li, .btn-del::after");
        let twice = binder.scope_selector(&mut doc, root, "ul li, .btn-del::after");
        assert_eq!(once, twice);
    }

    #[test]
    fn unmatched_and_pseudo_only_segments_still_get_a_tag() {
        let (mut doc, root, _) = fixture();
        let binder = ScopeBinder::new("#app");
        assert_eq!(
            binder.scope_selector(&mut doc, root, ".missing"),
            format!(".missing.{}", binder.mint(".missing"))
        );
        assert_eq!(
            binder.scope_selector(&mut doc, root, ":hover"),
            format!(":hover.{}", binder.mint(""))
        );
    }

    #[test]
    fn bind_rewrites_registry_rules() {
        let (mut doc, root, nodes) = fixture();
        let spec = StyleSpec::rules([(".btn-del", [("color", "red")])]);
        let mut registry = StyleRegistry::from_spec(&mut doc, "css-app", &spec).unwrap();
        let binder = ScopeBinder::new("#app");
        binder.bind(&mut registry, &mut doc, root);

        let inside = tag(&doc, &binder, nodes[3]).unwrap();
        assert_eq!(registry.rules()[0].selector(), ".btn-del");
        assert_eq!(
            registry.rules()[0].effective_selector(),
            format!(".btn-del.{inside}")
        );
    }
}
