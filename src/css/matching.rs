//! Selector matching against the host document.
//!
//! Selectors are matched right to left: the rightmost compound must match the
//! candidate, then each combinator walks to the parent or preceding siblings.
//! Descendant and subsequent-sibling steps backtrack, so `.a > .b .c` finds
//! a `.b` that actually sits under an `.a`, not merely the nearest `.b`.

use crate::css::model::*;
use crate::dom::{Document, NodeId};

/// Whether `node` matches any selector of a parsed selector list.
pub fn matches_any(doc: &Document, node: NodeId, selectors: &[Selector]) -> bool {
    selectors.iter().any(|selector| matches_selector(doc, node, selector))
}

/// Whether `node` matches a single complex selector.
pub fn matches_selector(doc: &Document, node: NodeId, selector: &Selector) -> bool {
    match selector.parts.len() {
        0 => false,
        len => match_from(doc, node, &selector.parts, len - 1),
    }
}

/// Match `parts[..=index]` with `parts[index]` (a compound) anchored at `node`.
fn match_from(doc: &Document, node: NodeId, parts: &[SelectorPart], index: usize) -> bool {
    let SelectorPart::Compound(compound) = &parts[index] else {
        return false;
    };
    if !matches_compound(doc, node, compound) {
        return false;
    }
    if index == 0 {
        return true;
    }
    let (SelectorPart::Combinator(combinator), Some(next)) = (&parts[index - 1], index.checked_sub(2)) else {
        return false;
    };

    match combinator {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| match_from(doc, parent, parts, next)),
        Combinator::Descendant => doc
            .ancestors(node)
            .into_iter()
            .any(|ancestor| match_from(doc, ancestor, parts, next)),
        Combinator::NextSibling => doc
            .previous_element_sibling(node)
            .is_some_and(|sibling| match_from(doc, sibling, parts, next)),
        Combinator::SubsequentSibling => {
            let mut current = doc.previous_element_sibling(node);
            while let Some(sibling) = current {
                if match_from(doc, sibling, parts, next) {
                    return true;
                }
                current = doc.previous_element_sibling(sibling);
            }
            false
        }
    }
}

/// Check whether an element satisfies every component of a compound selector.
fn matches_compound(doc: &Document, node: NodeId, compound: &CompoundSelector) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };

    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => el.tag.eq_ignore_ascii_case(name),
        SelectorComponent::Universal => true,
        SelectorComponent::Class(class) => el.has_class(class),
        SelectorComponent::Id(id) => el.id.as_deref() == Some(id.as_str()),
        SelectorComponent::Attribute(attr) => attr.matches(el.attribute(&attr.name).as_deref()),
        SelectorComponent::PseudoClass { name, argument } => {
            matches_pseudo_class(doc, node, name, argument.as_deref())
        }
        SelectorComponent::PseudoElement(_) => false,
    })
}

/// Structural and state pseudo-classes. Unknown ones never match.
fn matches_pseudo_class(doc: &Document, node: NodeId, name: &str, argument: Option<&str>) -> bool {
    match name {
        "focus" => doc.active_element() == Some(node),
        "first-child" => doc.parent(node).is_some() && doc.previous_element_sibling(node).is_none(),
        "last-child" => doc.parent(node).is_some() && doc.next_element_sibling(node).is_none(),
        "nth-child" => {
            let Some(parent) = doc.parent(node) else {
                return false;
            };
            let Some(position) = doc.element_children(parent).position(|child| child == node) else {
                return false;
            };
            argument.is_some_and(|arg| nth_matches(arg, position + 1))
        }
        "empty" => doc.children(node).iter().all(|&child| {
            doc.get(child)
                .and_then(|data| data.as_text())
                .is_some_and(str::is_empty)
        }),
        "disabled" => doc.element(node).is_some_and(|el| el.has_attribute("disabled")),
        "checked" => doc.element(node).is_some_and(|el| el.has_attribute("checked")),
        "root" => node == doc.document_element(),
        _ => false,
    }
}

/// Evaluate an `An+B` expression (or `odd` / `even`) against a 1-based index.
fn nth_matches(argument: &str, index: usize) -> bool {
    let Some((a, b)) = parse_nth(argument) else {
        return false;
    };
    let Ok(index) = i64::try_from(index) else {
        return false;
    };
    if a == 0 {
        return index == b;
    }
    let diff = index - b;
    diff % a == 0 && diff / a >= 0
}

fn parse_nth(argument: &str) -> Option<(i64, i64)> {
    let arg: String = argument
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match arg.as_str() {
        "odd" => return Some((2, 1)),
        "even" => return Some((2, 0)),
        _ => {}
    }

    match arg.split_once('n') {
        None => Some((0, arg.parse().ok()?)),
        Some((a, b)) => {
            let a = match a {
                "" | "+" => 1,
                "-" => -1,
                digits => digits.parse().ok()?,
            };
            let b = if b.is_empty() { 0 } else { b.parse().ok()? };
            Some((a, b))
        }
    }
}
