//! Shortcut tags: `tag#id.class:type@name=value`.
//!
//! | marker | attribute |
//! |--------|-----------|
//! | `#`    | `id`      |
//! | `.`    | `class`   |
//! | `:`    | `type`    |
//! | `@`    | `name`    |
//! | `=`    | `value`   |

use std::sync::LazyLock;

use regex::Regex;

use crate::css::util::find_all;

static SHORTCUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#.@:=][\w-]+").expect("valid regex"));

/// Tag name used when a shortcut tag names none.
pub const DEFAULT_TAG: &str = "div";

/// A tag with its shortcuts turned into attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

fn attribute_for(marker: char) -> &'static str {
    match marker {
        '#' => "id",
        '.' => "class",
        ':' => "type",
        '@' => "name",
        _ => "value",
    }
}

/// Expand the shortcuts of `tag` on top of `explicit` attributes.
///
/// Explicit attributes come first. A shortcut for an attribute that is
/// already present appends to it with a space, so `button.a.b` with an
/// explicit `class="x"` yields `class="x a b"`.
pub fn expand(tag: &str, explicit: &[(String, String)]) -> Expanded {
    let mut attributes = explicit.to_vec();
    let mut name = tag.to_string();

    for shortcut in find_all(&SHORTCUT, tag) {
        let mut chars = shortcut.chars();
        let Some(marker) = chars.next() else { continue };
        let value = chars.as_str();
        let attribute = attribute_for(marker);

        match attributes.iter_mut().find(|(key, _)| key == attribute) {
            Some((_, current)) => {
                current.push(' ');
                current.push_str(value);
            }
            None => attributes.push((attribute.to_string(), value.to_string())),
        }
        name = name.replacen(&shortcut, "", 1);
    }

    let name = name.trim();
    Expanded {
        tag: if name.is_empty() {
            DEFAULT_TAG.to_string()
        } else {
            name.to_ascii_lowercase()
        },
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn plain_tag() {
        assert_eq!(expand("h1", &[]), Expanded { tag: "h1".into(), attributes: vec![] });
    }

    #[test]
    fn every_marker() {
        assert_eq!(
            expand("input#who.big:text@message=world", &[]),
            Expanded {
                tag: "input".into(),
                attributes: pairs(&[
                    ("id", "who"),
                    ("class", "big"),
                    ("type", "text"),
                    ("name", "message"),
                    ("value", "world"),
                ]),
            }
        );
    }

    #[test]
    fn empty_tag_is_div() {
        let expanded = expand(".card", &[]);
        assert_eq!(expanded.tag, "div");
        assert_eq!(expanded.attributes, pairs(&[("class", "card")]));
    }

    #[test]
    fn repeated_shortcuts_accumulate_after_explicit() {
        let explicit = pairs(&[("class", "x"), ("title", "t")]);
        let expanded = expand("button.btn-del.wide", &explicit);
        assert_eq!(expanded.tag, "button");
        assert_eq!(
            expanded.attributes,
            pairs(&[("class", "x btn-del wide"), ("title", "t")])
        );
    }

    #[test]
    fn submit_input() {
        let expanded = expand("input:submit", &[]);
        assert_eq!(expanded.tag, "input");
        assert_eq!(expanded.attributes, pairs(&[("type", "submit")]));
    }
}
