//! Tag name policy for materialized elements.

use tracing::warn;

use super::shortcut::DEFAULT_TAG;

/// HTML element names the host document accepts.
const KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "bdi", "bdo",
    "blockquote", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em",
    "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "legend", "li", "main", "map", "mark", "math", "menu", "meter", "nav", "noscript", "object",
    "ol", "optgroup", "option", "output", "p", "picture", "pre", "progress", "q", "rp", "rt",
    "ruby", "s", "samp", "search", "section", "select", "slot", "small", "source", "span",
    "strong", "sub", "summary", "sup", "svg", "table", "tbody", "td", "template", "textarea",
    "tfoot", "th", "thead", "time", "tr", "track", "u", "ul", "var", "video", "wbr",
];

/// Whether `name` is a custom element name: starts with a lowercase letter
/// and contains a hyphen.
pub fn is_custom_element(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

pub fn is_supported(name: &str) -> bool {
    KNOWN_TAGS.contains(&name) || is_custom_element(name)
}

/// The tag to create for `name`. Unsupported names are logged and become
/// `div`.
pub fn resolve(name: &str) -> &str {
    if is_supported(name) {
        name
    } else {
        warn!(tag = name, "unsupported tag name; rendering a div");
        DEFAULT_TAG
    }
}
