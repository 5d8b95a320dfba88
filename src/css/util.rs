//! Selector utilities: match collection, selector splitting, pseudo/attribute
//! stripping, kebab-casing and content hashing.

use std::sync::LazyLock;

use regex::Regex;

/// `:pseudo`, `:pseudo(args)`, `::pseudo-element` and `[attr…]` fragments.
static PSEUDO_OR_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"::?[\w-]+(?:\([^)]*\))?|\[[^\]]*\]").expect("valid regex")
});

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of characters produced by [`content_hash`].
pub const HASH_LEN: usize = 8;

/// Every match of `pattern` in `text`, left to right.
///
/// Works on a copy of `text`: each round finds the first remaining match,
/// records it and deletes it from the copy, so the text on either side of a
/// removed match can join up and match again.
///
/// # Panics
///
/// Panics if the pattern matches the empty string.
pub fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    let mut working = text.to_owned();
    let mut found = Vec::new();

    loop {
        let (range, matched) = match pattern.find(&working) {
            Some(m) => (m.range(), m.as_str().to_owned()),
            None => break,
        };
        assert!(
            !range.is_empty(),
            "find_all: pattern `{}` matched the empty string",
            pattern.as_str()
        );
        found.push(matched);
        working.replace_range(range, "");
    }

    found
}

/// Remove every pseudo-class, pseudo-element and attribute fragment.
///
/// `li:hover` becomes `li`, `input[type=text]` becomes `input`; a selector
/// made only of such fragments becomes the empty string.
pub fn strip_pseudo_and_attribute_selectors(selector: &str) -> String {
    PSEUDO_OR_ATTRIBUTE.replace_all(selector, "").into_owned()
}

/// One piece of a split selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPiece {
    /// A compound selector such as `li.done:hover`.
    Segment(String),
    /// A run of whitespace / `,` / `>` / `+` / `~` between segments.
    Combinator(String),
}

impl SelectorPiece {
    /// The verbatim text of this piece.
    pub fn as_str(&self) -> &str {
        match self {
            SelectorPiece::Segment(s) | SelectorPiece::Combinator(s) => s,
        }
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | '>' | '+' | '~')
}

/// Split a selector into segments and the separator runs between them.
///
/// Separators inside `[...]`, `(...)` or quotes do not split, so
/// `[class~=a]` and `:nth-child(2n+1)` stay whole. Concatenating the pieces
/// reproduces the input exactly.
pub fn split_compound_selector(selector: &str) -> Vec<SelectorPiece> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_separator = false;
    let (mut brackets, mut parens) = (0usize, 0usize);
    let mut quote: Option<char> = None;

    for (index, ch) in selector.char_indices() {
        let separator = match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
                false
            }
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    false
                }
                '[' => {
                    brackets += 1;
                    false
                }
                ']' => {
                    brackets = brackets.saturating_sub(1);
                    false
                }
                '(' => {
                    parens += 1;
                    false
                }
                ')' => {
                    parens = parens.saturating_sub(1);
                    false
                }
                c => brackets == 0 && parens == 0 && is_separator(c),
            },
        };

        if index == 0 {
            in_separator = separator;
        } else if separator != in_separator {
            pieces.push(piece(in_separator, &selector[start..index]));
            start = index;
            in_separator = separator;
        }
    }

    if start < selector.len() {
        pieces.push(piece(in_separator, &selector[start..]));
    }
    pieces
}

fn piece(separator: bool, text: &str) -> SelectorPiece {
    if separator {
        SelectorPiece::Combinator(text.to_owned())
    } else {
        SelectorPiece::Segment(text.to_owned())
    }
}

/// Concatenate pieces back into selector text.
pub fn join_pieces(pieces: &[SelectorPiece]) -> String {
    pieces.iter().map(SelectorPiece::as_str).collect()
}

/// `backgroundColor` → `background-color`. Idempotent on kebab-case input.
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Deterministic 8-character lowercase base-36 digest of `text`.
///
/// Built from the first 64 bits of a blake3 hash. Collisions are possible
/// and not detected.
pub fn content_hash(text: &str) -> String {
    let digest = blake3::hash(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    let mut n = u64::from_le_bytes(head);

    let mut out = String::with_capacity(HASH_LEN);
    for _ in 0..HASH_LEN {
        out.push(char::from(BASE36[(n % 36) as usize]));
        n /= 36;
    }
    out
}
