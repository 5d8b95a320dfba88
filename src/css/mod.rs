//! CSS engine: tokenizer, selector parser, stylesheet splitter, matching and
//! selector utilities.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod matching;
pub mod util;

pub use parser::{parse_selector_list, parse_stylesheet, ParseError};
pub use util::{
    content_hash, find_all, join_pieces, split_compound_selector,
    strip_pseudo_and_attribute_selectors, to_kebab_case, SelectorPiece,
};
