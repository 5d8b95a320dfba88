//! logos-based CSS tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `::before` as PseudoElement beats `:` + PseudoClass)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `#main` and `#fff` both match [`Token::HashName`]; the parser decides
//!   whether it is an id selector or a value
//! - `10px` matches [`Token::Number`] as a single dimension token
//! - `~=` matches [`Token::IncludeMatch`], not `Tilde` + `Equals`
//!
//! Declaration values are never interpreted; the stylesheet parser slices them
//! out of the source by byte span.

use logos::Logos;

/// CSS token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `!important` flag.
    #[token("!important")]
    Important,

    /// At-keyword: `@media`, `@import`, `@keyframes`.
    #[regex(r"@[a-zA-Z_-][a-zA-Z0-9_-]*")]
    AtKeyword,

    /// `#` followed by a name: an id selector, or a hex color in a value.
    #[regex(r"#[a-zA-Z0-9_-]+")]
    HashName,

    /// Pseudo-element: `::before`, `::placeholder`.
    #[regex(r"::[a-zA-Z_-][a-zA-Z0-9_-]*")]
    PseudoElement,

    /// Pseudo-class: `:hover`, `:focus`, `:nth-child`.
    #[regex(r":[a-zA-Z_-][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number with an optional unit suffix: `10`, `-5`, `1.5em`, `50%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?[a-zA-Z%]*")]
    Number,

    /// Identifier: element names, class names, property names, keywords.
    #[regex(r"-{0,2}[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Attribute matchers ───────────────────────────────────────────

    /// `~=`
    #[token("~=")]
    IncludeMatch,

    /// `|=`
    #[token("|=")]
    DashMatch,

    /// `^=`
    #[token("^=")]
    PrefixMatch,

    /// `$=`
    #[token("$=")]
    SuffixMatch,

    /// `*=`
    #[token("*=")]
    SubstringMatch,

    // ── Single-character punctuation ─────────────────────────────────

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `+`
    #[token("+")]
    Plus,

    /// `~`
    #[token("~")]
    Tilde,

    /// `=`
    #[token("=")]
    Equals,
}

/// A token together with its source text and byte span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub text: String,
    /// Byte offset where this token starts in the source.
    pub start: usize,
    /// Byte offset where this token ends in the source.
    pub end: usize,
}

/// Tokenize a CSS string, keeping byte spans.
///
/// Characters the lexer does not recognise (e.g. `/` or `!` in values) are
/// skipped; callers that need the raw text slice it from the source by span.
pub fn tokenize(input: &str) -> Vec<Spanned> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| Spanned {
                token,
                text: input[span.clone()].to_string(),
                start: span.start,
                end: span.end,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: tokenize and return just the token variants.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|t| t.token).collect()
    }

    /// Helper: tokenize and return (token, slice) pairs.
    fn tokens_with_text(input: &str) -> Vec<(Token, String)> {
        tokenize(input).into_iter().map(|t| (t.token, t.text)).collect()
    }

    // ── Basic punctuation ────────────────────────────────────────────

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("{ } ( ) [ ] : ; , . * > + ~ ="),
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::BracketOpen,
                Token::BracketClose,
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Dot,
                Token::Star,
                Token::GreaterThan,
                Token::Plus,
                Token::Tilde,
                Token::Equals,
            ]
        );
    }

    #[test]
    fn test_attribute_matchers() {
        assert_eq!(
            tokens("~= |= ^= $= *="),
            vec![
                Token::IncludeMatch,
                Token::DashMatch,
                Token::PrefixMatch,
                Token::SuffixMatch,
                Token::SubstringMatch,
            ]
        );
    }

    // ── Identifiers ──────────────────────────────────────────────────

    #[test]
    fn test_idents() {
        let result = tokens_with_text("color btn-del _private -webkit-box --accent");
        assert_eq!(result[0], (Token::Ident, "color".into()));
        assert_eq!(result[1], (Token::Ident, "btn-del".into()));
        assert_eq!(result[2], (Token::Ident, "_private".into()));
        assert_eq!(result[3], (Token::Ident, "-webkit-box".into()));
        assert_eq!(result[4], (Token::Ident, "--accent".into()));
    }

    // ── Numbers ──────────────────────────────────────────────────────

    #[test]
    fn test_numbers_and_dimensions() {
        let result = tokens_with_text("10 -5 3.14 10px 50% 1.5em");
        assert_eq!(result[0], (Token::Number, "10".into()));
        assert_eq!(result[1], (Token::Number, "-5".into()));
        assert_eq!(result[2], (Token::Number, "3.14".into()));
        assert_eq!(result[3], (Token::Number, "10px".into()));
        assert_eq!(result[4], (Token::Number, "50%".into()));
        assert_eq!(result[5], (Token::Number, "1.5em".into()));
    }

    // ── Hash names ───────────────────────────────────────────────────

    #[test]
    fn test_hash_names() {
        let result = tokens_with_text("#app #fff #todo-list");
        assert_eq!(result[0], (Token::HashName, "#app".into()));
        assert_eq!(result[1], (Token::HashName, "#fff".into()));
        assert_eq!(result[2], (Token::HashName, "#todo-list".into()));
    }

    // ── Pseudo selectors ─────────────────────────────────────────────

    #[test]
    fn test_pseudo_classes() {
        let result = tokens_with_text(":hover :focus :nth-child");
        assert_eq!(result[0], (Token::PseudoClass, ":hover".into()));
        assert_eq!(result[1], (Token::PseudoClass, ":focus".into()));
        assert_eq!(result[2], (Token::PseudoClass, ":nth-child".into()));
    }

    #[test]
    fn test_pseudo_element_beats_pseudo_class() {
        let result = tokens_with_text("::before");
        assert_eq!(result, vec![(Token::PseudoElement, "::before".into())]);
    }

    #[test]
    fn test_at_keyword() {
        assert_eq!(tokens("@media"), vec![Token::AtKeyword]);
    }

    // ── Strings ──────────────────────────────────────────────────────

    #[test]
    fn test_string_literals() {
        let result = tokens_with_text(r#""a;b" 'c}d'"#);
        assert_eq!(result[0], (Token::StringLiteral, "\"a;b\"".into()));
        assert_eq!(result[1], (Token::StringLiteralSingle, "'c}d'".into()));
    }

    // ── Spans ────────────────────────────────────────────────────────

    #[test]
    fn test_spans_index_into_source() {
        let input = "li  .btn";
        let spanned = tokenize(input);
        assert_eq!(spanned[0].start, 0);
        assert_eq!(spanned[0].end, 2);
        assert_eq!(spanned[1].start, 4);
        assert_eq!(&input[spanned[2].start..spanned[2].end], "btn");
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(tokens("a / b"), vec![Token::Ident, Token::Ident]);
    }

    // ── Full CSS rule ────────────────────────────────────────────────

    #[test]
    fn test_full_css_rule() {
        let input = "li:hover .btn-del { color: #fff; }";
        let result = tokens_with_text(input);

        assert_eq!(result[0], (Token::Ident, "li".into()));
        assert_eq!(result[1], (Token::PseudoClass, ":hover".into()));
        assert_eq!(result[2], (Token::Dot, ".".into()));
        assert_eq!(result[3], (Token::Ident, "btn-del".into()));
        assert_eq!(result[4], (Token::BraceOpen, "{".into()));
        assert_eq!(result[5], (Token::Ident, "color".into()));
        assert_eq!(result[6], (Token::Colon, ":".into()));
        assert_eq!(result[7], (Token::HashName, "#fff".into()));
        assert_eq!(result[8], (Token::Semicolon, ";".into()));
        assert_eq!(result[9], (Token::BraceClose, "}".into()));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t\n  ").is_empty());
    }
}
