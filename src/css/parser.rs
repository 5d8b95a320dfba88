//! Recursive descent CSS parser.
//!
//! Two entry points share the logos tokenizer from [`crate::css::tokenizer`]:
//! [`parse_selector_list`] builds the selector AST used by document queries,
//! and [`parse_stylesheet`] splits raw CSS text into top-level rule blocks,
//! keeping selectors and declaration values as source text.

use tracing::warn;

use crate::css::model::*;
use crate::css::tokenizer::{tokenize, Spanned, Token};

/// Errors from CSS parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("empty selector")]
    EmptySelector,
    #[error("invalid declaration at position {position}: `{text}`")]
    InvalidDeclaration { position: usize, text: String },
}

/// Strip CSS block comments (`/* ... */`) from the input, replacing each
/// comment with a single space. An unterminated comment runs to the end.
pub(crate) fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("/*") {
        result.push_str(&rest[..open]);
        result.push(' ');
        match rest[open + 2..].find("*/") {
            Some(close) => rest = &rest[open + 2 + close + 2..],
            None => return result,
        }
    }

    result.push_str(rest);
    result
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Parse a comma-separated selector list, e.g. `ul > li.done, #app [type=text]`.
pub fn parse_selector_list(input: &str) -> Result<Vec<Selector>, ParseError> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(ParseError::EmptySelector);
    }

    let mut parser = Parser { source: input, tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];

    while parser.peek_token() == Some(Token::Comma) {
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    if parser.peek().is_some() {
        return Err(parser.unexpected("expected ',' or end of selector"));
    }

    Ok(selectors)
}

/// Whether a token can begin a compound selector.
fn starts_compound(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident
            | Token::HashName
            | Token::Dot
            | Token::Star
            | Token::BracketOpen
            | Token::PseudoClass
            | Token::PseudoElement
    )
}

/// Recursive descent parser state.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|t| t.token.clone())
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn next_token(&mut self, expected: &str) -> Result<Spanned, ParseError> {
        self.advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))
    }

    fn expect(&mut self, expected: Token) -> Result<Spanned, ParseError> {
        let tok = self.next_token(&format!("{expected:?}"))?;
        if tok.token == expected {
            Ok(tok)
        } else {
            Err(ParseError::UnexpectedToken {
                position: tok.start,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            })
        }
    }

    fn unexpected(&self, message: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::UnexpectedToken {
                position: tok.start,
                message: format!("{message}, got '{}'", tok.text),
            },
            None => ParseError::UnexpectedEof(message.to_string()),
        }
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.start == prev.end)
    }

    /// Parse a single selector: compound selectors joined by combinators.
    ///
    /// A compound-starting token left over after [`Self::parse_compound`] is
    /// necessarily separated by whitespace, which makes it a descendant step.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound()?)];

        loop {
            let combinator = match self.peek_token() {
                Some(Token::GreaterThan) => Combinator::Child,
                Some(Token::Plus) => Combinator::NextSibling,
                Some(Token::Tilde) => Combinator::SubsequentSibling,
                Some(ref t) if starts_compound(t) => Combinator::Descendant,
                _ => break,
            };
            if combinator != Combinator::Descendant {
                self.advance();
            }
            parts.push(SelectorPart::Combinator(combinator));
            parts.push(SelectorPart::Compound(self.parse_compound()?));
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector: simple selectors with no whitespace between
    /// them, e.g. `li.todo:first-child`.
    fn parse_compound(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut compound = CompoundSelector::new();

        match self.peek_token() {
            Some(Token::Ident) => {
                let tok = self.next_token("type selector")?;
                compound.push(SelectorComponent::Type(tok.text.to_ascii_lowercase()));
            }
            Some(Token::Star) => {
                self.advance();
                compound.push(SelectorComponent::Universal);
            }
            Some(ref t) if starts_compound(t) => compound.push(self.parse_subclass()?),
            _ => return Err(self.unexpected("expected selector")),
        }

        while self.is_adjacent() && self.peek_token().is_some_and(|t| is_subclass(&t)) {
            compound.push(self.parse_subclass()?);
        }

        Ok(compound)
    }

    /// Parse one of `.class`, `#id`, `[attr…]`, `:pseudo(arg)`, `::element`.
    fn parse_subclass(&mut self) -> Result<SelectorComponent, ParseError> {
        let tok = self.next_token("selector")?;
        match tok.token {
            Token::Dot => {
                if !self.is_adjacent() {
                    return Err(self.unexpected("expected class name after '.'"));
                }
                let name = self.expect(Token::Ident)?;
                Ok(SelectorComponent::Class(name.text))
            }
            Token::HashName => Ok(SelectorComponent::Id(tok.text[1..].to_string())),
            Token::BracketOpen => self.parse_attribute(),
            Token::PseudoClass => {
                let name = tok.text[1..].to_ascii_lowercase();
                let argument = if self.is_adjacent() && self.peek_token() == Some(Token::ParenOpen) {
                    Some(self.parse_argument()?)
                } else {
                    None
                };
                Ok(SelectorComponent::PseudoClass { name, argument })
            }
            Token::PseudoElement => {
                Ok(SelectorComponent::PseudoElement(tok.text[2..].to_ascii_lowercase()))
            }
            other => Err(ParseError::UnexpectedToken {
                position: tok.start,
                message: format!("expected selector, got {:?} '{}'", other, tok.text),
            }),
        }
    }

    /// Parse the inside of `[...]`; the opening bracket is already consumed.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, ParseError> {
        let name = self.expect(Token::Ident)?.text.to_ascii_lowercase();

        let op = match self.peek_token() {
            Some(Token::BracketClose) => {
                self.advance();
                return Ok(SelectorComponent::Attribute(AttributeSelector {
                    name,
                    op: AttributeOp::Exists,
                    value: String::new(),
                }));
            }
            Some(Token::Equals) => AttributeOp::Equals,
            Some(Token::IncludeMatch) => AttributeOp::Includes,
            Some(Token::DashMatch) => AttributeOp::DashMatch,
            Some(Token::PrefixMatch) => AttributeOp::Prefix,
            Some(Token::SuffixMatch) => AttributeOp::Suffix,
            Some(Token::SubstringMatch) => AttributeOp::Substring,
            _ => return Err(self.unexpected("expected ']' or attribute operator")),
        };
        self.advance();

        let value_tok = self.next_token("attribute value")?;
        let value = match value_tok.token {
            Token::StringLiteral | Token::StringLiteralSingle => {
                value_tok.text[1..value_tok.text.len() - 1].to_string()
            }
            Token::Ident | Token::Number | Token::HashName => value_tok.text,
            other => {
                return Err(ParseError::UnexpectedToken {
                    position: value_tok.start,
                    message: format!("expected attribute value, got {:?} '{}'", other, value_tok.text),
                })
            }
        };
        self.expect(Token::BracketClose)?;

        Ok(SelectorComponent::Attribute(AttributeSelector { name, op, value }))
    }

    /// Parse a parenthesised pseudo-class argument, returning its trimmed
    /// source text. Nested parentheses are kept verbatim.
    fn parse_argument(&mut self) -> Result<String, ParseError> {
        let open = self.expect(Token::ParenOpen)?;
        let mut depth = 1usize;

        while let Some(tok) = self.advance() {
            match tok.token {
                Token::ParenOpen => depth += 1,
                Token::ParenClose => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.source[open.end..tok.start].trim().to_string());
                    }
                }
                _ => {}
            }
        }

        Err(ParseError::UnexpectedEof("expected ')' to close pseudo-class argument".into()))
    }
}

fn is_subclass(token: &Token) -> bool {
    matches!(
        token,
        Token::HashName | Token::Dot | Token::BracketOpen | Token::PseudoClass | Token::PseudoElement
    )
}

// ---------------------------------------------------------------------------
// Stylesheets
// ---------------------------------------------------------------------------

/// Split raw CSS text into top-level rule blocks.
///
/// Comments are removed. At-rules (`@media`, `@import`, ...) are skipped with
/// a warning. Nested blocks inside a rule are rejected.
pub fn parse_stylesheet(input: &str) -> Result<Vec<RawRule>, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize(&cleaned);

    let mut rules = Vec::new();
    let mut prelude: Option<usize> = None;
    let mut cursor = 0;

    while let Some(tok) = tokens.get(cursor) {
        match tok.token {
            Token::AtKeyword if prelude.is_none() => {
                warn!(at_rule = %tok.text, "at-rules are not supported; skipped");
                cursor = skip_at_rule(&tokens, cursor);
                continue;
            }
            Token::BraceOpen => {
                let start = prelude.take().ok_or_else(|| ParseError::UnexpectedToken {
                    position: tok.start,
                    message: "expected selector before '{'".into(),
                })?;
                let selector = collapse_whitespace(&cleaned[start..tok.start]);
                let (declarations, next) = parse_block(&cleaned, &tokens, cursor)?;
                rules.push(RawRule { selector, declarations });
                cursor = next;
                continue;
            }
            Token::BraceClose | Token::Semicolon => {
                return Err(ParseError::UnexpectedToken {
                    position: tok.start,
                    message: format!("unexpected '{}' outside a rule block", tok.text),
                });
            }
            _ => {
                prelude.get_or_insert(tok.start);
            }
        }
        cursor += 1;
    }

    if prelude.is_some() {
        return Err(ParseError::UnexpectedEof("expected '{' after selector".into()));
    }

    Ok(rules)
}

/// Skip an at-rule starting at `start`: either a statement ending in `;` or
/// a balanced `{ ... }` block. Returns the index of the next token.
fn skip_at_rule(tokens: &[Spanned], start: usize) -> usize {
    let mut depth = 0usize;
    for (index, tok) in tokens.iter().enumerate().skip(start + 1) {
        match tok.token {
            Token::Semicolon if depth == 0 => return index + 1,
            Token::BraceOpen => depth += 1,
            Token::BraceClose => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index + 1;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Parse the declarations of the block whose `{` sits at `open`.
/// Returns the declarations and the index just past the closing `}`.
fn parse_block(
    source: &str,
    tokens: &[Spanned],
    open: usize,
) -> Result<(Vec<(String, String)>, usize), ParseError> {
    let mut declarations = Vec::new();
    let mut decl_start = tokens[open].end;
    let mut parens = 0usize;

    for (index, tok) in tokens.iter().enumerate().skip(open + 1) {
        match tok.token {
            Token::ParenOpen => parens += 1,
            Token::ParenClose => parens = parens.saturating_sub(1),
            Token::Semicolon if parens == 0 => {
                push_declaration(&mut declarations, &source[decl_start..tok.start], decl_start)?;
                decl_start = tok.end;
            }
            Token::BraceClose => {
                push_declaration(&mut declarations, &source[decl_start..tok.start], decl_start)?;
                return Ok((declarations, index + 1));
            }
            Token::BraceOpen => {
                return Err(ParseError::UnexpectedToken {
                    position: tok.start,
                    message: "nested blocks are not supported".into(),
                });
            }
            _ => {}
        }
    }

    Err(ParseError::UnexpectedEof("expected '}' to close rule block".into()))
}

fn push_declaration(
    out: &mut Vec<(String, String)>,
    text: &str,
    position: usize,
) -> Result<(), ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let invalid = || ParseError::InvalidDeclaration { position, text: trimmed.to_string() };
    let (property, value) = trimmed.split_once(':').ok_or_else(invalid)?;
    let (property, value) = (property.trim(), collapse_whitespace(value));
    if property.is_empty() || value.is_empty() {
        return Err(invalid());
    }

    out.push((property.to_string(), value));
    Ok(())
}
