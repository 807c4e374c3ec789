//! Lexer (tokenizer) for Scriptling source text
//!
//! Converts raw source text into [`Token`]s, pulled lazily one at a time by
//! the parser. Scanning works by trying an ordered list of lexical rules
//! against the text at the cursor; the first rule that matches wins, and a
//! rule without a token kind discards its match (whitespace, comments) and
//! scanning resumes.

use std::fmt;

/// All token kinds produced by the lexer.
///
/// This enumeration is closed: every dispatch site in the parser matches on
/// it with an explicit fallback arm, so extending it means revisiting each
/// of those sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Number,
    String,

    // Identifiers and keywords
    Identifier,
    Let,

    // Punctuation
    Semicolon,  // ;
    BraceOpen,  // {
    BraceClose, // }
    ParenOpen,  // (
    ParenClose, // )
    Comma,      // ,

    // Operators
    SimpleAssign,           // =
    ComplexAssign,          // += -= *= /=
    AdditiveOperator,       // + -
    MultiplicativeOperator, // * /
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Let => "'let'",
            TokenKind::Semicolon => "';'",
            TokenKind::BraceOpen => "'{'",
            TokenKind::BraceClose => "'}'",
            TokenKind::ParenOpen => "'('",
            TokenKind::ParenClose => "')'",
            TokenKind::Comma => "','",
            TokenKind::SimpleAssign => "'='",
            TokenKind::ComplexAssign => "compound assignment operator",
            TokenKind::AdditiveOperator => "additive operator",
            TokenKind::MultiplicativeOperator => "multiplicative operator",
        };
        write!(f, "{}", name)
    }
}

/// A classified unit of source text: its kind plus the exact matched text.
///
/// The value is raw: string tokens still carry their delimiting quotes, which
/// the parser strips when it builds the literal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.value)
    }
}

/// Lexer error: no lexical rule matched the remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexError {
    pub ch: char,
    /// Byte offset of the offending character in the source text.
    pub position: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected character '{}' at offset {}",
            self.ch, self.position
        )
    }
}

impl std::error::Error for LexError {}

/// How a lexical rule recognizes text at the cursor.
enum Pattern {
    /// Exact text.
    Literal(&'static str),
    /// Custom matcher returning the matched byte length.
    Matcher(fn(&str) -> Option<usize>),
}

/// One lexical rule: a pattern and the kind it produces. A `None` kind means
/// the matched text is discarded and scanning continues.
struct Rule {
    pattern: Pattern,
    kind: Option<TokenKind>,
}

impl Rule {
    /// Byte length matched by this rule at the start of `rest`, if any.
    fn matched_len(&self, rest: &str) -> Option<usize> {
        match self.pattern {
            Pattern::Literal(text) => rest.starts_with(text).then_some(text.len()),
            Pattern::Matcher(matcher) => matcher(rest),
        }
    }
}

/// The lexical rule table, tried strictly in declaration order.
///
/// Order is load-bearing: comment rules precede the `/` operator, `let`
/// precedes the identifier rule, digits precede the identifier rule, and the
/// compound assignment forms precede `=` and the single-character operators
/// so that `+=` is never split into `+` and `=`.
#[rustfmt::skip]
static RULES: &[Rule] = &[
    // Whitespace and comments
    Rule { pattern: Pattern::Matcher(match_whitespace), kind: None },
    Rule { pattern: Pattern::Matcher(match_line_comment), kind: None },
    Rule { pattern: Pattern::Matcher(match_block_comment), kind: None },
    // Symbols, delimiters
    Rule { pattern: Pattern::Literal(";"), kind: Some(TokenKind::Semicolon) },
    Rule { pattern: Pattern::Literal("{"), kind: Some(TokenKind::BraceOpen) },
    Rule { pattern: Pattern::Literal("}"), kind: Some(TokenKind::BraceClose) },
    Rule { pattern: Pattern::Literal("("), kind: Some(TokenKind::ParenOpen) },
    Rule { pattern: Pattern::Literal(")"), kind: Some(TokenKind::ParenClose) },
    Rule { pattern: Pattern::Literal(","), kind: Some(TokenKind::Comma) },
    // Keywords
    Rule { pattern: Pattern::Matcher(match_let_keyword), kind: Some(TokenKind::Let) },
    // Numbers
    Rule { pattern: Pattern::Matcher(match_number), kind: Some(TokenKind::Number) },
    // Strings
    Rule { pattern: Pattern::Matcher(match_double_quoted), kind: Some(TokenKind::String) },
    Rule { pattern: Pattern::Matcher(match_single_quoted), kind: Some(TokenKind::String) },
    // Identifiers
    Rule { pattern: Pattern::Matcher(match_identifier), kind: Some(TokenKind::Identifier) },
    // Assignment operators, compound forms first
    Rule { pattern: Pattern::Literal("*="), kind: Some(TokenKind::ComplexAssign) },
    Rule { pattern: Pattern::Literal("/="), kind: Some(TokenKind::ComplexAssign) },
    Rule { pattern: Pattern::Literal("+="), kind: Some(TokenKind::ComplexAssign) },
    Rule { pattern: Pattern::Literal("-="), kind: Some(TokenKind::ComplexAssign) },
    Rule { pattern: Pattern::Literal("="), kind: Some(TokenKind::SimpleAssign) },
    // Arithmetic operators
    Rule { pattern: Pattern::Literal("+"), kind: Some(TokenKind::AdditiveOperator) },
    Rule { pattern: Pattern::Literal("-"), kind: Some(TokenKind::AdditiveOperator) },
    Rule { pattern: Pattern::Literal("*"), kind: Some(TokenKind::MultiplicativeOperator) },
    Rule { pattern: Pattern::Literal("/"), kind: Some(TokenKind::MultiplicativeOperator) },
];

/// First rule matching at the start of `rest`: (matched length, rule kind).
fn first_match(rest: &str) -> Option<(usize, Option<TokenKind>)> {
    RULES
        .iter()
        .find_map(|rule| rule.matched_len(rest).map(|len| (len, rule.kind)))
}

fn match_whitespace(rest: &str) -> Option<usize> {
    let len = rest.len() - rest.trim_start().len();
    (len > 0).then_some(len)
}

/// `// ...` up to but not including the line break.
fn match_line_comment(rest: &str) -> Option<usize> {
    if !rest.starts_with("//") {
        return None;
    }
    Some(rest.find('\n').unwrap_or(rest.len()))
}

/// `/* ... */`, possibly spanning lines, up to the first closing `*/`.
/// An unterminated comment matches nothing and falls through the rule list.
fn match_block_comment(rest: &str) -> Option<usize> {
    if !rest.starts_with("/*") {
        return None;
    }
    rest[2..].find("*/").map(|end| end + 4)
}

/// `let` followed by a word boundary, so `letter` stays an identifier.
fn match_let_keyword(rest: &str) -> Option<usize> {
    let tail = rest.strip_prefix("let")?;
    match tail.chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some(3),
    }
}

fn match_number(rest: &str) -> Option<usize> {
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (len > 0).then_some(len)
}

fn match_double_quoted(rest: &str) -> Option<usize> {
    match_quoted(rest, '"')
}

fn match_single_quoted(rest: &str) -> Option<usize> {
    match_quoted(rest, '\'')
}

/// A quoted run with no escape processing and no embedded quote of the same
/// kind. An unterminated string matches nothing.
fn match_quoted(rest: &str, quote: char) -> Option<usize> {
    let tail = rest.strip_prefix(quote)?;
    tail.find(quote).map(|end| end + 2)
}

fn match_identifier(rest: &str) -> Option<usize> {
    let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    (len > 0).then_some(len)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lexer for Scriptling source text.
///
/// Owns the source string and a cursor (byte offset) that only successful
/// rule matches advance.
#[derive(Debug, Default)]
pub struct Tokenizer {
    source: String,
    cursor: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the tokenizer over `source`, cursor back at the start. Safe to
    /// call repeatedly to restart scanning.
    pub fn init(&mut self, source: &str) {
        self.source = source.to_string();
        self.cursor = 0;
    }

    /// Whether any input remains past the cursor.
    pub fn has_more_tokens(&self) -> bool {
        self.cursor < self.source.len()
    }

    /// Whether the cursor has consumed the entire source.
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.source.len()
    }

    /// Pull the next significant token, or `Ok(None)` once input is
    /// exhausted.
    ///
    /// Tries the rule table at the cursor; skip rules advance the cursor and
    /// scanning continues. If no rule matches, the character at the cursor is
    /// reported in a [`LexError`].
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let rest = &self.source[self.cursor..];
            let ch = match rest.chars().next() {
                Some(ch) => ch,
                None => return Ok(None),
            };

            match first_match(rest) {
                None => {
                    return Err(LexError {
                        ch,
                        position: self.cursor,
                    });
                }
                Some((len, None)) => {
                    // Skipped match (whitespace, comment); keep scanning.
                    self.cursor += len;
                }
                Some((len, Some(kind))) => {
                    let value = rest[..len].to_string();
                    self.cursor += len;
                    return Ok(Some(Token { kind, value }));
                }
            }
        }
    }
}
