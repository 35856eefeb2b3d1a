//! Lexer (tokenizer) for minipy source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The scan is a single forward pass with one character of lookahead; the first
//! character that fits no token category aborts the whole run.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Reserved words. Only `print` starts a statement; the rest are recognised
/// so they cannot be used as variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Print,
    If,
    Else,
    While,
    For,
    Return,
    Int,
    Float,
    String,
}

impl Keyword {
    pub const ALL: [Keyword; 9] = [
        Keyword::Print,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::For,
        Keyword::Return,
        Keyword::Int,
        Keyword::Float,
        Keyword::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Print => "print",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Return => "return",
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::String => "string",
        }
    }
}

/// Operator tokens. `==` is lexed but no grammar rule consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    EqEq,  // ==
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::EqEq => "==",
        }
    }
}

/// Token categories, used for "expected X, got Y" diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Integer,
    Float,
    String,
    Operator,
    Assign,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that errors can point at the
/// offending token without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword, SourceLocation),
    Ident(String, SourceLocation),
    /// Canonical decimal digits, see [`LiteralValue::Integer`](super::ast::LiteralValue::Integer)
    IntLiteral(String, SourceLocation),
    FloatLiteral(f64, SourceLocation),
    StringLiteral(String, SourceLocation),
    Operator(Operator, SourceLocation),
    Assign(SourceLocation),    // =
    Semicolon(SourceLocation), // ;
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Eof(SourceLocation),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Keyword(..) => TokenKind::Keyword,
            Token::Ident(..) => TokenKind::Identifier,
            Token::IntLiteral(..) => TokenKind::Integer,
            Token::FloatLiteral(..) => TokenKind::Float,
            Token::StringLiteral(..) => TokenKind::String,
            Token::Operator(..) => TokenKind::Operator,
            Token::Assign(_) => TokenKind::Assign,
            Token::Semicolon(_) => TokenKind::Semicolon,
            Token::LParen(_) => TokenKind::LParen,
            Token::RParen(_) => TokenKind::RParen,
            Token::LBrace(_) => TokenKind::LBrace,
            Token::RBrace(_) => TokenKind::RBrace,
            Token::Eof(_) => TokenKind::Eof,
        }
    }

    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Keyword(_, loc)
            | Token::Ident(_, loc)
            | Token::IntLiteral(_, loc)
            | Token::FloatLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Operator(_, loc)
            | Token::Assign(loc)
            | Token::Semicolon(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Token::Keyword(kw, _) => write!(f, "{}({})", kind, kw.as_str()),
            Token::Ident(name, _) => write!(f, "{}({})", kind, name),
            Token::IntLiteral(n, _) => write!(f, "{}({})", kind, n),
            Token::FloatLiteral(x, _) => write!(f, "{}({:?})", kind, x),
            Token::StringLiteral(s, _) => write!(f, "{}(\"{}\")", kind, s),
            Token::Operator(op, _) => write!(f, "{}({})", kind, op.as_str()),
            Token::Assign(_) => write!(f, "{}(=)", kind),
            Token::Semicolon(_) => write!(f, "{}(;)", kind),
            Token::LParen(_) => write!(f, "{}(()", kind),
            Token::RParen(_) => write!(f, "{}())", kind),
            Token::LBrace(_) => write!(f, "{}({{)", kind),
            Token::RBrace(_) => write!(f, "{}(}})", kind),
            Token::Eof(_) => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unrecognized character: {character}")]
    UnrecognizedCharacter {
        character: char,
        location: SourceLocation,
    },
    /// More than one decimal point, or a float too large to represent.
    #[error("Invalid numeric literal: {text}")]
    MalformedNumber {
        text: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnrecognizedCharacter { location, .. }
            | LexError::MalformedNumber { location, .. } => *location,
        }
    }
}

/// Tokenize `source` in one pass. The result always ends with exactly one
/// [`Token::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`, which Python's
/// `str.isspace` also treats as space.
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\x1c'..='\x1f').contains(&ch)
}

/// Strip leading zeros from a run of ASCII digits, keeping a single `0`.
fn canonical_integer(digits: &str) -> String {
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Lexer for minipy source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    keywords: FxHashMap<&'static str, Keyword>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        let keywords = Keyword::ALL.iter().map(|kw| (kw.as_str(), *kw)).collect();
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            let token = self.next_token()?;
            trace!(token = %token, "lexed token");
            tokens.push(token);
        }

        debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get next token. Must not be called at end of input.
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::Eof(loc));
        };

        match ch {
            c if c.is_alphabetic() || c == '_' => Ok(self.identifier_or_keyword(ch, loc)),
            c if c.is_ascii_digit() => self.number_literal(ch, loc),
            '"' => Ok(self.string_literal(loc)),

            '+' => Ok(Token::Operator(Operator::Plus, loc)),
            '-' => Ok(Token::Operator(Operator::Minus, loc)),
            '*' => Ok(Token::Operator(Operator::Star, loc)),
            '/' => Ok(Token::Operator(Operator::Slash, loc)),
            ';' => Ok(Token::Semicolon(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Operator(Operator::EqEq, loc))
                } else {
                    Ok(Token::Assign(loc))
                }
            }

            _ => Err(LexError::UnrecognizedCharacter {
                character: ch,
                location: loc,
            }),
        }
    }

    /// Parse string literal. The opening quote is already consumed; no escape
    /// processing, and end of input terminates the literal.
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                break;
            }
            string.push(ch);
        }

        Token::StringLiteral(string, loc)
    }

    /// Parse numeric literal. Any `.` in the span makes it a float.
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let malformed = || LexError::MalformedNumber {
            text: num_str.clone(),
            location: loc,
        };

        match num_str.matches('.').count() {
            0 => Ok(Token::IntLiteral(canonical_integer(&num_str), loc)),
            1 => match num_str.parse::<f64>() {
                Ok(x) if x.is_finite() => Ok(Token::FloatLiteral(x, loc)),
                _ => Err(malformed()),
            },
            _ => Err(malformed()),
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(ident.as_str()) {
            Some(kw) => Token::Keyword(*kw, loc),
            None => Token::Ident(ident, loc),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if is_space(ch)) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(Token::kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("x = 10; print(x);").unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[1], Token::Assign(_)));
        assert!(matches!(tokens[2], Token::IntLiteral(ref n, _) if n == "10"));
        assert!(matches!(tokens[3], Token::Semicolon(_)));
        assert!(matches!(tokens[4], Token::Keyword(Keyword::Print, _)));
        assert!(matches!(tokens[5], Token::LParen(_)));
        assert!(matches!(tokens[6], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[7], Token::RParen(_)));
        assert!(matches!(tokens[8], Token::Semicolon(_)));
        assert!(matches!(tokens[9], Token::Eof(_)));
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \t\r\n "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let source = "if else while for return int float string print _tmp1 printer";
        let tokens = tokenize(source).unwrap();

        for (token, kw) in tokens.iter().zip(Keyword::ALL.iter().skip(1)) {
            assert_eq!(*token, Token::Keyword(*kw, token.location()));
        }
        assert!(matches!(tokens[8], Token::Keyword(Keyword::Print, _)));
        assert!(matches!(tokens[9], Token::Ident(ref s, _) if s == "_tmp1"));
        assert!(matches!(tokens[10], Token::Ident(ref s, _) if s == "printer"));
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("+ - * / == =").unwrap();

        assert!(matches!(tokens[0], Token::Operator(Operator::Plus, _)));
        assert!(matches!(tokens[1], Token::Operator(Operator::Minus, _)));
        assert!(matches!(tokens[2], Token::Operator(Operator::Star, _)));
        assert!(matches!(tokens[3], Token::Operator(Operator::Slash, _)));
        assert!(matches!(tokens[4], Token::Operator(Operator::EqEq, _)));
        assert!(matches!(tokens[5], Token::Assign(_)));
    }

    #[test]
    fn test_double_equals_without_spaces() {
        assert_eq!(
            kinds("a==b=c"),
            vec![
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 2.75 7.").unwrap();

        assert!(matches!(tokens[0], Token::IntLiteral(ref n, _) if n == "42"));
        assert!(matches!(tokens[1], Token::FloatLiteral(x, _) if x == 2.75));
        assert!(matches!(tokens[2], Token::FloatLiteral(x, _) if x == 7.0));
    }

    #[test]
    fn test_malformed_numbers() {
        let err = tokenize("x = 1.2.3;").unwrap_err();
        assert!(matches!(err, LexError::MalformedNumber { ref text, .. } if text == "1.2.3"));
        assert_eq!(err.location(), SourceLocation::new(1, 5));

        let huge = format!("1{}.5", "0".repeat(400));
        let err = tokenize(&huge).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid numeric literal: {}", huge));
    }

    #[test]
    fn test_integers_are_unbounded_and_canonical() {
        let tokens = tokenize("99999999999999999999999 007 0 000").unwrap();

        assert!(
            matches!(tokens[0], Token::IntLiteral(ref n, _) if n == "99999999999999999999999")
        );
        assert!(matches!(tokens[1], Token::IntLiteral(ref n, _) if n == "7"));
        assert!(matches!(tokens[2], Token::IntLiteral(ref n, _) if n == "0"));
        assert!(matches!(tokens[3], Token::IntLiteral(ref n, _) if n == "0"));
    }

    #[test]
    fn test_ascii_separators_are_whitespace() {
        assert_eq!(
            kinds("x\x1c=\x1d1\x1e;\x1f\x0b\x0c"),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Integer,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literal_is_verbatim() {
        let tokens = tokenize(r#""a\nb" "Hello, world!""#).unwrap();

        match &tokens[0] {
            Token::StringLiteral(s, _) => assert_eq!(s, "a\\nb"),
            other => panic!("Expected string literal, got {}", other),
        }
        assert!(matches!(tokens[1], Token::StringLiteral(ref s, _) if s == "Hello, world!"));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("\"open ended").unwrap();

        assert!(matches!(tokens[0], Token::StringLiteral(ref s, _) if s == "open ended"));
        assert!(matches!(tokens[1], Token::Eof(_)));
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("x = 10 @ 5;").unwrap_err();

        assert_eq!(err.to_string(), "Unrecognized character: @");
        assert_eq!(err.location(), SourceLocation::new(1, 8));
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens = tokenize("a = 1;\n  b = 2;").unwrap();

        assert_eq!(tokens[4].location(), SourceLocation::new(2, 3));
        assert_eq!(tokens.last().unwrap().location(), SourceLocation::new(2, 9));
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize("if x 1 \"s\" + ;").unwrap();

        assert_eq!(tokens[0].to_string(), "KEYWORD(if)");
        assert_eq!(tokens[1].to_string(), "IDENTIFIER(x)");
        assert_eq!(tokens[2].to_string(), "INTEGER(1)");
        assert_eq!(tokens[3].to_string(), "STRING(\"s\")");
        assert_eq!(tokens[4].to_string(), "OPERATOR(+)");
        assert_eq!(tokens[5].to_string(), "SEMICOLON(;)");
        assert_eq!(tokens[6].to_string(), "EOF");
    }
}
