//! Lexer (tokenizer) for toy language source
//!
//! Converts a character stream into [`Token`]s one at a time, on demand from
//! the parser. The lexer never holds more than one unconsumed raw character,
//! so it works the same over an in-memory string and over stdin.
//!
//! `//` comments run to the end of the line and are fully transparent: the
//! lexer simply carries on to the next real token.

use super::ast::SourceLocation;
use std::fmt;
use std::iter::Peekable;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Eof,
    /// Lexical error; the payload says what went wrong
    Error(String),

    Variable(String),
    Integer(i64),
    /// Quoted text, including the delimiting quotes
    Text(String),
    /// `:=`
    Assign,

    // Reserved words
    Func,
    Print,
    Return,
    Continue,
    If,
    Then,
    Else,
    Fi,
    While,
    Do,
    Done,
    Var,

    /// Any other single character: operators and punctuation
    Char(char),
}

impl Token {
    /// Look up a reserved word
    pub fn keyword(word: &str) -> Option<Token> {
        let token = match word {
            "FUNC" => Token::Func,
            "PRINT" => Token::Print,
            "RETURN" => Token::Return,
            "CONTINUE" => Token::Continue,
            "IF" => Token::If,
            "THEN" => Token::Then,
            "ELSE" => Token::Else,
            "FI" => Token::Fi,
            "WHILE" => Token::While,
            "DO" => Token::Do,
            "DONE" => Token::Done,
            "VAR" => Token::Var,
            _ => return None,
        };
        Some(token)
    }

    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Token::Char(ch) if *ch == c)
    }

    /// Body of a text token with the surrounding quotes removed
    pub fn text_body(literal: &str) -> &str {
        let body = literal.strip_prefix('"').unwrap_or(literal);
        body.strip_suffix('"').unwrap_or(body)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Error(msg) => write!(f, "lexical error ({})", msg),
            Token::Variable(name) => write!(f, "identifier '{}'", name),
            Token::Integer(n) => write!(f, "integer {}", n),
            Token::Text(text) => write!(f, "text {}", text),
            Token::Assign => write!(f, "':='"),
            Token::Func => write!(f, "'FUNC'"),
            Token::Print => write!(f, "'PRINT'"),
            Token::Return => write!(f, "'RETURN'"),
            Token::Continue => write!(f, "'CONTINUE'"),
            Token::If => write!(f, "'IF'"),
            Token::Then => write!(f, "'THEN'"),
            Token::Else => write!(f, "'ELSE'"),
            Token::Fi => write!(f, "'FI'"),
            Token::While => write!(f, "'WHILE'"),
            Token::Do => write!(f, "'DO'"),
            Token::Done => write!(f, "'DONE'"),
            Token::Var => write!(f, "'VAR'"),
            Token::Char(c) => write!(f, "'{}'", c),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Streaming lexer
pub struct Lexer<'a> {
    input: Peekable<Box<dyn Iterator<Item = char> + 'a>>,
    line: usize,
    column: usize,
    /// Location of the first character of the last token returned
    token_location: SourceLocation,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        Self::from_chars(input.chars())
    }

    /// Create a lexer over any character stream (stdin, a file reader, ...)
    pub fn from_chars(chars: impl Iterator<Item = char> + 'a) -> Self {
        let boxed: Box<dyn Iterator<Item = char> + 'a> = Box::new(chars);
        Self {
            input: boxed.peekable(),
            line: 1,
            column: 1,
            token_location: SourceLocation::new(1, 1),
        }
    }

    /// Location of the token most recently returned by [`Lexer::next_token`]
    pub fn token_location(&self) -> SourceLocation {
        self.token_location
    }

    /// Drain the stream, pairing each token with its location.
    ///
    /// The final element is always [`Token::Eof`]. A lexical error is
    /// returned as `Err` instead of an `Error` token.
    pub fn tokenize(&mut self) -> Result<Vec<(Token, SourceLocation)>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let location = self.token_location;
            match token {
                Token::Error(message) => return Err(LexError { message, location }),
                Token::Eof => {
                    tokens.push((Token::Eof, location));
                    break;
                }
                token => tokens.push((token, location)),
            }
        }

        Ok(tokens)
    }

    /// Scan and return the next token
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            self.token_location = self.current_location();

            let Some(ch) = self.advance() else {
                return Token::Eof;
            };

            return match ch {
                'a'..='z' | 'A'..='Z' => self.identifier_or_keyword(ch),
                '0'..='9' => self.integer_literal(ch),
                '"' => self.text_literal(),
                '/' if self.peek() == Some('/') => {
                    self.skip_line_comment();
                    continue;
                }
                ':' if self.peek() == Some('=') => {
                    self.advance();
                    Token::Assign
                }
                _ => Token::Char(ch),
            };
        }
    }

    /// Parse identifier or keyword: `[A-Za-z][A-Za-z0-9]*`
    fn identifier_or_keyword(&mut self, first_char: char) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::keyword(&ident).unwrap_or(Token::Variable(ident))
    }

    /// Parse integer literal: `[0-9]+`
    fn integer_literal(&mut self, first_digit: char) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match digits.parse::<i64>() {
            Ok(value) => Token::Integer(value),
            Err(_) => Token::Error(format!("integer literal out of range: {}", digits)),
        }
    }

    /// Parse quoted text; a fresh buffer per literal, quotes included
    fn text_literal(&mut self) -> Token {
        let mut text = String::from('"');

        while let Some(ch) = self.advance() {
            text.push(ch);
            if ch == '"' {
                return Token::Text(text);
            }
        }

        Token::Error("unterminated text literal".to_string())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Skip the rest of a `//` comment, the newline included
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' || ch == '\r' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.input.next()?;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_function_header() {
        let tokens = tokens("FUNC main(a, b) { RETURN 0 }");

        assert_eq!(tokens[0], Token::Func);
        assert!(matches!(tokens[1], Token::Variable(ref s) if s == "main"));
        assert!(tokens[2].is_char('('));
        assert!(matches!(tokens[3], Token::Variable(ref s) if s == "a"));
        assert!(tokens[4].is_char(','));
        assert!(matches!(tokens[5], Token::Variable(ref s) if s == "b"));
        assert!(tokens[6].is_char(')'));
        assert!(tokens[7].is_char('{'));
        assert_eq!(tokens[8], Token::Return);
        assert_eq!(tokens[9], Token::Integer(0));
        assert!(tokens[10].is_char('}'));
        assert_eq!(tokens[11], Token::Eof);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let tokens = tokens("WHILE while DONE Done");

        assert_eq!(tokens[0], Token::While);
        assert!(matches!(tokens[1], Token::Variable(ref s) if s == "while"));
        assert_eq!(tokens[2], Token::Done);
        assert!(matches!(tokens[3], Token::Variable(ref s) if s == "Done"));
    }

    #[test]
    fn test_assign_and_lone_colon() {
        let tokens = tokens("x := 1 : y");

        assert_eq!(tokens[1], Token::Assign);
        assert_eq!(tokens[2], Token::Integer(1));
        assert!(tokens[3].is_char(':'));
        assert!(matches!(tokens[4], Token::Variable(ref s) if s == "y"));
    }

    #[test]
    fn test_comments() {
        let tokens = tokens("a +// comment\n b // trailing");

        assert!(matches!(tokens[0], Token::Variable(ref s) if s == "a"));
        assert!(tokens[1].is_char('+'));
        assert!(matches!(tokens[2], Token::Variable(ref s) if s == "b"));
        assert_eq!(tokens[3], Token::Eof);
    }

    #[test]
    fn test_division_is_not_a_comment() {
        let tokens = tokens("a / b");

        assert!(tokens[1].is_char('/'));
        assert!(matches!(tokens[2], Token::Variable(ref s) if s == "b"));
    }

    #[test]
    fn test_text_literals_do_not_accumulate() {
        let tokens = tokens(r#""one" "two""#);

        assert_eq!(tokens[0], Token::Text("\"one\"".to_string()));
        assert_eq!(tokens[1], Token::Text("\"two\"".to_string()));
        assert_eq!(Token::text_body("\"two\""), "two");
    }

    #[test]
    fn test_unterminated_text() {
        let mut lexer = Lexer::new("PRINT \"oops");
        let err = lexer.tokenize().unwrap_err();

        assert_eq!(err.message, "unterminated text literal");
        assert_eq!(err.location, SourceLocation::new(1, 7));
    }

    #[test]
    fn test_integer_overflow() {
        let mut lexer = Lexer::new("99999999999999999999");
        assert!(matches!(lexer.next_token(), Token::Error(_)));
    }

    #[test]
    fn test_locations() {
        let mut lexer = Lexer::new("a\n  bc");
        lexer.next_token();
        assert_eq!(lexer.token_location(), SourceLocation::new(1, 1));
        lexer.next_token();
        assert_eq!(lexer.token_location(), SourceLocation::new(2, 3));
    }
}
