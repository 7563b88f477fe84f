use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::error::Reporter;
use crate::literal::Literal;
use crate::token::{Token, Type};

/// Turns source text into tokens in a single pass with one character of
/// lookahead (two for the fractional part of a number). Lexical errors are
/// reported through the shared reporter and scanning continues, so one run
/// surfaces every bad character at once.
pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    reporter: &'a mut Reporter,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, reporter: &'a mut Reporter) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: vec![],
            start: 0,
            current: 0,
            line: 1,
            reporter,
        }
    }

    /// Scans the whole source and returns the tokens, terminated by exactly
    /// one `EOF` on the final line.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));
        self.tokens
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        self.current += 1;
        self.chars.next().unwrap_or('\0')
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Returns the character after the next one without consuming either.
    fn peek_next(&mut self) -> char {
        self.chars.peek_nth(1).copied().unwrap_or('\0')
    }

    /// Consumes the next character only if it matches.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The source slice of the token being scanned. Indices are character
    /// offsets, so multi-byte text inside strings passes through opaquely.
    fn lexeme(&self) -> String {
        self.source.substring(self.start, self.current).to_string()
    }

    fn add_token(&mut self, r#type: Type) {
        self.add_literal_token(r#type, None);
    }

    fn add_literal_token(&mut self, r#type: Type, literal: Option<Literal>) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(Type::LeftParen),
            ')' => self.add_token(Type::RightParen),
            '{' => self.add_token(Type::LeftBrace),
            '}' => self.add_token(Type::RightBrace),
            ',' => self.add_token(Type::Comma),
            '.' => self.add_token(Type::Dot),
            '-' => self.add_token(Type::Minus),
            '+' => self.add_token(Type::Plus),
            ';' => self.add_token(Type::Semicolon),
            '*' => self.add_token(Type::Star),

            '!' => {
                let r#type = if self.match_next('=') { Type::BangEqual } else { Type::Bang };
                self.add_token(r#type);
            },
            '=' => {
                let r#type = if self.match_next('=') { Type::EqualEqual } else { Type::Equal };
                self.add_token(r#type);
            },
            '<' => {
                let r#type = if self.match_next('=') { Type::LessEqual } else { Type::Less };
                self.add_token(r#type);
            },
            '>' => {
                let r#type = if self.match_next('=') { Type::GreaterEqual } else { Type::Greater };
                self.add_token(r#type);
            },

            '/' => {
                if self.match_next('/') {
                    // A comment runs to the end of the line.
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash);
                }
            },

            ' ' | '\r' | '\t' => (),

            '\n' => self.line += 1,

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.reporter.error(self.line, "Unexpected character."),
        }
    }

    /// Handles a string literal. Strings may span lines.
    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.reporter.error(self.line, "Unterminated string.");
            return;
        }

        self.advance(); // The closing quote.

        // The literal value excludes the surrounding quotes.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_literal_token(Type::String, Some(Literal::String(value)));
    }

    /// Handles a number literal: digits with an optional single `.` followed
    /// by more digits. A trailing dot is not consumed, so `123.` scans as a
    /// number then a dot.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // Consume the dot.

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value: f64 = self.lexeme().parse().unwrap();
        self.add_literal_token(Type::Number, Some(Literal::Number(value)));
    }

    /// Handles an identifier or a keyword. Identifier characters are ASCII
    /// letters, digits and underscores only.
    fn identifier(&mut self) {
        while matches!(self.peek(), c if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let r#type = match self.lexeme().as_str() {
            "and"    => Type::And,
            "class"  => Type::Class,
            "else"   => Type::Else,
            "false"  => Type::False,
            "for"    => Type::For,
            "fun"    => Type::Fun,
            "if"     => Type::If,
            "nil"    => Type::Nil,
            "or"     => Type::Or,
            "print"  => Type::Print,
            "return" => Type::Return,
            "super"  => Type::Super,
            "this"   => Type::This,
            "true"   => Type::True,
            "var"    => Type::Var,
            "while"  => Type::While,
            _        => Type::Identifier,
        };

        self.add_token(r#type);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        assert!(!reporter.had_error, "unexpected scan error in {source:?}");
        tokens
    }

    fn types(source: &str) -> Vec<Type> {
        scan(source).iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            types("(){},.-+;/*"),
            vec![
                Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
                Type::Comma, Type::Dot, Type::Minus, Type::Plus, Type::Semicolon,
                Type::Slash, Type::Star, Type::EOF,
            ],
        );
    }

    #[test]
    fn one_or_two_char_operators() {
        assert_eq!(
            types("! != = == < <= > >="),
            vec![
                Type::Bang, Type::BangEqual, Type::Equal, Type::EqualEqual,
                Type::Less, Type::LessEqual, Type::Greater, Type::GreaterEqual,
                Type::EOF,
            ],
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            types("var x = nil; fun_ny"),
            vec![Type::Var, Type::Identifier, Type::Equal, Type::Nil, Type::Semicolon, Type::Identifier, Type::EOF],
        );
    }

    #[test]
    fn number_literals() {
        let tokens = scan("12 3.5 123.");
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.5)));
        // The trailing dot is its own token.
        assert_eq!(tokens[2].literal, Some(Literal::Number(123.0)));
        assert_eq!(tokens[3].r#type, Type::Dot);
    }

    #[test]
    fn string_literal_excludes_quotes() {
        let tokens = scan("\"hi there\"");
        assert_eq!(tokens[0].literal, Some(Literal::from("hi there")));
        assert_eq!(tokens[0].lexeme, "\"hi there\"");
    }

    #[test]
    fn multiline_string_counts_lines() {
        let tokens = scan("\"a\nb\"\nx");
        assert_eq!(tokens[0].literal, Some(Literal::from("a\nb")));
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(types("1 // the rest is ignored\n2"), vec![Type::Number, Type::Number, Type::EOF]);
    }

    #[test]
    fn ends_with_single_eof() {
        let tokens = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].r#type, Type::EOF);
    }

    #[test]
    fn unexpected_character_is_reported() {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new("1 @ 2", &mut reporter).scan_tokens();
        assert!(reporter.had_error);
        // Scanning continues past the bad character.
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let mut reporter = Reporter::new();
        Scanner::new("\"oops", &mut reporter).scan_tokens();
        assert!(reporter.had_error);
    }
}
