use log::debug;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] {message}")]
pub struct ScannerError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug)]
pub struct Scanner {
    source_chars: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<ScannerError>,
    start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            source_chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scan the whole source. The token list always ends with `EOF`, even when
    /// errors were found.
    pub fn scan_tokens(&mut self) -> (Vec<Token>, Vec<ScannerError>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(TokenType::EOF, "", None, self.line));
        debug!("scanned {} tokens with {} errors", self.tokens.len(), self.errors.len());

        // Take our temporary buffers out. They will be replaced by the default()
        // value for the vector
        (std::mem::take(&mut self.tokens), std::mem::take(&mut self.errors))
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source_chars.len()
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                let token_type =
                    if self.match_next('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.add_token(token_type);
            }
            '=' => {
                let token_type =
                    if self.match_next('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.add_token(token_type);
            }
            '<' => {
                let token_type =
                    if self.match_next('=') { TokenType::LessEqual } else { TokenType::Less };
                self.add_token(token_type);
            }
            '>' => {
                let token_type =
                    if self.match_next('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.add_token(token_type);
            }
            '/' => {
                if self.match_next('/') {
                    // Go until end of the commented line
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
            }
            '"' => self.string(),
            '0'..='9' => self.number(),
            c if is_alpha(c) => self.identifier(),
            _ => self.error("Unexpected character."),
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(ScannerError { line: self.line, message: msg.to_owned() });
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += 1;
        c
    }

    fn add_token(&mut self, token_type: TokenType) {
        self.add_token_with_literal(token_type, None);
    }

    fn source_substring(&self, start: usize, end: usize) -> String {
        self.source_chars[start..end].iter().collect()
    }

    fn add_token_with_literal(&mut self, token_type: TokenType, literal_value: Option<Object>) {
        let text = self.source_substring(self.start, self.current);
        let token = Token::new(token_type, &text, literal_value, self.line);
        self.tokens.push(token);
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source_chars[self.current] != expected {
            return false;
        }

        self.current += 1;
        true
    }

    fn peek(&self) -> char {
        *self.source_chars.get(self.current).unwrap_or(&'\0')
    }

    fn peek_next(&self) -> char {
        *self.source_chars.get(self.current + 1).unwrap_or(&'\0')
    }

    /// Skip a `/* ... */` comment. The opening `/*` is already consumed.
    /// Comments nest, so every inner `/*` needs its own `*/`.
    fn block_comment(&mut self) {
        let mut depth = 1;

        while depth > 0 {
            if self.is_at_end() {
                self.error("Unterminated multiline comment.");
                return;
            }

            match self.advance() {
                '*' if self.match_next('/') => depth -= 1,
                '/' if self.match_next('*') => depth += 1,
                '\n' => self.line += 1,
                _ => {}
            }
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error("Unterminated string.");
            return;
        }

        // The closing "
        self.advance();

        // Skip the quote marks
        let text = self.source_substring(self.start + 1, self.current - 1);
        self.add_token_with_literal(TokenType::StringLiteral, Some(Object::String(text)));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A trailing '.' without digits is not part of the number
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            // Consume '.'
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Digits with an optional fraction always parse as f64
        let text = self.source_substring(self.start, self.current);
        let value = text.parse::<f64>().unwrap_or_default();
        self.add_token_with_literal(TokenType::Number, Some(Object::Number(value)));
    }

    fn identifier(&mut self) {
        while is_alpha_numeric(self.peek()) {
            self.advance();
        }

        let text = self.source_substring(self.start, self.current);
        let token_type = get_keyword(&text).unwrap_or(TokenType::Identifier);
        self.add_token(token_type);
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

fn get_keyword(text: &str) -> Option<TokenType> {
    match text {
        "and" => Some(TokenType::And),
        "class" => Some(TokenType::Class),
        "else" => Some(TokenType::Else),
        "false" => Some(TokenType::False),
        "for" => Some(TokenType::For),
        "fun" => Some(TokenType::Fun),
        "if" => Some(TokenType::If),
        "nil" => Some(TokenType::Nil),
        "or" => Some(TokenType::Or),
        "print" => Some(TokenType::Print),
        "return" => Some(TokenType::Return),
        "super" => Some(TokenType::Super),
        "this" => Some(TokenType::This),
        "true" => Some(TokenType::True),
        "var" => Some(TokenType::Var),
        "while" => Some(TokenType::While),
        _ => None,
    }
}
