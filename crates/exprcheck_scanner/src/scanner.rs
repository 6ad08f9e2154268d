//! The scanner converts expression and declaration source text into tokens.
//!
//! Positions are character offsets: the text is held as a `Vec<char>` so that
//! every token boundary is also a valid diagnostic offset.

use crate::char_codes::*;
use exprcheck_ast::syntax_kind::SyntaxKind;
use exprcheck_core::text::TextSpan;
use exprcheck_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
}

pub struct Scanner {
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: SyntaxKind,
    /// Cooked text of the current token (identifier name, literal value).
    token_value: String,
    preceding_line_break: bool,
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Length of the source text in characters.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Look ahead: save state, call f, restore state and return the result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let diagnostics_len = self.diagnostics.len();
        let result = f(self);
        self.restore_state(state);
        self.truncate_diagnostics(diagnostics_len);
        result
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Start of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// End of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.preceding_line_break = state.preceding_line_break;
    }

    fn truncate_diagnostics(&mut self, len: usize) {
        if self.diagnostics.len() > len {
            let kept: Vec<Diagnostic> = self
                .diagnostics
                .diagnostics()
                .iter()
                .take(len)
                .cloned()
                .collect();
            self.diagnostics = DiagnosticCollection::new();
            for diag in kept {
                self.diagnostics.add(diag);
            }
        }
    }

    fn error(&mut self, message: &DiagnosticMessage) {
        let span = TextSpan::from_bounds(self.token_start as u32, self.pos as u32);
        self.diagnostics.add(Diagnostic::new(span, message, &[]));
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    /// Skip whitespace and comments, remembering whether a line break was seen.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                c if is_line_break(c) => {
                    self.preceding_line_break = true;
                    self.pos += 1;
                }
                c if is_white_space_single_line(c) => {
                    self.pos += 1;
                }
                '/' if self.char_at(1) == Some('/') => {
                    self.pos += 2;
                    while let Some(c) = self.current_char() {
                        if is_line_break(c) {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                '/' if self.char_at(1) == Some('*') => {
                    self.pos += 2;
                    while !self.is_eof() {
                        if self.text[self.pos] == '*' && self.char_at(1) == Some('/') {
                            self.pos += 2;
                            break;
                        }
                        if is_line_break(self.text[self.pos]) {
                            self.preceding_line_break = true;
                        }
                        self.pos += 1;
                    }
                }
                _ => return,
            }
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.token_value.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            ':' => self.single(SyntaxKind::ColonToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '^' => self.single(SyntaxKind::CaretToken),
            '/' => self.single(SyntaxKind::SlashToken),
            '%' => self.single(SyntaxKind::PercentToken),
            '+' => self.single(SyntaxKind::PlusToken),
            '-' => self.single(SyntaxKind::MinusToken),

            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '*' => self.scan_asterisk(),
            '&' => self.scan_doubled('&', SyntaxKind::AmpersandToken, SyntaxKind::AmpersandAmpersandToken),
            '|' => self.scan_doubled('|', SyntaxKind::BarToken, SyntaxKind::BarBarToken),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => self.scan_template_literal(),

            '0'..='9' => self.scan_number(),

            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                self.pos += 1;
                self.error(&messages::INVALID_CHARACTER);
                SyntaxKind::Unknown
            }
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn scan_doubled(&mut self, ch: char, single: SyntaxKind, double: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == Some(ch) {
            self.pos += 2;
            double
        } else {
            self.pos += 1;
            single
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.char_at(1).is_some_and(is_digit) {
            self.scan_number()
        } else {
            self.pos += 1;
            SyntaxKind::DotToken
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('?') {
            self.pos += 2;
            SyntaxKind::QuestionQuestionToken
        } else {
            self.pos += 1;
            SyntaxKind::QuestionToken
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match self.char_at(1) {
            Some('<') => {
                self.pos += 2;
                SyntaxKind::LessThanLessThanToken
            }
            Some('=') => {
                self.pos += 2;
                SyntaxKind::LessThanEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::LessThanToken
            }
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('>'), Some('>')) => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            }
            (Some('>'), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanToken
            }
            (Some('='), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::GreaterThanToken
            }
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::EqualsEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::EqualsEqualsToken
            }
        } else if self.char_at(1) == Some('>') {
            self.pos += 2;
            SyntaxKind::EqualsGreaterThanToken
        } else {
            self.pos += 1;
            SyntaxKind::EqualsToken
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::ExclamationEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::ExclamationEqualsToken
            }
        } else {
            self.pos += 1;
            SyntaxKind::ExclamationToken
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        self.scan_doubled('*', SyntaxKind::AsteriskToken, SyntaxKind::AsteriskAsteriskToken)
    }

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1; // opening quote
        let mut result = String::new();
        loop {
            let Some(ch) = self.current_char() else {
                self.error(&messages::UNTERMINATED_STRING_LITERAL);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.error(&messages::UNTERMINATED_STRING_LITERAL);
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                if let Some(escaped) = self.current_char() {
                    result.push(cook_escape(escaped));
                    self.pos += 1;
                }
                continue;
            }
            result.push(ch);
            self.pos += 1;
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    /// Only templates without substitutions are supported; `${` is kept as
    /// literal text.
    fn scan_template_literal(&mut self) -> SyntaxKind {
        self.pos += 1; // backtick
        let mut result = String::new();
        loop {
            let Some(ch) = self.current_char() else {
                self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL);
                break;
            };
            self.pos += 1;
            match ch {
                '`' => break,
                '\\' => {
                    if let Some(escaped) = self.current_char() {
                        result.push(cook_escape(escaped));
                        self.pos += 1;
                    }
                }
                _ => result.push(ch),
            }
        }
        self.token_value = result;
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    fn scan_digits(&mut self) {
        while let Some(ch) = self.current_char() {
            if is_digit(ch) || ch == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;

        if self.text[self.pos] == '0' && matches!(self.char_at(1), Some('x') | Some('X')) {
            self.pos += 2;
            while self.current_char().is_some_and(is_hex_digit) {
                self.pos += 1;
            }
            self.token_value = self.chars_to_string(start, self.pos);
            return SyntaxKind::NumericLiteral;
        }

        self.scan_digits();
        if self.current_char() == Some('.') {
            self.pos += 1;
            self.scan_digits();
        }
        if let Some('e') | Some('E') = self.current_char() {
            self.pos += 1;
            if let Some('+') | Some('-') = self.current_char() {
                self.pos += 1;
            }
            self.scan_digits();
        }

        self.token_value = self.chars_to_string(start, self.pos);
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        while self.current_char().is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let text = self.chars_to_string(start, self.pos);
        let kind = SyntaxKind::from_keyword(&text).unwrap_or(SyntaxKind::Identifier);
        self.token_value = text;
        kind
    }
}

fn cook_escape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}
