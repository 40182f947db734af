//! The dialect-governed tokenizer.
//!
//! Lexing proceeds in two modes depending on the leading character: a
//! handful of structural forms (`(` `)` `"`, bare quote, `#'`, `#|…|#`)
//! are recognized by looking exactly one character past themselves,
//! because what follows is either trivia or a *separate* token, never
//! part of the same literal. Everything else is captured as a maximal
//! run of non-delimiter characters and then classified against the
//! numeric precedence order, falling back to `Symbol`.

use num_bigint::BigInt;
use num_traits::Num;

use crate::char as sxchar;
use crate::dialect::DialectConfig;
use crate::error::{Error, Result};
use crate::position::Position;
use crate::rational::{make_rational, ExactNumber};
use crate::streamer::Streamer;
use crate::token::{Token, TokenKind};

const DELIMITERS: &[char] = &['(', ')', '"'];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c) || c.is_whitespace()
}

pub struct Lexer<S: Streamer> {
    stream: S,
    peeked: Option<Token>,
}

impl<S: Streamer> Lexer<S> {
    pub fn new(stream: S) -> Self {
        Lexer { stream, peeked: None }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self, dialect: &DialectConfig) -> Result<&Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex(dialect)?);
        }
        Ok(self.peeked.as_ref().unwrap())
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self, dialect: &DialectConfig) -> Result<Token> {
        if let Some(t) = self.peeked.take() {
            return Ok(t);
        }
        self.lex(dialect)
    }

    fn skip_ws_and_line_comments(&mut self, dialect: &DialectConfig) {
        loop {
            match self.stream.lookahead_char() {
                Some(c) if c.is_whitespace() => {
                    self.stream.read();
                }
                Some(';') if dialect.enable_line_comment => {
                    while let Some(c) = self.stream.lookahead_char() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.stream.read();
                    }
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment_body(&mut self) -> Result<()> {
        let start = self.stream.position();
        loop {
            match self.stream.read() {
                None => return Err(Error::UnexpectedEof { at: start }),
                Some('|') if self.stream.lookahead_char() == Some('#') => {
                    self.stream.read();
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    fn lex(&mut self, dialect: &DialectConfig) -> Result<Token> {
        loop {
            self.skip_ws_and_line_comments(dialect);
            let start = self.stream.lookahead_position();
            let c0 = match self.stream.lookahead_char() {
                None => return Ok(Token::new(TokenKind::Eof, start, start)),
                Some(c) => c,
            };

            if c0 == '(' {
                self.stream.read();
                return Ok(Token::new(TokenKind::LPar, start, self.stream.position()));
            }
            if c0 == ')' {
                self.stream.read();
                return Ok(Token::new(TokenKind::RPar, start, self.stream.position()));
            }
            if c0 == '"' {
                return self.lex_string(start, dialect);
            }
            if c0 == '\'' && dialect.enable_quote {
                self.stream.read();
                return Ok(self.finish_prefix_or_symbol(start, "'", TokenKind::Quote));
            }
            if c0 == '#' {
                self.stream.read();
                if dialect.enable_block_comment && self.stream.lookahead_char() == Some('|') {
                    self.stream.read();
                    self.skip_block_comment_body()?;
                    continue;
                }
                if dialect.enable_func_ref && self.stream.lookahead_char() == Some('\'') {
                    self.stream.read();
                    return Ok(self.finish_prefix_or_symbol(start, "#'", TokenKind::FuncRef));
                }
                let mut text = String::from('#');
                text.push_str(&self.scan_run());
                return self.classify_and_wrap(text, start, dialect);
            }

            let text = self.scan_run();
            return self.classify_and_wrap(text, start, dialect);
        }
    }

    /// After consuming a structural prefix (`'` or `#'`), decides between
    /// the prefix token and the bare-symbol fallback based on whether a
    /// non-whitespace character follows.
    fn finish_prefix_or_symbol(&self, start: Position, literal: &str, prefix_kind: TokenKind) -> Token {
        match self.stream.lookahead_char() {
            Some(c) if !c.is_whitespace() => Token::new(prefix_kind, start, self.stream.position()),
            _ => Token::new(TokenKind::Symbol(literal.to_string()), start, self.stream.position()),
        }
    }

    fn scan_run(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.stream.lookahead_char() {
            if is_delimiter(c) {
                break;
            }
            out.push(c);
            self.stream.read();
        }
        out
    }

    fn classify_and_wrap(&mut self, text: String, start: Position, dialect: &DialectConfig) -> Result<Token> {
        if text == "#\\" && dialect.enable_char {
            return self.lex_forced_char(start);
        }
        if (text == "#C" || text == "#c") && dialect.enable_complex {
            if self.lookahead_skip_ws_for_paren() {
                return Ok(Token::new(TokenKind::ComplexPrefix, start, self.stream.position()));
            }
            return Ok(Token::new(TokenKind::Symbol(text), start, self.stream.position()));
        }
        let kind = self.classify(&text, dialect)?;
        Ok(Token::new(kind, start, self.stream.position()))
    }

    /// After capturing `#C`/`#c`, consumes any intervening whitespace and
    /// reports whether a `(` follows. Consuming the whitespace here is
    /// harmless even on a non-match: leading whitespace before the next
    /// token is always skipped regardless of how this call resolves.
    fn lookahead_skip_ws_for_paren(&mut self) -> bool {
        loop {
            match self.stream.lookahead_char() {
                Some(c) if c.is_whitespace() => {
                    self.stream.read();
                }
                Some('(') => return true,
                _ => return false,
            }
        }
    }

    fn lex_forced_char(&mut self, start: Position) -> Result<Token> {
        match self.stream.read() {
            Some(c) => Ok(Token::new(TokenKind::Char(c), start, self.stream.position())),
            None => Err(Error::UnexpectedEof { at: self.stream.position() }),
        }
    }

    fn lex_string(&mut self, start: Position, dialect: &DialectConfig) -> Result<Token> {
        self.stream.read(); // opening quote
        let mut out = String::new();
        loop {
            match self.stream.read() {
                None => return Err(Error::UnexpectedEof { at: self.stream.position() }),
                Some('"') => break,
                Some('\\') if dialect.enable_escape => out.push(self.lex_escape()?),
                Some(c) => out.push(c),
            }
        }
        Ok(Token::new(TokenKind::String(out), start, self.stream.position()))
    }

    fn lex_escape(&mut self) -> Result<char> {
        let at = self.stream.position();
        let c = self.stream.read().ok_or(Error::UnexpectedEof { at })?;
        let simple = match c {
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'e' => Some('\u{1B}'),
            'f' => Some('\u{0C}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{0B}'),
            _ => None,
        };
        if let Some(c) = simple {
            return Ok(c);
        }
        if c.is_digit(8) {
            let mut digits = String::from(c);
            for _ in 0..2 {
                if let Some(d) = self.stream.lookahead_char() {
                    if d.is_digit(8) {
                        digits.push(d);
                        self.stream.read();
                        continue;
                    }
                }
                break;
            }
            let code = u32::from_str_radix(&digits, 8).unwrap_or(0);
            return char::from_u32(code)
                .ok_or_else(|| Error::Construction(format!("invalid octal escape \\{digits}")));
        }
        if c == 'x' || c == 'u' || c == 'U' {
            let max_digits = match c {
                'x' => 2,
                'u' => 4,
                _ => 8,
            };
            let mut digits = String::new();
            for _ in 0..max_digits {
                match self.stream.lookahead_char() {
                    Some(d) if d.is_ascii_hexdigit() => {
                        digits.push(d);
                        self.stream.read();
                    }
                    _ => break,
                }
            }
            if digits.is_empty() {
                return Ok(c);
            }
            let code = u32::from_str_radix(&digits, 16)
                .map_err(|_| Error::Construction(format!("invalid \\{c} escape")))?;
            return char::from_u32(code)
                .ok_or_else(|| Error::Construction(format!("invalid \\{c} escape: {code:#x}")));
        }
        Ok(c)
    }

    fn classify(&mut self, text: &str, dialect: &DialectConfig) -> Result<TokenKind> {
        if text == "." {
            return Ok(TokenKind::Dot);
        }
        if let Some(n) = parse_integer(text) {
            return Ok(TokenKind::Int(n));
        }
        if let Some(f) = parse_float(text) {
            return Ok(TokenKind::Float(f));
        }
        if dialect.enable_bin || dialect.enable_oct || dialect.enable_hex {
            if let Some(kind) = parse_based(text, dialect) {
                return Ok(kind);
            }
        }
        if dialect.enable_radix {
            if let Some(kind) = parse_radix(text) {
                return Ok(kind);
            }
        }
        if dialect.enable_frac {
            if let Some(kind) = parse_frac(text)? {
                return Ok(kind);
            }
        }
        if text.starts_with("#\\") && dialect.enable_char {
            let remainder = &text[2..];
            return Ok(TokenKind::Char(classify_char_body(remainder)?));
        }
        if dialect.enable_array {
            if text == "#" && self.stream.lookahead_char() == Some('(') {
                return Ok(TokenKind::ArrayPrefix(1));
            }
            if let Some(dim) = parse_array_dim(text) {
                if self.stream.lookahead_char() == Some('(') {
                    return Ok(TokenKind::ArrayPrefix(dim));
                }
            }
        }
        if text.starts_with('#') {
            log::debug!("'{text}' did not match any enabled # syntax, falling back to Symbol");
        }
        Ok(TokenKind::Symbol(text.to_string()))
    }
}

fn classify_char_body(remainder: &str) -> Result<char> {
    if remainder.chars().count() == 1 {
        return Ok(remainder.chars().next().unwrap());
    }
    let lead = remainder.chars().next().unwrap_or(' ');
    if matches!(lead, 'u' | 'x' | 'U') && remainder[1..].chars().all(|c| c.is_ascii_hexdigit()) {
        return sxchar::make_hex_char(&remainder[1..]).map(|c| c.value);
    }
    sxchar::make_named_char(remainder).map(|c| c.value)
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    BigInt::from_str_radix(text, 10).ok()
}

fn parse_float(text: &str) -> Option<f64> {
    let has_marker = text.chars().any(|c| matches!(c, 'd' | 'D' | 'e' | 'E' | 'f' | 'F' | 's' | 'S'));
    let has_dot = text.contains('.');
    if !has_marker && !has_dot {
        return None;
    }
    if !text.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'd' | 'D' | 'e' | 'E' | 'f' | 'F' | 's' | 'S')) {
        return None;
    }
    let normalized: String = text
        .chars()
        .map(|c| match c {
            'd' | 'D' | 'f' | 'F' | 's' | 'S' | 'E' => 'e',
            other => other,
        })
        .collect();
    normalized.parse::<f64>().ok()
}

fn parse_based(text: &str, dialect: &DialectConfig) -> Option<TokenKind> {
    let (sign, rest) = split_sign(text);
    let mut chars = rest.char_indices();
    if chars.next().map(|(_, c)| c) != Some('#') {
        return None;
    }
    let (tag_idx, tag) = chars.next().map(|(i, c)| (i, c.to_ascii_lowercase()))?;
    let (radix, enabled) = match tag {
        'b' => (2u32, dialect.enable_bin),
        'o' => (8u32, dialect.enable_oct),
        'x' => (16u32, dialect.enable_hex),
        _ => return None,
    };
    if !enabled {
        return None;
    }
    let digits = &rest[tag_idx + tag.len_utf8()..];
    parse_digits_maybe_rational(digits, radix, sign)
}

fn parse_radix(text: &str) -> Option<TokenKind> {
    let (sign, rest) = split_sign(text);
    let rest = rest.strip_prefix('#')?;
    let digit_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digit_end == 0 {
        return None;
    }
    let base: u32 = rest[..digit_end].parse().ok()?;
    if !(2..=36).contains(&base) {
        // Bases above the standard 0-9a-z alphabet have no digit
        // representation to parse; per the parse-failure rule this just
        // falls back to being classified as a plain symbol.
        return None;
    }
    let tag = rest[digit_end..].chars().next()?;
    if !matches!(tag, 'r' | 'R') {
        return None;
    }
    let digits = &rest[digit_end + tag.len_utf8()..];
    parse_digits_maybe_rational(digits, base, sign)
}

fn split_sign(text: &str) -> (Option<char>, &str) {
    match text.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), &text[1..]),
        _ => (None, text),
    }
}

fn parse_digits_maybe_rational(digits: &str, radix: u32, sign: Option<char>) -> Option<TokenKind> {
    let negate = sign == Some('-');
    if let Some((n, d)) = digits.split_once('/') {
        let numer = BigInt::from_str_radix(n, radix).ok()?;
        let denom = BigInt::from_str_radix(d, radix).ok()?;
        let numer = if negate { -numer } else { numer };
        match make_rational(numer, denom).ok()? {
            ExactNumber::Int(i) => Some(TokenKind::Int(i)),
            r @ ExactNumber::Rational(_) => Some(TokenKind::Rational(r)),
        }
    } else {
        if digits.is_empty() {
            return None;
        }
        let n = BigInt::from_str_radix(digits, radix).ok()?;
        Some(TokenKind::Int(if negate { -n } else { n }))
    }
}

fn parse_frac(text: &str) -> Result<Option<TokenKind>> {
    let (sign, rest) = split_sign(text);
    let Some((n, d)) = rest.split_once('/') else { return Ok(None) };
    if n.is_empty() || d.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) || !d.bytes().all(|b| b.is_ascii_digit())
    {
        return Ok(None);
    }
    let Ok(numer) = BigInt::from_str_radix(n, 10) else { return Ok(None) };
    let Ok(denom) = BigInt::from_str_radix(d, 10) else { return Ok(None) };
    let numer = if sign == Some('-') { -numer } else { numer };
    match make_rational(numer, denom)? {
        ExactNumber::Int(i) => Ok(Some(TokenKind::Int(i))),
        r @ ExactNumber::Rational(_) => Ok(Some(TokenKind::Rational(r))),
    }
}

fn parse_array_dim(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('#')?;
    let digit_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digit_end == 0 {
        return None;
    }
    let tag = &rest[digit_end..];
    if !tag.eq_ignore_ascii_case("a") {
        return None;
    }
    rest[..digit_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streamer::StringStreamer;

    fn lex_all(text: &str, dialect: &DialectConfig) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(StringStreamer::new(text));
        let mut out = Vec::new();
        loop {
            let t = lexer.next(dialect).unwrap();
            let done = t.kind == TokenKind::Eof;
            out.push(t.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn parens_and_ints() {
        let kinds = lex_all("(1 2 3)", &DialectConfig::default());
        assert_eq!(
            kinds,
            vec![
                TokenKind::LPar,
                TokenKind::Int(BigInt::from(1)),
                TokenKind::Int(BigInt::from(2)),
                TokenKind::Int(BigInt::from(3)),
                TokenKind::RPar,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn quote_before_symbol() {
        let dialect = DialectConfig::new().with_quote(true);
        let kinds = lex_all("'foo", &dialect);
        assert_eq!(kinds, vec![TokenKind::Quote, TokenKind::Symbol("foo".into()), TokenKind::Eof]);
    }

    #[test]
    fn lone_quote_is_symbol() {
        let dialect = DialectConfig::new().with_quote(true);
        let kinds = lex_all("'", &dialect);
        assert_eq!(kinds, vec![TokenKind::Symbol("'".into()), TokenKind::Eof]);
    }

    #[test]
    fn funcref_before_symbol() {
        let dialect = DialectConfig::new().with_func_ref(true);
        let kinds = lex_all("#'foo", &dialect);
        assert_eq!(kinds, vec![TokenKind::FuncRef, TokenKind::Symbol("foo".into()), TokenKind::Eof]);
    }

    #[test]
    fn hex_integer_and_fraction() {
        let dialect = DialectConfig::new().with_hex(true).with_frac(true);
        let kinds = lex_all("#xFE #x1/2", &dialect);
        assert_eq!(kinds[0], TokenKind::Int(BigInt::from(254)));
        assert!(matches!(kinds[1], TokenKind::Rational(_)));
    }

    #[test]
    fn array_prefix_dims() {
        let dialect = DialectConfig::new().with_array(true);
        let kinds = lex_all("#(1) #2A(1)", &dialect);
        assert_eq!(kinds[0], TokenKind::ArrayPrefix(1));
        assert_eq!(kinds[4], TokenKind::ArrayPrefix(2));
    }

    #[test]
    fn dialect_disabled_falls_back_to_symbol() {
        let kinds = lex_all("#xFE", &DialectConfig::default());
        assert_eq!(kinds[0], TokenKind::Symbol("#xFE".into()));
    }

    #[test]
    fn complex_prefix_allows_intervening_whitespace() {
        let dialect = DialectConfig::new().with_complex(true);
        let kinds = lex_all("#C (1 2)", &dialect);
        assert_eq!(kinds[0], TokenKind::ComplexPrefix);
    }

    #[test]
    fn named_char_and_hex_escape() {
        let dialect = DialectConfig::new().with_char(true);
        let kinds = lex_all("#\\Space #\\x41", &dialect);
        assert_eq!(kinds[0], TokenKind::Char(' '));
        assert_eq!(kinds[1], TokenKind::Char('A'));
    }

    #[test]
    fn line_comment_is_skipped() {
        let kinds = lex_all("1 ; comment\n2", &DialectConfig::default());
        assert_eq!(kinds, vec![TokenKind::Int(BigInt::from(1)), TokenKind::Int(BigInt::from(2)), TokenKind::Eof]);
    }

    #[test]
    fn block_comment_is_skipped() {
        let dialect = DialectConfig::new().with_block_comment(true);
        let kinds = lex_all("1 #| skip this |# 2", &dialect);
        assert_eq!(kinds, vec![TokenKind::Int(BigInt::from(1)), TokenKind::Int(BigInt::from(2)), TokenKind::Eof]);
    }
}
