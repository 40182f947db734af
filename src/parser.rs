//! Recursive-descent parser: tokens to `Value` trees.
//!
//! ```text
//! SXPR      := QUOTE SXPR
//!            | FUNCREF SXPR
//!            | atom
//!            | COMPLEX_PREFIX LPAR real real RPAR
//!            | ARRAY_PREFIX LPAR LISTBODY
//!            | LPAR LISTBODY
//! LISTBODY  := RPAR
//!            | SXPR CONSSEQ
//! CONSSEQ   := DOT SXPR RPAR
//!            | SXPR CONSSEQ
//!            | RPAR
//! ```

use crate::array::make_array;
use crate::char as sxchar;
use crate::complex::{make_complex, ComplexResult};
use crate::cons::mkcons;
use crate::dialect::DialectConfig;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::rational::ExactNumber;
use crate::streamer::Streamer;
use crate::symbol::make_symbol;
use crate::token::{Token, TokenKind};
use crate::value::Value;

pub struct Parser<S: Streamer> {
    lexer: Lexer<S>,
    dialect: DialectConfig,
}

impl<S: Streamer> Parser<S> {
    pub fn new(stream: S, dialect: DialectConfig) -> Self {
        Parser { lexer: Lexer::new(stream), dialect }
    }

    /// Parses one complete S-expression. Returns `Ok(None)` at a clean
    /// end-of-stream (no tokens at all before EOF).
    pub fn parse_one(&mut self) -> Result<Option<Value>> {
        let token = self.lexer.next(&self.dialect)?;
        if token.kind == TokenKind::Eof {
            return Ok(None);
        }
        Ok(Some(self.sxpr(token)?))
    }

    fn advance(&mut self) -> Result<Token> {
        self.lexer.next(&self.dialect)
    }

    fn sxpr(&mut self, token: Token) -> Result<Value> {
        match token.kind {
            TokenKind::Quote => {
                let inner = self.next_sxpr(token.start)?;
                let quote = make_symbol("quote", self.dialect.ignore_case)
                    .map_err(|e| Error::syntax(e.to_string(), token.start))?;
                Ok(Value::Cons(mkcons(Value::Symbol(quote), Value::Cons(mkcons(inner, Value::Nil)))))
            }
            TokenKind::FuncRef => {
                let inner = self.next_sxpr(token.start)?;
                let function = make_symbol("function", self.dialect.ignore_case)
                    .map_err(|e| Error::syntax(e.to_string(), token.start))?;
                Ok(Value::Cons(mkcons(Value::Symbol(function), Value::Cons(mkcons(inner, Value::Nil)))))
            }
            TokenKind::ComplexPrefix => self.complex_literal(token),
            TokenKind::ArrayPrefix(dim) => self.array_literal(token, dim),
            TokenKind::LPar => self.list_body(token.start),
            TokenKind::RPar => Err(Error::syntax("unexpected ')'", token.start)),
            TokenKind::Dot => Err(Error::syntax("unexpected '.'", token.start)),
            TokenKind::Eof => Err(Error::UnexpectedEof { at: token.start }),
            atom => self.atom(atom, token.start),
        }
    }

    fn next_sxpr(&mut self, at: crate::position::Position) -> Result<Value> {
        let token = self.advance()?;
        if token.kind == TokenKind::Eof {
            return Err(Error::UnexpectedEof { at });
        }
        self.sxpr(token)
    }

    fn atom(&mut self, kind: TokenKind, at: crate::position::Position) -> Result<Value> {
        match kind {
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::Float(f) => Ok(Value::Float(f)),
            TokenKind::Rational(ExactNumber::Int(n)) => Ok(Value::Int(n)),
            TokenKind::Rational(ExactNumber::Rational(r)) => Ok(Value::Rational(r)),
            TokenKind::Symbol(s) => make_symbol(&s, self.dialect.ignore_case)
                .map(Value::Symbol)
                .map_err(|e| Error::syntax(e.to_string(), at)),
            TokenKind::String(s) => Ok(Value::String(crate::sxstring::SxString::new(s))),
            TokenKind::Char(c) => Ok(Value::Char(sxchar::make_char(c))),
            other => Err(Error::syntax(format!("unexpected token {other:?}"), at)),
        }
    }

    /// `LISTBODY := RPAR | SXPR CONSSEQ`, entered right after consuming
    /// the opening `(`.
    fn list_body(&mut self, open_at: crate::position::Position) -> Result<Value> {
        let token = self.advance()?;
        if token.kind == TokenKind::RPar {
            return Ok(Value::Nil);
        }
        if token.kind == TokenKind::Eof {
            return Err(Error::UnexpectedEof { at: open_at });
        }
        let head = self.sxpr(token)?;
        let tail = self.cons_seq(open_at)?;
        Ok(Value::Cons(mkcons(head, tail)))
    }

    /// `CONSSEQ := DOT SXPR RPAR | SXPR CONSSEQ | RPAR`
    fn cons_seq(&mut self, open_at: crate::position::Position) -> Result<Value> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::RPar => Ok(Value::Nil),
            TokenKind::Dot => {
                let tail = self.next_sxpr(token.start)?;
                let closer = self.advance()?;
                if closer.kind != TokenKind::RPar {
                    return Err(Error::syntax("expected ')' after dotted tail", closer.start));
                }
                Ok(tail)
            }
            TokenKind::Eof => Err(Error::UnexpectedEof { at: open_at }),
            _ => {
                let head = self.sxpr(token)?;
                let tail = self.cons_seq(open_at)?;
                Ok(Value::Cons(mkcons(head, tail)))
            }
        }
    }

    fn complex_literal(&mut self, token: Token) -> Result<Value> {
        let open = self.advance()?;
        if open.kind != TokenKind::LPar {
            return Err(Error::syntax("expected '(' after #C", open.start));
        }
        let real = self.real_component(token.start)?;
        let imag = self.real_component(token.start)?;
        let close = self.advance()?;
        if close.kind != TokenKind::RPar {
            return Err(Error::syntax("expected ')' closing #C(...)", close.start));
        }
        match make_complex(real, imag) {
            ComplexResult::Real(r) => Ok(Value::from_exact(r)),
            ComplexResult::Complex(c) => Ok(Value::Complex(c)),
        }
    }

    fn real_component(&mut self, at: crate::position::Position) -> Result<ExactNumber> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Int(n) => Ok(ExactNumber::Int(n)),
            TokenKind::Rational(r) => Ok(r),
            TokenKind::Float(_) => Err(Error::syntax("#C components must be exact (Int/Rational)", token.start)),
            TokenKind::Eof => Err(Error::UnexpectedEof { at }),
            _ => Err(Error::syntax("expected a real component inside #C(...)", token.start)),
        }
    }

    fn array_literal(&mut self, token: Token, dim: usize) -> Result<Value> {
        let open = self.advance()?;
        if open.kind != TokenKind::LPar {
            return Err(Error::syntax("expected '(' after array prefix", open.start));
        }
        let payload = self.list_body(token.start)?;
        make_array(dim, payload).map(Value::Array).map_err(|e| Error::syntax(e.to_string(), token.start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cons::to_vec;
    use crate::streamer::StringStreamer;
    use num_bigint::BigInt;

    fn parse(text: &str, dialect: DialectConfig) -> Value {
        let mut p = Parser::new(StringStreamer::new(text), dialect);
        p.parse_one().unwrap().unwrap()
    }

    #[test]
    fn parses_simple_list() {
        let v = parse("(1 2 3)", DialectConfig::default());
        let (elems, tail) = to_vec(&v);
        assert_eq!(elems, vec![Value::Int(BigInt::from(1)), Value::Int(BigInt::from(2)), Value::Int(BigInt::from(3))]);
        assert!(tail.is_nil());
    }

    #[test]
    fn quote_wraps_in_quote_symbol() {
        let dialect = DialectConfig::new().with_quote(true);
        let v = parse("'foo", dialect);
        let (elems, _) = to_vec(&v);
        assert_eq!(elems.len(), 2);
        assert!(matches!(&elems[0], Value::Symbol(s) if s.value == "quote"));
    }

    #[test]
    fn dotted_pair_parses() {
        let v = parse("(a . b)", DialectConfig::default());
        if let Value::Cons(c) = &v {
            let cell = c.borrow();
            assert!(matches!(&cell.car, Value::Symbol(s) if s.value == "a"));
            assert!(matches!(&cell.cdr, Value::Symbol(s) if s.value == "b"));
        } else {
            panic!("expected Cons");
        }
    }

    #[test]
    fn complex_and_frac_literal() {
        let dialect = DialectConfig::new().with_complex(true).with_frac(true);
        let v = parse("#C(1/2 3)", dialect);
        match v {
            Value::Complex(c) => {
                assert_eq!(format!("{}", c.real), "1/2");
                assert_eq!(format!("{}", c.imag), "3");
            }
            _ => panic!("expected Complex"),
        }
    }

    #[test]
    fn array_literal_parses_with_declared_dim() {
        let dialect = DialectConfig::new().with_array(true);
        let v = parse("#2A((1 2) (3 4))", dialect);
        match v {
            Value::Array(a) => assert_eq!(a.borrow().dim, 2),
            _ => panic!("expected Array"),
        }
    }

    #[test]
    fn unexpected_rparen_is_syntax_error() {
        let mut p = Parser::new(StringStreamer::new(")"), DialectConfig::default());
        assert!(p.parse_one().is_err());
    }

    #[test]
    fn eof_before_any_token_is_clean_end_of_stream() {
        let mut p = Parser::new(StringStreamer::new(""), DialectConfig::default());
        assert_eq!(p.parse_one().unwrap(), None);
    }
}
