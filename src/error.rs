//! Error types for lexing, parsing and value construction.
//!
//! Every fallible operation in this crate returns [`Error`]/[`Result`].
//! Lex and parse errors carry the [`Position`] of the offending token;
//! construction, index, type and immutability errors describe the
//! violated invariant directly.

use crate::position::Position;
use std::fmt;

/// The reason an operation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Bad syntax, an unexpected token, or an unexpected token inside a form.
    Syntax { message: String, at: Position },
    /// EOF encountered while a form (string, list, complex, array) was still open.
    UnexpectedEof { at: Position },
    /// Empty `Symbol`, invalid `Char` literal, or a `Char` outside the Unicode range.
    Construction(String),
    /// Negative or out-of-range index into a `Cons` chain.
    Index(String),
    /// A non-list argument where `mkreverse`/`mkappend`/`nconc`/`parse` require one.
    Type(String),
    /// Attempt to reassign or delete a write-once field.
    Immutable(&'static str),
    /// A cycle was found where deep host conversion requires a finite tree.
    Recursion(String),
    /// Slicing is not supported on `Cons`.
    Slicing,
    /// A dialect-gated syntax form was used without enabling the option.
    FeatureDisabled(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax { message, at } => write!(f, "{message}: {at}"),
            Error::UnexpectedEof { at } => write!(f, "unexpected EOF: {at}"),
            Error::Construction(msg) => write!(f, "{msg}"),
            Error::Index(msg) => write!(f, "{msg}"),
            Error::Type(msg) => write!(f, "{msg}"),
            Error::Immutable(field) => write!(f, "{field} is read only"),
            Error::Recursion(msg) => write!(f, "{msg}"),
            Error::Slicing => write!(f, "slicing Cons is not supported"),
            Error::FeatureDisabled(feature) => {
                write!(f, "'{feature}' syntax requires enabling it in DialectConfig")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn syntax(message: impl Into<String>, at: Position) -> Self {
        Error::Syntax { message: message.into(), at }
    }
}
