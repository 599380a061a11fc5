use crate::{input::Input, value::Kind as ValueKind};
use nom::error::{ErrorKind, FromExternalError, ParseError};
use std::fmt;

/// Location inside the parsed text. `line` and `col` start at 1 and count
/// characters, `offset` is the byte offset from the start of the input.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl<'a> From<Input<'a>> for Position {
    fn from(i: Input<'a>) -> Self {
        Self {
            line: i.location_line(),
            col: i.get_utf8_column(),
            offset: i.location_offset(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Kind {
    UnexpectedEnd,
    UnexpectedChar(char),
    InvalidValue(String),
    MissingQuote,
    InvalidEscape(char),
    InvalidHex(String),
    InvalidNumber(String),
    InvalidKey(String),
    MissingColon,
    MissingComma,
    MissingArrayBracket,
    MissingObjectBracket,
    TrailingComma,
    CharsAfterRoot(String),
    NomError(ErrorKind),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            Self::InvalidValue(v) => write!(f, "invalid value '{v}'"),
            Self::MissingQuote => write!(f, "unterminated string"),
            Self::InvalidEscape(c) => write!(f, "invalid escape '\\{c}'"),
            Self::InvalidHex(h) => write!(f, "'{h}' is an invalid hex number"),
            Self::InvalidNumber(n) => write!(f, "invalid number '{n}'"),
            Self::InvalidKey(k) => write!(f, "invalid key '{k}', keys must be strings"),
            Self::MissingColon => write!(f, "expected ':' after object key"),
            Self::MissingComma => write!(f, "expected ',' between elements"),
            Self::MissingArrayBracket => write!(f, "missing closing ']'"),
            Self::MissingObjectBracket => write!(f, "missing closing '}}'"),
            Self::TrailingComma => write!(f, "trailing comma"),
            Self::CharsAfterRoot(rest) => write!(f, "unexpected characters at the end: {rest}"),
            Self::NomError(kind) => write!(f, "{}", kind.description()),
        }
    }
}

/// Failure to parse JSON text, spanning `start..end` of the input.
#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[error("{kind} at {start}")]
pub struct Error {
    pub start: Position,
    pub end: Position,
    pub kind: Kind,
}

impl Error {
    pub fn new(start: Position, end: Position, kind: Kind) -> Self {
        Self { start, end, kind }
    }

    pub(crate) fn at(position: Position, kind: Kind) -> Self {
        Self::new(position, position, kind)
    }
}

impl<'a> ParseError<Input<'a>> for Error {
    fn from_error_kind(input: Input<'a>, kind: ErrorKind) -> Self {
        let position = Position::from(input);

        if input.is_empty() {
            Self::at(position, Kind::UnexpectedEnd)
        } else {
            Self::at(position, Kind::NomError(kind))
        }
    }

    fn append(_input: Input<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, T> FromExternalError<Input<'a>, T> for Error {
    fn from_external_error(input: Input<'a>, kind: ErrorKind, _e: T) -> Self {
        Self::from_error_kind(input, kind)
    }
}

/// Failure of a typed accessor or path lookup on a [`Value`](crate::Value).
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum AccessError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("integer {value} does not fit in {target}")]
    OutOfRange { value: i64, target: &'static str },
}

impl AccessError {
    pub(crate) fn mismatch(expected: ValueKind, found: ValueKind) -> Self {
        Self::TypeMismatch { expected, found }
    }
}
