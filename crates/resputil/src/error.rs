//! RESP codec error type.

use std::io;

use thiserror::Error;

/// Error type for every read, write and decode operation in this crate.
#[derive(Debug, Error)]
pub enum RespError {
    /// The next wire value carries a different tag than the operation requires.
    #[error("expected prefix \"{expected}\", got \"{got}\"")]
    TypeMismatch { expected: char, got: char },
    /// The next wire value has a shape the destination type cannot hold.
    #[error("cannot decode redis {wire} into {target}")]
    ShapeMismatch {
        wire: &'static str,
        target: &'static str,
    },
    /// The declared array length differs from the number of destinations.
    #[error("expected array of length {want}, got {have}")]
    LengthMismatch { want: usize, have: i64 },
    /// A destination was passed by value instead of as a write-target.
    #[error("cannot decode into {0}: destination is not a mutable reference")]
    InvalidTarget(&'static str),
    /// The server replied with an error where a value was expected.
    #[error("redis error reply: {0}")]
    Reply(String),
    #[error("unknown prefix \"{0}\"")]
    UnknownPrefix(char),
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),
    #[error("invalid {target}: {value:?}")]
    InvalidValue { target: &'static str, value: String },
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("line not terminated by CRLF")]
    MissingCrlf,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("arrays nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}
