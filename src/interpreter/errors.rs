//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents every failure that can
//! occur while a program runs. Because parsing and execution are fused, syntax
//! errors (a malformed number, a missing `=`) surface here as well.
//!
//! All runtime errors are fatal: the interpreter reports the error's [`Display`]
//! text as a single line on the error sink and halts.
//!
//! [`Display`]: fmt::Display

use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Consumed past the end of the program while reading an operand
    Eof,

    /// A character with no operator bound to it at a dispatch position
    UnexpectedCharacter { found: char, position: usize },

    /// A number literal did not start with a digit, `-`, `.` or `w`
    ExpectedNumeric { found: String },

    /// A number literal contained a second `.`
    MultipleDecimalPoints,

    /// A slot operand was neither digits nor a register holding digits
    InvalidSlot { found: String },

    /// The split delimiter used an unsupported escape
    BadDelimiterEscape,

    /// `!`, `<` or `>` in a condition was not followed by `=`
    ExpectedEquals { found: char },

    /// A condition's relational operator was not one of `=`, `!`, `<`, `>`
    ExpectedComparison { found: char },

    /// The operand of `@` was not a string, number or slot reference
    InvalidIndexItem { position: usize },

    /// `}` with no active loop frame
    NotInLoop,

    /// `)` with an empty call stack
    UnopenedFunction { position: usize },

    /// `~` on a non-numeric register or an unregistered entry position
    InvalidFunction,

    /// `@` could not find the item in the register's text
    SubstringNotFound,

    /// `@` could not find the item in the register's list
    ItemNotInList { item: String },

    /// `$` index outside the register's bounds
    IndexOutOfRange { container: &'static str },

    /// Operand types not supported by an operator
    TypeError {
        operation: String,
        left: &'static str,
        right: &'static str,
    },

    /// A value could not be coerced to the requested kind
    InvalidConversion { value: String, target: &'static str },

    /// An ordering comparison between values of different kinds
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    /// Division or modulo by zero
    DivisionByZero,

    /// Read attempted on a value that is not a resource
    NotReadable,

    /// Write attempted on a value that is not a resource
    NotWritable,

    /// A socket write with no accepted connection
    SocketWrite,

    /// The listener port in slot 1 is not a valid port number
    InvalidPort { port: String },

    /// The listener host in slot 0 is not text
    InvalidHost { host: String },

    /// The file mode in slot 0 is outside 0..=3
    InvalidMode { mode: String },

    /// Opening a file for reading that does not exist
    FileNotFound { filename: String },

    /// Any other failure of an underlying stream
    Io { message: String },

    /// The configured step budget ran out
    StepLimitExceeded { limit: usize },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// Stepping through history past either end
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    /// The program position the error refers to, when it carries one.
    pub fn position(&self) -> Option<usize> {
        match self {
            RuntimeError::UnexpectedCharacter { position, .. }
            | RuntimeError::InvalidIndexItem { position }
            | RuntimeError::UnopenedFunction { position } => Some(*position),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io {
            message: err.to_string(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Eof => write!(f, "EOF"),
            RuntimeError::UnexpectedCharacter { found, position } => {
                write!(f, "Got unexpected `{}` at {}.", found, position)
            }
            RuntimeError::ExpectedNumeric { found } => {
                write!(f, "Got `{}`, expected numeric.", found)
            }
            RuntimeError::MultipleDecimalPoints => {
                write!(f, "Cannot have multiple decimal points.")
            }
            RuntimeError::InvalidSlot { found } => {
                write!(f, "Expected slot (number 0-9), got `{}`.", found)
            }
            RuntimeError::BadDelimiterEscape => {
                write!(f, "Bad escape character for delimiter")
            }
            RuntimeError::ExpectedEquals { found } => {
                write!(f, "Expected `=`, got {}", found)
            }
            RuntimeError::ExpectedComparison { found } => {
                write!(f, "Expected comparison operator, got `{}`.", found)
            }
            RuntimeError::InvalidIndexItem { position } => {
                write!(
                    f,
                    "Invalid item to get index of at position {}.",
                    position
                )
            }
            RuntimeError::NotInLoop => write!(f, "Not in a loop."),
            RuntimeError::UnopenedFunction { position } => {
                write!(
                    f,
                    "Cannot close unopened function at position: {}",
                    position
                )
            }
            RuntimeError::InvalidFunction => write!(f, "Invalid function"),
            RuntimeError::SubstringNotFound => write!(f, "substring not found"),
            RuntimeError::ItemNotInList { item } => write!(f, "{} is not in list", item),
            RuntimeError::IndexOutOfRange { container } => {
                write!(f, "{} index out of range", container)
            }
            RuntimeError::TypeError {
                operation,
                left,
                right,
            } => {
                write!(
                    f,
                    "Unsupported operand types for {}: {} and {}.",
                    operation, left, right
                )
            }
            RuntimeError::InvalidConversion { value, target } => {
                write!(f, "Cannot convert {} to {}.", value, target)
            }
            RuntimeError::Incomparable { left, right } => {
                write!(f, "Cannot compare {} with {}.", left, right)
            }
            RuntimeError::DivisionByZero => write!(f, "Division by zero."),
            RuntimeError::NotReadable => write!(f, "Cannot read from non-file handle."),
            RuntimeError::NotWritable => write!(f, "Cannot write to non-file handle."),
            RuntimeError::SocketWrite => write!(f, "Problem writing to socket."),
            RuntimeError::InvalidPort { port } => write!(f, "Invalid port number: {}", port),
            RuntimeError::InvalidHost { host } => write!(f, "Invalid host: {}", host),
            RuntimeError::InvalidMode { mode } => write!(f, "Invalid mode: {}", mode),
            RuntimeError::FileNotFound { filename } => {
                write!(f, "File `{}` does not exist.", filename)
            }
            RuntimeError::Io { message } => write!(f, "I/O error: {}", message),
            RuntimeError::StepLimitExceeded { limit } => {
                write!(f, "Step limit of {} exceeded.", limit)
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
