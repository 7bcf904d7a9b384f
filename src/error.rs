// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Traversal errors (user error)
    //------------------------------
    /// No definition matched the argument and no unmatched handler was
    /// registered. This also covers a value-taking option that was given
    /// no value.
    #[error("Invalid command line argument: {token}")]
    UnknownArg {
        /// Position of the argument in the input sequence.
        index: usize,
        /// The raw argument.
        token: String,
    },

    /// An action (or the unmatched handler) failed while handling the
    /// argument at `index`. No further arguments were processed.
    #[error("argument {index} ({token:?}) rejected: {source}")]
    Aborted {
        /// Position of the argument in the input sequence.
        index: usize,
        /// The raw argument.
        token: String,
        /// Error returned by the action.
        source: Box<Error>,
    },

    /// An action failed while handling an environment variable.
    #[error("environment variable {name:?} rejected: {source}")]
    Variable {
        /// Name of the variable.
        name: String,
        /// Error returned by the action.
        source: Box<Error>,
    },

    /// An action failed while handling a config file line.
    #[error("config line {line} ({key:?}) rejected: {source}")]
    Config {
        /// Line number (starting at 1).
        line: usize,
        /// Key found on the line.
        key: String,
        /// Error returned by the action.
        source: Box<Error>,
    },

    /// A config file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    //------------------------------
    // Value conversion errors
    //------------------------------
    /// An integer value was expected but none (or an empty one) was given.
    #[error("missing value")]
    EmptyValue,

    /// The value is not an integer.
    #[error("not a number: {0:?}")]
    NotNumeric(String),

    /// The value is larger than the target type allows.
    #[error("value too large: {0:?}")]
    TooLarge(String),

    /// The value is smaller than the target type allows.
    #[error("value too small: {0:?}")]
    TooSmall(String),

    //------------------------------
    // Handler errors
    //------------------------------
    /// Generic failure raised by a handler.
    #[error("handler error: {0}")]
    HandlerError(String),
}

impl Error {
    /// Position of the failing argument in the input sequence, for errors
    /// raised by a command line traversal.
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::UnknownArg { index, .. } | Error::Aborted { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
