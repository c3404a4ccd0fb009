//! Error types for property spec parsing, loading, and access.
//!
//! ## Error Categories
//!
//! - **Format Errors**: a logical line that does not hold exactly one `=`
//! - **I/O Errors**: empty paths, unreadable files, and failing streams, with
//!   the cause preserved
//! - **Encoding Errors**: input bytes that are not UTF-8
//! - **Access Errors**: missing keys and kind mismatches from the typed getters
//! - **Print Errors**: values that cannot be expressed in the text format
//!
//! ## Examples
//!
//! ```rust
//! use gestalt::{from_str, Error};
//!
//! let result = from_str("no assignment here");
//! assert!(matches!(result, Err(Error::Format { line: 1, .. })));
//! ```

use crate::value::Kind;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;
use std::sync::Arc;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A logical line without exactly one assignment character.
    ///
    /// `line` is the physical line on which the offending logical line starts;
    /// `text` is the line after comment stripping.
    #[error("Format error at line {line}: `{text}`\nHelp: each property must have the form `key = value` with a single `=`")]
    Format { line: usize, text: String },

    /// A load was requested with an empty path.
    #[error("File path is empty")]
    EmptyPath,

    /// Reading a property file or stream, or writing printed text, failed.
    ///
    /// `path` is `None` when the failure came from a reader or writer.
    #[error("I/O error{}: {source}", describe_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: Arc<io::Error>,
    },

    /// Input bytes are not valid UTF-8.
    #[error("Input is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    /// A typed getter was called for a key that is not present.
    #[error("Missing key `{0}`")]
    MissingKey(String),

    /// A required key set is incomplete.
    #[error("Missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// A key is bound to a different kind of value than requested.
    #[error("Kind mismatch for `{key}`: expected {expected}, found {found}")]
    KindMismatch {
        key: String,
        expected: Kind,
        found: Kind,
    },

    /// A value cannot be written back as spec text.
    #[error("Cannot represent `{key}` as a property spec: {reason}")]
    Unrepresentable { key: String, reason: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error for the logical line starting at `line`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::Error;
    ///
    /// let err = Error::format(3, "a = b = c");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn format(line: usize, text: &str) -> Self {
        Error::Format {
            line,
            text: text.to_string(),
        }
    }

    /// Wraps an I/O failure for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: Some(path.into()),
            source: Arc::new(source),
        }
    }

    /// Wraps an I/O failure of a reader or writer.
    pub fn stream(source: io::Error) -> Self {
        Error::Io {
            path: None,
            source: Arc::new(source),
        }
    }

    pub fn missing_key(key: &str) -> Self {
        Error::MissingKey(key.to_string())
    }

    /// Creates a kind mismatch error for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::{Error, Kind};
    ///
    /// let err = Error::kind_mismatch("hosts[]", Kind::Scalar, Kind::List);
    /// assert!(err.to_string().contains("expected scalar, found list"));
    /// ```
    pub fn kind_mismatch(key: &str, expected: Kind, found: Kind) -> Self {
        Error::KindMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }

    pub fn unrepresentable(key: &str, reason: &str) -> Self {
        Error::Unrepresentable {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors raised while reading or writing files and
    /// streams.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Error::EmptyPath | Error::Io { .. })
    }

    /// Returns `true` for errors raised by malformed spec text, including
    /// input that is not UTF-8.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. } | Error::Utf8(_))
    }
}

fn describe_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" for {}", path.display()),
        None => String::new(),
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
