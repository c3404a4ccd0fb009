//! Configuration options for property spec parsing.
//!
//! This module provides types to select the key convention and error policy:
//!
//! - [`SpecOptions`]: Main configuration struct
//! - [`TableSuffix`]: Choice of the reserved suffix marking table-typed keys
//!
//! ## Examples
//!
//! ```rust
//! use gestalt::{from_str_with_options, SpecOptions, TableSuffix};
//!
//! // Use the `map[]` convention for tables
//! let options = SpecOptions::new().with_table_suffix(TableSuffix::Map);
//! let props = from_str_with_options("env map[] = a:1", &options).unwrap();
//! assert_eq!(props.get_table("env map[]").unwrap()["a"], "1");
//! ```

use crate::value::Kind;

/// Reserved suffix of list-typed keys.
pub const LIST_SUFFIX: &str = "[]";

/// Reserved suffix marking table-typed keys.
///
/// Exactly one convention is active for a parse; the parser never guesses it
/// from the input.
///
/// # Examples
///
/// ```rust
/// use gestalt::TableSuffix;
///
/// assert_eq!(TableSuffix::Colon.as_str(), "[:]");
/// assert_eq!(TableSuffix::Map.as_str(), "map[]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TableSuffix {
    #[default]
    Colon,
    Map,
}

impl TableSuffix {
    /// Returns the string representation of this suffix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TableSuffix::Colon => "[:]",
            TableSuffix::Map => "map[]",
        }
    }
}

/// Configuration options for parsing and printing property specs.
///
/// # Examples
///
/// ```rust
/// use gestalt::{SpecOptions, TableSuffix};
///
/// // Default: `[:]` tables, fail on the first malformed line
/// let options = SpecOptions::new();
/// assert!(!options.lenient);
///
/// // Skip malformed lines instead of failing
/// let options = SpecOptions::lenient().with_table_suffix(TableSuffix::Map);
/// assert!(options.lenient);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecOptions {
    pub table_suffix: TableSuffix,
    pub lenient: bool,
}

impl SpecOptions {
    /// Creates default options (`[:]` table suffix, fail-fast parsing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that skip malformed lines rather than aborting the parse.
    ///
    /// Every skipped line is reported through `tracing` at `warn` level.
    #[must_use]
    pub fn lenient() -> Self {
        SpecOptions {
            lenient: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_table_suffix(mut self, suffix: TableSuffix) -> Self {
        self.table_suffix = suffix;
        self
    }

    #[must_use]
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[must_use]
    pub const fn list_suffix(&self) -> &'static str {
        LIST_SUFFIX
    }

    #[must_use]
    pub const fn table_suffix(&self) -> &'static str {
        self.table_suffix.as_str()
    }

    /// Classifies a trimmed key by its suffix.
    ///
    /// The table suffix is tested first, so `map[]` keys are never lists under
    /// the [`TableSuffix::Map`] convention.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::{Kind, SpecOptions, TableSuffix};
    ///
    /// let options = SpecOptions::new();
    /// assert_eq!(options.classify("hosts[]"), Kind::List);
    /// assert_eq!(options.classify("env[:]"), Kind::Table);
    /// assert_eq!(options.classify("name"), Kind::Scalar);
    ///
    /// let options = options.with_table_suffix(TableSuffix::Map);
    /// assert_eq!(options.classify("env map[]"), Kind::Table);
    /// ```
    #[must_use]
    pub fn classify(&self, key: &str) -> Kind {
        if key.ends_with(self.table_suffix()) {
            Kind::Table
        } else if key.ends_with(self.list_suffix()) {
            Kind::List
        } else {
            Kind::Scalar
        }
    }
}
