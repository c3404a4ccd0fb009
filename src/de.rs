//! Decoding of logical lines into typed properties.
//!
//! This module provides the [`Decoder`], which turns each [`LogicalLine`]
//! produced by the [`crate::segment`] pass into an optional `(key, value)` pair,
//! and drives a whole buffer into a [`Properties`] store.
//!
//! ## Decoding Rules
//!
//! - Lines shorter than `a=b` or starting with `#` yield nothing
//! - Text from the first `#` onwards is dropped
//! - The rest must contain exactly one `=`, otherwise the parse fails
//! - Key and value are trimmed of spaces and tabs
//! - The key's suffix selects table, list, or scalar decoding (table first)
//!
//! ## Usage
//!
//! ```rust
//! use gestalt::{Decoder, SpecOptions, Value};
//! use gestalt::segment::LogicalLine;
//!
//! let options = SpecOptions::new();
//! let decoder = Decoder::new(&options);
//!
//! let pair = decoder.decode_line(&LogicalLine::new(1, "hosts[] = a , \" b\"")).unwrap();
//! assert_eq!(pair, Some(("hosts[]".to_string(), Value::from(vec!["a", " b"]))));
//! ```

use crate::map::Properties;
use crate::options::SpecOptions;
use crate::segment::{LogicalLine, Segmenter, COMMENT};
use crate::value::{unquote, Kind, Table, Value};
use crate::{Error, Result};
use tracing::{debug, trace, warn};

/// Separates key from value.
pub const ASSIGN: char = '=';

/// Separates list elements and table entries.
pub const DELIMITER: char = ',';

/// Separates a table entry's sub-key from its sub-value.
pub const SUBKEY_DELIMITER: char = ':';

/// Encloses values whose boundary whitespace must survive trimming.
pub const QUOTE: char = '"';

/// Shortest meaningful declaration, `a=b`.
const MIN_SPEC_LEN: usize = 3;

const LINE_TRIM: &[char] = &[' ', '\t', '\r', '\n'];
const FIELD_TRIM: &[char] = &[' ', '\t'];

/// Decodes logical lines according to a set of [`SpecOptions`].
pub struct Decoder<'o> {
    options: &'o SpecOptions,
}

impl<'o> Decoder<'o> {
    pub fn new(options: &'o SpecOptions) -> Self {
        Decoder { options }
    }

    /// Decodes one logical line.
    ///
    /// Returns `Ok(None)` for blank, comment-only, and too-short lines, and for
    /// declarations whose key trims to nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when the comment-stripped line does not hold
    /// exactly one `=`.
    pub fn decode_line(&self, line: &LogicalLine) -> Result<Option<(String, Value)>> {
        let trimmed = line.text.trim_matches(LINE_TRIM);
        if trimmed.chars().count() < MIN_SPEC_LEN || trimmed.starts_with(COMMENT) {
            return Ok(None);
        }

        let content = match line.text.find(COMMENT) {
            Some(i) => &line.text[..i],
            None => line.text.as_str(),
        };
        let content = content.trim_matches(LINE_TRIM);
        if content.is_empty() {
            return Ok(None);
        }

        let mut parts = content.split(ASSIGN);
        let (key, spec) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(spec), None) => (key, spec),
            _ => return Err(Error::format(line.line, content)),
        };

        let key = key.trim_matches(FIELD_TRIM);
        if key.is_empty() {
            trace!(line = line.line, "dropping declaration with empty key");
            return Ok(None);
        }
        let spec = spec.trim_matches(FIELD_TRIM);

        let kind = self.options.classify(key);
        let value = if spec.is_empty() {
            Value::empty(kind)
        } else {
            match kind {
                Kind::Table => Value::Table(decode_table(spec)),
                Kind::List => Value::List(decode_list(spec)),
                Kind::Scalar => Value::Scalar(unquote(spec).to_string()),
            }
        };
        trace!(line = line.line, key, kind = %value.kind(), "decoded property");

        Ok(Some((key.to_string(), value)))
    }

    /// Segments and decodes a whole buffer.
    ///
    /// In the default fail-fast mode the first malformed line aborts the parse
    /// and no partial store is returned. With [`SpecOptions::lenient`] the
    /// malformed line is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for the first malformed line in fail-fast mode.
    pub fn decode(&self, input: &str) -> Result<Properties> {
        let lines = Segmenter::new(input).segment();
        let mut properties = Properties::with_capacity(lines.len());

        for line in &lines {
            if line.text.is_empty() {
                continue;
            }
            match self.decode_line(line) {
                Ok(Some((key, value))) => {
                    properties.insert_unchecked(key, value);
                }
                Ok(None) => {}
                Err(e) if self.options.lenient => {
                    warn!(line = line.line, error = %e, "skipping malformed property");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            lines = lines.len(),
            properties = properties.len(),
            "parsed property spec"
        );
        Ok(properties)
    }
}

/// Splits a list value into trimmed, unquoted elements.
///
/// Empty elements between delimiters are kept. Callers handle the empty
/// value itself.
fn decode_list(spec: &str) -> Vec<String> {
    spec.split(DELIMITER)
        .map(|element| unquote(element.trim_matches(FIELD_TRIM)).to_string())
        .collect()
}

/// Splits a table value into `sub-key:sub-value` entries.
///
/// Entries without a `:` are skipped. Only the first `:` splits, so sub-values
/// may contain colons.
fn decode_table(spec: &str) -> Table {
    let mut table = Table::new();
    for entry in spec.split(DELIMITER) {
        let entry = entry.trim_matches(FIELD_TRIM);
        match entry.split_once(SUBKEY_DELIMITER) {
            Some((k, v)) => {
                table.insert(
                    unquote(k.trim_matches(FIELD_TRIM)).to_string(),
                    unquote(v.trim_matches(FIELD_TRIM)).to_string(),
                );
            }
            None => trace!(entry, "skipping table entry without `:`"),
        }
    }
    table
}
