//! Printing properties back to spec text.
//!
//! The [`Serializer`] writes one `key = value` line per property, in store
//! order, using the same delimiters the decoder reads. Parsing its output
//! yields the original store.
//!
//! ## Quoting
//!
//! A value (or list element, or table sub-key/sub-value) is wrapped in `"`
//! when trimming or unquoting would otherwise change it: when it has leading
//! or trailing spaces or tabs, when it already starts and ends with `"`, or
//! when it ends in `\` (which would otherwise continue the line). Empty list
//! elements are always quoted so a one-element list holding `""` is not read
//! back as an empty list.
//!
//! Text holding a line break, `#`, or `=` cannot be expressed in the format,
//! and neither can a delimiter inside a list element or table entry.
//! Such values are rejected with [`Error::Unrepresentable`].
//!
//! ## Usage
//!
//! ```rust
//! use gestalt::{from_str, to_string};
//!
//! let props = from_str("name = \" padded \"\nhosts[] = a, b\nenv[:] = k:v").unwrap();
//! let text = to_string(&props).unwrap();
//! assert_eq!(text, "name = \" padded \"\nhosts[] = a, b\nenv[:] = k:v\n");
//! assert_eq!(from_str(&text).unwrap(), props);
//! ```

use crate::de::{ASSIGN, DELIMITER, QUOTE, SUBKEY_DELIMITER};
use crate::map::Properties;
use crate::options::SpecOptions;
use crate::segment::{COMMENT, CONTINUATION};
use crate::value::{Table, Value};
use crate::{Error, Result};

/// Characters no key or value may contain.
const FORBIDDEN: &[char] = &['\n', '\r', COMMENT, ASSIGN];

const FIELD_WHITESPACE: &[char] = &[' ', '\t'];

/// Writes [`Properties`] as spec text.
pub struct Serializer {
    output: String,
    options: SpecOptions,
}

impl Serializer {
    pub fn new(options: SpecOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes every property of `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unrepresentable`] for keys or values the format cannot
    /// hold, and [`Error::KindMismatch`] for a value whose kind disagrees with
    /// its key's suffix.
    pub fn serialize_properties(&mut self, properties: &Properties) -> Result<()> {
        for (key, value) in properties {
            self.serialize_entry(key, value)?;
        }
        Ok(())
    }

    /// Writes a single `key = value` line.
    ///
    /// # Errors
    ///
    /// See [`Serializer::serialize_properties`].
    pub fn serialize_entry(&mut self, key: &str, value: &Value) -> Result<()> {
        self.check_key(key, value)?;

        self.output.push_str(key);
        self.output.push(' ');
        self.output.push(ASSIGN);
        match value {
            Value::Scalar(s) => {
                check_text(key, s, &[])?;
                if !s.is_empty() {
                    self.output.push(' ');
                    self.write_string(s, false);
                }
            }
            Value::List(list) => self.write_list(key, list)?,
            Value::Table(table) => self.write_table(key, table)?,
        }
        self.output.push('\n');
        Ok(())
    }

    fn check_key(&self, key: &str, value: &Value) -> Result<()> {
        if key.trim_matches(FIELD_WHITESPACE).is_empty() {
            return Err(Error::unrepresentable(key, "key is empty"));
        }
        if key != key.trim_matches(FIELD_WHITESPACE) {
            return Err(Error::unrepresentable(
                key,
                "key has leading or trailing whitespace",
            ));
        }
        if key.contains(FORBIDDEN) {
            return Err(Error::unrepresentable(key, "key holds a reserved character"));
        }
        let expected = self.options.classify(key);
        if value.kind() != expected {
            return Err(Error::kind_mismatch(key, expected, value.kind()));
        }
        Ok(())
    }

    fn write_list(&mut self, key: &str, list: &[String]) -> Result<()> {
        for (i, element) in list.iter().enumerate() {
            check_text(key, element, &[DELIMITER])?;
            self.output.push_str(if i == 0 { " " } else { ", " });
            self.write_string(element, true);
        }
        Ok(())
    }

    fn write_table(&mut self, key: &str, table: &Table) -> Result<()> {
        for (i, (sub_key, sub_value)) in table.iter().enumerate() {
            check_text(key, sub_key, &[DELIMITER, SUBKEY_DELIMITER])?;
            check_text(key, sub_value, &[DELIMITER])?;
            self.output.push_str(if i == 0 { " " } else { ", " });
            self.write_string(sub_key, false);
            self.output.push(SUBKEY_DELIMITER);
            self.write_string(sub_value, false);
        }
        Ok(())
    }

    #[inline]
    fn needs_quotes(s: &str, quote_empty: bool) -> bool {
        (quote_empty && s.is_empty())
            || s.starts_with(FIELD_WHITESPACE)
            || s.ends_with(FIELD_WHITESPACE)
            || s.ends_with(CONTINUATION)
            || (s.len() >= 2 && s.starts_with(QUOTE) && s.ends_with(QUOTE))
    }

    #[inline]
    fn write_string(&mut self, s: &str, quote_empty: bool) {
        if Self::needs_quotes(s, quote_empty) {
            self.output.push(QUOTE);
            self.output.push_str(s);
            self.output.push(QUOTE);
        } else {
            self.output.push_str(s);
        }
    }
}

fn check_text(key: &str, s: &str, delimiters: &[char]) -> Result<()> {
    if s.contains(FORBIDDEN) {
        return Err(Error::unrepresentable(
            key,
            "value holds a line break, `#`, or `=`",
        ));
    }
    if s.contains(delimiters) {
        return Err(Error::unrepresentable(
            key,
            &format!("`{}` holds a delimiter", s),
        ));
    }
    Ok(())
}
