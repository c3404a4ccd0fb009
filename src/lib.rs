//! # gestalt
//!
//! A parser and typed accessor for property specs: a line-oriented,
//! human-editable configuration format with three value shapes.
//!
//! ## What is a Property Spec?
//!
//! Each declaration is `key = value`. The suffix of the key decides how the
//! value is read:
//!
//! - `name = value` is a **scalar** string
//! - `hosts[] = a, b, c` is an ordered **list** of strings
//! - `env[:] = a:1, b:2` is a **table** of string to string
//!
//! Comments start with `#`, quotes keep leading and trailing whitespace, and a
//! `\` before a line break continues the value on the next line.
//!
//! ## Quick Start
//!
//! ```rust
//! use gestalt::from_str;
//!
//! let spec = r#"
//! ## service settings
//! service.name = billing
//! log.level = "INFO "              # quoted to keep the trailing space
//! hosts[] = alpha, beta, \
//!           gamma
//! limits[:] = cpu:2, memory : 4G
//! "#;
//!
//! let props = from_str(spec).unwrap();
//! assert_eq!(props.get_string("service.name").unwrap(), "billing");
//! assert_eq!(props.get_string("log.level").unwrap(), "INFO ");
//! assert_eq!(props.get_list("hosts[]").unwrap(), ["alpha", "beta", "gamma"]);
//! assert_eq!(props.get_table("limits[:]").unwrap()["memory"], "4G");
//! ```
//!
//! ### Layering Properties
//!
//! ```rust
//! use gestalt::from_str;
//!
//! let defaults = from_str("port = 80\nhosts[] = base").unwrap();
//! let mut local = from_str("hosts[] = extra").unwrap();
//!
//! local.inherit(Some(&defaults));
//! assert_eq!(local.get_string("port").unwrap(), "80");
//! assert_eq!(local.get_list("hosts[]").unwrap(), ["extra", "base"]);
//! ```
//!
//! ## Error Policy
//!
//! Parsing is all-or-nothing: the first malformed line fails the whole call
//! with [`Error::Format`]. [`SpecOptions::lenient`] opts into skipping such
//! lines instead. An empty buffer is valid and yields empty [`Properties`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`trace` per line, `debug` per parse and
//! load, `warn` for lines skipped in lenient mode). Install any subscriber to
//! see them.
//!
//! See the [`spec`] module for the complete format description.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod segment;
pub mod ser;
pub mod spec;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::Properties;
pub use options::{SpecOptions, TableSuffix};
pub use ser::Serializer;
pub use value::{Kind, Table, Value};

use std::io;
use std::path::Path;
use tracing::debug;

/// Parses property spec text with default options.
///
/// # Examples
///
/// ```rust
/// use gestalt::from_str;
///
/// let props = from_str("k[] = 1 , 2 , 3").unwrap();
/// assert_eq!(props.get_list("k[]").unwrap(), ["1", "2", "3"]);
///
/// assert!(from_str("").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] for the first line that does not hold exactly
/// one `=` after comment stripping. No partial store is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Properties> {
    from_str_with_options(s, &SpecOptions::default())
}

/// Parses property spec text with custom options.
///
/// # Examples
///
/// ```rust
/// use gestalt::{from_str_with_options, SpecOptions, TableSuffix};
///
/// let options = SpecOptions::lenient().with_table_suffix(TableSuffix::Map);
/// let props = from_str_with_options("broken line\na map[] = a:1", &options).unwrap();
/// assert_eq!(props.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] for the first malformed line unless `options`
/// is lenient.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: &SpecOptions) -> Result<Properties> {
    Decoder::new(options).decode(s)
}

/// Parses property spec text from UTF-8 bytes.
///
/// # Errors
///
/// Returns [`Error::Utf8`] if the bytes are not valid UTF-8 and
/// [`Error::Format`] if the text is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Properties> {
    from_str(std::str::from_utf8(v)?)
}

/// Reads a whole stream and parses it as property spec text.
///
/// # Errors
///
/// Returns [`Error::Io`] (without a path) if reading fails, and the errors
/// of [`from_slice`] for what was read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Properties>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(Error::stream)?;
    from_slice(&bytes)
}

/// Reads the file at `path` and parses it with default options.
///
/// # Errors
///
/// Returns [`Error::EmptyPath`] for an empty path, [`Error::Io`] when the file
/// cannot be read, and [`Error::Format`] when its content is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Properties> {
    from_path_with_options(path, &SpecOptions::default())
}

/// Reads the file at `path` and parses it with custom options.
///
/// # Errors
///
/// See [`from_path`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path_with_options<P: AsRef<Path>>(path: P, options: &SpecOptions) -> Result<Properties> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyPath);
    }
    debug!(path = %path.display(), "loading property file");
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    from_str_with_options(&text, options)
}

/// Prints properties as spec text with default options.
///
/// # Examples
///
/// ```rust
/// use gestalt::{properties, to_string};
///
/// let props = properties!({ "name": "demo", "tags[]": ["a", "b"] });
/// assert_eq!(to_string(&props).unwrap(), "name = demo\ntags[] = a, b\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Unrepresentable`] or [`Error::KindMismatch`] for
/// properties the format cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(properties: &Properties) -> Result<String> {
    to_string_with_options(properties, SpecOptions::default())
}

/// Prints properties as spec text with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(properties: &Properties, options: SpecOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize_properties(properties)?;
    Ok(serializer.into_inner())
}

/// Prints properties as spec text to a writer.
///
/// # Errors
///
/// Returns an error if printing fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, properties: &Properties) -> Result<()>
where
    W: io::Write,
{
    let text = to_string(properties)?;
    writer
        .write_all(text.as_bytes())
        .map_err(Error::stream)?;
    Ok(())
}
