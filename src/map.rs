//! The property store.
//!
//! This module provides [`Properties`], an insertion-ordered map from keys to
//! typed [`Value`]s, built by a parse and then read through typed getters.
//!
//! ## Access Policy
//!
//! The typed getters ([`Properties::get_string`], [`Properties::get_list`],
//! [`Properties::get_table`]) all fail the same way: [`Error::MissingKey`] for
//! an absent key and [`Error::KindMismatch`] when the stored value has another
//! kind. The `*_or` variants return the supplied default in either case.
//!
//! ## Examples
//!
//! ```rust
//! use gestalt::{from_str, Error};
//!
//! let props = from_str("name = demo\nhosts[] = a, b").unwrap();
//!
//! assert_eq!(props.get_string("name").unwrap(), "demo");
//! assert_eq!(props.get_list("hosts[]").unwrap(), ["a", "b"]);
//! assert!(matches!(props.get_string("hosts[]"), Err(Error::KindMismatch { .. })));
//! assert_eq!(props.get_string_or("missing", "fallback"), "fallback");
//! ```
//!
//! ## Concurrency
//!
//! `Properties` has no internal synchronization. Wrap it in a lock to share it
//! between writers.

use crate::options::SpecOptions;
use crate::value::{Kind, Table, Value};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::trace;

/// An ordered map of property keys to typed values.
///
/// Every key keeps one [`Kind`] for its lifetime when written through
/// [`Properties::insert`]. [`Properties::insert_unchecked`] bypasses that check.
///
/// # Examples
///
/// ```rust
/// use gestalt::{Properties, Value};
///
/// let mut props = Properties::new();
/// props.insert("first", Value::from("1")).unwrap();
/// props.insert("second[]", Value::from(vec!["2"])).unwrap();
///
/// // Iteration maintains declaration order
/// let keys: Vec<_> = props.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second[]"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(IndexMap<String, Value>);

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Properties(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Properties(IndexMap::with_capacity(capacity))
    }

    /// Parses spec text with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for the first malformed line.
    pub fn parse(input: &str) -> Result<Self> {
        crate::from_str(input)
    }

    /// Reads and parses the property file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] or [`Error::Io`] when the file cannot be
    /// read, and [`Error::Format`] when its content is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::from_path(path)
    }

    /// Returns the raw value bound to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the raw value bound to `key`, or `default` if absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Returns the scalar bound to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingKey`] if absent, [`Error::KindMismatch`] if not a scalar.
    pub fn get_string(&self, key: &str) -> Result<&str> {
        match self.lookup(key, Kind::Scalar)? {
            Value::Scalar(s) => Ok(s),
            other => Err(Error::kind_mismatch(key, Kind::Scalar, other.kind())),
        }
    }

    #[must_use]
    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }

    /// Returns the list bound to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingKey`] if absent, [`Error::KindMismatch`] if not a list.
    pub fn get_list(&self, key: &str) -> Result<&[String]> {
        match self.lookup(key, Kind::List)? {
            Value::List(list) => Ok(list),
            other => Err(Error::kind_mismatch(key, Kind::List, other.kind())),
        }
    }

    #[must_use]
    pub fn get_list_or<'a>(&'a self, key: &str, default: &'a [String]) -> &'a [String] {
        self.get_list(key).unwrap_or(default)
    }

    /// Returns the table bound to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingKey`] if absent, [`Error::KindMismatch`] if not a table.
    pub fn get_table(&self, key: &str) -> Result<&Table> {
        match self.lookup(key, Kind::Table)? {
            Value::Table(table) => Ok(table),
            other => Err(Error::kind_mismatch(key, Kind::Table, other.kind())),
        }
    }

    #[must_use]
    pub fn get_table_or<'a>(&'a self, key: &str, default: &'a Table) -> &'a Table {
        self.get_table(key).unwrap_or(default)
    }

    fn lookup(&self, key: &str, expected: Kind) -> Result<&Value> {
        let value = self.get(key).ok_or_else(|| Error::missing_key(key))?;
        if value.kind() != expected {
            return Err(Error::kind_mismatch(key, expected, value.kind()));
        }
        Ok(value)
    }

    /// Returns the subset of `keys` that is absent, in request order.
    ///
    /// An empty result means every key is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::from_str;
    ///
    /// let props = from_str("a = 1").unwrap();
    /// assert!(props.must_have(&["a"]).is_empty());
    /// assert_eq!(props.must_have(&["a", "b", "c[]"]), vec!["b", "c[]"]);
    /// ```
    #[must_use]
    pub fn must_have<K: AsRef<str>>(&self, keys: &[K]) -> Vec<String> {
        keys.iter()
            .map(AsRef::as_ref)
            .filter(|k| !self.contains_key(k))
            .map(str::to_string)
            .collect()
    }

    /// Checks that every key in `keys` is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKeys`] naming the absent keys.
    pub fn verify_must<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        let missing = self.must_have(keys);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingKeys(missing))
        }
    }

    /// Binds `value` to `key`, keeping the kind invariant.
    ///
    /// The value's kind must match the kind the key's suffix selects under the
    /// default [`SpecOptions`], and an existing binding may not change kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] when either check fails.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        self.insert_with_options(key, value, &SpecOptions::default())
    }

    /// Like [`Properties::insert`], classifying the key with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] when the value does not fit the key.
    pub fn insert_with_options(
        &mut self,
        key: impl Into<String>,
        value: Value,
        options: &SpecOptions,
    ) -> Result<Option<Value>> {
        let key = key.into();
        let expected = match self.get(&key) {
            Some(existing) => existing.kind(),
            None => options.classify(&key),
        };
        if value.kind() != expected {
            return Err(Error::kind_mismatch(&key, expected, value.kind()));
        }
        Ok(self.0.insert(key, value))
    }

    /// Binds `value` to `key` without any kind check.
    ///
    /// This is the raw map escape hatch: a key may end up holding a kind its
    /// suffix does not select, and typed getters will then report a mismatch.
    pub fn insert_unchecked(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in declaration order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Copies every property of `from` into `self`.
    ///
    /// With `overwrite` unset, keys already present in `self` keep their value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::from_str;
    ///
    /// let mut props = from_str("a = 1").unwrap();
    /// let other = from_str("a = 2\nb = 3").unwrap();
    ///
    /// props.merge(&other, false);
    /// assert_eq!(props.get_string("a").unwrap(), "1");
    /// assert_eq!(props.get_string("b").unwrap(), "3");
    ///
    /// props.merge(&other, true);
    /// assert_eq!(props.get_string("a").unwrap(), "2");
    /// ```
    pub fn merge(&mut self, from: &Properties, overwrite: bool) {
        for (key, value) in from.iter() {
            if overwrite || !self.contains_key(key) {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }

    /// Fills gaps in `self` (the child) from `parent` without overwriting.
    ///
    /// - Keys only in the parent are copied verbatim.
    /// - Lists present in both become the child's elements that the parent
    ///   lacks, in child order, followed by the whole parent list.
    /// - Tables present in both gain the parent's sub-entries whose sub-keys
    ///   the child lacks.
    /// - Anything else present in both keeps the child's value.
    ///
    /// A `None` parent leaves `self` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gestalt::from_str;
    ///
    /// let parent = from_str("p[] = x, y\nt[:] = a:1, b:2\nname = parent").unwrap();
    /// let mut child = from_str("p[] = y, z\nt[:] = a:9\nname = child").unwrap();
    ///
    /// child.inherit(Some(&parent));
    /// assert_eq!(child.get_list("p[]").unwrap(), ["z", "x", "y"]);
    /// assert_eq!(child.get_table("t[:]").unwrap()["a"], "9");
    /// assert_eq!(child.get_table("t[:]").unwrap()["b"], "2");
    /// assert_eq!(child.get_string("name").unwrap(), "child");
    /// ```
    pub fn inherit(&mut self, parent: Option<&Properties>) {
        let Some(parent) = parent else {
            return;
        };

        for (key, inherited) in parent.iter() {
            let Some(own) = self.0.get_mut(key) else {
                self.0.insert(key.clone(), inherited.clone());
                continue;
            };
            match (own, inherited) {
                (Value::List(own), Value::List(inherited)) => {
                    let seen: HashSet<&str> = inherited.iter().map(String::as_str).collect();
                    let mut combined: Vec<String> = own
                        .iter()
                        .filter(|v| !seen.contains(v.as_str()))
                        .cloned()
                        .collect();
                    combined.extend(inherited.iter().cloned());
                    *own = combined;
                }
                (Value::Table(own), Value::Table(inherited)) => {
                    for (sub_key, sub_value) in inherited {
                        own.entry(sub_key.clone())
                            .or_insert_with(|| sub_value.clone());
                    }
                }
                _ => trace!(key = key.as_str(), "keeping child value"),
            }
        }
    }
}

impl FromStr for Properties {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::from_str(s)
    }
}

impl fmt::Display for Properties {
    /// Writes the canonical spec text when the store can be printed, and one
    /// `key = value` line per entry otherwise. Use [`crate::to_string`] when
    /// the output has to parse back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => {
                for (key, value) in self {
                    writeln!(f, "{} = {}", key, value)?;
                }
                Ok(())
            }
        }
    }
}

impl IntoIterator for Properties {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Properties {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Properties(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for Properties {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(text: &str) -> Properties {
        crate::from_str(text).unwrap()
    }

    #[test]
    fn test_uniform_accessor_failures() {
        let p = props("s = v\nl[] = a\nt[:] = a:1");

        assert!(matches!(p.get_string("nope"), Err(Error::MissingKey(_))));
        assert!(matches!(p.get_list("nope"), Err(Error::MissingKey(_))));
        assert!(matches!(p.get_table("nope"), Err(Error::MissingKey(_))));

        assert!(matches!(
            p.get_string("l[]"),
            Err(Error::KindMismatch { expected: Kind::Scalar, found: Kind::List, .. })
        ));
        assert!(matches!(
            p.get_list("t[:]"),
            Err(Error::KindMismatch { expected: Kind::List, found: Kind::Table, .. })
        ));
        assert!(matches!(
            p.get_table("s"),
            Err(Error::KindMismatch { expected: Kind::Table, found: Kind::Scalar, .. })
        ));
    }

    #[test]
    fn test_or_defaults() {
        let p = props("s = v\nl[] = a");
        let list_default = vec!["d".to_string()];
        let table_default = Table::new();

        assert_eq!(p.get_string_or("s", "d"), "v");
        assert_eq!(p.get_string_or("l[]", "d"), "d");
        assert_eq!(p.get_list_or("l[]", &list_default), ["a"]);
        assert_eq!(p.get_list_or("s", &list_default), ["d"]);
        assert!(p.get_table_or("s", &table_default).is_empty());
        assert_eq!(
            p.get_or("missing", &Value::from("raw")),
            &Value::from("raw")
        );
    }

    #[test]
    fn test_empty_scalar_is_present() {
        let p = props("zerovalue =");
        assert_eq!(p.get_string_or("zerovalue", "default"), "");
        assert!(p.must_have(&["zerovalue"]).is_empty());
    }

    #[test]
    fn test_verify_must() {
        let p = props("a = 1\nb[] = x");
        assert!(p.verify_must(&["a", "b[]"]).is_ok());
        match p.verify_must(&["a", "c", "d[:]"]) {
            Err(Error::MissingKeys(missing)) => assert_eq!(missing, vec!["c", "d[:]"]),
            other => panic!("expected missing keys, got {:?}", other),
        }
    }

    #[test]
    fn test_checked_insert_keeps_kind() {
        let mut p = Properties::new();
        assert!(p.insert("hosts[]", Value::from(vec!["a"])).unwrap().is_none());
        assert!(p.insert("hosts[]", Value::from("a")).is_err());
        assert!(p.insert("name", Value::from(vec!["a"])).is_err());
        assert!(p.insert("env[:]", Value::from(Table::new())).is_ok());

        // The escape hatch allows anything; typed getters then refuse it.
        p.insert_unchecked("name", Value::from(vec!["a"]));
        assert!(p.get_string("name").is_err());
        assert_eq!(p.get_list("name").unwrap(), ["a"]);
    }

    #[test]
    fn test_merge_overwrite_and_fill() {
        let mut p = props("a = 1\nl[] = x");
        let other = props("a = 2\nl[] = y\nb = 3");

        p.merge(&other, false);
        assert_eq!(p.get_string("a").unwrap(), "1");
        assert_eq!(p.get_list("l[]").unwrap(), ["x"]);
        assert_eq!(p.get_string("b").unwrap(), "3");

        p.merge(&other, true);
        assert_eq!(p.get_string("a").unwrap(), "2");
        assert_eq!(p.get_list("l[]").unwrap(), ["y"]);
    }

    #[test]
    fn test_inherit_lists_keep_parent_at_tail() {
        let parent = props("p[] = x, y, x");
        let mut child = props("p[] = y, z, z, w");
        child.inherit(Some(&parent));
        assert_eq!(child.get_list("p[]").unwrap(), ["z", "z", "w", "x", "y", "x"]);
    }

    #[test]
    fn test_inherit_copies_missing_and_keeps_mismatched() {
        let parent = props("only.parent = p\nmixed[] = a");
        let mut child = Properties::new();
        child.insert_unchecked("mixed[]", Value::from("own"));

        child.inherit(Some(&parent));
        assert_eq!(child.get_string("only.parent").unwrap(), "p");
        assert_eq!(child.get("mixed[]"), Some(&Value::from("own")));
    }

    #[test]
    fn test_inherit_none_is_noop() {
        let mut child = props("a = 1");
        let before = child.clone();
        child.inherit(None);
        assert_eq!(child, before);
    }

    #[test]
    fn test_display_never_fails() {
        let p = props("name = demo\nl[] = a, b");
        assert_eq!(format!("{}", p), "name = demo\nl[] = a, b\n");

        let mut p = Properties::new();
        p.insert_unchecked("k", Value::from("a = b"));
        p.insert_unchecked("l[]", Value::from(vec!["x,y"]));
        assert_eq!(p.to_string(), "k = a = b\nl[] = [x,y]\n");

        let p = props("k = a\rb");
        assert_eq!(format!("{}", p), "k = a\rb\n");
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut p = props("a = 1\nb = 2\nc = 3");
        assert_eq!(p.remove("b"), Some(Value::from("2")));
        let keys: Vec<_> = p.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
