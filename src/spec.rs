//! Property Spec Format
//!
//! This module documents the text format read by [`crate::from_str`] and
//! written by [`crate::to_string`].
//!
//! # Overview
//!
//! A property spec is a sequence of `key = value` declarations separated by
//! line feeds. There is no nesting, interpolation, or typed coercion: every
//! value is a string, a list of strings, or a table of strings.
//!
//! # Reserved Characters
//!
//! | Character | Meaning |
//! |-----------|---------|
//! | `=`  | Separates key from value; exactly one per declaration |
//! | `#`  | Starts a comment running to the end of the physical line |
//! | `\`  | At the end of a physical line, continues the declaration on the next one |
//! | `,`  | Separates list elements and table entries |
//! | `:`  | Separates a table entry's sub-key from its sub-value (first `:` only) |
//! | `"`  | Encloses a value whose boundary whitespace must be kept |
//!
//! # Keys
//!
//! Keys are trimmed of surrounding spaces and tabs and may contain inner
//! whitespace. The suffix selects the value kind:
//!
//! | Suffix | Kind | Example |
//! |--------|------|---------|
//! | `[:]` (or `map[]`, see below) | Table | `env[:] = a:1, b:2` |
//! | `[]` | List | `hosts[] = a, b` |
//! | anything else | Scalar | `name = demo` |
//!
//! The table suffix is checked first. It is `[:]` by default; the `map[]`
//! convention is available through
//! [`TableSuffix::Map`](crate::TableSuffix::Map). A parse uses one convention
//! and never switches based on the input.
//!
//! # Values
//!
//! ## Scalars
//!
//! ```text
//! prop one=prop one value          # "prop one" => "prop one value"
//! another property   =  value      # "another property" => "value"
//! log.info.level.id = "INFO "      # quotes keep the trailing space
//! zerovalue =                      # ""
//! ```
//!
//! The value is trimmed, then one enclosing pair of `"` is removed if both the
//! first and last characters are `"`.
//!
//! ## Lists
//!
//! ```text
//! an array [] = 1 , 2 , 3                 # ["1", "2", "3"]
//! another.array[] = "  1" , " 20", 300    # ["  1", " 20", "300"]
//! empty[] =                               # []
//! ```
//!
//! Elements are split on `,`, then trimmed and unquoted one by one. Empty
//! elements and duplicates are kept.
//!
//! ## Tables
//!
//! ```text
//! a map[:] = a:1 , b:2, c : 3 , d:4       # {a:1, b:2, c:3, d:4}
//! zv.entry[:] =  foo:bar, zerovalue:      # {foo:bar, zerovalue:}
//! empty.map[:] =                          # {}
//! ```
//!
//! Entries are split on `,`; each is split on its first `:` and both halves are
//! trimmed and unquoted. Entries without `:` are skipped. A repeated sub-key
//! keeps its last value.
//!
//! # Comments
//!
//! A `#` anywhere starts a comment to the end of its physical line. Because
//! the `#` is reserved, it cannot appear inside a value, quoted or not.
//!
//! # Continuations
//!
//! A `\` followed only by spaces, tabs, or a comment up to the line feed is a
//! continuation marker. It drops itself, the rest of its physical line, and the
//! following line feed. Every character of the next line, including leading
//! whitespace, is appended to the declaration. A `\` with other text after it
//! on the same line is kept as an ordinary character:
//!
//! ```text
//! long one = This sentence ends \
//! in 4 spaces\
//!     .                                   # "This sentence ends in 4 spaces    ."
//!
//! multi-line[] = a, b, c, \
//!                12\
//!  4567  ,\
//!                d, e                     # ["a", "b", "c", "12 4567", "d", "e"]
//!
//! dir = C:\temp                           # "C:\temp"
//! ```
//!
//! List and table elements are trimmed after joining, so indentation on
//! continued lines only survives inside a scalar or inside one element.
//!
//! # Errors
//!
//! A declaration that, after comment removal, has no `=` or more than one `=`
//! fails the whole parse with [`Error::Format`](crate::Error::Format), naming
//! the physical line where the declaration starts. Lines shorter than three
//! characters, blank lines, and comment lines are ignored. An empty input is a
//! valid, empty set of properties.
