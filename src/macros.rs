/// Builds a [`Value`](crate::Value) from a literal-like description.
///
/// - `value!("text")` is a scalar
/// - `value!(["a", "b"])` is a list
/// - `value!({"k": "v"})` is a table
///
/// # Examples
///
/// ```rust
/// use gestalt::{value, Value};
///
/// assert_eq!(value!("x"), Value::from("x"));
/// assert_eq!(value!(["a", "b"]), Value::from(vec!["a", "b"]));
/// assert_eq!(value!({"k": "v"}).as_table().unwrap()["k"], "v");
/// ```
#[macro_export]
macro_rules! value {
    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };

    ([ $($elem:expr),* $(,)? ]) => {
        $crate::Value::List(::std::vec![$(::std::string::String::from($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $val:expr),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert(::std::string::String::from($key), ::std::string::String::from($val));
        )*
        $crate::Value::Table(table)
    }};

    ($s:expr) => {
        $crate::Value::Scalar(::std::string::String::from($s))
    };
}

/// Builds [`Properties`](crate::Properties) from `key: value` pairs.
///
/// Values use the [`value!`] forms. Entries are inserted without kind checks,
/// in the order written.
///
/// # Examples
///
/// ```rust
/// use gestalt::properties;
///
/// let props = properties!({
///     "name": "demo",
///     "hosts[]": ["a", "b"],
///     "env[:]": {"region": "eu"}
/// });
/// assert_eq!(props.len(), 3);
/// assert_eq!(props.get_table("env[:]").unwrap()["region"], "eu");
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::Properties::new()
    };

    ({}) => {
        $crate::Properties::new()
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut properties = $crate::Properties::new();
        $(
            properties.insert_unchecked($key, $crate::value!($value));
        )*
        properties
    }};
}
