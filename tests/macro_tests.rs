use gestalt::{properties, value, Properties, Table, Value};

#[test]
fn test_value_macro_scalar() {
    assert_eq!(value!("hello world"), Value::Scalar("hello world".to_string()));
    assert_eq!(value!(""), Value::Scalar(String::new()));

    let owned = String::from("owned");
    assert_eq!(value!(owned), Value::from("owned"));
}

#[test]
fn test_value_macro_list() {
    assert_eq!(value!([]), Value::List(vec![]));
    assert_eq!(
        value!(["a", "b", "a",]),
        Value::List(vec!["a".to_string(), "b".to_string(), "a".to_string()])
    );
}

#[test]
fn test_value_macro_table() {
    assert_eq!(value!({}), Value::Table(Table::new()));

    let mut expected = Table::new();
    expected.insert("a".to_string(), "1".to_string());
    expected.insert("b".to_string(), "2".to_string());
    assert_eq!(value!({"a": "1", "b": "2"}), Value::Table(expected));
}

#[test]
fn test_properties_macro_keeps_order() {
    let props = properties!({
        "z": "last letter",
        "a[]": ["x"],
        "m[:]": {"k": "v"}
    });

    let keys: Vec<_> = props.keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a[]", "m[:]"]);
}

#[test]
fn test_properties_macro_matches_parse() {
    let built = properties!({
        "name": "demo",
        "hosts[]": ["a", "b"],
        "env[:]": {"region": "eu"}
    });
    let parsed = gestalt::from_str("name = demo\nhosts[] = a, b\nenv[:] = region:eu").unwrap();
    assert_eq!(built, parsed);
    assert_eq!(properties!(), Properties::new());
}
