use gestalt::{from_path, from_path_with_options, from_str, Error, SpecOptions, TableSuffix};

const CANONICAL: &str = include_str!("data/canonical.conf");

fn table(entries: &[(&str, &str)]) -> gestalt::Table {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_canonical_scalars() {
    let props = from_str(CANONICAL).unwrap();

    assert_eq!(props.get_string("prop one").unwrap(), "prop one value");
    assert_eq!(props.get_string("another property").unwrap(), "value");
    assert_eq!(props.get_string("log.info.level.id").unwrap(), "INFO ");
    assert_eq!(props.get_string("leading.whitespace").unwrap(), " test");
    assert_eq!(
        props.get_string("long one").unwrap(),
        "This sentence ends in 4 spaces    ."
    );
    assert_eq!(props.get_string("zerovalue").unwrap(), "");
}

#[test]
fn test_canonical_lists() {
    let props = from_str(CANONICAL).unwrap();

    assert_eq!(props.get_list("an array []").unwrap(), ["1", "2", "3"]);
    assert_eq!(
        props.get_list("another.array[]").unwrap(),
        ["  1", " 20", "300"]
    );
    assert_eq!(
        props.get_list("multi-line[]").unwrap(),
        ["a", "b", "c", "12 4567", "d", "e"]
    );
    assert_eq!(props.get_list("another.one[]").unwrap(), ["a", "b", "c"]);
    assert!(props.get_list("empty[]").unwrap().is_empty());
}

#[test]
fn test_canonical_tables() {
    let props = from_str(CANONICAL).unwrap();
    let abcd = table(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);

    assert_eq!(props.get_table("a map[:]").unwrap(), &abcd);
    assert_eq!(props.get_table("multline.map[:]").unwrap(), &abcd);
    assert_eq!(
        props.get_table("zv.entry.map[:]").unwrap(),
        &table(&[("foo", "bar"), ("zerovalue", "")])
    );
    assert!(props.get_table("empty.map[:]").unwrap().is_empty());
}

#[test]
fn test_canonical_key_set() {
    let props = from_str(CANONICAL).unwrap();
    let keys: Vec<_> = props.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "prop one",
            "another property",
            "log.info.level.id",
            "leading.whitespace",
            "long one",
            "zerovalue",
            "an array []",
            "another.array[]",
            "multi-line[]",
            "another.one[]",
            "empty[]",
            "a map[:]",
            "multline.map[:]",
            "zv.entry.map[:]",
            "empty.map[:]",
        ]
    );
}

#[test]
fn test_map_suffix_convention_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/map_convention.conf");
    let options = SpecOptions::new().with_table_suffix(TableSuffix::Map);
    let props = from_path_with_options(path, &options).unwrap();

    assert_eq!(props.get_table("a map[]").unwrap()["c"], "3");
    assert_eq!(props.get_table("zv.entry.map[]").unwrap()["zerovalue"], "");
    assert_eq!(props.get_list("multi-line[]").unwrap().len(), 6);

    // Under the default convention the same keys are plain lists.
    let props = from_path(path).unwrap();
    assert_eq!(
        props.get_list("a map[]").unwrap(),
        ["a:1", "b:2", "c : 3", "d:4"]
    );
}

#[test]
fn test_multiline_array_with_tabs() {
    let spec = "\nfoo[] = a,  \\\n\tb,       \\\n\t\tc,    \\\n\t\t\td\n";
    let props = from_str(spec).unwrap();
    assert_eq!(props.get_list("foo[]").unwrap(), ["a", "b", "c", "d"]);
}

#[test]
fn test_multiline_string() {
    let spec = "\na.long.sentence = this is supposed to be\\\n a very\\\n long sentence.\n";
    let props = from_str(spec).unwrap();
    assert_eq!(
        props.get_string("a.long.sentence").unwrap(),
        "this is supposed to be a very long sentence."
    );
}

#[test]
fn test_mixed_declarations() {
    let spec = r#"
foo=bar
 woof = meow
 quoted = "INFO "
some.array[] = a, b , 	c, d
some.array.with.quoted.values[] = a, b, "   c", "d "
"#;
    let props = from_str(spec).unwrap();
    assert_eq!(props.get_string("foo").unwrap(), "bar");
    assert_eq!(props.get_string("woof").unwrap(), "meow");
    assert_eq!(props.get_string("quoted").unwrap(), "INFO ");
    assert_eq!(props.get_list("some.array[]").unwrap(), ["a", "b", "c", "d"]);
    assert_eq!(
        props.get_list("some.array.with.quoted.values[]").unwrap(),
        ["a", "b", "   c", "d "]
    );
}

#[test]
fn test_later_declaration_wins() {
    let props = from_str("a = 1\na = 2").unwrap();
    assert_eq!(props.len(), 1);
    assert_eq!(props.get_string("a").unwrap(), "2");
}

#[test]
fn test_crlf_input() {
    let props = from_str("a = 1\r\nl[] = x, \\\r\n  y\r\n").unwrap();
    assert_eq!(props.get_string("a").unwrap(), "1");
    assert_eq!(props.get_list("l[]").unwrap(), ["x", "y"]);
}

#[test]
fn test_malformed_lines_fail_whole_parse() {
    for spec in [
        "a = 1\nmissing assignment\nb = 2",
        "a = 1\nb = 2 = 3",
        "x[] = a, b\nnot=a=pair # even with a comment",
    ] {
        match from_str(spec) {
            Err(Error::Format { line, .. }) => assert_eq!(line, 2, "for {:?}", spec),
            other => panic!("expected format error for {:?}, got {:?}", spec, other),
        }
    }
}

#[test]
fn test_error_line_points_at_start_of_continued_declaration() {
    let spec = "# header\n\nok = 1\nbad \\\n  value\nz = 1";
    match from_str(spec) {
        Err(Error::Format { line, text }) => {
            assert_eq!(line, 4);
            assert_eq!(text, "bad   value");
        }
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_comment_hides_assignment() {
    // The second `=` is inside a trailing comment and does not count.
    let props = from_str("a = b # c = d").unwrap();
    assert_eq!(props.get_string("a").unwrap(), "b");

    // Without its `=`, the declaration is malformed.
    assert!(from_str("abc # = b").is_err());

    // Too short to be a declaration once the comment is gone.
    assert!(from_str("a # = b").unwrap().is_empty());
}

#[test]
fn test_continuation_followed_by_comment() {
    let props = from_str("l[] = a, \\ # first\n b # second").unwrap();
    assert_eq!(props.get_list("l[]").unwrap(), ["a", "b"]);
}

#[test]
fn test_backslash_inside_value_is_literal() {
    let props = from_str("dir = C:\\temp\nx = 1").unwrap();
    assert_eq!(props.get_string("dir").unwrap(), "C:\\temp");
    assert_eq!(props.get_string("x").unwrap(), "1");

    let props = from_str("dir = C:\\temp").unwrap();
    assert_eq!(props.get_string("dir").unwrap(), "C:\\temp");

    let props = from_str("paths[] = a\\b, c\\d\nsep[:] = win:\\, unix:/").unwrap();
    assert_eq!(props.get_list("paths[]").unwrap(), ["a\\b", "c\\d"]);
    assert_eq!(props.get_table("sep[:]").unwrap()["win"], "\\");
}
