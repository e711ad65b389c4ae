// Rendered frontmatter read back by a YAML parser.
use jotter::vault::Properties;
use jotter::vault::frontmatter::render;
use serde_yaml::{Mapping, Value};

const STATEMENTS: &[&str] = &[
    "0x1F",
    "0o17",
    ".inf",
    "-.inf",
    ".NaN",
    "1e3",
    "+12",
    "007",
    "~x",
    "~",
    "2026-10-16",
    "12:30",
    "yes",
    "True",
    "null",
    "Null",
    "Buy milk",
    "Buy milk ",
    " leading",
    "a: b",
    "note # not a comment",
    "- dash",
    "[list]",
    "{map}",
    "&anchor",
    "*alias",
    "!tag",
    "%directive",
    "@at",
    "`tick",
    "'single'",
    "say \"hi\"",
    "back\\slash",
    "tab\there",
    "line\nbreak",
    "日本語",
    "",
];

fn read_back(yaml: &str) -> Mapping {
    serde_yaml::from_str(yaml).unwrap_or_else(|e| panic!("invalid YAML {:?}: {}", yaml, e))
}

#[test]
fn test_text_values_stay_strings() {
    for statement in STATEMENTS {
        let yaml = render(&Properties::new().with("intention statement", *statement));
        let map = read_back(&yaml);
        assert_eq!(
            map.get("intention statement"),
            Some(&Value::String(statement.to_string())),
            "rendered as {:?}",
            yaml
        );
    }
}

#[test]
fn test_list_items_stay_strings() {
    let items: Vec<String> = STATEMENTS.iter().map(|s| s.to_string()).collect();
    let yaml = render(&Properties::new().with("tags", items.clone()));
    let map = read_back(&yaml);

    let expected = Value::Sequence(items.into_iter().map(Value::String).collect());
    assert_eq!(map.get("tags"), Some(&expected));
}

#[test]
fn test_dates_and_keys_read_back() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let yaml = render(
        &Properties::new()
            .with("intention date", date)
            .with("2026", "numeric key")
            .with("Stage", "created"),
    );
    let map = read_back(&yaml);

    assert_eq!(map.get("intention date"), Some(&Value::String("2026-10-16".into())));
    assert_eq!(map.get("2026"), Some(&Value::String("numeric key".into())));
    assert_eq!(map.get("Stage"), Some(&Value::String("created".into())));
}
