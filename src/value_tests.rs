use super::*;

fn root(input: &str) -> Table {
    crate::parse(input).unwrap()
}

#[test]
fn type_names_and_accessors() {
    let t = root(
        "s = 'x'\n\
         i = 1\n\
         f = 1.5\n\
         b = true\n\
         ld = 2024-01-15\n\
         ldt = 2024-01-15T10:00:00\n\
         lt = 10:00:00\n\
         odt = 2024-01-15T10:00:00Z\n\
         a = []\n\
         t = {}\n",
    );
    let expected = [
        ("s", "string"),
        ("i", "integer"),
        ("f", "float"),
        ("b", "boolean"),
        ("ld", "local date"),
        ("ldt", "local date-time"),
        ("lt", "local time"),
        ("odt", "offset date-time"),
        ("a", "array"),
        ("t", "table"),
    ];
    for (key, type_str) in expected {
        assert_eq!(t.get(key).unwrap().type_str(), type_str, "{key}");
    }

    let s = t.get("s").unwrap();
    assert_eq!(s.as_str(), Some("x"));
    assert_eq!(s.as_integer(), None);
    assert_eq!(s.as_table(), None);
    assert_eq!(t.get("i").unwrap().as_float(), None);
    assert_eq!(t.get("f").unwrap().as_integer(), None);
    assert!(t.get("ld").unwrap().as_local_date_time().is_none());
    assert!(t.get("odt").unwrap().as_local_date_time().is_none());
    assert!(t.get("a").unwrap().as_array().is_some());

    let date = t.get("ld").unwrap().as_local_date().unwrap();
    assert_eq!((date.year, date.month, date.day), (2024, 1, 15));
    let time = t.get("lt").unwrap().as_local_time().unwrap();
    assert_eq!((time.hour, time.minute, time.second), (10, 0, 0));
}

#[test]
fn spanned_string_access() {
    let t = root("name = \"héllo\"");
    let name = t.get("name").unwrap().as_spanned_str().unwrap();
    assert_eq!(name.value, "héllo");
    assert_eq!(name.span, Span::new(7, 14));
    assert!(t.get("missing").is_none());
}

#[test]
fn equality_ignores_spans() {
    let a = root("x = [1, 'two', { k = true }]");
    let b = root("x   =   [ 1 ,   'two' , {k=true} ]");
    assert_eq!(a, b);
    assert_ne!(a.get("x").unwrap().span(), b.get("x").unwrap().span());

    let c = root("x = [1, 'two', { k = false }]");
    assert_ne!(a, c);
}

#[test]
fn keys_compare_by_name() {
    let a = Key::new("port", Span::new(0, 4));
    let b = Key::new("port", Span::new(10, 14));
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "port");
    assert_eq!(a.to_string(), "port");
    assert_eq!(format!("{a:?}"), "port");

    let mut set = foldhash::HashSet::default();
    set.insert(a);
    assert!(set.contains("port"));
}

#[test]
fn debug_shows_values_only() {
    let t = root("a = 1\nb = 'x'\nc = [true]\nd = 1979-05-27");
    assert_eq!(
        format!("{t:?}"),
        "{a: 1, b: \"x\", c: [true], d: 1979-05-27}"
    );
}
