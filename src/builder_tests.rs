use super::*;
use crate::Spanned;
use Provenance::*;

fn key(name: &str, start: u32) -> Key {
    Key::new(name, Span::new(start, start + name.chars().count() as u32))
}

fn int(value: i64) -> Value {
    Value::Integer(Spanned::new(value))
}

#[test]
fn reconcile_matrix() {
    let all = [
        Inline,
        HeaderImplicit,
        HeaderExplicit,
        DottedImplicit,
        DottedExplicit,
    ];
    // rows: existing, columns: requested (same order as `all`)
    let expected: [[Option<Provenance>; 5]; 5] = [
        [None, None, None, None, None],
        [
            None,
            Some(HeaderImplicit),
            Some(HeaderExplicit),
            None,
            None,
        ],
        [None, Some(HeaderExplicit), None, None, None],
        [
            Some(Inline),
            Some(HeaderImplicit),
            None,
            Some(DottedImplicit),
            Some(DottedExplicit),
        ],
        [
            None,
            None,
            None,
            Some(DottedExplicit),
            Some(DottedExplicit),
        ],
    ];
    for (row, existing) in all.iter().enumerate() {
        for (col, requested) in all.iter().enumerate() {
            assert_eq!(
                reconcile(*existing, *requested),
                expected[row][col],
                "existing {existing:?} requested {requested:?}"
            );
        }
    }
}

#[test]
fn created_tables_take_requested_tag() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    let a = builder
        .get_or_create_sub_table(root, &key("a", 1), HeaderExplicit, Span::new(0, 3))
        .unwrap();
    // a second explicit header is a duplicate
    let err = builder
        .get_or_create_sub_table(root, &key("a", 5), HeaderExplicit, Span::new(4, 7))
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateKey {
            key: "a".into(),
            first: Span::new(1, 2)
        }
    );
    assert_eq!(err.span, Span::new(5, 6));
    // walking through it is fine
    let again = builder
        .get_or_create_sub_table(root, &key("a", 9), HeaderImplicit, Span::new(8, 13))
        .unwrap();
    assert_eq!(a, again);
}

#[test]
fn implicit_table_upgrades_and_takes_header_span() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    let a = builder
        .get_or_create_sub_table(root, &key("a", 1), HeaderImplicit, Span::new(0, 5))
        .unwrap();
    builder
        .get_or_create_sub_table(a, &key("b", 3), HeaderExplicit, Span::new(0, 5))
        .unwrap();
    let upgraded = builder
        .get_or_create_sub_table(root, &key("a", 7), HeaderExplicit, Span::new(6, 9))
        .unwrap();
    assert_eq!(a, upgraded);

    let table = builder.finish(Span::new(0, 9));
    let a = table.get("a").unwrap().as_table().unwrap();
    assert_eq!(a.span(), Span::new(6, 9));
    assert_eq!(a.get("b").unwrap().span(), Span::new(0, 5));
    assert_eq!(table.span(), Span::new(0, 9));
}

#[test]
fn array_of_tables_appends_and_extends_last() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    let first = builder
        .create_array_sub_table(root, &key("a", 2), Span::new(0, 5))
        .unwrap();
    builder.add(first, key("x", 6), int(1)).unwrap();
    let second = builder
        .create_array_sub_table(root, &key("a", 14), Span::new(12, 17))
        .unwrap();
    assert_ne!(first, second);

    // a header below the array lands in the latest element
    let walked = builder
        .get_or_create_sub_table(root, &key("a", 19), HeaderImplicit, Span::new(18, 23))
        .unwrap();
    assert_eq!(walked, second);

    // naming the array itself as a table is a duplicate
    let err = builder
        .get_or_create_sub_table(root, &key("a", 25), HeaderExplicit, Span::new(24, 27))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }));

    let table = builder.finish(Span::new(0, 27));
    let array = table.get("a").unwrap().as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array.span(), Span::new(0, 5));
    assert_eq!(
        array.get(0).unwrap().as_table().unwrap().get("x"),
        Some(&int(1))
    );
    assert!(array.get(1).unwrap().as_table().unwrap().is_empty());
}

#[test]
fn array_of_tables_over_other_values_is_duplicate() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    builder.add(root, key("a", 0), int(1)).unwrap();
    builder
        .get_or_create_sub_table(root, &key("t", 10), HeaderExplicit, Span::new(9, 12))
        .unwrap();

    for name in ["a", "t"] {
        let err = builder
            .create_array_sub_table(root, &key(name, 20), Span::new(18, 23))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }), "{name}");
        assert_eq!(err.span, Span::new(20, 21));
    }
}

#[test]
fn completed_values_cannot_be_extended() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    builder.add(root, key("n", 0), int(1)).unwrap();
    builder
        .add(
            root,
            key("arr", 6),
            Value::Array(Array::from_values(Span::new(12, 14), Vec::new())),
        )
        .unwrap();
    builder
        .add(
            root,
            key("inline", 15),
            Value::Table(Table::from_entries(Span::new(24, 26), Vec::new())),
        )
        .unwrap();

    let err = builder
        .get_or_create_sub_table(root, &key("n", 30), DottedImplicit, Span::new(30, 31))
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::CannotDefineSubKeyOfNonTable { key: "n".into() }
    );

    let err = builder
        .get_or_create_sub_table(root, &key("arr", 30), HeaderImplicit, Span::new(29, 40))
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::CannotDefineSubKeyOfNonTable { key: "arr".into() }
    );

    let err = builder
        .get_or_create_sub_table(root, &key("n", 30), HeaderExplicit, Span::new(29, 32))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }));

    for requested in [HeaderImplicit, HeaderExplicit, DottedImplicit, DottedExplicit] {
        let err = builder
            .get_or_create_sub_table(root, &key("inline", 30), requested, Span::new(30, 36))
            .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::DuplicateKey {
                key: "inline".into(),
                first: Span::new(15, 21)
            }
        );
    }
}

#[test]
fn add_rejects_any_existing_key() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    builder.add(root, key("a", 0), int(1)).unwrap();
    builder
        .get_or_create_sub_table(root, &key("t", 4), DottedImplicit, Span::new(4, 5))
        .unwrap();
    builder
        .create_array_sub_table(root, &key("aot", 8), Span::new(6, 13))
        .unwrap();

    for name in ["a", "t", "aot"] {
        let err = builder.add(root, key(name, 20), int(2)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }), "{name}");
    }
}

#[test]
fn insert_dotted_shares_prefix_tables() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    builder
        .insert_dotted(root, &[key("a", 0)], key("b", 2), int(1), DottedImplicit)
        .unwrap();
    builder
        .insert_dotted(root, &[key("a", 10)], key("c", 12), int(2), DottedImplicit)
        .unwrap();
    let err = builder
        .insert_dotted(root, &[key("a", 20)], key("b", 22), int(3), DottedImplicit)
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateKey {
            key: "b".into(),
            first: Span::new(2, 3)
        }
    );

    // a header cannot reopen a table made by dotted keys
    let err = builder
        .get_or_create_sub_table(root, &key("a", 31), HeaderExplicit, Span::new(30, 33))
        .unwrap_err();
    assert_eq!(err.span, Span::new(31, 32));

    let table = builder.finish(Span::new(0, 33));
    let a = table.get("a").unwrap().as_table().unwrap();
    assert_eq!(a.span(), Span::new(0, 1));
    assert_eq!(a.keys().collect::<Vec<_>>(), ["b", "c"]);
}

#[test]
fn large_tables_use_the_index() {
    let mut builder = DocumentBuilder::new(HeaderExplicit);
    let root = builder.root();
    for i in 0..40u32 {
        let name = format!("k{i}");
        builder.add(root, key(&name, i * 10), int(i as i64)).unwrap();
    }
    assert!(builder.nodes[0].index.is_some());
    let err = builder.add(root, key("k3", 500), int(0)).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateKey {
            key: "k3".into(),
            first: Span::new(30, 32)
        }
    );
    let t = builder
        .get_or_create_sub_table(root, &key("sub", 600), DottedImplicit, Span::new(600, 603))
        .unwrap();
    let again = builder
        .get_or_create_sub_table(root, &key("sub", 700), DottedImplicit, Span::new(700, 703))
        .unwrap();
    assert_eq!(t, again);

    let table = builder.finish(Span::new(0, 800));
    assert_eq!(table.len(), 41);
    let names: Vec<_> = table.keys().collect();
    assert_eq!(names[0], "k0");
    assert_eq!(names[39], "k39");
    assert_eq!(names[40], "sub");
}
