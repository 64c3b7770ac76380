use super::*;

fn decode(bytes: &[u8]) -> Vec<Result<char, MalformedInput>> {
    Utf8Codepoints::new(bytes).collect()
}

#[test]
fn well_formed_sequences() {
    let text = "a\u{0}ü€𝄞\u{10FFFF}";
    let chars: Vec<_> = decode(text.as_bytes())
        .into_iter()
        .map(|c| c.unwrap())
        .collect();
    assert_eq!(chars, text.chars().collect::<Vec<_>>());
    assert!(decode(b"").is_empty());
}

#[test]
fn malformed_sequences_fail_once() {
    let cases: &[&[u8]] = &[
        b"\x80",                 // stray continuation
        b"\xC0\x80",             // overlong NUL
        b"\xC1\xBF",             // overlong
        b"\xE0\x80\x80",         // overlong 3-byte
        b"\xED\xA0\x80",         // surrogate D800
        b"\xF4\x90\x80\x80",     // above U+10FFFF
        b"\xF5\x80\x80\x80",     // invalid lead
        b"\xFF",                 // invalid lead
        b"\xE2\x82",             // truncated
        b"\xC3",                 // truncated
        b"\xC3\x28",             // bad continuation
    ];
    for bytes in cases {
        let out = decode(bytes);
        assert_eq!(out, vec![Err(MalformedInput)], "{bytes:?}");
    }
}

#[test]
fn failure_after_valid_prefix() {
    let out = decode(b"ab\xFFcd");
    assert_eq!(out, vec![Ok('a'), Ok('b'), Err(MalformedInput)]);
}
