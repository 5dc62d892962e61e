use std::borrow::Cow;

use lenient_uri::{
    pct_enc::{escape, escape_bytes, table::*, unescape, unescape_range, unescape_to_bytes, Table},
    SyntaxErrorKind,
};

const ALL_TABLES: [Table; 18] = [
    ALPHA, DIGIT, HEXDIG, UNRESERVED, GEN_DELIMS, SUB_DELIMS, RESERVED, SCHEME, HOST, REG_NAME,
    USERINFO, USERNAME, IPV_FUTURE, SEGMENT, PATH, QUERY, QUERY_ARG, FRAGMENT,
];

#[test]
fn escape_by_table() {
    let s = "a b/c?d#e@f:g&h=i+j%k~l";
    assert_eq!(
        escape(s, UNRESERVED),
        "a%20b%2Fc%3Fd%23e%40f%3Ag%26h%3Di%2Bj%25k~l"
    );
    assert_eq!(escape(s, SEGMENT), "a%20b%2Fc%3Fd%23e@f:g&h=i+j%25k~l");
    assert_eq!(escape(s, PATH), "a%20b/c%3Fd%23e@f:g&h=i+j%25k~l");
    assert_eq!(escape(s, QUERY), "a%20b/c?d%23e@f:g&h=i+j%25k~l");
    assert_eq!(escape(s, QUERY_ARG), "a%20b/c?d%23e@f:g%26h%3Di%2Bj%25k~l");
    assert_eq!(escape(s, FRAGMENT), escape(s, QUERY));
    assert_eq!(escape(s, HOST), "a%20b%2Fc%3Fd%23e%40f%3Ag&h=i+j%25k~l");
    assert_eq!(escape(s, USERINFO), "a%20b%2Fc%3Fd%23e%40f:g&h=i+j%25k~l");
    assert_eq!(escape(s, USERNAME), "a%20b%2Fc%3Fd%23e%40f%3Ag&h=i+j%25k~l");
}

#[test]
fn escape_non_ascii() {
    assert_eq!(escape("张三", QUERY_ARG), "%E5%BC%A0%E4%B8%89");
    assert_eq!(escape("😃", UNRESERVED), "%F0%9F%98%83");
    assert_eq!(escape("\u{7f}\0", PATH), "%7F%00");
    for table in ALL_TABLES {
        assert_eq!(escape("é%", table), "%C3%A9%25");
    }
}

#[test]
fn escape_is_idempotent_on_canonical_strings() {
    for (s, table) in [
        ("example.com", HOST),
        ("/a/b;c=d/e:f@g", PATH),
        ("k=v&k2=v2/?", QUERY),
        ("user:pass", USERINFO),
        ("", SEGMENT),
    ] {
        let once = escape(s, table);
        assert!(matches!(once, Cow::Borrowed(_)), "{s}");
        assert_eq!(escape(&once, table), once);
    }
}

#[test]
fn unescape_inverts_escape() {
    let inputs = [
        "",
        "plain",
        "a b",
        "100% sure",
        "%41 is not an octet here",
        "key=value&other",
        "テスト/试验/🦀",
        "\0\u{7f}\u{80}\u{10ffff}",
    ];
    for s in inputs {
        for table in ALL_TABLES {
            assert_eq!(unescape(&escape(s, table)).unwrap(), s);
        }
    }

    let bytes = [0x00, 0x25, 0x7f, 0x80, 0xc3, 0xff];
    for table in ALL_TABLES {
        let encoded = escape_bytes(&bytes, table);
        assert!(encoded.is_ascii());
        assert_eq!(unescape_to_bytes(&encoded).unwrap().as_ref(), bytes);
    }
}

#[test]
fn unescape_accepts_either_case() {
    assert_eq!(unescape("%2f%2F%4a%4A").unwrap(), "//JJ");
    assert_eq!(unescape("%c3%A9").unwrap(), "é");
}

#[test]
fn unescape_errors() {
    for (s, kind, index) in [
        ("%", SyntaxErrorKind::IncompleteOctet, 0),
        ("ab%4", SyntaxErrorKind::IncompleteOctet, 2),
        ("%4%41", SyntaxErrorKind::InvalidOctet, 0),
        ("%%41", SyntaxErrorKind::InvalidOctet, 0),
        ("%41%g1", SyntaxErrorKind::InvalidOctet, 3),
        ("%41%1g", SyntaxErrorKind::InvalidOctet, 3),
    ] {
        let e = unescape(s).unwrap_err();
        assert_eq!(e.kind(), kind, "{s}");
        assert_eq!(e.index(), Some(index), "{s}");
        assert_eq!(e.input(), s);
    }

    // Raw bytes need not be UTF-8; text decoding replaces them.
    assert_eq!(unescape("a%E9b").unwrap(), "a\u{FFFD}b");
    assert_eq!(unescape_to_bytes("a%E9b").unwrap().as_ref(), b"a\xe9b");
    assert!(unescape_to_bytes("%zz").is_err());
}

#[test]
fn unescape_range_is_relative_to_input() {
    let s = "/p%20a/%ZZ?q";
    assert_eq!(unescape_range(s, 0..6).unwrap(), "/p a");

    let e = unescape_range(s, 6..10).unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::InvalidOctet);
    assert_eq!(e.index(), Some(7));
    assert_eq!(e.into_input(), s);

    assert!(matches!(unescape_range(s, 10..12), Ok(Cow::Borrowed("?q"))));
}
