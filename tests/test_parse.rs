//! Accept-Encoding パースの表テスト
//!
//! 実際のクライアントが送るヘッダー値と、境界値を含む入力に対して
//! 期待する集合を列挙する。

use shiguredo_accept_encoding::{Encoding, EncodingSet, parse};

const IDENTITY: Encoding = Encoding::Identity;
const DEFLATE: Encoding = Encoding::Deflate;
const COMPRESS: Encoding = Encoding::Compress;
const GZIP: Encoding = Encoding::Gzip;
const BROTLI: Encoding = Encoding::Brotli;

fn set(encodings: &[Encoding]) -> EncodingSet {
    encodings.iter().copied().collect()
}

#[test]
fn parse_table() {
    let cases: &[(&str, &[Encoding])] = &[
        ("identity", &[IDENTITY]),
        ("br", &[IDENTITY, BROTLI]),
        ("bR", &[IDENTITY, BROTLI]),
        ("gzip", &[IDENTITY, GZIP]),
        ("GzIp", &[IDENTITY, GZIP]),
        ("deflate", &[IDENTITY, DEFLATE]),
        ("compress", &[IDENTITY, COMPRESS]),
        ("GzIp, Br", &[IDENTITY, GZIP, BROTLI]),
        (" gzip, br ", &[IDENTITY, BROTLI, GZIP]),
        ("gzip, deflate", &[IDENTITY, GZIP, DEFLATE]),
        ("gzip, deflate, br", &[IDENTITY, GZIP, DEFLATE, BROTLI]),
        ("identity;q=0", &[]),
        (" gzip, br;q=0 ", &[IDENTITY, GZIP]),
        ("gzip, br;p=x;q=0", &[IDENTITY, GZIP]),
        ("*;q=0, br", &[BROTLI]),
        ("identity;q=0, gzip", &[GZIP]),
        ("compress, gzip", &[COMPRESS, GZIP, IDENTITY]),
        ("compress;q=0.5, gzip;q=1.0", &[COMPRESS, GZIP, IDENTITY]),
        ("gzip;q=1.0, identity; q=0.5, *;q=0", &[GZIP, IDENTITY]),
        ("ABC, gzip", &[GZIP, IDENTITY]),
        ("ABCDEFGHIJKLMNOPQRSTUVWXYZ, gzip", &[GZIP, IDENTITY]),
        ("ABCDEFGHIJKLMNOPQRSTUVWXYZ012345", &[IDENTITY]),
        ("ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456", &[IDENTITY]),
        (
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz, gzip",
            &[GZIP, IDENTITY],
        ),
        ("gzip;q=1e39", &[IDENTITY]),
        ("gzip;q=inf", &[IDENTITY, GZIP]),
        ("gzip;q=nan", &[IDENTITY, GZIP]),
        ("gzip;q=1e-50", &[IDENTITY]),
        ("gzip;q=0x1p-2", &[IDENTITY, GZIP]),
        ("identity;q=1e39, br", &[BROTLI]),
    ];

    for (header, expected) in cases {
        assert_eq!(parse(header), set(expected), "Parse({:?})", header);
    }
}

#[test]
fn parse_everything() {
    assert_eq!(parse(""), EncodingSet::ALL);
    assert_eq!(parse("*"), EncodingSet::ALL);
}

#[test]
fn parse_browser_headers() {
    // Chrome / Firefox
    assert_eq!(
        parse("gzip, deflate, br, zstd"),
        set(&[IDENTITY, DEFLATE, GZIP, BROTLI])
    );
    // curl --compressed
    assert_eq!(
        parse("deflate, gzip, br, zstd"),
        set(&[IDENTITY, DEFLATE, GZIP, BROTLI])
    );
    // Safari
    assert_eq!(parse("gzip, deflate, br"), set(&[IDENTITY, DEFLATE, GZIP, BROTLI]));
}

#[test]
fn parse_is_order_independent() {
    assert_eq!(parse("gzip, br"), parse("br, gzip"));
    assert_eq!(parse("gzip, br"), set(&[IDENTITY, GZIP, BROTLI]));
    assert_eq!(parse("*;q=0, br"), parse("br, *;q=0"));
}

// 同じエンコーディングに矛盾する q 値がある場合、受け入れが一度でもあれば受け入れになる。
// identity 以外は unsupported で取り除かれないため、"最も厳しい指定を優先" にはならない。
#[test]
fn conflicting_q_values_accept() {
    assert_eq!(parse("gzip;q=0, gzip"), set(&[IDENTITY, GZIP]));
    assert_eq!(parse("gzip, gzip;q=0"), set(&[IDENTITY, GZIP]));
    assert_eq!(parse("br, *;q=0"), set(&[BROTLI]));
}

#[test]
fn parse_many_garbage_entries() {
    let header = vec!["x-unknown;q=0.5"; 10_000].join(", ");
    assert_eq!(parse(&header), set(&[IDENTITY]));

    let header = format!("{}, gzip;q=0", ",".repeat(10_000));
    assert_eq!(parse(&header), set(&[IDENTITY]));
}
