//! ASCII 文字列操作
//!
//! ## 概要
//!
//! ヘッダー値のトークン分割で使う、アロケーションを避けた ASCII 操作を提供します。
//!
//! - [`to_lower`]: 大文字を小文字に変換 (変換不要なら借用のまま返す)
//! - [`cut`]: 最初の区切り文字で 2 つに分割
//! - [`CharSet`]: NUL (0x00) から `?` (0x3F) までの文字集合と、その集合による前後のトリム
//!
//! ## 使い方
//!
//! ```rust
//! use std::borrow::Cow;
//!
//! use shiguredo_accept_encoding::ascii::{self, HORIZONTAL_SPACE};
//!
//! assert!(matches!(ascii::to_lower("gzip"), Cow::Borrowed("gzip")));
//! assert_eq!(ascii::to_lower("GzIp"), "gzip");
//!
//! assert_eq!(ascii::cut("q=0.5", '='), ("q", "0.5"));
//! assert_eq!(HORIZONTAL_SPACE.trim(" \tbr \t"), "br");
//! ```

use std::borrow::Cow;

/// 大文字 (`A`-`Z`) を小文字に変換した文字列を返す
///
/// 大文字を含まない場合はアロケーションせず `Cow::Borrowed` を返す。
/// 変換が必要な場合のみ 1 回だけアロケーションする。
/// 0x80 以上のバイトはそのまま残る。
pub fn to_lower(s: &str) -> Cow<'_, str> {
    // ラップアラウンドを使った範囲判定 (1 回の比較で 'A'..='Z' を判定する)
    let Some(first) = s.bytes().position(|b| b.wrapping_sub(b'A') <= b'Z' - b'A') else {
        return Cow::Borrowed(s);
    };

    let mut owned = s.to_owned();
    // first は ASCII バイトの位置なので文字境界
    owned[first..].make_ascii_lowercase();
    Cow::Owned(owned)
}

/// `s` を最初の `delimiter` の前後に分割する
///
/// `delimiter` が存在しない場合は `(s, "")` を返す。
/// 戻り値はどちらも `s` のスライスで、コピーは発生しない。
pub fn cut(s: &str, delimiter: char) -> (&str, &str) {
    s.split_once(delimiter).unwrap_or((s, ""))
}

/// NUL (0x00) から `?` (0x3F) までの ASCII 文字集合
///
/// ビット `c` が立っているとき文字 `c` が集合に含まれる。
/// 0x40 以上の文字は常に集合外として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CharSet(u64);

/// 改行 (`\n`) と復帰 (`\r`)
pub const NEW_LINE: CharSet = CharSet::EMPTY.with(b'\n').with(b'\r');

/// 空白 (` `) とタブ (`\t`)
pub const HORIZONTAL_SPACE: CharSet = CharSet::EMPTY.with(b' ').with(b'\t');

/// 改ページ (`\x0C`) と垂直タブ (`\x0B`)
pub const VERTICAL_SPACE: CharSet = CharSet::EMPTY.with(0x0C).with(0x0B);

/// すべての空白文字 (改行、水平空白、垂直空白)
pub const WHITE_SPACE: CharSet = NEW_LINE.union(HORIZONTAL_SPACE).union(VERTICAL_SPACE);

impl CharSet {
    /// 空集合
    pub const EMPTY: CharSet = CharSet(0);

    /// 文字 `c` を追加した集合を返す
    ///
    /// `c` が 0x40 以上の場合は集合を変更しない。
    pub const fn with(self, c: u8) -> CharSet {
        if c < 64 { CharSet(self.0 | 1 << c) } else { self }
    }

    /// 和集合
    pub const fn union(self, other: CharSet) -> CharSet {
        CharSet(self.0 | other.0)
    }

    /// 文字 `c` が集合に含まれるかどうか
    pub const fn contains(self, c: u8) -> bool {
        c < 64 && (1 << c) & self.0 != 0
    }

    /// 集合に含まれる文字を前後から取り除く
    pub fn trim(self, s: &str) -> &str {
        let bytes = s.as_bytes();
        let mut start = 0;
        let mut end = bytes.len();
        while start < end && self.contains(bytes[start]) {
            start += 1;
        }
        while end > start && self.contains(bytes[end - 1]) {
            end -= 1;
        }
        // 取り除くのは ASCII 文字のみなので start / end は文字境界
        &s[start..end]
    }
}
