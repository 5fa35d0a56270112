//! コンテントコーディングの語彙と集合
//!
//! ## 概要
//!
//! Accept-Encoding で扱うコンテントコーディング ([`Encoding`]) と、
//! その集合をビットで表現する [`EncodingSet`] を提供します。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_accept_encoding::encoding::{Encoding, EncodingSet};
//!
//! let set = EncodingSet::from(Encoding::Gzip) | EncodingSet::from(Encoding::Identity);
//! assert!(set.contains(Encoding::Gzip));
//! assert_eq!(set.to_string(), "identity, gzip");
//! assert_eq!("identity, gzip".parse::<EncodingSet>().unwrap(), set);
//! ```

use core::fmt;
use core::ops::{BitOr, BitOrAssign};
use core::str::FromStr;
use std::borrow::Cow;

use crate::ascii::{self, HORIZONTAL_SPACE};

/// エンコーディングパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// 空の入力
    Empty,
    /// 未知のエンコーディング
    UnknownEncoding,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::Empty => write!(f, "empty encoding"),
            EncodingError::UnknownEncoding => write!(f, "unknown encoding"),
        }
    }
}

impl std::error::Error for EncodingError {}

/// コンテントコーディング
///
/// 序数は [`EncodingSet`] のビット位置と表示順を決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Encoding {
    Identity = 0,
    Deflate = 1,
    Compress = 2,
    Gzip = 3,
    Brotli = 4,
}

impl Encoding {
    /// 全エンコーディング (序数順)
    pub const ALL: [Encoding; 5] = [
        Encoding::Identity,
        Encoding::Deflate,
        Encoding::Compress,
        Encoding::Gzip,
        Encoding::Brotli,
    ];

    /// 正規名の最大長 ("identity")
    pub const MAX_NAME_LEN: usize = {
        let mut max = 0;
        let mut i = 0;
        while i < Encoding::ALL.len() {
            let len = Encoding::ALL[i].as_str().len();
            if len > max {
                max = len;
            }
            i += 1;
        }
        max
    };

    /// 正規名 (小文字)
    pub const fn as_str(self) -> &'static str {
        match self {
            Encoding::Identity => "identity",
            Encoding::Deflate => "deflate",
            Encoding::Compress => "compress",
            Encoding::Gzip => "gzip",
            Encoding::Brotli => "br",
        }
    }

    /// 序数
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// 序数からエンコーディングを取得
    pub const fn from_ordinal(ordinal: u8) -> Option<Encoding> {
        match ordinal {
            0 => Some(Encoding::Identity),
            1 => Some(Encoding::Deflate),
            2 => Some(Encoding::Compress),
            3 => Some(Encoding::Gzip),
            4 => Some(Encoding::Brotli),
            _ => None,
        }
    }

    /// 序数に対応する名前
    ///
    /// 未定義の序数には `encoding(<序数>)` を返す。
    pub fn name_of(ordinal: u8) -> Cow<'static, str> {
        match Encoding::from_ordinal(ordinal) {
            Some(encoding) => Cow::Borrowed(encoding.as_str()),
            None => Cow::Owned(format!("encoding({})", ordinal)),
        }
    }

    const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// 小文字化済みの正規名から検索
    fn from_canonical(name: &str) -> Option<Encoding> {
        match name {
            "identity" => Some(Encoding::Identity),
            "deflate" => Some(Encoding::Deflate),
            "compress" => Some(Encoding::Compress),
            "gzip" => Some(Encoding::Gzip),
            "br" => Some(Encoding::Brotli),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    /// 単一のエンコーディング名をパース (大文字小文字を区別しない)
    ///
    /// ワイルドカード `*` は単一のエンコーディングではないためエラーになる。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = HORIZONTAL_SPACE.trim(s);
        if name.is_empty() {
            return Err(EncodingError::Empty);
        }
        if name.len() > Encoding::MAX_NAME_LEN {
            return Err(EncodingError::UnknownEncoding);
        }
        Encoding::from_canonical(&ascii::to_lower(name)).ok_or(EncodingError::UnknownEncoding)
    }
}

/// エンコーディングの集合
///
/// ビット `i` が序数 `i` のエンコーディングを表す。
/// 定義済みの序数以外のビットが立つことはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncodingSet(u32);

impl EncodingSet {
    /// 空集合
    pub const EMPTY: EncodingSet = EncodingSet(0);

    /// 全エンコーディング
    pub const ALL: EncodingSet = EncodingSet(
        Encoding::Identity.bit()
            | Encoding::Deflate.bit()
            | Encoding::Compress.bit()
            | Encoding::Gzip.bit()
            | Encoding::Brotli.bit(),
    );

    /// 単一要素の集合
    pub const fn of(encoding: Encoding) -> EncodingSet {
        EncodingSet(encoding.bit())
    }

    /// `encoding` を含むかどうか
    pub const fn contains(self, encoding: Encoding) -> bool {
        self.0 & encoding.bit() != 0
    }

    /// 和集合
    pub const fn union(self, other: EncodingSet) -> EncodingSet {
        EncodingSet(self.0 | other.0)
    }

    /// `other` に含まれる要素を取り除いた集合
    pub(crate) const fn difference(self, other: EncodingSet) -> EncodingSet {
        EncodingSet(self.0 & !other.0)
    }

    /// `encoding` を追加
    pub fn insert(&mut self, encoding: Encoding) {
        self.0 |= encoding.bit();
    }

    /// 空集合かどうか
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 要素数
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// 序数順に要素を列挙
    pub fn iter(self) -> impl Iterator<Item = Encoding> {
        Encoding::ALL
            .into_iter()
            .filter(move |encoding| self.contains(*encoding))
    }
}

impl From<Encoding> for EncodingSet {
    fn from(encoding: Encoding) -> Self {
        EncodingSet::of(encoding)
    }
}

impl FromIterator<Encoding> for EncodingSet {
    fn from_iter<I: IntoIterator<Item = Encoding>>(iter: I) -> Self {
        let mut set = EncodingSet::EMPTY;
        for encoding in iter {
            set.insert(encoding);
        }
        set
    }
}

impl BitOr for EncodingSet {
    type Output = EncodingSet;

    fn bitor(self, rhs: EncodingSet) -> EncodingSet {
        self.union(rhs)
    }
}

impl BitOrAssign for EncodingSet {
    fn bitor_assign(&mut self, rhs: EncodingSet) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for EncodingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, encoding) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(encoding.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for EncodingSet {
    type Err = EncodingError;

    /// カンマ区切りのエンコーディング名をパース
    ///
    /// Display の出力を戻すためのもので、q 値などのパラメータは受け付けない。
    /// 空文字列は空集合になる。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if HORIZONTAL_SPACE.trim(s).is_empty() {
            return Ok(EncodingSet::EMPTY);
        }
        let mut set = EncodingSet::EMPTY;
        for name in s.split(',') {
            set |= resolve(name).ok_or(EncodingError::UnknownEncoding)?;
        }
        Ok(set)
    }
}

/// トークンを語彙から解決する
///
/// 前後の空白とタブを取り除き、大文字小文字を区別せずに正規名と比較する。
/// 正規名なら単一要素の集合、`*` なら全エンコーディング、それ以外は `None` を返す。
/// 最長の正規名より長いトークンは小文字化せずに `None` を返す。
pub fn resolve(token: &str) -> Option<EncodingSet> {
    let name = HORIZONTAL_SPACE.trim(token);
    if name.len() > Encoding::MAX_NAME_LEN {
        return None;
    }
    match &*ascii::to_lower(name) {
        "*" => Some(EncodingSet::ALL),
        lowered => Encoding::from_canonical(lowered).map(EncodingSet::of),
    }
}
