//! 保存済み表現の配信方法の決定
//!
//! ## 概要
//!
//! 圧縮済みの表現を保存しているサーバーが、Accept-Encoding の結果から
//! どのように応答するかを決めるための補助を提供します。
//!
//! - 保存形式のエンコーディングが受け入れ可能ならそのまま返す
//! - そうでなく identity が受け入れ可能なら、保存形式を展開して返す
//! - どちらでもなければ 406 Not Acceptable
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_accept_encoding::accept_encoding;
//! use shiguredo_accept_encoding::encoding::Encoding;
//! use shiguredo_accept_encoding::negotiate::{Negotiation, negotiate};
//!
//! let accepted = accept_encoding::parse("br");
//! assert_eq!(negotiate(accepted, Encoding::Gzip), Negotiation::Decoded);
//! ```

use crate::encoding::{Encoding, EncodingSet};

/// Vary ヘッダーに指定する値
pub const VARY: &str = "Accept-Encoding";

/// 配信方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negotiation {
    /// 保存形式のまま配信する
    Encoded(Encoding),
    /// 保存形式を展開し identity で配信する
    Decoded,
    /// 受け入れ可能な形式がない
    NotAcceptable,
}

impl Negotiation {
    /// 応答のエンコーディング
    pub fn encoding(self) -> Option<Encoding> {
        match self {
            Negotiation::Encoded(encoding) => Some(encoding),
            Negotiation::Decoded => Some(Encoding::Identity),
            Negotiation::NotAcceptable => None,
        }
    }
}

/// `stored` で保存された表現の配信方法を決定する
pub fn negotiate(accepted: EncodingSet, stored: Encoding) -> Negotiation {
    if accepted.contains(stored) {
        Negotiation::Encoded(stored)
    } else if accepted.contains(Encoding::Identity) {
        Negotiation::Decoded
    } else {
        Negotiation::NotAcceptable
    }
}

/// Content-Encoding ヘッダーの値
///
/// identity の場合は Content-Encoding を付与しないため `None` を返す。
pub fn content_encoding(encoding: Encoding) -> Option<&'static str> {
    match encoding {
        Encoding::Identity => None,
        other => Some(other.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accept_encoding::parse;

    #[test]
    fn negotiate_encoded() {
        assert_eq!(
            negotiate(parse("gzip"), Encoding::Gzip),
            Negotiation::Encoded(Encoding::Gzip)
        );
        assert_eq!(
            negotiate(parse(""), Encoding::Brotli),
            Negotiation::Encoded(Encoding::Brotli)
        );
        assert_eq!(
            negotiate(parse("br"), Encoding::Identity),
            Negotiation::Encoded(Encoding::Identity)
        );
    }

    #[test]
    fn negotiate_decoded() {
        assert_eq!(negotiate(parse("br"), Encoding::Gzip), Negotiation::Decoded);
        assert_eq!(
            negotiate(parse("gzip;q=0"), Encoding::Gzip),
            Negotiation::Decoded
        );
        assert_eq!(Negotiation::Decoded.encoding(), Some(Encoding::Identity));
    }

    #[test]
    fn negotiate_not_acceptable() {
        assert_eq!(
            negotiate(parse("*;q=0, br"), Encoding::Gzip),
            Negotiation::NotAcceptable
        );
        assert_eq!(
            negotiate(parse("identity;q=0"), Encoding::Identity),
            Negotiation::NotAcceptable
        );
        assert_eq!(Negotiation::NotAcceptable.encoding(), None);
    }

    #[test]
    fn identity_stored_is_never_decoded() {
        for header in ["", "gzip", "br;q=0", "identity;q=0", "*;q=0", "*;q=0, gzip"] {
            assert_ne!(
                negotiate(parse(header), Encoding::Identity),
                Negotiation::Decoded,
                "{:?}",
                header
            );
        }
    }

    #[test]
    fn content_encoding_value() {
        assert_eq!(content_encoding(Encoding::Identity), None);
        assert_eq!(content_encoding(Encoding::Gzip), Some("gzip"));
        assert_eq!(content_encoding(Encoding::Brotli), Some("br"));
    }
}
