//! Accept-Encoding ヘッダーパース (RFC 9110 Section 12.5.3)
//!
//! ## 概要
//!
//! Accept-Encoding ヘッダーを、クライアントが受け入れ可能な
//! エンコーディングの集合 ([`EncodingSet`]) に変換します。
//!
//! - 未知のエンコーディングは無視する (エラーにしない)
//! - `q=0` や解釈できない q 値は明示的な拒否として扱う
//! - `identity` は明示的に拒否されない限り常に受け入れ可能
//! - 結果は優先順位付きのリストではなく集合
//!
//! 一般的なトークン長のヘッダーではアロケーションしない。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_accept_encoding::accept_encoding;
//! use shiguredo_accept_encoding::encoding::Encoding;
//!
//! let set = accept_encoding::parse("gzip, br;q=0");
//! assert!(set.contains(Encoding::Gzip));
//! assert!(set.contains(Encoding::Identity));
//! assert!(!set.contains(Encoding::Brotli));
//! ```

use crate::ascii::{HORIZONTAL_SPACE, cut};
use crate::encoding::{self, Encoding, EncodingSet};

const IDENTITY: EncodingSet = EncodingSet::of(Encoding::Identity);

const GZIP_DEFLATE: EncodingSet = EncodingSet::of(Encoding::Gzip)
    .union(EncodingSet::of(Encoding::Deflate))
    .union(IDENTITY);

const GZIP_DEFLATE_BR: EncodingSet = GZIP_DEFLATE.union(EncodingSet::of(Encoding::Brotli));

/// Accept-Encoding ヘッダーをパースし、受け入れ可能なエンコーディングの集合を返す
///
/// 空のヘッダーと `*` はすべてのエンコーディングを受け入れる。
/// 不正なエントリは無視されるため、失敗することはない。
pub fn parse(accept_encoding: &str) -> EncodingSet {
    // 実際のトラフィックで多いヘッダー値はパースしない
    match accept_encoding {
        "" | "*" => return EncodingSet::ALL,
        "gzip, deflate" => return GZIP_DEFLATE,
        "gzip, deflate, br" => return GZIP_DEFLATE_BR,
        _ => {}
    }

    let mut supported = EncodingSet::EMPTY;
    let mut unsupported = EncodingSet::EMPTY;

    let mut rest = accept_encoding;
    while !rest.is_empty() {
        let (coding, tail) = cut(rest, ',');
        rest = tail;

        let (name, params) = cut(coding, ';');
        let Some(encodings) = encoding::resolve(name) else {
            continue;
        };
        if is_rejected(params) {
            unsupported |= encodings;
        } else {
            supported |= encodings;
        }
    }

    // identity は unsupported に入っていない限り受け入れる
    IDENTITY.difference(unsupported) | supported
}

/// パラメータ列の最初の q が拒否を示すかどうか
///
/// q がない、または値が空なら受け入れ。
/// 値が数値として解釈できない、または 0 以下なら拒否。
fn is_rejected(mut params: &str) -> bool {
    while !params.is_empty() {
        let (param, tail) = cut(params, ';');
        params = tail;

        let (key, value) = cut(HORIZONTAL_SPACE.trim(param), '=');
        if HORIZONTAL_SPACE.trim(key) != "q" {
            continue;
        }
        if value.is_empty() {
            return false;
        }
        return match parse_qvalue(value) {
            Some(q) => q <= 0.0,
            None => true,
        };
    }
    false
}

/// q 値を f32 としてパースする
///
/// 10 進数、16 進浮動小数点数 (`0x1p-2`)、`inf` / `infinity` / `nan` を受け付ける。
/// f32 の範囲を超える値は解釈できない値として `None` を返す。
/// 0 に丸められるほど小さい値は 0 になる。
fn parse_qvalue(value: &str) -> Option<f32> {
    let q = match value.parse::<f32>() {
        Ok(q) => q,
        Err(_) => return parse_hex_float(value),
    };
    if q.is_infinite() && !is_infinity_literal(value) {
        return None;
    }
    Some(q)
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// 16 進浮動小数点数 (`[+-]0x<16 進数>[.<16 進数>]p[+-]<10 進数>`) をパースする
///
/// 指数部 `p` は必須。
fn parse_hex_float(value: &str) -> Option<f32> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))?;
    let (mantissa, exponent) = digits.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;
    let (integer, fraction) = cut(mantissa, '.');
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut m = 0f64;
    for c in integer.chars().chain(fraction.chars()) {
        m = m * 16.0 + f64::from(c.to_digit(16)?);
    }
    if !m.is_finite() {
        return None;
    }
    if m == 0.0 {
        return Some(if negative { -0.0 } else { 0.0 });
    }

    // 小数部の桁数ぶん指数を下げる (1 桁 = 4 ビット)
    let scale = i64::from(exponent) - 4 * fraction.len() as i64;
    let scale = scale.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let q = (m * 2f64.powi(scale)) as f32;
    if q.is_infinite() {
        return None;
    }
    Some(if negative { -q } else { q })
}
