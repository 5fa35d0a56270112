//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// エンコーディング名生成
// ========================================

/// 語彙に含まれる正規名
pub fn canonical_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("identity"),
        Just("deflate"),
        Just("compress"),
        Just("gzip"),
        Just("br"),
    ]
}

/// 大文字小文字をランダムに入れ替えた文字列
pub fn random_case(value: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), value.len()).prop_map(move |upper| {
        value
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

/// 大文字小文字混在の正規名
pub fn mixed_case_name() -> impl Strategy<Value = String> {
    canonical_name().prop_flat_map(random_case)
}

/// 前後の空白とタブ
pub fn horizontal_space() -> impl Strategy<Value = String> {
    "[ \t]{0,3}".prop_map(|s| s)
}

/// q 値 (0.000 - 1.000)
pub fn qvalue_string() -> impl Strategy<Value = String> {
    (0u16..=1000).prop_map(|value| {
        if value == 1000 {
            return "1".to_string();
        }
        if value == 0 {
            return "0".to_string();
        }
        let mut frac = format!("{:03}", value);
        while frac.ends_with('0') {
            frac.pop();
        }
        format!("0.{}", frac)
    })
}
