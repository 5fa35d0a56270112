//! # shiguredo_accept_encoding
//!
//! 依存なしの Accept-Encoding ヘッダーパーサー
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **アロケーションなし**: トークンは入力のスライスとして扱い、
//!   大文字を含むトークンのみ小文字化のためにアロケーションする
//! - **失敗しない**: 不正なエントリは無視し、常に集合を返す
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_accept_encoding::{Encoding, Negotiation, negotiate, parse};
//!
//! let accepted = parse("gzip;q=1.0, identity; q=0.5, *;q=0");
//! assert_eq!(accepted.to_string(), "identity, gzip");
//!
//! match negotiate(accepted, Encoding::Brotli) {
//!     Negotiation::Encoded(encoding) => println!("serve {}", encoding),
//!     Negotiation::Decoded => println!("decode and serve identity"),
//!     Negotiation::NotAcceptable => println!("406"),
//! }
//! ```

pub mod accept_encoding;
pub mod ascii;
pub mod encoding;
pub mod negotiate;

pub use accept_encoding::parse;
pub use encoding::{Encoding, EncodingError, EncodingSet};
pub use negotiate::{Negotiation, negotiate};
