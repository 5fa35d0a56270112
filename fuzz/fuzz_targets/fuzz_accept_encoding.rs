#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_accept_encoding::encoding::{Encoding, EncodingSet};
use shiguredo_accept_encoding::negotiate::{Negotiation, negotiate};
use shiguredo_accept_encoding::parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let set = parse(s);
        assert_eq!(set, parse(s));
        assert_eq!(set.iter().count(), set.len());

        // Display の結果は常に戻せる
        let displayed = set.to_string();
        assert_eq!(displayed.parse::<EncodingSet>(), Ok(set));

        for stored in Encoding::ALL {
            match negotiate(set, stored) {
                Negotiation::Encoded(encoding) => assert!(set.contains(encoding)),
                Negotiation::Decoded => assert!(set.contains(Encoding::Identity)),
                Negotiation::NotAcceptable => assert!(!set.contains(stored)),
            }
        }
    }
});
