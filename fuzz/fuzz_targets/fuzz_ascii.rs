#![no_main]

use std::borrow::Cow;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_accept_encoding::ascii::{self, CharSet};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    text: String,
    members: Vec<u8>,
    delimiter: char,
}

fuzz_target!(|input: FuzzInput| {
    let lowered = ascii::to_lower(&input.text);
    assert_eq!(lowered, input.text.to_ascii_lowercase());
    assert!(matches!(ascii::to_lower(&lowered), Cow::Borrowed(_)));

    let set = input
        .members
        .iter()
        .fold(CharSet::EMPTY, |set, c| set.with(*c));
    let trimmed = set.trim(&input.text);
    assert_eq!(set.trim(trimmed), trimmed);

    let (prefix, suffix) = ascii::cut(&input.text, input.delimiter);
    assert!(prefix.len() + suffix.len() <= input.text.len());
});
