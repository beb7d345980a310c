//! Fuzz target for imported file decoding.
//!
//! Arbitrary bytes under an arbitrary encoding label either decode or fail
//! with an ImportError.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nmt_workbench::FileImporter;

#[derive(Arbitrary, Debug)]
struct ImportInput<'a> {
    label: Option<&'a str>,
    contents: &'a [u8],
}

fuzz_target!(|input: ImportInput<'_>| {
    let _ = FileImporter.decode(input.contents, input.label);
});
