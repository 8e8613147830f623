#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    gridsweeper::arbitrary::outline_invariants(&mut Unstructured::new(data)).unwrap();
});
