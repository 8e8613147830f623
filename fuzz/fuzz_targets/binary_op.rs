#![no_main]

use gridsweeper::{BinaryOp, CellSet, Region};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (CellSet, CellSet)| {
    let (a, b) = input;
    let region_a = Region::from_cells(&a).unwrap();
    let region_b = Region::from_cells(&b).unwrap();

    let both: CellSet = a.iter().chain(b.iter()).collect();
    let common: CellSet = a.iter().filter(|&c| b.contains(c)).collect();

    let union = region_a.binary_op(&region_b, BinaryOp::Union).unwrap();
    assert_eq!(union.area(), both.len() as i128);
    let intersection = region_a.binary_op(&region_b, BinaryOp::Intersection).unwrap();
    assert_eq!(intersection.area(), common.len() as i128);
    let difference = region_a.binary_op(&region_b, BinaryOp::Difference).unwrap();
    assert_eq!(difference.area(), (a.len() - common.len()) as i128);
    let xor = region_a.binary_op(&region_b, BinaryOp::Xor).unwrap();
    assert_eq!(xor.area(), (both.len() - common.len()) as i128);
});
