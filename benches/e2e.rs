#![feature(test)]

extern crate test;

use test::Bencher;

use goh_dice::dice::roller::FastRand;

#[bench]
fn e2e_basic(b: &mut Bencher) {
	let mut rng = FastRand::default();
	b.iter(|| goh_dice::evaluate("4d8 + 4", &mut rng).unwrap());
}

#[bench]
fn e2e_long(b: &mut Bencher) {
	let mut rng = FastRand::default();
	b.iter(|| goh_dice::evaluate("4d8 + 2d10 - 3d6 - 6 + 2 - 1d4 + 10d12 - 20", &mut rng).unwrap());
}

#[bench]
fn e2e_max_dice(b: &mut Bencher) {
	let mut rng = FastRand::default();
	b.iter(|| goh_dice::evaluate("50d1000 + 50d1000", &mut rng).unwrap());
}
