//! Abstractions for rolling dice using various means.
//!
//! A [`Roller`] is the only source of randomness in the crate, so swapping it for one of the fixed rollers here makes
//! any evaluation fully deterministic.

use alloc::{borrow::Cow, vec::Vec};
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Dice, Rolled};

/// Rolls dice - what else is there to say?
///
/// Implementations must return a value in `1..=sides` from [`Self::roll_die()`] for the results to be meaningful.
pub trait Roller {
	/// Rolls a single die.
	#[must_use]
	fn roll_die(&mut self, sides: u16) -> u16;

	/// Rolls a set of dice, one die at a time in order.
	fn roll<'d>(&mut self, dice: &'d Dice) -> Rolled<'d>
	where
		Self: Sized,
	{
		let mut rolls = Vec::with_capacity(dice.count.into());
		for _ in 0..dice.count {
			rolls.push(self.roll_die(dice.sides));
		}

		Rolled {
			rolls,
			dice: Cow::Borrowed(dice),
		}
	}
}

impl<R: Roller + ?Sized> Roller for &mut R {
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		(**self).roll_die(sides)
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use goh_dice::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = Dice::new(4, 6);
/// let _ = roller.roll(&dice);
/// let _ = roller.roll(&dice);
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use goh_dice::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// assert_eq!(first, second);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		if sides > 0 {
			self.0.u16(1..=sides)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use goh_dice::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let mut roller = ValRoller(3);
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|&roll| roll == 3));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u16);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use goh_dice::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let mut roller = MaxRoller;
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|&roll| roll == 6));
///
/// let dice = Dice::new(2, 20);
/// let rolled = roller.roll(&dice);
/// assert!(rolled.rolls.iter().all(|&roll| roll == 20));
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u16) -> u16 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use goh_dice::dice::{roller::{Iter as IterRoller, Roller}, Dice};
///
/// let mut roller = IterRoller::new([1, 2, 3, 4, 5]);
/// assert_eq!(roller.roll(&Dice::new(5, 6)).rolls, vec![1, 2, 3, 4, 5]);
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u16>>(Peekable<I>);

impl<I: Iterator<Item = u16>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u16>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0.next().expect("iterator is finished")
	}
}
