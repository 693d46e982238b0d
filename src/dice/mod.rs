//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For using them as part of a larger expression, see [`Term::Dice`].
//!
//! [`Term::Dice`]: crate::expr::Term::Dice

pub mod roller;

use alloc::{
	borrow::Cow,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::roller::Roller;
use crate::expr::Describe;

/// A set of one or more rollable dice with a specific number of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u16,

	/// Number of sides for each die
	pub sides: u16,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides.
	///
	/// No bounds are enforced here; see [`Limits`](crate::limits::Limits) for that.
	#[must_use]
	pub const fn new(count: u16, sides: u16) -> Self {
		Self { count, sides }
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled<'a> {
	/// Face value of each die, in the order they were rolled
	pub rolls: Vec<u16>,

	/// Dice that were rolled to produce this
	pub dice: Cow<'a, Dice>,
}

impl Rolled<'_> {
	/// Calculates the total of all roll values.
	///
	/// The sum can't overflow: even `u16::MAX` dice showing `u16::MAX` fit comfortably.
	///
	/// # Examples
	/// ```
	/// use goh_dice::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
	///
	/// let dice = Dice::new(4, 8);
	/// let rolled = FastRandRoller::default().roll(&dice);
	/// assert_eq!(rolled.total(), rolled.rolls.iter().map(|&roll| u64::from(roll)).sum::<u64>());
	/// ```
	#[must_use]
	pub fn total(&self) -> u64 {
		self.rolls
			.iter()
			.fold(0_u64, |sum, &roll| sum.saturating_add(roll.into()))
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Rolled<'static> {
		Rolled {
			rolls: self.rolls,
			dice: Cow::Owned(self.dice.into_owned()),
		}
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	#[must_use]
	pub fn from_dice_and_rolls(dice: &Dice, rolls: impl IntoIterator<Item = u16>) -> Rolled {
		Rolled {
			rolls: rolls.into_iter().collect(),
			dice: Cow::Borrowed(dice),
		}
	}
}

impl Describe for Rolled<'_> {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use goh_dice::{dice::{Dice, Rolled}, expr::Describe};
	///
	/// let dice = Dice::new(4, 6);
	/// let rolled = Rolled::from_dice_and_rolls(&dice, [6, 2, 5, 3]);
	///
	/// assert_eq!(rolled.describe(None), "4d6[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6[6, 2, 2 more...]");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.dice,
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}
