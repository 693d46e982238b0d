//! Bounds that every expression must satisfy before any dice are rolled.

use alloc::string::ToString;

use crate::{
	dice::Dice,
	error::Error,
	expr::{Expr, Sign, Term},
};

/// Largest magnitude an added constant term may have
pub const MAX_CONSTANT: u32 = i32::MAX.unsigned_abs();

/// Largest magnitude a subtracted constant term may have
pub const MAX_NEGATED_CONSTANT: u32 = i32::MIN.unsigned_abs();

/// Largest magnitude a constant written with the given sign may have, so that its signed value fits in an `i32`.
#[must_use]
pub const fn max_constant(sign: Sign) -> u32 {
	match sign {
		Sign::Plus => MAX_CONSTANT,
		Sign::Minus => MAX_NEGATED_CONSTANT,
	}
}

/// Limits placed on dice expressions to keep rolls sensible and cheap.
///
/// The defaults allow at most 100 dice per expression, each with 2 to 1000 sides.
///
/// # Examples
/// ```
/// use goh_dice::{limits::Limits, Error};
///
/// let limits = Limits::default();
/// assert_eq!(limits.max_dice, 100);
/// assert!(limits.dice(100, 6).is_ok());
/// assert!(matches!(limits.dice(101, 6), Err(Error::TooManyDice { .. })));
/// assert!(matches!(limits.dice(1, 1001), Err(Error::InvalidSides { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::exhaustive_structs)]
pub struct Limits {
	/// Maximum number of dice in a single term, and across the whole expression
	pub max_dice: u16,

	/// Minimum number of sides per die
	pub min_sides: u16,

	/// Maximum number of sides per die
	pub max_sides: u16,
}

impl Limits {
	/// Creates limits with the given dice cap and side range.
	#[must_use]
	pub const fn new(max_dice: u16, min_sides: u16, max_sides: u16) -> Self {
		Self {
			max_dice,
			min_sides,
			max_sides,
		}
	}

	/// Checks a single dice term's count and sides, producing the dice if both are in bounds.
	///
	/// # Errors
	/// [`Error::TooManyDice`] if the count is zero or above [`Self::max_dice`], or [`Error::InvalidSides`] if the
	/// sides are outside of [`Self::min_sides`]..=[`Self::max_sides`]. The count is checked first.
	pub fn dice(&self, count: u64, sides: u64) -> Result<Dice, Error> {
		let count = u16::try_from(count)
			.ok()
			.filter(|count| (1..=self.max_dice).contains(count))
			.ok_or(Error::TooManyDice {
				requested: count,
				max: self.max_dice,
			})?;
		let sides = u16::try_from(sides)
			.ok()
			.filter(|sides| (self.min_sides..=self.max_sides).contains(sides))
			.ok_or(Error::InvalidSides {
				sides,
				min: self.min_sides,
				max: self.max_sides,
			})?;

		Ok(Dice::new(count, sides))
	}

	/// Adds a term's dice to the running count for an expression, returning the new running count.
	///
	/// # Errors
	/// [`Error::TooManyDice`] if the running count would go above [`Self::max_dice`].
	pub fn pool(&self, pooled: u64, count: u64) -> Result<u64, Error> {
		let pooled = pooled.saturating_add(count);
		if pooled > u64::from(self.max_dice) {
			return Err(Error::TooManyDice {
				requested: pooled,
				max: self.max_dice,
			});
		}
		Ok(pooled)
	}

	/// Checks that every term of an already-built expression is within bounds.
	/// Terms are checked left to right and the first violation is returned.
	///
	/// # Errors
	/// [`Error::TooManyDice`], [`Error::InvalidSides`] or [`Error::ConstantOverflow`] for the first offending term.
	///
	/// # Examples
	/// ```
	/// use goh_dice::{expr::{Expr, Signed, Term}, limits::Limits, Dice, Error};
	///
	/// let expr = Expr::new(vec![
	/// 	Signed::plus(Term::Dice(Dice::new(60, 6))),
	/// 	Signed::minus(Term::Dice(Dice::new(60, 6))),
	/// ]);
	/// assert_eq!(
	/// 	Limits::default().check(&expr),
	/// 	Err(Error::TooManyDice { requested: 120, max: 100 })
	/// );
	/// ```
	pub fn check(&self, expr: &Expr) -> Result<(), Error> {
		let mut pooled = 0;
		for signed in &expr.terms {
			match &signed.term {
				Term::Num(val) => {
					if *val > max_constant(signed.sign) {
						return Err(Error::ConstantOverflow {
							literal: val.to_string(),
						});
					}
				}
				Term::Dice(dice) => {
					self.dice(dice.count.into(), dice.sides.into())?;
					pooled = self.pool(pooled, dice.count.into())?;
				}
			}
		}
		Ok(())
	}
}

impl Default for Limits {
	/// Creates the standard limits: up to 100 dice, 2 to 1000 sides.
	#[inline]
	fn default() -> Self {
		Self::new(100, 2, 1000)
	}
}

/// Converts the digits of a constant term into its value.
///
/// # Errors
/// [`Error::ConstantOverflow`] if the signed value doesn't fit in an `i32` (see [`max_constant()`]).
#[cfg(feature = "parse")]
pub(crate) fn constant(digits: &str, sign: Sign) -> Result<u32, Error> {
	digits
		.parse::<u32>()
		.ok()
		.filter(|val| *val <= max_constant(sign))
		.ok_or_else(|| Error::ConstantOverflow {
			literal: digits.to_string(),
		})
}

/// Converts a run of ASCII digits into a count, saturating at [`u64::MAX`] for absurdly long runs.
#[cfg(feature = "parse")]
pub(crate) fn saturating_count(digits: &str) -> u64 {
	digits.parse().unwrap_or(u64::MAX)
}
