//! Data structures for dice expressions (sums and differences of dice and constants) and their evaluated results.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use crate::dice::{roller::Roller, Dice, Rolled};

/// Direction a term contributes to the total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(clippy::exhaustive_enums)]
pub enum Sign {
	/// Added to the total
	#[default]
	Plus,

	/// Subtracted from the total
	Minus,
}

impl Sign {
	/// Applies the sign to a value.
	#[must_use]
	pub const fn apply(self, val: i64) -> i64 {
		match self {
			Self::Plus => val,
			Self::Minus => val.saturating_neg(),
		}
	}

	/// Symbol used to write the sign in an expression.
	#[must_use]
	pub const fn symbol(self) -> char {
		match self {
			Self::Plus => '+',
			Self::Minus => '-',
		}
	}
}

/// A term along with the sign it was written with
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Signed<T> {
	/// Whether the term is added or subtracted
	pub sign: Sign,

	/// The term itself
	pub term: T,
}

impl<T> Signed<T> {
	/// Wraps a term with a sign.
	#[must_use]
	pub const fn new(sign: Sign, term: T) -> Self {
		Self { sign, term }
	}

	/// Wraps a term that is added to the total.
	#[must_use]
	pub const fn plus(term: T) -> Self {
		Self::new(Sign::Plus, term)
	}

	/// Wraps a term that is subtracted from the total.
	#[must_use]
	pub const fn minus(term: T) -> Self {
		Self::new(Sign::Minus, term)
	}
}

/// Individual elements of a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Term {
	/// Constant (its magnitude; the sign is kept alongside it in [`Signed`])
	Num(u32),

	/// Dice literal
	Dice(Dice),
}

/// A full dice expression: an ordered list of signed terms, left to right as written.
///
/// # Examples
/// ```
/// use goh_dice::{dice::roller::{Iter as IterRoller}, expr::{Expr, Signed, Term}, Dice};
///
/// let expr = Expr::new(vec![Signed::plus(Term::Dice(Dice::new(2, 6))), Signed::plus(Term::Num(3))]);
/// assert_eq!(expr.to_string(), "2d6+3");
///
/// let evaled = expr.eval(&mut IterRoller::new([4, 5]));
/// assert_eq!(evaled.calc(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Expr {
	/// Terms of the expression, in the order they were written
	pub terms: Vec<Signed<Term>>,
}

impl Expr {
	/// Creates an expression from its terms.
	#[must_use]
	pub const fn new(terms: Vec<Signed<Term>>) -> Self {
		Self { terms }
	}

	/// Evaluates the expression by rolling every dice term, in order, with the given roller.
	/// Constants are carried over as-is.
	///
	/// This doesn't check the expression against any [`Limits`](crate::limits::Limits); do that beforehand for
	/// anything that didn't come out of the parser.
	#[must_use]
	pub fn eval<'a>(&'a self, rng: &mut impl Roller) -> Evaled<'a> {
		Evaled {
			terms: self
				.terms
				.iter()
				.map(|signed| {
					Signed::new(
						signed.sign,
						match &signed.term {
							Term::Num(x) => EvaledTerm::Num(*x),
							Term::Dice(dice) => EvaledTerm::Dice(rng.roll(dice)),
						},
					)
				})
				.collect(),
		}
	}

	/// Total number of dice across all terms.
	#[must_use]
	pub fn dice_count(&self) -> u64 {
		self.dice().map(|dice| u64::from(dice.count)).sum()
	}

	/// Iterates over the dice terms, ignoring their signs.
	pub fn dice(&self) -> impl Iterator<Item = &Dice> {
		self.terms.iter().filter_map(|signed| match &signed.term {
			Term::Dice(dice) => Some(dice),
			Term::Num(..) => None,
		})
	}
}

impl Describe for Expr {
	/// Builds the canonical expression string: no whitespace, a lowercase `d`, and an explicit sign between terms.
	/// A leading sign is only written when the first term is subtracted.
	/// Re-parsing the output always results in an equal expression.
	///
	/// `list_limit` does not affect the output of this implementation in any way since there are no possible lists of
	/// elements included, so it is always safe to pass `None`.
	fn describe(&self, _list_limit: Option<usize>) -> String {
		describe_signed(&self.terms, "", |term| match term {
			Term::Num(x) => x.to_string(),
			Term::Dice(dice) => dice.to_string(),
		})
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Individual elements of an evaluated dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaledTerm<'a> {
	/// Constant
	Num(u32),

	/// Rolled dice
	Dice(Rolled<'a>),
}

impl EvaledTerm<'_> {
	/// Unsigned value the term contributes.
	#[must_use]
	pub fn value(&self) -> i64 {
		match self {
			Self::Num(x) => (*x).into(),
			Self::Dice(rolled) => i64::try_from(rolled.total()).unwrap_or(i64::MAX),
		}
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> EvaledTerm<'static> {
		match self {
			Self::Num(x) => EvaledTerm::Num(x),
			Self::Dice(rolled) => EvaledTerm::Dice(rolled.into_owned()),
		}
	}
}

/// An evaluated dice expression, holding the rolls made for each of its dice terms
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Evaled<'a> {
	/// Evaluated terms, in the same order as the expression they came from
	pub terms: Vec<Signed<EvaledTerm<'a>>>,
}

impl Evaled<'_> {
	/// Calculates the final total: every die face and constant, added or subtracted according to its sign.
	/// There is no lower bound, so the total can be negative.
	///
	/// # Examples
	/// ```
	/// use goh_dice::dice::roller::Iter as IterRoller;
	///
	/// let expr = goh_dice::parse("1d4-10")?;
	/// assert_eq!(expr.eval(&mut IterRoller::new([2])).calc(), -8);
	/// # Ok::<(), goh_dice::Error>(())
	/// ```
	#[must_use]
	pub fn calc(&self) -> i64 {
		self.terms
			.iter()
			.fold(0_i64, |total, signed| total.saturating_add(signed.sign.apply(signed.term.value())))
	}

	/// Iterates over the face of every rolled die, in roll order, across all terms. Constants aren't included and the
	/// faces are always unsigned, even for subtracted dice.
	pub fn faces(&self) -> impl Iterator<Item = u16> + '_ {
		self.terms
			.iter()
			.filter_map(|signed| match &signed.term {
				EvaledTerm::Dice(rolled) => Some(&rolled.rolls),
				EvaledTerm::Num(..) => None,
			})
			.flatten()
			.copied()
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Evaled<'static> {
		Evaled {
			terms: self
				.terms
				.into_iter()
				.map(|signed| Signed::new(signed.sign, signed.term.into_owned()))
				.collect(),
		}
	}
}

impl Describe for Evaled<'_> {
	/// Builds a breakdown listing the faces rolled for every dice term, e.g. `2d6[4, 5] + 3`.
	/// See [`Rolled::describe()`] for how `list_limit` is applied.
	///
	/// # Examples
	/// ```
	/// use goh_dice::{dice::roller::Iter as IterRoller, expr::Describe};
	///
	/// let expr = goh_dice::parse("3d6 - 1d4 + 2")?;
	/// let evaled = expr.eval(&mut IterRoller::new([6, 1, 3, 2]));
	/// assert_eq!(evaled.describe(None), "3d6[6, 1, 3] - 1d4[2] + 2");
	/// assert_eq!(evaled.describe(Some(1)), "3d6[6, 2 more...] - 1d4[2] + 2");
	/// # Ok::<(), goh_dice::Error>(())
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		describe_signed(&self.terms, " ", |term| match term {
			EvaledTerm::Num(x) => x.to_string(),
			EvaledTerm::Dice(rolled) => rolled.describe(list_limit),
		})
	}
}

impl fmt::Display for Evaled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed expression string with additional information about non-deterministic elements.
	/// Any elements of the expression that can have a different result between multiple evaluations or multiple results
	/// should list all of the specific individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Joins signed terms with their operators, padding operators with `pad` on both sides.
fn describe_signed<T>(terms: &[Signed<T>], pad: &str, describe: impl Fn(&T) -> String) -> String {
	let mut text = String::new();
	for (idx, signed) in terms.iter().enumerate() {
		match (idx, signed.sign) {
			(0, Sign::Plus) => {}
			(0, Sign::Minus) => text.push('-'),
			(_, sign) => text.push_str(&format!("{pad}{}{pad}", sign.symbol())),
		}
		text.push_str(&describe(&signed.term));
	}
	text
}
