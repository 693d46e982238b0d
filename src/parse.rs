#![cfg(feature = "parse")]

//! Parser generators for dice expressions like `1d20`, `2d6 + 3` or `3d6+2d4-1`, and the glue that turns their output
//! into validated [`Expr`]s.
//!
//! The generators only deal with syntax. Numbers come out of them as the digits that were written, and are checked
//! against [`Limits`] afterwards.

use alloc::{string::String, vec::Vec};
use core::str::FromStr;

use chumsky::prelude::*;

use crate::{
	dice::Dice,
	error::Error,
	expr::{Expr, Sign, Signed, Term},
	limits::{constant, saturating_count, Limits},
};

/// A term as written, before its numbers have been checked
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Part {
	/// Digits of a constant
	Num(String),

	/// Digits of a dice term's count and sides
	Dice(String, String),

	/// Dice term that ends right after its `d`, with the byte offset where the sides were expected
	MissingSides(usize),
}

/// Generates a parser for a run of ASCII digits. Leading zeros are allowed.
pub fn digits<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
	any().filter(char::is_ascii_digit).repeated().at_least(1).collect()
}

/// Generates a parser for a `+` or `-` operator, with any surrounding whitespace.
pub fn sign<'src>() -> impl Parser<'src, &'src str, Sign, extra::Err<Rich<'src, char>>> + Clone {
	choice((just('+').to(Sign::Plus), just('-').to(Sign::Minus))).padded()
}

/// Generates a parser that specifically handles dice terms like "1d20", "2D6", "3 d 8", etc.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, (String, String), extra::Err<Rich<'src, char>>> + Clone {
	digits()
		.then_ignore(one_of("dD").padded())
		.then(digits())
		.padded()
}

/// Generates a parser that specifically handles dice terms like "1d20", "2D6", "3 d 8", etc.
/// and expects end of input
pub fn dice<'src>() -> impl Parser<'src, &'src str, (String, String), extra::Err<Rich<'src, char>>> + Clone {
	dice_part().then_ignore(end())
}

/// Generates a parser for a single unsigned term: either dice or a constant.
///
/// Once a `d` has been read the term is committed to being dice, so a missing number of sides comes out as
/// [`Part::MissingSides`] instead of the `d` being left for whatever follows the term.
pub fn term_part<'src>() -> impl Parser<'src, &'src str, Part, extra::Err<Rich<'src, char>>> + Clone {
	digits()
		.then(
			one_of("dD")
				.padded()
				.ignore_then(digits().or_not())
				.try_map(|sides, span| Ok(sides.ok_or(span.end)))
				.or_not(),
		)
		.map(|(count, sides)| match sides {
			Some(Ok(sides)) => Part::Dice(count, sides),
			Some(Err(end)) => Part::MissingSides(end),
			None => Part::Num(count),
		})
		.padded()
}

/// Generates a parser that handles full expressions: terms joined by `+` and `-`. The first term may have a sign
/// (it's assumed to be `+` if not), but every term after it must.
pub fn expr_part<'src>() -> impl Parser<'src, &'src str, Vec<Signed<Part>>, extra::Err<Rich<'src, char>>> + Clone {
	sign()
		.or_not()
		.map(Option::unwrap_or_default)
		.then(term_part())
		.then(sign().then(term_part()).repeated().collect::<Vec<_>>())
		.map(|(first, rest)| {
			core::iter::once(first)
				.chain(rest)
				.map(|(sign, part)| Signed::new(sign, part))
				.collect()
		})
}

/// Generates a parser that handles full expressions and expects end of input
pub fn expr<'src>() -> impl Parser<'src, &'src str, Vec<Signed<Part>>, extra::Err<Rich<'src, char>>> + Clone {
	expr_part().then_ignore(end())
}

/// Parses a full expression and checks it against the given limits.
///
/// Leading and trailing whitespace is ignored. Error offsets are relative to the trimmed input.
pub(crate) fn parse_expr(input: &str, limits: &Limits) -> Result<Expr, Error> {
	let input = input.trim();
	if input.is_empty() {
		return Err(Error::EmptyExpression);
	}

	let parts = expr()
		.parse(input)
		.into_result()
		.map_err(|errs| malformed(input, &errs))?;

	// Syntax problems take precedence over limits
	if let Some(end) = parts.iter().find_map(|signed| match signed.term {
		Part::MissingSides(end) => Some(end),
		Part::Num(..) | Part::Dice(..) => None,
	}) {
		return Err(malformed_at(input, end));
	}

	let mut pooled = 0;
	let terms = parts
		.into_iter()
		.map(|Signed { sign, term }| {
			let term = match term {
				Part::Num(digits) => Term::Num(constant(&digits, sign)?),
				Part::Dice(count, sides) => {
					let dice = limits.dice(saturating_count(&count), saturating_count(&sides))?;
					pooled = limits.pool(pooled, dice.count.into())?;
					Term::Dice(dice)
				}
				Part::MissingSides(end) => return Err(malformed_at(input, end)),
			};
			Ok(Signed::new(sign, term))
		})
		.collect::<Result<Vec<_>, Error>>()?;

	Ok(Expr::new(terms))
}

/// Converts the first error the parser reported into an [`Error::MalformedExpression`].
fn malformed(input: &str, errs: &[Rich<'_, char>]) -> Error {
	malformed_at(input, errs.first().map_or(input.len(), |err| err.span().start))
}

/// Builds an [`Error::MalformedExpression`] for the first non-whitespace character at or after byte offset `start`.
/// Error spans can begin on the padding in front of the offending token, so that padding is skipped.
fn malformed_at(input: &str, start: usize) -> Error {
	let token = input.get(start..).unwrap_or_default().trim_start();
	let before = input.get(..input.len().saturating_sub(token.len())).unwrap_or_default();

	Error::MalformedExpression {
		fragment: token.chars().next().map(String::from).unwrap_or_default(),
		offset: before.chars().count(),
	}
}

impl FromStr for Dice {
	type Err = Error;

	/// Parses a single dice term (such as `2d6`) and checks it against the default [`Limits`].
	///
	/// # Examples
	/// ```
	/// use goh_dice::{Dice, Error};
	///
	/// assert_eq!("2d6".parse::<Dice>()?, Dice::new(2, 6));
	/// assert!(matches!("2d1".parse::<Dice>(), Err(Error::InvalidSides { .. })));
	/// # Ok::<(), goh_dice::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let input = s.trim();
		if input.is_empty() {
			return Err(Error::EmptyExpression);
		}

		let (count, sides) = dice()
			.parse(input)
			.into_result()
			.map_err(|errs| malformed(input, &errs))?;
		Limits::default().dice(saturating_count(&count), saturating_count(&sides))
	}
}

impl FromStr for Expr {
	type Err = Error;

	/// Parses a full expression and checks it against the default [`Limits`].
	///
	/// # Examples
	/// ```
	/// use goh_dice::Expr;
	///
	/// let expr: Expr = "3D6 + 2d4 - 1".parse()?;
	/// assert_eq!(expr.to_string(), "3d6+2d4-1");
	/// # Ok::<(), goh_dice::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_expr(s, &Limits::default())
	}
}
