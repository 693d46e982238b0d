//! The single error type returned by parsing, validation and evaluation.

use alloc::{format, string::String};

/// Reasons a dice expression can be rejected.
///
/// Every variant is produced before any die is rolled, so a failed call never consumes randomness.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The input was empty or contained only whitespace.
	///
	/// # Examples
	/// ```
	/// use goh_dice::Error;
	///
	/// assert_eq!(goh_dice::parse("   "), Err(Error::EmptyExpression));
	/// ```
	#[error("dice expression is empty")]
	EmptyExpression,

	/// The input doesn't follow the expression grammar.
	///
	/// # Examples
	/// ```
	/// use goh_dice::Error;
	///
	/// let err = goh_dice::parse("1d20 !").unwrap_err();
	/// assert_eq!(
	/// 	err,
	/// 	Error::MalformedExpression {
	/// 		fragment: "!".to_owned(),
	/// 		offset: 5
	/// 	}
	/// );
	/// ```
	#[error("malformed dice expression: {} at offset {offset}", describe_fragment(.fragment))]
	MalformedExpression {
		/// Text that couldn't be parsed (empty when the input ended too early)
		fragment: String,

		/// Character offset of the fragment within the trimmed expression
		offset: usize,
	},

	/// A die had fewer or more sides than allowed.
	#[error("dice must have between {min} and {max} sides, not {sides}")]
	InvalidSides {
		/// Number of sides that was asked for
		sides: u64,

		/// Smallest allowed number of sides
		min: u16,

		/// Largest allowed number of sides
		max: u16,
	},

	/// A single term, or the whole expression, asked for more dice than allowed (or for no dice at all).
	#[error("cannot roll {requested} dice, the limit is between 1 and {max}")]
	TooManyDice {
		/// Number of dice that was asked for (cumulative when the limit was exceeded across terms)
		requested: u64,

		/// Largest allowed number of dice
		max: u16,
	},

	/// A constant term doesn't fit in a 32-bit signed integer.
	#[error("constant {literal} is out of range")]
	ConstantOverflow {
		/// Digits of the constant as written
		literal: String,
	},
}

/// Builds the "unexpected ..." part of a malformed expression message.
fn describe_fragment(fragment: &str) -> String {
	if fragment.is_empty() {
		String::from("unexpected end of input")
	} else {
		format!("unexpected \"{fragment}\"")
	}
}
