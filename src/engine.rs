//! The public face of the crate: parse, validate and roll an expression in one call.

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use crate::{
	dice::roller::Roller,
	error::Error,
	expr::{Evaled, Expr},
	limits::Limits,
};

/// Canonical expressions offered as one-click rolls
pub const QUICK_ROLLS: [&str; 8] = ["1d4", "1d6", "1d8", "1d10", "1d12", "1d20", "2d6", "1d100"];

/// Outcome of rolling a dice expression.
///
/// With the `serde` feature this serializes as `{"expression", "results", "total", "campaign_id"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct RollResult {
	/// Expression as it was given, minus surrounding whitespace
	pub expression: String,

	/// Face of every die rolled, in roll order. Constants aren't included, and faces of subtracted dice are unsigned.
	pub results: Vec<u16>,

	/// Sum of every face and constant, according to their signs
	pub total: i64,

	/// Campaign the roll was made in, passed through untouched
	pub campaign_id: Option<i64>,
}

impl RollResult {
	/// Collects the faces and total of an evaluated expression.
	#[must_use]
	pub fn from_evaled(expression: &str, evaled: &Evaled<'_>) -> Self {
		Self {
			expression: expression.to_string(),
			results: evaled.faces().collect(),
			total: evaled.calc(),
			campaign_id: None,
		}
	}

	/// Attaches a campaign to the result.
	#[must_use]
	pub fn with_campaign(mut self, campaign_id: i64) -> Self {
		self.campaign_id = Some(campaign_id);
		self
	}
}

impl fmt::Display for RollResult {
	/// Formats the breakdown of the roll as `expression = [r1, r2, ...] = total`.
	///
	/// # Examples
	/// ```
	/// use goh_dice::dice::roller::Iter as IterRoller;
	///
	/// let result = goh_dice::evaluate("2d6+3", &mut IterRoller::new([4, 5]))?;
	/// assert_eq!(result.to_string(), "2d6+3 = [4, 5] = 12");
	/// # Ok::<(), goh_dice::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} = [", self.expression)?;
		for (idx, face) in self.results.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{face}")?;
		}
		write!(f, "] = {}", self.total)
	}
}

/// Parses, validates and rolls dice expressions under a fixed set of [`Limits`].
///
/// The engine holds no state besides its limits, so a single instance can be shared freely between threads. Each call
/// only needs its own [`Roller`].
///
/// # Examples
/// ```
/// use goh_dice::{dice::roller::Iter as IterRoller, limits::Limits, Engine, Error};
///
/// let engine = Engine::new(Limits::new(10, 2, 20));
/// assert!(matches!(engine.parse("11d6"), Err(Error::TooManyDice { .. })));
///
/// let result = engine.evaluate_for_campaign("1d20", 7, &mut IterRoller::new([14]))?;
/// assert_eq!(result.total, 14);
/// assert_eq!(result.campaign_id, Some(7));
/// # Ok::<(), goh_dice::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
	/// Bounds every expression is checked against
	limits: Limits,
}

impl Engine {
	/// Creates an engine that enforces the given limits.
	#[must_use]
	pub const fn new(limits: Limits) -> Self {
		Self { limits }
	}

	/// Limits the engine enforces.
	#[must_use]
	pub const fn limits(&self) -> &Limits {
		&self.limits
	}

	/// Parses and validates an expression without rolling anything.
	///
	/// # Errors
	/// [`Error::EmptyExpression`] or [`Error::MalformedExpression`] if the input isn't a valid expression, or one of
	/// the limit errors if it asks for too much.
	#[cfg(feature = "parse")]
	pub fn parse(&self, input: &str) -> Result<Expr, Error> {
		crate::parse::parse_expr(input, &self.limits)
	}

	/// Parses, validates and rolls an expression.
	/// Nothing is rolled unless the whole expression is valid.
	///
	/// # Errors
	/// See [`Self::parse()`].
	#[cfg(feature = "parse")]
	pub fn evaluate(&self, input: &str, rng: &mut impl Roller) -> Result<RollResult, Error> {
		let expr = self.parse(input)?;
		Ok(RollResult::from_evaled(input.trim(), &expr.eval(rng)))
	}

	/// Same as [`Self::evaluate()`], tagging the result with the campaign it was rolled in.
	///
	/// # Errors
	/// See [`Self::parse()`].
	#[cfg(feature = "parse")]
	pub fn evaluate_for_campaign(
		&self,
		input: &str,
		campaign_id: i64,
		rng: &mut impl Roller,
	) -> Result<RollResult, Error> {
		Ok(self.evaluate(input, rng)?.with_campaign(campaign_id))
	}

	/// Validates and rolls an expression that was built directly rather than parsed.
	/// The expression's canonical form is used as the result's expression string.
	///
	/// # Errors
	/// One of the limit errors if the expression asks for too much. Nothing is rolled in that case.
	///
	/// # Examples
	/// ```
	/// use goh_dice::{dice::roller::Max as MaxRoller, expr::{Expr, Signed, Term}, Dice, Engine};
	///
	/// let expr = Expr::new(vec![Signed::plus(Term::Dice(Dice::new(1, 4))), Signed::minus(Term::Num(10))]);
	/// let result = Engine::default().roll(&expr, &mut MaxRoller)?;
	/// assert_eq!(result.expression, "1d4-10");
	/// assert_eq!(result.total, -6);
	/// # Ok::<(), goh_dice::Error>(())
	/// ```
	pub fn roll(&self, expr: &Expr, rng: &mut impl Roller) -> Result<RollResult, Error> {
		self.limits.check(expr)?;
		Ok(RollResult::from_evaled(&expr.to_string(), &expr.eval(rng)))
	}
}

/// Parses and validates an expression against the default [`Limits`], without rolling anything.
///
/// # Errors
/// See [`Engine::parse()`].
///
/// # Examples
/// ```
/// use goh_dice::{expr::{Sign, Term}, Dice};
///
/// let expr = goh_dice::parse("4d8 - 1")?;
/// assert_eq!(expr.terms.len(), 2);
/// assert_eq!(expr.terms[0].term, Term::Dice(Dice::new(4, 8)));
/// assert_eq!(expr.terms[1].sign, Sign::Minus);
/// assert_eq!(expr.terms[1].term, Term::Num(1));
/// # Ok::<(), goh_dice::Error>(())
/// ```
#[cfg(feature = "parse")]
pub fn parse(input: &str) -> Result<Expr, Error> {
	Engine::default().parse(input)
}

/// Parses, validates and rolls an expression against the default [`Limits`].
///
/// # Errors
/// See [`Engine::parse()`].
///
/// # Examples
/// ```
/// use goh_dice::dice::roller::Iter as IterRoller;
///
/// let result = goh_dice::evaluate(" 1d20 ", &mut IterRoller::new([14]))?;
/// assert_eq!(result.expression, "1d20");
/// assert_eq!(result.results, vec![14]);
/// assert_eq!(result.total, 14);
/// # Ok::<(), goh_dice::Error>(())
/// ```
#[cfg(feature = "parse")]
pub fn evaluate(input: &str, rng: &mut impl Roller) -> Result<RollResult, Error> {
	Engine::default().evaluate(input, rng)
}
