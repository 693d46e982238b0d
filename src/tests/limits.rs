use crate::{
	dice::Dice,
	error::Error,
	expr::{Expr, Sign, Signed, Term},
	limits::{max_constant, Limits, MAX_CONSTANT, MAX_NEGATED_CONSTANT},
};

#[test]
fn default_bounds() {
	let limits = Limits::default();
	assert_eq!(limits, Limits::new(100, 2, 1000));
}

#[test]
fn dice_count_bounds() {
	let limits = Limits::default();
	assert_eq!(limits.dice(1, 6), Ok(Dice::new(1, 6)));
	assert_eq!(limits.dice(100, 6), Ok(Dice::new(100, 6)));
	assert_eq!(limits.dice(0, 6), Err(Error::TooManyDice { requested: 0, max: 100 }));
	assert_eq!(limits.dice(101, 6), Err(Error::TooManyDice { requested: 101, max: 100 }));
	assert!(matches!(limits.dice(u64::MAX, 6), Err(Error::TooManyDice { .. })));
}

#[test]
fn dice_sides_bounds() {
	let limits = Limits::default();
	assert_eq!(limits.dice(1, 2), Ok(Dice::new(1, 2)));
	assert_eq!(limits.dice(1, 1000), Ok(Dice::new(1, 1000)));
	assert_eq!(
		limits.dice(1, 1),
		Err(Error::InvalidSides {
			sides: 1,
			min: 2,
			max: 1000
		})
	);
	assert_eq!(
		limits.dice(1, 1001),
		Err(Error::InvalidSides {
			sides: 1001,
			min: 2,
			max: 1000
		})
	);
}

#[test]
fn count_checked_before_sides() {
	assert!(matches!(Limits::default().dice(101, 1), Err(Error::TooManyDice { .. })));
}

#[test]
fn pool_bounds() {
	let limits = Limits::default();
	assert_eq!(limits.pool(50, 50), Ok(100));
	assert_eq!(limits.pool(50, 51), Err(Error::TooManyDice { requested: 101, max: 100 }));
	assert!(limits.pool(u64::MAX, 1).is_err());
}

#[test]
fn check_built_expression() {
	let limits = Limits::default();

	let ok = Expr::new(vec![
		Signed::plus(Term::Dice(Dice::new(50, 100))),
		Signed::minus(Term::Dice(Dice::new(50, 100))),
		Signed::plus(Term::Num(MAX_CONSTANT)),
		Signed::minus(Term::Num(MAX_NEGATED_CONSTANT)),
	]);
	assert_eq!(limits.check(&ok), Ok(()));

	let overflowing = Expr::new(vec![Signed::plus(Term::Num(MAX_CONSTANT + 1))]);
	assert_eq!(
		limits.check(&overflowing),
		Err(Error::ConstantOverflow {
			literal: "2147483648".to_owned()
		})
	);

	let overflowing = Expr::new(vec![Signed::minus(Term::Num(MAX_NEGATED_CONSTANT + 1))]);
	assert_eq!(
		limits.check(&overflowing),
		Err(Error::ConstantOverflow {
			literal: "2147483649".to_owned()
		})
	);

	let too_many = Expr::new(vec![
		Signed::plus(Term::Dice(Dice::new(60, 6))),
		Signed::plus(Term::Dice(Dice::new(60, 6))),
	]);
	assert_eq!(limits.check(&too_many), Err(Error::TooManyDice { requested: 120, max: 100 }));
}

#[test]
fn first_violation_wins() {
	let expr = Expr::new(vec![
		Signed::plus(Term::Dice(Dice::new(60, 6))),
		Signed::plus(Term::Dice(Dice::new(60, 6))),
		Signed::plus(Term::Dice(Dice::new(1, 1))),
	]);
	assert!(matches!(Limits::default().check(&expr), Err(Error::TooManyDice { .. })));

	let expr = Expr::new(vec![
		Signed::plus(Term::Dice(Dice::new(1, 1))),
		Signed::plus(Term::Dice(Dice::new(101, 6))),
	]);
	assert!(matches!(Limits::default().check(&expr), Err(Error::InvalidSides { .. })));
}

#[test]
fn custom_limits() {
	let limits = Limits::new(5, 4, 12);
	assert!(limits.dice(5, 12).is_ok());
	assert!(matches!(limits.dice(6, 6), Err(Error::TooManyDice { max: 5, .. })));
	assert!(matches!(limits.dice(1, 2), Err(Error::InvalidSides { min: 4, .. })));
	assert!(matches!(limits.dice(1, 20), Err(Error::InvalidSides { max: 12, .. })));
}

#[test]
fn constant_bounds_follow_i32() {
	assert_eq!(i64::from(max_constant(Sign::Plus)), i64::from(i32::MAX));
	assert_eq!(Sign::Minus.apply(max_constant(Sign::Minus).into()), i64::from(i32::MIN));
}
