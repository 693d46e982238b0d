use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Roller},
		Dice,
	},
	engine::{Engine, RollResult, QUICK_ROLLS},
	error::Error,
	expr::{Expr, Signed, Term},
	limits::Limits,
};

/// Roller that counts how many dice it has been asked to roll
struct Counting(usize);

impl Roller for Counting {
	fn roll_die(&mut self, _sides: u16) -> u16 {
		self.0 += 1;
		1
	}
}

#[test]
fn roll_built_expression() {
	let expr = Expr::new(vec![Signed::plus(Term::Dice(Dice::new(3, 6))), Signed::minus(Term::Num(2))]);
	let result = Engine::default().roll(&expr, &mut Counting(0)).unwrap();
	assert_eq!(
		result,
		RollResult {
			expression: "3d6-2".to_owned(),
			results: vec![1, 1, 1],
			total: 1,
			campaign_id: None,
		}
	);
}

#[test]
fn rejected_built_expression_rolls_nothing() {
	let expr = Expr::new(vec![
		Signed::plus(Term::Dice(Dice::new(60, 6))),
		Signed::plus(Term::Dice(Dice::new(60, 6))),
	]);
	let mut rng = Counting(0);
	assert!(matches!(Engine::default().roll(&expr, &mut rng), Err(Error::TooManyDice { .. })));
	assert_eq!(rng.0, 0);
}

#[test]
fn with_campaign() {
	let result = RollResult {
		expression: "1d20".to_owned(),
		results: vec![14],
		total: 14,
		campaign_id: None,
	}
	.with_campaign(3);
	assert_eq!(result.campaign_id, Some(3));
}

#[test]
fn breakdown() {
	let result = RollResult {
		expression: "1d4 - 10".to_owned(),
		results: vec![2],
		total: -8,
		campaign_id: None,
	};
	assert_eq!(result.to_string(), "1d4 - 10 = [2] = -8");

	let result = RollResult {
		expression: "5".to_owned(),
		results: Vec::new(),
		total: 5,
		campaign_id: None,
	};
	assert_eq!(result.to_string(), "5 = [] = 5");
}

#[test]
fn engine_is_shareable() {
	fn assert_send_sync<T: Send + Sync + Copy>() {}
	assert_send_sync::<Engine>();
	assert_eq!(*Engine::new(Limits::new(10, 2, 20)).limits(), Limits::new(10, 2, 20));
}

#[cfg(feature = "parse")]
mod parsed {
	use super::*;
	use crate::dice::roller::Iter as IterRoller;

	#[test]
	fn single_d20() {
		let result = crate::evaluate("1d20", &mut IterRoller::new([14])).unwrap();
		assert_eq!(
			result,
			RollResult {
				expression: "1d20".to_owned(),
				results: vec![14],
				total: 14,
				campaign_id: None,
			}
		);
	}

	#[test]
	fn dice_plus_constant() {
		let result = crate::evaluate("2d6+3", &mut IterRoller::new([4, 5])).unwrap();
		assert_eq!(result.expression, "2d6+3");
		assert_eq!(result.results, vec![4, 5]);
		assert_eq!(result.total, 12);
	}

	#[test]
	fn dice_minus_constant() {
		let result = crate::evaluate("4d8-1", &mut IterRoller::new([1, 1, 1, 1])).unwrap();
		assert_eq!(result.total, 3);
	}

	#[test]
	fn negative_total_is_kept() {
		let result = crate::evaluate("1d4-10", &mut IterRoller::new([4])).unwrap();
		assert_eq!(result.total, -6);
	}

	#[test]
	fn subtracted_dice() {
		let result = crate::evaluate("3d6 + 2d4 - 1d8 - 1", &mut IterRoller::new([1, 2, 3, 4, 3, 8])).unwrap();
		assert_eq!(result.expression, "3d6 + 2d4 - 1d8 - 1");
		assert_eq!(result.results, vec![1, 2, 3, 4, 3, 8]);
		assert_eq!(result.total, 1 + 2 + 3 + 4 + 3 - 8 - 1);
	}

	#[test]
	fn expression_is_trimmed_but_not_normalized() {
		let result = crate::evaluate("  2D6 +3 \n", &mut IterRoller::new([1, 2])).unwrap();
		assert_eq!(result.expression, "2D6 +3");
	}

	#[test]
	fn campaign_is_threaded_through() {
		let result = Engine::default()
			.evaluate_for_campaign("1d6", 12, &mut IterRoller::new([6]))
			.unwrap();
		assert_eq!(result.campaign_id, Some(12));
		assert_eq!(result.total, 6);
	}

	#[test]
	fn failures_roll_nothing() {
		for input in ["", "   ", "2d", "d6", "2d6++3", "50d100+51d100", "1d1", "1d6+99999999999"] {
			let mut rng = Counting(0);
			assert!(crate::evaluate(input, &mut rng).is_err(), "{input:?} should fail");
			assert_eq!(rng.0, 0, "{input:?} rolled dice");
		}
	}

	#[test]
	fn scenario_errors() {
		let mut rng = Counting(0);
		assert_eq!(crate::evaluate("  ", &mut rng), Err(Error::EmptyExpression));
		assert!(matches!(
			crate::evaluate("2d", &mut rng),
			Err(Error::MalformedExpression { .. })
		));
		assert!(matches!(
			crate::evaluate("50d100+51d100", &mut rng),
			Err(Error::TooManyDice { requested: 101, max: 100 })
		));
	}

	#[test]
	fn custom_engine_limits() {
		let engine = Engine::new(Limits::new(3, 2, 6));
		assert!(engine.evaluate("3d6", &mut Counting(0)).is_ok());
		assert!(matches!(engine.parse("2d6+2d6"), Err(Error::TooManyDice { .. })));
		assert!(matches!(engine.parse("1d8"), Err(Error::InvalidSides { .. })));
	}

	#[test]
	fn quick_rolls_are_valid() {
		let mut rng = FastRandRoller::with_seed(7);
		for preset in QUICK_ROLLS {
			let expr = crate::parse(preset).unwrap();
			assert_eq!(expr.to_string(), preset);

			let result = crate::evaluate(preset, &mut rng).unwrap();
			let sides = expr.dice().next().unwrap().sides;
			assert!(result.results.iter().all(|&face| (1..=sides).contains(&face)));
		}
	}

	#[test]
	fn concurrent_evaluation() {
		let engine = Engine::default();
		let totals = std::thread::scope(|scope| {
			let handles = (0..4_u64)
				.map(|seed| scope.spawn(move || engine.evaluate("10d10+5", &mut FastRandRoller::with_seed(seed))))
				.collect::<Vec<_>>();
			handles
				.into_iter()
				.map(|handle| handle.join().unwrap().unwrap())
				.collect::<Vec<_>>()
		});

		for (seed, result) in (0..4_u64).zip(totals) {
			let expected = engine
				.evaluate("10d10+5", &mut FastRandRoller::with_seed(seed))
				.unwrap();
			assert_eq!(result, expected);
			assert!((15..=105).contains(&result.total));
		}
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serialized_shape() {
		let result = Engine::default()
			.evaluate_for_campaign("2d6+3", 9, &mut IterRoller::new([4, 5]))
			.unwrap();
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"expression": "2d6+3",
				"results": [4, 5],
				"total": 12,
				"campaign_id": 9,
			})
		);

		let back: RollResult = serde_json::from_value(json).unwrap();
		assert_eq!(back, result);
	}
}
