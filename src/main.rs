//! Command-line dice roller.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use goh_dice::{dice::roller::FastRand, expr::Describe, limits::Limits, Engine, Error, RollResult};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Rolls a dice expression such as `2d6+3` and prints the breakdown
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
	/// Dice expression to roll. Read from stdin if not given. Spaces are allowed, so it can be left unquoted.
	expression: Vec<String>,

	/// Seed for the random number generator, for repeatable rolls
	#[arg(long, env = "GOH_DICE_SEED")]
	seed: Option<u64>,

	/// Campaign to attach to the result
	#[arg(long)]
	campaign: Option<i64>,

	/// Maximum number of dice in the whole expression
	#[arg(long, env = "GOH_DICE_MAX_DICE", default_value_t = Limits::default().max_dice)]
	max_dice: u16,

	/// Maximum number of sides per die
	#[arg(long, env = "GOH_DICE_MAX_SIDES", default_value_t = Limits::default().max_sides)]
	max_sides: u16,

	/// Print the result as JSON
	#[arg(long)]
	json: bool,

	/// Only parse and validate the expression, printing its canonical form
	#[arg(long, conflicts_with = "json")]
	parse_only: bool,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let input = match read_input(&args) {
		Ok(input) => input,
		Err(err) => {
			eprintln!("Unable to read expression: {err}");
			return ExitCode::FAILURE;
		}
	};

	let engine = Engine::new(Limits::new(args.max_dice, Limits::default().min_sides, args.max_sides));
	match run(&engine, &args, &input) {
		Ok(code) => code,
		Err(err) => {
			warn!(%err, "rejected dice expression");
			report(input.trim(), &err);
			ExitCode::FAILURE
		}
	}
}

/// Obtains the expression by combining all args passed to the executable, or from the first line of stdin if there
/// weren't any.
fn read_input(args: &Args) -> io::Result<String> {
	if !args.expression.is_empty() {
		return Ok(args.expression.join(" "));
	}

	// If stdin is interactive, display a prompt for it
	if io::stdin().is_terminal() {
		print!("Enter dice expression: ");
		io::stdout().flush()?;
	}

	let mut line = String::new();
	io::stdin().read_line(&mut line)?;
	Ok(line)
}

/// Parses and rolls the expression, printing the outcome.
fn run(engine: &Engine, args: &Args, input: &str) -> Result<ExitCode, Error> {
	let expr = engine.parse(input)?;
	debug!(%expr, dice = expr.dice_count(), "parsed dice expression");

	if args.parse_only {
		println!("{expr}");
		return Ok(ExitCode::SUCCESS);
	}

	let mut rng = args.seed.map_or_else(FastRand::default, FastRand::with_seed);
	let evaled = expr.eval(&mut rng);
	debug!(breakdown = %evaled.describe(Some(20)), "rolled dice");

	let mut result = RollResult::from_evaled(input.trim(), &evaled);
	if let Some(campaign_id) = args.campaign {
		result = result.with_campaign(campaign_id);
	}
	info!(expression = %result.expression, total = result.total, "dice rolled");

	match render(&result, args.json) {
		Ok(output) => {
			println!("{output}");
			Ok(ExitCode::SUCCESS)
		}
		Err(err) => {
			eprintln!("Unable to serialize result: {err}");
			Ok(ExitCode::FAILURE)
		}
	}
}

/// Renders a result as JSON or as the plain breakdown.
fn render(result: &RollResult, json: bool) -> serde_json::Result<String> {
	if json {
		serde_json::to_string(result)
	} else {
		Ok(result.to_string())
	}
}

/// Prints an error, pointing at the offending part of the expression when there is one.
fn report(input: &str, err: &Error) {
	let Error::MalformedExpression { fragment, offset } = err else {
		eprintln!("Error: {err}");
		return;
	};

	let span = *offset..offset.saturating_add(fragment.chars().count());
	let printed = Report::build(ReportKind::Error, span.clone())
		.with_message("Malformed dice expression")
		.with_label(Label::new(span).with_message(err.to_string()).with_color(Color::Red))
		.finish()
		.eprint(Source::from(input));
	if printed.is_err() {
		eprintln!("Error: {err}");
	}
}
