use std::fmt;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cryptarith::{
    adapter::adapt,
    compile::{compile, ConstraintStrategy, GenerateAndTest, Policy, Propagation},
    puzzle::{Equation, ParseOptions},
    solver::{
        backend::BacktrackingBackend,
        heuristics::HeuristicKind,
        stats::render_stats_table,
    },
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum StrategyArg {
    GenerateAndTest,
    #[default]
    Propagation,
}

impl fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().expect("no skipped variants");
        f.write_str(value.get_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum HeuristicArg {
    First,
    #[default]
    Mrv,
    Random,
}

impl fmt::Display for HeuristicArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().expect("no skipped variants");
        f.write_str(value.get_name())
    }
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::First => HeuristicKind::First,
            HeuristicArg::Mrv => HeuristicKind::MinimumRemainingValues,
            HeuristicArg::Random => HeuristicKind::Random,
        }
    }
}

/// Solve cryptarithm puzzles such as SEND+MORE=MONEY.
#[derive(Debug, Parser)]
#[command(name = "cryptarith", version)]
struct Args {
    /// Puzzle text, e.g. "SEND+MORE=MONEY"
    puzzle: String,

    /// Constraint compilation strategy
    #[arg(long, value_enum, default_value_t)]
    strategy: StrategyArg,

    /// Forbid every letter from taking the digit 0
    #[arg(long)]
    no_zero: bool,

    /// Allow the first letter of a word to be 0
    #[arg(long)]
    leading_zero: bool,

    /// Treat upper and lower case as distinct letters
    #[arg(long)]
    case_sensitive: bool,

    /// Stop after this many solutions
    #[arg(long)]
    limit: Option<usize>,

    /// Print each solution as a JSON object
    #[arg(long)]
    json: bool,

    /// Print per-constraint search statistics when done
    #[arg(long)]
    stats: bool,

    /// Variable selection heuristic for the bundled backend
    #[arg(long, value_enum, default_value_t)]
    heuristic: HeuristicArg,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let equation = Equation::parse_with(
        &args.puzzle,
        ParseOptions {
            case_sensitive: args.case_sensitive,
        },
    )?;
    let policy = Policy {
        allow_zero: !args.no_zero,
        allow_leading_zero: args.leading_zero,
    };
    let strategy: &dyn ConstraintStrategy = match args.strategy {
        StrategyArg::GenerateAndTest => &GenerateAndTest,
        StrategyArg::Propagation => &Propagation,
    };

    let csp = compile(&equation, policy, strategy);
    info!(
        puzzle = %equation,
        strategy = strategy.name(),
        variables = csp.variables().len(),
        constraints = csp.constraints.len(),
        "compiled puzzle"
    );

    let backend = BacktrackingBackend::with_heuristic(args.heuristic.into());
    let mut search = backend.search(&csp);

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut found = 0usize;
    while found < limit {
        let Some(binding) = search.next() else {
            break;
        };
        let assignment = adapt(&binding, &equation)?;
        if args.json {
            let line = serde_json::to_string(&assignment)
                .expect("an assignment always serializes to JSON");
            println!("{line}");
        } else {
            println!("{assignment}");
        }
        found += 1;
    }

    if !args.json {
        match found {
            0 => println!("no solution"),
            1 => println!("1 solution"),
            n => println!("{n} solutions"),
        }
    }

    if args.stats {
        eprintln!("{}", render_stats_table(search.stats(), search.constraints()));
    }

    Ok(())
}
