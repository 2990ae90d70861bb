//! DRAWODDS — card draw odds for replace-mechanic card games
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the scenario from flags (or asks for it interactively), runs
//! the draw simulator and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing::{debug, info};

use drawodds::config::{AppConfig, DEFAULT_CONFIG_FILE};
use drawodds::prompt::{Prompter, ScenarioInput};
use drawodds::report::{OddsReport, SweepReport};
use drawodds::simulator::{self, DrawSimulator};
use drawodds::types::Scenario;

#[derive(Parser, Debug)]
#[command(
    name = "drawodds",
    about = "Calculate the odds of seeing a certain card by a certain turn number in Duelyst."
)]
struct Cli {
    /// Print every draw and replace as it happens
    #[arg(short, long)]
    verbose: bool,

    /// TOML file with rule and deck overrides
    #[arg(long, env = "DRAWODDS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// The deck contains a Trial card (one fewer card in the deck)
    #[arg(long)]
    trial: bool,

    /// The deck holds at most one copy of each card
    #[arg(long)]
    singleton: bool,

    /// Copies of the card in the deck (always 1 for singleton decks)
    #[arg(long)]
    copies: Option<u32>,

    /// Turn you want to play the card on
    #[arg(long)]
    turn: Option<u32>,

    /// Use the 2-draw rule (two end-of-turn draws)
    #[arg(long)]
    two_draw: bool,

    /// Print the odds for every turn from 1 up to this one
    #[arg(long, conflicts_with = "turn")]
    sweep: Option<u32>,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Without --turn or --sweep the scenario is collected interactively.
    fn is_interactive(&self) -> bool {
        self.turn.is_none() && self.sweep.is_none()
    }

    fn input_from_flags(&self) -> ScenarioInput {
        ScenarioInput {
            trial: self.trial,
            singleton: self.singleton,
            copies: if self.singleton { 1 } else { self.copies.unwrap_or(1) },
            target_turn: self.turn.or(self.sweep).unwrap_or(1),
            two_draw: self.two_draw,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = AppConfig::load_or_default(&cli.config)?;
    debug!(?cfg, "Configuration ready");

    if cli.singleton && cli.copies.is_some_and(|c| c != 1) {
        anyhow::bail!("a singleton deck holds exactly one copy of each card");
    }

    let input = if cli.is_interactive() {
        let stdin = io::stdin();
        Prompter::new(stdin.lock(), io::stdout())
            .collect()
            .context("Failed to collect scenario")?
    } else {
        cli.input_from_flags()
    };
    let scenario = input.into_scenario(&cfg.deck, cli.verbose);
    info!(scenario = %scenario, "Scenario ready");

    match cli.sweep {
        Some(max_turn) => print_sweep(&scenario, &cfg, max_turn, cli.json),
        None => print_single(scenario, &cfg, cli.json),
    }
}

fn print_single(scenario: Scenario, cfg: &AppConfig, json: bool) -> Result<()> {
    let target_turn = scenario.target_turn;
    let sim = DrawSimulator::new(scenario, cfg.rules.clone())?;
    let probability = sim.evaluate()?;

    let report = OddsReport::new(target_turn, probability)?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn print_sweep(scenario: &Scenario, cfg: &AppConfig, max_turn: u32, json: bool) -> Result<()> {
    let odds = simulator::sweep(scenario, &cfg.rules, max_turn)?;

    let report = SweepReport::from_odds(&odds)?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = if verbose { "drawodds=info" } else { "drawodds=warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json_logging = std::env::var("DRAWODDS_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .without_time()
            .with_writer(io::stderr)
            .init();
    }
}
