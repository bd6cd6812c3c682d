use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use ruleseek_core as game;
use ruleseek_core::ProgressStore;

/// Infer the hidden rule by revealing tiles.
#[derive(Parser)]
#[command(name = "ruleseek", version, about)]
struct Cli {
    /// Directory holding the progress documents.
    #[arg(long, global = true, default_value = ".ruleseek")]
    data_dir: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a round interactively.
    Play {
        /// easy, medium, or hard; anything else falls back to easy.
        #[arg(long, default_value = "easy")]
        difficulty: String,
        /// Pin the rule draw for a reproducible session.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the best score per difficulty.
    Best,
    /// Show the rules book (unlocked rules).
    Rules {
        /// Also list every rule in the catalog.
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let progress = game::Progress::at_dir(&cli.data_dir);
    match cli.command {
        Command::Play { difficulty, seed } => play(&difficulty, seed, progress),
        Command::Best => best(&progress),
        Command::Rules { all } => rules_book(&progress, all),
    }
}

fn play(difficulty: &str, seed: Option<u64>, progress: game::Progress<game::DirBlobStore>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("rule draw seed: {seed}");

    let selector = game::RandomRuleSelector::new(seed);
    let mut session = game::Session::start(difficulty, selector, progress);

    println!(
        "Difficulty: {} — find every correct tile before your moves run out.",
        session.difficulty().token()
    );
    println!("Enter `row col` (1-based), `r` to restart, `q` to quit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        render(session.round());
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line.context("reading input")?,
            None => return Ok(()),
        };
        match line.trim() {
            "" => continue,
            "q" | "quit" => return Ok(()),
            "r" | "restart" => {
                session.restart();
                println!("New round, new rule.");
                continue;
            }
            input => match parse_coords(input, session.round().config().grid_size) {
                Some(coords) => {
                    let outcome = session.reveal(coords)?;
                    report(&session, outcome)?;
                    if session.round().is_finished() {
                        render(session.round());
                        println!("Play again? `r` for a new round, `q` to quit.");
                    }
                }
                None => println!("Expected `row col` within the grid, e.g. `2 3`."),
            },
        }
    }
}

fn report<S, R>(session: &game::Session<S, R>, outcome: game::RevealOutcome) -> Result<()>
where
    S: ProgressStore,
    R: game::RuleSelector,
{
    use game::RevealOutcome::*;

    let round = session.round();
    match outcome {
        NoChange => println!("That tile is already revealed."),
        Correct => println!(
            "Correct! Score {}, {} moves left, {}/{} found.",
            round.score(),
            round.moves_remaining(),
            round.correct_found(),
            round.target_count()
        ),
        Incorrect => println!(
            "Wrong. Score {}, {} moves left.",
            round.score(),
            round.moves_remaining()
        ),
        Won => {
            let rule = round.rule();
            println!("You won with score {}!", round.score());
            println!("The rule was \"{}\": {}", rule.name, rule.description);
            println!("\"{}\" is now in your rules book.", rule.name);
            if let Some(best) = session.progress().best(session.difficulty())? {
                println!("Best score on {}: {best}.", session.difficulty().token());
            }
        }
        Lost => {
            let rule = round.rule();
            println!("Out of moves — final score {}.", round.score());
            println!("The rule was \"{}\": {}", rule.name, rule.description);
        }
    }
    Ok(())
}

fn render(round: &game::Round) {
    let size = round.config().grid_size;

    print!("   ");
    for col in 1..=size {
        print!(" {col}");
    }
    println!();
    for row in 0..size {
        print!("{:>3}", row + 1);
        for col in 0..size {
            let glyph = match round.tile_at((row, col)) {
                game::TileState::Unknown => '.',
                game::TileState::Correct => 'o',
                game::TileState::Incorrect => 'x',
            };
            print!(" {glyph}");
        }
        println!();
    }
    println!(
        "score {} | moves left {} | found {}/{}",
        round.score(),
        round.moves_remaining(),
        round.correct_found(),
        round.target_count()
    );
}

/// Parses 1-based `row col` input into 0-based grid coordinates.
fn parse_coords(input: &str, grid_size: game::Coord) -> Option<game::Coord2> {
    let mut parts = input.split_whitespace();
    let row: game::Coord = parts.next()?.parse().ok()?;
    let col: game::Coord = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if row == 0 || col == 0 || row > grid_size || col > grid_size {
        return None;
    }
    Some((row - 1, col - 1))
}

fn best(progress: &game::Progress<game::DirBlobStore>) -> Result<()> {
    for difficulty in game::Difficulty::ALL {
        match progress.best(difficulty)? {
            Some(score) => println!("{:>6}: {score}", difficulty.token()),
            None => println!("{:>6}: no rounds finished", difficulty.token()),
        }
    }
    Ok(())
}

fn rules_book(progress: &game::Progress<game::DirBlobStore>, all: bool) -> Result<()> {
    let unlocked = progress.unlocked_rules()?;
    if unlocked.is_empty() {
        println!("No rules unlocked yet. Go win a round!");
    } else {
        println!("Unlocked rules:");
        for rule in &unlocked {
            println!("  {} — {}", rule.name, rule.description);
        }
    }

    if all {
        println!("\nFull catalog:");
        for difficulty in game::Difficulty::ALL {
            println!("[{}]", difficulty.token());
            for rule in game::rules_for(difficulty) {
                println!("  {} — {}", rule.name, rule.description);
            }
        }
    }
    Ok(())
}
