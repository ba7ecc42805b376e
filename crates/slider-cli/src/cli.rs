use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use slider_core::{PersistedState, Puzzle, PuzzleConfig};

use crate::drag::{DragArgs, run_drag};
use crate::error::{CliError, Result};
use crate::new_game::{NewArgs, run_new};
use crate::play::{PlayArgs, run_play};

#[derive(Debug, Parser)]
#[command(
    name = "slider",
    about = "Build, play and inspect sliding-tile puzzles from the terminal",
    version
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log-level", global = true, default_value = "warn")]
    pub log_level: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build and scramble a new puzzle.
    New(NewArgs),

    /// Apply moves by cell index to a saved session.
    Play(PlayArgs),

    /// Drive one drag gesture through to its commit.
    Drag(DragArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(&cli.log_level);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let summary = match cli.command {
        Commands::New(args) => run_new(args)?,
        Commands::Play(args) => run_play(args)?,
        Commands::Drag(args) => run_drag(args)?,
    };
    match cli.format {
        Format::Text => println!("{summary}"),
        Format::Json => println!("{}", summary.to_json()?),
    }
    Ok(())
}

/// Read a configuration file, or defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PuzzleConfig> {
    match path {
        Some(path) => Ok(PuzzleConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(PuzzleConfig::default()),
    }
}

/// Restore the session saved at `path`. `base` supplies the thresholds a
/// snapshot does not record.
pub(crate) fn restore(path: &Path, base: PuzzleConfig) -> Result<Puzzle> {
    let state = PersistedState::load(path)?.ok_or_else(|| CliError::MissingSession {
        path: path.to_path_buf(),
    })?;
    Ok(Puzzle::restore(&state, base)?)
}

pub(crate) fn check_cell(puzzle: &Puzzle, cell: usize) -> Result<()> {
    let count = puzzle.board().cell_count();
    if cell >= count {
        let size = puzzle.board().size();
        return Err(CliError::invalid(format!(
            "cell {cell} is outside the {size}x{size} board (0..{count})"
        )));
    }
    Ok(())
}
