use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use slider_core::{Difficulty, Puzzle, ShuffleReach};

use crate::cli::load_config;
use crate::error::Result;
use crate::summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
            DifficultyArg::Expert => Self::Expert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReachArg {
    Adjacent,
    Line,
}

impl From<ReachArg> for ShuffleReach {
    fn from(arg: ReachArg) -> Self {
        match arg {
            ReachArg::Adjacent => Self::Adjacent,
            ReachArg::Line => Self::Line,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Board edge in tiles.
    #[arg(long)]
    pub size: Option<usize>,

    /// Scramble moves.
    #[arg(long, conflicts_with = "difficulty")]
    pub moves: Option<u32>,

    /// Named scramble depth.
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// How far one scramble move may shove.
    #[arg(long, value_enum)]
    pub reach: Option<ReachArg>,

    /// Seed for a reproducible scramble.
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the new session here.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run_new(args: NewArgs) -> Result<Summary> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(size) = args.size {
        config = config.size(size);
    }
    if let Some(moves) = args.moves {
        config = config.random_moves(moves);
    }
    if let Some(difficulty) = args.difficulty {
        config = config.difficulty(difficulty.into());
    }
    if let Some(reach) = args.reach {
        config = config.shuffle_reach(reach.into());
    }

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let puzzle = Puzzle::new(config, &mut rng)?;
    tracing::info!(seed = ?args.seed, "new puzzle");

    let moves = puzzle.snapshot().random_moves;
    Summary::of(&puzzle)
        .note(format!("scrambled with {moves} moves"))
        .save_if(&puzzle, args.save.as_deref())
}
