//! Escampe self-play
//!
//! Runs two agents against each other and prints the final position.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use escampe::{Agent, AgentConfig, Move, Side};

#[derive(Parser, Debug)]
#[command(name = "escampe", about = "Escampe agent self-play")]
struct Args {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// In-game search depth, root ply included
    #[arg(long)]
    depth: Option<u8>,

    /// Search depth for scoring placements
    #[arg(long)]
    placement_depth: Option<u8>,

    /// Random placement candidates
    #[arg(long)]
    samples: Option<usize>,

    /// RNG seed; White uses seed + 1
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many moves without a capture
    #[arg(long, default_value_t = 200)]
    max_turns: usize,
}

fn build_config(args: &Args) -> escampe::Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.search_depth = depth;
    }
    if let Some(depth) = args.placement_depth {
        config.placement_depth = depth;
    }
    if let Some(samples) = args.samples {
        config.placement_samples = samples;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn self_play(args: &Args) -> escampe::Result<Option<Side>> {
    let config = build_config(args)?;
    let mut white_config = config.clone();
    white_config.seed = config.seed.wrapping_add(1);

    let mut black = Agent::new(Side::Black, config)?;
    let mut white = Agent::new(Side::White, white_config)?;

    let mut turn = Side::Black;
    for _ in 0..args.max_turns {
        let (mover, other) = match turn {
            Side::Black => (&mut black, &mut white),
            Side::White => (&mut white, &mut black),
        };
        let result = mover.request_move_with_stats()?;
        other.apply_opponent_move(&result.notation())?;

        if mover.is_game_over() {
            break;
        }
        // White places and then makes the first regular move
        if !(turn == Side::White && matches!(result.mv, Move::Placement(_))) {
            turn = turn.opponent();
        }
    }

    print!("{}", black.board());
    let winner = black.winner();
    if let Some(side) = winner {
        black.declare_winner(side);
        white.declare_winner(side);
    } else {
        info!("No capture after {} moves", args.max_turns);
    }
    Ok(winner)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match self_play(&args) {
        Ok(Some(side)) => {
            println!("Winner: {side}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No winner");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
