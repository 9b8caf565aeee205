use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use tttm::{render_move, CacheScope, Engine, EngineConfig, Game, Symbol, REJECTED_RESPONSE};

/// Prints the engine's move for a game given as a move history.
#[derive(Parser, Debug)]
#[command(name = "tttm", version)]
struct Args {
    /// Game id, only echoed to the log
    #[arg(long, default_value = "")]
    gid: String,

    /// Board size N of the N×N board
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Symbol to move, X or O
    #[arg(long)]
    playing: String,

    /// Move history, e.g. X-0-0_O-1-1
    #[arg(long, default_value = "")]
    moves: String,

    /// Wall clock budget for the search
    #[arg(long, env = "TTTM_TIME_BUDGET_MS", default_value_t = 2000)]
    time_budget_ms: u64,

    #[arg(long, value_enum, env = "TTTM_CACHE_SCOPE", default_value_t = CacheScope::PerCall)]
    cache_scope: CacheScope,
}

fn run(args: &Args) -> anyhow::Result<String> {
    let player = args.playing.parse::<Symbol>().context("rejected move request")?;
    let game = Game::new(args.gid.clone(), args.size, &args.moves).context("rejected move request")?;

    let config = EngineConfig::default()
        .with_time_budget(Duration::from_millis(args.time_budget_ms))
        .with_cache_scope(args.cache_scope);
    let best = game.best_move(&Engine::new(config), player);
    Ok(render_move(player, &best))
}

/// The response body, `Err` when the request was rejected.
fn respond(args: &Args) -> Result<String, String> {
    run(args).map_err(|err| {
        error!("{}: {:#}", args.gid, err);
        REJECTED_RESPONSE.to_string()
    })
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    info!("move request: {:?}", args);

    match respond(&args) {
        Ok(response) => {
            info!("{}", response);
            println!("{}", response);
            ExitCode::SUCCESS
        }
        Err(response) => {
            println!("{}", response);
            ExitCode::FAILURE
        }
    }
}
