use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crawler::app_loop::{self, AppCompletion};
use crawler::config::{AppConfig, Args, LaunchMode};
use crawler::seed::SeedOrigin;
use crawler_core::Session;
use crawler_core::hash::format_hash;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(args) {
        Ok(completion) => {
            info!(?completion, "session finished");
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("{error:#}");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: Args) -> Result<AppCompletion> {
    let config = AppConfig::from_args(args)?;
    let seed = config.seed.value;
    if config.seed.origin == SeedOrigin::Clock {
        info!(seed, "seeded from the clock");
    }

    let mut session = match &config.launch {
        LaunchMode::NewGame { room_count } => {
            println!("A new dungeon of {room_count} rooms ({}).", config.seed.replay_hint());
            Session::new_game(*room_count, seed)
                .with_context(|| format!("failed to generate a {room_count}-room dungeon"))?
        }
        LaunchMode::LoadGame { path } => Session::load(path, seed)
            .with_context(|| format!("failed to load save file {}", path.display()))?,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    let completion = app_loop::run(&mut session, &mut input, &mut output, &config.save_path)?;
    output.flush()?;
    info!(
        turns = session.turns(),
        snapshot = %format_hash(session.snapshot_hash()),
        "final state"
    );
    Ok(completion)
}
