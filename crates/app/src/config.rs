//! Command-line arguments and the settings resolved from them.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use directories::ProjectDirs;

use crate::APP_NAME;
use crate::seed::RunSeed;

/// Overrides where save-and-quit writes when `--save-path` is not given.
pub const SAVE_PATH_ENV: &str = "CRAWLER_SAVE_PATH";
pub const DEFAULT_SAVE_FILE: &str = "dungeon.sav";

#[derive(Parser, Debug)]
#[command(
    name = "crawler",
    author,
    version,
    about = "Explore a randomly generated dungeon",
    long_about = None
)]
pub struct Args {
    /// Number of rooms (greater than 1) for a new game, or a save file to load
    pub target: String,

    /// Seed for the random stream; a time-based seed is used when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Default file for save-and-quit
    #[arg(long)]
    pub save_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchMode {
    NewGame { room_count: usize },
    LoadGame { path: PathBuf },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub launch: LaunchMode,
    pub seed: RunSeed,
    pub save_path: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let launch = parse_launch_mode(&args.target)?;
        let seed = RunSeed::from_flag(args.seed);
        let save_path =
            resolve_save_path(args.save_path, env::var(SAVE_PATH_ENV).ok(), default_data_dir());
        Ok(Self { launch, seed, save_path })
    }
}

/// Anything that parses as an integer is a room count; everything else is a path.
pub fn parse_launch_mode(target: &str) -> Result<LaunchMode> {
    let Ok(number) = target.trim().parse::<i64>() else {
        return Ok(LaunchMode::LoadGame { path: PathBuf::from(target) });
    };
    if number <= 1 {
        bail!("room count must be greater than 1, got {number}");
    }
    let room_count = usize::try_from(number)?;
    Ok(LaunchMode::NewGame { room_count })
}

pub fn resolve_save_path(
    cli_path: Option<PathBuf>,
    env_override: Option<String>,
    data_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }
    if let Some(path) = env_override.filter(|value| !value.trim().is_empty()) {
        return PathBuf::from(path);
    }
    match data_dir {
        Some(dir) => dir.join(DEFAULT_SAVE_FILE),
        None => PathBuf::from(DEFAULT_SAVE_FILE),
    }
}

fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}
