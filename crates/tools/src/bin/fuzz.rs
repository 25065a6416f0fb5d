use std::io;

use anyhow::{Result, ensure};
use clap::Parser;
use crawler_core::content::MAX_NEIGHBORS;
use crawler_core::save_file::{decode, encode};
use crawler_core::{RoomContent, Session, SessionStatus};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    games: u32,
    /// Largest dungeon to generate; sizes are drawn from 2..=max_rooms
    #[arg(short, long, default_value_t = 60)]
    max_rooms: usize,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn check_invariants(session: &Session) -> Result<()> {
    let dungeon = session.dungeon();
    ensure!(dungeon.is_connected(), "Invariant failed: dungeon not connected");
    ensure!(dungeon.is_symmetric(), "Invariant failed: adjacency not symmetric");
    for room in dungeon.rooms() {
        ensure!(
            room.degree() <= MAX_NEIGHBORS,
            "Invariant failed: room {} has degree {}",
            room.id,
            room.degree()
        );
        if session.status() == SessionStatus::InProgress && room.visited {
            ensure!(
                room.content.is_empty(),
                "Invariant failed: visited room {} still holds content",
                room.id
            );
        }
    }
    ensure!(
        dungeon.treasure_rooms().len() == 1,
        "Invariant failed: expected exactly one treasure room"
    );
    ensure!(
        dungeon.room(0).is_some_and(|room| matches!(room.content, RoomContent::Empty)),
        "Invariant failed: start room has content"
    );

    let (player, reloaded) = decode(&encode(session.player(), dungeon))?;
    ensure!(
        &player == session.player(),
        "Invariant failed: player changed across encode/decode"
    );
    ensure!(&reloaded == dungeon, "Invariant failed: dungeon changed across encode/decode");
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let args = Args::parse();
    ensure!(args.max_rooms >= 2, "--max-rooms must be at least 2");

    println!(
        "Starting fuzz harness on seed {} for {} games of up to {} rooms...",
        args.seed, args.games, args.max_rooms
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let (mut victories, mut defeats, mut unfinished) = (0_u32, 0_u32, 0_u32);

    for game in 0..args.games {
        let room_count = 2 + rng.next_u64() as usize % (args.max_rooms - 1);
        let game_seed = rng.next_u64();
        let mut session = Session::new_game(room_count, game_seed)?;
        check_invariants(&session)?;

        for _ in 0..args.turns {
            session.enter_current_room()?;
            check_invariants(&session)?;
            if session.is_over() {
                break;
            }
            let next = choose(&mut rng, session.exits());
            session.move_to(next)?;
        }

        match session.status() {
            SessionStatus::Victory => victories += 1,
            SessionStatus::Defeated => defeats += 1,
            SessionStatus::InProgress => unfinished += 1,
        }
        debug!(
            game,
            room_count,
            game_seed,
            status = ?session.status(),
            turns = session.turns(),
            "game finished"
        );
    }

    info!(victories, defeats, unfinished, "fuzz run complete");
    println!(
        "Fuzzing completed successfully: \
         {victories} victories, {defeats} defeats, {unfinished} unfinished."
    );
    Ok(())
}
