use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crawler_core::hash::{format_hash, state_hash};
use crawler_core::{Dungeon, Player, Room, RoomContent, RoomId, load};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Summarize a dungeon save file", long_about = None)]
struct Args {
    /// Path to the save file
    path: PathBuf,
    /// Print the full decoded state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    state_hash: String,
    room_count: usize,
    edge_count: usize,
    connected: bool,
    symmetric: bool,
    visited_rooms: usize,
    treasure_rooms: Vec<RoomId>,
    monsters_left: usize,
    items_left: usize,
    player: &'a Player,
    rooms: &'a [Room],
}

impl<'a> Report<'a> {
    fn new(player: &'a Player, dungeon: &'a Dungeon) -> Self {
        let rooms = dungeon.rooms();
        Self {
            state_hash: format_hash(state_hash(player, dungeon)),
            room_count: dungeon.len(),
            edge_count: dungeon.edge_count(),
            connected: dungeon.is_connected(),
            symmetric: dungeon.is_symmetric(),
            visited_rooms: rooms.iter().filter(|room| room.visited).count(),
            treasure_rooms: dungeon.treasure_rooms(),
            monsters_left: rooms
                .iter()
                .filter(|room| matches!(room.content, RoomContent::Monster(_)))
                .count(),
            items_left: rooms
                .iter()
                .filter(|room| matches!(room.content, RoomContent::Item(_)))
                .count(),
            player,
            rooms,
        }
    }

    fn summary(&self) -> Vec<String> {
        vec![
            format!("State hash: {}", self.state_hash),
            format!(
                "Rooms: {} ({} edges, {} visited)",
                self.room_count, self.edge_count, self.visited_rooms
            ),
            format!("Connected: {}, symmetric: {}", self.connected, self.symmetric),
            format!(
                "Player: room {}, hp {}, damage {}",
                self.player.location, self.player.hp, self.player.damage
            ),
            format!("Treasure: {:?}", self.treasure_rooms),
            format!("Left to clear: {} monsters, {} items", self.monsters_left, self.items_left),
        ]
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let args = Args::parse();

    let (player, dungeon) = load(&args.path)
        .with_context(|| format!("Failed to load save file: {}", args.path.display()))?;
    let report = Report::new(&player, &dungeon);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        for line in report.summary() {
            println!("{line}");
        }
    }
    Ok(())
}
