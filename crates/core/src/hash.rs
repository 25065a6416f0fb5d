//! Stable fingerprints of game state for determinism checks and tooling.

use std::hash::Hasher;

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

use crate::rng::RandomSource;
use crate::save_file::encode;
use crate::session::Session;
use crate::state::{Dungeon, Player};
use crate::types::SessionStatus;

/// Hash of exactly what a save file would hold.
pub fn state_hash(player: &Player, dungeon: &Dungeon) -> u64 {
    xxh3_64(&encode(player, dungeon))
}

/// `0x` followed by exactly 16 lowercase hex digits.
pub fn format_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

impl<R: RandomSource> Session<R> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(state_hash(self.player(), self.dungeon()));
        hasher.write_u64(self.turns());
        hasher.write_u8(match self.status() {
            SessionStatus::InProgress => 0,
            SessionStatus::Victory => 1,
            SessionStatus::Defeated => 2,
        });
        hasher.finish()
    }
}
