//! One run of the game: a dungeon, the player inside it, and the random stream.

use std::path::Path;

use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::entry;
use crate::mapgen::new_dungeon;
use crate::rng::{RandomSource, session_rng};
use crate::save_file::{self, SaveError};
use crate::state::{Dungeon, Player};
use crate::types::*;

pub struct Session<R = ChaCha8Rng> {
    dungeon: Dungeon,
    player: Player,
    rng: R,
    status: SessionStatus,
    turns: u64,
    log: Vec<LogEvent>,
}

impl Session<ChaCha8Rng> {
    /// Generates and populates a fresh dungeon; the player starts in room 0.
    pub fn new_game(room_count: usize, seed: u64) -> Result<Self, GenerationError> {
        let mut rng = session_rng(seed);
        let dungeon = new_dungeon(room_count, &mut rng)?;
        info!(room_count, seed, "new game");
        Ok(Self::with_rng(Player::new(0), dungeon, rng))
    }

    /// Resumes a saved game. Randomness restarts from `seed`; save files carry no RNG state.
    pub fn load(path: &Path, seed: u64) -> Result<Self, SaveError> {
        let (player, dungeon) = save_file::load(path)?;
        info!(path = %path.display(), rooms = dungeon.len(), seed, "resumed game");
        Ok(Self::with_rng(player, dungeon, session_rng(seed)))
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_rng(player: Player, dungeon: Dungeon, rng: R) -> Self {
        Self { dungeon, player, rng, status: SessionStatus::InProgress, turns: 0, log: Vec::new() }
    }

    /// Runs the entry handler for the room the player is standing in.
    pub fn enter_current_room(&mut self) -> Result<EntryOutcome, GameError> {
        if self.status != SessionStatus::InProgress {
            return Err(GameError::GameOver);
        }
        let location = self.player.location;
        let Some(room) = self.dungeon.room_mut(location) else {
            return Err(GameError::UnknownRoom(location));
        };
        let first_visit = !room.visited;
        let outcome = entry::enter(room, &mut self.player, &mut self.rng);

        self.turns += 1;
        self.log.push(LogEvent::RoomEntered { room: location, first_visit });
        match &outcome {
            EntryOutcome::Victory => {
                self.status = SessionStatus::Victory;
                self.log.push(LogEvent::TreasureFound { room: location });
                info!(room = location, turns = self.turns, "treasure found");
            }
            EntryOutcome::Fought { monster, result: CombatResult::PlayerWon, .. } => {
                self.log.push(LogEvent::MonsterDefeated { room: location, kind: monster.kind });
            }
            EntryOutcome::Fought { monster, result: CombatResult::PlayerDied, .. } => {
                self.status = SessionStatus::Defeated;
                self.log.push(LogEvent::PlayerDefeated { room: location, kind: monster.kind });
                info!(
                    room = location,
                    monster = %monster.name,
                    turns = self.turns,
                    "player defeated"
                );
            }
            EntryOutcome::ItemAcquired { item, .. } => {
                self.log.push(LogEvent::ItemPickedUp { room: location, kind: item.kind });
            }
            EntryOutcome::EmptyRoom => {}
        }
        Ok(outcome)
    }

    /// Moves the player along an edge. Nothing changes on an invalid choice.
    pub fn move_to(&mut self, destination: RoomId) -> Result<(), GameError> {
        if self.status != SessionStatus::InProgress {
            return Err(GameError::GameOver);
        }
        let current = self.player.location;
        if !self.dungeon.are_adjacent(current, destination) {
            return Err(GameError::InvalidChoice { current, destination });
        }
        self.player.location = destination;
        self.log.push(LogEvent::Moved { from: current, to: destination });
        Ok(())
    }

    /// Only a session still in progress can be saved; a defeat is final.
    pub fn save(&mut self, path: &Path) -> Result<(), GameError> {
        if self.status != SessionStatus::InProgress {
            return Err(GameError::GameOver);
        }
        save_file::save(path, &self.player, &self.dungeon)?;
        self.log.push(LogEvent::Saved);
        Ok(())
    }

    pub fn exits(&self) -> &[RoomId] {
        self.dungeon.neighbors(self.player.location)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::InProgress
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
