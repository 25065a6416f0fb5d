use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::save_file::SaveError;

/// Index of a room inside its dungeon. Stable for the dungeon's lifetime.
pub type RoomId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Troll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Potion,
    Sword,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub name: String,
    pub hp: i32,
    pub damage: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    pub hp_restore: i32,
    pub damage_boost: i32,
}

/// What currently occupies a room.
///
/// `Monster` and `Item` only ever move to `Empty`; nothing moves back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoomContent {
    #[default]
    Empty,
    Monster(Monster),
    Item(Item),
    Treasure,
}

impl RoomContent {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_treasure(&self) -> bool {
        matches!(self, Self::Treasure)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Empty => "empty",
            Self::Monster(monster) => &monster.name,
            Self::Item(item) => &item.name,
            Self::Treasure => "treasure",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatResult {
    PlayerWon,
    PlayerDied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attacker {
    Player,
    Monster,
}

/// One exchange inside a combat batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub attacker: Attacker,
    pub damage: i32,
    /// Hit points of the side that was struck, after the hit landed.
    pub defender_hp: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The treasure room. Terminal.
    Victory,
    EmptyRoom,
    Fought { monster: Monster, result: CombatResult, strikes: Vec<Strike> },
    ItemAcquired { item: Item, hp: i32, damage: i32 },
}

impl EntryOutcome {
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            Self::Victory | Self::Fought { result: CombatResult::PlayerDied, .. }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    Victory,
    Defeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RoomEntered { room: RoomId, first_visit: bool },
    Moved { from: RoomId, to: RoomId },
    MonsterDefeated { room: RoomId, kind: MonsterKind },
    PlayerDefeated { room: RoomId, kind: MonsterKind },
    ItemPickedUp { room: RoomId, kind: ItemKind },
    TreasureFound { room: RoomId },
    Saved,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("room {destination} is not adjacent to room {current}")]
    InvalidChoice { current: RoomId, destination: RoomId },
    #[error("room {0} does not exist in this dungeon")]
    UnknownRoom(RoomId),
    #[error("the game is over")]
    GameOver,
    #[error(transparent)]
    Save(#[from] SaveError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("a dungeon needs at least 2 rooms, got {0}")]
    TooFewRooms(usize),
    #[error("a dungeon holds at most {max} rooms, got {requested}")]
    TooManyRooms { requested: usize, max: usize },
}
