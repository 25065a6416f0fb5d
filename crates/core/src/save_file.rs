//! Binary save format for a player and the whole dungeon graph.
//!
//! Every field is a native-endian `int32`, written in this order:
//! - `room_count`, `player_room`, `player_hp`, `player_damage`
//! - per room, in id order: `visited` (0/1), `content_type`
//!   (0 none, 1 monster, 2 item, 3 treasure), then for a monster
//!   `monster_type hp damage`, for an item `item_type`, then
//!   `neighbor_count` followed by that many neighbour ids.
//!
//! Item stats and all names are not stored; they come from the content table
//! on load. Loading checks the file instead of trusting it: anything a save
//! could not have produced is rejected as [`SaveError::Corrupted`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::mapgen::MAX_ROOMS;
use crate::state::{Dungeon, Player, Room};
use crate::types::{Item, ItemKind, Monster, MonsterKind, RoomContent, RoomId};

const CONTENT_NONE: i32 = 0;
const CONTENT_MONSTER: i32 = 1;
const CONTENT_ITEM: i32 = 2;
const CONTENT_TREASURE: i32 = 3;

const MONSTER_GOBLIN: i32 = 0;
const MONSTER_TROLL: i32 = 1;

const ITEM_POTION: i32 = 0;
const ITEM_SWORD: i32 = 1;

const FIELD_WIDTH: usize = size_of::<i32>();

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("save file ended early while reading {field}")]
    Truncated { field: &'static str },

    #[error("save file is corrupted: {reason}")]
    Corrupted { reason: String },
}

fn corrupted(reason: impl Into<String>) -> SaveError {
    SaveError::Corrupted { reason: reason.into() }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub fn encode(player: &Player, dungeon: &Dungeon) -> Vec<u8> {
    let mut writer = FieldWriter::default();
    writer.put_len(dungeon.len());
    writer.put_len(player.location);
    writer.put(player.hp);
    writer.put(player.damage);

    for room in dungeon.rooms() {
        writer.put(i32::from(room.visited));
        match &room.content {
            RoomContent::Empty => writer.put(CONTENT_NONE),
            RoomContent::Monster(monster) => {
                writer.put(CONTENT_MONSTER);
                writer.put(monster_code(monster.kind));
                writer.put(monster.hp);
                writer.put(monster.damage);
            }
            RoomContent::Item(item) => {
                writer.put(CONTENT_ITEM);
                writer.put(item_code(item.kind));
            }
            RoomContent::Treasure => writer.put(CONTENT_TREASURE),
        }
        writer.put_len(room.neighbors.len());
        for &neighbor in &room.neighbors {
            writer.put_len(neighbor);
        }
    }
    writer.bytes
}

#[derive(Default)]
struct FieldWriter {
    bytes: Vec<u8>,
}

impl FieldWriter {
    fn put(&mut self, value: i32) {
        self.bytes.extend(value.to_ne_bytes());
    }

    // Counts and ids never exceed MAX_ROOMS, which fits an i32.
    fn put_len(&mut self, value: usize) {
        self.put(value as i32);
    }
}

fn monster_code(kind: MonsterKind) -> i32 {
    match kind {
        MonsterKind::Goblin => MONSTER_GOBLIN,
        MonsterKind::Troll => MONSTER_TROLL,
    }
}

fn item_code(kind: ItemKind) -> i32 {
    match kind {
        ItemKind::Potion => ITEM_POTION,
        ItemKind::Sword => ITEM_SWORD,
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

pub fn decode(bytes: &[u8]) -> Result<(Player, Dungeon), SaveError> {
    let mut reader = FieldReader { bytes, offset: 0 };

    let room_count = reader.count("room count", MAX_ROOMS)?;
    if room_count < 2 {
        return Err(corrupted(format!("room count {room_count} is below the minimum of 2")));
    }
    let location = reader.room_id("player room", room_count)?;
    let hp = reader.next("player hp")?;
    if hp <= 0 {
        return Err(corrupted(format!("player hp {hp} means the player was already dead")));
    }
    let damage = reader.next("player damage")?;
    if damage <= 0 {
        return Err(corrupted(format!("player damage {damage} must be positive")));
    }
    let player = Player { location, hp, damage };

    let mut rooms = Vec::with_capacity(room_count.min(bytes.len() / FIELD_WIDTH));
    for id in 0..room_count {
        rooms.push(read_room(&mut reader, id, room_count)?);
    }

    if reader.offset != bytes.len() {
        return Err(corrupted(format!(
            "{} trailing bytes after the last room",
            bytes.len() - reader.offset
        )));
    }

    let dungeon = Dungeon::from_rooms(rooms);
    if !dungeon.is_symmetric() {
        return Err(corrupted("neighbor lists are not symmetric"));
    }
    Ok((player, dungeon))
}

fn read_room(
    reader: &mut FieldReader<'_>,
    id: RoomId,
    room_count: usize,
) -> Result<Room, SaveError> {
    let visited = match reader.next("visited flag")? {
        0 => false,
        1 => true,
        other => return Err(corrupted(format!("room {id} has visited flag {other}"))),
    };

    let content = match reader.next("content type")? {
        CONTENT_NONE => RoomContent::Empty,
        CONTENT_MONSTER => {
            let kind = match reader.next("monster type")? {
                MONSTER_GOBLIN => MonsterKind::Goblin,
                MONSTER_TROLL => MonsterKind::Troll,
                other => return Err(corrupted(format!("room {id} has monster type {other}"))),
            };
            let hp = reader.next("monster hp")?;
            let damage = reader.next("monster damage")?;
            if damage <= 0 {
                return Err(corrupted(format!(
                    "room {id} monster damage {damage} must be positive"
                )));
            }
            RoomContent::Monster(Monster::wounded(kind, hp, damage))
        }
        CONTENT_ITEM => {
            let kind = match reader.next("item type")? {
                ITEM_POTION => ItemKind::Potion,
                ITEM_SWORD => ItemKind::Sword,
                other => return Err(corrupted(format!("room {id} has item type {other}"))),
            };
            RoomContent::Item(Item::spawn(kind))
        }
        CONTENT_TREASURE => RoomContent::Treasure,
        other => return Err(corrupted(format!("room {id} has content type {other}"))),
    };

    let neighbor_count = reader.count("neighbor count", room_count - 1)?;
    let mut neighbors = Vec::with_capacity(neighbor_count.min(reader.remaining() / FIELD_WIDTH));
    for _ in 0..neighbor_count {
        let neighbor = reader.room_id("neighbor id", room_count)?;
        if neighbor == id {
            return Err(corrupted(format!("room {id} lists itself as a neighbor")));
        }
        if neighbors.contains(&neighbor) {
            return Err(corrupted(format!("room {id} lists neighbor {neighbor} twice")));
        }
        neighbors.push(neighbor);
    }

    Ok(Room { id, neighbors, content, visited })
}

struct FieldReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl FieldReader<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn next(&mut self, field: &'static str) -> Result<i32, SaveError> {
        let end = self.offset + FIELD_WIDTH;
        let Some(chunk) = self.bytes.get(self.offset..end) else {
            return Err(SaveError::Truncated { field });
        };
        let mut raw = [0_u8; FIELD_WIDTH];
        raw.copy_from_slice(chunk);
        self.offset = end;
        Ok(i32::from_ne_bytes(raw))
    }

    fn count(&mut self, field: &'static str, max: usize) -> Result<usize, SaveError> {
        let value = self.next(field)?;
        match usize::try_from(value) {
            Ok(count) if count <= max => Ok(count),
            _ => Err(corrupted(format!("{field} {value} is outside 0..={max}"))),
        }
    }

    fn room_id(&mut self, field: &'static str, room_count: usize) -> Result<RoomId, SaveError> {
        let value = self.next(field)?;
        match usize::try_from(value) {
            Ok(id) if id < room_count => Ok(id),
            _ => Err(corrupted(format!("{field} {value} is not a room in 0..{room_count}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Writes the save next to `path` first and renames it into place, so a
/// failed write never leaves a half-written save behind.
pub fn save(path: &Path, player: &Player, dungeon: &Dungeon) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let bytes = encode(player, dungeon);
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;

    info!(path = %path.display(), bytes = bytes.len(), rooms = dungeon.len(), "saved game");
    Ok(())
}

/// `dungeon.sav` stages as `dungeon.sav.tmp`.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

pub fn load(path: &Path) -> Result<(Player, Dungeon), SaveError> {
    let bytes = fs::read(path)?;
    let (player, dungeon) = decode(&bytes)?;
    debug!(
        path = %path.display(),
        rooms = dungeon.len(),
        location = player.location,
        "loaded game"
    );
    Ok((player, dungeon))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
