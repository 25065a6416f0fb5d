use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::content::{PLAYER_START_DAMAGE, PLAYER_START_HP};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub location: RoomId,
    pub hp: i32,
    pub damage: i32,
}

impl Player {
    pub fn new(location: RoomId) -> Self {
        Self { location, hp: PLAYER_START_HP, damage: PLAYER_START_DAMAGE }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn apply_item(&mut self, item: &Item) {
        self.hp = self.hp.saturating_add(item.hp_restore);
        self.damage = self.damage.saturating_add(item.damage_boost);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Adjacent room ids in the order the edges were added.
    pub neighbors: Vec<RoomId>,
    pub content: RoomContent,
    pub visited: bool,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self { id, neighbors: Vec::new(), content: RoomContent::Empty, visited: false }
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_adjacent_to(&self, other: RoomId) -> bool {
        self.neighbors.contains(&other)
    }
}

/// Arena of rooms. Rooms refer to each other only by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    rooms: Vec<Room>,
}

impl Dungeon {
    /// `room_count` unconnected, empty rooms.
    pub fn with_rooms(room_count: usize) -> Self {
        Self { rooms: (0..room_count).map(Room::new).collect() }
    }

    pub(crate) fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.rooms.get(id).map_or(&[], |room| room.neighbors.as_slice())
    }

    pub fn degree(&self, id: RoomId) -> usize {
        self.neighbors(id).len()
    }

    pub fn are_adjacent(&self, a: RoomId, b: RoomId) -> bool {
        self.rooms.get(a).is_some_and(|room| room.is_adjacent_to(b))
    }

    /// Adds the undirected edge `a`-`b`. Returns false for self-loops,
    /// out-of-range ids, and edges that already exist.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || a >= self.len() || b >= self.len() || self.are_adjacent(a, b) {
            return false;
        }
        self.rooms[a].neighbors.push(b);
        self.rooms[b].neighbors.push(a);
        true
    }

    pub fn set_content(&mut self, id: RoomId, content: RoomContent) {
        if let Some(room) = self.rooms.get_mut(id) {
            room.content = content;
        }
    }

    pub fn treasure_rooms(&self) -> Vec<RoomId> {
        self.rooms.iter().filter(|room| room.content.is_treasure()).map(|room| room.id).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.rooms.iter().map(Room::degree).sum::<usize>() / 2
    }

    /// Room ids reachable from room 0, in breadth-first order.
    pub fn reachable_from_start(&self) -> Vec<RoomId> {
        if self.rooms.is_empty() {
            return Vec::new();
        }
        let mut seen = vec![false; self.len()];
        let mut order = Vec::with_capacity(self.len());
        let mut open = VecDeque::from([0]);
        seen[0] = true;
        while let Some(id) = open.pop_front() {
            order.push(id);
            for &next in self.neighbors(id) {
                if next < seen.len() && !seen[next] {
                    seen[next] = true;
                    open.push_back(next);
                }
            }
        }
        order
    }

    pub fn is_connected(&self) -> bool {
        self.reachable_from_start().len() == self.len()
    }

    /// True when every edge is listed from both ends.
    pub fn is_symmetric(&self) -> bool {
        self.rooms
            .iter()
            .all(|room| room.neighbors.iter().all(|&other| self.are_adjacent(other, room.id)))
    }
}
