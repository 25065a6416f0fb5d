//! Random connected topology: a degree-capped random recursive tree plus extra edges.

use tracing::debug;

use crate::content::MAX_NEIGHBORS;
use crate::rng::RandomSource;
use crate::state::Dungeon;
use crate::types::{GenerationError, RoomId};

/// Room ids are written as `int32` in save files.
pub const MAX_ROOMS: usize = i32::MAX as usize;

pub fn generate<R: RandomSource + ?Sized>(
    room_count: usize,
    rng: &mut R,
) -> Result<Dungeon, GenerationError> {
    if room_count < 2 {
        return Err(GenerationError::TooFewRooms(room_count));
    }
    if room_count > MAX_ROOMS {
        return Err(GenerationError::TooManyRooms { requested: room_count, max: MAX_ROOMS });
    }

    let mut dungeon = Dungeon::with_rooms(room_count);
    build_spanning_tree(&mut dungeon, rng);
    let tree_edges = dungeon.edge_count();
    add_extra_edges(&mut dungeon, rng);

    debug!(
        room_count,
        tree_edges,
        extra_edges = dungeon.edge_count() - tree_edges,
        "generated dungeon topology"
    );
    Ok(dungeon)
}

/// Every room past the first hangs off an earlier room, so room 0 reaches all of them.
fn build_spanning_tree<R: RandomSource + ?Sized>(dungeon: &mut Dungeon, rng: &mut R) {
    // Earlier rooms that can still take an edge. Never empty: each new room joins with degree 1.
    let mut open: Vec<RoomId> = vec![0];
    for room in 1..dungeon.len() {
        let slot = rng.below(open.len());
        let parent = open[slot];
        dungeon.connect(room, parent);
        if dungeon.degree(parent) >= MAX_NEIGHBORS {
            open.swap_remove(slot);
        }
        open.push(room);
    }
}

/// Failed attempts are dropped, not retried, so a room can end up with fewer
/// extra edges than it rolled.
fn add_extra_edges<R: RandomSource + ?Sized>(dungeon: &mut Dungeon, rng: &mut R) {
    let room_count = dungeon.len();
    for room in 0..room_count {
        let degree = dungeon.degree(room);
        let extras =
            if degree >= MAX_NEIGHBORS { 0 } else { rng.below(MAX_NEIGHBORS - degree + 1) };

        for _ in 0..extras {
            let target = rng.below(room_count);
            if target == room
                || dungeon.are_adjacent(room, target)
                || dungeon.degree(room) >= MAX_NEIGHBORS
                || dungeon.degree(target) >= MAX_NEIGHBORS
            {
                continue;
            }
            dungeon.connect(room, target);
        }
    }
}
