//! What happens when the player walks into a room.

use tracing::debug;

use crate::combat;
use crate::rng::RandomSource;
use crate::state::{Player, Room};
use crate::types::{CombatResult, EntryOutcome, RoomContent};

/// Resolves the room's content against the player.
///
/// Treasure wins regardless of the visited flag. A visited room is always
/// reported empty. A defeated monster and a picked-up item leave the room
/// `Empty` for good; a monster that kills the player stays where it is.
pub fn enter<R: RandomSource + ?Sized>(
    room: &mut Room,
    player: &mut Player,
    rng: &mut R,
) -> EntryOutcome {
    let outcome = match &mut room.content {
        RoomContent::Treasure => EntryOutcome::Victory,
        _ if room.visited => EntryOutcome::EmptyRoom,
        RoomContent::Monster(monster) => {
            room.visited = true;
            let (result, strikes) = combat::fight_recorded(player, monster, rng);
            let monster = monster.clone();
            if result == CombatResult::PlayerWon {
                room.content = RoomContent::Empty;
            }
            EntryOutcome::Fought { monster, result, strikes }
        }
        RoomContent::Item(item) => {
            let item = item.clone();
            player.apply_item(&item);
            room.content = RoomContent::Empty;
            room.visited = true;
            EntryOutcome::ItemAcquired { item, hp: player.hp, damage: player.damage }
        }
        RoomContent::Empty => {
            room.visited = true;
            EntryOutcome::EmptyRoom
        }
    };
    debug!(room = room.id, ?outcome, "entered room");
    outcome
}
