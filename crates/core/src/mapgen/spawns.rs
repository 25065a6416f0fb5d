//! Room content placement: one treasure room, then a three-way roll for the rest.

use tracing::debug;

use crate::rng::RandomSource;
use crate::state::Dungeon;
use crate::types::{Item, ItemKind, Monster, MonsterKind, RoomContent};

const CONTENT_ROLL_EMPTY: usize = 0;
const CONTENT_ROLL_MONSTER: usize = 1;

/// Room 0 is never touched; it stays whatever it was (empty for a fresh dungeon).
pub fn populate<R: RandomSource + ?Sized>(dungeon: &mut Dungeon, rng: &mut R) {
    let room_count = dungeon.len();
    if room_count < 2 {
        return;
    }

    let treasure_room = 1 + rng.below(room_count - 1);
    dungeon.set_content(treasure_room, RoomContent::Treasure);

    for room in (1..room_count).filter(|&room| room != treasure_room) {
        let content = roll_content(rng);
        dungeon.set_content(room, content);
    }

    debug!(treasure_room, "populated dungeon");
}

fn roll_content<R: RandomSource + ?Sized>(rng: &mut R) -> RoomContent {
    match rng.below(3) {
        CONTENT_ROLL_EMPTY => RoomContent::Empty,
        CONTENT_ROLL_MONSTER => RoomContent::Monster(Monster::spawn(pick_monster_kind(rng))),
        _ => RoomContent::Item(Item::spawn(pick_item_kind(rng))),
    }
}

fn pick_monster_kind<R: RandomSource + ?Sized>(rng: &mut R) -> MonsterKind {
    if rng.below(2) == 0 { MonsterKind::Goblin } else { MonsterKind::Troll }
}

fn pick_item_kind<R: RandomSource + ?Sized>(rng: &mut R) -> ItemKind {
    if rng.below(2) == 0 { ItemKind::Potion } else { ItemKind::Sword }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::generate;
    use crate::rng::scripted::ScriptedSource;
    use crate::rng::session_rng;

    #[test]
    fn scripted_rolls_place_each_kind_of_content() {
        let mut dungeon = Dungeon::with_rooms(5);
        // treasure -> room 1, then room 2 goblin, room 3 sword, room 4 empty.
        let mut rolls = ScriptedSource::new(&[0, 1, 0, 2, 1, 0]);
        populate(&mut dungeon, &mut rolls);

        let contents: Vec<&RoomContent> =
            dungeon.rooms().iter().map(|room| &room.content).collect();
        assert_eq!(contents[0], &RoomContent::Empty);
        assert_eq!(contents[1], &RoomContent::Treasure);
        assert_eq!(contents[2], &RoomContent::Monster(Monster::spawn(MonsterKind::Goblin)));
        assert_eq!(contents[3], &RoomContent::Item(Item::spawn(ItemKind::Sword)));
        assert_eq!(contents[4], &RoomContent::Empty);
    }

    #[test]
    fn two_room_dungeon_puts_treasure_next_door() {
        let mut dungeon = generate(2, &mut session_rng(5)).expect("valid");
        populate(&mut dungeon, &mut session_rng(6));
        assert_eq!(dungeon.treasure_rooms(), vec![1]);
        assert!(dungeon.rooms()[0].content.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn exactly_one_treasure_and_start_room_stays_empty(
            seed in any::<u64>(),
            room_count in 2_usize..=120,
        ) {
            let mut rng = session_rng(seed);
            let mut dungeon = generate(room_count, &mut rng).expect("valid");
            populate(&mut dungeon, &mut rng);

            prop_assert_eq!(dungeon.treasure_rooms().len(), 1);
            prop_assert_eq!(&dungeon.rooms()[0].content, &RoomContent::Empty);
            prop_assert!(dungeon.rooms().iter().all(|room| !room.visited));
        }
    }
}
