//! Procedural dungeon generation: graph topology first, then room content.

mod generator;
mod spawns;

pub use generator::{MAX_ROOMS, generate};
pub use spawns::populate;

use crate::rng::RandomSource;
use crate::state::Dungeon;
use crate::types::GenerationError;

/// A connected, populated dungeon ready for a new game.
pub fn new_dungeon<R: RandomSource + ?Sized>(
    room_count: usize,
    rng: &mut R,
) -> Result<Dungeon, GenerationError> {
    let mut dungeon = generate(room_count, rng)?;
    populate(&mut dungeon, rng);
    Ok(dungeon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::session_rng;

    #[test]
    fn new_dungeon_matches_generate_then_populate() {
        let seed = 123_u64;

        let from_helper = new_dungeon(12, &mut session_rng(seed)).expect("12 rooms is valid");

        let mut rng = session_rng(seed);
        let mut by_hand = generate(12, &mut rng).expect("12 rooms is valid");
        populate(&mut by_hand, &mut rng);

        assert_eq!(from_helper, by_hand);
    }
}
