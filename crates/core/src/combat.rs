//! Bit-batch combat.
//!
//! Each random 16-bit draw is read from the most significant bit down: a `1`
//! lets the player strike, a `0` lets the monster strike. A batch stops as soon
//! as either side drops to zero hit points; a new batch is drawn only while
//! both are still standing.

use tracing::debug;

use crate::rng::RandomSource;
use crate::state::Player;
use crate::types::{Attacker, CombatResult, Monster, Strike};

pub const COMBAT_BATCH_BITS: u32 = 16;

pub fn fight<R: RandomSource + ?Sized>(
    player: &mut Player,
    monster: &mut Monster,
    rng: &mut R,
) -> CombatResult {
    fight_recorded(player, monster, rng).0
}

/// Like [`fight`], also returning every strike in the order it landed.
pub fn fight_recorded<R: RandomSource + ?Sized>(
    player: &mut Player,
    monster: &mut Monster,
    rng: &mut R,
) -> (CombatResult, Vec<Strike>) {
    let mut strikes = Vec::new();
    let mut batches = 0_u32;

    let result = loop {
        if let Some(result) = settled(player, monster) {
            break result;
        }
        let bits = rng.draw_u16();
        batches += 1;
        if let Some(result) = resolve_batch(bits, player, monster, &mut strikes) {
            break result;
        }
    };

    debug!(
        monster = %monster.name,
        ?result,
        batches,
        strikes = strikes.len(),
        player_hp = player.hp,
        monster_hp = monster.hp,
        "combat resolved"
    );
    (result, strikes)
}

/// Plays out one batch. Returns the result if a side fell during it.
pub fn resolve_batch(
    bits: u16,
    player: &mut Player,
    monster: &mut Monster,
    strikes: &mut Vec<Strike>,
) -> Option<CombatResult> {
    for position in (0..COMBAT_BATCH_BITS).rev() {
        if let Some(result) = settled(player, monster) {
            return Some(result);
        }
        if (bits >> position) & 1 == 1 {
            monster.hp = monster.hp.saturating_sub(player.damage);
            strikes.push(Strike {
                attacker: Attacker::Player,
                damage: player.damage,
                defender_hp: monster.hp,
            });
        } else {
            player.hp = player.hp.saturating_sub(monster.damage);
            strikes.push(Strike {
                attacker: Attacker::Monster,
                damage: monster.damage,
                defender_hp: player.hp,
            });
        }
    }
    settled(player, monster)
}

// Player death is checked first.
fn settled(player: &Player, monster: &Monster) -> Option<CombatResult> {
    if player.hp <= 0 {
        Some(CombatResult::PlayerDied)
    } else if monster.hp <= 0 {
        Some(CombatResult::PlayerWon)
    } else {
        None
    }
}
