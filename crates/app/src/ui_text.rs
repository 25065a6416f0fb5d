//! Text shown to the player: room headers, entry outcomes, exits and endings.

use std::path::Path;

use crawler_core::{Attacker, CombatResult, EntryOutcome, RoomId, Strike};

use crate::app_loop::AppCompletion;

pub const MOVE_PROMPT: &str = "Where to? (room number, or -1 to save and quit) > ";
pub const INVALID_INPUT_TEXT: &str =
    "Enter one of the listed room numbers, or -1 to save and quit.";

pub fn room_header(room: RoomId) -> String {
    format!("You are in room {room}.")
}

pub fn outcome_lines(outcome: &EntryOutcome) -> Vec<String> {
    match outcome {
        EntryOutcome::Victory => vec!["You found the treasure!".to_string()],
        EntryOutcome::EmptyRoom => vec!["The room is empty.".to_string()],
        EntryOutcome::Fought { monster, result, strikes } => {
            let mut lines = vec![format!("A {} blocks your way!", monster.name)];
            lines.extend(strikes.iter().map(|strike| strike_text(&monster.name, strike)));
            lines.push(match result {
                CombatResult::PlayerWon => format!("You defeated the {}.", monster.name),
                CombatResult::PlayerDied => format!("The {} has slain you.", monster.name),
            });
            lines
        }
        EntryOutcome::ItemAcquired { item, hp, damage } => vec![format!(
            "You picked up a {}. HP: {hp}, damage: {damage}.",
            item.name
        )],
    }
}

fn strike_text(monster_name: &str, strike: &Strike) -> String {
    match strike.attacker {
        Attacker::Player => format!(
            "  You hit the {monster_name} for {} ({monster_name} HP: {}).",
            strike.damage, strike.defender_hp
        ),
        Attacker::Monster => format!(
            "  The {monster_name} hits you for {} (your HP: {}).",
            strike.damage, strike.defender_hp
        ),
    }
}

pub fn exits_line(exits: &[RoomId]) -> String {
    let ids: Vec<String> = exits.iter().map(RoomId::to_string).collect();
    format!("Exits: {}", ids.join(", "))
}

pub fn save_prompt(default_path: &Path) -> String {
    format!("Save file [{}] > ", default_path.display())
}

pub fn completion_text(completion: &AppCompletion) -> String {
    match completion {
        AppCompletion::Victory => "Victory! The treasure is yours.".to_string(),
        AppCompletion::Defeated => "Game over.".to_string(),
        AppCompletion::SavedAndQuit(path) => format!("Game saved to {}.", path.display()),
        AppCompletion::InputClosed => "Input closed; leaving without saving.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crawler_core::{Item, ItemKind, Monster, MonsterKind};

    use super::*;

    #[test]
    fn fight_lists_every_strike_in_order() {
        let outcome = EntryOutcome::Fought {
            monster: Monster::wounded(MonsterKind::Goblin, 0, 5),
            result: CombatResult::PlayerWon,
            strikes: vec![
                Strike { attacker: Attacker::Player, damage: 5, defender_hp: 3 },
                Strike { attacker: Attacker::Monster, damage: 5, defender_hp: 15 },
                Strike { attacker: Attacker::Player, damage: 5, defender_hp: -2 },
            ],
        };

        let lines = outcome_lines(&outcome);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "A Goblin blocks your way!");
        assert_eq!(lines[1], "  You hit the Goblin for 5 (Goblin HP: 3).");
        assert_eq!(lines[2], "  The Goblin hits you for 5 (your HP: 15).");
        assert_eq!(lines[4], "You defeated the Goblin.");
    }

    #[test]
    fn item_pickup_reports_new_stats() {
        let outcome =
            EntryOutcome::ItemAcquired { item: Item::spawn(ItemKind::Potion), hp: 30, damage: 5 };
        assert_eq!(outcome_lines(&outcome), vec!["You picked up a Potion. HP: 30, damage: 5."]);
    }

    #[test]
    fn exits_are_listed_in_adjacency_order() {
        assert_eq!(exits_line(&[3, 0, 7]), "Exits: 3, 0, 7");
    }

    #[test]
    fn completion_mentions_save_location() {
        let text = completion_text(&AppCompletion::SavedAndQuit(PathBuf::from("run.sav")));
        assert_eq!(text, "Game saved to run.sav.");
    }
}
