use crate::types::{Item, ItemKind, Monster, MonsterKind};

pub const PLAYER_START_HP: i32 = 20;
pub const PLAYER_START_DAMAGE: i32 = 5;

/// Generation-time cap on room degree. Not re-checked on load.
pub const MAX_NEIGHBORS: usize = 4;

pub struct MonsterStats {
    pub name: &'static str,
    pub hp: i32,
    pub damage: i32,
}

pub struct ItemStats {
    pub name: &'static str,
    pub hp_restore: i32,
    pub damage_boost: i32,
}

pub fn get_monster_stats(kind: MonsterKind) -> MonsterStats {
    match kind {
        MonsterKind::Goblin => MonsterStats { name: "Goblin", hp: 8, damage: 5 },
        MonsterKind::Troll => MonsterStats { name: "Troll", hp: 12, damage: 3 },
    }
}

// Save files carry only the item kind, so these values are also what a load restores.
pub fn get_item_stats(kind: ItemKind) -> ItemStats {
    match kind {
        ItemKind::Potion => ItemStats { name: "Potion", hp_restore: 10, damage_boost: 0 },
        ItemKind::Sword => ItemStats { name: "Sword", hp_restore: 0, damage_boost: 2 },
    }
}

impl Monster {
    pub fn spawn(kind: MonsterKind) -> Self {
        let stats = get_monster_stats(kind);
        Self { kind, name: stats.name.to_string(), hp: stats.hp, damage: stats.damage }
    }

    /// A monster of `kind` whose hit points may already have been worn down.
    pub fn wounded(kind: MonsterKind, hp: i32, damage: i32) -> Self {
        Self { kind, name: get_monster_stats(kind).name.to_string(), hp, damage }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

impl Item {
    pub fn spawn(kind: ItemKind) -> Self {
        let stats = get_item_stats(kind);
        Self {
            kind,
            name: stats.name.to_string(),
            hp_restore: stats.hp_restore,
            damage_boost: stats.damage_boost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monster_table_matches_canonical_values() {
        let goblin = Monster::spawn(MonsterKind::Goblin);
        assert_eq!((goblin.name.as_str(), goblin.hp, goblin.damage), ("Goblin", 8, 5));

        let troll = Monster::spawn(MonsterKind::Troll);
        assert_eq!((troll.name.as_str(), troll.hp, troll.damage), ("Troll", 12, 3));
    }

    #[test]
    fn item_table_matches_canonical_values() {
        let potion = Item::spawn(ItemKind::Potion);
        assert_eq!((potion.hp_restore, potion.damage_boost), (10, 0));

        let sword = Item::spawn(ItemKind::Sword);
        assert_eq!((sword.hp_restore, sword.damage_boost), (0, 2));
    }

    #[test]
    fn wounded_monster_keeps_canonical_name() {
        let troll = Monster::wounded(MonsterKind::Troll, 4, 3);
        assert_eq!(troll.name, "Troll");
        assert!(troll.is_alive());
        assert!(!Monster::wounded(MonsterKind::Goblin, 0, 5).is_alive());
    }
}
