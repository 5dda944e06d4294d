//! Sample characters for tests and for the viewer's default sheet.

use crate::world::{
    AbilityScores, Character, CharacterClass, ClassFeature, Item, Proficiency, Spell, Wealth,
};

/// A bare level 1 wizard with the given scores (STR, DEX, CON, INT, WIS, CHA)
/// and nothing else filled in.
pub fn character_with_scores(scores: [u8; 6]) -> Character {
    let [str, dex, con, int, wis, cha] = scores;
    let mut character = Character::new("Test Subject");
    character.class = Some(CharacterClass::Wizard);
    character.ability_scores = AbilityScores::new(str, dex, con, int, wis, cha);
    character
}

/// Rando B. Higgins, a level 1 high elf wizard with a small spellbook.
pub fn sample_wizard() -> Character {
    let mut character = character_with_scores([16, 12, 14, 18, 11, 10]);
    character.name = "Rando B. Higgins".to_string();
    character.race = "High Elf".to_string();
    character.alignment = "CE".to_string();
    character.description = "He wild".to_string();
    character.background = "Don't ask".to_string();
    character.personality = "Not really".to_string();
    character.ideals = "Sure".to_string();
    character.bonds = "No just stocks".to_string();
    character.flaws = "Plenty".to_string();
    character.languages = "Common".to_string();
    character.lore = "Too long".to_string();

    character.armor_class = 11;
    character.speed = 30;
    character.current_hp = character.max_hit_points();

    character.inventory = vec![
        Item::new("Quarterstaff", 1).with_cost(2, "sp").with_weight(4.0),
        Item::new("Component pouch", 1).with_cost(25, "gp").with_weight(2.0),
        Item::new("Spellbook", 1).with_cost(50, "gp").with_weight(3.0),
        Item::new("Scholar's Pack", 1).with_cost(40, "gp").with_weight(10.0),
    ];

    for (id, name, kind) in [
        ("daggers", "Daggers", "Weapons"),
        ("darts", "Darts", "Weapons"),
        ("light-crossbows", "Light crossbows", "Weapons"),
        ("quarterstaffs", "Quarterstaffs", "Weapons"),
        ("slings", "Slings", "Weapons"),
        ("saving-throw-int", "Saving Throw: INT", Proficiency::SAVING_THROWS),
        ("saving-throw-wis", "Saving Throw: WIS", Proficiency::SAVING_THROWS),
        ("skill-arcana", "Skill: Arcana", Proficiency::SKILLS),
        ("skill-history", "Skill: History", Proficiency::SKILLS),
    ] {
        character
            .proficiencies
            .insert(id.to_string(), Proficiency::new(name, kind));
    }

    for (id, name) in [
        ("arcane-recovery", "Arcane Recovery"),
        ("spellcasting-wizard", "Spellcasting: Wizard"),
    ] {
        character
            .class_features
            .insert(id.to_string(), ClassFeature::new(name));
    }

    character.spells_known = vec![
        Spell::new("burning-hands", "Burning Hands", 1).with_damage_type("Fire"),
        Spell::new("detect-magic", "Detect Magic", 1),
        Spell::new("mage-armor", "Mage Armor", 1),
        Spell::new("magic-missile", "Magic Missile", 1).with_damage_type("Force"),
        Spell::new("shield", "Shield", 1),
        Spell::new("sleep", "Sleep", 1),
    ];
    character.spells_prepared = ["burning-hands", "magic-missile", "shield", "sleep"]
        .iter()
        .filter_map(|index| {
            character
                .spells_known
                .iter()
                .find(|s| s.index == *index)
                .cloned()
        })
        .collect();

    character.wealth = Wealth {
        gp: 10,
        ..Default::default()
    };

    character
}
