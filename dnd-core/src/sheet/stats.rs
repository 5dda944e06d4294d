//! Derived values shown on the sheet.
//!
//! Everything here is a pure function of the character (plus the injected
//! roller for initiative) and is recomputed on every render.

use std::collections::BTreeSet;

use crate::dice::{DieType, Roller};
use crate::rules;
use crate::world::{Ability, Character, Proficiency, Skill, Spell};

/// Damage type shown for spells that deal no damage.
pub const NO_DAMAGE_TYPE: &str = "N/A";

/// Saving throws the fixed sheet rule set marks as proficient.
const FIXED_SAVING_THROWS: [Ability; 2] = [Ability::Intelligence, Ability::Wisdom];

/// Skills the fixed sheet rule set marks as proficient.
const FIXED_SKILLS: [Skill; 2] = [Skill::Arcana, Skill::History];

pub fn ability_modifier(score: i32) -> i32 {
    rules::ability_modifier(score)
}

pub fn saving_throw(score: i32, proficient: bool, prof_bonus: i32) -> i32 {
    ability_modifier(score) + if proficient { prof_bonus } else { 0 }
}

pub fn skill_bonus(score: i32, proficient: bool, prof_bonus: i32) -> i32 {
    saving_throw(score, proficient, prof_bonus)
}

pub fn passive_wisdom(wisdom: i32) -> i32 {
    10 + ability_modifier(wisdom)
}

pub fn max_hp(hit_die: DieType, level: u8, constitution: u8) -> i32 {
    rules::max_hit_points(hit_die, level, constitution)
}

/// Rolls a d20 and adds the dexterity modifier.
pub fn initiative(dexterity: i32, roller: &mut dyn Roller) -> i32 {
    roller.d20() as i32 + ability_modifier(dexterity)
}

/// Turn `"Tool, Thieves'"` into `"Thieves' Tool"`.
///
/// Swaps the first two `", "`-separated parts; any further parts are
/// dropped. Labels without a separator are returned unchanged.
pub fn format_proficiency_label(raw: &str) -> String {
    let mut parts = raw.split(", ");
    match (parts.next(), parts.next()) {
        (Some(base), Some(qualifier)) => format!("{qualifier} {base}"),
        _ => raw.to_string(),
    }
}

/// Where saving throw and skill proficiency flags come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProficiencyRules {
    /// INT and WIS saves, Arcana and History, whatever the character says.
    #[default]
    Fixed,
    /// Read from the character's "Saving Throws" and "Skills" proficiencies.
    FromCharacter,
}

impl ProficiencyRules {
    pub fn saving_throw(&self, character: &Character, ability: Ability) -> bool {
        match self {
            ProficiencyRules::Fixed => FIXED_SAVING_THROWS.contains(&ability),
            ProficiencyRules::FromCharacter => character
                .proficiencies
                .values()
                .filter(|p| p.is_saving_throw())
                .any(|p| label_matches(p, "Saving Throw: ", ability.abbreviation())),
        }
    }

    pub fn skill(&self, character: &Character, skill: Skill) -> bool {
        match self {
            ProficiencyRules::Fixed => FIXED_SKILLS.contains(&skill),
            ProficiencyRules::FromCharacter => character
                .proficiencies
                .values()
                .filter(|p| p.is_skill())
                .any(|p| label_matches(p, "Skill: ", skill.name())),
        }
    }
}

fn label_matches(proficiency: &Proficiency, prefix: &str, expected: &str) -> bool {
    proficiency
        .name
        .strip_prefix(prefix)
        .unwrap_or(&proficiency.name)
        .eq_ignore_ascii_case(expected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingThrowRow {
    pub ability: Ability,
    pub proficient: bool,
    pub bonus: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillRow {
    pub skill: Skill,
    pub proficient: bool,
    pub bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellRow {
    pub index: String,
    pub name: String,
    pub damage_type: String,
}

pub fn saving_throws(character: &Character, rules: ProficiencyRules) -> Vec<SavingThrowRow> {
    let prof_bonus = character.proficiency_bonus();
    Ability::all()
        .into_iter()
        .map(|ability| {
            let proficient = rules.saving_throw(character, ability);
            SavingThrowRow {
                ability,
                proficient,
                bonus: saving_throw(
                    i32::from(character.ability_scores.get(ability)),
                    proficient,
                    prof_bonus,
                ),
            }
        })
        .collect()
}

pub fn skills(character: &Character, rules: ProficiencyRules) -> Vec<SkillRow> {
    let prof_bonus = character.proficiency_bonus();
    Skill::all()
        .into_iter()
        .map(|skill| {
            let proficient = rules.skill(character, skill);
            SkillRow {
                skill,
                proficient,
                bonus: skill_bonus(
                    i32::from(character.ability_scores.get(skill.ability())),
                    proficient,
                    prof_bonus,
                ),
            }
        })
        .collect()
}

/// Indices of the spells the character has prepared.
pub fn prepared_indices(character: &Character) -> BTreeSet<&str> {
    character
        .spells_prepared
        .iter()
        .map(|s| s.index.as_str())
        .collect()
}

/// Known spells of `level` that are also prepared, in spellbook order.
pub fn prepared_spells_by_level(
    known: &[Spell],
    prepared: &BTreeSet<&str>,
    level: u8,
) -> Vec<SpellRow> {
    known
        .iter()
        .filter(|spell| spell.level == level && prepared.contains(spell.index.as_str()))
        .map(|spell| SpellRow {
            index: spell.index.clone(),
            name: spell.name.clone(),
            damage_type: spell.damage_type().unwrap_or(NO_DAMAGE_TYPE).to_string(),
        })
        .collect()
}

/// Proficiency labels for the "Proficiencies and Languages" block.
/// Saving throws are left out since they have their own table.
pub fn sheet_proficiencies(character: &Character) -> Vec<String> {
    character
        .proficiencies
        .values()
        .filter(|p| !p.is_saving_throw())
        .map(|p| format_proficiency_label(&p.name))
        .collect()
}

pub fn feature_names(character: &Character) -> Vec<&str> {
    character
        .class_features
        .values()
        .map(|f| f.name.as_str())
        .collect()
}
