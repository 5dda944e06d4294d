//! D&D 5e character types.
//!
//! Contains the read-only character record the sheet is drawn from: identity
//! text, ability scores, inventory, proficiencies, features, spells and coin.
//! Every field of [`Character`] has a serde default, so a character file that
//! leaves something out still loads with an empty value in its place.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use crate::dice::DieType;
use crate::rules;

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Ability scores container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        rules::ability_modifier(i32::from(self.get(ability)))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

// ============================================================================
// Skills
// ============================================================================

/// D&D 5e skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    Arcana,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Perception,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Persuasion,
}

impl Skill {
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Athletics => "Athletics",
            Skill::Acrobatics => "Acrobatics",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Arcana => "Arcana",
            Skill::History => "History",
            Skill::Investigation => "Investigation",
            Skill::Nature => "Nature",
            Skill::Religion => "Religion",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Insight => "Insight",
            Skill::Medicine => "Medicine",
            Skill::Perception => "Perception",
            Skill::Survival => "Survival",
            Skill::Deception => "Deception",
            Skill::Intimidation => "Intimidation",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
        }
    }

    /// All skills in the order a printed sheet lists them (alphabetical).
    pub fn all() -> [Skill; 18] {
        [
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Arcana,
            Skill::Athletics,
            Skill::Deception,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Nature,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::Religion,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Survival,
        ]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Classes
// ============================================================================

/// D&D character classes.
///
/// Class names are matched case-insensitively when loading. A name that is
/// not one of the core classes is kept as [`CharacterClass::Other`] so the
/// sheet can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
    /// Homebrew or non-core class, by the name it was given.
    Other(String),
}

const CORE_CLASSES: [CharacterClass; 12] = [
    CharacterClass::Barbarian,
    CharacterClass::Bard,
    CharacterClass::Cleric,
    CharacterClass::Druid,
    CharacterClass::Fighter,
    CharacterClass::Monk,
    CharacterClass::Paladin,
    CharacterClass::Ranger,
    CharacterClass::Rogue,
    CharacterClass::Sorcerer,
    CharacterClass::Warlock,
    CharacterClass::Wizard,
];

impl CharacterClass {
    /// Look up a class by name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> CharacterClass {
        let trimmed = name.trim();
        CORE_CLASSES
            .iter()
            .find(|class| class.name().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| CharacterClass::Other(trimmed.to_string()))
    }

    /// Hit die of a core class. `None` for [`CharacterClass::Other`].
    pub fn hit_die(&self) -> Option<DieType> {
        let die = match self {
            CharacterClass::Barbarian => DieType::D12,
            CharacterClass::Fighter | CharacterClass::Paladin | CharacterClass::Ranger => {
                DieType::D10
            }
            CharacterClass::Bard
            | CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Monk
            | CharacterClass::Rogue
            | CharacterClass::Warlock => DieType::D8,
            CharacterClass::Sorcerer | CharacterClass::Wizard => DieType::D6,
            CharacterClass::Other(_) => return None,
        };
        Some(die)
    }

    pub fn name(&self) -> &str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Other(name) => name,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for CharacterClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CharacterClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let class = CharacterClass::parse(&raw);
        if let CharacterClass::Other(name) = &class {
            warn!(class = %name, "unknown class, no hit die available");
        }
        Ok(class)
    }
}

// ============================================================================
// Proficiencies and Features
// ============================================================================

/// Proficiency record, keyed by id in [`Character::proficiencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proficiency {
    pub name: String,
    /// Category such as "Saving Throws", "Skills", "Armor" or "Weapons".
    #[serde(rename = "type")]
    pub kind: String,
}

impl Proficiency {
    pub const SAVING_THROWS: &'static str = "Saving Throws";
    pub const SKILLS: &'static str = "Skills";

    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn is_saving_throw(&self) -> bool {
        self.kind == Self::SAVING_THROWS
    }

    pub fn is_skill(&self) -> bool {
        self.kind == Self::SKILLS
    }
}

/// Class feature/ability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassFeature {
    pub name: String,
    pub desc: Vec<String>,
}

impl ClassFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: Vec::new(),
        }
    }
}

// ============================================================================
// Spells
// ============================================================================

/// A spell from the character's spellbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spell {
    /// Stable identifier, e.g. "magic-missile".
    pub index: String,
    pub name: String,
    pub level: u8,
    pub damage: Option<SpellDamage>,
}

impl Spell {
    pub fn new(index: impl Into<String>, name: impl Into<String>, level: u8) -> Self {
        Self {
            index: index.into(),
            name: name.into(),
            level,
            damage: None,
        }
    }

    pub fn with_damage_type(mut self, damage_type: impl Into<String>) -> Self {
        self.damage = Some(SpellDamage {
            damage_type: Some(DamageType {
                name: damage_type.into(),
            }),
        });
        self
    }

    /// Name of the damage type this spell deals, if it deals damage.
    pub fn damage_type(&self) -> Option<&str> {
        self.damage
            .as_ref()
            .and_then(|d| d.damage_type.as_ref())
            .map(|t| t.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellDamage {
    pub damage_type: Option<DamageType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageType {
    pub name: String,
}

// ============================================================================
// Inventory and Wealth
// ============================================================================

/// Price of an item, e.g. 25 gp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub quantity: u32,
    pub unit: String,
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quantity, self.unit)
    }
}

/// Inventory item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    pub cost: Cost,
    pub weight: f32,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            cost: Cost::default(),
            weight: 0.0,
        }
    }

    pub fn with_cost(mut self, quantity: u32, unit: impl Into<String>) -> Self {
        self.cost = Cost {
            quantity,
            unit: unit.into(),
        };
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// Coin denominations, most valuable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    Platinum,
    Gold,
    Electrum,
    Silver,
    Copper,
}

impl Coin {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Coin::Platinum => "pp",
            Coin::Gold => "gp",
            Coin::Electrum => "ep",
            Coin::Silver => "sp",
            Coin::Copper => "cp",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Coin purse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wealth {
    pub pp: u32,
    pub gp: u32,
    pub ep: u32,
    pub sp: u32,
    pub cp: u32,
}

// ============================================================================
// Character
// ============================================================================

/// A player character as the sheet sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub race: String,
    pub class: Option<CharacterClass>,
    pub level: u8,
    pub alignment: String,
    pub background: String,
    pub description: String,
    pub personality: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub lore: String,
    pub languages: String,
    pub experience: u32,

    pub ability_scores: AbilityScores,
    pub armor_class: u8,
    pub speed: u32,
    pub current_hp: i32,
    pub temp_hp: i32,
    /// Hit dice available to spend.
    pub max_hd: u8,
    pub inspiration: u8,

    pub inventory: Vec<Item>,
    pub proficiencies: BTreeMap<String, Proficiency>,
    pub class_features: BTreeMap<String, ClassFeature>,
    pub spells_known: Vec<Spell>,
    pub spells_prepared: Vec<Spell>,
    pub wealth: Wealth,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            max_hd: 1,
            armor_class: 10,
            speed: 30,
            ..Default::default()
        }
    }

    /// Hit die of the character's class.
    pub fn hit_die(&self) -> Option<DieType> {
        self.class.as_ref().and_then(CharacterClass::hit_die)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        rules::proficiency_bonus_for_level(self.level)
    }

    /// Maximum hit points from the class hit die, level and constitution.
    /// Zero when the character has no class or a class with no known hit die.
    pub fn max_hit_points(&self) -> i32 {
        self.hit_die()
            .map(|hd| rules::max_hit_points(hd, self.level, self.ability_scores.constitution))
            .unwrap_or(0)
    }

    /// Coin counts keyed by denomination, most valuable first.
    pub fn wealth_detailed(&self) -> [(Coin, u32); 5] {
        [
            (Coin::Platinum, self.wealth.pp),
            (Coin::Gold, self.wealth.gp),
            (Coin::Electrum, self.wealth.ep),
            (Coin::Silver, self.wealth.sp),
            (Coin::Copper, self.wealth.cp),
        ]
    }
}
