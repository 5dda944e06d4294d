//! Sheet compositor: builds the region tree for one render.
//!
//! The header follows the terminal width. The stats band does not; its
//! columns are absolute and listed in [`STATS_COLUMNS`]. Widths below
//! [`MIN_SHEET_WIDTH`] are raised to it so the stats band always fits, and
//! the viewer scrolls sideways instead.

use tracing::{debug, warn};

use crate::dice::Roller;
use crate::sheet::region::{
    split_lines, Align, Axis, Border, Emphasis, Panel, Region, RegionTree, Size, Span, Table,
    TextBlock, TextLine,
};
use crate::sheet::stats::{self, ProficiencyRules};
use crate::world::{Ability, Character};

pub const HEADER_HEIGHT: u16 = 6;
pub const STATS_HEIGHT: u16 = 48;
pub const SPELLS_HEIGHT: u16 = 12;
/// Border lines added around the lore text.
pub const LORE_PADDING: u16 = 2;

/// Stats band columns, left to right, in cells.
pub const STATS_COLUMNS: [(&str, u16); 4] = [
    ("base_stats", 10),
    ("throws_column", 43),
    ("hp_column", 60),
    ("personality_column", 56),
];

/// Narrowest sheet the stats band fits in.
pub const MIN_SHEET_WIDTH: u16 = {
    let mut total = 0;
    let mut i = 0;
    while i < STATS_COLUMNS.len() {
        total += STATS_COLUMNS[i].1;
        i += 1;
    }
    total
};

const DETAIL_ROW_HEIGHT: u16 = 3;

const BASE_STAT_WIDTH: u16 = 9;
const BASE_STAT_HEIGHT: u16 = 4;

const INSP_PROF_HEIGHT: u16 = 5;
const SAVING_THROWS_HEIGHT: u16 = 12;
const SKILLS_HEIGHT: u16 = 23;
const PROFICIENCIES_HEIGHT: u16 = 8;

const COMBAT_PANEL_WIDTH: u16 = 19;
const COMBAT_ROW_HEIGHT: u16 = 3;
const HIT_DICE_ROW_HEIGHT: u16 = 4;
const DEATH_SAVES_WIDTH: u16 = COMBAT_PANEL_WIDTH * 2 + 1;
const MONEY_HEIGHT: u16 = 11;

/// Shown before the class name in the header.
const CLASS_GLYPH: &str = "\u{1f9d9}";

/// Spell levels that get a table.
const SPELL_LEVELS: [u8; 2] = [1, 2];

/// Death saving throw tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeathSaves {
    pub successes: u8,
    pub failures: u8,
}

/// Values the sheet shows that do not come from the character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    pub player_name: String,
    /// Death saves are not tracked on the character; shown as configured.
    pub death_saves: DeathSaves,
    pub proficiency_rules: ProficiencyRules,
}

impl SheetConfig {
    pub const PLAYER_NAME_PLACEHOLDER: &'static str = "INSERT_PLAYER_NAME";
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            player_name: Self::PLAYER_NAME_PLACEHOLDER.to_string(),
            death_saves: DeathSaves::default(),
            proficiency_rules: ProficiencyRules::default(),
        }
    }
}

/// Compose the full sheet for `character` at `width` cells.
///
/// Never fails. Layout invariant violations are logged and the tree is
/// returned as composed.
pub fn render_sheet(
    character: &Character,
    width: u16,
    config: &SheetConfig,
    roller: &mut dyn Roller,
) -> RegionTree {
    let sheet_width = width.max(MIN_SHEET_WIDTH);
    if sheet_width != width {
        debug!(width, sheet_width, "terminal narrower than the sheet");
    }

    let lore_height = lore_line_count(&character.lore).saturating_add(LORE_PADDING);
    let bands = vec![
        header(character, sheet_width, config),
        stats_band(character, config, roller),
        spells_band(character),
        Region::panel(
            "lore",
            Size::Length(lore_height),
            Panel::text(TextBlock::plain(&character.lore)).subtitle("Lore"),
        ),
    ];
    let height = bands
        .iter()
        .map(|band| match band.size {
            Size::Length(n) => n,
            Size::Fill(_) => 0,
        })
        .fold(0u16, u16::saturating_add);

    let tree = RegionTree {
        width: sheet_width,
        height,
        root: Region::split("sheet", Size::Fill(1), Axis::Vertical, bands),
    };

    for error in tree.check() {
        warn!(%error, "sheet layout does not fit");
    }
    debug!(
        character = %character.name,
        width = tree.width,
        height = tree.height,
        "composed character sheet"
    );
    tree
}

fn lore_line_count(lore: &str) -> u16 {
    u16::try_from(split_lines(lore).len()).unwrap_or(u16::MAX)
}

// ============================================================================
// Header
// ============================================================================

/// Width of the name block: 40% of the sheet, rounded down.
pub fn name_block_width(width: u16) -> u16 {
    (u32::from(width) * 2 / 5) as u16
}

/// Width of each header detail panel; always laid out three per row.
pub fn detail_panel_width(details_width: u16) -> u16 {
    details_width.saturating_sub(2) / 3
}

fn header(character: &Character, width: u16, config: &SheetConfig) -> Region {
    let name_width = name_block_width(width);
    let details_width = width - name_width;
    let column_width = detail_panel_width(details_width);

    let name = Panel::text(TextBlock::plain(&format!(
        "{}\n  {}",
        character.name, character.description
    )))
    .subtitle("Name")
    .padding(1);

    let details = [
        ("class_level", "Class & Level", class_and_level(character)),
        ("background", "Background", character.background.clone()),
        ("player_name", "Player Name", config.player_name.clone()),
        ("race", "Race", character.race.clone()),
        ("alignment", "Alignment", character.alignment.clone()),
        (
            "experience",
            "Experience (XP)",
            character.experience.to_string(),
        ),
    ];

    let rows = details
        .chunks(3)
        .enumerate()
        .map(|(i, row)| {
            let panels = row
                .iter()
                .map(|(id, subtitle, value)| {
                    Region::panel(
                        *id,
                        Size::Length(column_width),
                        Panel::text(TextBlock::plain(value).aligned(Align::Right))
                            .subtitle(*subtitle),
                    )
                })
                .collect();
            Region::split(
                format!("details_row_{}", i + 1),
                Size::Length(DETAIL_ROW_HEIGHT),
                Axis::Horizontal,
                panels,
            )
        })
        .collect();

    Region::split(
        "header",
        Size::Length(HEADER_HEIGHT),
        Axis::Horizontal,
        vec![
            Region::panel("character_name", Size::Length(name_width), name),
            Region::split("details", Size::Length(details_width), Axis::Vertical, rows),
        ],
    )
}

fn class_and_level(character: &Character) -> String {
    let level = character.level.to_string();
    let mut parts = vec![CLASS_GLYPH];
    if let Some(class) = &character.class {
        if !class.name().is_empty() {
            parts.push(class.name());
        }
    }
    parts.push(&level);
    parts.join(" ")
}

// ============================================================================
// Stats
// ============================================================================

fn stats_band(character: &Character, config: &SheetConfig, roller: &mut dyn Roller) -> Region {
    let [base, throws, hp, personality] = STATS_COLUMNS;
    Region::split(
        "stats",
        Size::Length(STATS_HEIGHT),
        Axis::Horizontal,
        vec![
            base_stats_column(character, base),
            throws_column(character, config, throws),
            hp_column(character, config, roller, hp),
            personality_column(character, personality),
        ],
    )
}

fn base_stats_column(character: &Character, (name, width): (&str, u16)) -> Region {
    let panels = Ability::all()
        .into_iter()
        .map(|ability| {
            let score = character.ability_scores.get(ability);
            let modifier = character.ability_scores.modifier(ability);
            let text = TextBlock::plain(&format!("{score}\n{modifier}"))
                .aligned(Align::Center)
                .emphasized(Emphasis::Strong);
            Region::panel(
                ability.abbreviation().to_lowercase(),
                Size::Length(BASE_STAT_HEIGHT),
                Panel::text(text)
                    .subtitle(ability.abbreviation())
                    .border(Border::Accent)
                    .width(BASE_STAT_WIDTH),
            )
        })
        .collect();
    Region::split(name, Size::Length(width), Axis::Vertical, panels)
}

fn proficiency_marker(proficient: bool) -> Span {
    if proficient {
        Span::new("+", Emphasis::Proficient)
    } else {
        Span::plain("-")
    }
}

fn throws_column(character: &Character, config: &SheetConfig, (name, width): (&str, u16)) -> Region {
    let wisdom = i32::from(character.ability_scores.wisdom);
    let insp_prof = Table::grid()
        .row([character.inspiration.to_string(), "Inspiration".into()])
        .row([
            character.proficiency_bonus().to_string(),
            "Proficiency Bonus".into(),
        ])
        .row([
            stats::passive_wisdom(wisdom).to_string(),
            "Passive Wisdom".into(),
        ]);

    let mut saving_throws = Table::new(["PROF", "BNS", "STAT"]);
    for row in stats::saving_throws(character, config.proficiency_rules) {
        saving_throws.push_row([
            proficiency_marker(row.proficient),
            row.bonus.to_string().into(),
            row.ability.abbreviation().into(),
        ]);
    }

    let mut skills = Table::new(["PROF", "BNS", "SKILL", "STAT"]);
    for row in stats::skills(character, config.proficiency_rules) {
        skills.push_row([
            proficiency_marker(row.proficient),
            row.bonus.to_string().into(),
            row.skill.name().into(),
            row.skill.ability().abbreviation().into(),
        ]);
    }

    let proficiencies = TextBlock::from_lines(vec![
        Span::new("Proficiencies:", Emphasis::Strong).into(),
        TextLine::from(format!(
            "  {}",
            stats::sheet_proficiencies(character).join(", ")
        )),
        Span::new("Languages:", Emphasis::Strong).into(),
        TextLine::from(format!("  {}", character.languages)),
    ]);

    Region::split(
        name,
        Size::Length(width),
        Axis::Vertical,
        vec![
            Region::panel(
                "insp_prof",
                Size::Length(INSP_PROF_HEIGHT),
                Panel::table(insp_prof),
            ),
            Region::panel(
                "saving_throws",
                Size::Length(SAVING_THROWS_HEIGHT),
                Panel::table(saving_throws).subtitle("Saving Throws"),
            ),
            Region::panel(
                "skills",
                Size::Length(SKILLS_HEIGHT),
                Panel::table(skills).subtitle("Skills"),
            ),
            Region::panel(
                "proficiencies",
                Size::Length(PROFICIENCIES_HEIGHT),
                Panel::text(proficiencies).subtitle("Proficiencies and Languages"),
            ),
        ],
    )
}

fn value_panel(id: &str, subtitle: &str, value: impl ToString) -> Region {
    Region::panel(
        id,
        Size::Length(COMBAT_PANEL_WIDTH),
        Panel::text(TextBlock::plain(&value.to_string())).subtitle(subtitle),
    )
}

fn hp_column(
    character: &Character,
    config: &SheetConfig,
    roller: &mut dyn Roller,
    (name, width): (&str, u16),
) -> Region {
    let dexterity = i32::from(character.ability_scores.dexterity);
    let armor_class_row = Region::split(
        "armor_class_row",
        Size::Length(COMBAT_ROW_HEIGHT),
        Axis::Horizontal,
        vec![
            value_panel("armor_class", "Armor Class", character.armor_class),
            value_panel("initiative", "Initiative", stats::initiative(dexterity, roller)),
            value_panel("speed", "Speed", character.speed),
        ],
    );

    let hit_die = character.hit_die();
    if hit_die.is_none() {
        warn!(
            class = ?character.class,
            "no hit die for this character, max HP shown as 0"
        );
    }
    let max_hp = hit_die
        .map(|hd| stats::max_hp(hd, character.level, character.ability_scores.constitution))
        .unwrap_or(0);
    let max_hp_row = Region::split(
        "max_hp_row",
        Size::Length(COMBAT_ROW_HEIGHT),
        Axis::Horizontal,
        vec![
            value_panel("max_hp", "Max HP", max_hp),
            value_panel("current_hp", "Current HP", character.current_hp),
            value_panel("temp_hp", "Temp HP", character.temp_hp),
        ],
    );

    let hit_die = hit_die
        .map(|hd| format!("{}d", hd.sides()))
        .unwrap_or_default();
    let hit_dice = Table::grid()
        .row([
            Span::plain("Total"),
            Span::new(character.max_hd.to_string(), Emphasis::Glowing),
        ])
        .row([Span::plain("Hit Dice"), Span::new(hit_die, Emphasis::Glowing)]);
    let death_saves = Table::grid()
        .row(["Successes".to_string(), config.death_saves.successes.to_string()])
        .row(["Failures".to_string(), config.death_saves.failures.to_string()]);
    let hit_dice_row = Region::split(
        "hit_dice_row",
        Size::Length(HIT_DICE_ROW_HEIGHT),
        Axis::Horizontal,
        vec![
            Region::panel(
                "hit_dice",
                Size::Length(COMBAT_PANEL_WIDTH),
                Panel::table(hit_dice).subtitle("Hit Dice"),
            ),
            Region::panel(
                "death_saves",
                Size::Length(DEATH_SAVES_WIDTH),
                Panel::table(death_saves).subtitle("Death Saves"),
            ),
        ],
    );

    let mut money = Table::new(["QTY", "COIN"]);
    for (coin, quantity) in character.wealth_detailed() {
        money.push_row([quantity.to_string(), coin.abbreviation().to_string()]);
    }

    let mut equipment = Table::new(["QTY", "ITEM", "COST", "WEIGHT"]);
    for item in &character.inventory {
        equipment.push_row([
            item.quantity.to_string(),
            item.name.clone(),
            item.cost.to_string(),
            item.weight.to_string(),
        ]);
    }

    Region::split(
        name,
        Size::Length(width),
        Axis::Vertical,
        vec![
            armor_class_row,
            max_hp_row,
            hit_dice_row,
            Region::panel(
                "money",
                Size::Length(MONEY_HEIGHT),
                Panel::table(money).subtitle("Money"),
            ),
            Region::panel(
                "equipment",
                Size::Fill(1),
                Panel::table(equipment).subtitle("Equipment"),
            ),
        ],
    )
}

fn personality_column(character: &Character, (name, width): (&str, u16)) -> Region {
    let features = stats::feature_names(character).join("\n");
    let panels = [
        ("personality", "Personality Traits", character.personality.as_str()),
        ("ideals", "Ideals", character.ideals.as_str()),
        ("bonds", "Bonds", character.bonds.as_str()),
        ("flaws", "Flaws", character.flaws.as_str()),
        ("features", "Features", features.as_str()),
    ]
    .into_iter()
    .map(|(id, subtitle, text)| {
        Region::panel(
            id,
            Size::Fill(1),
            Panel::text(TextBlock::plain(text)).subtitle(subtitle),
        )
    })
    .collect();
    Region::split(name, Size::Length(width), Axis::Vertical, panels)
}

// ============================================================================
// Spells
// ============================================================================

fn spells_band(character: &Character) -> Region {
    let prepared = stats::prepared_indices(character);
    let panels = SPELL_LEVELS
        .into_iter()
        .map(|level| {
            let mut table = Table::new(["PREP", "SPELL", "DMG TYPE"]);
            for row in stats::prepared_spells_by_level(&character.spells_known, &prepared, level)
            {
                table.push_row(["Y".to_string(), row.name, row.damage_type]);
            }
            Region::panel(
                format!("level_{level}_spells"),
                Size::Fill(1),
                Panel::table(table).subtitle(format!("Level {level} Spells")),
            )
        })
        .collect();
    Region::split("spells", Size::Length(SPELLS_HEIGHT), Axis::Horizontal, panels)
}
