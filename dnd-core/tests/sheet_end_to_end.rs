//! End-to-end tests for sheet composition through the public API.
//!
//! These build characters the way a caller would and check the composed
//! region tree, without painting anything.

use dnd_core::dice::{FixedRoller, RngRoller};
use dnd_core::sheet::{
    render_sheet, Axis, Body, ProficiencyRules, Region, RegionTree, SheetConfig, Size,
    MIN_SHEET_WIDTH,
};
use dnd_core::testing::{character_with_scores, sample_wizard};
use dnd_core::world::{Character, Item, Spell};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn level_one_wizard() -> Character {
    let mut wizard = character_with_scores([16, 12, 14, 18, 11, 10]);
    wizard.name = "Elminster Jr.".to_string();
    wizard.inventory = vec![Item::new("Spellbook", 1).with_cost(50, "gp").with_weight(3.0)];
    let missile = Spell::new("magic-missile", "Magic Missile", 1).with_damage_type("Force");
    wizard.spells_known = vec![missile.clone()];
    wizard.spells_prepared = vec![missile];
    wizard
}

fn panel_text(tree: &RegionTree, name: &str) -> String {
    tree.panel(name)
        .and_then(|p| p.as_text())
        .map(|t| t.text())
        .unwrap_or_default()
}

/// Sum of declared `Length` sizes per split never exceeds the extent the
/// split was given, walking the whole tree.
fn assert_fits(region: &Region, width: u16, height: u16) {
    let Body::Split { axis, children } = &region.body else {
        return;
    };
    let available = match axis {
        Axis::Horizontal => width,
        Axis::Vertical => height,
    };
    let fixed: u32 = children
        .iter()
        .map(|c| match c.size {
            Size::Length(n) => u32::from(n),
            Size::Fill(_) => 0,
        })
        .sum();
    assert!(
        fixed <= u32::from(available),
        "{} uses {fixed} of {available}",
        region.name
    );

    let spare = available - fixed as u16;
    let fills = children
        .iter()
        .filter(|c| matches!(c.size, Size::Fill(_)))
        .count() as u16;
    for child in children {
        let extent = match child.size {
            Size::Length(n) => n,
            Size::Fill(_) => spare / fills.max(1),
        };
        match axis {
            Axis::Horizontal => assert_fits(child, extent, height),
            Axis::Vertical => assert_fits(child, width, extent),
        }
    }
}

#[test]
fn test_level_one_wizard_sheet() {
    let wizard = level_one_wizard();
    let tree = render_sheet(&wizard, 200, &SheetConfig::default(), &mut FixedRoller(10));

    let base = tree.find("base_stats").expect("base stats column");
    assert_eq!(base.children().len(), 6);
    let modifiers: Vec<String> = base
        .children()
        .iter()
        .map(|panel| panel_text(&tree, &panel.name))
        .map(|text| text.lines().nth(1).unwrap_or_default().to_string())
        .collect();
    assert_eq!(modifiers, ["3", "1", "2", "4", "0", "0"]);

    let spells = tree.table("level_1_spells").expect("level 1 spell table");
    assert_eq!(spells.rows.len(), 1);
    assert_eq!(spells.rows[0][1].text, "Magic Missile");
    assert_eq!(spells.rows[0][2].text, "Force");

    assert_eq!(tree.table("equipment").unwrap().rows.len(), 1);
    assert_eq!(tree.table("money").unwrap().rows.len(), 5);
}

#[test]
fn test_unprepared_and_other_level_spells_are_hidden() {
    let mut wizard = level_one_wizard();
    wizard
        .spells_known
        .push(Spell::new("shield", "Shield", 1));
    wizard
        .spells_known
        .push(Spell::new("misty-step", "Misty Step", 2));
    wizard
        .spells_prepared
        .push(Spell::new("misty-step", "Misty Step", 2));

    let tree = render_sheet(&wizard, 200, &SheetConfig::default(), &mut FixedRoller(10));
    assert_eq!(tree.table("level_1_spells").unwrap().rows.len(), 1);
    let level_2 = tree.table("level_2_spells").unwrap();
    assert_eq!(level_2.column_text(1), ["Misty Step"]);
    assert_eq!(level_2.column_text(2), ["N/A"]);
}

#[test]
fn test_same_character_same_tree() {
    let wizard = sample_wizard();
    let config = SheetConfig::default();
    let first = render_sheet(&wizard, 240, &config, &mut FixedRoller(12));
    let second = render_sheet(&wizard, 240, &config, &mut FixedRoller(12));
    assert_eq!(first, second);

    let seeded = |seed| {
        let mut roller = RngRoller::new(StdRng::seed_from_u64(seed));
        render_sheet(&wizard, 240, &config, &mut roller)
    };
    assert_eq!(seeded(3), seeded(3));
}

#[test]
fn test_only_initiative_depends_on_the_roll() {
    let wizard = sample_wizard();
    let config = SheetConfig::default();
    let low = render_sheet(&wizard, 200, &config, &mut FixedRoller(1));
    let high = render_sheet(&wizard, 200, &config, &mut FixedRoller(20));

    assert_eq!(panel_text(&low, "initiative"), "2");
    assert_eq!(panel_text(&high, "initiative"), "21");

    let differing: Vec<&str> = low
        .root
        .leaves()
        .into_iter()
        .zip(high.root.leaves())
        .filter(|(a, b)| a != b)
        .map(|(a, _)| a.name.as_str())
        .collect();
    assert_eq!(differing, ["initiative"]);
}

#[test]
fn test_declared_sizes_fit_at_every_width() {
    let wizard = sample_wizard();
    for width in (0..=400).step_by(7) {
        let tree = render_sheet(&wizard, width, &SheetConfig::default(), &mut FixedRoller(10));
        assert!(tree.width >= MIN_SHEET_WIDTH);
        assert!(tree.check().is_empty(), "width {width}: {:?}", tree.check());
        assert_fits(&tree.root, tree.width, tree.height);
    }
}

#[test]
fn test_proficiencies_from_character_records() {
    let mut wizard = sample_wizard();
    wizard.proficiencies.retain(|id, _| id != "skill-history");

    let fixed = render_sheet(&wizard, 200, &SheetConfig::default(), &mut FixedRoller(10));
    let derived = render_sheet(
        &wizard,
        200,
        &SheetConfig {
            proficiency_rules: ProficiencyRules::FromCharacter,
            ..Default::default()
        },
        &mut FixedRoller(10),
    );

    let history = |tree: &RegionTree| {
        tree.table("skills")
            .unwrap()
            .rows
            .iter()
            .find(|r| r[2].text == "History")
            .map(|r| (r[0].text.clone(), r[1].text.clone()))
            .unwrap()
    };
    assert_eq!(history(&fixed), ("+".to_string(), "6".to_string()));
    assert_eq!(history(&derived), ("-".to_string(), "4".to_string()));
}

#[test]
fn test_player_name_from_config() {
    let config = SheetConfig {
        player_name: "Sam".to_string(),
        ..Default::default()
    };
    let tree = render_sheet(&sample_wizard(), 200, &config, &mut FixedRoller(10));
    assert_eq!(panel_text(&tree, "player_name"), "Sam");
}
