//! D&D 5e rule tables: ability modifiers, proficiency bonus and hit points.

use crate::dice::DieType;

/// Modifier for an ability score.
///
/// Floor division, so odd scores below 10 round away from zero:
/// 8-9 = -1, 10-11 = 0, 12-13 = +1.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

pub fn proficiency_bonus_for_level(level: u8) -> i32 {
    match level {
        0 => 2, // Invalid level, but default to minimum
        1..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        _ => 6,
    }
}

/// Maximum hit points using fixed hit point gains.
///
/// First level takes the full hit die, every later level the die's average
/// rounded up (`sides / 2 + 1`). Constitution applies at every level and each
/// level grants at least one hit point.
pub fn max_hit_points(hit_die: DieType, level: u8, constitution: u8) -> i32 {
    let con_mod = ability_modifier(i32::from(constitution));
    let sides = hit_die.sides() as i32;
    if level == 0 {
        return 0;
    }

    let first = (sides + con_mod).max(1);
    let per_level = (sides / 2 + 1 + con_mod).max(1);
    first + per_level * (i32::from(level) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_floor() {
        for score in -5..=30 {
            let expected = ((score - 10) as f64 / 2.0).floor() as i32;
            assert_eq!(ability_modifier(score), expected, "score {score}");
        }
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(15), 2);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(1), -5);
    }

    #[test]
    fn test_proficiency_bonus_table() {
        assert_eq!(proficiency_bonus_for_level(1), 2);
        assert_eq!(proficiency_bonus_for_level(4), 2);
        assert_eq!(proficiency_bonus_for_level(5), 3);
        assert_eq!(proficiency_bonus_for_level(13), 5);
        assert_eq!(proficiency_bonus_for_level(20), 6);
    }

    #[test]
    fn test_max_hit_points() {
        // Level 1 wizard, CON 14: 6 + 2
        assert_eq!(max_hit_points(DieType::D6, 1, 14), 8);
        // Level 3 fighter, CON 14: 10 + 2, then 2 x (6 + 2)
        assert_eq!(max_hit_points(DieType::D10, 3, 14), 28);
        // Terrible constitution still gains a hit point per level
        assert_eq!(max_hit_points(DieType::D6, 2, 1), 2);
        assert_eq!(max_hit_points(DieType::D8, 0, 10), 0);
    }
}
