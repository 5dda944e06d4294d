//! Viewer configuration from the environment and command line.
//!
//! Environment variables (optionally from a `.env` file) are read first and
//! command-line flags override them.

use std::path::PathBuf;

use dnd_core::sheet::{ProficiencyRules, SheetConfig};
use thiserror::Error;

pub const CHARACTER_ENV: &str = "DND_SHEET_CHARACTER";
pub const WIDTH_ENV: &str = "DND_SHEET_WIDTH";
pub const PLAYER_NAME_ENV: &str = "DND_PLAYER_NAME";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} expects a number, got '{value}'")]
    InvalidNumber { name: String, value: String },

    #[error("{0} requires a value")]
    MissingValue(String),
}

/// Everything the viewer needs to know before composing a sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerConfig {
    /// Character file; the bundled sample wizard when absent
    pub character_path: Option<PathBuf>,
    /// Sheet width; the terminal width when absent
    pub width: Option<u16>,
    /// Fixed d20 result for initiative instead of a random roll
    pub initiative: Option<u32>,
    /// Write plain text to stdout instead of opening the pager
    pub print: bool,
    /// Write the loaded character to this file as a versioned save and exit
    pub save_path: Option<PathBuf>,
    pub help: bool,
    pub sheet: SheetConfig,
}

impl ViewerConfig {
    /// Read the process environment, then apply `args` (without the program name)
    pub fn from_env_and_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = Self::from_env(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        Ok(config)
    }

    /// Build from environment variables looked up through `lookup`
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(CHARACTER_ENV).filter(|p| !p.is_empty()) {
            config.character_path = Some(PathBuf::from(path));
        }
        if let Some(width) = lookup(WIDTH_ENV).filter(|w| !w.is_empty()) {
            config.width = Some(parse_number(WIDTH_ENV, &width)?);
        }
        if let Some(player) = lookup(PLAYER_NAME_ENV).filter(|p| !p.is_empty()) {
            config.sheet.player_name = player;
        }

        Ok(config)
    }

    /// Apply command-line flags on top of the current values
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), ConfigError> {
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--character" | "-c" => {
                    self.character_path = Some(PathBuf::from(value(args, i)?));
                    i += 1;
                }
                "--width" | "-w" => {
                    self.width = Some(parse_number(flag, value(args, i)?)?);
                    i += 1;
                }
                "--initiative" => {
                    self.initiative = Some(parse_number(flag, value(args, i)?)?);
                    i += 1;
                }
                "--player" => {
                    self.sheet.player_name = value(args, i)?.to_string();
                    i += 1;
                }
                "--save" => {
                    self.save_path = Some(PathBuf::from(value(args, i)?));
                    i += 1;
                }
                "--print" => self.print = true,
                "--derive-proficiencies" => {
                    self.sheet.proficiency_rules = ProficiencyRules::FromCharacter;
                }
                "--help" | "-h" => self.help = true,
                _ => {}
            }
            i += 1;
        }
        Ok(())
    }
}

fn value(args: &[String], i: usize) -> Result<&str, ConfigError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(args[i].clone()))
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::from_env(env(&[])).unwrap();
        assert_eq!(config.character_path, None);
        assert_eq!(config.width, None);
        assert_eq!(config.save_path, None);
        assert!(!config.print);
        assert_eq!(config.sheet.player_name, "INSERT_PLAYER_NAME");
        assert_eq!(config.sheet.proficiency_rules, ProficiencyRules::Fixed);
    }

    #[test]
    fn test_all_flags() {
        let mut config = ViewerConfig::default();
        config
            .apply_args(&args(&[
                "--character",
                "rando.json",
                "--width",
                "220",
                "--initiative",
                "17",
                "--print",
                "--derive-proficiencies",
                "--player",
                "Sam",
                "--save",
                "saved.json",
            ]))
            .unwrap();

        assert_eq!(config.character_path, Some(PathBuf::from("rando.json")));
        assert_eq!(config.width, Some(220));
        assert_eq!(config.initiative, Some(17));
        assert!(config.print);
        assert_eq!(config.sheet.proficiency_rules, ProficiencyRules::FromCharacter);
        assert_eq!(config.sheet.player_name, "Sam");
        assert_eq!(config.save_path, Some(PathBuf::from("saved.json")));
    }

    #[test]
    fn test_env_then_flags() {
        let mut config = ViewerConfig::from_env(env(&[
            (CHARACTER_ENV, "from_env.json"),
            (WIDTH_ENV, "180"),
            (PLAYER_NAME_ENV, "Env Player"),
        ]))
        .unwrap();
        assert_eq!(config.width, Some(180));
        assert_eq!(config.sheet.player_name, "Env Player");

        config.apply_args(&args(&["-w", "250"])).unwrap();
        assert_eq!(config.width, Some(250));
        assert_eq!(config.character_path, Some(PathBuf::from("from_env.json")));
    }

    #[test]
    fn test_bad_width() {
        let err = ViewerConfig::from_env(env(&[(WIDTH_ENV, "wide")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: WIDTH_ENV.to_string(),
                value: "wide".to_string()
            }
        );

        let mut config = ViewerConfig::default();
        let err = config.apply_args(&args(&["--width", "-3"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn test_missing_value() {
        let mut config = ViewerConfig::default();
        let err = config.apply_args(&args(&["--print", "--character"])).unwrap_err();
        assert_eq!(err, ConfigError::MissingValue("--character".to_string()));
        assert_eq!(err.to_string(), "--character requires a value");
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let mut config = ViewerConfig::default();
        config.apply_args(&args(&["--verbose", "-h"])).unwrap();
        assert!(config.help);
    }
}
