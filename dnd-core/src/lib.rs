//! D&D 5e character model and character sheet compositor.
//!
//! This crate provides:
//! - The character record a sheet is drawn from
//! - Derived statistics (modifiers, saving throws, skills, hit points)
//! - A layout compositor that turns a character into a sized region tree
//! - Character file persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use dnd_core::dice::RngRoller;
//! use dnd_core::sheet::{render_sheet, SheetConfig};
//!
//! let character = dnd_core::persist::load_character("rando.json").await?;
//! let tree = render_sheet(&character, 200, &SheetConfig::default(), &mut RngRoller::thread());
//! println!("{} x {}", tree.width, tree.height);
//! ```

pub mod dice;
pub mod persist;
pub mod rules;
pub mod sheet;
pub mod testing;
pub mod world;

// Primary public API
pub use dice::{FixedRoller, RngRoller, Roller};
pub use persist::{load_character, save_character, PersistError};
pub use sheet::{render_sheet, RegionTree, SheetConfig};
pub use world::{Ability, Character, CharacterClass, Skill};
