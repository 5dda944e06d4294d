//! Character sheet composition.
//!
//! [`render_sheet`] turns a [`Character`](crate::world::Character) into a
//! [`RegionTree`]: nested, sized regions whose leaves are text or table
//! panels. Painting the tree is left to the caller.

pub mod layout;
pub mod region;
pub mod stats;

pub use layout::{render_sheet, DeathSaves, SheetConfig, MIN_SHEET_WIDTH};
pub use region::{
    Align, Axis, Body, Border, Content, Emphasis, LayoutError, Panel, Region, RegionTree, Size,
    Span, Table, TextBlock, TextLine,
};
pub use stats::ProficiencyRules;
