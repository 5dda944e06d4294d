//! TUI widgets for the character sheet

pub mod sheet;

pub use sheet::{buffer_lines, paint_sheet, SheetViewport};
